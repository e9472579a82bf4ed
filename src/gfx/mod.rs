//! # Graphics Module
//!
//! Scene-side building blocks shared by every tutorial rig. Nothing in here
//! talks to a GPU; an external renderer consumes the composed world
//! transforms and materials.
//!
//! ## Architecture Overview
//!
//! - **Scene Graph** ([`scene`]) - Node forest and world-transform composition
//! - **Picking** ([`picking`]) - Depth-sorted ray casts from NDC into the scene
//! - **Geometry** ([`geometry`]) - Shared triangle meshes and primitives
//! - **Resources** ([`resources`]) - Node materials
//! - **Camera** ([`camera`]) - Projection and NDC helpers

pub mod camera;
pub mod geometry;
pub mod picking;
pub mod resources;
pub mod scene;

// Re-export commonly used types
pub use picking::{PickResult, ScenePicker};
pub use scene::{Node, NodeId, SceneGraph};
