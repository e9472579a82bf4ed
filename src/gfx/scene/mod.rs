//! # Scene Graph Module
//!
//! The hierarchical half of the engine: an ordered forest of nodes, each of
//! which may carry a local [`Transform`], a [`Material`] and a shared mesh.
//!
//! ## Key Components
//!
//! - [`SceneGraph`] - Owns every node and composes world transforms
//! - [`Node`] - Builder-style node description with optional components
//! - [`NodeId`] - Stable, non-owning handle used everywhere else (selection,
//!   joint tables, pick results)
//! - [`Transform`] - Translation, Euler rotation and scale
//!
//! ## Usage
//!
//! ```rust
//! use rigkit::gfx::scene::{Node, SceneGraph, Transform};
//!
//! let mut scene = SceneGraph::new();
//! let body = scene.add_root(
//!     Node::new()
//!         .with_name("Body")
//!         .with_transform(Transform::new().with_translation(0.0, 6.0, 0.0)),
//! );
//! let arm = scene
//!     .add_child(body, Node::new().with_name("UpperArm").with_transform(Transform::new()))
//!     .unwrap();
//!
//! assert_eq!(scene.find_by_name("UpperArm"), Some(arm));
//! assert_eq!(scene.world_transform(arm), scene.world_transform(body));
//! ```
//!
//! [`Material`]: crate::gfx::resources::Material

pub mod node;
pub mod scene;
pub mod transform;

// Re-export main types
pub use node::{Node, NodeId};
pub use scene::{DepthFirst, NodeTransformUniform, SceneError, SceneGraph, WorldTransforms};
pub use transform::{Axis, Transform};
