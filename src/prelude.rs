//! # Rigkit Prelude
//!
//! Commonly used types in one import.
//!
//! ## Usage
//!
//! ```rust
//! use rigkit::prelude::*;
//!
//! let mut app = RigApp::new(HierarchyInput::new());
//! let view = app.view_matrix();
//! let projection = Projection::for_viewport(1200, 800).matrix();
//!
//! let input = InputSnapshot::new().with_axis(InputAxis::LeftRight, 1.0);
//! let transforms = app.update(1.0 / 60.0, &input, cgmath::Vector2::new(0.0, 0.0), view, projection);
//! assert_eq!(transforms.len(), app.scene().len());
//! ```

// Re-export core application types
pub use crate::app::RigApp;
pub use crate::init_logging;

// Re-export graphics and scene types
pub use crate::gfx::camera::{screen_to_ndc, Projection};
pub use crate::gfx::geometry::{generate_cuboid, generate_sphere, Mesh};
pub use crate::gfx::picking::{PickResult, ScenePicker};
pub use crate::gfx::resources::{Color, Material};
pub use crate::gfx::scene::{Axis, Node, NodeId, SceneError, SceneGraph, Transform, WorldTransforms};

// Re-export manipulation types
pub use crate::control::{
    ControllerConfig, FollowRig, HeadingTracker, Joint, JointLimit, JointTable, ManipulationController,
    SelectionPhase, ToggleAnimation, ToggleState,
};

// Re-export input and tutorials
pub use crate::input::{InputAxis, InputSnapshot, InputState};
pub use crate::tutorials::{AssetsPicking, DriveConfig, Driving, FirstSteps, FrameInput, HierarchyInput, Tutorial};
