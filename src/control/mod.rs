//! # Manipulation
//!
//! Everything that mutates node poses in response to input:
//!
//! - [`angle`] - angle wrapping and shortest-path stepping
//! - [`joints`] - joint limits and the node → joint table
//! - [`animation`] - toggle-driven open/close animations
//! - [`tracking`] - heading tracking and follow nodes
//! - [`controller`] - the selection / highlight state machine
//!
//! ## Usage
//!
//! ```
//! use rigkit::control::{ControllerConfig, Joint, JointTable, ManipulationController};
//! use rigkit::gfx::scene::{Axis, Node, SceneGraph, Transform};
//!
//! let mut scene = SceneGraph::new();
//! let arm = scene.add_root(Node::new().with_name("Arm").with_transform(Transform::new()));
//!
//! let mut joints = JointTable::new();
//! joints.bind(&scene, "Arm", Joint::new(Axis::X).with_limit(-0.5, 1.0));
//!
//! let controller = ManipulationController::new(ControllerConfig::new().with_joints(joints));
//! assert!(controller.config().joints.get(arm).is_some());
//! ```

pub mod angle;
pub mod animation;
pub mod controller;
pub mod joints;
pub mod tracking;

pub use angle::{min_angle, shortest_delta, step_towards};
pub use animation::{ToggleAnimation, ToggleState};
pub use controller::{ControllerConfig, ManipulationController, Selection, SelectionPhase};
pub use joints::{Joint, JointLimit, JointTable, JointUpdate};
pub use tracking::{heading_towards, FollowPose, FollowRig, HeadingTracker};
