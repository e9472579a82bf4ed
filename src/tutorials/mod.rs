//! # Tutorials
//!
//! The four tutorial rigs, each a [`Tutorial`] driven once per frame by
//! [`RigApp`](crate::app::RigApp):
//!
//! - [`FirstSteps`] - three bouncing, spinning cubes under a turntable camera
//! - [`HierarchyInput`] - keyboard-driven robot arm with an animated gripper
//! - [`AssetsPicking`] - pick-and-rotate excavator parts
//! - [`Driving`] - drivable excavator with target tracking and a chase camera
//!
//! Every tutorial can build a procedural stand-in for its asset file, so all
//! of them run headless.

pub mod assets_picking;
pub mod driving;
pub mod excavator;
pub mod first_steps;
pub mod hierarchy_input;

pub use assets_picking::AssetsPicking;
pub use driving::{DriveConfig, Driving};
pub use first_steps::FirstSteps;
pub use hierarchy_input::HierarchyInput;

use cgmath::{Matrix4, Vector2};

use crate::control::ManipulationController;
use crate::gfx::picking::PickResult;
use crate::gfx::scene::SceneGraph;
use crate::input::InputSnapshot;

/// Everything a tutorial sees of the current frame
#[derive(Debug, Clone, Copy)]
pub struct FrameInput<'a> {
    /// Seconds since the previous frame, never negative
    pub delta_time: f32,
    pub input: &'a InputSnapshot,
    /// Cursor in normalized device coordinates
    pub cursor: Vector2<f32>,
    /// Pick results of this frame, nearest first; `None` when no pick was made
    pub picks: Option<&'a [PickResult]>,
}

/// Per-frame logic of one tutorial rig
///
/// Implementations bind the scene parts they drive in [`initialize`] and
/// must tolerate parts that failed to bind: every operation on a missing
/// part is skipped.
///
/// [`initialize`]: Tutorial::initialize
pub trait Tutorial {
    /// Display name
    fn name(&self) -> &str;

    /// Procedural stand-in for the tutorial's asset file
    fn build_scene(&self) -> SceneGraph;

    /// Resolves the named parts this tutorial drives
    ///
    /// Called once before the first update, with either [`build_scene`]'s
    /// output or an externally loaded scene.
    ///
    /// [`build_scene`]: Tutorial::build_scene
    fn initialize(&mut self, scene: &mut SceneGraph);

    /// Advances the tutorial by one frame
    fn update(&mut self, scene: &mut SceneGraph, frame: &FrameInput);

    /// Camera view matrix for the current state
    fn view_matrix(&self, scene: &SceneGraph) -> Matrix4<f32>;

    /// Selection controller, for tutorials that support picking
    fn controller(&self) -> Option<&ManipulationController> {
        None
    }
}
