//! Pick an excavator part and rotate it with A/D
//!
//! The chassis and the turret yaw freely, the boom, stick and shovel pitch
//! within their limits, and anything else that gets picked (the wheels)
//! spins about X. F curls or uncurls a selected shovel.

use cgmath::{Matrix4, Point3, Vector3};

use crate::control::{ControllerConfig, Joint, ManipulationController};
use crate::gfx::scene::{Axis, SceneGraph};

use super::excavator::{build_excavator, ExcavatorRig, WheelLayout, PART_RATE};
use super::{FrameInput, Tutorial};

#[derive(Default)]
pub struct AssetsPicking {
    rig: ExcavatorRig,
    controller: ManipulationController,
}

impl AssetsPicking {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rig(&self) -> &ExcavatorRig {
        &self.rig
    }
}

impl Tutorial for AssetsPicking {
    fn name(&self) -> &str {
        "Assets and Picking"
    }

    fn build_scene(&self) -> SceneGraph {
        let mut scene = SceneGraph::new();
        if let Err(e) = build_excavator(&mut scene, None, Vector3::new(0.0, 0.0, 0.0), WheelLayout::Corners) {
            log::error!("failed to build excavator: {}", e);
        }
        scene
    }

    fn initialize(&mut self, scene: &mut SceneGraph) {
        self.rig = ExcavatorRig::bind(scene, WheelLayout::Corners);

        let mut joints = self.rig.arm_joints();
        joints.insert(self.rig.main, Joint::new(Axis::Y).with_rate(PART_RATE));

        let mut config = ControllerConfig::new().with_joints(joints);
        config.add_toggle(self.rig.shovel, self.rig.shovel_toggle());
        self.controller = ManipulationController::new(config);
    }

    fn update(&mut self, scene: &mut SceneGraph, frame: &FrameInput) {
        if let Some(picks) = frame.picks {
            self.controller.apply_pick(scene, picks);
        }
        self.controller.update(scene, frame.input, frame.delta_time);
    }

    fn view_matrix(&self, _scene: &SceneGraph) -> Matrix4<f32> {
        Matrix4::look_at_rh(
            Point3::new(-8.0, 7.0, 14.0),
            Point3::new(0.0, 2.0, -2.0),
            Vector3::unit_y(),
        )
    }

    fn controller(&self) -> Option<&ManipulationController> {
        Some(&self.controller)
    }
}
