//! Robot arm driven directly from the keyboard
//!
//! | Input        | Part          | Axis | Rate  | Range         |
//! |--------------|---------------|------|-------|---------------|
//! | Left / Right | body          | Y    | 4     | unconstrained |
//! | Up / Down    | upper arm     | X    | 2     | unconstrained |
//! | W / S        | lower arm     | X    | 2     | unconstrained |
//! | A / D        | right finger  | Z    | 3     | [-0.1, 0.75]  |
//!
//! The left finger mirrors the right one. F toggles an open/close animation
//! of the gripper. Dragging with the pointer held swipes the camera around
//! the arm; the swipe keeps spinning and slows down after release.

use std::sync::Arc;

use cgmath::{Matrix4, Vector2};
use winit::keyboard::KeyCode;

use crate::control::{Joint, JointLimit, JointTable, ToggleAnimation, ToggleState};
use crate::gfx::camera::turntable_view;
use crate::gfx::geometry::{generate_cuboid, Mesh};
use crate::gfx::resources::Material;
use crate::gfx::scene::{Axis, Node, NodeId, SceneError, SceneGraph, Transform};
use crate::input::InputAxis;

use super::{FrameInput, Tutorial};

pub const FINGER_LIMIT: JointLimit = JointLimit { min: -0.1, max: 0.75 };
const TOGGLE_KEY: KeyCode = KeyCode::KeyF;

/// Camera radians per unit of horizontal NDC cursor travel
const SWIPE_GAIN: f32 = 3.0;
/// Swipe velocity lost per frame after release
const SWIPE_DAMPING: f32 = 0.015;

pub struct HierarchyInput {
    joints: JointTable,
    gripper: Option<(NodeId, ToggleAnimation)>,
    camera_angle: f32,
    swipe_velocity: f32,
    last_cursor: Option<Vector2<f32>>,
}

impl Default for HierarchyInput {
    fn default() -> Self {
        Self::new()
    }
}

impl HierarchyInput {
    pub fn new() -> Self {
        Self {
            joints: JointTable::new(),
            gripper: None,
            camera_angle: 0.0,
            swipe_velocity: 0.0,
            last_cursor: None,
        }
    }

    pub fn camera_angle(&self) -> f32 {
        self.camera_angle
    }

    pub fn gripper(&self) -> Option<&ToggleAnimation> {
        self.gripper.as_ref().map(|(_, anim)| anim)
    }

    fn part(mesh: &Arc<Mesh>, name: &str, translation: (f32, f32, f32), color: (f32, f32, f32)) -> Node {
        Node::new()
            .with_name(name)
            .with_transform(Transform::new().with_translation(translation.0, translation.1, translation.2))
            .with_material(Material::new(color.0, color.1, color.2))
            .with_mesh(Arc::clone(mesh))
    }

    fn pivot(name: &str, transform: Transform) -> Node {
        Node::new().with_name(name).with_transform(transform)
    }

    fn update_camera(&mut self, frame: &FrameInput) {
        if frame.input.pointer_down {
            if let Some(last) = self.last_cursor {
                self.swipe_velocity = (frame.cursor.x - last.x) * SWIPE_GAIN;
            }
            self.last_cursor = Some(frame.cursor);
        } else {
            self.last_cursor = None;
            let decayed = self.swipe_velocity.abs() - SWIPE_DAMPING;
            self.swipe_velocity = if decayed > 0.0 {
                decayed.copysign(self.swipe_velocity)
            } else {
                0.0
            };
        }
        self.camera_angle += self.swipe_velocity;
    }
}

impl Tutorial for HierarchyInput {
    fn name(&self) -> &str {
        "Hierarchy and Input"
    }

    fn build_scene(&self) -> SceneGraph {
        let mut scene = SceneGraph::new();
        let base = Arc::new(generate_cuboid(10.0, 2.0, 10.0));
        let limb = Arc::new(generate_cuboid(2.0, 10.0, 2.0));
        let finger = Arc::new(generate_cuboid(0.5, 3.0, 1.0));

        scene.add_root(Self::part(&base, "Base", (0.0, 0.0, 0.0), (0.7, 0.7, 0.7)));
        let body = scene.add_root(Self::part(&limb, "Body", (0.0, 6.0, 0.0), (1.0, 0.5, 0.5)));

        // Every add_child below targets a node created just before it
        let build = |scene: &mut SceneGraph| -> Result<(), SceneError> {
            let upper_pivot = scene.add_child(
                body,
                Self::pivot("UpperArmPivot", Transform::new().with_translation(2.0, 4.0, 0.0)),
            )?;
            let upper = scene.add_child(upper_pivot, Self::part(&limb, "UpperArm", (0.0, 4.0, 0.0), (0.5, 1.0, 0.5)))?;
            let lower_pivot = scene.add_child(
                upper,
                Self::pivot("LowerArmPivot", Transform::new().with_translation(-2.0, 4.0, 0.0)),
            )?;
            let lower = scene.add_child(lower_pivot, Self::part(&limb, "LowerArm", (0.0, 4.0, 0.0), (0.5, 0.5, 1.0)))?;

            for (side, x, angle) in [("Right", -0.5, FINGER_LIMIT.max), ("Left", 0.5, -FINGER_LIMIT.max)] {
                let pivot = scene.add_child(
                    lower,
                    Self::pivot(
                        &format!("{}FingerPivot", side),
                        Transform::new().with_translation(x, 4.75, 0.0).with_rotation(0.0, 0.0, angle),
                    ),
                )?;
                scene.add_child(pivot, Self::part(&finger, &format!("{}Finger", side), (0.0, 1.5, 0.0), (0.5, 0.5, 0.5)))?;
            }
            Ok(())
        };
        if let Err(e) = build(&mut scene) {
            log::error!("failed to build robot arm: {}", e);
        }
        scene
    }

    fn initialize(&mut self, scene: &mut SceneGraph) {
        let mut joints = JointTable::new();
        joints.bind(scene, "Body", Joint::new(Axis::Y).with_input(InputAxis::LeftRight).with_rate(4.0));
        joints.bind(scene, "UpperArmPivot", Joint::new(Axis::X).with_input(InputAxis::UpDown).with_rate(2.0));
        joints.bind(scene, "LowerArmPivot", Joint::new(Axis::X).with_input(InputAxis::WS).with_rate(2.0));

        let left = scene.find_by_name("LeftFingerPivot");
        let right = joints.bind(
            scene,
            "RightFingerPivot",
            Joint::new(Axis::Z)
                .with_input(InputAxis::AD)
                .with_rate(3.0)
                .with_limit(FINGER_LIMIT.min, FINGER_LIMIT.max)
                .with_mirror(left),
        );

        self.gripper = right.map(|node| {
            let anim = ToggleAnimation::new(Axis::Z, FINGER_LIMIT, 2.0, ToggleState::Closed).with_mirror(left);
            (node, anim)
        });
        self.joints = joints;
    }

    fn update(&mut self, scene: &mut SceneGraph, frame: &FrameInput) {
        for (node, joint) in self.joints.iter() {
            joint.drive(scene, node, frame.input, frame.delta_time);
        }

        if let Some((node, anim)) = self.gripper.as_mut() {
            if frame.input.was_pressed(TOGGLE_KEY) {
                anim.toggle();
            }
            anim.advance(scene, *node, frame.delta_time);
        }

        self.update_camera(frame);
    }

    fn view_matrix(&self, _scene: &SceneGraph) -> Matrix4<f32> {
        turntable_view(self.camera_angle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::InputSnapshot;

    fn setup() -> (HierarchyInput, SceneGraph) {
        let mut tutorial = HierarchyInput::new();
        let mut scene = tutorial.build_scene();
        tutorial.initialize(&mut scene);
        (tutorial, scene)
    }

    fn step(tutorial: &mut HierarchyInput, scene: &mut SceneGraph, input: &InputSnapshot) {
        let frame = FrameInput {
            delta_time: 1.0 / 60.0,
            input,
            cursor: Vector2::new(0.0, 0.0),
            picks: None,
        };
        tutorial.update(scene, &frame);
    }

    fn angle(scene: &SceneGraph, name: &str, axis: Axis) -> f32 {
        let id = scene.find_by_name(name).unwrap();
        scene.transform(id).unwrap().angle(axis)
    }

    #[test]
    fn test_scene_hierarchy() {
        let (_, scene) = setup();
        assert_eq!(scene.roots().len(), 2);
        assert_eq!(scene.len(), 10);

        // Finger tip sits on top of the whole chain
        let finger = scene.find_by_name("RightFinger").unwrap();
        let world = scene.world_transform(finger).unwrap();
        assert!(world.w.y > 20.0);
    }

    #[test]
    fn test_keys_drive_their_joints() {
        let (mut tutorial, mut scene) = setup();
        let input = InputSnapshot::new()
            .with_axis(InputAxis::LeftRight, 1.0)
            .with_axis(InputAxis::UpDown, -1.0)
            .with_axis(InputAxis::WS, 1.0);
        for _ in 0..60 {
            step(&mut tutorial, &mut scene, &input);
        }
        assert!((angle(&scene, "Body", Axis::Y) - 4.0).abs() < 1e-3);
        assert!((angle(&scene, "UpperArmPivot", Axis::X) + 2.0).abs() < 1e-3);
        assert!((angle(&scene, "LowerArmPivot", Axis::X) - 2.0).abs() < 1e-3);
        assert!((angle(&scene, "RightFingerPivot", Axis::Z) - 0.75).abs() < 1e-6);
    }

    #[test]
    fn test_fingers_stay_in_range_and_mirror() {
        let (mut tutorial, mut scene) = setup();
        let close = InputSnapshot::new().with_axis(InputAxis::AD, -1.0);
        for _ in 0..120 {
            step(&mut tutorial, &mut scene, &close);
        }
        let right = angle(&scene, "RightFingerPivot", Axis::Z);
        assert!(right >= FINGER_LIMIT.min && right < FINGER_LIMIT.min + 3.0 / 60.0 + 1e-5);
        assert_eq!(angle(&scene, "LeftFingerPivot", Axis::Z), -right);
    }

    #[test]
    fn test_double_toggle_restores_gripper() {
        let (mut tutorial, mut scene) = setup();
        let press = InputSnapshot::new().with_pressed(KeyCode::KeyF);
        let idle = InputSnapshot::new();
        let start = angle(&scene, "RightFingerPivot", Axis::Z);

        for _ in 0..2 {
            step(&mut tutorial, &mut scene, &press);
            for _ in 0..600 {
                step(&mut tutorial, &mut scene, &idle);
            }
            assert!(!tutorial.gripper().unwrap().is_active());
        }

        let end = angle(&scene, "RightFingerPivot", Axis::Z);
        assert!((end - start).abs() <= 2.0 / 60.0 + 1e-5);
    }

    #[test]
    fn test_swipe_decays_after_release() {
        let (mut tutorial, mut scene) = setup();
        let held = InputSnapshot::new().with_pointer_down(true);
        for (i, x) in [0.0, 0.02, 0.04].into_iter().enumerate() {
            let frame = FrameInput {
                delta_time: 1.0 / 60.0,
                input: &held,
                cursor: Vector2::new(x, 0.0),
                picks: None,
            };
            tutorial.update(&mut scene, &frame);
            if i == 0 {
                assert_eq!(tutorial.camera_angle(), 0.0);
            }
        }
        let dragged = tutorial.camera_angle();
        assert!(dragged > 0.0);

        let idle = InputSnapshot::new();
        for _ in 0..60 {
            step(&mut tutorial, &mut scene, &idle);
        }
        let settled = tutorial.camera_angle();
        assert!(settled > dragged);
        step(&mut tutorial, &mut scene, &idle);
        assert_eq!(tutorial.camera_angle(), settled);
    }
}
