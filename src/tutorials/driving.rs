//! Drive the excavator around a small yard
//!
//! - Select the chassis (`Main`) to drive it: W/S moves, A/D steers.
//! - Select the dune to make the excavator turn toward it on the spot.
//! - Select an arm part to rotate it with A/D, as in the picking tutorial.
//!
//! Wheels, ground and container cannot be selected; picking them clears the
//! selection. A chase camera node trails the excavator at a fixed distance.

use std::f32::consts::{PI, TAU};
use std::sync::Arc;

use cgmath::{Matrix4, Point3, Rad, SquareMatrix, Vector3};

use crate::control::{heading_towards, ControllerConfig, FollowRig, HeadingTracker, ManipulationController};
use crate::gfx::geometry::{generate_cuboid, generate_sphere};
use crate::gfx::resources::Material;
use crate::gfx::scene::{Node, NodeId, SceneError, SceneGraph, Transform};

use super::excavator::{build_excavator, ExcavatorRig, WheelLayout};
use super::{FrameInput, Tutorial};

pub const CONTAINER: &str = "Container";
pub const DUNE: &str = "Icosphere";
pub const GROUND: &str = "Ground";
pub const CAMERA: &str = "Camera";

/// Driving and chase-camera tunables
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DriveConfig {
    /// Units per second at full W/S deflection
    pub speed: f32,
    /// Wheel revolutions per unit of W/S travel
    pub wheel_turns: f32,
    /// Heading change in radians per second at full A/D while moving
    pub turn_rate: f32,
    /// Front wheel steering angle at full A/D deflection
    pub max_steer: f32,
    pub follow_distance: f32,
    /// Radians per frame when turning toward the dune
    pub tracking_step: f32,
    /// Camera height above its node
    pub camera_height: f32,
    /// Downward tilt of the chase camera
    pub camera_pitch: f32,
}

impl Default for DriveConfig {
    fn default() -> Self {
        Self {
            speed: 6.0,
            wheel_turns: 0.75,
            turn_rate: 1.0,
            max_steer: 0.5,
            follow_distance: 15.0,
            tracking_step: 0.025,
            camera_height: 6.0,
            camera_pitch: PI / 7.3,
        }
    }
}

impl DriveConfig {
    pub fn with_speed(mut self, speed: f32) -> Self {
        self.speed = speed;
        self
    }

    pub fn with_follow_distance(mut self, distance: f32) -> Self {
        self.follow_distance = distance;
        self
    }

    pub fn with_tracking_step(mut self, step: f32) -> Self {
        self.tracking_step = step;
        self
    }
}

pub struct Driving {
    config: DriveConfig,
    rig: ExcavatorRig,
    dune: Option<NodeId>,
    camera: Option<NodeId>,
    controller: ManipulationController,
    tracker: HeadingTracker,
    follow: FollowRig,
    tracking_done: bool,
}

impl Default for Driving {
    fn default() -> Self {
        Self::new(DriveConfig::default())
    }
}

impl Driving {
    pub fn new(config: DriveConfig) -> Self {
        Self {
            config,
            rig: ExcavatorRig::default(),
            dune: None,
            camera: None,
            controller: ManipulationController::default(),
            tracker: HeadingTracker::new(config.tracking_step),
            follow: FollowRig::new(config.follow_distance),
            tracking_done: false,
        }
    }

    pub fn config(&self) -> &DriveConfig {
        &self.config
    }

    pub fn rig(&self) -> &ExcavatorRig {
        &self.rig
    }

    pub fn dune(&self) -> Option<NodeId> {
        self.dune
    }

    pub fn camera(&self) -> Option<NodeId> {
        self.camera
    }

    fn populate(scene: &mut SceneGraph) -> Result<(), SceneError> {
        build_excavator(scene, None, Vector3::new(0.0, 0.0, 0.0), WheelLayout::Axles)?;

        scene.add_root(
            Node::new()
                .with_name(CONTAINER)
                .with_transform(Transform::new().with_translation(-2.0, 0.0, 10.0))
                .with_material(Material::new(0.2, 0.4, 0.8))
                .with_mesh(Arc::new(generate_cuboid(3.0, 3.0, 6.0).translated(Vector3::new(0.0, 1.5, 0.0)))),
        );
        scene.add_root(
            Node::new()
                .with_name(DUNE)
                .with_transform(Transform::new().with_translation(6.0, 0.0, 14.0).with_scale(3.0, 1.5, 3.0))
                .with_material(Material::new(0.9, 0.8, 0.55))
                .with_mesh(Arc::new(generate_sphere(16, 8))),
        );
        scene.add_root(
            Node::new()
                .with_name(GROUND)
                .with_transform(Transform::new().with_translation(0.0, -1.0, 0.0))
                .with_material(Material::new(0.8, 0.8, 0.8).with_specular(1.0, 1.0, 1.0, 2.0))
                .with_mesh(Arc::new(generate_cuboid(400.0, 2.0, 400.0))),
        );
        scene.add_root(
            Node::new()
                .with_name(CAMERA)
                .with_transform(Transform::new().with_translation(0.0, 0.0, 10.0)),
        );
        Ok(())
    }

    fn translation(scene: &SceneGraph, node: Option<NodeId>) -> Option<Vector3<f32>> {
        node.and_then(|n| scene.transform(n)).map(|t| t.translation)
    }

    /// Turns the chassis one step toward the dune
    fn track_dune(&mut self, scene: &mut SceneGraph, main: NodeId) {
        let (Some(from), Some(to)) = (Self::translation(scene, Some(main)), Self::translation(scene, self.dune)) else {
            return;
        };
        let Some(desired) = heading_towards(from, to) else {
            return;
        };
        let Some(t) = scene.transform_mut(main) else {
            return;
        };

        if self.tracker.has_arrived(t.rotation.y, desired) {
            if !self.tracking_done {
                log::debug!("excavator faces the dune");
                self.tracking_done = true;
            }
            return;
        }
        self.tracking_done = false;
        t.rotation.y = self.tracker.advance(t.rotation.y, desired);
    }

    /// Moves and steers the chassis from W/S and A/D
    fn drive(&self, scene: &mut SceneGraph, main: NodeId, frame: &FrameInput) {
        let throttle = frame.input.ws * frame.delta_time;
        let steer = frame.input.ad;

        if let Some(t) = scene.transform_mut(main) {
            // Steering reverses when backing up
            if throttle != 0.0 {
                t.rotation.y -= steer * self.config.turn_rate * frame.delta_time * throttle.signum();
            }
            let yaw = t.rotation.y;
            t.translation += Vector3::new(-yaw.sin(), 0.0, -yaw.cos()) * throttle * self.config.speed;
        }

        let spin = self.config.wheel_turns * throttle * TAU;
        for wheel in self.rig.wheel_nodes() {
            if let Some(t) = scene.transform_mut(wheel) {
                t.rotation.x -= spin;
            }
        }

        if let Some(t) = self.rig.wheels.first().copied().flatten().and_then(|w| scene.transform_mut(w)) {
            t.rotation.y = -steer * self.config.max_steer;
        }
    }

    /// Keeps the camera node trailing the chassis
    fn follow_chassis(&self, scene: &mut SceneGraph, old: Vector3<f32>, new: Vector3<f32>) {
        let Some(camera) = self.camera else { return };
        let Some(t) = scene.transform_mut(camera) else { return };

        // Follow in the camera's horizontal plane
        let height = t.translation.y;
        let flat = |v: Vector3<f32>| Vector3::new(v.x, height, v.z);

        if let Some(pose) = self.follow.follow(flat(old), flat(new), t.translation) {
            t.translation = pose.position;
            t.rotation.y = pose.heading;
        }
    }
}

impl Tutorial for Driving {
    fn name(&self) -> &str {
        "Driving"
    }

    fn build_scene(&self) -> SceneGraph {
        let mut scene = SceneGraph::new();
        if let Err(e) = Self::populate(&mut scene) {
            log::error!("failed to build driving yard: {}", e);
        }
        scene
    }

    fn initialize(&mut self, scene: &mut SceneGraph) {
        self.rig = ExcavatorRig::bind(scene, WheelLayout::Axles);
        self.dune = scene.find_by_name(DUNE);
        self.camera = scene.find_by_name(CAMERA);

        let mut joints = self.rig.arm_joints();
        joints.lock(self.rig.main);
        joints.lock(self.dune);

        let mut config = ControllerConfig::new().with_joints(joints);
        for &wheel in &self.rig.wheels {
            config.exclude(wheel);
        }
        config.exclude(scene.find_by_name(GROUND));
        config.exclude(scene.find_by_name(CONTAINER));
        self.controller = ManipulationController::new(config);
        self.tracking_done = false;
    }

    fn update(&mut self, scene: &mut SceneGraph, frame: &FrameInput) {
        if let Some(picks) = frame.picks {
            self.controller.apply_pick(scene, picks);
        }
        self.controller.update(scene, frame.input, frame.delta_time);

        let Some(main) = self.rig.main else { return };
        let Some(old) = Self::translation(scene, Some(main)) else { return };

        let selected = self.controller.selected();
        if selected.is_some() && selected == self.dune {
            self.track_dune(scene, main);
        } else if selected == Some(main) {
            self.drive(scene, main, frame);
        }

        if let Some(new) = Self::translation(scene, Some(main)) {
            self.follow_chassis(scene, old, new);
        }
    }

    fn view_matrix(&self, scene: &SceneGraph) -> Matrix4<f32> {
        let Some(t) = self.camera.and_then(|c| scene.transform(c)) else {
            return Matrix4::look_at_rh(
                Point3::new(0.0, self.config.camera_height, self.config.follow_distance),
                Point3::new(0.0, 0.0, 0.0),
                Vector3::unit_y(),
            );
        };

        let eye = t.translation + Vector3::new(0.0, self.config.camera_height, 0.0);
        let camera = Matrix4::from_translation(eye)
            * Matrix4::from_angle_y(Rad(t.rotation.y))
            * Matrix4::from_angle_x(Rad(-self.config.camera_pitch));
        camera.invert().unwrap_or_else(Matrix4::identity)
    }

    fn controller(&self) -> Option<&ManipulationController> {
        Some(&self.controller)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::control::shortest_delta;
    use crate::gfx::picking::PickResult;
    use crate::input::{InputAxis, InputSnapshot};
    use cgmath::{InnerSpace, Vector2, Vector4};

    fn setup() -> (Driving, SceneGraph) {
        let mut tutorial = Driving::default();
        let mut scene = tutorial.build_scene();
        tutorial.initialize(&mut scene);
        (tutorial, scene)
    }

    fn pick(node: NodeId) -> [PickResult; 1] {
        [PickResult {
            node,
            clip_pos: Vector3::new(0.0, 0.0, 0.5),
            point: Vector3::new(0.0, 0.0, 0.0),
        }]
    }

    fn step(tutorial: &mut Driving, scene: &mut SceneGraph, input: &InputSnapshot, picks: Option<&[PickResult]>) {
        let frame = FrameInput {
            delta_time: 0.1,
            input,
            cursor: Vector2::new(0.0, 0.0),
            picks,
        };
        tutorial.update(scene, &frame);
    }

    fn main_pose(tutorial: &Driving, scene: &SceneGraph) -> Transform {
        *scene.transform(tutorial.rig().main.unwrap()).unwrap()
    }

    #[test]
    fn test_excluded_parts_never_select() {
        let (mut tutorial, mut scene) = setup();
        let main = tutorial.rig().main.unwrap();
        let idle = InputSnapshot::new();

        step(&mut tutorial, &mut scene, &idle, Some(&pick(main)));
        assert_eq!(tutorial.controller().unwrap().selected(), Some(main));

        for name in ["WheelFront", "WheelBack", GROUND, CONTAINER] {
            let node = scene.find_by_name(name).unwrap();
            step(&mut tutorial, &mut scene, &idle, Some(&pick(node)));
            assert_eq!(tutorial.controller().unwrap().selected(), None, "{} was selectable", name);
        }
    }

    #[test]
    fn test_driving_moves_forward_and_spins_wheels() {
        let (mut tutorial, mut scene) = setup();
        let main = tutorial.rig().main.unwrap();
        let forward = InputSnapshot::new().with_axis(InputAxis::WS, 1.0);

        step(&mut tutorial, &mut scene, &forward, Some(&pick(main)));
        for _ in 0..9 {
            step(&mut tutorial, &mut scene, &forward, None);
        }

        let pose = main_pose(&tutorial, &scene);
        assert!((pose.translation.z + 6.0).abs() < 1e-4);
        assert!(pose.translation.x.abs() < 1e-5);
        assert_eq!(pose.rotation.y, 0.0);

        let wheel = scene.find_by_name("WheelBack").unwrap();
        assert!((scene.transform(wheel).unwrap().rotation.x + 0.75 * TAU).abs() < 1e-4);
    }

    #[test]
    fn test_steering() {
        let (mut tutorial, mut scene) = setup();
        let main = tutorial.rig().main.unwrap();
        let front = scene.find_by_name("WheelFront").unwrap();

        // Locked chassis: A/D without throttle neither turns nor moves it
        let turn_only = InputSnapshot::new().with_axis(InputAxis::AD, 1.0);
        step(&mut tutorial, &mut scene, &turn_only, Some(&pick(main)));
        assert_eq!(main_pose(&tutorial, &scene).rotation.y, 0.0);
        assert_eq!(scene.transform(front).unwrap().rotation.y, -0.5);

        let forward_right = turn_only.clone().with_axis(InputAxis::WS, 1.0);
        step(&mut tutorial, &mut scene, &forward_right, None);
        assert!((main_pose(&tutorial, &scene).rotation.y + 0.1).abs() < 1e-6);

        let reverse_right = turn_only.clone().with_axis(InputAxis::WS, -1.0);
        step(&mut tutorial, &mut scene, &reverse_right, None);
        assert!(main_pose(&tutorial, &scene).rotation.y.abs() < 1e-6);

        step(&mut tutorial, &mut scene, &InputSnapshot::new(), None);
        assert_eq!(scene.transform(front).unwrap().rotation.y, 0.0);
    }

    #[test]
    fn test_camera_keeps_follow_distance() {
        let (mut tutorial, mut scene) = setup();
        let main = tutorial.rig().main.unwrap();
        let camera = tutorial.camera().unwrap();
        let input = InputSnapshot::new()
            .with_axis(InputAxis::WS, 1.0)
            .with_axis(InputAxis::AD, 0.5);

        step(&mut tutorial, &mut scene, &input, Some(&pick(main)));
        for _ in 0..30 {
            step(&mut tutorial, &mut scene, &input, None);
            let m = scene.transform(main).unwrap().translation;
            let c = scene.transform(camera).unwrap().translation;
            let horizontal = Vector3::new(c.x - m.x, 0.0, c.z - m.z);
            assert!((horizontal.magnitude() - 15.0).abs() < 1e-3);
        }
    }

    #[test]
    fn test_dune_tracking_takes_short_way() {
        let (mut tutorial, mut scene) = setup();
        let main = tutorial.rig().main.unwrap();
        let dune = tutorial.dune().unwrap();
        let idle = InputSnapshot::new();

        let from = scene.transform(main).unwrap().translation;
        let to = scene.transform(dune).unwrap().translation;
        let desired = heading_towards(from, to).unwrap();

        step(&mut tutorial, &mut scene, &idle, Some(&pick(dune)));
        let mut previous = main_pose(&tutorial, &scene).rotation.y;
        let mut remaining = shortest_delta(previous, desired).abs();
        for _ in 0..400 {
            step(&mut tutorial, &mut scene, &idle, None);
            let yaw = main_pose(&tutorial, &scene).rotation.y;
            assert!((yaw - previous).abs() <= 0.025 + 1e-6);
            let now = shortest_delta(yaw, desired).abs();
            assert!(now <= remaining + 1e-6, "tracking moved away from the target");
            previous = yaw;
            remaining = now;
        }
        assert!(remaining < 1e-4);
        // The dune is behind and to the right: the short way turns clockwise
        assert!(previous < 0.0);
    }

    #[test]
    fn test_view_looks_from_camera_node() {
        let (tutorial, scene) = setup();
        let camera = scene.transform(tutorial.camera().unwrap()).unwrap().translation;
        let eye = camera + Vector3::new(0.0, 6.0, 0.0);

        let view = tutorial.view_matrix(&scene);
        let in_view = view * Vector4::new(eye.x, eye.y, eye.z, 1.0);
        assert!(in_view.truncate().magnitude() < 1e-4);
    }
}
