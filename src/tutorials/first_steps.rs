//! Three cubes bouncing, spinning and squashing in place
//!
//! Pure time-driven animation: no input is read. The camera circles the
//! scene at 5°/s.

use std::f32::consts::FRAC_PI_4;
use std::sync::Arc;

use cgmath::Matrix4;

use crate::gfx::camera::turntable_view;
use crate::gfx::geometry::generate_cuboid;
use crate::gfx::resources::Material;
use crate::gfx::scene::{Node, NodeId, SceneGraph, Transform};

use super::{FrameInput, Tutorial};

const CUBE_COUNT: usize = 3;
const CAMERA_SPEED: f32 = 5.0 * std::f32::consts::PI / 180.0;

pub struct FirstSteps {
    cubes: Vec<Option<NodeId>>,
    time: f32,
    camera_angle: f32,
}

impl Default for FirstSteps {
    fn default() -> Self {
        Self::new()
    }
}

impl FirstSteps {
    pub fn new() -> Self {
        Self {
            cubes: Vec::new(),
            time: 0.0,
            camera_angle: (-25f32).to_radians(),
        }
    }

    pub fn time(&self) -> f32 {
        self.time
    }

    pub fn camera_angle(&self) -> f32 {
        self.camera_angle
    }

    fn cube_name(i: usize) -> String {
        format!("Cube{}", i)
    }

    /// Pose of cube `i` at time `t`
    pub fn cube_pose(i: usize, t: f32) -> Transform {
        let bounce = (2.0 * t + FRAC_PI_4).sin().abs();
        let i = i as f32;
        Transform::new()
            .with_translation(35.0 * (i / 2.0 - 0.5), (5.0 + 5.0 * i) * bounce, 0.0)
            .with_rotation(0.0, 2.0 * t, 0.0)
            .with_scale(1.0, 1.0 + 0.2 * bounce, 1.0)
    }
}

impl Tutorial for FirstSteps {
    fn name(&self) -> &str {
        "First Steps"
    }

    fn build_scene(&self) -> SceneGraph {
        let mut scene = SceneGraph::new();
        let mesh = Arc::new(generate_cuboid(7.0, 7.0, 7.0));
        let material = Material::new(1.0, 0.5, 0.5).with_specular(1.0, 1.0, 1.0, 4.0);

        for i in 0..CUBE_COUNT {
            let size = 1.5 * (i + 1) as f32;
            let transform = Transform::new()
                .with_translation(35.0 * (i as f32 / 2.0 - 0.5), 0.0, 0.0)
                .with_scale(size, size, size);
            scene.add_root(
                Node::new()
                    .with_name(Self::cube_name(i))
                    .with_transform(transform)
                    .with_material(material)
                    .with_mesh(Arc::clone(&mesh)),
            );
        }
        scene
    }

    fn initialize(&mut self, scene: &mut SceneGraph) {
        self.cubes = (0..CUBE_COUNT)
            .map(|i| scene.find_by_name(&Self::cube_name(i)))
            .collect();
        log::info!(
            "{}: bound {}/{} cubes",
            self.name(),
            self.cubes.iter().flatten().count(),
            CUBE_COUNT
        );
    }

    fn update(&mut self, scene: &mut SceneGraph, frame: &FrameInput) {
        self.time += frame.delta_time;

        for (i, cube) in self.cubes.iter().enumerate() {
            if let Some(t) = cube.and_then(|id| scene.transform_mut(id)) {
                *t = Self::cube_pose(i, self.time);
            }
        }

        self.camera_angle += CAMERA_SPEED * frame.delta_time;
    }

    fn view_matrix(&self, _scene: &SceneGraph) -> Matrix4<f32> {
        turntable_view(self.camera_angle)
    }
}
