//! Procedural excavator shared by the picking and driving tutorials
//!
//! Part hierarchy (forward is -Z):
//!
//! ```text
//! Main            chassis
//! ├── Arm1        turret, yaws about Y
//! │   └── Arm2    boom, pitches about X
//! │       └── Arm3        stick, pitches about X
//! │           └── Shovel  pitches about X
//! └── wheels      Wheel1..4 or WheelFront/WheelBack
//! ```
//!
//! Every part's mesh is offset so its node origin sits on the joint pivot.

use std::sync::Arc;

use cgmath::Vector3;

use crate::control::{Joint, JointLimit, JointTable, ToggleAnimation, ToggleState};
use crate::gfx::geometry::{generate_cuboid, Mesh};
use crate::gfx::resources::Material;
use crate::gfx::scene::{Axis, Node, NodeId, SceneError, SceneGraph, Transform};

pub const MAIN: &str = "Main";
pub const ARM1: &str = "Arm1";
pub const ARM2: &str = "Arm2";
pub const ARM3: &str = "Arm3";
pub const SHOVEL: &str = "Shovel";

pub const ARM2_LIMIT: JointLimit = JointLimit { min: -0.01, max: 2.0 };
pub const ARM3_LIMIT: JointLimit = JointLimit { min: -0.125, max: 2.0 };
pub const SHOVEL_LIMIT: JointLimit = JointLimit { min: -1.5, max: 1.0 };

/// Radians per second for every part rotated with A/D
pub const PART_RATE: f32 = 3.0;
const SHOVEL_TOGGLE_RATE: f32 = 2.0;

const YELLOW: (f32, f32, f32) = (0.95, 0.75, 0.1);
const DARK_YELLOW: (f32, f32, f32) = (0.85, 0.6, 0.1);
const STEEL: (f32, f32, f32) = (0.55, 0.55, 0.6);
const RUBBER: (f32, f32, f32) = (0.15, 0.15, 0.15);

/// How the wheels are modelled
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WheelLayout {
    /// Four separate wheels, `Wheel1`..`Wheel4`
    Corners,
    /// Two full-width axles, `WheelFront` and `WheelBack`
    Axles,
}

impl WheelLayout {
    pub fn names(self) -> &'static [&'static str] {
        match self {
            WheelLayout::Corners => &["Wheel1", "Wheel2", "Wheel3", "Wheel4"],
            WheelLayout::Axles => &["WheelFront", "WheelBack"],
        }
    }
}

fn part(name: &str, mesh: Mesh, transform: Transform, color: (f32, f32, f32)) -> Node {
    Node::new()
        .with_name(name)
        .with_transform(transform)
        .with_material(Material::new(color.0, color.1, color.2))
        .with_mesh(Arc::new(mesh))
}

/// Adds an excavator under `parent` (or as a root) and returns its `Main` node
pub fn build_excavator(
    scene: &mut SceneGraph,
    parent: Option<NodeId>,
    translation: Vector3<f32>,
    layout: WheelLayout,
) -> Result<NodeId, SceneError> {
    let chassis = part(
        MAIN,
        generate_cuboid(3.0, 1.5, 5.0).translated(Vector3::new(0.0, 0.75, 0.0)),
        Transform::new().with_translation(translation.x, translation.y + 0.6, translation.z),
        YELLOW,
    );
    let main = match parent {
        Some(parent) => scene.add_child(parent, chassis)?,
        None => scene.add_root(chassis),
    };

    let arm1 = scene.add_child(
        main,
        part(
            ARM1,
            generate_cuboid(2.5, 1.5, 2.5).translated(Vector3::new(0.0, 0.75, 0.0)),
            Transform::new().with_translation(0.0, 1.5, 0.5),
            DARK_YELLOW,
        ),
    )?;
    let arm2 = scene.add_child(
        arm1,
        part(
            ARM2,
            generate_cuboid(0.6, 0.6, 4.0).translated(Vector3::new(0.0, 0.0, -2.0)),
            Transform::new().with_translation(0.0, 1.0, -1.0).with_rotation(0.4, 0.0, 0.0),
            YELLOW,
        ),
    )?;
    let arm3 = scene.add_child(
        arm2,
        part(
            ARM3,
            generate_cuboid(0.5, 0.5, 3.0).translated(Vector3::new(0.0, 0.0, -1.5)),
            Transform::new().with_translation(0.0, 0.0, -4.0),
            YELLOW,
        ),
    )?;
    scene.add_child(
        arm3,
        part(
            SHOVEL,
            generate_cuboid(1.5, 1.0, 1.0).translated(Vector3::new(0.0, -0.5, -0.5)),
            Transform::new().with_translation(0.0, 0.0, -3.0),
            STEEL,
        ),
    )?;

    let wheels: Vec<(Vector3<f32>, Mesh)> = match layout {
        WheelLayout::Corners => [(-1.7, -1.8), (1.7, -1.8), (-1.7, 1.8), (1.7, 1.8)]
            .into_iter()
            .map(|(x, z)| (Vector3::new(x, 0.0, z), generate_cuboid(0.4, 1.2, 1.2)))
            .collect(),
        WheelLayout::Axles => [-1.8, 1.8]
            .into_iter()
            .map(|z| (Vector3::new(0.0, 0.0, z), generate_cuboid(3.8, 1.2, 1.2)))
            .collect(),
    };
    for (name, (offset, mesh)) in layout.names().iter().zip(wheels) {
        scene.add_child(
            main,
            part(name, mesh, Transform::new().with_translation(offset.x, offset.y, offset.z), RUBBER),
        )?;
    }

    Ok(main)
}

/// Resolved excavator parts; any part may be missing
#[derive(Debug, Clone, Default)]
pub struct ExcavatorRig {
    pub main: Option<NodeId>,
    pub arm1: Option<NodeId>,
    pub arm2: Option<NodeId>,
    pub arm3: Option<NodeId>,
    pub shovel: Option<NodeId>,
    pub wheels: Vec<Option<NodeId>>,
}

impl ExcavatorRig {
    /// Looks up every part by name, logging the ones that are missing
    pub fn bind(scene: &SceneGraph, layout: WheelLayout) -> Self {
        Self {
            main: scene.find_by_name(MAIN),
            arm1: scene.find_by_name(ARM1),
            arm2: scene.find_by_name(ARM2),
            arm3: scene.find_by_name(ARM3),
            shovel: scene.find_by_name(SHOVEL),
            wheels: layout.names().iter().map(|name| scene.find_by_name(name)).collect(),
        }
    }

    /// A/D joints of the arm; the chassis and wheels are left to the caller
    pub fn arm_joints(&self) -> JointTable {
        let mut joints = JointTable::new().with_fallback(Joint::new(Axis::X).with_rate(PART_RATE));
        joints.insert(self.arm1, Joint::new(Axis::Y).with_rate(PART_RATE));
        for (node, limit) in [
            (self.arm2, ARM2_LIMIT),
            (self.arm3, ARM3_LIMIT),
            (self.shovel, SHOVEL_LIMIT),
        ] {
            joints.insert(node, Joint::new(Axis::X).with_rate(PART_RATE).with_limit(limit.min, limit.max));
        }
        joints
    }

    /// F-key curl/uncurl of the shovel
    pub fn shovel_toggle(&self) -> ToggleAnimation {
        ToggleAnimation::new(Axis::X, SHOVEL_LIMIT, SHOVEL_TOGGLE_RATE, ToggleState::Open)
    }

    pub fn wheel_nodes(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.wheels.iter().flatten().copied()
    }
}
