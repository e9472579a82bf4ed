//! Joint definitions and the per-rig joint table
//!
//! Every controllable part of a rig is described by a [`Joint`]: which Euler
//! component it rotates, which input axis drives it, how fast, and within
//! which range. One routine ([`Joint::advance`]) applies any of them, so rigs
//! are configured with data instead of per-part branches.

use std::collections::HashMap;

use crate::gfx::scene::{Axis, NodeId, SceneGraph};
use crate::input::{InputAxis, InputSnapshot};

/// Allowed rotation range of a joint, in radians
///
/// `min == max == 0` is the unconstrained sentinel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct JointLimit {
    pub min: f32,
    pub max: f32,
}

impl JointLimit {
    pub const UNCONSTRAINED: JointLimit = JointLimit { min: 0.0, max: 0.0 };

    pub fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    pub fn is_unconstrained(&self) -> bool {
        self.min == 0.0 && self.max == 0.0
    }

    /// Whether `angle` may be committed
    pub fn allows(&self, angle: f32) -> bool {
        self.is_unconstrained() || (self.min..=self.max).contains(&angle)
    }
}

impl Default for JointLimit {
    fn default() -> Self {
        Self::UNCONSTRAINED
    }
}

/// Outcome of one joint update
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum JointUpdate {
    /// New angle written to the node
    Committed(f32),
    /// Proposed angle fell outside the limit; nothing was written
    Rejected,
    /// Node has no transform (or no longer exists)
    Missing,
}

/// One rotational degree of freedom of a rig part
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Joint {
    pub axis: Axis,
    pub limit: JointLimit,
    /// Radians per second at full axis deflection
    pub rate: f32,
    pub input: InputAxis,
    /// Node that receives the negated angle on every commit
    pub mirror: Option<NodeId>,
}

impl Joint {
    /// Unconstrained joint driven by A/D at 3 rad/s
    pub fn new(axis: Axis) -> Self {
        Self {
            axis,
            limit: JointLimit::UNCONSTRAINED,
            rate: 3.0,
            input: InputAxis::AD,
            mirror: None,
        }
    }

    pub fn with_limit(mut self, min: f32, max: f32) -> Self {
        self.limit = JointLimit::new(min, max);
        self
    }

    pub fn with_rate(mut self, rate: f32) -> Self {
        self.rate = rate;
        self
    }

    pub fn with_input(mut self, input: InputAxis) -> Self {
        self.input = input;
        self
    }

    pub fn with_mirror(mut self, mirror: Option<NodeId>) -> Self {
        self.mirror = mirror;
        self
    }

    /// Proposes `angle + rate * axis_value * dt` and commits it only if the
    /// limit allows; an out-of-range frame is discarded, not clamped
    pub fn advance(&self, scene: &mut SceneGraph, node: NodeId, axis_value: f32, dt: f32) -> JointUpdate {
        let Some(current) = scene.transform(node).map(|t| t.angle(self.axis)) else {
            return JointUpdate::Missing;
        };
        let proposed = current + self.rate * axis_value * dt;
        if !self.limit.allows(proposed) {
            return JointUpdate::Rejected;
        }
        self.commit(scene, node, proposed);
        JointUpdate::Committed(proposed)
    }

    /// Reads the driving axis from `input` and advances
    pub fn drive(&self, scene: &mut SceneGraph, node: NodeId, input: &InputSnapshot, dt: f32) -> JointUpdate {
        self.advance(scene, node, input.axis(self.input), dt)
    }

    /// Writes `angle` to the node (and its negation to the mirror)
    pub(crate) fn commit(&self, scene: &mut SceneGraph, node: NodeId, angle: f32) {
        if let Some(t) = scene.transform_mut(node) {
            t.set_angle(self.axis, angle);
        }
        if let Some(t) = self.mirror.and_then(|m| scene.transform_mut(m)) {
            t.set_angle(self.axis, -angle);
        }
    }
}

/// Node → joint lookup for a whole rig
///
/// Nodes can be bound to a joint, explicitly locked (never rotated), or left
/// unlisted, in which case the fallback joint (if any) applies.
#[derive(Debug, Clone, Default)]
pub struct JointTable {
    joints: HashMap<NodeId, Option<Joint>>,
    fallback: Option<Joint>,
}

impl JointTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder pattern: Joint used for nodes without an entry
    pub fn with_fallback(mut self, joint: Joint) -> Self {
        self.fallback = Some(joint);
        self
    }

    /// Binds `joint` to `node`; a missing node (failed lookup) is skipped
    pub fn insert(&mut self, node: Option<NodeId>, joint: Joint) {
        if let Some(node) = node {
            self.joints.insert(node, Some(joint));
        }
    }

    /// Marks `node` as never rotated by the table
    pub fn lock(&mut self, node: Option<NodeId>) {
        if let Some(node) = node {
            self.joints.insert(node, None);
        }
    }

    /// Resolves a node name and binds it, logging a lookup miss
    pub fn bind(&mut self, scene: &SceneGraph, name: &str, joint: Joint) -> Option<NodeId> {
        let node = scene.find_by_name(name);
        self.insert(node, joint);
        node
    }

    pub fn get(&self, node: NodeId) -> Option<&Joint> {
        match self.joints.get(&node) {
            Some(entry) => entry.as_ref(),
            None => self.fallback.as_ref(),
        }
    }

    /// Explicitly bound joints (locked entries and the fallback excluded)
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &Joint)> {
        self.joints
            .iter()
            .filter_map(|(node, joint)| joint.as_ref().map(|j| (*node, j)))
    }
}
