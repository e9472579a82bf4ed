//! Toggle-driven joint animations (grippers opening and closing)

use crate::gfx::scene::{Axis, NodeId, SceneGraph};

use super::joints::JointLimit;

/// Which end of its range a toggle animation is heading for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleState {
    /// Heading toward the limit's `min`
    Open,
    /// Heading toward the limit's `max`
    Closed,
}

impl ToggleState {
    fn flipped(self) -> Self {
        match self {
            ToggleState::Open => ToggleState::Closed,
            ToggleState::Closed => ToggleState::Open,
        }
    }
}

/// A joint that sweeps between the ends of its range each time it is toggled
///
/// Every toggle flips the target end and starts animating. The angle moves at
/// a fixed rate and the animation stops on the first frame whose step would
/// leave the range; that step is not applied.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ToggleAnimation {
    pub axis: Axis,
    pub limit: JointLimit,
    /// Radians per second
    pub rate: f32,
    /// Node that receives the negated angle on every commit
    pub mirror: Option<NodeId>,
    state: ToggleState,
    active: bool,
}

impl ToggleAnimation {
    pub fn new(axis: Axis, limit: JointLimit, rate: f32, state: ToggleState) -> Self {
        Self {
            axis,
            limit,
            rate,
            mirror: None,
            state,
            active: false,
        }
    }

    pub fn with_mirror(mut self, mirror: Option<NodeId>) -> Self {
        self.mirror = mirror;
        self
    }

    pub fn state(&self) -> ToggleState {
        self.state
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Flips the target end and (re)starts the animation
    pub fn toggle(&mut self) {
        self.state = self.state.flipped();
        self.active = true;
        log::debug!("toggle animation started, heading {:?}", self.state);
    }

    /// Stops animating where the joint currently is
    pub fn cancel(&mut self) {
        self.active = false;
    }

    /// Advances one frame; returns whether the animation is still running
    pub fn advance(&mut self, scene: &mut SceneGraph, node: NodeId, dt: f32) -> bool {
        if !self.active {
            return false;
        }
        let Some(current) = scene.transform(node).map(|t| t.angle(self.axis)) else {
            self.active = false;
            return false;
        };

        let step = match self.state {
            ToggleState::Closed => self.rate * dt,
            ToggleState::Open => -self.rate * dt,
        };
        let proposed = current + step;

        if !self.limit.allows(proposed) {
            log::debug!("toggle animation reached its {:?} end", self.state);
            self.active = false;
            return false;
        }

        if let Some(t) = scene.transform_mut(node) {
            t.set_angle(self.axis, proposed);
        }
        if let Some(t) = self.mirror.and_then(|m| scene.transform_mut(m)) {
            t.set_angle(self.axis, -proposed);
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gfx::scene::{Node, Transform};

    fn gripper() -> (SceneGraph, NodeId, NodeId, ToggleAnimation) {
        let mut scene = SceneGraph::new();
        let right = scene.add_root(Node::new().with_transform(Transform::new().with_rotation(0.0, 0.0, 0.75)));
        let left = scene.add_root(Node::new().with_transform(Transform::new().with_rotation(0.0, 0.0, -0.75)));
        let anim = ToggleAnimation::new(Axis::Z, JointLimit::new(-0.1, 0.75), 2.0, ToggleState::Closed)
            .with_mirror(Some(left));
        (scene, right, left, anim)
    }

    fn run_until_idle(scene: &mut SceneGraph, node: NodeId, anim: &mut ToggleAnimation) -> usize {
        let mut frames = 0;
        while anim.advance(scene, node, 1.0 / 60.0) {
            frames += 1;
            assert!(frames < 10_000, "animation never terminated");
        }
        frames
    }

    #[test]
    fn test_idle_animation_does_nothing() {
        let (mut scene, right, _, mut anim) = gripper();
        assert!(!anim.advance(&mut scene, right, 1.0));
        assert_eq!(scene.transform(right).unwrap().rotation.z, 0.75);
    }

    #[test]
    fn test_open_stops_inside_range() {
        let (mut scene, right, left, mut anim) = gripper();
        anim.toggle();
        assert_eq!(anim.state(), ToggleState::Open);

        let frames = run_until_idle(&mut scene, right, &mut anim);
        assert!(frames > 0);
        assert!(!anim.is_active());

        let z = scene.transform(right).unwrap().rotation.z;
        assert!(z >= -0.1 && z < -0.1 + 2.0 / 60.0 + 1e-5);
        assert_eq!(scene.transform(left).unwrap().rotation.z, -z);
    }

    #[test]
    fn test_double_toggle_returns_to_start() {
        let (mut scene, right, _, mut anim) = gripper();
        anim.toggle();
        run_until_idle(&mut scene, right, &mut anim);
        anim.toggle();
        run_until_idle(&mut scene, right, &mut anim);

        let z = scene.transform(right).unwrap().rotation.z;
        assert!((z - 0.75).abs() <= 2.0 / 60.0 + 1e-5);
    }

    #[test]
    fn test_toggle_mid_flight_reverses() {
        let (mut scene, right, _, mut anim) = gripper();
        anim.toggle();
        for _ in 0..5 {
            anim.advance(&mut scene, right, 1.0 / 60.0);
        }
        anim.toggle();
        assert_eq!(anim.state(), ToggleState::Closed);
        run_until_idle(&mut scene, right, &mut anim);
        let z = scene.transform(right).unwrap().rotation.z;
        assert!((z - 0.75).abs() <= 2.0 / 60.0 + 1e-5);
    }
}
