//! Heading tracking and follow-node updates for the vehicle rig
//!
//! Headings are yaw angles about +Y with the rig's forward direction along
//! local -Z, so a heading `h` faces `(-sin h, 0, -cos h)`.

use cgmath::{InnerSpace, Vector3};

use super::angle::{min_angle, shortest_delta, step_towards};

/// Heading (wrapped into [0, 2π)) that makes a node at `from` face `to`
///
/// `None` when the two points share the same horizontal position.
pub fn heading_towards(from: Vector3<f32>, to: Vector3<f32>) -> Option<f32> {
    let d = to - from;
    if d.x.abs() <= f32::EPSILON && d.z.abs() <= f32::EPSILON {
        return None;
    }
    Some(min_angle((-d.x).atan2(-d.z)))
}

/// Turns a heading toward a desired heading at a fixed per-frame step
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HeadingTracker {
    /// Radians per frame
    pub step: f32,
}

impl Default for HeadingTracker {
    fn default() -> Self {
        Self { step: 0.025 }
    }
}

impl HeadingTracker {
    pub fn new(step: f32) -> Self {
        Self { step }
    }

    /// One frame of tracking along the shorter arc
    pub fn advance(&self, current: f32, desired: f32) -> f32 {
        step_towards(current, desired, self.step)
    }

    /// Whether `current` already faces `desired`
    pub fn has_arrived(&self, current: f32, desired: f32) -> bool {
        shortest_delta(current, desired).abs() <= f32::EPSILON * 16.0
    }
}

/// New pose of a trailing node (a chase camera)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FollowPose {
    pub position: Vector3<f32>,
    /// Heading facing back toward the controlled node
    pub heading: f32,
}

/// Keeps a trailing node at a constant distance behind a controlled node
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FollowRig {
    pub distance: f32,
}

impl Default for FollowRig {
    fn default() -> Self {
        Self { distance: 15.0 }
    }
}

impl FollowRig {
    pub fn new(distance: f32) -> Self {
        Self { distance }
    }

    /// Places the trailing node `distance` away from `controlled_new`, along
    /// the direction toward where the trailing node was
    ///
    /// If the trailing node sits exactly on the controlled node's new
    /// position, the direction from the controlled node's old position is
    /// used instead; `None` if that is degenerate too.
    pub fn follow(
        &self,
        controlled_old: Vector3<f32>,
        controlled_new: Vector3<f32>,
        trailing_old: Vector3<f32>,
    ) -> Option<FollowPose> {
        let offset = [trailing_old - controlled_new, trailing_old - controlled_old]
            .into_iter()
            .find(|o| o.magnitude2() > f32::EPSILON)?;
        let direction = offset.normalize();

        Some(FollowPose {
            position: controlled_new + direction * self.distance,
            heading: direction.x.atan2(direction.z),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::{FRAC_PI_2, PI};

    #[test]
    fn test_heading_faces_target() {
        // Target straight ahead along -Z
        let h = heading_towards(Vector3::new(0.0, 0.0, 0.0), Vector3::new(0.0, 0.0, -5.0)).unwrap();
        assert!(h.abs() < 1e-6);

        // Target along -X needs a quarter turn
        let h = heading_towards(Vector3::new(0.0, 0.0, 0.0), Vector3::new(-5.0, 3.0, 0.0)).unwrap();
        assert!((h - FRAC_PI_2).abs() < 1e-6);

        // Forward vector of the computed heading points at the target
        let from = Vector3::new(1.0, 0.0, 2.0);
        let to = Vector3::new(6.0, 0.0, 14.0);
        let h = heading_towards(from, to).unwrap();
        let forward = Vector3::new(-h.sin(), 0.0, -h.cos());
        assert!((forward - (to - from).normalize()).magnitude() < 1e-5);

        assert!(heading_towards(from, Vector3::new(1.0, 9.0, 2.0)).is_none());
    }

    #[test]
    fn test_tracker_converges_without_overshoot() {
        let tracker = HeadingTracker::default();
        let desired = 3.0 * PI / 2.0;
        let mut heading = 0.0;
        for _ in 0..200 {
            heading = tracker.advance(heading, desired);
        }
        // Shorter arc is -π/2
        assert!((heading + FRAC_PI_2).abs() < 1e-5);
        assert!(tracker.has_arrived(heading, desired));
    }

    #[test]
    fn test_follow_keeps_distance() {
        let rig = FollowRig::default();
        let pose = rig
            .follow(
                Vector3::new(0.0, 0.0, 0.0),
                Vector3::new(0.0, 0.0, -1.0),
                Vector3::new(0.0, 0.0, 10.0),
            )
            .unwrap();
        assert!((pose.position - Vector3::new(0.0, 0.0, 14.0)).magnitude() < 1e-5);
        assert!(pose.heading.abs() < 1e-6);

        let pose = rig
            .follow(
                Vector3::new(3.0, 0.0, 4.0),
                Vector3::new(3.0, 0.0, 4.0),
                Vector3::new(13.0, 0.0, 4.0),
            )
            .unwrap();
        assert!((pose.position - Vector3::new(18.0, 0.0, 4.0)).magnitude() < 1e-5);
        assert!((pose.heading - FRAC_PI_2).abs() < 1e-6);
    }

    #[test]
    fn test_follow_degenerate_offsets() {
        let rig = FollowRig::default();
        let p = Vector3::new(1.0, 0.0, 1.0);
        let pose = rig.follow(Vector3::new(1.0, 0.0, 0.0), p, p).unwrap();
        assert!((pose.position - Vector3::new(1.0, 0.0, 16.0)).magnitude() < 1e-5);

        assert!(rig.follow(p, p, p).is_none());
    }
}
