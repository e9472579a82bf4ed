//! Angle wrapping and shortest-path stepping

use std::f32::consts::{PI, TAU};

/// Maps any angle to its representative in [0, 2π)
pub fn min_angle(angle: f32) -> f32 {
    let wrapped = angle.rem_euclid(TAU);
    // rem_euclid rounds tiny negative inputs up to exactly TAU
    if wrapped >= TAU {
        0.0
    } else {
        wrapped
    }
}

/// Signed rotation from `from` to `to` along the shorter arc, in (-π, π]
///
/// Angles exactly half a turn apart resolve to +π, so the tie always
/// rotates in the positive direction.
pub fn shortest_delta(from: f32, to: f32) -> f32 {
    let delta = min_angle(to - from);
    if delta > PI {
        delta - TAU
    } else {
        delta
    }
}

/// Moves `current` toward `target` by at most `max_step` along the shorter arc
///
/// Lands exactly on the target's equivalent angle once it is within one step,
/// so tracking settles instead of oscillating around the target.
pub fn step_towards(current: f32, target: f32, max_step: f32) -> f32 {
    let delta = shortest_delta(current, target);
    if delta.abs() <= max_step {
        current + delta
    } else {
        current + max_step.copysign(delta)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::Rng;

    #[test]
    fn test_min_angle_range() {
        assert_eq!(min_angle(0.0), 0.0);
        assert!((min_angle(-PI / 2.0) - 1.5 * PI).abs() < 1e-5);
        assert!((min_angle(5.0 * PI) - PI).abs() < 1e-4);
        assert_eq!(min_angle(-1e-9), 0.0);

        let mut rng = rand::rng();
        for _ in 0..1000 {
            let a = min_angle(rng.random_range(-100.0..100.0));
            assert!((0.0..TAU).contains(&a), "{} out of range", a);
        }
    }

    #[test]
    fn test_shortest_path_prefers_small_arc() {
        // +350° and -10° name the same target; the step must go the -10° way
        let desired = 350f32.to_radians();
        let next = step_towards(0.0, desired, 0.025);
        assert!(next < 0.0);
        assert!((next + 0.025).abs() < 1e-6);

        let back = step_towards(desired, 0.0, 0.025);
        assert!(back > desired);
    }

    #[test]
    fn test_opposite_angles_rotate_positive() {
        assert!((shortest_delta(0.0, PI) - PI).abs() < 1e-6);
        assert!(step_towards(0.0, PI, 0.1) > 0.0);
    }

    #[test]
    fn test_step_snaps_when_close() {
        assert!((step_towards(1.0, 1.01, 0.025) - 1.01).abs() < 1e-6);
        assert_eq!(step_towards(2.0, 2.0, 0.025), 2.0);
    }

    #[test]
    fn test_random_pairs_never_take_long_way() {
        let mut rng = rand::rng();
        for _ in 0..1000 {
            let from = rng.random_range(-20.0..20.0);
            let to = rng.random_range(-20.0..20.0);
            let d = shortest_delta(from, to);
            assert!(d > -PI - 1e-4 && d <= PI + 1e-4);
            // `from + d` names the same direction as `to`
            let err = shortest_delta(from + d, to).abs();
            assert!(err < 1e-3, "from {} to {} left error {}", from, to, err);
        }
    }
}
