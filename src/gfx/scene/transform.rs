//! # Local Transforms
//!
//! A [`Transform`] is a node's pose relative to its parent: translation, Euler
//! rotation in radians and a per-axis scale.
//!
//! The local matrix is composed as `T * Ry * Rx * Rz * S`, so a point is
//! scaled first, then rolled about Z, pitched about X, yawed about Y and
//! finally translated.

use cgmath::{Matrix4, Rad, Vector3};

/// Rotation axis of a single Euler component
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    X,
    Y,
    Z,
}

/// Translation, rotation and scale of one scene node
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    /// Position relative to the parent
    pub translation: Vector3<f32>,
    /// Euler angles in radians (pitch about X, yaw about Y, roll about Z)
    pub rotation: Vector3<f32>,
    /// Component-wise scale
    pub scale: Vector3<f32>,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            translation: Vector3::new(0.0, 0.0, 0.0),
            rotation: Vector3::new(0.0, 0.0, 0.0),
            scale: Vector3::new(1.0, 1.0, 1.0),
        }
    }
}

impl Transform {
    /// Identity transform
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder pattern: Set translation
    pub fn with_translation(mut self, x: f32, y: f32, z: f32) -> Self {
        self.translation = Vector3::new(x, y, z);
        self
    }

    /// Builder pattern: Set Euler rotation in radians
    pub fn with_rotation(mut self, x: f32, y: f32, z: f32) -> Self {
        self.rotation = Vector3::new(x, y, z);
        self
    }

    /// Builder pattern: Set non-uniform scale
    pub fn with_scale(mut self, x: f32, y: f32, z: f32) -> Self {
        self.scale = Vector3::new(x, y, z);
        self
    }

    /// Reads one Euler component
    pub fn angle(&self, axis: Axis) -> f32 {
        match axis {
            Axis::X => self.rotation.x,
            Axis::Y => self.rotation.y,
            Axis::Z => self.rotation.z,
        }
    }

    /// Overwrites one Euler component, leaving the other two untouched
    pub fn set_angle(&mut self, axis: Axis, angle: f32) {
        match axis {
            Axis::X => self.rotation.x = angle,
            Axis::Y => self.rotation.y = angle,
            Axis::Z => self.rotation.z = angle,
        }
    }

    /// Local matrix: `T * Ry * Rx * Rz * S`
    pub fn matrix(&self) -> Matrix4<f32> {
        let t = Matrix4::from_translation(self.translation);
        let r = Matrix4::from_angle_y(Rad(self.rotation.y))
            * Matrix4::from_angle_x(Rad(self.rotation.x))
            * Matrix4::from_angle_z(Rad(self.rotation.z));
        let s = Matrix4::from_nonuniform_scale(self.scale.x, self.scale.y, self.scale.z);
        t * r * s // Order matters: T * R * S
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cgmath::{SquareMatrix, Vector4};

    fn close(a: Vector4<f32>, b: Vector4<f32>) -> bool {
        (a - b).x.abs() < 1e-5 && (a - b).y.abs() < 1e-5 && (a - b).z.abs() < 1e-5
    }

    #[test]
    fn test_identity_matrix() {
        assert_eq!(Transform::new().matrix(), Matrix4::identity());
    }

    #[test]
    fn test_scale_applies_before_translation() {
        let t = Transform::new()
            .with_translation(10.0, 0.0, 0.0)
            .with_scale(2.0, 2.0, 2.0);
        let p = t.matrix() * Vector4::new(1.0, 0.0, 0.0, 1.0);
        assert!(close(p, Vector4::new(12.0, 0.0, 0.0, 1.0)));
    }

    #[test]
    fn test_yaw_applies_after_pitch() {
        // Pitch +90° maps +Y to +Z, yaw +90° then maps +Z to +X
        let t = Transform::new().with_rotation(
            std::f32::consts::FRAC_PI_2,
            std::f32::consts::FRAC_PI_2,
            0.0,
        );
        let p = t.matrix() * Vector4::new(0.0, 1.0, 0.0, 1.0);
        assert!(close(p, Vector4::new(1.0, 0.0, 0.0, 1.0)));
    }

    #[test]
    fn test_set_angle_touches_single_component() {
        let mut t = Transform::new().with_rotation(0.1, 0.2, 0.3);
        t.set_angle(Axis::Y, 1.5);
        assert_eq!(t.rotation, Vector3::new(0.1, 1.5, 0.3));
        assert_eq!(t.angle(Axis::Z), 0.3);
    }
}
