use cgmath::{perspective, Matrix4, Rad, Vector2, Vector3};

/// Perspective projection parameters
///
/// Produces OpenGL-style clip space (NDC depth in [-1, 1]), which is what the
/// picker unprojects against.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projection {
    pub fovy: Rad<f32>,
    pub aspect: f32,
    pub znear: f32,
    pub zfar: f32,
}

impl Default for Projection {
    fn default() -> Self {
        Self {
            // 45° vertical opening angle
            fovy: Rad(std::f32::consts::FRAC_PI_4),
            aspect: 1.0,
            znear: 1.0,
            zfar: 20000.0,
        }
    }
}

impl Projection {
    /// Default projection for a viewport of the given pixel size
    pub fn for_viewport(width: u32, height: u32) -> Self {
        let mut projection = Self::default();
        projection.resize(width, height);
        projection
    }

    /// Recomputes the aspect ratio; zero-sized viewports are ignored
    pub fn resize(&mut self, width: u32, height: u32) {
        if width > 0 && height > 0 {
            self.aspect = width as f32 / height as f32;
        }
    }

    pub fn matrix(&self) -> Matrix4<f32> {
        perspective(self.fovy, self.aspect, self.znear, self.zfar)
    }
}

/// Converts a pixel position (origin top-left, Y down) to normalized device
/// coordinates (origin centre, Y up, both axes in [-1, 1])
pub fn screen_to_ndc(position: (f32, f32), size: (f32, f32)) -> Vector2<f32> {
    let (x, y) = position;
    let (width, height) = size;
    Vector2::new(2.0 * x / width - 1.0, 1.0 - 2.0 * y / height) // Flip Y axis
}

/// View used by the turntable tutorials: scene pushed back and down, then
/// spun about the vertical axis by `angle`
pub fn turntable_view(angle: f32) -> Matrix4<f32> {
    Matrix4::from_translation(Vector3::new(0.0, -10.0, -50.0)) * Matrix4::from_angle_y(Rad(angle))
}

pub fn convert_matrix4_to_array(matrix4: Matrix4<f32>) -> [[f32; 4]; 4] {
    let mut result = [[0.0; 4]; 4];

    for i in 0..4 {
        for j in 0..4 {
            result[i][j] = matrix4[i][j];
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_screen_to_ndc_corners() {
        assert_eq!(screen_to_ndc((0.0, 0.0), (800.0, 600.0)), Vector2::new(-1.0, 1.0));
        assert_eq!(screen_to_ndc((400.0, 300.0), (800.0, 600.0)), Vector2::new(0.0, 0.0));
        assert_eq!(screen_to_ndc((800.0, 600.0), (800.0, 600.0)), Vector2::new(1.0, -1.0));
    }

    #[test]
    fn test_resize_ignores_zero_height() {
        let mut projection = Projection::for_viewport(1200, 800);
        assert_eq!(projection.aspect, 1.5);
        projection.resize(1200, 0);
        assert_eq!(projection.aspect, 1.5);
    }
}
