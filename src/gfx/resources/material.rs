//! Material definitions for scene nodes
//!
//! A material is a diffuse color plus a specular color and shininess. The
//! diffuse channel is the one overwritten while a node is highlighted, so it
//! has to survive a store / overwrite / restore round trip bit for bit.

use cgmath::Vector3;

/// RGB color with components in 0.0-1.0
pub type Color = Vector3<f32>;

/// Specular channel of a material
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Specular {
    pub color: Color,
    pub shininess: f32,
}

/// Diffuse / specular material attached to a node
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Material {
    pub diffuse: Color,
    pub specular: Specular,
}

impl Default for Material {
    fn default() -> Self {
        Self {
            diffuse: Vector3::new(0.8, 0.8, 0.8),
            specular: Specular {
                color: Vector3::new(1.0, 1.0, 1.0),
                shininess: 5.0,
            },
        }
    }
}

impl Material {
    /// Creates a material with the given diffuse color and a white specular highlight
    pub fn new(r: f32, g: f32, b: f32) -> Self {
        Self {
            diffuse: Vector3::new(r, g, b),
            ..Default::default()
        }
    }

    /// Builder pattern: Set diffuse color from RGB values
    pub fn with_diffuse(mut self, r: f32, g: f32, b: f32) -> Self {
        self.diffuse = Vector3::new(r, g, b);
        self
    }

    /// Builder pattern: Set specular color and shininess
    pub fn with_specular(mut self, r: f32, g: f32, b: f32, shininess: f32) -> Self {
        self.specular = Specular {
            color: Vector3::new(r, g, b),
            shininess,
        };
        self
    }
}
