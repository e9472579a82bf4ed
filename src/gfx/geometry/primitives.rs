//! # Primitive Shape Generation
//!
//! All shapes are generated with outward normals and counter-clockwise winding.

use super::Mesh;
use std::f32::consts::PI;

/// Generate a box of the given size centred at the origin
///
/// Each face gets its own four vertices so normals stay flat.
pub fn generate_cuboid(width: f32, height: f32, depth: f32) -> Mesh {
    let (x, y, z) = (width * 0.5, height * 0.5, depth * 0.5);

    let positions = vec![
        // Front face
        [-x, -y,  z], [ x, -y,  z], [ x,  y,  z], [-x,  y,  z],
        // Back face
        [-x, -y, -z], [-x,  y, -z], [ x,  y, -z], [ x, -y, -z],
        // Left face
        [-x, -y, -z], [-x, -y,  z], [-x,  y,  z], [-x,  y, -z],
        // Right face
        [ x, -y,  z], [ x, -y, -z], [ x,  y, -z], [ x,  y,  z],
        // Top face
        [-x,  y,  z], [ x,  y,  z], [ x,  y, -z], [-x,  y, -z],
        // Bottom face
        [-x, -y, -z], [ x, -y, -z], [ x, -y,  z], [-x, -y,  z],
    ];

    let face_normals = [
        [0.0, 0.0, 1.0],
        [0.0, 0.0, -1.0],
        [-1.0, 0.0, 0.0],
        [1.0, 0.0, 0.0],
        [0.0, 1.0, 0.0],
        [0.0, -1.0, 0.0],
    ];
    let normals = face_normals
        .iter()
        .flat_map(|n| std::iter::repeat(*n).take(4))
        .collect();

    let indices = (0..6u32)
        .flat_map(|face| {
            let base = face * 4;
            [base, base + 1, base + 2, base + 2, base + 3, base]
        })
        .collect();

    Mesh::new(positions, normals, indices)
}

/// Generate a unit UV sphere with specified resolution
///
/// # Arguments
/// * `longitude_segments` - Number of vertical segments (min 3)
/// * `latitude_segments` - Number of horizontal segments (min 2)
pub fn generate_sphere(longitude_segments: u32, latitude_segments: u32) -> Mesh {
    let long_segs = longitude_segments.max(3);
    let lat_segs = latitude_segments.max(2);

    let mut positions = Vec::new();
    let mut indices = Vec::new();

    for lat in 0..=lat_segs {
        let theta = lat as f32 * PI / lat_segs as f32; // 0 to PI
        for long in 0..=long_segs {
            let phi = long as f32 * 2.0 * PI / long_segs as f32; // 0 to 2*PI
            positions.push([theta.sin() * phi.cos(), theta.cos(), theta.sin() * phi.sin()]);
        }
    }

    for lat in 0..lat_segs {
        for long in 0..long_segs {
            let first = lat * (long_segs + 1) + long;
            let second = first + long_segs + 1;

            indices.extend_from_slice(&[first, second, first + 1]);
            indices.extend_from_slice(&[second, second + 1, first + 1]);
        }
    }

    // Normal is same as position for unit sphere
    let normals = positions.clone();
    Mesh::new(positions, normals, indices)
}
