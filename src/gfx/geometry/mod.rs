//! # Procedural Geometry
//!
//! Triangle meshes shared between scene nodes. Asset loading is handled
//! outside this crate; the tutorials stand in for their asset files with
//! the primitives generated here.
//!
//! ## Supported Primitives
//!
//! - **Cuboid**: Box of arbitrary size centred at the origin
//! - **Sphere**: UV sphere with configurable resolution
//!
//! ## Usage
//!
//! ```rust
//! use rigkit::gfx::geometry::{generate_cuboid, generate_sphere};
//!
//! let cube = generate_cuboid(7.0, 7.0, 7.0);
//! assert_eq!(cube.triangle_count(), 12);
//!
//! let dune = generate_sphere(16, 8);
//! assert!(dune.vertex_count() > 0);
//! ```

pub mod primitives;

pub use primitives::*;

use cgmath::Vector3;

use crate::gfx::picking::Aabb;

/// Read-only triangle geometry
///
/// Meshes are immutable once built and are shared between nodes through
/// `Arc<Mesh>`. The local-space bounding box is computed once on creation.
#[derive(Debug, Clone)]
pub struct Mesh {
    /// Vertex positions (x, y, z)
    positions: Vec<[f32; 3]>,
    /// Normal vectors (x, y, z)
    normals: Vec<[f32; 3]>,
    /// Triangle indices (counter-clockwise winding)
    indices: Vec<u32>,
    bounds: Aabb,
}

impl Mesh {
    /// Builds a mesh, dropping any trailing indices that don't form a whole triangle
    pub fn new(positions: Vec<[f32; 3]>, normals: Vec<[f32; 3]>, mut indices: Vec<u32>) -> Self {
        indices.truncate(indices.len() - indices.len() % 3);
        let bounds = Aabb::from_vertices(&positions);
        Self {
            positions,
            normals,
            indices,
            bounds,
        }
    }

    /// Shifts every vertex by `offset`, so the mesh origin can sit at a pivot
    pub fn translated(mut self, offset: Vector3<f32>) -> Self {
        for p in &mut self.positions {
            p[0] += offset.x;
            p[1] += offset.y;
            p[2] += offset.z;
        }
        self.bounds = Aabb::from_vertices(&self.positions);
        self
    }

    pub fn positions(&self) -> &[[f32; 3]] {
        &self.positions
    }

    pub fn normals(&self) -> &[[f32; 3]] {
        &self.normals
    }

    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    /// Local-space bounding box
    pub fn bounds(&self) -> &Aabb {
        &self.bounds
    }

    /// Get the number of vertices in this mesh
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    /// Get the number of triangles in this mesh
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Iterates triangles as position triples, skipping out-of-range indices
    pub fn triangles(&self) -> impl Iterator<Item = [[f32; 3]; 3]> + '_ {
        self.indices.chunks_exact(3).filter_map(move |tri| {
            let a = *self.positions.get(tri[0] as usize)?;
            let b = *self.positions.get(tri[1] as usize)?;
            let c = *self.positions.get(tri[2] as usize)?;
            Some([a, b, c])
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_triangle_is_dropped() {
        let mesh = Mesh::new(
            vec![[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]],
            Vec::new(),
            vec![0, 1, 2, 0],
        );
        assert_eq!(mesh.triangle_count(), 1);
    }

    #[test]
    fn test_invalid_index_skipped() {
        let mesh = Mesh::new(
            vec![[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]],
            Vec::new(),
            vec![0, 1, 2, 0, 1, 9],
        );
        assert_eq!(mesh.triangles().count(), 1);
    }

    #[test]
    fn test_translated_moves_bounds() {
        let mesh = generate_cuboid(2.0, 4.0, 2.0).translated(Vector3::new(0.0, 2.0, 0.0));
        assert_eq!(mesh.bounds().min, Vector3::new(-1.0, 0.0, -1.0));
        assert_eq!(mesh.bounds().max, Vector3::new(1.0, 4.0, 1.0));
    }
}
