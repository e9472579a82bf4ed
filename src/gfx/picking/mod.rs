//! # Scene Picking
//!
//! Resolves which scene nodes lie under a point given in normalized device
//! coordinates.
//!
//! ## How it works
//!
//! 1. **NDC to Ray**: For each mesh node, unproject the cursor's near and far
//!    points through `(projection * view * world)^-1`, giving a ray directly
//!    in the node's local space
//! 2. **Broadphase**: Test the ray against the mesh's cached bounding box
//! 3. **Triangles**: Find the nearest triangle hit and project it back to
//!    get its NDC depth
//! 4. **Ordering**: Sort every hit by depth, nearest first
//!
//! Hits with equal depth keep scene traversal order (stable sort).
//!
//! ## Usage
//!
//! ```rust
//! use std::sync::Arc;
//! use cgmath::{Matrix4, Vector2, Vector3};
//! use rigkit::gfx::{geometry::generate_cuboid, picking::ScenePicker, scene::{Node, SceneGraph}};
//! use rigkit::gfx::camera::Projection;
//!
//! let mut scene = SceneGraph::new();
//! let cube = scene.add_root(Node::new().with_mesh(Arc::new(generate_cuboid(1.0, 1.0, 1.0))));
//!
//! let view = Matrix4::from_translation(Vector3::new(0.0, 0.0, -10.0));
//! let picker = ScenePicker::new(view, Projection::default().matrix());
//! let hits = picker.pick(&scene, Vector2::new(0.0, 0.0));
//! assert_eq!(hits[0].node, cube);
//! ```

use cgmath::{ElementWise, InnerSpace, Matrix4, SquareMatrix, Vector2, Vector3, Vector4, Zero};

use crate::gfx::scene::{NodeId, SceneGraph};

/// A 3D ray for intersection testing
#[derive(Debug, Clone, Copy)]
pub struct Ray {
    /// Ray origin point
    pub origin: Vector3<f32>,
    /// Ray direction (normalized)
    pub direction: Vector3<f32>,
}

impl Ray {
    /// Create a new ray
    pub fn new(origin: Vector3<f32>, direction: Vector3<f32>) -> Self {
        Self {
            origin,
            direction: direction.normalize(),
        }
    }

    /// Get a point along the ray at distance t
    pub fn point_at(&self, t: f32) -> Vector3<f32> {
        self.origin + self.direction * t
    }

    /// Two-sided Möller–Trumbore test, returning the distance to the hit
    pub fn intersect_triangle(&self, triangle: &[[f32; 3]; 3]) -> Option<f32> {
        let a = Vector3::from(triangle[0]);
        let b = Vector3::from(triangle[1]);
        let c = Vector3::from(triangle[2]);

        let edge1 = b - a;
        let edge2 = c - a;
        let p = self.direction.cross(edge2);
        let det = edge1.dot(p);
        // Ray parallel to the triangle plane (or degenerate triangle)
        if det.abs() < 1e-12 {
            return None;
        }
        let inv_det = 1.0 / det;

        let s = self.origin - a;
        let u = s.dot(p) * inv_det;
        if !(0.0..=1.0).contains(&u) {
            return None;
        }

        let q = s.cross(edge1);
        let v = self.direction.dot(q) * inv_det;
        if v < 0.0 || u + v > 1.0 {
            return None;
        }

        let t = edge2.dot(q) * inv_det;
        (t >= 0.0).then_some(t)
    }
}

/// Axis-aligned bounding box for intersection testing
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    /// Minimum corner of the bounding box
    pub min: Vector3<f32>,
    /// Maximum corner of the bounding box
    pub max: Vector3<f32>,
}

impl Aabb {
    /// Create a new AABB
    pub fn new(min: Vector3<f32>, max: Vector3<f32>) -> Self {
        Self { min, max }
    }

    /// Create AABB from a set of vertices
    pub fn from_vertices(vertices: &[[f32; 3]]) -> Self {
        let Some(first) = vertices.first() else {
            return Self::new(Vector3::zero(), Vector3::zero());
        };

        let mut min = Vector3::from(*first);
        let mut max = min;

        for vertex in vertices.iter().skip(1) {
            let v = Vector3::from(*vertex);
            min.x = min.x.min(v.x);
            min.y = min.y.min(v.y);
            min.z = min.z.min(v.z);
            max.x = max.x.max(v.x);
            max.y = max.y.max(v.y);
            max.z = max.z.max(v.z);
        }

        Self::new(min, max)
    }

    /// Test ray-AABB intersection
    /// Returns the distance to intersection point, or None if no intersection
    pub fn intersect_ray(&self, ray: &Ray) -> Option<f32> {
        let inv_dir = Vector3::new(
            1.0 / ray.direction.x,
            1.0 / ray.direction.y,
            1.0 / ray.direction.z,
        );

        let t_min = (self.min - ray.origin).mul_element_wise(inv_dir);
        let t_max = (self.max - ray.origin).mul_element_wise(inv_dir);

        let t1 = Vector3::new(
            t_min.x.min(t_max.x),
            t_min.y.min(t_max.y),
            t_min.z.min(t_max.z),
        );
        let t2 = Vector3::new(
            t_min.x.max(t_max.x),
            t_min.y.max(t_max.y),
            t_min.z.max(t_max.z),
        );

        let t_near = t1.x.max(t1.y.max(t1.z));
        let t_far = t2.x.min(t2.y.min(t2.z));

        if t_near <= t_far && t_far >= 0.0 {
            Some(if t_near >= 0.0 { t_near } else { t_far })
        } else {
            None
        }
    }
}

/// One node hit by a pick query
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PickResult {
    /// The node that was hit
    pub node: NodeId,
    /// Hit position in normalized device coordinates; `z` is the depth used for ordering
    pub clip_pos: Vector3<f32>,
    /// World space intersection point
    pub point: Vector3<f32>,
}

impl PickResult {
    /// NDC depth of the hit, smaller is nearer
    pub fn depth(&self) -> f32 {
        self.clip_pos.z
    }
}

/// Ray-casting picker over a scene graph
///
/// Holds the camera matrices of the frame being picked. Picking is a pure
/// query and never mutates the scene.
#[derive(Debug, Clone, Copy)]
pub struct ScenePicker {
    pub view: Matrix4<f32>,
    pub projection: Matrix4<f32>,
}

impl Default for ScenePicker {
    fn default() -> Self {
        Self::new(Matrix4::identity(), Matrix4::identity())
    }
}

impl ScenePicker {
    pub fn new(view: Matrix4<f32>, projection: Matrix4<f32>) -> Self {
        Self { view, projection }
    }

    /// Updates the camera matrices used for subsequent picks
    pub fn set_camera(&mut self, view: Matrix4<f32>, projection: Matrix4<f32>) {
        self.view = view;
        self.projection = projection;
    }

    /// Returns every mesh node under `ndc`, nearest first
    ///
    /// An empty vector means nothing was hit.
    pub fn pick(&self, scene: &SceneGraph, ndc: Vector2<f32>) -> Vec<PickResult> {
        let view_proj = self.projection * self.view;
        let mut results: Vec<PickResult> = scene
            .traverse()
            .filter_map(|(id, _)| self.pick_node(scene, id, view_proj, ndc))
            .collect();

        results.sort_by(|a, b| a.depth().total_cmp(&b.depth()));
        log::trace!("pick at ({:.3}, {:.3}) hit {} node(s)", ndc.x, ndc.y, results.len());
        results
    }

    /// Nearest hit of the pick ray on a single node's mesh
    fn pick_node(
        &self,
        scene: &SceneGraph,
        id: NodeId,
        view_proj: Matrix4<f32>,
        ndc: Vector2<f32>,
    ) -> Option<PickResult> {
        let node = scene.get(id)?;
        let mesh = node.mesh.as_ref()?;
        let world = scene.world_transform(id)?;

        // Node local space -> clip space; singular for zero scale
        let model_view_proj = view_proj * world;
        let inv = model_view_proj.invert()?;

        let near = unproject(&inv, ndc, -1.0)?;
        let far = unproject(&inv, ndc, 1.0)?;
        let segment = far - near;
        let length = segment.magnitude();
        if !(length > 0.0 && length.is_finite()) {
            return None;
        }
        let ray = Ray::new(near, segment);

        mesh.bounds().intersect_ray(&ray)?;

        let t = mesh
            .triangles()
            .filter_map(|tri| ray.intersect_triangle(&tri))
            .filter(|&t| t <= length)
            .min_by(f32::total_cmp)?;

        let local = ray.point_at(t);
        let clip = model_view_proj * local.extend(1.0);
        let world_point = world * local.extend(1.0);

        Some(PickResult {
            node: id,
            clip_pos: clip.truncate() / clip.w,
            point: world_point.truncate() / world_point.w,
        })
    }
}

/// Maps an NDC point at depth `z` back through an inverse projection
fn unproject(inv: &Matrix4<f32>, ndc: Vector2<f32>, z: f32) -> Option<Vector3<f32>> {
    let p = inv * Vector4::new(ndc.x, ndc.y, z, 1.0);
    (p.w.abs() > f32::EPSILON).then(|| p.truncate() / p.w)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gfx::{
        camera::Projection,
        geometry::generate_cuboid,
        scene::{Node, Transform},
    };
    use std::sync::Arc;

    fn camera() -> ScenePicker {
        let view = Matrix4::from_translation(Vector3::new(0.0, 0.0, -10.0));
        ScenePicker::new(view, Projection::default().matrix())
    }

    fn cube_at(scene: &mut SceneGraph, z: f32) -> NodeId {
        scene.add_root(
            Node::new()
                .with_transform(Transform::new().with_translation(0.0, 0.0, z))
                .with_mesh(Arc::new(generate_cuboid(1.0, 1.0, 1.0))),
        )
    }

    #[test]
    fn test_aabb_creation() {
        let vertices = vec![[0.0, 0.0, 0.0], [1.0, 1.0, 1.0], [-1.0, -1.0, -1.0]];
        let aabb = Aabb::from_vertices(&vertices);

        assert_eq!(aabb.min, Vector3::new(-1.0, -1.0, -1.0));
        assert_eq!(aabb.max, Vector3::new(1.0, 1.0, 1.0));
    }

    #[test]
    fn test_ray_aabb_intersection() {
        let aabb = Aabb::new(Vector3::new(-1.0, -1.0, -1.0), Vector3::new(1.0, 1.0, 1.0));

        // Ray hitting the box
        let ray = Ray::new(Vector3::new(0.0, 0.0, -5.0), Vector3::new(0.0, 0.0, 1.0));
        assert_eq!(aabb.intersect_ray(&ray), Some(4.0));

        // Ray missing the box
        let ray_miss = Ray::new(Vector3::new(5.0, 0.0, -5.0), Vector3::new(0.0, 0.0, 1.0));
        assert!(aabb.intersect_ray(&ray_miss).is_none());
    }

    #[test]
    fn test_ray_triangle_hit_and_miss() {
        let tri = [[-1.0, -1.0, 0.0], [1.0, -1.0, 0.0], [0.0, 1.0, 0.0]];
        let ray = Ray::new(Vector3::new(0.0, 0.0, 3.0), Vector3::new(0.0, 0.0, -1.0));
        let t = ray.intersect_triangle(&tri).unwrap();
        assert!((t - 3.0).abs() < 1e-6);

        // Behind the origin
        let away = Ray::new(Vector3::new(0.0, 0.0, 3.0), Vector3::new(0.0, 0.0, 1.0));
        assert!(away.intersect_triangle(&tri).is_none());

        // Outside the edges
        let beside = Ray::new(Vector3::new(2.0, 0.0, 3.0), Vector3::new(0.0, 0.0, -1.0));
        assert!(beside.intersect_triangle(&tri).is_none());
    }

    #[test]
    fn test_pick_centre_hits_front_face() {
        let mut scene = SceneGraph::new();
        let cube = cube_at(&mut scene, 0.0);

        let hits = camera().pick(&scene, Vector2::new(0.0, 0.0));
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].node, cube);
        assert!((hits[0].point.z - 0.5).abs() < 1e-3);
        assert!(hits[0].depth() > -1.0 && hits[0].depth() < 1.0);
    }

    #[test]
    fn test_pick_outside_silhouette_is_empty() {
        let mut scene = SceneGraph::new();
        cube_at(&mut scene, 0.0);

        assert!(camera().pick(&scene, Vector2::new(0.9, 0.9)).is_empty());
        assert!(camera().pick(&SceneGraph::new(), Vector2::new(0.0, 0.0)).is_empty());
    }

    #[test]
    fn test_overlapping_meshes_sorted_nearest_first() {
        let mut scene = SceneGraph::new();
        let far = cube_at(&mut scene, -5.0);
        let near = cube_at(&mut scene, 0.0);

        let hits = camera().pick(&scene, Vector2::new(0.0, 0.0));
        assert_eq!(hits.iter().map(|h| h.node).collect::<Vec<_>>(), vec![near, far]);
        assert!(hits[0].depth() < hits[1].depth());
    }

    #[test]
    fn test_pick_follows_parent_transform() {
        let mut scene = SceneGraph::new();
        let parent = scene.add_root(
            Node::new().with_transform(Transform::new().with_translation(3.0, 0.0, 0.0)),
        );
        let child = scene
            .add_child(
                parent,
                Node::new()
                    .with_transform(Transform::new())
                    .with_mesh(Arc::new(generate_cuboid(1.0, 1.0, 1.0))),
            )
            .unwrap();

        let picker = camera();
        assert!(picker.pick(&scene, Vector2::new(0.0, 0.0)).is_empty());

        // Project the child's centre to find where to click
        let centre = picker.projection * picker.view * Vector4::new(3.0, 0.0, 0.5, 1.0);
        let hits = picker.pick(&scene, Vector2::new(centre.x / centre.w, centre.y / centre.w));
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].node, child);
        assert!((hits[0].point.x - 3.0).abs() < 1e-3);
    }

    #[test]
    fn test_nodes_without_mesh_are_ignored() {
        let mut scene = SceneGraph::new();
        scene.add_root(Node::new().with_transform(Transform::new()));
        assert!(camera().pick(&scene, Vector2::new(0.0, 0.0)).is_empty());
    }

    #[test]
    fn test_zero_scale_node_is_skipped() {
        let mut scene = SceneGraph::new();
        scene.add_root(
            Node::new()
                .with_transform(Transform::new().with_scale(0.0, 0.0, 0.0))
                .with_mesh(Arc::new(generate_cuboid(1.0, 1.0, 1.0))),
        );
        assert!(camera().pick(&scene, Vector2::new(0.0, 0.0)).is_empty());
    }
}
