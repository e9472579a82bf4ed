//! Scene nodes and their handles
//!
//! A [`Node`] is built detached (builder style) and then handed to the
//! [`SceneGraph`](super::SceneGraph), which returns a [`NodeId`]. Ids are
//! never reused, so a stale id simply resolves to nothing.

use std::cell::Cell;
use std::fmt;
use std::sync::Arc;

use cgmath::Matrix4;

use super::transform::Transform;
use crate::gfx::{geometry::Mesh, resources::Material};

/// Stable handle to a node inside a scene graph
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) usize);

impl NodeId {
    /// Slot index inside the owning graph
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A scene entity with optional transform, material and mesh
#[derive(Debug, Default)]
pub struct Node {
    pub name: Option<String>,
    pub material: Option<Material>,
    pub mesh: Option<Arc<Mesh>>,
    pub(crate) transform: Option<Transform>,
    pub(crate) parent: Option<NodeId>,
    pub(crate) children: Vec<NodeId>,
    pub(crate) world_cache: Cell<Option<Matrix4<f32>>>,
}

impl Node {
    /// Create an empty node with no components
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder pattern: Set name
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Builder pattern: Attach a transform
    pub fn with_transform(mut self, transform: Transform) -> Self {
        self.transform = Some(transform);
        self
    }

    /// Builder pattern: Attach a material
    pub fn with_material(mut self, material: Material) -> Self {
        self.material = Some(material);
        self
    }

    /// Builder pattern: Attach shared mesh geometry
    pub fn with_mesh(mut self, mesh: Arc<Mesh>) -> Self {
        self.mesh = Some(mesh);
        self
    }

    /// Name comparison helper for lookups
    pub fn is_named(&self, name: &str) -> bool {
        self.name.as_deref() == Some(name)
    }

    pub fn transform(&self) -> Option<&Transform> {
        self.transform.as_ref()
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Children in insertion order
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    /// Local matrix, identity when the node carries no transform
    pub(crate) fn local_matrix(&self) -> Matrix4<f32> {
        self.transform
            .map(|t| t.matrix())
            .unwrap_or_else(|| Transform::default().matrix())
    }
}
