use cgmath::{Matrix4, SquareMatrix};
use thiserror::Error;

use super::{node::Node, node::NodeId, transform::Transform};
use crate::gfx::camera::camera_utils::convert_matrix4_to_array;
use crate::gfx::resources::Material;

/// Structural errors raised while editing the node forest
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SceneError {
    #[error("node {0} does not exist in this scene")]
    UnknownNode(NodeId),
    #[error("attaching {child} under {parent} would make the node its own ancestor")]
    WouldCreateCycle { parent: NodeId, child: NodeId },
}

/// Ordered forest of nodes
///
/// The graph owns every node; parent/child links are ids into its node
/// slots. World matrices are cached per node and the cache of a whole
/// subtree is dropped whenever a local transform in it can change.
#[derive(Debug, Default)]
pub struct SceneGraph {
    nodes: Vec<Option<Node>>,
    roots: Vec<NodeId>,
}

impl SceneGraph {
    /// Creates an empty scene
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a node to the list of top-level nodes
    pub fn add_root(&mut self, node: Node) -> NodeId {
        let id = self.insert(node, None);
        self.roots.push(id);
        id
    }

    /// Appends a new node to `parent`'s ordered child list
    pub fn add_child(&mut self, parent: NodeId, node: Node) -> Result<NodeId, SceneError> {
        if self.get(parent).is_none() {
            return Err(SceneError::UnknownNode(parent));
        }
        let id = self.insert(node, Some(parent));
        if let Some(p) = self.slot_mut(parent) {
            p.children.push(id);
        }
        Ok(id)
    }

    /// Moves an existing node (and its subtree) under `new_parent`, or to the
    /// top level when `new_parent` is `None`
    ///
    /// Fails if the move would make `child` its own ancestor.
    pub fn reparent(&mut self, child: NodeId, new_parent: Option<NodeId>) -> Result<(), SceneError> {
        if self.get(child).is_none() {
            return Err(SceneError::UnknownNode(child));
        }
        if let Some(parent) = new_parent {
            if self.get(parent).is_none() {
                return Err(SceneError::UnknownNode(parent));
            }
            if self.ancestors_inclusive(parent).any(|a| a == child) {
                return Err(SceneError::WouldCreateCycle { parent, child });
            }
        }

        self.detach(child);
        match new_parent {
            Some(parent) => {
                if let Some(p) = self.slot_mut(parent) {
                    p.children.push(child);
                }
            }
            None => self.roots.push(child),
        }
        if let Some(c) = self.slot_mut(child) {
            c.parent = new_parent;
        }
        self.invalidate_subtree(child);
        Ok(())
    }

    /// Removes a node together with every descendant
    pub fn remove(&mut self, id: NodeId) -> Result<(), SceneError> {
        if self.get(id).is_none() {
            return Err(SceneError::UnknownNode(id));
        }
        self.detach(id);
        let doomed: Vec<NodeId> = self.depth_first_from(id).map(|(n, _)| n).collect();
        for n in doomed {
            self.nodes[n.0] = None;
        }
        Ok(())
    }

    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0).and_then(Option::as_ref)
    }

    /// Top-level nodes in insertion order
    pub fn roots(&self) -> &[NodeId] {
        &self.roots
    }

    /// Gets the total number of live nodes
    pub fn len(&self) -> usize {
        self.nodes.iter().filter(|n| n.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn transform(&self, id: NodeId) -> Option<&Transform> {
        self.get(id).and_then(|n| n.transform.as_ref())
    }

    /// Mutable access to a node's local transform
    ///
    /// Every cached world matrix in the node's subtree is dropped first, so
    /// the next query recomposes them.
    pub fn transform_mut(&mut self, id: NodeId) -> Option<&mut Transform> {
        if self.get(id)?.transform.is_none() {
            return None;
        }
        self.invalidate_subtree(id);
        self.slot_mut(id)?.transform.as_mut()
    }

    pub fn material(&self, id: NodeId) -> Option<&Material> {
        self.get(id).and_then(|n| n.material.as_ref())
    }

    pub fn material_mut(&mut self, id: NodeId) -> Option<&mut Material> {
        self.slot_mut(id).and_then(|n| n.material.as_mut())
    }

    /// Composes local transforms root-to-node: `A1 * A2 * ... * Ak * N`
    ///
    /// Cached matrices along the path are reused and missing ones are filled in.
    pub fn world_transform(&self, id: NodeId) -> Option<Matrix4<f32>> {
        let node = self.get(id)?;
        if let Some(cached) = node.world_cache.get() {
            return Some(cached);
        }

        // Walk up to the nearest cached ancestor (or the root)
        let mut path = vec![id];
        let mut world = Matrix4::identity();
        let mut current = node.parent;
        while let Some(parent_id) = current {
            let parent = self.get(parent_id)?;
            if let Some(cached) = parent.world_cache.get() {
                world = cached;
                break;
            }
            path.push(parent_id);
            current = parent.parent;
        }

        // Walk down the path, computing and caching transforms
        for &step in path.iter().rev() {
            let n = self.get(step)?;
            world = world * n.local_matrix();
            n.world_cache.set(Some(world));
        }

        Some(world)
    }

    /// Composes the world matrix of every node in depth-first order
    pub fn world_transforms(&self) -> WorldTransforms {
        let mut entries = Vec::with_capacity(self.nodes.len());
        let mut stack: Vec<(NodeId, Matrix4<f32>)> = self
            .roots
            .iter()
            .rev()
            .map(|&r| (r, Matrix4::identity()))
            .collect();

        while let Some((id, parent_world)) = stack.pop() {
            let Some(node) = self.get(id) else { continue };
            let world = match node.world_cache.get() {
                Some(cached) => cached,
                None => {
                    let world = parent_world * node.local_matrix();
                    node.world_cache.set(Some(world));
                    world
                }
            };
            entries.push((id, world));
            stack.extend(node.children.iter().rev().map(|&c| (c, world)));
        }

        WorldTransforms { entries }
    }

    /// Depth-first search for every node satisfying `predicate`
    ///
    /// Parents come before children and siblings keep insertion order. An
    /// empty vector means nothing matched.
    pub fn find_by_predicate<F>(&self, predicate: F) -> Vec<NodeId>
    where
        F: Fn(&Node) -> bool,
    {
        self.traverse()
            .filter(|(id, _)| self.get(*id).is_some_and(&predicate))
            .map(|(id, _)| id)
            .collect()
    }

    /// First node in traversal order carrying `name`
    pub fn find_by_name(&self, name: &str) -> Option<NodeId> {
        let found = self.traverse().map(|(id, _)| id).find(|&id| {
            self.get(id).is_some_and(|n| n.is_named(name))
        });
        if found.is_none() {
            log::warn!("scene lookup for '{}' found no node", name);
        }
        found
    }

    /// Depth-first traversal of the whole forest, yielding `(node, depth)`
    pub fn traverse(&self) -> DepthFirst<'_> {
        DepthFirst {
            scene: self,
            stack: self.roots.iter().rev().map(|&r| (r, 0)).collect(),
        }
    }

    /// Depth-first traversal of the subtree rooted at `id`
    pub fn depth_first_from(&self, id: NodeId) -> DepthFirst<'_> {
        DepthFirst {
            scene: self,
            stack: vec![(id, 0)],
        }
    }

    /// Iterates `id` and then each ancestor up to its root
    fn ancestors_inclusive(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        std::iter::successors(Some(id), move |&n| self.get(n).and_then(|node| node.parent))
    }

    fn insert(&mut self, mut node: Node, parent: Option<NodeId>) -> NodeId {
        let id = NodeId(self.nodes.len());
        node.parent = parent;
        node.children.clear();
        node.world_cache.set(None);
        self.nodes.push(Some(node));
        id
    }

    fn slot_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id.0).and_then(Option::as_mut)
    }

    /// Unlinks a node from its parent's child list (or from the roots)
    fn detach(&mut self, id: NodeId) {
        match self.get(id).and_then(|n| n.parent) {
            Some(parent) => {
                if let Some(p) = self.slot_mut(parent) {
                    p.children.retain(|&c| c != id);
                }
            }
            None => self.roots.retain(|&r| r != id),
        }
    }

    fn invalidate_subtree(&self, id: NodeId) {
        for (n, _) in self.depth_first_from(id) {
            if let Some(node) = self.get(n) {
                node.world_cache.set(None);
            }
        }
    }
}

/// Depth-first (pre-order) iterator over scene nodes
pub struct DepthFirst<'a> {
    scene: &'a SceneGraph,
    stack: Vec<(NodeId, usize)>,
}

impl Iterator for DepthFirst<'_> {
    type Item = (NodeId, usize);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let (id, depth) = self.stack.pop()?;
            let Some(node) = self.scene.get(id) else { continue };
            self.stack
                .extend(node.children.iter().rev().map(|&c| (c, depth + 1)));
            return Some((id, depth));
        }
    }
}

/// GPU-ready world matrix of one node
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct NodeTransformUniform {
    /// Column-major world matrix
    pub world: [[f32; 4]; 4],
}

/// World matrices of every node, in depth-first order
#[derive(Debug, Clone, Default)]
pub struct WorldTransforms {
    entries: Vec<(NodeId, Matrix4<f32>)>,
}

impl WorldTransforms {
    pub fn get(&self, id: NodeId) -> Option<Matrix4<f32>> {
        self.entries
            .iter()
            .find(|(n, _)| *n == id)
            .map(|(_, m)| *m)
    }

    pub fn iter(&self) -> impl Iterator<Item = &(NodeId, Matrix4<f32>)> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Converts to uniform records in the same order as [`iter`](Self::iter)
    pub fn to_uniforms(&self) -> Vec<NodeTransformUniform> {
        self.entries
            .iter()
            .map(|(_, m)| NodeTransformUniform {
                world: convert_matrix4_to_array(*m),
            })
            .collect()
    }
}
