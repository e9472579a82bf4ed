//! Selection and manipulation state machine
//!
//! ```text
//!   Unselected ──pick node──▶ Selected ──toggle key──▶ Animating
//!       ▲                       │  ▲                      │
//!       └──empty/excluded pick──┘  └────range reached─────┘
//! ```
//!
//! Selecting a node stores its diffuse color and paints it with the highlight
//! color; leaving it (for another node or for nothing) restores the stored
//! value exactly.

use std::collections::{HashMap, HashSet};

use cgmath::Vector3;
use winit::keyboard::KeyCode;

use crate::gfx::picking::PickResult;
use crate::gfx::resources::Color;
use crate::gfx::scene::{NodeId, SceneGraph};
use crate::input::InputSnapshot;

use super::animation::ToggleAnimation;
use super::joints::{JointTable, JointUpdate};

/// Tunables of a [`ManipulationController`]
#[derive(Debug, Clone)]
pub struct ControllerConfig {
    pub highlight: Color,
    /// Nodes that can never be selected; picking one clears the selection
    pub excluded: HashSet<NodeId>,
    pub joints: JointTable,
    pub toggles: HashMap<NodeId, ToggleAnimation>,
    pub toggle_key: KeyCode,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            highlight: Vector3::new(1.0, 0.4, 0.4),
            excluded: HashSet::new(),
            joints: JointTable::new(),
            toggles: HashMap::new(),
            toggle_key: KeyCode::KeyF,
        }
    }
}

impl ControllerConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder pattern: Set the highlight color
    pub fn with_highlight(mut self, r: f32, g: f32, b: f32) -> Self {
        self.highlight = Vector3::new(r, g, b);
        self
    }

    /// Builder pattern: Set the joint table
    pub fn with_joints(mut self, joints: JointTable) -> Self {
        self.joints = joints;
        self
    }

    /// Builder pattern: Set the key that triggers toggle animations
    pub fn with_toggle_key(mut self, key: KeyCode) -> Self {
        self.toggle_key = key;
        self
    }

    /// Excludes a node from selection; unresolved nodes are skipped
    pub fn exclude(&mut self, node: Option<NodeId>) {
        if let Some(node) = node {
            self.excluded.insert(node);
        }
    }

    /// Attaches a toggle animation to a node; unresolved nodes are skipped
    pub fn add_toggle(&mut self, node: Option<NodeId>, animation: ToggleAnimation) {
        if let Some(node) = node {
            self.toggles.insert(node, animation);
        }
    }

    pub fn is_excluded(&self, node: NodeId) -> bool {
        self.excluded.contains(&node)
    }
}

/// Coarse state of the controller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionPhase {
    Unselected,
    Selected,
    /// Selected, with the node's toggle animation running
    Animating,
}

/// The currently selected node
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Selection {
    pub node: NodeId,
    /// Most recent pick that resolved to this node
    pub pick: PickResult,
    /// Diffuse color before highlighting; `None` if the node has no material
    stored_diffuse: Option<Color>,
}

impl Selection {
    pub fn stored_diffuse(&self) -> Option<Color> {
        self.stored_diffuse
    }
}

/// Per-frame selection, highlighting and joint manipulation
#[derive(Debug, Clone, Default)]
pub struct ManipulationController {
    config: ControllerConfig,
    selection: Option<Selection>,
}

impl ManipulationController {
    pub fn new(config: ControllerConfig) -> Self {
        Self {
            config,
            selection: None,
        }
    }

    pub fn config(&self) -> &ControllerConfig {
        &self.config
    }

    pub fn config_mut(&mut self) -> &mut ControllerConfig {
        &mut self.config
    }

    pub fn selection(&self) -> Option<&Selection> {
        self.selection.as_ref()
    }

    pub fn selected(&self) -> Option<NodeId> {
        self.selection.map(|s| s.node)
    }

    pub fn current_pick(&self) -> Option<PickResult> {
        self.selection.map(|s| s.pick)
    }

    pub fn phase(&self) -> SelectionPhase {
        match self.selection {
            None => SelectionPhase::Unselected,
            Some(sel) if self.toggle_active(sel.node) => SelectionPhase::Animating,
            Some(_) => SelectionPhase::Selected,
        }
    }

    fn toggle_active(&self, node: NodeId) -> bool {
        self.config.toggles.get(&node).is_some_and(|a| a.is_active())
    }

    /// Resolves a fresh pick (nearest first) into a selection change
    pub fn apply_pick(&mut self, scene: &mut SceneGraph, picks: &[PickResult]) {
        let Some(nearest) = picks.first().copied() else {
            self.deselect(scene);
            return;
        };

        if self.config.is_excluded(nearest.node) {
            log::debug!("pick hit excluded node {}", nearest.node);
            self.deselect(scene);
            return;
        }

        if let Some(sel) = self.selection.as_mut() {
            if sel.node == nearest.node {
                sel.pick = nearest;
                return;
            }
        }

        self.deselect(scene);

        let highlight = self.config.highlight;
        let stored_diffuse = scene.material_mut(nearest.node).map(|m| {
            let previous = m.diffuse;
            m.diffuse = highlight;
            previous
        });
        log::debug!("selected node {}", nearest.node);

        self.selection = Some(Selection {
            node: nearest.node,
            pick: nearest,
            stored_diffuse,
        });
    }

    /// Clears the selection, restoring the highlighted node's diffuse color
    /// and stopping its toggle animation
    pub fn deselect(&mut self, scene: &mut SceneGraph) {
        let Some(sel) = self.selection.take() else {
            return;
        };

        if let (Some(diffuse), Some(material)) = (sel.stored_diffuse, scene.material_mut(sel.node)) {
            material.diffuse = diffuse;
        }
        if let Some(anim) = self.config.toggles.get_mut(&sel.node) {
            anim.cancel();
        }
        log::debug!("deselected node {}", sel.node);
    }

    /// Applies one frame of input to the selected node
    ///
    /// A toggle key press starts (or reverses) the node's toggle animation.
    /// While it runs, joint input for that node is ignored.
    pub fn update(&mut self, scene: &mut SceneGraph, input: &InputSnapshot, delta_time: f32) {
        let Some(node) = self.selected() else {
            return;
        };

        if input.was_pressed(self.config.toggle_key) {
            if let Some(anim) = self.config.toggles.get_mut(&node) {
                anim.toggle();
            }
        }

        if let Some(anim) = self.config.toggles.get_mut(&node) {
            if anim.is_active() {
                anim.advance(scene, node, delta_time);
                return;
            }
        }

        if let Some(joint) = self.config.joints.get(node).copied() {
            if let JointUpdate::Rejected = joint.drive(scene, node, input, delta_time) {
                log::trace!("joint update for {} out of range, discarded", node);
            }
        }
    }
}
