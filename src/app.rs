//! Per-frame driver tying the scene, the picker and a tutorial together
//!
//! Each [`RigApp::update`] runs the frame stages strictly in order:
//! pick (while the pointer is held), tutorial update, world-transform
//! composition. Windowing and rendering stay outside; the caller feeds input
//! snapshots and camera matrices in and uploads the returned transforms.

use cgmath::{Matrix4, Vector2};

use crate::gfx::picking::{PickResult, ScenePicker};
use crate::gfx::scene::{Node, NodeId, SceneGraph, WorldTransforms};
use crate::input::InputSnapshot;
use crate::tutorials::{FrameInput, Tutorial};

pub struct RigApp {
    scene: SceneGraph,
    picker: ScenePicker,
    tutorial: Box<dyn Tutorial>,
    last_picks: Vec<PickResult>,
    frame_count: u64,
}

impl RigApp {
    /// Creates an app running `tutorial` on its procedural scene
    pub fn new<T: Tutorial + 'static>(tutorial: T) -> Self {
        let scene = tutorial.build_scene();
        Self::with_scene(scene, Box::new(tutorial))
    }

    /// Creates an app running `tutorial` on an externally populated scene
    pub fn with_scene(mut scene: SceneGraph, mut tutorial: Box<dyn Tutorial>) -> Self {
        tutorial.initialize(&mut scene);
        log::info!("{} ready with {} nodes", tutorial.name(), scene.len());
        Self {
            scene,
            picker: ScenePicker::default(),
            tutorial,
            last_picks: Vec::new(),
            frame_count: 0,
        }
    }

    /// Runs one frame and returns every node's world transform
    ///
    /// `cursor` is in normalized device coordinates. Negative or non-finite
    /// `delta_time` is treated as zero.
    pub fn update(
        &mut self,
        delta_time: f32,
        input: &InputSnapshot,
        cursor: Vector2<f32>,
        view: Matrix4<f32>,
        projection: Matrix4<f32>,
    ) -> WorldTransforms {
        let delta_time = if delta_time.is_finite() { delta_time.max(0.0) } else { 0.0 };

        self.picker.set_camera(view, projection);
        let picked = input.pointer_down;
        if picked {
            self.last_picks = self.picker.pick(&self.scene, cursor);
        } else {
            self.last_picks.clear();
        }

        let frame = FrameInput {
            delta_time,
            input,
            cursor,
            picks: picked.then_some(self.last_picks.as_slice()),
        };
        self.tutorial.update(&mut self.scene, &frame);
        self.frame_count += 1;

        self.scene.world_transforms()
    }

    /// Every node satisfying `predicate`, in depth-first order
    pub fn find_nodes<F>(&self, predicate: F) -> Vec<NodeId>
    where
        F: Fn(&Node) -> bool,
    {
        self.scene.find_by_predicate(predicate)
    }

    /// The tutorial's camera for the current state
    pub fn view_matrix(&self) -> Matrix4<f32> {
        self.tutorial.view_matrix(&self.scene)
    }

    pub fn scene(&self) -> &SceneGraph {
        &self.scene
    }

    pub fn scene_mut(&mut self) -> &mut SceneGraph {
        &mut self.scene
    }

    pub fn tutorial(&self) -> &dyn Tutorial {
        self.tutorial.as_ref()
    }

    /// Picks of the most recent frame; empty when the pointer was up
    pub fn last_picks(&self) -> &[PickResult] {
        &self.last_picks
    }

    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gfx::camera::Projection;
    use crate::tutorials::{AssetsPicking, FirstSteps};
    use cgmath::{SquareMatrix, Vector4};

    fn projection() -> Matrix4<f32> {
        Projection::for_viewport(800, 800).matrix()
    }

    #[test]
    fn test_update_returns_all_world_transforms() {
        let mut app = RigApp::new(FirstSteps::new());
        let view = app.view_matrix();
        let transforms = app.update(0.1, &InputSnapshot::new(), Vector2::new(0.0, 0.0), view, projection());

        assert_eq!(transforms.len(), 3);
        for id in app.find_nodes(|n| n.mesh.is_some()) {
            let world = transforms.get(id).unwrap();
            assert_eq!(Some(world), app.scene().world_transform(id));
        }
        assert_eq!(app.frame_count(), 1);
    }

    #[test]
    fn test_invalid_delta_time_is_zero() {
        let mut app = RigApp::new(FirstSteps::new());
        let cube = app.find_nodes(|n| n.is_named("Cube0"))[0];
        let input = InputSnapshot::new();

        app.update(0.0, &input, Vector2::new(0.0, 0.0), Matrix4::identity(), projection());
        let rest = *app.scene().transform(cube).unwrap();

        app.update(-1.0, &input, Vector2::new(0.0, 0.0), Matrix4::identity(), projection());
        app.update(f32::NAN, &input, Vector2::new(0.0, 0.0), Matrix4::identity(), projection());
        assert_eq!(*app.scene().transform(cube).unwrap(), rest);
    }

    #[test]
    fn test_pointer_pick_selects_turret() {
        let mut app = RigApp::new(AssetsPicking::new());
        let turret = app.find_nodes(|n| n.is_named("Arm1"))[0];
        let view = app.view_matrix();
        let proj = projection();

        // Project a point inside the turret to the screen
        let clip = proj * view * Vector4::new(0.0, 3.5, 0.5, 1.0);
        let cursor = Vector2::new(clip.x / clip.w, clip.y / clip.w);

        // Hovering alone does not pick
        app.update(0.016, &InputSnapshot::new(), cursor, view, proj);
        assert!(app.last_picks().is_empty());
        assert_eq!(app.tutorial().controller().unwrap().selected(), None);

        let click = InputSnapshot::new().with_pointer_down(true);
        app.update(0.016, &click, cursor, view, proj);
        assert_eq!(app.last_picks().first().map(|p| p.node), Some(turret));
        assert_eq!(app.tutorial().controller().unwrap().selected(), Some(turret));
        assert_eq!(
            app.scene().material(turret).unwrap().diffuse,
            cgmath::Vector3::new(1.0, 0.4, 0.4)
        );

        // Clicking empty sky clears the selection
        app.update(0.016, &click, Vector2::new(0.0, 0.99), view, proj);
        assert_eq!(app.tutorial().controller().unwrap().selected(), None);
    }

    #[test]
    fn test_find_nodes_empty_on_miss() {
        let app = RigApp::new(FirstSteps::new());
        assert!(app.find_nodes(|n| n.is_named("Nope")).is_empty());
    }
}
