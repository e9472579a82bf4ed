//! # Driving Demo
//!
//! Selects the excavator, drives a curve, then selects the dune and lets the
//! excavator turn toward it. The chase camera position is logged along the
//! way.
//!
//! ## Usage:
//! ```bash
//! RUST_LOG=debug cargo run --example driving
//! ```

use anyhow::Context;
use cgmath::{SquareMatrix, Vector2, Vector4};
use rigkit::prelude::*;

const DT: f32 = 1.0 / 60.0;

/// Cursor position over the origin of `node` under the app's current camera
fn cursor_over(app: &RigApp, node: NodeId, projection: cgmath::Matrix4<f32>) -> anyhow::Result<Vector2<f32>> {
    let world = app.scene().world_transform(node).context("node has no world transform")?;
    let clip = projection * app.view_matrix() * world * Vector4::new(0.0, 0.5, 0.0, 1.0);
    anyhow::ensure!(clip.w > 0.0, "node {} is behind the camera", node);
    Ok(Vector2::new(clip.x / clip.w, clip.y / clip.w))
}

fn main() -> anyhow::Result<()> {
    init_logging();

    let mut app = RigApp::new(Driving::default());
    let projection = Projection::for_viewport(1200, 800).matrix();

    let main = app.find_nodes(|n| n.is_named("Main")).first().copied().context("no excavator")?;
    let dune = app.find_nodes(|n| n.is_named("Icosphere")).first().copied().context("no dune")?;
    let camera = app.find_nodes(|n| n.is_named("Camera")).first().copied().context("no camera")?;

    let click = InputSnapshot::new().with_pointer_down(true);
    let cursor = cursor_over(&app, main, projection)?;
    app.update(DT, &click, cursor, app.view_matrix(), projection);
    log::info!("selected {:?}", app.tutorial().controller().and_then(|c| c.selected()));

    let drive = InputSnapshot::new()
        .with_axis(InputAxis::WS, 1.0)
        .with_axis(InputAxis::AD, 0.4);
    for frame in 0..180 {
        app.update(DT, &drive, cursor, app.view_matrix(), projection);
        if frame % 60 == 59 {
            let m = app.scene().transform(main).context("excavator lost its transform")?;
            let c = app.scene().transform(camera).context("camera lost its transform")?;
            log::info!(
                "excavator ({:6.2}, {:6.2}) yaw {:5.2} | camera ({:6.2}, {:6.2})",
                m.translation.x,
                m.translation.z,
                m.rotation.y,
                c.translation.x,
                c.translation.z
            );
        }
    }

    // A fresh rig selects the dune by handing the pick straight to the
    // tutorial, with no dependence on where the camera ended up
    let picks = [PickResult {
        node: dune,
        clip_pos: cgmath::Vector3::new(0.0, 0.0, 0.0),
        point: cgmath::Vector3::new(0.0, 0.0, 0.0),
    }];
    let mut scene_picks = Some(&picks[..]);
    let mut driving = Driving::default();
    let mut scene = driving.build_scene();
    driving.initialize(&mut scene);
    for _ in 0..300 {
        let idle = InputSnapshot::new();
        let frame = FrameInput {
            delta_time: DT,
            input: &idle,
            cursor: Vector2::new(0.0, 0.0),
            picks: scene_picks.take(),
        };
        driving.update(&mut scene, &frame);
    }
    let m = driving
        .rig()
        .main
        .and_then(|id| scene.transform(id))
        .context("excavator lost its transform")?;
    log::info!("after tracking the dune, excavator yaw is {:.3}", m.rotation.y);

    let view = driving.view_matrix(&scene);
    log::info!("chase camera sits at {:?}", view.invert().map(|v| v.w.truncate()));

    Ok(())
}
