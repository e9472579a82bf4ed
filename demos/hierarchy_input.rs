//! # Hierarchy and Input Demo
//!
//! Scripted keyboard session on the robot arm: swing the body, raise both
//! arm segments, then toggle the gripper open and closed again.
//!
//! ## Usage:
//! ```bash
//! RUST_LOG=debug cargo run --example hierarchy_input
//! ```

use anyhow::Context;
use cgmath::Vector2;
use rigkit::prelude::*;
use winit::keyboard::KeyCode;

const DT: f32 = 1.0 / 60.0;

fn run(app: &mut RigApp, input: &InputSnapshot, frames: u32) {
    let projection = Projection::for_viewport(1200, 800).matrix();
    for i in 0..frames {
        // Press edges only last one frame
        let snapshot = if i == 0 {
            input.clone()
        } else {
            InputSnapshot { pressed: Vec::new(), ..input.clone() }
        };
        let view = app.view_matrix();
        app.update(DT, &snapshot, Vector2::new(0.0, 0.0), view, projection);
    }
}

fn log_pose(app: &RigApp, name: &str) -> anyhow::Result<()> {
    let node = app
        .find_nodes(|n| n.is_named(name))
        .first()
        .copied()
        .with_context(|| format!("no node named {}", name))?;
    let t = app.scene().transform(node).context("node has no transform")?;
    log::info!(
        "{:>16}: rotation ({:5.2}, {:5.2}, {:5.2})",
        name,
        t.rotation.x,
        t.rotation.y,
        t.rotation.z
    );
    Ok(())
}

fn main() -> anyhow::Result<()> {
    init_logging();

    let mut app = RigApp::new(HierarchyInput::new());

    run(&mut app, &InputSnapshot::new().with_axis(InputAxis::LeftRight, 1.0), 30);
    run(&mut app, &InputSnapshot::new().with_axis(InputAxis::UpDown, 1.0), 20);
    run(&mut app, &InputSnapshot::new().with_axis(InputAxis::WS, -1.0), 20);
    run(&mut app, &InputSnapshot::new().with_pressed(KeyCode::KeyF), 60);

    for name in ["Body", "UpperArmPivot", "LowerArmPivot", "RightFingerPivot", "LeftFingerPivot"] {
        log_pose(&app, name)?;
    }

    run(&mut app, &InputSnapshot::new().with_pressed(KeyCode::KeyF), 60);
    log_pose(&app, "RightFingerPivot")?;

    Ok(())
}
