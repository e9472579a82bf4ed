//! # Assets and Picking Demo
//!
//! Clicks through the excavator parts by projecting each part's pivot to the
//! screen, then rotates the selected part with A/D.
//!
//! ## Usage:
//! ```bash
//! RUST_LOG=debug cargo run --example assets_picking
//! ```

use anyhow::Context;
use cgmath::{Vector2, Vector4};
use rigkit::prelude::*;

const DT: f32 = 1.0 / 60.0;

fn main() -> anyhow::Result<()> {
    init_logging();

    let mut app = RigApp::new(AssetsPicking::new());
    let projection = Projection::for_viewport(1200, 800).matrix();
    let view = app.view_matrix();

    for name in ["Arm1", "Arm2", "Shovel"] {
        let node = app
            .find_nodes(|n| n.is_named(name))
            .first()
            .copied()
            .with_context(|| format!("excavator has no {}", name))?;

        // Aim slightly inside the part, just past its pivot
        let world = app.scene().world_transform(node).context("part has no world transform")?;
        let clip = projection * view * world * Vector4::new(0.0, 0.2, -0.2, 1.0);
        let cursor = Vector2::new(clip.x / clip.w, clip.y / clip.w);

        let click = InputSnapshot::new().with_pointer_down(true);
        app.update(DT, &click, cursor, view, projection);

        let selected = app.tutorial().controller().and_then(|c| c.selected());
        log::info!(
            "clicked {} at ({:.3}, {:.3}): {} hit(s), selected {:?}",
            name,
            cursor.x,
            cursor.y,
            app.last_picks().len(),
            selected
        );

        let rotate = InputSnapshot::new().with_axis(InputAxis::AD, 1.0);
        for _ in 0..30 {
            app.update(DT, &rotate, cursor, view, projection);
        }
        if let Some(t) = selected.and_then(|s| app.scene().transform(s)) {
            log::info!("  rotation now ({:.2}, {:.2}, {:.2})", t.rotation.x, t.rotation.y, t.rotation.z);
        }
    }

    Ok(())
}
