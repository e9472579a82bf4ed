//! # First Steps Demo
//!
//! Three cubes bounce, spin and squash while the camera circles them.
//!
//! ## Usage:
//! ```bash
//! RUST_LOG=info cargo run --example first_steps
//! ```
//!
//! Runs two seconds at 60 frames per second and logs each cube's world
//! position every half second.

use anyhow::Context;
use rigkit::prelude::*;

const FPS: f32 = 60.0;

fn main() -> anyhow::Result<()> {
    init_logging();

    let mut app = RigApp::new(FirstSteps::new());
    let projection = Projection::for_viewport(1200, 800).matrix();
    let cubes = app.find_nodes(|n| n.mesh.is_some());
    anyhow::ensure!(!cubes.is_empty(), "scene has no cubes");

    let input = InputSnapshot::new();
    for frame in 0..(2.0 * FPS) as u32 {
        let view = app.view_matrix();
        let transforms = app.update(1.0 / FPS, &input, cgmath::Vector2::new(0.0, 0.0), view, projection);

        if frame % 30 == 29 {
            for &cube in &cubes {
                let world = transforms.get(cube).context("cube lost its world transform")?;
                log::info!(
                    "frame {:3} cube {}: ({:6.2}, {:6.2}, {:6.2})",
                    frame + 1,
                    cube,
                    world.w.x,
                    world.w.y,
                    world.w.z
                );
            }
        }
    }

    Ok(())
}
