// src/lib.rs
//! Rigkit
//!
//! Scene-graph core for interactive 3D rigs: hierarchical transforms, depth
//! sorted picking and a constrained manipulation state machine, plus the
//! tutorial rigs built on top of them. Rendering and windowing live outside
//! the crate.

pub mod app;
pub mod control;
pub mod gfx;
pub mod input;
pub mod prelude;
pub mod tutorials;

// Re-export main types for convenience
pub use app::RigApp;

/// Installs the `env_logger` backend, defaulting to `info` when `RUST_LOG` is unset
///
/// Safe to call more than once; later calls are ignored.
pub fn init_logging() {
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).try_init();
}
