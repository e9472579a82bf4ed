pub mod camera_utils;

// Re-export main types
pub use camera_utils::{screen_to_ndc, turntable_view, Projection};
