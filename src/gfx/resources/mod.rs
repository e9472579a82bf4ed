pub mod material;

// Re-export main types
pub use material::{Color, Material, Specular};
