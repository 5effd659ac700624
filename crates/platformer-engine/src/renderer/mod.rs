pub mod instance;
pub mod camera;
pub mod parallax;

// Re-export key types for convenient access
pub use camera::ScrollCamera;
pub use instance::{RenderBuffer, SpriteInstance};
pub use parallax::Parallax;
