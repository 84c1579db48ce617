pub mod instance;
pub mod camera;
pub mod traits;

// Re-export key types for convenient access
pub use camera::Viewport;
pub use instance::{RenderBuffer, RenderInstance};
pub use traits::{FrameData, LayerBatch, Renderer};
