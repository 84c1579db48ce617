//! Renderer capability.
//!
//! The engine produces a [`FrameData`] per frame; a backend turns it into
//! pixels. In the browser the backend is the host bridge, which packs the
//! frame into flat buffers for the JavaScript renderer.

use super::camera::Viewport;
use super::instance::RenderInstance;
use crate::api::types::{GameEvent, SoundEvent};

/// Layer batch descriptor for multi-layer rendering.
/// Mirrors the wire format: 3 floats per batch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LayerBatch {
    /// Draw group (see `RenderLayer`).
    pub layer_id: u8,
    /// Start index in the instance array
    pub start: u32,
    /// End index (exclusive) in the instance array
    pub end: u32,
}

impl LayerBatch {
    pub const FLOATS: usize = 3;

    pub fn len(&self) -> u32 {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

/// Complete frame data for rendering.
pub struct FrameData<'a> {
    /// Sprite instances, sorted by draw group.
    pub instances: &'a [RenderInstance],
    /// One descriptor per draw group, in draw order.
    pub layer_batches: &'a [LayerBatch],
    pub viewport: &'a Viewport,
    /// Sounds triggered this frame.
    pub sounds: &'a [SoundEvent],
    /// Game events emitted this frame.
    pub events: &'a [GameEvent],
}

/// A rendering backend.
pub trait Renderer {
    /// Backend identifier (e.g. "shared-buffer", "headless").
    fn backend(&self) -> &'static str;

    /// Draw a complete frame.
    fn draw(&mut self, frame: &FrameData);
}
