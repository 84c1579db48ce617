use bytemuck::{Pod, Zeroable};

use super::traits::LayerBatch;

/// Per-instance render data read by the host renderer.
/// 8 floats = 32 bytes stride.
///
/// `scale` is the world-space rendered size. A negative scale means the
/// atlas cell is drawn mirrored horizontally.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct RenderInstance {
    /// X position in world space.
    pub x: f32,
    /// Y position in world space.
    pub y: f32,
    /// Rotation in radians.
    pub rotation: f32,
    /// World-space rendered size; negative = mirrored.
    pub scale: f32,
    /// Atlas column.
    pub sprite_col: f32,
    /// Atlas row.
    pub atlas_row: f32,
    /// Atlas index.
    pub atlas: f32,
    /// Opacity (0.0 = invisible, 1.0 = opaque).
    pub alpha: f32,
}

impl RenderInstance {
    pub const FLOATS: usize = 8;
    pub const STRIDE_BYTES: usize = Self::FLOATS * 4;
}

/// Render buffer containing all sprite instances, ordered by draw group.
pub struct RenderBuffer {
    pub instances: Vec<RenderInstance>,
    /// One batch per draw group, in draw order.
    pub layer_batches: Vec<LayerBatch>,
}

impl RenderBuffer {
    pub fn new() -> Self {
        Self::with_capacity(512)
    }

    pub fn with_capacity(instances: usize) -> Self {
        Self {
            instances: Vec::with_capacity(instances),
            layer_batches: Vec::new(),
        }
    }

    pub fn clear(&mut self) {
        self.instances.clear();
        self.layer_batches.clear();
    }

    pub fn push(&mut self, instance: RenderInstance) {
        self.instances.push(instance);
    }

    pub fn push_batch(&mut self, batch: LayerBatch) {
        self.layer_batches.push(batch);
    }

    pub fn instance_count(&self) -> u32 {
        self.instances.len() as u32
    }

    /// Raw pointer to instance data for host reads.
    pub fn instances_ptr(&self) -> *const f32 {
        self.instances.as_ptr() as *const f32
    }
}

impl Default for RenderBuffer {
    fn default() -> Self {
        Self::new()
    }
}
