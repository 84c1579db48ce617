use ledge_engine::{FrameData, GameConfig, GameEvent, LayerBatch, RenderInstance, Renderer, Viewport};

/// Renderer that copies each frame into flat buffers the JS host reads
/// straight out of wasm memory.
///
/// Every section is truncated to the capacity announced to the host, so a
/// host that sized its views from the capacity accessors never reads past
/// the data it expects.
pub struct SharedBufferRenderer {
    max_instances: usize,
    max_sounds: usize,
    max_events: usize,
    instances: Vec<RenderInstance>,
    /// `LayerBatch::FLOATS` floats per batch: layer id, start, end.
    batches: Vec<f32>,
    sounds: Vec<u8>,
    events: Vec<GameEvent>,
    viewport: Viewport,
    projection: [f32; 16],
}

impl SharedBufferRenderer {
    pub fn new(config: &GameConfig) -> Self {
        let viewport = Viewport::new(config.world_width, config.world_height);
        Self {
            max_instances: config.max_instances,
            max_sounds: config.max_sounds,
            max_events: config.max_events,
            instances: Vec::with_capacity(config.max_instances),
            batches: Vec::new(),
            sounds: Vec::with_capacity(config.max_sounds),
            events: Vec::with_capacity(config.max_events),
            projection: viewport.projection_matrix().to_cols_array(),
            viewport,
        }
    }

    fn pack_batch(&mut self, batch: &LayerBatch) {
        let cap = self.max_instances as u32;
        self.batches.push(batch.layer_id as f32);
        self.batches.push(batch.start.min(cap) as f32);
        self.batches.push(batch.end.min(cap) as f32);
    }

    pub fn instances_ptr(&self) -> *const f32 {
        self.instances.as_ptr() as *const f32
    }

    pub fn instance_count(&self) -> u32 {
        self.instances.len() as u32
    }

    pub fn instances(&self) -> &[RenderInstance] {
        &self.instances
    }

    pub fn layer_batches_ptr(&self) -> *const f32 {
        self.batches.as_ptr()
    }

    pub fn layer_batch_count(&self) -> u32 {
        (self.batches.len() / LayerBatch::FLOATS) as u32
    }

    pub fn layer_batches(&self) -> &[f32] {
        &self.batches
    }

    pub fn sound_events_ptr(&self) -> *const u8 {
        self.sounds.as_ptr()
    }

    pub fn sound_events_len(&self) -> u32 {
        self.sounds.len() as u32
    }

    pub fn sound_events(&self) -> &[u8] {
        &self.sounds
    }

    pub fn game_events_ptr(&self) -> *const f32 {
        self.events.as_ptr() as *const f32
    }

    pub fn game_events_len(&self) -> u32 {
        self.events.len() as u32
    }

    pub fn game_events(&self) -> &[GameEvent] {
        &self.events
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    /// Column-major orthographic projection for the current viewport.
    pub fn projection_ptr(&self) -> *const f32 {
        self.projection.as_ptr()
    }
}

impl Renderer for SharedBufferRenderer {
    fn backend(&self) -> &'static str {
        "shared-buffer"
    }

    fn draw(&mut self, frame: &FrameData) {
        let count = frame.instances.len().min(self.max_instances);
        if count < frame.instances.len() {
            log::warn!(
                "Dropping {} render instance(s) over capacity {}",
                frame.instances.len() - count,
                self.max_instances
            );
        }
        self.instances.clear();
        self.instances.extend_from_slice(&frame.instances[..count]);

        self.batches.clear();
        for batch in frame.layer_batches {
            self.pack_batch(batch);
        }

        self.sounds.clear();
        for sound in frame.sounds {
            if self.sounds.len() == self.max_sounds {
                break;
            }
            match u8::try_from(sound.0) {
                Ok(id) => self.sounds.push(id),
                Err(_) => log::warn!("Dropping sound event {}: ids above 255 do not fit", sound.0),
            }
        }

        self.events.clear();
        self.events
            .extend(frame.events.iter().take(self.max_events).copied());

        self.viewport = *frame.viewport;
        self.projection = self.viewport.projection_matrix().to_cols_array();
    }
}
