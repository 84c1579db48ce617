use ledge_engine::{
    build_render_buffer, EngineContext, FixedTimestep, FrameData, Game, GameConfig,
    InputEvent, InputQueue, RenderBuffer, RenderContext, Renderer, Viewport,
};

use crate::shared::SharedBufferRenderer;

/// Generic game runner that wires up the engine loop.
///
/// Each concrete game creates a `thread_local!` GameRunner and exports free
/// functions via `#[wasm_bindgen]` (see `export_game!`), because
/// wasm-bindgen cannot export generic structs directly.
pub struct GameRunner<G: Game> {
    game: G,
    ctx: EngineContext<G::Physics>,
    input: InputQueue,
    render_buffer: RenderBuffer,
    viewport: Viewport,
    timestep: FixedTimestep,
    config: GameConfig,
    output: SharedBufferRenderer,
    initialized: bool,
}

impl<G: Game> GameRunner<G> {
    pub fn new(game: G) -> Self {
        let config = game.config();
        Self {
            ctx: EngineContext::from_config(&config),
            input: InputQueue::new(),
            render_buffer: RenderBuffer::with_capacity(config.max_instances),
            viewport: Viewport::new(config.world_width, config.world_height),
            timestep: FixedTimestep::new(config.fixed_dt),
            output: SharedBufferRenderer::new(&config),
            config,
            game,
            initialized: false,
        }
    }

    /// Store a named text resource (map, manifest, config) for the game.
    /// Must be called before `init` for everything `init` reads.
    pub fn load_resource(&mut self, name: &str, data: &str) {
        self.ctx.assets.insert(name, data);
    }

    /// Initialize the game. Call once after all resources are loaded.
    ///
    /// The game may change its configuration while reading resources, so
    /// the physics world and buffers are rebuilt from the final config.
    pub fn init(&mut self) -> Result<(), G::Error> {
        self.game.configure(&self.ctx.assets)?;
        self.config = self.game.config();

        let assets = std::mem::take(&mut self.ctx.assets);
        self.ctx = EngineContext::from_config(&self.config);
        self.ctx.assets = assets;
        self.render_buffer = RenderBuffer::with_capacity(self.config.max_instances);
        self.viewport = Viewport::new(self.config.world_width, self.config.world_height);
        self.timestep = FixedTimestep::new(self.config.fixed_dt);
        self.output = SharedBufferRenderer::new(&self.config);

        self.game.init(&mut self.ctx)?;
        self.initialized = true;
        Ok(())
    }

    /// Push an input event into the queue.
    pub fn push_input(&mut self, event: InputEvent) {
        self.input.push(event);
    }

    /// Run one frame: zero or more fixed updates, then build and publish
    /// the render data.
    pub fn tick(&mut self, dt: f32) -> Result<(), G::Error> {
        if !self.initialized {
            return Ok(());
        }

        self.ctx.clear_frame_data();

        let steps = self.timestep.accumulate(dt);
        if steps > 0 {
            // Only the first step of a frame sees the queued events.
            let events = self.input.drain();
            self.game.update(&mut self.ctx, &events)?;
            for _ in 1..steps {
                self.game.update(&mut self.ctx, &[])?;
            }
        }

        build_render_buffer(&self.ctx.scene, &mut self.render_buffer);
        {
            let mut render_ctx = RenderContext {
                render_buffer: &mut self.render_buffer,
                viewport: &mut self.viewport,
            };
            self.game.render(&mut render_ctx);
        }

        let frame = FrameData {
            instances: &self.render_buffer.instances,
            layer_batches: &self.render_buffer.layer_batches,
            viewport: &self.viewport,
            sounds: &self.ctx.sounds,
            events: &self.ctx.events,
        };
        self.output.draw(&frame);
        Ok(())
    }

    /// Hand the most recent frame to another renderer.
    pub fn draw<R: Renderer>(&self, renderer: &mut R) {
        renderer.draw(&FrameData {
            instances: &self.render_buffer.instances,
            layer_batches: &self.render_buffer.layer_batches,
            viewport: &self.viewport,
            sounds: &self.ctx.sounds,
            events: &self.ctx.events,
        });
    }

    pub fn game(&self) -> &G {
        &self.game
    }

    pub fn context(&self) -> &EngineContext<G::Physics> {
        &self.ctx
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    // ---- Pointer accessors for host reads ----

    pub fn instances_ptr(&self) -> *const f32 {
        self.output.instances_ptr()
    }

    pub fn instance_count(&self) -> u32 {
        self.output.instance_count()
    }

    pub fn layer_batches_ptr(&self) -> *const f32 {
        self.output.layer_batches_ptr()
    }

    pub fn layer_batch_count(&self) -> u32 {
        self.output.layer_batch_count()
    }

    pub fn sound_events_ptr(&self) -> *const u8 {
        self.output.sound_events_ptr()
    }

    pub fn sound_events_len(&self) -> u32 {
        self.output.sound_events_len()
    }

    pub fn game_events_ptr(&self) -> *const f32 {
        self.output.game_events_ptr()
    }

    pub fn game_events_len(&self) -> u32 {
        self.output.game_events_len()
    }

    pub fn projection_ptr(&self) -> *const f32 {
        self.output.projection_ptr()
    }

    pub fn viewport_left(&self) -> i32 {
        self.output.viewport().left
    }

    pub fn viewport_bottom(&self) -> i32 {
        self.output.viewport().bottom
    }

    pub fn world_width(&self) -> f32 {
        self.config.world_width
    }

    pub fn world_height(&self) -> f32 {
        self.config.world_height
    }

    // ---- Capacity accessors ----

    pub fn max_instances(&self) -> u32 {
        self.config.max_instances as u32
    }

    pub fn max_sounds(&self) -> u32 {
        self.config.max_sounds as u32
    }

    pub fn max_events(&self) -> u32 {
        self.config.max_events as u32
    }
}
