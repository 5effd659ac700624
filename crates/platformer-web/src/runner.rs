use platformer_engine::{
    AssetManifest, EngineContext, FixedTimestep, FrameClock, FrameSource, Game, GameConfig,
    HudState, InputEvent, InputQueue, KeyBindings, KeyState, ProtocolLayout, RenderBuffer,
    RenderContext, SourceRegistry,
};
use platformer_engine::bridge::protocol::{
    HEADER_EVENT_COUNT, HEADER_FLOATS, HEADER_FRAME_COUNTER, HEADER_INSTANCE_COUNT,
    HEADER_SOUND_COUNT,
};

/// Generic game runner that wires up the engine loop.
///
/// Each concrete game creates a `thread_local!` GameRunner and exports free
/// functions via `#[wasm_bindgen]`, because wasm-bindgen cannot export
/// generic structs directly.
pub struct GameRunner<G: Game> {
    game: G,
    ctx: EngineContext,
    input: InputQueue,
    keys: KeyState,
    clock: FrameClock,
    timestep: FixedTimestep,
    render_buffer: RenderBuffer,
    sources: SourceRegistry,
    hud: HudState,
    hud_floats: [f32; HudState::FLOATS],
    config: GameConfig,
    layout: ProtocolLayout,
    initialized: bool,
    frame_counter: u32,
    /// Flat buffer of sound event IDs for shared-memory reads.
    sound_buffer: Vec<u8>,
}

impl<G: Game> GameRunner<G> {
    pub fn new(game: G) -> Self {
        let config = game.config();
        let timestep = FixedTimestep::new(config.fixed_dt);
        let layout = ProtocolLayout::from_config(&config);

        let render_buffer = RenderBuffer::with_capacity(config.max_instances);
        let sound_buffer = Vec::with_capacity(config.max_sounds);

        Self {
            game,
            ctx: EngineContext::new(),
            input: InputQueue::new(),
            keys: KeyState::new(KeyBindings::default()),
            clock: FrameClock::new(),
            timestep,
            render_buffer,
            sources: SourceRegistry::builtin(),
            hud: HudState::default(),
            hud_floats: [0.0; HudState::FLOATS],
            layout,
            config,
            initialized: false,
            frame_counter: 0,
            sound_buffer,
        }
    }

    /// Initialize the game. Call once after construction.
    pub fn init(&mut self) {
        self.config = self.game.config();
        self.layout = ProtocolLayout::from_config(&self.config);
        self.timestep = FixedTimestep::new(self.config.fixed_dt);
        self.game.init(&mut self.ctx);
        self.initialized = true;
    }

    /// Push an input event into the queue.
    pub fn push_input(&mut self, event: InputEvent) {
        self.input.push(event);
    }

    /// Run one display callback: apply queued input, run the fixed steps,
    /// then rebuild the render buffer, HUD and sound list.
    pub fn tick(&mut self, dt: f32) {
        if !self.initialized {
            return;
        }

        // Clear per-frame transient data
        self.ctx.clear_frame_data();

        self.input.apply_to(&mut self.keys);
        let snapshot = self.keys.snapshot();

        let steps = self.timestep.accumulate(dt);
        for _ in 0..steps {
            self.ctx.time = self.clock.advance(self.timestep.dt());
            self.game.update(&mut self.ctx, &snapshot);
        }

        self.render_buffer.clear();
        {
            let mut render_ctx = RenderContext {
                buffer: &mut self.render_buffer,
                sources: &self.sources,
                hud: &mut self.hud,
            };
            self.game.render(&mut render_ctx);
        }
        self.hud_floats = self.hud.to_floats();

        // Pack sound events into flat buffer
        self.sound_buffer.clear();
        for sound in self.ctx.sounds.iter().take(self.layout.max_sounds) {
            self.sound_buffer.push(sound.0 as u8);
        }
        if self.ctx.events.len() > self.layout.max_events {
            log::debug!("dropping {} game events", self.ctx.events.len() - self.layout.max_events);
        }

        self.frame_counter = self.frame_counter.wrapping_add(1);
    }

    /// Replace the asset manifest. Bad JSON or a manifest the game rejects
    /// leaves the previous sources and clips in place.
    pub fn load_manifest(&mut self, json: &str) {
        let manifest = match AssetManifest::from_json(json) {
            Ok(m) => m,
            Err(e) => {
                log::error!("manifest rejected: {}", e);
                return;
            }
        };
        if let Err(e) = self.game.apply_manifest(&manifest) {
            log::error!("manifest rejected: {}", e);
            return;
        }
        self.sources = SourceRegistry::from_manifest(&manifest);
        log::info!("manifest loaded: {} sheets", self.sources.len());
    }

    pub fn load_levels(&mut self, json: &str) {
        if let Err(e) = self.game.load_levels(json) {
            log::error!("levels rejected: {}", e);
        }
    }

    pub fn load_tuning(&mut self, json: &str) {
        if let Err(e) = self.game.load_tuning(json) {
            log::error!("tuning rejected: {}", e);
        }
    }

    /// The host finished decoding the image behind `source`.
    pub fn mark_source_ready(&mut self, source: u32) {
        self.sources.mark_ready(FrameSource(source));
    }

    pub fn set_background_width(&mut self, layer: u32, width: f32) {
        self.game.set_background_width(layer as usize, width);
    }

    pub fn game(&self) -> &G {
        &self.game
    }

    /// Header block with this frame's counters filled in.
    pub fn header(&self) -> [f32; HEADER_FLOATS] {
        let mut header = self.layout.header(&self.config);
        header[HEADER_FRAME_COUNTER] = self.frame_counter as f32;
        header[HEADER_INSTANCE_COUNT] = self.instance_count() as f32;
        header[HEADER_SOUND_COUNT] = self.sound_events_len() as f32;
        header[HEADER_EVENT_COUNT] = self.game_events_len() as f32;
        header
    }

    // ---- Pointer accessors for shared-memory reads ----

    pub fn instances_ptr(&self) -> *const f32 {
        self.render_buffer.instances_ptr()
    }

    pub fn instance_count(&self) -> u32 {
        self.render_buffer.instance_count()
    }

    pub fn hud_ptr(&self) -> *const f32 {
        self.hud_floats.as_ptr()
    }

    pub fn hud(&self) -> &HudState {
        &self.hud
    }

    pub fn sound_events_ptr(&self) -> *const u8 {
        self.sound_buffer.as_ptr()
    }

    pub fn sound_events_len(&self) -> u32 {
        self.sound_buffer.len() as u32
    }

    pub fn game_events_ptr(&self) -> *const f32 {
        self.ctx.events.as_ptr() as *const f32
    }

    pub fn game_events_len(&self) -> u32 {
        self.ctx.events.len().min(self.layout.max_events) as u32
    }

    pub fn frame_counter(&self) -> u32 {
        self.frame_counter
    }

    pub fn viewport_width(&self) -> f32 {
        self.config.viewport_width
    }

    pub fn viewport_height(&self) -> f32 {
        self.config.viewport_height
    }

    // ---- Capacity accessors (read by the host via wasm_bindgen exports) ----

    pub fn max_instances(&self) -> u32 {
        self.layout.max_instances as u32
    }

    pub fn max_sounds(&self) -> u32 {
        self.layout.max_sounds as u32
    }

    pub fn max_events(&self) -> u32 {
        self.layout.max_events as u32
    }

    pub fn buffer_total_floats(&self) -> u32 {
        self.layout.buffer_total_floats as u32
    }
}
