use crate::api::types::{EntityId, GameEvent, IdAllocator, SoundEvent};
use crate::assets::library::AssetError;
use crate::assets::manifest::AssetManifest;
use crate::assets::registry::FrameSourceStatus;
use crate::core::time::FrameTime;
use crate::input::keys::InputSnapshot;
use crate::level::map::LevelError;
use crate::renderer::instance::RenderBuffer;
use crate::systems::render::HudState;

/// Engine configuration, provided by the game.
#[derive(Debug, Clone)]
pub struct GameConfig {
    /// Fixed timestep in seconds (default: 1/60).
    pub fixed_dt: f32,
    /// Visible width in world units.
    pub viewport_width: f32,
    /// Visible height in world units.
    pub viewport_height: f32,
    /// Maximum number of render instances (default: 512).
    pub max_instances: usize,
    /// Maximum number of sound events per frame (default: 32).
    pub max_sounds: usize,
    /// Maximum number of game events per frame (default: 32).
    pub max_events: usize,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            fixed_dt: 1.0 / 60.0,
            viewport_width: 1280.0,
            viewport_height: 720.0,
            max_instances: 512,
            max_sounds: 32,
            max_events: 32,
        }
    }
}

/// The contract a game fulfils for the runner.
pub trait Game {
    /// Engine configuration. Called once before init.
    fn config(&self) -> GameConfig {
        GameConfig::default()
    }

    fn init(&mut self, ctx: &mut EngineContext);

    /// One fixed step. `ctx.time` is already sampled for this step.
    fn update(&mut self, ctx: &mut EngineContext, input: &InputSnapshot);

    /// Read-only pass that fills the render buffer and HUD header.
    fn render(&self, ctx: &mut RenderContext);

    /// Rebuild whatever the game derives from the asset manifest.
    fn apply_manifest(&mut self, _manifest: &AssetManifest) -> Result<(), AssetError> {
        Ok(())
    }

    /// Replace the level list from JSON.
    fn load_levels(&mut self, _json: &str) -> Result<(), LevelError> {
        Ok(())
    }

    /// Replace gameplay constants from JSON.
    fn load_tuning(&mut self, _json: &str) -> Result<(), serde_json::Error> {
        Ok(())
    }

    /// The host finished loading a background image of the given width.
    fn set_background_width(&mut self, _layer: usize, _width: f32) {}
}

/// Mutable engine state passed to `Game::init` and `Game::update`.
pub struct EngineContext {
    /// Sampled once per step.
    pub time: FrameTime,
    pub sounds: Vec<SoundEvent>,
    pub events: Vec<GameEvent>,
    ids: IdAllocator,
}

impl EngineContext {
    pub fn new() -> Self {
        Self {
            time: FrameTime::default(),
            sounds: Vec::new(),
            events: Vec::new(),
            ids: IdAllocator::new(),
        }
    }

    pub fn next_id(&mut self) -> EntityId {
        self.ids.next_id()
    }

    pub fn ids(&mut self) -> &mut IdAllocator {
        &mut self.ids
    }

    pub fn emit_sound(&mut self, event: SoundEvent) {
        self.sounds.push(event);
    }

    pub fn emit_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Clear per-frame transient data (sounds, events).
    pub fn clear_frame_data(&mut self) {
        self.sounds.clear();
        self.events.clear();
    }
}

impl Default for EngineContext {
    fn default() -> Self {
        Self::new()
    }
}

/// Output side of a frame: the instance buffer, which frame sources the
/// host has finished loading, and the HUD header.
pub struct RenderContext<'a> {
    pub buffer: &'a mut RenderBuffer,
    pub sources: &'a dyn FrameSourceStatus,
    pub hud: &'a mut HudState,
}
