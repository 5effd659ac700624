use glam::Vec2;

use crate::api::game::{EngineContext, Game, GameConfig, RenderContext};
use crate::assets::library::{AnimationLibrary, AssetError};
use crate::assets::manifest::AssetManifest;
use crate::components::player::Player;
use crate::core::rng::Rng;
use crate::core::tuning::Tuning;
use crate::core::world::World;
use crate::input::keys::{InputSnapshot, Key};
use crate::level::campaign::Campaign;
use crate::level::map::LevelError;
use crate::renderer::camera::ScrollCamera;
use crate::renderer::parallax::Parallax;
use crate::session::events::SessionEvent;
use crate::systems::effects::EffectsState;
use crate::systems::render::{self, HudState, HUD_PARALLAX_LAYERS};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(u8)]
pub enum SessionState {
    #[default]
    Menu = 0,
    Playing = 1,
    /// Waiting out the pause before the next level loads.
    LevelComplete = 2,
    GameOver = 3,
    Victory = 4,
}

/// The platformer: campaign progress, the loaded world, the player and
/// everything that follows them on screen.
pub struct Session {
    pub(super) config: GameConfig,
    pub(super) tuning: Tuning,
    pub(super) library: AnimationLibrary,
    pub(super) campaign: Campaign,
    pub(super) state: SessionState,
    pub(super) world: World,
    pub(super) player: Option<Player>,
    pub(super) camera: ScrollCamera,
    pub(super) parallax: Parallax,
    pub(super) effects: EffectsState,
    pub(super) rng: Rng,
    /// Seconds left before the next level loads.
    pub(super) transition_left: f32,
    /// Clock reading of the last step, for HUD countdowns.
    pub(super) now: f64,
    confirm_was_held: bool,
}

impl Session {
    pub fn new() -> Self {
        let campaign = Campaign::builtin().unwrap_or_else(|e| {
            log::error!("built-in campaign failed to parse: {}", e);
            Campaign::default()
        });
        Self::with_campaign(campaign, Tuning::default(), 0x5EED)
    }

    pub fn with_campaign(campaign: Campaign, tuning: Tuning, seed: u64) -> Self {
        let config = GameConfig::default();
        let viewport = Vec2::new(config.viewport_width, config.viewport_height);
        Self {
            camera: ScrollCamera::new(viewport, tuning.dead_zone_fraction),
            config,
            tuning,
            library: AnimationLibrary::builtin(),
            campaign,
            state: SessionState::Menu,
            world: World::empty(),
            player: None,
            parallax: Parallax::default(),
            effects: EffectsState::new(seed),
            rng: Rng::new(seed),
            transition_left: 0.0,
            now: 0.0,
            confirm_was_held: false,
        }
    }

    pub fn with_library(mut self, library: AnimationLibrary) -> Self {
        self.library = library;
        self
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn player(&self) -> Option<&Player> {
        self.player.as_ref()
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn camera(&self) -> &ScrollCamera {
        &self.camera
    }

    pub fn parallax(&self) -> &Parallax {
        &self.parallax
    }

    pub fn effects(&self) -> &EffectsState {
        &self.effects
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    pub fn campaign(&self) -> &Campaign {
        &self.campaign
    }

    /// Fresh player at the first level. An empty campaign leaves the
    /// session where it was.
    pub fn start_new_game(&mut self, ctx: &mut EngineContext) {
        if self.campaign.is_empty() {
            log::error!("cannot start: campaign has no levels");
            return;
        }
        log::info!("starting new game");
        let player = Player::new(ctx.next_id(), Vec2::ZERO, &self.tuning, self.library.player_clips());
        self.player = Some(player);
        self.load_level(0, ctx);
    }

    /// Replace the world with level `index` and put the player at its spawn.
    /// Health, kills and boost carry over. Returns false if there is no
    /// such level.
    pub fn load_level(&mut self, index: usize, ctx: &mut EngineContext) -> bool {
        let Some(level) = self.campaign.get(index) else {
            log::error!("level {} does not exist", index);
            return false;
        };
        self.world = World::from_level(index, level, &self.tuning, &self.library, ctx.ids(), &mut self.rng);
        if let Some(player) = self.player.as_mut() {
            player.respawn_at(self.world.player_spawn);
        }
        self.camera.reset(self.world.width());
        self.parallax.reset();
        self.effects.clear();
        self.transition_left = 0.0;
        self.set_state(SessionState::Playing);
        emit(ctx, SessionEvent::LevelStarted { level: index });
        true
    }

    /// Flag reached: pause, or win on the last level.
    pub(super) fn complete_level(&mut self, ctx: &mut EngineContext) {
        let index = self.world.level_index;
        if self.campaign.is_last(index) {
            self.set_state(SessionState::Victory);
            emit(ctx, SessionEvent::Victory);
        } else {
            self.transition_left = self.tuning.level_transition_delay;
            self.set_state(SessionState::LevelComplete);
            emit(ctx, SessionEvent::LevelComplete { level: index });
        }
    }

    pub(super) fn game_over(&mut self, ctx: &mut EngineContext) {
        if self.state == SessionState::GameOver {
            return;
        }
        self.set_state(SessionState::GameOver);
        emit(ctx, SessionEvent::GameOver);
    }

    pub(super) fn set_state(&mut self, next: SessionState) {
        if self.state != next {
            log::debug!("session {:?} -> {:?}", self.state, next);
            self.state = next;
        }
    }

    fn step_transition(&mut self, ctx: &mut EngineContext) {
        let dt = ctx.time.dt;
        self.effects.tick(dt);
        if let Some(player) = self.player.as_mut() {
            player.body.vel.x = 0.0;
            player.step_animation(dt);
        }
        self.transition_left -= dt;
        if self.transition_left <= 0.0 && !self.load_level(self.world.level_index + 1, ctx) {
            // Campaign was replaced with a shorter one.
            self.set_state(SessionState::Victory);
            emit(ctx, SessionEvent::Victory);
        }
    }

    pub fn hud(&self) -> HudState {
        let mut parallax = [0.0; HUD_PARALLAX_LAYERS];
        for (slot, offset) in parallax.iter_mut().zip(self.parallax.offsets()) {
            *slot = offset;
        }
        let mut hud = HudState {
            state: self.state as u8,
            level_index: self.world.level_index as u32,
            level_count: self.campaign.len() as u32,
            background: self.world.background,
            camera_x: self.camera.x,
            shake: self.effects.shake.offset,
            parallax,
            ..HudState::default()
        };
        if let Some(player) = &self.player {
            hud.health = player.health;
            hud.max_health = player.max_health;
            hud.kills = player.kill_count;
            hud.special_charge = match self.tuning.special_kill_cost {
                0 => 1.0,
                cost => (player.kill_count as f32 / cost as f32).min(1.0),
            };
            hud.boost_remaining = player.boost.remaining(self.now);
        }
        hud
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

/// Forward a session event to the host as a game event plus its sound.
pub(super) fn emit(ctx: &mut EngineContext, event: SessionEvent) {
    ctx.emit_event(event.to_game_event());
    if let Some(sound) = event.sound() {
        ctx.emit_sound(sound);
    }
}

impl Game for Session {
    fn config(&self) -> GameConfig {
        self.config.clone()
    }

    fn init(&mut self, _ctx: &mut EngineContext) {
        log::info!("platformer ready: {} levels", self.campaign.len());
        self.set_state(SessionState::Menu);
    }

    fn update(&mut self, ctx: &mut EngineContext, input: &InputSnapshot) {
        self.now = ctx.time.now;
        let confirm = input.held(Key::Confirm);
        let confirm_pressed = confirm && !self.confirm_was_held;
        self.confirm_was_held = confirm;

        match self.state {
            SessionState::Playing => self.step_playing(ctx, input),
            SessionState::LevelComplete => self.step_transition(ctx),
            SessionState::Menu | SessionState::GameOver | SessionState::Victory => {
                self.effects.tick(ctx.time.dt);
                if let Some(player) = self.player.as_mut() {
                    player.step_animation(ctx.time.dt);
                }
                if confirm_pressed {
                    self.start_new_game(ctx);
                }
            }
        }
    }

    fn render(&self, ctx: &mut RenderContext) {
        if self.state != SessionState::Menu {
            let views = render::collect_views(&self.world, self.player.as_ref(), &self.library.statics());
            render::write_views(&views, ctx.sources, ctx.buffer);
            render::write_particles(&self.effects, ctx.buffer);
        }
        *ctx.hud = self.hud();
    }

    fn apply_manifest(&mut self, manifest: &AssetManifest) -> Result<(), AssetError> {
        self.library = AnimationLibrary::from_manifest(manifest)?;
        log::info!("animation library rebuilt from manifest");
        Ok(())
    }

    fn load_levels(&mut self, json: &str) -> Result<(), LevelError> {
        let campaign = Campaign::from_json(json)?;
        if campaign.is_empty() {
            return Err(LevelError::Empty("campaign".to_string()));
        }
        self.campaign = campaign;
        Ok(())
    }

    fn load_tuning(&mut self, json: &str) -> Result<(), serde_json::Error> {
        self.tuning = Tuning::from_json(json)?;
        self.camera.dead_zone = self.camera.viewport.x * self.tuning.dead_zone_fraction;
        log::info!("tuning replaced");
        Ok(())
    }

    fn set_background_width(&mut self, layer: usize, width: f32) {
        self.parallax.set_width(layer, width);
    }
}
