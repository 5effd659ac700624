//! Render snapshot: per-entity views, packed sprite instances and the HUD header.

use glam::Vec2;

use crate::api::types::EntityId;
use crate::assets::library::StaticSheets;
use crate::assets::registry::FrameSourceStatus;
use crate::components::animation::Animator;
use crate::components::entity::Facing;
use crate::components::pickup::PickupLook;
use crate::components::player::Player;
use crate::components::sprite::FrameSource;
use crate::core::world::World;
use crate::renderer::instance::{RenderBuffer, SpriteInstance};
use crate::systems::effects::EffectsState;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Platform,
    Pickup,
    Enemy,
    Projectile,
    Player,
}

/// What the renderer needs to draw one entity.
#[derive(Debug, Clone, PartialEq)]
pub struct EntityView<'a> {
    pub id: EntityId,
    pub kind: EntityKind,
    /// Current clip, for animated entities.
    pub clip: Option<&'a str>,
    pub source: FrameSource,
    pub frame: u32,
    pub pos: Vec2,
    pub size: Vec2,
    pub facing: Facing,
    /// Off phase of the invincibility blink.
    pub hidden: bool,
    pub boosted: bool,
}

impl EntityView<'_> {
    /// Pack into an instance. Sources that are not ready yet fall back to the
    /// placeholder id; the frame is kept so the host can still size it.
    pub fn to_instance(&self, sources: &dyn FrameSourceStatus) -> SpriteInstance {
        let source = if sources.is_ready(self.source) {
            self.source.as_f32()
        } else {
            FrameSource::PLACEHOLDER
        };
        SpriteInstance {
            x: self.pos.x,
            y: self.pos.y,
            w: self.size.x,
            h: self.size.y,
            source,
            frame: self.frame as f32,
            facing: self.facing.sign(),
            alpha: 1.0,
        }
    }
}

fn animated(animator: &Animator) -> (Option<&str>, FrameSource, u32) {
    let source = animator
        .current_def()
        .map(|def| def.source)
        .unwrap_or(FrameSource(u32::MAX));
    (animator.current(), source, animator.frame_index() as u32)
}

/// Views for everything drawable, back to front: platforms, pickups,
/// enemies, projectiles, then the player.
pub fn collect_views<'a>(
    world: &'a World,
    player: Option<&'a Player>,
    statics: &StaticSheets,
) -> Vec<EntityView<'a>> {
    let mut views = Vec::with_capacity(
        world.platforms.len() + world.pickups.len() + world.enemies.len() + world.projectiles.len() + 1,
    );

    views.extend(world.platforms.iter().map(|p| EntityView {
        id: p.id,
        kind: EntityKind::Platform,
        clip: None,
        source: statics.tileset,
        frame: p.frame(),
        pos: p.bounds.pos,
        size: p.bounds.size,
        facing: Facing::Right,
        hidden: false,
        boosted: false,
    }));

    views.extend(world.pickups.iter().filter(|p| !p.is_consumed()).map(|p| {
        let source = match p.look {
            PickupLook::Flag => statics.flag,
            _ => statics.pickups,
        };
        EntityView {
            id: p.id,
            kind: EntityKind::Pickup,
            clip: None,
            source,
            frame: p.look.frame(),
            pos: p.body.pos,
            size: p.body.size,
            facing: Facing::Right,
            hidden: false,
            boosted: false,
        }
    }));

    views.extend(world.enemies.iter().filter(|e| !e.expired).map(|e| {
        let (clip, source, frame) = animated(&e.animator);
        EntityView {
            id: e.id,
            kind: EntityKind::Enemy,
            clip,
            source,
            frame,
            pos: e.body.pos,
            size: e.body.size,
            facing: e.facing,
            hidden: false,
            boosted: false,
        }
    }));

    views.extend(world.projectiles.iter().filter(|p| !p.expired).map(|p| {
        let (clip, source, frame) = animated(&p.animator);
        EntityView {
            id: p.id,
            kind: EntityKind::Projectile,
            clip,
            source,
            frame,
            pos: p.body.pos,
            size: p.body.size,
            facing: p.direction,
            hidden: false,
            boosted: false,
        }
    }));

    if let Some(player) = player {
        let (clip, source, frame) = animated(&player.animator);
        views.push(EntityView {
            id: player.id,
            kind: EntityKind::Player,
            clip,
            source,
            frame,
            pos: player.body.pos,
            size: player.body.size,
            facing: player.facing,
            hidden: player.is_flicker_hidden(),
            boosted: player.boost.is_active(),
        });
    }

    views
}

/// Write visible views into the buffer. Hidden views are skipped.
pub fn write_views(views: &[EntityView], sources: &dyn FrameSourceStatus, buffer: &mut RenderBuffer) {
    for view in views.iter().filter(|v| !v.hidden) {
        if !buffer.push(view.to_instance(sources)) {
            log::debug!("render buffer full; dropping remaining entities");
            return;
        }
    }
}

/// Live particles as square instances centred on their position. The
/// frame field carries the tint index.
pub fn write_particles(effects: &EffectsState, buffer: &mut RenderBuffer) {
    for particle in effects.active_particles() {
        let half = particle.size / 2.0;
        let pushed = buffer.push(SpriteInstance {
            x: particle.pos.x - half,
            y: particle.pos.y - half,
            w: particle.size,
            h: particle.size,
            source: FrameSource::PARTICLE,
            frame: particle.tint as u8 as f32,
            facing: 1.0,
            alpha: particle.alpha(),
        });
        if !pushed {
            return;
        }
    }
}

/// Number of parallax offsets carried in the HUD header.
pub const HUD_PARALLAX_LAYERS: usize = 2;

/// Values the host needs to draw the HUD, background and overlay screens.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct HudState {
    /// `SessionState` discriminant.
    pub state: u8,
    pub level_index: u32,
    pub level_count: u32,
    pub background: u32,
    pub health: f32,
    pub max_health: f32,
    pub kills: u32,
    /// Kill progress toward the special attack, 0..=1.
    pub special_charge: f32,
    pub boost_remaining: f32,
    pub camera_x: f32,
    pub shake: Vec2,
    pub parallax: [f32; HUD_PARALLAX_LAYERS],
}

impl HudState {
    pub const FLOATS: usize = 12 + HUD_PARALLAX_LAYERS;

    pub fn to_floats(&self) -> [f32; Self::FLOATS] {
        let mut out = [0.0; Self::FLOATS];
        out[0] = self.state as f32;
        out[1] = self.level_index as f32;
        out[2] = self.level_count as f32;
        out[3] = self.background as f32;
        out[4] = self.health;
        out[5] = self.max_health;
        out[6] = self.kills as f32;
        out[7] = self.special_charge;
        out[8] = self.boost_remaining;
        out[9] = self.camera_x;
        out[10] = self.shake.x;
        out[11] = self.shake.y;
        out[12..].copy_from_slice(&self.parallax);
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::types::IdAllocator;
    use crate::assets::library::AnimationLibrary;
    use crate::assets::registry::SourceRegistry;
    use crate::core::rng::Rng;
    use crate::core::tuning::Tuning;
    use crate::level::map::LevelDescriptor;
    use crate::systems::effects::{Burst, ParticleTint};

    fn scene() -> (World, Player) {
        let level = LevelDescriptor::from_ascii("r", &["P.E.A", "11111"], 64.0).unwrap();
        let lib = AnimationLibrary::builtin();
        let tuning = Tuning::default();
        let mut ids = IdAllocator::new();
        let mut rng = Rng::new(4);
        let world = World::from_level(0, &level, &tuning, &lib, &mut ids, &mut rng);
        let player = Player::new(ids.next_id(), world.player_spawn, &tuning, lib.player_clips());
        (world, player)
    }

    #[test]
    fn views_are_ordered_back_to_front() {
        let (world, player) = scene();
        let views = collect_views(&world, Some(&player), &StaticSheets::default());
        let kinds: Vec<EntityKind> = views.iter().map(|v| v.kind).collect();
        assert_eq!(kinds.first(), Some(&EntityKind::Platform));
        assert_eq!(kinds.last(), Some(&EntityKind::Player));
        assert_eq!(views.len(), 5 + 1 + 1 + 1);
        assert_eq!(views.last().unwrap().clip, Some("idle"));
    }

    #[test]
    fn unready_sources_become_placeholders() {
        let (world, player) = scene();
        let views = collect_views(&world, Some(&player), &StaticSheets::default());
        let mut registry = SourceRegistry::builtin();
        let mut buffer = RenderBuffer::new();

        write_views(&views, &registry, &mut buffer);
        assert_eq!(buffer.instances.len(), views.len());
        assert!(buffer.instances.iter().all(|i| i.is_placeholder()));

        registry.mark_all_ready();
        buffer.clear();
        write_views(&views, &registry, &mut buffer);
        assert!(buffer.instances.iter().all(|i| !i.is_placeholder()));
    }

    #[test]
    fn hidden_player_is_not_drawn() {
        let (world, mut player) = scene();
        player.invincible = 1.45;
        assert!(player.is_flicker_hidden());
        let views = collect_views(&world, Some(&player), &StaticSheets::default());
        let mut buffer = RenderBuffer::new();
        write_views(&views, &SourceRegistry::builtin(), &mut buffer);
        assert_eq!(buffer.instances.len(), views.len() - 1);
    }

    #[test]
    fn particles_carry_tint_and_alpha() {
        let mut fx = EffectsState::with_capacity(1, 8);
        fx.emit(Vec2::new(100.0, 100.0), Burst::new(3, ParticleTint::Heal));
        let mut buffer = RenderBuffer::new();
        write_particles(&fx, &mut buffer);
        assert_eq!(buffer.instances.len(), 3);
        let inst = buffer.instances[0];
        assert_eq!(inst.source, FrameSource::PARTICLE);
        assert_eq!(inst.frame, ParticleTint::Heal as u8 as f32);
        assert!((inst.alpha - 1.0).abs() < 1e-6);
        assert!((inst.x - 98.5).abs() < 1e-4);
    }

    #[test]
    fn hud_floats_layout() {
        let hud = HudState {
            state: 1,
            health: 70.0,
            max_health: 100.0,
            parallax: [3.0, 6.0],
            ..Default::default()
        };
        let floats = hud.to_floats();
        assert_eq!(floats.len(), HudState::FLOATS);
        assert_eq!(floats[0], 1.0);
        assert_eq!(floats[4], 70.0);
        assert_eq!(floats[13], 6.0);
    }
}
