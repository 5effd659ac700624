use glam::Vec2;

use crate::api::types::{EntityId, IdAllocator};
use crate::assets::library::{AnimationLibrary, ClipSet};
use crate::components::enemy::Enemy;
use crate::components::entity::Facing;
use crate::components::pickup::{EffectKind, Pickup, PickupLook};
use crate::components::platform::Platform;
use crate::components::projectile::Projectile;
use crate::core::rng::Rng;
use crate::core::tuning::Tuning;
use crate::level::map::{LevelDescriptor, SpawnKind};

/// Everything that lives in one loaded level. Replaced wholesale on level
/// change; the player lives outside it.
///
/// Collections are plain `Vec`s. Entities are only flagged during a step
/// (`expired`, `consumed`) and removed together by [`World::sweep`].
#[derive(Debug, Clone)]
pub struct World {
    pub level_index: usize,
    pub name: String,
    /// Level extent in world units.
    pub size: Vec2,
    pub background: u32,
    pub player_spawn: Vec2,
    pub platforms: Vec<Platform>,
    pub enemies: Vec<Enemy>,
    pub pickups: Vec<Pickup>,
    pub projectiles: Vec<Projectile>,
    projectile_clips: ClipSet,
}

impl World {
    /// An empty world with no level loaded.
    pub fn empty() -> Self {
        Self {
            level_index: 0,
            name: String::new(),
            size: Vec2::ZERO,
            background: 0,
            player_spawn: Vec2::ZERO,
            platforms: Vec::new(),
            enemies: Vec::new(),
            pickups: Vec::new(),
            projectiles: Vec::new(),
            projectile_clips: ClipSet::new(),
        }
    }

    /// Build the entities for `level`. Pickups and platforms take the tile size;
    /// every spawn sits at its tile's top-left corner.
    pub fn from_level(
        level_index: usize,
        level: &LevelDescriptor,
        tuning: &Tuning,
        library: &AnimationLibrary,
        ids: &mut IdAllocator,
        rng: &mut Rng,
    ) -> Self {
        let tile = Vec2::splat(level.tile_size);
        let mut world = Self {
            level_index,
            name: level.name.clone(),
            size: Vec2::new(level.width(), level.height()),
            background: level.background,
            player_spawn: level.player_spawn(),
            projectile_clips: library.projectile_clips(),
            ..Self::empty()
        };

        for spawn in &level.spawns {
            let origin = spawn.origin();
            let pickup = |effect: EffectKind, look: PickupLook, ids: &mut IdAllocator| {
                Pickup::new(ids.next_id(), origin, tile, effect, look)
            };
            match spawn.kind {
                SpawnKind::Player => {}
                SpawnKind::Platform { tile: kind } => {
                    world.platforms.push(Platform::new(ids.next_id(), origin, tile, kind));
                }
                SpawnKind::Enemy => {
                    let enemy = Enemy::new(ids.next_id(), origin, tuning, library.enemy_clips(), rng);
                    world.enemies.push(enemy);
                }
                SpawnKind::Spike => world.pickups.push(pickup(
                    EffectKind::Hazard { damage: tuning.spike_damage },
                    PickupLook::Spike,
                    ids,
                )),
                SpawnKind::Water => world.pickups.push(pickup(
                    EffectKind::Hazard { damage: tuning.water_damage },
                    PickupLook::Water,
                    ids,
                )),
                SpawnKind::Apple => world.pickups.push(pickup(
                    EffectKind::Heal { amount: tuning.heal_amount },
                    PickupLook::Apple,
                    ids,
                )),
                SpawnKind::Star => world.pickups.push(pickup(
                    EffectKind::Boost { duration: tuning.boost_duration },
                    PickupLook::Star,
                    ids,
                )),
                SpawnKind::Flag => {
                    world.pickups.push(pickup(EffectKind::LevelEnd, PickupLook::Flag, ids))
                }
            }
        }

        log::info!(
            "level {} '{}' loaded: {} platforms, {} enemies, {} pickups",
            level_index,
            world.name,
            world.platforms.len(),
            world.enemies.len(),
            world.pickups.len()
        );
        world
    }

    pub fn spawn_projectile(&mut self, id: EntityId, origin: Vec2, direction: Facing, tuning: &Tuning) {
        self.projectiles.push(Projectile::new(
            id,
            origin,
            tuning.projectile_size,
            direction,
            tuning.projectile_speed,
            self.projectile_clips.clone(),
        ));
    }

    pub fn height(&self) -> f32 {
        self.size.y
    }

    pub fn width(&self) -> f32 {
        self.size.x
    }

    pub fn live_enemy_count(&self) -> usize {
        self.enemies.iter().filter(|e| e.is_alive()).count()
    }

    /// Drop expired enemies and projectiles and consumed pickups.
    /// Returns how many entities were removed.
    pub fn sweep(&mut self) -> usize {
        let before = self.enemies.len() + self.pickups.len() + self.projectiles.len();
        self.enemies.retain(|e| !e.expired);
        self.projectiles.retain(|p| !p.expired);
        self.pickups.retain(|p| !p.is_consumed());
        before - (self.enemies.len() + self.pickups.len() + self.projectiles.len())
    }
}

impl Default for World {
    fn default() -> Self {
        Self::empty()
    }
}
