//! Overlap queries between the player, enemies, projectiles and pickups.
//!
//! These functions only mutate the entities they hit (health, consumed or
//! expired flags). Nothing is added or removed here; the world sweeps
//! expired entities once all resolution for the frame is done.

use glam::Vec2;

use crate::api::types::EntityId;
use crate::components::enemy::{Enemy, HitOutcome};
use crate::components::pickup::{EffectKind, Pickup, PickupLook};
use crate::components::projectile::Projectile;
use crate::core::geometry::Aabb;

/// An enemy struck by an attack or projectile.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnemyHit {
    pub enemy: EntityId,
    pub center: Vec2,
    pub outcome: HitOutcome,
}

impl EnemyHit {
    pub fn is_kill(&self) -> bool {
        self.outcome == HitOutcome::Killed
    }
}

/// A pickup the player is touching this frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PickupHit {
    pub pickup: EntityId,
    pub center: Vec2,
    pub effect: EffectKind,
    pub look: PickupLook,
}

/// Live enemies overlapping `bounds`, in collection order.
pub fn touching_enemies(bounds: &Aabb, enemies: &[Enemy]) -> Vec<(EntityId, Vec2)> {
    enemies
        .iter()
        .filter(|e| e.is_alive() && e.body.bounds().overlaps(bounds))
        .map(|e| (e.id, e.body.center()))
        .collect()
}

/// Apply one attack to every live enemy inside `hitbox`.
pub fn strike(hitbox: &Aabb, damage: f32, enemies: &mut [Enemy]) -> Vec<EnemyHit> {
    let mut hits = Vec::new();
    for enemy in enemies.iter_mut() {
        if !enemy.is_alive() || !enemy.body.bounds().overlaps(hitbox) {
            continue;
        }
        let outcome = enemy.take_damage(damage);
        hits.push(EnemyHit {
            enemy: enemy.id,
            center: enemy.body.center(),
            outcome,
        });
    }
    hits
}

/// Each projectile damages the first live enemy it overlaps and is consumed.
pub fn resolve_projectiles(
    projectiles: &mut [Projectile],
    enemies: &mut [Enemy],
    damage: f32,
) -> Vec<EnemyHit> {
    let mut hits = Vec::new();
    for projectile in projectiles.iter_mut().filter(|p| !p.expired) {
        let bounds = projectile.body.bounds();
        let Some(enemy) = enemies
            .iter_mut()
            .find(|e| e.is_alive() && e.body.bounds().overlaps(&bounds))
        else {
            continue;
        };
        if projectile.hit() {
            let outcome = enemy.take_damage(damage);
            hits.push(EnemyHit {
                enemy: enemy.id,
                center: enemy.body.center(),
                outcome,
            });
        }
    }
    hits
}

/// Trigger pickups overlapping `bounds` in order, handing each hit to
/// `apply`. One-shot pickups report only the first time. When `apply`
/// returns false the remaining pickups are left untouched, so nothing is
/// consumed without its effect being applied. Returns the number applied.
pub fn touched_pickups(
    bounds: &Aabb,
    pickups: &mut [Pickup],
    mut apply: impl FnMut(PickupHit) -> bool,
) -> usize {
    let mut applied = 0;
    for pickup in pickups.iter_mut().filter(|p| p.body.bounds().overlaps(bounds)) {
        let Some(effect) = pickup.trigger() else {
            continue;
        };
        applied += 1;
        let hit = PickupHit {
            pickup: pickup.id,
            center: pickup.body.center(),
            effect,
            look: pickup.look,
        };
        if !apply(hit) {
            break;
        }
    }
    applied
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::entity::Facing;
    use crate::core::rng::Rng;
    use crate::core::tuning::Tuning;
    use std::collections::HashMap;

    fn enemy_at(id: u32, x: f32) -> Enemy {
        let mut rng = Rng::new(id as u64);
        Enemy::new(EntityId(id), Vec2::new(x, 0.0), &Tuning::default(), HashMap::new(), &mut rng)
    }

    #[test]
    fn strike_hits_only_overlapping_live_enemies() {
        let mut enemies = vec![enemy_at(1, 0.0), enemy_at(2, 500.0), enemy_at(3, 20.0)];
        enemies[2].take_damage(1000.0);
        let hitbox = Aabb::new(10.0, 10.0, 96.0, 96.0);
        let hits = strike(&hitbox, 50.0, &mut enemies);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].enemy, EntityId(1));
        assert_eq!(hits[0].outcome, HitOutcome::Hurt);
        assert!((enemies[0].health - 50.0).abs() < 1e-4);
        assert!((enemies[1].health - 100.0).abs() < 1e-4);
    }

    #[test]
    fn projectile_hits_first_enemy_once() {
        let mut enemies = vec![enemy_at(1, 100.0), enemy_at(2, 110.0)];
        let mut shots = vec![Projectile::new(
            EntityId(9),
            Vec2::new(90.0, 0.0),
            64.0,
            Facing::Right,
            720.0,
            HashMap::new(),
        )];
        let hits = resolve_projectiles(&mut shots, &mut enemies, 100.0);
        assert_eq!(hits.len(), 1);
        assert!(hits[0].is_kill());
        assert_eq!(hits[0].enemy, EntityId(1));
        assert!(shots[0].expired);
        assert!(enemies[1].is_alive());

        // An expired projectile never hits again.
        assert!(resolve_projectiles(&mut shots, &mut enemies, 100.0).is_empty());
    }

    #[test]
    fn touching_ignores_dying_enemies() {
        let mut enemies = vec![enemy_at(1, 0.0), enemy_at(2, 10.0)];
        enemies[1].take_damage(1000.0);
        let player = Aabb::new(0.0, 0.0, 120.0, 120.0);
        let touching = touching_enemies(&player, &enemies);
        assert_eq!(touching.len(), 1);
        assert_eq!(touching[0].0, EntityId(1));
    }

    #[test]
    fn one_shot_pickup_reported_once() {
        let mut pickups = vec![
            Pickup::new(EntityId(5), Vec2::ZERO, Vec2::splat(64.0), EffectKind::Heal { amount: 50.0 }, PickupLook::Apple),
            Pickup::new(EntityId(6), Vec2::new(30.0, 0.0), Vec2::splat(64.0), EffectKind::Hazard { damage: 50.0 }, PickupLook::Spike),
        ];
        let player = Aabb::new(10.0, 10.0, 120.0, 120.0);
        let mut first = Vec::new();
        touched_pickups(&player, &mut pickups, |hit| {
            first.push(hit);
            true
        });
        assert_eq!(first.len(), 2);
        let mut second = Vec::new();
        touched_pickups(&player, &mut pickups, |hit| {
            second.push(hit);
            true
        });
        assert_eq!(second.len(), 1);
        assert_eq!(second[0].look, PickupLook::Spike);
    }

    #[test]
    fn stopping_early_leaves_later_pickups_unconsumed() {
        let mut pickups = vec![
            Pickup::new(EntityId(5), Vec2::ZERO, Vec2::splat(64.0), EffectKind::Hazard { damage: 500.0 }, PickupLook::Spike),
            Pickup::new(EntityId(6), Vec2::new(30.0, 0.0), Vec2::splat(64.0), EffectKind::Heal { amount: 50.0 }, PickupLook::Apple),
        ];
        let player = Aabb::new(10.0, 10.0, 120.0, 120.0);
        let applied = touched_pickups(&player, &mut pickups, |_| false);
        assert_eq!(applied, 1);
        assert!(!pickups[1].is_consumed());
    }
}
