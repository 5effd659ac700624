use std::collections::HashMap;

use glam::Vec2;

use crate::api::types::EntityId;
use crate::components::animation::{AnimationDef, Animator};
use crate::components::entity::{Body, Capabilities, Facing};
use crate::core::rng::Rng;
use crate::core::time::FrameTime;
use crate::core::tuning::Tuning;

/// Clip names used by the slime animator.
pub mod clips {
    pub const IDLE: &str = "idle";
    pub const HOP: &str = "hop";
    pub const DIE: &str = "die";
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EnemyState {
    #[default]
    Idle,
    Hopping,
    /// Playing the death clip; no longer interacts with anything.
    Dying,
}

/// Result of hitting an enemy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitOutcome {
    /// Already dying or expired.
    Ignored,
    Hurt,
    Killed,
}

/// A hopping slime.
#[derive(Debug, Clone)]
pub struct Enemy {
    pub id: EntityId,
    pub body: Body,
    pub animator: Animator,
    pub health: f32,
    pub state: EnemyState,
    pub facing: Facing,
    hop_timer: f32,
    hop_interval: f32,
    /// Set once the death clip completes or the enemy falls behind the camera.
    pub expired: bool,
}

impl Enemy {
    pub fn new(
        id: EntityId,
        origin: Vec2,
        tuning: &Tuning,
        clip_set: HashMap<String, AnimationDef>,
        rng: &mut Rng,
    ) -> Self {
        let size = Vec2::new(tuning.enemy_width, tuning.enemy_height);
        let caps = Capabilities::PHYSICS
            | Capabilities::ANIMATED
            | Capabilities::DAMAGEABLE
            | Capabilities::COLLIDABLE;
        let mut animator = Animator::with_clips(clip_set);
        animator.play(clips::IDLE, false);
        Self {
            id,
            body: Body::new(origin, size, caps),
            animator,
            health: tuning.enemy_health,
            state: EnemyState::Idle,
            facing: Facing::Left,
            hop_timer: 0.0,
            hop_interval: rng.range_f32(tuning.hop_interval_min, tuning.hop_interval_max),
            expired: false,
        }
    }

    pub fn with_health(mut self, health: f32) -> Self {
        self.health = health;
        self
    }

    /// Alive enemies hurt the player and can be hit.
    pub fn is_alive(&self) -> bool {
        self.state != EnemyState::Dying && !self.expired
    }

    /// Hop timer and hop decision. Returns true on the frame the enemy hops.
    pub fn think(&mut self, target_x: f32, time: FrameTime, tuning: &Tuning, rng: &mut Rng) -> bool {
        if !self.is_alive() || !self.body.grounded {
            return false;
        }

        if self.state == EnemyState::Hopping {
            self.state = EnemyState::Idle;
            self.animator.play(clips::IDLE, false);
        }
        self.body.vel.x = 0.0;
        self.hop_timer += time.dt;

        if self.hop_timer <= self.hop_interval {
            return false;
        }

        self.facing = Facing::toward(self.body.pos.x, target_x);
        self.state = EnemyState::Hopping;
        self.body.vel = Vec2::new(self.facing.sign() * tuning.hop_speed, tuning.hop_impulse);
        self.body.grounded = false;
        self.hop_timer = 0.0;
        self.hop_interval = rng.range_f32(tuning.hop_interval_min, tuning.hop_interval_max);
        self.animator.play(clips::HOP, true);
        true
    }

    pub fn take_damage(&mut self, amount: f32) -> HitOutcome {
        if !self.is_alive() {
            return HitOutcome::Ignored;
        }
        self.health -= amount;
        if self.health > 0.0 {
            return HitOutcome::Hurt;
        }

        self.health = 0.0;
        self.state = EnemyState::Dying;
        self.body.vel.x = 0.0;
        if !self.animator.play(clips::DIE, true) {
            self.expired = true;
        }
        HitOutcome::Killed
    }

    /// Advance the animator. The idle clip is frozen on the ground.
    pub fn step_animation(&mut self, dt: f32) {
        let animate = self.state != EnemyState::Idle || !self.body.grounded;
        if !animate {
            return;
        }
        if let Some(ended) = self.animator.advance(dt) {
            if ended.clip == clips::DIE {
                self.expired = true;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::library::AnimationLibrary;

    fn enemy(rng: &mut Rng) -> Enemy {
        let tuning = Tuning::default();
        let clips = AnimationLibrary::builtin().enemy_clips();
        let mut e = Enemy::new(EntityId(2), Vec2::new(500.0, 300.0), &tuning, clips, rng);
        e.body.grounded = true;
        e
    }

    #[test]
    fn hop_interval_in_range() {
        let tuning = Tuning::default();
        let mut rng = Rng::new(11);
        for _ in 0..50 {
            let e = enemy(&mut rng);
            assert!(e.hop_interval >= tuning.hop_interval_min);
            assert!(e.hop_interval < tuning.hop_interval_max);
        }
    }

    #[test]
    fn hops_toward_target_after_interval() {
        let tuning = Tuning::default();
        let mut rng = Rng::new(5);
        let mut e = enemy(&mut rng);
        let dt = 1.0 / 60.0;
        let mut hopped_at = None;
        for i in 0..180 {
            if e.think(100.0, FrameTime::new(i as f64 * dt as f64, dt), &tuning, &mut rng) {
                hopped_at = Some(i);
                break;
            }
        }
        let frame = hopped_at.expect("enemy should hop within 3 s");
        assert!(frame as f32 * dt >= tuning.hop_interval_min - dt);
        assert_eq!(e.state, EnemyState::Hopping);
        assert!((e.body.vel.x + tuning.hop_speed).abs() < 1e-4);
        assert!((e.body.vel.y - tuning.hop_impulse).abs() < 1e-4);
        assert!(!e.body.grounded);
    }

    #[test]
    fn airborne_enemy_does_not_hop_and_landing_returns_to_idle() {
        let tuning = Tuning::default();
        let mut rng = Rng::new(5);
        let mut e = enemy(&mut rng);
        e.state = EnemyState::Hopping;
        e.body.grounded = false;
        e.body.vel.x = 120.0;
        assert!(!e.think(0.0, FrameTime::new(0.0, 5.0), &tuning, &mut rng));
        assert_eq!(e.state, EnemyState::Hopping);

        e.body.grounded = true;
        e.think(0.0, FrameTime::new(0.1, 0.01), &tuning, &mut rng);
        assert_eq!(e.state, EnemyState::Idle);
        assert_eq!(e.body.vel.x, 0.0);
    }

    #[test]
    fn dies_exactly_on_third_hit() {
        let mut rng = Rng::new(5);
        let mut e = enemy(&mut rng).with_health(3.0);
        assert_eq!(e.take_damage(1.0), HitOutcome::Hurt);
        assert!(e.is_alive());
        assert_eq!(e.take_damage(1.0), HitOutcome::Hurt);
        assert!(e.is_alive());
        assert_eq!(e.take_damage(1.0), HitOutcome::Killed);
        assert!(!e.is_alive());
        assert_eq!(e.take_damage(1.0), HitOutcome::Ignored);
    }

    #[test]
    fn death_clip_expires_enemy() {
        let mut rng = Rng::new(5);
        let mut e = enemy(&mut rng);
        e.take_damage(500.0);
        assert_eq!(e.state, EnemyState::Dying);
        assert!(!e.expired);
        for _ in 0..60 {
            e.step_animation(1.0 / 60.0);
        }
        assert!(e.expired);
    }

    #[test]
    fn missing_death_clip_expires_immediately() {
        let tuning = Tuning::default();
        let mut rng = Rng::new(5);
        let mut e = Enemy::new(EntityId(3), Vec2::ZERO, &tuning, HashMap::new(), &mut rng);
        assert_eq!(e.take_damage(tuning.enemy_health), HitOutcome::Killed);
        assert!(e.expired);
    }
}
