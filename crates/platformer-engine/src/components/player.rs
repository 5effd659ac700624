//! The player character: health, movement, attack and timed effects.
//!
//! The player never reads the clock itself. Every timer comparison uses the
//! [`FrameTime`] sampled once per step by the session.

use std::collections::HashMap;

use glam::Vec2;

use crate::api::types::EntityId;
use crate::components::animation::{AnimationDef, Animator};
use crate::components::entity::{Body, Capabilities, Facing};
use crate::core::geometry::Aabb;
use crate::core::rng::Rng;
use crate::core::time::FrameTime;
use crate::core::tuning::Tuning;
use crate::input::keys::{InputSnapshot, Key};

/// Clip names used by the player animator.
pub mod clips {
    pub const IDLE: &str = "idle";
    pub const WALK: &str = "walk";
    pub const RUN: &str = "run";
    pub const JUMP: &str = "jump";
    pub const HURT: &str = "hurt";
    pub const DEAD: &str = "dead";
    pub const ATTACK_1: &str = "attack1";
    pub const ATTACK_2: &str = "attack2";
    pub const ATTACK_3: &str = "attack3";
    pub const RUN_ATTACK: &str = "runAttack";
}

/// Movement state derived from how long a direction key has been held.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MovementState {
    #[default]
    Idle,
    Walking,
    Running,
}

/// Which attack is playing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttackKind {
    /// One of the three standing attacks (1..=3).
    Standing(u8),
    /// Attack out of a run; keeps run speed while the direction is held.
    Running,
}

impl AttackKind {
    pub fn clip(self) -> &'static str {
        match self {
            AttackKind::Standing(1) => clips::ATTACK_1,
            AttackKind::Standing(2) => clips::ATTACK_2,
            AttackKind::Standing(_) => clips::ATTACK_3,
            AttackKind::Running => clips::RUN_ATTACK,
        }
    }

    pub fn is_attack_clip(name: &str) -> bool {
        matches!(
            name,
            clips::ATTACK_1 | clips::ATTACK_2 | clips::ATTACK_3 | clips::RUN_ATTACK
        )
    }
}

/// Attack bookkeeping. `active` is `None` when not attacking.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AttackState {
    pub active: Option<AttackKind>,
    /// Start time of the most recent attack.
    pub last_started: Option<f64>,
    /// Fallback time at which an attack that never reported its end is cleared.
    pub deadline: f64,
}

/// Why an attack stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttackEnd {
    AnimationEnded,
    TimedOut,
    Interrupted,
}

/// Timed speed/attack boost.
#[derive(Debug, Clone, PartialEq)]
pub struct Boost {
    pub speed_multiplier: f32,
    pub attack_multiplier: f32,
    pub expires_at: Option<f64>,
}

impl Default for Boost {
    fn default() -> Self {
        Self {
            speed_multiplier: 1.0,
            attack_multiplier: 1.0,
            expires_at: None,
        }
    }
}

impl Boost {
    pub fn is_active(&self) -> bool {
        self.expires_at.is_some()
    }

    /// Seconds left on the boost, 0 when inactive.
    pub fn remaining(&self, now: f64) -> f32 {
        self.expires_at
            .map(|t| (t - now).max(0.0) as f32)
            .unwrap_or(0.0)
    }
}

/// What the player asked for this step. Resolved by the session.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PlayerActions {
    pub jumped: bool,
    pub attack: Option<AttackKind>,
    pub special: bool,
}

/// Outcome of [`Player::take_damage`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DamageOutcome {
    Ignored,
    Hurt,
    Killed,
}

#[derive(Debug, Clone)]
pub struct Player {
    pub id: EntityId,
    pub body: Body,
    pub animator: Animator,
    pub health: f32,
    pub max_health: f32,
    pub facing: Facing,
    pub movement: MovementState,
    /// Seconds the current direction key has been held continuously.
    hold_time: f32,
    /// Seconds left in the walk window after the key was released.
    walk_grace_left: f32,
    pub attack: AttackState,
    /// Invincibility countdown in seconds; 0 when vulnerable.
    pub invincible: f32,
    pub boost: Boost,
    pub dead: bool,
    pub kill_count: u32,
}

impl Player {
    pub fn new(
        id: EntityId,
        spawn: Vec2,
        tuning: &Tuning,
        clip_set: HashMap<String, AnimationDef>,
    ) -> Self {
        let size = Vec2::new(tuning.player_width, tuning.player_height);
        let caps = Capabilities::PHYSICS | Capabilities::ANIMATED | Capabilities::DAMAGEABLE;
        let mut animator = Animator::with_clips(clip_set);
        animator.play(clips::IDLE, false);
        Self {
            id,
            body: Body::new(spawn, size, caps),
            animator,
            health: tuning.max_health,
            max_health: tuning.max_health,
            facing: Facing::Right,
            movement: MovementState::Idle,
            hold_time: 0.0,
            walk_grace_left: 0.0,
            attack: AttackState::default(),
            invincible: 0.0,
            boost: Boost::default(),
            dead: false,
            kill_count: 0,
        }
    }

    pub fn is_attacking(&self) -> bool {
        self.attack.active.is_some()
    }

    pub fn is_invincible(&self) -> bool {
        self.invincible > 0.0
    }

    /// Blink cue: hidden on alternating 0.1 s slices of the invincibility window.
    pub fn is_flicker_hidden(&self) -> bool {
        self.is_invincible() && ((self.invincible * 10.0).floor() as i64) % 2 == 0
    }

    pub fn can_attack(&self, now: f64, cooldown: f32) -> bool {
        if self.dead || self.is_attacking() {
            return false;
        }
        match self.attack.last_started {
            Some(last) => now - last >= cooldown as f64,
            None => true,
        }
    }

    /// Count down invincibility, expire the boost and clear a stuck attack.
    pub fn tick_timers(&mut self, time: FrameTime) {
        self.invincible = (self.invincible - time.dt).max(0.0);

        if let Some(expires_at) = self.boost.expires_at {
            if time.now > expires_at {
                self.boost = Boost::default();
            }
        }

        if self.is_attacking() && time.now >= self.attack.deadline {
            log::warn!("attack did not report its end by t={:.3}; clearing", self.attack.deadline);
            self.finish_attack(AttackEnd::TimedOut);
        }
    }

    /// Translate the held keys into velocity and requested actions.
    pub fn apply_input(
        &mut self,
        input: &InputSnapshot,
        time: FrameTime,
        tuning: &Tuning,
        rng: &mut Rng,
    ) -> PlayerActions {
        let mut actions = PlayerActions::default();
        if self.dead {
            self.body.vel.x = 0.0;
            return actions;
        }

        let direction = input.horizontal();

        // Only the run-attack may keep moving, and only while a direction is held.
        if let Some(kind) = self.attack.active {
            self.body.vel.x = match (kind, direction) {
                (AttackKind::Running, Some(dir)) => {
                    self.facing = if dir < 0.0 { Facing::Left } else { Facing::Right };
                    dir * tuning.run_speed
                }
                _ => 0.0,
            };
            return actions;
        }

        match direction {
            Some(dir) => {
                self.facing = if dir < 0.0 { Facing::Left } else { Facing::Right };
                self.hold_time += time.dt;
                self.walk_grace_left = 0.0;
                self.movement = if self.hold_time > tuning.walk_to_run_time {
                    MovementState::Running
                } else {
                    MovementState::Walking
                };
                let speed = match self.movement {
                    MovementState::Running => tuning.run_speed,
                    _ => tuning.walk_speed,
                };
                self.body.vel.x = dir * speed;
            }
            None => {
                if self.movement != MovementState::Idle {
                    self.walk_grace_left = tuning.walk_grace;
                } else {
                    self.walk_grace_left = (self.walk_grace_left - time.dt).max(0.0);
                }
                self.hold_time = 0.0;
                self.movement = MovementState::Idle;
                self.body.vel.x = 0.0;
            }
        }

        if input.held(Key::Jump) && self.body.grounded {
            self.body.vel.y = tuning.jump_impulse;
            self.body.grounded = false;
            actions.jumped = true;
        }

        if input.held(Key::Attack) && self.can_attack(time.now, tuning.attack_cooldown) {
            let kind = if self.movement == MovementState::Running {
                AttackKind::Running
            } else {
                AttackKind::Standing(rng.next_int(3) as u8 + 1)
            };
            self.start_attack(kind, time.now, tuning.attack_timeout);
            actions.attack = Some(kind);
        }

        if input.held(Key::Special) && self.kill_count >= tuning.special_kill_cost {
            self.kill_count = 0;
            actions.special = true;
        }

        actions
    }

    /// Enter the attacking state and force the attack clip.
    pub fn start_attack(&mut self, kind: AttackKind, now: f64, timeout: f32) {
        self.attack.active = Some(kind);
        self.attack.last_started = Some(now);
        self.attack.deadline = now + timeout as f64;
        if kind != AttackKind::Running {
            self.body.vel.x = 0.0;
        }
        self.animator.play(kind.clip(), true);
    }

    /// Leave the attacking state. Returns false if no attack was active.
    pub fn finish_attack(&mut self, reason: AttackEnd) -> bool {
        match self.attack.active.take() {
            Some(kind) => {
                log::debug!("attack {:?} ended: {:?}", kind, reason);
                true
            }
            None => false,
        }
    }

    /// The one-shot attack rectangle, in front of the player.
    pub fn attack_hitbox(&self, scale: f32) -> Aabb {
        let size = self.body.size * scale;
        let x = match self.facing {
            Facing::Right => self.body.pos.x + self.body.size.x / 2.0,
            Facing::Left => self.body.pos.x - size.x / 2.0,
        };
        let y = self.body.pos.y + self.body.size.y * 0.1;
        Aabb::new(x, y, size.x, size.y)
    }

    pub fn attack_damage(&self, base: f32) -> f32 {
        base * self.boost.attack_multiplier
    }

    pub fn take_damage(&mut self, amount: f32, invincibility: f32) -> DamageOutcome {
        if self.is_invincible() || self.dead {
            return DamageOutcome::Ignored;
        }

        self.finish_attack(AttackEnd::Interrupted);
        self.health = (self.health - amount).max(0.0);
        self.invincible = invincibility;
        self.body.vel.x = 0.0;

        if self.health <= 0.0 {
            self.die();
            DamageOutcome::Killed
        } else {
            self.animator.play(clips::HURT, true);
            DamageOutcome::Hurt
        }
    }

    /// Terminal. Plays the death clip once.
    pub fn die(&mut self) {
        if self.dead {
            return;
        }
        self.dead = true;
        self.health = 0.0;
        self.attack.active = None;
        self.body.vel.x = 0.0;
        self.animator.play(clips::DEAD, true);
        log::info!("player died");
    }

    pub fn heal(&mut self, amount: f32) {
        self.health = (self.health + amount).min(self.max_health);
    }

    /// Full heal plus speed/attack multipliers until `now + duration`.
    pub fn apply_boost(&mut self, duration: f32, multiplier: f32, now: f64) {
        self.heal(self.max_health);
        self.boost = Boost {
            speed_multiplier: multiplier,
            attack_multiplier: multiplier,
            expires_at: Some(now + duration as f64),
        };
    }

    /// Clip the current state calls for, by priority.
    pub fn desired_clip(&self) -> &'static str {
        if self.dead {
            clips::DEAD
        } else if let Some(kind) = self.attack.active {
            kind.clip()
        } else if self.is_invincible() {
            clips::HURT
        } else if !self.body.grounded {
            clips::JUMP
        } else if self.movement == MovementState::Running {
            clips::RUN
        } else if self.movement == MovementState::Walking || self.walk_grace_left > 0.0 {
            clips::WALK
        } else {
            clips::IDLE
        }
    }

    /// Pick the clip for this frame and advance it. Returns true on the frame
    /// the death clip completes.
    pub fn step_animation(&mut self, dt: f32) -> bool {
        let clip = self.desired_clip();
        self.animator.play(clip, false);

        let Some(ended) = self.animator.advance(dt) else {
            return false;
        };
        if AttackKind::is_attack_clip(&ended.clip) {
            self.finish_attack(AttackEnd::AnimationEnded);
            false
        } else {
            ended.clip == clips::DEAD && self.dead
        }
    }

    /// Place at a level spawn, keeping health, kills and boost.
    pub fn respawn_at(&mut self, spawn: Vec2) {
        self.body.teleport(spawn);
        self.attack.active = None;
        self.invincible = 0.0;
        self.hold_time = 0.0;
        self.walk_grace_left = 0.0;
        self.movement = MovementState::Idle;
        self.animator.play(clips::IDLE, true);
    }
}
