//! Visual-only effects: pooled particle bursts and screen shake.
//!
//! Nothing here feeds back into the simulation.

use glam::Vec2;

use crate::core::rng::Rng;

/// Colour family of a particle burst. The renderer maps the index to a colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ParticleTint {
    /// Player took damage.
    Blood = 0,
    /// Enemy hit.
    Hit = 1,
    /// Enemy killed or fireball impact.
    Slime = 2,
    Heal = 3,
    Boost = 4,
    Goal = 5,
    Fireball = 6,
}

/// Shape of a burst.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Burst {
    pub count: usize,
    pub tint: ParticleTint,
    /// Extra random speed on top of the base speed, px/s.
    pub speed_range: f32,
    pub lifetime: f32,
    pub size: f32,
}

impl Burst {
    pub fn new(count: usize, tint: ParticleTint) -> Self {
        Self {
            count,
            tint,
            speed_range: 180.0,
            lifetime: 0.5,
            size: 3.0,
        }
    }

    pub fn with_speed_range(mut self, speed_range: f32) -> Self {
        self.speed_range = speed_range;
        self
    }

    pub fn with_lifetime(mut self, lifetime: f32) -> Self {
        self.lifetime = lifetime;
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    pub life: f32,
    pub max_life: f32,
    pub size: f32,
    pub tint: ParticleTint,
    pub active: bool,
}

impl Particle {
    const GRAVITY: f32 = 720.0;
    const BASE_SPEED: f32 = 60.0;
    const LIFT: f32 = 120.0;

    fn idle() -> Self {
        Self {
            pos: Vec2::ZERO,
            vel: Vec2::ZERO,
            life: 0.0,
            max_life: 1.0,
            size: 0.0,
            tint: ParticleTint::Hit,
            active: false,
        }
    }

    /// Remaining life as a fraction in [0, 1], used as opacity.
    pub fn alpha(&self) -> f32 {
        if self.max_life <= 0.0 {
            return 0.0;
        }
        (self.life / self.max_life).clamp(0.0, 1.0)
    }

    fn tick(&mut self, dt: f32) {
        if !self.active {
            return;
        }
        self.pos += self.vel * dt;
        self.vel.y += Self::GRAVITY * dt;
        self.life -= dt;
        if self.life <= 0.0 {
            self.active = false;
        }
    }
}

/// Decaying random camera jitter. Applied on top of the clamped camera offset.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScreenShake {
    remaining: f32,
    duration: f32,
    intensity: f32,
    pub offset: Vec2,
}

impl ScreenShake {
    /// Start (or restart) a shake of `intensity` pixels for `duration` seconds.
    pub fn shake(&mut self, duration: f32, intensity: f32) {
        self.remaining = duration.max(0.0);
        self.duration = duration.max(0.0);
        self.intensity = intensity;
    }

    pub fn is_active(&self) -> bool {
        self.remaining > 0.0
    }

    pub fn tick(&mut self, dt: f32, rng: &mut Rng) {
        if self.remaining <= 0.0 {
            self.offset = Vec2::ZERO;
            return;
        }
        self.remaining = (self.remaining - dt).max(0.0);
        let progress = if self.duration > 0.0 { self.remaining / self.duration } else { 0.0 };
        let current = self.intensity * progress;
        self.offset = Vec2::new(
            (rng.next_f32() - 0.5) * current * 2.0,
            (rng.next_f32() - 0.5) * current * 2.0,
        );
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

/// Fixed-size particle pool plus the screen shake.
#[derive(Debug, Clone)]
pub struct EffectsState {
    particles: Vec<Particle>,
    pub shake: ScreenShake,
    rng: Rng,
}

impl EffectsState {
    pub const DEFAULT_POOL: usize = 150;

    pub fn new(seed: u64) -> Self {
        Self::with_capacity(seed, Self::DEFAULT_POOL)
    }

    pub fn with_capacity(seed: u64, pool: usize) -> Self {
        Self {
            particles: vec![Particle::idle(); pool],
            shake: ScreenShake::default(),
            rng: Rng::new(seed.wrapping_add(7919)),
        }
    }

    /// Emit a burst from `center`. Stops early when the pool is exhausted.
    pub fn emit(&mut self, center: Vec2, burst: Burst) -> usize {
        let mut spawned = 0;
        for particle in self.particles.iter_mut().filter(|p| !p.active).take(burst.count) {
            let angle = self.rng.next_f32() * std::f32::consts::TAU;
            let speed = self.rng.next_f32() * burst.speed_range + Particle::BASE_SPEED;
            *particle = Particle {
                pos: center,
                vel: Vec2::new(angle.cos() * speed, angle.sin() * speed - Particle::LIFT),
                life: burst.lifetime,
                max_life: burst.lifetime,
                size: burst.size,
                tint: burst.tint,
                active: true,
            };
            spawned += 1;
        }
        spawned
    }

    pub fn shake(&mut self, duration: f32, intensity: f32) {
        self.shake.shake(duration, intensity);
    }

    pub fn tick(&mut self, dt: f32) {
        for particle in &mut self.particles {
            particle.tick(dt);
        }
        self.shake.tick(dt, &mut self.rng);
    }

    pub fn active_particles(&self) -> impl Iterator<Item = &Particle> {
        self.particles.iter().filter(|p| p.active)
    }

    pub fn active_count(&self) -> usize {
        self.active_particles().count()
    }

    /// Drop every particle and stop the shake (level change, restart).
    pub fn clear(&mut self) {
        for particle in &mut self.particles {
            particle.active = false;
        }
        self.shake.clear();
    }
}

impl Default for EffectsState {
    fn default() -> Self {
        Self::new(42)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pool_caps_bursts() {
        let mut fx = EffectsState::with_capacity(1, 10);
        assert_eq!(fx.emit(Vec2::ZERO, Burst::new(8, ParticleTint::Hit)), 8);
        assert_eq!(fx.emit(Vec2::ZERO, Burst::new(8, ParticleTint::Hit)), 2);
        assert_eq!(fx.active_count(), 10);
    }

    #[test]
    fn particles_expire_and_free_slots() {
        let mut fx = EffectsState::with_capacity(1, 4);
        fx.emit(Vec2::new(10.0, 10.0), Burst::new(4, ParticleTint::Heal).with_lifetime(0.1));
        fx.tick(0.05);
        assert_eq!(fx.active_count(), 4);
        assert!(fx.active_particles().all(|p| p.alpha() > 0.0 && p.alpha() < 1.0));
        fx.tick(0.06);
        assert_eq!(fx.active_count(), 0);
        assert_eq!(fx.emit(Vec2::ZERO, Burst::new(3, ParticleTint::Heal)), 3);
    }

    #[test]
    fn shake_decays_to_zero() {
        let mut fx = EffectsState::new(3);
        fx.shake(0.2, 6.0);
        fx.tick(0.05);
        assert!(fx.shake.is_active());
        assert!(fx.shake.offset.x.abs() <= 6.0 && fx.shake.offset.y.abs() <= 6.0);
        for _ in 0..10 {
            fx.tick(0.05);
        }
        assert!(!fx.shake.is_active());
        assert_eq!(fx.shake.offset, Vec2::ZERO);
    }

    #[test]
    fn clear_resets_everything() {
        let mut fx = EffectsState::new(3);
        fx.emit(Vec2::ZERO, Burst::new(5, ParticleTint::Goal));
        fx.shake(1.0, 4.0);
        fx.tick(0.016);
        fx.clear();
        assert_eq!(fx.active_count(), 0);
        assert_eq!(fx.shake.offset, Vec2::ZERO);
    }
}
