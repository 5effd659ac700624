//! One fixed step of active play.
//!
//! Order: timers, input, integration, landing, collisions, camera,
//! animation, despawn, sweep. Collision queries only flag entities; nothing
//! is removed until the final sweep.

use glam::Vec2;

use crate::api::game::EngineContext;
use crate::components::pickup::{EffectKind, PickupLook};
use crate::components::player::{DamageOutcome, Player};
use crate::components::projectile::Projectile;
use crate::input::keys::InputSnapshot;
use crate::session::events::SessionEvent;
use crate::session::state::{emit, Session};
use crate::systems::collision::{self, EnemyHit};
use crate::systems::effects::{Burst, EffectsState, ParticleTint};
use crate::systems::physics;

/// (duration, intensity) of the screen shake per cause.
const SPIKE_SHAKE: (f32, f32) = (0.3, 6.0);
const CONTACT_SHAKE: (f32, f32) = (0.2, 4.0);
const HIT_SHAKE: (f32, f32) = (0.15, 3.0);

impl Session {
    pub(super) fn step_playing(&mut self, ctx: &mut EngineContext, input: &InputSnapshot) {
        let time = ctx.time;
        let dt = time.dt;
        self.effects.tick(dt);

        let Some(player) = self.player.as_mut() else {
            log::debug!("playing without a player; skipping step");
            return;
        };
        let tuning = &self.tuning;
        let world = &mut self.world;
        let effects = &mut self.effects;
        let camera = &mut self.camera;

        player.tick_timers(time);

        let actions = player.apply_input(input, time, tuning, &mut self.rng);
        if actions.jumped {
            emit(ctx, SessionEvent::Jumped);
        }
        if actions.attack.is_some() {
            emit(ctx, SessionEvent::AttackStarted);
            let hitbox = player.attack_hitbox(tuning.hitbox_scale);
            let damage = player.attack_damage(tuning.attack_damage);
            for hit in collision::strike(&hitbox, damage, &mut world.enemies) {
                effects.emit(hit.center, Burst::new(10, ParticleTint::Hit));
                effects.shake(HIT_SHAKE.0, HIT_SHAKE.1);
                emit(ctx, SessionEvent::AttackLanded { enemy: hit.enemy, damage });
                if hit.is_kill() {
                    record_kill(player, &hit, effects, ctx);
                }
            }
        }
        if actions.special {
            let origin = Projectile::launch_origin(&player.body, player.facing, tuning.projectile_size);
            world.spawn_projectile(ctx.next_id(), origin, player.facing, tuning);
            let half = tuning.projectile_size / 2.0;
            effects.emit(
                origin + Vec2::splat(half),
                Burst::new(15, ParticleTint::Fireball).with_lifetime(0.6),
            );
            emit(ctx, SessionEvent::SpecialFired);
        }

        physics::integrate(&mut player.body, player.boost.speed_multiplier, tuning.gravity, dt);

        if !player.dead {
            let target_x = player.body.pos.x;
            for enemy in world.enemies.iter_mut() {
                if !camera.sees(&enemy.body.bounds(), tuning.on_screen_margin) {
                    continue;
                }
                if enemy.think(target_x, time, tuning, &mut self.rng) {
                    emit(ctx, SessionEvent::EnemyHopped { enemy: enemy.id });
                }
                physics::integrate(&mut enemy.body, 1.0, tuning.gravity, dt);
            }
            for shot in world.projectiles.iter_mut() {
                shot.advance(dt, camera.x, camera.viewport.x);
            }
        }

        physics::resolve_landing(&mut player.body, &world.platforms, tuning.landing_slack);
        for enemy in world.enemies.iter_mut() {
            physics::resolve_landing(&mut enemy.body, &world.platforms, tuning.landing_slack);
        }

        let mut level_finished = false;
        if !player.dead {
            let bounds = player.body.bounds();

            for _ in collision::touching_enemies(&bounds, &world.enemies) {
                hurt_player(player, tuning.contact_damage, CONTACT_SHAKE, tuning.invincibility_duration, effects, ctx);
            }

            if !player.dead {
                collision::touched_pickups(&bounds, &mut world.pickups, |hit| {
                    match hit.effect {
                        EffectKind::Heal { amount } => {
                            player.heal(amount);
                            effects.emit(hit.center, Burst::new(10, ParticleTint::Heal));
                            emit(ctx, SessionEvent::PickupCollected { look: hit.look });
                        }
                        EffectKind::Boost { duration } => {
                            player.apply_boost(duration, tuning.boost_multiplier, time.now);
                            effects.emit(hit.center, Burst::new(15, ParticleTint::Boost).with_lifetime(1.0));
                            emit(ctx, SessionEvent::PickupCollected { look: hit.look });
                        }
                        EffectKind::Hazard { damage } => {
                            let shake = if hit.look == PickupLook::Spike { SPIKE_SHAKE } else { CONTACT_SHAKE };
                            hurt_player(player, damage, shake, tuning.invincibility_duration, effects, ctx);
                        }
                        EffectKind::LevelEnd => {
                            if !level_finished {
                                level_finished = true;
                                effects.emit(hit.center, Burst::new(20, ParticleTint::Goal).with_lifetime(0.8));
                                emit(ctx, SessionEvent::PickupCollected { look: hit.look });
                            }
                        }
                    }
                    !player.dead
                });
            }

            let hits = collision::resolve_projectiles(
                &mut world.projectiles,
                &mut world.enemies,
                tuning.projectile_damage,
            );
            for hit in hits {
                effects.emit(hit.center, Burst::new(12, ParticleTint::Slime));
                if hit.is_kill() {
                    record_kill(player, &hit, effects, ctx);
                }
            }
        }
        // A hazard can kill the player on the same frame the flag is touched.
        level_finished &= !player.dead;

        let mut fell = false;
        if !level_finished && player.body.pos.y > world.height() + tuning.fall_margin {
            log::info!("player fell out of the level at y={:.1}", player.body.pos.y);
            player.die();
            fell = true;
        }

        let delta = camera.follow(player.body.pos.x);
        self.parallax.scroll(delta);

        let death_clip_done = player.step_animation(dt);
        for enemy in world.enemies.iter_mut() {
            enemy.step_animation(dt);
        }
        for shot in world.projectiles.iter_mut() {
            shot.animator.advance(dt);
        }

        let cutoff = camera.x - tuning.despawn_margin;
        for enemy in world.enemies.iter_mut().filter(|e| e.body.bounds().right() < cutoff) {
            enemy.expired = true;
        }
        world.sweep();

        if level_finished {
            self.complete_level(ctx);
        } else if fell || death_clip_done {
            self.game_over(ctx);
        }
    }
}

fn hurt_player(
    player: &mut Player,
    amount: f32,
    shake: (f32, f32),
    invincibility: f32,
    effects: &mut EffectsState,
    ctx: &mut EngineContext,
) {
    if player.take_damage(amount, invincibility) == DamageOutcome::Ignored {
        return;
    }
    effects.emit(player.body.center(), Burst::new(8, ParticleTint::Blood));
    effects.shake(shake.0, shake.1);
    emit(ctx, SessionEvent::DamageTaken { amount, health: player.health });
}

fn record_kill(player: &mut Player, hit: &EnemyHit, effects: &mut EffectsState, ctx: &mut EngineContext) {
    player.kill_count += 1;
    effects.emit(hit.center, Burst::new(20, ParticleTint::Slime).with_lifetime(0.8));
    emit(ctx, SessionEvent::EnemyKilled { enemy: hit.enemy, at: hit.center });
}
