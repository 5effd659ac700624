//! Fire-and-forget notifications from a session step to the host.

use glam::Vec2;

use crate::api::types::{EntityId, GameEvent, SoundEvent};
use crate::components::pickup::PickupLook;

/// Sound ids. The host maps them to files through the manifest's
/// `sounds[*].event_id`.
pub mod sounds {
    use crate::api::types::SoundEvent;

    pub const SWORD: SoundEvent = SoundEvent(1);
    pub const SLIME_HOP: SoundEvent = SoundEvent(2);
    pub const HURT: SoundEvent = SoundEvent(3);
    pub const SLIME_DIE: SoundEvent = SoundEvent(4);
    pub const PICKUP: SoundEvent = SoundEvent(5);
    pub const FIREBALL: SoundEvent = SoundEvent(6);
    pub const LEVEL_COMPLETE: SoundEvent = SoundEvent(7);
    pub const GAME_OVER: SoundEvent = SoundEvent(8);
    pub const VICTORY: SoundEvent = SoundEvent(9);
    pub const JUMP: SoundEvent = SoundEvent(10);
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SessionEvent {
    LevelStarted { level: usize },
    Jumped,
    AttackStarted,
    AttackLanded { enemy: EntityId, damage: f32 },
    EnemyKilled { enemy: EntityId, at: Vec2 },
    EnemyHopped { enemy: EntityId },
    DamageTaken { amount: f32, health: f32 },
    PickupCollected { look: PickupLook },
    SpecialFired,
    LevelComplete { level: usize },
    GameOver,
    Victory,
}

impl SessionEvent {
    /// Wire id in `GameEvent::kind`.
    pub fn kind(&self) -> u32 {
        match self {
            SessionEvent::LevelStarted { .. } => 1,
            SessionEvent::Jumped => 2,
            SessionEvent::AttackStarted => 3,
            SessionEvent::AttackLanded { .. } => 4,
            SessionEvent::EnemyKilled { .. } => 5,
            SessionEvent::EnemyHopped { .. } => 6,
            SessionEvent::DamageTaken { .. } => 7,
            SessionEvent::PickupCollected { .. } => 8,
            SessionEvent::SpecialFired => 9,
            SessionEvent::LevelComplete { .. } => 10,
            SessionEvent::GameOver => 11,
            SessionEvent::Victory => 12,
        }
    }

    pub fn to_game_event(&self) -> GameEvent {
        let (a, b, c) = match *self {
            SessionEvent::LevelStarted { level } | SessionEvent::LevelComplete { level } => {
                (level as f32, 0.0, 0.0)
            }
            SessionEvent::AttackLanded { enemy, damage } => (enemy.0 as f32, damage, 0.0),
            SessionEvent::EnemyKilled { enemy, at } => (enemy.0 as f32, at.x, at.y),
            SessionEvent::EnemyHopped { enemy } => (enemy.0 as f32, 0.0, 0.0),
            SessionEvent::DamageTaken { amount, health } => (amount, health, 0.0),
            SessionEvent::PickupCollected { look } => (look as u8 as f32, 0.0, 0.0),
            SessionEvent::Jumped
            | SessionEvent::AttackStarted
            | SessionEvent::SpecialFired
            | SessionEvent::GameOver
            | SessionEvent::Victory => (0.0, 0.0, 0.0),
        };
        GameEvent {
            kind: self.kind() as f32,
            a,
            b,
            c,
        }
    }

    pub fn sound(&self) -> Option<SoundEvent> {
        match self {
            SessionEvent::Jumped => Some(sounds::JUMP),
            SessionEvent::AttackStarted => Some(sounds::SWORD),
            SessionEvent::EnemyKilled { .. } => Some(sounds::SLIME_DIE),
            SessionEvent::EnemyHopped { .. } => Some(sounds::SLIME_HOP),
            SessionEvent::DamageTaken { .. } => Some(sounds::HURT),
            SessionEvent::PickupCollected { look } => match look {
                PickupLook::Apple | PickupLook::Star => Some(sounds::PICKUP),
                _ => None,
            },
            SessionEvent::SpecialFired => Some(sounds::FIREBALL),
            SessionEvent::LevelComplete { .. } => Some(sounds::LEVEL_COMPLETE),
            SessionEvent::GameOver => Some(sounds::GAME_OVER),
            SessionEvent::Victory => Some(sounds::VICTORY),
            SessionEvent::LevelStarted { .. } | SessionEvent::AttackLanded { .. } => None,
        }
    }
}
