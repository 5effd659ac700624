use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::api::types::EntityId;
use crate::components::entity::{Body, Capabilities};

/// What touching a pickup does.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "effect", rename_all = "snake_case")]
pub enum EffectKind {
    Heal { amount: f32 },
    Boost { duration: f32 },
    Hazard { damage: f32 },
    LevelEnd,
}

impl EffectKind {
    /// Heal and boost vanish after one use; hazards and the goal stay.
    pub fn is_one_shot(&self) -> bool {
        matches!(self, EffectKind::Heal { .. } | EffectKind::Boost { .. })
    }
}

/// Appearance tag, used only to pick a frame on the pickup sheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PickupLook {
    Apple,
    Star,
    Spike,
    Water,
    Flag,
}

impl PickupLook {
    pub fn frame(self) -> u32 {
        match self {
            PickupLook::Apple => 0,
            PickupLook::Star => 1,
            PickupLook::Spike => 2,
            PickupLook::Water => 3,
            PickupLook::Flag => 0,
        }
    }
}

/// Static trigger volume: item, hazard or the level goal.
#[derive(Debug, Clone, PartialEq)]
pub struct Pickup {
    pub id: EntityId,
    pub body: Body,
    pub effect: EffectKind,
    pub look: PickupLook,
    consumed: bool,
}

impl Pickup {
    pub fn new(id: EntityId, pos: Vec2, size: Vec2, effect: EffectKind, look: PickupLook) -> Self {
        Self {
            id,
            body: Body::new(pos, size, Capabilities::TRIGGERABLE),
            effect,
            look,
            consumed: false,
        }
    }

    pub fn is_consumed(&self) -> bool {
        self.consumed
    }

    /// Returns the effect to apply, or `None` if this one-shot pickup was
    /// already used. Persistent effects trigger every call.
    pub fn trigger(&mut self) -> Option<EffectKind> {
        if self.consumed {
            return None;
        }
        if self.effect.is_one_shot() {
            self.consumed = true;
        }
        Some(self.effect)
    }
}
