use std::collections::HashMap;

use glam::Vec2;

use crate::api::types::EntityId;
use crate::components::animation::{AnimationDef, Animator};
use crate::components::entity::{Body, Capabilities, Facing};

pub const FLY_CLIP: &str = "fly";

/// How far behind the camera's left edge a projectile survives.
const TRAILING_MARGIN: f32 = 100.0;

/// Fireball launched by the special attack. Flies straight, ignores gravity.
#[derive(Debug, Clone)]
pub struct Projectile {
    pub id: EntityId,
    pub body: Body,
    pub animator: Animator,
    pub direction: Facing,
    pub speed: f32,
    pub expired: bool,
}

impl Projectile {
    pub fn new(
        id: EntityId,
        pos: Vec2,
        size: f32,
        direction: Facing,
        speed: f32,
        clip_set: HashMap<String, AnimationDef>,
    ) -> Self {
        let body = Body::new(pos, Vec2::splat(size), Capabilities::ANIMATED | Capabilities::COLLIDABLE)
            .with_vel(Vec2::new(direction.sign() * speed, 0.0));
        let mut animator = Animator::with_clips(clip_set);
        animator.play(FLY_CLIP, false);
        Self {
            id,
            body,
            animator,
            direction,
            speed,
            expired: false,
        }
    }

    /// Launch point in front of a shooter: beside it, vertically centred.
    pub fn launch_origin(shooter: &Body, facing: Facing, size: f32) -> Vec2 {
        let x = match facing {
            Facing::Right => shooter.pos.x + shooter.size.x,
            Facing::Left => shooter.pos.x - size,
        };
        Vec2::new(x, shooter.pos.y + shooter.size.y / 2.0 - size / 2.0)
    }

    /// Move and expire once it leaves the visible span.
    pub fn advance(&mut self, dt: f32, camera_x: f32, viewport_width: f32) {
        self.body.prev_pos = self.body.pos;
        self.body.pos.x += self.direction.sign() * self.speed * dt;
        let x = self.body.pos.x;
        if x > camera_x + viewport_width || x < camera_x - TRAILING_MARGIN {
            self.expired = true;
        }
    }

    /// Consume on the first hit. Returns false if it already hit something.
    pub fn hit(&mut self) -> bool {
        if self.expired {
            return false;
        }
        self.expired = true;
        true
    }
}
