use glam::Vec2;

use crate::core::geometry::Aabb;

/// Capability set of an entity. Systems filter on these instead of on type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct Capabilities(u8);

impl Capabilities {
    pub const NONE: Self = Self(0);
    pub const PHYSICS: Self = Self(1 << 0);
    pub const ANIMATED: Self = Self(1 << 1);
    pub const DAMAGEABLE: Self = Self(1 << 2);
    pub const COLLIDABLE: Self = Self(1 << 3);
    pub const TRIGGERABLE: Self = Self(1 << 4);

    pub const fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }

    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }
}

impl std::ops::BitOr for Capabilities {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        self.union(rhs)
    }
}

/// Horizontal facing direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Facing {
    Left,
    #[default]
    Right,
}

impl Facing {
    /// -1.0 for left, 1.0 for right.
    pub fn sign(self) -> f32 {
        match self {
            Facing::Left => -1.0,
            Facing::Right => 1.0,
        }
    }

    pub fn toward(from_x: f32, to_x: f32) -> Self {
        if to_x > from_x {
            Facing::Right
        } else {
            Facing::Left
        }
    }
}

/// Position, size and velocity shared by every simulated entity.
#[derive(Debug, Clone, PartialEq)]
pub struct Body {
    /// Top-left corner in world space.
    pub pos: Vec2,
    /// Width and height (both > 0).
    pub size: Vec2,
    /// Velocity in world units per second.
    pub vel: Vec2,
    /// Position before the last integration step.
    pub prev_pos: Vec2,
    /// Set by landing resolution; cleared at the start of every resolution pass.
    pub grounded: bool,
    pub caps: Capabilities,
}

impl Body {
    pub fn new(pos: Vec2, size: Vec2, caps: Capabilities) -> Self {
        debug_assert!(size.x > 0.0 && size.y > 0.0, "body size must be positive");
        Self {
            pos,
            size: size.max(Vec2::splat(f32::EPSILON)),
            vel: Vec2::ZERO,
            prev_pos: pos,
            grounded: false,
            caps,
        }
    }

    // -- Builder pattern --

    pub fn with_vel(mut self, vel: Vec2) -> Self {
        self.vel = vel;
        self
    }

    pub fn with_grounded(mut self, grounded: bool) -> Self {
        self.grounded = grounded;
        self
    }

    pub fn bounds(&self) -> Aabb {
        Aabb::from_pos_size(self.pos, self.size)
    }

    pub fn prev_bottom(&self) -> f32 {
        self.prev_pos.y + self.size.y
    }

    pub fn bottom(&self) -> f32 {
        self.pos.y + self.size.y
    }

    pub fn center(&self) -> Vec2 {
        self.pos + self.size * 0.5
    }

    /// Move to `pos` and forget the motion history.
    pub fn teleport(&mut self, pos: Vec2) {
        self.pos = pos;
        self.prev_pos = pos;
        self.vel = Vec2::ZERO;
        self.grounded = false;
    }

    pub fn has(&self, caps: Capabilities) -> bool {
        self.caps.contains(caps)
    }
}
