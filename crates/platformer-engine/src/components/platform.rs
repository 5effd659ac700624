use glam::Vec2;

use crate::api::types::EntityId;
use crate::core::geometry::Aabb;

/// Static solid rectangle. `kind` only selects the tile graphic (1..=5).
#[derive(Debug, Clone, PartialEq)]
pub struct Platform {
    pub id: EntityId,
    pub bounds: Aabb,
    pub kind: u8,
}

impl Platform {
    pub fn new(id: EntityId, pos: Vec2, size: Vec2, kind: u8) -> Self {
        Self {
            id,
            bounds: Aabb::from_pos_size(pos, size),
            kind,
        }
    }

    pub fn top(&self) -> f32 {
        self.bounds.top()
    }

    /// Frame on the tileset sheet.
    pub fn frame(&self) -> u32 {
        u32::from(self.kind.saturating_sub(1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tile_frame_is_zero_based() {
        let p = Platform::new(EntityId(1), Vec2::new(0.0, 640.0), Vec2::splat(64.0), 3);
        assert_eq!(p.frame(), 2);
        assert_eq!(p.top(), 640.0);
    }
}
