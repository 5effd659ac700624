use glam::Vec2;

use crate::core::geometry::{is_on_screen, Aabb};

/// Horizontal side-scrolling camera with a dead zone.
/// `x` is the world x shown at the left edge of the viewport.
#[derive(Debug, Clone, PartialEq)]
pub struct ScrollCamera {
    pub x: f32,
    /// Visible area in world units.
    pub viewport: Vec2,
    /// Width of the band at each side of the viewport; the camera only moves
    /// when the target leaves the middle region.
    pub dead_zone: f32,
    /// Total level width; the camera never shows past either end.
    pub level_width: f32,
}

impl ScrollCamera {
    pub fn new(viewport: Vec2, dead_zone_fraction: f32) -> Self {
        Self {
            x: 0.0,
            viewport,
            dead_zone: viewport.x * dead_zone_fraction,
            level_width: viewport.x,
        }
    }

    pub fn with_level_width(mut self, level_width: f32) -> Self {
        self.level_width = level_width;
        self
    }

    /// Largest allowed offset. Levels narrower than the viewport pin to 0.
    pub fn max_x(&self) -> f32 {
        (self.level_width - self.viewport.x).max(0.0)
    }

    /// Follow a target x (the player's left edge). Returns how far the camera moved.
    pub fn follow(&mut self, target_x: f32) -> f32 {
        let before = self.x;
        let right_band = self.x + self.viewport.x - self.dead_zone;
        let left_band = self.x + self.dead_zone;

        if target_x > right_band {
            self.x = target_x - (self.viewport.x - self.dead_zone);
        } else if target_x < left_band {
            self.x = target_x - self.dead_zone;
        }
        self.x = self.x.clamp(0.0, self.max_x());
        self.x - before
    }

    /// Back to the level origin.
    pub fn reset(&mut self, level_width: f32) {
        self.x = 0.0;
        self.level_width = level_width;
    }

    /// Visibility test against the viewport widened by `margin` on both sides.
    pub fn sees(&self, rect: &Aabb, margin: f32) -> bool {
        is_on_screen(rect, self.x, self.viewport.x, margin)
    }
}
