//! Axis-aligned rectangles and the visibility test used for culling.

use glam::Vec2;

/// Axis-aligned bounding box. `pos` is the top-left corner (y grows downward).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Aabb {
    pub pos: Vec2,
    pub size: Vec2,
}

impl Aabb {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            pos: Vec2::new(x, y),
            size: Vec2::new(width, height),
        }
    }

    pub fn from_pos_size(pos: Vec2, size: Vec2) -> Self {
        Self { pos, size }
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.pos.x
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.pos.x + self.size.x
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.pos.y
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.pos.y + self.size.y
    }

    pub fn center(&self) -> Vec2 {
        self.pos + self.size * 0.5
    }

    /// Strict overlap on both axes. Rectangles that only share an edge do not overlap.
    #[inline]
    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.overlaps_x(other)
            && self.top() < other.bottom()
            && self.bottom() > other.top()
    }

    /// Strict overlap of the horizontal projections only.
    #[inline]
    pub fn overlaps_x(&self, other: &Aabb) -> bool {
        self.left() < other.right() && self.right() > other.left()
    }
}

/// Whether a rectangle lies within the horizontal band `[camera_x - margin,
/// camera_x + screen_width + margin]`.
pub fn is_on_screen(rect: &Aabb, camera_x: f32, screen_width: f32, margin: f32) -> bool {
    rect.right() > camera_x - margin && rect.left() < camera_x + screen_width + margin
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overlapping_rects() {
        let a = Aabb::new(0.0, 0.0, 10.0, 10.0);
        let b = Aabb::new(5.0, 5.0, 10.0, 10.0);
        assert!(a.overlaps(&b));
        assert!(b.overlaps(&a));
    }

    #[test]
    fn touching_edges_do_not_overlap() {
        let a = Aabb::new(0.0, 0.0, 10.0, 10.0);
        let right = Aabb::new(10.0, 0.0, 10.0, 10.0);
        let below = Aabb::new(0.0, 10.0, 10.0, 10.0);
        assert!(!a.overlaps(&right));
        assert!(!a.overlaps(&below));
    }

    #[test]
    fn separated_on_one_axis_only() {
        let a = Aabb::new(0.0, 0.0, 10.0, 10.0);
        let b = Aabb::new(2.0, 50.0, 4.0, 4.0);
        assert!(a.overlaps_x(&b));
        assert!(!a.overlaps(&b));
    }

    #[test]
    fn edges_and_center() {
        let r = Aabb::new(10.0, 20.0, 30.0, 40.0);
        assert_eq!(r.left(), 10.0);
        assert_eq!(r.right(), 40.0);
        assert_eq!(r.top(), 20.0);
        assert_eq!(r.bottom(), 60.0);
        assert_eq!(r.center(), Vec2::new(25.0, 40.0));
    }

    #[test]
    fn visibility_respects_margin() {
        let r = Aabb::new(-150.0, 0.0, 64.0, 64.0);
        assert!(is_on_screen(&r, 0.0, 1280.0, 200.0));
        assert!(!is_on_screen(&r, 0.0, 1280.0, 50.0));

        let far_right = Aabb::new(1600.0, 0.0, 64.0, 64.0);
        assert!(!is_on_screen(&far_right, 0.0, 1280.0, 200.0));
        assert!(is_on_screen(&far_right, 400.0, 1280.0, 200.0));
    }
}
