//! Gravity integration and landing on static platforms.

use crate::components::entity::{Body, Capabilities};
use crate::components::platform::Platform;

/// Semi-implicit Euler step: x first (scaled by `speed_multiplier`), then
/// vy from gravity, then y. Records the previous position for swept landing.
/// There is no terminal velocity.
pub fn integrate(body: &mut Body, speed_multiplier: f32, gravity: f32, dt: f32) {
    if !body.has(Capabilities::PHYSICS) {
        return;
    }
    body.prev_pos = body.pos;
    body.pos.x += body.vel.x * speed_multiplier * dt;
    body.vel.y += gravity * dt;
    body.pos.y += body.vel.y * dt;
}

/// Snap a falling body onto the highest platform it crossed this step.
///
/// A platform qualifies when the horizontal projections overlap strictly, the
/// body is not moving up, its bottom is now below the platform top, and its
/// bottom before the step was no lower than `top + slack`. Testing the
/// previous bottom instead of the current overlap catches bodies that passed
/// through a thin platform in a single step.
///
/// Clears `grounded` first; returns whether the body landed.
pub fn resolve_landing(body: &mut Body, platforms: &[Platform], slack: f32) -> bool {
    body.grounded = false;
    if body.vel.y < 0.0 {
        return false;
    }

    let bounds = body.bounds();
    let prev_bottom = body.prev_bottom();
    let bottom = body.bottom();

    let landing_top = platforms
        .iter()
        .filter(|p| bounds.overlaps_x(&p.bounds))
        .map(|p| p.top())
        .filter(|&top| bottom > top && prev_bottom <= top + slack)
        .reduce(f32::min);

    match landing_top {
        Some(top) => {
            body.pos.y = top - body.size.y;
            body.vel.y = 0.0;
            body.grounded = true;
            true
        }
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::types::EntityId;
    use glam::Vec2;

    const G: f32 = 2520.0;
    const DT: f32 = 1.0 / 60.0;

    fn body_at(x: f32, y: f32) -> Body {
        Body::new(Vec2::new(x, y), Vec2::new(50.0, 64.0), Capabilities::PHYSICS)
    }

    fn floor(y: f32, height: f32) -> Platform {
        Platform::new(EntityId(100), Vec2::new(0.0, y), Vec2::new(640.0, height), 1)
    }

    #[test]
    fn airborne_velocity_accumulates_gravity() {
        let mut body = body_at(0.0, 0.0).with_vel(Vec2::new(0.0, -300.0));
        let steps = [DT, DT * 0.5, DT * 2.0, DT, DT * 1.5];
        let mut sum = 0.0;
        for dt in steps {
            integrate(&mut body, 1.0, G, dt);
            sum += dt;
        }
        assert!((body.vel.y - (-300.0 + G * sum)).abs() < 1e-3);
    }

    #[test]
    fn horizontal_motion_uses_multiplier() {
        let mut body = body_at(0.0, 0.0).with_vel(Vec2::new(240.0, 0.0));
        integrate(&mut body, 1.5, 0.0, 0.5);
        assert!((body.pos.x - 180.0).abs() < 1e-4);
        assert_eq!(body.prev_pos, Vec2::ZERO);
    }

    #[test]
    fn bodies_without_physics_are_untouched() {
        let mut body = Body::new(Vec2::ZERO, Vec2::splat(10.0), Capabilities::TRIGGERABLE);
        integrate(&mut body, 1.0, G, DT);
        assert_eq!(body.pos, Vec2::ZERO);
        assert_eq!(body.vel, Vec2::ZERO);
    }

    #[test]
    fn lands_and_snaps() {
        let platforms = [floor(400.0, 64.0)];
        let mut body = body_at(100.0, 330.0).with_vel(Vec2::new(0.0, 600.0));
        integrate(&mut body, 1.0, G, DT);
        assert!(body.bottom() > 400.0);
        assert!(resolve_landing(&mut body, &platforms, 1.0));
        assert!((body.bottom() - 400.0).abs() < 1e-4);
        assert_eq!(body.vel.y, 0.0);
        assert!(body.grounded);
    }

    #[test]
    fn resting_body_stays_grounded_every_frame() {
        let platforms = [floor(400.0, 64.0)];
        let mut body = body_at(100.0, 336.0);
        for _ in 0..120 {
            integrate(&mut body, 1.0, G, DT);
            assert!(resolve_landing(&mut body, &platforms, 1.0));
            assert!((body.pos.y - 336.0).abs() < 1e-3);
        }
    }

    #[test]
    fn grounded_only_when_snapped() {
        let platforms = [floor(400.0, 64.0)];
        let mut body = body_at(100.0, 100.0).with_grounded(true);
        integrate(&mut body, 1.0, G, DT);
        assert!(!resolve_landing(&mut body, &platforms, 1.0));
        assert!(!body.grounded);
    }

    #[test]
    fn rising_body_passes_through() {
        let platforms = [floor(400.0, 64.0)];
        let mut body = body_at(100.0, 350.0).with_vel(Vec2::new(0.0, -900.0));
        integrate(&mut body, 1.0, G, DT);
        assert!(!resolve_landing(&mut body, &platforms, 1.0));
    }

    #[test]
    fn side_approach_does_not_snap() {
        // Walking into the side of a ledge whose top is well above the feet.
        let ledge = [Platform::new(EntityId(1), Vec2::new(200.0, 300.0), Vec2::new(64.0, 200.0), 1)];
        let mut body = body_at(150.0, 336.0).with_vel(Vec2::new(240.0, 0.0));
        body.prev_pos = body.pos;
        integrate(&mut body, 1.0, G, DT);
        assert!(body.bounds().overlaps_x(&ledge[0].bounds));
        assert!(!resolve_landing(&mut body, &ledge, 1.0));
        assert!(body.pos.y > 300.0);
    }

    #[test]
    fn touching_edges_do_not_count_as_overlap() {
        let platforms = [floor(400.0, 64.0)];
        // Body's left edge exactly at the platform's right edge.
        let mut body = body_at(640.0, 330.0).with_vel(Vec2::new(0.0, 600.0));
        integrate(&mut body, 1.0, G, DT);
        assert!(!resolve_landing(&mut body, &platforms, 1.0));
    }

    #[test]
    fn high_speed_fall_does_not_tunnel_thin_platform() {
        let platforms = [floor(400.0, 10.0)];
        // 3000 px/s covers 50 px per step: more than the platform is thick.
        let mut body = body_at(100.0, 300.0).with_vel(Vec2::new(0.0, 3000.0));
        let mut landed = false;
        for _ in 0..10 {
            integrate(&mut body, 1.0, G, DT);
            if resolve_landing(&mut body, &platforms, 1.0) {
                landed = true;
                break;
            }
        }
        assert!(landed);
        assert!((body.bottom() - 400.0).abs() < 1e-4);
    }

    #[test]
    fn highest_platform_wins() {
        let platforms = [floor(420.0, 64.0), floor(400.0, 10.0)];
        let mut body = body_at(100.0, 300.0).with_vel(Vec2::new(0.0, 3000.0));
        body.prev_pos = body.pos;
        body.pos.y = 370.0;
        assert!(resolve_landing(&mut body, &platforms, 1.0));
        assert!((body.bottom() - 400.0).abs() < 1e-4);
    }
}
