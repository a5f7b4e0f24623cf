//! Ball integration for both field variants
//!
//! One fixed step = one tick of unit length. Position advances by the current
//! velocity, velocity is damped (and pulled by gravity on the interactive
//! field), then each axis is reflected off the field rectangle.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Axis-aligned field rectangle in field space
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FieldRect {
    pub min: Vec2,
    pub max: Vec2,
}

impl FieldRect {
    pub fn new(min: Vec2, max: Vec2) -> Self {
        Self { min, max }
    }

    pub fn center(&self) -> Vec2 {
        (self.min + self.max) * 0.5
    }
}

/// Per-variant tick constants
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PhysicsParams {
    /// Per-axis velocity multiplier applied every tick
    pub drag: Vec2,
    /// Added to vy every tick (screen y grows downward)
    pub gravity: f32,
    /// Fraction of speed kept when bouncing off an edge
    pub restitution: f32,
    pub bounds: FieldRect,
    /// Both |vx| and |vy| must drop below this for the ball to settle
    pub settle_speed: f32,
    /// If set, the ball can only settle with y greater than this
    pub settle_min_y: Option<f32>,
}

impl PhysicsParams {
    /// Single-ball field: isotropic drag, no gravity, settles anywhere
    pub fn simple() -> Self {
        Self {
            drag: Vec2::splat(0.98),
            gravity: 0.0,
            restitution: 0.8,
            bounds: FieldRect::new(
                Vec2::ZERO,
                Vec2::new(SIMPLE_FIELD_WIDTH, SIMPLE_FIELD_HEIGHT),
            ),
            settle_speed: 0.5,
            settle_min_y: None,
        }
    }

    /// Canvas field with fielders: light air drag plus gravity toward the
    /// batting end, settles only back near the batsman
    pub fn interactive() -> Self {
        let m = INTERACTIVE_FIELD_MARGIN;
        Self {
            drag: Vec2::splat(0.995),
            gravity: 0.1,
            restitution: 0.7,
            bounds: FieldRect::new(
                Vec2::splat(m),
                Vec2::new(INTERACTIVE_FIELD_WIDTH - m, INTERACTIVE_FIELD_HEIGHT - m),
            ),
            settle_speed: 0.3,
            settle_min_y: Some(480.0),
        }
    }
}

/// Outcome of one integration step
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepResult {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Ball touched an edge this tick
    pub bounced: bool,
    /// Ball came to rest (terminal)
    pub settled: bool,
}

/// Advance a ball by one tick
pub fn step(pos: Vec2, vel: Vec2, params: &PhysicsParams) -> StepResult {
    let mut new_pos = pos + vel;
    let mut new_vel = vel * params.drag;
    new_vel.y += params.gravity;

    let b = &params.bounds;
    let mut bounced = false;

    if new_pos.x <= b.min.x || new_pos.x >= b.max.x {
        new_vel.x = -new_vel.x * params.restitution;
        new_pos.x = new_pos.x.clamp(b.min.x, b.max.x);
        bounced = true;
    }
    if new_pos.y <= b.min.y || new_pos.y >= b.max.y {
        new_vel.y = -new_vel.y * params.restitution;
        new_pos.y = new_pos.y.clamp(b.min.y, b.max.y);
        bounced = true;
    }

    let slow =
        new_vel.x.abs() < params.settle_speed && new_vel.y.abs() < params.settle_speed;
    let in_zone = params.settle_min_y.is_none_or(|min_y| new_pos.y > min_y);

    StepResult {
        pos: new_pos,
        vel: new_vel,
        bounced,
        settled: slow && in_zone,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_step_applies_drag_after_moving() {
        let params = PhysicsParams::simple();
        let r = step(Vec2::new(300.0, 200.0), Vec2::new(10.0, -5.0), &params);
        assert_eq!(r.pos, Vec2::new(310.0, 195.0));
        assert!((r.vel.x - 9.8).abs() < 1e-5);
        assert!((r.vel.y + 4.9).abs() < 1e-5);
        assert!(!r.bounced);
        assert!(!r.settled);
    }

    #[test]
    fn test_interactive_gravity_pulls_down() {
        let params = PhysicsParams::interactive();
        let r = step(Vec2::new(400.0, 250.0), Vec2::ZERO, &params);
        assert!((r.vel.y - 0.1).abs() < 1e-6);
        assert_eq!(r.vel.x, 0.0);
    }

    #[test]
    fn test_reflects_off_right_edge() {
        let params = PhysicsParams::simple();
        let r = step(Vec2::new(595.0, 200.0), Vec2::new(10.0, 0.0), &params);
        assert!(r.bounced);
        assert_eq!(r.pos.x, 600.0);
        // -(10 * 0.98) * 0.8
        assert!((r.vel.x + 7.84).abs() < 1e-4);
    }

    #[test]
    fn test_reflects_off_top_edge_interactive() {
        let params = PhysicsParams::interactive();
        let r = step(Vec2::new(400.0, 12.0), Vec2::new(0.0, -5.0), &params);
        assert!(r.bounced);
        assert_eq!(r.pos.y, 10.0);
        // vy = (-5 * 0.995 + 0.1) = -4.875, reflected * 0.7
        assert!((r.vel.y - 3.4125).abs() < 1e-4);
    }

    #[test]
    fn test_simple_settles_anywhere() {
        let params = PhysicsParams::simple();
        let r = step(Vec2::new(100.0, 100.0), Vec2::new(0.4, 0.4), &params);
        assert!(r.settled);
    }

    #[test]
    fn test_interactive_settles_only_near_batting_end() {
        let params = PhysicsParams::interactive();
        let mid_field = step(Vec2::new(400.0, 250.0), Vec2::new(0.1, -0.1), &params);
        assert!(!mid_field.settled);

        let batting_end = step(Vec2::new(400.0, 485.0), Vec2::new(0.1, -0.1), &params);
        assert!(batting_end.settled);
    }

    #[test]
    fn test_field_rect() {
        let rect = PhysicsParams::simple().bounds;
        assert_eq!(rect.center(), Vec2::new(300.0, 200.0));
        assert_eq!(PhysicsParams::interactive().bounds.center(), Vec2::new(400.0, 250.0));
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        fn any_params() -> impl Strategy<Value = PhysicsParams> {
            prop_oneof![Just(PhysicsParams::simple()), Just(PhysicsParams::interactive())]
        }

        proptest! {
            /// Property: drag (and any bounce) never speeds up a component,
            /// apart from the gravity term on y
            #[test]
            fn prop_drag_reduces_unforced_motion(
                params in any_params(),
                x in 0.0f32..800.0,
                y in 0.0f32..500.0,
                vx in -40.0f32..40.0,
                vy in -40.0f32..40.0,
            ) {
                let r = step(Vec2::new(x, y), Vec2::new(vx, vy), &params);
                prop_assert!(r.vel.x.abs() <= vx.abs() * params.drag.x + 1e-4);
                prop_assert!(r.vel.y.abs() <= vy.abs() * params.drag.y + params.gravity.abs() + 1e-4);
            }

            /// Property: the ball never leaves the field rectangle
            #[test]
            fn prop_position_stays_in_bounds(
                params in any_params(),
                x in 0.0f32..800.0,
                y in 0.0f32..500.0,
                vx in -60.0f32..60.0,
                vy in -60.0f32..60.0,
            ) {
                let start = Vec2::new(x, y).clamp(params.bounds.min, params.bounds.max);
                let r = step(start, Vec2::new(vx, vy), &params);
                prop_assert!(r.pos.x >= params.bounds.min.x && r.pos.x <= params.bounds.max.x);
                prop_assert!(r.pos.y >= params.bounds.min.y && r.pos.y <= params.bounds.max.y);
            }

            /// Property: a ball sitting on an edge and moving outward is
            /// always turned back inward, never passed through
            #[test]
            fn prop_edge_reflection_turns_inward(
                params in any_params(),
                speed in 0.5f32..40.0,
                along in 0.2f32..0.8,
            ) {
                let b = params.bounds;
                let y = b.min.y + (b.max.y - b.min.y) * along;
                let right = step(Vec2::new(b.max.x, y), Vec2::new(speed, 0.0), &params);
                prop_assert!(right.bounced);
                prop_assert!(right.vel.x < 0.0);
                prop_assert!(right.vel.x.abs() <= speed * params.restitution + 1e-4);

                let left = step(Vec2::new(b.min.x, y), Vec2::new(-speed, 0.0), &params);
                prop_assert!(left.bounced);
                prop_assert!(left.vel.x > 0.0);
            }
        }
    }
}
