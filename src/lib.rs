//! Cricket Arena - a browser cricket mini-game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (ball physics, run classification, simulators)
//! - `game`: Match controller, session bookkeeping, derived statistics
//! - `renderer`: WebGPU rendering pipeline
//! - `commentary`, `leaderboard`, `wallet`: menu and match-screen features
//! - `settings`: Runtime configuration

pub mod audio;
pub mod commentary;
pub mod effects;
pub mod game;
pub mod leaderboard;
pub mod renderer;
pub mod settings;
pub mod sim;
pub mod wallet;

pub use leaderboard::Leaderboard;
pub use settings::{Settings, SimVariant};

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Fixed physics tick in milliseconds (~60 Hz)
    pub const TICK_MS: u32 = 16;
    /// Maximum physics ticks caught up in one timer callback
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Simple field: 600 x 400, scored from the center
    pub const SIMPLE_FIELD_WIDTH: f32 = 600.0;
    pub const SIMPLE_FIELD_HEIGHT: f32 = 400.0;

    /// Interactive field: 800 x 500 canvas, ball kept 10 units from the edges
    pub const INTERACTIVE_FIELD_WIDTH: f32 = 800.0;
    pub const INTERACTIVE_FIELD_HEIGHT: f32 = 500.0;
    pub const INTERACTIVE_FIELD_MARGIN: f32 = 10.0;

    /// Wickets that end an innings
    pub const WICKETS_PER_INNINGS: u32 = 10;
    /// Deliveries per over
    pub const BALLS_PER_OVER: usize = 6;

    /// Welcome bonus granted once per session
    pub const WELCOME_BONUS_TOKENS: u64 = 20_000;
    /// Target for the quick match mode
    pub const QUICK_MATCH_TARGET: u32 = 50;
}

/// Convert polar (r, theta) to cartesian (x, y)
#[inline]
pub fn polar_to_cartesian(r: f32, theta: f32) -> Vec2 {
    Vec2::new(r * theta.cos(), r * theta.sin())
}

/// Distance between two field points
#[inline]
pub fn distance(a: Vec2, b: Vec2) -> f32 {
    (a - b).length()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::PI;

    #[test]
    fn test_polar_to_cartesian_axes() {
        let v = polar_to_cartesian(10.0, 0.0);
        assert!((v.x - 10.0).abs() < 1e-5 && v.y.abs() < 1e-5);

        let v = polar_to_cartesian(10.0, -PI / 2.0);
        assert!(v.x.abs() < 1e-5 && (v.y + 10.0).abs() < 1e-5);
    }

    #[test]
    fn test_distance() {
        assert!((distance(Vec2::new(0.0, 0.0), Vec2::new(3.0, 4.0)) - 5.0).abs() < 1e-6);
    }
}
