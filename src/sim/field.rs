//! Simple field: one ball, no fielders
//!
//! The batsman picks one of three shot presets from a slidable crease
//! position; the ball rolls out under drag and the runs depend only on where
//! it stops relative to the center of the field.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::classify::RunBands;
use super::physics::{PhysicsParams, step};
use super::state::{Ball, SimEvent};
use crate::{distance, polar_to_cartesian};

/// Crease slider range
pub const BAT_POSITION_MIN: f32 = 250.0;
pub const BAT_POSITION_MAX: f32 = 350.0;
pub const BAT_POSITION_DEFAULT: f32 = 280.0;

/// Shot presets (power, angle)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BatShot {
    Defensive,
    Drive,
    BigHit,
}

impl BatShot {
    pub const ALL: [BatShot; 3] = [BatShot::Defensive, BatShot::Drive, BatShot::BigHit];

    pub fn power(&self) -> f32 {
        match self {
            BatShot::Defensive => 8.0,
            BatShot::Drive => 15.0,
            BatShot::BigHit => 25.0,
        }
    }

    /// Launch angle in radians (negative is up the screen)
    pub fn angle(&self) -> f32 {
        use std::f32::consts::PI;
        match self {
            BatShot::Defensive => -PI / 3.0,
            BatShot::Drive => -PI / 4.0,
            BatShot::BigHit => -PI / 6.0,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            BatShot::Defensive => "Defensive",
            BatShot::Drive => "Drive",
            BatShot::BigHit => "Big Hit",
        }
    }
}

/// Simple field simulator state
#[derive(Debug, Clone)]
pub struct FieldSim {
    pub ball: Ball,
    bat_position: f32,
    game_active: bool,
    params: PhysicsParams,
    bands: RunBands,
    rng: Pcg32,
}

impl FieldSim {
    pub fn new(seed: u64) -> Self {
        let params = PhysicsParams::simple();
        Self {
            ball: Ball::at_rest(params.bounds.center()),
            bat_position: BAT_POSITION_DEFAULT,
            game_active: true,
            params,
            bands: RunBands::simple(),
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    /// Where the ball rests and where distance is measured from
    pub fn center(&self) -> Vec2 {
        self.params.bounds.center()
    }

    pub fn params(&self) -> &PhysicsParams {
        &self.params
    }

    pub fn bat_position(&self) -> f32 {
        self.bat_position
    }

    pub fn set_game_active(&mut self, active: bool) {
        self.game_active = active;
    }

    /// Bat actions and the slider are only live between deliveries
    pub fn can_bat(&self) -> bool {
        self.game_active && !self.ball.active
    }

    pub fn in_flight(&self) -> bool {
        self.ball.active
    }

    /// Move the batsman along the crease (ignored while the ball is live)
    pub fn set_bat_position(&mut self, x: f32) -> bool {
        if !self.can_bat() {
            return false;
        }
        self.bat_position = x.clamp(BAT_POSITION_MIN, BAT_POSITION_MAX);
        true
    }

    /// Hit the ball with a preset. Returns false if the action is not allowed.
    pub fn bat(&mut self, shot: BatShot) -> bool {
        if !self.can_bat() {
            return false;
        }
        let start = Vec2::new(self.bat_position, self.center().y);
        let vel = polar_to_cartesian(shot.power(), shot.angle());
        log::debug!("{} from x={}", shot.label(), self.bat_position);
        self.ball.launch(start, vel)
    }

    /// Advance one physics tick
    pub fn tick(&mut self) -> Vec<SimEvent> {
        let mut events = Vec::new();
        if !self.ball.active || !self.game_active {
            return events;
        }

        let r = step(self.ball.pos, self.ball.vel, &self.params);
        if r.bounced {
            events.push(SimEvent::Bounced);
        }

        if r.settled {
            let d = distance(r.pos, self.center());
            let runs = self.bands.classify(d, &mut self.rng);
            log::debug!("Ball settled {:.1} from center: {} runs", d, runs);
            self.ball.reset(self.center(), false);
            events.push(SimEvent::Score { runs });
        } else {
            self.ball.pos = r.pos;
            self.ball.vel = r.vel;
        }

        events
    }

    /// Back to the start-of-match state
    pub fn reset(&mut self) {
        self.ball = Ball::at_rest(self.center());
        self.bat_position = BAT_POSITION_DEFAULT;
        self.game_active = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::classify::Runs;

    fn run_to_completion(sim: &mut FieldSim) -> Vec<SimEvent> {
        let mut all = Vec::new();
        for _ in 0..10_000 {
            all.extend(sim.tick());
            if !sim.in_flight() {
                break;
            }
        }
        all
    }

    #[test]
    fn test_bat_launches_from_crease() {
        let mut sim = FieldSim::new(1);
        assert!(sim.bat(BatShot::Drive));
        assert!(sim.in_flight());
        assert_eq!(sim.ball.pos, Vec2::new(BAT_POSITION_DEFAULT, 200.0));
        assert!(sim.ball.vel.x > 0.0 && sim.ball.vel.y < 0.0);
    }

    #[test]
    fn test_second_bat_rejected_while_in_flight() {
        let mut sim = FieldSim::new(1);
        assert!(sim.bat(BatShot::Defensive));
        let vel = sim.ball.vel;
        assert!(!sim.bat(BatShot::BigHit));
        assert_eq!(sim.ball.vel, vel);
        assert!(!sim.set_bat_position(300.0));
    }

    #[test]
    fn test_bat_position_clamped() {
        let mut sim = FieldSim::new(1);
        assert!(sim.set_bat_position(900.0));
        assert_eq!(sim.bat_position(), BAT_POSITION_MAX);
        assert!(sim.set_bat_position(0.0));
        assert_eq!(sim.bat_position(), BAT_POSITION_MIN);
    }

    #[test]
    fn test_inactive_game_blocks_everything() {
        let mut sim = FieldSim::new(1);
        sim.set_game_active(false);
        assert!(!sim.bat(BatShot::Drive));
        assert!(sim.tick().is_empty());
    }

    #[test]
    fn test_every_preset_resolves_to_one_score() {
        for shot in BatShot::ALL {
            let mut sim = FieldSim::new(3);
            assert!(sim.bat(shot));
            let events = run_to_completion(&mut sim);
            let scores: Vec<_> = events
                .iter()
                .filter(|e| matches!(e, SimEvent::Score { .. }))
                .collect();
            assert_eq!(scores.len(), 1, "{shot:?}");
            assert!(!sim.in_flight());
            assert_eq!(sim.ball.pos, sim.center());
        }
    }

    #[test]
    fn test_settle_far_from_center_is_six() {
        let mut sim = FieldSim::new(1);
        // Place a nearly stopped ball 160 units right of center
        sim.ball.launch(Vec2::new(460.0, 200.0), Vec2::new(0.1, 0.0));
        let events = sim.tick();
        assert!(events.contains(&SimEvent::Score { runs: Runs::SIX }));
    }

    #[test]
    fn test_settle_near_center_is_dot() {
        let mut sim = FieldSim::new(1);
        sim.ball.launch(Vec2::new(330.0, 200.0), Vec2::new(0.1, 0.0));
        let events = sim.tick();
        assert_eq!(events, vec![SimEvent::Score { runs: Runs::DOT }]);
    }
}
