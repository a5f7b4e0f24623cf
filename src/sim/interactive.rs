//! Interactive field: bowler, batsman and seven fielders
//!
//! A delivery goes Idle -> Delivering -> InFlight -> Idle. The batsman may
//! play any number of shots while the ball is live; each one adds an impulse
//! shaped by the timing and power sliders. The delivery ends when a fielder
//! catches the ball or it comes to rest back near the batting end.

use std::f32::consts::PI;

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::classify::{RunBands, catching_fielder};
use super::physics::{PhysicsParams, step};
use super::state::{Ball, Player, PlayerRole, SimEvent, TimingQuality, default_roster};
use crate::consts::TICK_MS;
use crate::{distance, polar_to_cartesian};

/// Where the inert ball waits between deliveries
pub const BALL_REST: Vec2 = Vec2::new(400.0, 350.0);
/// Release point at the bowling end
pub const RELEASE_POINT: Vec2 = Vec2::new(400.0, 70.0);
/// Run-up time before the ball is released
pub const DELIVERY_DELAY_MS: u32 = 500;
/// Slider value that gives a perfectly timed shot
pub const PERFECT_TIMING: f32 = 50.0;
/// Top shot speed at full power and perfect timing
pub const MAX_SHOT_SPEED: f32 = 15.0;

/// Where the current delivery is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeliveryPhase {
    Idle,
    Delivering { remaining_ms: u32 },
    InFlight,
}

/// Impulse for a shot with the given slider values (each 0..=100)
///
/// Returns the velocity to add and the timing factor in `0..=1`.
pub fn shot_impulse(timing: f32, power: f32) -> (Vec2, f32) {
    let timing = timing.clamp(0.0, 100.0);
    let power = power.clamp(0.0, 100.0);

    let timing_factor = 1.0 - (timing - PERFECT_TIMING).abs() / PERFECT_TIMING;
    let shot_angle = -PI / 3.0 + (power / 100.0) * (PI / 6.0);
    let shot_speed = (power / 100.0) * MAX_SHOT_SPEED * timing_factor;

    (polar_to_cartesian(shot_speed, shot_angle), timing_factor)
}

/// Interactive field simulator state
#[derive(Debug, Clone)]
pub struct InteractiveSim {
    pub ball: Ball,
    pub players: Vec<Player>,
    phase: DeliveryPhase,
    game_active: bool,
    params: PhysicsParams,
    bands: RunBands,
    rng: Pcg32,
}

impl InteractiveSim {
    pub fn new(seed: u64) -> Self {
        Self {
            ball: Ball::at_rest(BALL_REST),
            players: default_roster(),
            phase: DeliveryPhase::Idle,
            game_active: true,
            params: PhysicsParams::interactive(),
            bands: RunBands::interactive(),
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    pub fn phase(&self) -> DeliveryPhase {
        self.phase
    }

    pub fn params(&self) -> &PhysicsParams {
        &self.params
    }

    pub fn set_game_active(&mut self, active: bool) {
        self.game_active = active;
    }

    /// Reference point for run distances
    pub fn batsman_pos(&self) -> Vec2 {
        self.players
            .iter()
            .find(|p| p.role == PlayerRole::Batsman)
            .map(|p| p.pos)
            .unwrap_or(Vec2::new(400.0, 450.0))
    }

    pub fn can_deliver(&self) -> bool {
        self.game_active && self.phase == DeliveryPhase::Idle && !self.ball.active
    }

    pub fn can_play_shot(&self) -> bool {
        self.game_active && self.ball.active
    }

    /// Ball live or run-up in progress: the physics timer must be running
    pub fn needs_ticks(&self) -> bool {
        self.phase != DeliveryPhase::Idle
    }

    /// Start the bowler's run-up. Ignored unless idle.
    pub fn deliver(&mut self) -> Option<SimEvent> {
        if !self.can_deliver() {
            return None;
        }
        self.phase = DeliveryPhase::Delivering {
            remaining_ms: DELIVERY_DELAY_MS,
        };
        Some(SimEvent::DeliveryStarted)
    }

    /// Add a shot impulse to the live ball. Ignored unless the ball is in play.
    pub fn play_shot(&mut self, timing: f32, power: f32) -> Option<SimEvent> {
        if !self.can_play_shot() {
            return None;
        }
        let (impulse, factor) = shot_impulse(timing, power);
        self.ball.vel += impulse;
        let quality = TimingQuality::from_factor(factor);
        log::debug!("Shot timing={timing} power={power}: {quality:?}");
        Some(SimEvent::ShotPlayed { quality })
    }

    /// Advance one physics tick
    pub fn tick(&mut self) -> Vec<SimEvent> {
        let mut events = Vec::new();

        match self.phase {
            DeliveryPhase::Idle => {}
            DeliveryPhase::Delivering { remaining_ms } => {
                let remaining_ms = remaining_ms.saturating_sub(TICK_MS);
                if remaining_ms == 0 {
                    self.release();
                    events.push(SimEvent::BallReleased);
                } else {
                    self.phase = DeliveryPhase::Delivering { remaining_ms };
                }
            }
            DeliveryPhase::InFlight => {
                if self.game_active {
                    self.advance_ball(&mut events);
                }
            }
        }

        events
    }

    fn release(&mut self) {
        let speed = 8.0 + self.rng.random::<f32>() * 4.0;
        let angle = PI / 2.0 + (self.rng.random::<f32>() - 0.5) * 0.3;
        let side = if self.rng.random_bool(0.5) { 1.0 } else { -1.0 };
        let vel = Vec2::new(angle.sin() * speed * side, angle.cos() * speed);

        self.ball.launch(RELEASE_POINT, vel);
        self.phase = DeliveryPhase::InFlight;
    }

    fn advance_ball(&mut self, events: &mut Vec<SimEvent>) {
        let r = step(self.ball.pos, self.ball.vel, &self.params);
        if r.bounced {
            events.push(SimEvent::Bounced);
        }

        // Catch wins over settling when both hold on the same tick
        if let Some(fielder) = catching_fielder(r.pos, r.vel, &self.players) {
            let fielder = fielder.name.clone();
            log::debug!("Caught by {fielder} at ({:.0}, {:.0})", r.pos.x, r.pos.y);
            self.ball.reset(BALL_REST, true);
            self.phase = DeliveryPhase::Idle;
            events.push(SimEvent::Out { fielder });
            return;
        }

        if r.settled {
            let d = distance(r.pos, self.batsman_pos());
            let runs = self.bands.classify(d, &mut self.rng);
            log::debug!("Ball settled {d:.1} from the batsman: {runs} runs");
            self.ball.reset(BALL_REST, false);
            self.phase = DeliveryPhase::Idle;
            events.push(SimEvent::Score { runs });
            return;
        }

        self.ball.pos = r.pos;
        self.ball.vel = r.vel;
    }

    /// Back to the start-of-match state
    pub fn reset(&mut self) {
        self.ball = Ball::at_rest(BALL_REST);
        self.phase = DeliveryPhase::Idle;
        self.game_active = true;
    }
}
