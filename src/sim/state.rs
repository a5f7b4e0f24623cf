//! Simulation entities and the events simulators emit

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::classify::Runs;

/// The single live ball of a simulator
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Ball {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Tick loop advances the ball only while active
    pub active: bool,
    /// Set on the tick a fielder takes the catch (interactive field only)
    #[serde(default)]
    pub caught: bool,
}

impl Ball {
    /// Inert ball resting at the given point
    pub fn at_rest(rest: Vec2) -> Self {
        Self {
            pos: rest,
            vel: Vec2::ZERO,
            active: false,
            caught: false,
        }
    }

    /// Put the ball in play. Returns false (and changes nothing) if it
    /// already is.
    pub fn launch(&mut self, pos: Vec2, vel: Vec2) -> bool {
        if self.active {
            return false;
        }
        self.pos = pos;
        self.vel = vel;
        self.active = true;
        self.caught = false;
        true
    }

    /// Return to the inert rest state
    pub fn reset(&mut self, rest: Vec2, caught: bool) {
        *self = Self::at_rest(rest);
        self.caught = caught;
    }

    pub fn speed(&self) -> f32 {
        self.vel.length()
    }
}

/// Fixed fielding role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlayerRole {
    Batsman,
    Bowler,
    Fielder,
}

/// A player standing at a fixed field position
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub pos: Vec2,
    pub role: PlayerRole,
    pub name: String,
}

impl Player {
    pub fn new(x: f32, y: f32, role: PlayerRole, name: &str) -> Self {
        Self {
            pos: Vec2::new(x, y),
            role,
            name: name.to_string(),
        }
    }
}

/// Standard roster: batsman, bowler and seven fielders
pub fn default_roster() -> Vec<Player> {
    use PlayerRole::*;
    vec![
        Player::new(400.0, 450.0, Batsman, "You"),
        Player::new(400.0, 50.0, Bowler, "Fast Bowler"),
        Player::new(150.0, 200.0, Fielder, "Slip"),
        Player::new(650.0, 200.0, Fielder, "Point"),
        Player::new(400.0, 150.0, Fielder, "Mid-off"),
        Player::new(200.0, 350.0, Fielder, "Square Leg"),
        Player::new(600.0, 350.0, Fielder, "Cover"),
        Player::new(300.0, 400.0, Fielder, "Mid-wicket"),
        Player::new(500.0, 400.0, Fielder, "Long-on"),
    ]
}

/// How well a shot was timed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimingQuality {
    Perfect,
    Good,
    Mistimed,
}

impl TimingQuality {
    pub fn from_factor(factor: f32) -> Self {
        if factor > 0.8 {
            TimingQuality::Perfect
        } else if factor > 0.5 {
            TimingQuality::Good
        } else {
            TimingQuality::Mistimed
        }
    }

    /// Short feedback line for the match screen
    pub fn message(&self) -> &'static str {
        match self {
            TimingQuality::Perfect => "Perfect Timing! Excellent shot timing!",
            TimingQuality::Good => "Good Timing. Decent shot",
            TimingQuality::Mistimed => "Mistimed. Work on your timing!",
        }
    }
}

/// Things that happened during a tick or an action, in order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SimEvent {
    /// Bowler started the run-up
    DeliveryStarted,
    /// Ball left the bowler's hand
    BallReleased,
    /// Batsman played a shot
    ShotPlayed { quality: TimingQuality },
    /// Ball hit the field edge
    Bounced,
    /// Ball came to rest and the runs were decided
    Score { runs: Runs },
    /// Fielder caught the ball
    Out { fielder: String },
}
