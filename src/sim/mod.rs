//! Deterministic simulation module
//!
//! All gameplay physics lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - No rendering or platform dependencies

pub mod classify;
pub mod field;
pub mod interactive;
pub mod physics;
pub mod state;
pub mod tick;

pub use classify::{CATCH_RADIUS, InvalidRuns, MidBand, RunBands, Runs, catching_fielder};
pub use field::{BatShot, FieldSim};
pub use interactive::{DeliveryPhase, InteractiveSim, shot_impulse};
pub use physics::{FieldRect, PhysicsParams, StepResult, step};
pub use state::{Ball, Player, PlayerRole, SimEvent, TimingQuality, default_roster};
pub use tick::{Autopilot, FixedStep, ShotInput, Simulator, TickInput, tick};
