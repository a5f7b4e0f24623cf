//! Presentation-only timed effects
//!
//! Pose flags for the bowler and batsman. They live outside the simulation
//! so rendering can animate them without touching physics state.

use crate::consts::TICK_MS;
use crate::sim::{PlayerRole, SimEvent};

pub const BOWLER_POSE_MS: u32 = 500;
pub const BATSMAN_POSE_MS: u32 = 300;

#[derive(Debug, Clone, Default)]
pub struct Effects {
    bowler_ms: u32,
    batsman_ms: u32,
    enabled: bool,
}

impl Effects {
    pub fn new(reduced_motion: bool) -> Self {
        Self {
            enabled: !reduced_motion,
            ..Default::default()
        }
    }

    /// Start poses for the events of one tick
    pub fn on_sim_event(&mut self, event: &SimEvent) {
        if !self.enabled {
            return;
        }
        match event {
            SimEvent::DeliveryStarted => self.bowler_ms = BOWLER_POSE_MS,
            SimEvent::ShotPlayed { .. } => self.batsman_ms = BATSMAN_POSE_MS,
            _ => {}
        }
    }

    /// Advance timers by one fixed step
    pub fn tick(&mut self) {
        self.bowler_ms = self.bowler_ms.saturating_sub(TICK_MS);
        self.batsman_ms = self.batsman_ms.saturating_sub(TICK_MS);
    }

    pub fn is_animated(&self, role: PlayerRole) -> bool {
        match role {
            PlayerRole::Bowler => self.bowler_ms > 0,
            PlayerRole::Batsman => self.batsman_ms > 0,
            PlayerRole::Fielder => false,
        }
    }

    /// Any pose still running (keeps the tick timer alive)
    pub fn is_active(&self) -> bool {
        self.bowler_ms > 0 || self.batsman_ms > 0
    }

    pub fn clear(&mut self) {
        self.bowler_ms = 0;
        self.batsman_ms = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::TimingQuality;

    #[test]
    fn test_bowler_pose_expires() {
        let mut fx = Effects::new(false);
        fx.on_sim_event(&SimEvent::DeliveryStarted);
        assert!(fx.is_animated(PlayerRole::Bowler));
        assert!(!fx.is_animated(PlayerRole::Batsman));

        for _ in 0..BOWLER_POSE_MS.div_ceil(TICK_MS) {
            fx.tick();
        }
        assert!(!fx.is_animated(PlayerRole::Bowler));
        assert!(!fx.is_active());
    }

    #[test]
    fn test_batsman_pose_after_shot() {
        let mut fx = Effects::new(false);
        fx.on_sim_event(&SimEvent::ShotPlayed {
            quality: TimingQuality::Good,
        });
        fx.tick();
        assert!(fx.is_animated(PlayerRole::Batsman));
        for _ in 0..BATSMAN_POSE_MS / TICK_MS {
            fx.tick();
        }
        assert!(!fx.is_animated(PlayerRole::Batsman));
    }

    #[test]
    fn test_reduced_motion_disables_poses() {
        let mut fx = Effects::new(true);
        fx.on_sim_event(&SimEvent::DeliveryStarted);
        assert!(!fx.is_active());
    }
}
