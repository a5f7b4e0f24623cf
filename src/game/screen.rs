//! Match screen glue
//!
//! Owns everything one match needs on screen: the simulator, the match
//! controller, commentary and pose effects. Player actions are queued as a
//! `TickInput` and applied on the next fixed step, so the browser timer and
//! the headless demo drive the match the same way.

use crate::commentary::Commentary;
use crate::effects::Effects;
use crate::settings::Settings;
use crate::sim::{
    BatShot, ShotInput, SimEvent, Simulator, TickInput, TimingQuality, tick,
};

use super::{Match, MatchEvent, Session};

/// Everything that happened during one fixed step
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickOutcome {
    pub sim: Vec<SimEvent>,
    pub game: Vec<MatchEvent>,
}

impl TickOutcome {
    pub fn is_empty(&self) -> bool {
        self.sim.is_empty() && self.game.is_empty()
    }
}

pub struct MatchScreen {
    pub game: Match,
    pub sim: Simulator,
    pub commentary: Commentary,
    pub effects: Effects,
    /// Feedback for the most recent timed shot
    pub feedback: Option<TimingQuality>,
    pending: TickInput,
}

impl MatchScreen {
    pub fn new(game: Match, settings: &Settings, seed: u64) -> Self {
        Self {
            game,
            sim: Simulator::new(settings.variant, seed),
            commentary: Commentary::new(seed.wrapping_add(1)),
            effects: Effects::new(settings.reduced_motion),
            feedback: None,
            pending: TickInput::default(),
        }
    }

    pub fn bat(&mut self, shot: BatShot) {
        self.pending.bat = Some(shot);
    }

    pub fn set_bat_position(&mut self, x: f32) {
        self.pending.bat_position = Some(x);
    }

    pub fn deliver(&mut self) {
        self.pending.deliver = true;
    }

    pub fn play_shot(&mut self, timing: f32, power: f32) {
        self.pending.shot = Some(ShotInput { timing, power });
    }

    /// Queue inputs chosen elsewhere (autopilot)
    pub fn queue(&mut self, input: TickInput) {
        self.pending = input;
    }

    /// Something still needs the physics timer
    pub fn needs_ticks(&self) -> bool {
        self.sim.needs_ticks() || !self.pending.is_empty() || self.effects.is_active()
    }

    /// Run one fixed step and route its events through the match
    pub fn tick(&mut self, session: &mut Session) -> TickOutcome {
        let input = std::mem::take(&mut self.pending);
        let sim_events = tick(&mut self.sim, &input);
        self.effects.tick();

        let mut game_events = Vec::new();
        for event in &sim_events {
            self.effects.on_sim_event(event);
            if let SimEvent::ShotPlayed { quality } = event {
                self.feedback = Some(*quality);
            }
            game_events.extend(self.game.handle(event, session));
        }

        for event in &game_events {
            self.commentary.on_match_event(event);
        }

        self.sim.set_game_active(self.game.state.game_active);

        TickOutcome {
            sim: sim_events,
            game: game_events,
        }
    }

    /// Restart the match in the same mode
    pub fn reset(&mut self) {
        self.game.reset();
        self.sim.reset();
        self.effects.clear();
        self.feedback = None;
        self.pending = TickInput::default();
        self.commentary.push("New match! Fresh start at the crease.");
    }
}
