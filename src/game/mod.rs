//! Match controller
//!
//! Turns simulator events into match state, tokens and achievements. The
//! `Session` is passed in explicitly so token balances survive across
//! matches without global state.

pub mod match_state;
pub mod scoreboard;
pub mod screen;
pub mod session;
pub mod stats;

pub use match_state::{
    Achievement, Boundaries, MatchEvent, MatchMode, MatchState, token_reward,
};
pub use scoreboard::Scoreboard;
pub use screen::MatchScreen;
pub use session::{MatchRecord, Session, SessionError};
pub use stats::CareerStats;

use serde::{Deserialize, Serialize};

use crate::sim::SimEvent;

/// One match in a given mode
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Match {
    pub mode: MatchMode,
    pub state: MatchState,
}

impl Match {
    pub fn new(mode: MatchMode) -> Self {
        Self {
            mode,
            state: MatchState::new(mode.target()),
        }
    }

    /// Route a simulator event into the match, crediting earned tokens to the
    /// session. Events that do not affect the score return nothing.
    pub fn handle(&mut self, event: &SimEvent, session: &mut Session) -> Vec<MatchEvent> {
        match event {
            SimEvent::Score { runs } => {
                let events = self.state.record_ball(*runs);
                session.credit(token_reward(*runs));
                events
            }
            SimEvent::Out { fielder } => self.state.record_wicket(fielder),
            _ => Vec::new(),
        }
    }

    pub fn scoreboard(&self) -> Scoreboard {
        Scoreboard::from_state(&self.state)
    }

    /// Restart in the same mode. Tokens already credited stay with the session.
    pub fn reset(&mut self) {
        *self = Self::new(self.mode);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::Runs;

    fn session() -> Session {
        let mut s = Session::new();
        s.claim_bonus().unwrap();
        s
    }

    #[test]
    fn test_score_credits_session() {
        let mut session = session();
        let mut m = Match::new(MatchMode::Tournament);
        let events = m.handle(&SimEvent::Score { runs: Runs::SIX }, &mut session);
        assert_eq!(m.state.match_tokens, 100);
        assert_eq!(session.total_tokens, 20_100);
        assert_eq!(m.state.current_over, vec![Runs::SIX]);
        assert!(events.contains(&MatchEvent::Scored {
            runs: Runs::SIX,
            tokens: 100
        }));
    }

    #[test]
    fn test_out_scores_nothing() {
        let mut session = session();
        let mut m = Match::new(MatchMode::Career);
        let events = m.handle(
            &SimEvent::Out {
                fielder: "Slip".into(),
            },
            &mut session,
        );
        assert_eq!(m.state.wickets, 1);
        assert_eq!(m.state.runs, 0);
        assert_eq!(m.state.balls, 0);
        assert_eq!(session.total_tokens, 20_000);
        assert_eq!(
            events,
            vec![MatchEvent::Wicket {
                fielder: "Slip".into(),
                wickets: 1
            }]
        );
    }

    #[test]
    fn test_non_scoring_events_ignored() {
        let mut session = session();
        let mut m = Match::new(MatchMode::Quick);
        assert!(m.handle(&SimEvent::Bounced, &mut session).is_empty());
        assert!(m.handle(&SimEvent::DeliveryStarted, &mut session).is_empty());
        assert_eq!(m.state, MatchState::new(Some(50)));
    }

    #[test]
    fn test_reset_keeps_mode_and_session_tokens() {
        let mut session = session();
        let mut m = Match::new(MatchMode::Quick);
        m.handle(&SimEvent::Score { runs: Runs::FOUR }, &mut session);
        m.reset();
        assert_eq!(m.mode, MatchMode::Quick);
        assert_eq!(m.state.runs, 0);
        assert_eq!(m.state.target, Some(50));
        assert_eq!(session.total_tokens, 20_040);
    }
}
