//! Display strings for the match screen scoreboard

use serde::Serialize;

use super::MatchState;
use crate::sim::Runs;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Scoreboard {
    /// "runs/wickets"
    pub score: String,
    /// "completed.balls_in_over"
    pub overs: String,
    /// "Target" or "Run Rate"
    pub rate_label: &'static str,
    /// Target runs, or run rate to one decimal
    pub rate_value: String,
    /// "Need N runs" or "per over"
    pub rate_detail: String,
    pub strike_rate: String,
    pub match_tokens: u64,
    pub this_over: Vec<Runs>,
}

impl Scoreboard {
    pub fn from_state(state: &MatchState) -> Self {
        let (rate_label, rate_value, rate_detail) = match state.target {
            Some(target) => (
                "Target",
                target.to_string(),
                format!("Need {} runs", target.saturating_sub(state.runs)),
            ),
            None => {
                let overs = (state.balls as f32 / 6.0).max(1.0);
                (
                    "Run Rate",
                    format!("{:.1}", state.runs as f32 / overs),
                    "per over".to_string(),
                )
            }
        };

        Self {
            score: format!("{}/{}", state.runs, state.wickets),
            overs: format!("{}.{}", state.completed_overs(), state.balls_in_over()),
            rate_label,
            rate_value,
            rate_detail,
            strike_rate: format!("{:.1}", state.strike_rate()),
            match_tokens: state.match_tokens,
            this_over: state.current_over.clone(),
        }
    }

    /// One-line summary for logs
    pub fn summary(&self) -> String {
        format!(
            "{} ({} ov) {} {} | SR {} | {} tokens",
            self.score,
            self.overs,
            self.rate_label,
            self.rate_value,
            self.strike_rate,
            self.match_tokens
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run_rate_without_target() {
        let mut state = MatchState::new(None);
        for r in [Runs::FOUR, Runs::SIX, Runs::ONE] {
            state.record_ball(r);
        }
        let board = Scoreboard::from_state(&state);
        assert_eq!(board.score, "11/0");
        assert_eq!(board.overs, "0.3");
        assert_eq!(board.rate_label, "Run Rate");
        // Fewer than six balls counts as one over
        assert_eq!(board.rate_value, "11.0");
        assert_eq!(board.rate_detail, "per over");
    }

    #[test]
    fn test_run_rate_after_overs() {
        let mut state = MatchState::new(None);
        for _ in 0..9 {
            state.record_ball(Runs::TWO);
        }
        let board = Scoreboard::from_state(&state);
        assert_eq!(board.overs, "1.3");
        assert_eq!(board.rate_value, "12.0");
        assert_eq!(board.strike_rate, "200.0");
    }

    #[test]
    fn test_target_countdown_never_negative() {
        let mut state = MatchState::new(Some(10));
        state.record_ball(Runs::FOUR);
        let board = Scoreboard::from_state(&state);
        assert_eq!(board.rate_label, "Target");
        assert_eq!(board.rate_value, "10");
        assert_eq!(board.rate_detail, "Need 6 runs");

        state.record_ball(Runs::SIX);
        state.record_ball(Runs::SIX);
        assert_eq!(Scoreboard::from_state(&state).rate_detail, "Need 0 runs");
    }
}
