//! Career statistics derived from the session's finished matches

use serde::{Deserialize, Serialize};

use super::MatchRecord;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CareerStats {
    pub matches: u32,
    pub total_runs: u32,
    pub total_balls: u32,
    pub total_tokens: u64,
    pub wins: u32,
    pub highest_score: u32,
    pub fours: u32,
    pub sixes: u32,
}

impl CareerStats {
    pub fn from_records(records: &[MatchRecord]) -> Self {
        records.iter().fold(Self::default(), |mut acc, r| {
            acc.matches += 1;
            acc.total_runs += r.runs;
            acc.total_balls += r.balls;
            acc.total_tokens += r.tokens;
            acc.wins += r.won as u32;
            acc.highest_score = acc.highest_score.max(r.runs);
            acc.fours += r.fours;
            acc.sixes += r.sixes;
            acc
        })
    }

    /// Percentage of matches won, 0 with no matches
    pub fn win_rate(&self) -> f32 {
        if self.matches == 0 {
            return 0.0;
        }
        self.wins as f32 / self.matches as f32 * 100.0
    }

    pub fn average_score(&self) -> f32 {
        if self.matches == 0 {
            return 0.0;
        }
        self.total_runs as f32 / self.matches as f32
    }

    pub fn strike_rate(&self) -> f32 {
        if self.total_balls == 0 {
            return 0.0;
        }
        self.total_runs as f32 / self.total_balls as f32 * 100.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::MatchMode;

    fn record(runs: u32, balls: u32, won: bool) -> MatchRecord {
        MatchRecord {
            mode: MatchMode::Quick,
            runs,
            balls,
            wickets: 0,
            tokens: runs as u64,
            fours: 1,
            sixes: 2,
            won,
        }
    }

    #[test]
    fn test_empty_history() {
        let stats = CareerStats::from_records(&[]);
        assert_eq!(stats.matches, 0);
        assert_eq!(stats.win_rate(), 0.0);
        assert_eq!(stats.average_score(), 0.0);
        assert_eq!(stats.strike_rate(), 0.0);
    }

    #[test]
    fn test_aggregates() {
        let stats = CareerStats::from_records(&[
            record(60, 30, true),
            record(20, 20, false),
            record(40, 30, true),
            record(0, 0, false),
        ]);
        assert_eq!(stats.matches, 4);
        assert_eq!(stats.total_runs, 120);
        assert_eq!(stats.highest_score, 60);
        assert_eq!(stats.fours, 4);
        assert_eq!(stats.sixes, 8);
        assert!((stats.win_rate() - 50.0).abs() < 1e-4);
        assert!((stats.average_score() - 30.0).abs() < 1e-4);
        assert!((stats.strike_rate() - 150.0).abs() < 1e-4);
    }
}
