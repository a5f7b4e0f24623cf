//! Cumulative match state and the scoring rules
//!
//! A `MatchState` only changes in response to a scored ball or a wicket. It
//! knows nothing about physics; the simulator hands it `Runs` and catches.

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::sim::Runs;

/// Tokens for one ball: 100 for a six, 40 for a four, otherwise one per run
pub fn token_reward(runs: Runs) -> u64 {
    match runs {
        Runs::SIX => 100,
        Runs::FOUR => 40,
        r => r.get() as u64,
    }
}

/// Match modes offered on the menu
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum MatchMode {
    #[default]
    Quick,
    Tournament,
    Career,
}

impl MatchMode {
    pub const ALL: [MatchMode; 3] = [MatchMode::Quick, MatchMode::Tournament, MatchMode::Career];

    pub fn title(&self) -> &'static str {
        match self {
            MatchMode::Quick => "Quick Match",
            MatchMode::Tournament => "Tournament",
            MatchMode::Career => "Career Mode",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "quick" => Some(MatchMode::Quick),
            "tournament" => Some(MatchMode::Tournament),
            "career" => Some(MatchMode::Career),
            _ => None,
        }
    }

    /// Runs needed to win, if the mode has a fixed target
    pub fn target(&self) -> Option<u32> {
        match self {
            MatchMode::Quick => Some(QUICK_MATCH_TARGET),
            MatchMode::Tournament | MatchMode::Career => None,
        }
    }
}

/// Milestones unlocked at most once per match
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Achievement {
    FirstSix,
    HalfCentury,
}

impl Achievement {
    pub fn title(&self) -> &'static str {
        match self {
            Achievement::FirstSix => "First Six",
            Achievement::HalfCentury => "Half Century",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Achievement::FirstSix => "Hit your first maximum",
            Achievement::HalfCentury => "Reached 50 runs in a match",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Boundaries {
    pub fours: u32,
    pub sixes: u32,
}

/// Things the match screen reacts to (toasts, commentary, sounds)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum MatchEvent {
    Scored { runs: Runs, tokens: u64 },
    OverCompleted { overs: u32 },
    AchievementUnlocked(Achievement),
    MatchWon { runs: u32 },
    Wicket { fielder: String, wickets: u32 },
    AllOut { runs: u32 },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchState {
    pub runs: u32,
    pub balls: u32,
    pub wickets: u32,
    /// Balls of the over in progress; never holds 6 entries
    pub current_over: Vec<Runs>,
    pub match_tokens: u64,
    pub boundaries: Boundaries,
    /// Append-only, no duplicates
    pub achievements: Vec<Achievement>,
    pub target: Option<u32>,
    /// Cleared when the side is all out; gates deliveries and bat actions
    pub game_active: bool,
    /// Target reached (does not stop play)
    pub won: bool,
}

impl MatchState {
    pub fn new(target: Option<u32>) -> Self {
        Self {
            runs: 0,
            balls: 0,
            wickets: 0,
            current_over: Vec::with_capacity(BALLS_PER_OVER),
            match_tokens: 0,
            boundaries: Boundaries::default(),
            achievements: Vec::new(),
            target,
            game_active: true,
            won: false,
        }
    }

    pub fn completed_overs(&self) -> u32 {
        self.balls / BALLS_PER_OVER as u32
    }

    pub fn balls_in_over(&self) -> u32 {
        self.balls % BALLS_PER_OVER as u32
    }

    pub fn has_achievement(&self, a: Achievement) -> bool {
        self.achievements.contains(&a)
    }

    pub fn strike_rate(&self) -> f32 {
        if self.balls == 0 {
            0.0
        } else {
            self.runs as f32 / self.balls as f32 * 100.0
        }
    }

    /// Apply one scored ball (dot balls included)
    pub fn record_ball(&mut self, runs: Runs) -> Vec<MatchEvent> {
        let mut events = Vec::new();
        let tokens = token_reward(runs);

        self.runs += runs.get();
        self.balls += 1;
        self.match_tokens += tokens;
        match runs {
            Runs::FOUR => self.boundaries.fours += 1,
            Runs::SIX => self.boundaries.sixes += 1,
            _ => {}
        }
        events.push(MatchEvent::Scored { runs, tokens });

        self.current_over.push(runs);
        if self.current_over.len() == BALLS_PER_OVER {
            self.current_over.clear();
            events.push(MatchEvent::OverCompleted {
                overs: self.completed_overs(),
            });
        }

        if runs == Runs::SIX {
            self.unlock(Achievement::FirstSix, &mut events);
        }
        if self.runs >= 50 {
            self.unlock(Achievement::HalfCentury, &mut events);
        }

        if let Some(target) = self.target
            && !self.won
            && self.runs >= target
        {
            self.won = true;
            log::info!("Target {target} reached with {} runs", self.runs);
            events.push(MatchEvent::MatchWon { runs: self.runs });
        }

        events
    }

    /// Apply a catch. Ignored once the side is all out.
    pub fn record_wicket(&mut self, fielder: &str) -> Vec<MatchEvent> {
        let mut events = Vec::new();
        if !self.game_active {
            return events;
        }

        self.wickets += 1;
        events.push(MatchEvent::Wicket {
            fielder: fielder.to_string(),
            wickets: self.wickets,
        });

        if self.wickets >= WICKETS_PER_INNINGS {
            self.game_active = false;
            log::info!("All out for {}", self.runs);
            events.push(MatchEvent::AllOut { runs: self.runs });
        }

        events
    }

    fn unlock(&mut self, achievement: Achievement, events: &mut Vec<MatchEvent>) {
        if self.has_achievement(achievement) {
            return;
        }
        log::info!("Achievement unlocked: {}", achievement.title());
        self.achievements.push(achievement);
        events.push(MatchEvent::AchievementUnlocked(achievement));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn runs(v: u8) -> Runs {
        Runs::new(v).unwrap()
    }

    #[test]
    fn test_token_reward() {
        assert_eq!(token_reward(Runs::SIX), 100);
        assert_eq!(token_reward(Runs::FOUR), 40);
        assert_eq!(token_reward(Runs::THREE), 3);
        assert_eq!(token_reward(Runs::ONE), 1);
        assert_eq!(token_reward(Runs::DOT), 0);
    }

    #[test]
    fn test_six_scores_hundred_tokens() {
        let mut state = MatchState::new(None);
        let events = state.record_ball(Runs::SIX);
        assert_eq!(state.runs, 6);
        assert_eq!(state.match_tokens, 100);
        assert_eq!(state.current_over, vec![Runs::SIX]);
        assert_eq!(state.boundaries.sixes, 1);
        assert!(events.contains(&MatchEvent::AchievementUnlocked(Achievement::FirstSix)));
    }

    #[test]
    fn test_dot_ball_counts_ball_only() {
        let mut state = MatchState::new(None);
        let events = state.record_ball(Runs::DOT);
        assert_eq!(state.runs, 0);
        assert_eq!(state.balls, 1);
        assert_eq!(state.match_tokens, 0);
        assert_eq!(
            events,
            vec![MatchEvent::Scored {
                runs: Runs::DOT,
                tokens: 0
            }]
        );
    }

    #[test]
    fn test_over_resets_on_sixth_ball() {
        let mut state = MatchState::new(None);
        for (i, v) in [1, 4, 0, 6, 2].into_iter().enumerate() {
            state.record_ball(runs(v));
            assert_eq!(state.current_over.len(), i + 1);
        }
        let events = state.record_ball(Runs::ONE);
        assert!(state.current_over.is_empty());
        assert!(events.contains(&MatchEvent::OverCompleted { overs: 1 }));

        state.record_ball(Runs::TWO);
        assert_eq!(state.current_over, vec![Runs::TWO]);
        assert_eq!(state.completed_overs(), 1);
        assert_eq!(state.balls_in_over(), 1);
        assert_eq!(state.runs, 16);
    }

    #[test]
    fn test_half_century_unlocks_once() {
        let mut state = MatchState::new(None);
        state.runs = 48;
        let events = state.record_ball(Runs::FOUR);
        assert_eq!(state.runs, 52);
        assert_eq!(
            events
                .iter()
                .filter(|e| **e == MatchEvent::AchievementUnlocked(Achievement::HalfCentury))
                .count(),
            1
        );

        let events = state.record_ball(Runs::FOUR);
        assert!(!events.contains(&MatchEvent::AchievementUnlocked(Achievement::HalfCentury)));
        assert_eq!(state.achievements, vec![Achievement::HalfCentury]);
    }

    #[test]
    fn test_win_signalled_once_and_play_continues() {
        let mut state = MatchState::new(Some(10));
        state.record_ball(Runs::SIX);
        let events = state.record_ball(Runs::FOUR);
        assert!(events.contains(&MatchEvent::MatchWon { runs: 10 }));
        assert!(state.won);
        assert!(state.game_active);

        let events = state.record_ball(Runs::ONE);
        assert!(!events.iter().any(|e| matches!(e, MatchEvent::MatchWon { .. })));
    }

    #[test]
    fn test_all_out_after_ten_wickets() {
        let mut state = MatchState::new(None);
        for i in 1..WICKETS_PER_INNINGS {
            let events = state.record_wicket("Slip");
            assert_eq!(events.len(), 1);
            assert_eq!(state.wickets, i);
        }
        let events = state.record_wicket("Cover");
        assert!(events.contains(&MatchEvent::AllOut { runs: 0 }));
        assert!(!state.game_active);

        assert!(state.record_wicket("Point").is_empty());
        assert_eq!(state.wickets, WICKETS_PER_INNINGS);
    }

    #[test]
    fn test_strike_rate() {
        let mut state = MatchState::new(None);
        assert_eq!(state.strike_rate(), 0.0);
        state.record_ball(Runs::FOUR);
        state.record_ball(Runs::DOT);
        assert!((state.strike_rate() - 200.0).abs() < 1e-4);
    }

    #[test]
    fn test_mode_targets_and_titles() {
        assert_eq!(MatchMode::Quick.target(), Some(50));
        assert_eq!(MatchMode::Tournament.target(), None);
        assert_eq!(MatchMode::Career.title(), "Career Mode");
        assert_eq!(MatchMode::from_str("Tournament"), Some(MatchMode::Tournament));
        assert_eq!(MatchMode::from_str("exhibition"), None);
    }

    #[test]
    fn test_unlocked_achievements_carry_hud_text() {
        let mut state = MatchState::new(None);
        state.record_ball(Runs::SIX);
        let [first] = state.achievements.as_slice() else {
            panic!("expected one achievement, got {:?}", state.achievements);
        };
        assert_eq!(first.title(), "First Six");
        assert_eq!(first.description(), "Hit your first maximum");
        assert_ne!(
            Achievement::HalfCentury.description(),
            Achievement::FirstSix.description()
        );
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        fn any_runs() -> impl Strategy<Value = Runs> {
            prop::sample::select(Runs::ALL.to_vec())
        }

        proptest! {
            /// Property: over length stays below 6 and the ball/run
            /// bookkeeping always agrees with the deliveries played
            #[test]
            fn prop_over_and_totals_consistent(balls in prop::collection::vec(any_runs(), 0..80)) {
                let mut state = MatchState::new(Some(50));
                for r in &balls {
                    state.record_ball(*r);
                    prop_assert!(state.current_over.len() < BALLS_PER_OVER);
                }
                let total: u32 = balls.iter().map(|r| r.get()).sum();
                prop_assert_eq!(state.runs, total);
                prop_assert_eq!(state.balls as usize, balls.len());
                prop_assert_eq!(
                    state.balls,
                    state.completed_overs() * BALLS_PER_OVER as u32 + state.current_over.len() as u32
                );
                let tokens: u64 = balls.iter().map(|r| token_reward(*r)).sum();
                prop_assert_eq!(state.match_tokens, tokens);
            }

            /// Property: achievements are never removed or duplicated
            #[test]
            fn prop_achievements_append_only(balls in prop::collection::vec(any_runs(), 0..80)) {
                let mut state = MatchState::new(None);
                let mut seen: Vec<Achievement> = Vec::new();
                for r in balls {
                    state.record_ball(r);
                    prop_assert!(state.achievements.starts_with(&seen));
                    seen = state.achievements.clone();
                }
                let mut dedup = seen.clone();
                dedup.dedup();
                prop_assert_eq!(dedup.len(), seen.len());
                prop_assert!(seen.len() <= 2);
            }

            /// Property: the reward depends on the runs alone
            #[test]
            fn prop_token_reward_pure(r in any_runs(), history in prop::collection::vec(any_runs(), 0..20)) {
                let mut state = MatchState::new(None);
                for h in history {
                    state.record_ball(h);
                }
                let before = state.match_tokens;
                state.record_ball(r);
                prop_assert_eq!(state.match_tokens - before, token_reward(r));
            }
        }
    }
}
