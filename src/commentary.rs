//! Live commentary feed
//!
//! Newest line first, capped at a handful of lines. Each scored ball picks a
//! random line from the list for its run value.

use std::collections::VecDeque;

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::game::{Achievement, MatchEvent};
use crate::sim::Runs;

/// Lines kept on screen
pub const MAX_LINES: usize = 5;

pub const WELCOME_LINE: &str = "Welcome to Cricket Arena Masters! Let's play some cricket!";

const DOT_LINES: &[&str] = &[
    "Dot ball! Good bowling there.",
    "No run there, pressure building!",
    "Excellent defensive shot, no run taken.",
];

const ONE_LINES: &[&str] = &[
    "Single taken, good running between the wickets!",
    "One run added to the total.",
    "Smart cricket, rotating the strike.",
];

const TWO_LINES: &[&str] = &[
    "Two runs! Great placement and quick running!",
    "Couple of runs, good cricket shot.",
    "Nice shot for two, keeping the scoreboard ticking.",
];

const THREE_LINES: &[&str] = &[
    "Three runs! Excellent running between the wickets!",
    "Triple! Great shot and even better running.",
    "Three runs taken, fantastic cricket!",
];

const FOUR_LINES: &[&str] = &[
    "FOUR! What a beautiful boundary shot! 🎯",
    "BOUNDARY! Magnificent stroke to the fence! ⚡",
    "FOUR RUNS! Perfectly timed shot! 🏏",
    "That's a cracking four! Shot of the match so far!",
];

const SIX_LINES: &[&str] = &[
    "SIX! MAXIMUM! What a shot! 🚀",
    "HUGE SIX! That's out of the park! 💥",
    "MAXIMUM! Incredible power hitting! ⚡",
    "SIX RUNS! That ball is still traveling! 🏏",
    "MONSTER HIT! What a way to clear the boundary! 🎯",
];

const CATCH_LINES: &[&str] = &[
    "CAUGHT! {} takes a brilliant catch!",
    "OUT! Straight into the hands of {}.",
    "Gone! {} holds on to that one.",
];

/// Candidate lines for a run value. Unknown values fall back to singles.
pub fn lines_for(runs: u32) -> &'static [&'static str] {
    match runs {
        0 => DOT_LINES,
        1 => ONE_LINES,
        2 => TWO_LINES,
        3 => THREE_LINES,
        4 => FOUR_LINES,
        6 => SIX_LINES,
        _ => ONE_LINES,
    }
}

#[derive(Debug, Clone)]
pub struct Commentary {
    lines: VecDeque<String>,
    muted: bool,
    rng: Pcg32,
}

impl Commentary {
    pub fn new(seed: u64) -> Self {
        let mut lines = VecDeque::with_capacity(MAX_LINES);
        lines.push_back(WELCOME_LINE.to_string());
        Self {
            lines,
            muted: false,
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    /// Newest first
    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.lines.iter().map(String::as_str)
    }

    pub fn latest(&self) -> Option<&str> {
        self.lines.front().map(String::as_str)
    }

    pub fn is_muted(&self) -> bool {
        self.muted
    }

    pub fn toggle_mute(&mut self) -> bool {
        self.muted = !self.muted;
        self.muted
    }

    pub fn push(&mut self, line: impl Into<String>) {
        self.lines.push_front(line.into());
        self.lines.truncate(MAX_LINES);
    }

    /// Comment on a scored ball
    pub fn on_runs(&mut self, runs: Runs) {
        let pool = lines_for(runs.get());
        let line = pool[self.rng.random_range(0..pool.len())];
        self.push(line);
    }

    /// Add whatever the match event deserves
    pub fn on_match_event(&mut self, event: &MatchEvent) {
        match event {
            MatchEvent::Scored { runs, .. } => self.on_runs(*runs),
            MatchEvent::Wicket { fielder, .. } => {
                let template = CATCH_LINES[self.rng.random_range(0..CATCH_LINES.len())];
                self.push(template.replace("{}", fielder));
            }
            MatchEvent::AllOut { runs } => {
                self.push(format!("ALL OUT! The innings closes on {runs}."));
            }
            MatchEvent::MatchWon { runs } => {
                self.push(format!("Target reached! {runs} runs on the board. 🎉"));
            }
            MatchEvent::AchievementUnlocked(Achievement::HalfCentury) => {
                self.push("FIFTY! Raise the bat, what an innings!");
            }
            MatchEvent::AchievementUnlocked(Achievement::FirstSix) => {}
            MatchEvent::OverCompleted { overs } => {
                log::debug!("Over {overs} complete");
            }
        }
    }
}
