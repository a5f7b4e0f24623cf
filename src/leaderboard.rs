//! Token leaderboard
//!
//! Seeded from embedded JSON, keeps the top 10 players by tokens. Session
//! results can be entered if they beat the lowest row.

use serde::{Deserialize, Serialize};

use crate::game::CareerStats;

/// Maximum number of rows to keep
pub const MAX_ENTRIES: usize = 10;

const SEED_JSON: &str = include_str!("../data/leaderboard.json");

/// A single leaderboard row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    pub name: String,
    pub tokens: u64,
    pub runs: u32,
    pub sixes: u32,
    pub fours: u32,
    pub matches: u32,
    /// Percent
    pub win_rate: u32,
}

impl LeaderboardEntry {
    /// Row for a player from their session statistics
    pub fn from_stats(name: &str, stats: &CareerStats) -> Self {
        Self {
            name: name.to_string(),
            tokens: stats.total_tokens,
            runs: stats.total_runs,
            sixes: stats.sixes,
            fours: stats.fours,
            matches: stats.matches,
            win_rate: stats.win_rate().round() as u32,
        }
    }
}

/// Ranked leaderboard, sorted descending by tokens
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Leaderboard {
    pub entries: Vec<LeaderboardEntry>,
}

impl Leaderboard {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Parse rows from JSON, sorting and trimming them
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let mut entries: Vec<LeaderboardEntry> = serde_json::from_str(json)?;
        entries.sort_by(|a, b| b.tokens.cmp(&a.tokens));
        entries.truncate(MAX_ENTRIES);
        Ok(Self { entries })
    }

    /// The built-in rankings
    pub fn seeded() -> Self {
        match Self::from_json(SEED_JSON) {
            Ok(board) => board,
            Err(e) => {
                log::warn!("Bad leaderboard seed data: {e}");
                Self::new()
            }
        }
    }

    /// Check if a token total would make the board
    pub fn qualifies(&self, tokens: u64) -> bool {
        if tokens == 0 {
            return false;
        }
        if self.entries.len() < MAX_ENTRIES {
            return true;
        }
        self.entries.last().is_none_or(|e| tokens > e.tokens)
    }

    /// Rank a token total would achieve (1-indexed, None if it doesn't qualify)
    pub fn potential_rank(&self, tokens: u64) -> Option<usize> {
        if !self.qualifies(tokens) {
            return None;
        }
        let rank = self.entries.iter().position(|e| tokens > e.tokens);
        Some(rank.unwrap_or(self.entries.len()) + 1)
    }

    /// Insert a row if it qualifies, returning its rank
    pub fn add_entry(&mut self, entry: LeaderboardEntry) -> Option<usize> {
        if !self.qualifies(entry.tokens) {
            return None;
        }

        let pos = self.entries.iter().position(|e| entry.tokens > e.tokens);
        let rank = match pos {
            Some(i) => {
                self.entries.insert(i, entry);
                i + 1
            }
            None => {
                self.entries.push(entry);
                self.entries.len()
            }
        };

        self.entries.truncate(MAX_ENTRIES);
        Some(rank)
    }

    pub fn leader(&self) -> Option<&LeaderboardEntry> {
        self.entries.first()
    }
}
