//! Session-lifetime bookkeeping
//!
//! Everything that outlives a single match (the token balance, the welcome
//! bonus and the finished matches) lives in one `Session` that is passed
//! into each match. Nothing here is persisted.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::{Match, MatchMode};
use crate::consts::WELCOME_BONUS_TOKENS;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    #[error("Please claim your initial 20,000 tokens before playing")]
    BonusNotClaimed,
    #[error("Welcome bonus already claimed")]
    BonusAlreadyClaimed,
}

/// Summary of one finished match
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchRecord {
    pub mode: MatchMode,
    pub runs: u32,
    pub balls: u32,
    pub wickets: u32,
    pub tokens: u64,
    pub fours: u32,
    pub sixes: u32,
    pub won: bool,
}

impl MatchRecord {
    pub fn from_match(m: &Match) -> Self {
        let s = &m.state;
        Self {
            mode: m.mode,
            runs: s.runs,
            balls: s.balls,
            wickets: s.wickets,
            tokens: s.match_tokens,
            fours: s.boundaries.fours,
            sixes: s.boundaries.sixes,
            won: s.won,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Session {
    pub total_tokens: u64,
    pub bonus_claimed: bool,
    pub history: Vec<MatchRecord>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Grant the one-time welcome bonus, returning the new balance
    pub fn claim_bonus(&mut self) -> Result<u64, SessionError> {
        if self.bonus_claimed {
            return Err(SessionError::BonusAlreadyClaimed);
        }
        self.bonus_claimed = true;
        self.total_tokens += WELCOME_BONUS_TOKENS;
        log::info!("Welcome bonus claimed: {} tokens", self.total_tokens);
        Ok(self.total_tokens)
    }

    pub fn start_match(&self, mode: MatchMode) -> Result<Match, SessionError> {
        if !self.bonus_claimed {
            return Err(SessionError::BonusNotClaimed);
        }
        log::info!("{} started", mode.title());
        Ok(Match::new(mode))
    }

    pub fn credit(&mut self, tokens: u64) {
        self.total_tokens += tokens;
    }

    /// Record a finished match. Tokens were already credited as they were
    /// earned.
    pub fn finish_match(&mut self, m: &Match) -> &MatchRecord {
        let record = MatchRecord::from_match(m);
        log::info!(
            "{} finished: {}/{} off {} balls",
            m.mode.title(),
            record.runs,
            record.wickets,
            record.balls
        );
        self.history.push(record);
        &self.history[self.history.len() - 1]
    }
}
