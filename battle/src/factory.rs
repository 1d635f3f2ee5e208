//! Constructors for battles and rounds with validated defaults

use arena_protocol::{
    BattleId, BattleMode, BattleStatus, Challenge, Difficulty, PlayerProfile, RoundResult,
    RoundStatus, TimeSpent,
};
use chrono::Utc;
use thiserror::Error;

use crate::types::{Battle, Round};

pub const MIN_ROUNDS: u8 = 1;
pub const MAX_ROUNDS: u8 = 10;
/// Seconds per round when none is given
pub const DEFAULT_TIME_LIMIT: u32 = 900;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("total rounds must be between 1 and 10, got {0}")]
    RoundsOutOfRange(u8),
}

/// Check a round count against the allowed range
pub fn validate_rounds(total_rounds: u8) -> Result<(), ConfigError> {
    if (MIN_ROUNDS..=MAX_ROUNDS).contains(&total_rounds) {
        Ok(())
    } else {
        Err(ConfigError::RoundsOutOfRange(total_rounds))
    }
}

/// Build an upcoming round
///
/// Difficulty comes from the challenge when it carries one, MEDIUM otherwise.
pub fn create_round(index: usize, challenge: Option<Challenge>) -> Round {
    let difficulty = challenge
        .as_ref()
        .and_then(|c| c.difficulty)
        .unwrap_or(Difficulty::Medium);

    Round {
        index,
        status: RoundStatus::Upcoming,
        result: RoundResult::Pending,
        difficulty,
        challenge,
        player_score: 0,
        opponent_score: 0,
        time_spent: TimeSpent::default(),
        efficiency: 0,
    }
}

/// Input for [`BattleFactory::create_battle`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BattleParams {
    pub mode: BattleMode,
    pub total_rounds: u8,
    pub difficulty: Option<Difficulty>,
    pub time_limit: Option<u32>,
}

impl BattleParams {
    pub fn new(mode: BattleMode, total_rounds: u8) -> Self {
        Self {
            mode,
            total_rounds,
            difficulty: None,
            time_limit: None,
        }
    }

    pub fn with_difficulty(mut self, difficulty: Difficulty) -> Self {
        self.difficulty = Some(difficulty);
        self
    }

    pub fn with_time_limit(mut self, seconds: u32) -> Self {
        self.time_limit = Some(seconds);
        self
    }
}

/// Creates battles with unique, increasing ids
#[derive(Debug, Clone)]
pub struct BattleFactory {
    next_id: u64,
}

impl BattleFactory {
    pub fn new() -> Self {
        Self { next_id: 1 }
    }

    /// Id the next battle will get
    pub fn peek_id(&self) -> BattleId {
        BattleId(self.next_id)
    }

    fn allocate_id(&mut self) -> BattleId {
        let id = BattleId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Create a waiting battle with `total_rounds` upcoming rounds
    ///
    /// Invalid round counts are rejected before an id is consumed.
    pub fn create_battle(
        &mut self,
        params: BattleParams,
        player: PlayerProfile,
    ) -> Result<Battle, ConfigError> {
        validate_rounds(params.total_rounds)?;

        let rounds = (0..params.total_rounds as usize)
            .map(|idx| create_round(idx, None))
            .collect();

        Ok(Battle {
            id: self.allocate_id(),
            mode: params.mode,
            status: BattleStatus::Waiting,
            total_rounds: params.total_rounds,
            current_round: None,
            rounds,
            player,
            opponent: None,
            created_at: Utc::now(),
            completed_at: None,
            time_limit: params.time_limit.unwrap_or(DEFAULT_TIME_LIMIT),
            difficulty: params.difficulty.unwrap_or_default(),
        })
    }
}

impl Default for BattleFactory {
    fn default() -> Self {
        Self::new()
    }
}
