//! Battle - one multi-round match between a player and an opponent

use arena_protocol::{BattleId, BattleMode, BattleStatus, Difficulty, PlayerProfile, RoundStatus};
use chrono::{DateTime, Utc};

use super::round::Round;

/// A battle snapshot
///
/// Fields are only writable inside this crate; consumers read through the
/// accessors and every change goes through [`crate::BattleMachine`].
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Battle {
    pub(crate) id: BattleId,
    pub(crate) mode: BattleMode,
    pub(crate) status: BattleStatus,
    /// Always equal to `rounds.len()`
    pub(crate) total_rounds: u8,
    /// `None` until the battle starts
    pub(crate) current_round: Option<usize>,
    pub(crate) rounds: Vec<Round>,
    pub(crate) player: PlayerProfile,
    pub(crate) opponent: Option<PlayerProfile>,
    pub(crate) created_at: DateTime<Utc>,
    pub(crate) completed_at: Option<DateTime<Utc>>,
    /// Seconds per round
    pub(crate) time_limit: u32,
    pub(crate) difficulty: Difficulty,
}

impl Battle {
    pub fn id(&self) -> BattleId {
        self.id
    }

    pub fn mode(&self) -> BattleMode {
        self.mode
    }

    pub fn status(&self) -> BattleStatus {
        self.status
    }

    pub fn total_rounds(&self) -> u8 {
        self.total_rounds
    }

    /// Index of the round being played, `None` before the battle starts
    pub fn current_round_index(&self) -> Option<usize> {
        self.current_round
    }

    pub fn current_round(&self) -> Option<&Round> {
        self.current_round.and_then(|idx| self.rounds.get(idx))
    }

    pub fn rounds(&self) -> &[Round] {
        &self.rounds
    }

    pub fn round(&self, index: usize) -> Option<&Round> {
        self.rounds.get(index)
    }

    pub fn player(&self) -> &PlayerProfile {
        &self.player
    }

    pub fn opponent(&self) -> Option<&PlayerProfile> {
        self.opponent.as_ref()
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn completed_at(&self) -> Option<DateTime<Utc>> {
        self.completed_at
    }

    pub fn time_limit(&self) -> u32 {
        self.time_limit
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn is_terminal(&self) -> bool {
        self.status.is_terminal()
    }

    /// Rounds currently marked in progress (never more than one)
    pub fn in_progress_rounds(&self) -> impl Iterator<Item = &Round> {
        self.rounds.iter().filter(|r| r.is_in_progress())
    }

    pub fn completed_rounds(&self) -> impl Iterator<Item = &Round> {
        self.rounds.iter().filter(|r| r.is_completed())
    }

    /// Put any in-progress round back to upcoming
    pub(crate) fn park_in_progress(&mut self) {
        for round in self.rounds.iter_mut().filter(|r| r.is_in_progress()) {
            round.status = RoundStatus::Upcoming;
        }
    }
}
