//! Round - one scored sub-contest within a battle

use arena_protocol::{Challenge, Difficulty, RoundReport, RoundResult, RoundStatus, Side, TimeSpent};

/// Highest efficiency a round can record
pub const MAX_EFFICIENCY: u8 = 100;

/// A single round of a battle
///
/// Scores start at zero and stay zero until the round is completed, so
/// summing over every round of a battle is always safe.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Round {
    /// Position in the battle (0-based, fixed at creation)
    pub index: usize,
    pub status: RoundStatus,
    pub result: RoundResult,
    pub difficulty: Difficulty,
    /// Challenge assigned to this round, if any
    pub challenge: Option<Challenge>,
    pub player_score: u32,
    pub opponent_score: u32,
    pub time_spent: TimeSpent,
    /// 0-100
    pub efficiency: u8,
}

impl Round {
    pub fn is_completed(&self) -> bool {
        self.status == RoundStatus::Completed
    }

    pub fn is_in_progress(&self) -> bool {
        self.status == RoundStatus::InProgress
    }

    /// Score for one side
    pub fn score(&self, side: Side) -> u32 {
        match side {
            Side::Player => self.player_score,
            Side::Opponent => self.opponent_score,
        }
    }

    /// Record a finished round
    ///
    /// Ties go to the player.
    pub(crate) fn record(&mut self, report: &RoundReport) {
        self.player_score = report.player_score;
        self.opponent_score = report.opponent_score;
        self.time_spent = report.time_spent;
        self.efficiency = report.efficiency.min(MAX_EFFICIENCY);
        self.result = if report.player_score >= report.opponent_score {
            RoundResult::Won
        } else {
            RoundResult::Lost
        };
        self.status = RoundStatus::Completed;
    }
}
