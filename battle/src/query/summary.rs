//! Results-screen summary of a battle

use arena_protocol::{BattleId, BattleStatus, Side, TimeSpent};

use super::scoring::{
    Winner, avg_efficiency, avg_time, progress_percent, rank_progress, rounds_won, total_score,
    winner, xp_earned,
};
use crate::types::Battle;

/// All derived numbers for one battle, computed in one pass over the selectors
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BattleSummary {
    pub battle_id: BattleId,
    pub status: BattleStatus,
    pub player_score: u64,
    pub opponent_score: u64,
    pub player_rounds_won: usize,
    pub opponent_rounds_won: usize,
    pub winner: Winner,
    pub xp_earned: u64,
    pub rank_progress: i32,
    pub progress_percent: u8,
    pub avg_efficiency: u8,
    pub avg_time: TimeSpent,
}

pub fn summarize(battle: &Battle) -> BattleSummary {
    BattleSummary {
        battle_id: battle.id(),
        status: battle.status(),
        player_score: total_score(battle, Side::Player),
        opponent_score: total_score(battle, Side::Opponent),
        player_rounds_won: rounds_won(battle, Side::Player),
        opponent_rounds_won: rounds_won(battle, Side::Opponent),
        winner: winner(battle),
        xp_earned: xp_earned(battle),
        rank_progress: rank_progress(battle),
        progress_percent: progress_percent(battle),
        avg_efficiency: avg_efficiency(battle),
        avg_time: avg_time(battle),
    }
}
