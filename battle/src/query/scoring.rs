//! Scores, progress and rewards derived from a battle snapshot
//!
//! Every function here is total: empty or all-pending battles give neutral
//! values instead of panicking.

use arena_protocol::{RoundResult, Side, TimeSpent};

use crate::types::Battle;

/// XP bonus for winning a battle
pub const WIN_XP_BONUS: u32 = 250;
/// Rank change for a win, a draw and a loss
pub const RANK_ON_WIN: i32 = 45;
pub const RANK_ON_DRAW: i32 = 10;
pub const RANK_ON_LOSS: i32 = -20;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Winner {
    Player,
    Opponent,
    Draw,
}

impl Winner {
    pub fn as_str(&self) -> &'static str {
        match self {
            Winner::Player => "player",
            Winner::Opponent => "opponent",
            Winner::Draw => "draw",
        }
    }
}

/// Sum of one side's scores over all rounds
///
/// Unplayed rounds hold zero scores, so this is safe at any stage. Sums are
/// widened to `u64` so any number of `u32` scores fits.
pub fn total_score(battle: &Battle, side: Side) -> u64 {
    battle.rounds().iter().map(|r| u64::from(r.score(side))).sum()
}

/// Completed rounds as a rounded percentage of all rounds
pub fn progress_percent(battle: &Battle) -> u8 {
    let total = battle.rounds().len();
    if total == 0 {
        return 0;
    }
    let completed = battle.completed_rounds().count();
    ((completed as f64 / total as f64) * 100.0).round() as u8
}

/// Rounds won by one side
///
/// The opponent wins the rounds the player lost. Pending and drawn rounds
/// count for nobody.
pub fn rounds_won(battle: &Battle, side: Side) -> usize {
    let wanted = match side {
        Side::Player => RoundResult::Won,
        Side::Opponent => RoundResult::Lost,
    };
    battle.rounds().iter().filter(|r| r.result == wanted).count()
}

pub fn winner(battle: &Battle) -> Winner {
    let player = rounds_won(battle, Side::Player);
    let opponent = rounds_won(battle, Side::Opponent);

    match player.cmp(&opponent) {
        std::cmp::Ordering::Greater => Winner::Player,
        std::cmp::Ordering::Less => Winner::Opponent,
        std::cmp::Ordering::Equal => Winner::Draw,
    }
}

/// Player score plus the win bonus
pub fn xp_earned(battle: &Battle) -> u64 {
    let bonus = if winner(battle) == Winner::Player {
        u64::from(WIN_XP_BONUS)
    } else {
        0
    };
    total_score(battle, Side::Player) + bonus
}

/// Flat rank change for the outcome, independent of score
pub fn rank_progress(battle: &Battle) -> i32 {
    match winner(battle) {
        Winner::Player => RANK_ON_WIN,
        Winner::Draw => RANK_ON_DRAW,
        Winner::Opponent => RANK_ON_LOSS,
    }
}

/// Mean efficiency over completed rounds, 0 when none are completed
pub fn avg_efficiency(battle: &Battle) -> u8 {
    let (sum, count) = battle
        .completed_rounds()
        .fold((0u32, 0u32), |(sum, count), r| (sum + r.efficiency as u32, count + 1));

    if count == 0 {
        return 0;
    }
    (sum as f64 / count as f64).round() as u8
}

/// Mean time over completed rounds, `0:00` when none are completed
pub fn avg_time(battle: &Battle) -> TimeSpent {
    let (sum, count) = battle
        .completed_rounds()
        .fold((0u64, 0u64), |(sum, count), r| {
            (sum + r.time_spent.as_secs() as u64, count + 1)
        });

    if count == 0 {
        return TimeSpent::default();
    }
    TimeSpent(((sum + count / 2) / count) as u32)
}
