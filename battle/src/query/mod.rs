//! Derived selectors over battle snapshots
//!
//! Pure functions only; nothing here touches the state machine.

mod scoring;
mod summary;

pub use scoring::{
    RANK_ON_DRAW, RANK_ON_LOSS, RANK_ON_WIN, WIN_XP_BONUS, Winner, avg_efficiency, avg_time,
    progress_percent, rank_progress, rounds_won, total_score, winner, xp_earned,
};
pub use summary::{BattleSummary, summarize};
