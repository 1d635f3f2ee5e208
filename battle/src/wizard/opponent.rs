//! Synthetic AI opponents

use arena_protocol::{Difficulty, PlayerProfile};

/// Build an AI opponent whose level follows the player's and the difficulty
pub fn ai_opponent(player: &PlayerProfile, difficulty: Difficulty) -> PlayerProfile {
    let level = match difficulty {
        Difficulty::Easy => player.level.saturating_sub(2),
        Difficulty::Medium => player.level,
        Difficulty::Hard => player.level.saturating_add(3),
    }
    .max(1);

    PlayerProfile {
        id: format!("ai-{}", difficulty.as_str()),
        name: format!("CodeBot ({})", difficulty.label()),
        avatar: "bot".to_string(),
        level,
        league: league_for_level(level).to_string(),
    }
}

pub fn league_for_level(level: u32) -> &'static str {
    match level {
        0..=4 => "Bronze",
        5..=9 => "Silver",
        10..=19 => "Gold",
        20..=34 => "Platinum",
        _ => "Diamond",
    }
}
