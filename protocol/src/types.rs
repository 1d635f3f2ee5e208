//! Shared vocabulary for battle commands and events

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::ParseError;

/// Unique battle identifier, handed out by a monotonic generator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BattleId(pub u64);

impl BattleId {
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        let digits = s.strip_prefix("battle-").unwrap_or(s);
        digits.parse().ok().map(BattleId)
    }
}

impl fmt::Display for BattleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "battle-{}", self.0)
    }
}

/// Who the player is up against
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BattleMode {
    OneVsOne,
    OneVsAi,
}

impl BattleMode {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "1v1" | "one_vs_one" | "ONE_VS_ONE" => Some(BattleMode::OneVsOne),
            "ai" | "1vai" | "one_vs_ai" | "ONE_VS_AI" => Some(BattleMode::OneVsAi),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            BattleMode::OneVsOne => "1v1",
            BattleMode::OneVsAi => "ai",
        }
    }
}

/// Battle lifecycle status
///
/// `Completed` and `Cancelled` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BattleStatus {
    Waiting,
    Active,
    Live,
    Completed,
    Cancelled,
}

impl BattleStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(self, BattleStatus::Completed | BattleStatus::Cancelled)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            BattleStatus::Waiting => "WAITING",
            BattleStatus::Active => "ACTIVE",
            BattleStatus::Live => "LIVE",
            BattleStatus::Completed => "COMPLETED",
            BattleStatus::Cancelled => "CANCELLED",
        }
    }
}

impl fmt::Display for BattleStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RoundStatus {
    Upcoming,
    InProgress,
    Completed,
}

/// Outcome of a single round from the player's point of view
///
/// `Draw` is part of the vocabulary but no transition produces it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RoundResult {
    Won,
    Lost,
    Draw,
    Pending,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl Difficulty {
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "easy" => Some(Difficulty::Easy),
            "medium" => Some(Difficulty::Medium),
            "hard" => Some(Difficulty::Hard),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }

    /// Display name ("Easy", "Medium", "Hard")
    pub fn label(&self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// One of the two parties in a battle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Player,
    Opponent,
}

/// Public profile of a participant
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerProfile {
    pub id: String,
    pub name: String,
    pub avatar: String,
    pub level: u32,
    pub league: String,
}

/// A coding challenge as served by the challenge catalog
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Challenge {
    pub title: String,
    pub description: String,
    pub tags: Vec<String>,
    pub example: String,
    pub max_points: u32,
    /// Difficulty the catalog rates this challenge at, if any
    #[serde(default)]
    pub difficulty: Option<Difficulty>,
}

/// Time spent on a round, in whole seconds, written as `m:ss`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
pub struct TimeSpent(pub u32);

impl TimeSpent {
    pub fn from_secs(secs: u32) -> Self {
        TimeSpent(secs)
    }

    pub fn as_secs(&self) -> u32 {
        self.0
    }

    /// Parse `m:ss` (minutes are unbounded, seconds must be below 60)
    pub fn parse(s: &str) -> Option<Self> {
        let (minutes, seconds) = s.trim().split_once(':')?;
        let minutes: u32 = minutes.parse().ok()?;
        if seconds.len() != 2 {
            return None;
        }
        let seconds: u32 = seconds.parse().ok()?;
        if seconds >= 60 {
            return None;
        }
        minutes.checked_mul(60)?.checked_add(seconds).map(TimeSpent)
    }
}

impl fmt::Display for TimeSpent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{:02}", self.0 / 60, self.0 % 60)
    }
}

impl FromStr for TimeSpent {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TimeSpent::parse(s).ok_or_else(|| ParseError::InvalidFormat(format!("invalid time: {}", s)))
    }
}

/// Scores submitted when a round finishes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundReport {
    pub player_score: u32,
    pub opponent_score: u32,
    pub time_spent: TimeSpent,
    /// 0-100, values above 100 are clamped when recorded
    pub efficiency: u8,
}

/// Partial wizard configuration, merged into the draft without validation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ConfigPatch {
    pub total_rounds: Option<u8>,
    pub difficulty: Option<Difficulty>,
    pub time_limit: Option<u32>,
}
