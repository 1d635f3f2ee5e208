//! Events an arena emits after applying a command

use serde::{Deserialize, Serialize};

use crate::types::{BattleId, BattleMode, BattleStatus, RoundResult};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Event {
    BattleCreated {
        battle_id: BattleId,
        mode: BattleMode,
        status: BattleStatus,
    },
    BattleActivated {
        battle_id: BattleId,
        opponent: String,
    },
    RoundStarted {
        battle_id: BattleId,
        round: usize,
    },
    RoundCompleted {
        battle_id: BattleId,
        round: usize,
        result: RoundResult,
    },
    BattleCompleted {
        battle_id: BattleId,
    },
    BattleCancelled {
        battle_id: BattleId,
    },
    TimerTick {
        battle_id: BattleId,
        remaining: u32,
    },
    TimerExpired {
        battle_id: BattleId,
    },
}

impl Event {
    pub fn battle_id(&self) -> BattleId {
        match self {
            Event::BattleCreated { battle_id, .. }
            | Event::BattleActivated { battle_id, .. }
            | Event::RoundStarted { battle_id, .. }
            | Event::RoundCompleted { battle_id, .. }
            | Event::BattleCompleted { battle_id }
            | Event::BattleCancelled { battle_id }
            | Event::TimerTick { battle_id, .. }
            | Event::TimerExpired { battle_id } => *battle_id,
        }
    }

    /// Render as a single JSON line
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| format!("{:?}", self))
    }
}
