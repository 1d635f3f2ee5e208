//! What a transition did

use arena_protocol::{BattleId, BattleStatus, Event};
use thiserror::Error;

/// Why a transition left the battle untouched
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Ignored {
    #[error("unknown battle {0}")]
    UnknownBattle(BattleId),

    #[error("cannot {op} a battle that is {status}")]
    InvalidStatus {
        op: &'static str,
        status: BattleStatus,
    },

    #[error("round {round} is out of range for a {total}-round battle")]
    RoundOutOfRange { round: usize, total: u8 },

    #[error("round {0} is already completed")]
    RoundAlreadyCompleted(usize),

    #[error("round {round} is not the current round ({current:?})")]
    NotCurrentRound {
        round: usize,
        current: Option<usize>,
    },

    #[error("not a battle command")]
    NotABattleCommand,
}

/// Result of a transition request
///
/// Invalid requests are no-ops rather than errors, so out-of-order or
/// duplicate events can be fed in safely.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Applied(Vec<Event>),
    Ignored(Ignored),
}

impl Outcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, Outcome::Applied(_))
    }

    pub fn is_ignored(&self) -> bool {
        matches!(self, Outcome::Ignored(_))
    }

    pub fn events(&self) -> &[Event] {
        match self {
            Outcome::Applied(events) => events,
            Outcome::Ignored(_) => &[],
        }
    }

    pub fn into_events(self) -> Vec<Event> {
        match self {
            Outcome::Applied(events) => events,
            Outcome::Ignored(_) => Vec::new(),
        }
    }

    pub fn ignored(&self) -> Option<&Ignored> {
        match self {
            Outcome::Applied(_) => None,
            Outcome::Ignored(reason) => Some(reason),
        }
    }
}

impl From<Ignored> for Outcome {
    fn from(reason: Ignored) -> Self {
        Outcome::Ignored(reason)
    }
}
