use thiserror::Error;

pub mod command;
pub mod event;
pub mod types;

pub use command::{Command, WizardCommand, parse_command};
pub use event::Event;
pub use types::{
    BattleId, BattleMode, BattleStatus, Challenge, ConfigPatch, Difficulty, PlayerProfile,
    RoundReport, RoundResult, RoundStatus, Side, TimeSpent,
};

#[derive(Error, Debug)]
pub enum ParseError {
    #[error("Invalid message format: {0}")]
    InvalidFormat(String),

    #[error("Missing required field: {0}")]
    MissingField(String),

    #[error("Unknown command: {0}")]
    UnknownCommand(String),

    #[error("Empty message")]
    EmptyMessage,
}
