mod arena;
mod config;
mod handle;
mod handler;
mod receiver;

use arena_battle::WizardServices;
use tokio::sync::mpsc;

pub use arena::Dispatch;
pub use config::ArenaConfig;
pub use handle::ArenaHandle;
pub use handler::Handler;
pub use receiver::Receiver;

pub use arena_battle::{
    Battle, BattleSummary, Ignored, Outcome, Round, Tick, TimerSnapshot, WizardDraft, WizardError,
    query,
};
pub use arena_protocol::{
    BattleId, BattleMode, BattleStatus, Command, ConfigPatch, Difficulty, Event, PlayerProfile,
    RoundReport, RoundResult, RoundStatus, Side, TimeSpent, WizardCommand, parse_command,
};

/// Entry point for running an arena
pub struct ArenaClient;

impl ArenaClient {
    /// Spawn the arena task on the current tokio runtime
    ///
    /// The task owns every battle, the wizard draft and the round timer. It
    /// stops on [`ArenaHandle::shutdown`] or once every handle is dropped,
    /// which also closes the [`Receiver`].
    pub fn spawn(config: ArenaConfig, services: WizardServices) -> (ArenaHandle, Receiver) {
        let (request_tx, request_rx) = mpsc::channel(config.command_buffer.max(1));
        let (event_tx, event_rx) = mpsc::unbounded_channel();

        let arena = arena::Arena::new(config, services, event_tx);
        tokio::spawn(arena.run(request_rx));

        (ArenaHandle::new(request_tx), Receiver::new(event_rx))
    }
}
