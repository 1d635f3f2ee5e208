use anyhow::{Result, anyhow, bail};
use arena_battle::{Battle, Outcome, TimerSnapshot, WizardDraft};
use arena_protocol::{
    BattleId, BattleMode, Command, ConfigPatch, Event, PlayerProfile, RoundReport, WizardCommand,
    parse_command,
};
use tokio::sync::{mpsc, oneshot};

use crate::arena::{Dispatch, Request};

/// Cloneable handle to a running arena
///
/// Every call is a message to the arena task, so operations on the same
/// arena are applied one at a time in arrival order. Battles come back as
/// owned snapshots.
#[derive(Clone)]
pub struct ArenaHandle {
    tx: mpsc::Sender<Request>,
}

impl ArenaHandle {
    pub(crate) fn new(tx: mpsc::Sender<Request>) -> Self {
        Self { tx }
    }

    async fn request<T>(&self, make: impl FnOnce(oneshot::Sender<T>) -> Request) -> Result<T> {
        let (reply, response) = oneshot::channel();
        self.tx
            .send(make(reply))
            .await
            .map_err(|_| anyhow!("Arena stopped"))?;
        response.await.map_err(|_| anyhow!("Arena stopped"))
    }

    /// Send any command and get back what it did
    pub async fn send(&self, command: Command) -> Result<Dispatch> {
        self.request(|reply| Request::Command { command, reply })
            .await
    }

    /// Parse a wire-format line and send it
    pub async fn send_line(&self, line: &str) -> Result<Dispatch> {
        let command = parse_command(line)?;
        self.send(command).await
    }

    async fn battle_command(&self, command: Command) -> Result<Outcome> {
        match self.send(command).await? {
            Dispatch::Battle(outcome) => Ok(outcome),
            other => Err(anyhow!("Unexpected reply to battle command: {:?}", other)),
        }
    }

    pub async fn activate(&self, battle_id: BattleId, opponent: PlayerProfile) -> Result<Outcome> {
        self.battle_command(Command::Activate {
            battle_id,
            opponent,
        })
        .await
    }

    pub async fn start_round(&self, battle_id: BattleId, round: usize) -> Result<Outcome> {
        self.battle_command(Command::StartRound { battle_id, round })
            .await
    }

    pub async fn complete_round(
        &self,
        battle_id: BattleId,
        round: usize,
        report: RoundReport,
    ) -> Result<Outcome> {
        self.battle_command(Command::CompleteRound {
            battle_id,
            round,
            report,
        })
        .await
    }

    pub async fn complete_battle(&self, battle_id: BattleId) -> Result<Outcome> {
        self.battle_command(Command::CompleteBattle { battle_id })
            .await
    }

    pub async fn cancel(&self, battle_id: BattleId) -> Result<Outcome> {
        self.battle_command(Command::Cancel { battle_id }).await
    }

    async fn wizard_command(&self, action: WizardCommand) -> Result<(WizardDraft, Option<Event>)> {
        match self.send(Command::Wizard { action }).await? {
            Dispatch::Wizard { draft, result } => Ok((draft, result?)),
            other => Err(anyhow!("Unexpected reply to wizard command: {:?}", other)),
        }
    }

    pub async fn open_wizard(&self) -> Result<WizardDraft> {
        Ok(self.wizard_command(WizardCommand::Open).await?.0)
    }

    pub async fn close_wizard(&self) -> Result<WizardDraft> {
        Ok(self.wizard_command(WizardCommand::Close).await?.0)
    }

    /// Fails when AI mode is picked while AI battles are disabled
    pub async fn set_mode(&self, mode: BattleMode) -> Result<WizardDraft> {
        Ok(self.wizard_command(WizardCommand::SetMode { mode }).await?.0)
    }

    pub async fn set_config(&self, patch: ConfigPatch) -> Result<WizardDraft> {
        Ok(self.wizard_command(WizardCommand::SetConfig { patch }).await?.0)
    }

    pub async fn next_step(&self) -> Result<WizardDraft> {
        Ok(self.wizard_command(WizardCommand::Next).await?.0)
    }

    pub async fn previous_step(&self) -> Result<WizardDraft> {
        Ok(self.wizard_command(WizardCommand::Back).await?.0)
    }

    /// Materialize the draft; the error carries the `WizardError` on rejection
    pub async fn confirm(&self) -> Result<BattleId> {
        match self.wizard_command(WizardCommand::Confirm).await?.1 {
            Some(event) => Ok(event.battle_id()),
            None => Err(anyhow!("Wizard confirm created no battle")),
        }
    }

    /// Watch a battle's round timer, replacing whatever was watched before
    pub async fn watch(&self, battle_id: BattleId) -> Result<TimerSnapshot> {
        let snapshot = match self.send(Command::Watch { battle_id }).await? {
            Dispatch::Timer { snapshot, .. } => snapshot,
            other => bail!("Unexpected reply to watch: {:?}", other),
        };
        if snapshot.battle_id != Some(battle_id) {
            bail!("Cannot watch {}: unknown or finished battle", battle_id);
        }
        Ok(snapshot)
    }

    pub async fn unwatch(&self) -> Result<()> {
        self.send(Command::Unwatch).await.map(|_| ())
    }

    /// Feed one external one-second pulse to the timer
    pub async fn pulse(&self) -> Result<Vec<Event>> {
        Ok(self.send(Command::Pulse).await?.events())
    }

    /// All battles, newest first
    pub async fn battles(&self) -> Result<Vec<Battle>> {
        self.request(|reply| Request::Battles { reply }).await
    }

    pub async fn battle(&self, id: BattleId) -> Result<Option<Battle>> {
        self.request(|reply| Request::Battle { id, reply }).await
    }

    pub async fn wizard(&self) -> Result<WizardDraft> {
        self.request(|reply| Request::Wizard { reply }).await
    }

    pub async fn timer(&self) -> Result<TimerSnapshot> {
        self.request(|reply| Request::Timer { reply }).await
    }

    /// Stop the arena task; later calls fail with "Arena stopped"
    pub async fn shutdown(&self) -> Result<()> {
        self.tx
            .send(Request::Shutdown)
            .await
            .map_err(|_| anyhow!("Arena stopped"))
    }

    pub fn is_running(&self) -> bool {
        !self.tx.is_closed()
    }
}
