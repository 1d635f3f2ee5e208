//! Create-battle wizard
//!
//! Collects an unvalidated draft over three steps and, on confirm, builds the
//! battle through the factory and inserts it into a [`BattleMachine`].

mod opponent;
mod services;

pub use opponent::{ai_opponent, league_for_level};
pub use services::{
    ChallengeCatalog, IdentityProvider, SettingsProvider, StaticCatalog, StaticIdentity,
    StaticSettings, WizardServices,
};

use arena_protocol::{
    BattleMode, BattleStatus, ConfigPatch, Difficulty, Event, RoundStatus, WizardCommand,
};
use thiserror::Error;

use crate::factory::{BattleParams, ConfigError, DEFAULT_TIME_LIMIT, create_round, validate_rounds};
use crate::machine::BattleMachine;
use crate::types::Battle;

pub const FIRST_STEP: u8 = 1;
pub const LAST_STEP: u8 = 3;
pub const DEFAULT_ROUNDS: u8 = 5;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WizardError {
    #[error("wizard is not open")]
    NotOpen,

    #[error("no battle mode selected")]
    ModeMissing,

    #[error("AI battles are disabled")]
    AiBattlesDisabled,

    #[error(transparent)]
    InvalidConfig(#[from] ConfigError),
}

/// Transient wizard state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WizardDraft {
    pub is_open: bool,
    /// 1..=3
    pub step: u8,
    pub mode: Option<BattleMode>,
    pub total_rounds: u8,
    pub difficulty: Difficulty,
    /// Seconds per round
    pub time_limit: u32,
}

impl WizardDraft {
    fn reset(is_open: bool) -> Self {
        Self {
            is_open,
            step: FIRST_STEP,
            mode: None,
            total_rounds: DEFAULT_ROUNDS,
            difficulty: Difficulty::Medium,
            time_limit: DEFAULT_TIME_LIMIT,
        }
    }
}

impl Default for WizardDraft {
    fn default() -> Self {
        Self::reset(false)
    }
}

#[derive(Debug)]
pub struct CreateBattleWizard {
    draft: WizardDraft,
    services: WizardServices,
}

impl CreateBattleWizard {
    pub fn new(services: WizardServices) -> Self {
        Self {
            draft: WizardDraft::default(),
            services,
        }
    }

    pub fn draft(&self) -> &WizardDraft {
        &self.draft
    }

    pub fn services(&self) -> &WizardServices {
        &self.services
    }

    pub fn open(&mut self) {
        self.draft = WizardDraft::reset(true);
    }

    pub fn close(&mut self) {
        self.draft = WizardDraft::reset(false);
    }

    /// Select a mode
    ///
    /// Returns false and leaves the draft alone when AI mode is picked while
    /// AI battles are disabled.
    pub fn set_mode(&mut self, mode: BattleMode) -> bool {
        if mode == BattleMode::OneVsAi && !self.services.settings.ai_battles_enabled() {
            tracing::debug!("AI mode selected while AI battles are disabled");
            return false;
        }
        self.draft.mode = Some(mode);
        true
    }

    /// Merge a partial configuration; validation waits for `confirm`
    pub fn set_config(&mut self, patch: ConfigPatch) {
        if let Some(total_rounds) = patch.total_rounds {
            self.draft.total_rounds = total_rounds;
        }
        if let Some(difficulty) = patch.difficulty {
            self.draft.difficulty = difficulty;
        }
        if let Some(time_limit) = patch.time_limit {
            self.draft.time_limit = time_limit;
        }
    }

    pub fn next(&mut self) {
        self.draft.step = (self.draft.step + 1).min(LAST_STEP);
    }

    pub fn back(&mut self) {
        self.draft.step = self.draft.step.saturating_sub(1).max(FIRST_STEP);
    }

    /// Build the battle, insert it at the head of `machine` and close
    ///
    /// A rejected draft is left as it was so it can be corrected; nothing is
    /// created and no id is consumed.
    pub fn confirm(&mut self, machine: &mut BattleMachine) -> Result<Event, WizardError> {
        let draft = self.draft;
        if let Err(err) = self.validate(&draft) {
            tracing::debug!(error = %err, "Wizard confirm rejected");
            return Err(err);
        }
        let Some(mode) = draft.mode else {
            return Err(WizardError::ModeMissing);
        };

        let player = self.services.identity.current_player();
        let params = BattleParams::new(mode, draft.total_rounds)
            .with_difficulty(draft.difficulty)
            .with_time_limit(draft.time_limit);
        let mut battle = machine.create_battle(params, player)?;

        self.assign_challenges(&mut battle);
        if mode == BattleMode::OneVsAi {
            start_against_ai(&mut battle);
        }

        tracing::info!(
            battle_id = %battle.id(),
            mode = mode.as_str(),
            rounds = battle.total_rounds(),
            status = %battle.status(),
            "Battle created"
        );
        let event = machine.insert(battle);
        self.close();
        Ok(event)
    }

    /// Dispatch a wizard command
    pub fn apply(
        &mut self,
        command: &WizardCommand,
        machine: &mut BattleMachine,
    ) -> Result<Option<Event>, WizardError> {
        match command {
            WizardCommand::Open => self.open(),
            WizardCommand::Close => self.close(),
            WizardCommand::SetMode { mode } => {
                if !self.set_mode(*mode) {
                    return Err(WizardError::AiBattlesDisabled);
                }
            }
            WizardCommand::SetConfig { patch } => self.set_config(*patch),
            WizardCommand::Next => self.next(),
            WizardCommand::Back => self.back(),
            WizardCommand::Confirm => return self.confirm(machine).map(Some),
        }
        Ok(None)
    }

    fn validate(&self, draft: &WizardDraft) -> Result<(), WizardError> {
        if !draft.is_open {
            return Err(WizardError::NotOpen);
        }
        let mode = draft.mode.ok_or(WizardError::ModeMissing)?;
        if mode == BattleMode::OneVsAi && !self.services.settings.ai_battles_enabled() {
            return Err(WizardError::AiBattlesDisabled);
        }
        validate_rounds(draft.total_rounds)?;
        Ok(())
    }

    /// Round `i` gets pool entry `i % pool size`; small pools repeat
    fn assign_challenges(&self, battle: &mut Battle) {
        let catalog = &self.services.catalog;
        if catalog.is_empty() {
            return;
        }
        let pool_len = catalog.len();
        for round in battle.rounds.iter_mut() {
            let index = round.index;
            *round = create_round(index, catalog.challenge(index % pool_len));
        }
    }
}

/// AI battles skip WAITING: opponent is synthesized and round 0 opens at once
fn start_against_ai(battle: &mut Battle) {
    battle.opponent = Some(ai_opponent(&battle.player, battle.difficulty));
    battle.status = BattleStatus::Active;
    battle.current_round = Some(0);
    if let Some(first) = battle.rounds.first_mut() {
        first.status = RoundStatus::InProgress;
    }
}
