//! Battle lifecycle for coding battles.
//!
//! Two parties play a fixed number of timed rounds; each round is scored on
//! its own and the winner falls out of the per-round results.
//!
//! # Overview
//!
//! `arena-battle` sits between `arena-protocol` (shared vocabulary) and the
//! coordinator that serializes access to it:
//!
//! ```text
//! arena-protocol (ids, enums, commands, events)
//!        │
//!        ▼
//! arena-battle (factory + state machine + selectors) ← THIS CRATE
//!        │
//!        └─> arena-client (single-writer coordinator, timer pulses)
//! ```
//!
//! # Main Types
//!
//! - [`BattleFactory`] - builds battles and rounds with defaults and unique ids
//! - [`BattleMachine`] - owns the battles and applies lifecycle transitions
//! - [`query`] - pure selectors (scores, winner, XP, rank change, averages)
//! - [`TimerService`] - countdown for the battle in view
//! - [`CreateBattleWizard`] - three-step draft that materializes new battles
//!
//! # Example Usage
//!
//! ```ignore
//! use arena_battle::{BattleMachine, CreateBattleWizard, WizardServices, query};
//! use arena_protocol::{BattleMode, RoundReport, Side, TimeSpent};
//!
//! let mut machine = BattleMachine::new();
//! let mut wizard = CreateBattleWizard::new(WizardServices::in_memory(me));
//!
//! wizard.open();
//! wizard.set_mode(BattleMode::OneVsAi);
//! let created = wizard.confirm(&mut machine)?;
//!
//! let id = created.battle_id();
//! machine.complete_round(id, 0, RoundReport {
//!     player_score: 500,
//!     opponent_score: 300,
//!     time_spent: TimeSpent(240),
//!     efficiency: 90,
//! });
//!
//! let battle = machine.battle(id).unwrap();
//! println!("{} points so far", query::total_score(battle, Side::Player));
//! ```

pub mod factory;
pub mod machine;
pub mod query;
pub mod timer;
pub mod types;
pub mod wizard;

#[cfg(test)]
mod test_support;

pub use factory::{BattleFactory, BattleParams, ConfigError, create_round};
pub use machine::{BattleMachine, Ignored, Outcome};
pub use query::{BattleSummary, Winner};
pub use timer::{Tick, TimerService, TimerSnapshot, format_clock};
pub use types::{Battle, Round};
pub use wizard::{
    ChallengeCatalog, CreateBattleWizard, IdentityProvider, SettingsProvider, StaticCatalog,
    StaticIdentity, StaticSettings, WizardDraft, WizardError, WizardServices,
};

// Re-export commonly used protocol types
pub use arena_protocol::{
    BattleId, BattleMode, BattleStatus, Challenge, Difficulty, PlayerProfile, RoundReport,
    RoundResult, RoundStatus, Side, TimeSpent,
};
