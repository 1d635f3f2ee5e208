//! BattleMachine - owns the battle collection and its read model

use std::collections::VecDeque;

use arena_protocol::{BattleId, BattleStatus, Event, PlayerProfile};

use crate::factory::{BattleFactory, BattleParams, ConfigError};
use crate::types::Battle;

/// The single owner of every battle
///
/// Battles are kept newest first. Consumers only ever see `&Battle`; all
/// changes go through the transition methods, which swap in a whole new
/// battle value per transition.
#[derive(Debug, Clone, Default)]
pub struct BattleMachine {
    pub(crate) battles: VecDeque<Battle>,
    factory: BattleFactory,
}

impl BattleMachine {
    pub fn new() -> Self {
        Self {
            battles: VecDeque::new(),
            factory: BattleFactory::new(),
        }
    }

    /// Build a battle with the next id without inserting it
    pub fn create_battle(
        &mut self,
        params: BattleParams,
        player: PlayerProfile,
    ) -> Result<Battle, ConfigError> {
        self.factory.create_battle(params, player)
    }

    /// Insert a battle at the head of the collection
    pub fn insert(&mut self, battle: Battle) -> Event {
        let event = Event::BattleCreated {
            battle_id: battle.id,
            mode: battle.mode,
            status: battle.status,
        };
        tracing::debug!(battle_id = %battle.id, status = %battle.status, "Battle inserted");
        self.battles.push_front(battle);
        event
    }

    /// All battles, newest first
    pub fn battles(&self) -> impl Iterator<Item = &Battle> {
        self.battles.iter()
    }

    /// Look up a battle by id
    pub fn battle(&self, id: BattleId) -> Option<&Battle> {
        self.battles.iter().find(|b| b.id == id)
    }

    /// Battles currently in the given status, newest first
    pub fn with_status(&self, status: BattleStatus) -> impl Iterator<Item = &Battle> {
        self.battles.iter().filter(move |b| b.status == status)
    }

    pub fn len(&self) -> usize {
        self.battles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.battles.is_empty()
    }

    pub(crate) fn position(&self, id: BattleId) -> Option<usize> {
        self.battles.iter().position(|b| b.id == id)
    }
}
