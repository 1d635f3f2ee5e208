use arena_protocol::{BattleId, BattleMode, BattleStatus, Event, RoundResult};
use async_trait::async_trait;

/// Trait for reacting to arena events.
///
/// Implement this trait to observe an arena. All methods have default no-op
/// implementations, so you only need to implement the events you care about.
///
/// # Example
///
/// ```ignore
/// struct Scoreboard {
///     handle: ArenaHandle,
/// }
///
/// #[async_trait]
/// impl Handler for Scoreboard {
///     async fn on_battle_completed(&mut self, battle_id: BattleId) {
///         if let Ok(Some(battle)) = self.handle.battle(battle_id).await {
///             println!("{}", query::summarize(&battle).xp_earned);
///         }
///     }
/// }
/// ```
#[async_trait]
pub trait Handler: Send {
    /// Called for every event before the specific method.
    async fn on_event(&mut self, event: &Event) {
        let _ = event;
    }

    async fn on_battle_created(&mut self, battle_id: BattleId, mode: BattleMode, status: BattleStatus) {
        let _ = (battle_id, mode, status);
    }

    async fn on_battle_activated(&mut self, battle_id: BattleId, opponent: &str) {
        let _ = (battle_id, opponent);
    }

    async fn on_round_started(&mut self, battle_id: BattleId, round: usize) {
        let _ = (battle_id, round);
    }

    async fn on_round_completed(&mut self, battle_id: BattleId, round: usize, result: RoundResult) {
        let _ = (battle_id, round, result);
    }

    async fn on_battle_completed(&mut self, battle_id: BattleId) {
        let _ = battle_id;
    }

    async fn on_battle_cancelled(&mut self, battle_id: BattleId) {
        let _ = battle_id;
    }

    /// Called on each pulse while the watched timer runs.
    async fn on_timer_tick(&mut self, battle_id: BattleId, remaining: u32) {
        let _ = (battle_id, remaining);
    }

    /// Called once when the watched timer reaches zero. The round is not
    /// completed automatically; that is up to the handler.
    async fn on_timer_expired(&mut self, battle_id: BattleId) {
        let _ = battle_id;
    }
}
