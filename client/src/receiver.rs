use anyhow::Result;
use arena_protocol::Event;
use tokio::sync::mpsc;

use crate::handler::Handler;

/// Receives arena events and dispatches them to a handler.
pub struct Receiver {
    incoming: mpsc::UnboundedReceiver<Event>,
}

impl Receiver {
    pub(crate) fn new(incoming: mpsc::UnboundedReceiver<Event>) -> Self {
        Self { incoming }
    }

    /// Run the event loop, dispatching events to the handler.
    ///
    /// This will run until the arena stops.
    pub async fn run<H: Handler>(&mut self, handler: &mut H) -> Result<()> {
        while let Some(event) = self.incoming.recv().await {
            dispatch_event(handler, event).await;
        }
        Ok(())
    }

    /// Wait for the next event
    pub async fn next_event(&mut self) -> Option<Event> {
        self.incoming.recv().await
    }

    /// Take an event if one is queued
    pub fn try_next_event(&mut self) -> Option<Event> {
        self.incoming.try_recv().ok()
    }

    /// Drain everything queued right now
    pub fn drain(&mut self) -> Vec<Event> {
        let mut events = Vec::new();
        while let Ok(event) = self.incoming.try_recv() {
            events.push(event);
        }
        events
    }
}

/// Dispatch a single event to the appropriate handler method
async fn dispatch_event<H: Handler>(handler: &mut H, event: Event) {
    handler.on_event(&event).await;

    match event {
        Event::BattleCreated {
            battle_id,
            mode,
            status,
        } => {
            handler.on_battle_created(battle_id, mode, status).await;
        }
        Event::BattleActivated {
            battle_id,
            opponent,
        } => {
            handler.on_battle_activated(battle_id, &opponent).await;
        }
        Event::RoundStarted { battle_id, round } => {
            handler.on_round_started(battle_id, round).await;
        }
        Event::RoundCompleted {
            battle_id,
            round,
            result,
        } => {
            handler.on_round_completed(battle_id, round, result).await;
        }
        Event::BattleCompleted { battle_id } => {
            handler.on_battle_completed(battle_id).await;
        }
        Event::BattleCancelled { battle_id } => {
            handler.on_battle_cancelled(battle_id).await;
        }
        Event::TimerTick {
            battle_id,
            remaining,
        } => {
            handler.on_timer_tick(battle_id, remaining).await;
        }
        Event::TimerExpired { battle_id } => {
            handler.on_timer_expired(battle_id).await;
        }
    }
}
