//! The coordinator task: sole owner of battles, wizard and timer

use arena_battle::{
    Battle, BattleMachine, CreateBattleWizard, Outcome, Tick, TimerService, TimerSnapshot,
    WizardDraft, WizardError, WizardServices,
};
use arena_protocol::{BattleId, Command, Event};
use tokio::sync::{mpsc, oneshot};
use tokio::time::{Instant, Interval, MissedTickBehavior};

use crate::config::ArenaConfig;

/// What a dispatched command did
#[derive(Debug, Clone, PartialEq)]
pub enum Dispatch {
    /// Battle transition
    Battle(Outcome),
    /// Wizard step, with the draft as it stands afterwards
    Wizard {
        draft: WizardDraft,
        result: Result<Option<Event>, WizardError>,
    },
    /// Watch, unwatch or pulse
    Timer {
        snapshot: TimerSnapshot,
        events: Vec<Event>,
    },
}

impl Dispatch {
    pub fn events(&self) -> Vec<Event> {
        match self {
            Dispatch::Battle(outcome) => outcome.events().to_vec(),
            Dispatch::Wizard { result, .. } => {
                result.as_ref().ok().cloned().flatten().into_iter().collect()
            }
            Dispatch::Timer { events, .. } => events.clone(),
        }
    }
}

pub(crate) enum Request {
    Command {
        command: Command,
        reply: oneshot::Sender<Dispatch>,
    },
    Battles {
        reply: oneshot::Sender<Vec<Battle>>,
    },
    Battle {
        id: BattleId,
        reply: oneshot::Sender<Option<Battle>>,
    },
    Wizard {
        reply: oneshot::Sender<WizardDraft>,
    },
    Timer {
        reply: oneshot::Sender<TimerSnapshot>,
    },
    Shutdown,
}

pub(crate) struct Arena {
    config: ArenaConfig,
    machine: BattleMachine,
    wizard: CreateBattleWizard,
    timer: TimerService,
    /// Bumped whenever the countdown restarts, so the pulse clock can realign
    timer_epoch: u64,
    events: mpsc::UnboundedSender<Event>,
    events_closed: bool,
}

impl Arena {
    pub(crate) fn new(
        config: ArenaConfig,
        services: WizardServices,
        events: mpsc::UnboundedSender<Event>,
    ) -> Self {
        Self {
            config,
            machine: BattleMachine::new(),
            wizard: CreateBattleWizard::new(services),
            timer: TimerService::new(),
            timer_epoch: 0,
            events,
            events_closed: false,
        }
    }

    /// Serve requests until shutdown or until every handle is dropped
    pub(crate) async fn run(mut self, mut requests: mpsc::Receiver<Request>) {
        let mut pulse = self.config.pulse_interval().map(|period| {
            let mut interval = tokio::time::interval_at(Instant::now() + period, period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            interval
        });
        let mut seen_epoch = self.timer_epoch;

        tracing::info!(pulse = ?self.config.pulse_interval(), "Arena started");

        loop {
            tokio::select! {
                request = requests.recv() => match request {
                    Some(Request::Shutdown) | None => break,
                    Some(request) => self.serve(request),
                },
                _ = next_pulse(&mut pulse), if self.timer.is_running() => {
                    self.pulse();
                }
            }

            if seen_epoch != self.timer_epoch {
                seen_epoch = self.timer_epoch;
                if let Some(interval) = pulse.as_mut() {
                    interval.reset();
                }
            }
        }

        self.timer.stop();
        tracing::info!(battles = self.machine.len(), "Arena stopped");
    }

    fn serve(&mut self, request: Request) {
        match request {
            Request::Command { command, reply } => {
                let dispatch = self.dispatch(command);
                let _ = reply.send(dispatch);
            }
            Request::Battles { reply } => {
                let _ = reply.send(self.machine.battles().cloned().collect());
            }
            Request::Battle { id, reply } => {
                let _ = reply.send(self.machine.battle(id).cloned());
            }
            Request::Wizard { reply } => {
                let _ = reply.send(*self.wizard.draft());
            }
            Request::Timer { reply } => {
                let _ = reply.send(self.timer.snapshot());
            }
            Request::Shutdown => {}
        }
    }

    pub(crate) fn dispatch(&mut self, command: Command) -> Dispatch {
        let dispatch = match &command {
            Command::Wizard { action } => {
                let result = self.wizard.apply(action, &mut self.machine);
                Dispatch::Wizard {
                    draft: *self.wizard.draft(),
                    result,
                }
            }
            Command::Watch { battle_id } => {
                self.watch(*battle_id);
                Dispatch::Timer {
                    snapshot: self.timer.snapshot(),
                    events: Vec::new(),
                }
            }
            Command::Unwatch => {
                self.timer.stop();
                Dispatch::Timer {
                    snapshot: self.timer.snapshot(),
                    events: Vec::new(),
                }
            }
            Command::Pulse => {
                let events = self.pulse();
                Dispatch::Timer {
                    snapshot: self.timer.snapshot(),
                    events,
                }
            }
            _ => {
                let outcome = self.machine.apply(&command);
                self.follow_watched(&outcome);
                Dispatch::Battle(outcome)
            }
        };

        for event in dispatch.events() {
            if !matches!(event, Event::TimerTick { .. } | Event::TimerExpired { .. }) {
                self.publish(event);
            }
        }
        dispatch
    }

    /// Point the timer at a battle, stopping any previous countdown first
    fn watch(&mut self, battle_id: BattleId) {
        let Some(battle) = self.machine.battle(battle_id) else {
            tracing::debug!(battle_id = %battle_id, "Not watching unknown battle");
            return;
        };
        if battle.is_terminal() {
            tracing::debug!(battle_id = %battle_id, status = %battle.status(), "Not watching finished battle");
            return;
        }

        let seconds = battle.time_limit();
        self.timer.watch(battle_id, seconds);
        self.timer_epoch += 1;
    }

    /// Keep the countdown in step with the watched battle
    ///
    /// A new round restarts the clock; a finished battle stops it.
    fn follow_watched(&mut self, outcome: &Outcome) {
        let Some(watched) = self.timer.battle_id() else {
            return;
        };

        for event in outcome.events() {
            if event.battle_id() != watched {
                continue;
            }
            match event {
                Event::RoundStarted { .. } => self.watch(watched),
                Event::BattleCompleted { .. } | Event::BattleCancelled { .. } => {
                    self.timer.stop();
                    return;
                }
                _ => {}
            }
        }
    }

    fn pulse(&mut self) -> Vec<Event> {
        let battle_id = self.timer.battle_id();
        let event = match (self.timer.tick(), battle_id) {
            (Tick::Running { remaining }, Some(battle_id)) if self.config.announce_ticks => {
                Some(Event::TimerTick {
                    battle_id,
                    remaining,
                })
            }
            (Tick::Expired, Some(battle_id)) => {
                tracing::debug!(battle_id = %battle_id, "Round timer expired");
                Some(Event::TimerExpired { battle_id })
            }
            _ => None,
        };

        match event {
            Some(event) => {
                self.publish(event.clone());
                vec![event]
            }
            None => Vec::new(),
        }
    }

    fn publish(&mut self, event: Event) {
        if self.events_closed {
            return;
        }
        if self.events.send(event).is_err() {
            tracing::warn!("Event receiver dropped, events will no longer be delivered");
            self.events_closed = true;
        }
    }
}

async fn next_pulse(pulse: &mut Option<Interval>) {
    match pulse {
        Some(interval) => {
            interval.tick().await;
        }
        None => std::future::pending::<()>().await,
    }
}
