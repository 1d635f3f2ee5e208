//! Transition operations for BattleMachine

use arena_protocol::{
    BattleId, BattleStatus, Command, Event, PlayerProfile, RoundReport, RoundStatus,
};
use chrono::Utc;

use super::outcome::{Ignored, Outcome};
use super::store::BattleMachine;
use crate::types::Battle;

impl BattleMachine {
    /// Apply a battle command
    ///
    /// Wizard and timer commands are not battle transitions and are ignored.
    pub fn apply(&mut self, command: &Command) -> Outcome {
        match command {
            Command::Activate {
                battle_id,
                opponent,
            } => self.activate(*battle_id, opponent.clone()),
            Command::StartRound { battle_id, round } => self.start_round(*battle_id, *round),
            Command::CompleteRound {
                battle_id,
                round,
                report,
            } => self.complete_round(*battle_id, *round, *report),
            Command::CompleteBattle { battle_id } => self.complete_battle(*battle_id),
            Command::Cancel { battle_id } => self.cancel(*battle_id),
            Command::Wizard { .. } | Command::Watch { .. } | Command::Unwatch | Command::Pulse => {
                Outcome::Ignored(Ignored::NotABattleCommand)
            }
        }
    }

    /// WAITING -> ACTIVE: assign the opponent and open round 0
    pub fn activate(&mut self, id: BattleId, opponent: PlayerProfile) -> Outcome {
        self.transition(id, "activate", |battle| {
            require_status(battle, "activate", &[BattleStatus::Waiting])?;

            let name = opponent.name.clone();
            battle.opponent = Some(opponent);
            battle.status = BattleStatus::Active;
            battle.current_round = Some(0);
            if let Some(first) = battle.rounds.first_mut() {
                first.status = RoundStatus::InProgress;
            }

            Ok(vec![Event::BattleActivated {
                battle_id: battle.id,
                opponent: name,
            }])
        })
    }

    /// ACTIVE/LIVE -> LIVE with `round` in progress
    pub fn start_round(&mut self, id: BattleId, round: usize) -> Outcome {
        self.transition(id, "start a round of", |battle| {
            require_status(
                battle,
                "start a round of",
                &[BattleStatus::Active, BattleStatus::Live],
            )?;
            require_round(battle, round)?;

            battle.park_in_progress();
            battle.rounds[round].status = RoundStatus::InProgress;
            battle.current_round = Some(round);
            battle.status = BattleStatus::Live;

            Ok(vec![Event::RoundStarted {
                battle_id: battle.id,
                round,
            }])
        })
    }

    /// Record the current round and move on
    ///
    /// Opens the next playable round and stays LIVE, or completes the battle
    /// when no round after this one is left. Both happen in one step.
    pub fn complete_round(&mut self, id: BattleId, round: usize, report: RoundReport) -> Outcome {
        self.transition(id, "complete a round of", |battle| {
            require_status(
                battle,
                "complete a round of",
                &[BattleStatus::Active, BattleStatus::Live],
            )?;
            require_round(battle, round)?;
            if battle.current_round != Some(round) {
                return Err(Ignored::NotCurrentRound {
                    round,
                    current: battle.current_round,
                });
            }

            battle.rounds[round].record(&report);
            let result = battle.rounds[round].result;
            let mut events = vec![Event::RoundCompleted {
                battle_id: battle.id,
                round,
                result,
            }];

            let next = (round + 1..battle.rounds.len()).find(|&idx| !battle.rounds[idx].is_completed());
            match next {
                Some(next) => {
                    battle.rounds[next].status = RoundStatus::InProgress;
                    battle.current_round = Some(next);
                    battle.status = BattleStatus::Live;
                    events.push(Event::RoundStarted {
                        battle_id: battle.id,
                        round: next,
                    });
                }
                None => {
                    battle.status = BattleStatus::Completed;
                    battle.completed_at = Some(Utc::now());
                    events.push(Event::BattleCompleted {
                        battle_id: battle.id,
                    });
                }
            }

            Ok(events)
        })
    }

    /// Force completion without finishing the remaining rounds
    pub fn complete_battle(&mut self, id: BattleId) -> Outcome {
        self.transition(id, "complete", |battle| {
            require_status(battle, "complete", &[BattleStatus::Active, BattleStatus::Live])?;

            battle.park_in_progress();
            battle.status = BattleStatus::Completed;
            battle.completed_at = Some(Utc::now());

            Ok(vec![Event::BattleCompleted {
                battle_id: battle.id,
            }])
        })
    }

    /// Cancel from any non-terminal status
    pub fn cancel(&mut self, id: BattleId) -> Outcome {
        self.transition(id, "cancel", |battle| {
            battle.park_in_progress();
            battle.status = BattleStatus::Cancelled;

            Ok(vec![Event::BattleCancelled {
                battle_id: battle.id,
            }])
        })
    }

    /// Run `step` against a copy of the battle and swap it in on success
    ///
    /// Terminal battles are frozen and never reach `step`.
    fn transition<F>(&mut self, id: BattleId, op: &'static str, step: F) -> Outcome
    where
        F: FnOnce(&mut Battle) -> Result<Vec<Event>, Ignored>,
    {
        let Some(pos) = self.position(id) else {
            tracing::debug!(battle_id = %id, op, "Ignoring transition for unknown battle");
            return Outcome::Ignored(Ignored::UnknownBattle(id));
        };

        let current = &self.battles[pos];
        if current.status.is_terminal() {
            tracing::debug!(battle_id = %id, op, status = %current.status, "Ignoring transition on finished battle");
            return Outcome::Ignored(Ignored::InvalidStatus {
                op,
                status: current.status,
            });
        }

        let mut next = current.clone();
        match step(&mut next) {
            Ok(events) => {
                tracing::debug!(
                    battle_id = %id,
                    op,
                    status = %next.status,
                    round = ?next.current_round,
                    "Transition applied"
                );
                self.battles[pos] = next;
                Outcome::Applied(events)
            }
            Err(reason) => {
                tracing::debug!(battle_id = %id, op, reason = %reason, "Transition ignored");
                Outcome::Ignored(reason)
            }
        }
    }
}

fn require_status(battle: &Battle, op: &'static str, allowed: &[BattleStatus]) -> Result<(), Ignored> {
    if allowed.contains(&battle.status) {
        Ok(())
    } else {
        Err(Ignored::InvalidStatus {
            op,
            status: battle.status,
        })
    }
}

fn require_round(battle: &Battle, round: usize) -> Result<(), Ignored> {
    match battle.rounds.get(round) {
        None => Err(Ignored::RoundOutOfRange {
            round,
            total: battle.total_rounds,
        }),
        Some(r) if r.is_completed() => Err(Ignored::RoundAlreadyCompleted(round)),
        Some(_) => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::factory::BattleParams;
    use crate::query;
    use crate::test_support::{opponent, player, report};
    use arena_protocol::{BattleMode, RoundResult, Side, WizardCommand};

    fn waiting_battle(machine: &mut BattleMachine, rounds: u8) -> BattleId {
        let battle = machine
            .create_battle(BattleParams::new(BattleMode::OneVsOne, rounds), player())
            .unwrap();
        let id = battle.id();
        machine.insert(battle);
        id
    }

    fn active_battle(machine: &mut BattleMachine, rounds: u8) -> BattleId {
        let id = waiting_battle(machine, rounds);
        assert!(machine.activate(id, opponent()).is_applied());
        id
    }

    fn assert_single_in_progress(battle: &Battle) {
        assert!(battle.in_progress_rounds().count() <= 1);
        assert_eq!(battle.rounds().len(), battle.total_rounds() as usize);
    }

    #[test]
    fn test_activate() {
        let mut machine = BattleMachine::new();
        let id = waiting_battle(&mut machine, 3);

        let outcome = machine.activate(id, opponent());

        assert_eq!(
            outcome.events(),
            &[Event::BattleActivated {
                battle_id: id,
                opponent: "Grace".to_string(),
            }]
        );
        let battle = machine.battle(id).unwrap();
        assert_eq!(battle.status(), BattleStatus::Active);
        assert_eq!(battle.current_round_index(), Some(0));
        assert_eq!(battle.rounds()[0].status, RoundStatus::InProgress);
        assert_eq!(battle.opponent().unwrap().name, "Grace");
        assert_single_in_progress(battle);
    }

    #[test]
    fn test_activate_is_idempotent() {
        let mut machine = BattleMachine::new();
        let id = active_battle(&mut machine, 3);
        let before = machine.battle(id).unwrap().clone();

        let outcome = machine.activate(id, opponent());

        assert_eq!(
            outcome,
            Outcome::Ignored(Ignored::InvalidStatus {
                op: "activate",
                status: BattleStatus::Active,
            })
        );
        assert_eq!(machine.battle(id).unwrap(), &before);
    }

    #[test]
    fn test_unknown_battle_is_noop() {
        let mut machine = BattleMachine::new();
        let outcome = machine.cancel(BattleId(42));
        assert_eq!(outcome, Outcome::Ignored(Ignored::UnknownBattle(BattleId(42))));
    }

    #[test]
    fn test_start_round() {
        let mut machine = BattleMachine::new();
        let id = active_battle(&mut machine, 3);

        let outcome = machine.start_round(id, 0);

        assert!(outcome.is_applied());
        let battle = machine.battle(id).unwrap();
        assert_eq!(battle.status(), BattleStatus::Live);
        assert_eq!(battle.current_round_index(), Some(0));
        assert!(battle.rounds()[0].is_in_progress());
        assert_single_in_progress(battle);
    }

    #[test]
    fn test_start_round_requires_active() {
        let mut machine = BattleMachine::new();
        let id = waiting_battle(&mut machine, 3);

        let outcome = machine.start_round(id, 0);

        assert!(outcome.is_ignored());
        assert_eq!(machine.battle(id).unwrap().status(), BattleStatus::Waiting);
    }

    #[test]
    fn test_start_round_out_of_range() {
        let mut machine = BattleMachine::new();
        let id = active_battle(&mut machine, 2);

        let outcome = machine.start_round(id, 2);

        assert_eq!(
            outcome.ignored(),
            Some(&Ignored::RoundOutOfRange { round: 2, total: 2 })
        );
        assert_eq!(machine.battle(id).unwrap().status(), BattleStatus::Active);
    }

    #[test]
    fn test_start_round_moves_in_progress_marker() {
        let mut machine = BattleMachine::new();
        let id = active_battle(&mut machine, 3);

        machine.start_round(id, 2);

        let battle = machine.battle(id).unwrap();
        assert_eq!(battle.rounds()[0].status, RoundStatus::Upcoming);
        assert_eq!(battle.rounds()[2].status, RoundStatus::InProgress);
        assert_eq!(battle.current_round_index(), Some(2));
        assert_single_in_progress(battle);
    }

    #[test]
    fn test_complete_non_final_round() {
        let mut machine = BattleMachine::new();
        let id = active_battle(&mut machine, 3);
        machine.start_round(id, 0);

        let outcome = machine.complete_round(id, 0, report(500, 300));

        assert_eq!(
            outcome.events(),
            &[
                Event::RoundCompleted {
                    battle_id: id,
                    round: 0,
                    result: RoundResult::Won,
                },
                Event::RoundStarted {
                    battle_id: id,
                    round: 1,
                },
            ]
        );
        let battle = machine.battle(id).unwrap();
        assert_eq!(battle.rounds()[0].result, RoundResult::Won);
        assert_eq!(battle.rounds()[0].status, RoundStatus::Completed);
        assert_eq!(battle.rounds()[1].status, RoundStatus::InProgress);
        assert_eq!(battle.status(), BattleStatus::Live);
        assert_eq!(battle.current_round_index(), Some(1));
        assert!(battle.completed_at().is_none());
        assert_single_in_progress(battle);
    }

    #[test]
    fn test_complete_round_from_active() {
        let mut machine = BattleMachine::new();
        let id = active_battle(&mut machine, 2);

        assert!(machine.complete_round(id, 0, report(1, 2)).is_applied());

        let battle = machine.battle(id).unwrap();
        assert_eq!(battle.status(), BattleStatus::Live);
        assert_eq!(battle.rounds()[0].result, RoundResult::Lost);
    }

    #[test]
    fn test_complete_final_round_completes_battle() {
        let mut machine = BattleMachine::new();
        let id = active_battle(&mut machine, 2);
        machine.complete_round(id, 0, report(100, 50));

        let outcome = machine.complete_round(id, 1, report(100, 50));

        assert_eq!(
            outcome.events().last(),
            Some(&Event::BattleCompleted { battle_id: id })
        );
        let battle = machine.battle(id).unwrap();
        assert_eq!(battle.status(), BattleStatus::Completed);
        assert!(battle.completed_at().is_some());
        assert_eq!(battle.current_round_index(), Some(1));
        assert_eq!(battle.in_progress_rounds().count(), 0);
    }

    #[test]
    fn test_single_round_battle_completes_in_one_step() {
        let mut machine = BattleMachine::new();
        let id = active_battle(&mut machine, 1);

        machine.complete_round(id, 0, report(3, 1));

        let battle = machine.battle(id).unwrap();
        assert_eq!(battle.status(), BattleStatus::Completed);
        assert_eq!(battle.rounds()[0].status, RoundStatus::Completed);
    }

    #[test]
    fn test_duplicate_completion_is_noop() {
        let mut machine = BattleMachine::new();
        let id = active_battle(&mut machine, 3);
        machine.complete_round(id, 0, report(500, 300));
        let before = machine.battle(id).unwrap().clone();

        let outcome = machine.complete_round(id, 0, report(0, 900));

        assert_eq!(outcome.ignored(), Some(&Ignored::RoundAlreadyCompleted(0)));
        assert_eq!(machine.battle(id).unwrap(), &before);
    }

    #[test]
    fn test_complete_round_not_current() {
        let mut machine = BattleMachine::new();
        let id = active_battle(&mut machine, 3);

        let outcome = machine.complete_round(id, 2, report(1, 0));

        assert_eq!(
            outcome.ignored(),
            Some(&Ignored::NotCurrentRound {
                round: 2,
                current: Some(0),
            })
        );
    }

    #[test]
    fn test_complete_round_out_of_range() {
        let mut machine = BattleMachine::new();
        let id = active_battle(&mut machine, 2);
        machine.start_round(id, 1);
        let before = machine.battle(id).unwrap().clone();

        let outcome = machine.complete_round(id, 2, report(300, 100));

        assert_eq!(
            outcome.ignored(),
            Some(&Ignored::RoundOutOfRange { round: 2, total: 2 })
        );
        assert_eq!(machine.battle(id).unwrap(), &before);

        let outcome = machine.complete_round(id, usize::MAX, report(300, 100));
        assert!(outcome.is_ignored());
        assert_eq!(machine.battle(id).unwrap(), &before);
    }

    #[test]
    fn test_jumped_round_skips_completed_rounds() {
        let mut machine = BattleMachine::new();
        let id = active_battle(&mut machine, 3);
        machine.start_round(id, 1);
        machine.complete_round(id, 1, report(10, 0));
        machine.start_round(id, 0);

        machine.complete_round(id, 0, report(10, 0));

        let battle = machine.battle(id).unwrap();
        assert_eq!(battle.rounds()[1].status, RoundStatus::Completed);
        assert_eq!(battle.rounds()[2].status, RoundStatus::InProgress);
        assert_eq!(battle.current_round_index(), Some(2));
        assert_single_in_progress(battle);
    }

    #[test]
    fn test_complete_battle_override() {
        let mut machine = BattleMachine::new();
        let id = active_battle(&mut machine, 5);
        machine.complete_round(id, 0, report(10, 0));

        let outcome = machine.complete_battle(id);

        assert!(outcome.is_applied());
        let battle = machine.battle(id).unwrap();
        assert_eq!(battle.status(), BattleStatus::Completed);
        assert!(battle.completed_at().is_some());
        assert_eq!(battle.in_progress_rounds().count(), 0);
        assert_eq!(battle.rounds()[1].result, RoundResult::Pending);
    }

    #[test]
    fn test_complete_battle_requires_started() {
        let mut machine = BattleMachine::new();
        let id = waiting_battle(&mut machine, 2);

        assert!(machine.complete_battle(id).is_ignored());
        assert_eq!(machine.battle(id).unwrap().status(), BattleStatus::Waiting);
    }

    #[test]
    fn test_cancel_from_every_open_status() {
        let mut machine = BattleMachine::new();
        let waiting = waiting_battle(&mut machine, 3);
        let active = active_battle(&mut machine, 3);
        let live = active_battle(&mut machine, 3);
        machine.start_round(live, 0);

        for id in [waiting, active, live] {
            assert!(machine.cancel(id).is_applied());
            let battle = machine.battle(id).unwrap();
            assert_eq!(battle.status(), BattleStatus::Cancelled);
            assert_eq!(battle.in_progress_rounds().count(), 0);
        }
    }

    #[test]
    fn test_cancelled_battle_is_frozen() {
        let mut machine = BattleMachine::new();
        let id = active_battle(&mut machine, 3);
        machine.start_round(id, 0);
        machine.cancel(id);
        let before = machine.battle(id).unwrap().clone();

        assert!(machine.activate(id, opponent()).is_ignored());
        assert!(machine.start_round(id, 1).is_ignored());
        assert!(machine.complete_round(id, 0, report(1, 0)).is_ignored());
        assert!(machine.complete_battle(id).is_ignored());
        assert!(machine.cancel(id).is_ignored());

        assert_eq!(machine.battle(id).unwrap(), &before);
    }

    #[test]
    fn test_completed_battle_is_frozen() {
        let mut machine = BattleMachine::new();
        let id = active_battle(&mut machine, 1);
        machine.complete_round(id, 0, report(1, 0));
        let before = machine.battle(id).unwrap().clone();

        assert!(machine.cancel(id).is_ignored());
        assert!(machine.start_round(id, 0).is_ignored());
        assert_eq!(machine.battle(id).unwrap(), &before);
    }

    #[test]
    fn test_three_round_scenario() {
        let mut machine = BattleMachine::new();
        let id = active_battle(&mut machine, 3);
        machine.start_round(id, 0);

        machine.complete_round(id, 0, report(500, 300));
        machine.complete_round(id, 1, report(400, 450));
        machine.complete_round(id, 2, report(600, 200));

        let battle = machine.battle(id).unwrap();
        assert_eq!(battle.status(), BattleStatus::Completed);
        assert_eq!(query::rounds_won(battle, Side::Player), 2);
        assert_eq!(query::rounds_won(battle, Side::Opponent), 1);
        assert_eq!(query::winner(battle), query::Winner::Player);
        assert_eq!(query::total_score(battle, Side::Player), 1500);
        assert_eq!(query::xp_earned(battle), 1750);
        assert_eq!(query::rank_progress(battle), 45);
    }

    #[test]
    fn test_apply_dispatches_commands() {
        let mut machine = BattleMachine::new();
        let id = waiting_battle(&mut machine, 2);

        machine.apply(&Command::Activate {
            battle_id: id,
            opponent: opponent(),
        });
        machine.apply(&Command::StartRound {
            battle_id: id,
            round: 0,
        });
        machine.apply(&Command::CompleteRound {
            battle_id: id,
            round: 0,
            report: report(5, 1),
        });
        assert_eq!(machine.battle(id).unwrap().current_round_index(), Some(1));

        machine.apply(&Command::Cancel { battle_id: id });
        assert_eq!(machine.battle(id).unwrap().status(), BattleStatus::Cancelled);
    }

    #[test]
    fn test_apply_ignores_non_battle_commands() {
        let mut machine = BattleMachine::new();

        let outcome = machine.apply(&Command::Wizard {
            action: WizardCommand::Open,
        });

        assert_eq!(outcome, Outcome::Ignored(Ignored::NotABattleCommand));
    }
}
