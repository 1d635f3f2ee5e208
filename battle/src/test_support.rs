//! Fixtures shared by unit tests

use arena_protocol::{
    BattleId, BattleMode, BattleStatus, Challenge, Difficulty, PlayerProfile, RoundReport,
    RoundResult, RoundStatus, TimeSpent,
};
use chrono::Utc;
use proptest::prelude::*;

use crate::factory::{BattleParams, create_round};
use crate::machine::BattleMachine;
use crate::types::{Battle, Round};

pub fn player() -> PlayerProfile {
    PlayerProfile {
        id: "u-1".to_string(),
        name: "Ada".to_string(),
        avatar: "ada.png".to_string(),
        level: 8,
        league: "Silver".to_string(),
    }
}

pub fn opponent() -> PlayerProfile {
    PlayerProfile {
        id: "u-2".to_string(),
        name: "Grace".to_string(),
        avatar: "grace.png".to_string(),
        level: 9,
        league: "Silver".to_string(),
    }
}

pub fn challenge(title: &str) -> Challenge {
    Challenge {
        title: title.to_string(),
        description: format!("{} description", title),
        tags: vec!["test".to_string()],
        example: String::new(),
        max_points: 500,
        difficulty: None,
    }
}

pub fn report(player_score: u32, opponent_score: u32) -> RoundReport {
    RoundReport {
        player_score,
        opponent_score,
        time_spent: TimeSpent(200),
        efficiency: 75,
    }
}

/// Activated battle with the first `scores.len()` rounds played in order
///
/// Round `i` is recorded with efficiency `60 + 10*i` and time `120 + 30*i` seconds.
pub fn scored_battle(scores: &[(u32, u32)], total_rounds: u8) -> Battle {
    let mut machine = BattleMachine::new();
    let battle = machine
        .create_battle(BattleParams::new(BattleMode::OneVsOne, total_rounds), player())
        .unwrap();
    let id = battle.id();
    machine.insert(battle);
    machine.activate(id, opponent());

    for (i, (p, o)) in scores.iter().enumerate() {
        let outcome = machine.complete_round(
            id,
            i,
            RoundReport {
                player_score: *p,
                opponent_score: *o,
                time_spent: TimeSpent(120 + 30 * i as u32),
                efficiency: 60 + 10 * i as u8,
            },
        );
        assert!(outcome.is_applied(), "round {} not applied: {:?}", i, outcome);
    }

    machine.battle(id).unwrap().clone()
}

fn arb_round_status() -> impl Strategy<Value = RoundStatus> {
    prop_oneof![
        Just(RoundStatus::Upcoming),
        Just(RoundStatus::InProgress),
        Just(RoundStatus::Completed),
    ]
}

fn arb_round_result() -> impl Strategy<Value = RoundResult> {
    prop_oneof![
        Just(RoundResult::Won),
        Just(RoundResult::Lost),
        Just(RoundResult::Draw),
        Just(RoundResult::Pending),
    ]
}

fn arb_round() -> impl Strategy<Value = Round> {
    (
        arb_round_status(),
        arb_round_result(),
        any::<u32>(),
        any::<u32>(),
        0u32..3_600,
        0u8..=100,
    )
        .prop_map(|(status, result, player_score, opponent_score, secs, efficiency)| Round {
            status,
            result,
            player_score,
            opponent_score,
            time_spent: TimeSpent(secs),
            efficiency,
            ..create_round(0, None)
        })
}

/// Arbitrary snapshot, not necessarily reachable through transitions
pub fn arb_battle() -> impl Strategy<Value = Battle> {
    prop::collection::vec(arb_round(), 1..=10).prop_map(|mut rounds| {
        for (idx, round) in rounds.iter_mut().enumerate() {
            round.index = idx;
        }
        Battle {
            id: BattleId(1),
            mode: BattleMode::OneVsOne,
            status: BattleStatus::Live,
            total_rounds: rounds.len() as u8,
            current_round: Some(0),
            rounds,
            player: player(),
            opponent: Some(opponent()),
            created_at: Utc::now(),
            completed_at: None,
            time_limit: 900,
            difficulty: Difficulty::Medium,
        }
    })
}
