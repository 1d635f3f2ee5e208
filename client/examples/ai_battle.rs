//! AI Battle Example
//!
//! Creates a three-round battle against the AI through the wizard, watches
//! its round timer and plays every round, then prints the results screen.

use anyhow::Result;
use arena_battle::WizardServices;
use arena_client::{
    ArenaClient, ArenaConfig, ArenaHandle, BattleId, BattleMode, ConfigPatch, Difficulty, Handler,
    PlayerProfile, RoundReport, RoundResult, TimeSpent, query,
};
use async_trait::async_trait;
use tracing_subscriber::EnvFilter;

struct Commentator;

#[async_trait]
impl Handler for Commentator {
    async fn on_round_started(&mut self, battle_id: BattleId, round: usize) {
        println!("[{}] Round {} started", battle_id, round + 1);
    }

    async fn on_round_completed(&mut self, battle_id: BattleId, round: usize, result: RoundResult) {
        println!("[{}] Round {} finished: {:?}", battle_id, round + 1, result);
    }

    async fn on_timer_tick(&mut self, battle_id: BattleId, remaining: u32) {
        if remaining % 5 == 0 {
            println!("[{}] {} left", battle_id, arena_battle::format_clock(remaining));
        }
    }

    async fn on_timer_expired(&mut self, battle_id: BattleId) {
        println!("[{}] Time is up", battle_id);
    }

    async fn on_battle_completed(&mut self, battle_id: BattleId) {
        println!("[{}] Battle over", battle_id);
    }
}

async fn play(handle: &ArenaHandle, id: BattleId) -> Result<()> {
    let scores = [(500, 300), (400, 450), (600, 200)];

    for (round, (player_score, opponent_score)) in scores.into_iter().enumerate() {
        tokio::time::sleep(std::time::Duration::from_millis(700)).await;
        handle
            .complete_round(
                id,
                round,
                RoundReport {
                    player_score,
                    opponent_score,
                    time_spent: TimeSpent::from_secs(180 + 20 * round as u32),
                    efficiency: 80 + round as u8 * 5,
                },
            )
            .await?;
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let me = PlayerProfile {
        id: "u-1".to_string(),
        name: "Ada".to_string(),
        avatar: "ada.png".to_string(),
        level: 12,
        league: "Gold".to_string(),
    };

    // Fast clock so the demo finishes quickly
    let config = ArenaConfig::from_json(r#"{ "pulse_interval_ms": 100 }"#)?;
    let (handle, mut receiver) = ArenaClient::spawn(config, WizardServices::in_memory(me));

    let events = tokio::spawn(async move {
        let mut commentator = Commentator;
        receiver.run(&mut commentator).await
    });

    handle.open_wizard().await?;
    handle.set_mode(BattleMode::OneVsAi).await?;
    handle.next_step().await?;
    handle
        .set_config(ConfigPatch {
            total_rounds: Some(3),
            difficulty: Some(Difficulty::Hard),
            time_limit: Some(30),
        })
        .await?;
    handle.next_step().await?;
    let id = handle.confirm().await?;

    if let Some(battle) = handle.battle(id).await? {
        let opponent = battle.opponent().map(|o| o.name.as_str()).unwrap_or("?");
        println!("[{}] {} vs {}", id, battle.player().name, opponent);
        for round in battle.rounds() {
            if let Some(challenge) = &round.challenge {
                println!("  round {}: {} ({})", round.index + 1, challenge.title, round.difficulty);
            }
        }
    }

    handle.watch(id).await?;
    play(&handle, id).await?;

    if let Some(battle) = handle.battle(id).await? {
        let summary = query::summarize(&battle);
        println!("{}", serde_json::to_string_pretty(&summary)?);
    }

    handle.shutdown().await?;
    events.await??;
    Ok(())
}
