//! Command Console Example
//!
//! Reads wire-format commands from stdin (one per line) and prints the
//! resulting events as JSON. Try:
//!
//! ```text
//! |wizard|open
//! |wizard|mode|1v1
//! |wizard|rounds|2
//! |wizard|confirm
//! |activate|1|u-2|Grace|9|Silver
//! |completeround|1|0|500|300|4:12|88
//! |completeround|1|1|200|300|5:01|72
//! ```

use anyhow::Result;
use arena_battle::WizardServices;
use arena_client::{ArenaClient, ArenaConfig, PlayerProfile, query};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .init();

    let me = PlayerProfile {
        id: "u-1".to_string(),
        name: "Ada".to_string(),
        avatar: String::new(),
        level: 8,
        league: "Silver".to_string(),
    };
    let (handle, _receiver) = ArenaClient::spawn(ArenaConfig::manual_pulse(), WizardServices::in_memory(me));

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            continue;
        }
        if line.trim() == "/battles" {
            for battle in handle.battles().await? {
                let summary = query::summarize(&battle);
                println!(
                    "{} {} {}/{} rounds, winner {}",
                    battle.id(),
                    battle.status(),
                    battle.completed_rounds().count(),
                    battle.total_rounds(),
                    summary.winner.as_str()
                );
            }
            continue;
        }

        match handle.send_line(&line).await {
            Ok(dispatch) => {
                let events = dispatch.events();
                if events.is_empty() {
                    println!("{:?}", dispatch);
                }
                for event in events {
                    println!("{}", event.to_json());
                }
            }
            Err(e) => eprintln!("error: {:#}", e),
        }
    }

    handle.shutdown().await?;
    Ok(())
}
