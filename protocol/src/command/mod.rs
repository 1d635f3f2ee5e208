mod tests;

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::ParseError;
use crate::types::{BattleId, BattleMode, ConfigPatch, Difficulty, PlayerProfile, RoundReport, TimeSpent};

/// Commands consumers can send to an arena
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Command {
    /// |activate|ID|OPP_ID|OPP_NAME|LEVEL|LEAGUE[|AVATAR]
    Activate {
        battle_id: BattleId,
        opponent: PlayerProfile,
    },

    /// |startround|ID|ROUND
    StartRound { battle_id: BattleId, round: usize },

    /// |completeround|ID|ROUND|PLAYER_SCORE|OPPONENT_SCORE|M:SS|EFFICIENCY
    CompleteRound {
        battle_id: BattleId,
        round: usize,
        report: RoundReport,
    },

    /// |completebattle|ID
    CompleteBattle { battle_id: BattleId },

    /// |cancel|ID
    Cancel { battle_id: BattleId },

    /// |wizard|...
    Wizard { action: WizardCommand },

    /// |watch|ID
    Watch { battle_id: BattleId },

    /// |unwatch
    Unwatch,

    /// |pulse
    Pulse,
}

/// Steps of the create-battle wizard
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum WizardCommand {
    Open,
    Close,
    SetMode { mode: BattleMode },
    SetConfig { patch: ConfigPatch },
    Next,
    Back,
    Confirm,
}

impl Command {
    /// The battle this command targets, if any
    pub fn battle_id(&self) -> Option<BattleId> {
        match self {
            Self::Activate { battle_id, .. }
            | Self::StartRound { battle_id, .. }
            | Self::CompleteRound { battle_id, .. }
            | Self::CompleteBattle { battle_id }
            | Self::Cancel { battle_id }
            | Self::Watch { battle_id } => Some(*battle_id),
            Self::Wizard { .. } | Self::Unwatch | Self::Pulse => None,
        }
    }

    /// Serialize to wire format: |NAME|ARG|ARG...
    pub fn to_wire_format(&self) -> String {
        match self {
            Self::Activate {
                battle_id,
                opponent,
            } => {
                let mut line = format!(
                    "|activate|{}|{}|{}|{}|{}",
                    battle_id.0, opponent.id, opponent.name, opponent.level, opponent.league
                );
                if !opponent.avatar.is_empty() {
                    line.push('|');
                    line.push_str(&opponent.avatar);
                }
                line
            }
            Self::StartRound { battle_id, round } => format!("|startround|{}|{}", battle_id.0, round),
            Self::CompleteRound {
                battle_id,
                round,
                report,
            } => format!(
                "|completeround|{}|{}|{}|{}|{}|{}",
                battle_id.0,
                round,
                report.player_score,
                report.opponent_score,
                report.time_spent,
                report.efficiency
            ),
            Self::CompleteBattle { battle_id } => format!("|completebattle|{}", battle_id.0),
            Self::Cancel { battle_id } => format!("|cancel|{}", battle_id.0),
            Self::Wizard { action } => format!("|wizard|{}", action.to_protocol_string()),
            Self::Watch { battle_id } => format!("|watch|{}", battle_id.0),
            Self::Unwatch => "|unwatch".to_string(),
            Self::Pulse => "|pulse".to_string(),
        }
    }
}

impl WizardCommand {
    fn to_protocol_string(&self) -> String {
        match self {
            Self::Open => "open".to_string(),
            Self::Close => "close".to_string(),
            Self::SetMode { mode } => format!("mode|{}", mode.as_str()),
            Self::SetConfig { patch } => {
                let rounds = patch
                    .total_rounds
                    .map(|r| r.to_string())
                    .unwrap_or_else(|| "-".to_string());
                let difficulty = patch.difficulty.map(|d| d.as_str()).unwrap_or("-");
                let time_limit = patch
                    .time_limit
                    .map(|t| t.to_string())
                    .unwrap_or_else(|| "-".to_string());
                format!("config|{}|{}|{}", rounds, difficulty, time_limit)
            }
            Self::Next => "next".to_string(),
            Self::Back => "back".to_string(),
            Self::Confirm => "confirm".to_string(),
        }
    }
}

/// Parse a single command line
pub fn parse_command(line: &str) -> Result<Command> {
    let line = line.trim();

    if line.is_empty() {
        return Err(ParseError::EmptyMessage.into());
    }

    let Some(body) = line.strip_prefix('|') else {
        return Err(ParseError::InvalidFormat(format!("missing leading '|': {}", line)).into());
    };

    let parts: Vec<&str> = body.split('|').collect();

    match parts[0] {
        "activate" => parse_activate(&parts),
        "startround" => parse_start_round(&parts),
        "completeround" => parse_complete_round(&parts),
        "completebattle" => Ok(Command::CompleteBattle {
            battle_id: battle_id_at(&parts, 1)?,
        }),
        "cancel" => Ok(Command::Cancel {
            battle_id: battle_id_at(&parts, 1)?,
        }),
        "wizard" => parse_wizard(&parts),
        "watch" => Ok(Command::Watch {
            battle_id: battle_id_at(&parts, 1)?,
        }),
        "unwatch" => Ok(Command::Unwatch),
        "pulse" => Ok(Command::Pulse),
        other => Err(ParseError::UnknownCommand(other.to_string()).into()),
    }
}

fn field<'a>(parts: &[&'a str], idx: usize, name: &str) -> Result<&'a str> {
    parts
        .get(idx)
        .copied()
        .filter(|s| !s.is_empty())
        .ok_or_else(|| ParseError::MissingField(name.to_string()).into())
}

fn number_at<T: std::str::FromStr>(parts: &[&str], idx: usize, name: &str) -> Result<T> {
    let raw = field(parts, idx, name)?;
    raw.parse::<T>()
        .map_err(|_| ParseError::InvalidFormat(format!("invalid {}: {}", name, raw)).into())
}

fn battle_id_at(parts: &[&str], idx: usize) -> Result<BattleId> {
    let raw = field(parts, idx, "battle id")?;
    BattleId::parse(raw)
        .ok_or_else(|| ParseError::InvalidFormat(format!("invalid battle id: {}", raw)).into())
}

fn parse_activate(parts: &[&str]) -> Result<Command> {
    // activate|ID|OPP_ID|OPP_NAME|LEVEL|LEAGUE[|AVATAR]
    let battle_id = battle_id_at(parts, 1)?;
    let opponent = PlayerProfile {
        id: field(parts, 2, "opponent id")?.to_string(),
        name: field(parts, 3, "opponent name")?.to_string(),
        level: number_at(parts, 4, "opponent level")?,
        league: field(parts, 5, "opponent league")?.to_string(),
        avatar: parts.get(6).map(|s| s.to_string()).unwrap_or_default(),
    };

    Ok(Command::Activate {
        battle_id,
        opponent,
    })
}

fn parse_start_round(parts: &[&str]) -> Result<Command> {
    Ok(Command::StartRound {
        battle_id: battle_id_at(parts, 1)?,
        round: number_at(parts, 2, "round")?,
    })
}

fn parse_complete_round(parts: &[&str]) -> Result<Command> {
    // completeround|ID|ROUND|PLAYER_SCORE|OPPONENT_SCORE|M:SS|EFFICIENCY
    let battle_id = battle_id_at(parts, 1)?;
    let round = number_at(parts, 2, "round")?;
    let time_spent: TimeSpent = field(parts, 5, "time spent")?.parse()?;

    Ok(Command::CompleteRound {
        battle_id,
        round,
        report: RoundReport {
            player_score: number_at(parts, 3, "player score")?,
            opponent_score: number_at(parts, 4, "opponent score")?,
            time_spent,
            efficiency: number_at(parts, 6, "efficiency")?,
        },
    })
}

fn parse_wizard(parts: &[&str]) -> Result<Command> {
    let action = match field(parts, 1, "wizard action")? {
        "open" => WizardCommand::Open,
        "close" => WizardCommand::Close,
        "next" => WizardCommand::Next,
        "back" => WizardCommand::Back,
        "confirm" => WizardCommand::Confirm,
        "mode" => {
            let raw = field(parts, 2, "mode")?;
            let mode = BattleMode::parse(raw)
                .ok_or_else(|| ParseError::InvalidFormat(format!("unknown mode: {}", raw)))?;
            WizardCommand::SetMode { mode }
        }
        "rounds" => WizardCommand::SetConfig {
            patch: ConfigPatch {
                total_rounds: Some(number_at(parts, 2, "rounds")?),
                ..ConfigPatch::default()
            },
        },
        "difficulty" => WizardCommand::SetConfig {
            patch: ConfigPatch {
                difficulty: Some(difficulty_at(parts, 2)?),
                ..ConfigPatch::default()
            },
        },
        "timelimit" => WizardCommand::SetConfig {
            patch: ConfigPatch {
                time_limit: Some(number_at(parts, 2, "time limit")?),
                ..ConfigPatch::default()
            },
        },
        "config" => WizardCommand::SetConfig {
            patch: parse_config_patch(parts)?,
        },
        other => {
            return Err(ParseError::UnknownCommand(format!("wizard {}", other)).into());
        }
    };

    Ok(Command::Wizard { action })
}

fn difficulty_at(parts: &[&str], idx: usize) -> Result<Difficulty> {
    let raw = field(parts, idx, "difficulty")?;
    Difficulty::parse(raw)
        .ok_or_else(|| ParseError::InvalidFormat(format!("unknown difficulty: {}", raw)).into())
}

fn parse_config_patch(parts: &[&str]) -> Result<ConfigPatch> {
    // config|ROUNDS|DIFFICULTY|TIMELIMIT, "-" leaves a field untouched
    if parts.len() < 5 {
        return Err(ParseError::MissingField("config fields".to_string()).into());
    }

    let total_rounds = match parts[2] {
        "-" => None,
        _ => Some(number_at(parts, 2, "rounds")?),
    };
    let difficulty = match parts[3] {
        "-" => None,
        _ => Some(difficulty_at(parts, 3)?),
    };
    let time_limit = match parts[4] {
        "-" => None,
        _ => Some(number_at(parts, 4, "time limit")?),
    };

    Ok(ConfigPatch {
        total_rounds,
        difficulty,
        time_limit,
    })
}
