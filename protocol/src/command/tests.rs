#[cfg(test)]
mod tests {
    use crate::{
        BattleId, BattleMode, Command, ConfigPatch, Difficulty, ParseError, PlayerProfile,
        RoundReport, TimeSpent, WizardCommand, parse_command,
    };

    #[test]
    fn test_parse_activate() {
        let command = parse_command("|activate|3|u-42|Grace|12|Gold").unwrap();

        assert_eq!(
            command,
            Command::Activate {
                battle_id: BattleId(3),
                opponent: PlayerProfile {
                    id: "u-42".into(),
                    name: "Grace".into(),
                    avatar: String::new(),
                    level: 12,
                    league: "Gold".into(),
                },
            }
        );
    }

    #[test]
    fn test_parse_complete_round() {
        let command = parse_command("|completeround|battle-1|0|500|300|4:12|88").unwrap();

        assert_eq!(
            command,
            Command::CompleteRound {
                battle_id: BattleId(1),
                round: 0,
                report: RoundReport {
                    player_score: 500,
                    opponent_score: 300,
                    time_spent: TimeSpent(252),
                    efficiency: 88,
                },
            }
        );
    }

    #[test]
    fn test_parse_complete_round_bad_time() {
        let result = parse_command("|completeround|1|0|500|300|412|88");

        assert!(result.is_err());
    }

    #[test]
    fn test_parse_missing_field() {
        let err = parse_command("|startround|1").unwrap_err();

        assert!(matches!(
            err.downcast_ref::<ParseError>(),
            Some(ParseError::MissingField(_))
        ));
    }

    #[test]
    fn test_parse_unknown() {
        let err = parse_command("|surrender|1").unwrap_err();

        assert!(matches!(
            err.downcast_ref::<ParseError>(),
            Some(ParseError::UnknownCommand(name)) if name == "surrender"
        ));
    }

    #[test]
    fn test_parse_empty() {
        let err = parse_command("   ").unwrap_err();

        assert!(matches!(
            err.downcast_ref::<ParseError>(),
            Some(ParseError::EmptyMessage)
        ));
    }

    #[test]
    fn test_parse_without_leading_pipe() {
        assert!(parse_command("cancel|1").is_err());
    }

    #[test]
    fn test_parse_wizard_shortcuts() {
        assert_eq!(
            parse_command("|wizard|mode|ai").unwrap(),
            Command::Wizard {
                action: WizardCommand::SetMode {
                    mode: BattleMode::OneVsAi
                }
            }
        );
        assert_eq!(
            parse_command("|wizard|rounds|7").unwrap(),
            Command::Wizard {
                action: WizardCommand::SetConfig {
                    patch: ConfigPatch {
                        total_rounds: Some(7),
                        ..ConfigPatch::default()
                    }
                }
            }
        );
        assert_eq!(
            parse_command("|wizard|confirm").unwrap(),
            Command::Wizard {
                action: WizardCommand::Confirm
            }
        );
    }

    #[test]
    fn test_parse_wizard_config() {
        let command = parse_command("|wizard|config|-|hard|600").unwrap();

        assert_eq!(
            command,
            Command::Wizard {
                action: WizardCommand::SetConfig {
                    patch: ConfigPatch {
                        total_rounds: None,
                        difficulty: Some(Difficulty::Hard),
                        time_limit: Some(600),
                    }
                }
            }
        );
    }

    #[test]
    fn test_wire_format_parses_back() {
        let commands = vec![
            Command::StartRound {
                battle_id: BattleId(9),
                round: 2,
            },
            Command::Cancel {
                battle_id: BattleId(4),
            },
            Command::Wizard {
                action: WizardCommand::SetConfig {
                    patch: ConfigPatch {
                        total_rounds: Some(3),
                        difficulty: None,
                        time_limit: Some(300),
                    },
                },
            },
            Command::Pulse,
        ];

        for command in commands {
            let line = command.to_wire_format();
            assert_eq!(parse_command(&line).unwrap(), command, "line: {}", line);
        }
    }

    #[test]
    fn test_command_battle_id() {
        assert_eq!(
            parse_command("|watch|5").unwrap().battle_id(),
            Some(BattleId(5))
        );
        assert_eq!(parse_command("|unwatch").unwrap().battle_id(), None);
    }
}
