//! Tests for CLI argument parsing functionality
//!
//! These tests verify that global options and subcommands are parsed into
//! `CliArgs` and merged into `AppConfig` with the expected precedence.

use building_topology::types::config::{AppConfig, CliArgs, DEFAULT_BUILDING};
use building_topology::Command;
use clap::Parser;
use std::path::PathBuf;

/// Test parsing of the building options
#[test]
fn test_building_arguments_parsing() {
    let args = vec!["test", "--building-dir", "/srv/buildings", "--building", "HQ", "read"];
    let cli_args = CliArgs::try_parse_from(args).unwrap();

    assert_eq!(cli_args.building_dir, Some(PathBuf::from("/srv/buildings")));
    assert_eq!(cli_args.building, Some("HQ".to_string()));
    assert_eq!(cli_args.command, Some(Command::Read));

    let config = AppConfig::from_cli_args(cli_args).unwrap();
    assert_eq!(config.default_building, "HQ");
    config.validate().unwrap();
}

/// Test that the default building is used when none is given
#[test]
fn test_default_building() {
    let args = vec!["test", "--building-dir", "/srv/buildings"];
    let cli_args = CliArgs::try_parse_from(args).unwrap();
    assert!(cli_args.command.is_none());

    let config = AppConfig::from_cli_args(cli_args).unwrap();
    assert_eq!(config.default_building, DEFAULT_BUILDING);
}

/// Test room and door subcommands
#[test]
fn test_room_and_door_commands() {
    let args = vec!["test", "add-room", "1", r#"{"name": "lab", "windows": 1, "lights": 2}"#];
    let cli_args = CliArgs::try_parse_from(args).unwrap();
    assert_eq!(
        cli_args.command,
        Some(Command::AddRoom {
            floor: 1,
            room: r#"{"name": "lab", "windows": 1, "lights": 2}"#.to_string()
        })
    );

    let args = vec!["test", "remove-door", "2", "lab", "hall"];
    let cli_args = CliArgs::try_parse_from(args).unwrap();
    assert_eq!(
        cli_args.command,
        Some(Command::RemoveDoor { floor: 2, room: "lab".to_string(), adjacent: "hall".to_string() })
    );

    let args = vec!["test", "find-path", "lobby", "lab"];
    let cli_args = CliArgs::try_parse_from(args).unwrap();
    assert_eq!(
        cli_args.command,
        Some(Command::FindPath { start: "lobby".to_string(), end: "lab".to_string() })
    );
}

/// Test that negative counts parse so the model can reject them
#[test]
fn test_negative_count_parsing() {
    let args = vec!["test", "update-lights", "1", "room1", "-1"];
    let cli_args = CliArgs::try_parse_from(args).unwrap();
    assert_eq!(
        cli_args.command,
        Some(Command::UpdateLights { floor: 1, room: "room1".to_string(), count: -1 })
    );
}

/// Test invalid subcommand arguments
#[test]
fn test_invalid_command_arguments() {
    // Floor numbers are unsigned
    let args = vec!["test", "remove-room", "-3", "room1"];
    assert!(CliArgs::try_parse_from(args).is_err());

    // Missing adjacent room
    let args = vec!["test", "add-door", "1", "room1"];
    assert!(CliArgs::try_parse_from(args).is_err());

    let args = vec!["test", "teleport", "room1"];
    assert!(CliArgs::try_parse_from(args).is_err());
}

/// Test verbose and debug flags
#[test]
fn test_logging_flags() {
    let args = vec!["test", "--verbose"];
    let cli_args = CliArgs::try_parse_from(args).unwrap();
    assert!(cli_args.verbose);
    assert!(!cli_args.debug);

    let args = vec!["test", "-d", "--json-logs", "--log-dir", "logs"];
    let cli_args = CliArgs::try_parse_from(args).unwrap();
    assert!(!cli_args.verbose);
    assert!(cli_args.debug);
    assert!(cli_args.json_logs);

    let config = AppConfig::from_cli_args(cli_args).unwrap();
    assert!(config.json_logs);
    assert_eq!(config.log_directory, Some("logs".to_string()));
}

/// Test print-config flag
#[test]
fn test_print_config_flag() {
    let args = vec!["test", "--print-config"];
    let cli_args = CliArgs::try_parse_from(args).unwrap();
    assert!(cli_args.print_config);

    let json = AppConfig::default().print_json().unwrap();
    assert!(json.contains("\"default_building\": \"Main Complex\""));
}

/// Test missing config file
#[test]
fn test_missing_config_file() {
    let args = vec!["test", "--config", "/definitely/not/here.json"];
    let cli_args = CliArgs::try_parse_from(args).unwrap();
    assert!(AppConfig::from_cli_args(cli_args).is_err());
}
