//! CLI argument parsing tests.

use crate::{Cli, Commands, ConfigAction};
use canvas_dashboard::geometry::Size;
use canvas_dashboard::layout::WidgetKind;
use clap::{CommandFactory, Parser};
use std::path::PathBuf;

#[test]
fn verify_cli() {
    Cli::command().debug_assert();
}

#[test]
fn test_command_is_required() {
    assert!(Cli::try_parse_from(["cdash"]).is_err());
}

#[test]
fn test_tui_subcommand() {
    let cli = Cli::try_parse_from(["cdash", "tui"]).unwrap();
    assert!(matches!(cli.command, Commands::Tui));
    assert!(cli.config.is_none());
}

#[test]
fn test_global_config_flag() {
    let cli = Cli::try_parse_from(["cdash", "list", "--config", "/tmp/c.toml"]).unwrap();
    assert_eq!(cli.config, Some(PathBuf::from("/tmp/c.toml")));

    let cli = Cli::try_parse_from(["cdash", "--config", "/tmp/c.toml", "reset"]).unwrap();
    assert_eq!(cli.config, Some(PathBuf::from("/tmp/c.toml")));
    assert!(matches!(cli.command, Commands::Reset));
}

#[test]
fn test_list_json_flag() {
    let cli = Cli::try_parse_from(["cdash", "list"]).unwrap();
    assert!(matches!(cli.command, Commands::List { json: false }));
    let cli = Cli::try_parse_from(["cdash", "list", "--json"]).unwrap();
    assert!(matches!(cli.command, Commands::List { json: true }));
}

#[test]
fn test_add_parses_kind() {
    let cli = Cli::try_parse_from(["cdash", "add", "todo"]).unwrap();
    match cli.command {
        Commands::Add { kind, container } => {
            assert_eq!(kind, WidgetKind::Todo);
            assert!(container.is_none());
        }
        _ => panic!("unexpected command variant"),
    }
}

#[test]
fn test_add_with_container() {
    let cli = Cli::try_parse_from(["cdash", "add", "chart", "--container", "800x600"]).unwrap();
    match cli.command {
        Commands::Add { kind, container } => {
            assert_eq!(kind, WidgetKind::Chart);
            assert_eq!(container, Some(Size::new(800.0, 600.0)));
        }
        _ => panic!("unexpected command variant"),
    }
}

#[test]
fn test_add_rejects_unknown_kind() {
    assert!(Cli::try_parse_from(["cdash", "add", "gauge"]).is_err());
}

#[test]
fn test_add_rejects_bad_container() {
    assert!(Cli::try_parse_from(["cdash", "add", "chart", "--container", "wide"]).is_err());
}

#[test]
fn test_remove_requires_id() {
    assert!(Cli::try_parse_from(["cdash", "remove"]).is_err());
    let cli = Cli::try_parse_from(["cdash", "remove", "summary"]).unwrap();
    match cli.command {
        Commands::Remove { id } => assert_eq!(id, "summary"),
        _ => panic!("unexpected command variant"),
    }
}

#[test]
fn test_config_init_force() {
    let cli = Cli::try_parse_from(["cdash", "config", "init", "--force"]).unwrap();
    assert!(matches!(
        cli.command,
        Commands::Config {
            action: ConfigAction::Init { force: true }
        }
    ));
}

#[test]
fn test_config_path_and_validate() {
    let cli = Cli::try_parse_from(["cdash", "config", "path"]).unwrap();
    assert!(matches!(
        cli.command,
        Commands::Config {
            action: ConfigAction::Path
        }
    ));
    let cli = Cli::try_parse_from(["cdash", "config", "validate"]).unwrap();
    assert!(matches!(
        cli.command,
        Commands::Config {
            action: ConfigAction::Validate
        }
    ));
}
