//! CLI argument parsing tests.
//!
//! These tests verify that command-line arguments are parsed correctly
//! without actually executing the commands (which would require a game process).

use std::path::PathBuf;

use clap::Parser;

// Re-create Args structure for testing since it's not publicly exported
#[derive(Parser)]
#[command(name = "trainer")]
struct Args {
    #[arg(long, value_name = "FILE", global = true)]
    registry: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(clap::Subcommand)]
enum Command {
    Run,
    List,
    Apply { feature: String },
}

#[test]
fn test_parse_no_args() {
    let args = Args::try_parse_from(["trainer"]).unwrap();
    assert!(args.command.is_none());
    assert!(args.registry.is_none());
}

#[test]
fn test_parse_run() {
    let args = Args::try_parse_from(["trainer", "run"]).unwrap();
    assert!(matches!(args.command, Some(Command::Run)));
}

#[test]
fn test_parse_list_with_registry() {
    let args = Args::try_parse_from(["trainer", "list", "--registry", "games.json"]).unwrap();
    assert!(matches!(args.command, Some(Command::List)));
    assert_eq!(args.registry, Some(PathBuf::from("games.json")));
}

#[test]
fn test_parse_registry_before_subcommand() {
    let args = Args::try_parse_from(["trainer", "--registry", "games.json", "run"]).unwrap();
    assert!(matches!(args.command, Some(Command::Run)));
    assert_eq!(args.registry, Some(PathBuf::from("games.json")));
}

#[test]
fn test_parse_apply() {
    let args = Args::try_parse_from(["trainer", "apply", "money"]).unwrap();
    match args.command {
        Some(Command::Apply { feature }) => assert_eq!(feature, "money"),
        _ => panic!("Expected Apply command"),
    }
}

#[test]
fn test_parse_apply_requires_feature() {
    assert!(Args::try_parse_from(["trainer", "apply"]).is_err());
}

#[test]
fn test_parse_unknown_subcommand() {
    assert!(Args::try_parse_from(["trainer", "inject"]).is_err());
}
