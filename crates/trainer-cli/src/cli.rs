//! CLI argument definitions for trainer.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "trainer")]
#[command(about = "Adds to in-game values of supported games", version)]
pub struct Args {
    /// Load the game registry from a JSON file instead of the built-in table
    #[arg(long, value_name = "FILE", global = true, env = "TRAINER_REGISTRY")]
    pub registry: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Wait for a supported game and apply features from the keyboard (default)
    Run,
    /// Show the supported games and their features
    List,
    /// Apply one feature to the running game and exit
    Apply {
        /// Feature key, e.g. "money"
        feature: String,
    },
}
