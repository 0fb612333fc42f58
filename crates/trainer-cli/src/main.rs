mod cli;
mod commands;
mod console;
mod input;
mod shutdown;

use anyhow::Result;
use clap::Parser;
use cli::{Args, Command};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    let args = Args::parse();

    // Diagnostics go to stderr; user-facing output is printed by the console observer
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("trainer=warn,trainer_core=warn"));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let registry = commands::load_registry(args.registry.as_deref())?;

    match args.command {
        Some(Command::List) => commands::list::run(&registry),
        Some(Command::Apply { feature }) => commands::apply::run(registry, &feature),
        Some(Command::Run) | None => commands::run::run(registry),
    }
}
