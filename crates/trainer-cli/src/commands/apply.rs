//! One-shot apply command.

use anyhow::{Context, Result, bail};
use trainer_core::{GameRegistry, Orchestrator, SystemProcessProvider};

use crate::console::ConsoleObserver;

/// Detect the running game, apply `feature` once and release the process.
pub fn run(registry: GameRegistry, feature: &str) -> Result<()> {
    let mut orchestrator =
        Orchestrator::new(SystemProcessProvider::new(), registry, ConsoleObserver::stdout());

    let found = orchestrator
        .connect_detected()
        .context("Failed to attach to the running game")?;
    if !found {
        bail!("No supported game is running");
    }

    let result = orchestrator.trigger_feature(feature);
    orchestrator.shutdown();
    result?;
    Ok(())
}
