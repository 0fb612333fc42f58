//! Interactive mode: poll for games and apply features from the keyboard.

use std::sync::Arc;
use std::time::Instant;

use anyhow::Result;
use crossterm::event::{self, Event};
use tracing::debug;
use trainer_core::config::timing;
use trainer_core::{
    ApplyError, GameRegistry, IntervalTimer, Observer, Orchestrator, SystemProcessProvider,
    WAITING_TITLE,
};

use crate::console::ConsoleObserver;
use crate::input::{KeyAction, classify_key};
use crate::shutdown::ShutdownSignal;

/// Run the interactive loop until Esc, q or Ctrl+C
///
/// Poll ticks and feature actions both run on this thread, so they never
/// interleave.
pub fn run(registry: GameRegistry) -> Result<()> {
    let shutdown = setup_shutdown_handler()?;

    let mut orchestrator =
        Orchestrator::new(SystemProcessProvider::new(), registry, ConsoleObserver::stdout());
    orchestrator.observer_mut().on_title_changed(WAITING_TITLE);
    println!("Press 1-9 to apply a feature, Esc or q to quit.");

    let mut timer = IntervalTimer::new(timing::POLL_INTERVAL);

    while !shutdown.is_shutdown() {
        timer.poll(Instant::now(), || orchestrator.tick());

        let wait = timer
            .time_until_due(Instant::now())
            .min(timing::INPUT_POLL_INTERVAL);
        if !event::poll(wait)? {
            continue;
        }

        if let Event::Key(key) = event::read()? {
            match classify_key(&key) {
                KeyAction::Quit => shutdown.trigger(),
                KeyAction::Feature(index) => trigger_by_index(&mut orchestrator, index),
                KeyAction::Ignore => {}
            }
        }
    }

    // Releases the process handle
    orchestrator.shutdown();
    println!("Shutdown complete.");
    Ok(())
}

fn trigger_by_index<W: std::io::Write>(
    orchestrator: &mut Orchestrator<SystemProcessProvider, ConsoleObserver<W>>,
    index: usize,
) {
    let features = orchestrator.available_features();
    match features.get(index) {
        Some((key, _)) => {
            // Outcome is already reported through the observer
            let _ = orchestrator.trigger_feature(key);
        }
        None if orchestrator.is_connected() => {
            debug!("No feature bound to key {}", index + 1);
        }
        None => orchestrator
            .observer_mut()
            .on_log(&ApplyError::NotConnected.to_string()),
    }
}

/// Setup graceful shutdown on Ctrl+C
fn setup_shutdown_handler() -> Result<Arc<ShutdownSignal>> {
    let shutdown = Arc::new(ShutdownSignal::new());

    let shutdown_ctrlc = Arc::clone(&shutdown);
    ctrlc::set_handler(move || {
        println!("\nShutting down...");
        shutdown_ctrlc.trigger();
    })?;

    println!("Trainer v{}", env!("CARGO_PKG_VERSION"));
    Ok(shutdown)
}
