//! Process lifecycle polling and feature dispatch.
//!
//! The orchestrator is driven by two kinds of calls: `tick` on a fixed
//! interval, and `trigger_feature` on user request. Both take `&mut self`, so
//! a host that delivers them from different threads has to wrap the
//! orchestrator in a single `Mutex`; the bundled CLI runs both from one
//! event loop.

mod observer;

pub use observer::{Observer, ObserverEvent, RecordingObserver};

use tracing::{debug, info};

use crate::config::{GameDescriptor, GameRegistry};
use crate::error::Result;
use crate::process::{ProcessLocator, ProcessProvider};
use crate::session::{ApplyError, GameSession};

/// Title shown while no supported game is connected.
pub const WAITING_TITLE: &str = "Waiting for game...";

/// Title shown while connected to `identity`.
pub fn connected_title(identity: &str) -> String {
    format!("Mod Menu - {}", identity)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConnectionState {
    Disconnected,
    Connected { identity: String },
}

/// Owns the at-most-one live `GameSession` and moves it through connect and
/// disconnect as games start and stop.
pub struct Orchestrator<P: ProcessProvider, O> {
    locator: ProcessLocator<P>,
    registry: GameRegistry,
    observer: O,
    session: Option<GameSession<P::Process>>,
}

impl<P, O> Orchestrator<P, O>
where
    P: ProcessProvider,
    O: Observer,
{
    pub fn new(provider: P, registry: GameRegistry, observer: O) -> Self {
        Self {
            locator: ProcessLocator::new(provider),
            registry,
            observer,
            session: None,
        }
    }

    pub fn state(&self) -> ConnectionState {
        match &self.session {
            Some(session) => ConnectionState::Connected {
                identity: session.identity().to_string(),
            },
            None => ConnectionState::Disconnected,
        }
    }

    pub fn is_connected(&self) -> bool {
        self.session.is_some()
    }

    pub fn session(&self) -> Option<&GameSession<P::Process>> {
        self.session.as_ref()
    }

    pub fn registry(&self) -> &GameRegistry {
        &self.registry
    }

    pub fn observer(&self) -> &O {
        &self.observer
    }

    pub fn observer_mut(&mut self) -> &mut O {
        &mut self.observer
    }

    /// `(key, label)` pairs of the connected game, empty while disconnected.
    pub fn available_features(&self) -> Vec<(String, String)> {
        self.session
            .as_ref()
            .map(|s| s.descriptor().feature_labels())
            .unwrap_or_default()
    }

    /// One polling step. Never fails: every problem becomes an observer log
    /// line and the next tick is the retry.
    pub fn tick(&mut self) {
        if let Some(session) = &self.session {
            let identity = session.identity().to_string();
            let running = session.is_alive()
                && self
                    .locator
                    .is_running(&session.descriptor().process_name);

            if running {
                match self.locator.find_supported(&self.registry) {
                    Some(game) if game.identity != identity => {
                        let next = game.identity.clone();
                        self.disconnect(&format!(
                            "Game '{}' detected, leaving '{}'.",
                            next, identity
                        ));
                    }
                    _ => return,
                }
            } else {
                self.disconnect(&format!("Game '{}' is no longer running.", identity));
            }
        }

        if let Err(e) = self.connect_detected() {
            debug!("Connect attempt failed: {}", e);
        }
    }

    /// Attach to the first running supported game unless already connected.
    ///
    /// Returns `Ok(false)` when no supported game is running. An attach
    /// failure has already been reported to the observer when it is returned.
    pub fn connect_detected(&mut self) -> Result<bool> {
        if self.session.is_some() {
            return Ok(true);
        }
        let Some(game) = self.locator.find_supported(&self.registry).cloned() else {
            return Ok(false);
        };
        self.connect(&game)?;
        Ok(true)
    }

    fn connect(&mut self, game: &GameDescriptor) -> Result<()> {
        info!("Game detected: {}. Connecting...", game.identity);

        let session = match GameSession::attach(self.locator.provider(), game) {
            Ok(session) => session,
            Err(e) => {
                let line = if e.is_process_not_found() {
                    format!(
                        "Failed to connect to '{}'. The process may have closed.",
                        game.process_name
                    )
                } else {
                    format!("Failed to connect to '{}': {}", game.process_name, e)
                };
                self.observer.on_log(&line);
                return Err(e);
            }
        };

        debug!(
            "Session for {} on PID {} (base {:#x}, {} pointers)",
            game.identity,
            session.accessor().pid(),
            session.accessor().base_address(),
            session.accessor().pointer_width()
        );
        self.session = Some(session);
        self.observer
            .on_title_changed(&connected_title(&game.identity));
        self.observer.on_features_available(&game.feature_labels());
        self.observer.on_log(&format!(
            "Connected to '{}' ({}).",
            game.process_name, game.identity
        ));
        Ok(())
    }

    fn disconnect(&mut self, reason: &str) {
        // Dropping the session closes the process handle
        if let Some(session) = self.session.take() {
            info!("Disconnecting from {}", session.identity());
        }
        self.observer.on_features_cleared();
        self.observer.on_title_changed(WAITING_TITLE);
        self.observer.on_log(reason);
    }

    /// Run a feature of the connected game and report the outcome.
    pub fn trigger_feature(&mut self, key: &str) -> std::result::Result<i64, ApplyError> {
        let Some(session) = &self.session else {
            let err = ApplyError::NotConnected;
            self.observer.on_log(&err.to_string());
            return Err(err);
        };

        match session.apply_feature(key) {
            Ok(applied) => {
                let mut line = format!(
                    "{} added! New value: {}",
                    capitalize(key),
                    format_thousands(applied.value)
                );
                let wrapped_at = session
                    .descriptor()
                    .feature(key)
                    .filter(|_| applied.wrapped)
                    .map(|f| f.width);
                if let Some(width) = wrapped_at {
                    line.push_str(&format!(" (wrapped at {})", width));
                }
                self.observer.on_log(&line);
                Ok(applied.value)
            }
            Err(e) => {
                self.observer.on_log(&e.to_string());
                Err(e)
            }
        }
    }

    /// Release the process handle without notifying the observer. Used at
    /// application exit.
    pub fn shutdown(&mut self) {
        if let Some(session) = self.session.take() {
            debug!("Releasing session for {}", session.identity());
        }
    }
}

fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// `1500050` -> `1,500,050`
pub fn format_thousands(value: i64) -> String {
    let digits = value.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if value < 0 {
        out.push('-');
    }
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_thousands() {
        assert_eq!(format_thousands(0), "0");
        assert_eq!(format_thousands(999), "999");
        assert_eq!(format_thousands(1000), "1,000");
        assert_eq!(format_thousands(1_500_050), "1,500,050");
        assert_eq!(format_thousands(-1_234_567), "-1,234,567");
        assert_eq!(format_thousands(i64::MIN), "-9,223,372,036,854,775,808");
    }

    #[test]
    fn test_capitalize() {
        assert_eq!(capitalize("money"), "Money");
        assert_eq!(capitalize("xp"), "Xp");
        assert_eq!(capitalize(""), "");
    }

    #[test]
    fn test_titles() {
        assert_eq!(connected_title("FlatOut 2"), "Mod Menu - FlatOut 2");
        assert_eq!(WAITING_TITLE, "Waiting for game...");
    }
}
