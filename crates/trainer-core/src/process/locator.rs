//! Detection of supported games in the OS process list.

use tracing::debug;

use crate::config::{GameDescriptor, GameRegistry};
use crate::process::ProcessProvider;

/// Answers "is this process running?" and "which supported game is running?".
///
/// Enumeration failures are never surfaced: a process list that cannot be read
/// counts as "nothing running", and the next poll tick tries again.
pub struct ProcessLocator<P> {
    provider: P,
}

impl<P: ProcessProvider> ProcessLocator<P> {
    pub fn new(provider: P) -> Self {
        Self { provider }
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// Case-insensitive exact match of `process_name` against the live process list.
    pub fn is_running(&self, process_name: &str) -> bool {
        match self.provider.process_names() {
            Ok(names) => names
                .iter()
                .any(|name| name.eq_ignore_ascii_case(process_name)),
            Err(e) => {
                debug!("Process enumeration failed: {}", e);
                false
            }
        }
    }

    /// First registry entry (in definition order) whose process is running.
    pub fn find_supported<'r>(&self, registry: &'r GameRegistry) -> Option<&'r GameDescriptor> {
        let names = match self.provider.process_names() {
            Ok(names) => names,
            Err(e) => {
                debug!("Process enumeration failed: {}", e);
                return None;
            }
        };

        registry.iter().find(|game| {
            names
                .iter()
                .any(|name| name.eq_ignore_ascii_case(&game.process_name))
        })
    }
}
