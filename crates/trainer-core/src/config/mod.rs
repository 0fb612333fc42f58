//! Configuration: the game registry and policy constants.
//!
//! - `GameRegistry` / `GameDescriptor` - supported games, built in or loaded from JSON
//! - `timing` - polling intervals

mod loader;
mod registry;

pub use crate::memory::{PointerWidth, ValueWidth};
pub use loader::*;
pub use registry::*;

/// Timing constants for the polling loop.
pub mod timing {
    use std::time::Duration;

    /// Interval between process detection ticks. Re-armed after every tick.
    pub const POLL_INTERVAL: Duration = Duration::from_millis(3000);

    /// How long the front end waits for input before checking the timer again.
    pub const INPUT_POLL_INTERVAL: Duration = Duration::from_millis(100);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timing_constants() {
        assert_eq!(timing::POLL_INTERVAL.as_millis(), 3000);
        assert!(timing::INPUT_POLL_INTERVAL < timing::POLL_INTERVAL);
    }
}
