//! The connection to one running game.

use thiserror::Error;
use tracing::{debug, warn};

use crate::config::{FeatureDescriptor, GameDescriptor};
use crate::error::{Error, Result};
use crate::memory::{MemoryAccessor, ReadMemory, WriteMemory};
use crate::process::{ProcessInfo, ProcessProvider};

/// Why a feature action did not happen. In every case the game's memory is
/// left untouched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApplyError {
    #[error("Not connected to a game.")]
    NotConnected,

    #[error("Offsets for '{0}' not found.")]
    UnknownFeature(String),

    #[error("Failed to read the value of '{feature}': {reason}")]
    ReadFailed { feature: String, reason: String },

    #[error("Failed to write the new value of '{feature}' ({value}): {reason}")]
    WriteFailed {
        feature: String,
        value: i64,
        reason: String,
    },
}

/// Outcome of a successful feature action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Applied {
    /// The value written back
    pub value: i64,
    /// Whether the addition overflowed the feature's width and wrapped
    pub wrapped: bool,
}

/// A game descriptor bound to an attached process.
///
/// Dropping the session drops the accessor and with it the OS process handle.
pub struct GameSession<M> {
    descriptor: GameDescriptor,
    accessor: MemoryAccessor<M>,
}

impl<M> GameSession<M>
where
    M: ProcessInfo + ReadMemory + WriteMemory,
{
    pub fn new(descriptor: GameDescriptor, accessor: MemoryAccessor<M>) -> Self {
        Self {
            descriptor,
            accessor,
        }
    }

    /// Attach to the descriptor's process.
    ///
    /// A process that is still listed but has already exited yields
    /// `Error::ProcessNotFound`, so a stale handle never becomes a session.
    pub fn attach<P>(provider: &P, descriptor: &GameDescriptor) -> Result<Self>
    where
        P: ProcessProvider<Process = M>,
    {
        let accessor =
            MemoryAccessor::attach(provider, &descriptor.process_name, descriptor.pointer_width)?;
        if !accessor.is_alive() {
            return Err(Error::ProcessNotFound(format!(
                "'{}' (PID {}) has already exited",
                descriptor.process_name,
                accessor.pid()
            )));
        }
        Ok(Self::new(descriptor.clone(), accessor))
    }

    pub fn descriptor(&self) -> &GameDescriptor {
        &self.descriptor
    }

    pub fn identity(&self) -> &str {
        &self.descriptor.identity
    }

    pub fn accessor(&self) -> &MemoryAccessor<M> {
        &self.accessor
    }

    pub fn is_alive(&self) -> bool {
        self.accessor.is_alive()
    }

    fn supported_feature(&self, key: &str) -> std::result::Result<&FeatureDescriptor, ApplyError> {
        self.descriptor
            .feature(key)
            .filter(|f| f.is_supported())
            .ok_or_else(|| ApplyError::UnknownFeature(key.to_string()))
    }

    /// Current value behind a feature's chain.
    pub fn read_feature(&self, key: &str) -> std::result::Result<i64, ApplyError> {
        let feature = self.supported_feature(key)?;
        self.accessor
            .try_read_value(&feature.offsets, feature.width)
            .map_err(|e| ApplyError::ReadFailed {
                feature: key.to_string(),
                reason: e.to_string(),
            })
    }

    /// Read the current value, add the configured increment and write it back.
    ///
    /// Addition wraps at the feature's width, the same way the game's own
    /// integer would; `Applied::wrapped` reports when that happened.
    pub fn apply_feature(&self, key: &str) -> std::result::Result<Applied, ApplyError> {
        let feature = self.supported_feature(key)?;
        let current = self.read_feature(key)?;

        let (new_value, wrapped) = feature.width.overflowing_add(current, feature.increment);
        if wrapped {
            warn!(
                "{} + {} wrapped around at {} for '{}' (new value {})",
                current, feature.increment, feature.width, key, new_value
            );
        }

        self.accessor
            .try_write_value(&feature.offsets, feature.width, new_value)
            .map_err(|e| ApplyError::WriteFailed {
                feature: key.to_string(),
                value: new_value,
                reason: e.to_string(),
            })?;

        debug!("{}: {} {} -> {}", self.identity(), key, current, new_value);
        Ok(Applied {
            value: new_value,
            wrapped,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{PointerWidth, ValueWidth};
    use crate::process::mock::{MockProcess, MockProcessProvider};

    const BASE: u64 = 0x400000;

    fn descriptor() -> GameDescriptor {
        GameDescriptor {
            identity: "Test Game".to_string(),
            process_name: "Game.exe".to_string(),
            pointer_width: PointerWidth::X86,
            features: vec![
                FeatureDescriptor {
                    key: "money".to_string(),
                    label: "Add Money".to_string(),
                    offsets: vec![0x10, 0x4, 0x8],
                    increment: 1_500_000,
                    width: ValueWidth::I32,
                },
                FeatureDescriptor {
                    key: "xp".to_string(),
                    label: "Add XP".to_string(),
                    offsets: vec![],
                    increment: 1,
                    width: ValueWidth::I32,
                },
            ],
        }
    }

    fn process_with_money(money: i32) -> MockProcess {
        MockProcess::builder()
            .base(BASE)
            .with_size(0x300)
            .write_u32(0x10, 0x400100)
            .write_u32(0x104, 0x400200)
            .write_i32(0x208, money)
            .build()
    }

    fn session(process: MockProcess) -> GameSession<MockProcess> {
        let accessor = MemoryAccessor::from_process(process, "Game.exe", PointerWidth::X86);
        GameSession::new(descriptor(), accessor)
    }

    #[test]
    fn test_apply_adds_increment() {
        let process = process_with_money(50);
        let session = session(process.clone());

        assert_eq!(
            session.apply_feature("money"),
            Ok(Applied {
                value: 1_500_050,
                wrapped: false
            })
        );
        assert_eq!(session.read_feature("money"), Ok(1_500_050));
        assert_eq!(process.peek_i32(0x400208), Some(1_500_050));
    }

    #[test]
    fn test_apply_is_arithmetically_exact() {
        let session = session(process_with_money(1000));

        assert_eq!(session.apply_feature("money").map(|a| a.value), Ok(1_501_000));
        assert_eq!(session.accessor().read_int(&[0x10, 0x4, 0x8]), Some(1_501_000));
    }

    #[test]
    fn test_apply_twice_accumulates() {
        let session = session(process_with_money(0));

        session.apply_feature("money").unwrap();
        assert_eq!(session.apply_feature("money").map(|a| a.value), Ok(3_000_000));
    }

    #[test]
    fn test_unknown_feature_touches_no_memory() {
        let process = process_with_money(50);
        let session = session(process.clone());

        assert_eq!(
            session.apply_feature("health"),
            Err(ApplyError::UnknownFeature("health".to_string()))
        );
        assert_eq!(process.read_count(), 0);
        assert_eq!(process.write_count(), 0);
    }

    #[test]
    fn test_empty_chain_is_unknown_feature() {
        let process = process_with_money(50);
        let session = session(process.clone());

        assert_eq!(
            session.apply_feature("xp"),
            Err(ApplyError::UnknownFeature("xp".to_string()))
        );
        assert_eq!(process.read_count(), 0);
    }

    #[test]
    fn test_broken_chain_is_read_failure() {
        let process = MockProcess::builder().base(BASE).with_size(0x300).build();
        let session = session(process.clone());

        let result = session.apply_feature("money");
        assert!(matches!(result, Err(ApplyError::ReadFailed { ref feature, .. }) if feature == "money"));
        assert_eq!(process.write_count(), 0);
    }

    #[test]
    fn test_dead_process_is_read_failure() {
        let process = process_with_money(50);
        let session = session(process.clone());
        process.kill();

        assert!(!session.is_alive());
        assert!(matches!(
            session.apply_feature("money"),
            Err(ApplyError::ReadFailed { .. })
        ));
        assert_eq!(process.write_count(), 0);
    }

    #[test]
    fn test_i32_wraps_natively() {
        let process = process_with_money(i32::MAX - 10);
        let session = session(process.clone());

        let expected = (i32::MAX - 10).wrapping_add(1_500_000);
        assert_eq!(
            session.apply_feature("money"),
            Ok(Applied {
                value: i64::from(expected),
                wrapped: true
            })
        );
        assert_eq!(process.peek_i32(0x400208), Some(expected));
    }

    #[test]
    fn test_attach_rejects_exited_process() {
        let provider = MockProcessProvider::new();
        let process = process_with_money(7);
        provider.spawn("Game.exe", process.clone());
        process.kill();

        let result = GameSession::attach(&provider, &descriptor());
        assert!(matches!(result, Err(ref e) if e.is_process_not_found()));
        assert_eq!(provider.open_count(), 1);
    }

    #[test]
    fn test_attach_via_provider() {
        let provider = MockProcessProvider::new();
        provider.spawn("game.exe", process_with_money(7));

        let session = GameSession::attach(&provider, &descriptor()).unwrap();
        assert_eq!(session.identity(), "Test Game");
        assert_eq!(session.read_feature("money"), Ok(7));
    }
}
