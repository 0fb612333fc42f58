//! Process provider abstraction for testability.
//!
//! This module provides traits that abstract process discovery and access,
//! enabling mock implementations for testing without a running game process.

use crate::error::Result;
use crate::memory::{ReadMemory, WriteMemory};

/// Trait for accessing process information.
///
/// This trait abstracts the properties of an attached process, allowing
/// mock implementations for testing.
pub trait ProcessInfo {
    /// Get the process ID.
    fn pid(&self) -> u32;

    /// Get the load address of the main module.
    fn base_address(&self) -> u64;

    /// Check if the process is still running.
    fn is_alive(&self) -> bool;
}

/// Trait for enumerating and opening processes.
///
/// This trait abstracts the OS process list, allowing mock implementations
/// that don't require actual system processes.
pub trait ProcessProvider {
    /// The type of attached process returned by this provider.
    type Process: ProcessInfo + ReadMemory + WriteMemory;

    /// Names of all processes currently running.
    ///
    /// Entries whose name cannot be read are skipped rather than failing the
    /// whole enumeration.
    fn process_names(&self) -> Result<Vec<String>>;

    /// Open the first running process whose executable name matches `name`
    /// (ASCII case-insensitive) for memory reading and writing.
    fn open_by_name(&self, name: &str) -> Result<Self::Process>;
}

/// The real OS process list.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemProcessProvider;

impl SystemProcessProvider {
    pub fn new() -> Self {
        Self
    }
}

impl ProcessProvider for SystemProcessProvider {
    type Process = super::ProcessHandle;

    fn process_names(&self) -> Result<Vec<String>> {
        super::handle::enumerate_process_names()
    }

    fn open_by_name(&self, name: &str) -> Result<Self::Process> {
        super::ProcessHandle::find_and_open(name)
    }
}
