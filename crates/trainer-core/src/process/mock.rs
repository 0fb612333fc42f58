//! Mock process and process list for testing
//!
//! Provides an in-memory address space implementing `ReadMemory`, `WriteMemory`
//! and `ProcessInfo`, plus a `ProcessProvider` whose process list can be changed
//! between calls. Clones share state, so a test can keep a handle to a process
//! after handing it to a session and inspect what happened to it.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::error::{Error, Result};
use crate::memory::{ReadMemory, WriteMemory};
use crate::process::{ProcessInfo, ProcessProvider};

#[derive(Debug)]
struct MockState {
    data: Vec<u8>,
    alive: bool,
    reads: usize,
    writes: usize,
}

/// Mock attached process backed by a byte buffer starting at `base`.
#[derive(Debug, Clone)]
pub struct MockProcess {
    pid: u32,
    base: u64,
    state: Arc<Mutex<MockState>>,
}

impl MockProcess {
    /// Start building a mock process with base address 0x1000
    pub fn builder() -> MockProcessBuilder {
        MockProcessBuilder::new()
    }

    fn state(&self) -> MutexGuard<'_, MockState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Simulate process exit. Every later read and write fails.
    pub fn kill(&self) {
        self.state().alive = false;
    }

    /// Number of read calls made against this process (including failed ones)
    pub fn read_count(&self) -> usize {
        self.state().reads
    }

    /// Number of write calls made against this process (including failed ones)
    pub fn write_count(&self) -> usize {
        self.state().writes
    }

    /// Read an i32 without counting it as an access; for test assertions
    pub fn peek_i32(&self, address: u64) -> Option<i32> {
        let state = self.state();
        let range = self.range(&state, address, 4).ok()?;
        let bytes = &state.data[range];
        Some(i32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
    }

    /// Read an i64 without counting it as an access; for test assertions
    pub fn peek_i64(&self, address: u64) -> Option<i64> {
        let state = self.state();
        let range = self.range(&state, address, 8).ok()?;
        let mut buf = [0u8; 8];
        buf.copy_from_slice(&state.data[range]);
        Some(i64::from_le_bytes(buf))
    }

    /// Snapshot of the whole address space
    pub fn snapshot(&self) -> Vec<u8> {
        self.state().data.clone()
    }

    fn range(
        &self,
        state: &MockState,
        address: u64,
        size: usize,
    ) -> std::result::Result<std::ops::Range<usize>, String> {
        if !state.alive {
            return Err("Process has exited".to_string());
        }
        if address < self.base {
            return Err(format!("Address below base (base=0x{:X})", self.base));
        }
        let offset = (address - self.base) as usize;
        match offset.checked_add(size) {
            Some(end) if end <= state.data.len() => Ok(offset..end),
            _ => Err(format!(
                "Out of bounds: offset={}, size={}, len={}",
                offset,
                size,
                state.data.len()
            )),
        }
    }
}

impl ReadMemory for MockProcess {
    fn read_bytes(&self, address: u64, size: usize) -> Result<Vec<u8>> {
        let mut state = self.state();
        state.reads += 1;
        let range = self
            .range(&state, address, size)
            .map_err(|message| Error::MemoryReadFailed { address, message })?;
        Ok(state.data[range].to_vec())
    }
}

impl WriteMemory for MockProcess {
    fn write_bytes(&self, address: u64, bytes: &[u8]) -> Result<()> {
        let mut state = self.state();
        state.writes += 1;
        let range = self
            .range(&state, address, bytes.len())
            .map_err(|message| Error::MemoryWriteFailed { address, message })?;
        state.data[range].copy_from_slice(bytes);
        Ok(())
    }
}

impl ProcessInfo for MockProcess {
    fn pid(&self) -> u32 {
        self.pid
    }

    fn base_address(&self) -> u64 {
        self.base
    }

    fn is_alive(&self) -> bool {
        self.state().alive
    }
}

/// Builder for mock process memory layouts
///
/// Offsets passed to the `write_*` methods are relative to the base address.
#[derive(Debug, Clone)]
pub struct MockProcessBuilder {
    data: Vec<u8>,
    base: u64,
    pid: u32,
}

impl Default for MockProcessBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl MockProcessBuilder {
    pub fn new() -> Self {
        Self {
            data: Vec::new(),
            base: 0x1000,
            pid: 4242,
        }
    }

    pub fn base(mut self, base: u64) -> Self {
        self.base = base;
        self
    }

    pub fn pid(mut self, pid: u32) -> Self {
        self.pid = pid;
        self
    }

    /// Pre-allocate buffer with zeros up to the specified size
    pub fn with_size(mut self, size: usize) -> Self {
        self.data.resize(size, 0);
        self
    }

    pub fn write_i32(mut self, offset: usize, value: i32) -> Self {
        self.put(offset, &value.to_le_bytes());
        self
    }

    pub fn write_u32(mut self, offset: usize, value: u32) -> Self {
        self.put(offset, &value.to_le_bytes());
        self
    }

    pub fn write_i64(mut self, offset: usize, value: i64) -> Self {
        self.put(offset, &value.to_le_bytes());
        self
    }

    pub fn write_u64(mut self, offset: usize, value: u64) -> Self {
        self.put(offset, &value.to_le_bytes());
        self
    }

    pub fn build(self) -> MockProcess {
        MockProcess {
            pid: self.pid,
            base: self.base,
            state: Arc::new(Mutex::new(MockState {
                data: self.data,
                alive: true,
                reads: 0,
                writes: 0,
            })),
        }
    }

    fn put(&mut self, offset: usize, bytes: &[u8]) {
        if self.data.len() < offset + bytes.len() {
            self.data.resize(offset + bytes.len(), 0);
        }
        self.data[offset..offset + bytes.len()].copy_from_slice(bytes);
    }
}

#[derive(Debug, Default)]
struct MockListing {
    entries: Vec<(String, Option<MockProcess>)>,
    denied: Vec<String>,
    enumeration_fails: bool,
    opens: usize,
}

/// Mock OS process list
#[derive(Debug, Clone, Default)]
pub struct MockProcessProvider {
    listing: Arc<Mutex<MockListing>>,
}

impl MockProcessProvider {
    pub fn new() -> Self {
        Self::default()
    }

    fn listing(&self) -> MutexGuard<'_, MockListing> {
        self.listing.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Add a running process that can be attached to
    pub fn spawn(&self, name: &str, process: MockProcess) {
        self.listing().entries.push((name.to_string(), Some(process)));
    }

    /// Add a process that shows up in the list but is gone by the time it is
    /// opened
    pub fn spawn_vanishing(&self, name: &str) {
        self.listing().entries.push((name.to_string(), None));
    }

    /// Add a process that is listed but refuses to be opened, like a game
    /// running elevated when the trainer is not
    pub fn spawn_denied(&self, name: &str) {
        let mut listing = self.listing();
        listing.entries.push((name.to_string(), None));
        listing.denied.push(name.to_string());
    }

    /// Remove every process with this name from the list and kill it
    pub fn exit(&self, name: &str) {
        let mut listing = self.listing();
        listing.denied.retain(|entry| !entry.eq_ignore_ascii_case(name));
        listing.entries.retain(|(entry, process)| {
            if entry.eq_ignore_ascii_case(name) {
                if let Some(process) = process {
                    process.kill();
                }
                false
            } else {
                true
            }
        });
    }

    /// Make `process_names` fail until reset
    pub fn fail_enumeration(&self, fails: bool) {
        self.listing().enumeration_fails = fails;
    }

    /// Number of successful `open_by_name` calls
    pub fn open_count(&self) -> usize {
        self.listing().opens
    }
}

impl ProcessProvider for MockProcessProvider {
    type Process = MockProcess;

    fn process_names(&self) -> Result<Vec<String>> {
        let listing = self.listing();
        if listing.enumeration_fails {
            return Err(Error::ProcessNotFound(
                "Mock process enumeration failed".to_string(),
            ));
        }
        Ok(listing
            .entries
            .iter()
            .map(|(name, _)| name.clone())
            .collect())
    }

    fn open_by_name(&self, name: &str) -> Result<Self::Process> {
        let mut listing = self.listing();
        if listing.denied.iter().any(|entry| entry.eq_ignore_ascii_case(name)) {
            return Err(Error::ProcessOpenFailed(format!(
                "Access is denied opening '{}'",
                name
            )));
        }
        let process = listing
            .entries
            .iter()
            .find(|(entry, _)| entry.eq_ignore_ascii_case(name))
            .and_then(|(_, process)| process.clone())
            .ok_or_else(|| Error::ProcessNotFound(format!("Mock process '{}' not found", name)))?;
        listing.opens += 1;
        Ok(process)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_basic() {
        let process = MockProcess::builder()
            .write_i32(0, 0x12345678)
            .write_u64(4, 0xDEADBEEFCAFEBABE)
            .build();

        assert_eq!(process.read_i32(0x1000).unwrap(), 0x12345678);
        assert_eq!(process.read_u64(0x1004).unwrap(), 0xDEADBEEFCAFEBABE);
        assert_eq!(process.read_count(), 2);
    }

    #[test]
    fn test_builder_with_base() {
        let process = MockProcess::builder()
            .base(0x400000)
            .write_i32(0, 42)
            .build();

        assert_eq!(process.base_address(), 0x400000);
        assert_eq!(process.read_i32(0x400000).unwrap(), 42);
    }

    #[test]
    fn test_below_base_fails() {
        let process = MockProcess::builder().base(0x2000).with_size(4).build();

        assert!(process.read_bytes(0x1000, 4).is_err());
    }

    #[test]
    fn test_killed_process_rejects_access() {
        let process = MockProcess::builder().write_i32(0, 5).build();
        process.kill();

        assert!(!process.is_alive());
        assert!(process.read_i32(0x1000).is_err());
        assert!(process.write_i32(0x1000, 6).is_err());
        assert_eq!(process.write_count(), 1);
    }

    #[test]
    fn test_clones_share_memory() {
        let process = MockProcess::builder().with_size(4).build();
        let observer = process.clone();

        process.write_i32(0x1000, 77).unwrap();
        assert_eq!(observer.peek_i32(0x1000), Some(77));
    }

    #[test]
    fn test_provider_lists_and_opens() {
        let provider = MockProcessProvider::new();
        provider.spawn("Game.exe", MockProcess::builder().pid(7).build());

        assert_eq!(provider.process_names().unwrap(), vec!["Game.exe"]);
        let process = provider.open_by_name("game.EXE").unwrap();
        assert_eq!(process.pid(), 7);
        assert_eq!(provider.open_count(), 1);
    }

    #[test]
    fn test_provider_vanishing_process() {
        let provider = MockProcessProvider::new();
        provider.spawn_vanishing("Game.exe");

        assert_eq!(provider.process_names().unwrap().len(), 1);
        let result = provider.open_by_name("Game.exe");
        assert!(matches!(result, Err(Error::ProcessNotFound(_))));
        assert_eq!(provider.open_count(), 0);
    }

    #[test]
    fn test_provider_denied_process() {
        let provider = MockProcessProvider::new();
        provider.spawn_denied("Game.exe");

        assert_eq!(provider.process_names().unwrap(), vec!["Game.exe"]);
        let result = provider.open_by_name("GAME.exe");
        assert!(matches!(result, Err(Error::ProcessOpenFailed(_))));

        provider.exit("Game.exe");
        assert!(provider.process_names().unwrap().is_empty());
    }

    #[test]
    fn test_provider_exit_kills_process() {
        let provider = MockProcessProvider::new();
        let process = MockProcess::builder().build();
        provider.spawn("Game.exe", process.clone());

        provider.exit("Game.exe");
        assert!(provider.process_names().unwrap().is_empty());
        assert!(!process.is_alive());
    }

    #[test]
    fn test_provider_enumeration_failure() {
        let provider = MockProcessProvider::new();
        provider.fail_enumeration(true);

        assert!(provider.process_names().is_err());
    }
}
