//! Typed reads and writes through a pointer chain in an attached process.

use tracing::debug;

use crate::error::{Error, Result};
use crate::memory::{PointerWidth, ReadMemory, ValueWidth, WriteMemory};
use crate::process::{ProcessInfo, ProcessProvider};

/// An attached process plus the base address captured at attach time.
///
/// Chains are resolved from scratch on every call: intermediate pointers can
/// be reallocated by the game between two operations, so a resolved address is
/// never cached. Any failed hop aborts the operation before a value is read or
/// written.
pub struct MemoryAccessor<M> {
    process: M,
    process_name: String,
    pointer_width: PointerWidth,
    base_address: u64,
}

impl<M> MemoryAccessor<M>
where
    M: ProcessInfo + ReadMemory + WriteMemory,
{
    /// Open `process_name` and capture its main module base address.
    ///
    /// Fails with `Error::ProcessNotFound` when no such process exists, which
    /// includes the case where it exited after being detected.
    pub fn attach<P>(provider: &P, process_name: &str, pointer_width: PointerWidth) -> Result<Self>
    where
        P: ProcessProvider<Process = M>,
    {
        let process = provider.open_by_name(process_name)?;
        debug!(
            "Attached to {} (PID {}, base {:#x})",
            process_name,
            process.pid(),
            process.base_address()
        );
        Ok(Self::from_process(process, process_name, pointer_width))
    }

    pub fn from_process(process: M, process_name: &str, pointer_width: PointerWidth) -> Self {
        let base_address = process.base_address();
        Self {
            process,
            process_name: process_name.to_string(),
            pointer_width,
            base_address,
        }
    }

    pub fn base_address(&self) -> u64 {
        self.base_address
    }

    pub fn process_name(&self) -> &str {
        &self.process_name
    }

    pub fn pid(&self) -> u32 {
        self.process.pid()
    }

    pub fn pointer_width(&self) -> PointerWidth {
        self.pointer_width
    }

    pub fn is_alive(&self) -> bool {
        self.process.is_alive()
    }

    /// Walk the chain: `base + offsets[0]`, then for every further offset
    /// `read_pointer(address) + offset`.
    pub fn try_resolve_chain(&self, offsets: &[u64]) -> Result<u64> {
        let (first, rest) = offsets.split_first().ok_or(Error::EmptyChain)?;

        let mut address =
            self.base_address
                .checked_add(*first)
                .ok_or_else(|| Error::ChainResolutionFailed {
                    hop: 0,
                    address: self.base_address,
                    message: format!("offset {:#x} overflows the address space", first),
                })?;

        for (index, offset) in rest.iter().enumerate() {
            let hop = index + 1;
            let pointer = self
                .pointer_width
                .read_pointer(&self.process, address)
                .map_err(|e| Error::ChainResolutionFailed {
                    hop,
                    address,
                    message: e.to_string(),
                })?;

            if pointer == 0 {
                return Err(Error::ChainResolutionFailed {
                    hop,
                    address,
                    message: "null pointer".to_string(),
                });
            }

            address = pointer
                .checked_add(*offset)
                .ok_or_else(|| Error::ChainResolutionFailed {
                    hop,
                    address: pointer,
                    message: format!("offset {:#x} overflows the address space", offset),
                })?;
        }

        Ok(address)
    }

    /// Resolve the chain, or `None` if it is empty or any hop is unreadable.
    pub fn resolve_chain(&self, offsets: &[u64]) -> Option<u64> {
        self.try_resolve_chain(offsets)
            .inspect_err(|e| debug!("{}: {}", self.process_name, e))
            .ok()
    }

    pub fn try_read_value(&self, offsets: &[u64], width: ValueWidth) -> Result<i64> {
        let address = self.try_resolve_chain(offsets)?;
        width.read(&self.process, address)
    }

    pub fn read_value(&self, offsets: &[u64], width: ValueWidth) -> Option<i64> {
        self.try_read_value(offsets, width)
            .inspect_err(|e| debug!("{}: {}", self.process_name, e))
            .ok()
    }

    /// Resolve then write. Nothing is written unless the whole chain resolved.
    pub fn try_write_value(&self, offsets: &[u64], width: ValueWidth, value: i64) -> Result<()> {
        let address = self.try_resolve_chain(offsets)?;
        width.write(&self.process, address, value)
    }

    pub fn write_value(&self, offsets: &[u64], width: ValueWidth, value: i64) -> bool {
        self.try_write_value(offsets, width, value)
            .inspect_err(|e| debug!("{}: {}", self.process_name, e))
            .is_ok()
    }

    pub fn read_int(&self, offsets: &[u64]) -> Option<i32> {
        self.read_value(offsets, ValueWidth::I32).map(|v| v as i32)
    }

    pub fn write_int(&self, offsets: &[u64], value: i32) -> bool {
        self.write_value(offsets, ValueWidth::I32, i64::from(value))
    }
}
