use serde::{Deserialize, Serialize};
use strum::{Display, EnumString, IntoStaticStr};

use crate::error::Result;
use crate::memory::{ReadMemory, WriteMemory};

/// Size of a pointer in the target process.
///
/// Chosen per game: a 32-bit game stores 4-byte pointers even when the trainer
/// itself runs as a 64-bit process.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    IntoStaticStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum PointerWidth {
    #[default]
    X86,
    X64,
}

impl PointerWidth {
    pub fn size(self) -> usize {
        match self {
            Self::X86 => 4,
            Self::X64 => 8,
        }
    }

    /// Read a pointer of this width, zero-extended to u64.
    pub fn read_pointer<R: ReadMemory + ?Sized>(self, reader: &R, address: u64) -> Result<u64> {
        match self {
            Self::X86 => reader.read_u32(address).map(u64::from),
            Self::X64 => reader.read_u64(address),
        }
    }
}

/// In-memory representation of a feature's value: little-endian two's
/// complement at the given width.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    IntoStaticStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ValueWidth {
    #[default]
    I32,
    I64,
}

impl ValueWidth {
    pub fn size(self) -> usize {
        match self {
            Self::I32 => 4,
            Self::I64 => 8,
        }
    }

    /// Whether `value` is representable at this width.
    pub fn fits(self, value: i64) -> bool {
        match self {
            Self::I32 => i32::try_from(value).is_ok(),
            Self::I64 => true,
        }
    }

    pub fn read<R: ReadMemory + ?Sized>(self, reader: &R, address: u64) -> Result<i64> {
        match self {
            Self::I32 => reader.read_i32(address).map(i64::from),
            Self::I64 => reader.read_i64(address),
        }
    }

    /// Write `value` truncated to this width.
    pub fn write<W: WriteMemory + ?Sized>(self, writer: &W, address: u64, value: i64) -> Result<()> {
        match self {
            Self::I32 => writer.write_i32(address, value as i32),
            Self::I64 => writer.write_i64(address, value),
        }
    }

    /// Two's complement addition at this width. The flag is set when the sum
    /// wrapped around.
    pub fn overflowing_add(self, current: i64, increment: i64) -> (i64, bool) {
        match self {
            Self::I32 => {
                let (sum, wrapped) = (current as i32).overflowing_add(increment as i32);
                (i64::from(sum), wrapped || !self.fits(increment))
            }
            Self::I64 => current.overflowing_add(increment),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::process::mock::MockProcess;
    use std::str::FromStr;

    #[test]
    fn test_pointer_width_reads_zero_extended() {
        let process = MockProcess::builder()
            .write_u32(0, 0xFFFF_FFF0)
            .write_u32(4, 0x1234)
            .build();

        assert_eq!(PointerWidth::X86.read_pointer(&process, 0x1000).unwrap(), 0xFFFF_FFF0);
        assert_eq!(
            PointerWidth::X64.read_pointer(&process, 0x1000).unwrap(),
            0x0000_1234_FFFF_FFF0
        );
    }

    #[test]
    fn test_value_width_i32_overflow_wraps() {
        let (sum, wrapped) = ValueWidth::I32.overflowing_add(i32::MAX as i64, 1);
        assert_eq!(sum, i32::MIN as i64);
        assert!(wrapped);

        let (sum, wrapped) = ValueWidth::I32.overflowing_add(1000, 1_500_000);
        assert_eq!(sum, 1_501_000);
        assert!(!wrapped);
    }

    #[test]
    fn test_value_width_i64_has_headroom() {
        let (sum, wrapped) = ValueWidth::I64.overflowing_add(i32::MAX as i64, 1);
        assert_eq!(sum, i32::MAX as i64 + 1);
        assert!(!wrapped);
    }

    #[test]
    fn test_value_width_write_truncates() {
        let process = MockProcess::builder().with_size(8).build();

        ValueWidth::I32.write(&process, 0x1000, -2).unwrap();
        assert_eq!(process.peek_i32(0x1000), Some(-2));
        assert_eq!(process.peek_i32(0x1004), Some(0));
    }

    #[test]
    fn test_width_names() {
        assert_eq!(ValueWidth::from_str("i64").unwrap(), ValueWidth::I64);
        assert_eq!(PointerWidth::X64.to_string(), "x64");
        let parsed: PointerWidth = serde_json::from_str("\"x86\"").unwrap();
        assert_eq!(parsed, PointerWidth::X86);
    }
}
