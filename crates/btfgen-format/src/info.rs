//! Bit packing of the `info` word and the INT trailing word.
//!
//! ```text
//! info: | 31..28 unused | 27..24 kind | 23..16 unused | 15..0 vlen |
//! int:  | 31..28 unused | 27..24 encoding | 23..16 offset | 15..8 unused | 7..0 bits |
//! ```

use super::constants::MAX_VLEN;
use super::kind::BtfKind;

/// INT encoding flags. Zero means unsigned.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default)]
pub struct IntEncoding(u8);

impl IntEncoding {
    pub const UNSIGNED: Self = Self(0);
    pub const SIGNED: Self = Self(1 << 0);
    pub const CHAR: Self = Self(1 << 1);
    pub const BOOL: Self = Self(1 << 2);

    pub fn from_bits(bits: u8) -> Self {
        Self(bits & 0x0f)
    }

    pub fn bits(self) -> u8 {
        self.0
    }

    pub fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    /// Display form: `UNSIGNED`, or set flags joined with `|`.
    pub fn describe(self) -> String {
        if self.0 == 0 {
            return "UNSIGNED".to_string();
        }
        let mut parts = Vec::new();
        for (flag, name) in [(Self::SIGNED, "SIGNED"), (Self::CHAR, "CHAR"), (Self::BOOL, "BOOL")] {
            if self.contains(flag) {
                parts.push(name);
            }
        }
        if parts.is_empty() {
            return format!("0x{:x}", self.0);
        }
        parts.join("|")
    }
}

/// Pack kind and vlen into an info word. `vlen` is truncated to 16 bits.
#[inline]
pub fn pack_info(kind: BtfKind, vlen: u32) -> u32 {
    ((kind as u32 & 0x0f) << 24) | (vlen & MAX_VLEN)
}

#[inline]
pub fn info_kind(info: u32) -> u8 {
    ((info >> 24) & 0x0f) as u8
}

#[inline]
pub fn info_vlen(info: u32) -> u32 {
    info & MAX_VLEN
}

/// Pack the INT trailing word. Offset and bits are truncated to 8 bits each.
#[inline]
pub fn pack_int(encoding: IntEncoding, offset: u32, bits: u32) -> u32 {
    ((encoding.bits() as u32 & 0x0f) << 24) | ((offset & 0xff) << 16) | (bits & 0xff)
}

#[inline]
pub fn int_encoding(word: u32) -> IntEncoding {
    IntEncoding::from_bits(((word & 0x0f00_0000) >> 24) as u8)
}

#[inline]
pub fn int_offset(word: u32) -> u32 {
    (word & 0x00ff_0000) >> 16
}

#[inline]
pub fn int_bits(word: u32) -> u32 {
    word & 0x0000_00ff
}
