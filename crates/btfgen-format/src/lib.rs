#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! BTF (BPF Type Format) wire format.
//!
//! This crate contains:
//! - Format constants, `BtfKind` and the info/int word packing helpers
//! - Fixed-size records (header, type prefix, enum/array/member payloads)
//! - Endian-aware byte writing (`ByteSink`) and reading
//! - A decoder (`BtfModule`) and a human-readable dump

mod bytes;
mod constants;
mod dump;
mod header;
mod info;
mod kind;
mod module;
mod records;

#[cfg(test)]
mod info_tests;
#[cfg(test)]
mod kind_tests;
#[cfg(test)]
mod test_utils;

pub use bytes::{ByteReader, ByteSink, ByteWriter, Endian};
pub use constants::{
    ARRAY_LEN, ENUM_LEN, HEADER_LEN, INT_LEN, MAGIC, MAX_VLEN, MEMBER_LEN, PARAM_LEN,
    TYPE_PREFIX_LEN, VERSION,
};
pub use dump::{dump, type_name};
pub use header::Header;
pub use info::{IntEncoding, int_bits, int_encoding, int_offset, pack_info, pack_int};
pub use info::{info_kind, info_vlen};
pub use kind::{BtfKind, KIND_NAMES};
pub use module::{BtfModule, DecodedType, FormatError, TypeData};
pub use records::{BtfArray, BtfEnum, BtfMember, BtfType};
