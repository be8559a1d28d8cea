//! Fixed-size BTF records.

use super::bytes::ByteSink;
use super::info::{info_kind, info_vlen, pack_info};
use super::kind::BtfKind;

/// Common prefix of every type entry (`struct btf_type`).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[repr(C)]
pub struct BtfType {
    pub name_off: u32,
    pub info: u32,
    /// Size in bytes for INT/ENUM/STRUCT/UNION, referenced type index otherwise.
    pub size_or_type: u32,
}

const _: () = assert!(std::mem::size_of::<BtfType>() == 12);

impl BtfType {
    pub fn new(kind: BtfKind, vlen: u32, size_or_type: u32) -> Self {
        Self {
            name_off: 0,
            info: pack_info(kind, vlen),
            size_or_type,
        }
    }

    /// Raw kind discriminant from the info word.
    pub fn kind_raw(&self) -> u8 {
        info_kind(self.info)
    }

    /// Decoded kind, `None` for out-of-range discriminants.
    pub fn kind(&self) -> Option<BtfKind> {
        BtfKind::from_u8(self.kind_raw())
    }

    pub fn vlen(&self) -> u32 {
        info_vlen(self.info)
    }

    pub fn encode<S: ByteSink + ?Sized>(&self, sink: &mut S) {
        sink.emit_u32(self.name_off);
        sink.emit_u32(self.info);
        sink.emit_u32(self.size_or_type);
    }
}

/// One enumerator (`struct btf_enum`).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[repr(C)]
pub struct BtfEnum {
    pub name_off: u32,
    pub val: i32,
}

const _: () = assert!(std::mem::size_of::<BtfEnum>() == 8);

impl BtfEnum {
    pub fn encode<S: ByteSink + ?Sized>(&self, sink: &mut S) {
        sink.emit_u32(self.name_off);
        sink.emit_i32(self.val);
    }
}

/// Array payload (`struct btf_array`).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[repr(C)]
pub struct BtfArray {
    pub elem_type: u32,
    pub index_type: u32,
    pub nelems: u32,
}

const _: () = assert!(std::mem::size_of::<BtfArray>() == 12);

impl BtfArray {
    pub fn encode<S: ByteSink + ?Sized>(&self, sink: &mut S) {
        sink.emit_u32(self.elem_type);
        sink.emit_u32(self.index_type);
        sink.emit_u32(self.nelems);
    }
}

/// Struct/union member (`struct btf_member`).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[repr(C)]
pub struct BtfMember {
    pub name_off: u32,
    pub type_id: u32,
    /// Offset in bits from the start of the aggregate.
    pub offset: u32,
}

const _: () = assert!(std::mem::size_of::<BtfMember>() == 12);

impl BtfMember {
    pub fn encode<S: ByteSink + ?Sized>(&self, sink: &mut S) {
        sink.emit_u32(self.name_off);
        sink.emit_u32(self.type_id);
        sink.emit_u32(self.offset);
    }
}
