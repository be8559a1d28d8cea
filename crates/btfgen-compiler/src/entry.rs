//! Type entries: one BTF record per translated node.
//!
//! An entry is built in two steps. Construction (phase 1) fixes everything
//! that depends on the node alone: kind, vlen, size, the INT word. Completion
//! (phase 2) runs once every entry has an id and fills in names and type
//! indices.

use std::collections::HashMap;

use btfgen_core::{Attr, Die, DieId, Tag};
use btfgen_format::{
    ARRAY_LEN, BtfArray, BtfEnum, BtfKind, BtfMember, BtfType, ByteSink, ENUM_LEN, INT_LEN,
    MAX_VLEN, MEMBER_LEN, PARAM_LEN, TYPE_PREFIX_LEN, pack_int,
};

use super::classify::{base_type_encoding, classify};
use super::string_table::StringTable;

/// Trailing data of an entry, by variant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Payload {
    /// PTR, CONST, VOLATILE, RESTRICT, TYPEDEF, FWD: nothing after the prefix.
    Reference,
    Int { word: u32 },
    Enum { values: Vec<BtfEnum> },
    /// Filled during completion.
    Array { array: BtfArray },
    Composite { members: Vec<BtfMember> },
    Func { params: Vec<u32> },
}

/// Node → entry id map, frozen once phase 1 ends.
#[derive(Debug, Clone, Default)]
pub(crate) struct TypeIds {
    map: HashMap<DieId, u32>,
}

impl TypeIds {
    pub(crate) fn insert(&mut self, die: DieId, id: u32) {
        self.map.insert(die, id);
    }

    /// Wire index of the node's entry: id + 1, or 0 when it has none.
    pub(crate) fn index_of(&self, die: DieId) -> u32 {
        self.map.get(&die).map_or(0, |id| id + 1)
    }

    /// Wire index of whatever `attr` on `die` points at.
    pub(crate) fn index_via(&self, die: Die<'_>, attr: Attr) -> u32 {
        die.reference(attr).map_or(0, |target| self.index_of(target.id()))
    }
}

/// What completion reads and writes besides the entry itself.
pub(crate) struct Completion<'a> {
    pub(crate) ids: &'a TypeIds,
    pub(crate) strings: &'a mut StringTable,
}

impl Completion<'_> {
    /// Intern an optional name; absent names map to offset 0 without a new string.
    fn name(&mut self, name: Option<&str>) -> u32 {
        name.map_or(0, |n| self.strings.add(n))
    }
}

/// One type record together with the node it came from.
#[derive(Debug, Clone)]
pub struct TypeEntry<'t> {
    die: Die<'t>,
    id: u32,
    kind: BtfKind,
    ty: BtfType,
    payload: Payload,
}

impl<'t> TypeEntry<'t> {
    /// Construct the entry for `die` as `kind`. `None` for `Unknown`.
    pub fn new(kind: BtfKind, die: Die<'t>, id: u32) -> Option<Self> {
        debug_assert!(
            kind == BtfKind::Func || kind == BtfKind::FuncProto || kind == classify(die),
            "{die:?} does not classify as {kind}"
        );

        let (ty, payload) = match kind {
            BtfKind::Unknown => return None,
            BtfKind::Ptr
            | BtfKind::Typedef
            | BtfKind::Volatile
            | BtfKind::Const
            | BtfKind::Restrict
            | BtfKind::Forward => (BtfType::new(kind, 0, 0), Payload::Reference),
            BtfKind::Int => {
                let size = byte_size(die);
                let encoding = base_type_encoding(die).unwrap_or_default();
                let offset = die.int(Attr::BitOffset).unwrap_or(0) as u32;
                let bits = match die.int(Attr::BitSize) {
                    Some(bits) => bits as u32,
                    None => size.wrapping_mul(8),
                };
                let word = pack_int(encoding, offset, bits);
                (BtfType::new(kind, 0, size), Payload::Int { word })
            }
            BtfKind::Enum => {
                let vlen = count(die, Tag::Enumerator);
                let values = Vec::with_capacity(vlen as usize);
                (BtfType::new(kind, vlen, byte_size(die)), Payload::Enum { values })
            }
            BtfKind::Array => (
                BtfType::new(kind, 0, 0),
                Payload::Array {
                    array: BtfArray::default(),
                },
            ),
            BtfKind::Struct | BtfKind::Union => {
                let vlen = count(die, Tag::Member);
                let members = Vec::with_capacity(vlen as usize);
                (
                    BtfType::new(kind, vlen, byte_size(die)),
                    Payload::Composite { members },
                )
            }
            BtfKind::Func | BtfKind::FuncProto => {
                let vlen = count(die, Tag::FormalParameter);
                let params = Vec::with_capacity(vlen as usize);
                (BtfType::new(kind, vlen, 0), Payload::Func { params })
            }
        };

        Some(Self {
            die,
            id,
            kind,
            ty,
            payload,
        })
    }

    /// 0-based entry id. The wire index is `id + 1`.
    pub fn id(&self) -> u32 {
        self.id
    }

    pub fn kind(&self) -> BtfKind {
        self.kind
    }

    pub fn die(&self) -> Die<'t> {
        self.die
    }

    pub fn btf_type(&self) -> &BtfType {
        &self.ty
    }

    pub fn payload(&self) -> &Payload {
        &self.payload
    }

    pub fn name_off(&self) -> u32 {
        self.ty.name_off
    }

    pub fn vlen(&self) -> u32 {
        self.ty.vlen()
    }

    /// Serialized size: prefix plus trailing payload.
    pub fn size(&self) -> u32 {
        let vlen = self.vlen() as usize;
        let trailing = match &self.payload {
            Payload::Reference => 0,
            Payload::Int { .. } => INT_LEN,
            Payload::Enum { .. } => vlen * ENUM_LEN,
            Payload::Array { .. } => ARRAY_LEN,
            Payload::Composite { .. } => vlen * MEMBER_LEN,
            Payload::Func { .. } => vlen * PARAM_LEN,
        };
        (TYPE_PREFIX_LEN + trailing) as u32
    }

    /// Phase 2: names, type indices and per-child payloads.
    pub(crate) fn complete(&mut self, cx: &mut Completion<'_>) {
        let die = self.die;
        let vlen = self.vlen() as usize;
        match &mut self.payload {
            Payload::Reference => {
                self.ty.name_off = 0;
                self.ty.size_or_type = cx.ids.index_via(die, Attr::Type);
            }
            Payload::Int { .. } => {
                self.ty.name_off = cx.name(die.name());
            }
            Payload::Enum { values } => {
                self.ty.name_off = cx.name(die.name());
                values.clear();
                for child in die.children_with(Tag::Enumerator).take(vlen) {
                    let name_off = cx.name(child.name());
                    let val = child.int(Attr::ConstValue).unwrap_or(0) as i32;
                    values.push(BtfEnum { name_off, val });
                }
            }
            Payload::Array { array } => {
                self.ty.name_off = cx.name(die.name());
                *array = complete_array(die, cx.ids);
            }
            Payload::Composite { members } => {
                self.ty.name_off = cx.name(die.name());
                members.clear();
                for child in die.children_with(Tag::Member).take(vlen) {
                    members.push(BtfMember {
                        name_off: cx.name(child.name()),
                        type_id: cx.ids.index_via(child, Attr::Type),
                        offset: member_bit_offset(child),
                    });
                }
            }
            Payload::Func { params } => {
                let name = die.name().or_else(|| die.type_ref().and_then(|t| t.name()));
                self.ty.name_off = cx.name(name);
                params.clear();
                for child in die.children_with(Tag::FormalParameter).take(vlen) {
                    params.push(cx.ids.index_via(child, Attr::Type));
                }
            }
        }
    }

    /// Write the record in wire order.
    pub fn encode<S: ByteSink + ?Sized>(&self, sink: &mut S) {
        self.ty.encode(sink);
        match &self.payload {
            Payload::Reference => {}
            Payload::Int { word } => sink.emit_u32(*word),
            Payload::Enum { values } => values.iter().for_each(|v| v.encode(sink)),
            Payload::Array { array } => array.encode(sink),
            Payload::Composite { members } => members.iter().for_each(|m| m.encode(sink)),
            Payload::Func { params } => params.iter().for_each(|&p| sink.emit_u32(p)),
        }
    }
}

/// `byte_size` truncated to 32 bits, 0 when absent.
fn byte_size(die: Die<'_>) -> u32 {
    die.int(Attr::ByteSize).unwrap_or(0) as u32
}

/// Children with `tag`, as a vlen.
fn count(die: Die<'_>, tag: Tag) -> u32 {
    (die.children_with(tag).count() as u32) & MAX_VLEN
}

/// Element type, index type and length of the array a variable points at.
///
/// Only the first subrange is used; BTF arrays are one-dimensional.
fn complete_array(variable: Die<'_>, ids: &TypeIds) -> BtfArray {
    let Some(array_type) = variable.type_ref() else {
        return BtfArray::default();
    };
    let elem_type = ids.index_via(array_type, Attr::Type);

    let Some(subrange) = array_type.children_with(Tag::SubrangeType).next() else {
        return BtfArray {
            elem_type,
            ..BtfArray::default()
        };
    };
    let nelems = match (subrange.int(Attr::Count), subrange.int(Attr::UpperBound)) {
        (Some(count), _) => count as u32,
        (None, Some(upper)) => upper.wrapping_add(1) as u32,
        (None, None) => 0,
    };

    BtfArray {
        elem_type,
        index_type: ids.index_via(subrange, Attr::Type),
        nelems,
    }
}

/// Member offset in bits: the `bit_offset` attribute, 0 when absent.
fn member_bit_offset(member: Die<'_>) -> u32 {
    member.int(Attr::BitOffset).unwrap_or(0) as u32
}
