//! Debug-information tags and attribute names.
//!
//! Discriminants follow the DWARF numbering so trees produced from real
//! `.debug_info` can be mapped one-to-one.

/// Node tag.
///
/// Only the tags the translator distinguishes are named; everything else is
/// carried as `Other` with its raw DWARF value.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum Tag {
    ArrayType,
    ClassType,
    EnumerationType,
    FormalParameter,
    LexicalBlock,
    Member,
    PointerType,
    CompileUnit,
    StructureType,
    SubroutineType,
    Typedef,
    UnionType,
    InlinedSubroutine,
    SubrangeType,
    BaseType,
    ConstType,
    Enumerator,
    Subprogram,
    Variable,
    VolatileType,
    RestrictType,
    /// Any tag without a dedicated variant.
    Other(u16),
}

/// (tag, DWARF value, short name) for every named tag.
const TAGS: &[(Tag, u16, &str)] = &[
    (Tag::ArrayType, 0x01, "array_type"),
    (Tag::ClassType, 0x02, "class_type"),
    (Tag::EnumerationType, 0x04, "enumeration_type"),
    (Tag::FormalParameter, 0x05, "formal_parameter"),
    (Tag::LexicalBlock, 0x0b, "lexical_block"),
    (Tag::Member, 0x0d, "member"),
    (Tag::PointerType, 0x0f, "pointer_type"),
    (Tag::CompileUnit, 0x11, "compile_unit"),
    (Tag::StructureType, 0x13, "structure_type"),
    (Tag::SubroutineType, 0x15, "subroutine_type"),
    (Tag::Typedef, 0x16, "typedef"),
    (Tag::UnionType, 0x17, "union_type"),
    (Tag::InlinedSubroutine, 0x1d, "inlined_subroutine"),
    (Tag::SubrangeType, 0x21, "subrange_type"),
    (Tag::BaseType, 0x24, "base_type"),
    (Tag::ConstType, 0x26, "const_type"),
    (Tag::Enumerator, 0x28, "enumerator"),
    (Tag::Subprogram, 0x2e, "subprogram"),
    (Tag::Variable, 0x34, "variable"),
    (Tag::VolatileType, 0x35, "volatile_type"),
    (Tag::RestrictType, 0x37, "restrict_type"),
];

impl Tag {
    /// Map a raw DWARF tag value to a `Tag`.
    pub fn from_u16(value: u16) -> Self {
        TAGS.iter()
            .find(|(_, v, _)| *v == value)
            .map(|(tag, _, _)| *tag)
            .unwrap_or(Tag::Other(value))
    }

    /// Raw DWARF tag value.
    pub fn as_u16(self) -> u16 {
        match self {
            Tag::Other(value) => value,
            tag => TAGS
                .iter()
                .find(|(t, _, _)| *t == tag)
                .map(|(_, v, _)| *v)
                .unwrap_or_default(),
        }
    }

    /// Parse a short name (`base_type`), a prefixed name (`DW_TAG_base_type`)
    /// or a hex value (`0x39`).
    pub fn from_name(name: &str) -> Option<Self> {
        let short = name.strip_prefix("DW_TAG_").unwrap_or(name);
        if let Some(hex) = short.strip_prefix("0x") {
            return u16::from_str_radix(hex, 16).ok().map(Self::from_u16);
        }
        TAGS.iter()
            .find(|(_, _, n)| *n == short)
            .map(|(tag, _, _)| *tag)
    }

    /// Display name in `DW_TAG_*` form.
    pub fn name(self) -> String {
        match self {
            Tag::Other(value) => format!("DW_TAG_0x{value:x}"),
            tag => {
                let short = TAGS
                    .iter()
                    .find(|(t, _, _)| *t == tag)
                    .map(|(_, _, n)| *n)
                    .unwrap_or("unknown");
                format!("DW_TAG_{short}")
            }
        }
    }
}

impl std::fmt::Display for Tag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.name())
    }
}

/// Attribute name.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
#[repr(u16)]
pub enum Attr {
    Name = 0x03,
    ByteSize = 0x0b,
    BitOffset = 0x0c,
    BitSize = 0x0d,
    ConstValue = 0x1c,
    UpperBound = 0x2f,
    Count = 0x37,
    DataMemberLocation = 0x38,
    Declaration = 0x3c,
    Encoding = 0x3e,
    Type = 0x49,
    DataBitOffset = 0x6b,
}

const ATTRS: &[(Attr, &str)] = &[
    (Attr::Name, "name"),
    (Attr::ByteSize, "byte_size"),
    (Attr::BitOffset, "bit_offset"),
    (Attr::BitSize, "bit_size"),
    (Attr::ConstValue, "const_value"),
    (Attr::UpperBound, "upper_bound"),
    (Attr::Count, "count"),
    (Attr::DataMemberLocation, "data_member_location"),
    (Attr::Declaration, "declaration"),
    (Attr::Encoding, "encoding"),
    (Attr::Type, "type"),
    (Attr::DataBitOffset, "data_bit_offset"),
];

impl Attr {
    /// Parse a short (`byte_size`) or prefixed (`DW_AT_byte_size`) name.
    pub fn from_name(name: &str) -> Option<Self> {
        let short = name.strip_prefix("DW_AT_").unwrap_or(name);
        ATTRS
            .iter()
            .find(|(_, n)| *n == short)
            .map(|(attr, _)| *attr)
    }

    /// Short name as used in the JSON interchange format.
    pub fn name(self) -> &'static str {
        ATTRS
            .iter()
            .find(|(a, _)| *a == self)
            .map(|(_, n)| *n)
            .unwrap_or("unknown")
    }
}

/// Base-type encodings (`DW_ATE_*`).
pub mod ate {
    pub const ADDRESS: u8 = 0x01;
    pub const BOOLEAN: u8 = 0x02;
    pub const COMPLEX_FLOAT: u8 = 0x03;
    pub const FLOAT: u8 = 0x04;
    pub const SIGNED: u8 = 0x05;
    pub const SIGNED_CHAR: u8 = 0x06;
    pub const UNSIGNED: u8 = 0x07;
    pub const UNSIGNED_CHAR: u8 = 0x08;
    pub const IMAGINARY_FLOAT: u8 = 0x09;
    pub const PACKED_DECIMAL: u8 = 0x0a;
    pub const NUMERIC_STRING: u8 = 0x0b;
    pub const EDITED: u8 = 0x0c;
    pub const SIGNED_FIXED: u8 = 0x0d;
    pub const UNSIGNED_FIXED: u8 = 0x0e;
    pub const DECIMAL_FLOAT: u8 = 0x0f;
    pub const UTF: u8 = 0x10;
}
