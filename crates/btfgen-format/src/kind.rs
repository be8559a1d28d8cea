//! BTF kind definitions.

/// Closed set of BTF kinds, with their wire discriminants.
///
/// `Unknown` is never emitted; it marks nodes that produce no type entry.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
#[repr(u8)]
pub enum BtfKind {
    Unknown = 0,
    Int = 1,
    Ptr = 2,
    Array = 3,
    Struct = 4,
    Union = 5,
    Enum = 6,
    /// Struct or union declared but not defined.
    Forward = 7,
    Typedef = 8,
    Volatile = 9,
    Const = 10,
    Restrict = 11,
    Func = 12,
    FuncProto = 13,
}

/// Display names indexed by kind discriminant.
pub const KIND_NAMES: [&str; 14] = [
    "UNKNOWN",
    "INT",
    "PTR",
    "ARRAY",
    "STRUCT",
    "UNION",
    "ENUM",
    "FWD",
    "TYPEDEF",
    "VOLATILE",
    "CONST",
    "RESTRICT",
    "FUNC",
    "FUNC_PROTO",
];

impl BtfKind {
    /// Convert from raw discriminant.
    pub fn from_u8(v: u8) -> Option<Self> {
        match v {
            0 => Some(Self::Unknown),
            1 => Some(Self::Int),
            2 => Some(Self::Ptr),
            3 => Some(Self::Array),
            4 => Some(Self::Struct),
            5 => Some(Self::Union),
            6 => Some(Self::Enum),
            7 => Some(Self::Forward),
            8 => Some(Self::Typedef),
            9 => Some(Self::Volatile),
            10 => Some(Self::Const),
            11 => Some(Self::Restrict),
            12 => Some(Self::Func),
            13 => Some(Self::FuncProto),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        KIND_NAMES[self as usize]
    }

    /// Kinds whose size/type slot holds a referenced type index.
    pub fn is_reference(self) -> bool {
        matches!(
            self,
            Self::Ptr
                | Self::Typedef
                | Self::Volatile
                | Self::Const
                | Self::Restrict
                | Self::Forward
        )
    }

    /// Kinds whose size/type slot holds a size in bytes.
    pub fn has_size(self) -> bool {
        matches!(self, Self::Int | Self::Enum | Self::Struct | Self::Union)
    }

    /// Prefix used when rendering a reference chain (`const ptr int`).
    pub fn chain_prefix(self) -> Option<&'static str> {
        match self {
            Self::Const => Some("const"),
            Self::Ptr => Some("ptr"),
            Self::Volatile => Some("volatile"),
            Self::Typedef => Some("typedef"),
            Self::Restrict => Some("restrict"),
            _ => None,
        }
    }
}

impl std::fmt::Display for BtfKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
