//! BTF format constants.

/// Magic number identifying a BTF blob (first two bytes, in target byte order).
pub const MAGIC: u16 = 0xEB9F;

/// BTF format version emitted and accepted.
pub const VERSION: u8 = 1;

/// Size of the fixed header in bytes.
pub const HEADER_LEN: u32 = 24;

/// Size of the common `btf_type` prefix (name_off, info, size/type).
pub const TYPE_PREFIX_LEN: usize = 12;

/// Trailing word after an INT record.
pub const INT_LEN: usize = 4;

/// One `btf_enum` (name_off, val).
pub const ENUM_LEN: usize = 8;

/// One `btf_array` (type, index_type, nelems).
pub const ARRAY_LEN: usize = 12;

/// One `btf_member` (name_off, type, offset).
pub const MEMBER_LEN: usize = 12;

/// One function parameter type index.
pub const PARAM_LEN: usize = 4;

/// Largest vlen representable in the info word.
pub const MAX_VLEN: u32 = 0xffff;
