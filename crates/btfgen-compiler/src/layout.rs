//! Header and section sizes.
//!
//! ```text
//! | header (24) | types (type_len) | strings (str_len) |
//! ```
//!
//! Section offsets are relative to the end of the header; the string section
//! follows the type section directly.

use btfgen_format::Header;

use super::entry::TypeEntry;
use super::string_table::StringTable;

/// Header for `entries` followed by `strings`.
pub fn build_header(entries: &[TypeEntry<'_>], strings: &StringTable) -> Header {
    let type_len = entries
        .iter()
        .fold(0u32, |acc, e| acc.wrapping_add(e.size()));

    Header {
        type_off: 0,
        type_len,
        str_off: type_len,
        str_len: strings.size(),
        ..Header::default()
    }
}
