//! Node classification and skip decisions.
//!
//! `classify` is pure and may be called any number of times on the same
//! node. `should_skip` additionally records why a node is dropped.

use btfgen_core::{Attr, Die, Tag, ate};
use btfgen_format::{BtfKind, IntEncoding};

use super::diagnostics::{DiagnosticKind, Diagnostics};

/// BTF kind a node translates to, or `Unknown` if it produces no entry.
pub fn classify(die: Die<'_>) -> BtfKind {
    match die.tag() {
        Tag::BaseType => match base_type_encoding(die) {
            Some(_) => BtfKind::Int,
            None => BtfKind::Unknown,
        },
        Tag::ConstType => BtfKind::Const,
        Tag::PointerType => BtfKind::Ptr,
        Tag::RestrictType => BtfKind::Restrict,
        Tag::VolatileType => BtfKind::Volatile,
        Tag::StructureType | Tag::ClassType => aggregate(die, BtfKind::Struct),
        Tag::UnionType => aggregate(die, BtfKind::Union),
        Tag::EnumerationType => BtfKind::Enum,
        // Only reachable through a variable, which carries the name.
        Tag::ArrayType => BtfKind::Unknown,
        // FUNC and FUNC_PROTO entries exist but are not produced yet.
        Tag::Subprogram | Tag::SubroutineType | Tag::CompileUnit => BtfKind::Unknown,
        Tag::Variable => match die.type_ref() {
            Some(ty) if ty.tag() == Tag::ArrayType => BtfKind::Array,
            _ => BtfKind::Unknown,
        },
        _ => BtfKind::Unknown,
    }
}

fn aggregate(die: Die<'_>, defined: BtfKind) -> BtfKind {
    if die.flag(Attr::Declaration) {
        BtfKind::Forward
    } else {
        defined
    }
}

/// INT encoding of a base type, `None` for non-integer encodings.
pub fn base_type_encoding(die: Die<'_>) -> Option<IntEncoding> {
    let encoding = u8::try_from(die.int(Attr::Encoding)?).ok()?;
    match encoding {
        ate::BOOLEAN => Some(IntEncoding::BOOL),
        ate::SIGNED => Some(IntEncoding::SIGNED),
        ate::SIGNED_CHAR | ate::UNSIGNED_CHAR => Some(IntEncoding::CHAR),
        ate::UNSIGNED => Some(IntEncoding::UNSIGNED),
        _ => None,
    }
}

/// Tags that produce no entry without being worth a report.
fn is_silently_ignored(tag: Tag) -> bool {
    matches!(
        tag,
        Tag::ArrayType
            | Tag::Subprogram
            | Tag::SubroutineType
            | Tag::CompileUnit
            | Tag::Variable
            | Tag::FormalParameter
            | Tag::Typedef
            | Tag::InlinedSubroutine
            | Tag::LexicalBlock
    )
}

/// Longest modifier chain followed before giving up on a (cyclic) input.
const MAX_CHAIN: usize = 64;

/// Whether a node (and anything it names through a modifier chain) should be
/// left out of the type table.
///
/// Modifiers are skipped when their target is; a pointer without a target
/// (`void *`) is skipped silently, other modifiers are reported.
pub fn should_skip(die: Die<'_>, diags: &mut Diagnostics) -> bool {
    let mut die = die;
    for _ in 0..MAX_CHAIN {
        let tag = die.tag();
        if !is_modifier(tag) {
            return skip_leaf(die, diags);
        }
        match die.type_ref() {
            Some(target) => die = target,
            None => {
                if tag != Tag::PointerType {
                    diags.report(DiagnosticKind::MissingType, die);
                }
                return true;
            }
        }
    }
    tracing::debug!(node = die.id().as_u32(), "modifier chain too long, skipping");
    true
}

fn is_modifier(tag: Tag) -> bool {
    matches!(
        tag,
        Tag::ConstType | Tag::PointerType | Tag::RestrictType | Tag::Typedef | Tag::VolatileType
    )
}

fn skip_leaf(die: Die<'_>, diags: &mut Diagnostics) -> bool {
    if classify(die) != BtfKind::Unknown {
        return false;
    }
    let tag = die.tag();
    if tag == Tag::BaseType {
        diags.report(DiagnosticKind::UnsupportedEncoding, die);
    } else if !is_silently_ignored(tag) {
        diags.report(DiagnosticKind::UnsupportedTag, die);
    }
    true
}
