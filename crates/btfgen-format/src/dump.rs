//! Human-readable dump of a decoded BTF blob.
//!
//! Not a stable format; meant for eyeballing emitter output.

use std::fmt::Write as _;

use btfgen_core::Colors;

use super::info::{int_bits, int_encoding, int_offset};
use super::kind::BtfKind;
use super::module::{BtfModule, DecodedType, TypeData};

/// Reference chains longer than this are cut off (malformed input can loop).
const MAX_CHAIN_DEPTH: usize = 32;

/// Generate a human-readable dump of a BTF module.
pub fn dump(module: &BtfModule, colors: Colors) -> String {
    let mut out = String::new();

    dump_header(&mut out, module, colors);
    dump_types(&mut out, module, colors);
    dump_strings(&mut out, module, colors);

    out
}

/// Readable name of the type at wire `index`, following reference chains.
///
/// Enums render as `enum NAME`, references prefix their kind
/// (`const ptr int`), and a missing target renders `UNKNOWN`.
pub fn type_name(module: &BtfModule, index: u32) -> String {
    let mut out = String::new();
    let mut index = index;

    for _ in 0..MAX_CHAIN_DEPTH {
        let Some(entry) = module.get(index) else {
            out.push_str("UNKNOWN");
            return out;
        };
        let kind = entry.kind();
        match kind {
            BtfKind::Int | BtfKind::Struct | BtfKind::Union | BtfKind::Array | BtfKind::Func => {
                out.push_str(own_name(module, entry));
                return out;
            }
            BtfKind::Enum => {
                out.push_str("enum ");
                out.push_str(own_name(module, entry));
                return out;
            }
            _ => {}
        }
        let Some(prefix) = kind.chain_prefix() else {
            return out;
        };
        out.push_str(prefix);
        out.push(' ');
        index = entry.ty.size_or_type;
    }

    out.push_str("...");
    out
}

fn own_name<'m>(module: &'m BtfModule, entry: &DecodedType) -> &'m str {
    module.string_at(entry.name_off()).unwrap_or("")
}

/// Number of decimal digits needed to print indices below `count`.
fn width_for_count(count: usize) -> usize {
    if count <= 1 {
        1
    } else {
        ((count - 1) as f64).log10().floor() as usize + 1
    }
}

fn dump_header(out: &mut String, module: &BtfModule, colors: Colors) {
    let c = &colors;
    let h = module.header();

    writeln!(out, "{}[header]{}", c.blue, c.reset).unwrap();
    writeln!(out, "magic    0x{:04x} ({:?})", h.magic, module.endian()).unwrap();
    writeln!(out, "version  {}", h.version).unwrap();
    writeln!(out, "flags    {}", h.flags).unwrap();
    writeln!(out, "hdr_len  {}", h.hdr_len).unwrap();
    writeln!(out, "type_off {}", h.type_off).unwrap();
    writeln!(out, "type_len {}", h.type_len).unwrap();
    writeln!(out, "str_off  {}", h.str_off).unwrap();
    writeln!(out, "str_len  {}", h.str_len).unwrap();
    out.push('\n');
}

fn dump_types(out: &mut String, module: &BtfModule, colors: Colors) {
    let c = &colors;
    let types = module.types();
    // Wire indices run 1..=len.
    let w = width_for_count(types.len() + 1);

    writeln!(out, "{}[types]{}", c.blue, c.reset).unwrap();
    for (i, entry) in types.iter().enumerate() {
        let index = i as u32 + 1;
        let kind = entry.kind();
        let name = own_name(module, entry);
        let slot = entry.ty.size_or_type;

        write!(
            out,
            "{}T{index:0w$}{} {}{}{} {}{name:?}{}",
            c.blue, c.reset, c.yellow, kind, c.reset, c.green, c.reset
        )
        .unwrap();

        match &entry.data {
            TypeData::Int(word) => {
                writeln!(
                    out,
                    " size={slot} {} offset={} bits={}",
                    int_encoding(*word).describe(),
                    int_offset(*word),
                    int_bits(*word)
                )
                .unwrap();
            }
            TypeData::Enum(values) => {
                writeln!(out, " size={slot} vlen={}", values.len()).unwrap();
                for v in values {
                    let vname = module.string_at(v.name_off).unwrap_or("");
                    writeln!(out, "  {}{vname:?}{} = {}", c.green, c.reset, v.val).unwrap();
                }
            }
            TypeData::Array(arr) => {
                write!(
                    out,
                    " elem=T{:0w$} index=T{:0w$} nelems={}",
                    arr.elem_type, arr.index_type, arr.nelems
                )
                .unwrap();
                comment(out, c, &type_name(module, arr.elem_type));
            }
            TypeData::Members(members) => {
                writeln!(out, " size={slot} vlen={}", members.len()).unwrap();
                for m in members {
                    let mname = module.string_at(m.name_off).unwrap_or("");
                    write!(
                        out,
                        "  {}{mname:?}{} T{:0w$} @{}",
                        c.green, c.reset, m.type_id, m.offset
                    )
                    .unwrap();
                    comment(out, c, &type_name(module, m.type_id));
                }
            }
            TypeData::Params(params) => {
                writeln!(out, " vlen={}", params.len()).unwrap();
                for &p in params {
                    write!(out, "  T{p:0w$}").unwrap();
                    comment(out, c, &type_name(module, p));
                }
            }
            TypeData::None if kind.is_reference() => {
                write!(out, " -> T{slot:0w$}").unwrap();
                comment(out, c, &type_name(module, index));
            }
            TypeData::None => out.push('\n'),
        }
    }
    out.push('\n');
}

/// Trailing `; text` annotation, omitted when there is nothing to say.
fn comment(out: &mut String, c: &Colors, text: &str) {
    if text.is_empty() {
        out.push('\n');
    } else {
        writeln!(out, " {}; {text}{}", c.dim, c.reset).unwrap();
    }
}

fn dump_strings(out: &mut String, module: &BtfModule, colors: Colors) {
    let c = &colors;
    let w = width_for_count(module.string_bytes().len());

    writeln!(out, "{}[strings]{}", c.blue, c.reset).unwrap();
    for (offset, s) in module.strings() {
        writeln!(out, "{}{offset:0w$}{} {}{s:?}{}", c.dim, c.reset, c.green, c.reset).unwrap();
    }
}
