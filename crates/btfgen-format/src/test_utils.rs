//! Hand-assembled BTF blobs for decoder and dump tests.

use super::bytes::{ByteSink, ByteWriter, Endian};
use super::header::Header;
use super::info::{IntEncoding, pack_int};
use super::kind::BtfKind;
use super::records::{BtfArray, BtfEnum, BtfMember, BtfType};

/// Accumulates records and strings, then lays them out behind a header.
pub struct BlobBuilder {
    types: ByteWriter,
    strings: Vec<u8>,
    endian: Endian,
}

impl BlobBuilder {
    pub fn new(endian: Endian) -> Self {
        Self {
            types: ByteWriter::new(endian),
            strings: vec![0],
            endian,
        }
    }

    /// Append a string, returning its offset. `""` maps to the reserved slot.
    pub fn string(&mut self, s: &str) -> u32 {
        if s.is_empty() {
            return 0;
        }
        let off = self.strings.len() as u32;
        self.strings.extend_from_slice(s.as_bytes());
        self.strings.push(0);
        off
    }

    fn prefix(&mut self, name: &str, kind: BtfKind, vlen: u32, size_or_type: u32) {
        let name_off = self.string(name);
        BtfType {
            name_off,
            ..BtfType::new(kind, vlen, size_or_type)
        }
        .encode(&mut self.types);
    }

    pub fn int(&mut self, name: &str, size: u32, encoding: IntEncoding) -> &mut Self {
        self.prefix(name, BtfKind::Int, 0, size);
        self.types.emit_u32(pack_int(encoding, 0, size * 8));
        self
    }

    pub fn reference(&mut self, kind: BtfKind, target: u32) -> &mut Self {
        self.prefix("", kind, 0, target);
        self
    }

    pub fn composite(&mut self, kind: BtfKind, name: &str, size: u32, members: &[(&str, u32, u32)]) -> &mut Self {
        self.prefix(name, kind, members.len() as u32, size);
        for &(mname, type_id, offset) in members {
            let name_off = self.string(mname);
            BtfMember {
                name_off,
                type_id,
                offset,
            }
            .encode(&mut self.types);
        }
        self
    }

    pub fn enumeration(&mut self, name: &str, size: u32, values: &[(&str, i32)]) -> &mut Self {
        self.prefix(name, BtfKind::Enum, values.len() as u32, size);
        for &(vname, val) in values {
            let name_off = self.string(vname);
            BtfEnum { name_off, val }.encode(&mut self.types);
        }
        self
    }

    pub fn array(&mut self, name: &str, elem_type: u32, index_type: u32, nelems: u32) -> &mut Self {
        self.prefix(name, BtfKind::Array, 0, 0);
        BtfArray {
            elem_type,
            index_type,
            nelems,
        }
        .encode(&mut self.types);
        self
    }

    pub fn func(&mut self, name: &str, params: &[u32]) -> &mut Self {
        self.prefix(name, BtfKind::Func, params.len() as u32, 0);
        for &p in params {
            self.types.emit_u32(p);
        }
        self
    }

    /// Raw bytes appended to the type section as-is.
    pub fn raw(&mut self, bytes: &[u8]) -> &mut Self {
        self.types.emit_bytes(bytes);
        self
    }

    pub fn build(&self) -> Vec<u8> {
        let types = self.types.clone().into_bytes();
        let header = Header {
            type_len: types.len() as u32,
            str_off: types.len() as u32,
            str_len: self.strings.len() as u32,
            ..Header::default()
        };

        let mut out = ByteWriter::new(self.endian);
        header.encode(&mut out);
        out.emit_bytes(&types);
        out.emit_bytes(&self.strings);
        out.into_bytes()
    }
}
