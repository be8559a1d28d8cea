//! BTF header (24 bytes).
//!
//! Section offsets are relative to the end of the header:
//! Header → Types (`type_off`, `type_len`) → Strings (`str_off`, `str_len`).

use super::bytes::{ByteReader, ByteSink, ByteWriter, Endian};
use super::constants::{HEADER_LEN, MAGIC, VERSION};

/// `struct btf_header`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(C)]
pub struct Header {
    /// Always `0xEB9F` in target byte order.
    pub magic: u16,
    pub version: u8,
    pub flags: u8,
    /// Size of this header in bytes.
    pub hdr_len: u32,
    pub type_off: u32,
    pub type_len: u32,
    pub str_off: u32,
    pub str_len: u32,
}

const _: () = assert!(std::mem::size_of::<Header>() == HEADER_LEN as usize);

impl Default for Header {
    fn default() -> Self {
        Self {
            magic: MAGIC,
            version: VERSION,
            flags: 0,
            hdr_len: HEADER_LEN,
            type_off: 0,
            type_len: 0,
            str_off: 0,
            str_len: 0,
        }
    }
}

impl Header {
    /// Write the header in wire order.
    pub fn encode<S: ByteSink + ?Sized>(&self, sink: &mut S) {
        sink.emit_u16(self.magic);
        sink.emit_u8(self.version);
        sink.emit_u8(self.flags);
        sink.emit_u32(self.hdr_len);
        sink.emit_u32(self.type_off);
        sink.emit_u32(self.type_len);
        sink.emit_u32(self.str_off);
        sink.emit_u32(self.str_len);
    }

    /// Encode to 24 bytes.
    pub fn to_bytes(&self, endian: Endian) -> [u8; 24] {
        let mut writer = ByteWriter::with_capacity(endian, HEADER_LEN as usize);
        self.encode(&mut writer);
        let mut bytes = [0u8; 24];
        bytes.copy_from_slice(&writer.into_bytes());
        bytes
    }

    /// Decode from the first 24 bytes, `None` if too short.
    pub fn from_bytes(bytes: &[u8], endian: Endian) -> Option<Self> {
        let mut r = ByteReader::new(bytes, endian);
        Some(Self {
            magic: r.read_u16()?,
            version: r.read_u8()?,
            flags: r.read_u8()?,
            hdr_len: r.read_u32()?,
            type_off: r.read_u32()?,
            type_len: r.read_u32()?,
            str_off: r.read_u32()?,
            str_len: r.read_u32()?,
        })
    }

    /// Byte order of a blob, inferred from how its magic is laid out.
    pub fn detect_endian(bytes: &[u8]) -> Option<Endian> {
        let [a, b] = *bytes.first_chunk::<2>()?;
        if u16::from_le_bytes([a, b]) == MAGIC {
            Some(Endian::Little)
        } else if u16::from_be_bytes([a, b]) == MAGIC {
            Some(Endian::Big)
        } else {
            None
        }
    }

    pub fn validate_magic(&self) -> bool {
        self.magic == MAGIC
    }

    pub fn validate_version(&self) -> bool {
        self.version == VERSION
    }

    /// Absolute offset of the type section.
    pub fn types_start(&self) -> usize {
        self.hdr_len as usize + self.type_off as usize
    }

    /// Absolute offset of the string section.
    pub fn strings_start(&self) -> usize {
        self.hdr_len as usize + self.str_off as usize
    }

    /// Size of the whole blob described by this header.
    pub fn total_len(&self) -> usize {
        let types_end = self.types_start() + self.type_len as usize;
        let strings_end = self.strings_start() + self.str_len as usize;
        types_end.max(strings_end)
    }
}
