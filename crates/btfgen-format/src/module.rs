//! Decoder for complete BTF blobs.
//!
//! Used to read back what the emitter produced (round-trip tests, `dump`)
//! and to inspect `.BTF` sections written by other tools that stick to the
//! record layouts this crate emits.

use super::bytes::{ByteReader, Endian};
use super::constants::HEADER_LEN;
use super::header::Header;
use super::kind::BtfKind;
use super::records::{BtfArray, BtfEnum, BtfMember, BtfType};

/// BTF load error.
#[derive(Debug, thiserror::Error)]
pub enum FormatError {
    #[error("blob too small: {0} bytes (minimum {HEADER_LEN})")]
    TooSmall(usize),
    #[error("invalid magic: expected 0xEB9F")]
    InvalidMagic,
    #[error("unsupported version: {0}")]
    UnsupportedVersion(u8),
    #[error("invalid header length: {0}")]
    InvalidHeaderLen(u32),
    #[error("{section} section out of bounds: ends at {end}, blob is {len} bytes")]
    SectionOutOfBounds {
        section: &'static str,
        end: usize,
        len: usize,
    },
    #[error("truncated type record #{index} at offset {offset}")]
    Truncated { index: usize, offset: usize },
    #[error("unknown kind {kind} in type record #{index}")]
    UnknownKind { index: usize, kind: u8 },
}

/// Trailing payload of a decoded type record.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TypeData {
    /// Reference kinds carry nothing after the prefix.
    None,
    /// INT trailing word.
    Int(u32),
    Enum(Vec<BtfEnum>),
    Array(BtfArray),
    Members(Vec<BtfMember>),
    /// Parameter type indices of FUNC/FUNC_PROTO.
    Params(Vec<u32>),
}

/// One type record: prefix plus payload.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DecodedType {
    pub ty: BtfType,
    pub data: TypeData,
}

impl DecodedType {
    pub fn kind(&self) -> BtfKind {
        self.ty.kind().unwrap_or(BtfKind::Unknown)
    }

    pub fn vlen(&self) -> u32 {
        self.ty.vlen()
    }

    pub fn name_off(&self) -> u32 {
        self.ty.name_off
    }
}

/// A decoded BTF blob.
#[derive(Clone, Debug)]
pub struct BtfModule {
    header: Header,
    endian: Endian,
    types: Vec<DecodedType>,
    strings: Vec<u8>,
}

impl BtfModule {
    /// Decode a blob. Byte order is taken from the magic.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, FormatError> {
        if bytes.len() < HEADER_LEN as usize {
            return Err(FormatError::TooSmall(bytes.len()));
        }
        let endian = Header::detect_endian(bytes).ok_or(FormatError::InvalidMagic)?;
        let header = Header::from_bytes(bytes, endian).ok_or(FormatError::TooSmall(bytes.len()))?;

        if !header.validate_magic() {
            return Err(FormatError::InvalidMagic);
        }
        if !header.validate_version() {
            return Err(FormatError::UnsupportedVersion(header.version));
        }
        if header.hdr_len < HEADER_LEN {
            return Err(FormatError::InvalidHeaderLen(header.hdr_len));
        }

        let types_bytes = section(bytes, "type", header.types_start(), header.type_len)?;
        let strings = section(bytes, "string", header.strings_start(), header.str_len)?;
        let types = decode_types(types_bytes, endian)?;

        Ok(Self {
            header,
            endian,
            types,
            strings: strings.to_vec(),
        })
    }

    pub fn header(&self) -> &Header {
        &self.header
    }

    pub fn endian(&self) -> Endian {
        self.endian
    }

    /// Type records in emission order. Record `i` has wire index `i + 1`.
    pub fn types(&self) -> &[DecodedType] {
        &self.types
    }

    /// Record for a wire index. Index 0 (void) has no record.
    pub fn get(&self, index: u32) -> Option<&DecodedType> {
        let i = (index as usize).checked_sub(1)?;
        self.types.get(i)
    }

    /// Raw string section.
    pub fn string_bytes(&self) -> &[u8] {
        &self.strings
    }

    /// NUL-terminated string starting at `offset`.
    pub fn string_at(&self, offset: u32) -> Option<&str> {
        let rest = self.strings.get(offset as usize..)?;
        let end = rest.iter().position(|&b| b == 0)?;
        std::str::from_utf8(&rest[..end]).ok()
    }

    /// Every string with its offset, in section order.
    pub fn strings(&self) -> impl Iterator<Item = (u32, &str)> + '_ {
        let mut offset = 0usize;
        std::iter::from_fn(move || {
            let rest = self.strings.get(offset..)?;
            let end = rest.iter().position(|&b| b == 0)?;
            let start = offset;
            offset += end + 1;
            let s = std::str::from_utf8(&rest[..end]).unwrap_or("<invalid utf-8>");
            Some((start as u32, s))
        })
    }
}

fn section<'a>(
    bytes: &'a [u8],
    name: &'static str,
    start: usize,
    len: u32,
) -> Result<&'a [u8], FormatError> {
    let end = start + len as usize;
    bytes.get(start..end).ok_or(FormatError::SectionOutOfBounds {
        section: name,
        end,
        len: bytes.len(),
    })
}

fn decode_types(bytes: &[u8], endian: Endian) -> Result<Vec<DecodedType>, FormatError> {
    let mut r = ByteReader::new(bytes, endian);
    let mut types = Vec::new();

    while r.remaining() > 0 {
        let index = types.len();
        let offset = r.position();
        let decoded = decode_one(&mut r, index)?.ok_or(FormatError::Truncated { index, offset })?;
        types.push(decoded);
    }

    Ok(types)
}

/// `Ok(None)` means the record ran past the end of the section.
fn decode_one(r: &mut ByteReader<'_>, index: usize) -> Result<Option<DecodedType>, FormatError> {
    let Some(ty) = read_prefix(r) else {
        return Ok(None);
    };
    let kind_raw = ty.kind_raw();
    let kind = BtfKind::from_u8(kind_raw).ok_or(FormatError::UnknownKind {
        index,
        kind: kind_raw,
    })?;
    let vlen = ty.vlen() as usize;

    let data = match kind {
        BtfKind::Int => r.read_u32().map(TypeData::Int),
        BtfKind::Enum => (0..vlen)
            .map(|_| {
                Some(BtfEnum {
                    name_off: r.read_u32()?,
                    val: r.read_i32()?,
                })
            })
            .collect::<Option<Vec<_>>>()
            .map(TypeData::Enum),
        BtfKind::Array => (|| {
            Some(TypeData::Array(BtfArray {
                elem_type: r.read_u32()?,
                index_type: r.read_u32()?,
                nelems: r.read_u32()?,
            }))
        })(),
        BtfKind::Struct | BtfKind::Union => (0..vlen)
            .map(|_| {
                Some(BtfMember {
                    name_off: r.read_u32()?,
                    type_id: r.read_u32()?,
                    offset: r.read_u32()?,
                })
            })
            .collect::<Option<Vec<_>>>()
            .map(TypeData::Members),
        BtfKind::Func | BtfKind::FuncProto => (0..vlen)
            .map(|_| r.read_u32())
            .collect::<Option<Vec<_>>>()
            .map(TypeData::Params),
        BtfKind::Unknown
        | BtfKind::Ptr
        | BtfKind::Forward
        | BtfKind::Typedef
        | BtfKind::Volatile
        | BtfKind::Const
        | BtfKind::Restrict => Some(TypeData::None),
    };

    Ok(data.map(|data| DecodedType { ty, data }))
}

fn read_prefix(r: &mut ByteReader<'_>) -> Option<BtfType> {
    Some(BtfType {
        name_off: r.read_u32()?,
        info: r.read_u32()?,
        size_or_type: r.read_u32()?,
    })
}
