//! Append-only string section builder.
//!
//! Strings are addressed by byte offset into the section. Offset 0 is the
//! empty string, reserved on construction. Equal strings are not merged.

use btfgen_format::ByteSink;

#[derive(Debug, Clone)]
pub struct StringTable {
    strings: Vec<String>,
    /// Byte offset of each entry in `strings`, ascending.
    offsets: Vec<u32>,
    size: u32,
}

impl StringTable {
    pub fn new() -> Self {
        let mut table = Self {
            strings: Vec::new(),
            offsets: Vec::new(),
            size: 0,
        };
        table.add("");
        table
    }

    /// Append `s`, returning its offset. Sizes wrap at `u32::MAX`.
    pub fn add(&mut self, s: &str) -> u32 {
        let offset = self.size;
        self.offsets.push(offset);
        self.strings.push(s.to_owned());
        self.size = self.size.wrapping_add(s.len() as u32 + 1);
        offset
    }

    /// String starting exactly at `offset`.
    pub fn get_at_offset(&self, offset: u32) -> Option<&str> {
        let i = self.offsets.binary_search(&offset).ok()?;
        Some(&self.strings[i])
    }

    /// Section size in bytes, terminators included.
    pub fn size(&self) -> u32 {
        self.size
    }

    /// Number of strings, the reserved empty one included.
    pub fn len(&self) -> usize {
        self.strings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.strings.is_empty()
    }

    /// `(offset, string)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (u32, &str)> {
        self.offsets
            .iter()
            .copied()
            .zip(self.strings.iter().map(String::as_str))
    }

    /// Write every string NUL-terminated, in insertion order.
    pub fn encode<S: ByteSink + ?Sized>(&self, sink: &mut S) {
        for s in &self.strings {
            sink.emit_bytes(s.as_bytes());
            sink.emit_u8(0);
        }
    }
}

impl Default for StringTable {
    fn default() -> Self {
        Self::new()
    }
}
