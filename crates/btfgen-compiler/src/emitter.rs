//! Wire-order emission of a finished type graph.

use btfgen_format::{ByteSink, ByteWriter, Endian};

use super::error::BtfError;
use super::graph::TypeGraph;

/// Emission settings.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct EmitOptions {
    /// Byte order of the target object file.
    pub endian: Endian,
}

/// Serialize a finished graph: header, entries in id order, strings.
pub fn emit(graph: &TypeGraph<'_>, options: &EmitOptions) -> Result<Vec<u8>, BtfError> {
    let header = graph.header().ok_or(BtfError::NotFinished)?;
    let total = header.total_len();

    let mut writer = ByteWriter::with_capacity(options.endian, total);
    emit_to(graph, &mut writer)?;

    debug_assert_eq!(writer.len(), total);
    tracing::debug!(bytes = writer.len(), endian = ?options.endian, "btf emitted");
    Ok(writer.into_bytes())
}

/// Serialize a finished graph into any byte sink.
pub fn emit_to<S: ByteSink + ?Sized>(graph: &TypeGraph<'_>, sink: &mut S) -> Result<(), BtfError> {
    let header = graph.header().ok_or(BtfError::NotFinished)?;

    header.encode(sink);
    for entry in graph.entries() {
        entry.encode(sink);
    }
    graph.strings().encode(sink);

    Ok(())
}
