//! The type graph: entries, their ids, and the strings they name.
//!
//! Lifecycle:
//! 1. [`TypeGraph::add_compile_unit`] walks units and constructs entries;
//!    ids are assigned in discovery order and keep counting across units.
//! 2. [`TypeGraph::finish`] resolves names and references and builds the header.
//! 3. The finished graph is read-only; [`emit`](crate::emit) serializes it.

use btfgen_core::{Colors, Die, DieId, DieTree, Tag};
use btfgen_format::{BtfModule, ByteWriter, Endian, Header};

use super::classify::{classify, should_skip};
use super::diagnostics::Diagnostics;
use super::emitter::emit_to;
use super::entry::{Completion, TypeEntry, TypeIds};
use super::error::BtfError;
use super::layout::build_header;
use super::string_table::StringTable;

#[derive(Debug)]
pub struct TypeGraph<'t> {
    tree: &'t DieTree,
    entries: Vec<TypeEntry<'t>>,
    ids: TypeIds,
    strings: StringTable,
    diagnostics: Diagnostics,
    /// Set by `finish`.
    header: Option<Header>,
}

impl<'t> TypeGraph<'t> {
    pub fn new(tree: &'t DieTree) -> Self {
        Self {
            tree,
            entries: Vec::new(),
            ids: TypeIds::default(),
            strings: StringTable::new(),
            diagnostics: Diagnostics::new(),
            header: None,
        }
    }

    /// Translate every unit in `roots` and finish the graph.
    pub fn build(tree: &'t DieTree, roots: &[DieId]) -> Result<Self, BtfError> {
        let mut graph = Self::new(tree);
        for &root in roots {
            graph.add_compile_unit(root)?;
        }
        graph.finish()?;
        Ok(graph)
    }

    /// Phase 1 for one compile unit.
    pub fn add_compile_unit(&mut self, root: DieId) -> Result<(), BtfError> {
        if self.is_finished() {
            return Err(BtfError::AlreadyFinished);
        }
        let die = self.tree.die(root);
        if die.tag() != Tag::CompileUnit {
            return Err(BtfError::NotACompileUnit {
                id: root.as_u32(),
                tag: die.tag().name(),
            });
        }

        let before = self.entries.len();
        self.add_type_entry(die);
        tracing::debug!(
            unit = root.as_u32(),
            name = die.name().unwrap_or(""),
            added = self.entries.len() - before,
            "compile unit walked"
        );
        Ok(())
    }

    fn add_type_entry(&mut self, die: Die<'t>) {
        if matches!(die.tag(), Tag::CompileUnit | Tag::Subprogram) {
            for child in die.children() {
                self.add_type_entry(child);
            }
        }
        if should_skip(die, &mut self.diagnostics) {
            return;
        }

        let id = self.entries.len() as u32;
        let kind = classify(die);
        if let Some(entry) = TypeEntry::new(kind, die, id) {
            tracing::debug!(node = die.id().as_u32(), id, %kind, "type entry");
            self.ids.insert(die.id(), id);
            self.entries.push(entry);
        }
    }

    /// Phase 2: resolve names and type indices, then build the header.
    pub fn finish(&mut self) -> Result<(), BtfError> {
        if self.is_finished() {
            return Err(BtfError::AlreadyFinished);
        }

        let mut cx = Completion {
            ids: &self.ids,
            strings: &mut self.strings,
        };
        for entry in &mut self.entries {
            entry.complete(&mut cx);
        }

        let header = build_header(&self.entries, &self.strings);
        tracing::debug!(
            types = self.entries.len(),
            type_len = header.type_len,
            str_len = header.str_len,
            "type graph finished"
        );
        self.header = Some(header);
        Ok(())
    }

    pub fn is_finished(&self) -> bool {
        self.header.is_some()
    }

    /// Entries in id order.
    pub fn entries(&self) -> &[TypeEntry<'t>] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Wire index of the entry built from `die`, 0 if it produced none.
    pub fn type_index(&self, die: DieId) -> u32 {
        self.ids.index_of(die)
    }

    pub fn strings(&self) -> &StringTable {
        &self.strings
    }

    /// Header of the finished graph.
    pub fn header(&self) -> Option<&Header> {
        self.header.as_ref()
    }

    pub fn diagnostics(&self) -> &Diagnostics {
        &self.diagnostics
    }

    /// Human-readable listing of the finished graph.
    pub fn dump(&self, colors: Colors) -> Result<String, BtfError> {
        let mut writer = ByteWriter::new(Endian::Little);
        emit_to(self, &mut writer)?;
        // Decoding our own output only fails if the emitter is broken.
        let module = BtfModule::from_bytes(&writer.into_bytes())
            .map_err(|e| BtfError::Internal(e.to_string()))?;
        Ok(btfgen_format::dump(&module, colors))
    }
}
