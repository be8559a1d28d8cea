//! Tree fixtures and shortcuts shared by the translator tests.

use btfgen_core::{DieId, DieTree, Tag, ate};
use btfgen_format::BtfModule;

use crate::{EmitOptions, TypeGraph, emit};

/// New compile unit named `t.c`.
pub fn unit(tree: &mut DieTree) -> DieId {
    tree.add(Tag::CompileUnit).name("t.c").id()
}

/// `int` (4 bytes, signed) under `parent`.
pub fn int(tree: &mut DieTree, parent: DieId) -> DieId {
    tree.add_child(parent, Tag::BaseType)
        .name("int")
        .byte_size(4)
        .encoding(ate::SIGNED)
        .id()
}

/// `float` (4 bytes) under `parent`.
pub fn float(tree: &mut DieTree, parent: DieId) -> DieId {
    tree.add_child(parent, Tag::BaseType)
        .name("float")
        .byte_size(4)
        .encoding(ate::FLOAT)
        .id()
}

/// Single-unit graph, finished.
pub fn build(tree: &DieTree, unit: DieId) -> TypeGraph<'_> {
    TypeGraph::build(tree, &[unit]).unwrap()
}

/// Emit (little endian) and decode again.
pub fn roundtrip(graph: &TypeGraph<'_>) -> BtfModule {
    let bytes = emit(graph, &EmitOptions::default()).unwrap();
    BtfModule::from_bytes(&bytes).unwrap()
}
