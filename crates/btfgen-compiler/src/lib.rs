#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Translator from debug-information trees to BTF.
//!
//! Pipeline:
//! - `classify` - node → `BtfKind`, skip decisions
//! - `graph` - two-phase build: collect entries, then resolve names and references
//! - `layout` - header and section sizes
//! - `emitter` - wire-order byte emission
//!
//! Unsupported input never fails the build: the node is skipped and a
//! [`Diagnostic`] is recorded.

mod classify;
mod diagnostics;
mod emitter;
mod entry;
mod error;
mod graph;
mod layout;
mod string_table;

#[cfg(test)]
mod entry_tests;
#[cfg(test)]
mod test_utils;

pub use classify::{base_type_encoding, classify, should_skip};
pub use diagnostics::{Diagnostic, DiagnosticKind, Diagnostics};
pub use emitter::{EmitOptions, emit, emit_to};
pub use entry::{Payload, TypeEntry};
pub use error::BtfError;
pub use graph::TypeGraph;
pub use layout::build_header;
pub use string_table::StringTable;
