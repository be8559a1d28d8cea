#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Debug-information tree consumed by the btfgen translator.
//!
//! Two layers:
//! - **Interchange layer**: nested JSON (`RawDie`) with string labels for references
//! - **Arena layer**: `DieTree` with `DieId` handles and the borrowed `Die` view
//!
//! The translator only ever reads through `Die`; nothing here is mutated once
//! a tree has been handed over.

mod colors;
mod raw;
mod tag;
mod tree;


pub use colors::Colors;
pub use raw::{ParsedTree, RawAttrValue, RawDie, TreeError, parse_tree};
pub use tag::{Attr, Tag, ate};
pub use tree::{AttrValue, Die, DieBuilder, DieId, DieTree};
