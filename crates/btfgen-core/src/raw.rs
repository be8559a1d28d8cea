//! JSON interchange format for debug-information trees.
//!
//! Nodes nest their children; cross references use string labels:
//!
//! ```json
//! { "tag": "compile_unit", "children": [
//!     { "label": "int", "tag": "base_type",
//!       "attrs": { "name": "int", "byte_size": 4, "encoding": 5 } },
//!     { "tag": "pointer_type", "attrs": { "type": { "ref": "int" } } }
//! ] }
//! ```
//!
//! The document is either one root object or an array of roots.

use std::collections::HashMap;

use indexmap::IndexMap;

use super::tag::{Attr, Tag};
use super::tree::{AttrValue, DieId, DieTree};

/// Raw node as it appears in JSON.
#[derive(Debug, Clone, serde::Deserialize)]
pub struct RawDie {
    /// Label other nodes use to reference this one.
    #[serde(default)]
    pub label: Option<String>,
    pub tag: String,
    #[serde(default)]
    pub attrs: IndexMap<String, RawAttrValue>,
    #[serde(default)]
    pub children: Vec<RawDie>,
}

/// Raw attribute value.
#[derive(Debug, Clone, serde::Deserialize)]
#[serde(untagged)]
pub enum RawAttrValue {
    Flag(bool),
    Int(i64),
    /// Unsigned values past `i64::MAX`; stored wrapped into `i64`.
    UInt(u64),
    Str(String),
    Ref {
        #[serde(rename = "ref")]
        target: String,
    },
}

#[derive(serde::Deserialize)]
#[serde(untagged)]
enum RawDocument {
    One(RawDie),
    Many(Vec<RawDie>),
}

/// Errors while turning JSON into a [`DieTree`].
#[derive(Debug, thiserror::Error)]
pub enum TreeError {
    #[error("invalid tree json: {0}")]
    Json(#[from] serde_json::Error),
    #[error("unknown tag: {0}")]
    UnknownTag(String),
    #[error("unknown attribute: {0}")]
    UnknownAttr(String),
    #[error("duplicate label: {0}")]
    DuplicateLabel(String),
    #[error("reference to undefined label: {0}")]
    UnresolvedLabel(String),
}

/// A tree together with its top-level nodes, in document order.
#[derive(Debug, Clone)]
pub struct ParsedTree {
    pub tree: DieTree,
    pub roots: Vec<DieId>,
}

/// Parse a JSON document into an arena tree.
pub fn parse_tree(json: &str) -> Result<ParsedTree, TreeError> {
    let doc: RawDocument = serde_json::from_str(json)?;
    let raw_roots = match doc {
        RawDocument::One(root) => vec![root],
        RawDocument::Many(roots) => roots,
    };

    let mut lowering = Lowering::default();
    let roots = raw_roots
        .iter()
        .map(|raw| lowering.lower(raw, None))
        .collect::<Result<Vec<_>, _>>()?;
    let tree = lowering.resolve()?;

    Ok(ParsedTree { tree, roots })
}

/// Two passes: allocate every node and remember labels, then patch references.
#[derive(Default)]
struct Lowering {
    tree: DieTree,
    labels: HashMap<String, DieId>,
    pending: Vec<(DieId, Attr, String)>,
}

impl Lowering {
    fn lower(&mut self, raw: &RawDie, parent: Option<DieId>) -> Result<DieId, TreeError> {
        let tag = Tag::from_name(&raw.tag).ok_or_else(|| TreeError::UnknownTag(raw.tag.clone()))?;
        let id = match parent {
            Some(parent) => self.tree.add_child(parent, tag).id(),
            None => self.tree.add(tag).id(),
        };

        if let Some(label) = &raw.label
            && self.labels.insert(label.clone(), id).is_some()
        {
            return Err(TreeError::DuplicateLabel(label.clone()));
        }

        for (name, value) in &raw.attrs {
            let attr = Attr::from_name(name).ok_or_else(|| TreeError::UnknownAttr(name.clone()))?;
            match value {
                RawAttrValue::Flag(b) => self.tree.set_attr(id, attr, *b),
                RawAttrValue::Int(v) => self.tree.set_attr(id, attr, *v),
                RawAttrValue::UInt(v) => self.tree.set_attr(id, attr, *v),
                RawAttrValue::Str(s) => self.tree.set_attr(id, attr, s.as_str()),
                RawAttrValue::Ref { target } => self.pending.push((id, attr, target.clone())),
            }
        }

        for child in &raw.children {
            self.lower(child, Some(id))?;
        }

        Ok(id)
    }

    fn resolve(mut self) -> Result<DieTree, TreeError> {
        for (id, attr, label) in std::mem::take(&mut self.pending) {
            let target = *self
                .labels
                .get(&label)
                .ok_or(TreeError::UnresolvedLabel(label))?;
            self.tree.set_attr(id, attr, AttrValue::Ref(target));
        }
        Ok(self.tree)
    }
}
