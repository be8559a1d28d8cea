//! Arena-backed debug-information tree.
//!
//! Nodes live in a flat `Vec` and refer to each other (children, `type`
//! references) through `DieId`. Identity of a node is its `DieId`, which is
//! stable for the lifetime of the tree.

use super::tag::{Attr, Tag};

/// Handle to a node inside a [`DieTree`].
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct DieId(u32);

impl DieId {
    /// Raw index for serialization/debugging.
    #[inline]
    pub fn as_u32(self) -> u32 {
        self.0
    }

    #[inline]
    fn index(self) -> usize {
        self.0 as usize
    }
}

/// Attribute payload.
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum AttrValue {
    /// Reference to another node in the same tree.
    Ref(DieId),
    Int(i64),
    Str(String),
    Flag(bool),
}

impl From<DieId> for AttrValue {
    fn from(id: DieId) -> Self {
        Self::Ref(id)
    }
}

impl From<i64> for AttrValue {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<u64> for AttrValue {
    fn from(v: u64) -> Self {
        Self::Int(v as i64)
    }
}

impl From<&str> for AttrValue {
    fn from(s: &str) -> Self {
        Self::Str(s.to_owned())
    }
}

impl From<String> for AttrValue {
    fn from(s: String) -> Self {
        Self::Str(s)
    }
}

impl From<bool> for AttrValue {
    fn from(b: bool) -> Self {
        Self::Flag(b)
    }
}

#[derive(Clone, Debug)]
struct DieData {
    tag: Tag,
    attrs: Vec<(Attr, AttrValue)>,
    children: Vec<DieId>,
}

/// Owner of all nodes.
#[derive(Clone, Debug, Default)]
pub struct DieTree {
    nodes: Vec<DieData>,
}

impl DieTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a detached node (typically a compile-unit root).
    pub fn add(&mut self, tag: Tag) -> DieBuilder<'_> {
        let id = self.alloc(tag);
        DieBuilder { tree: self, id }
    }

    /// Add a node as the last child of `parent`.
    pub fn add_child(&mut self, parent: DieId, tag: Tag) -> DieBuilder<'_> {
        let id = self.alloc(tag);
        self.nodes[parent.index()].children.push(id);
        DieBuilder { tree: self, id }
    }

    /// Re-open an existing node for adding attributes.
    pub fn edit(&mut self, id: DieId) -> DieBuilder<'_> {
        DieBuilder { tree: self, id }
    }

    /// Set (or replace) an attribute.
    pub fn set_attr(&mut self, id: DieId, attr: Attr, value: impl Into<AttrValue>) {
        let value = value.into();
        let attrs = &mut self.nodes[id.index()].attrs;
        match attrs.iter_mut().find(|(a, _)| *a == attr) {
            Some(slot) => slot.1 = value,
            None => attrs.push((attr, value)),
        }
    }

    /// Borrowed view of a node.
    ///
    /// # Panics
    /// Panics if `id` was not created by this tree.
    #[inline]
    pub fn die(&self, id: DieId) -> Die<'_> {
        assert!(id.index() < self.nodes.len(), "DieId {} out of range", id.0);
        Die { tree: self, id }
    }

    /// Number of nodes in the arena.
    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    fn alloc(&mut self, tag: Tag) -> DieId {
        let id = DieId(self.nodes.len() as u32);
        self.nodes.push(DieData {
            tag,
            attrs: Vec::new(),
            children: Vec::new(),
        });
        id
    }

    #[inline]
    fn data(&self, id: DieId) -> &DieData {
        &self.nodes[id.index()]
    }
}

/// Chainable attribute setter returned by [`DieTree::add`] and friends.
pub struct DieBuilder<'a> {
    tree: &'a mut DieTree,
    id: DieId,
}

impl DieBuilder<'_> {
    /// Id of the node being built.
    pub fn id(&self) -> DieId {
        self.id
    }

    pub fn attr(self, attr: Attr, value: impl Into<AttrValue>) -> Self {
        self.tree.set_attr(self.id, attr, value);
        self
    }

    pub fn name(self, name: &str) -> Self {
        self.attr(Attr::Name, name)
    }

    pub fn type_ref(self, target: DieId) -> Self {
        self.attr(Attr::Type, target)
    }

    pub fn byte_size(self, size: u64) -> Self {
        self.attr(Attr::ByteSize, size)
    }

    pub fn encoding(self, encoding: u8) -> Self {
        self.attr(Attr::Encoding, encoding as i64)
    }

    pub fn int(self, attr: Attr, value: i64) -> Self {
        self.attr(attr, value)
    }

    pub fn flag(self, attr: Attr) -> Self {
        self.attr(attr, true)
    }
}

/// Read-only view of one node, borrowed from its tree.
#[derive(Clone, Copy)]
pub struct Die<'t> {
    tree: &'t DieTree,
    id: DieId,
}

impl<'t> Die<'t> {
    #[inline]
    pub fn id(self) -> DieId {
        self.id
    }

    #[inline]
    pub fn tag(self) -> Tag {
        self.tree.data(self.id).tag
    }

    pub fn attr(self, attr: Attr) -> Option<&'t AttrValue> {
        self.tree
            .data(self.id)
            .attrs
            .iter()
            .find(|(a, _)| *a == attr)
            .map(|(_, v)| v)
    }

    pub fn has_attr(self, attr: Attr) -> bool {
        self.attr(attr).is_some()
    }

    /// Attribute as a string, if present and string-valued.
    pub fn str(self, attr: Attr) -> Option<&'t str> {
        match self.attr(attr)? {
            AttrValue::Str(s) => Some(s.as_str()),
            _ => None,
        }
    }

    /// Attribute as an integer, if present and integer-valued.
    pub fn int(self, attr: Attr) -> Option<i64> {
        match self.attr(attr)? {
            AttrValue::Int(v) => Some(*v),
            _ => None,
        }
    }

    /// Whether a flag attribute is set. A present non-flag value counts as set.
    pub fn flag(self, attr: Attr) -> bool {
        match self.attr(attr) {
            Some(AttrValue::Flag(b)) => *b,
            Some(_) => true,
            None => false,
        }
    }

    /// Node referenced by `attr`, if present and reference-valued.
    pub fn reference(self, attr: Attr) -> Option<Die<'t>> {
        match self.attr(attr)? {
            AttrValue::Ref(id) => Some(self.tree.die(*id)),
            _ => None,
        }
    }

    pub fn name(self) -> Option<&'t str> {
        self.str(Attr::Name)
    }

    /// Node referenced by the `type` attribute.
    pub fn type_ref(self) -> Option<Die<'t>> {
        self.reference(Attr::Type)
    }

    pub fn children(self) -> impl Iterator<Item = Die<'t>> + 't {
        let tree = self.tree;
        tree.data(self.id)
            .children
            .iter()
            .map(move |&id| Die { tree, id })
    }

    /// Children carrying `tag`, in order.
    pub fn children_with(self, tag: Tag) -> impl Iterator<Item = Die<'t>> + 't {
        self.children().filter(move |c| c.tag() == tag)
    }
}

impl PartialEq for Die<'_> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.tree, other.tree) && self.id == other.id
    }
}

impl Eq for Die<'_> {}

impl std::fmt::Debug for Die<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let data = self.tree.data(self.id);
        f.debug_struct("Die")
            .field("id", &self.id.0)
            .field("tag", &data.tag)
            .field("attrs", &data.attrs)
            .field("children", &data.children.len())
            .finish()
    }
}
