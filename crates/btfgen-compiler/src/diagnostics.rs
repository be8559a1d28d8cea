//! Non-fatal reports about input the translator cannot represent.

use std::collections::HashSet;

use btfgen_core::{Die, DieId, Tag};

/// What was wrong with a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DiagnosticKind {
    /// Tag has no BTF counterpart.
    UnsupportedTag,
    /// Base type whose encoding is not an integer flavour (float, fixed, ...).
    UnsupportedEncoding,
    /// Modifier or typedef without a `type` attribute.
    MissingType,
}

impl DiagnosticKind {
    fn describe(self, tag: Tag) -> String {
        match self {
            Self::UnsupportedTag => format!("unsupported tag {tag}"),
            Self::UnsupportedEncoding => format!("{tag} has an unsupported encoding"),
            Self::MissingType => format!("{tag} has no type"),
        }
    }
}

/// One report, attached to the node it concerns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    pub die: DieId,
    pub tag: Tag,
    pub message: String,
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "node #{}: {}", self.die.as_u32(), self.message)
    }
}

/// Reports collected during a build, in the order they were first raised.
///
/// A node is reported at most once per kind, however often the walk reaches it.
#[derive(Debug, Clone, Default)]
pub struct Diagnostics {
    messages: Vec<Diagnostic>,
    seen: HashSet<(DiagnosticKind, DieId)>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a report and log it at `warn` level.
    pub fn report(&mut self, kind: DiagnosticKind, die: Die<'_>) {
        if !self.seen.insert((kind, die.id())) {
            return;
        }
        let tag = die.tag();
        let message = kind.describe(tag);
        tracing::warn!(node = die.id().as_u32(), %tag, "{message}");
        self.messages.push(Diagnostic {
            kind,
            die: die.id(),
            tag,
            message,
        });
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.messages.iter()
    }

    pub fn has(&self, kind: DiagnosticKind) -> bool {
        self.messages.iter().any(|d| d.kind == kind)
    }
}
