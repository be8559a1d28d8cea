//! Usage errors of the translator API.

/// Misuse of [`TypeGraph`](crate::TypeGraph) or the emitter.
///
/// Malformed or unsupported debug information is never an error; see
/// [`Diagnostics`](crate::Diagnostics).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BtfError {
    #[error("node #{id} is {tag}, expected DW_TAG_compile_unit")]
    NotACompileUnit { id: u32, tag: String },
    #[error("type graph is already finished")]
    AlreadyFinished,
    #[error("type graph is not finished yet")]
    NotFinished,
    #[error("internal error: {0}")]
    Internal(String),
}
