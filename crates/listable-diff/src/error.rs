//! Error types for the diff crate.

use listable_types::ContentError;

/// Errors that can occur while computing or applying an edit script.
#[derive(Debug, thiserror::Error)]
pub enum DiffError {
    /// One of the input trees violated an identity invariant.
    #[error("invalid content: {0}")]
    Content(#[from] ContentError),

    /// An edit script did not line up with the tree it was applied to.
    #[error("edit script does not match content: {0}")]
    ScriptMismatch(String),
}

/// Convenience alias for diff results.
pub type DiffResult<T> = Result<T, DiffError>;
