//! Error types for presentation state operations.

use thiserror::Error;

/// Errors that can occur while mutating presentation state.
#[derive(Debug, Error)]
pub enum StateError {
    /// A structural edit addressed an invalid location.
    #[error("content error: {0}")]
    Content(#[from] listable_types::ContentError),

    /// An edit script could not be replayed onto the mirror.
    #[error("diff error: {0}")]
    Diff(#[from] listable_diff::DiffError),
}

/// Convenience type alias for state operations.
pub type StateResult<T> = std::result::Result<T, StateError>;
