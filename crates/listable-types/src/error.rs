//! Error types for content construction and structural edits.

use thiserror::Error;

use crate::identifier::AnyIdentifier;
use crate::index_path::IndexPath;

/// Errors produced when validating or editing a [`Content`](crate::Content).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ContentError {
    /// Two sections in the same content share an identifier.
    #[error("duplicate section identifier {identifier} at indexes {first} and {second}")]
    DuplicateSection {
        identifier: AnyIdentifier,
        first: usize,
        second: usize,
    },

    /// Two items anywhere in the same content share an identifier.
    #[error("duplicate item identifier {identifier} at {first} and {second}")]
    DuplicateItem {
        identifier: AnyIdentifier,
        first: IndexPath,
        second: IndexPath,
    },

    /// A section index is past the end of the section list.
    #[error("section index {index} out of bounds (count {count})")]
    SectionOutOfBounds { index: usize, count: usize },

    /// An item index is past the end of its section.
    #[error("item index path {path} out of bounds (section holds {count} items)")]
    ItemOutOfBounds { path: IndexPath, count: usize },
}

/// Convenience alias for content results.
pub type ContentResult<T> = Result<T, ContentError>;
