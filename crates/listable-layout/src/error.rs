//! Error types for layout operations.

use thiserror::Error;

/// Errors that can occur while inspecting layout objects.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LayoutError {
    /// A configuration was asked about a layout object of another family.
    #[error("layout type mismatch: configuration is for {expected}, layout is {actual}")]
    TypeMismatch {
        expected: &'static str,
        actual: &'static str,
    },
}

/// Convenience alias for layout results.
pub type LayoutResult<T> = Result<T, LayoutError>;
