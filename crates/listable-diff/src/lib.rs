//! Diff engine for Listable.
//!
//! Compares two [`Content`](listable_types::Content) trees by identity and
//! produces the edit script that turns one into the other, in the batch
//! conventions a scrollable container expects.
//!
//! # Key Types
//!
//! - [`diff`] — Compute an [`EditScript`] between two content trees
//! - [`EditScript`] / [`SectionChanges`] / [`ItemChanges`] — The edit script
//! - [`apply`] / [`apply_sections`] — Replay a script onto old content or any mirror of it

pub mod apply;
pub mod diff;
pub mod edit_script;
pub mod error;

pub use apply::{apply, apply_sections, ScriptItem, ScriptSection};
pub use diff::diff;
pub use edit_script::{
    EditScript, ItemChanges, ItemInsertion, ItemMove, ItemRemoval, ItemUpdate, ScriptSummary,
    SectionChanges, SectionInsertion, SectionMove, SectionRemoval,
};
pub use error::{DiffError, DiffResult};
