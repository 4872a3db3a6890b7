//! Presentation state for Listable.
//!
//! Holds the mutable, long-lived mirror of what a list view currently shows.
//! The mirror is advanced either by replaying an edit script from the diff
//! engine or by explicit structural edits (drag-to-reorder), and reports
//! batch updates to the attached container.
//!
//! # Key Types
//!
//! - [`PresentationState`] — The live mirror plus its attach/detach lifecycle
//! - [`ChangeSink`] / [`ContainerUpdate`] — Batch updates sent to the container
//! - [`RenderToken`] — Generation token that discards superseded render passes
//! - [`SourcePresenter`] / [`SourceState`] — Per-pass state handed to content builders
//! - [`ListStorage`] — All content plus the presentation state, kept in sync

pub mod error;
pub mod presentation;
pub mod sink;
pub mod source;
pub mod storage;

pub use error::{StateError, StateResult};
pub use presentation::{ItemState, PresentationState, RenderToken, SectionState, UpdateOutcome};
pub use sink::{ChangeSink, ContainerUpdate, RecordingSink};
pub use source::{DidChange, DynamicSource, ListSource, SourcePresenter, SourceState, StaticSource};
pub use storage::ListStorage;
