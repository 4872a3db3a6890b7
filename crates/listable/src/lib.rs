//! # Listable
//!
//! Declarative list views driven by identity-keyed diffs.
//!
//! Callers describe the whole list as [`Content`] and hand it to a
//! [`ListView`]. The view diffs it against what is on screen, replays the
//! minimal [`EditScript`] onto its presentation state, reports one batch of
//! changes to the container, and marks the layout for rebuild. Layouts are
//! described with a [`LayoutDescription`]; swapping to a description of the
//! same family rebuilds in place, swapping families installs a new layout
//! object.
//!
//! ```rust,ignore
//! use listable::{Content, ListConfig, ListView, Section};
//!
//! let mut view = ListView::new(sink, container, ListConfig::default());
//! let update = view.set_content(
//!     Content::new().with(Section::new("people").with_content(person)),
//! )?;
//! view.prepare_layout();
//! ```

pub mod config;
pub mod error;
pub mod list_view;
pub mod properties;

pub use config::{AutoScrollAction, LayoutFamily, ListConfig};
pub use error::{ListError, ListResult};
pub use list_view::{ContentUpdate, ListView};
pub use properties::ListProperties;

pub use listable_diff::{diff, EditScript, ScriptSummary};
pub use listable_layout::{
    Appearance, Behavior, CollectionViewLayout, GridAppearance, GridLayout, LayoutContainer,
    LayoutDescription, LayoutTransition, ListLayout, TableAppearance, TableLayout,
};
pub use listable_state::{
    ChangeSink, ContainerUpdate, PresentationState, RecordingSink, RenderToken, SourcePresenter,
    SourceState,
};
pub use listable_types::{
    AnyIdentifier, Content, Identifier, IndexPath, Item, ItemContent, Section, Sizing,
};
