//! Layout descriptions and layout management for Listable.
//!
//! A list view holds exactly one [`LayoutDescription`] regardless of which
//! layout family it uses. The description can build layout objects and can
//! tell whether an existing layout object is still current, which lets the
//! [`LayoutManager`] choose between an in-place appearance rebuild and a full
//! animated replacement.
//!
//! # Key Types
//!
//! - [`ListLayout`] / [`AnyListLayout`] — A layout family and its erased form
//! - [`TableLayout`] / [`GridLayout`] — The built-in families
//! - [`LayoutDescription`] / [`AnyLayoutDescriptionConfiguration`] — Erased family + customization
//! - [`CollectionViewLayout`] — The container-facing active layout object
//! - [`LayoutManager`] — Hot-swap or replace on a new description

pub mod appearance;
pub mod description;
pub mod error;
pub mod families;
pub mod layout;
pub mod manager;

pub use appearance::{
    Appearance, Behavior, Color, Insets, KeyboardDismissMode, LayoutDirection, SelectionMode,
    Underflow, UnderflowAlignment,
};
pub use description::{AnyLayoutDescriptionConfiguration, Configuration, LayoutDescription};
pub use error::{LayoutError, LayoutResult};
pub use families::{GridAppearance, GridLayout, TableAppearance, TableLayout, TableMetrics};
pub use layout::{
    AnyListLayout, LayoutContent, LayoutDefaults, LayoutDelegate, LayoutItem, LayoutSection,
    LayoutType, ListLayout,
};
pub use manager::{CollectionViewLayout, LayoutContainer, LayoutManager, LayoutTransition};
