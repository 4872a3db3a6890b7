//! Foundation types for Listable.
//!
//! This crate provides the identity and content types shared by every other
//! Listable crate: the diff engine, the presentation state, and the layout
//! layer all speak in terms of the values defined here.
//!
//! # Key Types
//!
//! - [`Identifier`] — Typed key that establishes identity across render passes
//! - [`AnyIdentifier`] — Type-erased identifier, equal only within the same scope
//! - [`Item`] / [`ItemContent`] — A row value plus its presentation metadata
//! - [`Section`] — An identified, ordered run of items
//! - [`Content`] — The immutable sections-of-items snapshot for one render pass
//! - [`IndexPath`] — A (section, item) location inside a [`Content`]

pub mod content;
pub mod error;
pub mod identifier;
pub mod index_path;
pub mod item;

pub use content::{Content, ContentSlice, Section};
pub use error::{ContentError, ContentResult};
pub use identifier::{AnyIdentifier, Identifier, IdentifierValue};
pub use index_path::IndexPath;
pub use item::{AnyItem, Item, ItemContent, ItemRef, Sizing};
