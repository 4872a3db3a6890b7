//! Built-in layout families.
//!
//! Families here carry their configuration and populated content. Geometry
//! is computed by the rendering container.

mod grid;
mod table;

pub use grid::{GridAppearance, GridLayout};
pub use table::{TableAppearance, TableLayout, TableMetrics};
