use std::any::Any;

use listable_types::Sizing;
use serde::{Deserialize, Serialize};

use crate::appearance::{Appearance, Behavior, Insets};
use crate::layout::{AnyListLayout, LayoutContent, LayoutDefaults, LayoutType, ListLayout};

/// Spacing used by [`TableLayout`].
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TableMetrics {
    pub padding: Insets,
    pub item_spacing: f64,
    pub section_spacing: f64,
    /// Upper bound on content width; `None` fills the container.
    pub width: Option<f64>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TableAppearance {
    pub sticky_section_headers: bool,
    pub layout: TableMetrics,
}

impl Default for TableAppearance {
    fn default() -> Self {
        Self {
            sticky_section_headers: true,
            layout: TableMetrics::default(),
        }
    }
}

/// A single-column list of rows.
#[derive(Debug)]
pub struct TableLayout {
    layout_appearance: TableAppearance,
    appearance: Appearance,
    behavior: Behavior,
    content: LayoutContent,
}

impl TableLayout {
    pub const DEFAULT_ROW_HEIGHT: f64 = 44.0;
}

impl AnyListLayout for TableLayout {
    fn layout_type(&self) -> LayoutType {
        LayoutType::of::<Self>()
    }

    fn appearance(&self) -> &Appearance {
        &self.appearance
    }

    fn behavior(&self) -> &Behavior {
        &self.behavior
    }

    fn content(&self) -> &LayoutContent {
        &self.content
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl ListLayout for TableLayout {
    type LayoutAppearance = TableAppearance;

    fn defaults() -> LayoutDefaults {
        LayoutDefaults {
            item_sizing: Sizing::Fixed(Self::DEFAULT_ROW_HEIGHT),
        }
    }

    fn new(
        layout_appearance: TableAppearance,
        appearance: Appearance,
        behavior: Behavior,
        content: LayoutContent,
    ) -> Self {
        Self {
            layout_appearance,
            appearance,
            behavior,
            content,
        }
    }

    fn layout_appearance(&self) -> &TableAppearance {
        &self.layout_appearance
    }
}
