use std::any::Any;

use listable_types::Sizing;
use serde::{Deserialize, Serialize};

use crate::appearance::{Appearance, Behavior, Insets};
use crate::layout::{AnyListLayout, LayoutContent, LayoutDefaults, LayoutType, ListLayout};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridAppearance {
    pub columns: u16,
    pub item_spacing: f64,
    pub line_spacing: f64,
    pub padding: Insets,
}

impl Default for GridAppearance {
    fn default() -> Self {
        Self {
            columns: 2,
            item_spacing: 8.0,
            line_spacing: 8.0,
            padding: Insets::default(),
        }
    }
}

/// Items flowed into a fixed number of columns.
#[derive(Debug)]
pub struct GridLayout {
    layout_appearance: GridAppearance,
    appearance: Appearance,
    behavior: Behavior,
    content: LayoutContent,
}

impl GridLayout {
    pub const DEFAULT_ITEM_HEIGHT: f64 = 100.0;

    /// Number of rows needed for `count` items, never less than one column.
    pub fn rows_for(&self, count: usize) -> usize {
        let columns = usize::from(self.layout_appearance.columns.max(1));
        count.div_ceil(columns)
    }
}

impl AnyListLayout for GridLayout {
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

impl ListLayout for GridLayout {
    type LayoutAppearance = GridAppearance;

    fn defaults() -> LayoutDefaults {
        LayoutDefaults {
            item_sizing: Sizing::Fixed(Self::DEFAULT_ITEM_HEIGHT),
        }
    }

    fn new(
        layout_appearance: GridAppearance,
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

    fn layout_appearance(&self) -> &GridAppearance {
        &self.layout_appearance
    }
}
