//! Items: row values plus presentation metadata.

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::identifier::{AnyIdentifier, Identifier};

/// A value that can be displayed as a row in a list.
///
/// Equality on the content decides whether a matched row was updated in
/// place; the identifier decides whether two rows are the same row at all.
pub trait ItemContent: Clone + PartialEq + fmt::Debug + Send + Sync + 'static {
    fn identifier(&self) -> Identifier<Self>;
}

/// How an item asks to be sized by the layout.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub enum Sizing {
    /// Use the layout's default item size.
    #[default]
    Default,
    /// A fixed extent along the layout axis.
    Fixed(f64),
    /// Measure the content, clamped to the given bounds.
    ThatFits { min: f64, max: f64 },
}

/// A row in a [`Section`](crate::Section).
#[derive(Clone, Debug, PartialEq)]
pub struct Item<C: ItemContent> {
    pub content: C,
    pub sizing: Sizing,
}

impl<C: ItemContent> Item<C> {
    pub fn new(content: C) -> Self {
        Self {
            content,
            sizing: Sizing::Default,
        }
    }

    pub fn with_sizing(mut self, sizing: Sizing) -> Self {
        self.sizing = sizing;
        self
    }

    pub fn identifier(&self) -> Identifier<C> {
        self.content.identifier()
    }
}

/// Object-safe view of an [`Item`] of any content type.
///
/// Sections hold heterogeneous rows, so the diff engine and presentation
/// state work through this trait.
pub trait AnyItem: fmt::Debug + Send + Sync {
    /// The erased identifier of the item's content.
    fn identifier(&self) -> AnyIdentifier;

    fn sizing(&self) -> Sizing;

    /// Returns `true` if `other` holds the same content type with equal
    /// content.
    fn is_equivalent(&self, other: &dyn AnyItem) -> bool;

    fn as_any(&self) -> &dyn Any;
}

impl<C: ItemContent> AnyItem for Item<C> {
    fn identifier(&self) -> AnyIdentifier {
        self.content.identifier().erase()
    }

    fn sizing(&self) -> Sizing {
        self.sizing
    }

    fn is_equivalent(&self, other: &dyn AnyItem) -> bool {
        other
            .as_any()
            .downcast_ref::<Item<C>>()
            .is_some_and(|other| other.content == self.content)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Shared handle to a type-erased item.
pub type ItemRef = Arc<dyn AnyItem>;

impl dyn AnyItem {
    /// Downcast to a concrete item type.
    pub fn downcast_ref<C: ItemContent>(&self) -> Option<&Item<C>> {
        self.as_any().downcast_ref::<Item<C>>()
    }
}
