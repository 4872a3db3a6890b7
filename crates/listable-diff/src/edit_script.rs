//! The edit script produced by [`diff`](crate::diff()).
//!
//! Index conventions follow batch-update semantics:
//!
//! - removals are expressed in the **old** index space,
//! - insertions in the **new** index space,
//! - moves and updates carry both.
//!
//! Every list is sorted (removals by old position, everything else by new
//! position), so two runs over the same inputs produce identical scripts.

use listable_types::{AnyIdentifier, Identifier, IndexPath, ItemRef, Section};
use serde::Serialize;

/// The full set of changes between two content trees.
#[derive(Clone, Debug, Default)]
pub struct EditScript {
    pub sections: SectionChanges,
    pub items: ItemChanges,
}

impl EditScript {
    /// Create an empty edit script.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` if there are no changes.
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty() && self.items.is_empty()
    }

    /// Total number of operations.
    pub fn len(&self) -> usize {
        self.sections.len() + self.items.len()
    }

    /// Per-kind operation counts.
    pub fn summary(&self) -> ScriptSummary {
        ScriptSummary {
            sections_removed: self.sections.removed.len(),
            sections_inserted: self.sections.inserted.len(),
            sections_moved: self.sections.moved.len(),
            items_removed: self.items.removed.len(),
            items_inserted: self.items.inserted.len(),
            items_moved: self.items.moved.len(),
            items_updated: self.items.updated.len(),
        }
    }
}

/// Section-level operations.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SectionChanges {
    pub removed: Vec<SectionRemoval>,
    pub inserted: Vec<SectionInsertion>,
    pub moved: Vec<SectionMove>,
}

impl SectionChanges {
    pub fn is_empty(&self) -> bool {
        self.removed.is_empty() && self.inserted.is_empty() && self.moved.is_empty()
    }

    pub fn len(&self) -> usize {
        self.removed.len() + self.inserted.len() + self.moved.len()
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SectionRemoval {
    pub identifier: Identifier<Section>,
    pub old_index: usize,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SectionInsertion {
    pub identifier: Identifier<Section>,
    pub new_index: usize,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SectionMove {
    pub identifier: Identifier<Section>,
    pub old_index: usize,
    pub new_index: usize,
}

/// Item-level operations. Item identity is global to the tree, so a move
/// may cross section boundaries.
#[derive(Clone, Debug, Default)]
pub struct ItemChanges {
    pub removed: Vec<ItemRemoval>,
    pub inserted: Vec<ItemInsertion>,
    pub moved: Vec<ItemMove>,
    pub updated: Vec<ItemUpdate>,
}

impl ItemChanges {
    pub fn is_empty(&self) -> bool {
        self.removed.is_empty()
            && self.inserted.is_empty()
            && self.moved.is_empty()
            && self.updated.is_empty()
    }

    pub fn len(&self) -> usize {
        self.removed.len() + self.inserted.len() + self.moved.len() + self.updated.len()
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ItemRemoval {
    pub identifier: AnyIdentifier,
    pub old: IndexPath,
}

/// A new item, carrying its value.
#[derive(Clone, Debug)]
pub struct ItemInsertion {
    pub identifier: AnyIdentifier,
    pub new: IndexPath,
    pub item: ItemRef,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ItemMove {
    pub identifier: AnyIdentifier,
    pub old: IndexPath,
    pub new: IndexPath,
}

/// A matched item whose content changed, carrying the new value.
///
/// Orthogonal to [`ItemMove`]: an item can be both moved and updated.
#[derive(Clone, Debug)]
pub struct ItemUpdate {
    pub identifier: AnyIdentifier,
    pub old: IndexPath,
    pub new: IndexPath,
    pub item: ItemRef,
}

/// Operation counts, suitable for logging or serializing.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct ScriptSummary {
    pub sections_removed: usize,
    pub sections_inserted: usize,
    pub sections_moved: usize,
    pub items_removed: usize,
    pub items_inserted: usize,
    pub items_moved: usize,
    pub items_updated: usize,
}
