//! Batch updates delivered to the scrollable container.

use std::sync::{PoisonError, RwLock};

use listable_diff::EditScript;
use listable_types::IndexPath;
use serde::Serialize;

/// One batch of structural changes, in container conventions.
///
/// Deletions use old indexes, insertions new indexes, moves both. Updated
/// items are addressed by their new index path and should be reconfigured
/// after the batch has been performed.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct ContainerUpdate {
    pub animated: bool,
    pub deleted_sections: Vec<usize>,
    pub inserted_sections: Vec<usize>,
    pub moved_sections: Vec<(usize, usize)>,
    pub deleted_items: Vec<IndexPath>,
    pub inserted_items: Vec<IndexPath>,
    pub moved_items: Vec<(IndexPath, IndexPath)>,
    pub updated_items: Vec<IndexPath>,
}

impl ContainerUpdate {
    pub fn from_script(script: &EditScript, animated: bool) -> Self {
        Self {
            animated,
            deleted_sections: script.sections.removed.iter().map(|r| r.old_index).collect(),
            inserted_sections: script.sections.inserted.iter().map(|i| i.new_index).collect(),
            moved_sections: script
                .sections
                .moved
                .iter()
                .map(|m| (m.old_index, m.new_index))
                .collect(),
            deleted_items: script.items.removed.iter().map(|r| r.old).collect(),
            inserted_items: script.items.inserted.iter().map(|i| i.new).collect(),
            moved_items: script.items.moved.iter().map(|m| (m.old, m.new)).collect(),
            updated_items: script.items.updated.iter().map(|u| u.new).collect(),
        }
    }

    /// Returns `true` if the batch carries no structural change.
    pub fn is_empty(&self) -> bool {
        self.deleted_sections.is_empty()
            && self.inserted_sections.is_empty()
            && self.moved_sections.is_empty()
            && self.deleted_items.is_empty()
            && self.inserted_items.is_empty()
            && self.moved_items.is_empty()
            && self.updated_items.is_empty()
    }
}

/// The live view that presentation state notifies.
pub trait ChangeSink: Send + Sync {
    /// Perform one batch of updates.
    fn perform_batch_updates(&self, update: &ContainerUpdate);
}

/// A [`ChangeSink`] that records every batch, for tests and headless use.
#[derive(Debug, Default)]
pub struct RecordingSink {
    updates: RwLock<Vec<ContainerUpdate>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// All batches received so far.
    pub fn updates(&self) -> Vec<ContainerUpdate> {
        self.updates
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn len(&self) -> usize {
        self.updates
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl ChangeSink for RecordingSink {
    fn perform_batch_updates(&self, update: &ContainerUpdate) {
        self.updates
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .push(update.clone());
    }
}
