//! All content plus the presentation state, kept in step.
//!
//! The presentation state may show only a slice of the full content. Slices
//! are prefixes, so index paths inside the presented range address the same
//! row in both.

use tracing::debug;

use listable_types::{Content, IndexPath, ItemRef};

use crate::error::StateResult;
use crate::presentation::PresentationState;

#[derive(Debug)]
pub struct ListStorage {
    all_content: Content,
    presentation_state: PresentationState,
}

impl ListStorage {
    pub fn new(presentation_state: PresentationState) -> Self {
        Self {
            all_content: Content::new(),
            presentation_state,
        }
    }

    pub fn all_content(&self) -> &Content {
        &self.all_content
    }

    pub fn set_all_content(&mut self, content: Content) {
        self.all_content = content;
    }

    pub fn presentation_state(&self) -> &PresentationState {
        &self.presentation_state
    }

    pub fn presentation_state_mut(&mut self) -> &mut PresentationState {
        &mut self.presentation_state
    }

    /// Swap in a new presentation state, discarding the old one.
    pub fn replace_presentation_state(&mut self, mut state: PresentationState) {
        std::mem::swap(&mut self.presentation_state, &mut state);
        state.discard();
    }

    /// Move a row in both the full content and the presented mirror.
    pub fn move_item(&mut self, from: IndexPath, to: IndexPath) -> StateResult<()> {
        // Validate against the full content first; the mirror check follows.
        let mut all_content = self.all_content.clone();
        all_content.move_item(from, to)?;
        self.presentation_state.move_item(from, to)?;
        self.all_content = all_content;

        debug!(%from, %to, "storage item moved");
        Ok(())
    }

    /// Remove a row from both the full content and the presented mirror.
    pub fn remove_item(&mut self, path: IndexPath) -> StateResult<ItemRef> {
        let mut all_content = self.all_content.clone();
        let item = all_content.remove_item(path)?;
        self.presentation_state.remove_item(path)?;
        self.all_content = all_content;
        Ok(item)
    }
}
