//! The live mirror of displayed content.
//!
//! [`PresentationState`] keeps one [`ItemState`] per displayed row. Replaying
//! an edit script moves those state objects rather than recreating them, so a
//! row keeps its identity (and anything cached against it) across moves.
//!
//! # Lifecycle
//!
//! A state is created *attached* to a [`ChangeSink`] or *detached*.
//! [`PresentationState::discard`] detaches it for good: there is no way to
//! re-attach, a fresh instance has to be built. Independently, every render
//! pass can take a [`RenderToken`]; results computed under a token that has
//! since been superseded are dropped by [`PresentationState::update_if_current`].

use std::sync::Arc;

use tracing::{debug, warn};
use uuid::Uuid;

use listable_diff::{
    apply_sections, DiffError, EditScript, ItemInsertion, ItemUpdate, ScriptItem, ScriptSection,
};
use listable_types::content::check_move;
use listable_types::{AnyIdentifier, Content, ContentSlice, IndexPath, ItemRef, Section};

use crate::error::StateResult;
use crate::sink::{ChangeSink, ContainerUpdate};

/// Live state for one displayed row.
#[derive(Clone, Debug)]
pub struct ItemState {
    id: Uuid,
    item: ItemRef,
    update_count: u32,
}

impl ItemState {
    fn new(item: ItemRef) -> Self {
        Self {
            id: Uuid::now_v7(),
            item,
            update_count: 0,
        }
    }

    /// Stable identity of this state object, preserved across moves.
    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn item(&self) -> &ItemRef {
        &self.item
    }

    pub fn identifier(&self) -> AnyIdentifier {
        self.item.identifier()
    }

    /// How many in-place content updates this row has received.
    pub fn update_count(&self) -> u32 {
        self.update_count
    }
}

impl ScriptItem for ItemState {
    fn script_identifier(&self) -> AnyIdentifier {
        self.item.identifier()
    }

    fn inserted(insertion: &ItemInsertion) -> Self {
        Self::new(insertion.item.clone())
    }

    fn updated(&mut self, update: &ItemUpdate) {
        self.item = update.item.clone();
        self.update_count += 1;
    }
}

pub type SectionState = ScriptSection<ItemState>;

/// Generation marker for one render pass.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RenderToken {
    generation: u64,
}

impl RenderToken {
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

/// Result of a token-guarded update.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UpdateOutcome {
    Applied,
    /// A newer render pass started after the token was taken; nothing changed.
    Superseded,
}

/// Mutable mirror of the content currently on screen.
pub struct PresentationState {
    sections: Vec<SectionState>,
    content: Content,
    contains_all_items: bool,
    sink: Option<Arc<dyn ChangeSink>>,
    animates_changes: bool,
    generation: u64,
}

impl std::fmt::Debug for PresentationState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PresentationState")
            .field("sections", &self.sections.len())
            .field("items", &self.content.item_count())
            .field("contains_all_items", &self.contains_all_items)
            .field("attached", &self.sink.is_some())
            .field("generation", &self.generation)
            .finish()
    }
}

impl PresentationState {
    /// Create an empty state that reports to `sink`.
    pub fn attached(sink: Arc<dyn ChangeSink>) -> Self {
        Self {
            sink: Some(sink),
            ..Self::detached()
        }
    }

    /// Create an empty state with notifications suppressed.
    pub fn detached() -> Self {
        Self {
            sections: Vec::new(),
            content: Content::new(),
            contains_all_items: true,
            sink: None,
            animates_changes: true,
            generation: 0,
        }
    }

    pub fn is_attached(&self) -> bool {
        self.sink.is_some()
    }

    /// Stop notifying the container. The stored content is kept as-is.
    pub fn discard(&mut self) {
        if self.sink.take().is_some() {
            debug!(generation = self.generation, "presentation state discarded");
        }
    }

    pub fn set_animates_changes(&mut self, animates: bool) {
        self.animates_changes = animates;
    }

    /// The presented content: the baseline for the next diff.
    pub fn content(&self) -> &Content {
        &self.content
    }

    /// `false` when the presented content is a truncated slice.
    pub fn contains_all_items(&self) -> bool {
        self.contains_all_items
    }

    pub fn sections(&self) -> &[SectionState] {
        &self.sections
    }

    pub fn item_state(&self, path: IndexPath) -> Option<&ItemState> {
        self.sections.get(path.section)?.items.get(path.item)
    }

    // ---------------------------------------------------------------
    // Render passes
    // ---------------------------------------------------------------

    /// Start a render pass, superseding any pass still in flight.
    pub fn begin_render_pass(&mut self) -> RenderToken {
        self.generation += 1;
        RenderToken {
            generation: self.generation,
        }
    }

    pub fn is_current(&self, token: RenderToken) -> bool {
        token.generation == self.generation
    }

    /// Apply `script` only if `token` belongs to the latest render pass.
    pub fn update_if_current(
        &mut self,
        token: RenderToken,
        script: &EditScript,
        slice: ContentSlice,
    ) -> StateResult<UpdateOutcome> {
        if !self.is_current(token) {
            debug!(
                stale = token.generation,
                current = self.generation,
                "dropping superseded render pass"
            );
            return Ok(UpdateOutcome::Superseded);
        }
        self.update(script, slice)?;
        Ok(UpdateOutcome::Applied)
    }

    // ---------------------------------------------------------------
    // Mutation
    // ---------------------------------------------------------------

    /// Replay `script` onto the mirror and adopt `slice` as the new baseline.
    ///
    /// The slice content is stored verbatim; the script only drives the
    /// mirror and the container notification. Fails without changing
    /// anything if the script does not turn the current mirror into the
    /// slice's structure.
    pub fn update(&mut self, script: &EditScript, slice: ContentSlice) -> StateResult<()> {
        let sections = apply_sections(script, &self.sections)?;

        let mirrored = sections
            .iter()
            .map(|s| (&s.identifier, s.items.iter().map(ItemState::identifier)));
        let matches = sections.len() == slice.content.sections.len()
            && mirrored.zip(&slice.content.sections).all(|((id, items), section)| {
                id == section.identifier()
                    && items.eq(section.items.iter().map(|item| item.identifier()))
            });
        if !matches {
            return Err(DiffError::ScriptMismatch(
                "replayed mirror does not match the new content".into(),
            )
            .into());
        }

        // Adopt the new values so unchanged-content rows also pick up
        // metadata changes such as sizing.
        self.sections = sections;
        for (section, new) in self.sections.iter_mut().zip(&slice.content.sections) {
            for (state, item) in section.items.iter_mut().zip(&new.items) {
                state.item = item.clone();
            }
        }
        self.content = slice.content;
        self.contains_all_items = slice.contains_all_items;

        let summary = script.summary();
        debug!(
            generation = self.generation,
            ?summary,
            attached = self.sink.is_some(),
            "presentation state updated"
        );

        if let Some(sink) = &self.sink {
            if !script.is_empty() {
                sink.perform_batch_updates(&ContainerUpdate::from_script(
                    script,
                    self.animates_changes,
                ));
            }
        }
        Ok(())
    }

    /// Move one row, as the result of a user reorder.
    ///
    /// The container already shows the move, so nothing is reported to the
    /// sink. Afterwards the baseline equals the moved content, so diffing it
    /// against the same tree yields an empty script.
    pub fn move_item(&mut self, from: IndexPath, to: IndexPath) -> StateResult<()> {
        check_move(self.sections.iter().map(|s| s.items.len()), from, to)?;
        self.content.move_item(from, to)?;

        let state = self.sections[from.section].items.remove(from.item);
        self.sections[to.section].items.insert(to.item, state);

        debug!(%from, %to, "presentation item moved");
        Ok(())
    }

    /// Remove one row, as the result of a user delete.
    pub fn remove_item(&mut self, path: IndexPath) -> StateResult<ItemRef> {
        let item = self.content.remove_item(path)?;
        match self.sections.get_mut(path.section) {
            Some(section) if path.item < section.items.len() => {
                section.items.remove(path.item);
            }
            _ => warn!(%path, "mirror out of step with content on removal"),
        }
        Ok(item)
    }

    /// The presented content rebuilt from the mirror.
    pub fn mirrored_content(&self) -> Content {
        Content::with_sections(
            self.sections
                .iter()
                .map(|s| {
                    Section::from_parts(
                        s.identifier.clone(),
                        s.items.iter().map(|state| state.item.clone()).collect(),
                    )
                })
                .collect(),
        )
    }
}
