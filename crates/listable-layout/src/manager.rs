//! The active layout object and the manager that swaps it.

use std::fmt;
use std::sync::Arc;

use tracing::{debug, info};
use uuid::Uuid;

use crate::appearance::{Appearance, Behavior};
use crate::description::LayoutDescription;
use crate::error::LayoutResult;
use crate::layout::{AnyListLayout, LayoutDelegate};

/// The layout object handed to the rendering container.
///
/// It owns the description it was built from, the list-wide appearance and
/// behavior, and the current family layout. A dirty layout is rebuilt from
/// the delegate on the next [`prepare_layout`](Self::prepare_layout).
pub struct CollectionViewLayout {
    id: Uuid,
    delegate: Arc<dyn LayoutDelegate>,
    layout_description: LayoutDescription,
    appearance: Appearance,
    behavior: Behavior,
    layout: Box<dyn AnyListLayout>,
    needs_rebuild: bool,
    rebuild_count: u64,
}

impl CollectionViewLayout {
    /// Creates a layout object holding an empty family layout, marked for
    /// rebuild.
    pub fn new(
        delegate: Arc<dyn LayoutDelegate>,
        layout_description: LayoutDescription,
        appearance: Appearance,
        behavior: Behavior,
    ) -> Self {
        let layout = layout_description.configuration().create_empty_layout();
        Self {
            id: Uuid::now_v7(),
            delegate,
            layout_description,
            appearance,
            behavior,
            layout,
            needs_rebuild: true,
            rebuild_count: 0,
        }
    }

    /// Identity of this layout object. Stable across in-place rebuilds.
    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn layout(&self) -> &dyn AnyListLayout {
        self.layout.as_ref()
    }

    pub fn layout_description(&self) -> &LayoutDescription {
        &self.layout_description
    }

    /// Replaces the description without touching the family layout.
    pub fn set_layout_description(&mut self, layout_description: LayoutDescription) {
        self.layout_description = layout_description;
    }

    pub fn appearance(&self) -> &Appearance {
        &self.appearance
    }

    pub fn set_appearance(&mut self, appearance: Appearance) {
        if self.appearance != appearance {
            self.appearance = appearance;
            self.set_needs_rebuild();
        }
    }

    pub fn behavior(&self) -> &Behavior {
        &self.behavior
    }

    pub fn set_behavior(&mut self, behavior: Behavior) {
        if self.behavior != behavior {
            self.behavior = behavior;
            self.set_needs_rebuild();
        }
    }

    pub fn delegate(&self) -> &Arc<dyn LayoutDelegate> {
        &self.delegate
    }

    pub fn needs_rebuild(&self) -> bool {
        self.needs_rebuild
    }

    pub fn set_needs_rebuild(&mut self) {
        self.needs_rebuild = true;
    }

    /// Number of times the family layout has been rebuilt.
    pub fn rebuild_count(&self) -> u64 {
        self.rebuild_count
    }

    /// Rebuilds the family layout from the delegate if it is dirty.
    ///
    /// Returns `true` if a rebuild happened.
    pub fn prepare_layout(&mut self) -> bool {
        if !self.needs_rebuild {
            return false;
        }
        self.layout = self.layout_description.configuration().create_populated_layout(
            &self.appearance,
            &self.behavior,
            self.delegate.as_ref(),
        );
        self.needs_rebuild = false;
        self.rebuild_count += 1;
        debug!(
            layout = self.layout.layout_type().name(),
            items = self.layout.content().item_count(),
            rebuilds = self.rebuild_count,
            "rebuilt list layout"
        );
        true
    }
}

impl fmt::Debug for CollectionViewLayout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CollectionViewLayout")
            .field("id", &self.id)
            .field("layout_description", &self.layout_description)
            .field("needs_rebuild", &self.needs_rebuild)
            .finish_non_exhaustive()
    }
}

/// The rendering container that displays a [`CollectionViewLayout`].
pub trait LayoutContainer: Send + Sync {
    /// Installs `layout`, calling `completion` once the transition ends.
    fn set_collection_view_layout(
        &self,
        layout: &CollectionViewLayout,
        animated: bool,
        completion: Box<dyn FnOnce() + Send>,
    );
}

/// What [`LayoutManager::set`] did with a new description.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LayoutTransition {
    /// Same family and the live layout already matches.
    Unchanged,
    /// Same family; the live layout was marked for rebuild.
    Rebuild,
    /// Different family; a new layout object was installed.
    Replaced,
}

/// Owns the active [`CollectionViewLayout`] and applies new descriptions.
pub struct LayoutManager {
    container: Arc<dyn LayoutContainer>,
    collection_view_layout: CollectionViewLayout,
}

impl LayoutManager {
    pub fn new(
        collection_view_layout: CollectionViewLayout,
        container: Arc<dyn LayoutContainer>,
    ) -> Self {
        Self {
            container,
            collection_view_layout,
        }
    }

    pub fn collection_view_layout(&self) -> &CollectionViewLayout {
        &self.collection_view_layout
    }

    pub fn collection_view_layout_mut(&mut self) -> &mut CollectionViewLayout {
        &mut self.collection_view_layout
    }

    /// Applies `layout`.
    ///
    /// A description of the current family replaces the stored description
    /// and marks the layout dirty only if its appearance changed; the
    /// completion runs before this returns. A description of another family
    /// builds a new, populated layout object and hands it to the container,
    /// which runs the completion when its transition finishes.
    pub fn set(
        &mut self,
        layout: LayoutDescription,
        animated: bool,
        completion: impl FnOnce() + Send + 'static,
    ) -> LayoutResult<LayoutTransition> {
        let same_type = self
            .collection_view_layout
            .layout_description()
            .configuration()
            .is_same_layout_type(layout.configuration());

        if same_type {
            let should_rebuild = layout
                .configuration()
                .should_rebuild(self.collection_view_layout.layout())?;
            self.collection_view_layout.set_layout_description(layout);

            let transition = if should_rebuild {
                self.collection_view_layout.set_needs_rebuild();
                LayoutTransition::Rebuild
            } else {
                LayoutTransition::Unchanged
            };
            debug!(?transition, "updated list layout in place");
            completion();
            return Ok(transition);
        }

        let mut replacement = CollectionViewLayout::new(
            Arc::clone(self.collection_view_layout.delegate()),
            layout,
            self.collection_view_layout.appearance().clone(),
            self.collection_view_layout.behavior().clone(),
        );
        replacement.prepare_layout();
        let previous = std::mem::replace(&mut self.collection_view_layout, replacement);
        info!(
            from = previous.layout_description().layout_type().name(),
            to = self.collection_view_layout.layout_description().layout_type().name(),
            animated,
            "replacing list layout"
        );
        self.container.set_collection_view_layout(
            &self.collection_view_layout,
            animated,
            Box::new(completion),
        );
        Ok(LayoutTransition::Replaced)
    }
}

impl fmt::Debug for LayoutManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LayoutManager")
            .field("collection_view_layout", &self.collection_view_layout)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::families::{GridAppearance, GridLayout, TableAppearance, TableLayout};
    use crate::layout::{LayoutContent, LayoutDefaults, LayoutType, ListLayout};
    use listable_types::{Content, Identifier, ItemContent, Section};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    #[derive(Clone, Debug, PartialEq)]
    struct Row(u32);

    impl ItemContent for Row {
        fn identifier(&self) -> Identifier<Self> {
            Identifier::new(self.0)
        }
    }

    struct FixedContent(Content);

    impl LayoutDelegate for FixedContent {
        fn list_layout_content(&self, defaults: &LayoutDefaults) -> LayoutContent {
            LayoutContent::new(&self.0, defaults)
        }
    }

    #[derive(Default)]
    struct DeferredContainer {
        installed: Mutex<Vec<(Uuid, bool, usize)>>,
        pending: Mutex<Vec<Box<dyn FnOnce() + Send>>>,
    }

    impl DeferredContainer {
        fn finish_transitions(&self) {
            let pending: Vec<_> = self.pending.lock().unwrap().drain(..).collect();
            for completion in pending {
                completion();
            }
        }
    }

    impl LayoutContainer for DeferredContainer {
        fn set_collection_view_layout(
            &self,
            layout: &CollectionViewLayout,
            animated: bool,
            completion: Box<dyn FnOnce() + Send>,
        ) {
            self.installed.lock().unwrap().push((
                layout.id(),
                animated,
                layout.layout().content().item_count(),
            ));
            self.pending.lock().unwrap().push(completion);
        }
    }

    fn table(spacing: f64) -> LayoutDescription {
        TableLayout::describe(move |a: &mut TableAppearance| a.layout.item_spacing = spacing)
    }

    fn manager(description: LayoutDescription) -> (LayoutManager, Arc<DeferredContainer>) {
        let content = Content::new().with(Section::new("s").with_content(Row(1)).with_content(Row(2)));
        let delegate: Arc<dyn LayoutDelegate> = Arc::new(FixedContent(content));
        let container = Arc::new(DeferredContainer::default());
        let layout = CollectionViewLayout::new(
            delegate,
            description,
            Appearance::default(),
            Behavior::default(),
        );
        let mut manager = LayoutManager::new(layout, container.clone());
        manager.collection_view_layout_mut().prepare_layout();
        (manager, container)
    }

    fn counter() -> (Arc<AtomicUsize>, impl FnOnce() + Send + 'static) {
        let count = Arc::new(AtomicUsize::new(0));
        let handle = count.clone();
        (count, move || {
            handle.fetch_add(1, Ordering::SeqCst);
        })
    }

    #[test]
    fn new_layout_starts_empty_and_dirty() {
        let delegate: Arc<dyn LayoutDelegate> = Arc::new(FixedContent(
            Content::new().with(Section::new("s").with_content(Row(1))),
        ));
        let mut layout = CollectionViewLayout::new(
            delegate,
            LayoutDescription::default(),
            Appearance::default(),
            Behavior::default(),
        );

        assert!(layout.needs_rebuild());
        assert_eq!(layout.layout().content().item_count(), 0);

        assert!(layout.prepare_layout());
        assert!(!layout.needs_rebuild());
        assert_eq!(layout.layout().content().item_count(), 1);
        assert!(!layout.prepare_layout());
        assert_eq!(layout.rebuild_count(), 1);
    }

    #[test]
    fn populated_layout_uses_family_defaults() {
        let (manager, _) = manager(table(0.0));
        let items = &manager.collection_view_layout().layout().content().sections[0].items;
        assert_eq!(
            items[0].sizing,
            listable_types::Sizing::Fixed(TableLayout::DEFAULT_ROW_HEIGHT)
        );
    }

    #[test]
    fn unchanged_description_keeps_layout() {
        let (mut manager, container) = manager(table(4.0));
        let id = manager.collection_view_layout().id();
        let (calls, completion) = counter();

        let transition = manager.set(table(4.0), true, completion).unwrap();

        assert_eq!(transition, LayoutTransition::Unchanged);
        assert_eq!(manager.collection_view_layout().id(), id);
        assert!(!manager.collection_view_layout().needs_rebuild());
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert!(container.installed.lock().unwrap().is_empty());
    }

    #[test]
    fn changed_appearance_rebuilds_in_place() {
        let (mut manager, container) = manager(table(4.0));
        let id = manager.collection_view_layout().id();
        let (calls, completion) = counter();

        let transition = manager.set(table(16.0), false, completion).unwrap();

        assert_eq!(transition, LayoutTransition::Rebuild);
        assert_eq!(manager.collection_view_layout().id(), id);
        assert!(manager.collection_view_layout().needs_rebuild());
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert!(container.installed.lock().unwrap().is_empty());

        assert!(manager.collection_view_layout_mut().prepare_layout());
        let layout = manager
            .collection_view_layout()
            .layout()
            .as_any()
            .downcast_ref::<TableLayout>()
            .unwrap();
        assert_eq!(layout.layout_appearance().layout.item_spacing, 16.0);
    }

    #[test]
    fn different_family_replaces_layout() {
        let (mut manager, container) = manager(table(4.0));
        let id = manager.collection_view_layout().id();
        let (calls, completion) = counter();

        let grid = GridLayout::describe(|a: &mut GridAppearance| a.columns = 4);
        let transition = manager.set(grid, true, completion).unwrap();

        assert_eq!(transition, LayoutTransition::Replaced);
        let replaced = manager.collection_view_layout();
        assert_ne!(replaced.id(), id);
        assert_eq!(replaced.layout().layout_type(), LayoutType::of::<GridLayout>());
        assert!(!replaced.needs_rebuild());
        assert_eq!(replaced.rebuild_count(), 1);
        assert_eq!(
            *container.installed.lock().unwrap(),
            vec![(replaced.id(), true, 2)]
        );

        assert_eq!(calls.load(Ordering::SeqCst), 0);
        container.finish_transitions();
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        container.finish_transitions();
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn replacement_keeps_appearance_and_delegate() {
        let (mut manager, _) = manager(table(4.0));
        manager.collection_view_layout_mut().set_appearance(Appearance {
            show_separators: true,
            ..Appearance::default()
        });

        manager
            .set(LayoutDescription::grid(|_| {}), false, || {})
            .unwrap();

        let layout = manager.collection_view_layout().layout();
        assert!(layout.appearance().show_separators);
        assert_eq!(layout.content().item_count(), 2);
    }

    #[test]
    fn appearance_change_marks_dirty_only_when_different() {
        let (mut manager, _) = manager(table(0.0));
        let layout = manager.collection_view_layout_mut();

        layout.set_appearance(Appearance::default());
        assert!(!layout.needs_rebuild());

        layout.set_behavior(Behavior {
            selection_mode: crate::appearance::SelectionMode::Multiple,
            ..Behavior::default()
        });
        assert!(layout.needs_rebuild());
    }
}
