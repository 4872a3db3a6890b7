//! The list view: content in, batched container updates and layouts out.

use std::sync::{Arc, PoisonError, RwLock};

use tracing::{debug, info};

use listable_diff::{diff, EditScript};
use listable_layout::{
    CollectionViewLayout, LayoutContainer, LayoutContent, LayoutDefaults, LayoutDelegate,
    LayoutDescription, LayoutManager, LayoutTransition,
};
use listable_state::{ChangeSink, ListStorage, PresentationState, RenderToken, UpdateOutcome};
use listable_types::{Content, ContentSlice, IndexPath, ItemRef, Sizing};

use crate::config::ListConfig;
use crate::error::ListResult;
use crate::properties::ListProperties;

/// Result of applying new content.
#[derive(Clone, Debug, Default)]
pub struct ContentUpdate {
    /// The changes replayed onto the presented content.
    pub script: EditScript,
    /// Where the configured auto-scroll action wants to scroll, if anywhere.
    pub scroll_to: Option<IndexPath>,
}

/// Presented content as seen by the layout.
#[derive(Debug, Default)]
struct PresentedContent {
    content: RwLock<Content>,
}

impl PresentedContent {
    fn replace(&self, content: Content) {
        *self.content.write().unwrap_or_else(PoisonError::into_inner) = content;
    }
}

impl LayoutDelegate for PresentedContent {
    fn list_layout_content(&self, defaults: &LayoutDefaults) -> LayoutContent {
        let content = self.content.read().unwrap_or_else(PoisonError::into_inner);
        LayoutContent::new(&content, defaults)
    }
}

/// Per-item sizing in presentation order. Sizing is not part of item
/// equality, so a resize alone produces an empty script.
fn sizings(content: &Content) -> impl Iterator<Item = Sizing> + '_ {
    content
        .sections
        .iter()
        .flat_map(|section| section.items.iter().map(|item| item.sizing()))
}

/// A list bound to a change sink and a layout container.
pub struct ListView {
    config: ListConfig,
    storage: ListStorage,
    layout_manager: LayoutManager,
    presented: Arc<PresentedContent>,
}

impl ListView {
    pub fn new(
        sink: Arc<dyn ChangeSink>,
        container: Arc<dyn LayoutContainer>,
        config: ListConfig,
    ) -> Self {
        let mut state = PresentationState::attached(sink);
        state.set_animates_changes(config.animates_changes);

        let presented = Arc::new(PresentedContent::default());
        let layout = CollectionViewLayout::new(
            presented.clone(),
            config.layout_family.description(),
            config.appearance.clone(),
            config.behavior.clone(),
        );

        Self {
            storage: ListStorage::new(state),
            layout_manager: LayoutManager::new(layout, container),
            presented,
            config,
        }
    }

    pub fn config(&self) -> &ListConfig {
        &self.config
    }

    /// All content last supplied, including any rows not yet presented.
    pub fn content(&self) -> &Content {
        self.storage.all_content()
    }

    pub fn presentation_state(&self) -> &PresentationState {
        self.storage.presentation_state()
    }

    pub fn collection_view_layout(&self) -> &CollectionViewLayout {
        self.layout_manager.collection_view_layout()
    }

    /// Applies list-wide configuration.
    ///
    /// Changing the layout family installs that family's default layout.
    pub fn configure(&mut self, config: ListConfig) -> ListResult<()> {
        let family = config.layout_family;
        let animated = config.animates_changes;
        if self.apply_config(config) {
            self.set_layout(family.description(), animated, || {})?;
        }
        Ok(())
    }

    pub fn set_layout(
        &mut self,
        layout: LayoutDescription,
        animated: bool,
        completion: impl FnOnce() + Send + 'static,
    ) -> ListResult<LayoutTransition> {
        Ok(self.layout_manager.set(layout, animated, completion)?)
    }

    /// Applies configuration, then layout, then content.
    ///
    /// The explicit layout takes the place of the configured family's
    /// default. Content is validated up front, so invalid content leaves
    /// the configuration and layout untouched.
    pub fn set_properties(&mut self, properties: ListProperties) -> ListResult<ContentUpdate> {
        let ListProperties {
            config,
            layout,
            content,
        } = properties;
        content.validate()?;
        let animated = config.animates_changes;

        self.apply_config(config);
        self.set_layout(layout, animated, || {})?;
        self.set_content(content)
    }

    /// Diffs `content` against what is presented and applies the result.
    ///
    /// On error nothing changes.
    pub fn set_content(&mut self, content: Content) -> ListResult<ContentUpdate> {
        let token = self.begin_update();
        Ok(self.finish_update(token, content)?.unwrap_or_default())
    }

    /// Starts an update whose content is computed later.
    ///
    /// Beginning another update supersedes this one.
    pub fn begin_update(&mut self) -> RenderToken {
        self.storage.presentation_state_mut().begin_render_pass()
    }

    /// Completes the update started with `token`.
    ///
    /// Returns `Ok(None)` without touching any state if a newer update has
    /// begun since.
    pub fn finish_update(
        &mut self,
        token: RenderToken,
        content: Content,
    ) -> ListResult<Option<ContentUpdate>> {
        if !self.storage.presentation_state().is_current(token) {
            debug!(generation = token.generation(), "skipping superseded list update");
            return Ok(None);
        }
        content.validate()?;

        let slice = self.slice(&content);
        let state = self.storage.presentation_state_mut();
        let script = diff(state.content(), &slice.content)?;
        let resized = !sizings(state.content()).eq(sizings(&slice.content));
        if state.update_if_current(token, &script, slice)? == UpdateOutcome::Superseded {
            return Ok(None);
        }

        self.storage.set_all_content(content);
        let state = self.storage.presentation_state();
        let scroll_to = self.config.auto_scroll_action.target(&script, state.content());
        info!(
            changes = script.len(),
            items = state.content().item_count(),
            complete = state.contains_all_items(),
            "list content updated"
        );

        self.refresh_layout(!script.is_empty() || resized);
        Ok(Some(ContentUpdate { script, scroll_to }))
    }

    /// Moves a row after a user reorder. The container is not notified.
    pub fn move_item(&mut self, from: IndexPath, to: IndexPath) -> ListResult<()> {
        self.storage.move_item(from, to)?;
        self.refresh_layout(from != to);
        Ok(())
    }

    /// Removes a row after a user delete. The container is not notified.
    pub fn remove_item(&mut self, path: IndexPath) -> ListResult<ItemRef> {
        let item = self.storage.remove_item(path)?;
        self.refresh_layout(true);
        Ok(item)
    }

    /// Rebuilds the layout if anything changed since the last call.
    pub fn prepare_layout(&mut self) -> bool {
        self.layout_manager.collection_view_layout_mut().prepare_layout()
    }

    /// Stores `config` and pushes its values down. Returns `true` if the
    /// layout family changed.
    fn apply_config(&mut self, config: ListConfig) -> bool {
        self.storage
            .presentation_state_mut()
            .set_animates_changes(config.animates_changes);

        let layout = self.layout_manager.collection_view_layout_mut();
        layout.set_appearance(config.appearance.clone());
        layout.set_behavior(config.behavior.clone());

        let family_changed = config.layout_family != self.config.layout_family;
        self.config = config;
        family_changed
    }

    fn slice(&self, content: &Content) -> ContentSlice {
        match self.config.presentation_slice_size {
            Some(size) if content.item_count() > size => {
                content.slice_to(IndexPath::zero(), size.saturating_sub(1))
            }
            _ => ContentSlice::all(content.clone()),
        }
    }

    fn refresh_layout(&mut self, changed: bool) {
        self.presented
            .replace(self.storage.presentation_state().content().clone());
        if changed {
            self.layout_manager
                .collection_view_layout_mut()
                .set_needs_rebuild();
        }
    }
}

impl Drop for ListView {
    fn drop(&mut self) {
        self.storage.presentation_state_mut().discard();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{AutoScrollAction, LayoutFamily};
    use listable_layout::{GridLayout, LayoutType, ListLayout, TableAppearance, TableLayout};
    use listable_state::RecordingSink;
    use listable_types::{ContentError, Identifier, Item, ItemContent, Section, Sizing};
    use std::sync::Mutex;

    #[derive(Clone, Debug, PartialEq)]
    struct Person {
        id: u32,
        name: &'static str,
    }

    impl ItemContent for Person {
        fn identifier(&self) -> Identifier<Self> {
            Identifier::new(self.id)
        }
    }

    fn person(id: u32, name: &'static str) -> Person {
        Person { id, name }
    }

    #[derive(Default)]
    struct ImmediateContainer {
        installs: Mutex<usize>,
    }

    impl LayoutContainer for ImmediateContainer {
        fn set_collection_view_layout(
            &self,
            _layout: &CollectionViewLayout,
            _animated: bool,
            completion: Box<dyn FnOnce() + Send>,
        ) {
            *self.installs.lock().unwrap() += 1;
            completion();
        }
    }

    fn view(config: ListConfig) -> (ListView, Arc<RecordingSink>, Arc<ImmediateContainer>) {
        let sink = Arc::new(RecordingSink::new());
        let container = Arc::new(ImmediateContainer::default());
        let view = ListView::new(sink.clone(), container.clone(), config);
        (view, sink, container)
    }

    fn people(sections: &[(&'static str, &[u32])]) -> Content {
        let mut content = Content::new();
        for (id, rows) in sections {
            let mut section = Section::new(*id);
            for row in *rows {
                section.push(Item::new(person(*row, "p")));
            }
            content.push(section);
        }
        content
    }

    #[test]
    fn first_content_inserts_everything() {
        let (mut view, sink, _) = view(ListConfig::default());

        let update = view
            .set_content(people(&[("a", &[1, 2]), ("b", &[3])]))
            .unwrap();

        assert_eq!(update.script.sections.inserted.len(), 2);
        assert_eq!(update.script.items.inserted.len(), 3);
        let recorded = sink.updates();
        assert_eq!(recorded.len(), 1);
        assert!(recorded[0].animated);
        assert_eq!(view.presentation_state().content().item_count(), 3);
    }

    #[test]
    fn same_content_is_silent() {
        let (mut view, sink, _) = view(ListConfig::default());
        let content = people(&[("a", &[1, 2])]);
        view.set_content(content.clone()).unwrap();
        view.prepare_layout();

        let update = view.set_content(content).unwrap();

        assert!(update.script.is_empty());
        assert_eq!(sink.len(), 1);
        assert!(!view.collection_view_layout().needs_rebuild());
    }

    #[test]
    fn cross_section_move_is_single_operation() {
        let (mut view, sink, _) = view(ListConfig::default());
        view.set_content(people(&[("a", &[1, 2]), ("b", &[3])]))
            .unwrap();

        let update = view
            .set_content(people(&[("a", &[2]), ("b", &[3, 1])]))
            .unwrap();

        assert_eq!(update.script.len(), 1);
        assert_eq!(update.script.items.moved.len(), 1);
        let moved = &update.script.items.moved[0];
        assert_eq!(moved.old, IndexPath::new(0, 0));
        assert_eq!(moved.new, IndexPath::new(1, 1));
        assert_eq!(sink.updates()[1].moved_items.len(), 1);
    }

    #[test]
    fn container_update_reports_moved_rows_as_json() {
        let (mut view, sink, _) = view(ListConfig::default());
        view.set_content(people(&[("a", &[1, 2, 3])])).unwrap();
        let update = view.set_content(people(&[("a", &[3, 1, 2])])).unwrap();

        let summary = serde_json::to_value(update.script.summary()).unwrap();
        assert_eq!(summary["items_moved"], 1);
        assert_eq!(summary["items_inserted"], 0);

        let batch = serde_json::to_value(&sink.updates()[1]).unwrap();
        assert_eq!(batch["moved_items"][0][0]["item"], 2);
        assert_eq!(batch["moved_items"][0][1]["item"], 0);
    }

    #[test]
    fn changed_value_is_update() {
        let (mut view, _, _) = view(ListConfig::default());
        let mut content = Content::new().with(Section::new("a").with_content(person(1, "Ann")));
        view.set_content(content.clone()).unwrap();

        let renamed: ItemRef = Arc::new(Item::new(person(1, "Anne")));
        content.sections[0].items[0] = renamed;
        let update = view.set_content(content).unwrap();

        assert_eq!(update.script.len(), 1);
        assert_eq!(update.script.items.updated.len(), 1);
        let state = view.presentation_state().item_state(IndexPath::zero()).unwrap();
        let item = state.item().downcast_ref::<Person>().unwrap();
        assert_eq!(item.content.name, "Anne");
    }

    #[test]
    fn duplicate_identifiers_leave_state_unchanged() {
        let (mut view, sink, _) = view(ListConfig::default());
        view.set_content(people(&[("a", &[1])])).unwrap();

        let err = view.set_content(people(&[("a", &[1]), ("b", &[1])])).unwrap_err();

        assert!(matches!(
            err,
            crate::ListError::Content(ContentError::DuplicateItem { .. })
        ));
        assert_eq!(view.content().item_count(), 1);
        assert_eq!(view.presentation_state().content().section_count(), 1);
        assert_eq!(sink.len(), 1);
    }

    #[test]
    fn superseded_update_is_dropped() {
        let (mut view, sink, _) = view(ListConfig::default());

        let stale = view.begin_update();
        let current = view.begin_update();

        let dropped = view.finish_update(stale, people(&[("a", &[1])])).unwrap();
        assert!(dropped.is_none());
        assert!(view.content().is_empty());
        assert!(sink.is_empty());

        let applied = view.finish_update(current, people(&[("a", &[2])])).unwrap();
        assert!(applied.is_some());
        assert_eq!(sink.len(), 1);
    }

    #[test]
    fn move_item_keeps_next_diff_empty() {
        let (mut view, sink, _) = view(ListConfig::default());
        view.set_content(people(&[("a", &[2]), ("b", &[3, 1, 4, 5])]))
            .unwrap();

        view.move_item(IndexPath::new(1, 1), IndexPath::new(0, 0))
            .unwrap();

        let update = view
            .set_content(people(&[("a", &[1, 2]), ("b", &[3, 4, 5])]))
            .unwrap();
        assert!(update.script.is_empty());
        assert_eq!(sink.len(), 1);
    }

    #[test]
    fn content_change_rebuilds_layout_with_new_items() {
        let (mut view, _, _) = view(ListConfig::default());
        view.set_content(
            Content::new().with(
                Section::new("a")
                    .with_content(person(1, "a"))
                    .with(Item::new(person(2, "b")).with_sizing(Sizing::Fixed(60.0))),
            ),
        )
        .unwrap();

        assert!(view.collection_view_layout().needs_rebuild());
        assert!(view.prepare_layout());

        let content = view.collection_view_layout().layout().content();
        assert_eq!(content.item_count(), 2);
        assert_eq!(
            content.sections[0].items[0].sizing,
            Sizing::Fixed(TableLayout::DEFAULT_ROW_HEIGHT)
        );
        assert_eq!(content.sections[0].items[1].sizing, Sizing::Fixed(60.0));
    }

    #[test]
    fn sizing_change_alone_rebuilds_layout() {
        let (mut view, sink, _) = view(ListConfig::default());
        view.set_content(Content::new().with(Section::new("a").with_content(person(1, "a"))))
            .unwrap();
        view.prepare_layout();

        let update = view
            .set_content(Content::new().with(
                Section::new("a").with(Item::new(person(1, "a")).with_sizing(Sizing::Fixed(80.0))),
            ))
            .unwrap();

        assert!(update.script.is_empty());
        assert_eq!(sink.len(), 1);
        assert!(view.prepare_layout());
        let content = view.collection_view_layout().layout().content();
        assert_eq!(content.sections[0].items[0].sizing, Sizing::Fixed(80.0));
    }

    #[test]
    fn invalid_properties_change_nothing() {
        let (mut view, sink, container) = view(ListConfig::default());
        view.set_content(people(&[("a", &[1])])).unwrap();

        let properties = ListProperties::new(
            ListConfig {
                debugging_identifier: Some("x".into()),
                ..ListConfig::default()
            },
            people(&[("a", &[1]), ("b", &[1])]),
        )
        .with_layout(LayoutDescription::grid(|_| {}));
        let err = view.set_properties(properties).unwrap_err();

        assert!(matches!(
            err,
            crate::ListError::Content(ContentError::DuplicateItem { .. })
        ));
        assert!(view.config().debugging_identifier.is_none());
        assert_eq!(
            view.collection_view_layout().layout_description().layout_type(),
            LayoutType::of::<TableLayout>()
        );
        assert_eq!(*container.installs.lock().unwrap(), 0);
        assert_eq!(view.content().item_count(), 1);
        assert_eq!(sink.len(), 1);
    }

    #[test]
    fn layout_hot_swap_and_replacement() {
        let (mut view, _, container) = view(ListConfig::default());
        view.prepare_layout();
        let id = view.collection_view_layout().id();

        let same = view
            .set_layout(TableLayout::describe(|_| {}), true, || {})
            .unwrap();
        assert_eq!(same, LayoutTransition::Unchanged);

        let rebuilt = view
            .set_layout(
                TableLayout::describe(|a: &mut TableAppearance| a.sticky_section_headers = false),
                true,
                || {},
            )
            .unwrap();
        assert_eq!(rebuilt, LayoutTransition::Rebuild);
        assert_eq!(view.collection_view_layout().id(), id);

        let replaced = view
            .set_layout(GridLayout::describe(|_| {}), true, || {})
            .unwrap();
        assert_eq!(replaced, LayoutTransition::Replaced);
        assert_ne!(view.collection_view_layout().id(), id);
        assert_eq!(*container.installs.lock().unwrap(), 1);
    }

    #[test]
    fn configure_switches_family() {
        let (mut view, sink, container) = view(ListConfig::default());
        view.configure(ListConfig {
            layout_family: LayoutFamily::Grid,
            animates_changes: false,
            ..ListConfig::default()
        })
        .unwrap();

        assert_eq!(
            view.collection_view_layout().layout().layout_type(),
            LayoutType::of::<GridLayout>()
        );
        assert_eq!(*container.installs.lock().unwrap(), 1);

        view.set_content(people(&[("a", &[1])])).unwrap();
        assert!(!sink.updates()[0].animated);
    }

    #[test]
    fn set_properties_applies_layout_then_content() {
        let (mut view, _, container) = view(ListConfig::default());
        let properties = ListProperties::new(
            ListConfig {
                auto_scroll_action: AutoScrollAction::ScrollToLastOnInsert { animated: true },
                ..ListConfig::default()
            },
            people(&[("a", &[1, 2])]),
        )
        .with_layout(LayoutDescription::grid(|_| {}));

        let update = view.set_properties(properties).unwrap();

        assert_eq!(update.scroll_to, Some(IndexPath::new(0, 1)));
        assert_eq!(
            view.collection_view_layout().layout_description().layout_type(),
            LayoutType::of::<GridLayout>()
        );
        assert_eq!(*container.installs.lock().unwrap(), 1);
        assert_eq!(view.content().item_count(), 2);
    }

    #[test]
    fn slice_presents_prefix_only() {
        let (mut view, sink, _) = view(ListConfig {
            presentation_slice_size: Some(2),
            ..ListConfig::default()
        });

        view.set_content(people(&[("a", &[1]), ("b", &[2, 3, 4])]))
            .unwrap();

        let state = view.presentation_state();
        assert!(!state.contains_all_items());
        assert_eq!(state.content().item_count(), 2);
        assert_eq!(view.content().item_count(), 4);
        assert_eq!(sink.updates()[0].inserted_items.len(), 2);
    }

    #[test]
    fn remove_item_updates_both_copies() {
        let (mut view, _, _) = view(ListConfig::default());
        view.set_content(people(&[("a", &[1, 2])])).unwrap();

        let removed = view.remove_item(IndexPath::new(0, 0)).unwrap();

        assert_eq!(removed.identifier(), Identifier::<Person>::new(1u32).erase());
        assert_eq!(view.content().item_count(), 1);
        assert_eq!(view.presentation_state().content().item_count(), 1);
        assert!(view.collection_view_layout().needs_rebuild());
    }

    #[test]
    fn dropping_view_detaches_sink() {
        let sink = Arc::new(RecordingSink::new());
        let view = ListView::new(
            sink.clone(),
            Arc::new(ImmediateContainer::default()),
            ListConfig::default(),
        );
        assert!(view.presentation_state().is_attached());
        drop(view);
        assert_eq!(Arc::strong_count(&sink), 1);
    }
}
