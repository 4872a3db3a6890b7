//! Content sources and their per-pass state.
//!
//! A [`ListSource`] builds [`Content`] from some state value. The
//! [`SourcePresenter`] owns that value inside a [`SourceState`] and hands a
//! fresh `SourceState` to every render pass, discarding the previous one, so
//! a change callback captured during an old pass can never fire after a new
//! pass has started.

use std::fmt;
use std::sync::Arc;

use tracing::debug;

use listable_types::Content;

/// Callback fired when source state changes value.
pub type DidChange = Arc<dyn Fn() + Send + Sync>;

/// A state value that reports changes to its owner.
pub struct SourceState<V> {
    value: V,
    did_change: Option<DidChange>,
}

impl<V: fmt::Debug> fmt::Debug for SourceState<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SourceState")
            .field("value", &self.value)
            .field("connected", &self.did_change.is_some())
            .finish()
    }
}

impl<V: Clone + PartialEq> SourceState<V> {
    pub fn new(initial: V) -> Self {
        Self {
            value: initial,
            did_change: None,
        }
    }

    pub fn value(&self) -> &V {
        &self.value
    }

    /// Replace the value. The change callback fires only if it differs.
    pub fn set(&mut self, value: V) {
        if value == self.value {
            return;
        }
        self.value = value;
        if let Some(did_change) = &self.did_change {
            did_change();
        }
    }

    /// Edit a copy of the value and store it back.
    pub fn update(&mut self, edit: impl FnOnce(&mut V)) {
        let mut new = self.value.clone();
        edit(&mut new);
        self.set(new);
    }

    pub fn set_did_change(&mut self, did_change: Option<DidChange>) {
        self.did_change = did_change;
    }

    pub fn is_connected(&self) -> bool {
        self.did_change.is_some()
    }

    /// Sever the change callback; later `set` calls are silent.
    pub fn discard(&mut self) {
        self.did_change = None;
    }
}

/// Builds list content from a state value.
pub trait ListSource {
    type State: Clone + PartialEq;

    fn content(&self, state: &SourceState<Self::State>) -> Content;
}

/// A source that always returns the same content.
#[derive(Clone, Debug, Default)]
pub struct StaticSource {
    content: Content,
}

impl StaticSource {
    pub fn new(content: Content) -> Self {
        Self { content }
    }
}

impl ListSource for StaticSource {
    type State = ();

    fn content(&self, _state: &SourceState<()>) -> Content {
        self.content.clone()
    }
}

/// A source backed by a builder closure.
pub struct DynamicSource<V, F> {
    builder: F,
    _state: std::marker::PhantomData<fn(&V)>,
}

impl<V, F> DynamicSource<V, F>
where
    V: Clone + PartialEq,
    F: Fn(&SourceState<V>, &mut Content),
{
    pub fn new(builder: F) -> Self {
        Self {
            builder,
            _state: std::marker::PhantomData,
        }
    }
}

impl<V, F> ListSource for DynamicSource<V, F>
where
    V: Clone + PartialEq,
    F: Fn(&SourceState<V>, &mut Content),
{
    type State = V;

    fn content(&self, state: &SourceState<V>) -> Content {
        let mut content = Content::new();
        (self.builder)(state, &mut content);
        content
    }
}

/// Owns a source and the state it renders from.
pub struct SourcePresenter<S: ListSource> {
    source: S,
    state: SourceState<S::State>,
    did_change: Option<DidChange>,
    passes: u64,
}

impl<S: ListSource> SourcePresenter<S> {
    pub fn new(initial: S::State, source: S, did_change: Option<DidChange>) -> Self {
        let mut state = SourceState::new(initial);
        state.set_did_change(did_change.clone());
        Self {
            source,
            state,
            did_change,
            passes: 0,
        }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn state(&self) -> &S::State {
        self.state.value()
    }

    pub fn set_state(&mut self, value: S::State) {
        self.state.set(value);
    }

    pub fn update_state(&mut self, edit: impl FnOnce(&mut S::State)) {
        self.state.update(edit);
    }

    /// Stop reporting changes for good.
    pub fn discard(&mut self) {
        self.did_change = None;
        self.state.discard();
    }

    /// Build content for a new render pass.
    ///
    /// The previous state object is discarded and replaced with a fresh one
    /// carrying the same value, so changes do not leak between passes.
    pub fn reload_content(&mut self) -> Content {
        self.state.discard();

        let mut fresh = SourceState::new(self.state.value().clone());
        fresh.set_did_change(self.did_change.clone());
        self.state = fresh;
        self.passes += 1;

        debug!(pass = self.passes, "reloading source content");
        self.source.content(&self.state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use listable_types::{Identifier, ItemContent, Section};
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Clone, Debug, PartialEq)]
    struct Row(u32);

    impl ItemContent for Row {
        fn identifier(&self) -> Identifier<Self> {
            Identifier::new(self.0)
        }
    }

    fn counter() -> (Arc<AtomicUsize>, DidChange) {
        let count = Arc::new(AtomicUsize::new(0));
        let seen = count.clone();
        let hook: DidChange = Arc::new(move || {
            seen.fetch_add(1, Ordering::SeqCst);
        });
        (count, hook)
    }

    #[test]
    fn state_fires_only_on_inequality() {
        let (count, hook) = counter();
        let mut state = SourceState::new(1);
        state.set_did_change(Some(hook));

        state.set(1);
        assert_eq!(count.load(Ordering::SeqCst), 0);
        state.set(2);
        assert_eq!(count.load(Ordering::SeqCst), 1);
        state.update(|v| *v += 1);
        assert_eq!(*state.value(), 3);
        assert_eq!(count.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn discarded_state_is_silent() {
        let (count, hook) = counter();
        let mut state = SourceState::new("a");
        state.set_did_change(Some(hook));
        state.discard();
        state.set("b");
        assert_eq!(count.load(Ordering::SeqCst), 0);
        assert!(!state.is_connected());
    }

    #[test]
    fn dynamic_source_builds_from_state() {
        let source = DynamicSource::new(|state: &SourceState<u32>, content: &mut Content| {
            let mut section = Section::new("rows");
            for i in 0..*state.value() {
                section.push(listable_types::Item::new(Row(i)));
            }
            content.push(section);
        });
        let mut presenter = SourcePresenter::new(3, source, None);
        assert_eq!(presenter.reload_content().item_count(), 3);

        presenter.set_state(5);
        assert_eq!(presenter.reload_content().item_count(), 5);
    }

    #[test]
    fn reload_keeps_value_and_callback() {
        let (count, hook) = counter();
        let source = DynamicSource::new(|_: &SourceState<u32>, _: &mut Content| {});
        let mut presenter = SourcePresenter::new(0u32, source, Some(hook));

        presenter.reload_content();
        presenter.set_state(4);
        assert_eq!(count.load(Ordering::SeqCst), 1);

        presenter.reload_content();
        assert_eq!(*presenter.state(), 4);
        presenter.update_state(|v| *v = 5);
        assert_eq!(count.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn discarded_presenter_stops_reporting() {
        let (count, hook) = counter();
        let mut presenter = SourcePresenter::new((), StaticSource::default(), Some(hook));
        presenter.discard();
        presenter.reload_content();
        presenter.set_state(());
        assert_eq!(count.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn static_source_returns_its_content() {
        let content = Content::new().with(Section::new("s").with_content(Row(1)));
        let mut presenter = SourcePresenter::new((), StaticSource::new(content), None);
        assert_eq!(presenter.reload_content().item_count(), 1);
        assert_eq!(presenter.source().content(&SourceState::new(())).item_count(), 1);
    }
}
