//! Type-erased layout descriptions.
//!
//! A [`LayoutDescription`] pairs a layout family with a closure that
//! customizes the family's appearance. The closure always starts from the
//! appearance type's `Default`, so running it again yields the appearance a
//! freshly built layout would get. Comparing that against a live layout
//! object is how [`should_rebuild`](AnyLayoutDescriptionConfiguration::should_rebuild)
//! decides whether the object is stale.

use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

use crate::appearance::{Appearance, Behavior};
use crate::error::{LayoutError, LayoutResult};
use crate::families::{GridLayout, TableLayout};
use crate::layout::{AnyListLayout, LayoutContent, LayoutDelegate, LayoutType, ListLayout};

/// Object-safe operations of a family-specific configuration.
pub trait AnyLayoutDescriptionConfiguration: fmt::Debug + Send + Sync {
    fn layout_type(&self) -> LayoutType;

    /// Builds a placeholder layout object from defaults only. The
    /// customization is not applied and there is no content.
    fn create_empty_layout(&self) -> Box<dyn AnyListLayout>;

    /// Builds a layout object populated from `delegate`.
    fn create_populated_layout(
        &self,
        appearance: &Appearance,
        behavior: &Behavior,
        delegate: &dyn LayoutDelegate,
    ) -> Box<dyn AnyListLayout>;

    /// Returns `true` if `layout` no longer reflects this configuration.
    ///
    /// Fails with [`LayoutError::TypeMismatch`] when `layout` belongs to a
    /// different family.
    fn should_rebuild(&self, layout: &dyn AnyListLayout) -> LayoutResult<bool>;

    fn is_same_layout_type(&self, other: &dyn AnyLayoutDescriptionConfiguration) -> bool {
        self.layout_type() == other.layout_type()
    }
}

/// Configuration for the layout family `L`.
pub struct Configuration<L: ListLayout> {
    configure: Arc<dyn Fn(&mut L::LayoutAppearance) + Send + Sync>,
    _layout: PhantomData<fn() -> L>,
}

impl<L: ListLayout> Configuration<L> {
    pub fn new<F>(configure: F) -> Self
    where
        F: Fn(&mut L::LayoutAppearance) + Send + Sync + 'static,
    {
        Self {
            configure: Arc::new(configure),
            _layout: PhantomData,
        }
    }

    /// The appearance produced by running the closure on a default value.
    pub fn layout_appearance(&self) -> L::LayoutAppearance {
        let mut appearance = L::LayoutAppearance::default();
        (self.configure)(&mut appearance);
        appearance
    }
}

impl<L: ListLayout> Clone for Configuration<L> {
    fn clone(&self) -> Self {
        Self {
            configure: Arc::clone(&self.configure),
            _layout: PhantomData,
        }
    }
}

impl<L: ListLayout> fmt::Debug for Configuration<L> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Configuration")
            .field("layout", &LayoutType::of::<L>().name())
            .field("layout_appearance", &self.layout_appearance())
            .finish()
    }
}

impl<L: ListLayout> AnyLayoutDescriptionConfiguration for Configuration<L> {
    fn layout_type(&self) -> LayoutType {
        LayoutType::of::<L>()
    }

    fn create_empty_layout(&self) -> Box<dyn AnyListLayout> {
        Box::new(L::new(
            L::LayoutAppearance::default(),
            Appearance::default(),
            Behavior::default(),
            LayoutContent::default(),
        ))
    }

    fn create_populated_layout(
        &self,
        appearance: &Appearance,
        behavior: &Behavior,
        delegate: &dyn LayoutDelegate,
    ) -> Box<dyn AnyListLayout> {
        let content = delegate.list_layout_content(&L::defaults());
        Box::new(L::new(
            self.layout_appearance(),
            appearance.clone(),
            behavior.clone(),
            content,
        ))
    }

    fn should_rebuild(&self, layout: &dyn AnyListLayout) -> LayoutResult<bool> {
        let layout = layout.as_any().downcast_ref::<L>().ok_or_else(|| {
            LayoutError::TypeMismatch {
                expected: LayoutType::of::<L>().name(),
                actual: layout.layout_type().name(),
            }
        })?;
        Ok(*layout.layout_appearance() != self.layout_appearance())
    }
}

/// A layout family plus its customization, independent of the family type.
#[derive(Clone, Debug)]
pub struct LayoutDescription {
    configuration: Arc<dyn AnyLayoutDescriptionConfiguration>,
}

impl LayoutDescription {
    pub fn new<L, F>(configure: F) -> Self
    where
        L: ListLayout,
        F: Fn(&mut L::LayoutAppearance) + Send + Sync + 'static,
    {
        Self {
            configuration: Arc::new(Configuration::<L>::new(configure)),
        }
    }

    /// A table layout with the given customization.
    pub fn table<F>(configure: F) -> Self
    where
        F: Fn(&mut <TableLayout as ListLayout>::LayoutAppearance) + Send + Sync + 'static,
    {
        Self::new::<TableLayout, F>(configure)
    }

    /// A grid layout with the given customization.
    pub fn grid<F>(configure: F) -> Self
    where
        F: Fn(&mut <GridLayout as ListLayout>::LayoutAppearance) + Send + Sync + 'static,
    {
        Self::new::<GridLayout, F>(configure)
    }

    pub fn configuration(&self) -> &dyn AnyLayoutDescriptionConfiguration {
        self.configuration.as_ref()
    }

    pub fn layout_type(&self) -> LayoutType {
        self.configuration.layout_type()
    }
}

impl Default for LayoutDescription {
    fn default() -> Self {
        Self::table(|_| {})
    }
}
