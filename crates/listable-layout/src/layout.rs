//! Layout families and the content they lay out.
//!
//! A layout family is a type implementing [`ListLayout`]. Each family has its
//! own appearance type; the list-wide [`Appearance`] and [`Behavior`] are
//! shared by every family. Families are used through the object-safe
//! [`AnyListLayout`] so the rest of the system never names a concrete one.

use std::any::{Any, TypeId};
use std::fmt;
use std::hash::{Hash, Hasher};

use listable_types::{AnyIdentifier, Content, Identifier, Section, Sizing};

use crate::appearance::{Appearance, Behavior};
use crate::description::LayoutDescription;

/// Tag naming a layout family, used to decide whether two descriptions
/// build interchangeable layout objects.
#[derive(Clone, Copy)]
pub struct LayoutType {
    id: TypeId,
    name: &'static str,
}

impl LayoutType {
    pub fn of<L: 'static>() -> Self {
        Self {
            id: TypeId::of::<L>(),
            name: std::any::type_name::<L>(),
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }
}

impl PartialEq for LayoutType {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for LayoutType {}

impl Hash for LayoutType {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Debug for LayoutType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("LayoutType").field(&self.name).finish()
    }
}

/// Defaults a family applies to items that do not size themselves.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LayoutDefaults {
    pub item_sizing: Sizing,
}

/// One item as seen by a layout.
#[derive(Clone, Debug, PartialEq)]
pub struct LayoutItem {
    pub identifier: AnyIdentifier,
    pub sizing: Sizing,
}

#[derive(Clone, Debug, PartialEq)]
pub struct LayoutSection {
    pub identifier: Identifier<Section>,
    pub items: Vec<LayoutItem>,
}

/// The structure a layout object is populated with.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct LayoutContent {
    pub sections: Vec<LayoutSection>,
}

impl LayoutContent {
    /// Snapshots `content`, resolving [`Sizing::Default`] against `defaults`.
    pub fn new(content: &Content, defaults: &LayoutDefaults) -> Self {
        let sections = content
            .sections
            .iter()
            .map(|section| LayoutSection {
                identifier: section.identifier().clone(),
                items: section
                    .items
                    .iter()
                    .map(|item| LayoutItem {
                        identifier: item.identifier(),
                        sizing: match item.sizing() {
                            Sizing::Default => defaults.item_sizing,
                            sizing => sizing,
                        },
                    })
                    .collect(),
            })
            .collect();
        Self { sections }
    }

    pub fn item_count(&self) -> usize {
        self.sections.iter().map(|s| s.items.len()).sum()
    }
}

/// Supplies content to layout objects when they are populated.
pub trait LayoutDelegate: Send + Sync {
    fn list_layout_content(&self, defaults: &LayoutDefaults) -> LayoutContent;
}

/// Object-safe view of a layout object of any family.
pub trait AnyListLayout: fmt::Debug + Send + Sync {
    fn layout_type(&self) -> LayoutType;

    fn appearance(&self) -> &Appearance;

    fn behavior(&self) -> &Behavior;

    /// The content the layout was populated with. Empty for layouts built
    /// without a delegate.
    fn content(&self) -> &LayoutContent;

    fn as_any(&self) -> &dyn Any;
}

/// A layout family.
pub trait ListLayout: AnyListLayout + Sized + 'static {
    /// The family-specific appearance. Its `Default` is the starting point
    /// every customization closure is applied to.
    type LayoutAppearance: Clone + PartialEq + fmt::Debug + Default + Send + Sync + 'static;

    fn defaults() -> LayoutDefaults;

    fn new(
        layout_appearance: Self::LayoutAppearance,
        appearance: Appearance,
        behavior: Behavior,
        content: LayoutContent,
    ) -> Self;

    fn layout_appearance(&self) -> &Self::LayoutAppearance;

    /// Describes this family with a customization closure.
    fn describe<F>(configure: F) -> LayoutDescription
    where
        F: Fn(&mut Self::LayoutAppearance) + Send + Sync + 'static,
    {
        LayoutDescription::new::<Self, F>(configure)
    }
}
