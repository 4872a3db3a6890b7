//! Sections and content trees.
//!
//! A [`Content`] is the snapshot produced by one declaration pass. It is
//! treated as immutable by the diff engine; the only in-place edits are the
//! structural helpers used by the presentation layer ([`Content::move_item`],
//! [`Content::remove_item`]).
//!
//! # Invariants
//!
//! - Section identifiers are unique within a content.
//! - Item identifiers are unique across the whole content, not just within
//!   a section, so that an item can move between sections and keep its
//!   identity. [`Content::validate`] checks both.

use std::collections::HashMap;
use std::sync::Arc;

use crate::error::{ContentError, ContentResult};
use crate::identifier::{AnyIdentifier, Identifier, IdentifierValue};
use crate::index_path::IndexPath;
use crate::item::{Item, ItemContent, ItemRef};

/// An identified, ordered run of items.
#[derive(Clone, Debug)]
pub struct Section {
    identifier: Identifier<Section>,
    pub items: Vec<ItemRef>,
}

impl Section {
    pub fn new(identifier: impl Into<IdentifierValue>) -> Self {
        Self {
            identifier: Identifier::new(identifier),
            items: Vec::new(),
        }
    }

    /// Build a section from an existing identifier and items.
    pub fn from_parts(identifier: Identifier<Section>, items: Vec<ItemRef>) -> Self {
        Self { identifier, items }
    }

    pub fn identifier(&self) -> &Identifier<Section> {
        &self.identifier
    }

    /// Append an item, builder style.
    pub fn with<C: ItemContent>(mut self, item: Item<C>) -> Self {
        self.push(item);
        self
    }

    /// Append a content value wrapped in a default [`Item`].
    pub fn with_content<C: ItemContent>(self, content: C) -> Self {
        self.with(Item::new(content))
    }

    pub fn push<C: ItemContent>(&mut self, item: Item<C>) {
        self.items.push(Arc::new(item));
    }

    pub fn push_ref(&mut self, item: ItemRef) {
        self.items.push(item);
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn item_identifiers(&self) -> Vec<AnyIdentifier> {
        self.items.iter().map(|item| item.identifier()).collect()
    }
}

/// The ordered sections of one render pass.
#[derive(Clone, Debug, Default)]
pub struct Content {
    pub sections: Vec<Section>,
}

impl Content {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_sections(sections: Vec<Section>) -> Self {
        Self { sections }
    }

    /// Append a section, builder style.
    pub fn with(mut self, section: Section) -> Self {
        self.sections.push(section);
        self
    }

    pub fn push(&mut self, section: Section) {
        self.sections.push(section);
    }

    pub fn section_count(&self) -> usize {
        self.sections.len()
    }

    pub fn item_count(&self) -> usize {
        self.sections.iter().map(Section::len).sum()
    }

    /// Returns `true` if there are no items (sections may still exist).
    pub fn is_empty(&self) -> bool {
        self.item_count() == 0
    }

    pub fn item(&self, path: IndexPath) -> Option<&ItemRef> {
        self.sections.get(path.section)?.items.get(path.item)
    }

    /// Locate an item by identifier anywhere in the content.
    pub fn index_path(&self, identifier: &AnyIdentifier) -> Option<IndexPath> {
        self.sections.iter().enumerate().find_map(|(s, section)| {
            section
                .items
                .iter()
                .position(|item| &item.identifier() == identifier)
                .map(|i| IndexPath::new(s, i))
        })
    }

    /// Section and item identifiers in order, for structural comparison.
    pub fn identifiers(&self) -> Vec<(Identifier<Section>, Vec<AnyIdentifier>)> {
        self.sections
            .iter()
            .map(|s| (s.identifier().clone(), s.item_identifiers()))
            .collect()
    }

    /// Returns `true` if both contents have the same sections and items, in
    /// the same order, with equal item content.
    pub fn is_equivalent(&self, other: &Content) -> bool {
        self.sections.len() == other.sections.len()
            && self.sections.iter().zip(&other.sections).all(|(a, b)| {
                a.identifier == b.identifier
                    && a.items.len() == b.items.len()
                    && a.items.iter().zip(&b.items).all(|(x, y)| {
                        x.identifier() == y.identifier() && x.is_equivalent(y.as_ref())
                    })
            })
    }

    /// Check identifier uniqueness for sections and (globally) for items.
    pub fn validate(&self) -> ContentResult<()> {
        let mut sections: HashMap<&Identifier<Section>, usize> = HashMap::new();
        let mut items: HashMap<AnyIdentifier, IndexPath> = HashMap::new();

        for (s, section) in self.sections.iter().enumerate() {
            if let Some(&first) = sections.get(&section.identifier) {
                return Err(ContentError::DuplicateSection {
                    identifier: section.identifier.erase(),
                    first,
                    second: s,
                });
            }
            sections.insert(&section.identifier, s);

            for (i, item) in section.items.iter().enumerate() {
                let path = IndexPath::new(s, i);
                if let Some(first) = items.insert(item.identifier(), path) {
                    return Err(ContentError::DuplicateItem {
                        identifier: item.identifier(),
                        first,
                        second: path,
                    });
                }
            }
        }
        Ok(())
    }

    /// Remove and return the item at `path`.
    pub fn remove_item(&mut self, path: IndexPath) -> ContentResult<ItemRef> {
        let count = self.sections.len();
        let section = self
            .sections
            .get_mut(path.section)
            .ok_or(ContentError::SectionOutOfBounds {
                index: path.section,
                count,
            })?;
        if path.item >= section.items.len() {
            return Err(ContentError::ItemOutOfBounds {
                path,
                count: section.items.len(),
            });
        }
        Ok(section.items.remove(path.item))
    }

    /// Move an item so that it ends up at `to`.
    ///
    /// `to` addresses the final position: within one section the item is
    /// removed first and then inserted at `to.item`. The content is left
    /// unchanged on error.
    pub fn move_item(&mut self, from: IndexPath, to: IndexPath) -> ContentResult<()> {
        check_move(self.sections.iter().map(Section::len), from, to)?;
        let item = self.remove_item(from)?;
        self.sections[to.section].items.insert(to.item, item);
        Ok(())
    }

    /// Drop sections that hold no items.
    pub fn remove_empty_sections(&mut self) {
        self.sections.retain(|s| !s.is_empty());
    }

    /// Cut the content down to every item up to and including `through`,
    /// plus `additional` further items.
    ///
    /// Used to present very long lists incrementally. Sections that would be
    /// left empty by the cut are dropped.
    pub fn slice_to(&self, through: IndexPath, additional: usize) -> ContentSlice {
        let mut remaining: Option<usize> = None;
        let mut sliced = Content::new();
        let mut contains_all_items = true;

        for (s, section) in self.sections.iter().enumerate() {
            let mut out = Section {
                identifier: section.identifier.clone(),
                items: Vec::new(),
            };
            for (i, item) in section.items.iter().enumerate() {
                if remaining == Some(0) {
                    contains_all_items = false;
                    break;
                }
                out.items.push(item.clone());
                match remaining.as_mut() {
                    Some(left) => *left -= 1,
                    None if IndexPath::new(s, i) >= through => remaining = Some(additional),
                    None => {}
                }
            }
            if !out.items.is_empty() || (section.items.is_empty() && remaining != Some(0)) {
                sliced.sections.push(out);
            }
            if !contains_all_items {
                break;
            }
        }

        ContentSlice {
            contains_all_items,
            content: sliced,
        }
    }
}

/// Validate a move against section lengths without mutating anything.
///
/// Shared with the presentation layer, which mirrors content in its own
/// structure but must enforce the same bounds.
pub fn check_move(
    lengths: impl Iterator<Item = usize>,
    from: IndexPath,
    to: IndexPath,
) -> ContentResult<()> {
    let lengths: Vec<usize> = lengths.collect();
    let count = lengths.len();
    let from_len = *lengths.get(from.section).ok_or(ContentError::SectionOutOfBounds {
        index: from.section,
        count,
    })?;
    if from.item >= from_len {
        return Err(ContentError::ItemOutOfBounds {
            path: from,
            count: from_len,
        });
    }
    let to_len = *lengths.get(to.section).ok_or(ContentError::SectionOutOfBounds {
        index: to.section,
        count,
    })?;
    // After removal the destination section is one shorter when it is the
    // source section; inserting at its end is allowed.
    let capacity = if to.section == from.section { to_len - 1 } else { to_len };
    if to.item > capacity {
        return Err(ContentError::ItemOutOfBounds {
            path: to,
            count: capacity,
        });
    }
    Ok(())
}

/// A possibly truncated view of a [`Content`].
#[derive(Clone, Debug, Default)]
pub struct ContentSlice {
    /// `false` when items were cut off the end.
    pub contains_all_items: bool,
    pub content: Content,
}

impl ContentSlice {
    /// A slice that holds the whole content.
    pub fn all(content: Content) -> Self {
        Self {
            contains_all_items: true,
            content,
        }
    }
}
