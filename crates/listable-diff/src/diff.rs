//! Identity-keyed diff between two content trees.
//!
//! Works in two levels. Sections are matched by identifier; items are
//! matched by identifier across the whole tree, so an item that reappears
//! under another section is a single move rather than a remove + insert.
//!
//! An element counts as moved when it changed section, or when it is not
//! part of the longest common subsequence of the survivors that stayed in
//! its section. Survivors inside that subsequence keep their relative order
//! and are repositioned implicitly by the surrounding inserts and removals.

use std::collections::{HashMap, HashSet};
use std::hash::Hash;

use similar::{capture_diff_slices, Algorithm, DiffOp};
use tracing::debug;

use listable_types::{AnyIdentifier, Content, Identifier, IndexPath, ItemRef, Section};

use crate::edit_script::{
    EditScript, ItemChanges, ItemInsertion, ItemMove, ItemRemoval, ItemUpdate, SectionChanges,
    SectionInsertion, SectionMove, SectionRemoval,
};
use crate::error::DiffResult;

/// Compute the edit script that transforms `old` into `new`.
///
/// Both trees are validated first; duplicate section or item identifiers
/// are rejected with [`DiffError::Content`](crate::DiffError::Content).
/// The result is deterministic for identical inputs, and empty when the
/// trees are equivalent.
pub fn diff(old: &Content, new: &Content) -> DiffResult<EditScript> {
    old.validate()?;
    new.validate()?;

    let script = EditScript {
        sections: diff_sections(old, new),
        items: diff_items(old, new),
    };

    let summary = script.summary();
    debug!(
        old_sections = old.section_count(),
        new_sections = new.section_count(),
        ?summary,
        "content diff complete"
    );
    Ok(script)
}

fn section_indexes(content: &Content) -> HashMap<&Identifier<Section>, usize> {
    content
        .sections
        .iter()
        .enumerate()
        .map(|(i, s)| (s.identifier(), i))
        .collect()
}

fn diff_sections(old: &Content, new: &Content) -> SectionChanges {
    let old_index = section_indexes(old);
    let new_index = section_indexes(new);
    let mut changes = SectionChanges::default();

    for (i, section) in old.sections.iter().enumerate() {
        if !new_index.contains_key(section.identifier()) {
            changes.removed.push(SectionRemoval {
                identifier: section.identifier().clone(),
                old_index: i,
            });
        }
    }

    let old_survivors: Vec<&Identifier<Section>> = old
        .sections
        .iter()
        .map(Section::identifier)
        .filter(|id| new_index.contains_key(id))
        .collect();
    let new_survivors: Vec<&Identifier<Section>> = new
        .sections
        .iter()
        .map(Section::identifier)
        .filter(|id| old_index.contains_key(id))
        .collect();
    let stable = stable_subsequence(&old_survivors, &new_survivors);

    for (j, section) in new.sections.iter().enumerate() {
        let identifier = section.identifier();
        match old_index.get(identifier) {
            None => changes.inserted.push(SectionInsertion {
                identifier: identifier.clone(),
                new_index: j,
            }),
            Some(&i) if !stable.contains(&identifier) => changes.moved.push(SectionMove {
                identifier: identifier.clone(),
                old_index: i,
                new_index: j,
            }),
            Some(_) => {}
        }
    }

    changes
}

struct Located<'a> {
    path: IndexPath,
    item: &'a ItemRef,
}

fn locate(content: &Content) -> HashMap<AnyIdentifier, Located<'_>> {
    let mut located = HashMap::with_capacity(content.item_count());
    for (s, section) in content.sections.iter().enumerate() {
        for (i, item) in section.items.iter().enumerate() {
            located.insert(
                item.identifier(),
                Located {
                    path: IndexPath::new(s, i),
                    item,
                },
            );
        }
    }
    located
}

fn diff_items(old: &Content, new: &Content) -> ItemChanges {
    let old_items = locate(old);
    let new_items = locate(new);
    let old_sections = section_indexes(old);
    let mut changes = ItemChanges::default();

    for (s, section) in old.sections.iter().enumerate() {
        for (i, item) in section.items.iter().enumerate() {
            let identifier = item.identifier();
            if !new_items.contains_key(&identifier) {
                changes.removed.push(ItemRemoval {
                    identifier,
                    old: IndexPath::new(s, i),
                });
            }
        }
    }

    for (j, section) in new.sections.iter().enumerate() {
        let stable = match old_sections.get(section.identifier()) {
            Some(&lineage) => {
                let old_seq: Vec<AnyIdentifier> = old.sections[lineage]
                    .item_identifiers()
                    .into_iter()
                    .filter(|id| new_items.get(id).is_some_and(|n| n.path.section == j))
                    .collect();
                let new_seq: Vec<AnyIdentifier> = section
                    .item_identifiers()
                    .into_iter()
                    .filter(|id| old_items.get(id).is_some_and(|o| o.path.section == lineage))
                    .collect();
                stable_subsequence(&old_seq, &new_seq)
            }
            None => HashSet::new(),
        };

        for (i, item) in section.items.iter().enumerate() {
            let identifier = item.identifier();
            let new_path = IndexPath::new(j, i);

            let Some(previous) = old_items.get(&identifier) else {
                changes.inserted.push(ItemInsertion {
                    identifier,
                    new: new_path,
                    item: item.clone(),
                });
                continue;
            };

            if !stable.contains(&identifier) {
                changes.moved.push(ItemMove {
                    identifier: identifier.clone(),
                    old: previous.path,
                    new: new_path,
                });
            }
            if !previous.item.is_equivalent(item.as_ref()) {
                changes.updated.push(ItemUpdate {
                    identifier,
                    old: previous.path,
                    new: new_path,
                    item: item.clone(),
                });
            }
        }
    }

    changes
}

/// Keys of `old` that belong to a longest common subsequence with `new`.
///
/// Both slices hold the same set of keys in (possibly) different orders.
/// Keys are diffed by their position in `old`, so they need no ordering of
/// their own.
fn stable_subsequence<K: Hash + Eq + Clone>(old: &[K], new: &[K]) -> HashSet<K> {
    if old == new {
        return old.iter().cloned().collect();
    }

    let positions: HashMap<&K, usize> = old.iter().enumerate().map(|(i, k)| (k, i)).collect();
    let old_order: Vec<usize> = (0..old.len()).collect();
    let new_order: Vec<usize> = new.iter().filter_map(|k| positions.get(k).copied()).collect();

    let mut stable = HashSet::new();
    for op in capture_diff_slices(Algorithm::Myers, &old_order, &new_order) {
        if let DiffOp::Equal { old_index, len, .. } = op {
            stable.extend(old[old_index..old_index + len].iter().cloned());
        }
    }
    stable
}
