//! Replaying an [`EditScript`] onto old content.
//!
//! [`apply_sections`] is generic over the item type so the presentation
//! layer can replay a script onto its own live mirror, moving the existing
//! per-item state objects instead of recreating them. [`apply`] is the same
//! operation over plain [`Content`], used to check that a script reproduces
//! the new tree.
//!
//! Replay order: build the new section layout, place inserted and moved
//! elements at their new indexes, fill the remaining slots with unmoved
//! survivors in old order, then apply updates in place.

use std::collections::HashSet;

use listable_types::{AnyIdentifier, Content, Identifier, IndexPath, ItemRef, Section};

use crate::edit_script::{EditScript, ItemInsertion, ItemUpdate};
use crate::error::{DiffError, DiffResult};

/// An element that an edit script can be replayed onto.
pub trait ScriptItem: Clone {
    /// Identifier used to check that the script addresses the right element.
    fn script_identifier(&self) -> AnyIdentifier;

    /// Create the element for an insertion.
    fn inserted(insertion: &ItemInsertion) -> Self;

    /// Apply a content update in place.
    fn updated(&mut self, update: &ItemUpdate);
}

impl ScriptItem for ItemRef {
    fn script_identifier(&self) -> AnyIdentifier {
        self.identifier()
    }

    fn inserted(insertion: &ItemInsertion) -> Self {
        insertion.item.clone()
    }

    fn updated(&mut self, update: &ItemUpdate) {
        *self = update.item.clone();
    }
}

/// A section of script-addressable elements.
#[derive(Clone, Debug)]
pub struct ScriptSection<I> {
    pub identifier: Identifier<Section>,
    pub items: Vec<I>,
}

/// Apply `script` to `old`, producing the new content.
pub fn apply(script: &EditScript, old: &Content) -> DiffResult<Content> {
    let sections: Vec<ScriptSection<ItemRef>> = old
        .sections
        .iter()
        .map(|s| ScriptSection {
            identifier: s.identifier().clone(),
            items: s.items.clone(),
        })
        .collect();

    let applied = apply_sections(script, &sections)?;
    Ok(Content::with_sections(
        applied
            .into_iter()
            .map(|s| Section::from_parts(s.identifier, s.items))
            .collect(),
    ))
}

struct SectionSlot {
    identifier: Identifier<Section>,
    lineage: Option<usize>,
}

fn mismatch(message: impl Into<String>) -> DiffError {
    DiffError::ScriptMismatch(message.into())
}

fn place<T>(slots: &mut [Option<T>], index: usize, value: T, what: &str) -> DiffResult<()> {
    let len = slots.len();
    match slots.get_mut(index) {
        Some(slot @ None) => {
            *slot = Some(value);
            Ok(())
        }
        Some(Some(_)) => Err(mismatch(format!("{what} targets occupied index {index}"))),
        None => Err(mismatch(format!("{what} index {index} out of range (len {len})"))),
    }
}

fn item_at<'a, I: ScriptItem>(
    sections: &'a [ScriptSection<I>],
    path: IndexPath,
    identifier: &AnyIdentifier,
) -> DiffResult<&'a I> {
    let item = sections
        .get(path.section)
        .and_then(|s| s.items.get(path.item))
        .ok_or_else(|| mismatch(format!("no item at {path}")))?;
    if &item.script_identifier() != identifier {
        return Err(mismatch(format!(
            "item at {path} is {}, script expected {identifier}",
            item.script_identifier()
        )));
    }
    Ok(item)
}

/// Apply `script` to any mirror of the old content.
///
/// The input is left untouched; on error nothing is returned, so callers can
/// keep their previous state.
pub fn apply_sections<I: ScriptItem>(
    script: &EditScript,
    old: &[ScriptSection<I>],
) -> DiffResult<Vec<ScriptSection<I>>> {
    let layout = section_layout(script, old)?;
    let changes = &script.items;

    let mut vacated: HashSet<IndexPath> = HashSet::new();
    for removal in &changes.removed {
        item_at(old, removal.old, &removal.identifier)?;
        vacated.insert(removal.old);
    }
    for mv in &changes.moved {
        item_at(old, mv.old, &mv.identifier)?;
        if !vacated.insert(mv.old) {
            return Err(mismatch(format!("item at {} both removed and moved", mv.old)));
        }
    }

    // Unmoved survivors, grouped by the old section they stay in.
    let survivors_of = |s: usize| -> Vec<I> {
        old[s]
            .items
            .iter()
            .enumerate()
            .filter(|(i, _)| !vacated.contains(&IndexPath::new(s, *i)))
            .map(|(_, item)| item.clone())
            .collect()
    };

    let kept: HashSet<usize> = layout.iter().filter_map(|slot| slot.lineage).collect();
    for s in (0..old.len()).filter(|s| !kept.contains(s)) {
        if !survivors_of(s).is_empty() {
            return Err(mismatch(format!(
                "removed section {} still holds items",
                old[s].identifier
            )));
        }
    }

    let mut survivors: Vec<std::vec::IntoIter<I>> = layout
        .iter()
        .map(|slot| slot.lineage.map(survivors_of).unwrap_or_default().into_iter())
        .collect();

    let mut targeted = vec![0usize; layout.len()];
    let targets = changes
        .inserted
        .iter()
        .map(|i| i.new)
        .chain(changes.moved.iter().map(|m| m.new));
    for path in targets {
        *targeted
            .get_mut(path.section)
            .ok_or_else(|| mismatch(format!("target {path} names a missing section")))? += 1;
    }

    let mut slots: Vec<Vec<Option<I>>> = survivors
        .iter()
        .zip(&targeted)
        .map(|(kept, extra)| vec![None; kept.len() + extra])
        .collect();

    for insertion in &changes.inserted {
        place(
            &mut slots[insertion.new.section],
            insertion.new.item,
            I::inserted(insertion),
            "item insertion",
        )?;
    }
    for mv in &changes.moved {
        let item = item_at(old, mv.old, &mv.identifier)?.clone();
        place(&mut slots[mv.new.section], mv.new.item, item, "item move")?;
    }

    let mut result = Vec::with_capacity(layout.len());
    for ((slot, section_slots), kept) in layout.into_iter().zip(slots).zip(survivors.iter_mut()) {
        let mut items = Vec::with_capacity(section_slots.len());
        for entry in section_slots {
            match entry {
                Some(item) => items.push(item),
                None => items.push(
                    kept.next()
                        .ok_or_else(|| mismatch(format!("section {} underfilled", slot.identifier)))?,
                ),
            }
        }
        if kept.next().is_some() {
            return Err(mismatch(format!("section {} overfilled", slot.identifier)));
        }
        result.push(ScriptSection {
            identifier: slot.identifier,
            items,
        });
    }

    for update in &changes.updated {
        let item = result
            .get_mut(update.new.section)
            .and_then(|s| s.items.get_mut(update.new.item))
            .ok_or_else(|| mismatch(format!("update targets missing item {}", update.new)))?;
        if item.script_identifier() != update.identifier {
            return Err(mismatch(format!(
                "update at {} expected {}",
                update.new, update.identifier
            )));
        }
        item.updated(update);
    }

    Ok(result)
}

fn section_layout<I: ScriptItem>(
    script: &EditScript,
    old: &[ScriptSection<I>],
) -> DiffResult<Vec<SectionSlot>> {
    let changes = &script.sections;
    let mut vacated: HashSet<usize> = HashSet::new();

    let check = |index: usize, identifier: &Identifier<Section>| -> DiffResult<()> {
        match old.get(index) {
            Some(s) if &s.identifier == identifier => Ok(()),
            Some(s) => Err(mismatch(format!(
                "section {index} is {}, script expected {identifier}",
                s.identifier
            ))),
            None => Err(mismatch(format!("no section at {index}"))),
        }
    };

    for removal in &changes.removed {
        check(removal.old_index, &removal.identifier)?;
        vacated.insert(removal.old_index);
    }
    for mv in &changes.moved {
        check(mv.old_index, &mv.identifier)?;
        if !vacated.insert(mv.old_index) {
            return Err(mismatch(format!(
                "section {} both removed and moved",
                mv.old_index
            )));
        }
    }

    let len = (old.len() + changes.inserted.len())
        .checked_sub(changes.removed.len())
        .ok_or_else(|| mismatch("more section removals than sections"))?;

    let mut slots: Vec<Option<SectionSlot>> = (0..len).map(|_| None).collect();
    for insertion in &changes.inserted {
        let slot = SectionSlot {
            identifier: insertion.identifier.clone(),
            lineage: None,
        };
        place(&mut slots, insertion.new_index, slot, "section insertion")?;
    }
    for mv in &changes.moved {
        let slot = SectionSlot {
            identifier: mv.identifier.clone(),
            lineage: Some(mv.old_index),
        };
        place(&mut slots, mv.new_index, slot, "section move")?;
    }

    let mut staying = old
        .iter()
        .enumerate()
        .filter(|(i, _)| !vacated.contains(i));
    let mut layout = Vec::with_capacity(len);
    for slot in slots {
        let slot = match slot {
            Some(slot) => slot,
            None => {
                let (i, s) = staying
                    .next()
                    .ok_or_else(|| mismatch("section layout underfilled"))?;
                SectionSlot {
                    identifier: s.identifier.clone(),
                    lineage: Some(i),
                }
            }
        };
        layout.push(slot);
    }
    if staying.next().is_some() {
        return Err(mismatch("section layout overfilled"));
    }

    Ok(layout)
}
