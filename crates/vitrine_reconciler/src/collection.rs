//! In-memory ordered sequence.
//!
//! Pure data structure; locking and persistence live in the reconciler.

use crate::{Entry, SyncState};
use serde::{Deserialize, Serialize};
use vitrine_core::{Item, ItemId, ItemPatch, SortOrder};
use vitrine_error::{ValidationError, ValidationErrorKind, VitrineResult};

/// A pending `order_index` overwrite for one item.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PositionWrite {
    /// Item to reposition
    pub id: ItemId,
    /// Index to store
    pub order_index: i64,
}

/// Ordered items for one site.
#[derive(Debug, Clone, Default)]
pub struct Collection {
    entries: Vec<Entry>,
    last_sequence: u64,
}

impl Collection {
    /// Sequence built from store rows, stably sorted by `order_index`.
    pub fn from_items(mut items: Vec<Item>) -> Self {
        SortOrder::Ascending.sort(&mut items);
        Self {
            entries: items.into_iter().map(Entry::settled).collect(),
            last_sequence: 0,
        }
    }

    /// Replace the contents with fresh store rows.
    ///
    /// The batch counter keeps running so late results from earlier batches
    /// cannot touch the new entries.
    pub fn replace(&mut self, items: Vec<Item>) {
        let last_sequence = self.last_sequence;
        *self = Self::from_items(items);
        self.last_sequence = last_sequence;
    }

    /// Number of items.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the sequence is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in display order.
    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    /// Items in display order.
    pub fn items(&self) -> Vec<Item> {
        self.entries.iter().map(|e| e.item.clone()).collect()
    }

    /// Position of an item in the sequence.
    pub fn position(&self, id: &ItemId) -> Option<usize> {
        self.entries.iter().position(|e| &e.item.id == id)
    }

    /// Check whether any position write has failed since the last load.
    pub fn is_stale(&self) -> bool {
        self.entries.iter().any(|e| e.state.is_failed())
    }

    /// Move the item at `from` to `to` and renumber every position.
    ///
    /// Returns the writes needed to persist the new order: items whose index
    /// changed, items whose previous write failed, or every item when
    /// `include_unchanged` is set.
    pub fn move_item(
        &mut self,
        from: usize,
        to: usize,
        include_unchanged: bool,
    ) -> VitrineResult<Vec<PositionWrite>> {
        let len = self.entries.len();
        for index in [from, to] {
            if index >= len {
                return Err(
                    ValidationError::new(ValidationErrorKind::IndexOutOfRange { index, len })
                        .into(),
                );
            }
        }

        let moved = self.entries.remove(from);
        self.entries.insert(to, moved);

        let mut writes = Vec::new();
        for (position, entry) in self.entries.iter_mut().enumerate() {
            let position = position as i64;
            let changed = entry.item.order_index != position;
            entry.item.order_index = position;
            if changed || include_unchanged || entry.state.is_failed() {
                writes.push(PositionWrite {
                    id: entry.item.id.clone(),
                    order_index: position,
                });
            }
        }
        Ok(writes)
    }

    /// Allocate the next batch number and mark its items pending.
    pub fn mark_pending(&mut self, writes: &[PositionWrite]) -> u64 {
        self.last_sequence += 1;
        let sequence = self.last_sequence;
        for write in writes {
            if let Some(entry) = self.entries.iter_mut().find(|e| e.item.id == write.id) {
                entry.state = SyncState::Pending;
                entry.sequence = sequence;
            }
        }
        sequence
    }

    /// Record the result of one write from batch `sequence`.
    ///
    /// Ignored when a newer batch has since claimed the item or the item is gone.
    pub fn settle(&mut self, id: &ItemId, sequence: u64, state: SyncState) {
        if let Some(entry) = self.entries.iter_mut().find(|e| &e.item.id == id) {
            if entry.sequence == sequence {
                entry.state = state;
            }
        }
    }

    /// Append an item at the end.
    pub fn push(&mut self, item: Item) {
        self.entries.push(Entry::settled(item));
    }

    /// Remove an item, keeping everyone else's relative order.
    pub fn remove(&mut self, id: &ItemId) -> Option<Item> {
        let position = self.position(id)?;
        Some(self.entries.remove(position).item)
    }

    /// Mirror a patch onto the in-memory copy; false if the id is unknown.
    ///
    /// A patch that sets `order_index` re-sorts the sequence (stably).
    pub fn apply_patch(&mut self, id: &ItemId, patch: &ItemPatch) -> bool {
        let Some(entry) = self.entries.iter_mut().find(|e| &e.item.id == id) else {
            return false;
        };
        patch.apply_to(&mut entry.item);
        if patch.order_index.is_some() {
            self.entries.sort_by_key(|e| e.item.order_index);
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vitrine_core::{ItemDraft, NewItem};

    fn item(id: &str, order_index: i64) -> Item {
        let draft = ItemDraft::builder().title(id).build().unwrap();
        NewItem::from_draft("stavrin", draft, order_index, 0).into_item(ItemId::new(id))
    }

    fn collection(ids: &[&str]) -> Collection {
        Collection::from_items(
            ids.iter()
                .enumerate()
                .map(|(i, id)| item(id, i as i64))
                .collect(),
        )
    }

    fn order(c: &Collection) -> Vec<String> {
        c.entries()
            .iter()
            .map(|e| e.item.id.to_string())
            .collect()
    }

    #[test]
    fn test_every_move_is_a_permutation_with_contiguous_indices() {
        let ids = ["a", "b", "c", "d", "e"];
        for from in 0..ids.len() {
            for to in 0..ids.len() {
                let mut c = collection(&ids);
                c.move_item(from, to, false).unwrap();

                let mut expected: Vec<String> = ids.iter().map(|s| s.to_string()).collect();
                let moved = expected.remove(from);
                expected.insert(to, moved);

                assert_eq!(order(&c), expected, "move {from} -> {to}");
                for (position, entry) in c.entries().iter().enumerate() {
                    assert_eq!(entry.item.order_index, position as i64);
                }
            }
        }
    }

    #[test]
    fn test_move_first_to_last_writes_all_three() {
        let mut c = collection(&["a", "b", "c"]);
        let writes = c.move_item(0, 2, false).unwrap();

        assert_eq!(order(&c), vec!["b", "c", "a"]);
        let written: Vec<(String, i64)> = writes
            .iter()
            .map(|w| (w.id.to_string(), w.order_index))
            .collect();
        assert_eq!(
            written,
            vec![
                ("b".to_string(), 0),
                ("c".to_string(), 1),
                ("a".to_string(), 2)
            ]
        );
    }

    #[test]
    fn test_only_changed_positions_are_written() {
        let mut c = collection(&["a", "b", "c", "d"]);
        let writes = c.move_item(1, 2, false).unwrap();
        let ids: Vec<String> = writes.iter().map(|w| w.id.to_string()).collect();
        assert_eq!(ids, vec!["c", "b"]);

        let mut c = collection(&["a", "b", "c", "d"]);
        assert_eq!(c.move_item(1, 2, true).unwrap().len(), 4);
    }

    #[test]
    fn test_gapped_indices_are_renumbered() {
        let mut c = Collection::from_items(vec![item("a", 10), item("b", 20), item("c", 30)]);
        let writes = c.move_item(0, 0, false).unwrap();
        assert_eq!(writes.len(), 3);
        assert_eq!(order(&c), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_out_of_range_leaves_sequence_untouched() {
        let mut c = collection(&["a", "b"]);
        assert!(c.move_item(0, 2, false).is_err());
        assert!(c.move_item(5, 0, false).is_err());
        assert_eq!(order(&c), vec!["a", "b"]);
    }

    #[test]
    fn test_failed_entries_are_rewritten_next_time() {
        let mut c = collection(&["a", "b", "c", "d"]);
        let writes = c.move_item(0, 1, false).unwrap();
        let sequence = c.mark_pending(&writes);
        c.settle(&ItemId::new("a"), sequence, SyncState::Failed("boom".to_string()));
        c.settle(&ItemId::new("b"), sequence, SyncState::Settled);
        assert!(c.is_stale());

        let writes = c.move_item(2, 3, false).unwrap();
        let ids: Vec<String> = writes.iter().map(|w| w.id.to_string()).collect();
        assert_eq!(ids, vec!["a", "d", "c"]);
    }

    #[test]
    fn test_older_batch_cannot_overwrite_newer_state() {
        let mut c = collection(&["a", "b"]);
        let first = c.move_item(0, 1, false).unwrap();
        let first_seq = c.mark_pending(&first);
        let second = c.move_item(0, 1, false).unwrap();
        let second_seq = c.mark_pending(&second);

        c.settle(&ItemId::new("a"), first_seq, SyncState::Failed("late".to_string()));
        assert_eq!(c.entries()[0].state, SyncState::Pending);

        c.settle(&ItemId::new("a"), second_seq, SyncState::Settled);
        assert!(!c.is_stale());
    }

    #[test]
    fn test_remove_keeps_relative_order() {
        let mut c = collection(&["a", "b", "c"]);
        let removed = c.remove(&ItemId::new("b")).unwrap();
        assert_eq!(removed.title, "b");
        assert_eq!(order(&c), vec!["a", "c"]);
        assert!(c.remove(&ItemId::new("b")).is_none());
    }

    #[test]
    fn test_patched_position_resorts() {
        let mut c = collection(&["a", "b", "c"]);
        assert!(c.apply_patch(&ItemId::new("a"), &ItemPatch::reposition(5)));
        assert_eq!(order(&c), vec!["b", "c", "a"]);

        let renamed = ItemPatch::default().with_title("B");
        assert!(c.apply_patch(&ItemId::new("b"), &renamed));
        assert_eq!(c.entries()[0].item.title, "B");
        assert!(!c.apply_patch(&ItemId::new("zzz"), &renamed));
    }
}
