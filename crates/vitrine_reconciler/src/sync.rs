//! Per-item persistence state.

use serde::{Deserialize, Serialize};
use vitrine_core::Item;

/// Whether an item's displayed position has reached the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(tag = "state", content = "message", rename_all = "lowercase")]
pub enum SyncState {
    /// Displayed and stored positions agree
    #[default]
    Settled,
    /// A position write is queued or in flight
    Pending,
    /// The last position write failed; displayed order may differ from the store
    Failed(String),
}

impl SyncState {
    /// Check if a write is outstanding.
    pub fn is_pending(&self) -> bool {
        matches!(self, Self::Pending)
    }

    /// Check if the last write failed.
    pub fn is_failed(&self) -> bool {
        matches!(self, Self::Failed(_))
    }
}

/// One item in the reconciled sequence with its sync state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entry {
    /// Current in-memory copy
    pub item: Item,
    /// Persistence state of `item.order_index`
    pub state: SyncState,
    /// Write batch that last set `state`, 0 for loaded items
    pub sequence: u64,
}

impl Entry {
    /// Entry for an item just read from or written to the store.
    pub fn settled(item: Item) -> Self {
        Self {
            item,
            state: SyncState::Settled,
            sequence: 0,
        }
    }
}
