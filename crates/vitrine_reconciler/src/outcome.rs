//! Results of a reorder.

use crate::queue::WriteReport;
use crate::PositionWrite;
use serde::{Deserialize, Serialize};
use tokio::sync::oneshot;
use vitrine_core::ItemId;
use vitrine_error::{StoreError, StoreErrorKind, VitrineResult};

/// A position write that did not reach the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WriteFailure {
    /// Item whose position was not saved
    pub id: ItemId,
    /// Index that was being written
    pub order_index: i64,
    /// Human-readable cause
    pub message: String,
}

/// What happened to a reorder once its writes settled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReorderOutcome {
    /// Item that was dragged
    pub moved: ItemId,
    /// Position it was dragged from
    pub from: usize,
    /// Position it was dropped at
    pub to: usize,
    /// Items whose new position was saved
    pub persisted: Vec<ItemId>,
    /// Items whose new position was not saved
    pub failures: Vec<WriteFailure>,
}

impl ReorderOutcome {
    /// Check if every write reached the store.
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }

    /// Message for the admin when some writes failed.
    ///
    /// # Example
    ///
    /// ```
    /// use vitrine_core::ItemId;
    /// use vitrine_reconciler::{ReorderOutcome, WriteFailure};
    ///
    /// let outcome = ReorderOutcome {
    ///     moved: ItemId::new("a"),
    ///     from: 0,
    ///     to: 2,
    ///     persisted: vec![ItemId::new("b")],
    ///     failures: vec![WriteFailure {
    ///         id: ItemId::new("a"),
    ///         order_index: 2,
    ///         message: "update timed out after 10000ms".to_string(),
    ///     }],
    /// };
    /// assert!(outcome.warning().unwrap().contains("reload"));
    /// ```
    pub fn warning(&self) -> Option<String> {
        if self.failures.is_empty() {
            return None;
        }
        let first = &self.failures[0];
        Some(format!(
            "Could not save the new position of {} item(s) ({}). The displayed order may not match the saved order until you reload.",
            self.failures.len(),
            first.message
        ))
    }
}

/// A reorder that is already visible but may still be persisting.
#[derive(Debug)]
pub struct PendingReorder {
    moved: ItemId,
    from: usize,
    to: usize,
    site_slug: String,
    writes: Vec<PositionWrite>,
    done: Option<oneshot::Receiver<Vec<WriteReport>>>,
}

impl PendingReorder {
    pub(crate) fn new(
        moved: ItemId,
        from: usize,
        to: usize,
        site_slug: String,
        writes: Vec<PositionWrite>,
        done: Option<oneshot::Receiver<Vec<WriteReport>>>,
    ) -> Self {
        Self {
            moved,
            from,
            to,
            site_slug,
            writes,
            done,
        }
    }

    /// Item that was dragged.
    pub fn moved(&self) -> &ItemId {
        &self.moved
    }

    /// Writes queued for this reorder.
    pub fn writes(&self) -> &[PositionWrite] {
        &self.writes
    }

    /// Wait until every queued write has succeeded or failed.
    pub async fn settled(self) -> VitrineResult<ReorderOutcome> {
        let mut outcome = ReorderOutcome {
            moved: self.moved,
            from: self.from,
            to: self.to,
            persisted: Vec::new(),
            failures: Vec::new(),
        };

        let Some(done) = self.done else {
            return Ok(outcome);
        };

        let reports = done
            .await
            .map_err(|_| StoreError::new(StoreErrorKind::QueueClosed(self.site_slug)))?;

        for report in reports {
            match report.error {
                None => outcome.persisted.push(report.write.id),
                Some(message) => outcome.failures.push(WriteFailure {
                    id: report.write.id,
                    order_index: report.write.order_index,
                    message,
                }),
            }
        }
        Ok(outcome)
    }
}
