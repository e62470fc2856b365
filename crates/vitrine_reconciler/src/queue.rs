//! Per-site write queue.
//!
//! A single background task drains reorder batches in submission order. The
//! writes inside one batch target distinct items, so they run concurrently.

use crate::{Collection, PositionWrite, RemotePolicy, SyncState};
use futures::future::join_all;
use std::sync::Arc;
use tokio::sync::{RwLock, mpsc, oneshot};
use tokio::task::JoinHandle;
use vitrine_interface::ItemStore;

/// Result of one position write.
#[derive(Debug, Clone)]
pub(crate) struct WriteReport {
    pub(crate) write: PositionWrite,
    pub(crate) error: Option<String>,
}

/// One reorder's worth of position writes.
#[derive(Debug)]
pub(crate) struct WriteBatch {
    pub(crate) sequence: u64,
    pub(crate) writes: Vec<PositionWrite>,
    pub(crate) done: oneshot::Sender<Vec<WriteReport>>,
}

/// Start the writer task for one site.
pub(crate) fn spawn_writer<S>(
    site_slug: String,
    store: Arc<S>,
    policy: RemotePolicy,
    collection: Arc<RwLock<Collection>>,
    capacity: usize,
) -> (mpsc::Sender<WriteBatch>, JoinHandle<()>)
where
    S: ItemStore + ?Sized + 'static,
{
    let (tx, rx) = mpsc::channel(capacity.max(1));
    let handle = tokio::spawn(run_writer(site_slug, store, policy, collection, rx));
    (tx, handle)
}

async fn run_writer<S>(
    site_slug: String,
    store: Arc<S>,
    policy: RemotePolicy,
    collection: Arc<RwLock<Collection>>,
    mut rx: mpsc::Receiver<WriteBatch>,
) where
    S: ItemStore + ?Sized,
{
    tracing::debug!(site = %site_slug, "Write queue started");

    while let Some(batch) = rx.recv().await {
        tracing::debug!(
            site = %site_slug,
            sequence = batch.sequence,
            writes = batch.writes.len(),
            "Draining reorder batch"
        );

        let store = &*store;
        let policy = &policy;
        let results = join_all(batch.writes.iter().map(|write| async move {
            policy
                .idempotent("set_order_index", move || {
                    store.set_order_index(&write.id, write.order_index)
                })
                .await
        }))
        .await;

        let mut reports = Vec::with_capacity(results.len());
        {
            let mut collection = collection.write().await;
            for (write, result) in batch.writes.into_iter().zip(results) {
                let error = match result {
                    Ok(()) => {
                        collection.settle(&write.id, batch.sequence, SyncState::Settled);
                        None
                    }
                    Err(e) => {
                        let message = e.message();
                        tracing::error!(
                            site = %site_slug,
                            item_id = %write.id,
                            order_index = write.order_index,
                            error = %message,
                            "Failed to persist position"
                        );
                        collection.settle(
                            &write.id,
                            batch.sequence,
                            SyncState::Failed(message.clone()),
                        );
                        Some(message)
                    }
                };
                reports.push(WriteReport { write, error });
            }
        }

        // Receiver may be gone if the caller did not wait
        let _ = batch.done.send(reports);
    }

    tracing::debug!(site = %site_slug, "Write queue stopped");
}
