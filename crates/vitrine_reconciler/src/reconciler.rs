//! The ordered collection reconciler.

use crate::queue::{WriteBatch, spawn_writer};
use crate::{
    Collection, CreationClock, Entry, PendingReorder, ReconcilerConfig, RemotePolicy,
    ReorderOutcome, SyncState,
};
use std::sync::Arc;
use tokio::sync::{Mutex, MutexGuard, RwLock, mpsc, oneshot};
use tokio::task::JoinHandle;
use tracing::{debug, info, instrument, warn};
use vitrine_core::{Item, ItemDraft, ItemFilter, ItemId, ItemPatch, NewItem};
use vitrine_error::{StoreError, StoreErrorKind, VitrineResult};
use vitrine_interface::ItemStore;

/// Owns the in-memory ordered sequence for one site and keeps it in sync
/// with an [`ItemStore`].
///
/// Reorders apply locally before any remote call and are persisted through a
/// per-site write queue. Creates are appended only after the store accepts
/// them; deletes are removed only after the store confirms.
///
/// # Example
///
/// ```rust
/// use std::sync::Arc;
/// use vitrine_core::ItemDraft;
/// use vitrine_reconciler::{Reconciler, ReconcilerConfig};
/// use vitrine_storage::InMemoryItemStore;
///
/// # #[tokio::main]
/// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let store = Arc::new(InMemoryItemStore::new());
/// let reconciler = Reconciler::new(store, "stavrin", ReconcilerConfig::default());
///
/// for title in ["A", "B", "C"] {
///     reconciler.create(ItemDraft::builder().title(title).build()?).await?;
/// }
///
/// let outcome = reconciler.reorder(0, 2).await?;
/// assert!(outcome.is_complete());
///
/// let titles: Vec<String> = reconciler.items().await.into_iter().map(|i| i.title).collect();
/// assert_eq!(titles, ["B", "C", "A"]);
/// # Ok(())
/// # }
/// ```
pub struct Reconciler<S: ItemStore + ?Sized + 'static> {
    site_slug: String,
    store: Arc<S>,
    config: ReconcilerConfig,
    policy: RemotePolicy,
    collection: Arc<RwLock<Collection>>,
    /// Held across mutate-then-enqueue so batches enter the queue in sequence order
    writer: Mutex<mpsc::Sender<WriteBatch>>,
    worker: JoinHandle<()>,
    clock: CreationClock,
}

impl<S: ItemStore + ?Sized + 'static> Reconciler<S> {
    /// Create a reconciler with an empty sequence and start its write queue.
    ///
    /// Must be called from within a tokio runtime.
    pub fn new(store: Arc<S>, site_slug: impl Into<String>, config: ReconcilerConfig) -> Self {
        let site_slug = site_slug.into();
        let policy = RemotePolicy::from_config(&config);
        let collection = Arc::new(RwLock::new(Collection::default()));
        let (writer, worker) = spawn_writer(
            site_slug.clone(),
            store.clone(),
            policy.clone(),
            collection.clone(),
            config.queue_capacity,
        );

        debug!(site = %site_slug, "Created reconciler");
        Self {
            site_slug,
            store,
            config,
            policy,
            collection,
            writer: Mutex::new(writer),
            worker,
            clock: CreationClock::new(),
        }
    }

    /// Site this reconciler manages.
    pub fn site_slug(&self) -> &str {
        &self.site_slug
    }

    /// Active settings.
    pub fn config(&self) -> &ReconcilerConfig {
        &self.config
    }

    /// Clock used for slug suffixes; share it for other creation timestamps.
    pub fn clock(&self) -> &CreationClock {
        &self.clock
    }

    /// Items in display order.
    pub async fn items(&self) -> Vec<Item> {
        self.collection.read().await.items()
    }

    /// Items with their sync state, in display order.
    pub async fn entries(&self) -> Vec<Entry> {
        self.collection.read().await.entries().to_vec()
    }

    /// Number of items.
    pub async fn len(&self) -> usize {
        self.collection.read().await.len()
    }

    /// Check if the sequence is empty.
    pub async fn is_empty(&self) -> bool {
        self.collection.read().await.is_empty()
    }

    /// True when a position write failed and the displayed order may not
    /// match the store until [`reload`](Self::reload).
    pub async fn is_stale(&self) -> bool {
        self.collection.read().await.is_stale()
    }

    /// Fetch the site's items from the store, ordered by `order_index`.
    ///
    /// Does not touch the in-memory sequence.
    #[instrument(skip(self), fields(site = %self.site_slug))]
    pub async fn list(&self, visible_only: bool) -> VitrineResult<Vec<Item>> {
        let filter = if visible_only {
            ItemFilter::public(&self.site_slug)
        } else {
            ItemFilter::admin(&self.site_slug)
        };
        let store = &*self.store;
        let filter = &filter;
        self.policy
            .idempotent("list", move || store.list(filter))
            .await
    }

    /// Replace the in-memory sequence with every item of the site.
    #[instrument(skip(self), fields(site = %self.site_slug))]
    pub async fn load(&self) -> VitrineResult<Vec<Item>> {
        let items = self.list(false).await?;
        self.collection.write().await.replace(items.clone());
        info!(count = items.len(), "Loaded items");
        Ok(items)
    }

    /// Resync with the store, discarding unsaved positions and failure marks.
    pub async fn reload(&self) -> VitrineResult<Vec<Item>> {
        self.load().await
    }

    /// Move an item and queue its persistence without waiting for it.
    ///
    /// The new order is visible through [`items`](Self::items) as soon as this
    /// returns.
    ///
    /// # Errors
    ///
    /// Returns a validation error if either index is out of range, in which
    /// case nothing changes.
    #[instrument(skip(self), fields(site = %self.site_slug))]
    pub async fn begin_reorder(&self, from: usize, to: usize) -> VitrineResult<PendingReorder> {
        let writer = self.writer.lock().await;

        let (moved, writes, sequence) = {
            let mut collection = self.collection.write().await;
            let writes = collection.move_item(from, to, self.config.persist_unchanged)?;
            let moved = collection.entries()[to].item.id.clone();
            let sequence = if writes.is_empty() {
                0
            } else {
                collection.mark_pending(&writes)
            };
            (moved, writes, sequence)
        };

        info!(item_id = %moved, from, to, writes = writes.len(), "Applied reorder");

        if writes.is_empty() {
            return Ok(PendingReorder::new(
                moved,
                from,
                to,
                self.site_slug.clone(),
                writes,
                None,
            ));
        }

        let (done, settled) = oneshot::channel();
        let batch = WriteBatch {
            sequence,
            writes: writes.clone(),
            done,
        };

        if writer.send(batch).await.is_err() {
            let err = StoreError::new(StoreErrorKind::QueueClosed(self.site_slug.clone()));
            let mut collection = self.collection.write().await;
            for write in &writes {
                collection.settle(
                    &write.id,
                    sequence,
                    SyncState::Failed(err.kind.to_string()),
                );
            }
            return Err(err.into());
        }

        Ok(PendingReorder::new(
            moved,
            from,
            to,
            self.site_slug.clone(),
            writes,
            Some(settled),
        ))
    }

    /// Move an item and wait until its new positions are persisted or failed.
    ///
    /// Failed writes are reported in the outcome, not as an error, and the
    /// in-memory order is kept.
    pub async fn reorder(&self, from: usize, to: usize) -> VitrineResult<ReorderOutcome> {
        let outcome = self.begin_reorder(from, to).await?.settled().await?;

        if outcome.is_complete() {
            debug!(persisted = outcome.persisted.len(), "Reorder persisted");
        } else {
            warn!(
                site = %self.site_slug,
                failed = outcome.failures.len(),
                persisted = outcome.persisted.len(),
                "Reorder partially persisted"
            );
        }
        Ok(outcome)
    }

    /// Validate a draft, insert it remotely, and append the stored record.
    ///
    /// Nothing is added locally when the store rejects the insert.
    #[instrument(skip(self, draft), fields(site = %self.site_slug, title = %draft.title))]
    pub async fn create(&self, draft: ItemDraft) -> VitrineResult<Item> {
        draft.validate()?;

        let order_index = self.collection.read().await.len() as i64;
        let record = NewItem::from_draft(
            &self.site_slug,
            draft,
            order_index,
            self.clock.next_millis(),
        );

        let item = self.policy.once("create", self.store.create(&record)).await?;
        self.collection.write().await.push(item.clone());

        info!(item_id = %item.id, slug = %item.slug, order_index, "Created item");
        Ok(item)
    }

    /// Patch an item remotely, then mirror the patch locally.
    ///
    /// A patch that sets `order_index` first waits for queued reorders to
    /// drain and holds the queue while it runs, so it is never overwritten by
    /// an earlier reorder's writes.
    #[instrument(skip(self, patch), fields(site = %self.site_slug, item_id = %id))]
    pub async fn update(&self, id: &ItemId, patch: ItemPatch) -> VitrineResult<()> {
        patch.validate()?;
        self.require_known(id).await?;

        if patch.is_empty() {
            debug!("Empty patch, nothing to update");
            return Ok(());
        }

        let _queue = match patch.order_index {
            Some(_) => Some(self.drain_queue().await?),
            None => None,
        };

        let store = &*self.store;
        let patch_ref = &patch;
        self.policy
            .idempotent("update", move || store.update(id, patch_ref))
            .await?;

        self.collection.write().await.apply_patch(id, &patch);
        info!("Updated item");
        Ok(())
    }

    /// Delete an item remotely, then drop it from the sequence.
    ///
    /// On failure the item stays where it is.
    #[instrument(skip(self), fields(site = %self.site_slug, item_id = %id))]
    pub async fn delete(&self, id: &ItemId) -> VitrineResult<()> {
        self.require_known(id).await?;

        let store = &*self.store;
        self.policy
            .idempotent("delete", move || store.delete(id))
            .await?;

        self.collection.write().await.remove(id);
        info!("Deleted item");
        Ok(())
    }

    /// Stop accepting reorders and wait for queued writes to drain.
    pub async fn shutdown(self) {
        let Self { writer, worker, .. } = self;
        drop(writer);
        if let Err(e) = worker.await {
            warn!(error = %e, "Write queue task ended abnormally");
        }
    }

    /// Wait until every queued batch has settled, keeping new ones out while
    /// the returned guard lives.
    async fn drain_queue(&self) -> VitrineResult<MutexGuard<'_, mpsc::Sender<WriteBatch>>> {
        let writer = self.writer.lock().await;
        let (done, drained) = oneshot::channel();
        let barrier = WriteBatch {
            sequence: 0,
            writes: Vec::new(),
            done,
        };

        let closed = || StoreError::new(StoreErrorKind::QueueClosed(self.site_slug.clone()));
        writer.send(barrier).await.map_err(|_| closed())?;
        drained.await.map_err(|_| closed())?;

        debug!("Write queue drained");
        Ok(writer)
    }

    async fn require_known(&self, id: &ItemId) -> VitrineResult<()> {
        if self.collection.read().await.position(id).is_none() {
            return Err(StoreError::new(StoreErrorKind::NotFound(id.to_string())).into());
        }
        Ok(())
    }
}
