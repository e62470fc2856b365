//! In-memory implementation of ItemStore.
//!
//! Rows are kept in insertion order, so listing ties on `order_index` come
//! back in creation order.

use async_trait::async_trait;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use tokio::sync::RwLock;
use uuid::Uuid;
use vitrine_core::{Item, ItemFilter, ItemId, ItemPatch, NewItem};
use vitrine_error::{StoreError, StoreErrorKind, VitrineResult};
use vitrine_interface::ItemStore;

/// In-memory item store.
///
/// Cloning shares the underlying rows.
#[derive(Debug, Clone, Default)]
pub struct InMemoryItemStore {
    /// Rows in insertion order
    items: Arc<RwLock<Vec<Item>>>,
    /// Number of successful update calls
    updates: Arc<AtomicUsize>,
}

impl InMemoryItemStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store already holding `items`.
    pub fn with_items(items: Vec<Item>) -> Self {
        Self {
            items: Arc::new(RwLock::new(items)),
            updates: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Current copy of one row.
    pub async fn get(&self, id: &ItemId) -> Option<Item> {
        self.items
            .read()
            .await
            .iter()
            .find(|item| &item.id == id)
            .cloned()
    }

    /// Number of stored rows across all sites.
    pub async fn len(&self) -> usize {
        self.items.read().await.len()
    }

    /// Check if the store is empty.
    pub async fn is_empty(&self) -> bool {
        self.items.read().await.is_empty()
    }

    /// Number of update calls that reached a row (for testing).
    pub fn update_count(&self) -> usize {
        self.updates.load(Ordering::SeqCst)
    }

    fn slug_taken(items: &[Item], site_slug: &str, slug: &str, except: Option<&ItemId>) -> bool {
        items.iter().any(|item| {
            item.site_slug == site_slug && item.slug == slug && Some(&item.id) != except
        })
    }
}

#[async_trait]
impl ItemStore for InMemoryItemStore {
    async fn create(&self, record: &NewItem) -> VitrineResult<Item> {
        let mut items = self.items.write().await;

        if Self::slug_taken(&items, &record.site_slug, &record.slug, None) {
            return Err(StoreError::new(StoreErrorKind::Conflict(format!(
                "slug '{}' already exists in site '{}'",
                record.slug, record.site_slug
            )))
            .into());
        }

        let item = record.clone().into_item(ItemId::new(Uuid::new_v4().to_string()));
        items.push(item.clone());
        tracing::debug!(id = %item.id, slug = %item.slug, "Inserted item");
        Ok(item)
    }

    async fn update(&self, id: &ItemId, patch: &ItemPatch) -> VitrineResult<()> {
        let mut items = self.items.write().await;

        let site_slug = items
            .iter()
            .find(|item| &item.id == id)
            .map(|item| item.site_slug.clone())
            .ok_or_else(|| StoreError::new(StoreErrorKind::NotFound(id.to_string())))?;

        if let Some(slug) = &patch.slug {
            if Self::slug_taken(&items, &site_slug, slug, Some(id)) {
                return Err(StoreError::new(StoreErrorKind::Conflict(format!(
                    "slug '{}' already exists in site '{}'",
                    slug, site_slug
                )))
                .into());
            }
        }

        if let Some(item) = items.iter_mut().find(|item| &item.id == id) {
            patch.apply_to(item);
        }
        self.updates.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn delete(&self, id: &ItemId) -> VitrineResult<()> {
        let mut items = self.items.write().await;
        let position = items
            .iter()
            .position(|item| &item.id == id)
            .ok_or_else(|| StoreError::new(StoreErrorKind::NotFound(id.to_string())))?;
        items.remove(position);
        tracing::debug!(id = %id, "Deleted item");
        Ok(())
    }

    async fn list(&self, filter: &ItemFilter) -> VitrineResult<Vec<Item>> {
        let mut matching: Vec<Item> = self
            .items
            .read()
            .await
            .iter()
            .filter(|item| filter.matches(item))
            .cloned()
            .collect();
        filter.order.sort(&mut matching);
        Ok(matching)
    }
}
