//! Public listing.

use std::sync::Arc;
use vitrine_core::{ItemFilter, Tile};
use vitrine_error::VitrineResult;
use vitrine_interface::ItemStore;
use vitrine_reconciler::{ReconcilerConfig, RemotePolicy};

/// Read-only view of a site's visible items.
pub struct Gallery<S: ItemStore + ?Sized> {
    store: Arc<S>,
    site_slug: String,
    policy: RemotePolicy,
}

impl<S: ItemStore + ?Sized> Gallery<S> {
    /// Gallery for one site.
    pub fn new(store: Arc<S>, site_slug: impl Into<String>, config: &ReconcilerConfig) -> Self {
        Self {
            store,
            site_slug: site_slug.into(),
            policy: RemotePolicy::from_config(config),
        }
    }

    /// Visible items as display tiles, ordered by position.
    #[tracing::instrument(skip(self), fields(site = %self.site_slug))]
    pub async fn tiles(&self) -> VitrineResult<Vec<Tile>> {
        let store = &*self.store;
        let filter = ItemFilter::public(&self.site_slug);
        let filter = &filter;
        let items = self
            .policy
            .idempotent("list", move || store.list(filter))
            .await?;
        Ok(items.iter().map(Tile::from).collect())
    }
}
