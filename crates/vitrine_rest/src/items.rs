//! Row API implementation of ItemStore.

use crate::client::RestClient;
use crate::status::{store_status_error, store_transport_error};
use crate::RestConfig;
use async_trait::async_trait;
use reqwest::{Method, Response};
use serde::de::DeserializeOwned;
use tokio::sync::watch;
use tracing::instrument;
use vitrine_core::{Item, ItemFilter, ItemId, ItemPatch, NewItem, SortOrder};
use vitrine_error::{StoreError, StoreErrorKind, StoreOperation, VitrineResult};
use vitrine_interface::{ItemStore, Session};

/// Item store backed by a PostgREST-style row API.
#[derive(Debug, Clone)]
pub struct RestItemStore {
    client: RestClient,
}

impl RestItemStore {
    /// Store using the anonymous key for every request.
    pub fn new(config: RestConfig) -> Self {
        Self {
            client: RestClient::new(config),
        }
    }

    /// Authorize writes with the signed-in session when there is one.
    pub fn with_session(mut self, session: watch::Receiver<Option<Session>>) -> Self {
        self.client = self.client.with_session(session);
        self
    }

    /// Connection settings.
    pub fn config(&self) -> &RestConfig {
        self.client.config()
    }

    async fn rows<T: DeserializeOwned>(
        operation: StoreOperation,
        response: Response,
    ) -> Result<Vec<T>, StoreError> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::warn!(%operation, %status, body = %body, "Row API returned error");
            return Err(store_status_error(operation, status, &body));
        }

        response
            .json::<Vec<T>>()
            .await
            .map_err(|e| StoreError::new(StoreErrorKind::Decode(e.to_string())))
    }

    fn id_filter(id: &ItemId) -> [(&'static str, String); 1] {
        [("id", format!("eq.{}", id))]
    }
}

#[async_trait]
impl ItemStore for RestItemStore {
    #[instrument(skip(self, record), fields(site = %record.site_slug, slug = %record.slug))]
    async fn create(&self, record: &NewItem) -> VitrineResult<Item> {
        let op = StoreOperation::Create;
        let response = self
            .client
            .request(Method::POST, &self.config().rows_url())
            .header("Prefer", "return=representation")
            .json(record)
            .send()
            .await
            .map_err(|e| store_transport_error(op, e))?;

        let created = Self::rows::<Item>(op, response)
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| {
                StoreError::new(StoreErrorKind::Decode(
                    "insert returned no rows".to_string(),
                ))
            })?;

        tracing::debug!(id = %created.id, "Created row");
        Ok(created)
    }

    #[instrument(skip(self, patch))]
    async fn update(&self, id: &ItemId, patch: &ItemPatch) -> VitrineResult<()> {
        let op = StoreOperation::Update;
        let response = self
            .client
            .request(Method::PATCH, &self.config().rows_url())
            .query(&Self::id_filter(id))
            .header("Prefer", "return=representation")
            .json(patch)
            .send()
            .await
            .map_err(|e| store_transport_error(op, e))?;

        let touched = Self::rows::<serde_json::Value>(op, response).await?;
        if touched.is_empty() {
            return Err(StoreError::new(StoreErrorKind::NotFound(id.to_string())).into());
        }
        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: &ItemId) -> VitrineResult<()> {
        let op = StoreOperation::Delete;
        let response = self
            .client
            .request(Method::DELETE, &self.config().rows_url())
            .query(&Self::id_filter(id))
            .header("Prefer", "return=representation")
            .send()
            .await
            .map_err(|e| store_transport_error(op, e))?;

        let removed = Self::rows::<serde_json::Value>(op, response).await?;
        if removed.is_empty() {
            return Err(StoreError::new(StoreErrorKind::NotFound(id.to_string())).into());
        }
        Ok(())
    }

    #[instrument(skip(self, filter), fields(site = %filter.site_slug))]
    async fn list(&self, filter: &ItemFilter) -> VitrineResult<Vec<Item>> {
        let op = StoreOperation::List;
        let order = match filter.order {
            SortOrder::Ascending => "order_idx.asc",
            SortOrder::Descending => "order_idx.desc",
        };

        let mut query = vec![
            ("select", "*".to_string()),
            ("site_slug", format!("eq.{}", filter.site_slug)),
            ("order", order.to_string()),
        ];
        if filter.visible_only {
            query.push(("visible", "eq.true".to_string()));
        }

        let response = self
            .client
            .request(Method::GET, &self.config().rows_url())
            .query(&query)
            .send()
            .await
            .map_err(|e| store_transport_error(op, e))?;

        let mut items = Self::rows::<Item>(op, response).await?;
        // Server order is not guaranteed stable on ties
        filter.order.sort(&mut items);
        tracing::debug!(count = items.len(), "Listed rows");
        Ok(items)
    }
}
