//! Storage API implementation of ObjectStore.

use crate::client::RestClient;
use crate::status::upload_status_error;
use crate::RestConfig;
use async_trait::async_trait;
use reqwest::Method;
use tokio::sync::watch;
use vitrine_error::{UploadError, UploadErrorKind, VitrineResult};
use vitrine_interface::{ObjectStore, Session};

/// Object store backed by a bucketed storage API.
#[derive(Debug, Clone)]
pub struct RestObjectStore {
    client: RestClient,
}

impl RestObjectStore {
    /// Store using the anonymous key for every upload.
    pub fn new(config: RestConfig) -> Self {
        Self {
            client: RestClient::new(config),
        }
    }

    /// Authorize uploads with the signed-in session when there is one.
    pub fn with_session(mut self, session: watch::Receiver<Option<Session>>) -> Self {
        self.client = self.client.with_session(session);
        self
    }
}

#[async_trait]
impl ObjectStore for RestObjectStore {
    #[tracing::instrument(skip(self, bytes), fields(size = bytes.len()))]
    async fn upload(&self, name: &str, bytes: &[u8], content_type: &str) -> VitrineResult<()> {
        let response = self
            .client
            .request(Method::POST, &self.client.config().object_url(name))
            .header("Content-Type", content_type)
            .header("x-upsert", "false")
            .body(bytes.to_vec())
            .send()
            .await
            .map_err(|e| UploadError::new(UploadErrorKind::Unavailable(e.to_string())))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::warn!(%status, body = %body, "Storage API rejected upload");
            return Err(upload_status_error(name, status, &body).into());
        }

        tracing::info!(name, "Uploaded object");
        Ok(())
    }

    fn public_url(&self, name: &str) -> String {
        self.client.config().public_object_url(name)
    }
}
