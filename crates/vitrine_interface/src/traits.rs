//! Trait definitions for the item store, object store, and authenticator.

use crate::{Session, SessionTokens};
use async_trait::async_trait;
use tokio::sync::watch;
use vitrine_core::{Item, ItemFilter, ItemId, ItemPatch, NewItem};
use vitrine_error::VitrineResult;

/// Row-oriented store holding item records.
#[async_trait]
pub trait ItemStore: Send + Sync {
    /// Insert a record and return it with its assigned id.
    async fn create(&self, record: &NewItem) -> VitrineResult<Item>;

    /// Overwrite the patched fields of one record.
    async fn update(&self, id: &ItemId, patch: &ItemPatch) -> VitrineResult<()>;

    /// Hard-delete one record.
    async fn delete(&self, id: &ItemId) -> VitrineResult<()>;

    /// Records matching the filter, ordered by `order_index`.
    async fn list(&self, filter: &ItemFilter) -> VitrineResult<Vec<Item>>;

    /// Overwrite a record's display position.
    ///
    /// This is a pure overwrite, so repeating it converges to the same state.
    async fn set_order_index(&self, id: &ItemId, order_index: i64) -> VitrineResult<()> {
        self.update(id, &ItemPatch::reposition(order_index)).await
    }
}

/// Blob store serving uploaded media.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Store `bytes` under `name`.
    async fn upload(&self, name: &str, bytes: &[u8], content_type: &str) -> VitrineResult<()>;

    /// Public URL a browser can load the object from.
    fn public_url(&self, name: &str) -> String;
}

/// Passwordless (magic-link) authentication provider.
#[async_trait]
pub trait Authenticator: Send + Sync {
    /// Ask the provider to email a login link.
    async fn request_passwordless_login(&self, email: &str) -> VitrineResult<()>;

    /// Turn the tokens carried by a login link into a session.
    async fn establish_session(&self, tokens: &SessionTokens) -> VitrineResult<Session>;

    /// Session currently signed in, if any.
    fn current_session(&self) -> Option<Session>;

    /// Receiver that observes every sign-in and sign-out.
    fn session_changes(&self) -> watch::Receiver<Option<Session>>;

    /// End the current session.
    async fn sign_out(&self) -> VitrineResult<()>;
}
