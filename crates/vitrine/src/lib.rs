//! Vitrine: an ordered content gallery with an optimistic admin workflow.
//!
//! This crate ties the workspace together:
//!
//! - [`VitrineConfig`]: layered configuration (bundled defaults, user files, environment)
//! - [`init_tracing`]: subscriber setup
//! - [`AdminPanel`]: sign-in, uploads, and create/update/delete/reorder over a
//!   [`Reconciler`]
//! - [`Gallery`]: the public, visible-only listing as display tiles
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//! use vitrine::{AdminPanel, Gallery, ItemForm, Reconciler, ReconcilerConfig};
//! use vitrine::{FileSystemObjectStore, InMemoryAuthenticator, InMemoryItemStore};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let dir = tempfile::tempdir()?;
//! let store = Arc::new(InMemoryItemStore::new());
//! let objects = Arc::new(FileSystemObjectStore::new(dir.path(), "http://localhost/media")?);
//! let auth = Arc::new(InMemoryAuthenticator::new());
//!
//! let reconciler = Reconciler::new(store.clone(), "stavrin", ReconcilerConfig::default());
//! let admin = AdminPanel::new(reconciler, objects, auth.clone());
//!
//! admin.request_login("editor@example.com").await?;
//! let link = auth.magic_link_fragment("editor@example.com").await.unwrap();
//! admin.complete_login(&link).await?;
//!
//! admin.create(ItemForm::new("First")).await?;
//! admin.create(ItemForm::new("Second")).await?;
//! admin.reorder(1, 0).await?;
//!
//! let gallery = Gallery::new(store, "stavrin", &ReconcilerConfig::default());
//! let titles: Vec<String> = gallery.tiles().await?.into_iter().map(|t| t.title).collect();
//! assert_eq!(titles, ["Second", "First"]);
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod admin;
mod config;
mod form;
mod gallery;
pub mod telemetry;

pub use admin::{AdminPanel, HostedAdminPanel};
pub use config::{SiteConfig, VitrineConfig};
pub use form::{ItemForm, Upload};
pub use gallery::Gallery;
pub use telemetry::{LogFormat, LoggingConfig, init_tracing};

pub use vitrine_core::{
    ContentBlock, Item, ItemDraft, ItemFilter, ItemId, ItemPatch, Media, MediaKind,
    PLACEHOLDER_IMAGE, Tile,
};
pub use vitrine_error::{RetryableError, VitrineError, VitrineErrorKind, VitrineResult};
pub use vitrine_interface::{Authenticator, ItemStore, ObjectStore, Session, SessionTokens, User};
pub use vitrine_reconciler::{
    Entry, PendingReorder, Reconciler, ReconcilerConfig, ReorderOutcome, SyncState, WriteFailure,
};
pub use vitrine_rest::{RestAuthenticator, RestConfig, RestItemStore, RestObjectStore};
pub use vitrine_storage::{FileSystemObjectStore, InMemoryAuthenticator, InMemoryItemStore};
