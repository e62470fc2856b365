//! Local backends for Vitrine.
//!
//! These implement the service traits from `vitrine_interface` without any
//! hosted dependency, for local development and for tests.
//!
//! - [`InMemoryItemStore`]: item rows in a `Vec`, slug uniqueness enforced per site
//! - [`FileSystemObjectStore`]: uploaded blobs under a directory, served from a base URL
//! - [`InMemoryAuthenticator`]: magic links issued and redeemed in process
//!
//! # Example
//!
//! ```rust
//! use vitrine_core::{ItemDraft, ItemFilter, NewItem};
//! use vitrine_interface::ItemStore;
//! use vitrine_storage::InMemoryItemStore;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let store = InMemoryItemStore::new();
//! let draft = ItemDraft::builder().title("First").build()?;
//! let item = store.create(&NewItem::from_draft("stavrin", draft, 0, 1)).await?;
//!
//! let listed = store.list(&ItemFilter::public("stavrin")).await?;
//! assert_eq!(listed[0].id, item.id);
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod auth;
mod filesystem;
mod memory;

pub use auth::InMemoryAuthenticator;
pub use filesystem::FileSystemObjectStore;
pub use memory::InMemoryItemStore;
