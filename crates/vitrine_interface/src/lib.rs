//! Trait definitions for the external services Vitrine depends on.
//!
//! The reconciler and the admin workflow only ever talk to these traits; the
//! hosted backend and the local backends implement them.

mod traits;
mod types;

pub use traits::{Authenticator, ItemStore, ObjectStore};
pub use types::{Session, SessionTokens, User};
