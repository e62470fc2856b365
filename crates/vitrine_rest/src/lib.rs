//! Hosted backends for Vitrine.
//!
//! Talks to a PostgREST-style row API, a bucketed object storage API, and a
//! magic-link auth API that share one base URL and anonymous key:
//!
//! | Concern | Endpoint |
//! |---------|----------|
//! | Rows | `{url}/rest/v1/{table}` |
//! | Uploads | `{url}/storage/v1/object/{bucket}/{name}` |
//! | Public objects | `{url}/storage/v1/object/public/{bucket}/{name}` |
//! | Auth | `{url}/auth/v1/otp`, `/auth/v1/user`, `/auth/v1/logout` |
//!
//! Requests carry the signed-in session's access token as bearer when a
//! session receiver is attached, and the anonymous key otherwise.
//!
//! # Example
//!
//! ```rust,no_run
//! use vitrine_interface::Authenticator;
//! use vitrine_rest::{RestAuthenticator, RestConfig, RestItemStore};
//!
//! let config = RestConfig::new("https://example.supabase.co", "anon-key");
//! let auth = RestAuthenticator::new(config.clone());
//! let store = RestItemStore::new(config).with_session(auth.session_changes());
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod auth;
mod client;
mod config;
mod items;
mod objects;
mod status;

pub use auth::RestAuthenticator;
pub use config::RestConfig;
pub use items::RestItemStore;
pub use objects::RestObjectStore;
