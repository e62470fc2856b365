//! Error types for the Vitrine library.
//!
//! This crate provides the foundation error types used throughout the Vitrine workspace.
//!
//! # Error Hierarchy
//!
//! All errors follow the `ErrorKind` + wrapper struct pattern:
//! - `*ErrorKind` enum defines specific error conditions
//! - `*Error` struct wraps the kind with source location tracking
//! - All constructors use `#[track_caller]` for automatic location capture
//!
//! Every family converts into [`VitrineError`], so `?` works across crate boundaries.
//!
//! # Examples
//!
//! ```
//! use vitrine_error::{ValidationError, ValidationErrorKind, VitrineResult};
//!
//! fn check_title(title: &str) -> VitrineResult<()> {
//!     if title.trim().is_empty() {
//!         Err(ValidationError::new(ValidationErrorKind::MissingField("title".to_string())))?
//!     }
//!     Ok(())
//! }
//!
//! let err = check_title("  ").unwrap_err();
//! assert_eq!(err.message(), "Missing required field: title");
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod auth;
mod config;
mod error;
mod retry;
mod store;
mod timeout;
mod upload;
mod validation;

pub use auth::{AuthError, AuthErrorKind};
pub use config::ConfigError;
pub use error::{VitrineError, VitrineErrorKind, VitrineResult};
pub use retry::RetryableError;
pub use store::{StoreError, StoreErrorKind, StoreOperation};
pub use timeout::TimeoutError;
pub use upload::{UploadError, UploadErrorKind};
pub use validation::{ValidationError, ValidationErrorKind};
