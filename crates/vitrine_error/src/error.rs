//! Top-level error wrapper types.

use crate::{
    AuthError, ConfigError, RetryableError, StoreError, TimeoutError, UploadError,
    ValidationError,
};

/// Every error family the workspace can produce.
///
/// # Examples
///
/// ```
/// use vitrine_error::{VitrineError, ConfigError};
///
/// let err: VitrineError = ConfigError::new("Missing field").into();
/// assert!(format!("{}", err).contains("Configuration Error"));
/// ```
#[derive(Debug, derive_more::From, derive_more::Display, derive_more::Error)]
pub enum VitrineErrorKind {
    /// Input rejected before any remote call
    #[from(ValidationError)]
    Validation(ValidationError),
    /// Remote item store failure
    #[from(StoreError)]
    Store(StoreError),
    /// Object store failure
    #[from(UploadError)]
    Upload(UploadError),
    /// Authentication failure
    #[from(AuthError)]
    Auth(AuthError),
    /// Remote call exceeded its budget
    #[from(TimeoutError)]
    Timeout(TimeoutError),
    /// Configuration error
    #[from(ConfigError)]
    Config(ConfigError),
}

/// Vitrine error with kind discrimination.
///
/// `Display` includes the source location for logs; [`VitrineError::message`]
/// gives the text meant for the person operating the admin panel.
///
/// # Examples
///
/// ```
/// use vitrine_error::{AuthError, AuthErrorKind, VitrineResult};
///
/// fn guarded() -> VitrineResult<()> {
///     Err(AuthError::new(AuthErrorKind::NotSignedIn))?
/// }
///
/// let err = guarded().unwrap_err();
/// assert_eq!(err.message(), "Please sign in first");
/// ```
#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("Vitrine Error: {}", _0)]
pub struct VitrineError(Box<VitrineErrorKind>);

impl VitrineError {
    /// Create a new error from a kind.
    pub fn new(kind: VitrineErrorKind) -> Self {
        Self(Box::new(kind))
    }

    /// Get the error kind.
    pub fn kind(&self) -> &VitrineErrorKind {
        &self.0
    }

    /// Human-readable message without source location.
    pub fn message(&self) -> String {
        match self.kind() {
            VitrineErrorKind::Validation(e) => e.kind.to_string(),
            VitrineErrorKind::Store(e) => e.kind.to_string(),
            VitrineErrorKind::Upload(e) => e.kind.to_string(),
            VitrineErrorKind::Auth(e) => e.kind.to_string(),
            VitrineErrorKind::Timeout(e) => format!(
                "{} timed out after {}ms",
                e.operation, e.timeout_ms
            ),
            VitrineErrorKind::Config(e) => e.message.clone(),
        }
    }
}

impl RetryableError for VitrineError {
    fn is_retryable(&self) -> bool {
        match self.kind() {
            VitrineErrorKind::Store(e) => e.is_retryable(),
            VitrineErrorKind::Upload(e) => e.is_retryable(),
            VitrineErrorKind::Auth(e) => e.is_retryable(),
            VitrineErrorKind::Timeout(e) => e.is_retryable(),
            VitrineErrorKind::Validation(_) | VitrineErrorKind::Config(_) => false,
        }
    }
}

// Generic From implementation for any type that converts to VitrineErrorKind
impl<T> From<T> for VitrineError
where
    T: Into<VitrineErrorKind>,
{
    fn from(err: T) -> Self {
        Self::new(err.into())
    }
}

/// Result type for Vitrine operations.
pub type VitrineResult<T> = std::result::Result<T, VitrineError>;
