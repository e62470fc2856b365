//! Transient failure classification.

use crate::{AuthError, AuthErrorKind, StoreError, TimeoutError, UploadError, UploadErrorKind};

/// Trait for errors that can be classified as retryable.
///
/// Only idempotent remote calls are ever retried; this trait answers whether
/// the failure itself is worth another attempt.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use vitrine_error::{RetryableError, StoreError, StoreErrorKind, StoreOperation, TimeoutError};
///
/// let timeout = TimeoutError::new("update", Duration::from_millis(5));
/// assert!(timeout.is_retryable());
///
/// let busy = StoreError::new(StoreErrorKind::Unavailable {
///     operation: StoreOperation::Update,
///     message: "503".to_string(),
/// });
/// assert!(busy.is_retryable());
///
/// let conflict = StoreError::new(StoreErrorKind::Conflict("hello".to_string()));
/// assert!(!conflict.is_retryable());
/// ```
pub trait RetryableError {
    /// Returns true if this error should trigger a retry.
    fn is_retryable(&self) -> bool;
}

impl RetryableError for StoreError {
    fn is_retryable(&self) -> bool {
        self.kind.is_retryable()
    }
}

impl RetryableError for UploadError {
    fn is_retryable(&self) -> bool {
        matches!(self.kind, UploadErrorKind::Unavailable(_))
    }
}

impl RetryableError for AuthError {
    fn is_retryable(&self) -> bool {
        matches!(self.kind, AuthErrorKind::Unavailable(_))
    }
}

impl RetryableError for TimeoutError {
    fn is_retryable(&self) -> bool {
        true
    }
}
