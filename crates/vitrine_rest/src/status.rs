//! Mapping HTTP outcomes onto error kinds.
//!
//! Throttling (429), server errors (5xx) and transport failures are the only
//! outcomes classed as unavailable, which is what the retry layer keys on.

use reqwest::StatusCode;
use vitrine_error::{
    AuthError, AuthErrorKind, StoreError, StoreErrorKind, StoreOperation, UploadError,
    UploadErrorKind,
};

fn is_transient(status: StatusCode) -> bool {
    status == StatusCode::TOO_MANY_REQUESTS || status.is_server_error()
}

fn message(status: StatusCode, body: &str) -> String {
    if body.trim().is_empty() {
        status.to_string()
    } else {
        format!("{}: {}", status, body.trim())
    }
}

/// Error for a non-success row API response.
pub(crate) fn store_status_error(
    operation: StoreOperation,
    status: StatusCode,
    body: &str,
) -> StoreError {
    let kind = match status {
        StatusCode::NOT_FOUND => StoreErrorKind::NotFound(message(status, body)),
        StatusCode::CONFLICT => StoreErrorKind::Conflict(message(status, body)),
        s if is_transient(s) => StoreErrorKind::Unavailable {
            operation,
            message: message(status, body),
        },
        _ => StoreErrorKind::Rejected {
            operation,
            message: message(status, body),
        },
    };
    StoreError::new(kind)
}

/// Error for a row API request that never got a response.
pub(crate) fn store_transport_error(operation: StoreOperation, e: reqwest::Error) -> StoreError {
    StoreError::new(StoreErrorKind::Unavailable {
        operation,
        message: e.to_string(),
    })
}

/// Error for a non-success storage API response.
pub(crate) fn upload_status_error(name: &str, status: StatusCode, body: &str) -> UploadError {
    let kind = match status {
        StatusCode::CONFLICT => UploadErrorKind::AlreadyExists(name.to_string()),
        s if is_transient(s) => UploadErrorKind::Unavailable(message(status, body)),
        _ => UploadErrorKind::Rejected(message(status, body)),
    };
    UploadError::new(kind)
}

/// Error for a non-success auth API response.
///
/// `rejected` builds the kind for a definitive refusal.
pub(crate) fn auth_status_error(
    status: StatusCode,
    body: &str,
    rejected: fn(String) -> AuthErrorKind,
) -> AuthError {
    if is_transient(status) {
        AuthError::new(AuthErrorKind::Unavailable(message(status, body)))
    } else {
        AuthError::new(rejected(message(status, body)))
    }
}
