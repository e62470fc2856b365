//! Remote call timeout error.

use std::time::Duration;

/// A remote call exceeded its time budget.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display(
    "Timeout Error: {} did not finish within {}ms at line {} in {}",
    operation,
    timeout_ms,
    line,
    file
)]
pub struct TimeoutError {
    /// Name of the remote operation
    pub operation: String,
    /// Budget that was exceeded, in milliseconds
    pub timeout_ms: u64,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl TimeoutError {
    /// Create a new timeout error with automatic location tracking.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::time::Duration;
    /// use vitrine_error::TimeoutError;
    ///
    /// let err = TimeoutError::new("update", Duration::from_secs(10));
    /// assert_eq!(err.timeout_ms, 10_000);
    /// ```
    #[track_caller]
    pub fn new(operation: impl Into<String>, timeout: Duration) -> Self {
        let location = std::panic::Location::caller();
        Self {
            operation: operation.into(),
            timeout_ms: u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX),
            line: location.line(),
            file: location.file(),
        }
    }
}
