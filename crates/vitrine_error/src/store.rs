//! Remote item store error types.

/// Store operation that produced an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum StoreOperation {
    /// Inserting a new record
    #[display("create")]
    Create,
    /// Patching an existing record
    #[display("update")]
    Update,
    /// Hard-deleting a record
    #[display("delete")]
    Delete,
    /// Listing records for a partition
    #[display("list")]
    List,
}

/// Kinds of item store errors.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum StoreErrorKind {
    /// The store refused the write or query
    #[display("Store rejected {}: {}", operation, message)]
    Rejected {
        /// Operation that was rejected
        operation: StoreOperation,
        /// Message returned by the store
        message: String,
    },
    /// No record with the given id
    #[display("Item not found: {}", _0)]
    NotFound(String),
    /// Slug already used within the site
    #[display("Slug conflict: {}", _0)]
    Conflict(String),
    /// The store could not be reached or is overloaded
    #[display("Store unavailable during {}: {}", operation, message)]
    Unavailable {
        /// Operation in flight
        operation: StoreOperation,
        /// Transport or server message
        message: String,
    },
    /// Response body could not be decoded
    #[display("Failed to decode store response: {}", _0)]
    Decode(String),
    /// The background write queue has shut down
    #[display("Write queue closed for site '{}'", _0)]
    QueueClosed(String),
}

impl StoreErrorKind {
    /// Check whether retrying the same call may succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Unavailable { .. })
    }
}

/// Item store error with location tracking.
///
/// # Examples
///
/// ```
/// use vitrine_error::{StoreError, StoreErrorKind};
///
/// let err = StoreError::new(StoreErrorKind::NotFound("42".to_string()));
/// assert!(format!("{}", err).contains("not found"));
/// assert!(!err.kind.is_retryable());
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Store Error: {} at line {} in {}", kind, line, file)]
pub struct StoreError {
    /// The kind of error that occurred
    pub kind: StoreErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl StoreError {
    /// Create a new store error with automatic location tracking.
    #[track_caller]
    pub fn new(kind: StoreErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
