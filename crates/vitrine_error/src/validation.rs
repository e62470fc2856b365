//! Validation error types.
//!
//! Validation failures are raised before any remote call is made.

/// Kinds of validation failures.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum ValidationErrorKind {
    /// A required field was empty
    #[display("Missing required field: {}", _0)]
    MissingField(String),
    /// A list position was outside the current sequence
    #[display("Position {} is out of range for a list of {} items", index, len)]
    IndexOutOfRange {
        /// Offending position
        index: usize,
        /// Length of the sequence at the time of the call
        len: usize,
    },
    /// Email address is not usable for a login link
    #[display("Invalid email address: '{}'", _0)]
    InvalidEmail(String),
    /// Object name would escape the storage root or is empty
    #[display("Invalid object name: '{}'", _0)]
    InvalidObjectName(String),
}

/// Validation error with location tracking.
///
/// # Examples
///
/// ```
/// use vitrine_error::{ValidationError, ValidationErrorKind};
///
/// let err = ValidationError::new(ValidationErrorKind::IndexOutOfRange { index: 4, len: 3 });
/// assert!(format!("{}", err).contains("out of range"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Validation Error: {} at line {} in {}", kind, line, file)]
pub struct ValidationError {
    /// The kind of error that occurred
    pub kind: ValidationErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl ValidationError {
    /// Create a new validation error with automatic location tracking.
    #[track_caller]
    pub fn new(kind: ValidationErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
