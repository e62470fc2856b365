//! Object store upload error types.

/// Kinds of upload errors.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum UploadErrorKind {
    /// The object store refused the blob
    #[display("Upload rejected: {}", _0)]
    Rejected(String),
    /// A different blob already exists under this name
    #[display("Object already exists: {}", _0)]
    AlreadyExists(String),
    /// Local filesystem failure
    #[display("Failed to write object: {}", _0)]
    Io(String),
    /// Object store unreachable or overloaded
    #[display("Object store unavailable: {}", _0)]
    Unavailable(String),
}

/// Upload error with location tracking.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Upload Error: {} at line {} in {}", kind, line, file)]
pub struct UploadError {
    /// The kind of error that occurred
    pub kind: UploadErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl UploadError {
    /// Create a new upload error with automatic location tracking.
    #[track_caller]
    pub fn new(kind: UploadErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
