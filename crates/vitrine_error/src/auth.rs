//! Authentication error types.

/// Kinds of authentication errors.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum AuthErrorKind {
    /// The provider refused to send a login link
    #[display("Login link request failed: {}", _0)]
    LoginRequest(String),
    /// An admin action was attempted without a session
    #[display("Please sign in first")]
    NotSignedIn,
    /// Magic-link callback did not carry usable tokens
    #[display("Invalid login link: {}", _0)]
    InvalidCallback(String),
    /// Tokens were rejected when establishing a session
    #[display("Session could not be established: {}", _0)]
    Session(String),
    /// Provider unreachable or overloaded
    #[display("Authentication service unavailable: {}", _0)]
    Unavailable(String),
}

/// Authentication error with location tracking.
///
/// # Examples
///
/// ```
/// use vitrine_error::{AuthError, AuthErrorKind};
///
/// let err = AuthError::new(AuthErrorKind::NotSignedIn);
/// assert_eq!(err.kind.to_string(), "Please sign in first");
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Auth Error: {} at line {} in {}", kind, line, file)]
pub struct AuthError {
    /// The kind of error that occurred
    pub kind: AuthErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl AuthError {
    /// Create a new authentication error with automatic location tracking.
    #[track_caller]
    pub fn new(kind: AuthErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
