//! Session types shared by authenticators.

use serde::{Deserialize, Serialize};
use vitrine_error::{AuthError, AuthErrorKind, VitrineResult};

/// Signed-in account.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct User {
    /// Provider user id
    pub id: String,
    /// Email the login link was sent to
    #[serde(default)]
    pub email: Option<String>,
}

/// Token pair carried by a login link.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionTokens {
    /// Bearer token for API calls
    pub access_token: String,
    /// Token used to renew the session
    pub refresh_token: String,
}

impl SessionTokens {
    /// Parse the fragment of a login-link redirect.
    ///
    /// Accepts the fragment with or without its leading `#`.
    ///
    /// # Examples
    ///
    /// ```
    /// use vitrine_interface::SessionTokens;
    ///
    /// let tokens = SessionTokens::from_fragment(
    ///     "#access_token=abc&expires_in=3600&refresh_token=def&token_type=bearer",
    /// )
    /// .unwrap();
    /// assert_eq!(tokens.access_token, "abc");
    /// assert_eq!(tokens.refresh_token, "def");
    ///
    /// assert!(SessionTokens::from_fragment("#error=access_denied").is_err());
    /// ```
    pub fn from_fragment(fragment: &str) -> VitrineResult<Self> {
        let mut access_token = None;
        let mut refresh_token = None;

        for pair in fragment.trim_start_matches('#').split('&') {
            match pair.split_once('=') {
                Some(("access_token", value)) if !value.is_empty() => {
                    access_token = Some(value.to_string());
                }
                Some(("refresh_token", value)) if !value.is_empty() => {
                    refresh_token = Some(value.to_string());
                }
                _ => {}
            }
        }

        match (access_token, refresh_token) {
            (Some(access_token), Some(refresh_token)) => Ok(Self {
                access_token,
                refresh_token,
            }),
            (None, _) => Err(AuthError::new(AuthErrorKind::InvalidCallback(
                "missing access_token".to_string(),
            ))
            .into()),
            (_, None) => Err(AuthError::new(AuthErrorKind::InvalidCallback(
                "missing refresh_token".to_string(),
            ))
            .into()),
        }
    }
}

/// An authenticated admin session.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Session {
    /// Signed-in account
    pub user: User,
    /// Bearer token for API calls
    pub access_token: String,
    /// Token used to renew the session
    pub refresh_token: String,
}
