//! In-process magic-link authenticator.
//!
//! Instead of emailing a link, [`InMemoryAuthenticator`] keeps the most recent
//! link per address so a caller (or a test) can redeem it.

use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use tokio::sync::{Mutex, watch};
use uuid::Uuid;
use vitrine_error::{AuthError, AuthErrorKind, VitrineResult};
use vitrine_interface::{Authenticator, Session, SessionTokens, User};

#[derive(Debug, Clone)]
struct IssuedLink {
    user: User,
    tokens: SessionTokens,
}

/// Authenticator that issues and redeems login links in memory.
#[derive(Debug)]
pub struct InMemoryAuthenticator {
    /// Latest unredeemed link per email
    links: Mutex<HashMap<String, IssuedLink>>,
    /// Stable user id per email
    users: Mutex<HashMap<String, String>>,
    /// Addresses allowed to sign in, `None` allows everyone
    allowed: Option<HashSet<String>>,
    session: watch::Sender<Option<Session>>,
}

impl Default for InMemoryAuthenticator {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryAuthenticator {
    /// Authenticator that accepts any address.
    pub fn new() -> Self {
        let (session, _) = watch::channel(None);
        Self {
            links: Mutex::new(HashMap::new()),
            users: Mutex::new(HashMap::new()),
            allowed: None,
            session,
        }
    }

    /// Authenticator that only issues links to the given addresses.
    pub fn with_allowed<I, S>(emails: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            allowed: Some(emails.into_iter().map(Into::into).collect()),
            ..Self::new()
        }
    }

    /// Redirect fragment of the latest unredeemed link sent to `email`.
    pub async fn magic_link_fragment(&self, email: &str) -> Option<String> {
        self.links.lock().await.get(email).map(|link| {
            format!(
                "#access_token={}&expires_in=3600&refresh_token={}&token_type=bearer&type=magiclink",
                link.tokens.access_token, link.tokens.refresh_token
            )
        })
    }
}

#[async_trait]
impl Authenticator for InMemoryAuthenticator {
    #[tracing::instrument(skip(self))]
    async fn request_passwordless_login(&self, email: &str) -> VitrineResult<()> {
        if let Some(allowed) = &self.allowed {
            if !allowed.contains(email) {
                return Err(AuthError::new(AuthErrorKind::LoginRequest(format!(
                    "signups not allowed for {}",
                    email
                )))
                .into());
            }
        }

        let user_id = self
            .users
            .lock()
            .await
            .entry(email.to_string())
            .or_insert_with(|| Uuid::new_v4().to_string())
            .clone();

        let link = IssuedLink {
            user: User {
                id: user_id,
                email: Some(email.to_string()),
            },
            tokens: SessionTokens {
                access_token: Uuid::new_v4().simple().to_string(),
                refresh_token: Uuid::new_v4().simple().to_string(),
            },
        };
        self.links.lock().await.insert(email.to_string(), link);

        tracing::info!(email, "Issued login link");
        Ok(())
    }

    async fn establish_session(&self, tokens: &SessionTokens) -> VitrineResult<Session> {
        let mut links = self.links.lock().await;
        let email = links
            .iter()
            .find(|(_, link)| &link.tokens == tokens)
            .map(|(email, _)| email.clone())
            .ok_or_else(|| {
                AuthError::new(AuthErrorKind::Session(
                    "login link is unknown or already used".to_string(),
                ))
            })?;

        let link = links.remove(&email).ok_or_else(|| {
            AuthError::new(AuthErrorKind::Session(
                "login link is unknown or already used".to_string(),
            ))
        })?;

        let session = Session {
            user: link.user,
            access_token: link.tokens.access_token,
            refresh_token: link.tokens.refresh_token,
        };
        self.session.send_replace(Some(session.clone()));

        tracing::info!(email = %email, "Session established");
        Ok(session)
    }

    fn current_session(&self) -> Option<Session> {
        self.session.borrow().clone()
    }

    fn session_changes(&self) -> watch::Receiver<Option<Session>> {
        self.session.subscribe()
    }

    async fn sign_out(&self) -> VitrineResult<()> {
        self.session.send_replace(None);
        tracing::info!("Signed out");
        Ok(())
    }
}
