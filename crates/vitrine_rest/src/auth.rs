//! Auth API implementation of Authenticator.

use crate::client::RestClient;
use crate::status::auth_status_error;
use crate::RestConfig;
use async_trait::async_trait;
use reqwest::Method;
use serde::Serialize;
use tokio::sync::watch;
use tracing::instrument;
use vitrine_error::{AuthError, AuthErrorKind, VitrineResult};
use vitrine_interface::{Authenticator, Session, SessionTokens, User};

#[derive(Debug, Serialize)]
struct OtpRequest<'a> {
    email: &'a str,
    create_user: bool,
}

/// Magic-link authenticator backed by the hosted auth API.
#[derive(Debug)]
pub struct RestAuthenticator {
    client: RestClient,
    session: watch::Sender<Option<Session>>,
}

impl RestAuthenticator {
    /// Authenticator with no session.
    pub fn new(config: RestConfig) -> Self {
        let (session, _) = watch::channel(None);
        Self {
            client: RestClient::new(config),
            session,
        }
    }
}

#[async_trait]
impl Authenticator for RestAuthenticator {
    #[instrument(skip(self))]
    async fn request_passwordless_login(&self, email: &str) -> VitrineResult<()> {
        let mut request = self
            .client
            .request_as(
                Method::POST,
                &self.client.config().auth_url("otp"),
                self.client.config().anon_key(),
            )
            .json(&OtpRequest {
                email,
                create_user: true,
            });
        if let Some(redirect) = self.client.config().redirect_url() {
            request = request.query(&[("redirect_to", redirect)]);
        }

        let response = request
            .send()
            .await
            .map_err(|e| AuthError::new(AuthErrorKind::Unavailable(e.to_string())))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::warn!(%status, body = %body, "Login link request failed");
            return Err(auth_status_error(status, &body, AuthErrorKind::LoginRequest).into());
        }

        tracing::info!("Login link requested");
        Ok(())
    }

    #[instrument(skip(self, tokens))]
    async fn establish_session(&self, tokens: &SessionTokens) -> VitrineResult<Session> {
        let response = self
            .client
            .request_as(
                Method::GET,
                &self.client.config().auth_url("user"),
                &tokens.access_token,
            )
            .send()
            .await
            .map_err(|e| AuthError::new(AuthErrorKind::Unavailable(e.to_string())))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::warn!(%status, "Session token was not accepted");
            return Err(auth_status_error(status, &body, AuthErrorKind::Session).into());
        }

        let user: User = response
            .json()
            .await
            .map_err(|e| AuthError::new(AuthErrorKind::Session(e.to_string())))?;

        let session = Session {
            user,
            access_token: tokens.access_token.clone(),
            refresh_token: tokens.refresh_token.clone(),
        };
        self.session.send_replace(Some(session.clone()));

        tracing::info!(user = %session.user.id, "Session established");
        Ok(session)
    }

    fn current_session(&self) -> Option<Session> {
        self.session.borrow().clone()
    }

    fn session_changes(&self) -> watch::Receiver<Option<Session>> {
        self.session.subscribe()
    }

    #[instrument(skip(self))]
    async fn sign_out(&self) -> VitrineResult<()> {
        let Some(session) = self.session.send_replace(None) else {
            return Ok(());
        };

        let response = self
            .client
            .request_as(
                Method::POST,
                &self.client.config().auth_url("logout"),
                &session.access_token,
            )
            .send()
            .await
            .map_err(|e| AuthError::new(AuthErrorKind::Unavailable(e.to_string())))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            // Local session is already cleared
            tracing::warn!(%status, body = %body, "Remote sign-out failed");
            return Err(auth_status_error(status, &body, AuthErrorKind::Session).into());
        }

        tracing::info!("Signed out");
        Ok(())
    }
}
