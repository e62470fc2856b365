//! Shared HTTP client carrying credentials.

use crate::RestConfig;
use reqwest::{Client, Method, RequestBuilder};
use tokio::sync::watch;
use vitrine_interface::Session;

/// HTTP client plus the credentials every request needs.
#[derive(Debug, Clone)]
pub(crate) struct RestClient {
    http: Client,
    config: RestConfig,
    session: Option<watch::Receiver<Option<Session>>>,
}

impl RestClient {
    pub(crate) fn new(config: RestConfig) -> Self {
        Self {
            http: Client::new(),
            config,
            session: None,
        }
    }

    pub(crate) fn with_session(mut self, session: watch::Receiver<Option<Session>>) -> Self {
        self.session = Some(session);
        self
    }

    pub(crate) fn config(&self) -> &RestConfig {
        &self.config
    }

    /// Session access token when signed in, anonymous key otherwise.
    pub(crate) fn bearer(&self) -> String {
        self.session
            .as_ref()
            .and_then(|rx| rx.borrow().as_ref().map(|s| s.access_token.clone()))
            .unwrap_or_else(|| self.config.anon_key().clone())
    }

    /// Request with the API key and bearer headers set.
    pub(crate) fn request(&self, method: Method, url: &str) -> RequestBuilder {
        self.request_as(method, url, &self.bearer())
    }

    /// Request authorized with an explicit bearer token.
    pub(crate) fn request_as(&self, method: Method, url: &str, bearer: &str) -> RequestBuilder {
        self.http
            .request(method, url)
            .header("apikey", self.config.anon_key())
            .header("Authorization", format!("Bearer {}", bearer))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vitrine_interface::User;

    fn session(token: &str) -> Session {
        Session {
            user: User {
                id: "u1".to_string(),
                email: None,
            },
            access_token: token.to_string(),
            refresh_token: "r".to_string(),
        }
    }

    #[test]
    fn test_bearer_follows_session() {
        let (tx, rx) = watch::channel(None);
        let client = RestClient::new(RestConfig::new("https://x", "anon")).with_session(rx);

        assert_eq!(client.bearer(), "anon");

        tx.send_replace(Some(session("signed-in")));
        assert_eq!(client.bearer(), "signed-in");

        tx.send_replace(None);
        assert_eq!(client.bearer(), "anon");
    }

    #[test]
    fn test_bearer_without_session_is_anon_key() {
        let client = RestClient::new(RestConfig::new("https://x", "anon"));
        assert_eq!(client.bearer(), "anon");
    }
}
