//! Connection settings for the hosted backend.

use serde::{Deserialize, Serialize};

fn default_table() -> String {
    "items".to_string()
}

fn default_bucket() -> String {
    "media".to_string()
}

/// Hosted backend connection settings.
#[derive(
    Debug,
    Clone,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    derive_getters::Getters,
    derive_setters::Setters,
)]
#[setters(into, prefix = "with_")]
pub struct RestConfig {
    /// Project base URL (e.g., "https://abc.supabase.co")
    url: String,
    /// Anonymous (public) API key
    anon_key: String,
    /// Row table holding items
    #[serde(default = "default_table")]
    table: String,
    /// Bucket receiving uploads
    #[serde(default = "default_bucket")]
    bucket: String,
    /// Where login links send the browser back to
    #[serde(default)]
    #[setters(strip_option)]
    redirect_url: Option<String>,
}

impl RestConfig {
    /// Settings with the default table and bucket.
    pub fn new(url: impl Into<String>, anon_key: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            anon_key: anon_key.into(),
            table: default_table(),
            bucket: default_bucket(),
            redirect_url: None,
        }
    }

    fn base(&self) -> &str {
        self.url.trim_end_matches('/')
    }

    /// Row endpoint for the item table.
    pub fn rows_url(&self) -> String {
        format!("{}/rest/v1/{}", self.base(), self.table)
    }

    /// Upload endpoint for one object.
    pub fn object_url(&self, name: &str) -> String {
        format!("{}/storage/v1/object/{}/{}", self.base(), self.bucket, name)
    }

    /// Public URL for one object.
    pub fn public_object_url(&self, name: &str) -> String {
        format!(
            "{}/storage/v1/object/public/{}/{}",
            self.base(),
            self.bucket,
            name
        )
    }

    /// Auth endpoint under `/auth/v1`.
    pub fn auth_url(&self, path: &str) -> String {
        format!("{}/auth/v1/{}", self.base(), path.trim_start_matches('/'))
    }
}
