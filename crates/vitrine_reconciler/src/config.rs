//! Reconciler tuning knobs.

use serde::{Deserialize, Serialize};
use std::time::Duration;

fn default_request_timeout_ms() -> u64 {
    10_000
}

fn default_max_retries() -> usize {
    3
}

fn default_initial_backoff_ms() -> u64 {
    100
}

fn default_max_backoff_ms() -> u64 {
    2_000
}

fn default_queue_capacity() -> usize {
    32
}

/// Timeouts, retry, and persistence settings for a [`Reconciler`](crate::Reconciler).
///
/// # Example
///
/// ```
/// use vitrine_reconciler::ReconcilerConfig;
///
/// let config = ReconcilerConfig::default()
///     .with_request_timeout_ms(500u64)
///     .with_max_retries(0usize);
/// assert_eq!(config.request_timeout().as_millis(), 500);
/// assert!(!config.persist_unchanged);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, derive_setters::Setters)]
#[setters(prefix = "with_")]
pub struct ReconcilerConfig {
    /// Budget for a single remote attempt
    #[serde(default = "default_request_timeout_ms")]
    pub request_timeout_ms: u64,
    /// Retries after the first attempt for idempotent calls
    #[serde(default = "default_max_retries")]
    pub max_retries: usize,
    /// Base delay of the exponential backoff
    #[serde(default = "default_initial_backoff_ms")]
    pub initial_backoff_ms: u64,
    /// Cap on a single backoff delay
    #[serde(default = "default_max_backoff_ms")]
    pub max_backoff_ms: u64,
    /// Persist every position after a reorder, not only changed ones
    #[serde(default)]
    pub persist_unchanged: bool,
    /// Reorder batches that may wait in the write queue
    #[serde(default = "default_queue_capacity")]
    pub queue_capacity: usize,
}

impl Default for ReconcilerConfig {
    fn default() -> Self {
        Self {
            request_timeout_ms: default_request_timeout_ms(),
            max_retries: default_max_retries(),
            initial_backoff_ms: default_initial_backoff_ms(),
            max_backoff_ms: default_max_backoff_ms(),
            persist_unchanged: false,
            queue_capacity: default_queue_capacity(),
        }
    }
}

impl ReconcilerConfig {
    /// Per-attempt timeout.
    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }

    /// Longest single backoff delay.
    pub fn max_backoff(&self) -> Duration {
        Duration::from_millis(self.max_backoff_ms)
    }
}
