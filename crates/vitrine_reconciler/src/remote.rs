//! Timeout and retry policy for remote calls.

use crate::ReconcilerConfig;
use std::future::Future;
use std::time::Duration;
use tokio_retry2::strategy::{ExponentialBackoff, jitter};
use tokio_retry2::{Retry, RetryError};
use vitrine_error::{RetryableError, TimeoutError, VitrineError, VitrineResult};

/// How remote calls are bounded and retried.
///
/// Every attempt gets the same timeout. Only calls marked idempotent are
/// retried, and only on transient failures.
#[derive(Debug, Clone)]
pub struct RemotePolicy {
    timeout: Duration,
    max_retries: usize,
    initial_backoff_ms: u64,
    max_backoff: Duration,
}

impl RemotePolicy {
    /// Policy derived from reconciler settings.
    pub fn from_config(config: &ReconcilerConfig) -> Self {
        Self {
            timeout: config.request_timeout(),
            max_retries: config.max_retries,
            initial_backoff_ms: config.initial_backoff_ms,
            max_backoff: config.max_backoff(),
        }
    }

    /// Per-attempt timeout.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    async fn attempt<T, Fut>(timeout: Duration, operation: &str, call: Fut) -> VitrineResult<T>
    where
        Fut: Future<Output = VitrineResult<T>>,
    {
        match tokio::time::timeout(timeout, call).await {
            Ok(result) => result,
            Err(_) => Err(TimeoutError::new(operation, timeout).into()),
        }
    }

    /// Run a non-idempotent call once under the timeout.
    #[tracing::instrument(skip(self, call))]
    pub async fn once<T, Fut>(&self, operation: &str, call: Fut) -> VitrineResult<T>
    where
        Fut: Future<Output = VitrineResult<T>>,
    {
        Self::attempt(self.timeout, operation, call).await
    }

    /// Run an idempotent call, retrying transient failures with backoff.
    #[tracing::instrument(skip(self, call))]
    pub async fn idempotent<T, F, Fut>(&self, operation: &str, mut call: F) -> VitrineResult<T>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = VitrineResult<T>>,
    {
        let strategy = ExponentialBackoff::from_millis(self.initial_backoff_ms)
            .factor(2)
            .max_delay(self.max_backoff)
            .map(jitter)
            .take(self.max_retries);
        let timeout = self.timeout;

        Retry::spawn(strategy, || {
            let pending = call();
            async move {
                match Self::attempt(timeout, operation, pending).await {
                    Ok(value) => Ok(value),
                    Err(e) if e.is_retryable() => {
                        tracing::warn!(operation, error = %e.message(), "Transient failure, will retry");
                        Err(RetryError::Transient {
                            err: e,
                            retry_after: None,
                        })
                    }
                    Err(e) => Err(RetryError::<VitrineError>::Permanent(e)),
                }
            }
        })
        .await
    }
}
