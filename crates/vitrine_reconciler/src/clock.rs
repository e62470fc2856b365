//! Millisecond timestamps that never repeat.

use std::sync::atomic::{AtomicI64, Ordering};

/// Wall-clock milliseconds, bumped forward when two reads land in the same
/// millisecond so every value handed out is strictly greater than the last.
///
/// # Example
///
/// ```
/// use vitrine_reconciler::CreationClock;
///
/// let clock = CreationClock::new();
/// let first = clock.next_millis();
/// let second = clock.next_millis();
/// assert!(second > first);
/// ```
#[derive(Debug, Default)]
pub struct CreationClock {
    last: AtomicI64,
}

impl CreationClock {
    /// Create a new clock.
    pub fn new() -> Self {
        Self::default()
    }

    /// Next unique timestamp in Unix milliseconds.
    pub fn next_millis(&self) -> i64 {
        let now = chrono::Utc::now().timestamp_millis();
        let previous = self
            .last
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |last| {
                Some(now.max(last + 1))
            })
            .unwrap_or(now);
        now.max(previous + 1)
    }
}
