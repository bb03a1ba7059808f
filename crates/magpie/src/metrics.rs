//! Metrics collection for the posting loop.

use serde::Serialize;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;

/// Metrics collector shared by the scheduler and the HTTP surface.
#[derive(Debug, Clone, Default)]
pub struct BotMetrics {
    inner: Arc<BotMetricsInner>,
}

#[derive(Debug, Default)]
struct BotMetricsInner {
    selections: AtomicU64,
    selection_failures: AtomicU64,
    posts: AtomicU64,
    publish_failures: AtomicU64,
    last_post: parking_lot::Mutex<Option<Instant>>,
}

impl BotMetrics {
    /// Creates a new metrics collector.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a selection attempt (one scheduler iteration).
    pub fn record_selection(&self) {
        self.inner.selections.fetch_add(1, Ordering::Relaxed);
    }

    /// Records a failed selection (empty corpus or exhausted sampling).
    pub fn record_selection_failure(&self) {
        self.inner.selection_failures.fetch_add(1, Ordering::Relaxed);
    }

    /// Records a successful post.
    pub fn record_post(&self) {
        self.inner.posts.fetch_add(1, Ordering::Relaxed);
        *self.inner.last_post.lock() = Some(Instant::now());
    }

    /// Records a failed publish attempt.
    pub fn record_publish_failure(&self) {
        self.inner.publish_failures.fetch_add(1, Ordering::Relaxed);
    }

    /// Gets the selection-attempt count.
    pub fn selections(&self) -> u64 {
        self.inner.selections.load(Ordering::Relaxed)
    }

    /// Gets the failed-selection count.
    pub fn selection_failures(&self) -> u64 {
        self.inner.selection_failures.load(Ordering::Relaxed)
    }

    /// Gets the successful-post count.
    pub fn posts(&self) -> u64 {
        self.inner.posts.load(Ordering::Relaxed)
    }

    /// Gets the failed-publish count.
    pub fn publish_failures(&self) -> u64 {
        self.inner.publish_failures.load(Ordering::Relaxed)
    }

    /// Gets the time since the last successful post.
    pub fn time_since_last_post(&self) -> Option<std::time::Duration> {
        self.inner.last_post.lock().map(|instant| instant.elapsed())
    }

    /// Creates a serializable snapshot of current metrics.
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            selections: self.selections(),
            selection_failures: self.selection_failures(),
            posts: self.posts(),
            publish_failures: self.publish_failures(),
            seconds_since_last_post: self.time_since_last_post().map(|d| d.as_secs()),
        }
    }
}

/// Serializable snapshot of posting-loop metrics.
#[derive(Debug, Clone, Serialize)]
pub struct MetricsSnapshot {
    /// Scheduler iterations that attempted a selection.
    pub selections: u64,
    /// Iterations where no entry could be selected.
    pub selection_failures: u64,
    /// Successful posts.
    pub posts: u64,
    /// Failed publish attempts.
    pub publish_failures: u64,
    /// Seconds since the last successful post.
    pub seconds_since_last_post: Option<u64>,
}
