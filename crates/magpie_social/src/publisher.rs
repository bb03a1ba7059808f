//! Publisher trait and the no-op implementation.

use crate::PublishResult;
use async_trait::async_trait;
use tracing::debug;

/// Platform-specific post identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
#[display("{}", _0)]
pub struct PostId(pub String);

/// Trait for endpoints that accept a single validated text chunk.
///
/// The scheduler only needs one operation: hand over one chunk, get back a
/// post identifier or a [`PublishError`](crate::PublishError) describing why
/// the attempt failed.
#[async_trait]
pub trait Publisher: Send + Sync {
    /// Publish one text chunk.
    async fn publish(&self, text: &str) -> PublishResult<PostId>;

    /// Platform name for logging.
    fn platform_name(&self) -> &str;
}

/// Publisher that does nothing.
///
/// Used for dry runs and tests where the scheduling loop should execute
/// without reaching any network.
#[derive(Debug, Clone, Default)]
pub struct NoOpPublisher;

impl NoOpPublisher {
    /// Create a new no-op publisher.
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Publisher for NoOpPublisher {
    async fn publish(&self, text: &str) -> PublishResult<PostId> {
        debug!(
            text_chars = text.chars().count(),
            "NoOpPublisher: publish() called (no action taken)"
        );
        Ok(PostId("noop".to_string()))
    }

    fn platform_name(&self) -> &str {
        "noop"
    }
}
