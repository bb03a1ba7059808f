//! Publish-side error types.
//!
//! The scheduler treats every publish failure the same way for control flow
//! (log and continue), but the kinds stay distinct so the failure report
//! preserves what actually went wrong: a rate limit with its reset time, a
//! rejection with the API's machine-readable error list, or a transport
//! problem.

use chrono::{DateTime, Utc};
use derive_getters::Getters;
use serde::Deserialize;

/// Result type for publish operations.
pub type PublishResult<T> = Result<T, PublishError>;

/// One machine-readable error entry returned by the publish API.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ApiErrorDetail {
    /// Numeric error code, when the API supplies one.
    #[serde(default)]
    pub code: Option<i64>,
    /// Human-readable error message.
    pub message: String,
}

impl std::fmt::Display for ApiErrorDetail {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.code {
            Some(code) => write!(f, "code {}: {}", code, self.message),
            None => write!(f, "{}", self.message),
        }
    }
}

/// Publish error variants.
#[derive(Debug, Clone, PartialEq, derive_more::Display)]
pub enum PublishErrorKind {
    /// The platform rate-limited the request; carries the reset time.
    #[display("Rate limited, reset at {reset}")]
    RateLimited {
        /// When the rate-limit window resets.
        reset: DateTime<Utc>,
    },

    /// The API rejected the post with one or more error entries.
    #[display("Post rejected by API ({} error(s))", _0.len())]
    Rejected(Vec<ApiErrorDetail>),

    /// Credentials missing, invalid, or expired.
    #[display("Authentication failed: {_0}")]
    Auth(String),

    /// The post failed local validation before any request was made.
    #[display("Invalid post: {_0}")]
    InvalidPost(String),

    /// Network or protocol failure, or anything else the request hit.
    #[display("Transport error: {_0}")]
    Transport(String),
}

/// Publish error with source location tracking.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error, Getters)]
#[display("Publish error: {} at line {} in {}", kind, line, file)]
pub struct PublishError {
    kind: PublishErrorKind,
    line: u32,
    file: &'static str,
}

impl PublishError {
    /// Create a new error with automatic location tracking.
    #[track_caller]
    pub fn new(kind: PublishErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}

impl From<reqwest::Error> for PublishError {
    #[track_caller]
    fn from(err: reqwest::Error) -> Self {
        PublishError::new(PublishErrorKind::Transport(err.to_string()))
    }
}
