//! Serde models for the Twitter v2 post-tweet endpoint.

use crate::ApiErrorDetail;
use serde::{Deserialize, Serialize};

/// Request body for `POST /2/tweets`.
#[derive(Debug, Clone, Serialize)]
pub struct TweetRequest<'a> {
    /// Text of the tweet.
    pub text: &'a str,
}

/// Successful response envelope.
#[derive(Debug, Clone, Deserialize)]
pub struct TweetResponse {
    /// The created tweet.
    pub data: TweetData,
}

/// Created-tweet payload.
#[derive(Debug, Clone, Deserialize)]
pub struct TweetData {
    /// Platform-assigned tweet ID.
    pub id: String,
    /// Text as the platform recorded it.
    pub text: String,
}

/// Error response envelope.
///
/// The API reports failures either as an `errors` array with per-entry code
/// and message, or as a single `title`/`detail` pair. Both shapes collapse
/// into a list of [`ApiErrorDetail`].
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApiErrorBody {
    /// Per-entry error list, when present.
    #[serde(default)]
    pub errors: Vec<ApiErrorDetail>,
    /// Short error title, when present.
    #[serde(default)]
    pub title: Option<String>,
    /// Longer error description, when present.
    #[serde(default)]
    pub detail: Option<String>,
}

impl ApiErrorBody {
    /// Collapse the body into a non-empty error list where possible.
    pub fn into_details(self) -> Vec<ApiErrorDetail> {
        if !self.errors.is_empty() {
            return self.errors;
        }

        match (self.title, self.detail) {
            (Some(title), Some(detail)) => vec![ApiErrorDetail {
                code: None,
                message: format!("{title}: {detail}"),
            }],
            (Some(message), None) | (None, Some(message)) => {
                vec![ApiErrorDetail { code: None, message }]
            }
            (None, None) => Vec::new(),
        }
    }
}
