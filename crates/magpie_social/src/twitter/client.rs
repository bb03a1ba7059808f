//! Twitter client setup and posting.
//!
//! A thin binding over `POST /2/tweets` with bearer-token authentication.
//! The client validates the chunk length locally, sends the request, and
//! maps the response onto the publish error taxonomy: HTTP 429 becomes a
//! rate-limit error carrying the reset time, other failure statuses carry
//! the API's error list, and everything else surfaces as transport trouble.

use super::json_models::{ApiErrorBody, TweetRequest, TweetResponse};
use crate::{PostId, PublishError, PublishErrorKind, Publisher, PublishResult};
use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use reqwest::StatusCode;
use tracing::{debug, info, instrument};

/// Default API host for the post-tweet call.
const DEFAULT_API_BASE: &str = "https://api.twitter.com";

/// Environment variable holding the OAuth 2.0 bearer token.
const TOKEN_ENV: &str = "TWITTER_BEARER_TOKEN";

/// Rate-limit reset header, Unix seconds.
const RATE_LIMIT_RESET_HEADER: &str = "x-rate-limit-reset";

/// Twitter publishing client.
#[derive(Debug)]
pub struct TwitterClient {
    http: reqwest::Client,
    token: String,
    api_base: String,
    max_post_chars: usize,
}

impl TwitterClient {
    /// Create a client with an explicit bearer token.
    ///
    /// # Errors
    ///
    /// Returns an `Auth` error if the token is empty.
    pub fn new(token: impl Into<String>) -> PublishResult<Self> {
        let token = token.into();
        if token.is_empty() {
            return Err(PublishError::new(PublishErrorKind::Auth(
                "bearer token cannot be empty".to_string(),
            )));
        }

        Ok(Self {
            http: reqwest::Client::new(),
            token,
            api_base: DEFAULT_API_BASE.to_string(),
            max_post_chars: 140,
        })
    }

    /// Create a client from the `TWITTER_BEARER_TOKEN` environment variable.
    ///
    /// # Errors
    ///
    /// Returns an `Auth` error if the variable is unset or empty.
    #[instrument]
    pub fn from_env() -> PublishResult<Self> {
        let token = std::env::var(TOKEN_ENV).map_err(|_| {
            PublishError::new(PublishErrorKind::Auth(format!("{TOKEN_ENV} is not set")))
        })?;
        let client = Self::new(token)?;
        debug!("Created Twitter client from environment");
        Ok(client)
    }

    /// Override the API base URL.
    pub fn with_api_base(mut self, base: impl Into<String>) -> Self {
        self.api_base = base.into();
        self
    }

    /// Override the per-post character ceiling.
    pub fn with_max_post_chars(mut self, limit: usize) -> Self {
        self.max_post_chars = limit;
        self
    }

    /// Configured per-post character ceiling.
    pub fn max_post_chars(&self) -> usize {
        self.max_post_chars
    }

    fn validate(&self, text: &str) -> PublishResult<()> {
        if text.trim().is_empty() {
            return Err(PublishError::new(PublishErrorKind::InvalidPost(
                "post text cannot be empty".to_string(),
            )));
        }

        let chars = text.chars().count();
        if chars > self.max_post_chars {
            return Err(PublishError::new(PublishErrorKind::InvalidPost(format!(
                "text exceeds limit of {} characters ({})",
                self.max_post_chars, chars
            ))));
        }

        Ok(())
    }

    async fn failure_from_response(response: reqwest::Response) -> PublishError {
        let status = response.status();

        if status == StatusCode::TOO_MANY_REQUESTS {
            let reset = response
                .headers()
                .get(RATE_LIMIT_RESET_HEADER)
                .and_then(|value| value.to_str().ok())
                .and_then(parse_reset_header)
                .unwrap_or_else(Utc::now);
            return PublishError::new(PublishErrorKind::RateLimited { reset });
        }

        let body: ApiErrorBody = response.json().await.unwrap_or_default();
        let details = body.into_details();

        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            let message = details
                .first()
                .map(ToString::to_string)
                .unwrap_or_else(|| format!("HTTP {status}"));
            return PublishError::new(PublishErrorKind::Auth(message));
        }

        if details.is_empty() {
            return PublishError::new(PublishErrorKind::Transport(format!("HTTP {status}")));
        }

        PublishError::new(PublishErrorKind::Rejected(details))
    }
}

#[async_trait]
impl Publisher for TwitterClient {
    #[instrument(skip(self, text), fields(text_chars = text.chars().count()))]
    async fn publish(&self, text: &str) -> PublishResult<PostId> {
        self.validate(text)?;

        debug!("Posting status update");
        let url = format!("{}/2/tweets", self.api_base);
        let response = self
            .http
            .post(&url)
            .bearer_auth(&self.token)
            .json(&TweetRequest { text })
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Self::failure_from_response(response).await);
        }

        let parsed: TweetResponse = response.json().await.map_err(|e| {
            PublishError::new(PublishErrorKind::Transport(format!(
                "problem parsing response: {e}"
            )))
        })?;

        info!(post_id = %parsed.data.id, "Status posted");
        Ok(PostId(parsed.data.id))
    }

    fn platform_name(&self) -> &str {
        "twitter"
    }
}

/// Timestamp of the rate-limit reset carried by a 429 response, if the
/// header is present and well-formed.
fn parse_reset_header(value: &str) -> Option<DateTime<Utc>> {
    value
        .parse::<i64>()
        .ok()
        .and_then(|secs| Utc.timestamp_opt(secs, 0).single())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_token_is_rejected() {
        let err = TwitterClient::new("").expect_err("empty token");
        assert!(matches!(err.kind(), PublishErrorKind::Auth(_)));
    }

    #[test]
    fn platform_name_is_twitter() {
        let client = TwitterClient::new("token").unwrap();
        assert_eq!(client.platform_name(), "twitter");
        assert_eq!(client.max_post_chars(), 140);
    }

    #[tokio::test]
    async fn oversized_text_fails_before_any_request() {
        let client = TwitterClient::new("token")
            .unwrap()
            .with_max_post_chars(10)
            .with_api_base("http://127.0.0.1:1");

        let err = client.publish("this is well over ten characters").await;
        assert!(matches!(
            err.unwrap_err().kind(),
            PublishErrorKind::InvalidPost(_)
        ));
    }

    #[tokio::test]
    async fn empty_text_fails_before_any_request() {
        let client = TwitterClient::new("token")
            .unwrap()
            .with_api_base("http://127.0.0.1:1");

        let err = client.publish("   ").await;
        assert!(matches!(
            err.unwrap_err().kind(),
            PublishErrorKind::InvalidPost(_)
        ));
    }

    #[test]
    fn reset_header_parses_unix_seconds() {
        let reset = parse_reset_header("1633027200").expect("valid header");
        assert_eq!(reset.timestamp(), 1_633_027_200);
        assert!(parse_reset_header("not a number").is_none());
    }
}
