//! Publishing boundary for Magpie.
//!
//! This crate holds the [`Publisher`] trait the scheduler posts through,
//! the error taxonomy a publish attempt can surface, and the Twitter client
//! that implements the trait over the v2 HTTP API.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod error;
mod publisher;
mod twitter;

pub use error::{ApiErrorDetail, PublishError, PublishErrorKind, PublishResult};
pub use publisher::{NoOpPublisher, PostId, Publisher};
pub use twitter::TwitterClient;
