//! Twitter v2 API integration.

mod client;
mod json_models;

pub use client::TwitterClient;
