//! Magpie posts lines from a fixed text corpus to Twitter on a jittered
//! schedule.
//!
//! The library half of the binary crate wires the domain core to the
//! publishing boundary:
//! - **Config**: TOML file with env overrides for the listen port
//! - **PostScheduler**: the select/publish/sleep control loop
//! - **HTTP surface**: liveness probe, metrics, optional corpus reload

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod api;
mod config;
mod metrics;
mod scheduler;

pub use api::{ApiState, create_router};
pub use config::{BotConfig, CorpusConfig, PostingConfig, ServerConfig};
pub use metrics::{BotMetrics, MetricsSnapshot};
pub use scheduler::PostScheduler;
