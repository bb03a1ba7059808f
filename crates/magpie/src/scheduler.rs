//! The posting scheduler loop.

use crate::config::PostingConfig;
use crate::metrics::BotMetrics;
use magpie_core::{CorpusHandle, select_entry};
use magpie_error::MagpieErrorKind;
use magpie_social::{PublishErrorKind, Publisher};
use rand::Rng;
use rand::rngs::StdRng;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::sleep;
use tracing::{debug, error, info, instrument, warn};

/// Long-running loop that selects a publishable corpus entry, submits it to
/// the publisher, and sleeps a randomized interval before repeating.
///
/// Iterations are strictly sequential; the loop suspends only at the delay
/// step. Individual failures (an exhausted selection, a rejected or
/// rate-limited publish) are logged and never halt the loop. The random
/// source is owned by the scheduler, seeded once at startup, and drives both
/// selection and delay jitter.
pub struct PostScheduler<P: Publisher> {
    config: PostingConfig,
    corpus: CorpusHandle,
    publisher: Arc<P>,
    rng: StdRng,
    metrics: BotMetrics,
}

impl<P: Publisher> PostScheduler<P> {
    /// Creates a new scheduler.
    pub fn new(
        config: PostingConfig,
        corpus: CorpusHandle,
        publisher: Arc<P>,
        rng: StdRng,
        metrics: BotMetrics,
    ) -> Self {
        Self {
            config,
            corpus,
            publisher,
            rng,
            metrics,
        }
    }

    /// Runs the loop forever; terminates only with the process.
    #[instrument(skip(self), fields(platform = self.publisher.platform_name()))]
    pub async fn run(mut self) {
        info!("Post scheduler started");

        loop {
            self.step().await;

            let delay = self.next_delay();
            info!(delay_secs = delay.as_secs(), "Next post scheduled");
            sleep(delay).await;
        }
    }

    /// One selection-and-publish iteration.
    ///
    /// Failures are recorded and logged, never propagated; the caller always
    /// proceeds to the delay step.
    pub async fn step(&mut self) {
        let corpus = self.corpus.snapshot().await;
        self.metrics.record_selection();

        let ceiling = self.config.max_post_chars;
        let entry = match select_entry(
            &corpus,
            |entry| entry.chars().count() <= ceiling,
            &mut self.rng,
            self.config.max_select_attempts,
        ) {
            Ok(entry) => entry,
            Err(e) => {
                self.metrics.record_selection_failure();
                match e.kind() {
                    MagpieErrorKind::EmptyCorpus => {
                        error!("Corpus is empty, skipping this iteration");
                    }
                    MagpieErrorKind::SelectionExhausted { attempts } => {
                        warn!(
                            attempts,
                            ceiling, "No corpus entry fits the publish ceiling, skipping this iteration"
                        );
                    }
                    _ => error!(error = %e, "Selection failed"),
                }
                return;
            }
        };

        debug!(text_chars = entry.chars().count(), "Selected corpus entry");

        match self.publisher.publish(entry).await {
            Ok(post_id) => {
                self.metrics.record_post();
                info!(%post_id, "Posted");
            }
            Err(e) => {
                self.metrics.record_publish_failure();
                match e.kind() {
                    PublishErrorKind::RateLimited { reset } => {
                        warn!(reset = %reset, "Rate limited");
                    }
                    PublishErrorKind::Rejected(details) => {
                        for (index, detail) in details.iter().enumerate() {
                            error!(error_number = index + 1, %detail, "Post rejected by API");
                        }
                    }
                    _ => error!(error = %e, "Publish failed"),
                }
            }
        }
    }

    /// Uniform random delay within the configured window.
    pub fn next_delay(&mut self) -> Duration {
        let secs = self
            .rng
            .gen_range(self.config.min_delay_secs..=self.config.max_delay_secs);
        Duration::from_secs(secs)
    }

    /// Metrics collector shared with the HTTP surface.
    pub fn metrics(&self) -> &BotMetrics {
        &self.metrics
    }
}
