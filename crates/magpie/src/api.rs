//! HTTP surface: liveness probe, metrics, and the optional corpus reload.

use crate::metrics::BotMetrics;
use axum::{
    Router,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::{get, post},
};
use magpie_core::{Corpus, CorpusHandle};
use std::path::PathBuf;
use tracing::{error, info};

/// State shared by the HTTP handlers.
#[derive(Clone)]
pub struct ApiState {
    corpus: CorpusHandle,
    corpus_path: PathBuf,
    metrics: BotMetrics,
}

impl ApiState {
    /// Creates new API state.
    pub fn new(corpus: CorpusHandle, corpus_path: PathBuf, metrics: BotMetrics) -> Self {
        Self {
            corpus,
            corpus_path,
            metrics,
        }
    }
}

/// Creates the router.
///
/// The reload route is mounted only when `enable_reload` is set; the
/// liveness probe and metrics are always available.
pub fn create_router(state: ApiState, enable_reload: bool) -> Router {
    let mut router = Router::new()
        .route("/tickle", get(tickle))
        .route("/metrics", get(get_metrics));

    if enable_reload {
        router = router.route("/reload", post(reload));
    }

    router.with_state(state)
}

/// Liveness probe for external supervisors. No side effects.
async fn tickle() -> impl IntoResponse {
    (StatusCode::OK, "OK")
}

/// Current metrics snapshot.
async fn get_metrics(State(state): State<ApiState>) -> impl IntoResponse {
    (StatusCode::OK, Json(state.metrics.snapshot()))
}

/// Reload the corpus from disk and swap it in atomically.
///
/// On failure the previously active corpus remains in effect and the error
/// text is returned to the caller.
async fn reload(State(state): State<ApiState>) -> impl IntoResponse {
    info!(path = %state.corpus_path.display(), "Corpus reload requested");

    match Corpus::load(&state.corpus_path) {
        Ok(corpus) => {
            state.corpus.replace(corpus).await;
            (StatusCode::OK, "OK".to_string())
        }
        Err(e) => {
            error!(error = %e, "Corpus reload failed, keeping previous corpus");
            (StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
        }
    }
}
