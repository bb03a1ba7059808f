//! Corpus storage, loading, and the hot-swap handle.

use magpie_error::{MagpieError, MagpieErrorKind, MagpieResult};
use std::fs;
use std::path::Path;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, info};

/// Immutable ordered collection of candidate source texts.
///
/// Entries are trimmed at construction and never empty or pure whitespace.
/// A corpus is replaced wholesale, never edited entry by entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Corpus {
    entries: Vec<String>,
}

impl Corpus {
    /// Build a corpus from raw lines, trimming each and dropping blanks.
    pub fn new(lines: impl IntoIterator<Item = String>) -> Self {
        let entries = lines
            .into_iter()
            .map(|line| line.trim().to_string())
            .filter(|line| !line.is_empty())
            .collect();
        Self { entries }
    }

    /// Load a corpus from a newline-delimited text file.
    ///
    /// Idempotent and side-effect-free beyond the read; returns a fresh
    /// immutable corpus each call.
    ///
    /// # Errors
    ///
    /// Returns a `CorpusLoad` error if the file cannot be read.
    #[tracing::instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub fn load<P: AsRef<Path>>(path: P) -> MagpieResult<Self> {
        let path = path.as_ref();
        debug!("Loading corpus");

        let contents = fs::read_to_string(path).map_err(|e| {
            MagpieError::new(MagpieErrorKind::CorpusLoad {
                path: path.to_path_buf(),
                message: e.to_string(),
            })
        })?;

        let corpus = Self::new(contents.lines().map(str::to_string));
        info!(entries = corpus.len(), "Loaded corpus");
        Ok(corpus)
    }

    /// Entry at `index`, if within bounds.
    pub fn get(&self, index: usize) -> Option<&str> {
        self.entries.get(index).map(String::as_str)
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check whether the corpus has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// All entries in order.
    pub fn entries(&self) -> &[String] {
        &self.entries
    }
}

/// Shared, atomically-swappable reference to the current corpus.
///
/// Readers take one snapshot per selection and hold it for the duration of
/// that call. A reload installs a fresh `Arc<Corpus>` by reference swap,
/// never by mutating the sequence an in-flight reader may still hold, so a
/// reader can never observe a half-updated corpus.
#[derive(Debug, Clone)]
pub struct CorpusHandle {
    inner: Arc<RwLock<Arc<Corpus>>>,
}

impl CorpusHandle {
    /// Create a handle holding `corpus` as the current corpus.
    pub fn new(corpus: Corpus) -> Self {
        Self {
            inner: Arc::new(RwLock::new(Arc::new(corpus))),
        }
    }

    /// Snapshot of the current corpus.
    pub async fn snapshot(&self) -> Arc<Corpus> {
        Arc::clone(&*self.inner.read().await)
    }

    /// Install a new corpus, replacing the current reference.
    pub async fn replace(&self, corpus: Corpus) {
        let mut guard = self.inner.write().await;
        *guard = Arc::new(corpus);
        info!(entries = guard.len(), "Corpus replaced");
    }
}
