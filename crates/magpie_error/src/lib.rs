//! Error types for the Magpie workspace.
//!
//! This crate provides the foundation error types shared by the corpus,
//! selection, and scheduling layers. Publish-side errors live in
//! `magpie_social` next to the client that produces them.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

use derive_getters::Getters;
use std::path::PathBuf;

/// Result type for Magpie operations.
pub type MagpieResult<T> = Result<T, MagpieError>;

/// Error kinds for corpus and scheduling operations.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum MagpieErrorKind {
    // Unrecoverable errors (the process must not start, or must not continue)
    /// Configuration invalid or unreadable.
    #[display("Configuration error: {_0}")]
    Config(String),

    /// Selection requested against a corpus with no entries.
    #[display("Corpus is empty: nothing to select")]
    EmptyCorpus,

    // Recoverable errors (log, skip the iteration, keep running)
    /// Corpus source could not be read.
    #[display("Failed to load corpus {} ({})", path.display(), message)]
    CorpusLoad {
        /// Path that could not be read.
        path: PathBuf,
        /// Underlying I/O error message.
        message: String,
    },

    /// No corpus entry satisfied the acceptance predicate within the retry cap.
    #[display("No corpus entry accepted after {attempts} attempts")]
    SelectionExhausted {
        /// Number of rejection-sampling draws performed before giving up.
        attempts: usize,
    },
}

impl MagpieErrorKind {
    /// Check if the error leaves the process in a state it can continue from.
    ///
    /// A failed reload keeps the previous corpus active; an exhausted
    /// selection skips one posting iteration. Configuration problems and an
    /// empty corpus cannot be recovered from without operator intervention.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::CorpusLoad { .. } | Self::SelectionExhausted { .. }
        )
    }
}

/// Magpie error with source location tracking.
///
/// Captures the error kind along with the file and line where the error
/// occurred.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error, Getters)]
#[display("Magpie error: {} at line {} in {}", kind, line, file)]
pub struct MagpieError {
    kind: MagpieErrorKind,
    line: u32,
    file: &'static str,
}

impl MagpieError {
    /// Create a new error with automatic location tracking.
    #[track_caller]
    pub fn new(kind: MagpieErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }

    /// Check if the error is recoverable.
    pub fn is_recoverable(&self) -> bool {
        self.kind.is_recoverable()
    }
}
