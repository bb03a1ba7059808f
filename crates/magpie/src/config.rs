//! Configuration for the bot process.

use magpie_error::{MagpieError, MagpieErrorKind, MagpieResult};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Top-level configuration, loaded from a TOML file or built from defaults.
///
/// Credentials are deliberately absent: the Twitter bearer token comes from
/// the environment, never from the config file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BotConfig {
    /// Corpus source configuration.
    #[serde(default)]
    pub corpus: CorpusConfig,
    /// Posting loop configuration.
    #[serde(default)]
    pub posting: PostingConfig,
    /// HTTP server configuration.
    #[serde(default)]
    pub server: ServerConfig,
}

impl BotConfig {
    /// Load configuration from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> MagpieResult<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|e| {
            MagpieError::new(MagpieErrorKind::Config(format!(
                "failed to read config file {}: {}",
                path.display(),
                e
            )))
        })?;

        toml::from_str(&contents).map_err(|e| {
            MagpieError::new(MagpieErrorKind::Config(format!(
                "failed to parse config: {e}"
            )))
        })
    }

    /// Load configuration from `path` when given, defaults otherwise.
    pub fn load(path: Option<&Path>) -> MagpieResult<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => {
                debug!("No config file given, using defaults");
                Ok(Self::default())
            }
        }
    }

    /// Validate the configuration.
    ///
    /// Returns a list of warnings for questionable but workable settings.
    ///
    /// # Errors
    ///
    /// Returns a `Config` error for settings the scheduler cannot run with.
    pub fn validate(&self) -> MagpieResult<Vec<String>> {
        if self.posting.max_post_chars == 0 {
            return Err(MagpieError::new(MagpieErrorKind::Config(
                "max_post_chars must be greater than 0".to_string(),
            )));
        }

        if self.posting.min_delay_secs > self.posting.max_delay_secs {
            return Err(MagpieError::new(MagpieErrorKind::Config(format!(
                "min_delay_secs ({}) exceeds max_delay_secs ({})",
                self.posting.min_delay_secs, self.posting.max_delay_secs
            ))));
        }

        if self.posting.max_select_attempts == 0 {
            return Err(MagpieError::new(MagpieErrorKind::Config(
                "max_select_attempts must be greater than 0".to_string(),
            )));
        }

        let mut warnings = Vec::new();

        if self.posting.chunk_chars > self.posting.max_post_chars {
            warnings.push(format!(
                "chunk_chars ({}) exceeds max_post_chars ({}), split chunks will not fit a post",
                self.posting.chunk_chars, self.posting.max_post_chars
            ));
        }

        if self.posting.max_delay_secs < 60 {
            warnings.push(format!(
                "max_delay_secs is {}, the bot will post very frequently",
                self.posting.max_delay_secs
            ));
        }

        debug!(warnings = warnings.len(), "Configuration validated");
        Ok(warnings)
    }
}

/// Corpus source configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorpusConfig {
    /// Path to the newline-delimited corpus file.
    #[serde(default = "default_corpus_path")]
    pub path: PathBuf,
}

fn default_corpus_path() -> PathBuf {
    PathBuf::from("corpus.txt")
}

impl Default for CorpusConfig {
    fn default() -> Self {
        Self {
            path: default_corpus_path(),
        }
    }
}

/// Posting loop configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostingConfig {
    /// Maximum characters a single post may carry.
    #[serde(default = "default_max_post_chars")]
    pub max_post_chars: usize,

    /// Character budget for segmenter chunks (safety margin below the
    /// publish ceiling).
    #[serde(default = "default_chunk_chars")]
    pub chunk_chars: usize,

    /// Minimum delay between posts (seconds).
    #[serde(default = "default_min_delay_secs")]
    pub min_delay_secs: u64,

    /// Maximum delay between posts (seconds).
    #[serde(default = "default_max_delay_secs")]
    pub max_delay_secs: u64,

    /// Rejection-sampling retry cap for one selection.
    #[serde(default = "default_max_select_attempts")]
    pub max_select_attempts: usize,
}

fn default_max_post_chars() -> usize {
    140
}

fn default_chunk_chars() -> usize {
    138
}

fn default_min_delay_secs() -> u64 {
    3600
}

fn default_max_delay_secs() -> u64 {
    10800
}

fn default_max_select_attempts() -> usize {
    2500
}

impl Default for PostingConfig {
    fn default() -> Self {
        Self {
            max_post_chars: default_max_post_chars(),
            chunk_chars: default_chunk_chars(),
            min_delay_secs: default_min_delay_secs(),
            max_delay_secs: default_max_delay_secs(),
            max_select_attempts: default_max_select_attempts(),
        }
    }
}

/// HTTP server configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Listen port; the `PORT` environment variable overrides it.
    #[serde(default = "default_port")]
    pub port: u16,

    /// Mount the `POST /reload` corpus-reload route.
    #[serde(default)]
    pub enable_reload: bool,
}

fn default_port() -> u16 {
    8080
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: default_port(),
            enable_reload: false,
        }
    }
}

impl ServerConfig {
    /// Listen port after applying the `PORT` environment override.
    pub fn effective_port(&self) -> u16 {
        std::env::var("PORT")
            .ok()
            .and_then(|value| value.parse().ok())
            .unwrap_or(self.port)
    }
}
