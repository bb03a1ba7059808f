//! Tests for configuration loading and validation.

use magpie::BotConfig;
use magpie_error::MagpieErrorKind;
use std::io::Write;
use std::path::PathBuf;

#[test]
fn defaults_match_the_reference_behavior() {
    let config = BotConfig::default();

    assert_eq!(config.corpus.path, PathBuf::from("corpus.txt"));
    assert_eq!(config.posting.max_post_chars, 140);
    assert_eq!(config.posting.chunk_chars, 138);
    assert_eq!(config.posting.min_delay_secs, 3600);
    assert_eq!(config.posting.max_delay_secs, 10800);
    assert_eq!(config.posting.max_select_attempts, 2500);
    assert_eq!(config.server.port, 8080);
    assert!(!config.server.enable_reload);
}

#[test]
fn partial_file_keeps_defaults_for_the_rest() {
    let mut file = tempfile::NamedTempFile::new().expect("temp file");
    write!(
        file,
        "[posting]\nmax_post_chars = 280\n\n[server]\nenable_reload = true\n"
    )
    .expect("write config");

    let config = BotConfig::from_file(file.path()).expect("parse config");
    assert_eq!(config.posting.max_post_chars, 280);
    assert!(config.server.enable_reload);

    // Everything not mentioned in the file stays at its default.
    assert_eq!(config.posting.chunk_chars, 138);
    assert_eq!(config.posting.min_delay_secs, 3600);
    assert_eq!(config.server.port, 8080);
    assert_eq!(config.corpus.path, PathBuf::from("corpus.txt"));
}

#[test]
fn missing_file_is_a_config_error() {
    let err = BotConfig::from_file("/nonexistent/magpie.toml").expect_err("missing file");
    assert!(matches!(err.kind(), MagpieErrorKind::Config(_)));
    assert!(!err.is_recoverable());
}

#[test]
fn malformed_toml_is_a_config_error() {
    let mut file = tempfile::NamedTempFile::new().expect("temp file");
    write!(file, "[posting\nmax_post_chars = ").expect("write config");

    let err = BotConfig::from_file(file.path()).expect_err("malformed file");
    assert!(matches!(err.kind(), MagpieErrorKind::Config(_)));
}

#[test]
fn load_without_a_path_uses_defaults() {
    let config = BotConfig::load(None).expect("defaults");
    assert_eq!(config.posting.max_post_chars, 140);
}

#[test]
fn validate_accepts_the_defaults() {
    let warnings = BotConfig::default().validate().expect("defaults are valid");
    assert!(warnings.is_empty());
}

#[test]
fn inverted_delay_window_is_rejected() {
    let mut config = BotConfig::default();
    config.posting.min_delay_secs = 7200;
    config.posting.max_delay_secs = 3600;

    let err = config.validate().expect_err("inverted window");
    assert!(matches!(err.kind(), MagpieErrorKind::Config(_)));
}

#[test]
fn zero_ceiling_is_rejected() {
    let mut config = BotConfig::default();
    config.posting.max_post_chars = 0;

    assert!(config.validate().is_err());
}

#[test]
fn zero_retry_cap_is_rejected() {
    let mut config = BotConfig::default();
    config.posting.max_select_attempts = 0;

    assert!(config.validate().is_err());
}

#[test]
fn oversized_chunk_budget_warns() {
    let mut config = BotConfig::default();
    config.posting.chunk_chars = 200;

    let warnings = config.validate().expect("workable config");
    assert_eq!(warnings.len(), 1);
    assert!(warnings[0].contains("chunk_chars"));
}

#[test]
fn config_round_trips_through_toml() {
    let config = BotConfig::default();
    let serialized = toml::to_string(&config).expect("serialize");
    let parsed: BotConfig = toml::from_str(&serialized).expect("reparse");
    assert_eq!(parsed.posting.max_post_chars, config.posting.max_post_chars);
    assert_eq!(parsed.server.port, config.server.port);
}
