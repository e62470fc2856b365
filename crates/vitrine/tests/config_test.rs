//! Tests for configuration loading and tracing setup.

use std::str::FromStr;
use tempfile::TempDir;
use vitrine::{LogFormat, LoggingConfig, ReconcilerConfig, VitrineConfig, VitrineErrorKind};

fn write_config(dir: &TempDir, contents: &str) -> std::path::PathBuf {
    let path = dir.path().join("vitrine.toml");
    std::fs::write(&path, contents).unwrap();
    path
}

#[test]
fn test_empty_file_matches_defaults() {
    let dir = TempDir::new().unwrap();
    let path = write_config(&dir, "");

    let config = VitrineConfig::from_file(&path).unwrap();

    assert_eq!(config, VitrineConfig::default());
    assert_eq!(config.site.slug, "stavrin");
    assert_eq!(config.reconciler, ReconcilerConfig::default());
    assert_eq!(config.reconciler.request_timeout_ms, 10_000);
    assert_eq!(config.logging.filter, "info,vitrine=debug");
    assert!(config.backend.is_none());
}

#[test]
fn test_file_overrides_selected_values() {
    let dir = TempDir::new().unwrap();
    let path = write_config(
        &dir,
        r#"
[site]
slug = "nobody"

[backend]
url = "https://abc.supabase.co"
anon_key = "public-key"

[reconciler]
max_retries = 0
persist_unchanged = true

[logging]
format = "json"
"#,
    );

    let config = VitrineConfig::from_file(&path).unwrap();

    assert_eq!(config.site.slug, "nobody");
    assert_eq!(config.reconciler.max_retries, 0);
    assert!(config.reconciler.persist_unchanged);
    assert_eq!(config.reconciler.queue_capacity, 32);
    assert_eq!(config.logging.format, LogFormat::Json);

    let rest = config.rest_config().unwrap();
    assert_eq!(rest.url(), "https://abc.supabase.co");
    assert_eq!(rest.table(), "items");
    assert_eq!(rest.bucket(), "media");
}

#[test]
fn test_missing_backend_is_a_config_error() {
    let err = VitrineConfig::default().rest_config().unwrap_err();
    assert!(matches!(err.kind(), VitrineErrorKind::Config(_)));
    assert!(err.message().contains("[backend]"));
}

#[test]
fn test_bad_value_is_a_config_error() {
    let dir = TempDir::new().unwrap();
    let path = write_config(&dir, "[reconciler]\nmax_retries = \"lots\"\n");

    let err = VitrineConfig::from_file(&path).unwrap_err();
    assert!(matches!(err.kind(), VitrineErrorKind::Config(_)));
}

#[test]
fn test_missing_file_is_a_config_error() {
    let dir = TempDir::new().unwrap();
    let err = VitrineConfig::from_file(dir.path().join("absent.toml")).unwrap_err();
    assert!(matches!(err.kind(), VitrineErrorKind::Config(_)));
}

#[test]
fn test_log_format_names() {
    assert_eq!(LogFormat::from_str("json").unwrap(), LogFormat::Json);
    assert_eq!(LogFormat::Pretty.to_string(), "pretty");
}

#[test]
fn test_tracing_initializes_once() {
    let config = LoggingConfig::default();
    assert!(vitrine::init_tracing(&config).is_ok());

    let err = vitrine::init_tracing(&config).unwrap_err();
    assert!(matches!(err.kind(), VitrineErrorKind::Config(_)));
}
