//! Integration tests for logging setup and log hygiene

use bridge_traits::logging::LogLevel;
use core_runtime::logging::{
    init_logging, redact_if_sensitive, redact_url_query, LogFormat, LoggingConfig,
};
use core_runtime::Error;

#[test]
fn test_logging_config_defaults() {
    let config = LoggingConfig::default();

    assert_eq!(config.level, LogLevel::Info);
    assert!(config.directives.is_none());
    assert!(config.sink.is_none());
    assert!(!config.span_events);
    assert!(config.show_target);
}

#[test]
fn test_global_subscriber_installs_once() {
    // One global subscriber per process; this is the only test that installs one.
    let config = LoggingConfig::default()
        .with_format(LogFormat::Compact)
        .with_level(LogLevel::Debug)
        .with_span_events(true);

    assert!(init_logging(config.clone()).is_ok());
    assert!(matches!(init_logging(config), Err(Error::Logging(_))));

    tracing::debug!(target: "provider_putio", "visible after init");
}

#[test]
fn test_playlist_url_never_logged_with_token() {
    let url = "https://api.put.io/v2/files/42/hls/media.m3u8?subtitle_key=all&oauth_token=abc";
    let logged = redact_url_query(url);

    assert!(!logged.contains("abc"));
    assert!(logged.contains("subtitle_key=all"));
    assert!(logged.starts_with("https://api.put.io/v2/files/42/hls/media.m3u8?"));
}

#[test]
fn test_credential_fields_redacted() {
    for field in ["token", "oauth_token", "access_token", "Authorization"] {
        assert_eq!(redact_if_sensitive(field, "abc"), "[REDACTED]", "{}", field);
    }

    assert_eq!(redact_if_sensitive("parent_id", "0"), "0");
    assert_eq!(redact_if_sensitive("query", "big buck bunny"), "big buck bunny");
}
