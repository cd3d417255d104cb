//! # Logging
//!
//! Installs the global `tracing` subscriber for a host embedding the files
//! core, and keeps access tokens out of whatever it writes.
//!
//! Events are written to stderr (pretty, compact or JSON) and, when a
//! [`LoggerSink`] is configured, mirrored to the host as [`LogEntry`]
//! values. Fields named like credentials are replaced with `[REDACTED]`
//! before they reach the sink, and URL-valued fields have their
//! `oauth_token` query value replaced.
//!
//! ```ignore
//! use core_runtime::logging::{init_logging, LogFormat, LoggingConfig};
//! use bridge_traits::logging::{ConsoleLogger, LogLevel};
//! use std::sync::Arc;
//!
//! let config = LoggingConfig::from_env()?
//!     .with_level(LogLevel::Debug)
//!     .with_sink(Arc::new(ConsoleLogger::default()));
//!
//! init_logging(config)?;
//! ```

use bridge_traits::logging::{LogEntry, LogLevel, LoggerSink};
use std::collections::BTreeMap;
use std::fmt;
use std::io;
use std::str::FromStr;
use std::sync::Arc;
use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::layer::{Context, SubscriberExt};
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};
use url::Url;

use crate::error::{Error, Result};

/// `EnvFilter` directives overriding the level-based defaults
pub const LOG_FILTER_ENV: &str = "PUTIO_LOG";

/// `pretty`, `compact` or `json`
pub const LOG_FORMAT_ENV: &str = "PUTIO_LOG_FORMAT";

/// Crates that follow the configured level
const WORKSPACE_CRATES: &[&str] = &[
    "putio_workspace",
    "provider_putio",
    "core_auth",
    "core_runtime",
    "bridge_desktop",
];

/// HTTP stack crates, held at `warn`
const NOISY_DEPENDENCIES: &[&str] = &["h2", "hyper", "hyper_util", "reqwest", "rustls"];

const SENSITIVE_KEYS: &[&str] = &[
    "token",
    "authorization",
    "bearer",
    "password",
    "secret",
];

const REDACTED: &str = "[REDACTED]";

/// Replacement for credential values inside URL query strings
const URL_REDACTED: &str = "REDACTED";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// Multi-line, colored
    Pretty,
    /// One line per event
    Compact,
    /// One JSON object per event
    Json,
}

impl Default for LogFormat {
    /// Pretty in debug builds, JSON in release builds
    fn default() -> Self {
        if cfg!(debug_assertions) {
            LogFormat::Pretty
        } else {
            LogFormat::Json
        }
    }
}

impl FromStr for LogFormat {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "pretty" => Ok(LogFormat::Pretty),
            "compact" => Ok(LogFormat::Compact),
            "json" => Ok(LogFormat::Json),
            other => Err(Error::Logging(format!(
                "Unknown log format '{}' (expected pretty, compact or json)",
                other
            ))),
        }
    }
}

/// Subscriber settings
#[derive(Clone)]
pub struct LoggingConfig {
    pub format: LogFormat,
    /// Level applied to the workspace crates when no directives are given
    pub level: LogLevel,
    /// Raw `EnvFilter` directives, e.g. `provider_putio=trace,reqwest=debug`
    pub directives: Option<String>,
    /// Host sink receiving a copy of every event that passes the filter
    pub sink: Option<Arc<dyn LoggerSink>>,
    /// Log span open/close
    pub span_events: bool,
    pub show_target: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            format: LogFormat::default(),
            level: LogLevel::Info,
            directives: None,
            sink: None,
            span_events: false,
            show_target: true,
        }
    }
}

impl fmt::Debug for LoggingConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoggingConfig")
            .field("format", &self.format)
            .field("level", &self.level)
            .field("directives", &self.directives)
            .field("sink", &self.sink.is_some())
            .field("span_events", &self.span_events)
            .field("show_target", &self.show_target)
            .finish()
    }
}

impl LoggingConfig {
    /// Defaults overridden by `PUTIO_LOG` and `PUTIO_LOG_FORMAT`
    ///
    /// # Errors
    ///
    /// `Error::Logging` if `PUTIO_LOG_FORMAT` names an unknown format.
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();

        if let Ok(directives) = std::env::var(LOG_FILTER_ENV) {
            if !directives.trim().is_empty() {
                config.directives = Some(directives);
            }
        }

        if let Ok(format) = std::env::var(LOG_FORMAT_ENV) {
            config.format = format.parse()?;
        }

        Ok(config)
    }

    pub fn with_format(mut self, format: LogFormat) -> Self {
        self.format = format;
        self
    }

    pub fn with_level(mut self, level: LogLevel) -> Self {
        self.level = level;
        self
    }

    pub fn with_directives(mut self, directives: impl Into<String>) -> Self {
        self.directives = Some(directives.into());
        self
    }

    pub fn with_sink(mut self, sink: Arc<dyn LoggerSink>) -> Self {
        self.sink = Some(sink);
        self
    }

    pub fn with_span_events(mut self, enabled: bool) -> Self {
        self.span_events = enabled;
        self
    }

    pub fn with_target(mut self, show: bool) -> Self {
        self.show_target = show;
        self
    }

    fn env_filter(&self) -> Result<EnvFilter> {
        let directives = match &self.directives {
            Some(directives) => directives.clone(),
            None => WORKSPACE_CRATES
                .iter()
                .map(|krate| format!("{}={}", krate, self.level))
                .chain(NOISY_DEPENDENCIES.iter().map(|dep| format!("{}=warn", dep)))
                .collect::<Vec<_>>()
                .join(","),
        };

        EnvFilter::try_new(&directives)
            .map_err(|e| Error::Logging(format!("Invalid log filter '{}': {}", directives, e)))
    }

    fn output_layer<S>(&self) -> Box<dyn Layer<S> + Send + Sync>
    where
        S: Subscriber + for<'a> LookupSpan<'a>,
    {
        let spans = if self.span_events {
            FmtSpan::NEW | FmtSpan::CLOSE
        } else {
            FmtSpan::NONE
        };
        let layer = tracing_subscriber::fmt::layer()
            .with_target(self.show_target)
            .with_writer(io::stderr);

        match self.format {
            LogFormat::Pretty => layer.pretty().with_span_events(spans).boxed(),
            LogFormat::Compact => layer.compact().with_span_events(spans).boxed(),
            LogFormat::Json => layer
                .json()
                .flatten_event(true)
                .with_current_span(self.span_events)
                .with_span_list(false)
                .boxed(),
        }
    }
}

/// Install the global subscriber. Call once at startup.
///
/// # Errors
///
/// `Error::Logging` for invalid directives, or when a global subscriber is
/// already installed.
pub fn init_logging(config: LoggingConfig) -> Result<()> {
    let filter = config.env_filter()?;
    let output = config.output_layer();
    let forwarder = config.sink.clone().map(SinkForwarder::new);

    tracing_subscriber::registry()
        .with(filter)
        .with(output)
        .with(forwarder)
        .try_init()
        .map_err(|e| Error::Logging(format!("Failed to initialize logging: {}", e)))
}

/// Mirrors events into a host `LoggerSink`
struct SinkForwarder {
    sink: Arc<dyn LoggerSink>,
}

impl SinkForwarder {
    fn new(sink: Arc<dyn LoggerSink>) -> Self {
        Self { sink }
    }
}

impl<S> Layer<S> for SinkForwarder
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    fn on_event(&self, event: &Event<'_>, ctx: Context<'_, S>) {
        let metadata = event.metadata();
        let level = log_level(metadata.level());
        if level < self.sink.min_level() {
            return;
        }

        let mut collector = FieldCollector::default();
        event.record(&mut collector);

        let message = collector
            .message
            .unwrap_or_else(|| metadata.name().to_string());
        let mut entry = LogEntry::new(level, metadata.target(), message);
        entry.fields = collector.fields;
        if let Some(span) = ctx.event_span(event) {
            entry = entry.in_span(span.name());
        }

        deliver(Arc::clone(&self.sink), entry);
    }
}

/// Hand the entry to the sink: spawned when inside a Tokio runtime, inline
/// otherwise.
fn deliver(sink: Arc<dyn LoggerSink>, entry: LogEntry) {
    if let Ok(handle) = tokio::runtime::Handle::try_current() {
        handle.spawn(async move {
            if let Err(e) = sink.log(entry).await {
                eprintln!("LoggerSink error: {}", e);
            }
        });
        return;
    }

    match tokio::runtime::Builder::new_current_thread().build() {
        Ok(runtime) => {
            if let Err(e) = runtime.block_on(sink.log(entry)) {
                eprintln!("LoggerSink error: {}", e);
            }
        }
        Err(e) => eprintln!("LoggerSink runtime unavailable: {}", e),
    }
}

#[derive(Default)]
struct FieldCollector {
    message: Option<String>,
    fields: BTreeMap<String, String>,
}

impl FieldCollector {
    fn insert(&mut self, field: &Field, value: String) {
        match field.name() {
            "message" => self.message = Some(value),
            name if is_sensitive(name) => {
                self.fields.insert(name.to_string(), REDACTED.to_string());
            }
            name => {
                self.fields.insert(name.to_string(), redact_url_query(&value));
            }
        }
    }
}

impl Visit for FieldCollector {
    fn record_str(&mut self, field: &Field, value: &str) {
        self.insert(field, value.to_string());
    }

    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        self.insert(field, format!("{:?}", value));
    }
}

fn log_level(level: &Level) -> LogLevel {
    match *level {
        Level::TRACE => LogLevel::Trace,
        Level::DEBUG => LogLevel::Debug,
        Level::INFO => LogLevel::Info,
        Level::WARN => LogLevel::Warn,
        Level::ERROR => LogLevel::Error,
    }
}

fn is_sensitive(name: &str) -> bool {
    let name = name.to_ascii_lowercase();
    SENSITIVE_KEYS.iter().any(|key| name.contains(key))
}

/// `[REDACTED]` when `field_name` looks like a credential, else `value`
///
/// ```ignore
/// tracing::debug!(token = %redact_if_sensitive("token", &token), "Token refreshed");
/// ```
pub fn redact_if_sensitive(field_name: &str, value: &str) -> String {
    if is_sensitive(field_name) {
        REDACTED.to_string()
    } else {
        value.to_string()
    }
}

/// Replace credential query values in a URL, keeping the keys:
/// `...?subtitle_key=all&oauth_token=abc` becomes
/// `...?subtitle_key=all&oauth_token=REDACTED`.
///
/// Strings that do not parse as absolute URLs, or carry no credential
/// parameter, are returned unchanged.
pub fn redact_url_query(url: &str) -> String {
    let Ok(mut parsed) = Url::parse(url) else {
        return url.to_string();
    };
    if !parsed.query_pairs().any(|(key, _)| is_sensitive(&key)) {
        return url.to_string();
    }

    let pairs: Vec<(String, String)> = parsed
        .query_pairs()
        .map(|(key, value)| {
            let value = if is_sensitive(&key) {
                URL_REDACTED.to_string()
            } else {
                value.into_owned()
            };
            (key.into_owned(), value)
        })
        .collect();
    parsed.query_pairs_mut().clear().extend_pairs(pairs);

    parsed.into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use bridge_traits::error::Result as SinkResult;
    use std::sync::Mutex;

    #[derive(Default)]
    struct RecordingSink {
        entries: Mutex<Vec<LogEntry>>,
    }

    #[async_trait]
    impl LoggerSink for RecordingSink {
        async fn log(&self, entry: LogEntry) -> SinkResult<()> {
            self.entries.lock().unwrap().push(entry);
            Ok(())
        }

        fn min_level(&self) -> LogLevel {
            LogLevel::Debug
        }
    }

    fn with_recording_sink(emit: impl FnOnce()) -> Vec<LogEntry> {
        let sink = Arc::new(RecordingSink::default());
        let subscriber =
            tracing_subscriber::registry().with(SinkForwarder::new(sink.clone() as Arc<dyn LoggerSink>));
        tracing::subscriber::with_default(subscriber, emit);
        let entries = sink.entries.lock().unwrap().clone();
        entries
    }

    #[test]
    fn test_format_parsing() {
        assert_eq!("JSON".parse::<LogFormat>().unwrap(), LogFormat::Json);
        assert_eq!(" compact ".parse::<LogFormat>().unwrap(), LogFormat::Compact);
        assert!(matches!("xml".parse::<LogFormat>(), Err(Error::Logging(_))));
    }

    #[test]
    fn test_default_filter_covers_workspace_crates() {
        let config = LoggingConfig::default().with_level(LogLevel::Debug);
        let filter = config.env_filter().unwrap().to_string();

        assert!(filter.contains("provider_putio=debug"));
        assert!(filter.contains("core_auth=debug"));
        assert!(filter.contains("reqwest=warn"));
    }

    #[test]
    fn test_custom_directives() {
        let config = LoggingConfig::default().with_directives("provider_putio=trace");
        assert!(config
            .env_filter()
            .unwrap()
            .to_string()
            .contains("provider_putio=trace"));

        let config = LoggingConfig::default().with_directives("provider_putio=loud");
        assert!(matches!(config.env_filter(), Err(Error::Logging(_))));
    }

    #[test]
    fn test_sink_receives_redacted_fields() {
        let entries = with_recording_sink(|| {
            let span = tracing::info_span!("fetch_files");
            let _entered = span.enter();
            tracing::info!(
                target: "provider_putio",
                endpoint = "files/list",
                access_token = "abc",
                url = "https://api.put.io/v2/files/1/hls/media.m3u8?subtitle_key=all&oauth_token=abc",
                files = 3,
                "Listing files"
            );
        });

        assert_eq!(entries.len(), 1);
        let entry = &entries[0];
        assert_eq!(entry.target, "provider_putio");
        assert_eq!(entry.message, "Listing files");
        assert_eq!(entry.span.as_deref(), Some("fetch_files"));
        assert_eq!(entry.fields["endpoint"], "files/list");
        assert_eq!(entry.fields["files"], "3");
        assert_eq!(entry.fields["access_token"], REDACTED);
        assert!(entry.fields["url"].ends_with("oauth_token=REDACTED"));
    }

    #[test]
    fn test_sink_min_level_respected() {
        let entries = with_recording_sink(|| {
            tracing::trace!("too chatty");
            tracing::warn!("kept");
        });

        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].message, "kept");
        assert_eq!(entries[0].level, LogLevel::Warn);
    }

    #[test]
    fn test_redact_if_sensitive() {
        assert_eq!(redact_if_sensitive("access_token", "secret123"), REDACTED);
        assert_eq!(redact_if_sensitive("Authorization", "Bearer x"), REDACTED);
        assert_eq!(redact_if_sensitive("file_id", "42"), "42");
    }

    #[test]
    fn test_redact_url_query() {
        assert_eq!(
            redact_url_query(
                "https://api.put.io/v2/files/42/hls/media.m3u8?subtitle_key=all&oauth_token=abc"
            ),
            "https://api.put.io/v2/files/42/hls/media.m3u8?subtitle_key=all&oauth_token=REDACTED"
        );
        assert_eq!(
            redact_url_query("https://api.put.io/v2/files/list?parent_id=0"),
            "https://api.put.io/v2/files/list?parent_id=0"
        );
        assert_eq!(
            redact_url_query("https://api.put.io/v2/files/extract"),
            "https://api.put.io/v2/files/extract"
        );
        assert_eq!(
            redact_url_query("https://x.test/p?oauth_token=abc#frag"),
            "https://x.test/p?oauth_token=REDACTED#frag"
        );
    }

    #[test]
    fn test_redact_url_query_decodes_keys_and_skips_non_urls() {
        assert_eq!(
            redact_url_query("https://x.test/p?q=big+buck&oauth%5Ftoken=a%2Fb"),
            "https://x.test/p?q=big+buck&oauth_token=REDACTED"
        );
        assert_eq!(redact_url_query("files/list?token=abc"), "files/list?token=abc");
        assert_eq!(redact_url_query("big buck bunny"), "big buck bunny");
    }
}
