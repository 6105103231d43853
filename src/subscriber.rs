//! `tracing-subscriber` wiring for CEE-style JSON log lines.
//!
//! Every event is written as one line:
//!
//! ```text
//! <tag>: @cee: {"tsf":1700000000000,"level":"INFO","message":"..",...}
//! ```
//!
//! The `<tag>: ` prefix is omitted when the tag is empty. `tsf` is the event
//! time as a number of Unix epoch milliseconds. Event fields are flattened
//! into the top-level object.
//!
//! Level selection, highest priority first:
//!
//! 1. [`LoggerConfig::filter`], when set
//! 2. the `RUST_LOG` environment variable
//! 3. `info` in production, `debug` otherwise
//!
//! Only available with the `subscriber` feature (on by default).

use std::fmt;
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::{Event, Subscriber};
use tracing_subscriber::fmt::format::{Format, Json, JsonFields, Writer};
use tracing_subscriber::fmt::{FmtContext, FormatEvent, FormatFields, MakeWriter};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::util::{SubscriberInitExt, TryInitError};
use tracing_subscriber::{EnvFilter, Layer, Registry};

/// Marker placed before the JSON payload of every line.
pub const CEE_COOKIE: &str = "@cee: ";

/// JSON key of the epoch-millisecond event time.
pub const TIME_KEY: &str = "tsf";

/// Logger settings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoggerConfig {
    /// Line prefix, usually the service name. Empty disables the prefix.
    pub tag: String,
    /// Production loggers default to `info`, others to `debug`.
    pub production: bool,
    /// Explicit `EnvFilter` directives. Overrides `RUST_LOG`.
    pub filter: Option<String>,
}

impl LoggerConfig {
    /// Development config with the given tag.
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            ..Self::default()
        }
    }

    /// Toggle production defaults.
    pub fn production(mut self, production: bool) -> Self {
        self.production = production;
        self
    }

    /// Set explicit filter directives, e.g. `"faultline=trace,info"`.
    pub fn with_filter(mut self, directives: impl Into<String>) -> Self {
        self.filter = Some(directives.into());
        self
    }

    fn default_directive(&self) -> &'static str {
        if self.production { "info" } else { "debug" }
    }

    fn env_filter(&self) -> EnvFilter {
        match &self.filter {
            Some(directives) => EnvFilter::new(directives),
            None => EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(self.default_directive())),
        }
    }
}

fn epoch_millis() -> u128 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |elapsed| elapsed.as_millis())
}

/// Event formatter producing `<tag>: @cee: <json>` lines.
#[derive(Debug, Clone)]
pub struct CeeFormat {
    tag: String,
    inner: Format<Json, ()>,
}

impl CeeFormat {
    /// Formatter prefixing lines with `tag`.
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            inner: tracing_subscriber::fmt::format()
                .json()
                .flatten_event(true)
                .without_time(),
        }
    }
}

impl<S, N> FormatEvent<S, N> for CeeFormat
where
    S: Subscriber + for<'lookup> LookupSpan<'lookup>,
    N: for<'writer> FormatFields<'writer> + 'static,
{
    fn format_event(
        &self,
        ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> fmt::Result {
        if !self.tag.is_empty() {
            write!(writer, "{}: ", self.tag)?;
        }
        writer.write_str(CEE_COOKIE)?;

        // The JSON formatter only emits string timestamps, so `tsf` is
        // spliced in as the first member of its object.
        let mut body = String::new();
        self.inner.format_event(ctx, Writer::new(&mut body), event)?;
        let members = body.strip_prefix('{').ok_or(fmt::Error)?;
        write!(writer, "{{\"{TIME_KEY}\":{},{members}", epoch_millis())
    }
}

/// Formatting layer for `config`, writing to `writer`.
///
/// Compose it with other layers when the process owns its own subscriber.
pub fn build_layer<S, W>(config: &LoggerConfig, writer: W) -> impl Layer<S>
where
    S: Subscriber + for<'lookup> LookupSpan<'lookup>,
    W: for<'writer> MakeWriter<'writer> + Send + Sync + 'static,
{
    tracing_subscriber::fmt::layer()
        .fmt_fields(JsonFields::new())
        .event_format(CeeFormat::new(config.tag.clone()))
        .with_writer(writer)
        .with_filter(config.env_filter())
}

/// Install a global subscriber writing CEE lines to stdout.
///
/// Fails if a global subscriber is already set.
pub fn init_logging(config: &LoggerConfig) -> Result<(), TryInitError> {
    tracing_subscriber::registry()
        .with(build_layer::<Registry, _>(config, std::io::stdout))
        .try_init()
}
