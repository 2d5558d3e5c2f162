//! Tracing initialization and subscriber setup.

use super::exporter;
use crate::Config;
use opentelemetry::trace::TracerProvider as _;
use tracing_opentelemetry::OpenTelemetryLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Trace file written under the data directory when export is enabled.
pub const TRACE_FILE: &str = "jobboard-traces.jsonl";

/// Initializes the global tracing subscriber.
///
/// The filter comes from `RUST_LOG` if set, else `config.trace_level`, else
/// `"info"`. Events are formatted to stderr. With `config.trace_export`
/// spans are also exported as JSON lines to [`TRACE_FILE`] in the data
/// directory; if that directory cannot be created, export is skipped.
///
/// Calling this more than once is harmless: only the first call installs a
/// subscriber.
///
/// # Example
///
/// ```
/// use jobboard::observability::init_tracing;
/// use jobboard::Config;
///
/// let config = Config {
///     trace_level: Some("debug".to_string()),
///     ..Default::default()
/// };
/// init_tracing(&config);
/// tracing::debug!("tracing is now active");
/// ```
pub fn init_tracing(config: &Config) {
    let level = config
        .trace_level
        .clone()
        .unwrap_or_else(|| "info".to_string());
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false);

    let otel_layer = config
        .trace_export
        .then(|| {
            std::fs::create_dir_all(&config.data_dir).ok()?;
            let provider = exporter::create_tracer_provider(config.data_dir.join(TRACE_FILE));
            Some(OpenTelemetryLayer::new(provider.tracer(exporter::SERVICE_NAME)))
        })
        .flatten();

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .with(otel_layer)
        .try_init();
}
