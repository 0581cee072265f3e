//! Tracing setup. Logs go to stderr; stdout is reserved for command output.

use crate::config::LogConfig;
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

pub struct StructuredLogger;

impl StructuredLogger {
    /// Install the global subscriber: JSON lines or human-readable text, level from
    /// RUST_LOG or the configured default. A second call is a no-op.
    pub fn init(config: &LogConfig) {
        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level));
        let result = if config.json {
            let fmt = tracing_subscriber::fmt::layer()
                .json()
                .with_span_events(FmtSpan::NONE)
                .with_writer(std::io::stderr);
            tracing_subscriber::registry().with(filter).with(fmt).try_init()
        } else {
            let fmt = tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr);
            tracing_subscriber::registry().with(filter).with(fmt).try_init()
        };
        if result.is_err() {
            tracing::debug!("tracing subscriber already installed");
        }
    }
}
