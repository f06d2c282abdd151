//! Structured logging.
//!
//! Logging is opt-in. When the effective configuration asks for it (verbose
//! mode, or any non-empty log format), a debug-level `tracing` subscriber is
//! built and handed back as a [`Logger`]. Callers run their work inside
//! [`Logger::scope`] instead of relying on a process-wide default.

use tracing::Dispatch;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::fmt::MakeWriter;

use crate::config::{EffectiveConfig, LogFormat};

/// Minimum severity recorded once logging is enabled.
pub const LOG_LEVEL: LevelFilter = LevelFilter::DEBUG;

/// A configured logger.
#[derive(Debug, Clone)]
pub struct Logger {
    dispatch: Dispatch,
    format: LogFormat,
}

impl Logger {
    /// Get the record encoding.
    pub fn format(&self) -> LogFormat {
        self.format
    }

    /// Run `f` with this logger as the current default.
    pub fn scope<T>(&self, f: impl FnOnce() -> T) -> T {
        tracing::dispatcher::with_default(&self.dispatch, f)
    }
}

/// Build the logger requested by `config`, writing to stderr.
///
/// Returns `None` when neither verbose mode nor a log format was requested.
pub fn initialize_logging(config: &EffectiveConfig) -> Option<Logger> {
    initialize_logging_with_writer(config, std::io::stderr)
}

/// Build a logger that writes records through `writer`.
///
/// A `log-format` of `json` selects JSON records; every other value falls
/// back to text.
pub fn initialize_logging_with_writer<W>(config: &EffectiveConfig, writer: W) -> Option<Logger>
where
    W: for<'a> MakeWriter<'a> + Send + Sync + 'static,
{
    if !config.wants_logging() {
        return None;
    }

    let format = config.log_format();
    let verbose = config.verbose();
    let builder = tracing_subscriber::fmt()
        .with_max_level(LOG_LEVEL)
        .with_writer(writer);
    let dispatch = match format {
        LogFormat::Json => Dispatch::new(builder.json().finish()),
        LogFormat::Text => Dispatch::new(builder.with_ansi(false).finish()),
    };

    let logger = Logger { dispatch, format };
    logger.scope(|| tracing::debug!(verbose, "setup"));
    Some(logger)
}

/// Emit the effective configuration as debug events.
pub fn log_effective_config(config: &EffectiveConfig) {
    tracing::debug!(
        path = %config.config_file.path().display(),
        loaded = config.config_file.is_loaded(),
        "using config file"
    );
    tracing::debug!(
        value = config.log_format_setting(),
        source = %config.log_format.source,
        "log-format"
    );
    tracing::debug!(
        value = config.sentinel(),
        source = %config.sentinel.source,
        "sentinel"
    );
}
