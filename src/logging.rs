//! Logging setup for symptom-screen
//!
//! The library only emits `tracing` events; this module wires up a
//! subscriber for binaries and tests that want to see them.

use tracing::Level;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Environment variable that overrides the level passed to [`init_logging`].
pub const LOG_ENV_VAR: &str = "SYMPTOM_SCREEN_LOG";

/// Log levels, mapped onto the tracing level hierarchy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    /// Failures of both the remote predictor and the local pipeline
    Error,
    /// Remote predictor failures that triggered the rule-based fallback
    Warn,
    /// One line per screening
    Info,
    /// Extracted symptoms and per-disease scores
    Debug,
    /// Everything, including raw remote payload sizes
    Trace,
}

impl LogLevel {
    fn to_tracing_level(self) -> Level {
        match self {
            LogLevel::Error => Level::ERROR,
            LogLevel::Warn => Level::WARN,
            LogLevel::Info => Level::INFO,
            LogLevel::Debug => Level::DEBUG,
            LogLevel::Trace => Level::TRACE,
        }
    }
}

/// Initialize logging with a specific log level.
///
/// Call once at the start of your application. Setting `SYMPTOM_SCREEN_LOG`
/// takes precedence over `level`:
///
/// ```bash
/// SYMPTOM_SCREEN_LOG=symptom_screen=debug cargo run
/// ```
///
/// # Examples
///
/// ```no_run
/// use symptom_screen::logging::{init_logging, LogLevel};
///
/// init_logging(LogLevel::Info);
/// tracing::info!("screening service starting");
/// ```
pub fn init_logging(level: LogLevel) {
    let env_filter = EnvFilter::try_from_env(LOG_ENV_VAR).unwrap_or_else(|_| {
        EnvFilter::new(format!("symptom_screen={}", level.to_tracing_level()))
    });

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true))
        .with(env_filter)
        .init();

    tracing::info!("symptom-screen logging initialized at level: {:?}", level);
}

/// Initialize logging with a custom filter directive.
///
/// ```no_run
/// use symptom_screen::logging::init_logging_with_filter;
///
/// init_logging_with_filter("symptom_screen=info,symptom_screen::predictor=trace");
/// ```
pub fn init_logging_with_filter(filter: &str) {
    let env_filter = EnvFilter::try_new(filter).unwrap_or_else(|_| {
        tracing::warn!("Invalid filter string: {}, using default (info)", filter);
        EnvFilter::new("symptom_screen=info")
    });

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true))
        .with(env_filter)
        .init();

    tracing::info!("symptom-screen logging initialized with custom filter: {}", filter);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_mapping() {
        assert_eq!(LogLevel::Warn.to_tracing_level(), Level::WARN);
        assert_eq!(LogLevel::Trace.to_tracing_level(), Level::TRACE);
        assert_eq!(
            format!("symptom_screen={}", LogLevel::Debug.to_tracing_level()),
            "symptom_screen=DEBUG"
        );
    }
}
