//! Logging configuration.

use super::parse::env_or;
use super::ConfigError;

const CRATE_TARGET: &str = "request_pool";

/// Output format for log lines.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// One JSON object per line.
    #[default]
    Json,
    /// Human-readable `tracing_subscriber` output.
    Text,
}

/// Logging configuration loaded from environment.
#[derive(Clone, Debug)]
pub struct LoggingConfig {
    /// Log level filter (from LOG_LEVEL or RUST_LOG).
    pub filter: String,
    /// Service name for structured logging.
    pub service_name: String,
    /// Output format (from LOG_FORMAT).
    pub format: LogFormat,
}

impl LoggingConfig {
    /// Load configuration from environment variables.
    ///
    /// LOG_LEVEL accepts simple values: trace, debug, info, warn, error.
    /// RUST_LOG accepts full tracing filter syntax: request_pool=debug,hyper=warn
    pub fn from_env() -> Result<Self, ConfigError> {
        let log_level = std::env::var("LOG_LEVEL").ok();
        let rust_log = std::env::var("RUST_LOG").ok();
        let format = match env_or("LOG_FORMAT", "json").to_lowercase().as_str() {
            "json" => LogFormat::Json,
            "text" | "pretty" => LogFormat::Text,
            other => {
                return Err(ConfigError::Invalid {
                    key: "LOG_FORMAT".into(),
                    message: format!("expected json or text, got '{}'", other),
                })
            }
        };

        Ok(Self {
            filter: resolve_log_filter(log_level.as_deref(), rust_log.as_deref()),
            service_name: env_or("SERVICE_NAME", CRATE_TARGET),
            format,
        })
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: resolve_log_filter(None, None),
            service_name: CRATE_TARGET.to_string(),
            format: LogFormat::Json,
        }
    }
}

/// Resolve the log filter.
///
/// Priority: LOG_LEVEL > RUST_LOG > default (info). An unknown LOG_LEVEL is
/// ignored with a warning on stderr.
fn resolve_log_filter(log_level: Option<&str>, rust_log: Option<&str>) -> String {
    if let Some(level) = log_level {
        let level = level.to_lowercase();
        match level.as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => {
                return format!("{}={}", CRATE_TARGET, level);
            }
            _ => {
                // Logging is not up yet, so stderr is the only channel.
                eprintln!(
                    "Warning: Invalid LOG_LEVEL '{}', expected: trace, debug, info, warn, error",
                    level
                );
            }
        }
    }

    match rust_log {
        Some(filter) if !filter.is_empty() => filter.to_string(),
        _ => format!("{}=info", CRATE_TARGET),
    }
}
