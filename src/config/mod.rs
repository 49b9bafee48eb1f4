//! Configuration module for request_pool.
//!
//! Configuration is loaded from environment variables.
//!
//! # Example
//!
//! ```rust,ignore
//! use request_pool::config::Config;
//! use request_pool::core::RequestPool;
//!
//! let config = Config::from_env()?;
//! let pool = RequestPool::new(config.pool.clone());
//! ```

mod error;
mod logging;
mod parse;
mod pool;

pub use error::ConfigError;
pub use logging::{LogFormat, LoggingConfig};
pub use pool::{PoolConfig, DEFAULT_MAX_IDLE};

/// Complete application configuration.
#[derive(Clone, Debug, Default)]
pub struct Config {
    /// Request pool configuration.
    pub pool: PoolConfig,
    /// Logging configuration.
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            pool: PoolConfig::from_env()?,
            logging: LoggingConfig::from_env()?,
        })
    }

    /// Print configuration summary to log.
    pub fn log_summary(&self) {
        use tracing::info;

        info!("Configuration loaded:");
        info!("  Param capacity: {}", self.pool.param_capacity());

        if self.pool.prealloc > 0 {
            info!("  Preallocated contexts: {}", self.pool.prealloc);
        }

        if self.pool.max_idle == 0 {
            info!("  Idle contexts: unbounded");
        } else {
            info!("  Idle contexts: up to {}", self.pool.max_idle);
        }

        info!("  Log filter: {}", self.logging.filter);
    }
}
