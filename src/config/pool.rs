//! Request pool configuration.

use std::num::NonZeroUsize;

use super::parse::env_parse;
use super::ConfigError;
use crate::core::DEFAULT_PARAM_CAPACITY;

/// Default number of idle contexts kept by a pool.
pub const DEFAULT_MAX_IDLE: usize = 1024;

/// Request pool configuration loaded from environment.
#[derive(Clone, Debug)]
pub struct PoolConfig {
    /// Contexts created eagerly when the pool is built.
    pub prealloc: usize,
    /// Idle contexts kept for reuse (0 = unbounded). Extra releases are dropped.
    pub max_idle: usize,
    /// Parameter slots reserved in every new context (never zero).
    param_capacity: NonZeroUsize,
}

impl PoolConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        let prealloc = env_parse("REQUEST_POOL_PREALLOC", 0usize)?;
        let max_idle = env_parse("REQUEST_POOL_MAX_IDLE", DEFAULT_MAX_IDLE)?;
        let raw_capacity = env_parse("REQUEST_PARAM_CAPACITY", DEFAULT_PARAM_CAPACITY)?;

        let param_capacity =
            NonZeroUsize::new(raw_capacity).ok_or_else(|| ConfigError::Invalid {
                key: "REQUEST_PARAM_CAPACITY".into(),
                message: "parameter capacity cannot be zero".into(),
            })?;

        Ok(Self {
            prealloc,
            max_idle,
            param_capacity,
        })
    }

    /// Set the number of parameter slots reserved per context.
    ///
    /// Zero is bumped to one.
    pub fn with_param_capacity(mut self, capacity: usize) -> Self {
        self.param_capacity = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        self
    }

    /// Set the idle limit (0 = unbounded).
    pub fn with_max_idle(mut self, max_idle: usize) -> Self {
        self.max_idle = max_idle;
        self
    }

    /// Set the number of contexts created up front.
    pub fn with_prealloc(mut self, prealloc: usize) -> Self {
        self.prealloc = prealloc;
        self
    }

    /// Get parameter capacity (pre-computed, zero-cost).
    #[inline]
    pub fn param_capacity(&self) -> usize {
        self.param_capacity.get()
    }

    /// Whether a free list holding `idle` contexts may take one more.
    #[inline]
    pub fn accepts_idle(&self, idle: usize) -> bool {
        self.max_idle == 0 || idle < self.max_idle
    }
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            prealloc: 0,
            max_idle: DEFAULT_MAX_IDLE,
            param_capacity: NonZeroUsize::new(DEFAULT_PARAM_CAPACITY).unwrap_or(NonZeroUsize::MIN),
        }
    }
}
