//! Shared pool of reusable request contexts.
//!
//! # Lifecycle
//!
//! ```text
//!   acquire(cancel, request)          drop / release()
//!  ┌──────────┐  pop or allocate  ┌───────────────┐  reset + push  ┌──────────┐
//!  │ free list│ ────────────────▶ │ PooledRequest │ ─────────────▶ │ free list│
//!  └──────────┘                   └───────────────┘                └──────────┘
//!                                   router: add_param
//!                                   handler: accessors
//! ```
//!
//! A context handed out by [`RequestPool::acquire`] is owned exclusively by
//! the returned guard. Dropping the guard clears the transport, the
//! cancellation token and the parameters before the context is pushed back,
//! so the next request never sees the previous one's state.

use std::ops::{Deref, DerefMut};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, LazyLock};

use parking_lot::Mutex;
use tracing::trace;

use super::cancel::CancelContext;
use super::context::RequestContext;
use super::request::Request;
use crate::config::PoolConfig;

/// Process-wide pool used by [`acquire_request`].
static GLOBAL_POOL: LazyLock<RequestPool> =
    LazyLock::new(|| RequestPool::new(PoolConfig::default()));

/// Acquire a context from the process-wide pool.
#[inline]
pub fn acquire_request(cancel: CancelContext, transport: Arc<Request>) -> PooledRequest<'static> {
    GLOBAL_POOL.acquire(cancel, transport)
}

/// Pool counters.
#[derive(Debug, Default)]
struct Counters {
    allocated: AtomicU64,
    acquired: AtomicU64,
    released: AtomicU64,
    discarded: AtomicU64,
}

/// Snapshot of pool activity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PoolStats {
    /// Contexts ever allocated.
    pub allocated: u64,
    /// Successful acquisitions.
    pub acquired: u64,
    /// Releases (including discarded ones).
    pub released: u64,
    /// Released contexts dropped because the free list was full.
    pub discarded: u64,
    /// Contexts currently waiting in the free list.
    pub idle: usize,
}

impl PoolStats {
    /// Contexts currently acquired.
    #[inline]
    pub fn in_use(&self) -> u64 {
        self.acquired.saturating_sub(self.released)
    }
}

/// Concurrency-safe free list of [`RequestContext`]s.
///
/// Any number of threads may acquire and release at once. A context is
/// never handed to two callers at the same time.
pub struct RequestPool {
    free: Mutex<Vec<Box<RequestContext>>>,
    config: PoolConfig,
    counters: Counters,
}

impl RequestPool {
    /// Create a pool, allocating `config.prealloc` contexts up front.
    pub fn new(config: PoolConfig) -> Self {
        let pool = Self {
            free: Mutex::new(Vec::with_capacity(config.prealloc)),
            config,
            counters: Counters::default(),
        };

        if pool.config.prealloc > 0 {
            let mut free = pool.free.lock();
            for _ in 0..pool.config.prealloc {
                free.push(pool.allocate());
            }
        }

        pool
    }

    /// The process-wide pool.
    #[inline]
    pub fn global() -> &'static RequestPool {
        &GLOBAL_POOL
    }

    #[inline]
    pub fn config(&self) -> &PoolConfig {
        &self.config
    }

    fn allocate(&self) -> Box<RequestContext> {
        let total = self.counters.allocated.fetch_add(1, Ordering::Relaxed) + 1;
        trace!(allocated = total, "request pool: allocating context");
        Box::new(RequestContext::new(self.config.param_capacity()))
    }

    /// Take a context from the pool and attach the request to it.
    ///
    /// The returned context has no parameters. It goes back to the pool when
    /// the guard is dropped.
    pub fn acquire(&self, cancel: CancelContext, transport: Arc<Request>) -> PooledRequest<'_> {
        let reused = self.free.lock().pop();
        let mut ctx = match reused {
            Some(ctx) => ctx,
            None => self.allocate(),
        };

        ctx.attach(cancel, transport);
        self.counters.acquired.fetch_add(1, Ordering::Relaxed);

        PooledRequest {
            pool: self,
            ctx: Some(ctx),
        }
    }

    /// Clear a context and put it back on the free list.
    fn release(&self, mut ctx: Box<RequestContext>) {
        ctx.reset();
        self.counters.released.fetch_add(1, Ordering::Relaxed);

        let mut free = self.free.lock();
        if self.config.accepts_idle(free.len()) {
            free.push(ctx);
        } else {
            drop(free);
            self.counters.discarded.fetch_add(1, Ordering::Relaxed);
            trace!(max_idle = self.config.max_idle, "request pool: discarding context");
        }
    }

    /// Number of idle contexts.
    #[inline]
    pub fn idle(&self) -> usize {
        self.free.lock().len()
    }

    /// Snapshot of pool activity.
    pub fn stats(&self) -> PoolStats {
        PoolStats {
            allocated: self.counters.allocated.load(Ordering::Relaxed),
            acquired: self.counters.acquired.load(Ordering::Relaxed),
            released: self.counters.released.load(Ordering::Relaxed),
            discarded: self.counters.discarded.load(Ordering::Relaxed),
            idle: self.idle(),
        }
    }

    #[cfg(test)]
    fn with_idle<R>(&self, f: impl FnOnce(&[Box<RequestContext>]) -> R) -> R {
        f(&self.free.lock())
    }
}

impl Default for RequestPool {
    fn default() -> Self {
        Self::new(PoolConfig::default())
    }
}

impl std::fmt::Debug for RequestPool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RequestPool")
            .field("config", &self.config)
            .field("stats", &self.stats())
            .finish()
    }
}

/// Exclusive handle to an acquired [`RequestContext`].
///
/// Releases the context back to its pool exactly once, on drop. Early
/// returns, `?` and panics all go through the same path.
pub struct PooledRequest<'p> {
    pool: &'p RequestPool,
    /// `Some` from acquire until `drop` hands it back.
    ctx: Option<Box<RequestContext>>,
}

impl PooledRequest<'_> {
    /// Return the context to the pool now.
    #[inline]
    pub fn release(self) {
        drop(self);
    }
}

impl Deref for PooledRequest<'_> {
    type Target = RequestContext;

    #[inline]
    fn deref(&self) -> &RequestContext {
        self.ctx.as_deref().expect("context is held until drop")
    }
}

impl DerefMut for PooledRequest<'_> {
    #[inline]
    fn deref_mut(&mut self) -> &mut RequestContext {
        self.ctx.as_deref_mut().expect("context is held until drop")
    }
}

impl Drop for PooledRequest<'_> {
    fn drop(&mut self) {
        if let Some(ctx) = self.ctx.take() {
            self.pool.release(ctx);
        }
    }
}

impl std::fmt::Debug for PooledRequest<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("PooledRequest").field(&**self).finish()
    }
}
