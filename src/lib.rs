//! request_pool - pooled per-request contexts for HTTP handlers.
//!
//! This crate sits between an HTTP transport and application code. Each
//! inbound request borrows a [`RequestContext`](core::RequestContext) from a
//! shared [`RequestPool`](core::RequestPool), reads method, path, headers,
//! query/form args, cookies, path params and JSON bodies through it, and
//! hands it back when the handler is done. Contexts and their parameter
//! buffers are reused across requests instead of being allocated each time.
//!
//! # Features
//!
//! - **Scoped acquisition**: [`PooledRequest`](core::PooledRequest) releases
//!   on drop, on every exit path
//! - **Stale-safe params**: parameter slots are reused in place, lookups
//!   only ever see the current request's names
//! - **Cancellation**: per-request [`CancelContext`](core::CancelContext)
//!   with optional deadline, replaceable in place
//! - **Structured logging**: JSON log lines via `tracing`
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use request_pool::core::{acquire_request, CancelContext, Request};
//!
//! let request = Arc::new(Request::from_hyper(hyper_req).await?);
//! let mut ctx = acquire_request(CancelContext::new(), request);
//! ctx.add_param("id", "42");
//!
//! if ctx.wants_json() {
//!     let body: serde_json::Value = ctx.data()?;
//! }
//! ```

/// Package version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod config;
pub mod core;
pub mod logging;

// Re-exports for convenience
pub use config::Config;
pub use crate::core::{acquire_request, PooledRequest, RequestContext, RequestPool};
