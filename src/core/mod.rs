//! Pooled request context and the types it is built from.
//!
//! - [`Request`] - transport-level request handle
//! - [`RequestContext`] - per-request view handed to application code
//! - [`RequestPool`] / [`PooledRequest`] - acquire/release of contexts
//! - [`Params`] - path parameters registered by the router
//! - [`CancelContext`] - cancellation/deadline token
//! - [`Error`] - core error types
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use request_pool::core::{CancelContext, Request, RequestPool};
//!
//! let pool = RequestPool::default();
//! let mut ctx = pool.acquire(CancelContext::new(), Arc::new(Request::from(http_req)));
//!
//! // Router registers path params before dispatch
//! ctx.add_param("id", "42");
//!
//! assert_eq!(ctx.param("id"), "42");
//! // Context goes back to the pool here
//! ```

mod args;
mod cancel;
mod context;
mod error;
mod params;
mod pool;
mod request;

pub use args::{decode_component, parse_cookies, parse_query_string, Args};
pub use cancel::CancelContext;
pub use context::RequestContext;
pub use error::{Error, Result};
pub use params::{Params, DEFAULT_PARAM_CAPACITY};
pub use pool::{acquire_request, PoolStats, PooledRequest, RequestPool};
pub use request::Request;
