//! Integration tests for request_pool
//!
//! These exercise the public API only: acquire, route, read, release.
//! Run with: cargo test --test integration

mod helpers;

mod accessors;
mod concurrency;
mod lifecycle;
