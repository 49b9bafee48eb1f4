//! Acquire/release lifecycle: parameters and request fields never leak
//! from one acquisition into the next.

use std::time::Duration;

use request_pool::config::PoolConfig;
use request_pool::core::{CancelContext, RequestPool};

use crate::helpers::*;

/// Params registered on one request are gone after reuse
#[test]
fn test_params_do_not_leak_across_reuse() {
    let pool = RequestPool::new(PoolConfig::default().with_max_idle(1));

    let mut ctx = pool.acquire(CancelContext::new(), get("/users/42/hello"));
    ctx.add_param("id", "42");
    ctx.add_param("slug", "hello");
    assert_eq!(ctx.param("id"), "42");
    ctx.release();

    let ctx = pool.acquire(CancelContext::new(), get("/health"));
    assert_eq!(pool.stats().allocated, 1, "context should be reused");
    assert_eq!(ctx.param("id"), "");
    assert_eq!(ctx.param("slug"), "");
    assert!(ctx.params().is_empty());
    assert!(ctx.params().capacity() >= 10);
}

/// Param lookup only matches registered names
#[test]
fn test_param_lookup_exactness() {
    let pool = RequestPool::default();
    let mut ctx = pool.acquire(CancelContext::new(), get("/users/42/hello"));
    ctx.add_param("id", "42");
    ctx.add_param("slug", "hello");

    assert_eq!(ctx.param("id"), "42");
    assert_eq!(ctx.param("slug"), "hello");
    assert_eq!(ctx.param("missing"), "");
    assert_eq!(ctx.param("ID"), "");
}

/// A reused slot with a shorter registration never exposes old data
#[test]
fn test_reused_slots_only_show_current_names() {
    let pool = RequestPool::new(PoolConfig::default().with_max_idle(1));

    let mut ctx = pool.acquire(CancelContext::new(), get("/a"));
    ctx.add_param("first", "1");
    ctx.add_param("second", "2");
    ctx.add_param("third", "3");
    drop(ctx);

    let mut ctx = pool.acquire(CancelContext::new(), get("/b"));
    ctx.add_param("only", "x");

    let names: Vec<_> = ctx.params().iter().map(|(name, _)| name).collect();
    assert_eq!(names, vec!["only"]);
    assert_eq!(ctx.param("second"), "");
    assert_eq!(ctx.param("third"), "");
}

/// Re-acquired context carries the freshly injected transport and token
#[test]
fn test_release_clears_identity_fields() {
    let pool = RequestPool::new(PoolConfig::default().with_max_idle(1));

    let first_token = CancelContext::with_timeout(Duration::from_secs(60));
    let ctx = pool.acquire(first_token.clone(), get("/first?x=1"));
    assert_eq!(ctx.path(), "/first");
    ctx.release();

    let second_token = CancelContext::new();
    let ctx = pool.acquire(second_token.clone(), get("/second"));
    assert_eq!(ctx.path(), "/second");
    assert_eq!(ctx.query("x"), "");

    let current = ctx.context().expect("token should be attached");
    assert_eq!(current.deadline(), None);

    first_token.cancel();
    assert!(!current.is_cancelled());
    second_token.cancel();
    assert!(current.is_cancelled());
}

/// with_context mutates in place and chains
#[test]
fn test_with_context_mutates_and_chains() {
    let pool = RequestPool::default();
    let ctx_a = CancelContext::new();
    let mut ctx = pool.acquire(ctx_a.clone(), get("/"));

    let new_ctx = ctx_a.child_with_timeout(Duration::from_secs(5));
    let expected_deadline = new_ctx.deadline();

    let path = ctx.with_context(new_ctx).path().to_string();
    assert_eq!(path, "/");
    assert_eq!(ctx.context().and_then(CancelContext::deadline), expected_deadline);

    // The child still follows its parent.
    ctx_a.cancel();
    assert!(ctx.context().is_some_and(CancelContext::is_cancelled));
}

/// Handlers that bail out early still return the context
#[test]
fn test_guard_releases_on_error_path() {
    fn handler(pool: &RequestPool) -> Result<String, request_pool::core::Error> {
        let ctx = pool.acquire(CancelContext::new(), request("POST", "/", &[], b"{not json"));
        let value: serde_json::Value = ctx.data()?;
        Ok(value.to_string())
    }

    let pool = RequestPool::default();
    let err = handler(&pool).unwrap_err();
    assert!(err.is_deserialization());

    let stats = pool.stats();
    assert_eq!(stats.in_use(), 0);
    assert_eq!(stats.idle, 1);
}
