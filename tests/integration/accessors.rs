//! Accessor behaviour on an acquired context.

use request_pool::core::{CancelContext, RequestPool};
use serde::Deserialize;

use crate::helpers::*;

#[derive(Debug, Clone, PartialEq, Deserialize)]
struct Order {
    id: u64,
    items: Vec<String>,
}

/// Content-Type matching needs `;` or end right after application/json
#[test]
fn test_is_json_boundary() {
    let pool = RequestPool::default();
    let cases = [
        ("application/json", true),
        ("application/json; charset=utf-8", true),
        ("application/json-patch+json", false),
        ("text/plain", false),
    ];

    for (content_type, expected) in cases {
        let ctx = pool.acquire(
            CancelContext::new(),
            get_with_header("/", "content-type", content_type),
        );
        assert_eq!(ctx.is_json(), expected, "content-type: {}", content_type);
    }

    let ctx = pool.acquire(CancelContext::new(), get("/"));
    assert!(!ctx.is_json());
}

/// Accept matching is a plain prefix test
#[test]
fn test_wants_json_prefix() {
    let pool = RequestPool::default();
    let cases = [
        ("application/json", true),
        ("application/json-ld", true),
        ("text/html", false),
    ];

    for (accept, expected) in cases {
        let ctx = pool.acquire(CancelContext::new(), get_with_header("/", "accept", accept));
        assert_eq!(ctx.wants_json(), expected, "accept: {}", accept);
    }

    let ctx = pool.acquire(CancelContext::new(), get("/"));
    assert!(!ctx.wants_json());
}

/// Malformed body fails and leaves the destination alone
#[test]
fn test_data_error_path() {
    let pool = RequestPool::default();
    let ctx = pool.acquire(
        CancelContext::new(),
        request("POST", "/orders", &[("content-type", "application/json")], b"{not json"),
    );

    let original = Order {
        id: 1,
        items: vec!["keep".into()],
    };
    let mut dst = original.clone();
    let err = ctx.data_into(&mut dst).unwrap_err();

    assert!(err.is_deserialization());
    assert_eq!(dst, original);
}

/// Well-formed body maps onto the destination
#[test]
fn test_data_success() {
    let pool = RequestPool::default();
    let ctx = pool.acquire(
        CancelContext::new(),
        request(
            "POST",
            "/orders",
            &[("content-type", "application/json; charset=utf-8")],
            br#"{"id":7,"items":["a","b"]}"#,
        ),
    );

    assert!(ctx.is_json());
    let order: Order = ctx.data().expect("valid JSON");
    assert_eq!(
        order,
        Order {
            id: 7,
            items: vec!["a".into(), "b".into()],
        }
    );
}

/// Query, form, cookie and header lookups
#[test]
fn test_request_lookups() {
    let pool = RequestPool::default();
    let ctx = pool.acquire(
        CancelContext::new(),
        request(
            "POST",
            "/search?q=rust+pool&page=3&sort=asc&sort=date",
            &[
                ("host", "shop.example.com"),
                ("content-type", "application/x-www-form-urlencoded"),
                ("cookie", "session=abc123; lang=en"),
                ("x-request-id", "req-1"),
            ],
            b"filter=new&filter=sale&limit=20",
        ),
    );

    assert_eq!(ctx.method(), "POST");
    assert_eq!(ctx.path(), "/search");
    assert_eq!(ctx.host(), "shop.example.com");
    assert_eq!(ctx.header("x-request-id"), "req-1");
    assert_eq!(ctx.header("x-absent"), "");

    assert_eq!(ctx.query("q"), "rust pool");
    assert_eq!(ctx.query("page"), "3");
    assert_eq!(ctx.query_multi("sort"), vec!["asc", "date"]);
    assert!(ctx.query_multi("absent").is_empty());

    assert_eq!(ctx.post("limit"), "20");
    assert_eq!(ctx.post_multi("filter"), vec!["new", "sale"]);
    assert_eq!(ctx.post("absent"), "");

    assert_eq!(ctx.cookie("session"), "abc123");
    assert_eq!(ctx.cookie("lang"), "en");
    assert_eq!(ctx.cookie("absent"), "");

    let uri = ctx.uri().expect("uri while acquired");
    assert_eq!(uri.query(), Some("q=rust+pool&page=3&sort=asc&sort=date"));
    assert!(ctx.raw().is_some());
}

/// Header, host and cookie values outside ASCII are still present
#[test]
fn test_non_ascii_lookups() {
    let pool = RequestPool::default();
    let ctx = pool.acquire(
        CancelContext::new(),
        request(
            "GET",
            "/profile",
            &[
                ("host", "münchen.example"),
                ("x-name", "José"),
                ("cookie", "session=abc; name=José; lang=es"),
            ],
            b"",
        ),
    );

    assert_eq!(ctx.header("x-name"), "José");
    assert_eq!(ctx.host(), "münchen.example");
    assert_eq!(ctx.cookie("session"), "abc");
    assert_eq!(ctx.cookie("name"), "José");
    assert_eq!(ctx.cookie("lang"), "es");
    assert_eq!(ctx.header("x-absent"), "");
}
