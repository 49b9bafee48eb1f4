//! Test helpers and utilities

use std::sync::Arc;

use bytes::Bytes;
use request_pool::core::Request;

/// Build a shared transport request.
pub fn request(method: &str, uri: &str, headers: &[(&str, &str)], body: &'static [u8]) -> Arc<Request> {
    let mut builder = http::Request::builder().method(method).uri(uri);
    for (name, value) in headers {
        builder = builder.header(*name, *value);
    }
    Arc::new(Request::from(
        builder
            .body(Bytes::from_static(body))
            .expect("Failed to build request"),
    ))
}

/// GET request without headers or body.
pub fn get(uri: &str) -> Arc<Request> {
    request("GET", uri, &[], b"")
}

/// GET request with a single header.
pub fn get_with_header(uri: &str, name: &str, value: &str) -> Arc<Request> {
    request("GET", uri, &[(name, value)], b"")
}
