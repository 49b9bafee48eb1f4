//! Transport-level HTTP request handle.

use std::borrow::Cow;
use std::sync::OnceLock;

use bytes::Bytes;
use http::header::{self, HeaderName};
use http::{HeaderMap, Method, Uri};
use http_body_util::BodyExt;

use super::args::{append_cookies, parse_query_string, Args};
use super::error::{Error, Result};

/// Header name constants for fast lookup.
mod header_names {
    use super::*;

    pub static ACCEPT: HeaderName = header::ACCEPT;
    pub static CONTENT_TYPE: HeaderName = header::CONTENT_TYPE;
    pub static CONTENT_LENGTH: HeaderName = header::CONTENT_LENGTH;
    pub static COOKIE: HeaderName = header::COOKIE;
    pub static HOST: HeaderName = header::HOST;
}

const FORM_URLENCODED: &[u8] = b"application/x-www-form-urlencoded";

/// HTTP request as delivered by the transport.
///
/// Query args, form args and cookies are parsed on first access and cached
/// for the lifetime of the request.
///
/// Note: Clone is intentionally not derived to prevent expensive copies.
/// Share it behind an `Arc` instead.
#[derive(Debug)]
pub struct Request {
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
    version: http::Version,
    query_args: OnceLock<Args>,
    post_args: OnceLock<Args>,
    cookies: OnceLock<Args>,
}

impl Request {
    /// Create a new request.
    #[inline]
    pub fn new(method: Method, uri: Uri, headers: HeaderMap, body: Bytes) -> Self {
        Self {
            method,
            uri,
            headers,
            body,
            version: http::Version::HTTP_11,
            query_args: OnceLock::new(),
            post_args: OnceLock::new(),
            cookies: OnceLock::new(),
        }
    }

    /// Read a request off a hyper connection, buffering the whole body.
    pub async fn from_hyper<B>(req: http::Request<B>) -> Result<Self>
    where
        B: hyper::body::Body,
        B::Error: std::fmt::Display,
    {
        let (parts, body) = req.into_parts();
        let body = body
            .collect()
            .await
            .map_err(|e| Error::InvalidRequest(format!("failed to read body: {}", e)))?
            .to_bytes();

        Ok(Self::from_parts(parts, body))
    }

    fn from_parts(parts: http::request::Parts, body: Bytes) -> Self {
        let mut req = Self::new(parts.method, parts.uri, parts.headers, body);
        req.version = parts.version;
        req
    }

    /// Get the HTTP method.
    #[inline]
    pub fn method(&self) -> &Method {
        &self.method
    }

    /// Get the request path.
    #[inline]
    pub fn path(&self) -> &str {
        self.uri.path()
    }

    /// Get the raw query string.
    #[inline]
    pub fn query(&self) -> Option<&str> {
        self.uri.query()
    }

    /// Get the full URI.
    #[inline]
    pub fn uri(&self) -> &Uri {
        &self.uri
    }

    /// Get the HTTP version.
    #[inline]
    pub fn version(&self) -> http::Version {
        self.version
    }

    /// Get the headers.
    #[inline]
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Get the request body.
    #[inline]
    pub fn body(&self) -> &Bytes {
        &self.body
    }

    /// Get a header value by name (fast path with HeaderName constant).
    #[inline]
    fn header_by_name(&self, name: &HeaderName) -> Option<Cow<'_, str>> {
        self.headers
            .get(name)
            .map(|v| String::from_utf8_lossy(v.as_bytes()))
    }

    /// Get the first value of a header (case-insensitive name).
    ///
    /// Non-UTF-8 bytes are replaced with U+FFFD; use
    /// [`header_bytes`](Self::header_bytes) for the raw value.
    #[inline]
    pub fn header(&self, name: &str) -> Option<Cow<'_, str>> {
        self.headers
            .get(name)
            .map(|v| String::from_utf8_lossy(v.as_bytes()))
    }

    /// Get the first value of a header as raw bytes.
    #[inline]
    pub fn header_bytes(&self, name: &str) -> Option<&[u8]> {
        self.headers.get(name).map(|v| v.as_bytes())
    }

    /// Get every value of a header, in the order received.
    pub fn header_all(&self, name: &str) -> Vec<Cow<'_, str>> {
        self.headers
            .get_all(name)
            .iter()
            .map(|v| String::from_utf8_lossy(v.as_bytes()))
            .collect()
    }

    /// Get the Host header, falling back to the URI authority (HTTP/2).
    #[inline]
    pub fn host(&self) -> Option<Cow<'_, str>> {
        self.header_by_name(&header_names::HOST)
            .or_else(|| self.uri.authority().map(|a| Cow::Borrowed(a.as_str())))
    }

    /// Get Content-Type header.
    #[inline]
    pub fn content_type(&self) -> Option<Cow<'_, str>> {
        self.header_by_name(&header_names::CONTENT_TYPE)
    }

    /// Get Content-Type header as raw bytes.
    #[inline]
    pub fn content_type_bytes(&self) -> Option<&[u8]> {
        self.headers
            .get(&header_names::CONTENT_TYPE)
            .map(|v| v.as_bytes())
    }

    /// Get Content-Length header.
    #[inline]
    pub fn content_length(&self) -> Option<u64> {
        self.header_by_name(&header_names::CONTENT_LENGTH)
            .and_then(|v| v.parse().ok())
    }

    /// Get Accept header as raw bytes.
    #[inline]
    pub fn accept_bytes(&self) -> Option<&[u8]> {
        self.headers.get(&header_names::ACCEPT).map(|v| v.as_bytes())
    }

    /// Parsed query-string arguments.
    pub fn query_args(&self) -> &Args {
        self.query_args
            .get_or_init(|| self.query().map(parse_query_string).unwrap_or_default())
    }

    /// Parsed form arguments from an `application/x-www-form-urlencoded` body.
    ///
    /// Any other body yields no arguments.
    pub fn post_args(&self) -> &Args {
        self.post_args.get_or_init(|| {
            if self.is_form_urlencoded() {
                parse_query_string(&String::from_utf8_lossy(&self.body))
            } else {
                Args::new()
            }
        })
    }

    /// Parsed cookies from every `Cookie` header.
    pub fn cookies(&self) -> &Args {
        self.cookies.get_or_init(|| {
            let mut args = Args::new();
            for value in self.headers.get_all(&header_names::COOKIE) {
                append_cookies(&mut args, &String::from_utf8_lossy(value.as_bytes()));
            }
            args
        })
    }

    #[inline]
    fn is_form_urlencoded(&self) -> bool {
        self.content_type_bytes()
            .and_then(|ct| ct.get(..FORM_URLENCODED.len()))
            .is_some_and(|prefix| prefix.eq_ignore_ascii_case(FORM_URLENCODED))
    }
}

impl<B> From<http::Request<B>> for Request
where
    B: Into<Bytes>,
{
    fn from(req: http::Request<B>) -> Self {
        let (parts, body) = req.into_parts();
        Self::from_parts(parts, body.into())
    }
}
