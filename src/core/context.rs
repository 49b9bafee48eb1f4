//! Pooled per-request context handed to application code.

use std::borrow::Cow;
use std::sync::Arc;

use http::Uri;
use serde::de::DeserializeOwned;

use super::cancel::CancelContext;
use super::error::Result;
use super::params::Params;
use super::request::Request;

const APPLICATION_JSON: &[u8] = b"application/json";

/// Request context recycled through a [`RequestPool`](super::RequestPool).
///
/// Holds a shared handle to the transport request, the cancellation token
/// and the path parameters registered by the router. A context is only
/// reachable through a [`PooledRequest`](super::PooledRequest) while it is
/// acquired. Once released, the transport and token are cleared and every
/// accessor reads as an empty request.
#[derive(Debug)]
pub struct RequestContext {
    transport: Option<Arc<Request>>,
    cancel: Option<CancelContext>,
    params: Params,
}

impl RequestContext {
    /// Create an idle context with `param_capacity` parameter slots.
    pub(crate) fn new(param_capacity: usize) -> Self {
        Self {
            transport: None,
            cancel: None,
            params: Params::with_capacity(param_capacity),
        }
    }

    /// Inject the request-scoped fields for a new acquisition.
    #[inline]
    pub(crate) fn attach(&mut self, cancel: CancelContext, transport: Arc<Request>) {
        self.transport = Some(transport);
        self.cancel = Some(cancel);
    }

    /// Clear request-scoped fields before returning to the pool.
    #[inline]
    pub(crate) fn reset(&mut self) {
        self.transport = None;
        self.cancel = None;
        self.params.reset();
    }

    /// Whether a transport is attached (false once released).
    #[inline]
    pub fn is_attached(&self) -> bool {
        self.transport.is_some()
    }

    /// Transport request handle.
    #[inline]
    pub fn raw(&self) -> Option<&Arc<Request>> {
        self.transport.as_ref()
    }

    #[inline]
    fn transport(&self) -> Option<&Request> {
        self.transport.as_deref()
    }

    /// Request path.
    #[inline]
    pub fn path(&self) -> &str {
        self.transport().map_or("", Request::path)
    }

    /// Request method, e.g. `GET`.
    #[inline]
    pub fn method(&self) -> &str {
        self.transport().map_or("", |r| r.method().as_str())
    }

    /// Request URI.
    #[inline]
    pub fn uri(&self) -> Option<&Uri> {
        self.transport().map(Request::uri)
    }

    /// First value of the named header, empty if absent.
    ///
    /// Bytes that are not valid UTF-8 come back as U+FFFD; the raw value is
    /// on [`raw`](Self::raw).
    #[inline]
    pub fn header(&self, name: &str) -> Cow<'_, str> {
        self.transport()
            .and_then(|r| r.header(name))
            .unwrap_or(Cow::Borrowed(""))
    }

    /// Host header, empty if absent.
    #[inline]
    pub fn host(&self) -> Cow<'_, str> {
        self.transport()
            .and_then(Request::host)
            .unwrap_or(Cow::Borrowed(""))
    }

    /// Path parameter registered by the router, empty if not registered.
    ///
    /// Only names registered for the current acquisition match; parameter
    /// storage left over from earlier requests is never read.
    #[inline]
    pub fn param(&self, name: &str) -> Cow<'_, str> {
        match self.params.get(name) {
            Some(value) => String::from_utf8_lossy(value),
            None => Cow::Borrowed(""),
        }
    }

    /// Register a path parameter. Called by the router before dispatch.
    #[inline]
    pub fn add_param(&mut self, name: &str, value: impl AsRef<[u8]>) {
        self.params.push(name, value.as_ref());
    }

    /// Path parameters registered for this acquisition.
    #[inline]
    pub fn params(&self) -> &Params {
        &self.params
    }

    /// First query-string value for `name`, empty if absent.
    #[inline]
    pub fn query(&self, name: &str) -> &str {
        self.transport()
            .and_then(|r| r.query_args().peek(name))
            .unwrap_or("")
    }

    /// Every query-string value for `name`, in document order.
    pub fn query_multi(&self, name: &str) -> Vec<&str> {
        self.transport()
            .map(|r| r.query_args().peek_multi(name))
            .unwrap_or_default()
    }

    /// First form-body value for `name`, empty if absent.
    #[inline]
    pub fn post(&self, name: &str) -> &str {
        self.transport()
            .and_then(|r| r.post_args().peek(name))
            .unwrap_or("")
    }

    /// Every form-body value for `name`, in document order.
    pub fn post_multi(&self, name: &str) -> Vec<&str> {
        self.transport()
            .map(|r| r.post_args().peek_multi(name))
            .unwrap_or_default()
    }

    /// Named cookie value, empty if absent.
    #[inline]
    pub fn cookie(&self, name: &str) -> &str {
        self.transport()
            .and_then(|r| r.cookies().peek(name))
            .unwrap_or("")
    }

    /// Deserialize the JSON request body.
    ///
    /// A released context has an empty body and fails like any other
    /// empty input.
    pub fn data<T: DeserializeOwned>(&self) -> Result<T> {
        let body = self.transport().map_or(&[][..], |r| &r.body()[..]);
        Ok(serde_json::from_slice(body)?)
    }

    /// Deserialize the JSON request body into `dst`.
    ///
    /// `dst` is only overwritten on success.
    pub fn data_into<T: DeserializeOwned>(&self, dst: &mut T) -> Result<()> {
        *dst = self.data()?;
        Ok(())
    }

    /// Current cancellation token.
    #[inline]
    pub fn context(&self) -> Option<&CancelContext> {
        self.cancel.as_ref()
    }

    /// Replace the cancellation token on this context.
    ///
    /// Returns the same context so calls can be chained.
    #[inline]
    pub fn with_context(&mut self, cancel: CancelContext) -> &mut Self {
        self.cancel = Some(cancel);
        self
    }

    /// True if Content-Type is `application/json`, optionally followed by
    /// `;` and parameters. `application/json-patch+json` does not match.
    pub fn is_json(&self) -> bool {
        let ct = self
            .transport()
            .and_then(Request::content_type_bytes)
            .unwrap_or_default();
        let laj = APPLICATION_JSON.len();

        ct == APPLICATION_JSON
            || (laj < ct.len() && &ct[..laj] == APPLICATION_JSON && ct[laj] == b';')
    }

    /// True if Accept starts with `application/json`.
    ///
    /// Only a prefix test, so `application/json-ld` matches as well.
    pub fn wants_json(&self) -> bool {
        self.transport()
            .and_then(Request::accept_bytes)
            .is_some_and(|accept| accept.starts_with(APPLICATION_JSON))
    }
}
