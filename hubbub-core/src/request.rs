//! Request handles: the transport seam of the hub
//!
//! A [`RequestHandle`] is a single-use, mutable description of one outgoing
//! hub request. Handles come from a [`RequestHandleFactory`] and are consumed
//! by [`RequestHandle::execute`], so the type system guarantees they are sent
//! at most once.

use crate::{ParameterSet, Result};
use async_trait::async_trait;
use http::{HeaderMap, HeaderName, HeaderValue, Method, StatusCode};

/// The mutable state of a request that has not been sent yet
#[derive(Debug, Clone, PartialEq)]
pub struct PendingRequest {
    /// Target URL
    pub url: String,
    /// HTTP method, POST unless a component changes it
    pub method: Method,
    /// Request headers
    pub headers: HeaderMap,
    /// Body fields, assigned once by the hub
    pub body_fields: ParameterSet,
}

impl PendingRequest {
    /// Create a POST request to `url` with no headers or body
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            method: Method::POST,
            headers: HeaderMap::new(),
            body_fields: ParameterSet::new(),
        }
    }

    /// Set a header, replacing any previous value
    pub fn set_header(&mut self, name: &str, value: &str) -> Result<()> {
        let name = HeaderName::try_from(name)?;
        let value = HeaderValue::try_from(value)?;
        self.headers.insert(name, value);
        Ok(())
    }

    /// Get a header value as a string
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }
}

/// A pending hub request that can be mutated and then executed once.
///
/// Components receive `&mut dyn RequestHandle` during the mutation phase; the
/// borrow ends when the hook returns, so a handle cannot outlive its call.
#[async_trait]
pub trait RequestHandle: Send {
    /// The request as currently configured
    fn request(&self) -> &PendingRequest;

    /// Mutable access to the request
    fn request_mut(&mut self) -> &mut PendingRequest;

    /// Perform the network call
    async fn execute(self: Box<Self>) -> Result<HubResponse>;

    /// Replace the body fields in one assignment
    fn set_body_fields(&mut self, fields: ParameterSet) {
        self.request_mut().body_fields = fields;
    }

    /// Set a header, replacing any previous value
    fn set_header(&mut self, name: &str, value: &str) -> Result<()> {
        self.request_mut().set_header(name, value)
    }

    /// Change the HTTP method
    fn set_method(&mut self, method: Method) {
        self.request_mut().method = method;
    }

    /// Retarget the request
    fn set_url(&mut self, url: &str) {
        self.request_mut().url = url.to_string();
    }
}

/// Creates fresh request handles bound to a URL
pub trait RequestHandleFactory: Send + Sync {
    /// Create an independent handle for `url`
    fn create(&self, url: &str) -> Result<Box<dyn RequestHandle>>;
}

/// The hub's answer to an executed request
#[derive(Debug, Clone)]
pub struct HubResponse {
    /// HTTP status code
    pub status: StatusCode,
    /// Response headers
    pub headers: HeaderMap,
    /// Response body
    pub body: Vec<u8>,
}

impl HubResponse {
    /// Create a response with no headers or body
    pub fn new(status: StatusCode) -> Self {
        Self {
            status,
            headers: HeaderMap::new(),
            body: Vec::new(),
        }
    }

    /// Attach a body
    pub fn with_body(mut self, body: impl Into<Vec<u8>>) -> Self {
        self.body = body.into();
        self
    }

    /// Check if the hub accepted the request (2xx)
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }

    /// Body as text, replacing invalid UTF-8
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}
