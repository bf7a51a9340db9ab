use crate::request::Request;
use http::header::{HeaderMap, HeaderValue, IntoHeaderName};
use http::StatusCode;

/// The header in which a Hawk server signs its response.
pub const SERVER_AUTHORIZATION: &str = "server-authorization";

/// An incoming HTTP response, as seen by the interceptor.
///
/// The response carries the request that produced it, which is how the interceptor recovers
/// the per-call options and the artifacts from signing.
#[derive(Debug, Clone, PartialEq)]
pub struct Response {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub data: Option<Vec<u8>>,
    pub config: Request,
}

impl Response {
    pub fn new(status: StatusCode, config: Request) -> Self {
        Response {
            status,
            headers: HeaderMap::new(),
            data: None,
            config,
        }
    }

    /// Add a header to the response.
    pub fn header<K: IntoHeaderName>(mut self, name: K, value: HeaderValue) -> Self {
        self.headers.insert(name, value);
        self
    }

    /// Set the response body.
    pub fn data<B: Into<Vec<u8>>>(mut self, data: B) -> Self {
        self.data = Some(data.into());
        self
    }

    /// Look up a header by name, case-insensitively.  Headers that are not valid visible ASCII
    /// are treated as absent.
    pub fn get_response_header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }
}
