use crate::client::Artifacts;
use crate::credentials::CredentialOverride;
use http::header::{HeaderMap, HeaderValue, IntoHeaderName};
use http::Method;

/// Per-call Hawk options.
///
/// Every field is optional; a field left unset takes its value from the global settings.  The
/// interceptor fills in `artifacts` when it signs the request.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct HawkOptions {
    pub enabled: Option<bool>,
    pub credentials: Option<CredentialOverride>,
    pub algorithm: Option<String>,
    pub check_server_authorization: Option<bool>,
    pub artifacts: Option<Artifacts>,
}

impl HawkOptions {
    pub fn new() -> Self {
        HawkOptions::default()
    }

    /// Force Hawk processing on or off for this call.
    pub fn enabled(mut self, enabled: bool) -> Self {
        self.enabled = Some(enabled);
        self
    }

    /// Use this id and key instead of the global credentials.
    pub fn credentials<S1, S2>(mut self, id: S1, key: S2) -> Self
    where
        S1: Into<String>,
        S2: Into<String>,
    {
        self.credentials = Some(CredentialOverride::new(id, key));
        self
    }

    /// Use this algorithm instead of the global one.  It must be supported by the Hawk client.
    pub fn algorithm<S: Into<String>>(mut self, algorithm: S) -> Self {
        self.algorithm = Some(algorithm.into());
        self
    }

    /// Override the server-authorization mode for the response to this call only.
    pub fn check_server_authorization(mut self, check: bool) -> Self {
        self.check_server_authorization = Some(check);
        self
    }
}

/// An outgoing HTTP request, as seen by the interceptor.
///
/// The URL may be relative, in which case it is qualified with the interceptor's origin before
/// signing.
///
/// # Examples
///
/// ```
/// use hawk_interceptor::{HawkOptions, Request};
/// use http::Method;
///
/// let request = Request::new(Method::POST, "/api/user")
///     .hawk(HawkOptions::new().algorithm("sha1"));
/// assert!(request.hawk.is_some());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Request {
    pub url: String,
    pub method: Method,
    pub headers: HeaderMap,
    pub hawk: Option<HawkOptions>,
}

impl Request {
    pub fn new<S: Into<String>>(method: Method, url: S) -> Self {
        Request {
            url: url.into(),
            method,
            headers: HeaderMap::new(),
            hawk: None,
        }
    }

    /// Add a header to the request.
    pub fn header<K: IntoHeaderName>(mut self, name: K, value: HeaderValue) -> Self {
        self.headers.insert(name, value);
        self
    }

    /// Attach per-call Hawk options.
    pub fn hawk(mut self, options: HawkOptions) -> Self {
        self.hawk = Some(options);
        self
    }

    /// The artifacts from signing this request, if it has been signed.
    pub fn artifacts(&self) -> Option<&Artifacts> {
        self.hawk.as_ref().and_then(|h| h.artifacts.as_ref())
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use http::header::CONTENT_TYPE;

    #[test]
    fn test_empty() {
        let req = Request::new(Method::GET, "/foo");
        assert_eq!(req.url, "/foo");
        assert_eq!(req.method, Method::GET);
        assert!(req.headers.is_empty());
        assert_eq!(req.hawk, None);
        assert_eq!(req.artifacts(), None);
    }

    #[test]
    fn test_builder() {
        let req = Request::new(Method::PUT, "https://example.com/foo")
            .header(CONTENT_TYPE, HeaderValue::from_static("text/plain"))
            .hawk(
                HawkOptions::new()
                    .enabled(true)
                    .credentials("me", "sekrit")
                    .algorithm("sha1")
                    .check_server_authorization(false),
            );
        assert_eq!(req.headers.get("content-type").unwrap(), "text/plain");
        let hawk = req.hawk.unwrap();
        assert_eq!(hawk.enabled, Some(true));
        assert_eq!(hawk.credentials, Some(CredentialOverride::new("me", "sekrit")));
        assert_eq!(hawk.algorithm.as_deref(), Some("sha1"));
        assert_eq!(hawk.check_server_authorization, Some(false));
        assert_eq!(hawk.artifacts, None);
    }

    #[test]
    fn test_builder_clone() {
        let base = Request::new(Method::GET, "/foo").hawk(HawkOptions::new().enabled(false));
        let mut other = base.clone();
        other.url = "/bar".to_string();
        assert_eq!(base.url, "/foo");
        assert_eq!(other.url, "/bar");
        assert_eq!(other.hawk, base.hawk);
    }
}
