use crate::credentials::Credentials;
use crate::origin;
use crate::response::Response;
use failure::Fail;
use once_cell::sync::OnceCell;
use std::any::Any;
use std::fmt;
use std::sync::Arc;

/// Values produced while signing a request (timestamp, nonce, MAC and the like) that the Hawk
/// client needs again to validate the server's response.
///
/// The interceptor never looks inside; only the client that created the artifacts can get at
/// their contents, using `downcast_ref`.
#[derive(Clone)]
pub struct Artifacts(Arc<dyn Any + Send + Sync>);

impl Artifacts {
    pub fn new<T: Any + Send + Sync>(value: T) -> Self {
        Artifacts(Arc::new(value))
    }

    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.0.downcast_ref::<T>()
    }
}

impl fmt::Debug for Artifacts {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("Artifacts(..)")
    }
}

/// Two handles are equal when they refer to the same artifacts.
impl PartialEq for Artifacts {
    fn eq(&self, other: &Artifacts) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

/// Options for generating a request header.
#[derive(Debug, Clone, PartialEq)]
pub struct HeaderOptions {
    pub credentials: Credentials,
}

/// A generated `Authorization` header value, and the artifacts used to generate it.
#[derive(Debug, Clone, PartialEq)]
pub struct SignedHeader {
    pub field: String,
    pub artifacts: Artifacts,
}

/// Options for validating a response.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AuthenticateOptions<'a> {
    /// If true, a response without a `Server-Authorization` header fails validation.
    pub required: bool,

    /// The response body, supplied when the server sent a payload hash.
    pub payload: Option<&'a [u8]>,
}

/// The Hawk protocol implementation the interceptor delegates to.  Computing MACs, generating
/// nonces and timestamps, and parsing `Server-Authorization` headers all happen behind this
/// trait.
pub trait HawkClient: Send + Sync {
    /// Generate an `Authorization` header value for the given absolute URL and method.  An error
    /// is reported as a message.
    fn header(
        &self,
        url: &str,
        method: &str,
        options: &HeaderOptions,
    ) -> Result<SignedHeader, String>;

    /// Validate the server's `Server-Authorization` header for a response, using the artifacts
    /// produced when the request was signed.
    fn authenticate(
        &self,
        response: &Response,
        credentials: &Credentials,
        artifacts: Option<&Artifacts>,
        options: &AuthenticateOptions,
    ) -> bool;

    /// The algorithm names a call may select.
    fn supported_algorithms(&self) -> &[&str] {
        &["sha1", "sha256"]
    }

    /// Whether the URL is already absolute and needs no origin prefix.
    fn is_absolute_url(&self, url: &str) -> bool {
        origin::is_absolute_url(url)
    }
}

static CLIENT: OnceCell<&'static dyn HawkClient> = OnceCell::new();

#[derive(Debug, Fail)]
#[fail(display = "Hawk client already initialized")]
pub struct SetClientError(());

/// Sets the global Hawk client used by interceptors that are not given one explicitly.
///
/// This is a convenience wrapper over [`set_client`], but takes a `Box<dyn HawkClient>`
/// instead.
pub fn set_boxed_client(c: Box<dyn HawkClient>) -> Result<(), SetClientError> {
    set_client(Box::leak(c))
}

/// Sets the global Hawk client used by interceptors that are not given one explicitly.
///
/// This function may only be called once in the lifetime of a program.
pub fn set_client(c: &'static dyn HawkClient) -> Result<(), SetClientError> {
    CLIENT.set(c).map_err(|_| SetClientError(()))
}

pub(crate) fn get_client() -> Option<&'static dyn HawkClient> {
    CLIENT.get().copied()
}
