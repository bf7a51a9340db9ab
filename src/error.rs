use failure::Fail;
use std::fmt;

pub type Result<T> = std::result::Result<T, Error>;

/// The reasons a request or response can be refused by the interceptor.
#[derive(Fail, Debug, Clone, PartialEq)]
pub enum Error {
    #[fail(display = "No Hawk client is available")]
    HawkUnavailable,

    #[fail(display = "Unsupported Hawk algorithm `{}`", _0)]
    Algorithm(String),

    #[fail(display = "Missing Hawk credentials")]
    MissingCredentials,

    #[fail(display = "Error generating Hawk header: \"{}\"", _0)]
    HeaderGeneration(String),

    #[fail(display = "Hawk authentication required")]
    HawkAuthenticationRequired,

    #[fail(display = "Hawk response validation failed")]
    ResponseValidation,
}

impl Error {
    /// The stable name of this failure, suitable for matching on in host code.
    pub fn code(&self) -> &'static str {
        match self {
            Error::HawkUnavailable => "HAWK_UNAVAILABLE",
            Error::Algorithm(_) => "ALGORITHM",
            Error::MissingCredentials => "MISSING_CREDENTIALS",
            Error::HeaderGeneration(_) => "HEADER_GENERATION",
            Error::HawkAuthenticationRequired => "HAWK_AUTHENTICATION_REQUIRED",
            Error::ResponseValidation => "RESPONSE_VALIDATION",
        }
    }
}

/// A refused request or response, carrying the object that was refused so the caller can
/// diagnose the failure and re-issue the call if appropriate.
#[derive(Debug, Clone, PartialEq)]
pub struct Rejection<T> {
    pub reason: Error,
    pub subject: T,
}

impl<T> Rejection<T> {
    pub fn new(reason: Error, subject: T) -> Self {
        Rejection { reason, subject }
    }

    /// Discard the rejected object, keeping only the reason.
    pub fn into_reason(self) -> Error {
        self.reason
    }

    pub fn into_subject(self) -> T {
        self.subject
    }
}

impl<T> fmt::Display for Rejection<T> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.reason)
    }
}

impl<T> Fail for Rejection<T>
where
    T: fmt::Debug + Send + Sync + 'static,
{
    fn cause(&self) -> Option<&dyn Fail> {
        Some(&self.reason)
    }
}
