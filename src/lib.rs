//! The `hawk_interceptor` crate signs outgoing HTTP requests with
//! [Hawk](https://github.com/hueniverse/hawk) and validates the server's signature on the
//! responses.
//!
//! It sits between an HTTP client and its transport: the pipeline hands each request to
//! [`Interceptor::on_request`] before sending it, and each response to
//! [`Interceptor::on_response`] (or [`Interceptor::on_response_error`] for error statuses).
//! The Hawk protocol itself (MAC calculation, nonces, header parsing) is supplied by a
//! [`HawkClient`] implementation.
//!
//! Global [`Settings`] say whether Hawk is enabled, which credentials and algorithm to use, and
//! whether the server's `Server-Authorization` header must be checked.  Each request may carry
//! [`HawkOptions`] overriding any of these for that call alone.
//!
//! # Examples
//!
//! ```
//! use hawk_interceptor::{
//!     Artifacts, AuthenticateOptions, Credentials, HawkClient, HawkInterceptor, HeaderOptions,
//!     Interceptor, Origin, Request, Response, Settings, SignedHeader,
//! };
//! use http::{Method, StatusCode};
//!
//! // a stand-in for a real Hawk implementation
//! struct Client;
//!
//! impl HawkClient for Client {
//!     fn header(&self, url: &str, method: &str, options: &HeaderOptions)
//!         -> Result<SignedHeader, String>
//!     {
//!         Ok(SignedHeader {
//!             field: format!("Hawk id=\"{}\", mac=\"...\"", options.credentials.id),
//!             artifacts: Artifacts::new((url.to_string(), method.to_string())),
//!         })
//!     }
//!
//!     fn authenticate(&self, _response: &Response, _credentials: &Credentials,
//!                     artifacts: Option<&Artifacts>, _options: &AuthenticateOptions) -> bool {
//!         artifacts.is_some()
//!     }
//! }
//!
//! let settings = Settings::new().credentials("dh37fgj492je", "werxhqb98rpaxn39848xrunpaw3489ruxnpa98w4rxn");
//! let interceptor = HawkInterceptor::builder(settings)
//!     .client(Client)
//!     .origin(Origin::new("https", "example.com", 443))
//!     .build()
//!     .unwrap();
//!
//! let request = interceptor.on_request(Request::new(Method::GET, "/resource")).unwrap();
//! assert_eq!(request.url, "https://example.com:443/resource");
//! assert!(request.headers["authorization"].to_str().unwrap().starts_with("Hawk id="));
//!
//! let response = Response::new(StatusCode::OK, request);
//! assert!(interceptor.on_response(response).is_ok());
//! ```
//!
//! A failure is reported as a [`Rejection`], carrying the request or response that was refused:
//!
//! ```
//! # use hawk_interceptor::{
//! #     Artifacts, AuthenticateOptions, Credentials, Error, HawkClient, HawkInterceptor,
//! #     HeaderOptions, Interceptor, Request, Response, Settings, SignedHeader,
//! # };
//! # use http::Method;
//! # struct Client;
//! # impl HawkClient for Client {
//! #     fn header(&self, _: &str, _: &str, _: &HeaderOptions) -> Result<SignedHeader, String> {
//! #         Err("unreachable".to_string())
//! #     }
//! #     fn authenticate(&self, _: &Response, _: &Credentials, _: Option<&Artifacts>,
//! #                     _: &AuthenticateOptions) -> bool { false }
//! # }
//! let interceptor = HawkInterceptor::builder(Settings::new())
//!     .client(Client)
//!     .build()
//!     .unwrap();
//! let rejection = interceptor
//!     .on_request(Request::new(Method::GET, "https://example.com/"))
//!     .unwrap_err();
//! assert_eq!(rejection.reason, Error::MissingCredentials);
//! assert_eq!(rejection.subject.url, "https://example.com/");
//! ```
//!
//! ## Registering a global client
//!
//! An interceptor built without an explicit client uses the one registered with [`set_client`]
//! or [`set_boxed_client`].  If there is none, [`InterceptorBuilder::build`] fails with
//! [`Error::HawkUnavailable`], so a missing Hawk implementation is caught at startup rather
//! than on the first request.

mod client;
mod credentials;
mod error;
mod interceptor;
mod origin;
mod policy;
mod request;
mod response;
mod settings;

pub use crate::client::{
    set_boxed_client, set_client, Artifacts, AuthenticateOptions, HawkClient, HeaderOptions,
    SetClientError, SignedHeader,
};
pub use crate::credentials::{CredentialOverride, CredentialSet, Credentials};
pub use crate::error::*;
pub use crate::interceptor::{HawkInterceptor, Interceptor, InterceptorBuilder};
pub use crate::origin::{is_absolute_url, normalize, Origin};
pub use crate::policy::{is_disabled, Enablement};
pub use crate::request::{HawkOptions, Request};
pub use crate::response::{Response, SERVER_AUTHORIZATION};
pub use crate::settings::{
    Settings, SettingsCredentials, SettingsProvider, SharedSettings, DEFAULT_ALGORITHM,
};
