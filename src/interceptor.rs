use crate::client::{self, AuthenticateOptions, HawkClient, HeaderOptions};
use crate::credentials::{CredentialSet, Credentials};
use crate::error::*;
use crate::origin::{self, Origin};
use crate::policy::is_disabled;
use crate::request::Request;
use crate::response::{Response, SERVER_AUTHORIZATION};
use crate::settings::{Settings, SettingsProvider};
use http::header::{HeaderValue, AUTHORIZATION, WWW_AUTHENTICATE};
use http::StatusCode;
use log::{debug, trace, warn};
use std::fmt;
use std::ops::Deref;
use std::sync::Arc;

/// The hooks an HTTP pipeline calls around each exchange.
///
/// For a given call, `on_request` always completes before either response hook runs, and a
/// rejected request is never sent, so no response hook runs for it.
pub trait Interceptor {
    /// Process an outgoing request before it is sent.
    fn on_request(&self, request: Request) -> std::result::Result<Request, Rejection<Request>>;

    /// Process a successful response.
    fn on_response(
        &self,
        response: Response,
    ) -> std::result::Result<Response, Rejection<Response>>;

    /// Process an error response.
    fn on_response_error(
        &self,
        response: Response,
    ) -> std::result::Result<Response, Rejection<Response>>;
}

enum ClientHandle {
    Global(&'static dyn HawkClient),
    Owned(Arc<dyn HawkClient>),
}

impl Deref for ClientHandle {
    type Target = dyn HawkClient;

    fn deref(&self) -> &(dyn HawkClient + 'static) {
        match self {
            ClientHandle::Global(c) => *c,
            ClientHandle::Owned(c) => &**c,
        }
    }
}

/// Signs outgoing requests with a Hawk `Authorization` header and validates the server's
/// `Server-Authorization` header on responses.
///
/// Whether a call is processed at all is decided each time a hook runs, from the settings
/// current at that moment combined with the call's own `HawkOptions`.
pub struct HawkInterceptor {
    settings: Box<dyn SettingsProvider>,
    client: ClientHandle,
    origin: Option<Origin>,
}

impl fmt::Debug for HawkInterceptor {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("HawkInterceptor")
            .field("origin", &self.origin)
            .finish()
    }
}

impl HawkInterceptor {
    /// Start building an interceptor that reads its global settings from `settings`.
    pub fn builder<P: SettingsProvider + 'static>(settings: P) -> InterceptorBuilder {
        InterceptorBuilder {
            settings: Box::new(settings),
            client: None,
            origin: None,
        }
    }

    /// Sign a request.
    ///
    /// If Hawk processing is disabled for this call, the request is returned exactly as it was
    /// given.  Otherwise the returned request carries an `Authorization` header, an absolute
    /// URL, and the signing artifacts in its `hawk` options.  On failure the rejection carries
    /// the request as it was given.
    pub fn sign(&self, request: Request) -> std::result::Result<Request, Rejection<Request>> {
        let settings = self.settings.settings();
        let enabled = request.hawk.as_ref().and_then(|h| h.enabled);
        if is_disabled(settings.enabled, enabled) {
            trace!("Hawk disabled for {} {}", request.method, request.url);
            return Ok(request);
        }

        debug!("intercepting http request");
        let (url, field, artifacts) = match self.make_header(&settings, &request) {
            Ok(signed) => signed,
            Err(reason) => {
                warn!("rejecting {} {}: {}", request.method, request.url, reason.code());
                return Err(Rejection::new(reason, request));
            }
        };

        let mut signed = request;
        signed.url = url;
        signed.headers.insert(AUTHORIZATION, field);
        signed.hawk.get_or_insert_with(Default::default).artifacts = Some(artifacts);
        Ok(signed)
    }

    fn make_header(
        &self,
        settings: &Settings,
        request: &Request,
    ) -> Result<(String, HeaderValue, client::Artifacts)> {
        let credentials = self.credentials(settings, request)?;

        let url = match self.origin {
            Some(ref origin) => {
                origin::normalize(&request.url, origin, |u| self.client.is_absolute_url(u))
            }
            None => request.url.clone(),
        };

        let options = HeaderOptions { credentials };
        let header = self
            .client
            .header(&url, request.method.as_str(), &options)
            .map_err(Error::HeaderGeneration)?;
        let field = HeaderValue::from_str(&header.field)
            .map_err(|e| Error::HeaderGeneration(e.to_string()))?;

        Ok((url, field, header.artifacts))
    }

    fn credentials(&self, settings: &Settings, request: &Request) -> Result<Credentials> {
        CredentialSet::resolve(
            settings,
            request.hawk.as_ref(),
            self.client.supported_algorithms(),
        )?
        .complete()
    }

    /// Reject a response that is a Hawk challenge: a 401 whose `WWW-Authenticate` header is
    /// exactly `Hawk`.  This happens whether or not Hawk processing is enabled, since the caller
    /// must learn that authentication is required even if it opted out of signing.
    pub fn check_challenge(
        &self,
        response: Response,
    ) -> std::result::Result<Response, Rejection<Response>> {
        if response.status == StatusCode::UNAUTHORIZED
            && response.get_response_header(WWW_AUTHENTICATE.as_str()) == Some("Hawk")
        {
            warn!("Hawk authentication required for {}", response.config.url);
            return Err(Rejection::new(Error::HawkAuthenticationRequired, response));
        }
        Ok(response)
    }

    /// Validate the server's signature on a response.
    ///
    /// The response is returned unchanged if Hawk processing is disabled for the call, if
    /// server-authorization checking is turned off, or if the Hawk client accepts it.  A
    /// per-call `check_server_authorization` applies to this response only.
    pub fn validate(
        &self,
        response: Response,
    ) -> std::result::Result<Response, Rejection<Response>> {
        let settings = self.settings.settings();
        let options = response.config.hawk.as_ref();
        let enabled = options.and_then(|h| h.enabled);
        let check = options
            .and_then(|h| h.check_server_authorization)
            .or(settings.check_server_authorization);

        if is_disabled(settings.enabled, enabled) || check == Some(false) {
            trace!("Hawk response validation skipped for {}", response.config.url);
            return Ok(response);
        }

        debug!("intercepting http response");
        let reason = match self.authenticate(&settings, check == Some(true), &response) {
            Ok(true) => return Ok(response),
            Ok(false) => Error::ResponseValidation,
            Err(reason) => reason,
        };
        warn!("rejecting response for {}: {}", response.config.url, reason.code());
        Err(Rejection::new(reason, response))
    }

    fn authenticate(
        &self,
        settings: &Settings,
        required: bool,
        response: &Response,
    ) -> Result<bool> {
        let credentials = self.credentials(settings, &response.config)?;

        let mut options = AuthenticateOptions {
            required,
            payload: None,
        };
        // the payload is only hashed if the server sent a hash to compare against
        if let Some(header) = response.get_response_header(SERVER_AUTHORIZATION) {
            if header.contains("hash=\"") {
                options.payload = response.data.as_deref();
            }
        }

        Ok(self.client.authenticate(
            response,
            &credentials,
            response.config.artifacts(),
            &options,
        ))
    }
}

impl Interceptor for HawkInterceptor {
    fn on_request(&self, request: Request) -> std::result::Result<Request, Rejection<Request>> {
        self.sign(request)
    }

    fn on_response(
        &self,
        response: Response,
    ) -> std::result::Result<Response, Rejection<Response>> {
        self.check_challenge(response)
            .and_then(|response| self.validate(response))
    }

    fn on_response_error(
        &self,
        response: Response,
    ) -> std::result::Result<Response, Rejection<Response>> {
        self.check_challenge(response)
    }
}

/// Builder for a `HawkInterceptor`.
pub struct InterceptorBuilder {
    settings: Box<dyn SettingsProvider>,
    client: Option<Arc<dyn HawkClient>>,
    origin: Option<Origin>,
}

impl InterceptorBuilder {
    /// Use this Hawk client rather than the globally registered one.
    pub fn client<C: HawkClient + 'static>(mut self, client: C) -> Self {
        self.client = Some(Arc::new(client));
        self
    }

    /// Use a Hawk client shared with other interceptors.
    pub fn shared_client(mut self, client: Arc<dyn HawkClient>) -> Self {
        self.client = Some(client);
        self
    }

    /// Qualify relative request URLs with this origin before signing.
    pub fn origin(mut self, origin: Origin) -> Self {
        self.origin = Some(origin);
        self
    }

    /// Build the interceptor.  This fails with `Error::HawkUnavailable` if no client was given
    /// and none has been registered with `set_client`.
    pub fn build(self) -> Result<HawkInterceptor> {
        let client = match self.client {
            Some(client) => ClientHandle::Owned(client),
            None => ClientHandle::Global(client::get_client().ok_or(Error::HawkUnavailable)?),
        };
        Ok(HawkInterceptor {
            settings: self.settings,
            client,
            origin: self.origin,
        })
    }
}
