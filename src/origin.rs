use url::Url;

/// The port for which no `:port` suffix is written when qualifying a relative URL.
const DEFAULT_PORT: u16 = 80;

/// The scheme, host, and port of the page or service that issues requests.  Relative request
/// URLs are resolved against it before signing, since a Hawk MAC covers the host and port.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Origin {
    scheme: String,
    host: String,
    port: u16,
}

impl Origin {
    pub fn new<S1, S2>(scheme: S1, host: S2, port: u16) -> Self
    where
        S1: Into<String>,
        S2: Into<String>,
    {
        Origin {
            scheme: scheme.into(),
            host: host.into(),
            port,
        }
    }

    /// Take the origin from an absolute URL, using the scheme's known default port if the URL
    /// does not give one.
    pub fn from_url(url: &Url) -> Option<Self> {
        let host = url.host_str()?;
        let port = url.port_or_known_default()?;
        Some(Origin::new(url.scheme(), host, port))
    }

    pub fn scheme(&self) -> &str {
        &self.scheme
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    /// Prefix a relative URL with this origin.
    ///
    /// Note that only port 80 is omitted, whatever the scheme.
    pub fn qualify(&self, url: &str) -> String {
        let mut qualified = format!("{}://{}", self.scheme, self.host);
        if self.port != DEFAULT_PORT {
            qualified.push_str(&format!(":{}", self.port));
        }
        qualified.push_str(url);
        qualified
    }
}

/// Return `url` unchanged if `is_absolute` says it is already absolute, otherwise qualify it
/// with `origin`.
pub fn normalize<F>(url: &str, origin: &Origin, is_absolute: F) -> String
where
    F: Fn(&str) -> bool,
{
    if is_absolute(url) {
        url.to_string()
    } else {
        origin.qualify(url)
    }
}

/// Default test for an absolute URL: anything the `url` crate parses without a base.
pub fn is_absolute_url(url: &str) -> bool {
    Url::parse(url).is_ok()
}
