use crate::error::*;
use crate::request::HawkOptions;
use crate::settings::Settings;
use std::fmt;

/// An id and key supplied for a single call, replacing the global credentials.
///
/// Both fields are replaced together; there is no way to override only one of them.
#[derive(Clone, PartialEq, Default)]
pub struct CredentialOverride {
    pub id: Option<String>,
    pub key: Option<String>,
}

impl CredentialOverride {
    pub fn new<S1, S2>(id: S1, key: S2) -> Self
    where
        S1: Into<String>,
        S2: Into<String>,
    {
        CredentialOverride {
            id: Some(id.into()),
            key: Some(key.into()),
        }
    }
}

impl fmt::Debug for CredentialOverride {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("CredentialOverride")
            .field("id", &self.id)
            .field("key", &self.key.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

/// The result of merging global and per-call credentials, before checking that an id and key
/// were actually found.
#[derive(Clone, PartialEq)]
pub struct CredentialSet {
    pub id: Option<String>,
    pub key: Option<String>,
    pub algorithm: String,
}

impl CredentialSet {
    /// Merge the global settings with the per-call options.
    ///
    /// An algorithm override must be one of `supported`, otherwise this fails with
    /// `Error::Algorithm`.  Missing ids or keys are not an error here; see `complete`.
    pub fn resolve(
        settings: &Settings,
        options: Option<&HawkOptions>,
        supported: &[&str],
    ) -> Result<CredentialSet> {
        let mut set = CredentialSet {
            id: settings.credentials.id.clone(),
            key: settings.credentials.secret.clone(),
            algorithm: settings.algorithm.clone(),
        };

        let options = match options {
            Some(options) => options,
            None => return Ok(set),
        };

        if let Some(ref creds) = options.credentials {
            set.id = creds.id.clone();
            set.key = creds.key.clone();
        }

        if let Some(ref algorithm) = options.algorithm {
            if !supported.contains(&algorithm.as_str()) {
                return Err(Error::Algorithm(algorithm.clone()));
            }
            set.algorithm = algorithm.clone();
        }

        Ok(set)
    }

    /// Convert to `Credentials`, failing with `Error::MissingCredentials` if either the id or
    /// the key is missing.
    pub fn complete(self) -> Result<Credentials> {
        match (self.id, self.key) {
            (Some(id), Some(key)) => Ok(Credentials {
                id,
                key,
                algorithm: self.algorithm,
            }),
            _ => Err(Error::MissingCredentials),
        }
    }
}

impl fmt::Debug for CredentialSet {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("CredentialSet")
            .field("id", &self.id)
            .field("key", &self.key.as_ref().map(|_| "<redacted>"))
            .field("algorithm", &self.algorithm)
            .finish()
    }
}

/// Hawk credentials: an id, the key associated with that id, and the digest algorithm agreed
/// between client and server.  These are recomputed for every call and never stored.
#[derive(Clone, PartialEq)]
pub struct Credentials {
    pub id: String,
    pub key: String,
    pub algorithm: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("id", &self.id)
            .field("key", &"<redacted>")
            .field("algorithm", &self.algorithm)
            .finish()
    }
}
