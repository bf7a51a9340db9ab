use serde::{Deserialize, Serialize};
use std::sync::{Arc, RwLock};

/// The algorithm used when neither the settings nor the call name one.
pub const DEFAULT_ALGORITHM: &str = "sha256";

/// The default id and secret used for every call that does not carry its own credentials.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SettingsCredentials {
    pub id: Option<String>,
    pub secret: Option<String>,
}

/// Process-wide Hawk settings.
///
/// Settings are plain values; a [`SettingsProvider`] hands out a fresh copy each time a hook
/// runs, so changes made by the owning configuration subsystem are seen by the next hook
/// invocation, but no hook can write back into them.
///
/// Settings can be built in code, using the builder methods, or deserialized from any serde
/// format:
///
/// ```
/// use hawk_interceptor::Settings;
/// let settings = Settings::new()
///     .credentials("dh37fgj492je", "werxhqb98rpaxn39848xrunpaw3489ruxnpa98w4rxn")
///     .check_server_authorization(true);
/// assert!(settings.enabled);
/// assert_eq!(settings.algorithm, "sha256");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Settings {
    pub enabled: bool,
    pub credentials: SettingsCredentials,
    pub algorithm: String,
    pub check_server_authorization: Option<bool>,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            enabled: true,
            credentials: SettingsCredentials::default(),
            algorithm: DEFAULT_ALGORITHM.to_string(),
            check_server_authorization: None,
        }
    }
}

impl Settings {
    pub fn new() -> Self {
        Settings::default()
    }

    /// Enable or disable Hawk processing for calls that do not say otherwise.
    pub fn enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    /// Set the default id and secret.
    pub fn credentials<S1, S2>(mut self, id: S1, secret: S2) -> Self
    where
        S1: Into<String>,
        S2: Into<String>,
    {
        self.credentials = SettingsCredentials {
            id: Some(id.into()),
            secret: Some(secret.into()),
        };
        self
    }

    pub fn algorithm<S: Into<String>>(mut self, algorithm: S) -> Self {
        self.algorithm = algorithm.into();
        self
    }

    /// Set the server-authorization mode: `Some(true)` requires a valid `Server-Authorization`
    /// header, `Some(false)` skips response validation, and `None` validates the header only if
    /// the server sent one.
    pub fn check_server_authorization<B: Into<Option<bool>>>(mut self, check: B) -> Self {
        self.check_server_authorization = check.into();
        self
    }
}

/// A source of the current global settings.
///
/// The provider is consulted every time a hook runs, never cached across the request and
/// response halves of a call.
pub trait SettingsProvider: Send + Sync {
    fn settings(&self) -> Settings;
}

impl SettingsProvider for Settings {
    fn settings(&self) -> Settings {
        self.clone()
    }
}

impl<F> SettingsProvider for F
where
    F: Fn() -> Settings + Send + Sync,
{
    fn settings(&self) -> Settings {
        self()
    }
}

/// Settings shared between the configuration subsystem that owns them and any number of
/// interceptors.  Clones share the same underlying settings.
#[derive(Debug, Clone, Default)]
pub struct SharedSettings(Arc<RwLock<Settings>>);

impl SharedSettings {
    pub fn new(settings: Settings) -> Self {
        SharedSettings(Arc::new(RwLock::new(settings)))
    }

    /// Modify the shared settings in place.  Hooks that run after this returns see the change.
    pub fn update<F>(&self, f: F)
    where
        F: FnOnce(&mut Settings),
    {
        // a panic while holding the lock leaves the settings as the panicking writer left them
        let mut guard = match self.0.write() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        f(&mut guard);
    }
}

impl SettingsProvider for SharedSettings {
    fn settings(&self) -> Settings {
        match self.0.read() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_defaults() {
        let s = Settings::default();
        assert!(s.enabled);
        assert_eq!(s.credentials, SettingsCredentials::default());
        assert_eq!(s.algorithm, "sha256");
        assert_eq!(s.check_server_authorization, None);
    }

    #[test]
    fn test_builder() {
        let s = Settings::new()
            .enabled(false)
            .credentials("me", "sekrit")
            .algorithm("sha1")
            .check_server_authorization(false);
        assert!(!s.enabled);
        assert_eq!(s.credentials.id.as_deref(), Some("me"));
        assert_eq!(s.credentials.secret.as_deref(), Some("sekrit"));
        assert_eq!(s.algorithm, "sha1");
        assert_eq!(s.check_server_authorization, Some(false));
    }

    #[test]
    fn test_deserialize() {
        let s: Settings = serde_json::from_str(
            r#"{
                "enabled": false,
                "credentials": {"id": "me", "secret": "sekrit"},
                "checkServerAuthorization": true
            }"#,
        )
        .unwrap();
        assert_eq!(
            s,
            Settings::new()
                .enabled(false)
                .credentials("me", "sekrit")
                .check_server_authorization(true)
        );
    }

    #[test]
    fn test_shared_settings_update_visible_to_clones() {
        let shared = SharedSettings::new(Settings::new());
        let other = shared.clone();
        shared.update(|s| s.enabled = false);
        assert!(!other.settings().enabled);
    }

    #[test]
    fn test_closure_provider() {
        let provider = || Settings::new().algorithm("sha1");
        assert_eq!(provider.settings().algorithm, "sha1");
    }
}
