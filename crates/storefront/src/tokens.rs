//! Access/refresh token pair persisted in local storage.

use std::fmt;
use std::sync::Arc;

use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::storage::{LocalStorage, StorageError, keys, load_json, store_json};

/// The token pair issued by the API.
#[derive(Clone, Default)]
pub struct AuthTokens {
    pub access_token: Option<SecretString>,
    pub refresh_token: Option<SecretString>,
}

impl AuthTokens {
    #[must_use]
    pub fn new(access_token: impl Into<String>, refresh_token: impl Into<String>) -> Self {
        Self {
            access_token: Some(SecretString::from(access_token.into())),
            refresh_token: Some(SecretString::from(refresh_token.into())),
        }
    }

    #[must_use]
    pub fn access(&self) -> Option<&str> {
        self.access_token.as_ref().map(|s| s.expose_secret())
    }

    #[must_use]
    pub fn refresh(&self) -> Option<&str> {
        self.refresh_token.as_ref().map(|s| s.expose_secret())
    }
}

impl fmt::Debug for AuthTokens {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let redact = |present: bool| if present { "[REDACTED]" } else { "None" };
        f.debug_struct("AuthTokens")
            .field("access_token", &redact(self.access_token.is_some()))
            .field("refresh_token", &redact(self.refresh_token.is_some()))
            .finish()
    }
}

/// On-disk shape: `{"accessToken": ..., "refreshToken": ...}`.
#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoredTokens {
    access_token: Option<String>,
    refresh_token: Option<String>,
}

/// Reads and writes the token pair under the `auth_tokens` key.
#[derive(Clone)]
pub struct TokenManager {
    storage: Arc<dyn LocalStorage>,
}

impl TokenManager {
    #[must_use]
    pub fn new(storage: Arc<dyn LocalStorage>) -> Self {
        Self { storage }
    }

    /// Store both tokens.
    ///
    /// # Errors
    ///
    /// Returns an error if local storage cannot be written.
    pub fn set_tokens(&self, access_token: &str, refresh_token: &str) -> Result<(), StorageError> {
        let stored = StoredTokens {
            access_token: Some(access_token.to_string()),
            refresh_token: Some(refresh_token.to_string()),
        };
        store_json(self.storage.as_ref(), keys::AUTH_TOKENS, &stored)
    }

    /// Current tokens; both fields are `None` when nothing is stored.
    #[must_use]
    pub fn get_tokens(&self) -> AuthTokens {
        load_json::<StoredTokens>(self.storage.as_ref(), keys::AUTH_TOKENS).map_or_else(
            AuthTokens::default,
            |stored| AuthTokens {
                access_token: stored.access_token.map(SecretString::from),
                refresh_token: stored.refresh_token.map(SecretString::from),
            },
        )
    }

    /// Forget both tokens. Failures are logged, never surfaced.
    pub fn clear_tokens(&self) {
        if let Err(e) = self.storage.remove_item(keys::AUTH_TOKENS) {
            warn!(error = %e, "Failed to clear stored tokens");
        }
    }

    /// Whether an access token is present (it may still be expired).
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.get_tokens().access_token.is_some()
    }
}
