//! HTTP client for the storefront API.
//!
//! # Authentication
//!
//! Every request carries `Authorization: Bearer <access token>` when one is
//! stored. When such a request comes back `401 Unauthorized` the client:
//!
//! 1. exchanges the refresh token at `POST /auth/refresh-token`,
//! 2. stores the new access token next to the existing refresh token,
//! 3. replays the original request once with the new token.
//!
//! If the refresh fails the stored tokens are cleared and the call returns
//! [`ApiError::SessionExpired`]. Concurrent refreshes are serialized; a caller
//! that waited on another caller's refresh reuses its result.
//!
//! Requests sent without a token (login, signup) never trigger a refresh, so
//! a wrong password surfaces as a plain `401` status error.
//!
//! # Endpoint groups
//!
//! ```rust,ignore
//! let api = ApiClient::new(&config, tokens)?;
//! let payload = api.auth().login(&credentials).await?;
//! let addresses = api.address().list().await?;
//! let orders = api.orders().for_user(&user_id).await?;
//! ```

mod address;
mod auth;
mod orders;
mod payment;
mod profile;

pub use address::AddressApi;
pub use auth::{AuthApi, AuthCheck, AuthPayload, Credentials, RegisterRequest, SignupRequest};
pub use orders::OrdersApi;
pub use payment::{CheckoutLine, CheckoutSession, CheckoutSessionRequest, PaymentApi};
pub use profile::{PasswordChange, ProfileApi};

use std::sync::Arc;

use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::sync::Mutex;
use tracing::{debug, instrument, warn};

use crate::config::StorefrontConfig;
use crate::storage::StorageError;
use crate::tokens::TokenManager;

const REFRESH_ENDPOINT: &str = "/auth/refresh-token";
const ERROR_BODY_PREVIEW: usize = 200;

/// Errors that can occur when talking to the storefront API.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Transport failure (connect, timeout, TLS, body read).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The API answered with a non-success status.
    #[error("API error ({status}): {message}")]
    Status { status: StatusCode, message: String },

    /// The access token was rejected and could not be refreshed.
    #[error("Session expired, please sign in again")]
    SessionExpired,

    /// The API answered 2xx but reported `status != "success"`.
    #[error("Request rejected: {0}")]
    Rejected(String),

    /// JSON encoding or decoding failed.
    #[error("JSON error: {0}")]
    Parse(#[from] serde_json::Error),

    /// Token persistence failed.
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}

impl ApiError {
    /// The HTTP status behind this error, when there is one.
    #[must_use]
    pub const fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Status { status, .. } => Some(*status),
            Self::SessionExpired => Some(StatusCode::UNAUTHORIZED),
            _ => None,
        }
    }
}

/// The `{status, message, data}` wrapper used by the auth and address routes.
#[derive(Debug, Deserialize)]
pub struct Envelope<T> {
    pub status: String,
    #[serde(default)]
    pub message: Option<String>,
    pub data: Option<T>,
}

impl<T> Envelope<T> {
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.status.eq_ignore_ascii_case("success")
    }

    /// Unwrap `data` from a successful envelope.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Rejected` with the server's message when the
    /// envelope is not a success or carries no data.
    pub fn into_data(self) -> Result<T, ApiError> {
        if !self.is_success() {
            return Err(ApiError::Rejected(
                self.message.unwrap_or_else(|| "Request failed".to_string()),
            ));
        }
        self.data
            .ok_or_else(|| ApiError::Rejected("Response contained no data".to_string()))
    }

    /// Accept a successful envelope, ignoring any data.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Rejected` when the envelope is not a success.
    pub fn into_unit(self) -> Result<(), ApiError> {
        if self.is_success() {
            Ok(())
        } else {
            Err(ApiError::Rejected(
                self.message.unwrap_or_else(|| "Request failed".to_string()),
            ))
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct RefreshRequest<'a> {
    refresh_token: &'a str,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RefreshResponse {
    access_token: String,
}

#[derive(Deserialize)]
struct ErrorBody {
    message: Option<String>,
    error: Option<String>,
}

// =============================================================================
// ApiClient
// =============================================================================

/// Client for the storefront API.
///
/// Cheap to clone; clones share the HTTP connection pool, the token store and
/// the refresh lock.
#[derive(Clone)]
pub struct ApiClient {
    inner: Arc<ApiClientInner>,
}

struct ApiClientInner {
    http: reqwest::Client,
    base_url: String,
    tokens: TokenManager,
    refresh_lock: Mutex<()>,
}

impl ApiClient {
    /// Create a new API client.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(config: &StorefrontConfig, tokens: TokenManager) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder()
            .timeout(config.http_timeout)
            .user_agent(concat!("cartwheel/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            inner: Arc::new(ApiClientInner {
                http,
                base_url: config.api_url.as_str().trim_end_matches('/').to_string(),
                tokens,
                refresh_lock: Mutex::new(()),
            }),
        })
    }

    /// The token store this client reads and refreshes.
    #[must_use]
    pub fn tokens(&self) -> &TokenManager {
        &self.inner.tokens
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.inner.base_url
    }

    #[must_use]
    pub const fn auth(&self) -> AuthApi<'_> {
        AuthApi::new(self)
    }

    #[must_use]
    pub const fn address(&self) -> AddressApi<'_> {
        AddressApi::new(self)
    }

    #[must_use]
    pub const fn orders(&self) -> OrdersApi<'_> {
        OrdersApi::new(self)
    }

    #[must_use]
    pub const fn payment(&self) -> PaymentApi<'_> {
        PaymentApi::new(self)
    }

    #[must_use]
    pub const fn profile(&self) -> ProfileApi<'_> {
        ProfileApi::new(self)
    }

    // =========================================================================
    // Verb helpers
    // =========================================================================

    /// `GET` an endpoint.
    ///
    /// # Errors
    ///
    /// See [`ApiClient::request`].
    pub async fn get<T: DeserializeOwned>(&self, endpoint: &str) -> Result<T, ApiError> {
        self.request(Method::GET, endpoint, None).await
    }

    /// `POST` a JSON body.
    ///
    /// # Errors
    ///
    /// See [`ApiClient::request`].
    pub async fn post<T, B>(&self, endpoint: &str, body: &B) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let body = serde_json::to_value(body)?;
        self.request(Method::POST, endpoint, Some(body)).await
    }

    /// `PATCH` a JSON body.
    ///
    /// # Errors
    ///
    /// See [`ApiClient::request`].
    pub async fn patch<T, B>(&self, endpoint: &str, body: &B) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let body = serde_json::to_value(body)?;
        self.request(Method::PATCH, endpoint, Some(body)).await
    }

    /// `DELETE` an endpoint.
    ///
    /// # Errors
    ///
    /// See [`ApiClient::request`].
    pub async fn delete<T: DeserializeOwned>(&self, endpoint: &str) -> Result<T, ApiError> {
        self.request(Method::DELETE, endpoint, None).await
    }

    // =========================================================================
    // Core request path
    // =========================================================================

    /// Send a request, refreshing the access token once on `401`.
    ///
    /// # Errors
    ///
    /// - `ApiError::Http` on transport failure
    /// - `ApiError::Status` for non-2xx responses (after any retry)
    /// - `ApiError::SessionExpired` when the token could not be refreshed
    /// - `ApiError::Parse` when a 2xx body is not the expected JSON
    #[instrument(skip_all, fields(method = %method, endpoint = %endpoint))]
    pub async fn request<T: DeserializeOwned>(
        &self,
        method: Method,
        endpoint: &str,
        body: Option<serde_json::Value>,
    ) -> Result<T, ApiError> {
        let sent_with = self
            .inner
            .tokens
            .get_tokens()
            .access()
            .map(str::to_owned);

        let response = self
            .send(method.clone(), endpoint, body.as_ref(), sent_with.as_deref())
            .await?;

        if response.status() == StatusCode::UNAUTHORIZED
            && let Some(stale) = sent_with.as_deref()
        {
            debug!("Access token rejected, refreshing");
            let fresh = self.refresh_access_token(stale).await?;
            let retried = self
                .send(method, endpoint, body.as_ref(), Some(&fresh))
                .await?;
            return Self::decode(retried).await;
        }

        Self::decode(response).await
    }

    async fn send(
        &self,
        method: Method,
        endpoint: &str,
        body: Option<&serde_json::Value>,
        access_token: Option<&str>,
    ) -> Result<reqwest::Response, ApiError> {
        let url = format!("{}{endpoint}", self.inner.base_url);
        let mut builder = self.inner.http.request(method, url);
        if let Some(token) = access_token {
            builder = builder.bearer_auth(token);
        }
        if let Some(body) = body {
            builder = builder.json(body);
        }
        Ok(builder.send().await?)
    }

    /// Exchange the refresh token for a new access token.
    ///
    /// `stale` is the access token the failed request carried. If the stored
    /// token already differs, another caller refreshed while we waited on the
    /// lock and its token is returned as-is.
    async fn refresh_access_token(&self, stale: &str) -> Result<String, ApiError> {
        let _guard = self.inner.refresh_lock.lock().await;

        let current = self.inner.tokens.get_tokens();
        let Some(refresh_token) = current.refresh() else {
            warn!("No refresh token available");
            self.inner.tokens.clear_tokens();
            return Err(ApiError::SessionExpired);
        };
        if let Some(access) = current.access()
            && access != stale
        {
            debug!("Token was refreshed by a concurrent request");
            return Ok(access.to_string());
        }

        match self.call_refresh_endpoint(refresh_token).await {
            Ok(access_token) => {
                self.inner.tokens.set_tokens(&access_token, refresh_token)?;
                debug!("Access token refreshed");
                Ok(access_token)
            }
            Err(e) => {
                warn!(error = %e, "Token refresh failed, clearing session");
                self.inner.tokens.clear_tokens();
                Err(ApiError::SessionExpired)
            }
        }
    }

    async fn call_refresh_endpoint(&self, refresh_token: &str) -> Result<String, ApiError> {
        let body = serde_json::to_value(RefreshRequest { refresh_token })?;
        let response = self
            .send(Method::POST, REFRESH_ENDPOINT, Some(&body), None)
            .await?;
        let refreshed: RefreshResponse = Self::decode(response).await?;
        Ok(refreshed.access_token)
    }

    async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, ApiError> {
        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            let message = error_message(status, &text);
            debug!(status = %status, message = %message, "API returned non-success status");
            return Err(ApiError::Status { status, message });
        }

        let text = if text.trim().is_empty() { "null" } else { &text };
        serde_json::from_str(text).map_err(|e| {
            warn!(
                error = %e,
                body = %text.chars().take(ERROR_BODY_PREVIEW).collect::<String>(),
                "Failed to parse API response"
            );
            ApiError::Parse(e)
        })
    }
}

/// Best human-readable message for an error response.
fn error_message(status: StatusCode, body: &str) -> String {
    if let Ok(parsed) = serde_json::from_str::<ErrorBody>(body)
        && let Some(message) = parsed.message.or(parsed.error)
    {
        return message;
    }
    let trimmed = body.trim();
    if trimmed.is_empty() {
        status
            .canonical_reason()
            .unwrap_or("Request failed")
            .to_string()
    } else {
        trimmed.chars().take(ERROR_BODY_PREVIEW).collect()
    }
}

/// Percent-encode a single path segment.
pub(crate) fn segment(value: &str) -> String {
    urlencoding::encode(value).into_owned()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_error_message_prefers_json_message() {
        let msg = error_message(StatusCode::BAD_REQUEST, r#"{"message": "Email taken"}"#);
        assert_eq!(msg, "Email taken");
        let msg = error_message(StatusCode::BAD_REQUEST, r#"{"error": "bad token"}"#);
        assert_eq!(msg, "bad token");
    }

    #[test]
    fn test_error_message_falls_back() {
        assert_eq!(error_message(StatusCode::NOT_FOUND, ""), "Not Found");
        assert_eq!(
            error_message(StatusCode::BAD_GATEWAY, "upstream down"),
            "upstream down"
        );
    }

    #[test]
    fn test_envelope_into_data() {
        let ok: Envelope<u32> =
            serde_json::from_str(r#"{"status": "success", "data": 7}"#).unwrap();
        assert_eq!(ok.into_data().unwrap(), 7);

        let rejected: Envelope<u32> =
            serde_json::from_str(r#"{"status": "error", "message": "nope"}"#).unwrap();
        assert!(matches!(rejected.into_data(), Err(ApiError::Rejected(m)) if m == "nope"));

        let empty: Envelope<u32> = serde_json::from_str(r#"{"status": "success"}"#).unwrap();
        assert!(empty.into_data().is_err());
    }

    #[test]
    fn test_envelope_carries_payload_without_default() {
        #[derive(Debug, Deserialize, PartialEq, Eq)]
        struct Session {
            token: String,
        }

        let ok: Envelope<Session> =
            serde_json::from_str(r#"{"status": "success", "data": {"token": "t-1"}}"#).unwrap();
        assert_eq!(
            ok.into_data().unwrap(),
            Session {
                token: "t-1".to_string()
            }
        );

        let empty: Envelope<Session> = serde_json::from_str(r#"{"status": "success"}"#).unwrap();
        assert!(empty.data.is_none());
    }

    #[test]
    fn test_base_url_drops_trailing_slash() {
        let config = StorefrontConfig::new(
            url::Url::parse("http://localhost:8000/").unwrap(),
            url::Url::parse("http://localhost:9000/catalog/").unwrap(),
            std::path::PathBuf::from("/tmp/cartwheel"),
        );
        let tokens = TokenManager::new(Arc::new(crate::storage::MemoryStorage::new()));
        let client = ApiClient::new(&config, tokens).unwrap();
        assert_eq!(client.base_url(), "http://localhost:8000");
    }

    #[test]
    fn test_segment_encodes() {
        assert_eq!(segment("a b/c"), "a%20b%2Fc");
    }
}
