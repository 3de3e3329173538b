//! `/auth/*` endpoints.

use cartwheel_core::{Email, SocialProvider, User};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::instrument;

use super::{ApiClient, ApiError, Envelope, segment};

/// Email/password sign-in.
///
/// Types carrying a password or token do not implement `Debug`.
#[derive(Clone, Serialize)]
pub struct Credentials {
    pub email: Email,
    pub password: String,
}

/// Account creation that signs the user in straight away.
#[derive(Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SignupRequest {
    pub full_name: String,
    pub email: Email,
    pub password: String,
}

/// Account creation that requires email verification first.
#[derive(Clone, Serialize)]
pub struct RegisterRequest {
    pub name: String,
    pub email: Email,
    pub password: String,
}

/// Tokens and user returned by login and signup.
#[derive(Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthPayload {
    pub access_token: String,
    pub refresh_token: String,
    pub user: User,
}

/// Response of `GET /auth/check`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthCheck {
    pub is_authenticated: bool,
    #[serde(default)]
    pub user: Option<User>,
}

/// Authentication endpoints.
pub struct AuthApi<'a> {
    client: &'a ApiClient,
}

impl<'a> AuthApi<'a> {
    pub(super) const fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    /// # Errors
    ///
    /// Returns an error if the request fails or the server rejects the login.
    #[instrument(skip_all, fields(email = %credentials.email))]
    pub async fn login(&self, credentials: &Credentials) -> Result<AuthPayload, ApiError> {
        let envelope: Envelope<AuthPayload> =
            self.client.post("/auth/login", credentials).await?;
        envelope.into_data()
    }

    /// # Errors
    ///
    /// Returns an error if the request fails or the server rejects the signup.
    #[instrument(skip_all, fields(email = %request.email))]
    pub async fn signup(&self, request: &SignupRequest) -> Result<AuthPayload, ApiError> {
        let envelope: Envelope<AuthPayload> = self.client.post("/auth/signup", request).await?;
        envelope.into_data()
    }

    /// Start an email-verified registration. No tokens are issued.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the server rejects it.
    #[instrument(skip_all, fields(email = %request.email))]
    pub async fn register(&self, request: &RegisterRequest) -> Result<(), ApiError> {
        let envelope: Envelope<Value> = self.client.post("/auth/register", request).await?;
        envelope.into_unit()
    }

    /// # Errors
    ///
    /// Returns an error if the request fails.
    #[instrument(skip_all)]
    pub async fn logout(&self) -> Result<(), ApiError> {
        let _: Value = self.client.post("/auth/logout", &Value::Null).await?;
        Ok(())
    }

    /// # Errors
    ///
    /// Returns an error if the request fails (including an expired session).
    #[instrument(skip_all)]
    pub async fn check(&self) -> Result<AuthCheck, ApiError> {
        self.client.get("/auth/check").await
    }

    /// # Errors
    ///
    /// Returns an error if the token is unknown or already used.
    #[instrument(skip_all)]
    pub async fn verify_email(&self, token: &str) -> Result<(), ApiError> {
        let endpoint = format!("/auth/verify-email/{}", segment(token));
        let envelope: Envelope<Value> = self.client.get(&endpoint).await?;
        envelope.into_unit()
    }

    /// Where to send the browser to start a social login.
    #[must_use]
    pub fn social_login_url(&self, provider: SocialProvider) -> String {
        format!("{}/auth/{}", self.client.base_url(), provider.path())
    }
}
