//! Sign-in, sign-up and session checks.

use cartwheel_core::{Email, SocialProvider, User};
use tracing::{info, instrument, warn};
use url::Url;

use super::Storefront;
use crate::api::{ApiError, AuthPayload, Credentials, RegisterRequest, SignupRequest};
use crate::error::{Result, StorefrontError};
use crate::state::{AuthAction, ModalAction};

impl Storefront {
    /// Confirm the stored session with the API.
    ///
    /// Without an access token this fails immediately. When the API says the
    /// session is gone, or the check itself fails, the cached user and the
    /// tokens are cleared.
    ///
    /// # Errors
    ///
    /// Returns `NotAuthenticated` when there is no valid session.
    #[instrument(skip(self))]
    pub async fn check_auth(&self) -> Result<User> {
        self.dispatch_auth(AuthAction::Pending).await?;

        if !self.api().tokens().is_authenticated() {
            self.dispatch_auth(AuthAction::CheckRejected("No access token".to_string()))
                .await?;
            return Err(StorefrontError::NotAuthenticated("No access token"));
        }

        let rejection = match self.api().auth().check().await {
            Ok(check) if check.is_authenticated => {
                if let Some(user) = check.user {
                    self.dispatch_auth(AuthAction::Authenticated(user.clone()))
                        .await?;
                    return Ok(user);
                }
                StorefrontError::NotAuthenticated("Not authenticated")
            }
            Ok(_) => StorefrontError::NotAuthenticated("Not authenticated"),
            Err(e) => {
                warn!(error = %e, "Auth check failed");
                StorefrontError::Api(e)
            }
        };

        self.api().tokens().clear_tokens();
        self.dispatch_auth(AuthAction::CheckRejected(rejection.user_message()))
            .await?;
        Err(rejection)
    }

    /// Sign in with email and password.
    ///
    /// # Errors
    ///
    /// Returns an error for a malformed email, wrong credentials or a failed
    /// request. The message is also recorded in the auth state.
    #[instrument(skip(self, password))]
    pub async fn login(&self, email: &str, password: &str) -> Result<User> {
        let credentials = Credentials {
            email: Email::parse(email)?,
            password: password.to_string(),
        };
        self.dispatch_auth(AuthAction::Pending).await?;
        let outcome = self.api().auth().login(&credentials).await;
        self.finish_sign_in(outcome).await
    }

    /// Create an account and sign in.
    ///
    /// # Errors
    ///
    /// Returns an error for invalid input or if the API rejects the signup.
    #[instrument(skip(self, password))]
    pub async fn signup(&self, full_name: &str, email: &str, password: &str) -> Result<User> {
        let full_name = full_name.trim();
        if full_name.is_empty() {
            return Err(StorefrontError::InvalidInput("Name is required".to_string()));
        }
        check_password(password)?;
        let request = SignupRequest {
            full_name: full_name.to_string(),
            email: Email::parse(email)?,
            password: password.to_string(),
        };
        self.dispatch_auth(AuthAction::Pending).await?;
        let outcome = self.api().auth().signup(&request).await;
        self.finish_sign_in(outcome).await
    }

    async fn finish_sign_in(
        &self,
        outcome: std::result::Result<AuthPayload, ApiError>,
    ) -> Result<User> {
        match outcome {
            Ok(payload) => {
                self.api()
                    .tokens()
                    .set_tokens(&payload.access_token, &payload.refresh_token)?;
                info!(user_id = %payload.user.id, "Signed in");
                self.dispatch_auth(AuthAction::Authenticated(payload.user.clone()))
                    .await?;
                self.store()
                    .await
                    .modal
                    .reduce(ModalAction::SetSigninModalOff);
                Ok(payload.user)
            }
            Err(e) => {
                let err = StorefrontError::from(e);
                self.dispatch_auth(AuthAction::Rejected(err.user_message()))
                    .await?;
                Err(err)
            }
        }
    }

    /// Sign out remotely, then forget the session locally.
    ///
    /// # Errors
    ///
    /// Returns an error if the logout request fails; the local session is
    /// kept in that case.
    #[instrument(skip(self))]
    pub async fn logout(&self) -> Result<()> {
        if let Err(e) = self.api().auth().logout().await {
            let err = StorefrontError::from(e);
            self.dispatch_auth(AuthAction::SetError(Some(err.user_message())))
                .await?;
            return Err(err);
        }
        self.api().tokens().clear_tokens();
        self.dispatch_auth(AuthAction::LoggedOut).await?;
        info!("Signed out");
        Ok(())
    }

    /// Start an email-verified registration.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` when the password is empty or the two differ, or
    /// an error if the API rejects the registration.
    #[instrument(skip(self, password, confirm_password))]
    pub async fn register_email(
        &self,
        name: &str,
        email: &str,
        password: &str,
        confirm_password: &str,
    ) -> Result<()> {
        check_password(password)?;
        if password != confirm_password {
            return Err(StorefrontError::InvalidInput(
                "Passwords do not match".to_string(),
            ));
        }
        let request = RegisterRequest {
            name: name.trim().to_string(),
            email: Email::parse(email)?,
            password: password.to_string(),
        };
        self.api().auth().register(&request).await?;
        self.store()
            .await
            .modal
            .reduce(ModalAction::SetSignupModalOff);
        Ok(())
    }

    /// Confirm an email address with the token from the verification mail.
    ///
    /// # Errors
    ///
    /// Returns an error if the token is rejected.
    #[instrument(skip_all)]
    pub async fn verify_email(&self, token: &str) -> Result<()> {
        let token = token.trim();
        if token.is_empty() {
            return Err(StorefrontError::InvalidInput(
                "Verification token is required".to_string(),
            ));
        }
        Ok(self.api().auth().verify_email(token).await?)
    }

    #[must_use]
    pub fn social_login_url(&self, provider: SocialProvider) -> String {
        self.api().auth().social_login_url(provider)
    }

    /// Finish a social login from the URL the provider redirected back to.
    ///
    /// The callback carries `accessToken` and `refreshToken`, or `error`.
    ///
    /// # Errors
    ///
    /// Returns `SocialLogin` when the provider reported an error,
    /// `InvalidInput` when the URL lacks tokens, or any `check_auth` error.
    #[instrument(skip_all)]
    pub async fn complete_social_login(&self, callback_url: &str) -> Result<User> {
        let url = Url::parse(callback_url)
            .map_err(|e| StorefrontError::InvalidInput(format!("Invalid callback URL: {e}")))?;

        let mut access_token = None;
        let mut refresh_token = None;
        let mut error = None;
        for (key, value) in url.query_pairs() {
            match key.as_ref() {
                "accessToken" => access_token = Some(value.into_owned()),
                "refreshToken" => refresh_token = Some(value.into_owned()),
                "error" => error = Some(value.into_owned()),
                _ => {}
            }
        }

        if let Some(error) = error {
            warn!(%error, "Social login returned an error");
            self.dispatch_auth(AuthAction::SetError(Some(error.clone())))
                .await?;
            return Err(StorefrontError::SocialLogin(error));
        }
        let (Some(access_token), Some(refresh_token)) = (access_token, refresh_token) else {
            return Err(StorefrontError::InvalidInput(
                "Callback URL is missing tokens".to_string(),
            ));
        };

        self.api().tokens().set_tokens(&access_token, &refresh_token)?;
        self.check_auth().await
    }
}

fn check_password(password: &str) -> Result<()> {
    if password.is_empty() {
        return Err(StorefrontError::InvalidInput(
            "Please enter a password".to_string(),
        ));
    }
    Ok(())
}
