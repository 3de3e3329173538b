//! Profile updates and account deletion.

use cartwheel_core::{NotificationPreferences, ProfileUpdate, User};
use tracing::{info, instrument};

use super::Storefront;
use crate::api::PasswordChange;
use crate::error::{Result, StorefrontError};
use crate::state::{AuthAction, ProfileAction};

impl Storefront {
    /// Run a profile request, driving the profile container through its
    /// lifecycle. `done` is the action recorded on success.
    async fn profile_request<T, F>(&self, done: ProfileAction, request: F) -> Result<T>
    where
        F: Future<Output = Result<T>>,
    {
        self.store().await.profile.reduce(ProfileAction::Pending);
        match request.await {
            Ok(value) => {
                self.store().await.profile.reduce(done);
                Ok(value)
            }
            Err(e) => {
                self.store()
                    .await
                    .profile
                    .reduce(ProfileAction::Rejected(e.user_message()));
                Err(e)
            }
        }
    }

    /// Change name and/or email; the cached user is replaced with the
    /// server's copy.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` for an empty update, or an API error.
    #[instrument(skip_all)]
    pub async fn update_profile(&self, update: &ProfileUpdate) -> Result<User> {
        if update.is_empty() {
            return Err(StorefrontError::InvalidInput(
                "Nothing to update".to_string(),
            ));
        }
        self.require_user("Please sign in to edit your profile")
            .await?;
        let user = self
            .profile_request(ProfileAction::ProfileUpdated, async {
                self.api()
                    .profile()
                    .update(update)
                    .await
                    .map_err(StorefrontError::from)
            })
            .await?;
        self.dispatch_auth(AuthAction::UpdateUser(user.clone()))
            .await?;
        Ok(user)
    }

    /// # Errors
    ///
    /// Returns `InvalidInput` when the new password is empty or matches the
    /// current one, or an API error (for example a wrong current password).
    #[instrument(skip_all)]
    pub async fn change_password(&self, current_password: &str, new_password: &str) -> Result<()> {
        if new_password.is_empty() {
            return Err(StorefrontError::InvalidInput(
                "Please enter a new password".to_string(),
            ));
        }
        if new_password == current_password {
            return Err(StorefrontError::InvalidInput(
                "New password must differ from the current one".to_string(),
            ));
        }
        let change = PasswordChange {
            current_password: current_password.to_string(),
            new_password: new_password.to_string(),
        };
        self.profile_request(ProfileAction::PasswordChanged, async {
            self.api()
                .profile()
                .change_password(&change)
                .await
                .map_err(StorefrontError::from)
        })
        .await?;
        info!("Password changed");
        Ok(())
    }

    /// Save notification preferences and merge them into the cached user.
    ///
    /// # Errors
    ///
    /// Returns `NotAuthenticated` when signed out, or an API error.
    #[instrument(skip(self))]
    pub async fn update_notification_preferences(
        &self,
        preferences: NotificationPreferences,
    ) -> Result<NotificationPreferences> {
        let mut user = self
            .require_user("Please sign in to edit your profile")
            .await?;
        let saved = self
            .profile_request(ProfileAction::NotificationsUpdated, async {
                self.api()
                    .profile()
                    .update_notifications(&preferences)
                    .await
                    .map_err(StorefrontError::from)
            })
            .await?;
        user.notification_preferences = Some(saved);
        self.dispatch_auth(AuthAction::UpdateUser(user)).await?;
        Ok(saved)
    }

    /// Delete the account and end the local session.
    ///
    /// # Errors
    ///
    /// Returns an API error; the session is kept in that case.
    #[instrument(skip(self))]
    pub async fn delete_account(&self) -> Result<()> {
        self.profile_request(ProfileAction::AccountDeleted, async {
            self.api()
                .profile()
                .delete_account()
                .await
                .map_err(StorefrontError::from)
        })
        .await?;
        self.api().tokens().clear_tokens();
        self.dispatch_auth(AuthAction::LoggedOut).await?;
        info!("Account deleted");
        Ok(())
    }

    pub async fn clear_profile_errors(&self) {
        self.store()
            .await
            .profile
            .reduce(ProfileAction::ClearProfileErrors);
    }

    pub async fn reset_profile_state(&self) {
        self.store()
            .await
            .profile
            .reduce(ProfileAction::ResetProfileState);
    }
}
