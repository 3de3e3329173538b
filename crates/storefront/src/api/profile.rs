//! `/api/profile` endpoints.

use cartwheel_core::{NotificationPreferences, ProfileUpdate, User};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::instrument;

use super::{ApiClient, ApiError};

/// Password change form. Not `Debug`.
#[derive(Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PasswordChange {
    pub current_password: String,
    pub new_password: String,
}

/// Profile routes answer either `{data: {...}}` or the bare object.
#[derive(Deserialize)]
#[serde(untagged)]
enum Wrapped<T> {
    Data { data: T },
    Bare(T),
}

impl<T> Wrapped<T> {
    fn into_inner(self) -> T {
        match self {
            Self::Data { data } | Self::Bare(data) => data,
        }
    }
}

#[derive(Deserialize)]
struct UserResponse {
    user: User,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct PreferencesResponse {
    notification_preferences: NotificationPreferences,
}

/// Account self-service.
pub struct ProfileApi<'a> {
    client: &'a ApiClient,
}

impl<'a> ProfileApi<'a> {
    pub(super) const fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    /// # Errors
    ///
    /// Returns an error if the request fails or the update is rejected.
    #[instrument(skip_all)]
    pub async fn update(&self, update: &ProfileUpdate) -> Result<User, ApiError> {
        let response: Wrapped<UserResponse> =
            self.client.patch("/api/profile/update", update).await?;
        Ok(response.into_inner().user)
    }

    /// # Errors
    ///
    /// Returns an error if the request fails or the current password is wrong.
    #[instrument(skip_all)]
    pub async fn change_password(&self, change: &PasswordChange) -> Result<(), ApiError> {
        let _: Value = self
            .client
            .post("/api/profile/change-password", change)
            .await?;
        Ok(())
    }

    /// # Errors
    ///
    /// Returns an error if the request fails.
    #[instrument(skip_all)]
    pub async fn update_notifications(
        &self,
        preferences: &NotificationPreferences,
    ) -> Result<NotificationPreferences, ApiError> {
        let response: Wrapped<PreferencesResponse> = self
            .client
            .patch("/api/profile/notifications", preferences)
            .await?;
        Ok(response.into_inner().notification_preferences)
    }

    /// # Errors
    ///
    /// Returns an error if the request fails.
    #[instrument(skip_all)]
    pub async fn delete_account(&self) -> Result<(), ApiError> {
        let _: Value = self.client.delete("/api/profile/delete").await?;
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_user_response_with_or_without_data_wrapper() {
        let wrapped: Wrapped<UserResponse> = serde_json::from_str(
            r#"{"status": "success", "data": {"user": {"id": "u1", "email": "a@b.co"}}}"#,
        )
        .unwrap();
        assert_eq!(wrapped.into_inner().user.id.as_str(), "u1");

        let bare: Wrapped<UserResponse> =
            serde_json::from_str(r#"{"user": {"id": "u2", "email": "a@b.co"}}"#).unwrap();
        assert_eq!(bare.into_inner().user.id.as_str(), "u2");
    }
}
