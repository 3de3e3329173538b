//! Profile request lifecycle flags.

use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProfileAction {
    Pending,
    ProfileUpdated,
    PasswordChanged,
    NotificationsUpdated,
    AccountDeleted,
    Rejected(String),
    ClearProfileErrors,
    ResetProfileState,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileState {
    pub is_loading: bool,
    pub error: Option<String>,
    pub is_password_change_success: bool,
    pub is_notification_update_success: bool,
}

impl ProfileState {
    pub fn reduce(&mut self, action: ProfileAction) {
        match action {
            ProfileAction::Pending => {
                self.is_loading = true;
                self.error = None;
                self.is_password_change_success = false;
                self.is_notification_update_success = false;
            }
            ProfileAction::ProfileUpdated | ProfileAction::AccountDeleted => {
                self.is_loading = false;
            }
            ProfileAction::PasswordChanged => {
                self.is_loading = false;
                self.is_password_change_success = true;
            }
            ProfileAction::NotificationsUpdated => {
                self.is_loading = false;
                self.is_notification_update_success = true;
            }
            ProfileAction::Rejected(message) => {
                self.is_loading = false;
                self.error = Some(message);
            }
            ProfileAction::ClearProfileErrors => self.error = None,
            ProfileAction::ResetProfileState => {
                self.error = None;
                self.is_password_change_success = false;
                self.is_notification_update_success = false;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_password_change_flags() {
        let mut state = ProfileState::default();
        state.reduce(ProfileAction::Pending);
        assert!(state.is_loading);
        state.reduce(ProfileAction::PasswordChanged);
        assert!(state.is_password_change_success);
        assert!(!state.is_notification_update_success);

        // a new request clears the previous success flag
        state.reduce(ProfileAction::Pending);
        assert!(!state.is_password_change_success);
    }

    #[test]
    fn test_reject_then_reset() {
        let mut state = ProfileState::default();
        state.reduce(ProfileAction::Pending);
        state.reduce(ProfileAction::Rejected("wrong password".to_owned()));
        assert_eq!(state.error.as_deref(), Some("wrong password"));
        assert!(!state.is_loading);

        state.reduce(ProfileAction::ResetProfileState);
        assert_eq!(state, ProfileState::default());
    }
}
