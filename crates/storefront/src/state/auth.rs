//! Signed-in user and auth request lifecycle.

use cartwheel_core::User;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthAction {
    /// Any auth request (check, login, signup, logout) started.
    Pending,
    /// Check, login or signup resolved with a user.
    Authenticated(User),
    /// The session check failed; the cached user is dropped.
    CheckRejected(String),
    /// Login or signup failed. A previously cached user is kept.
    Rejected(String),
    LoggedOut,
    SetError(Option<String>),
    /// Replace the cached user after a profile update.
    UpdateUser(User),
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthState {
    pub user: Option<User>,
    pub is_authenticated: bool,
    pub is_loading: bool,
    pub error: Option<String>,
}

impl AuthState {
    /// Initial state from the user stored by a previous session.
    #[must_use]
    pub fn from_stored(user: Option<User>) -> Self {
        Self {
            is_authenticated: user.is_some(),
            user,
            ..Self::default()
        }
    }

    pub fn reduce(&mut self, action: AuthAction) {
        match action {
            AuthAction::Pending => {
                self.is_loading = true;
                self.error = None;
            }
            AuthAction::Authenticated(user) => {
                self.user = Some(user);
                self.is_authenticated = true;
                self.is_loading = false;
                self.error = None;
            }
            AuthAction::CheckRejected(message) => {
                self.user = None;
                self.is_authenticated = false;
                self.is_loading = false;
                self.error = Some(message);
            }
            AuthAction::Rejected(message) => {
                self.is_loading = false;
                self.error = Some(message);
            }
            AuthAction::LoggedOut => {
                self.user = None;
                self.is_authenticated = false;
                self.is_loading = false;
                self.error = None;
            }
            AuthAction::SetError(error) => self.error = error,
            AuthAction::UpdateUser(user) => {
                self.user = Some(user);
                self.is_authenticated = true;
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn user() -> User {
        serde_json::from_str(r#"{"id": "u1", "fullName": "Asha", "email": "asha@example.com"}"#)
            .unwrap()
    }

    #[test]
    fn test_from_stored_user() {
        assert!(AuthState::from_stored(Some(user())).is_authenticated);
        assert!(!AuthState::from_stored(None).is_authenticated);
    }

    #[test]
    fn test_login_lifecycle() {
        let mut state = AuthState::default();
        state.reduce(AuthAction::SetError(Some("old".to_owned())));
        state.reduce(AuthAction::Pending);
        assert!(state.is_loading);
        assert!(state.error.is_none());

        state.reduce(AuthAction::Authenticated(user()));
        assert!(state.is_authenticated);
        assert!(!state.is_loading);
        assert_eq!(state.user.as_ref().unwrap().full_name, "Asha");
    }

    #[test]
    fn test_login_rejection_keeps_user() {
        let mut state = AuthState::from_stored(Some(user()));
        state.reduce(AuthAction::Pending);
        state.reduce(AuthAction::Rejected("Invalid credentials".to_owned()));
        assert!(state.is_authenticated);
        assert!(!state.is_loading);
        assert_eq!(state.error.as_deref(), Some("Invalid credentials"));
    }

    #[test]
    fn test_check_rejection_signs_out() {
        let mut state = AuthState::from_stored(Some(user()));
        state.reduce(AuthAction::CheckRejected("No access token".to_owned()));
        assert!(!state.is_authenticated);
        assert!(state.user.is_none());
        assert_eq!(state.error.as_deref(), Some("No access token"));
    }

    #[test]
    fn test_logout_clears_error() {
        let mut state = AuthState::from_stored(Some(user()));
        state.reduce(AuthAction::SetError(Some("stale".to_owned())));
        state.reduce(AuthAction::LoggedOut);
        assert!(!state.is_authenticated);
        assert!(state.error.is_none());
    }

    #[test]
    fn test_update_user_marks_authenticated() {
        let mut state = AuthState::default();
        state.reduce(AuthAction::UpdateUser(user()));
        assert!(state.is_authenticated);
    }
}
