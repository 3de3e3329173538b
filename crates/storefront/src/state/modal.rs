//! Sign-up / sign-in modal flags.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModalAction {
    SetSignupModalOn,
    SetSignupModalOff,
    SetSigninModalOn,
    SetSigninModalOff,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ModalState {
    pub is_signup_modal_on: bool,
    pub is_signin_modal_on: bool,
}

impl ModalState {
    pub const fn reduce(&mut self, action: ModalAction) {
        match action {
            ModalAction::SetSignupModalOn => self.is_signup_modal_on = true,
            ModalAction::SetSignupModalOff => self.is_signup_modal_on = false,
            ModalAction::SetSigninModalOn => self.is_signin_modal_on = true,
            ModalAction::SetSigninModalOff => self.is_signin_modal_on = false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flags_are_independent() {
        let mut modal = ModalState::default();
        modal.reduce(ModalAction::SetSignupModalOn);
        modal.reduce(ModalAction::SetSigninModalOn);
        modal.reduce(ModalAction::SetSignupModalOff);
        assert!(!modal.is_signup_modal_on);
        assert!(modal.is_signin_modal_on);
    }
}
