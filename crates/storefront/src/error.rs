//! Errors surfaced by the [`crate::Storefront`] facade.
//!
//! Each layer keeps its own error enum; this one wraps them and adds the
//! checks the facade performs before calling out. [`StorefrontError::user_message`]
//! is what a front end shows, keeping transport details out of sight.

use cartwheel_core::{AddressError, EmailError, OrderStatus};
use thiserror::Error;

use crate::api::ApiError;
use crate::catalog::CatalogError;
use crate::config::ConfigError;
use crate::storage::StorageError;

#[derive(Debug, Error)]
pub enum StorefrontError {
    #[error(transparent)]
    Api(#[from] ApiError),

    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Invalid email: {0}")]
    Email(#[from] EmailError),

    #[error(transparent)]
    Address(#[from] AddressError),

    /// The operation needs a signed-in user.
    #[error("{0}")]
    NotAuthenticated(&'static str),

    #[error("Your cart is empty")]
    EmptyCart,

    #[error("{0}")]
    InvalidInput(String),

    #[error("Orders that are {0} cannot be cancelled")]
    OrderNotCancellable(OrderStatus),

    /// A social login callback carried `error=...`.
    #[error("Social login failed: {0}")]
    SocialLogin(String),
}

impl StorefrontError {
    /// Message suitable for showing to a shopper.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Api(ApiError::Status { message, .. } | ApiError::Rejected(message)) => {
                message.clone()
            }
            Self::Api(ApiError::SessionExpired) => {
                "Your session has expired, please sign in again".to_string()
            }
            Self::Api(ApiError::Http(_)) | Self::Catalog(CatalogError::Http(_)) => {
                "Could not reach the server, please try again".to_string()
            }
            Self::Api(_) | Self::Catalog(_) => "Something went wrong, please try again".to_string(),
            Self::Storage(_) | Self::Config(_) => "Local settings could not be used".to_string(),
            _ => self.to_string(),
        }
    }

    /// Whether signing in again would resolve the error.
    #[must_use]
    pub const fn requires_login(&self) -> bool {
        matches!(
            self,
            Self::NotAuthenticated(_) | Self::Api(ApiError::SessionExpired)
        )
    }
}

pub type Result<T> = std::result::Result<T, StorefrontError>;

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::StatusCode;

    #[test]
    fn test_user_message_passes_server_message_through() {
        let err = StorefrontError::from(ApiError::Status {
            status: StatusCode::BAD_REQUEST,
            message: "Email already registered".to_string(),
        });
        assert_eq!(err.user_message(), "Email already registered");
    }

    #[test]
    fn test_user_message_hides_internals() {
        let err = StorefrontError::from(StorageError::InvalidKey("../x".to_string()));
        assert_eq!(err.user_message(), "Local settings could not be used");
    }

    #[test]
    fn test_requires_login() {
        assert!(StorefrontError::from(ApiError::SessionExpired).requires_login());
        assert!(StorefrontError::NotAuthenticated("Please sign in").requires_login());
        assert!(!StorefrontError::EmptyCart.requires_login());
        assert_eq!(
            StorefrontError::OrderNotCancellable(OrderStatus::Shipped).to_string(),
            "Orders that are shipped cannot be cancelled"
        );
    }
}
