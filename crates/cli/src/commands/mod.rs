//! Command implementations. Each prints to stdout; logs go to stderr.

pub mod address;
pub mod auth;
pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod orders;
pub mod profile;

pub use address::AddressAction;
pub use auth::AuthAction;
pub use cart::CartAction;
pub use orders::OrdersAction;
pub use profile::ProfileAction;

use cartwheel_core::{CurrencyCode, format_price};
use cartwheel_storefront::{ConfigError, Storefront, StorefrontConfig, StorefrontError};
use rust_decimal::Decimal;
use serde::Serialize;
use thiserror::Error;

/// Errors that end a command.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Storefront(#[from] StorefrontError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Failed to encode output: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{0}")]
    Usage(String),
}

impl CliError {
    /// One line for the terminal.
    pub fn user_message(&self) -> String {
        match self {
            Self::Storefront(e) if e.requires_login() => {
                format!("{} (run `sf auth login`)", e.user_message())
            }
            Self::Storefront(e) => e.user_message(),
            other => other.to_string(),
        }
    }
}

pub type CmdResult = Result<(), CliError>;

/// Load configuration and open local storage.
pub fn open() -> Result<Storefront, CliError> {
    let config = StorefrontConfig::from_env()?;
    Ok(Storefront::open(config)?)
}

#[allow(clippy::print_stdout)]
pub fn print_json<T: Serialize + ?Sized>(value: &T) -> CmdResult {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

pub fn money(amount: Decimal, currency: CurrencyCode) -> String {
    format_price(amount, currency)
}
