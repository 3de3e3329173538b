//! Cartwheel storefront client.
//!
//! Everything a shop front end needs short of rendering: an API client that
//! refreshes expired access tokens and replays the request, a cached catalog
//! client, local storage for the cart, user and tokens, the state containers
//! and the [`Storefront`] facade that ties them together.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod api;
pub mod app;
pub mod catalog;
pub mod config;
pub mod error;
pub mod state;
pub mod storage;
pub mod tokens;

pub use app::{CheckoutSummary, Storefront};
pub use config::{ConfigError, StorefrontConfig};
pub use error::{Result, StorefrontError};
pub use storage::{FileStorage, LocalStorage, MemoryStorage};
pub use tokens::{AuthTokens, TokenManager};
