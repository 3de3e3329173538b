//! Core types for Cartwheel.
//!
//! This module provides type-safe wrappers for the storefront's domain
//! concepts and the records exchanged with the remote API.

pub mod address;
pub mod cart;
pub mod email;
pub mod id;
pub mod order;
pub mod price;
pub mod product;
pub mod status;
pub mod user;

pub use address::{Address, AddressError, AddressInput, DEFAULT_COUNTRY};
pub use cart::CartItem;
pub use email::{Email, EmailError};
pub use id::*;
pub use order::{Order, OrderItem};
pub use price::{CurrencyCode, Price, discounted_price, format_price, round_off};
pub use product::{Category, Product, ProductPage};
pub use status::*;
pub use user::{NotificationPreferences, ProfileUpdate, User};
