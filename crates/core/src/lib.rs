//! Cartwheel Core - Shared types library.
//!
//! This crate provides the types used across all Cartwheel components:
//! - `storefront` - API clients, local storage and state containers
//! - `cli` - The `sf` command-line front end
//!
//! # Architecture
//!
//! The core crate contains only types and pure functions - no I/O, no HTTP
//! clients, no storage. Records mirror the JSON shapes of the remote storefront
//! API (camelCase on the wire).
//!
//! # Modules
//!
//! - [`types`] - Newtype ids, money, emails, statuses and the storefront records

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
