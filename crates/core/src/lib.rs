//! Neon Bazaar Core - Shared types library.
//!
//! This crate provides common types used across all Neon Bazaar components:
//! - `client` - Authenticated HTTP client for the marketplace backend
//! - `session` - Session-scoped client state (cart, wishlist, balance)
//! - `cli` - Terminal front end
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no HTTP clients. This keeps
//! it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs, money, and currency
//!   display formatting

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
