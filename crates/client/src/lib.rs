//! Neon Bazaar API client.
//!
//! # Architecture
//!
//! - The backend is the source of truth for pricing, inventory, payment
//!   settlement, authentication, and persistence - this crate is a thin
//!   authenticated wrapper over its REST API
//! - Bearer credential held in memory as a [`secrecy::SecretString`];
//!   requests without one simply omit the `Authorization` header
//! - In-memory caching via `moka` for the product catalog (5 minute TTL);
//!   cart, wishlist, and profile reads are never cached (mutable state)
//!
//! # Example
//!
//! ```rust,ignore
//! use neon_bazaar_client::{ApiClient, ApiConfig};
//!
//! let client = ApiClient::new(&ApiConfig::from_env()?)?;
//!
//! let token = client.login("user@example.com", &password).await?;
//! client.set_token(token.access_token.into());
//!
//! let cart = client.fetch_cart().await?;
//! client.add_cart_line(cart_line_id, 1).await?;
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

mod client;
pub mod config;
pub mod error;
pub mod types;

pub use client::ApiClient;
pub use config::{ApiConfig, ConfigError};
pub use error::ApiError;
pub use types::*;
