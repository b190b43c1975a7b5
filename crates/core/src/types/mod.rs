//! Core types for Neon Bazaar.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod currency;
pub mod id;
pub mod money;

pub use currency::{CurrencyCode, CurrencyParseError, RateTable, format_money, format_raw};
pub use id::*;
pub use money::{Money, MoneyError};
