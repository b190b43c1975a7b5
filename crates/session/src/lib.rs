//! Neon Bazaar session state.
//!
//! Session-scoped client state for the storefront: a local mirror of the
//! user's remote cart, wishlist, and wallet balance, kept consistent with
//! the backend under user-triggered mutations.
//!
//! # Synchronization model
//!
//! The cart and wishlist stores are optimistic: a mutation updates local
//! state synchronously (instant UI feedback), emits a user-facing
//! [`Notice`], and then issues the corresponding remote call. A failed
//! remote call is reconciled by refetching the server's authoritative list
//! rather than computing an inverse of the failed mutation - the stores
//! have no durable local persistence to protect, so correctness always
//! yields to the server's view.
//!
//! The wallet balance is the opposite: it is never guessed client-side.
//! [`AccountStore::refresh`] refetches the profile after every operation
//! that could move money.
//!
//! # Lifecycle
//!
//! State is process-scoped with explicit hooks rather than ambient globals:
//! [`Session::sign_in`]/[`Session::restore`] populate the stores,
//! [`Session::sign_out`] tears them down locally. Remote state is untouched
//! by sign-out; it is simply not reflected until the next sign-in.
//!
//! Only two values survive across sessions, via [`Prefs`]: the bearer
//! credential and the preferred display currency.

#![cfg_attr(not(test), forbid(unsafe_code))]

mod account;
mod cart;
mod checkout;
mod notice;
mod prefs;
mod session;
mod sync;
mod wishlist;

pub use account::AccountStore;
pub use cart::CartStore;
pub use checkout::{Checkout, CheckoutError};
pub use notice::{Notice, Notices};
pub use prefs::{Prefs, PrefsError, StoredPrefs};
pub use session::Session;
pub use sync::Keyed;
pub use wishlist::WishlistStore;
