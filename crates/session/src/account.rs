//! Account store: cached profile and the balance refresher.
//!
//! Unlike the cart and wishlist, nothing here is optimistic. The wallet
//! balance is a financial value and is never guessed client-side; it only
//! changes by refetching the profile from the backend.

use std::sync::{Mutex, PoisonError};

use rust_decimal::Decimal;
use tracing::instrument;

use neon_bazaar_client::{ApiClient, ApiError, UserProfile};

/// Cached profile of the signed-in user.
pub struct AccountStore {
    client: ApiClient,
    profile: Mutex<Option<UserProfile>>,
}

impl AccountStore {
    pub(crate) fn new(client: ApiClient) -> Self {
        Self {
            client,
            profile: Mutex::new(None),
        }
    }

    /// The cached profile, if signed in and loaded.
    #[must_use]
    pub fn profile(&self) -> Option<UserProfile> {
        self.profile
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// The cached wallet balance in UZS; zero when signed out.
    #[must_use]
    pub fn balance(&self) -> Decimal {
        self.profile().map_or(Decimal::ZERO, |p| p.balance)
    }

    /// Refetch the profile and replace the cached balance.
    ///
    /// Must run after every successful wallet payment or top-up, before
    /// success is reported to the user. A rejected credential clears both
    /// the cached profile and the client's token.
    ///
    /// # Errors
    ///
    /// Returns an error if the refetch fails; the prior cached profile is
    /// kept except on [`ApiError::Unauthorized`].
    #[instrument(skip(self))]
    pub async fn refresh(&self) -> Result<Option<UserProfile>, ApiError> {
        if !self.client.is_authenticated() {
            self.set(None);
            return Ok(None);
        }

        match self.client.fetch_profile().await {
            Ok(profile) => {
                self.set(Some(profile.clone()));
                Ok(Some(profile))
            }
            Err(error) if error.is_unauthorized() => {
                self.client.clear_token();
                self.set(None);
                Err(error)
            }
            Err(error) => Err(error),
        }
    }

    /// Local-only reset, used on sign-out.
    pub fn clear(&self) {
        self.set(None);
    }

    fn set(&self, profile: Option<UserProfile>) {
        *self
            .profile
            .lock()
            .unwrap_or_else(PoisonError::into_inner) = profile;
    }
}
