//! The session aggregate.
//!
//! One `Session` owns every piece of process-scoped state for a signed-in
//! (or anonymous) user, with explicit lifecycle hooks instead of ambient
//! globals: construct it once at startup, populate it on sign-in, tear it
//! down on sign-out.

use std::sync::Arc;

use secrecy::SecretString;
use tracing::instrument;

use neon_bazaar_client::{ApiClient, ApiError};

use crate::account::AccountStore;
use crate::cart::CartStore;
use crate::checkout::Checkout;
use crate::notice::Notices;
use crate::wishlist::WishlistStore;

/// Process-scoped session state: cart, wishlist, account, notices.
///
/// All stores share the one [`ApiClient`] (and with it the bearer
/// credential) and the one [`Notices`] queue.
pub struct Session {
    client: ApiClient,
    notices: Notices,
    cart: Arc<CartStore>,
    wishlist: Arc<WishlistStore>,
    account: Arc<AccountStore>,
}

impl Session {
    /// Create an empty session over the given client.
    #[must_use]
    pub fn new(client: ApiClient) -> Self {
        let notices = Notices::new();
        Self {
            cart: Arc::new(CartStore::new(client.clone(), notices.clone())),
            wishlist: Arc::new(WishlistStore::new(client.clone(), notices.clone())),
            account: Arc::new(AccountStore::new(client.clone())),
            client,
            notices,
        }
    }

    /// The underlying API client.
    #[must_use]
    pub const fn client(&self) -> &ApiClient {
        &self.client
    }

    /// The shared notice queue.
    #[must_use]
    pub const fn notices(&self) -> &Notices {
        &self.notices
    }

    /// The cart store.
    #[must_use]
    pub fn cart(&self) -> &CartStore {
        &self.cart
    }

    /// The wishlist store.
    #[must_use]
    pub fn wishlist(&self) -> &WishlistStore {
        &self.wishlist
    }

    /// The account store.
    #[must_use]
    pub fn account(&self) -> &AccountStore {
        &self.account
    }

    /// Checkout flows bound to this session's stores.
    #[must_use]
    pub fn checkout(&self) -> Checkout {
        Checkout::new(
            self.client.clone(),
            Arc::clone(&self.cart),
            Arc::clone(&self.account),
            self.notices.clone(),
        )
    }

    /// Exchange credentials for a bearer token, adopt it, and populate the
    /// stores.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Unauthorized`] on bad credentials; the session
    /// stays signed out.
    #[instrument(skip(self, password), fields(email = %email))]
    pub async fn sign_in(&self, email: &str, password: &SecretString) -> Result<(), ApiError> {
        let token = self.client.login(email, password).await?;
        self.client.set_token(SecretString::from(token.access_token));
        self.init().await;
        Ok(())
    }

    /// Adopt a previously persisted credential and populate the stores.
    pub async fn restore(&self, token: SecretString) {
        self.client.set_token(token);
        self.init().await;
    }

    /// Run the initial loads concurrently.
    ///
    /// Initial-load failures are silent: local state (empty or stale)
    /// stands, and the next load tries again.
    #[instrument(skip(self))]
    pub async fn init(&self) {
        tokio::join!(self.cart.load(), self.wishlist.load(), async {
            if let Err(error) = self.account.refresh().await {
                tracing::debug!(%error, "initial profile load failed");
            }
        });
    }

    /// Tear down session-scoped state.
    ///
    /// Local-only: the remote cart and wishlist are untouched, they are
    /// simply not reflected here until the next sign-in.
    pub fn sign_out(&self) {
        self.client.clear_token();
        self.cart.clear();
        self.wishlist.clear();
        self.account.clear();
    }
}
