//! Checkout orchestration: wallet payment, top-up, gateway links.
//!
//! Financial operations invert the error posture of the collection stores:
//! nothing is optimistic, and failures are surfaced to the user with the
//! backend's own message instead of being silently absorbed.

use std::sync::Arc;

use rust_decimal::Decimal;
use thiserror::Error;
use tracing::instrument;

use neon_bazaar_client::{
    ApiClient, ApiError, CartItemRef, PaymentLink, TopUpReceipt, WalletReceipt,
};

use crate::account::AccountStore;
use crate::cart::CartStore;
use crate::notice::{Notice, Notices};

/// Errors surfaced by checkout operations.
#[derive(Debug, Error)]
pub enum CheckoutError {
    /// No credential present; nothing was sent.
    #[error("you need to sign in first")]
    NotSignedIn,

    /// The cart has no lines; nothing was sent.
    #[error("your cart is empty")]
    EmptyCart,

    /// A non-positive top-up amount; nothing was sent.
    #[error("amount must be greater than zero")]
    InvalidAmount,

    /// The backend declined the operation; carries its message verbatim.
    #[error("{0}")]
    Declined(String),

    /// The request itself failed (network, parse).
    #[error(transparent)]
    Api(#[from] ApiError),
}

/// Checkout flows over the session's cart and account stores.
pub struct Checkout {
    client: ApiClient,
    cart: Arc<CartStore>,
    account: Arc<AccountStore>,
    notices: Notices,
}

impl Checkout {
    pub(crate) fn new(
        client: ApiClient,
        cart: Arc<CartStore>,
        account: Arc<AccountStore>,
        notices: Notices,
    ) -> Self {
        Self {
            client,
            cart,
            account,
            notices,
        }
    }

    /// Pay for the current cart from the wallet balance.
    ///
    /// Only ids and quantities travel; the backend re-prices every line
    /// from its own records. On success the balance is refreshed from the
    /// server before this returns, and the cart is cleared locally.
    ///
    /// # Errors
    ///
    /// Returns [`CheckoutError::Declined`] with the backend's message when
    /// the payment is rejected (e.g. insufficient balance).
    #[instrument(skip(self))]
    pub async fn pay_with_wallet(&self) -> Result<WalletReceipt, CheckoutError> {
        if !self.client.is_authenticated() {
            return Err(CheckoutError::NotSignedIn);
        }

        let items: Vec<CartItemRef> = self
            .cart
            .lines()
            .iter()
            .map(|line| CartItemRef {
                product_id: line.id,
                quantity: line.quantity,
            })
            .collect();
        if items.is_empty() {
            return Err(CheckoutError::EmptyCart);
        }

        let receipt = self
            .client
            .pay_with_wallet(&items)
            .await
            .map_err(declined)?;

        self.refresh_balance().await;
        self.cart.clear();
        self.notices.push(Notice::PurchaseCompleted);

        Ok(receipt)
    }

    /// Add funds to the wallet.
    ///
    /// On success the balance is refreshed from the server before this
    /// returns.
    ///
    /// # Errors
    ///
    /// Returns [`CheckoutError::InvalidAmount`] for non-positive amounts
    /// and [`CheckoutError::Declined`] with the backend's message when the
    /// top-up is rejected.
    #[instrument(skip(self))]
    pub async fn top_up(&self, amount_uzs: Decimal) -> Result<TopUpReceipt, CheckoutError> {
        if !self.client.is_authenticated() {
            return Err(CheckoutError::NotSignedIn);
        }
        if amount_uzs <= Decimal::ZERO {
            return Err(CheckoutError::InvalidAmount);
        }

        let receipt = self.client.top_up(amount_uzs).await.map_err(declined)?;

        self.refresh_balance().await;
        self.notices.push(Notice::WalletToppedUp);

        Ok(receipt)
    }

    /// Create an external payment-gateway link for the current cart.
    ///
    /// Settlement happens on the gateway; the cart stays as-is until the
    /// backend confirms the payment through its own channel.
    ///
    /// # Errors
    ///
    /// Returns [`CheckoutError::Declined`] with the backend's message if
    /// the link cannot be created.
    #[instrument(skip(self))]
    pub async fn payment_link(&self) -> Result<PaymentLink, CheckoutError> {
        if !self.client.is_authenticated() {
            return Err(CheckoutError::NotSignedIn);
        }

        let lines = self.cart.lines();
        if lines.is_empty() {
            return Err(CheckoutError::EmptyCart);
        }
        let total_usd = self.cart.total_value();

        self.client
            .generate_payment_link(&lines, total_usd)
            .await
            .map_err(declined)
    }

    /// The money moved; a failed refresh must not turn success into an
    /// error, so it is only logged.
    async fn refresh_balance(&self) {
        if let Err(error) = self.account.refresh().await {
            tracing::warn!(%error, "balance refresh after financial operation failed");
        }
    }
}

fn declined(error: ApiError) -> CheckoutError {
    match error {
        ApiError::Api { message, .. } => CheckoutError::Declined(message),
        ApiError::Unauthorized => CheckoutError::NotSignedIn,
        other => CheckoutError::Api(other),
    }
}
