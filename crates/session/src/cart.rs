//! Cart store: an optimistic local mirror of the remote cart.

use rust_decimal::Decimal;
use tracing::instrument;

use neon_bazaar_client::{ApiClient, CartLine, Product};
use neon_bazaar_core::ProductId;

use crate::notice::{Notice, Notices};
use crate::sync::{Keyed, SyncCollection};

impl Keyed for CartLine {
    fn key(&self) -> ProductId {
        self.id
    }
}

/// The session's cart.
///
/// Mutations update local state synchronously and settle the remote call
/// afterwards; failures snap the cart back to the server's view. See the
/// crate docs for the full synchronization model.
pub struct CartStore {
    client: ApiClient,
    notices: Notices,
    lines: SyncCollection<CartLine>,
}

impl CartStore {
    pub(crate) fn new(client: ApiClient, notices: Notices) -> Self {
        Self {
            client,
            notices,
            lines: SyncCollection::new(),
        }
    }

    // =========================================================================
    // Reads
    // =========================================================================

    /// Current cart lines, in server order.
    #[must_use]
    pub fn lines(&self) -> Vec<CartLine> {
        self.lines.snapshot()
    }

    /// Whether the cart has no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.apply(|lines| lines.is_empty())
    }

    /// Total number of units across all lines.
    #[must_use]
    pub fn total_quantity(&self) -> u32 {
        self.lines
            .apply(|lines| lines.iter().map(|line| line.quantity).sum())
    }

    /// Total cart value in the base currency: Σ price × quantity.
    #[must_use]
    pub fn total_value(&self) -> Decimal {
        self.lines.apply(|lines| {
            lines
                .iter()
                .map(|line| line.price.times(line.quantity))
                .sum()
        })
    }

    // =========================================================================
    // Synchronization
    // =========================================================================

    /// Refresh the cart from the server.
    ///
    /// Without a credential the cart is simply empty - not an error.
    /// Overlapping calls collapse into one request; a failed fetch keeps
    /// the current lines.
    #[instrument(skip(self))]
    pub async fn load(&self) {
        if !self.client.is_authenticated() {
            return;
        }
        self.lines.load_with(self.client.fetch_cart()).await;
    }

    /// Add a product to the cart.
    ///
    /// Signed out: one [`Notice::SignInRequired`], no state change, no
    /// network call. Otherwise the line appears (or its quantity grows)
    /// immediately and the remote call settles in the background.
    #[instrument(skip(self, product), fields(product_id = %product.id))]
    pub async fn add(&self, product: &Product) {
        if !self.client.is_authenticated() {
            self.notices.push(Notice::SignInRequired);
            return;
        }

        self.lines.apply(|lines| {
            if let Some(line) = lines.iter_mut().find(|line| line.id == product.id) {
                line.quantity += 1;
            } else {
                lines.push(CartLine::from(product));
            }
        });
        self.notices.push(Notice::AddedToCart);

        let outcome = self.client.add_cart_line(product.id, 1).await;
        self.lines.commit(outcome, self.client.fetch_cart()).await;
    }

    /// Remove a product from the cart.
    #[instrument(skip(self), fields(product_id = %id))]
    pub async fn remove(&self, id: ProductId) {
        if !self.client.is_authenticated() {
            return;
        }

        self.lines.apply(|lines| lines.retain(|line| line.id != id));
        self.notices.push(Notice::RemovedFromCart);

        let outcome = self.client.remove_cart_line(id).await;
        self.lines.commit(outcome, self.client.fetch_cart()).await;
    }

    /// Set a line's quantity.
    ///
    /// Zero is redefined as removal: a line is never observable at
    /// quantity 0. A failed update reconciles to whatever the server
    /// reports, not to the pre-update quantity.
    #[instrument(skip(self), fields(product_id = %id))]
    pub async fn set_quantity(&self, id: ProductId, quantity: u32) {
        if quantity == 0 {
            self.remove(id).await;
            return;
        }
        if !self.client.is_authenticated() {
            return;
        }

        self.lines.apply(|lines| {
            if let Some(line) = lines.iter_mut().find(|line| line.id == id) {
                line.quantity = quantity;
            }
        });

        let outcome = self.client.update_cart_line(id, quantity).await;
        self.lines.commit(outcome, self.client.fetch_cart()).await;
    }

    /// Increase a line's quantity by one.
    pub async fn increment(&self, id: ProductId) {
        let Some(current) = self.quantity_of(id) else {
            return;
        };
        self.set_quantity(id, current + 1).await;
    }

    /// Decrease a line's quantity by one.
    ///
    /// Decrementing a quantity-1 line removes it.
    pub async fn decrement(&self, id: ProductId) {
        let Some(current) = self.quantity_of(id) else {
            return;
        };
        self.set_quantity(id, current - 1).await;
    }

    /// Local-only reset, used on sign-out. The remote cart is untouched.
    pub fn clear(&self) {
        self.lines.clear();
    }

    fn quantity_of(&self, id: ProductId) -> Option<u32> {
        self.lines.apply(|lines| {
            lines
                .iter()
                .find(|line| line.id == id)
                .map(|line| line.quantity)
        })
    }
}
