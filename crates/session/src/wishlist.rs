//! Wishlist store: boolean-membership mirror of the remote wishlist.

use tracing::instrument;

use neon_bazaar_client::{ApiClient, Product, WishlistEntry};
use neon_bazaar_core::ProductId;

use crate::notice::{Notice, Notices};
use crate::sync::{Keyed, SyncCollection};

impl Keyed for WishlistEntry {
    fn key(&self) -> ProductId {
        self.id
    }
}

/// The session's wishlist. Presence is boolean; there are no quantities.
pub struct WishlistStore {
    client: ApiClient,
    notices: Notices,
    entries: SyncCollection<WishlistEntry>,
}

impl WishlistStore {
    pub(crate) fn new(client: ApiClient, notices: Notices) -> Self {
        Self {
            client,
            notices,
            entries: SyncCollection::new(),
        }
    }

    /// Current entries, in server order.
    #[must_use]
    pub fn entries(&self) -> Vec<WishlistEntry> {
        self.entries.snapshot()
    }

    /// Whether the product is on the wishlist.
    #[must_use]
    pub fn is_saved(&self, id: ProductId) -> bool {
        self.entries.contains(id)
    }

    /// Refresh the wishlist from the server.
    ///
    /// Same contract as [`crate::CartStore::load`]: signed out means empty,
    /// overlapping calls collapse, failures keep local state.
    #[instrument(skip(self))]
    pub async fn load(&self) {
        if !self.client.is_authenticated() {
            return;
        }
        self.entries.load_with(self.client.fetch_wishlist()).await;
    }

    /// Flip a product's wishlist membership.
    ///
    /// Signed out: one [`Notice::SignInRequired`], no state change, no
    /// network call. Otherwise membership flips immediately with a
    /// state-appropriate notice, and the remote toggle settles in the
    /// background.
    #[instrument(skip(self, product), fields(product_id = %product.id))]
    pub async fn toggle(&self, product: &Product) {
        if !self.client.is_authenticated() {
            self.notices.push(Notice::SignInRequired);
            return;
        }

        let was_saved = self.entries.apply(|entries| {
            let before = entries.len();
            entries.retain(|entry| entry.id != product.id);
            if entries.len() == before {
                entries.push(WishlistEntry::from(product));
                false
            } else {
                true
            }
        });
        self.notices.push(if was_saved {
            Notice::RemovedFromWishlist
        } else {
            Notice::SavedToWishlist
        });

        let outcome = self.client.toggle_wishlist(product.id).await.map(drop);
        self.entries
            .commit(outcome, self.client.fetch_wishlist())
            .await;
    }

    /// Remove a product from the wishlist.
    #[instrument(skip(self), fields(product_id = %id))]
    pub async fn remove(&self, id: ProductId) {
        if !self.client.is_authenticated() {
            return;
        }

        self.entries
            .apply(|entries| entries.retain(|entry| entry.id != id));
        self.notices.push(Notice::RemovedFromWishlist);

        let outcome = self.client.remove_wishlist(id).await;
        self.entries
            .commit(outcome, self.client.fetch_wishlist())
            .await;
    }

    /// Local-only reset, used on sign-out.
    pub fn clear(&self) {
        self.entries.clear();
    }
}
