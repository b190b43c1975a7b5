//! User-facing notices.
//!
//! The stores emit short notifications (the "toast" surface of a UI) for
//! events the user should see immediately: optimistic successes and
//! blocked unauthenticated mutations. Collection-mutation *failures* never
//! appear here - they self-heal silently by re-syncing from the server.

use core::fmt;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, PoisonError};

/// A short, user-facing notification emitted by the stores.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    /// A mutation was attempted without being signed in.
    SignInRequired,
    /// A product was added to the cart.
    AddedToCart,
    /// A product was removed from the cart.
    RemovedFromCart,
    /// A product was saved to the wishlist.
    SavedToWishlist,
    /// A product was removed from the wishlist.
    RemovedFromWishlist,
    /// The wallet was topped up.
    WalletToppedUp,
    /// A wallet purchase settled.
    PurchaseCompleted,
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Self::SignInRequired => "You need to sign in first",
            Self::AddedToCart => "Added to your cart",
            Self::RemovedFromCart => "Removed from your cart",
            Self::SavedToWishlist => "Saved to your wishlist",
            Self::RemovedFromWishlist => "Removed from your wishlist",
            Self::WalletToppedUp => "Wallet topped up",
            Self::PurchaseCompleted => "Purchase completed",
        };
        f.write_str(text)
    }
}

/// Process-scoped queue of notices, drained by the UI layer.
///
/// Cheaply cloneable; every store in a [`crate::Session`] shares one queue.
#[derive(Clone, Default)]
pub struct Notices {
    inner: Arc<Mutex<VecDeque<Notice>>>,
}

impl Notices {
    /// Create an empty queue.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push(&self, notice: Notice) {
        self.lock().push_back(notice);
    }

    /// Take every queued notice, oldest first.
    #[must_use]
    pub fn drain(&self) -> Vec<Notice> {
        self.lock().drain(..).collect()
    }

    /// Number of queued notices.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Whether the queue is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, VecDeque<Notice>> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
