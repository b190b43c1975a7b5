//! Generic optimistic synchronization engine.
//!
//! A [`SyncCollection`] is an ordered, id-keyed local mirror of a remote
//! collection. Mutations touch local state synchronously; the remote call
//! settles afterwards, and any failure is resolved by replacing the local
//! collection with the server's list ([`SyncCollection::commit`]).

use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, PoisonError};

use neon_bazaar_client::ApiError;
use neon_bazaar_core::ProductId;

/// An entity that can live in a synchronized collection.
pub trait Keyed {
    /// Stable identity of the entity within its collection.
    fn key(&self) -> ProductId;
}

/// An ordered collection mirroring a remote source of truth.
///
/// The state lock is never held across an await point; concurrent mutations
/// on the same id are dispatched independently and converge through
/// reconciliation (last-write-wins, with the server's view winning once any
/// failure settles).
pub(crate) struct SyncCollection<E> {
    items: Mutex<Vec<E>>,
    load_in_flight: AtomicBool,
}

impl<E: Keyed + Clone> SyncCollection<E> {
    pub fn new() -> Self {
        Self {
            items: Mutex::new(Vec::new()),
            load_in_flight: AtomicBool::new(false),
        }
    }

    /// Snapshot of the current items, in server order.
    pub fn snapshot(&self) -> Vec<E> {
        self.apply(|items| items.clone())
    }

    /// Whether an entity with the given key is present.
    pub fn contains(&self, key: ProductId) -> bool {
        self.apply(|items| items.iter().any(|item| item.key() == key))
    }

    /// Run a closure against the items under the state lock.
    pub fn apply<R>(&self, f: impl FnOnce(&mut Vec<E>) -> R) -> R {
        let mut items = self.items.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut items)
    }

    /// Local-only reset; the remote collection is untouched.
    pub fn clear(&self) {
        self.apply(Vec::clear);
    }

    /// Refresh the collection from the server.
    ///
    /// A second call while one is outstanding is a no-op. On success the
    /// whole local collection is replaced with the server's ordered list;
    /// on failure prior local state stands and nothing is surfaced to the
    /// user - an unreachable backend is a transient condition here, not a
    /// fatal one.
    pub async fn load_with<F>(&self, fetch: F)
    where
        F: Future<Output = Result<Vec<E>, ApiError>>,
    {
        if self
            .load_in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            tracing::debug!("load already in flight, skipping");
            return;
        }
        // Released on drop, so a cancelled fetch cannot wedge the flag.
        let _guard = LoadFlagGuard(&self.load_in_flight);

        match fetch.await {
            Ok(items) => self.apply(|current| *current = items),
            Err(error) => {
                tracing::debug!(%error, "collection refresh failed, keeping local state");
            }
        }
    }

    /// Settle a remote mutation.
    ///
    /// A failure discards whatever the optimistic mutation did by
    /// refetching the authoritative list. If a reconciling load is already
    /// in flight it will carry the server truth anyway, so the overlap
    /// guard in [`Self::load_with`] applies here too.
    pub async fn commit<T, F>(&self, outcome: Result<T, ApiError>, refetch: F)
    where
        F: Future<Output = Result<Vec<E>, ApiError>>,
    {
        if let Err(error) = outcome {
            tracing::warn!(%error, "remote mutation failed, re-syncing from server");
            self.load_with(refetch).await;
        }
    }
}

struct LoadFlagGuard<'a>(&'a AtomicBool);

impl Drop for LoadFlagGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}
