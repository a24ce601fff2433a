//! Turn a confirmed candidate into a book on the shelf.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::catalog::Candidate;
use crate::error::Result;
use crate::library::{LibraryBackend, LibraryStore, NewBook, OwnedItem};

/// Submits create requests for confirmed candidates
pub struct RegistrationSubmitter<B> {
    store: Arc<LibraryStore<B>>,
    /// Submissions currently awaiting the backend
    in_flight: AtomicUsize,
}

/// Counts one submission for as long as it lives, however it ends
struct InFlight<'a>(&'a AtomicUsize);

impl<'a> InFlight<'a> {
    fn enter(counter: &'a AtomicUsize) -> Self {
        counter.fetch_add(1, Ordering::SeqCst);
        Self(counter)
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

impl<B: LibraryBackend> RegistrationSubmitter<B> {
    pub fn new(store: Arc<LibraryStore<B>>) -> Self {
        Self {
            store,
            in_flight: AtomicUsize::new(0),
        }
    }

    pub fn is_registering(&self) -> bool {
        self.in_flight.load(Ordering::SeqCst) > 0
    }

    /// Create an owned book from `candidate` with shelf defaults.
    ///
    /// Uniqueness is left to the backend. On success the shared store is
    /// updated and marked stale so every listing re-fetches.
    pub async fn register(&self, candidate: &Candidate) -> Result<OwnedItem> {
        let _guard = InFlight::enter(&self.in_flight);

        let book = NewBook::from_candidate(candidate);
        match self.store.backend().create_owned(book).await {
            Ok(item) => {
                tracing::info!("Registered '{}' as {}", candidate.title, item.id);
                self.store.record_created(item.clone());
                Ok(item)
            }
            Err(e) => {
                tracing::warn!("Failed to register '{}': {}", candidate.title, e);
                Err(e)
            }
        }
    }
}
