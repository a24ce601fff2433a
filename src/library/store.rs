//! Shared cache of the owned-book listing.
//!
//! The store is created once and handed to every consumer that needs the
//! shelf contents. Writers call [`LibraryStore::invalidate`] (or
//! [`LibraryStore::record_created`]) after a successful mutation; the next
//! [`LibraryStore::items`] call re-fetches from the backend.

use std::collections::HashSet;
use std::sync::Arc;

use parking_lot::RwLock;

use crate::error::Result;

use super::{LibraryBackend, OwnedItem};

#[derive(Debug, Default)]
struct Cached {
    items: Option<Vec<OwnedItem>>,
    stale: bool,
}

/// Cached, explicitly invalidated view of the user's shelf
pub struct LibraryStore<B> {
    backend: Arc<B>,
    cache: RwLock<Cached>,
}

impl<B: LibraryBackend> LibraryStore<B> {
    pub fn new(backend: Arc<B>) -> Self {
        Self {
            backend,
            cache: RwLock::new(Cached::default()),
        }
    }

    /// The backend this store reads from
    pub fn backend(&self) -> &Arc<B> {
        &self.backend
    }

    /// Owned books, fetched from the backend when missing or stale
    pub async fn items(&self) -> Result<Vec<OwnedItem>> {
        {
            let cache = self.cache.read();
            if let Some(items) = &cache.items
                && !cache.stale
            {
                return Ok(items.clone());
            }
        }
        self.refresh().await
    }

    /// Re-fetch the listing unconditionally
    pub async fn refresh(&self) -> Result<Vec<OwnedItem>> {
        let items = self.backend.list_owned().await?;
        let mut cache = self.cache.write();
        cache.items = Some(items.clone());
        cache.stale = false;
        Ok(items)
    }

    /// Last fetched listing without touching the backend
    pub fn cached(&self) -> Option<Vec<OwnedItem>> {
        self.cache.read().items.clone()
    }

    /// Whether a mutation happened since the last successful fetch
    pub fn is_stale(&self) -> bool {
        self.cache.read().stale
    }

    /// Mark the listing stale; the next `items()` call re-fetches
    pub fn invalidate(&self) {
        self.cache.write().stale = true;
    }

    /// Fold a newly created item into the cached listing and mark it stale.
    ///
    /// Keeps duplicate checks accurate until the re-fetch happens.
    pub fn record_created(&self, item: OwnedItem) {
        let mut cache = self.cache.write();
        cache.items.get_or_insert_with(Vec::new).push(item);
        cache.stale = true;
    }

    /// External IDs of every cached owned book
    pub fn registered_ids(&self) -> HashSet<String> {
        self.cache
            .read()
            .items
            .iter()
            .flatten()
            .filter_map(|item| item.external_id.clone())
            .collect()
    }

    /// Whether a catalog volume is already on the shelf.
    ///
    /// Advisory: answers from the cached listing, which other writers may
    /// change at any time. Returns false before the first fetch.
    pub fn is_registered(&self, external_id: &str) -> bool {
        self.cache
            .read()
            .items
            .iter()
            .flatten()
            .any(|item| item.external_id.as_deref() == Some(external_id))
    }
}
