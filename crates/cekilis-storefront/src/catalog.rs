// SPDX-License-Identifier: Apache-2.0

//! Per-collection catalog repository.
//!
//! Holds the last successfully fetched page of one collection. Fetches may
//! overlap; a response only replaces the held list when no newer request has
//! already been installed.

use std::collections::BTreeSet;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use cekilis_core::{Error, Result};
use cekilis_model::{Categorized, Category, CategoryFilter, FromDocument};
use cekilis_store::{DocumentStore, StoreErrorCode};
use tracing::{debug, info, instrument, warn};

use crate::shuffle::{shuffled, RandomShuffle, Shuffle};

struct CatalogState<E> {
    items: Arc<Vec<E>>,
    installed_request: u64,
    last_error: Option<String>,
}

pub struct CatalogRepository<E> {
    store: Arc<dyn DocumentStore>,
    shuffle: Arc<dyn Shuffle>,
    page_size: usize,
    state: RwLock<CatalogState<E>>,
    next_request: AtomicU64,
    in_flight: AtomicUsize,
}

struct LoadingGuard<'a>(&'a AtomicUsize);

impl<'a> LoadingGuard<'a> {
    fn enter(counter: &'a AtomicUsize) -> Self {
        counter.fetch_add(1, Ordering::SeqCst);
        Self(counter)
    }
}

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

impl<E> CatalogRepository<E>
where
    E: FromDocument + Categorized + Send + Sync,
{
    #[must_use]
    pub fn new(store: Arc<dyn DocumentStore>, page_size: usize) -> Self {
        Self {
            store,
            shuffle: Arc::new(RandomShuffle),
            page_size,
            state: RwLock::new(CatalogState {
                items: Arc::new(Vec::new()),
                installed_request: 0,
                last_error: None,
            }),
            next_request: AtomicU64::new(0),
            in_flight: AtomicUsize::new(0),
        }
    }

    #[must_use]
    pub fn with_shuffle(mut self, shuffle: Arc<dyn Shuffle>) -> Self {
        self.shuffle = shuffle;
        self
    }

    /// Last installed list; empty before the first successful fetch.
    #[must_use]
    pub fn current(&self) -> Arc<Vec<E>> {
        Arc::clone(&self.read_state().items)
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.in_flight.load(Ordering::SeqCst) > 0
    }

    #[must_use]
    pub fn last_error(&self) -> Option<String> {
        self.read_state().last_error.clone()
    }

    #[must_use]
    pub fn categories(&self) -> Vec<Category> {
        self.current()
            .iter()
            .map(|item| item.category().clone())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Owned copies of the held items matching `filter`.
    #[must_use]
    pub fn visible(&self, filter: &CategoryFilter) -> Vec<E>
    where
        E: Clone,
    {
        self.current()
            .iter()
            .filter(|item| filter.matches(*item))
            .cloned()
            .collect()
    }

    /// Read one page, decode, shuffle and install it.
    ///
    /// On failure the held list is left as it was and the error is returned.
    #[instrument(skip(self), fields(collection = E::COLLECTION.as_str(), page_size = self.page_size))]
    pub async fn fetch(&self) -> Result<Arc<Vec<E>>> {
        if self.page_size == 0 {
            return Err(Error::InvalidArgument {
                name: "page_size",
                reason: "must be greater than zero".to_string(),
            });
        }
        let collection = E::COLLECTION.as_str();
        let request = self.next_request.fetch_add(1, Ordering::SeqCst) + 1;
        let _loading = LoadingGuard::enter(&self.in_flight);

        let documents = match self.store.get_documents(collection, self.page_size).await {
            Ok(documents) => documents,
            Err(err) => {
                if err.code == StoreErrorCode::NoDocuments {
                    warn!(request, "store has no documents for collection");
                } else {
                    warn!(request, error = %err, "catalog fetch failed; keeping previous list");
                }
                let reason = err.to_string();
                let mut state = self.write_state();
                if request > state.installed_request {
                    state.last_error = Some(reason.clone());
                }
                return Err(Error::FetchFailed {
                    collection: collection.to_string(),
                    reason,
                });
            }
        };

        let decoded: Vec<E> = documents.iter().map(E::from_document).collect();
        let items = Arc::new(shuffled(self.shuffle.as_ref(), decoded));
        let mut state = self.write_state();
        if request > state.installed_request {
            state.installed_request = request;
            state.items = Arc::clone(&items);
            state.last_error = None;
            info!(request, count = items.len(), "catalog installed");
        } else {
            debug!(
                request,
                installed = state.installed_request,
                "dropping stale catalog response"
            );
        }
        Ok(Arc::clone(&state.items))
    }

    fn read_state(&self) -> RwLockReadGuard<'_, CatalogState<E>> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write_state(&self) -> RwLockWriteGuard<'_, CatalogState<E>> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }
}
