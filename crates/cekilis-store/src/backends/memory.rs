// SPDX-License-Identifier: Apache-2.0

use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::Mutex;

use super::truncate;
use crate::{validate_collection_name, Document, DocumentStore, StoreError, StoreErrorCode};

/// Process-local store, used as a fixture and for offline runs.
///
/// A read snapshots the collection before any injected delay, so an
/// overlapping slower read returns older data than a faster later one.
#[derive(Default)]
pub struct InMemoryDocumentStore {
    collections: Mutex<HashMap<String, Vec<Document>>>,
    failure: Mutex<Option<StoreError>>,
    delays: Mutex<VecDeque<Duration>>,
    fetch_calls: AtomicU64,
}

impl InMemoryDocumentStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_collection(mut self, collection: &str, documents: Vec<Document>) -> Self {
        self.collections
            .get_mut()
            .insert(collection.to_string(), documents);
        self
    }

    pub async fn put_collection(&self, collection: &str, documents: Vec<Document>) {
        self.collections
            .lock()
            .await
            .insert(collection.to_string(), documents);
    }

    /// Every read fails with `failure` until it is cleared with `None`.
    pub async fn set_failure(&self, failure: Option<StoreError>) {
        *self.failure.lock().await = failure;
    }

    /// Queue a delay consumed by the next read.
    pub async fn push_delay(&self, delay: Duration) {
        self.delays.lock().await.push_back(delay);
    }

    #[must_use]
    pub fn fetch_calls(&self) -> u64 {
        self.fetch_calls.load(Ordering::Relaxed)
    }
}

#[async_trait]
impl DocumentStore for InMemoryDocumentStore {
    fn backend_tag(&self) -> &'static str {
        "memory"
    }

    async fn get_documents(
        &self,
        collection: &str,
        limit: usize,
    ) -> Result<Vec<Document>, StoreError> {
        validate_collection_name(collection)?;
        self.fetch_calls.fetch_add(1, Ordering::Relaxed);

        let failure = self.failure.lock().await.clone();
        let snapshot = self.collections.lock().await.get(collection).cloned();
        let delay = self.delays.lock().await.pop_front();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        if let Some(err) = failure {
            return Err(err);
        }
        let documents = snapshot.ok_or_else(|| {
            StoreError::new(
                StoreErrorCode::NoDocuments,
                format!("collection `{collection}` has no document set"),
            )
        })?;
        Ok(truncate(documents, limit))
    }
}
