// SPDX-License-Identifier: Apache-2.0

use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use tracing::{debug, instrument};

use super::truncate;
use crate::{
    validate_collection_name, Document, DocumentStore, NoopInstrumentation, StoreError,
    StoreErrorCode, StoreInstrumentation,
};

/// Read-only REST backend: `GET {base_url}/{collection}?limit=N` answering a
/// JSON array of documents.
#[derive(Clone)]
pub struct HttpDocumentStore {
    base_url: String,
    client: Client,
    instrumentation: Arc<dyn StoreInstrumentation>,
}

impl HttpDocumentStore {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, StoreError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| StoreError::new(StoreErrorCode::Internal, e.to_string()))?;
        Ok(Self {
            base_url: base_url.into(),
            client,
            instrumentation: Arc::new(NoopInstrumentation),
        })
    }

    #[must_use]
    pub fn with_instrumentation(mut self, instrumentation: Arc<dyn StoreInstrumentation>) -> Self {
        self.instrumentation = instrumentation;
        self
    }

    #[must_use]
    pub fn url_for(&self, collection: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), collection)
    }

    async fn fetch(&self, collection: &str, limit: usize) -> Result<Vec<Document>, StoreError> {
        validate_collection_name(collection)?;
        let url = self.url_for(collection);
        let response = self
            .client
            .get(&url)
            .query(&[("limit", limit)])
            .send()
            .await
            .map_err(|e| StoreError::new(StoreErrorCode::Network, e.to_string()))?;

        let status = response.status();
        debug!(%url, status = status.as_u16(), "document store response");
        if status == StatusCode::NOT_FOUND {
            return Err(StoreError::new(
                StoreErrorCode::NoDocuments,
                format!("collection `{collection}` not found at {url}"),
            ));
        }
        if !status.is_success() {
            return Err(StoreError::new(
                StoreErrorCode::Network,
                format!("unexpected status {status} from {url}"),
            ));
        }
        let documents: Vec<Document> = response
            .json()
            .await
            .map_err(|e| StoreError::new(StoreErrorCode::Validation, e.to_string()))?;
        Ok(truncate(documents, limit))
    }
}

#[async_trait]
impl DocumentStore for HttpDocumentStore {
    fn backend_tag(&self) -> &'static str {
        "http"
    }

    #[instrument(skip(self), fields(backend = "http"))]
    async fn get_documents(
        &self,
        collection: &str,
        limit: usize,
    ) -> Result<Vec<Document>, StoreError> {
        let started = Instant::now();
        let result = self.fetch(collection, limit).await;
        match &result {
            Ok(documents) => self.instrumentation.observe_fetch(
                self.backend_tag(),
                collection,
                documents.len(),
                started.elapsed(),
            ),
            Err(err) => self
                .instrumentation
                .observe_error(self.backend_tag(), collection, err.code),
        }
        result
    }
}
