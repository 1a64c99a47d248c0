// SPDX-License-Identifier: Apache-2.0

use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

use async_trait::async_trait;
use tracing::instrument;

use super::truncate;
use crate::{
    validate_collection_name, Document, DocumentStore, NoopInstrumentation, StoreError,
    StoreErrorCode, StoreInstrumentation,
};

/// Reads `<root>/<collection>.json`, a JSON array of documents.
pub struct LocalFsDocumentStore {
    root: PathBuf,
    instrumentation: Arc<dyn StoreInstrumentation>,
}

impl LocalFsDocumentStore {
    #[must_use]
    pub fn new(root: PathBuf) -> Self {
        Self {
            root,
            instrumentation: Arc::new(NoopInstrumentation),
        }
    }

    #[must_use]
    pub fn with_instrumentation(mut self, instrumentation: Arc<dyn StoreInstrumentation>) -> Self {
        self.instrumentation = instrumentation;
        self
    }

    #[must_use]
    pub fn collection_path(&self, collection: &str) -> PathBuf {
        self.root.join(format!("{collection}.json"))
    }

    fn read_collection(&self, collection: &str) -> Result<Vec<Document>, StoreError> {
        validate_collection_name(collection)?;
        let path = self.collection_path(collection);
        let bytes = fs::read(&path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => StoreError::new(
                StoreErrorCode::NoDocuments,
                format!("no document set at {}", path.display()),
            ),
            _ => StoreError::new(
                StoreErrorCode::Io,
                format!("read {} failed: {e}", path.display()),
            ),
        })?;
        serde_json::from_slice(&bytes).map_err(|e| {
            StoreError::new(
                StoreErrorCode::Validation,
                format!("parse {} failed: {e}", path.display()),
            )
        })
    }
}

#[async_trait]
impl DocumentStore for LocalFsDocumentStore {
    fn backend_tag(&self) -> &'static str {
        "localfs"
    }

    #[instrument(skip(self), fields(backend = "localfs"))]
    async fn get_documents(
        &self,
        collection: &str,
        limit: usize,
    ) -> Result<Vec<Document>, StoreError> {
        let started = Instant::now();
        match self.read_collection(collection) {
            Ok(documents) => {
                let documents = truncate(documents, limit);
                self.instrumentation.observe_fetch(
                    self.backend_tag(),
                    collection,
                    documents.len(),
                    started.elapsed(),
                );
                Ok(documents)
            }
            Err(err) => {
                self.instrumentation
                    .observe_error(self.backend_tag(), collection, err.code);
                Err(err)
            }
        }
    }
}
