#![forbid(unsafe_code)]

mod backends;
mod error;
mod instrumentation;

pub use backends::local::LocalFsDocumentStore;
pub use backends::memory::InMemoryDocumentStore;
#[cfg(feature = "backend-http")]
pub use backends::http::HttpDocumentStore;
pub use error::{StoreError, StoreErrorCode};
pub use instrumentation::{NoopInstrumentation, StoreInstrumentation};

pub use cekilis_model::Document;

use async_trait::async_trait;

pub const CRATE_NAME: &str = "cekilis-store";

pub const COLLECTION_NAME_MAX_LEN: usize = 64;

/// Read side of a remote document collection.
///
/// Implementations return at most `limit` documents in store order and never
/// retry; a store with no document set for the collection reports
/// [`StoreErrorCode::NoDocuments`].
#[async_trait]
pub trait DocumentStore: Send + Sync {
    fn backend_tag(&self) -> &'static str;

    async fn get_documents(
        &self,
        collection: &str,
        limit: usize,
    ) -> Result<Vec<Document>, StoreError>;
}

/// Collection names end up in paths and URLs; keep them to `[A-Za-z0-9_-]+`.
pub fn validate_collection_name(collection: &str) -> Result<(), StoreError> {
    if collection.is_empty() {
        return Err(StoreError::new(
            StoreErrorCode::Validation,
            "collection name must not be empty",
        ));
    }
    if collection.len() > COLLECTION_NAME_MAX_LEN {
        return Err(StoreError::new(
            StoreErrorCode::Validation,
            format!("collection name exceeds max length {COLLECTION_NAME_MAX_LEN}"),
        ));
    }
    if !collection
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
    {
        return Err(StoreError::new(
            StoreErrorCode::Validation,
            format!("collection name `{collection}` must match [A-Za-z0-9_-]+"),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{validate_collection_name, StoreErrorCode};

    #[test]
    fn collection_names_reject_path_segments() {
        assert!(validate_collection_name("tickets").is_ok());
        assert!(validate_collection_name("raffle-archive_2").is_ok());
        for bad in ["", "../tickets", "tickets/x", "a b"] {
            let err = validate_collection_name(bad).expect_err("must reject");
            assert_eq!(err.code, StoreErrorCode::Validation, "{bad}");
        }
    }
}
