#[cfg(feature = "backend-http")]
pub mod http;
pub mod local;
pub mod memory;

use crate::Document;

pub(crate) fn truncate(mut documents: Vec<Document>, limit: usize) -> Vec<Document> {
    documents.truncate(limit);
    documents
}
