// SPDX-License-Identifier: Apache-2.0

use cekilis_store::{
    Document, DocumentStore, InMemoryDocumentStore, LocalFsDocumentStore, StoreError,
    StoreErrorCode, StoreInstrumentation,
};
use serde_json::json;
use std::fs;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tempfile::tempdir;

fn docs(n: usize) -> Vec<Document> {
    (0..n)
        .map(|i| Document::new(format!("tk-{i}")).with_field("category", "tablet"))
        .collect()
}

#[tokio::test]
async fn memory_store_truncates_to_limit() {
    let store = InMemoryDocumentStore::new().with_collection("tickets", docs(5));
    let page = store.get_documents("tickets", 3).await.expect("page");
    let ids: Vec<_> = page.iter().map(|d| d.id.as_str()).collect();
    assert_eq!(ids, vec!["tk-0", "tk-1", "tk-2"]);
    assert_eq!(store.fetch_calls(), 1);
}

#[tokio::test]
async fn memory_store_without_collection_reports_no_documents() {
    let store = InMemoryDocumentStore::new();
    let err = store
        .get_documents("artworks", 150)
        .await
        .expect_err("no document set");
    assert_eq!(err.code, StoreErrorCode::NoDocuments);
}

#[tokio::test]
async fn memory_store_failure_is_sticky_until_cleared() {
    let store = InMemoryDocumentStore::new().with_collection("tickets", docs(1));
    store
        .set_failure(Some(StoreError::new(StoreErrorCode::Network, "offline")))
        .await;
    assert!(store.get_documents("tickets", 10).await.is_err());
    assert!(store.get_documents("tickets", 10).await.is_err());
    store.set_failure(None).await;
    assert_eq!(store.get_documents("tickets", 10).await.expect("ok").len(), 1);
}

#[tokio::test]
async fn memory_store_snapshots_before_delay() {
    let store = Arc::new(InMemoryDocumentStore::new().with_collection("tickets", docs(1)));
    store.push_delay(Duration::from_millis(50)).await;
    let slow = {
        let store = Arc::clone(&store);
        tokio::spawn(async move { store.get_documents("tickets", 10).await })
    };
    tokio::time::sleep(Duration::from_millis(10)).await;
    store.put_collection("tickets", docs(3)).await;
    let fresh = store.get_documents("tickets", 10).await.expect("fresh");
    let stale = slow.await.expect("join").expect("stale");
    assert_eq!(fresh.len(), 3);
    assert_eq!(stale.len(), 1);
}

#[derive(Default)]
struct CountingInstrumentation {
    fetches: AtomicUsize,
    errors: AtomicUsize,
}

impl StoreInstrumentation for CountingInstrumentation {
    fn observe_fetch(&self, _backend: &str, _collection: &str, _documents: usize, _latency: Duration) {
        self.fetches.fetch_add(1, Ordering::Relaxed);
    }

    fn observe_error(&self, _backend: &str, _collection: &str, _code: StoreErrorCode) {
        self.errors.fetch_add(1, Ordering::Relaxed);
    }
}

#[tokio::test]
async fn local_store_reads_collection_file() {
    let root = tempdir().expect("tempdir");
    let body = json!([
        {"id": "a", "fields": {"category": "telefon", "ticketPrice": 5}},
        {"id": "b", "fields": {}},
        {"id": "c"}
    ]);
    fs::write(
        root.path().join("tickets.json"),
        serde_json::to_vec(&body).expect("json"),
    )
    .expect("write tickets");

    let instrumentation = Arc::new(CountingInstrumentation::default());
    let store = LocalFsDocumentStore::new(root.path().to_path_buf())
        .with_instrumentation(instrumentation.clone());
    let page = store.get_documents("tickets", 2).await.expect("page");
    assert_eq!(page.len(), 2);
    assert_eq!(page[0].get("category"), Some(&json!("telefon")));

    let missing = store
        .get_documents("artworks", 2)
        .await
        .expect_err("missing file");
    assert_eq!(missing.code, StoreErrorCode::NoDocuments);
    assert_eq!(instrumentation.fetches.load(Ordering::Relaxed), 1);
    assert_eq!(instrumentation.errors.load(Ordering::Relaxed), 1);
}

#[tokio::test]
async fn local_store_rejects_malformed_json_and_bad_names() {
    let root = tempdir().expect("tempdir");
    fs::write(root.path().join("tickets.json"), b"{not json").expect("write");
    let store = LocalFsDocumentStore::new(root.path().to_path_buf());
    let err = store.get_documents("tickets", 10).await.expect_err("bad json");
    assert_eq!(err.code, StoreErrorCode::Validation);
    let err = store
        .get_documents("../tickets", 10)
        .await
        .expect_err("bad name");
    assert_eq!(err.code, StoreErrorCode::Validation);
}
