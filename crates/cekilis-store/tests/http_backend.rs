// SPDX-License-Identifier: Apache-2.0

#![cfg(feature = "backend-http")]

use cekilis_store::{DocumentStore, HttpDocumentStore, StoreErrorCode};
use serde_json::json;
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;
use tiny_http::{Header, Response, Server, StatusCode};

fn spawn_document_server() -> (String, Arc<Mutex<Vec<String>>>, thread::JoinHandle<()>) {
    let server = Server::http("127.0.0.1:0").expect("http server");
    let base = format!("http://{}", server.server_addr());
    let seen = Arc::new(Mutex::new(Vec::new()));
    let seen_clone = Arc::clone(&seen);
    let handle = thread::spawn(move || loop {
        let req = match server.recv_timeout(Duration::from_millis(500)) {
            Ok(Some(req)) => req,
            Ok(None) | Err(_) => break,
        };
        let url = req.url().to_string();
        seen_clone.lock().expect("seen lock").push(url.clone());
        if url.starts_with("/tickets") {
            let body = serde_json::to_vec(&json!([
                {"id": "t1", "fields": {"ticketPrice": 5}},
                {"id": "t2", "fields": {"ticketPrice": 10}},
                {"id": "t3", "fields": {"ticketPrice": 15}}
            ]))
            .expect("body");
            let _ = req.respond(Response::from_data(body).with_header(
                Header::from_bytes("Content-Type", "application/json").expect("header"),
            ));
        } else if url.starts_with("/broken") {
            let _ = req.respond(Response::empty(StatusCode(503)));
        } else {
            let _ = req.respond(Response::empty(StatusCode(404)));
        }
    });
    (base, seen, handle)
}

#[tokio::test]
async fn http_store_sends_limit_and_truncates() {
    let (base, seen, handle) = spawn_document_server();
    let store = HttpDocumentStore::new(base, Duration::from_secs(2)).expect("client");

    let page = store.get_documents("tickets", 2).await.expect("page");
    assert_eq!(page.len(), 2);
    assert_eq!(page[0].id, "t1");

    let err = store
        .get_documents("artworks", 2)
        .await
        .expect_err("404 means no document set");
    assert_eq!(err.code, StoreErrorCode::NoDocuments);

    let err = store
        .get_documents("broken", 2)
        .await
        .expect_err("5xx is a network failure");
    assert_eq!(err.code, StoreErrorCode::Network);

    handle.join().expect("server thread");
    let seen = seen.lock().expect("seen lock");
    assert_eq!(seen[0], "/tickets?limit=2");
}

#[test]
fn http_store_builds_collection_urls() {
    let store =
        HttpDocumentStore::new("https://store.example.com/v1/", Duration::from_secs(1))
            .expect("client");
    assert_eq!(
        store.url_for("tickets"),
        "https://store.example.com/v1/tickets"
    );
}
