// SPDX-License-Identifier: Apache-2.0

use cekilis_core::{Error, MachineError};
use serde_json::json;

#[test]
fn machine_error_rejects_unknown_fields() {
    let raw = json!({"code": "fetch_failed", "message": "x", "extra": 1});
    assert!(serde_json::from_value::<MachineError>(raw).is_err());
}

#[test]
fn machine_error_details_default_to_empty() {
    let parsed: MachineError =
        serde_json::from_value(json!({"code": "config_error", "message": "bad page size"}))
            .expect("machine error");
    assert!(parsed.details.is_empty());
}

#[test]
fn fetch_failure_renders_collection_detail() {
    let err = Error::FetchFailed {
        collection: "artworks".to_string(),
        reason: "no_documents: store returned no document set".to_string(),
    };
    let machine = err.to_machine_error();
    assert_eq!(machine.code, "fetch_failed");
    assert_eq!(
        machine.details.get("collection").map(String::as_str),
        Some("artworks")
    );
}
