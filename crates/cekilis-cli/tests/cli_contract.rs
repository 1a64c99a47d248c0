// SPDX-License-Identifier: Apache-2.0

use std::fs;
use std::path::Path;

use assert_cmd::Command;
use serde_json::{json, Value};
use tempfile::{tempdir, TempDir};

const CEKILIS_ENV: [&str; 8] = [
    "CEKILIS_CONFIG",
    "CEKILIS_PAGE_SIZE",
    "CEKILIS_SHOW_ALL_CATEGORY",
    "CEKILIS_HTTP_TIMEOUT_MS",
    "CEKILIS_STORE_URL",
    "CEKILIS_STORE_ROOT",
    "CEKILIS_LOG_LEVEL",
    "CEKILIS_LOG_JSON",
];

fn cekilis(cwd: &Path) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_cekilis"));
    cmd.current_dir(cwd);
    for name in CEKILIS_ENV {
        cmd.env_remove(name);
    }
    cmd
}

fn seeded_store() -> TempDir {
    let dir = tempdir().expect("tempdir");
    let tickets = json!([
        {"id": "t1", "fields": {"category": "araba", "titleTicket": "Sedan", "ticketPrice": 5, "purchaseCount": 25, "totalTicket": 100}},
        {"id": "t2", "fields": {"category": "telefon", "titleTicket": "Phone", "ticketPrice": "12.5"}},
        {"id": "t3", "fields": {"category": "telefon", "titleTicket": "Phone 2"}}
    ]);
    let artworks = json!([
        {"id": "a1", "fields": {"category": "tablet", "prompt": "tablet"}},
        {"id": "a2", "fields": {"category": "hoverboard", "prompt": "board"}},
        {"id": "a3", "fields": {"category": "tablet", "prompt": "tablet 2"}}
    ]);
    fs::write(dir.path().join("tickets.json"), tickets.to_string()).expect("tickets");
    fs::write(dir.path().join("artworks.json"), artworks.to_string()).expect("artworks");
    dir
}

fn stdout_json(output: &std::process::Output) -> Value {
    serde_json::from_slice(&output.stdout).expect("json stdout")
}

fn parse_commands_from_help(text: &str) -> Vec<String> {
    let mut commands = Vec::new();
    let mut in_commands = false;
    for line in text.lines() {
        let trimmed = line.trim_end();
        if trimmed == "Commands:" {
            in_commands = true;
            continue;
        }
        if in_commands {
            if trimmed.is_empty() {
                break;
            }
            let name = trimmed.split_whitespace().next().unwrap_or("");
            if !name.is_empty() && name != "help" {
                commands.push(name.to_string());
            }
        }
    }
    commands.sort();
    commands
}

#[test]
fn help_command_surface_is_stable() {
    let dir = tempdir().expect("tempdir");
    let output = cekilis(dir.path()).arg("--help").output().expect("run help");
    assert!(output.status.success());
    let text = String::from_utf8(output.stdout).expect("utf8 help");
    assert_eq!(
        parse_commands_from_help(&text),
        vec!["artworks", "cart", "categories", "countdown", "schema", "tickets"]
    );
}

#[test]
fn unknown_flag_returns_usage_exit_code_with_machine_error() {
    let dir = tempdir().expect("tempdir");
    let output = cekilis(dir.path())
        .args(["--json", "--unknown-flag"])
        .output()
        .expect("run bad cli");
    assert_eq!(output.status.code(), Some(2));
    let stderr = String::from_utf8(output.stderr).expect("utf8 stderr");
    assert!(stderr.contains("usage_error"));
}

#[test]
fn countdown_counts_whole_days() {
    let dir = tempdir().expect("tempdir");
    let output = cekilis(dir.path())
        .args(["countdown", "14.04.24", "--now", "2024-04-12"])
        .output()
        .expect("run countdown");
    assert!(output.status.success());
    assert_eq!(String::from_utf8_lossy(&output.stdout).trim(), "2");

    let output = cekilis(dir.path())
        .args(["--json", "countdown", "garbage", "--now", "2024-04-12T10:00:00Z"])
        .output()
        .expect("run countdown");
    let payload = stdout_json(&output);
    assert_eq!(payload["days"], 0);
    assert_eq!(payload["parsed"], Value::Null);
}

#[test]
fn tickets_listing_filters_by_category() {
    let store = seeded_store();
    let output = cekilis(store.path())
        .arg("--json")
        .arg("--store-root")
        .arg(store.path())
        .args(["--category", "telefon", "--seed", "3", "tickets"])
        .output()
        .expect("run tickets");
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    let payload = stdout_json(&output);
    let mut ids: Vec<&str> = payload
        .as_array()
        .expect("array")
        .iter()
        .filter_map(|t| t["id"].as_str())
        .collect();
    ids.sort_unstable();
    assert_eq!(ids, vec!["t2", "t3"]);
}

#[test]
fn show_all_category_lists_every_ticket() {
    let store = seeded_store();
    let output = cekilis(store.path())
        .arg("--json")
        .arg("--store-root")
        .arg(store.path())
        .arg("tickets")
        .output()
        .expect("run tickets");
    let payload = stdout_json(&output);
    assert_eq!(payload.as_array().map(Vec::len), Some(3));
    let sedan = payload
        .as_array()
        .and_then(|items| items.iter().find(|t| t["id"] == "t1"))
        .expect("t1");
    assert_eq!(sedan["remaining_percent"], 75.0);
}

#[test]
fn categories_are_sorted_and_distinct() {
    let store = seeded_store();
    let output = cekilis(store.path())
        .arg("--json")
        .arg("--store-root")
        .arg(store.path())
        .arg("categories")
        .output()
        .expect("run categories");
    assert_eq!(stdout_json(&output), json!(["hoverboard", "tablet"]));
}

#[test]
fn cart_merges_repeats_and_applies_overwrites() {
    let store = seeded_store();
    let output = cekilis(store.path())
        .arg("--json")
        .arg("--store-root")
        .arg(store.path())
        .args(["cart", "t1:5", "t1:10", "t2", "--set", "t2:2"])
        .output()
        .expect("run cart");
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    let payload = stdout_json(&output);
    assert_eq!(payload["selections"].as_array().map(Vec::len), Some(2));
    assert_eq!(payload["selections"][0]["multiplier"], 15);
    assert_eq!(payload["ticket_count"], 17);
    let total: f64 = payload["total_price"]
        .as_str()
        .and_then(|t| t.parse().ok())
        .expect("total");
    assert!((total - 100.0).abs() < 1e-9);
}

#[test]
fn zero_multiplier_is_a_validation_error() {
    let store = seeded_store();
    let output = cekilis(store.path())
        .arg("--json")
        .arg("--store-root")
        .arg(store.path())
        .args(["cart", "t1:0"])
        .output()
        .expect("run cart");
    assert_eq!(output.status.code(), Some(3));
    let stderr = String::from_utf8(output.stderr).expect("utf8 stderr");
    assert!(stderr.contains("invalid_multiplier"));
}

#[test]
fn missing_collection_is_a_dependency_failure() {
    let dir = tempdir().expect("tempdir");
    let output = cekilis(dir.path())
        .arg("--json")
        .arg("--store-root")
        .arg(dir.path())
        .arg("artworks")
        .output()
        .expect("run artworks");
    assert_eq!(output.status.code(), Some(4));
    let stderr = String::from_utf8(output.stderr).expect("utf8 stderr");
    assert!(stderr.contains("fetch_failed"));
}

#[test]
fn config_file_sets_page_size() {
    let store = seeded_store();
    let config = store.path().join("cekilis.toml");
    fs::write(&config, "page_size = 1\n").expect("config");
    let output = cekilis(store.path())
        .arg("--json")
        .arg("--config")
        .arg(&config)
        .arg("--store-root")
        .arg(store.path())
        .arg("tickets")
        .output()
        .expect("run tickets");
    assert_eq!(stdout_json(&output).as_array().map(Vec::len), Some(1));
}

#[test]
fn schema_lists_ticket_defaults() {
    let dir = tempdir().expect("tempdir");
    let output = cekilis(dir.path())
        .args(["--json", "schema", "tickets"])
        .output()
        .expect("run schema");
    let payload = stdout_json(&output);
    assert_eq!(payload["isAvailable"], true);
    assert_eq!(payload["prizeCount"], 2);
    assert_eq!(payload["ticketPrice"], "5.0");
    assert_eq!(payload["totalTicket"], 10);
}
