//! REST scenarios over the single-file JSON store.

#![cfg(feature = "json-file")]

mod common;

use easy_emr_persistence::backends::json_file::JsonFileStore;
use easy_emr_persistence::models::Role;
use easy_emr_rest::ServerConfig;
use serde_json::Value;
use tempfile::TempDir;

use common::*;

fn open(dir: &TempDir) -> RestTestHarness<JsonFileStore> {
    let store = JsonFileStore::open(dir.path().join("db.json")).unwrap();
    RestTestHarness::with_store(store, ServerConfig::for_testing())
}

#[tokio::test]
async fn test_records_survive_restart() {
    let dir = TempDir::new().unwrap();

    {
        let harness = open(&dir);
        harness
            .server
            .post("/Patient")
            .json(&john_doe())
            .await
            .assert_status_ok();
        harness
            .signup("doc", "pw", "physician")
            .await
            .assert_status_ok();
    }

    let harness = open(&dir);
    let patient = harness.server.get("/Patient/p1").await.json::<Value>();
    assert_eq!(patient["dob"], "1990-01-01");
    harness.login("doc", "pw").await.assert_status_ok();

    // Two requests before the restart, two after (the read and the login).
    let audit = harness.audit("?limit=100").await;
    assert_eq!(audit["total"], 4);
}

#[tokio::test]
async fn test_data_file_uses_tinydb_layout() {
    let dir = TempDir::new().unwrap();
    let harness = open(&dir);
    harness.seed_user("alice", Role::Admin).await;
    harness
        .server
        .post("/Patient")
        .json(&john_doe())
        .await
        .assert_status_ok();

    let raw = std::fs::read_to_string(dir.path().join("db.json")).unwrap();
    let file: Value = serde_json::from_str(&raw).unwrap();

    assert_eq!(file["patients"]["1"]["first_name"], "John");
    assert_eq!(file["users"]["1"]["username"], "alice");
    assert_eq!(file["audit"]["1"]["method"], "POST");
    assert_eq!(file["audit"]["1"]["path"], "/Patient");
}
