// Copyright 2025 Vivian Voss. Licensed under the Apache License, Version 2.0.
// SPDX-License-Identifier: Apache-2.0

//! End-to-end store scenarios: catalog operations, error taxonomy and
//! snapshot round-trips against a real temporary directory.

use fernbase::{FernError, Key, Store, StoreConfig};
use serde_json::json;

fn config(dir: &std::path::Path) -> StoreConfig {
    StoreConfig {
        root_dir: dir.to_path_buf(),
        order: 3,
    }
}

/// Deterministic Fisher-Yates shuffle (xorshift64), no rand crate.
fn shuffled(n: i64, seed: u64) -> Vec<i64> {
    let mut keys: Vec<i64> = (0..n).collect();
    let mut state = seed | 1;
    for i in (1..keys.len()).rev() {
        state ^= state << 13;
        state ^= state >> 7;
        state ^= state << 17;
        let j = (state % (i as u64 + 1)) as usize;
        keys.swap(i, j);
    }
    keys
}

fn numeric_keys(store: &Store, table: &str) -> Vec<i64> {
    store
        .scan(table)
        .unwrap()
        .map(|(key, _)| match key {
            Key::Number(n) => *n as i64,
            Key::Text(_) => panic!("numeric keys expected"),
        })
        .collect()
}

#[test]
fn insert_update_read_cycle() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = Store::open("appdb", &config(dir.path())).unwrap();
    store.create_table("users").unwrap();

    store.insert("users", &json!("k1"), json!({"a": 1})).unwrap();
    store
        .update("users", &json!("k1"), json!({"a": 2, "b": 3}))
        .unwrap();

    let record = store.read("users", &json!("k1")).unwrap();
    assert_eq!(record["a"], json!(2));
    assert_eq!(record["b"], json!(3));

    let err = store
        .insert("users", &json!("k1"), json!({"a": 9}))
        .unwrap_err();
    assert!(matches!(err, FernError::DuplicateKey { .. }));
    assert_eq!(store.read("users", &json!("k1")).unwrap()["a"], json!(2));
}

#[test]
fn error_taxonomy_for_missing_targets() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = Store::open("appdb", &config(dir.path())).unwrap();
    store.create_table("users").unwrap();
    store.insert("users", &json!(1), json!({"v": 1})).unwrap();

    let err = store.read("ghosts", &json!(1)).unwrap_err();
    assert!(matches!(err, FernError::TableNotFound { .. }));

    let err = store.update("users", &json!(99), json!({"v": 2})).unwrap_err();
    assert!(matches!(err, FernError::KeyNotFound { .. }));

    let err = store.delete("users", &json!(99)).unwrap_err();
    assert!(matches!(err, FernError::KeyNotFound { .. }));

    // Failed operations leave the table untouched
    assert_eq!(numeric_keys(&store, "users"), vec![1]);
}

#[test]
fn hundred_records_survive_reopen() {
    let dir = tempfile::tempdir().unwrap();

    {
        let mut store = Store::open("appdb", &config(dir.path())).unwrap();
        store.create_table("users").unwrap();
        for &k in &shuffled(100, 41) {
            store
                .insert("users", &json!(k), json!({"id": k, "name": format!("user{}", k)}))
                .unwrap();
        }
        store.save().unwrap();
    }

    let store = Store::open("appdb", &config(dir.path())).unwrap();
    assert_eq!(store.table_len("users"), 100);
    assert_eq!(numeric_keys(&store, "users"), (0..100).collect::<Vec<_>>());
    for k in 0..100 {
        let record = store.read("users", &json!(k)).unwrap();
        assert_eq!(record["name"], json!(format!("user{}", k)));
    }
}

#[test]
fn scan_matches_before_and_after_reopen() {
    let dir = tempfile::tempdir().unwrap();

    let before: Vec<(Key, fernbase::Record)>;
    {
        let mut store = Store::open("appdb", &config(dir.path())).unwrap();
        store.create_table("events").unwrap();
        for &k in &shuffled(64, 7) {
            store
                .insert("events", &json!(k), json!({"payload": [k, k * 2]}))
                .unwrap();
        }
        before = store
            .scan("events")
            .unwrap()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();
        store.save().unwrap();
    }

    let store = Store::open("appdb", &config(dir.path())).unwrap();
    let after: Vec<(Key, fernbase::Record)> = store
        .scan("events")
        .unwrap()
        .map(|(k, v)| (k.clone(), v.clone()))
        .collect();
    assert_eq!(before, after);
}

#[test]
fn multiple_tables_persist_independently() {
    let dir = tempfile::tempdir().unwrap();

    {
        let mut store = Store::open("appdb", &config(dir.path())).unwrap();
        store.create_table("users").unwrap();
        store.create_table("events").unwrap();
        store.create_table("empty").unwrap();
        store.insert("users", &json!("ada"), json!({"role": "admin"})).unwrap();
        for k in 0..10 {
            store.insert("events", &json!(k), json!({"seq": k})).unwrap();
        }
        store.save().unwrap();
    }

    let store = Store::open("appdb", &config(dir.path())).unwrap();
    assert_eq!(store.tables(), vec!["empty", "events", "users"]);
    assert_eq!(store.table_len("users"), 1);
    assert_eq!(store.table_len("events"), 10);
    assert_eq!(store.table_len("empty"), 0);
    assert_eq!(
        store.read("users", &json!("ada")).unwrap()["role"],
        json!("admin")
    );
}

#[test]
fn mutations_after_reopen_keep_order() {
    let dir = tempfile::tempdir().unwrap();

    {
        let mut store = Store::open("appdb", &config(dir.path())).unwrap();
        store.create_table("nums").unwrap();
        for &k in &shuffled(40, 11) {
            store.insert("nums", &json!(k), json!({"v": k})).unwrap();
        }
        store.save().unwrap();
    }

    let mut store = Store::open("appdb", &config(dir.path())).unwrap();
    for k in (0..40).step_by(2) {
        store.delete("nums", &json!(k)).unwrap();
    }
    for k in 40..50 {
        store.insert("nums", &json!(k), json!({"v": k})).unwrap();
    }

    let expected: Vec<i64> = (1..40).step_by(2).chain(40..50).collect();
    assert_eq!(numeric_keys(&store, "nums"), expected);
}

#[test]
fn unsaved_changes_do_not_reach_disk() {
    let dir = tempfile::tempdir().unwrap();

    {
        let mut store = Store::open("appdb", &config(dir.path())).unwrap();
        store.create_table("users").unwrap();
        store.insert("users", &json!(1), json!({"v": 1})).unwrap();
        store.save().unwrap();
        store.insert("users", &json!(2), json!({"v": 2})).unwrap();
        // No save: the second record must not survive
    }

    let store = Store::open("appdb", &config(dir.path())).unwrap();
    assert_eq!(numeric_keys(&store, "users"), vec![1]);
}

#[test]
fn key_kind_mismatch_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = Store::open("appdb", &config(dir.path())).unwrap();
    store.create_table("users").unwrap();
    store.insert("users", &json!("alice"), json!({"v": 1})).unwrap();

    let err = store.insert("users", &json!(2), json!({"v": 2})).unwrap_err();
    assert!(matches!(err, FernError::KeyKindMismatch { .. }));

    // The kind survives a snapshot round-trip
    store.save().unwrap();
    drop(store);
    let mut store = Store::open("appdb", &config(dir.path())).unwrap();
    let err = store.insert("users", &json!(2), json!({"v": 2})).unwrap_err();
    assert!(matches!(err, FernError::KeyKindMismatch { .. }));
}

#[test]
fn corrupt_snapshot_aborts_open() {
    let dir = tempfile::tempdir().unwrap();

    {
        let mut store = Store::open("appdb", &config(dir.path())).unwrap();
        store.create_table("users").unwrap();
        store.create_table("events").unwrap();
        store.insert("users", &json!(1), json!({"v": 1})).unwrap();
        store.save().unwrap();
    }

    // Flip one body byte in one table file; the checksum must catch it
    let path = dir.path().join("appdb_data").join("users.db");
    let mut bytes = std::fs::read(&path).unwrap();
    let last = bytes.len() - 1;
    bytes[last] ^= 0xFF;
    std::fs::write(&path, &bytes).unwrap();

    let err = Store::open("appdb", &config(dir.path())).unwrap_err();
    assert!(matches!(err, FernError::SnapshotCorrupted { .. }));
}

#[test]
fn nested_payloads_round_trip_exactly() {
    let dir = tempfile::tempdir().unwrap();
    let payload = json!({
        "profile": {"name": "ada", "langs": ["rust", "ml"]},
        "scores": [1, 2.5, -3],
        "active": true,
        "note": null
    });

    {
        let mut store = Store::open("appdb", &config(dir.path())).unwrap();
        store.create_table("users").unwrap();
        store.insert("users", &json!("ada"), payload.clone()).unwrap();
        store.save().unwrap();
    }

    let store = Store::open("appdb", &config(dir.path())).unwrap();
    let record = store.read("users", &json!("ada")).unwrap();
    assert_eq!(serde_json::Value::Object(record.clone()), payload);
}
