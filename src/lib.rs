// Copyright 2025 Vivian Voss. Licensed under the Apache License, Version 2.0.
// SPDX-License-Identifier: Apache-2.0

//! FernBase - embedded multi-table key/value store.
//!
//! A lightweight storage engine: one in-memory B+-Tree per named table,
//! with point lookup, ordered traversal, insert/update/delete and
//! explicit snapshot persistence to a directory of per-table files.
//!
//! ## Features
//!
//! - **B+-Tree Indexing**: All records in linked leaves, O(log n)
//!   operations, lazy ordered scans without re-descent
//! - **Multi-Table Catalog**: Named tables with validated names and
//!   per-key uniqueness on insert
//! - **Versioned Snapshots**: Explicit save/load with magic bytes,
//!   format version, CRC32 checksum and atomic file replacement
//! - **JSON Payloads**: Opaque structured records; scalar keys with a
//!   total order, one key kind per table
//! - **Metrics & Observability**: Built-in per-operation duration
//!   recording
//!
//! ## Quick Start
//!
//! ```no_run
//! use fernbase::{Store, StoreConfig};
//! use serde_json::json;
//!
//! let mut store = Store::open("mydb", &StoreConfig::default())?;
//! store.create_table("users")?;
//! store.insert("users", &json!(1), json!({"name": "alice"}))?;
//!
//! let record = store.read("users", &json!(1))?;
//! assert_eq!(record["name"], json!("alice"));
//!
//! for (key, record) in store.scan("users")? {
//!     println!("{}: {:?}", key, record);
//! }
//!
//! store.save()?;
//! # Ok::<(), fernbase::FernError>(())
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────┐
//! │              Application / HTTP layer           │  (external)
//! └───────────────────────┬─────────────────────────┘
//!                         │
//!                         ▼
//!               ┌───────────────────┐
//!               │       Store       │  catalog + facade
//!               └─────────┬─────────┘
//!                         │ one per table
//!                         ▼
//!               ┌───────────────────┐
//!               │     BPlusTree     │  arena of Node, NodeId links
//!               └─────────┬─────────┘
//!                         │ save() / open()
//!                         ▼
//!          mydb_data/users.db, mydb_data/events.db
//! ```
//!
//! ## Concurrency
//!
//! The core is single-threaded and cooperative. Callers that need
//! parallel access wrap the store in a reader-writer lock: scans and
//! reads may run together, any mutation or save excludes everything
//! else. Snapshot-only persistence is not crash-safe; save is always an
//! explicit call.

pub mod btree;
pub mod config;
pub mod error;
pub mod key;
pub mod metrics;
pub mod record;
pub mod store;

// Re-export commonly used types
pub use btree::{BPlusTree, Order, Scan};
pub use config::StoreConfig;
pub use error::{FernError, FernResult};
pub use key::{Key, KeyKind};
pub use metrics::{Metric, MetricUnit, MetricsCollector};
pub use record::Record;
pub use store::Store;
