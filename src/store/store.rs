// Copyright 2025 Vivian Voss. Licensed under the Apache License, Version 2.0.
// SPDX-License-Identifier: Apache-2.0

//! Table catalog and service facade.
//!
//! A [`Store`] owns one B+-Tree per named table and exposes the entire
//! public operation set: `create_table`, `insert`, `update`, `read`,
//! `delete`, `scan` and `save`. Keys and values arrive as JSON; shape
//! checks (structured-map values, scalar keys, unmixed key kinds) run
//! here, never inside the tree.
//!
//! ## Persistence
//!
//! Opening a store loads the snapshot directory `<name>_data` when it
//! exists; a malformed file aborts the open, so an in-memory catalog is
//! only ever fully loaded or empty. Saving is explicit - no mutation
//! writes to disk on its own.
//!
//! ## Thread Safety
//!
//! Single-threaded by design. Callers that need parallelism wrap the
//! store in an external `RwLock`: scans and reads may share, any of
//! insert/update/delete/save excludes everything else.

use crate::btree::{BPlusTree, Order, Scan};
use crate::config::StoreConfig;
use crate::error::{FernError, FernResult};
use crate::key::Key;
use crate::metrics::{Metric, MetricUnit, MetricsCollector};
use crate::record::{record_from_json, Record};
use crate::store::snapshot;
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashMap;
use std::path::PathBuf;
use std::time::Instant;

/// Table and store names become file and directory stems, so they are
/// restricted to lowercase ASCII, digits and underscores.
static NAME_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-z][a-z0-9_]{0,63}$").expect("name pattern compiles"));

/// Multi-table store: a catalog of B+-Trees with snapshot persistence.
#[derive(Debug)]
pub struct Store {
    name: String,
    data_dir: PathBuf,
    order: Order,
    tables: HashMap<String, BPlusTree>,
}

impl Store {
    /// Opens a store, loading its snapshot directory when present.
    ///
    /// ## Input
    /// - `name`: Store name; the data directory becomes `<name>_data`
    ///   under the configured root
    /// - `config`: Root directory and tree order
    ///
    /// ## Output
    /// - `Ok(Store)`: Catalog fully loaded (or empty for a new store)
    /// - `Err(FernError)`: Invalid name or order, unreadable directory,
    ///   or a malformed snapshot file (the load aborts; no partially
    ///   populated store escapes)
    ///
    /// ## Example Usage
    /// ```no_run
    /// use fernbase::{Store, StoreConfig};
    ///
    /// let store = Store::open("mydb", &StoreConfig::default())?;
    /// # Ok::<(), fernbase::FernError>(())
    /// ```
    pub fn open(name: &str, config: &StoreConfig) -> FernResult<Self> {
        validate_name(name)?;
        let order = Order::new(config.order)?;
        let data_dir = config.root_dir.join(format!("{}_data", name));
        let tables = snapshot::load_dir(&data_dir)?;
        Ok(Self {
            name: name.to_string(),
            data_dir,
            order,
            tables,
        })
    }

    /// Store name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Snapshot directory for this store.
    pub fn data_dir(&self) -> &PathBuf {
        &self.data_dir
    }

    /// Sorted table names.
    pub fn tables(&self) -> Vec<String> {
        let mut names: Vec<String> = self.tables.keys().cloned().collect();
        names.sort();
        names
    }

    /// True when the catalog holds a table of that name.
    pub fn contains_table(&self, name: &str) -> bool {
        self.tables.contains_key(name)
    }

    /// Creates an empty table.
    ///
    /// ## Output
    /// - `Ok(())`: Table registered with an empty tree
    /// - `Err(InvalidTableName)`: Name failed validation
    /// - `Err(TableAlreadyExists)`: Name already in the catalog
    pub fn create_table(&mut self, name: &str) -> FernResult<()> {
        let start = Instant::now();
        validate_name(name)?;
        if self.tables.contains_key(name) {
            return Err(FernError::TableAlreadyExists {
                name: name.to_string(),
            });
        }
        self.tables.insert(name.to_string(), BPlusTree::new(self.order));
        observe("create_table", name, start);
        Ok(())
    }

    /// Inserts a new record.
    ///
    /// The tree is searched first; insertion only proceeds when the key
    /// is absent, so an existing record is never silently replaced.
    ///
    /// ## Input
    /// - `table`: Target table name
    /// - `key`: JSON scalar key (string or finite number)
    /// - `data`: JSON object payload
    ///
    /// ## Output
    /// - `Err(TableNotFound | InvalidKey | KeyKindMismatch |
    ///   InvalidValue | DuplicateKey)` per the failed check
    ///
    /// ## Example Usage
    /// ```no_run
    /// use fernbase::{Store, StoreConfig};
    /// use serde_json::json;
    ///
    /// let mut store = Store::open("mydb", &StoreConfig::default())?;
    /// store.create_table("users")?;
    /// store.insert("users", &json!(1), json!({"name": "alice"}))?;
    /// # Ok::<(), fernbase::FernError>(())
    /// ```
    pub fn insert(
        &mut self,
        table: &str,
        key: &serde_json::Value,
        data: serde_json::Value,
    ) -> FernResult<()> {
        let start = Instant::now();
        let key = self.parse_key(table, key)?;
        let record = record_from_json(data)?;

        let tree = self
            .tables
            .get_mut(table)
            .ok_or_else(|| FernError::TableNotFound {
                name: table.to_string(),
            })?;
        if tree.search(&key).is_some() {
            return Err(FernError::DuplicateKey {
                table: table.to_string(),
                key: key.to_string(),
            });
        }
        tree.insert(key, record);
        observe("insert", table, start);
        Ok(())
    }

    /// Overwrites an existing record.
    ///
    /// ## Output
    /// - `Err(TableNotFound | InvalidKey | KeyKindMismatch |
    ///   InvalidValue | KeyNotFound)` per the failed check
    pub fn update(
        &mut self,
        table: &str,
        key: &serde_json::Value,
        data: serde_json::Value,
    ) -> FernResult<()> {
        let start = Instant::now();
        let key = self.parse_key(table, key)?;
        let record = record_from_json(data)?;

        let tree = self
            .tables
            .get_mut(table)
            .ok_or_else(|| FernError::TableNotFound {
                name: table.to_string(),
            })?;
        if !tree.update(&key, record) {
            return Err(FernError::KeyNotFound {
                table: table.to_string(),
                key: key.to_string(),
            });
        }
        observe("update", table, start);
        Ok(())
    }

    /// Reads one record.
    ///
    /// ## Output
    /// - `Ok(&Record)`: Borrowed payload
    /// - `Err(TableNotFound | InvalidKey | KeyKindMismatch |
    ///   KeyNotFound)` per the failed check
    pub fn read(&self, table: &str, key: &serde_json::Value) -> FernResult<&Record> {
        let start = Instant::now();
        let key = self.parse_key(table, key)?;

        let tree = self.table(table)?;
        let record = tree.search(&key).ok_or_else(|| FernError::KeyNotFound {
            table: table.to_string(),
            key: key.to_string(),
        })?;
        observe("read", table, start);
        Ok(record)
    }

    /// Deletes one record.
    ///
    /// The tree is searched first so that a missing key reports
    /// `KeyNotFound` without touching the structure.
    pub fn delete(&mut self, table: &str, key: &serde_json::Value) -> FernResult<()> {
        let start = Instant::now();
        let key = self.parse_key(table, key)?;

        let tree = self
            .tables
            .get_mut(table)
            .ok_or_else(|| FernError::TableNotFound {
                name: table.to_string(),
            })?;
        if tree.search(&key).is_none() {
            return Err(FernError::KeyNotFound {
                table: table.to_string(),
                key: key.to_string(),
            });
        }
        tree.delete(&key);
        observe("delete", table, start);
        Ok(())
    }

    /// Ordered iteration over every record of a table.
    ///
    /// The iterator is lazy and single-pass; call `scan` again to
    /// restart. It borrows the store, so mutations wait until it drops.
    pub fn scan(&self, table: &str) -> FernResult<Scan<'_>> {
        let start = Instant::now();
        let tree = self.table(table)?;
        let scan = tree.scan();
        observe("scan", table, start);
        Ok(scan)
    }

    /// Writes every table to the snapshot directory.
    ///
    /// Explicit by design: snapshot-only persistence is not crash-safe,
    /// so the caller chooses when to pay for durability. On failure the
    /// snapshot must be treated as potentially stale; no partial success
    /// is reported.
    pub fn save(&self) -> FernResult<()> {
        let start = Instant::now();
        snapshot::save_dir(&self.data_dir, &self.tables)?;
        observe("save", &self.name, start);
        Ok(())
    }

    /// Record count of one table (0 for a missing table).
    pub fn table_len(&self, table: &str) -> usize {
        self.tables.get(table).map_or(0, BPlusTree::len)
    }

    fn table(&self, name: &str) -> FernResult<&BPlusTree> {
        self.tables.get(name).ok_or_else(|| FernError::TableNotFound {
            name: name.to_string(),
        })
    }

    /// Parses a JSON key and enforces the table's fixed key kind.
    fn parse_key(&self, table: &str, key: &serde_json::Value) -> FernResult<Key> {
        let key = Key::from_json(key)?;
        if let Some(tree) = self.tables.get(table) {
            if let Some(kind) = tree.key_kind() {
                if kind != key.kind() {
                    return Err(FernError::KeyKindMismatch {
                        table: table.to_string(),
                        expected: kind,
                        found: key.kind(),
                    });
                }
            }
        }
        Ok(key)
    }
}

/// Records one facade operation duration in the global collector.
fn observe(operation: &str, table: &str, start: Instant) {
    let metric = Metric::new(
        "store_operation",
        start.elapsed().as_micros() as f64,
        MetricUnit::Microseconds,
    )
    .with_tag("operation", operation)
    .with_tag("table", table);
    MetricsCollector::global().record(metric);
}

/// Validates a store or table name against [`NAME_PATTERN`].
fn validate_name(name: &str) -> FernResult<()> {
    if NAME_PATTERN.is_match(name) {
        Ok(())
    } else {
        Err(FernError::InvalidTableName {
            name: name.to_string(),
            reason: "names are 1-64 chars of [a-z0-9_], starting with a letter".to_string(),
        })
    }
}
