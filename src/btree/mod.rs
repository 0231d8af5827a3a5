// Copyright 2025 Vivian Voss. Licensed under the Apache License, Version 2.0.
// SPDX-License-Identifier: Apache-2.0

//! In-memory B+-Tree index backend.
//!
//! One tree indexes one table. Records live in leaves; internal nodes
//! hold routing copies of keys; leaves chain in key order for scans.
//!
//! - **types**: Node identifiers, tree order, snapshot format constants
//! - **node**: Tagged internal/leaf node variants
//! - **tree**: The tree itself - insert, search, update, delete, scan

pub mod node;
pub mod tree;
pub mod types;

// Re-export commonly used types
pub use tree::{BPlusTree, Scan};
pub use types::{NodeId, Order, SNAPSHOT_MAGIC, SNAPSHOT_VERSION};
