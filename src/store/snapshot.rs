// Copyright 2025 Vivian Voss. Licensed under the Apache License, Version 2.0.
// SPDX-License-Identifier: Apache-2.0

//! Snapshot persistence for the table catalog.
//!
//! One file per table, `<table>.db`, inside the store's data directory.
//! The format is explicit and versioned - an opaque native-object pickle
//! is rejected by design, both for portability and because loading one
//! executes attacker-controlled structure.
//!
//! ## File Format
//!
//! ```text
//! magic    u32 LE   0xFB7EE001
//! version  u16 LE   1
//! crc32    u32 LE   checksum of the body bytes
//! body              bincode-encoded TreeSnapshot
//! ```
//!
//! The body carries the order, key kind, record count, root index and a
//! pre-order node stream. Record values are embedded as raw JSON bytes:
//! bincode cannot round-trip `serde_json::Value`, and JSON keeps the
//! value encoding self-describing. Leaf sibling links are never written;
//! the loader reconstructs them from the in-order leaf walk.
//!
//! ## Atomicity
//!
//! Each table file is written to a `.tmp` sibling and renamed over the
//! target, so a torn write never replaces a good snapshot. A `.lock`
//! file taken exclusively (fs2) covers the whole save or load against
//! concurrent store instances.

use crate::btree::node::{InternalNode, LeafNode, Node};
use crate::btree::tree::BPlusTree;
use crate::btree::types::{NodeId, Order, SNAPSHOT_MAGIC, SNAPSHOT_VERSION};
use crate::error::{FernError, FernResult};
use crate::key::{Key, KeyKind};
use crate::record::Record;
use fs2::FileExt;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs::{self, File};
use std::path::Path;

/// Header length in bytes: magic + version + crc32.
const HEADER_LEN: usize = 10;

/// Serialised node: the tagged variant minus the sibling link.
#[derive(Debug, Serialize, Deserialize)]
enum NodeSnapshot {
    Internal {
        keys: Vec<Key>,
        children: Vec<NodeId>,
    },
    Leaf {
        keys: Vec<Key>,
        values: Vec<Vec<u8>>,
    },
}

/// Serialised tree: everything needed to rebuild structure and records.
#[derive(Debug, Serialize, Deserialize)]
struct TreeSnapshot {
    order: u16,
    key_kind: Option<KeyKind>,
    record_count: u64,
    root: NodeId,
    nodes: Vec<NodeSnapshot>,
}

/// Writes every table of a catalog to the snapshot directory.
///
/// Creates the directory if missing, locks it, then writes each table
/// atomically (temp file + rename). Tables are written in name order so
/// repeated saves touch files deterministically.
///
/// ## Error Conditions
/// - `IoError`: Directory creation, locking, write or rename failed
pub fn save_dir(dir: &Path, tables: &HashMap<String, BPlusTree>) -> FernResult<()> {
    fs::create_dir_all(dir).map_err(|e| FernError::IoError {
        operation: "create_snapshot_dir".to_string(),
        reason: e.to_string(),
    })?;

    let _lock = DirLock::acquire(dir)?;

    let mut names: Vec<&String> = tables.keys().collect();
    names.sort();

    for name in names {
        let tree = &tables[name];
        let bytes = encode_tree(tree)?;

        let target = dir.join(format!("{}.db", name));
        let staged = dir.join(format!("{}.db.tmp", name));
        fs::write(&staged, &bytes).map_err(|e| FernError::IoError {
            operation: format!("write_snapshot '{}'", name),
            reason: e.to_string(),
        })?;
        fs::rename(&staged, &target).map_err(|e| FernError::IoError {
            operation: format!("commit_snapshot '{}'", name),
            reason: e.to_string(),
        })?;
    }

    Ok(())
}

/// Loads every `.db` file of a snapshot directory into a catalog.
///
/// A missing directory yields an empty catalog. Any malformed file
/// aborts the whole load - the caller never sees a partially populated
/// catalog.
///
/// ## Error Conditions
/// - `IoError`: Directory enumeration or file read failed
/// - `SnapshotCorrupted`: Bad magic, version, checksum or structure
pub fn load_dir(dir: &Path) -> FernResult<HashMap<String, BPlusTree>> {
    if !dir.exists() {
        return Ok(HashMap::new());
    }

    let _lock = DirLock::acquire(dir)?;

    let entries = fs::read_dir(dir).map_err(|e| FernError::IoError {
        operation: "read_snapshot_dir".to_string(),
        reason: e.to_string(),
    })?;

    let mut tables = HashMap::new();
    for entry in entries {
        let entry = entry.map_err(|e| FernError::IoError {
            operation: "read_snapshot_dir".to_string(),
            reason: e.to_string(),
        })?;
        let path = entry.path();
        if path.extension().and_then(|ext| ext.to_str()) != Some("db") {
            continue;
        }

        let name = path
            .file_stem()
            .and_then(|stem| stem.to_str())
            .ok_or_else(|| FernError::SnapshotCorrupted {
                file: path.display().to_string(),
                reason: "file stem is not valid UTF-8".to_string(),
            })?
            .to_string();

        let bytes = fs::read(&path).map_err(|e| FernError::IoError {
            operation: format!("read_snapshot '{}'", name),
            reason: e.to_string(),
        })?;
        let tree = decode_tree(&bytes).map_err(|reason| FernError::SnapshotCorrupted {
            file: path.display().to_string(),
            reason,
        })?;
        tables.insert(name, tree);
    }

    Ok(tables)
}

/// Encodes one tree as a complete snapshot file image.
pub(crate) fn encode_tree(tree: &BPlusTree) -> FernResult<Vec<u8>> {
    let mut nodes = Vec::new();
    let root = collect_nodes(tree, tree.root_id(), &mut nodes)?;

    let snapshot = TreeSnapshot {
        order: tree.order().value(),
        key_kind: tree.key_kind(),
        record_count: tree.len() as u64,
        root,
        nodes,
    };

    let body = bincode::serialize(&snapshot).map_err(|e| FernError::IoError {
        operation: "encode_snapshot".to_string(),
        reason: e.to_string(),
    })?;

    let mut bytes = Vec::with_capacity(HEADER_LEN + body.len());
    bytes.extend_from_slice(&SNAPSHOT_MAGIC.to_le_bytes());
    bytes.extend_from_slice(&SNAPSHOT_VERSION.to_le_bytes());
    bytes.extend_from_slice(&crc32fast::hash(&body).to_le_bytes());
    bytes.extend_from_slice(&body);
    Ok(bytes)
}

/// Decodes a snapshot file image back into a validated tree.
///
/// Returns the failure reason; the caller attaches the file name.
pub(crate) fn decode_tree(bytes: &[u8]) -> Result<BPlusTree, String> {
    if bytes.len() < HEADER_LEN {
        return Err(format!("truncated header ({} bytes)", bytes.len()));
    }

    let magic = u32::from_le_bytes(bytes[0..4].try_into().expect("sliced four bytes"));
    if magic != SNAPSHOT_MAGIC {
        return Err(format!("bad magic 0x{:08X}", magic));
    }

    let version = u16::from_le_bytes(bytes[4..6].try_into().expect("sliced two bytes"));
    if version != SNAPSHOT_VERSION {
        return Err(format!(
            "unsupported format version {} (expected {})",
            version, SNAPSHOT_VERSION
        ));
    }

    let stored_crc = u32::from_le_bytes(bytes[6..10].try_into().expect("sliced four bytes"));
    let body = &bytes[HEADER_LEN..];
    let actual_crc = crc32fast::hash(body);
    if stored_crc != actual_crc {
        return Err(format!(
            "checksum mismatch (stored 0x{:08X}, computed 0x{:08X})",
            stored_crc, actual_crc
        ));
    }

    let snapshot: TreeSnapshot =
        bincode::deserialize(body).map_err(|e| format!("undecodable body: {}", e))?;

    let order = Order::new(snapshot.order).map_err(|e| e.to_string())?;

    let mut nodes = Vec::with_capacity(snapshot.nodes.len());
    for decoded in snapshot.nodes {
        nodes.push(match decoded {
            NodeSnapshot::Internal { keys, children } => {
                Node::Internal(InternalNode::new(keys, children))
            }
            NodeSnapshot::Leaf { keys, values } => {
                let mut records = Vec::with_capacity(values.len());
                for raw in values {
                    let record: Record = serde_json::from_slice(&raw)
                        .map_err(|e| format!("undecodable record value: {}", e))?;
                    records.push(record);
                }
                Node::Leaf(LeafNode {
                    keys,
                    values: records,
                    next: None,
                })
            }
        });
    }

    let tree = BPlusTree::from_parts(order, snapshot.key_kind, snapshot.root, nodes)
        .map_err(|e| e.to_string())?;

    if tree.len() as u64 != snapshot.record_count {
        return Err(format!(
            "record count mismatch (header {}, stream {})",
            snapshot.record_count,
            tree.len()
        ));
    }

    Ok(tree)
}

/// Pre-order node collection with arena indices remapped to stream order.
fn collect_nodes(
    tree: &BPlusTree,
    id: NodeId,
    out: &mut Vec<NodeSnapshot>,
) -> FernResult<NodeId> {
    let slot = out.len() as NodeId;
    match tree.node(id) {
        Node::Leaf(leaf) => {
            let mut values = Vec::with_capacity(leaf.values.len());
            for record in &leaf.values {
                let raw = serde_json::to_vec(record).map_err(|e| FernError::IoError {
                    operation: "encode_record".to_string(),
                    reason: e.to_string(),
                })?;
                values.push(raw);
            }
            out.push(NodeSnapshot::Leaf {
                keys: leaf.keys.clone(),
                values,
            });
        }
        Node::Internal(internal) => {
            out.push(NodeSnapshot::Internal {
                keys: internal.keys.clone(),
                children: Vec::new(),
            });
            let mut mapped = Vec::with_capacity(internal.children.len());
            for &child in &internal.children {
                mapped.push(collect_nodes(tree, child, out)?);
            }
            match &mut out[slot as usize] {
                NodeSnapshot::Internal { children, .. } => *children = mapped,
                NodeSnapshot::Leaf { .. } => unreachable!("slot was pushed as internal"),
            }
        }
    }
    Ok(slot)
}

/// Exclusive lock on a snapshot directory, held for one save or load.
struct DirLock {
    file: File,
}

impl DirLock {
    fn acquire(dir: &Path) -> FernResult<Self> {
        let path = dir.join(".lock");
        let file = File::create(&path).map_err(|e| FernError::IoError {
            operation: "create_lock_file".to_string(),
            reason: e.to_string(),
        })?;
        file.lock_exclusive().map_err(|e| FernError::IoError {
            operation: "lock_snapshot_dir".to_string(),
            reason: e.to_string(),
        })?;
        Ok(Self { file })
    }
}

impl Drop for DirLock {
    fn drop(&mut self) {
        // Dropping the handle releases the lock; ignore unlock errors
        let _ = self.file.unlock();
    }
}
