// Copyright 2025 Vivian Voss. Licensed under the Apache License, Version 2.0.
// SPDX-License-Identifier: Apache-2.0

//! Error types for FernBase operations.
//!
//! Provides structured error handling with detailed context for debugging.

use crate::key::KeyKind;
use std::fmt;

/// Standard Result type for all FernBase operations.
pub type FernResult<T> = Result<T, FernError>;

/// Error types for FernBase operations.
#[derive(Debug, Clone)]
pub enum FernError {
    /// Table not found in the catalog.
    TableNotFound { name: String },

    /// Table creation collided with an existing name.
    TableAlreadyExists { name: String },

    /// Read/update/delete targeted an absent key.
    KeyNotFound { table: String, key: String },

    /// Insert targeted an already-present key.
    DuplicateKey { table: String, key: String },

    /// Value payload failed the structured-map shape check.
    InvalidValue { reason: String },

    /// Record key is not a usable JSON scalar.
    InvalidKey { reason: String },

    /// Key kind does not match the kind fixed by the table's first insert.
    KeyKindMismatch {
        table: String,
        expected: KeyKind,
        found: KeyKind,
    },

    /// Table name failed validation (names become snapshot file stems).
    InvalidTableName { name: String, reason: String },

    /// I/O error during file operations.
    IoError { operation: String, reason: String },

    /// Snapshot file corrupted (bad magic, version, checksum or structure).
    SnapshotCorrupted { file: String, reason: String },

    /// Parse error (invalid order, config or format field).
    ParseError { reason: String },
}

impl fmt::Display for FernError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TableNotFound { name } => {
                write!(f, "Table '{}' not found", name)
            }
            Self::TableAlreadyExists { name } => {
                write!(f, "Table '{}' already exists", name)
            }
            Self::KeyNotFound { table, key } => {
                write!(f, "Key '{}' not found in table '{}'", key, table)
            }
            Self::DuplicateKey { table, key } => {
                write!(f, "Key '{}' already exists in table '{}'", key, table)
            }
            Self::InvalidValue { reason } => {
                write!(f, "Invalid value: {}", reason)
            }
            Self::InvalidKey { reason } => {
                write!(f, "Invalid key: {}", reason)
            }
            Self::KeyKindMismatch {
                table,
                expected,
                found,
            } => {
                write!(
                    f,
                    "Table '{}' holds {} keys, got a {} key",
                    table, expected, found
                )
            }
            Self::InvalidTableName { name, reason } => {
                write!(f, "Invalid table name '{}': {}", name, reason)
            }
            Self::IoError { operation, reason } => {
                write!(f, "I/O error during '{}': {}", operation, reason)
            }
            Self::SnapshotCorrupted { file, reason } => {
                write!(f, "Snapshot '{}' corrupted: {}", file, reason)
            }
            Self::ParseError { reason } => {
                write!(f, "Parse error: {}", reason)
            }
        }
    }
}

impl std::error::Error for FernError {}

// Convenience conversion from std::io::Error
impl From<std::io::Error> for FernError {
    fn from(err: std::io::Error) -> Self {
        FernError::IoError {
            operation: "unknown".to_string(),
            reason: err.to_string(),
        }
    }
}
