// Copyright 2025 Vivian Voss. Licensed under the Apache License, Version 2.0.
// SPDX-License-Identifier: Apache-2.0

//! Record payload type and shape validation.
//!
//! A record value is a structured map from string field names to arbitrary
//! JSON-compatible scalars and containers. The tree treats records as
//! opaque blobs; the shape check runs at the store facade, never inside
//! the tree.

use crate::error::{FernError, FernResult};

/// Opaque record payload: field name to JSON value.
pub type Record = serde_json::Map<String, serde_json::Value>;

/// Validates the structured-map shape and unwraps the payload.
///
/// ## Input
/// - `value`: JSON payload supplied by the caller
///
/// ## Output
/// - `Ok(Record)`: Payload is an object
/// - `Err(FernError::InvalidValue)`: Any other JSON shape
///
/// ## Example Usage
/// ```
/// use fernbase::record::record_from_json;
/// use serde_json::json;
///
/// let record = record_from_json(json!({"name": "alice", "age": 30}))?;
/// assert_eq!(record.len(), 2);
///
/// assert!(record_from_json(json!([1, 2, 3])).is_err());
/// assert!(record_from_json(json!("bare string")).is_err());
/// # Ok::<(), fernbase::FernError>(())
/// ```
pub fn record_from_json(value: serde_json::Value) -> FernResult<Record> {
    match value {
        serde_json::Value::Object(map) => Ok(map),
        other => Err(FernError::InvalidValue {
            reason: format!("expected an object of fields, got {}", kind_name(&other)),
        }),
    }
}

fn kind_name(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    }
}
