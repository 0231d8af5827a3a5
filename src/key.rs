// Copyright 2025 Vivian Voss. Licensed under the Apache License, Version 2.0.
// SPDX-License-Identifier: Apache-2.0

//! Record key type with a total order.
//!
//! Keys are JSON-compatible scalars: text (compared lexicographically) or
//! numbers (compared numerically). A single tree never mixes kinds; the
//! first insert fixes the kind and the store rejects the other kind with
//! `KeyKindMismatch`.

use crate::error::{FernError, FernResult};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

/// Key kind discriminator, fixed per tree by the first insert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum KeyKind {
    /// Lexicographically ordered UTF-8 text.
    Text,
    /// Numerically ordered finite floats.
    Number,
}

impl fmt::Display for KeyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text => write!(f, "text"),
            Self::Number => write!(f, "number"),
        }
    }
}

/// Record key: a totally ordered JSON scalar.
///
/// ## Ordering
/// - `Text` compares as UTF-8 strings (lexicographic)
/// - `Number` compares via `f64::total_cmp` (finite values only, so the
///   total order agrees with the usual numeric order)
/// - Across kinds, numbers sort before text; a single tree never relies
///   on this because kinds are unmixed
///
/// ## Serialisation
/// Derives serde traits for the bincode snapshot stream. JSON conversion
/// goes through [`Key::from_json`] / [`Key::to_json`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Key {
    Text(String),
    Number(f64),
}

impl Key {
    /// Converts a JSON value into a key.
    ///
    /// ## Input
    /// - `value`: JSON scalar (string or finite number)
    ///
    /// ## Output
    /// - `Ok(Key)`: Usable key
    /// - `Err(FernError::InvalidKey)`: Not a string or number, or the
    ///   number has no finite f64 representation
    ///
    /// ## Example Usage
    /// ```
    /// use fernbase::Key;
    /// use serde_json::json;
    ///
    /// let key = Key::from_json(&json!("alice"))?;
    /// assert_eq!(key, Key::Text("alice".to_string()));
    ///
    /// let key = Key::from_json(&json!(42))?;
    /// assert_eq!(key, Key::Number(42.0));
    ///
    /// assert!(Key::from_json(&json!([1, 2])).is_err());
    /// # Ok::<(), fernbase::FernError>(())
    /// ```
    pub fn from_json(value: &serde_json::Value) -> FernResult<Self> {
        match value {
            serde_json::Value::String(s) => Ok(Key::Text(s.clone())),
            serde_json::Value::Number(n) => {
                let f = n.as_f64().ok_or_else(|| FernError::InvalidKey {
                    reason: format!("number '{}' has no f64 representation", n),
                })?;
                if !f.is_finite() {
                    return Err(FernError::InvalidKey {
                        reason: format!("number '{}' is not finite", f),
                    });
                }
                Ok(Key::Number(f))
            }
            other => Err(FernError::InvalidKey {
                reason: format!("expected a string or number, got {}", json_kind(other)),
            }),
        }
    }

    /// Converts the key back into a JSON value.
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            Key::Text(s) => serde_json::Value::String(s.clone()),
            // Finite by construction, so from_f64 cannot fail
            Key::Number(f) => serde_json::Number::from_f64(*f)
                .map(serde_json::Value::Number)
                .expect("keys hold finite numbers"),
        }
    }

    /// Returns the key's kind.
    pub fn kind(&self) -> KeyKind {
        match self {
            Key::Text(_) => KeyKind::Text,
            Key::Number(_) => KeyKind::Number,
        }
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Key::Text(s) => write!(f, "{}", s),
            Key::Number(n) => write!(f, "{}", n),
        }
    }
}

impl PartialEq for Key {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Key {}

impl PartialOrd for Key {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Key {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Key::Text(a), Key::Text(b)) => a.cmp(b),
            (Key::Number(a), Key::Number(b)) => a.total_cmp(b),
            (Key::Number(_), Key::Text(_)) => Ordering::Less,
            (Key::Text(_), Key::Number(_)) => Ordering::Greater,
        }
    }
}

impl From<&str> for Key {
    fn from(s: &str) -> Self {
        Key::Text(s.to_string())
    }
}

impl From<i64> for Key {
    fn from(n: i64) -> Self {
        Key::Number(n as f64)
    }
}

/// Names a JSON value's kind for error messages.
fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_text_ordering() {
        let a = Key::from("apple");
        let b = Key::from("banana");
        assert!(a < b);
        assert_eq!(a, Key::from("apple"));
    }

    #[test]
    fn test_number_ordering() {
        let a = Key::from(2);
        let b = Key::from(10);
        assert!(a < b);

        // Numeric, not lexicographic: 2 < 10
        let a = Key::Number(2.0);
        let b = Key::Number(10.0);
        assert!(a < b);
    }

    #[test]
    fn test_from_json_scalars() {
        assert_eq!(
            Key::from_json(&json!("k1")).unwrap(),
            Key::Text("k1".to_string())
        );
        assert_eq!(Key::from_json(&json!(3.5)).unwrap(), Key::Number(3.5));
        assert_eq!(Key::from_json(&json!(-7)).unwrap(), Key::Number(-7.0));
    }

    #[test]
    fn test_from_json_rejects_containers() {
        assert!(Key::from_json(&json!(null)).is_err());
        assert!(Key::from_json(&json!(true)).is_err());
        assert!(Key::from_json(&json!([1])).is_err());
        assert!(Key::from_json(&json!({"a": 1})).is_err());
    }

    #[test]
    fn test_json_round_trip() {
        let key = Key::from_json(&json!("alice")).unwrap();
        assert_eq!(key.to_json(), json!("alice"));

        let key = Key::from_json(&json!(42)).unwrap();
        assert_eq!(key.to_json(), json!(42.0));
    }

    #[test]
    fn test_kind() {
        assert_eq!(Key::from("x").kind(), KeyKind::Text);
        assert_eq!(Key::from(1).kind(), KeyKind::Number);
    }

    #[test]
    fn test_binary_search_consistency() {
        // Equality must agree with ordering for leaf binary searches
        let keys = vec![Key::from(1), Key::from(5), Key::from(9)];
        assert_eq!(keys.binary_search(&Key::from(5)), Ok(1));
        assert_eq!(keys.binary_search(&Key::from(6)), Err(2));
    }
}
