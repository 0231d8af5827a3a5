// Copyright 2025 Vivian Voss. Licensed under the Apache License, Version 2.0.
// SPDX-License-Identifier: Apache-2.0

//! Metric value types.

use std::fmt;

/// Unit of a recorded metric value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetricUnit {
    Microseconds,
    Milliseconds,
    Bytes,
    Count,
}

impl fmt::Display for MetricUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Microseconds => write!(f, "μs"),
            Self::Milliseconds => write!(f, "ms"),
            Self::Bytes => write!(f, "bytes"),
            Self::Count => write!(f, "count"),
        }
    }
}

/// One recorded measurement with optional dimension tags.
///
/// ## Example Usage
/// ```
/// use fernbase::metrics::{Metric, MetricUnit};
///
/// let metric = Metric::new("store_operation", 1250.0, MetricUnit::Microseconds)
///     .with_tag("operation", "insert")
///     .with_tag("table", "users");
///
/// assert_eq!(metric.name, "store_operation");
/// assert_eq!(metric.tag("table"), Some("users"));
/// ```
#[derive(Debug, Clone)]
pub struct Metric {
    /// Metric name, e.g. `store_operation`.
    pub name: String,

    /// Measured value in `unit`.
    pub value: f64,

    /// Unit of `value`.
    pub unit: MetricUnit,

    /// Dimension tags in insertion order.
    pub tags: Vec<(String, String)>,
}

impl Metric {
    /// Creates a metric with no tags.
    pub fn new(name: &str, value: f64, unit: MetricUnit) -> Self {
        Self {
            name: name.to_string(),
            value,
            unit,
            tags: Vec::new(),
        }
    }

    /// Adds one dimension tag (builder style).
    pub fn with_tag(mut self, key: &str, value: &str) -> Self {
        self.tags.push((key.to_string(), value.to_string()));
        self
    }

    /// Looks up a tag value by key.
    pub fn tag(&self, key: &str) -> Option<&str> {
        self.tags
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}
