// Copyright 2025 Vivian Voss. Licensed under the Apache License, Version 2.0.
// SPDX-License-Identifier: Apache-2.0

//! Global metrics collector.
//!
//! A process-wide singleton buffering recorded metrics in memory. The
//! store facade records an entry per operation; embedding applications
//! drain the buffer on their own schedule and aggregate with
//! [`crate::metrics::aggregator`]. Nothing is written to disk - the
//! snapshot directory stays reserved for table data.
//!
//! ## Thread Safety
//!
//! The buffer sits behind an `RwLock`; recording from multiple threads
//! is safe even though the store itself is single-threaded.

use super::types::Metric;
use once_cell::sync::Lazy;
use std::sync::RwLock;

static COLLECTOR: Lazy<MetricsCollector> = Lazy::new(MetricsCollector::new);

/// In-memory metric buffer with a global instance.
pub struct MetricsCollector {
    buffer: RwLock<Vec<Metric>>,
}

impl MetricsCollector {
    /// Creates a standalone collector.
    ///
    /// The global instance is usually what you want; standalone
    /// collectors suit embedding applications that scope metrics to a
    /// component.
    pub fn new() -> Self {
        Self {
            buffer: RwLock::new(Vec::new()),
        }
    }

    /// The process-wide collector.
    pub fn global() -> &'static MetricsCollector {
        &COLLECTOR
    }

    /// Appends one metric to the buffer.
    ///
    /// ## Performance
    /// - O(1): lock plus push
    pub fn record(&self, metric: Metric) {
        self.buffer
            .write()
            .expect("metrics lock never poisoned")
            .push(metric);
    }

    /// Number of buffered metrics.
    pub fn buffer_size(&self) -> usize {
        self.buffer
            .read()
            .expect("metrics lock never poisoned")
            .len()
    }

    /// Removes and returns every buffered metric.
    pub fn drain(&self) -> Vec<Metric> {
        let mut buffer = self.buffer.write().expect("metrics lock never poisoned");
        std::mem::take(&mut *buffer)
    }

    /// Discards every buffered metric.
    pub fn clear(&self) {
        self.buffer
            .write()
            .expect("metrics lock never poisoned")
            .clear();
    }

    /// Values of every buffered metric with the given name.
    pub fn values_for(&self, name: &str) -> Vec<f64> {
        self.buffer
            .read()
            .expect("metrics lock never poisoned")
            .iter()
            .filter(|metric| metric.name == name)
            .map(|metric| metric.value)
            .collect()
    }
}

impl Default for MetricsCollector {
    fn default() -> Self {
        Self::new()
    }
}
