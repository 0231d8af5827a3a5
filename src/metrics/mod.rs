// Copyright 2025 Vivian Voss. Licensed under the Apache License, Version 2.0.
// SPDX-License-Identifier: Apache-2.0

//! Metrics infrastructure for store observability.
//!
//! Lightweight in-process monitoring:
//! - **types**: Metric values and units
//! - **collector**: Global singleton buffering recorded metrics
//! - **aggregator**: Percentile and statistical calculations
//!
//! ## Quick Start
//!
//! ```rust
//! use fernbase::metrics::{aggregator, Metric, MetricUnit, MetricsCollector};
//!
//! let metric = Metric::new("store_operation", 1250.0, MetricUnit::Microseconds)
//!     .with_tag("operation", "read")
//!     .with_tag("table", "users");
//! MetricsCollector::global().record(metric);
//!
//! let durations = MetricsCollector::global().values_for("store_operation");
//! if let Some(stats) = aggregator::calculate_stats(&durations) {
//!     println!("p95 read latency: {}μs", stats.p95);
//! }
//! ```
//!
//! The store facade records a `store_operation` duration metric (tagged
//! with operation and table) for every facade call; applications drain
//! and aggregate on their own schedule.

pub mod aggregator;
pub mod collector;
pub mod types;

// Re-export commonly used types
pub use aggregator::{calculate_stats, p50, p95, p99, MetricStats};
pub use collector::MetricsCollector;
pub use types::{Metric, MetricUnit};
