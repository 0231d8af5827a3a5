// Copyright 2025 Vivian Voss. Licensed under the Apache License, Version 2.0.
// SPDX-License-Identifier: Apache-2.0

//! Table catalog, service facade and snapshot persistence.
//!
//! - **store**: The [`Store`] facade - named tables over B+-Trees
//! - **snapshot**: Versioned per-table snapshot files

pub mod snapshot;
pub mod store;

// Re-export the facade
pub use store::Store;
