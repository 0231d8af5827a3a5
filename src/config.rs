// Copyright 2025 Vivian Voss. Licensed under the Apache License, Version 2.0.
// SPDX-License-Identifier: Apache-2.0

//! Store configuration.
//!
//! A [`StoreConfig`] fixes where snapshot directories live and which tree
//! order new tables use. Configuration is plain data with defaults; it
//! can also be read from a TOML file:
//!
//! ```toml
//! root_dir = "/var/lib/fernbase"
//! order = 32
//! ```
//!
//! Both keys are optional. The order is validated when the store opens
//! (minimum degree 2).

use crate::error::{FernError, FernResult};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Store-wide configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Directory under which `<store>_data` directories are created.
    pub root_dir: PathBuf,

    /// Minimum degree for newly created trees.
    pub order: u16,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            root_dir: PathBuf::from("."),
            order: 32,
        }
    }
}

impl StoreConfig {
    /// Reads configuration from a TOML file.
    ///
    /// ## Input
    /// - `path`: Path to the TOML file
    ///
    /// ## Output
    /// - `Ok(StoreConfig)`: Parsed configuration, defaults filled in
    /// - `Err(FernError::IoError)`: File unreadable
    /// - `Err(FernError::ParseError)`: Invalid TOML or field type
    ///
    /// ## Example Usage
    /// ```no_run
    /// use fernbase::StoreConfig;
    ///
    /// let config = StoreConfig::from_file("fernbase.toml")?;
    /// # Ok::<(), fernbase::FernError>(())
    /// ```
    pub fn from_file(path: impl AsRef<Path>) -> FernResult<Self> {
        let text = fs::read_to_string(path.as_ref()).map_err(|e| FernError::IoError {
            operation: "read_config".to_string(),
            reason: e.to_string(),
        })?;
        toml::from_str(&text).map_err(|e| FernError::ParseError {
            reason: e.to_string(),
        })
    }
}
