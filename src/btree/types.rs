// Copyright 2025 Vivian Voss. Licensed under the Apache License, Version 2.0.
// SPDX-License-Identifier: Apache-2.0

//! Core types for the B+-Tree index.
//!
//! Defines the node identifier, tree order and snapshot format constants
//! shared by the tree implementation and the persistence layer.

use crate::error::{FernError, FernResult};
use serde::{Deserialize, Serialize};

/// Magic bytes for snapshot file format validation.
///
/// Used in file headers to verify file type and detect corruption.
pub const SNAPSHOT_MAGIC: u32 = 0xFB7E_E001;

/// Snapshot format version accepted by the loader.
pub const SNAPSHOT_VERSION: u16 = 1;

/// Node identifier type for B+-Tree nodes.
///
/// 32-bit index into the tree's node arena. Sibling links between leaves
/// carry a `NodeId` instead of an owning pointer, so the arena remains
/// the single owner of every node.
pub type NodeId = u32;

/// B+-Tree minimum degree configuration.
///
/// A tree of order `t` bounds every node to at most `2t - 1` keys; every
/// non-root node holds at least `t - 1`. Higher orders reduce tree height
/// but increase the cost of shifting within a node.
///
/// ## Constraints
/// - Minimum degree: 2 (the smallest tree that can split and merge)
///
/// ## Typical Values
/// - Tests and small tables: 2-4
/// - In-memory production tables: 16-64
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order(u16);

impl Order {
    /// Creates a new order with validation.
    ///
    /// ## Input
    /// - `degree`: Desired minimum degree (must be >= 2)
    ///
    /// ## Output
    /// - `Ok(Order)`: Valid order created
    /// - `Err(FernError::ParseError)`: Degree less than 2
    ///
    /// ## Example Usage
    /// ```
    /// use fernbase::Order;
    ///
    /// let order = Order::new(3)?;
    /// assert_eq!(order.max_keys(), 5);
    /// assert_eq!(order.min_keys(), 2);
    ///
    /// assert!(Order::new(1).is_err());
    /// # Ok::<(), fernbase::FernError>(())
    /// ```
    pub fn new(degree: u16) -> FernResult<Self> {
        if degree < 2 {
            return Err(FernError::ParseError {
                reason: format!("B+-Tree minimum degree must be >= 2, got {}", degree),
            });
        }
        Ok(Self(degree))
    }

    /// Maximum keys per node (`2t - 1`). A node at this count is full.
    pub fn max_keys(&self) -> usize {
        2 * self.0 as usize - 1
    }

    /// Minimum keys per non-root node (`t - 1`). The root may hold fewer.
    pub fn min_keys(&self) -> usize {
        self.0 as usize - 1
    }

    /// Raw minimum degree `t`.
    pub fn degree(&self) -> usize {
        self.0 as usize
    }

    /// Raw configured value for the snapshot header.
    pub fn value(&self) -> u16 {
        self.0
    }
}
