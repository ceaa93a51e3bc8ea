//! Batch request and result types.
//!
//! A [`BatchRequest`] is the unit the execution wrapper routes and measures:
//! one or more operations plus transaction and read-only flags. Construction
//! is checked so a malformed batch is rejected before any operation runs.

use crate::error::{BackendError, BenchResult};
use crate::operation::{DbOperation, Status, TimestampedValue};
use serde::{Deserialize, Serialize};

/// An ordered sequence of operations executed and measured as one unit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchRequest {
    pub operations: Vec<DbOperation>,
    /// All operations must be applied atomically as a unit.
    pub is_transaction: bool,
    /// No operation in the batch mutates state.
    pub read_only: bool,
}

impl BatchRequest {
    /// Build a batch, rejecting malformed member operations and `read_only`
    /// batches that contain a write kind.
    pub fn new(
        operations: Vec<DbOperation>,
        is_transaction: bool,
        read_only: bool,
    ) -> BenchResult<Self> {
        for op in &operations {
            if !op.is_well_formed() {
                return Err(BackendError::InvalidBatch {
                    reason: format!("malformed {} operation", op.kind),
                }
                .into());
            }
            if read_only && !op.kind.is_read() {
                return Err(BackendError::InvalidBatch {
                    reason: format!("{} operation in a read-only batch", op.kind),
                }
                .into());
            }
        }
        Ok(Self {
            operations,
            is_transaction,
            read_only,
        })
    }
}

/// Outcome of a batch: status, values read, and cache hit accounting.
///
/// `hit_count`/`total_count` report how many of the batch's point reads were
/// satisfied from cache versus attempted; both are zero for write-only
/// batches.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchResult {
    pub status: Status,
    pub values: Vec<TimestampedValue>,
    pub hit_count: u64,
    pub total_count: u64,
}

impl BatchResult {
    pub fn new(status: Status) -> Self {
        Self {
            status,
            values: Vec::new(),
            hit_count: 0,
            total_count: 0,
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================
