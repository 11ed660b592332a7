//! Custom error types for memgraph

use std::fmt;
use thiserror::Error;

/// Main error type for scan operations.
///
/// `ReadFailed` is the normal per-node failure path: the traversal drops
/// the node and continues. `InvariantViolation` indicates a programming
/// defect and aborts the whole run.
#[derive(Error, Debug)]
pub enum ScanError {
    #[error("Invalid memory address: {0}")]
    InvalidAddress(String),

    #[error("Failed to read memory at {address}: {reason}")]
    ReadFailed { address: String, reason: String },

    #[error("Scan invariant violated: {0}")]
    InvariantViolation(String),

    #[error("Render error: {0}")]
    Render(#[from] std::io::Error),
}

/// Result type alias for scan operations
pub type ScanResult<T> = Result<T, ScanError>;

impl ScanError {
    /// Creates a read failed error
    pub fn read_failed(address: impl fmt::Display, reason: impl Into<String>) -> Self {
        ScanError::ReadFailed {
            address: address.to_string(),
            reason: reason.into(),
        }
    }

    /// Creates an invariant violation error
    pub fn invariant(reason: impl Into<String>) -> Self {
        ScanError::InvariantViolation(reason.into())
    }

    /// True for the local, recoverable per-node failure class
    pub fn is_read_failure(&self) -> bool {
        matches!(self, ScanError::ReadFailed { .. })
    }
}
