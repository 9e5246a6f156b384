//! Error types for queue operations

use std::collections::TryReserveError;
use thiserror::Error;

/// Queue error types
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum QueueError {
    #[error("queue is empty")]
    Empty,

    #[error("failed to allocate queue storage: {0}")]
    Alloc(#[from] TryReserveError),
}

/// Result type for queue operations
pub type Result<T> = std::result::Result<T, QueueError>;
