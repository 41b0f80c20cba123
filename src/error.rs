//! Error types for PhishGuard

use std::time::Duration;
use thiserror::Error;

/// Store-level failure, distinct from expected outcomes such as an absent
/// record or a locked account (those are values, not errors).
#[derive(Error, Debug)]
pub enum StoreError {
    /// Backing store unreachable
    #[error("record store unavailable: {0}")]
    Unavailable(String),

    /// Record disappeared between read and update
    #[error("record vanished mid-update: {0}")]
    RecordVanished(String),

    /// Caller-supplied deadline expired
    #[error("store call timed out after {0:?}")]
    Timeout(Duration),
}

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;
