//! Record Store Seam
//!
//! Async trait over the persistent backing: student records, the denylist of
//! known-malicious URL fragments, and the append-only check log. Every
//! operation may suspend (network I/O) and is awaited individually.

use crate::error::StoreResult;
use crate::{CheckLogEntry, StudentRecord};
use async_trait::async_trait;
use std::fmt;

/// Outcome of recording a failed login attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LockoutOutcome {
    /// Counter reached the maximum; the account is now locked.
    LockedOut,
    /// Attempts left before lockout.
    AttemptsRemaining(u32),
}

impl fmt::Display for LockoutOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LockoutOutcome::LockedOut => {
                write!(f, "Account locked due to too many failed attempts")
            }
            LockoutOutcome::AttemptsRemaining(n) => {
                write!(f, "Invalid credentials. {n} attempts remaining")
            }
        }
    }
}

/// Persistent record store backing the engine.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Fetch a student record. `Ok(None)` means the id is unknown.
    async fn get_student(&self, student_id: &str) -> StoreResult<Option<StudentRecord>>;

    /// Reset the failed-attempt counter to 0 and stamp the last login.
    async fn record_success(&self, student_id: &str) -> StoreResult<()>;

    /// Increment the failed-attempt counter; lock the account when the
    /// post-increment counter reaches `max_attempts`.
    async fn record_failure(
        &self,
        student_id: &str,
        max_attempts: u32,
    ) -> StoreResult<LockoutOutcome>;

    /// Severity of the first denylist fragment contained in the normalized
    /// URL, if any. Enumeration order is store-defined.
    async fn match_known_malicious(&self, normalized_url: &str) -> StoreResult<Option<String>>;

    /// Append one check log entry.
    async fn append_check(&self, entry: CheckLogEntry) -> StoreResult<()>;

    /// Check log entries for a student, newest first. Unknown students get an
    /// empty vec, not an error.
    async fn list_checks_for(&self, student_id: &str) -> StoreResult<Vec<CheckLogEntry>>;
}
