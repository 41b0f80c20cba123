//! PhishGuard URL Screening
//!
//! Anti-phishing protection for student portals:
//! - Credential authentication with failed-attempt lockout
//! - URL risk classification (denylist, then suspicion patterns)
//! - Append-only audit trail of every check
//!
//! # Pipeline
//! ```text
//! login ──► record store ──► digest compare ──► lockout update
//! check  ──► normalize ──► denylist ──► patterns ──► audit log
//! ```
//!
//! The [`PhishGuard`] engine owns the current session and drives both flows
//! against a [`RecordStore`] backing. When no store is configured the engine
//! runs offline against an in-memory fixture account.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;
use uuid::Uuid;

pub mod engine;
pub mod error;
pub mod hash;
pub mod memory;
pub mod normalize;
pub mod patterns;
pub mod store;

pub use engine::{CheckOutcome, LoginOutcome, PhishGuard};
pub use error::{StoreError, StoreResult};
pub use memory::MemoryStore;
pub use patterns::PatternClassifier;
pub use store::{LockoutOutcome, RecordStore};

// =============================================================================
// Core Types
// =============================================================================

/// Student account record, the single source of truth for authentication state.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentRecord {
    pub id: String,
    pub secret_digest: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub department: String,
    pub account_locked: bool,
    pub failed_login_attempts: u32,
    pub last_login: Option<DateTime<Utc>>,
}

impl StudentRecord {
    /// Display name snapshot used when writing audit entries.
    pub fn display_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// Known-malicious URL fragment with its severity label.
///
/// Populated by an administrative process; read-only for the core.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DenylistEntry {
    pub url_fragment: String,
    pub threat_level: String,
}

/// Classification outcome of a single URL check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckStatus {
    Safe,
    Suspicious(String),
    Malicious(String),
}

impl fmt::Display for CheckStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CheckStatus::Safe => write!(f, "Safe"),
            CheckStatus::Suspicious(reason) => write!(f, "Suspicious - {reason}"),
            CheckStatus::Malicious(level) => write!(f, "Malicious - Threat Level: {level}"),
        }
    }
}

impl Serialize for CheckStatus {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}

/// One URL check, recorded once and never mutated.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckLogEntry {
    pub timestamp: DateTime<Utc>,
    pub student_id: String,
    pub student_name: String,
    pub url_checked: String,
    pub status: CheckStatus,
}

/// Ephemeral authenticated context. In-process only, never persisted.
#[derive(Debug, Clone)]
pub struct Session {
    pub id: Uuid,
    pub student: StudentRecord,
    pub started_at: DateTime<Utc>,
}

impl Session {
    pub fn new(student: StudentRecord) -> Self {
        Self {
            id: Uuid::new_v4(),
            student,
            started_at: Utc::now(),
        }
    }
}

/// Engine configuration.
#[derive(Debug, Clone)]
pub struct GuardConfig {
    /// Failed logins before the account locks.
    pub max_login_attempts: u32,
    /// Scheme prepended to scheme-less input before normalization.
    pub default_scheme: String,
    /// Optional per-call deadline on store operations.
    pub store_timeout: Option<Duration>,
}

impl Default for GuardConfig {
    fn default() -> Self {
        Self {
            max_login_attempts: 3,
            default_scheme: "http".to_string(),
            store_timeout: None,
        }
    }
}
