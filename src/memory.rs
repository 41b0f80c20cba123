//! In-Memory Record Store
//!
//! Concurrent in-process backing for [`RecordStore`]. Serves two roles: the
//! offline fallback (a single seeded fixture account) and the store used by
//! tests. Record updates go through the map entry, so the lockout-counter
//! increment is atomic per key within the process.

use crate::error::{StoreError, StoreResult};
use crate::store::{LockoutOutcome, RecordStore};
use crate::{hash, CheckLogEntry, DenylistEntry, StudentRecord};
use async_trait::async_trait;

/// Fixture account id for offline mode.
pub const FIXTURE_STUDENT_ID: &str = "DEMO001";
/// Fixture account secret for offline mode.
pub const FIXTURE_SECRET: &str = "demo123";

/// In-memory store backing.
#[derive(Default)]
pub struct MemoryStore {
    students: dashmap::DashMap<String, StudentRecord>,
    denylist: parking_lot::RwLock<Vec<DenylistEntry>>,
    checks: parking_lot::RwLock<Vec<CheckLogEntry>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store seeded with the offline fixture account.
    pub fn with_fixture() -> Self {
        let store = Self::new();
        store.insert_student(StudentRecord {
            id: FIXTURE_STUDENT_ID.to_string(),
            secret_digest: hash::digest(FIXTURE_SECRET),
            first_name: "Demo".to_string(),
            last_name: "Student".to_string(),
            email: "demo.student@example.edu".to_string(),
            department: "Orientation".to_string(),
            account_locked: false,
            failed_login_attempts: 0,
            last_login: None,
        });
        store
    }

    /// Administrative seam: add or replace a student record.
    pub fn insert_student(&self, record: StudentRecord) {
        self.students.insert(record.id.clone(), record);
    }

    /// Administrative seam: add a known-malicious URL fragment.
    pub fn insert_denylist_entry(&self, url_fragment: &str, threat_level: &str) {
        self.denylist.write().push(DenylistEntry {
            url_fragment: url_fragment.to_lowercase(),
            threat_level: threat_level.to_string(),
        });
    }

    /// Administrative seam: clear a lockout and its counter.
    pub fn unlock_student(&self, student_id: &str) -> bool {
        match self.students.get_mut(student_id) {
            Some(mut record) => {
                record.account_locked = false;
                record.failed_login_attempts = 0;
                true
            }
            None => false,
        }
    }
}

#[async_trait]
impl RecordStore for MemoryStore {
    async fn get_student(&self, student_id: &str) -> StoreResult<Option<StudentRecord>> {
        Ok(self.students.get(student_id).map(|r| r.clone()))
    }

    async fn record_success(&self, student_id: &str) -> StoreResult<()> {
        let mut record = self
            .students
            .get_mut(student_id)
            .ok_or_else(|| StoreError::RecordVanished(student_id.to_string()))?;

        record.failed_login_attempts = 0;
        record.last_login = Some(chrono::Utc::now());
        Ok(())
    }

    async fn record_failure(
        &self,
        student_id: &str,
        max_attempts: u32,
    ) -> StoreResult<LockoutOutcome> {
        let mut record = self
            .students
            .get_mut(student_id)
            .ok_or_else(|| StoreError::RecordVanished(student_id.to_string()))?;

        record.failed_login_attempts += 1;

        if record.failed_login_attempts >= max_attempts {
            record.account_locked = true;
            tracing::warn!(student_id, "account locked after repeated failures");
            return Ok(LockoutOutcome::LockedOut);
        }

        Ok(LockoutOutcome::AttemptsRemaining(
            max_attempts - record.failed_login_attempts,
        ))
    }

    async fn match_known_malicious(&self, normalized_url: &str) -> StoreResult<Option<String>> {
        let denylist = self.denylist.read();
        for entry in denylist.iter() {
            if normalized_url.contains(&entry.url_fragment.to_lowercase()) {
                return Ok(Some(entry.threat_level.clone()));
            }
        }
        Ok(None)
    }

    async fn append_check(&self, entry: CheckLogEntry) -> StoreResult<()> {
        self.checks.write().push(entry);
        Ok(())
    }

    async fn list_checks_for(&self, student_id: &str) -> StoreResult<Vec<CheckLogEntry>> {
        let mut entries: Vec<CheckLogEntry> = self
            .checks
            .read()
            .iter()
            .filter(|e| e.student_id == student_id)
            .cloned()
            .collect();

        entries.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        Ok(entries)
    }
}
