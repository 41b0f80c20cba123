//! Session/Auth Engine
//!
//! Orchestrates login against the account store and URL checks through the
//! classification pipeline (denylist, then suspicion patterns), writing an
//! audit entry per check. Owns the current session: the engine instance is
//! either `Unauthenticated` (`session == None`) or `Authenticated`.

use crate::error::{StoreError, StoreResult};
use crate::memory::MemoryStore;
use crate::patterns::PatternClassifier;
use crate::store::RecordStore;
use crate::{hash, normalize, CheckLogEntry, CheckStatus, GuardConfig, Session};
use std::future::Future;
use std::sync::Arc;

/// Login result surfaced to the caller. Expected failures (bad id, bad
/// secret, locked account) are values here, never errors.
#[derive(Debug, Clone)]
pub struct LoginOutcome {
    pub success: bool,
    pub message: String,
}

/// URL check result. `verdict` is `Some(true)` for safe, `Some(false)` for
/// flagged, `None` for no-session or store failure.
#[derive(Debug, Clone)]
pub struct CheckOutcome {
    pub verdict: Option<bool>,
    pub message: String,
}

/// Anti-phishing engine bound to one record store.
pub struct PhishGuard {
    store: Arc<dyn RecordStore>,
    classifier: PatternClassifier,
    config: GuardConfig,
    session: Option<Session>,
}

impl PhishGuard {
    pub fn new(store: Arc<dyn RecordStore>, config: GuardConfig) -> Self {
        Self {
            store,
            classifier: PatternClassifier::new(),
            config,
            session: None,
        }
    }

    /// Offline mode: no store configured, serve the fixture account from an
    /// in-memory backing with identical lockout semantics.
    pub fn offline(config: GuardConfig) -> Self {
        Self::new(Arc::new(MemoryStore::with_fixture()), config)
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.is_some()
    }

    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    /// Authenticate a student. Store-level failures are caught here and
    /// rendered as a generic error message.
    pub async fn login(&mut self, student_id: &str, secret: &str) -> LoginOutcome {
        match self.try_login(student_id, secret).await {
            Ok(outcome) => outcome,
            Err(err) => {
                tracing::error!(error = %err, student_id, "login aborted by store failure");
                LoginOutcome {
                    success: false,
                    message: format!("An error occurred during login: {err}"),
                }
            }
        }
    }

    async fn try_login(&mut self, student_id: &str, secret: &str) -> StoreResult<LoginOutcome> {
        let record = self.bounded(self.store.get_student(student_id)).await?;

        let Some(record) = record else {
            return Ok(LoginOutcome {
                success: false,
                message: "Invalid student ID".to_string(),
            });
        };

        if record.account_locked {
            return Ok(LoginOutcome {
                success: false,
                message: "Account is locked. Please contact administrator.".to_string(),
            });
        }

        if hash::verify(secret, &record.secret_digest) {
            self.bounded(self.store.record_success(student_id)).await?;
            tracing::info!(student_id, "login successful");
            self.session = Some(Session::new(record));
            return Ok(LoginOutcome {
                success: true,
                message: "Login successful".to_string(),
            });
        }

        let outcome = self
            .bounded(
                self.store
                    .record_failure(student_id, self.config.max_login_attempts),
            )
            .await?;

        Ok(LoginOutcome {
            success: false,
            message: outcome.to_string(),
        })
    }

    /// Classify a URL. Requires an authenticated session; the denylist always
    /// outranks the pattern rules.
    pub async fn check_url(&self, url: &str) -> CheckOutcome {
        let Some(session) = &self.session else {
            return CheckOutcome {
                verdict: None,
                message: "No authenticated user".to_string(),
            };
        };

        match self.try_check(session, url).await {
            Ok(outcome) => outcome,
            Err(err) => {
                tracing::error!(error = %err, url, "URL check aborted by store failure");
                CheckOutcome {
                    verdict: None,
                    message: format!("An error occurred while checking the URL: {err}"),
                }
            }
        }
    }

    async fn try_check(&self, session: &Session, url: &str) -> StoreResult<CheckOutcome> {
        let normalized = normalize::normalize_with_scheme(url, &self.config.default_scheme);

        let denylist_hit = self
            .bounded(self.store.match_known_malicious(&normalized))
            .await?;
        if let Some(level) = denylist_hit {
            tracing::info!(url, threat_level = %level, "known phishing URL");
            self.log_check(session, url, CheckStatus::Malicious(level.clone()))
                .await;
            return Ok(CheckOutcome {
                verdict: Some(false),
                message: format!("Warning: Known phishing URL detected! Threat Level: {level}"),
            });
        }

        if let Some(reason) = self.classifier.classify(&normalized) {
            tracing::info!(url, reason, "suspicious URL");
            self.log_check(session, url, CheckStatus::Suspicious(reason.to_string()))
                .await;
            return Ok(CheckOutcome {
                verdict: Some(false),
                message: format!("Warning: {reason} detected! Exercise caution!"),
            });
        }

        self.log_check(session, url, CheckStatus::Safe).await;
        Ok(CheckOutcome {
            verdict: Some(true),
            message: "URL appears to be safe".to_string(),
        })
    }

    /// Append one audit entry. A persistence failure never alters the
    /// classification result already computed; it is reported and dropped.
    async fn log_check(&self, session: &Session, url: &str, status: CheckStatus) {
        let entry = CheckLogEntry {
            timestamp: chrono::Utc::now(),
            student_id: session.student.id.clone(),
            student_name: session.student.display_name(),
            url_checked: url.to_string(),
            status,
        };

        if let Err(err) = self.bounded(self.store.append_check(entry)).await {
            tracing::warn!(error = %err, url, "failed to persist URL check log entry");
        }
    }

    /// Check history for a student, newest first.
    pub async fn get_history(&self, student_id: &str) -> StoreResult<Vec<CheckLogEntry>> {
        self.bounded(self.store.list_checks_for(student_id)).await
    }

    /// End the current session unconditionally.
    pub fn logout(&mut self) {
        if let Some(session) = self.session.take() {
            tracing::info!(student_id = %session.student.id, "session ended");
        }
    }

    /// Apply the configured per-call deadline to one store operation.
    async fn bounded<T>(
        &self,
        operation: impl Future<Output = StoreResult<T>>,
    ) -> StoreResult<T> {
        match self.config.store_timeout {
            Some(deadline) => match tokio::time::timeout(deadline, operation).await {
                Ok(result) => result,
                Err(_) => Err(StoreError::Timeout(deadline)),
            },
            None => operation.await,
        }
    }
}
