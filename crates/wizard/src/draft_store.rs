use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use mealsub_shared::Result;
use serde::{Deserialize, Serialize};
use tokio::task::JoinHandle;

use crate::WizardDraft;

/// Quiet window between the last edit and the write it coalesces into.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(500);

/// Drafts older than this are dropped on load instead of resumed.
pub const DEFAULT_MAX_AGE_DAYS: i64 = 7;

/// The persisted record: one JSON document under a single storage key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DraftRecord {
    pub form_data: WizardDraft,
    pub timestamp: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_step: Option<u8>,
}

/// Storage backend for the draft record. The policy above it (debounce,
/// meaningful-field gate, staleness) lives in `DraftStore`, so backends
/// stay dumb and the policy is testable against the in-memory one.
#[async_trait]
pub trait DraftRepository: Send + Sync {
    async fn load(&self) -> Result<Option<DraftRecord>>;
    async fn save(&self, record: &DraftRecord) -> Result<()>;
    async fn clear(&self) -> Result<()>;
}

/// Autosave policy around a `DraftRepository`.
///
/// Writes are debounced: each call replaces the pending one, so a burst of
/// edits lands as a single write after the quiet window. Persistence never
/// blocks dispatch; failures are logged, not surfaced, because losing an
/// autosave must not interrupt the operator mid-wizard.
pub struct DraftStore {
    repo: Arc<dyn DraftRepository>,
    debounce: Duration,
    max_age: chrono::Duration,
    pending: Mutex<Option<JoinHandle<()>>>,
}

impl DraftStore {
    pub fn new(repo: Arc<dyn DraftRepository>) -> Self {
        Self::with_policy(repo, DEFAULT_DEBOUNCE, DEFAULT_MAX_AGE_DAYS)
    }

    pub fn with_policy(repo: Arc<dyn DraftRepository>, debounce: Duration, max_age_days: i64) -> Self {
        Self {
            repo,
            debounce,
            max_age: chrono::Duration::days(max_age_days),
            pending: Mutex::new(None),
        }
    }

    /// Load the persisted draft, if any. Called once at wizard mount.
    /// Records past the staleness window are cleared rather than resumed.
    pub async fn load(&self) -> Option<DraftRecord> {
        match self.repo.load().await {
            Ok(Some(record)) => {
                if Utc::now() - record.timestamp > self.max_age {
                    tracing::info!(saved_at = %record.timestamp, "persisted draft is stale, discarding");
                    if let Err(err) = self.repo.clear().await {
                        tracing::error!(error = %err, "failed to clear stale draft");
                    }
                    return None;
                }
                Some(record)
            }
            Ok(None) => None,
            Err(err) => {
                tracing::error!(error = %err, "failed to load persisted draft");
                None
            }
        }
    }

    /// Queue a debounced write. Replaces any write still waiting out its
    /// quiet window. Drafts with no meaningful input are not persisted.
    pub fn schedule_save(&self, draft: WizardDraft, current_step: Option<u8>) {
        if !draft.has_meaningful_input() {
            return;
        }

        let repo = self.repo.clone();
        let delay = self.debounce;
        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            persist(&*repo, draft, current_step).await;
        });

        self.replace_pending(Some(handle));
    }

    /// Write immediately, bypassing the quiet window. Used for the
    /// plan-and-billing reset, which must be mirrored to storage at once so
    /// only the customer facet survives a reload. A draft left with no
    /// meaningful input is cleared instead of written.
    pub fn save_now(&self, draft: WizardDraft, current_step: Option<u8>) {
        let repo = self.repo.clone();
        let handle = tokio::spawn(async move {
            if draft.has_meaningful_input() {
                persist(&*repo, draft, current_step).await;
            } else if let Err(err) = repo.clear().await {
                tracing::error!(error = %err, "failed to clear draft");
            }
        });

        self.replace_pending(Some(handle));
    }

    /// Remove the persisted draft and cancel any pending write, so a
    /// cleared draft cannot be resurrected by a timer that was already
    /// running.
    pub fn clear_now(&self) {
        let repo = self.repo.clone();
        let handle = tokio::spawn(async move {
            if let Err(err) = repo.clear().await {
                tracing::error!(error = %err, "failed to clear draft");
            }
        });

        self.replace_pending(Some(handle));
    }

    /// Wait for the pending write, if any, to finish. Shutdown hook.
    pub async fn flush(&self) {
        let handle = self.lock_pending().take();
        if let Some(handle) = handle {
            let _ = handle.await;
        }
    }

    fn replace_pending(&self, next: Option<JoinHandle<()>>) {
        let mut pending = self.lock_pending();
        if let Some(previous) = pending.take() {
            previous.abort();
        }
        *pending = next;
    }

    fn lock_pending(&self) -> MutexGuard<'_, Option<JoinHandle<()>>> {
        self.pending.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

async fn persist(repo: &dyn DraftRepository, form_data: WizardDraft, current_step: Option<u8>) {
    let record = DraftRecord {
        form_data,
        timestamp: Utc::now(),
        current_step,
    };

    if let Err(err) = repo.save(&record).await {
        tracing::error!(error = %err, "failed to persist draft");
    }
}
