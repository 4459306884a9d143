use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use mealsub_shared::Result;

use crate::{DraftRecord, DraftRepository};

/// Draft storage held in process memory. Backs tests and ad hoc tooling;
/// the durable SQLite repository lives in the db crate.
#[derive(Default)]
pub struct InMemoryDraftRepository {
    record: Mutex<Option<DraftRecord>>,
}

impl InMemoryDraftRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Option<DraftRecord>> {
        self.record
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[async_trait]
impl DraftRepository for InMemoryDraftRepository {
    async fn load(&self) -> Result<Option<DraftRecord>> {
        Ok(self.lock().clone())
    }

    async fn save(&self, record: &DraftRecord) -> Result<()> {
        *self.lock() = Some(record.clone());
        Ok(())
    }

    async fn clear(&self) -> Result<()> {
        *self.lock() = None;
        Ok(())
    }
}
