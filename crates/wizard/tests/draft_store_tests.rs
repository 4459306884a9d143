use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use mealsub_shared::Result;
use mealsub_wizard::{
    DraftRecord, DraftRepository, DraftStore, InMemoryDraftRepository, WizardAction, WizardDraft,
    WizardStore,
};

/// Counts writes so the debounce coalescing is observable.
struct CountingRepository {
    inner: InMemoryDraftRepository,
    saves: AtomicUsize,
}

impl CountingRepository {
    fn new() -> Self {
        Self {
            inner: InMemoryDraftRepository::new(),
            saves: AtomicUsize::new(0),
        }
    }

    fn save_count(&self) -> usize {
        self.saves.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl DraftRepository for CountingRepository {
    async fn load(&self) -> Result<Option<DraftRecord>> {
        self.inner.load().await
    }

    async fn save(&self, record: &DraftRecord) -> Result<()> {
        self.saves.fetch_add(1, Ordering::SeqCst);
        self.inner.save(record).await
    }

    async fn clear(&self) -> Result<()> {
        self.inner.clear().await
    }
}

fn meaningful_draft(phone: &str) -> WizardDraft {
    let mut draft = WizardDraft::default();
    draft.customer.customer_phone = phone.to_string();
    draft
}

#[tokio::test(start_paused = true)]
async fn rapid_edits_coalesce_into_a_single_write() {
    let repo = Arc::new(CountingRepository::new());
    let store = DraftStore::new(repo.clone());

    store.schedule_save(meaningful_draft("0100111"), None);
    store.schedule_save(meaningful_draft("01001112"), None);
    store.schedule_save(meaningful_draft("01001112223"), None);
    store.flush().await;

    assert_eq!(repo.save_count(), 1, "edits within the window coalesce");
    let record = repo.load().await.unwrap().expect("draft persisted");
    assert_eq!(record.form_data.customer.customer_phone, "01001112223");
}

#[tokio::test(start_paused = true)]
async fn empty_drafts_are_never_persisted() {
    let repo = Arc::new(CountingRepository::new());
    let store = DraftStore::new(repo.clone());

    store.schedule_save(WizardDraft::default(), None);
    store.flush().await;

    assert_eq!(repo.save_count(), 0);
    assert!(repo.load().await.unwrap().is_none());
}

#[tokio::test(start_paused = true)]
async fn clear_cancels_a_write_still_waiting_out_its_window() {
    let repo = Arc::new(CountingRepository::new());
    let store = DraftStore::new(repo.clone());

    store.schedule_save(meaningful_draft("01001234567"), None);
    store.clear_now();
    store.flush().await;

    assert_eq!(repo.save_count(), 0, "pending write must not resurrect the draft");
    assert!(repo.load().await.unwrap().is_none());
}

#[tokio::test(start_paused = true)]
async fn save_now_bypasses_the_quiet_window() {
    let repo = Arc::new(CountingRepository::new());
    // A day-long window: an immediate write must not wait for it.
    let store = DraftStore::with_policy(repo.clone(), Duration::from_secs(86_400), 7);

    store.save_now(meaningful_draft("01001234567"), Some(2));
    store.flush().await;

    assert_eq!(repo.save_count(), 1);
    let record = repo.load().await.unwrap().expect("written immediately");
    assert_eq!(record.current_step, Some(2));
}

#[tokio::test(start_paused = true)]
async fn save_now_on_a_meaningless_draft_clears_storage_instead() {
    let repo = Arc::new(CountingRepository::new());
    let store = DraftStore::new(repo.clone());

    store.save_now(meaningful_draft("01001234567"), None);
    store.flush().await;
    assert!(repo.load().await.unwrap().is_some());

    store.save_now(WizardDraft::default(), None);
    store.flush().await;

    assert!(repo.load().await.unwrap().is_none());
}

#[tokio::test]
async fn stale_drafts_are_discarded_on_load() {
    let repo = Arc::new(InMemoryDraftRepository::new());
    repo.save(&DraftRecord {
        form_data: meaningful_draft("01001234567"),
        timestamp: Utc::now() - chrono::Duration::days(30),
        current_step: Some(3),
    })
    .await
    .unwrap();

    let store = DraftStore::new(repo.clone());

    assert!(store.load().await.is_none());
    assert!(
        repo.load().await.unwrap().is_none(),
        "stale record is cleared, not kept around"
    );
}

#[tokio::test]
async fn fresh_drafts_are_resumed_on_load() {
    let repo = Arc::new(InMemoryDraftRepository::new());
    repo.save(&DraftRecord {
        form_data: meaningful_draft("01001234567"),
        timestamp: Utc::now(),
        current_step: Some(2),
    })
    .await
    .unwrap();

    let store = DraftStore::new(repo);
    let record = store.load().await.expect("fresh draft resumes");

    assert_eq!(record.current_step, Some(2));
    assert_eq!(record.form_data.customer.customer_phone, "01001234567");
}

#[tokio::test(start_paused = true)]
async fn store_notifies_subscribers_synchronously_and_autosaves() {
    let repo = Arc::new(CountingRepository::new());
    let store = WizardStore::new(DraftStore::new(repo.clone()));
    let mut subscriber = store.subscribe();

    store.dispatch(WizardAction::EditCustomerDetails {
        name: "Sara".to_string(),
        phone: "01001234567".to_string(),
        email: String::new(),
        address: String::new(),
    });

    assert!(subscriber.has_changed().unwrap(), "notification is synchronous");
    assert_eq!(
        subscriber.borrow_and_update().customer.customer_name,
        "Sara"
    );

    store.autosave().flush().await;
    assert_eq!(repo.save_count(), 1);
}

#[tokio::test(start_paused = true)]
async fn hydration_does_not_write_back_to_storage() {
    let repo = Arc::new(CountingRepository::new());
    let store = WizardStore::new(DraftStore::new(repo.clone()));

    store.dispatch(WizardAction::Hydrate(meaningful_draft("01001234567")));
    store.autosave().flush().await;

    assert_eq!(repo.save_count(), 0);
    assert_eq!(
        store.snapshot().customer.customer_phone,
        "01001234567"
    );
}

#[tokio::test(start_paused = true)]
async fn reset_all_clears_storage() {
    let repo = Arc::new(CountingRepository::new());
    let store = WizardStore::new(DraftStore::new(repo.clone()));

    store.dispatch(WizardAction::Hydrate(meaningful_draft("01001234567")));
    store.dispatch(WizardAction::ResetAll);
    store.autosave().flush().await;

    assert_eq!(store.snapshot(), WizardDraft::default());
    assert!(repo.load().await.unwrap().is_none());
    assert_eq!(repo.save_count(), 0);
}

#[tokio::test(start_paused = true)]
async fn reset_plan_and_billing_rewrites_storage_immediately() {
    let repo = Arc::new(CountingRepository::new());
    let store = WizardStore::new(DraftStore::with_policy(
        repo.clone(),
        Duration::from_secs(86_400),
        7,
    ));

    store.dispatch(WizardAction::Hydrate(meaningful_draft("01001234567")));
    store.dispatch(WizardAction::ResetPlanAndBilling);
    store.autosave().flush().await;

    assert_eq!(repo.save_count(), 1, "reset bypasses the day-long window");
    let record = repo.load().await.unwrap().expect("customer facet survives");
    assert_eq!(record.form_data.customer.customer_phone, "01001234567");
    assert_eq!(record.form_data.plan, Default::default());
}
