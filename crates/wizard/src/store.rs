use std::sync::Mutex;

use tokio::sync::watch;

use crate::{DraftStore, WizardAction, WizardDraft, reduce};

/// Canonical holder of the draft.
///
/// All mutation flows through `dispatch`; every dispatch notifies
/// subscribers synchronously and queues an autosave. Persistence reacts to
/// the action kind: resets bypass or cancel the debounce window, ordinary
/// edits coalesce into one debounced write.
pub struct WizardStore {
    draft: Mutex<WizardDraft>,
    subscribers: watch::Sender<WizardDraft>,
    autosave: DraftStore,
    persisted_step: Mutex<Option<u8>>,
}

impl WizardStore {
    pub fn new(autosave: DraftStore) -> Self {
        let (subscribers, _) = watch::channel(WizardDraft::default());

        Self {
            draft: Mutex::new(WizardDraft::default()),
            subscribers,
            autosave,
            persisted_step: Mutex::new(None),
        }
    }

    /// Dispatch one action: reduce, notify, persist. Atomic with respect to
    /// a single caller; subscribers never observe a half-applied action.
    pub fn dispatch(&self, action: WizardAction) {
        let persistence = match &action {
            WizardAction::Hydrate(_) => Persistence::None,
            WizardAction::ResetAll => Persistence::Clear,
            WizardAction::ResetPlanAndBilling => Persistence::Immediate,
            _ => Persistence::Debounced,
        };

        let snapshot = {
            let mut draft = lock(&self.draft);
            reduce(&mut draft, action);
            draft.clone()
        };

        self.subscribers.send_replace(snapshot.clone());

        let step = *lock(&self.persisted_step);
        match persistence {
            Persistence::None => {}
            Persistence::Clear => self.autosave.clear_now(),
            Persistence::Immediate => self.autosave.save_now(snapshot, step),
            Persistence::Debounced => self.autosave.schedule_save(snapshot, step),
        }
    }

    pub fn snapshot(&self) -> WizardDraft {
        lock(&self.draft).clone()
    }

    /// Watch the draft. The receiver sees every dispatched change.
    pub fn subscribe(&self) -> watch::Receiver<WizardDraft> {
        self.subscribers.subscribe()
    }

    /// Record the step number to stamp on subsequent autosaves, so a reload
    /// can resume where the operator left off.
    pub fn set_persisted_step(&self, step_number: u8) {
        *lock(&self.persisted_step) = Some(step_number);
    }

    pub fn autosave(&self) -> &DraftStore {
        &self.autosave
    }
}

enum Persistence {
    None,
    Clear,
    Immediate,
    Debounced,
}

fn lock<T>(mutex: &Mutex<T>) -> std::sync::MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}
