use std::collections::{BTreeMap, BTreeSet};

use chrono::NaiveDate;

use crate::{ErrorMap, WizardDraft, validate};

/// The five wizard steps, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, strum::Display)]
pub enum Step {
    Customer,
    Plan,
    Preview,
    Billing,
    Review,
}

impl Step {
    pub const ALL: [Step; 5] = [
        Step::Customer,
        Step::Plan,
        Step::Preview,
        Step::Billing,
        Step::Review,
    ];

    pub fn number(self) -> u8 {
        match self {
            Step::Customer => 1,
            Step::Plan => 2,
            Step::Preview => 3,
            Step::Billing => 4,
            Step::Review => 5,
        }
    }

    pub fn from_number(number: u8) -> Option<Step> {
        Step::ALL.into_iter().find(|step| step.number() == number)
    }

    fn next(self) -> Option<Step> {
        Step::from_number(self.number() + 1)
    }

    fn previous(self) -> Option<Step> {
        self.number().checked_sub(1).and_then(Step::from_number)
    }
}

impl Default for Step {
    fn default() -> Self {
        Step::Customer
    }
}

/// How a step renders in the stepper header, relative to the current step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepStatus {
    Current,
    Completed,
    Error,
    Upcoming,
}

/// Step navigation state machine.
///
/// Forward motion is gated by the validator; backward motion is always
/// free. A successful subscription creation moves the wizard into the
/// terminal summary display, after which no navigation is accepted.
#[derive(Debug, Default)]
pub struct WizardController {
    current: Step,
    errors: BTreeMap<Step, ErrorMap>,
    completed: BTreeSet<Step>,
    finished: bool,
}

impl WizardController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resume at a persisted step number. Steps already passed count as
    /// completed so jump targets behave as they did before the reload.
    pub fn starting_at(step_number: Option<u8>) -> Self {
        let current = step_number
            .and_then(Step::from_number)
            .unwrap_or(Step::Customer);

        let completed = Step::ALL
            .into_iter()
            .filter(|step| *step < current)
            .collect();

        Self {
            current,
            completed,
            ..Self::default()
        }
    }

    pub fn current(&self) -> Step {
        self.current
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    pub fn errors_for(&self, step: Step) -> Option<&ErrorMap> {
        self.errors.get(&step)
    }

    pub fn status(&self, step: Step) -> StepStatus {
        if step <= self.current && self.errors.contains_key(&step) {
            StepStatus::Error
        } else if step == self.current {
            StepStatus::Current
        } else if step < self.current {
            StepStatus::Completed
        } else {
            StepStatus::Upcoming
        }
    }

    /// Validate the current step and advance on success.
    ///
    /// The plan step is self-gating: it runs its own validation before it
    /// signals advance, so it is never re-validated here. On success all
    /// recorded errors are cleared; on failure the step's errors are
    /// recorded and the position does not move. From the review step a
    /// `true` return means the draft passed the final gate and is ready to
    /// submit; the position only changes through `finish`.
    pub fn next(&mut self, draft: &WizardDraft, today: NaiveDate) -> bool {
        if self.finished {
            return false;
        }

        let errors = if self.current == Step::Plan {
            ErrorMap::new()
        } else {
            validate(self.current, draft, today)
        };

        if !errors.is_empty() {
            self.errors.insert(self.current, errors);
            return false;
        }

        self.errors.clear();
        self.completed.insert(self.current);
        if let Some(next) = self.current.next() {
            self.current = next;
        }
        true
    }

    /// Move backward. With an earlier target, jump straight to it;
    /// otherwise step back by one. Backward motion never validates.
    pub fn previous(&mut self, target: Option<Step>) {
        if self.finished {
            return;
        }

        match target {
            Some(step) if step < self.current => self.current = step,
            _ => {
                if let Some(previous) = self.current.previous() {
                    self.current = previous;
                }
            }
        }
    }

    /// Jump to a step if it is at or behind the current one, or was
    /// completed earlier. Anything else is ignored.
    pub fn jump(&mut self, step: Step) {
        if self.finished {
            return;
        }

        if step <= self.current || self.completed.contains(&step) {
            self.current = step;
        }
    }

    /// Enter the terminal summary display after a successful subscription
    /// creation. One-way: no `jump`, `next`, or `previous` leaves it.
    pub fn finish(&mut self) {
        self.finished = true;
    }

    /// Put the wizard back on the billing step after a fatal submission
    /// failure, so the operator can retry from there.
    pub fn return_to_billing(&mut self) {
        if self.finished {
            return;
        }

        self.current = Step::Billing;
    }
}
