use std::sync::atomic::{AtomicU64, Ordering};

use mealsub_shared::Result;

use crate::{MealTypeDescriptor, Plan, PlanCatalog};

/// Monotonic sequence counter for one lookup kind.
///
/// `begin` stamps an outgoing request; `is_current` checks the stamp when
/// the response lands. A response whose stamp is no longer current belongs
/// to an input the user has already changed away from and must be dropped.
#[derive(Debug, Default)]
pub struct RequestSequence(AtomicU64);

impl RequestSequence {
    pub fn begin(&self) -> u64 {
        self.0.fetch_add(1, Ordering::SeqCst) + 1
    }

    pub fn is_current(&self, token: u64) -> bool {
        self.0.load(Ordering::SeqCst) == token
    }
}

/// Plan catalog wrapper that drops stale responses for the two dependent
/// lookups (plan list after a category change, meal types after a plan
/// change). In-flight requests are never cancelled; their results are
/// discarded on arrival instead.
pub struct SequencedCatalog<C> {
    inner: C,
    plans_seq: RequestSequence,
    meal_types_seq: RequestSequence,
}

impl<C: PlanCatalog> SequencedCatalog<C> {
    pub fn new(inner: C) -> Self {
        Self {
            inner,
            plans_seq: RequestSequence::default(),
            meal_types_seq: RequestSequence::default(),
        }
    }

    pub fn inner(&self) -> &C {
        &self.inner
    }

    /// Fetch the plan list for a category. Returns `None` when a newer
    /// request was issued while this one was in flight; a lookup error
    /// degrades to an empty list.
    pub async fn plans(&self, category_id: i64) -> Option<Vec<Plan>> {
        let token = self.plans_seq.begin();
        let result = self.inner.plans(category_id).await;

        if !self.plans_seq.is_current(token) {
            tracing::warn!(category_id, "discarding stale plan-list response");
            return None;
        }

        Some(degraded(result, "plan list"))
    }

    /// Fetch meal types for a plan, with the same staleness handling.
    pub async fn meal_types(&self, plan_id: i64) -> Option<Vec<MealTypeDescriptor>> {
        let token = self.meal_types_seq.begin();
        let result = self.inner.meal_types(plan_id).await;

        if !self.meal_types_seq.is_current(token) {
            tracing::warn!(plan_id, "discarding stale meal-type response");
            return None;
        }

        Some(degraded(result, "meal types"))
    }
}

fn degraded<T>(result: Result<Vec<T>>, what: &str) -> Vec<T> {
    match result {
        Ok(items) => items,
        Err(err) => {
            tracing::warn!(error = %err, "{what} lookup failed, degrading to empty list");
            Vec::new()
        }
    }
}
