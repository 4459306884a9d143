use futures::join;
use mealsub_shared::Result;

use crate::{
    Branch, DeliveryDay, DislikeCategory, DurationOption, PaymentType, PaymentTypeLookup,
    PlanCatalog, PlanCategory, default_durations, default_payment_types,
};

/// Everything the plan and billing steps need before first render.
#[derive(Debug, Default)]
pub struct CatalogBundle {
    pub categories: Vec<PlanCategory>,
    pub durations: Vec<DurationOption>,
    pub delivery_days: Vec<DeliveryDay>,
    pub dislike_categories: Vec<DislikeCategory>,
    pub branches: Vec<Branch>,
    pub payment_types: Vec<PaymentType>,
}

/// Fetch the independent catalogs concurrently and join.
///
/// Dependent lookups (plans for a category, meal types for a plan) are not
/// part of the bundle; they run sequentially behind `SequencedCatalog` once
/// the user picks. Every bundle member degrades on failure (hardcoded
/// fallback where one exists, empty list otherwise) so a dead catalog
/// endpoint never blocks the wizard from opening.
pub async fn load_catalog_bundle(
    catalog: &dyn PlanCatalog,
    payments: &dyn PaymentTypeLookup,
) -> CatalogBundle {
    let (categories, durations, delivery_days, dislike_categories, branches, payment_types) = join!(
        catalog.categories(),
        catalog.durations(),
        catalog.delivery_days(),
        catalog.dislike_categories(),
        catalog.branches(),
        payments.payment_types(),
    );

    CatalogBundle {
        categories: or_empty(categories, "plan categories"),
        durations: or_fallback(durations, "durations", default_durations),
        delivery_days: or_empty(delivery_days, "delivery days"),
        dislike_categories: or_empty(dislike_categories, "dislike categories"),
        branches: or_empty(branches, "branches"),
        payment_types: or_fallback(payment_types, "payment types", default_payment_types),
    }
}

fn or_empty<T>(result: Result<Vec<T>>, what: &str) -> Vec<T> {
    match result {
        Ok(items) => items,
        Err(err) => {
            tracing::warn!(error = %err, "{what} lookup failed, degrading to empty list");
            Vec::new()
        }
    }
}

fn or_fallback<T>(result: Result<Vec<T>>, what: &str, fallback: fn() -> Vec<T>) -> Vec<T> {
    match result {
        Ok(items) => items,
        Err(err) => {
            tracing::warn!(error = %err, "{what} lookup failed, using fallback set");
            fallback()
        }
    }
}
