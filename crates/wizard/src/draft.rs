use std::collections::BTreeSet;

use chrono::NaiveDate;
use mealsub_catalog::{CouponDiscount, GeneratePlanRequest};
use mealsub_shared::{GeneratedPlan, SubscriptionType, UploadedFile};
use serde::{Deserialize, Deserializer, Serialize};

/// Who the subscription is for. Selecting a different customer owns the
/// rest of the draft: the reducer clears the plan and billing facets when
/// the id changes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CustomerFacet {
    pub customer_id: Option<i64>,
    pub customer_name: String,
    pub customer_phone: String,
    pub customer_email: String,
    #[serde(alias = "customerAdress")]
    pub customer_address: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PlanFacet {
    pub plan_category_id: Option<i64>,
    pub plan_id: Option<i64>,
    pub start_date: Option<NaiveDate>,
    pub duration: Option<u32>,
    #[serde(deserialize_with = "id_set")]
    pub delivery_days: BTreeSet<i64>,
    #[serde(deserialize_with = "id_set")]
    pub meal_types: BTreeSet<i64>,
    #[serde(deserialize_with = "id_set", alias = "dislikeCategorys")]
    pub dislike_categories: BTreeSet<i64>,
    pub subscription_type: Option<SubscriptionType>,
    pub branch_id: Option<i64>,
    pub generated_plan: Option<GeneratedPlan>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BillingFacet {
    pub is_sponsor: bool,
    pub manual_discount: f64,
    pub coupon_code: String,
    pub applied_coupon: Option<CouponDiscount>,
    pub payment_method_id: Option<i64>,
    pub payment_reference: String,
    pub uploaded_invoice_file: Option<UploadedFile>,
    pub notes: String,
}

/// The in-progress subscription. Single source of truth for all five wizard
/// steps; persisted flat (facets flattened) so the stored record matches
/// the draft shape the console has always written.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct WizardDraft {
    #[serde(flatten)]
    pub customer: CustomerFacet,
    #[serde(flatten)]
    pub plan: PlanFacet,
    #[serde(flatten)]
    pub billing: BillingFacet,
    pub terms_accepted: bool,
}

impl WizardDraft {
    /// A draft is only worth persisting once one of these fields is set;
    /// anything less is the untouched first render.
    pub fn has_meaningful_input(&self) -> bool {
        self.customer.customer_id.is_some()
            || !self.customer.customer_phone.trim().is_empty()
            || self.plan.plan_category_id.is_some()
            || self.plan.plan_id.is_some()
            || self.plan.start_date.is_some()
    }

    pub fn coupon_discount(&self) -> f64 {
        self.billing
            .applied_coupon
            .as_ref()
            .map(|coupon| coupon.amount)
            .unwrap_or(0.0)
    }

    /// Build the plan-generation request once the plan step is complete.
    /// Returns `None` while any required field is still missing.
    pub fn generate_request(&self) -> Option<GeneratePlanRequest> {
        Some(GeneratePlanRequest {
            customer_id: self.customer.customer_id?,
            plan_id: self.plan.plan_id?,
            start_date: self.plan.start_date?,
            duration: self.plan.duration?,
            delivery_days: self.plan.delivery_days.iter().copied().collect(),
            meal_types: self.plan.meal_types.iter().copied().collect(),
            dislike_categories: self.plan.dislike_categories.iter().copied().collect(),
        })
    }
}

/// Older persisted drafts stored selections as resolved objects rather than
/// bare ids. Hydration accepts both and collapses to ids, so the rest of
/// the engine only ever sees one shape.
fn id_set<'de, D: Deserializer<'de>>(deserializer: D) -> Result<BTreeSet<i64>, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum IdOrObject {
        Id(i64),
        Object { id: i64 },
    }

    let entries = Vec::<IdOrObject>::deserialize(deserializer)?;
    Ok(entries
        .into_iter()
        .map(|entry| match entry {
            IdOrObject::Id(id) => id,
            IdOrObject::Object { id } => id,
        })
        .collect())
}
