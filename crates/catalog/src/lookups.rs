use async_trait::async_trait;
use mealsub_shared::{GeneratedPlan, Result};

use crate::{
    ApplyCouponInput, Branch, CouponDiscount, CreateCustomerInput, Customer, CustomerInfo,
    DeliveryDay, DislikeCategory, DurationOption, GeneratePlanRequest, MealTypeDescriptor,
    PaymentType, Plan, PlanCategory,
};

/// Customer search/create/info collaborator.
///
/// `info` failures are fatal to submission assembly; everything else
/// degrades (§ error handling): a failed search renders an empty result
/// list, a failed create surfaces inline on the customer step.
#[async_trait]
pub trait CustomerDirectory: Send + Sync {
    async fn search(&self, query: &str) -> Result<Vec<Customer>>;
    async fn create(&self, input: CreateCustomerInput) -> Result<Customer>;
    async fn info(&self, customer_id: i64) -> Result<CustomerInfo>;
}

/// Read-only plan catalog collaborator backing the plan step's selects.
#[async_trait]
pub trait PlanCatalog: Send + Sync {
    async fn categories(&self) -> Result<Vec<PlanCategory>>;
    async fn plans(&self, category_id: i64) -> Result<Vec<Plan>>;
    async fn durations(&self) -> Result<Vec<DurationOption>>;
    async fn meal_types(&self, plan_id: i64) -> Result<Vec<MealTypeDescriptor>>;
    async fn delivery_days(&self) -> Result<Vec<DeliveryDay>>;
    async fn dislike_categories(&self) -> Result<Vec<DislikeCategory>>;
    async fn branches(&self) -> Result<Vec<Branch>>;
}

/// Coupon application. An invalid code comes back as `Error::Coupon` with
/// the inline message for the coupon field; transport failures use the
/// generic error variants.
#[async_trait]
pub trait CouponService: Send + Sync {
    async fn apply(&self, input: ApplyCouponInput) -> Result<CouponDiscount>;
}

#[async_trait]
pub trait PaymentTypeLookup: Send + Sync {
    async fn payment_types(&self) -> Result<Vec<PaymentType>>;
}

/// Plan-generation collaborator producing the scheduled-meal list shown in
/// the preview step.
#[async_trait]
pub trait PlanGenerator: Send + Sync {
    async fn generate(&self, request: &GeneratePlanRequest) -> Result<GeneratedPlan>;
}
