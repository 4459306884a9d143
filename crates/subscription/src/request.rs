use chrono::NaiveDate;
use mealsub_catalog::{CustomerInfo, DeliveryDay, DislikeCategory, MealTypeDescriptor};
use mealsub_shared::SubscriptionType;
use serde::Serialize;

/// Final creation payload sent to the subscription endpoint.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubscriptionRequest {
    pub customer: CustomerInfo,
    pub plan_id: i64,
    pub start_date: NaiveDate,
    pub duration: u32,
    pub subscription_type: SubscriptionType,
    pub branch_id: Option<i64>,
    pub meal_types: Vec<MealTypeDescriptor>,
    pub delivery_days: Vec<DeliveryDay>,
    pub dislike_categories: Vec<DislikeCategory>,
    pub notes: String,
    /// `None` for sponsored subscriptions.
    pub invoice: Option<InvoiceRequest>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceRequest {
    pub total: f64,
    pub discount: f64,
    pub net: f64,
    pub tax: f64,
    pub payment_discounts: Vec<PaymentDiscountEntry>,
    pub payment_methods: Vec<PaymentMethodEntry>,
    pub upload_request: UploadRequest,
}

/// Present only when a coupon is active; carries the discount id the
/// coupon service assigned on apply.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentDiscountEntry {
    pub discount_id: i64,
    pub amount: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentMethodEntry {
    pub payment_method_id: i64,
    pub reference: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadRequest {
    pub file_name: String,
    pub content_type: String,
    pub content: String,
}
