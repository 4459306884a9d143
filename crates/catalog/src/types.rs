use chrono::NaiveDate;
use mealsub_billing::TaxSettings;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Customer record as returned by search. The backend has shipped several
/// spellings of the address field over time; the aliases collapse them here
/// so nothing past this boundary ever sees the variants.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    pub id: i64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub email: String,
    #[serde(default, alias = "adress", alias = "customerAdress")]
    pub address: String,
}

/// Routing ids attached to a customer, required by the creation payload.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerInfo {
    pub customer_id: i64,
    #[serde(default)]
    pub driver_id: Option<i64>,
    #[serde(default)]
    pub branch_id: Option<i64>,
    #[serde(default, alias = "adressId")]
    pub address_id: Option<i64>,
}

#[derive(Debug, Validate)]
pub struct CreateCustomerInput {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    #[validate(length(min = 5, max = 50))]
    pub phone: String,
    #[validate(email)]
    pub email: Option<String>,
    pub address: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanCategory {
    pub id: i64,
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Plan {
    pub id: i64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub price: f64,
    #[serde(default)]
    pub bag_value: f64,
    #[serde(default)]
    pub tax: TaxSettings,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DurationOption {
    pub days: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MealTypeDescriptor {
    pub id: i64,
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeliveryDay {
    pub id: i64,
    #[serde(default, alias = "dayName")]
    pub name: String,
}

/// Dislike categories arrive under a misspelled key from older backend
/// builds; the alias keeps both decodable.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DislikeCategory {
    pub id: i64,
    #[serde(default, alias = "categorieName")]
    pub name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Branch {
    pub id: i64,
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentType {
    pub id: i64,
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Validate)]
pub struct ApplyCouponInput {
    #[validate(length(min = 1, max = 50))]
    pub code: String,
    pub plan_id: i64,
}

/// A successfully applied coupon; `discount_id` is assigned server-side and
/// carried through to the invoice's payment discounts.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CouponDiscount {
    pub discount_id: i64,
    pub amount: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratePlanRequest {
    pub customer_id: i64,
    pub plan_id: i64,
    pub start_date: NaiveDate,
    pub duration: u32,
    pub delivery_days: Vec<i64>,
    pub meal_types: Vec<i64>,
    pub dislike_categories: Vec<i64>,
}
