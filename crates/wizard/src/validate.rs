use std::collections::BTreeMap;
use std::sync::OnceLock;

use chrono::NaiveDate;
use mealsub_shared::SubscriptionType;
use regex::Regex;

use crate::{Step, WizardDraft};

/// Field name → inline message. Empty means the step passes. Validation
/// failures are values, never errors; only navigation reacts to them.
pub type ErrorMap = BTreeMap<String, String>;

/// Run the rule set for one step against the draft. `today` is passed in so
/// the date rule stays pure and testable.
pub fn validate(step: Step, draft: &WizardDraft, today: NaiveDate) -> ErrorMap {
    match step {
        Step::Customer => validate_customer(draft),
        Step::Plan => validate_plan(draft, today),
        // The preview step is read-only.
        Step::Preview => ErrorMap::new(),
        Step::Billing => validate_billing(draft),
        Step::Review => validate_review(draft),
    }
}

fn validate_customer(draft: &WizardDraft) -> ErrorMap {
    let mut errors = ErrorMap::new();
    let customer = &draft.customer;
    let phone = customer.customer_phone.trim();

    if customer.customer_id.is_none() && phone.is_empty() {
        errors.insert(
            "customer".to_string(),
            "Select a customer or enter a phone number".to_string(),
        );
    }

    if !phone.is_empty() && !phone_has_reachable_segment(phone) {
        errors.insert(
            "customerPhone".to_string(),
            "Phone number needs a segment of 10 to 15 digits".to_string(),
        );
    }

    if customer.customer_name.trim().is_empty() {
        errors.insert(
            "customerName".to_string(),
            "Customer name is required".to_string(),
        );
    }

    errors
}

/// A phone field may hold several numbers separated by semicolons or
/// dashes; the customer is reachable if any one segment carries 10 to 15
/// digits.
pub fn phone_has_reachable_segment(phone: &str) -> bool {
    static SEPARATOR: OnceLock<Regex> = OnceLock::new();
    let separator = SEPARATOR.get_or_init(|| Regex::new(r"[;-]").unwrap());

    separator.split(phone).any(|segment| {
        let digits = segment.chars().filter(char::is_ascii_digit).count();
        (10..=15).contains(&digits)
    })
}

fn validate_plan(draft: &WizardDraft, today: NaiveDate) -> ErrorMap {
    let mut errors = ErrorMap::new();
    let plan = &draft.plan;

    if plan.plan_category_id.is_none() {
        errors.insert(
            "planCategoryId".to_string(),
            "Plan category is required".to_string(),
        );
    }

    if plan.plan_id.is_none() {
        errors.insert("planId".to_string(), "Plan is required".to_string());
        return errors;
    }

    match plan.start_date {
        None => {
            errors.insert(
                "startDate".to_string(),
                "Start date is required".to_string(),
            );
        }
        Some(start_date) if start_date < today => {
            errors.insert(
                "startDate".to_string(),
                "Start date cannot be in the past".to_string(),
            );
        }
        Some(_) => {}
    }

    match plan.duration {
        None => {
            errors.insert("duration".to_string(), "Duration is required".to_string());
        }
        Some(duration) if !(1..=365).contains(&duration) => {
            errors.insert(
                "duration".to_string(),
                "Duration must be between 1 and 365 days".to_string(),
            );
        }
        Some(_) => {}
    }

    if plan.meal_types.is_empty() {
        errors.insert(
            "mealTypes".to_string(),
            "Select at least one meal type".to_string(),
        );
    }

    if plan.delivery_days.is_empty() {
        errors.insert(
            "deliveryDays".to_string(),
            "Select at least one delivery day".to_string(),
        );
    }

    match plan.subscription_type {
        None => {
            errors.insert(
                "subscriptionType".to_string(),
                "Subscription type is required".to_string(),
            );
        }
        Some(SubscriptionType::Branch) if plan.branch_id.is_none() => {
            errors.insert(
                "branchId".to_string(),
                "Branch is required for branch subscriptions".to_string(),
            );
        }
        Some(_) => {}
    }

    errors
}

fn validate_billing(draft: &WizardDraft) -> ErrorMap {
    let mut errors = ErrorMap::new();

    // Sponsored subscriptions skip the billing step entirely.
    if draft.billing.is_sponsor {
        return errors;
    }

    if draft.billing.payment_method_id.is_none() {
        errors.insert(
            "paymentMethodId".to_string(),
            "Payment method is required".to_string(),
        );
    }

    if draft.billing.uploaded_invoice_file.is_none() {
        errors.insert(
            "invoiceFile".to_string(),
            "An invoice file must be uploaded".to_string(),
        );
    }

    errors
}

fn validate_review(draft: &WizardDraft) -> ErrorMap {
    let mut errors = validate_customer(draft);
    errors.extend(validate_billing(draft));

    if !draft.terms_accepted {
        errors.insert(
            "termsAccepted".to_string(),
            "Terms must be accepted before submitting".to_string(),
        );
    }

    errors
}
