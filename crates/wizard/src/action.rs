use std::collections::BTreeSet;

use chrono::NaiveDate;
use mealsub_catalog::{CouponDiscount, Customer};
use mealsub_shared::{GeneratedPlan, SubscriptionType, UploadedFile};

use crate::{BillingFacet, PlanFacet, WizardDraft};

/// Every mutation of the draft goes through one of these. Call sites cannot
/// bypass the invariants the reducer owns (customer change clears dependent
/// facets, branch id only lives under branch subscriptions, sponsor zeroes
/// billing).
#[derive(Debug, Clone)]
pub enum WizardAction {
    Hydrate(WizardDraft),
    SelectCustomer(Customer),
    EditCustomerDetails {
        name: String,
        phone: String,
        email: String,
        address: String,
    },
    SetPlanCategory(Option<i64>),
    SetPlan(Option<i64>),
    SetStartDate(Option<NaiveDate>),
    SetDuration(Option<u32>),
    SetDeliveryDays(BTreeSet<i64>),
    SetMealTypes(BTreeSet<i64>),
    SetDislikeCategories(BTreeSet<i64>),
    SetSubscriptionType(Option<SubscriptionType>),
    SetBranch(Option<i64>),
    SetGeneratedPlan(Option<GeneratedPlan>),
    SetSponsor(bool),
    SetManualDiscount(f64),
    ApplyCoupon {
        code: String,
        discount: CouponDiscount,
    },
    ClearCoupon,
    SetPaymentMethod(Option<i64>),
    SetPaymentReference(String),
    AttachInvoiceFile(Option<UploadedFile>),
    SetNotes(String),
    SetTermsAccepted(bool),
    ResetPlanAndBilling,
    ResetAll,
}

/// Apply one action to the draft. Each arm applies fully or not at all;
/// there is no partially-applied state observable from outside.
pub fn reduce(draft: &mut WizardDraft, action: WizardAction) {
    match action {
        WizardAction::Hydrate(next) => *draft = next,

        WizardAction::SelectCustomer(customer) => {
            if draft.customer.customer_id != Some(customer.id) {
                // The plan and billing facets belong to the previously
                // selected customer; they are cleared together, never
                // one without the other.
                draft.plan = PlanFacet::default();
                draft.billing = BillingFacet::default();
                draft.terms_accepted = false;
            }
            draft.customer.customer_id = Some(customer.id);
            draft.customer.customer_name = customer.name;
            draft.customer.customer_phone = customer.phone;
            draft.customer.customer_email = customer.email;
            draft.customer.customer_address = customer.address;
        }

        WizardAction::EditCustomerDetails {
            name,
            phone,
            email,
            address,
        } => {
            draft.customer.customer_name = name;
            draft.customer.customer_phone = phone;
            draft.customer.customer_email = email;
            draft.customer.customer_address = address;
        }

        WizardAction::SetPlanCategory(category_id) => {
            if draft.plan.plan_category_id != category_id {
                draft.plan.plan_id = None;
                draft.plan.generated_plan = None;
            }
            draft.plan.plan_category_id = category_id;
        }

        WizardAction::SetPlan(plan_id) => {
            if draft.plan.plan_id != plan_id {
                draft.plan.generated_plan = None;
            }
            draft.plan.plan_id = plan_id;
        }

        WizardAction::SetStartDate(start_date) => draft.plan.start_date = start_date,
        WizardAction::SetDuration(duration) => draft.plan.duration = duration,
        WizardAction::SetDeliveryDays(days) => draft.plan.delivery_days = days,
        WizardAction::SetMealTypes(meal_types) => draft.plan.meal_types = meal_types,
        WizardAction::SetDislikeCategories(categories) => {
            draft.plan.dislike_categories = categories
        }

        WizardAction::SetSubscriptionType(subscription_type) => {
            draft.plan.subscription_type = subscription_type;
            if subscription_type != Some(SubscriptionType::Branch) {
                draft.plan.branch_id = None;
            }
        }

        WizardAction::SetBranch(branch_id) => draft.plan.branch_id = branch_id,
        WizardAction::SetGeneratedPlan(plan) => draft.plan.generated_plan = plan,

        WizardAction::SetSponsor(is_sponsor) => {
            if is_sponsor {
                // Sponsored subscriptions carry no billing input at all.
                draft.billing = BillingFacet {
                    is_sponsor: true,
                    ..BillingFacet::default()
                };
            } else {
                draft.billing.is_sponsor = false;
            }
        }

        WizardAction::SetManualDiscount(amount) => {
            if !draft.billing.is_sponsor {
                draft.billing.manual_discount = amount.max(0.0);
            }
        }

        WizardAction::ApplyCoupon { code, discount } => {
            if !draft.billing.is_sponsor {
                draft.billing.coupon_code = code;
                draft.billing.applied_coupon = Some(discount);
            }
        }

        WizardAction::ClearCoupon => {
            draft.billing.coupon_code = String::new();
            draft.billing.applied_coupon = None;
        }

        WizardAction::SetPaymentMethod(method_id) => {
            if !draft.billing.is_sponsor {
                draft.billing.payment_method_id = method_id;
            }
        }

        WizardAction::SetPaymentReference(reference) => {
            if !draft.billing.is_sponsor {
                draft.billing.payment_reference = reference;
            }
        }

        WizardAction::AttachInvoiceFile(file) => {
            if !draft.billing.is_sponsor {
                draft.billing.uploaded_invoice_file = file;
            }
        }

        WizardAction::SetNotes(notes) => draft.billing.notes = notes,
        WizardAction::SetTermsAccepted(accepted) => draft.terms_accepted = accepted,

        WizardAction::ResetPlanAndBilling => {
            draft.plan = PlanFacet::default();
            draft.billing = BillingFacet::default();
            draft.terms_accepted = false;
        }

        WizardAction::ResetAll => *draft = WizardDraft::default(),
    }
}
