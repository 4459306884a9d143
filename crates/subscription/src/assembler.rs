use futures::join;
use mealsub_billing::PricingBreakdown;
use mealsub_catalog::{
    CustomerDirectory, DeliveryDay, DislikeCategory, MealTypeDescriptor, PlanCatalog,
};
use mealsub_shared::{Error, Result, UploadedFile};
use mealsub_wizard::WizardDraft;

use crate::{
    InvoiceRequest, PaymentDiscountEntry, PaymentMethodEntry, SubscriptionRequest, UploadRequest,
};

/// Build the final creation payload from the reviewed draft.
///
/// The draft holds bare ids for meal types, delivery days and dislike
/// categories; they are resolved back into full descriptors against the
/// freshly fetched catalogs. A missing catalog entry becomes a placeholder
/// descriptor rather than a failure; the gap is logged and the submission
/// proceeds. The one fatal path is the customer-info lookup: without the
/// routing ids there is nothing valid to submit, so assembly aborts and the
/// caller surfaces the specific message.
pub async fn assemble(
    draft: &WizardDraft,
    breakdown: &PricingBreakdown,
    customers: &dyn CustomerDirectory,
    catalog: &dyn PlanCatalog,
) -> Result<SubscriptionRequest> {
    let Some(customer_id) = draft.customer.customer_id else {
        mealsub_shared::bail!("cannot assemble a submission without a selected customer");
    };
    let Some(plan_id) = draft.plan.plan_id else {
        mealsub_shared::bail!("cannot assemble a submission without a selected plan");
    };
    let Some(start_date) = draft.plan.start_date else {
        mealsub_shared::bail!("cannot assemble a submission without a start date");
    };
    let Some(duration) = draft.plan.duration else {
        mealsub_shared::bail!("cannot assemble a submission without a duration");
    };
    let Some(subscription_type) = draft.plan.subscription_type else {
        mealsub_shared::bail!("cannot assemble a submission without a subscription type");
    };

    let customer = customers.info(customer_id).await.map_err(|err| {
        tracing::error!(customer_id, error = %err, "customer-info lookup failed, aborting submission");
        Error::CustomerInfoUnavailable
    })?;

    // The three catalogs are independent; fetch them together. A failed
    // catalog degrades to an empty list, which resolves every id of that
    // kind to a placeholder below.
    let (meal_types, delivery_days, dislike_categories) = join!(
        catalog.meal_types(plan_id),
        catalog.delivery_days(),
        catalog.dislike_categories(),
    );
    let meal_types = ok_or_empty(meal_types, "meal types");
    let delivery_days = ok_or_empty(delivery_days, "delivery days");
    let dislike_categories = ok_or_empty(dislike_categories, "dislike categories");

    let meal_types = resolve(&draft.plan.meal_types, &meal_types, |descriptor| descriptor.id, |id| {
        MealTypeDescriptor {
            id,
            name: format!("Meal type {id}"),
        }
    });
    let delivery_days = resolve(&draft.plan.delivery_days, &delivery_days, |day| day.id, |id| {
        DeliveryDay {
            id,
            name: format!("Day {id}"),
        }
    });
    let dislike_categories = resolve(
        &draft.plan.dislike_categories,
        &dislike_categories,
        |category| category.id,
        |id| DislikeCategory {
            id,
            name: format!("Category {id}"),
        },
    );

    Ok(SubscriptionRequest {
        customer,
        plan_id,
        start_date,
        duration,
        subscription_type,
        branch_id: draft.plan.branch_id,
        meal_types,
        delivery_days,
        dislike_categories,
        notes: draft.billing.notes.clone(),
        invoice: build_invoice(draft, breakdown),
    })
}

fn ok_or_empty<T>(result: Result<Vec<T>>, what: &str) -> Vec<T> {
    result.unwrap_or_else(|err| {
        tracing::warn!(error = %err, "{what} catalog unavailable during assembly");
        Vec::new()
    })
}

fn resolve<T: Clone>(
    selected: &std::collections::BTreeSet<i64>,
    catalog: &[T],
    id_of: fn(&T) -> i64,
    placeholder: fn(i64) -> T,
) -> Vec<T> {
    selected
        .iter()
        .map(|&id| {
            catalog
                .iter()
                .find(|entry| id_of(entry) == id)
                .cloned()
                .unwrap_or_else(|| {
                    tracing::warn!(id, "selected id missing from catalog, using placeholder");
                    placeholder(id)
                })
        })
        .collect()
}

fn build_invoice(draft: &WizardDraft, breakdown: &PricingBreakdown) -> Option<InvoiceRequest> {
    if draft.billing.is_sponsor {
        return None;
    }

    let payment_discounts = draft
        .billing
        .applied_coupon
        .as_ref()
        .map(|coupon| {
            vec![PaymentDiscountEntry {
                discount_id: coupon.discount_id,
                amount: coupon.amount,
            }]
        })
        .unwrap_or_default();

    let payment_methods = draft
        .billing
        .payment_method_id
        .map(|payment_method_id| {
            vec![PaymentMethodEntry {
                payment_method_id,
                reference: draft.billing.payment_reference.clone(),
            }]
        })
        .unwrap_or_default();

    Some(InvoiceRequest {
        total: breakdown.total,
        discount: breakdown.discount_amount,
        net: breakdown.net_amount,
        tax: breakdown.tax_amount,
        payment_discounts,
        payment_methods,
        upload_request: build_upload(draft.billing.uploaded_invoice_file.as_ref()),
    })
}

/// Encode the uploaded invoice file. Falls back to empty strings when no
/// file is attached; never fails.
fn build_upload(file: Option<&UploadedFile>) -> UploadRequest {
    match file {
        Some(file) => UploadRequest {
            file_name: file.file_name.clone(),
            content_type: mime_guess::from_path(&file.file_name)
                .first_or_octet_stream()
                .to_string(),
            content: file.encoded(),
        },
        None => UploadRequest::default(),
    }
}
