use crate::{DurationOption, PaymentType};

/// Payment methods offered when the payment-type lookup fails. The ids match
/// the backend's seeded rows so a submission built on the fallback still
/// references real records.
pub fn default_payment_types() -> Vec<PaymentType> {
    vec![
        PaymentType {
            id: 1,
            name: "Cash".to_string(),
        },
        PaymentType {
            id: 2,
            name: "Card".to_string(),
        },
    ]
}

/// Duration choices offered when the duration lookup fails.
pub fn default_durations() -> Vec<DurationOption> {
    [7, 14, 30, 90]
        .into_iter()
        .map(|days| DurationOption { days })
        .collect()
}
