use serde::{Deserialize, Serialize};

/// Tax configuration carried by the selected plan's company settings.
///
/// `included_in_price` means the displayed plan price already contains tax,
/// so tax has to be backed out of it rather than added on top.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaxSettings {
    pub active: bool,
    pub included_in_price: bool,
    pub percent: f64,
    pub recompute_after_discount: bool,
}

/// Priced invoice preview for the billing step. Derived on every input
/// change and never persisted; only `total` reaches the creation request.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PricingBreakdown {
    pub plan_price: f64,
    pub bag_value: f64,
    pub discount_amount: f64,
    pub tax_amount: f64,
    pub net_amount: f64,
    pub total: f64,
}

/// Compute the invoice breakdown for a plan price under the given tax
/// settings and discounts.
///
/// Discounts never drive the net below zero; there is no representable
/// refund or negative-total state. A zero plan price short-circuits to an
/// all-zero breakdown so the billing step can render its "no plan" state.
pub fn price(
    plan_price: f64,
    tax: &TaxSettings,
    manual_discount: f64,
    coupon_discount: f64,
    bag_value: f64,
) -> PricingBreakdown {
    if plan_price == 0.0 {
        return PricingBreakdown::default();
    }

    let total_discount = manual_discount + coupon_discount;

    if tax.included_in_price {
        let mut tax_amount = plan_price * tax.percent / (1.0 + tax.percent);
        let mut net_amount = plan_price - tax_amount;
        net_amount = (net_amount - total_discount).max(0.0);
        if tax.recompute_after_discount {
            tax_amount = net_amount * tax.percent;
        }

        return PricingBreakdown {
            plan_price,
            bag_value,
            discount_amount: total_discount,
            tax_amount,
            net_amount,
            total: net_amount + tax_amount + bag_value,
        };
    }

    let net_amount = (plan_price - total_discount).max(0.0);
    let tax_amount = if tax.active {
        net_amount * tax.percent
    } else {
        0.0
    };

    PricingBreakdown {
        plan_price,
        bag_value,
        discount_amount: total_discount,
        tax_amount,
        net_amount,
        total: net_amount + tax_amount + bag_value,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-9,
            "expected {expected}, got {actual}"
        );
    }

    fn inclusive_tax() -> TaxSettings {
        TaxSettings {
            active: true,
            included_in_price: true,
            percent: 0.14,
            recompute_after_discount: false,
        }
    }

    #[test]
    fn zero_plan_price_yields_all_zero_breakdown() {
        let breakdown = price(0.0, &inclusive_tax(), 50.0, 20.0, 5.0);
        assert_eq!(breakdown, PricingBreakdown::default());
    }

    #[test]
    fn inclusive_tax_is_backed_out_of_plan_price() {
        let breakdown = price(114.0, &inclusive_tax(), 0.0, 0.0, 0.0);

        assert_close(breakdown.tax_amount, 14.0);
        assert_close(breakdown.net_amount, 100.0);
        assert_close(breakdown.total, 114.0);
    }

    #[test]
    fn exclusive_tax_is_added_on_discounted_net() {
        let tax = TaxSettings {
            active: true,
            included_in_price: false,
            percent: 0.14,
            recompute_after_discount: false,
        };
        let breakdown = price(100.0, &tax, 20.0, 0.0, 3.0);

        assert_close(breakdown.net_amount, 80.0);
        assert_close(breakdown.tax_amount, 11.2);
        assert_close(breakdown.total, 94.2);
    }

    #[test]
    fn inactive_exclusive_tax_adds_nothing() {
        let tax = TaxSettings {
            active: false,
            included_in_price: false,
            percent: 0.14,
            recompute_after_discount: false,
        };
        let breakdown = price(100.0, &tax, 0.0, 0.0, 0.0);

        assert_close(breakdown.tax_amount, 0.0);
        assert_close(breakdown.total, 100.0);
    }

    #[test]
    fn recompute_after_discount_rederives_tax_from_discounted_net() {
        let tax = TaxSettings {
            recompute_after_discount: true,
            ..inclusive_tax()
        };
        let breakdown = price(114.0, &tax, 50.0, 0.0, 0.0);

        // net backs out tax (100), then discount (50); tax re-derived on 50
        assert_close(breakdown.net_amount, 50.0);
        assert_close(breakdown.tax_amount, 7.0);
        assert_close(breakdown.total, 57.0);
    }

    #[test]
    fn discounts_never_drive_net_or_total_negative() {
        for plan_price in [1.0, 37.5, 114.0, 999.0] {
            let breakdown = price(plan_price, &inclusive_tax(), 5000.0, 400.0, 0.0);
            assert!(breakdown.net_amount >= 0.0);
            assert!(breakdown.total >= 0.0);
        }

        let exclusive = TaxSettings {
            active: true,
            included_in_price: false,
            percent: 0.14,
            recompute_after_discount: false,
        };
        let breakdown = price(30.0, &exclusive, 100.0, 0.0, 2.0);
        assert_close(breakdown.net_amount, 0.0);
        assert_close(breakdown.total, 2.0);
    }

    #[test]
    fn coupon_and_manual_discounts_accumulate() {
        let tax = TaxSettings {
            active: true,
            included_in_price: false,
            percent: 0.10,
            recompute_after_discount: false,
        };
        let breakdown = price(200.0, &tax, 15.0, 25.0, 0.0);

        assert_close(breakdown.discount_amount, 40.0);
        assert_close(breakdown.net_amount, 160.0);
        assert_close(breakdown.total, 176.0);
    }
}
