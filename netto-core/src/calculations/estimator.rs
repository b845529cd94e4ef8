//! Net salary estimate.
//!
//! Stages, in order:
//!
//! 1. normalize the input (clamp amounts, derive the children count)
//! 2. monthly employee social contributions ([`SocialContributionWorksheet`])
//! 3. annual taxable income (zvE)
//! 4. income tax, solidarity surcharge, church tax ([`IncomeTaxWorksheet`])
//! 5. net aggregation
//!
//! The estimator never fails. Out-of-range input is clamped and every
//! intermediate value stays finite.
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use netto_core::{EstimateInput, RateTable, estimate};
//!
//! let input = EstimateInput {
//!     gross_monthly: dec!(3000),
//!     ..EstimateInput::default()
//! };
//! let result = estimate(&input, &RateTable::year_2026());
//!
//! assert_eq!(result.taxable_income_annual, dec!(26904));
//! assert_eq!(result.taxes.income_tax_annual, dec!(3360));
//! assert_eq!(result.net_annual, dec!(24810));
//! ```

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use tracing::debug;

use crate::calculations::income_tax::IncomeTaxWorksheet;
use crate::calculations::social::SocialContributionWorksheet;
use crate::models::{
    EstimateInput, EstimateResult, FederalState, HealthType, RateTable, TaxBreakdown, TaxClass,
};

const MONTHS: Decimal = Decimal::from_parts(12, 0, 0, false, 0);
const MAX_GROSS_MONTHLY: Decimal = Decimal::from_parts(1_000_000, 0, 0, false, 0);
const MAX_CHILD_ALLOWANCE: Decimal = Decimal::from_parts(10, 0, 0, false, 0);
const MAX_PKV_PREMIUM_MONTHLY: Decimal = Decimal::from_parts(10_000, 0, 0, false, 0);

/// Optional estimator behaviour.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EstimatorFeatures {
    /// Deduct the private health premium from net pay. When disabled the
    /// premium is ignored and echoed as zero.
    pub private_premium: bool,
}

impl Default for EstimatorFeatures {
    fn default() -> Self {
        Self {
            private_premium: true,
        }
    }
}

/// Input after clamping. Only the estimator sees this.
#[derive(Debug, Clone, PartialEq, Eq)]
struct NormalizedInput {
    gross_monthly: Decimal,
    tax_class: TaxClass,
    church_tax: bool,
    child_allowance: Decimal,
    children_count: u32,
    state: FederalState,
    health_type: HealthType,
    pkv_premium_monthly: Decimal,
}

impl NormalizedInput {
    fn new(
        input: &EstimateInput,
        features: EstimatorFeatures,
    ) -> Self {
        let gross_monthly = clamp(input.gross_monthly, Decimal::ZERO, MAX_GROSS_MONTHLY);
        let child_allowance = clamp(input.child_allowance, Decimal::ZERO, MAX_CHILD_ALLOWANCE);
        let children_count = if child_allowance > Decimal::ZERO {
            child_allowance.ceil().to_u32().unwrap_or(0)
        } else {
            0
        };
        let pkv_premium_monthly = if input.health_type.is_private() && features.private_premium {
            clamp(input.pkv_premium_monthly, Decimal::ZERO, MAX_PKV_PREMIUM_MONTHLY)
        } else {
            Decimal::ZERO
        };

        Self {
            gross_monthly,
            tax_class: input.tax_class,
            church_tax: input.church_tax,
            child_allowance,
            children_count,
            state: input.state,
            health_type: input.health_type,
            pkv_premium_monthly,
        }
    }
}

fn clamp(
    value: Decimal,
    min: Decimal,
    max: Decimal,
) -> Decimal {
    value.max(min).min(max)
}

/// Estimator bound to one rate table.
#[derive(Debug, Clone)]
pub struct Estimator<'a> {
    rates: &'a RateTable,
    features: EstimatorFeatures,
}

impl<'a> Estimator<'a> {
    pub fn new(rates: &'a RateTable) -> Self {
        Self {
            rates,
            features: EstimatorFeatures::default(),
        }
    }

    pub fn with_features(
        rates: &'a RateTable,
        features: EstimatorFeatures,
    ) -> Self {
        Self { rates, features }
    }

    pub fn features(&self) -> EstimatorFeatures {
        self.features
    }

    /// Runs all stages on one input.
    pub fn calculate(
        &self,
        input: &EstimateInput,
    ) -> EstimateResult {
        let n = NormalizedInput::new(input, self.features);
        let gross_annual = n.gross_monthly * MONTHS;

        let social = SocialContributionWorksheet::new(self.rates).calculate(
            n.gross_monthly,
            n.health_type,
            n.children_count,
            self.features.private_premium,
        );
        let social_annual = social.total * MONTHS;

        let taxable_income_annual = self.taxable_income(&n, gross_annual, social_annual);

        let tax = IncomeTaxWorksheet::new(self.rates);
        let income_tax_annual = tax.income_tax(taxable_income_annual, n.tax_class);
        let soli_annual = tax.solidarity_surcharge(income_tax_annual, n.tax_class.is_splitting());
        let church_annual = if n.church_tax {
            tax.church_tax(income_tax_annual, n.state)
        } else {
            Decimal::ZERO
        };
        let taxes = TaxBreakdown {
            income_tax_annual,
            soli_annual,
            church_annual,
            total_annual: income_tax_annual + soli_annual + church_annual,
        };

        let pkv_annual = n.pkv_premium_monthly * MONTHS;
        let net_annual = gross_annual - social_annual - taxes.total_annual - pkv_annual;
        let net_monthly = net_annual / MONTHS;

        debug!(
            %gross_annual,
            %taxable_income_annual,
            taxes = %taxes.total_annual,
            %net_annual,
            "estimate"
        );

        EstimateResult {
            gross_monthly: n.gross_monthly,
            gross_annual,
            taxable_income_annual,
            social,
            taxes,
            net_monthly,
            net_annual,
            pkv_premium_monthly: n.pkv_premium_monthly,
        }
    }

    /// Annual zvE: gross minus social, lump sums, child allowances and the
    /// class II single parent relief. Floored at zero.
    fn taxable_income(
        &self,
        n: &NormalizedInput,
        gross_annual: Decimal,
        social_annual: Decimal,
    ) -> Decimal {
        let mut zve = gross_annual
            - social_annual
            - self.rates.employee_lump_sum
            - self.rates.special_expenses_lump_sum
            - n.child_allowance * self.rates.child_allowance_per_child;

        if n.tax_class == TaxClass::Two {
            let additional = Decimal::from(n.children_count.saturating_sub(1));
            zve -= self.rates.single_parent_relief_first_child
                + additional * self.rates.single_parent_relief_additional_child;
        }

        zve.max(Decimal::ZERO)
    }
}

/// Estimates with default features.
pub fn estimate(
    input: &EstimateInput,
    rates: &RateTable,
) -> EstimateResult {
    Estimator::new(rates).calculate(input)
}
