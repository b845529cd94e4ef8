use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Upper bound for every amount in a [`RateTable`]. Keeps each product the
/// estimator forms far inside the range of [`Decimal`].
const MAX_AMOUNT: Decimal = Decimal::from_parts(100_000_000, 0, 0, false, 0);

/// Upper bound for the class V/VI multipliers.
const MAX_MULTIPLIER: Decimal = Decimal::from_parts(10, 0, 0, false, 0);

/// Errors reported by [`RateTable::validate`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RateTableError {
    /// A contribution ceiling must be positive.
    #[error("contribution ceiling '{name}' must be positive, got {value}")]
    InvalidCeiling { name: &'static str, value: Decimal },

    /// A rate must lie in [0, 1].
    #[error("rate '{name}' must be between 0 and 1, got {value}")]
    InvalidRate { name: &'static str, value: Decimal },

    /// An allowance or deduction must be non-negative.
    #[error("amount '{name}' must be non-negative, got {value}")]
    NegativeAmount { name: &'static str, value: Decimal },

    /// Amounts, ceilings and tariff coefficients are capped in magnitude.
    #[error("amount '{name}' must not exceed {max} in magnitude, got {value}", max = MAX_AMOUNT)]
    AmountTooLarge { name: &'static str, value: Decimal },

    /// Class V/VI multipliers may not reduce the basic tariff.
    #[error(
        "tax class multiplier '{name}' must be between 1 and {max}, got {value}",
        max = MAX_MULTIPLIER
    )]
    InvalidMultiplier { name: &'static str, value: Decimal },

    /// Tariff zone limits must be strictly increasing.
    #[error("income tax zone limits must be strictly increasing")]
    UnorderedTariffZones,
}

/// Coefficients of the five-zone German income tax tariff (Grundtarif).
///
/// | Zone | Range of `x` | Tax |
/// |------|--------------|-----|
/// | 1 | `x ≤ basic_allowance` | 0 |
/// | 2 | `≤ zone2_limit` | `(zone2_quadratic·y + zone2_linear)·y`, `y = (x − basic_allowance)/10000` |
/// | 3 | `≤ zone3_limit` | `(zone3_quadratic·z + zone3_linear)·z + zone3_constant`, `z = (x − zone2_limit)/10000` |
/// | 4 | `≤ zone4_limit` | `zone4_rate·x − zone4_deduction` |
/// | 5 | above | `zone5_rate·x − zone5_deduction` |
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IncomeTaxTariff {
    pub basic_allowance: Decimal,
    pub zone2_limit: Decimal,
    pub zone2_quadratic: Decimal,
    pub zone2_linear: Decimal,
    pub zone3_limit: Decimal,
    pub zone3_quadratic: Decimal,
    pub zone3_linear: Decimal,
    pub zone3_constant: Decimal,
    pub zone4_limit: Decimal,
    pub zone4_rate: Decimal,
    pub zone4_deduction: Decimal,
    pub zone5_rate: Decimal,
    pub zone5_deduction: Decimal,
}

/// Every year-dependent figure the estimator uses.
///
/// Contribution rates are totals; the employee pays half. Ceilings are
/// monthly, deductions and allowances annual. Switching to another year
/// means constructing another table; the calculations do not change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateTable {
    pub year: i32,

    /// Beitragsbemessungsgrenze for pension and unemployment insurance.
    pub bbg_rv_av_monthly: Decimal,
    /// Beitragsbemessungsgrenze for health and care insurance.
    pub bbg_kv_pv_monthly: Decimal,

    pub rv_total: Decimal,
    pub av_total: Decimal,
    pub kv_general_total: Decimal,
    /// Average Zusatzbeitrag of the statutory health funds.
    pub kv_add_on_avg_total: Decimal,
    pub pv_total: Decimal,
    /// Employee-only surcharge for childless insured persons aged 23+.
    pub pv_childless_surcharge: Decimal,

    /// Arbeitnehmer-Pauschbetrag.
    pub employee_lump_sum: Decimal,
    /// Sonderausgaben-Pauschbetrag.
    pub special_expenses_lump_sum: Decimal,
    /// Kinderfreibetrag (both parents) per full allowance.
    pub child_allowance_per_child: Decimal,
    /// Entlastungsbetrag for single parents (class II), first child.
    pub single_parent_relief_first_child: Decimal,
    pub single_parent_relief_additional_child: Decimal,

    pub soli_rate: Decimal,
    pub soli_threshold_single: Decimal,
    pub soli_threshold_splitting: Decimal,
    /// Marginal rate of the transition zone above the threshold.
    pub soli_taper_rate: Decimal,

    /// Church tax rate in Bavaria and Baden-Württemberg.
    pub church_rate_reduced: Decimal,
    pub church_rate_standard: Decimal,

    /// Simplified stand-ins for the class V/VI wage tax tables.
    pub class_v_multiplier: Decimal,
    pub class_vi_multiplier: Decimal,

    pub tariff: IncomeTaxTariff,
}

impl Default for RateTable {
    fn default() -> Self {
        Self::year_2026()
    }
}

impl RateTable {
    /// Estimate-friendly defaults for 2026.
    ///
    /// # Example
    ///
    /// ```
    /// use rust_decimal_macros::dec;
    /// use netto_core::RateTable;
    ///
    /// let rates = RateTable::year_2026();
    ///
    /// assert_eq!(rates.year, 2026);
    /// assert_eq!(rates.bbg_kv_pv_monthly, dec!(5812.50));
    /// assert!(rates.validate().is_ok());
    /// ```
    pub fn year_2026() -> Self {
        Self {
            year: 2026,
            bbg_rv_av_monthly: Decimal::new(8450, 0),
            bbg_kv_pv_monthly: Decimal::new(581250, 2),
            rv_total: Decimal::new(186, 3),
            av_total: Decimal::new(26, 3),
            kv_general_total: Decimal::new(146, 3),
            kv_add_on_avg_total: Decimal::new(29, 3),
            pv_total: Decimal::new(36, 3),
            pv_childless_surcharge: Decimal::new(6, 3),
            employee_lump_sum: Decimal::new(1230, 0),
            special_expenses_lump_sum: Decimal::new(36, 0),
            child_allowance_per_child: Decimal::new(9756, 0),
            single_parent_relief_first_child: Decimal::new(4260, 0),
            single_parent_relief_additional_child: Decimal::new(240, 0),
            soli_rate: Decimal::new(55, 3),
            soli_threshold_single: Decimal::new(20350, 0),
            soli_threshold_splitting: Decimal::new(40700, 0),
            soli_taper_rate: Decimal::new(119, 3),
            church_rate_reduced: Decimal::new(8, 2),
            church_rate_standard: Decimal::new(9, 2),
            class_v_multiplier: Decimal::new(135, 2),
            class_vi_multiplier: Decimal::new(15, 1),
            tariff: IncomeTaxTariff {
                basic_allowance: Decimal::new(12348, 0),
                zone2_limit: Decimal::new(17799, 0),
                zone2_quadratic: Decimal::new(91451, 2),
                zone2_linear: Decimal::new(1400, 0),
                zone3_limit: Decimal::new(69878, 0),
                zone3_quadratic: Decimal::new(1731, 1),
                zone3_linear: Decimal::new(2397, 0),
                zone3_constant: Decimal::new(103487, 2),
                zone4_limit: Decimal::new(277825, 0),
                zone4_rate: Decimal::new(42, 2),
                zone4_deduction: Decimal::new(1113563, 2),
                zone5_rate: Decimal::new(45, 2),
                zone5_deduction: Decimal::new(1947038, 2),
            },
        }
    }

    /// Checks that every value is inside its plausible range.
    ///
    /// # Errors
    ///
    /// Returns the first [`RateTableError`] found.
    pub fn validate(&self) -> Result<(), RateTableError> {
        for (name, value) in [
            ("bbg_rv_av_monthly", self.bbg_rv_av_monthly),
            ("bbg_kv_pv_monthly", self.bbg_kv_pv_monthly),
        ] {
            if value <= Decimal::ZERO {
                return Err(RateTableError::InvalidCeiling { name, value });
            }
            if value > MAX_AMOUNT {
                return Err(RateTableError::AmountTooLarge { name, value });
            }
        }

        for (name, value) in [
            ("rv_total", self.rv_total),
            ("av_total", self.av_total),
            ("kv_general_total", self.kv_general_total),
            ("kv_add_on_avg_total", self.kv_add_on_avg_total),
            ("pv_total", self.pv_total),
            ("pv_childless_surcharge", self.pv_childless_surcharge),
            ("soli_rate", self.soli_rate),
            ("soli_taper_rate", self.soli_taper_rate),
            ("church_rate_reduced", self.church_rate_reduced),
            ("church_rate_standard", self.church_rate_standard),
            ("zone4_rate", self.tariff.zone4_rate),
            ("zone5_rate", self.tariff.zone5_rate),
        ] {
            if value < Decimal::ZERO || value > Decimal::ONE {
                return Err(RateTableError::InvalidRate { name, value });
            }
        }

        for (name, value) in [
            ("employee_lump_sum", self.employee_lump_sum),
            ("special_expenses_lump_sum", self.special_expenses_lump_sum),
            ("child_allowance_per_child", self.child_allowance_per_child),
            (
                "single_parent_relief_first_child",
                self.single_parent_relief_first_child,
            ),
            (
                "single_parent_relief_additional_child",
                self.single_parent_relief_additional_child,
            ),
            ("soli_threshold_single", self.soli_threshold_single),
            ("soli_threshold_splitting", self.soli_threshold_splitting),
            ("basic_allowance", self.tariff.basic_allowance),
        ] {
            if value < Decimal::ZERO {
                return Err(RateTableError::NegativeAmount { name, value });
            }
            if value > MAX_AMOUNT {
                return Err(RateTableError::AmountTooLarge { name, value });
            }
        }

        let t = &self.tariff;
        for (name, value) in [
            ("zone2_limit", t.zone2_limit),
            ("zone2_quadratic", t.zone2_quadratic),
            ("zone2_linear", t.zone2_linear),
            ("zone3_limit", t.zone3_limit),
            ("zone3_quadratic", t.zone3_quadratic),
            ("zone3_linear", t.zone3_linear),
            ("zone3_constant", t.zone3_constant),
            ("zone4_limit", t.zone4_limit),
            ("zone4_deduction", t.zone4_deduction),
            ("zone5_deduction", t.zone5_deduction),
        ] {
            if value.abs() > MAX_AMOUNT {
                return Err(RateTableError::AmountTooLarge { name, value });
            }
        }

        for (name, value) in [
            ("class_v_multiplier", self.class_v_multiplier),
            ("class_vi_multiplier", self.class_vi_multiplier),
        ] {
            if value < Decimal::ONE || value > MAX_MULTIPLIER {
                return Err(RateTableError::InvalidMultiplier { name, value });
            }
        }

        if !(t.basic_allowance < t.zone2_limit
            && t.zone2_limit < t.zone3_limit
            && t.zone3_limit < t.zone4_limit)
        {
            return Err(RateTableError::UnorderedTariffZones);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn year_2026_is_valid() {
        assert_eq!(RateTable::year_2026().validate(), Ok(()));
    }

    #[test]
    fn year_2026_carries_published_figures() {
        let rates = RateTable::year_2026();

        assert_eq!(rates.bbg_rv_av_monthly, dec!(8450));
        assert_eq!(rates.rv_total, dec!(0.186));
        assert_eq!(rates.kv_add_on_avg_total, dec!(0.029));
        assert_eq!(rates.child_allowance_per_child, dec!(9756));
        assert_eq!(rates.tariff.zone2_quadratic, dec!(914.51));
        assert_eq!(rates.tariff.zone5_deduction, dec!(19470.38));
    }

    #[test]
    fn validate_rejects_non_positive_ceiling() {
        let mut rates = RateTable::year_2026();
        rates.bbg_kv_pv_monthly = dec!(0);

        assert_eq!(
            rates.validate(),
            Err(RateTableError::InvalidCeiling {
                name: "bbg_kv_pv_monthly",
                value: dec!(0),
            })
        );
    }

    #[test]
    fn validate_rejects_rate_above_one() {
        let mut rates = RateTable::year_2026();
        rates.rv_total = dec!(18.6);

        assert_eq!(
            rates.validate(),
            Err(RateTableError::InvalidRate {
                name: "rv_total",
                value: dec!(18.6),
            })
        );
    }

    #[test]
    fn validate_rejects_negative_allowance() {
        let mut rates = RateTable::year_2026();
        rates.child_allowance_per_child = dec!(-1);

        assert!(matches!(
            rates.validate(),
            Err(RateTableError::NegativeAmount { name: "child_allowance_per_child", .. })
        ));
    }

    #[test]
    fn validate_rejects_discounting_multiplier() {
        let mut rates = RateTable::year_2026();
        rates.class_vi_multiplier = dec!(0.9);

        assert!(matches!(
            rates.validate(),
            Err(RateTableError::InvalidMultiplier { .. })
        ));
    }

    #[test]
    fn validate_rejects_oversized_multiplier() {
        let mut rates = RateTable::year_2026();
        rates.class_v_multiplier = Decimal::MAX;

        assert!(matches!(
            rates.validate(),
            Err(RateTableError::InvalidMultiplier { name: "class_v_multiplier", .. })
        ));
    }

    #[test]
    fn validate_rejects_oversized_ceiling() {
        let mut rates = RateTable::year_2026();
        rates.bbg_rv_av_monthly = Decimal::MAX;

        assert_eq!(
            rates.validate(),
            Err(RateTableError::AmountTooLarge {
                name: "bbg_rv_av_monthly",
                value: Decimal::MAX,
            })
        );
    }

    #[test]
    fn validate_rejects_oversized_tariff_coefficient() {
        let mut rates = RateTable::year_2026();
        rates.tariff.zone2_quadratic = -dec!(100000000000000000000);

        assert!(matches!(
            rates.validate(),
            Err(RateTableError::AmountTooLarge { name: "zone2_quadratic", .. })
        ));
    }

    #[test]
    fn largest_valid_table_estimates_without_overflow() {
        let mut rates = RateTable::year_2026();
        rates.bbg_rv_av_monthly = MAX_AMOUNT;
        rates.bbg_kv_pv_monthly = MAX_AMOUNT;
        rates.class_v_multiplier = MAX_MULTIPLIER;
        rates.class_vi_multiplier = MAX_MULTIPLIER;
        rates.tariff.zone2_quadratic = MAX_AMOUNT;
        rates.tariff.zone2_linear = MAX_AMOUNT;
        rates.tariff.zone3_quadratic = MAX_AMOUNT;
        rates.tariff.zone3_linear = MAX_AMOUNT;
        rates.tariff.zone3_constant = MAX_AMOUNT;
        rates.tariff.zone4_limit = MAX_AMOUNT;
        assert_eq!(rates.validate(), Ok(()));

        for class in [crate::TaxClass::Five, crate::TaxClass::Six] {
            let input = crate::EstimateInput {
                gross_monthly: Decimal::MAX,
                tax_class: class,
                church_tax: true,
                ..crate::EstimateInput::default()
            };

            let result = crate::estimate(&input, &rates);

            assert_eq!(result.gross_monthly, dec!(1000000));
        }
    }

    #[test]
    fn validate_rejects_unordered_zones() {
        let mut rates = RateTable::year_2026();
        rates.tariff.zone3_limit = dec!(15000);

        assert_eq!(rates.validate(), Err(RateTableError::UnorderedTariffZones));
    }
}
