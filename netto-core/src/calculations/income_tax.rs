//! Income tax, solidarity surcharge and church tax.
//!
//! The basic tariff (Grundtarif) is the five-zone formula carried by
//! [`IncomeTaxTariff`]. Tax classes modify it as follows:
//!
//! | Class | Income tax |
//! |-------|------------|
//! | I, II, IV | basic tariff |
//! | III | `floor(basic(floor(zvE / 2)) × 2)` (splitting) |
//! | V | `floor(basic × class_v_multiplier)` |
//! | VI | `floor(basic × class_vi_multiplier)` |
//!
//! Classes V and VI are simplified multipliers, not the official wage tax
//! tables, and are expected to overstate or understate real withholding.
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use netto_core::calculations::IncomeTaxWorksheet;
//! use netto_core::{FederalState, RateTable, TaxClass};
//!
//! let rates = RateTable::year_2026();
//! let worksheet = IncomeTaxWorksheet::new(&rates);
//!
//! let tax = worksheet.income_tax(dec!(26904), TaxClass::One);
//! assert_eq!(tax, dec!(3360));
//! assert_eq!(worksheet.solidarity_surcharge(tax, false), dec!(0));
//! assert_eq!(worksheet.church_tax(tax, FederalState::Berlin), dec!(302));
//! ```

use rust_decimal::Decimal;

use crate::calculations::common::floor_euro;
use crate::models::{FederalState, IncomeTaxTariff, RateTable, TaxClass};

const TEN_THOUSAND: Decimal = Decimal::from_parts(10_000, 0, 0, false, 0);

/// Calculator for the tax side of the estimate.
#[derive(Debug, Clone)]
pub struct IncomeTaxWorksheet<'a> {
    rates: &'a RateTable,
}

impl<'a> IncomeTaxWorksheet<'a> {
    pub fn new(rates: &'a RateTable) -> Self {
        Self { rates }
    }

    /// Evaluates the basic tariff on a taxable income.
    ///
    /// The income is floored to whole euros first; every zone result is
    /// floored again. Negative income is treated as zero.
    pub fn basic_tariff(
        &self,
        taxable_income: Decimal,
    ) -> Decimal {
        let t: &IncomeTaxTariff = &self.rates.tariff;
        let x = floor_euro(taxable_income.max(Decimal::ZERO));

        if x <= t.basic_allowance {
            return Decimal::ZERO;
        }
        if x <= t.zone2_limit {
            let y = (x - t.basic_allowance) / TEN_THOUSAND;
            return floor_euro((t.zone2_quadratic * y + t.zone2_linear) * y);
        }
        if x <= t.zone3_limit {
            let z = (x - t.zone2_limit) / TEN_THOUSAND;
            return floor_euro((t.zone3_quadratic * z + t.zone3_linear) * z + t.zone3_constant);
        }
        if x <= t.zone4_limit {
            return floor_euro(t.zone4_rate * x - t.zone4_deduction);
        }
        floor_euro(t.zone5_rate * x - t.zone5_deduction)
    }

    /// Annual income tax for a tax class.
    pub fn income_tax(
        &self,
        taxable_income: Decimal,
        tax_class: TaxClass,
    ) -> Decimal {
        match tax_class {
            TaxClass::Three => self.splitting_tax(taxable_income),
            TaxClass::Five => {
                floor_euro(self.basic_tariff(taxable_income) * self.rates.class_v_multiplier)
            }
            TaxClass::Six => {
                floor_euro(self.basic_tariff(taxable_income) * self.rates.class_vi_multiplier)
            }
            TaxClass::One | TaxClass::Two | TaxClass::Four => self.basic_tariff(taxable_income),
        }
    }

    /// Splitting: tariff on half the income, doubled. Applied once.
    fn splitting_tax(
        &self,
        taxable_income: Decimal,
    ) -> Decimal {
        let half = floor_euro(taxable_income / Decimal::TWO).max(Decimal::ZERO);
        floor_euro(self.basic_tariff(half) * Decimal::TWO)
    }

    /// Solidarity surcharge on an annual income tax amount.
    ///
    /// Zero up to the threshold (doubled for splitting). Above it, the
    /// smaller of the full rate and the taper rate on the excess, which
    /// smooths the jump at the threshold.
    pub fn solidarity_surcharge(
        &self,
        income_tax: Decimal,
        splitting: bool,
    ) -> Decimal {
        let tax = floor_euro(income_tax.max(Decimal::ZERO));
        let threshold = if splitting {
            self.rates.soli_threshold_splitting
        } else {
            self.rates.soli_threshold_single
        };

        if tax <= threshold {
            return Decimal::ZERO;
        }

        let full = self.rates.soli_rate * tax;
        let tapered = self.rates.soli_taper_rate * (tax - threshold);
        floor_euro(full.min(tapered))
    }

    /// Church tax rate for a federal state.
    pub fn church_rate(
        &self,
        state: FederalState,
    ) -> Decimal {
        if state.has_reduced_church_rate() {
            self.rates.church_rate_reduced
        } else {
            self.rates.church_rate_standard
        }
    }

    /// Church tax on an annual income tax amount.
    pub fn church_tax(
        &self,
        income_tax: Decimal,
        state: FederalState,
    ) -> Decimal {
        floor_euro(income_tax * self.church_rate(state))
    }
}
