//! Batch estimation over loaded scenarios.

use std::io::Write;

use netto_core::calculations::common::round_half_up;
use netto_core::{EstimateInput, Estimator, FederalState, HealthType, TaxClass};
use rust_decimal::Decimal;
use serde::Serialize;

/// One output line. Currency amounts carry exactly two decimals; tax
/// amounts are whole euros.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BatchRow {
    pub row: usize,
    pub gross_monthly: Decimal,
    pub tax_class: TaxClass,
    pub state: FederalState,
    pub health_type: HealthType,
    pub taxable_income_annual: Decimal,
    pub social_monthly: Decimal,
    pub income_tax_annual: Decimal,
    pub soli_annual: Decimal,
    pub church_annual: Decimal,
    pub taxes_annual: Decimal,
    pub pkv_premium_monthly: Decimal,
    pub net_monthly: Decimal,
    pub net_annual: Decimal,
}

fn cents(value: Decimal) -> Decimal {
    let mut rounded = round_half_up(value);
    rounded.rescale(2);
    rounded
}

/// Estimates every scenario; `row` numbers start at 1.
pub fn estimate_scenarios(
    inputs: &[EstimateInput],
    estimator: &Estimator<'_>,
) -> Vec<BatchRow> {
    inputs
        .iter()
        .enumerate()
        .map(|(i, input)| {
            let result = estimator.calculate(input);
            BatchRow {
                row: i + 1,
                gross_monthly: cents(result.gross_monthly),
                tax_class: input.tax_class,
                state: input.state,
                health_type: input.health_type,
                taxable_income_annual: cents(result.taxable_income_annual),
                social_monthly: cents(result.social.total),
                income_tax_annual: result.taxes.income_tax_annual,
                soli_annual: result.taxes.soli_annual,
                church_annual: result.taxes.church_annual,
                taxes_annual: result.taxes.total_annual,
                pkv_premium_monthly: cents(result.pkv_premium_monthly),
                net_monthly: cents(result.net_monthly),
                net_annual: cents(result.net_annual),
            }
        })
        .collect()
}

/// Writes rows as CSV with a header line.
pub fn write_results<W: Write>(
    writer: W,
    rows: &[BatchRow],
) -> Result<(), csv::Error> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    for row in rows {
        csv_writer.serialize(row)?;
    }
    csv_writer.flush()?;
    Ok(())
}
