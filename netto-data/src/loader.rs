use std::io::Read;

use netto_core::parse::parse_decimal;
use netto_core::{EstimateInput, FederalState, HealthType, TaxClass};
use rust_decimal::Decimal;
use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

/// Errors that can occur when loading scenarios. Row numbers count data
/// rows from 1, not including the header.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ScenarioLoadError {
    #[error("CSV parse error: {0}")]
    Csv(String),

    #[error("row {row}: invalid tax class '{value}' (expected I-VI)")]
    InvalidTaxClass { value: String, row: usize },

    #[error("row {row}: invalid state code '{value}'")]
    InvalidState { value: String, row: usize },

    #[error("row {row}: invalid health type '{value}' (expected public or private)")]
    InvalidHealthType { value: String, row: usize },

    #[error("row {row}: invalid church tax flag '{value}'")]
    InvalidChurchTax { value: String, row: usize },

    #[error("row {row}: invalid amount '{value}' in column {column}")]
    InvalidAmount {
        column: &'static str,
        value: String,
        row: usize,
    },
}

impl From<csv::Error> for ScenarioLoadError {
    fn from(err: csv::Error) -> Self {
        ScenarioLoadError::Csv(err.to_string())
    }
}

/// A single row of the scenarios CSV, as text.
///
/// - `gross_monthly`: monthly gross pay, `.` or `,` as decimal separator
/// - `tax_class`: `I` to `VI`
/// - `church_tax`: `true`/`false`, `yes`/`no`, `1`/`0`, empty for false
/// - `child_allowance`: children allowance count, fractions allowed
/// - `state`: two-letter federal state code, defaults to `BY`
/// - `health_type`: `public` or `private`, defaults to `public`
/// - `pkv_premium_monthly`: private premium, defaults to 0
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct ScenarioRecord {
    pub gross_monthly: String,
    pub tax_class: String,
    pub church_tax: String,
    pub child_allowance: String,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub health_type: Option<String>,
    #[serde(default)]
    pub pkv_premium_monthly: Option<String>,
}

impl ScenarioRecord {
    /// Validates the row strictly and converts it to an estimator input.
    ///
    /// Unlike imported documents, a scenario file is rejected on the first
    /// bad cell instead of falling back to defaults.
    pub fn to_input(
        &self,
        row: usize,
    ) -> Result<EstimateInput, ScenarioLoadError> {
        let tax_class =
            TaxClass::parse(&self.tax_class).ok_or_else(|| ScenarioLoadError::InvalidTaxClass {
                value: self.tax_class.clone(),
                row,
            })?;

        let state = match non_empty(&self.state) {
            Some(code) => {
                FederalState::parse(code).ok_or_else(|| ScenarioLoadError::InvalidState {
                    value: code.to_string(),
                    row,
                })?
            }
            None => FederalState::default(),
        };

        let health_type = match non_empty(&self.health_type) {
            Some(s) => parse_health_type(s).ok_or_else(|| ScenarioLoadError::InvalidHealthType {
                value: s.to_string(),
                row,
            })?,
            None => HealthType::default(),
        };

        let pkv_premium_monthly = match non_empty(&self.pkv_premium_monthly) {
            Some(s) => amount("pkv_premium_monthly", s, row)?,
            None => Decimal::ZERO,
        };

        Ok(EstimateInput {
            gross_monthly: amount("gross_monthly", &self.gross_monthly, row)?,
            tax_class,
            church_tax: parse_flag(&self.church_tax).ok_or_else(|| {
                ScenarioLoadError::InvalidChurchTax {
                    value: self.church_tax.clone(),
                    row,
                }
            })?,
            child_allowance: amount("child_allowance", &self.child_allowance, row)?,
            state,
            health_type,
            pkv_premium_monthly,
        })
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

fn amount(
    column: &'static str,
    value: &str,
    row: usize,
) -> Result<Decimal, ScenarioLoadError> {
    parse_decimal(value).map_err(|_| ScenarioLoadError::InvalidAmount {
        column,
        value: value.to_string(),
        row,
    })
}

fn parse_health_type(s: &str) -> Option<HealthType> {
    match s.to_ascii_lowercase().as_str() {
        "public" => Some(HealthType::Public),
        "private" => Some(HealthType::Private),
        _ => None,
    }
}

fn parse_flag(s: &str) -> Option<bool> {
    match s.trim().to_ascii_lowercase().as_str() {
        "true" | "yes" | "1" => Some(true),
        "false" | "no" | "0" | "" => Some(false),
        _ => None,
    }
}

/// Loader for salary scenarios from CSV files.
pub struct ScenarioLoader;

impl ScenarioLoader {
    /// Parse raw records from a CSV reader.
    pub fn parse_records<R: Read>(reader: R) -> Result<Vec<ScenarioRecord>, ScenarioLoadError> {
        let mut csv_reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
        let mut records = Vec::new();

        for result in csv_reader.deserialize() {
            let record: ScenarioRecord = result?;
            records.push(record);
        }

        Ok(records)
    }

    /// Parse and validate scenarios from a CSV reader.
    ///
    /// # Errors
    ///
    /// [`ScenarioLoadError::Csv`] for malformed CSV or missing required
    /// columns, otherwise the first invalid cell with its row number.
    pub fn parse<R: Read>(reader: R) -> Result<Vec<EstimateInput>, ScenarioLoadError> {
        let inputs = Self::parse_records(reader)?
            .iter()
            .enumerate()
            .map(|(i, record)| record.to_input(i + 1))
            .collect::<Result<Vec<_>, _>>()?;

        debug!(count = inputs.len(), "parsed scenarios");
        Ok(inputs)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    const HEADER: &str =
        "gross_monthly,tax_class,church_tax,child_allowance,state,health_type,pkv_premium_monthly";

    fn csv_with(row: &str) -> String {
        format!("{HEADER}\n{row}")
    }

    #[test]
    fn test_parse_full_row() {
        let csv = csv_with("3000,I,false,0,BY,public,0");

        let inputs = ScenarioLoader::parse(csv.as_bytes()).expect("Failed to parse CSV");

        assert_eq!(inputs.len(), 1);
        assert_eq!(
            inputs[0],
            EstimateInput {
                gross_monthly: dec!(3000),
                tax_class: TaxClass::One,
                church_tax: false,
                child_allowance: dec!(0),
                state: FederalState::Bavaria,
                health_type: HealthType::Public,
                pkv_premium_monthly: dec!(0),
            }
        );
    }

    #[test]
    fn test_parse_optional_columns_missing() {
        let csv = "gross_monthly,tax_class,church_tax,child_allowance\n4200,III,yes,1.5";

        let inputs = ScenarioLoader::parse(csv.as_bytes()).expect("Failed to parse CSV");

        assert_eq!(inputs[0].tax_class, TaxClass::Three);
        assert!(inputs[0].church_tax);
        assert_eq!(inputs[0].child_allowance, dec!(1.5));
        assert_eq!(inputs[0].state, FederalState::Bavaria);
        assert_eq!(inputs[0].health_type, HealthType::Public);
        assert_eq!(inputs[0].pkv_premium_monthly, dec!(0));
    }

    #[test]
    fn test_parse_decimal_comma_in_quoted_cell() {
        let csv = csv_with("\"3700,50\",II,0,\"0,5\",HH,private,\"412,80\"");

        let inputs = ScenarioLoader::parse(csv.as_bytes()).expect("Failed to parse CSV");

        assert_eq!(inputs[0].gross_monthly, dec!(3700.50));
        assert_eq!(inputs[0].child_allowance, dec!(0.5));
        assert_eq!(inputs[0].pkv_premium_monthly, dec!(412.80));
        assert_eq!(inputs[0].health_type, HealthType::Private);
    }

    #[test]
    fn test_parse_invalid_tax_class_reports_row() {
        let csv = format!("{HEADER}\n3000,I,false,0,BY,public,0\n3000,VII,false,0,BY,public,0");

        let err = ScenarioLoader::parse(csv.as_bytes()).expect_err("Should reject VII");

        assert_eq!(
            err,
            ScenarioLoadError::InvalidTaxClass {
                value: "VII".to_string(),
                row: 2,
            }
        );
    }

    #[test]
    fn test_parse_invalid_state() {
        let err = ScenarioLoader::parse(csv_with("3000,I,false,0,XX,public,0").as_bytes())
            .expect_err("Should reject XX");

        assert_eq!(
            err,
            ScenarioLoadError::InvalidState {
                value: "XX".to_string(),
                row: 1,
            }
        );
    }

    #[test]
    fn test_parse_invalid_health_type() {
        let err = ScenarioLoader::parse(csv_with("3000,I,false,0,BY,gkv,0").as_bytes())
            .expect_err("Should reject gkv");

        assert!(matches!(err, ScenarioLoadError::InvalidHealthType { row: 1, .. }));
    }

    #[test]
    fn test_parse_invalid_church_flag() {
        let err = ScenarioLoader::parse(csv_with("3000,I,maybe,0,BY,public,0").as_bytes())
            .expect_err("Should reject maybe");

        assert!(matches!(err, ScenarioLoadError::InvalidChurchTax { row: 1, .. }));
    }

    #[test]
    fn test_parse_invalid_amount_names_column() {
        let err = ScenarioLoader::parse(csv_with("abc,I,false,0,BY,public,0").as_bytes())
            .expect_err("Should reject abc");

        assert_eq!(
            err,
            ScenarioLoadError::InvalidAmount {
                column: "gross_monthly",
                value: "abc".to_string(),
                row: 1,
            }
        );
        assert_eq!(
            err.to_string(),
            "row 1: invalid amount 'abc' in column gross_monthly"
        );
    }

    #[test]
    fn test_parse_missing_required_column() {
        let csv = "gross_monthly,tax_class\n3000,I";

        let err = ScenarioLoader::parse(csv.as_bytes()).expect_err("Should fail");

        let ScenarioLoadError::Csv(msg) = err else {
            panic!("Expected Csv error, got: {:?}", err);
        };
        assert!(msg.contains("missing field"), "got: {}", msg);
    }

    #[test]
    fn test_parse_header_only_is_empty() {
        let inputs = ScenarioLoader::parse(HEADER.as_bytes()).expect("Failed to parse CSV");

        assert!(inputs.is_empty());
    }
}
