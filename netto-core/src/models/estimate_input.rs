use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::warn;

use crate::models::{FederalState, HealthType, TaxClass};
use crate::parse::{coerce_decimal, decimal_from_json_number};

/// The raw input record the estimator is called with.
///
/// Values are stored as entered; clamping happens inside the estimator so
/// that a saved record round-trips unchanged. Amounts are written as JSON
/// numbers with every digit of the [`Decimal`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EstimateInput {
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub gross_monthly: Decimal,
    pub tax_class: TaxClass,
    pub church_tax: bool,
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub child_allowance: Decimal,
    pub state: FederalState,
    pub health_type: HealthType,
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub pkv_premium_monthly: Decimal,
}

impl Default for EstimateInput {
    fn default() -> Self {
        Self {
            gross_monthly: Decimal::new(3700, 0),
            tax_class: TaxClass::default(),
            church_tax: false,
            child_allowance: Decimal::ZERO,
            state: FederalState::default(),
            health_type: HealthType::default(),
            pkv_premium_monthly: Decimal::ZERO,
        }
    }
}

impl EstimateInput {
    /// Builds an input from an untrusted JSON object, one field at a time.
    ///
    /// Every field starts from [`EstimateInput::default`]. A field present
    /// with a usable shape replaces the default:
    ///
    /// | Field | Accepted | Otherwise |
    /// |-------|----------|-----------|
    /// | amounts | number, or string with `,`/`.` (unparseable string → 0) | default |
    /// | `taxClass` | string I–VI (unknown → I) | default |
    /// | `churchTax` | bool, or `"true"`/`"false"` | default |
    /// | `state` | two-letter code (unknown → BY) | default |
    /// | `healthType` | string (anything but `private` → public) | default |
    ///
    /// Unknown keys are dropped. A non-object value yields the defaults.
    pub fn reconcile(value: &Value) -> Self {
        let defaults = Self::default();
        let Some(obj) = value.as_object() else {
            warn!("import payload is not an object, using defaults");
            return defaults;
        };

        Self {
            gross_monthly: decimal_field(obj, "grossMonthly").unwrap_or(defaults.gross_monthly),
            tax_class: string_field(obj, "taxClass")
                .map(TaxClass::parse_or_default)
                .unwrap_or(defaults.tax_class),
            church_tax: bool_field(obj, "churchTax").unwrap_or(defaults.church_tax),
            child_allowance: decimal_field(obj, "childAllowance")
                .unwrap_or(defaults.child_allowance),
            state: string_field(obj, "state")
                .map(FederalState::parse_or_default)
                .unwrap_or(defaults.state),
            health_type: string_field(obj, "healthType")
                .map(HealthType::parse_or_default)
                .unwrap_or(defaults.health_type),
            pkv_premium_monthly: decimal_field(obj, "pkvPremiumMonthly")
                .unwrap_or(defaults.pkv_premium_monthly),
        }
    }
}

fn decimal_field(
    obj: &Map<String, Value>,
    key: &str,
) -> Option<Decimal> {
    match obj.get(key)? {
        Value::Number(n) => Some(decimal_from_json_number(n)),
        Value::String(s) => Some(coerce_decimal(s)),
        Value::Null => None,
        other => {
            warn!(field = key, value = %other, "ignoring non-numeric value");
            None
        }
    }
}

fn string_field<'a>(
    obj: &'a Map<String, Value>,
    key: &str,
) -> Option<&'a str> {
    match obj.get(key)? {
        Value::String(s) => Some(s.as_str()),
        Value::Null => None,
        other => {
            warn!(field = key, value = %other, "ignoring non-string value");
            None
        }
    }
}

fn bool_field(
    obj: &Map<String, Value>,
    key: &str,
) -> Option<bool> {
    match obj.get(key)? {
        Value::Bool(b) => Some(*b),
        Value::String(s) if s.eq_ignore_ascii_case("true") => Some(true),
        Value::String(s) if s.eq_ignore_ascii_case("false") => Some(false),
        Value::Null => None,
        other => {
            warn!(field = key, value = %other, "ignoring non-boolean value");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;
    use serde_json::json;

    use super::*;

    #[test]
    fn default_matches_form_defaults() {
        let input = EstimateInput::default();

        assert_eq!(input.gross_monthly, dec!(3700));
        assert_eq!(input.tax_class, TaxClass::One);
        assert!(!input.church_tax);
        assert_eq!(input.child_allowance, dec!(0));
        assert_eq!(input.state, FederalState::Bavaria);
        assert_eq!(input.health_type, HealthType::Public);
        assert_eq!(input.pkv_premium_monthly, dec!(0));
    }

    #[test]
    fn serializes_with_camel_case_keys_and_numbers() {
        let value = serde_json::to_value(EstimateInput::default()).unwrap();

        assert_eq!(
            value,
            json!({
                "grossMonthly": 3700,
                "taxClass": "I",
                "churchTax": false,
                "childAllowance": 0,
                "state": "BY",
                "healthType": "public",
                "pkvPremiumMonthly": 0
            })
        );
    }

    #[test]
    fn long_fractions_survive_json() {
        let input = EstimateInput {
            gross_monthly: dec!(3700.123456789012345678),
            child_allowance: dec!(0.3333333333333333333),
            pkv_premium_monthly: Decimal::MAX,
            ..EstimateInput::default()
        };

        let text = serde_json::to_string(&input).unwrap();
        let back: EstimateInput = serde_json::from_str(&text).unwrap();

        assert!(text.contains("\"grossMonthly\":3700.123456789012345678"), "{text}");
        assert_eq!(back, input);
        assert_eq!(EstimateInput::reconcile(&serde_json::from_str(&text).unwrap()), input);
    }

    // =========================================================================
    // reconcile tests
    // =========================================================================

    #[test]
    fn reconcile_reads_every_field() {
        let value = json!({
            "grossMonthly": 5200.5,
            "taxClass": "III",
            "churchTax": true,
            "childAllowance": 1.5,
            "state": "NW",
            "healthType": "private",
            "pkvPremiumMonthly": 410
        });

        let input = EstimateInput::reconcile(&value);

        assert_eq!(
            input,
            EstimateInput {
                gross_monthly: dec!(5200.5),
                tax_class: TaxClass::Three,
                church_tax: true,
                child_allowance: dec!(1.5),
                state: FederalState::NorthRhineWestphalia,
                health_type: HealthType::Private,
                pkv_premium_monthly: dec!(410),
            }
        );
    }

    #[test]
    fn reconcile_fills_missing_fields_from_defaults() {
        let input = EstimateInput::reconcile(&json!({ "grossMonthly": 4100 }));

        assert_eq!(input.gross_monthly, dec!(4100));
        assert_eq!(input.tax_class, TaxClass::One);
        assert_eq!(input.state, FederalState::Bavaria);
    }

    #[test]
    fn reconcile_coerces_comma_strings() {
        let input = EstimateInput::reconcile(&json!({
            "grossMonthly": "3500,75",
            "childAllowance": "0,5"
        }));

        assert_eq!(input.gross_monthly, dec!(3500.75));
        assert_eq!(input.child_allowance, dec!(0.5));
    }

    #[test]
    fn reconcile_unparseable_amount_string_becomes_zero() {
        let input = EstimateInput::reconcile(&json!({ "grossMonthly": "lots" }));

        assert_eq!(input.gross_monthly, dec!(0));
    }

    #[test]
    fn reconcile_wrong_types_fall_back_to_defaults() {
        let input = EstimateInput::reconcile(&json!({
            "grossMonthly": { "nested": true },
            "taxClass": 3,
            "churchTax": "maybe",
            "state": ["BE"],
            "healthType": false
        }));

        assert_eq!(input, EstimateInput::default());
    }

    #[test]
    fn reconcile_unknown_enum_values_use_documented_fallbacks() {
        let input = EstimateInput::reconcile(&json!({
            "taxClass": "VII",
            "state": "ZZ",
            "healthType": "premium"
        }));

        assert_eq!(input.tax_class, TaxClass::One);
        assert_eq!(input.state, FederalState::Bavaria);
        assert_eq!(input.health_type, HealthType::Public);
    }

    #[test]
    fn reconcile_drops_unknown_keys() {
        let with_extra = EstimateInput::reconcile(&json!({
            "grossMonthly": 3000,
            "__proto__": { "polluted": true },
            "bonus": 99999
        }));
        let without_extra = EstimateInput::reconcile(&json!({ "grossMonthly": 3000 }));

        assert_eq!(with_extra, without_extra);
    }

    #[test]
    fn reconcile_non_object_yields_defaults() {
        assert_eq!(EstimateInput::reconcile(&json!([1, 2, 3])), EstimateInput::default());
        assert_eq!(EstimateInput::reconcile(&Value::Null), EstimateInput::default());
    }

    #[test]
    fn reconcile_huge_gross_is_clamped_by_estimator() {
        let value: Value = serde_json::from_str(r#"{"grossMonthly":1e30}"#).unwrap();

        let input = EstimateInput::reconcile(&value);
        let result = crate::estimate(&input, &crate::RateTable::year_2026());

        assert_eq!(input.gross_monthly, Decimal::MAX);
        assert_eq!(result.gross_monthly, dec!(1000000));
    }

    #[test]
    fn reconcile_accepts_string_booleans() {
        let input = EstimateInput::reconcile(&json!({ "churchTax": "TRUE" }));

        assert!(input.church_tax);
    }
}
