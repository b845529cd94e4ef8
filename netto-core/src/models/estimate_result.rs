use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Explains which care/health assumptions went into the social figures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SocialNote {
    /// Private health with the premium deducted from net pay.
    PrivatePremiumDeducted,
    /// Private health with premiums left out of the estimate.
    PrivatePremiumExcluded,
    /// Public health, childless surcharge on care insurance applied.
    ChildlessSurchargeApplied,
    /// Public health, children allowance present so no surcharge.
    ChildlessSurchargeWaived,
}

impl SocialNote {
    pub fn message(&self) -> &'static str {
        match self {
            Self::PrivatePremiumDeducted => {
                "Private health selected: statutory health/care contributions are shown as 0. The private premium is deducted from net pay."
            }
            Self::PrivatePremiumExcluded => {
                "Private health selected: statutory health/care contributions are shown as 0. Private premiums are NOT included."
            }
            Self::ChildlessSurchargeApplied => "Includes childless care surcharge (0.6%) if 23+.",
            Self::ChildlessSurchargeWaived => {
                "Care surcharge not applied (children allowance > 0)."
            }
        }
    }
}

/// Employee share of the four statutory insurance branches, per month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SocialContributions {
    /// Pension (Rentenversicherung).
    #[serde(with = "rust_decimal::serde::float")]
    pub rv: Decimal,
    /// Unemployment (Arbeitslosenversicherung).
    #[serde(with = "rust_decimal::serde::float")]
    pub av: Decimal,
    /// Health (Krankenversicherung).
    #[serde(with = "rust_decimal::serde::float")]
    pub kv: Decimal,
    /// Long-term care (Pflegeversicherung), including any childless surcharge.
    #[serde(with = "rust_decimal::serde::float")]
    pub pv: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub total: Decimal,
    pub note: SocialNote,
}

/// Annual tax amounts, each floored to whole euros.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaxBreakdown {
    #[serde(with = "rust_decimal::serde::float")]
    pub income_tax_annual: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub soli_annual: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub church_annual: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub total_annual: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EstimateResult {
    #[serde(with = "rust_decimal::serde::float")]
    pub gross_monthly: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub gross_annual: Decimal,
    /// Estimated zvE (zu versteuerndes Einkommen).
    #[serde(with = "rust_decimal::serde::float")]
    pub taxable_income_annual: Decimal,
    pub social: SocialContributions,
    pub taxes: TaxBreakdown,
    #[serde(with = "rust_decimal::serde::float")]
    pub net_monthly: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub net_annual: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub pkv_premium_monthly: Decimal,
}

impl EstimateResult {
    /// Social contributions for the whole year.
    pub fn social_annual(&self) -> Decimal {
        self.social.total * Decimal::from(12)
    }

    /// Taxes spread evenly over twelve months.
    pub fn taxes_monthly(&self) -> Decimal {
        self.taxes.total_annual / Decimal::from(12)
    }
}
