use serde::{Deserialize, Serialize};

/// German payroll tax class (Steuerklasse I–VI).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TaxClass {
    #[default]
    #[serde(rename = "I")]
    One,
    #[serde(rename = "II")]
    Two,
    #[serde(rename = "III")]
    Three,
    #[serde(rename = "IV")]
    Four,
    #[serde(rename = "V")]
    Five,
    #[serde(rename = "VI")]
    Six,
}

impl TaxClass {
    pub fn all() -> &'static [TaxClass] {
        &[
            Self::One,
            Self::Two,
            Self::Three,
            Self::Four,
            Self::Five,
            Self::Six,
        ]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::One => "I",
            Self::Two => "II",
            Self::Three => "III",
            Self::Four => "IV",
            Self::Five => "V",
            Self::Six => "VI",
        }
    }

    /// Strict parse of a roman numeral code, case-insensitive.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_uppercase().as_str() {
            "I" => Some(Self::One),
            "II" => Some(Self::Two),
            "III" => Some(Self::Three),
            "IV" => Some(Self::Four),
            "V" => Some(Self::Five),
            "VI" => Some(Self::Six),
            _ => None,
        }
    }

    /// Lenient parse: anything unrecognised becomes class I.
    pub fn parse_or_default(s: &str) -> Self {
        Self::parse(s).unwrap_or_default()
    }

    /// Class III is taxed with the splitting procedure.
    pub fn is_splitting(&self) -> bool {
        matches!(self, Self::Three)
    }
}

impl std::fmt::Display for TaxClass {
    fn fmt(
        &self,
        f: &mut std::fmt::Formatter<'_>,
    ) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
