use serde::{Deserialize, Serialize};

/// The sixteen German federal states, keyed by their two-letter code.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FederalState {
    #[serde(rename = "BW")]
    BadenWuerttemberg,
    #[default]
    #[serde(rename = "BY")]
    Bavaria,
    #[serde(rename = "BE")]
    Berlin,
    #[serde(rename = "BB")]
    Brandenburg,
    #[serde(rename = "HB")]
    Bremen,
    #[serde(rename = "HH")]
    Hamburg,
    #[serde(rename = "HE")]
    Hesse,
    #[serde(rename = "MV")]
    MecklenburgVorpommern,
    #[serde(rename = "NI")]
    LowerSaxony,
    #[serde(rename = "NW")]
    NorthRhineWestphalia,
    #[serde(rename = "RP")]
    RhinelandPalatinate,
    #[serde(rename = "SL")]
    Saarland,
    #[serde(rename = "SN")]
    Saxony,
    #[serde(rename = "ST")]
    SaxonyAnhalt,
    #[serde(rename = "SH")]
    SchleswigHolstein,
    #[serde(rename = "TH")]
    Thuringia,
}

impl FederalState {
    pub fn all() -> &'static [FederalState] {
        &[
            Self::BadenWuerttemberg,
            Self::Bavaria,
            Self::Berlin,
            Self::Brandenburg,
            Self::Bremen,
            Self::Hamburg,
            Self::Hesse,
            Self::MecklenburgVorpommern,
            Self::LowerSaxony,
            Self::NorthRhineWestphalia,
            Self::RhinelandPalatinate,
            Self::Saarland,
            Self::Saxony,
            Self::SaxonyAnhalt,
            Self::SchleswigHolstein,
            Self::Thuringia,
        ]
    }

    pub fn code(&self) -> &'static str {
        match self {
            Self::BadenWuerttemberg => "BW",
            Self::Bavaria => "BY",
            Self::Berlin => "BE",
            Self::Brandenburg => "BB",
            Self::Bremen => "HB",
            Self::Hamburg => "HH",
            Self::Hesse => "HE",
            Self::MecklenburgVorpommern => "MV",
            Self::LowerSaxony => "NI",
            Self::NorthRhineWestphalia => "NW",
            Self::RhinelandPalatinate => "RP",
            Self::Saarland => "SL",
            Self::Saxony => "SN",
            Self::SaxonyAnhalt => "ST",
            Self::SchleswigHolstein => "SH",
            Self::Thuringia => "TH",
        }
    }

    /// German display name.
    pub fn name(&self) -> &'static str {
        match self {
            Self::BadenWuerttemberg => "Baden-Württemberg",
            Self::Bavaria => "Bayern",
            Self::Berlin => "Berlin",
            Self::Brandenburg => "Brandenburg",
            Self::Bremen => "Bremen",
            Self::Hamburg => "Hamburg",
            Self::Hesse => "Hessen",
            Self::MecklenburgVorpommern => "Mecklenburg-Vorpommern",
            Self::LowerSaxony => "Niedersachsen",
            Self::NorthRhineWestphalia => "Nordrhein-Westfalen",
            Self::RhinelandPalatinate => "Rheinland-Pfalz",
            Self::Saarland => "Saarland",
            Self::Saxony => "Sachsen",
            Self::SaxonyAnhalt => "Sachsen-Anhalt",
            Self::SchleswigHolstein => "Schleswig-Holstein",
            Self::Thuringia => "Thüringen",
        }
    }

    pub fn parse(code: &str) -> Option<Self> {
        let code = code.trim().to_ascii_uppercase();
        Self::all().iter().copied().find(|s| s.code() == code)
    }

    /// Unknown codes resolve to Bavaria.
    pub fn parse_or_default(code: &str) -> Self {
        Self::parse(code).unwrap_or_default()
    }

    /// Bavaria and Baden-Württemberg levy church tax at the reduced rate.
    pub fn has_reduced_church_rate(&self) -> bool {
        matches!(self, Self::Bavaria | Self::BadenWuerttemberg)
    }
}

impl std::fmt::Display for FederalState {
    fn fmt(
        &self,
        f: &mut std::fmt::Formatter<'_>,
    ) -> std::fmt::Result {
        f.write_str(self.code())
    }
}
