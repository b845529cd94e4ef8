use serde::{Deserialize, Serialize};

/// Statutory (GKV) or private (PKV) health insurance.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthType {
    #[default]
    Public,
    Private,
}

impl HealthType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Public => "public",
            Self::Private => "private",
        }
    }

    /// Only an explicit `private` selects private insurance.
    pub fn parse_or_default(s: &str) -> Self {
        if s.trim().eq_ignore_ascii_case("private") {
            Self::Private
        } else {
            Self::Public
        }
    }

    pub fn is_private(&self) -> bool {
        matches!(self, Self::Private)
    }
}

impl std::fmt::Display for HealthType {
    fn fmt(
        &self,
        f: &mut std::fmt::Formatter<'_>,
    ) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
