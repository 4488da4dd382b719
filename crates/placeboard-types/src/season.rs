use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Recruitment cycle kind.
///
/// The backend is not consistent about casing (`PLACEMENT`, `Placement`),
/// so parsing is case-insensitive and also accepts `Internship`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE", try_from = "String")]
pub enum SeasonType {
    Placement,
    Intern,
}

impl SeasonType {
    /// Sort rank within a year: placement first.
    pub fn rank(self) -> u8 {
        match self {
            SeasonType::Placement => 0,
            SeasonType::Intern => 1,
        }
    }

    /// Human-readable label used in pickers ("Placement 2024").
    pub fn display_name(self) -> &'static str {
        match self {
            SeasonType::Placement => "Placement",
            SeasonType::Intern => "Intern",
        }
    }

    /// Returns true for placement seasons (CTC) as opposed to intern seasons (stipend).
    pub fn is_placement(self) -> bool {
        matches!(self, SeasonType::Placement)
    }

    /// Name of the headline compensation for this kind of season.
    pub fn compensation_label(self) -> &'static str {
        match self {
            SeasonType::Placement => "Package",
            SeasonType::Intern => "Stipend",
        }
    }
}

impl fmt::Display for SeasonType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for SeasonType {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "placement" => Ok(Self::Placement),
            "intern" | "internship" => Ok(Self::Intern),
            other => Err(format!("Unknown season type: {other}")),
        }
    }
}

impl TryFrom<String> for SeasonType {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// One entry of the season list endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeasonSummary {
    pub id: String,
    #[serde(rename = "type")]
    pub season_type: SeasonType,
    pub year: i32,
}

/// Envelope returned by the season list endpoint.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SeasonList {
    #[serde(default)]
    pub seasons: Vec<SeasonSummary>,
}
