use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::de::null_as_default;

/// Per-bucket statistics as computed by the backend.
///
/// Packages are expressed in lakhs. For intern seasons the same fields hold
/// stipends.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StatBucket {
    #[serde(deserialize_with = "null_as_default")]
    pub total_registered_students_count: u64,
    #[serde(deserialize_with = "null_as_default")]
    pub placed_students_count: u64,
    #[serde(deserialize_with = "null_as_default")]
    pub placement_percentage: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub unplaced_percentage: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub highest_package: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub lowest_package: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub mean_package: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub median_package: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub mode_package: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub total_offers: u64,
    #[serde(deserialize_with = "null_as_default")]
    pub total_companies_offering: u64,
}

/// Full statistics bundle for one season.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeasonData {
    #[serde(default)]
    pub overall_stats: Option<StatBucket>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub department_wise_stats: BTreeMap<String, StatBucket>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub category_wise_stats: BTreeMap<String, StatBucket>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub gender_wise_stats: BTreeMap<String, StatBucket>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub course_wise_stats: BTreeMap<String, StatBucket>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub academic_wise_stats: BTreeMap<String, StatBucket>,
}

impl SeasonData {
    /// Returns the bucket map for a dimension.
    pub fn dimension(&self, dimension: Dimension) -> &BTreeMap<String, StatBucket> {
        match dimension {
            Dimension::Department => &self.department_wise_stats,
            Dimension::Category => &self.category_wise_stats,
            Dimension::Gender => &self.gender_wise_stats,
            Dimension::Course => &self.course_wise_stats,
            Dimension::Academic => &self.academic_wise_stats,
        }
    }
}

/// A grouping axis of the season statistics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dimension {
    Department,
    Category,
    Gender,
    Course,
    /// CPI buckets.
    Academic,
}

impl Dimension {
    /// All dimensions in display order.
    pub fn all() -> &'static [Dimension] {
        &[
            Dimension::Department,
            Dimension::Category,
            Dimension::Gender,
            Dimension::Course,
            Dimension::Academic,
        ]
    }

    /// Panel title ("Offers by Department").
    pub fn title(self) -> &'static str {
        match self {
            Dimension::Department => "Offers by Department",
            Dimension::Category => "Offers by Category",
            Dimension::Gender => "Offers by Gender",
            Dimension::Course => "Offers by Course",
            Dimension::Academic => "Offers by Academics",
        }
    }

    /// Heading of the bucket column / axis.
    pub fn bucket_heading(self) -> &'static str {
        match self {
            Dimension::Department => "Department",
            Dimension::Category => "Category",
            Dimension::Gender => "Gender",
            Dimension::Course => "Course",
            Dimension::Academic => "CPI",
        }
    }

    /// Short lowercase name, as accepted on the command line.
    pub fn name(self) -> &'static str {
        match self {
            Dimension::Department => "department",
            Dimension::Category => "category",
            Dimension::Gender => "gender",
            Dimension::Course => "course",
            Dimension::Academic => "academic",
        }
    }

    /// Next dimension in display order (wraps).
    #[must_use]
    pub fn next(self) -> Self {
        let all = Self::all();
        let idx = all.iter().position(|d| *d == self).unwrap_or(0);
        all[(idx + 1) % all.len()]
    }

    /// Previous dimension in display order (wraps).
    #[must_use]
    pub fn prev(self) -> Self {
        let all = Self::all();
        let idx = all.iter().position(|d| *d == self).unwrap_or(0);
        all[(idx + all.len() - 1) % all.len()]
    }
}

impl std::str::FromStr for Dimension {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "department" | "dept" => Ok(Self::Department),
            "category" => Ok(Self::Category),
            "gender" => Ok(Self::Gender),
            "course" => Ok(Self::Course),
            "academic" | "academics" | "cpi" => Ok(Self::Academic),
            other => Err(format!(
                "Unknown dimension: {other} (expected department, category, gender, course or cpi)"
            )),
        }
    }
}
