//! Season statistics: shape validation and chart/table shaping.
//!
//! The chart and the table are both projections of one [`DimensionSeries`],
//! so a bucket shows the same figures in either view.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use placeboard_types::{Dimension, SeasonData, SeasonType, StatBucket};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;

use crate::api::{ApiClient, ApiError};
use crate::format::{format_lakhs, format_percent};

/// Dimensions that must be present and non-empty in every bundle.
const REQUIRED: [(&str, &str); 5] = [
    ("overall", "overallStats"),
    ("department", "departmentWiseStats"),
    ("category", "categoryWiseStats"),
    ("gender", "genderWiseStats"),
    ("course", "courseWiseStats"),
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatsError {
    /// A required dimension is absent or has no buckets.
    MissingDimension(&'static str),
    /// The payload is not shaped like a statistics bundle.
    Malformed(String),
}

impl fmt::Display for StatsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StatsError::MissingDimension(name) => {
                write!(f, "missing or empty {name} statistics")
            }
            StatsError::Malformed(msg) => write!(f, "malformed statistics: {msg}"),
        }
    }
}

impl std::error::Error for StatsError {}

/// Validates a raw statistics payload and decodes it.
///
/// # Errors
/// Returns `MissingDimension` naming the first required dimension that is
/// absent or empty, or `Malformed` if the payload does not decode.
pub fn parse_season_data(value: Value) -> Result<SeasonData, StatsError> {
    let Some(object) = value.as_object() else {
        return Err(StatsError::Malformed("expected a JSON object".to_string()));
    };

    for (name, key) in REQUIRED {
        let present = object
            .get(key)
            .and_then(Value::as_object)
            .is_some_and(|entries| !entries.is_empty());
        if !present {
            return Err(StatsError::MissingDimension(name));
        }
    }

    serde_json::from_value(value).map_err(|e| StatsError::Malformed(e.to_string()))
}

/// Checks an already-decoded bundle for the required dimensions.
///
/// # Errors
/// Returns `MissingDimension` for the first absent or empty one.
pub fn validate(data: &SeasonData) -> Result<(), StatsError> {
    if data.overall_stats.is_none() {
        return Err(StatsError::MissingDimension("overall"));
    }
    for dimension in [
        Dimension::Department,
        Dimension::Category,
        Dimension::Gender,
        Dimension::Course,
    ] {
        if data.dimension(dimension).is_empty() {
            return Err(StatsError::MissingDimension(dimension.name()));
        }
    }
    Ok(())
}

/// Why a season's statistics could not be shown.
#[derive(Debug, Clone)]
pub enum SeasonLoadError {
    /// The request itself failed.
    Fetch(ApiError),
    /// The backend answered with an unusable bundle.
    Invalid(StatsError),
}

impl SeasonLoadError {
    /// Headline shown in place of the statistics.
    pub fn headline(&self) -> &'static str {
        match self {
            SeasonLoadError::Fetch(_) => "Failed to load season data",
            SeasonLoadError::Invalid(_) => "Unable to fetch the data",
        }
    }
}

impl fmt::Display for SeasonLoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SeasonLoadError::Fetch(e) => write!(f, "{}: {e}", self.headline()),
            SeasonLoadError::Invalid(e) => write!(f, "{}: {e}", self.headline()),
        }
    }
}

impl std::error::Error for SeasonLoadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SeasonLoadError::Fetch(e) => Some(e),
            SeasonLoadError::Invalid(e) => Some(e),
        }
    }
}

/// Fetches and validates the statistics bundle for one season.
///
/// # Errors
/// Returns `Fetch` on transport failure and `Invalid` on a bad payload.
pub async fn load_season_data(
    client: &ApiClient,
    season_id: &str,
) -> Result<SeasonData, SeasonLoadError> {
    let raw = client
        .season_stats(season_id)
        .await
        .map_err(SeasonLoadError::Fetch)?;
    parse_season_data(raw).map_err(|e| {
        warn!(season_id, error = %e, "Rejected season statistics");
        SeasonLoadError::Invalid(e)
    })
}

/// Chart or table presentation of a dimension.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    #[default]
    Chart,
    Table,
}

impl ViewMode {
    #[must_use]
    pub fn toggle(self) -> Self {
        match self {
            ViewMode::Chart => ViewMode::Table,
            ViewMode::Table => ViewMode::Chart,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            ViewMode::Chart => "chart",
            ViewMode::Table => "table",
        }
    }
}

impl fmt::Display for ViewMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ViewMode {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "chart" => Ok(Self::Chart),
            "table" => Ok(Self::Table),
            other => Err(format!("Unknown view: {other} (expected chart or table)")),
        }
    }
}

/// Orders bucket keys: keys with a numeric lower bound ("6-7", "9+", "8.5")
/// first by that bound, then everything else lexically.
pub fn bucket_order(a: &str, b: &str) -> Ordering {
    match (lower_bound(a), lower_bound(b)) {
        (Some(x), Some(y)) => x.total_cmp(&y).then_with(|| a.cmp(b)),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => a.cmp(b),
    }
}

fn lower_bound(key: &str) -> Option<f64> {
    let key = key.trim();
    let end = key
        .char_indices()
        .find(|(_, c)| !(c.is_ascii_digit() || *c == '.'))
        .map_or(key.len(), |(i, _)| i);
    key[..end].parse().ok()
}

/// One bucket of a dimension.
#[derive(Debug, Clone, PartialEq)]
pub struct SeriesPoint {
    pub key: String,
    pub stats: StatBucket,
}

/// Ordered buckets of one dimension; source of both chart and table.
#[derive(Debug, Clone, PartialEq)]
pub struct DimensionSeries {
    pub dimension: Dimension,
    pub season_type: SeasonType,
    pub points: Vec<SeriesPoint>,
}

impl DimensionSeries {
    pub fn new(data: &SeasonData, dimension: Dimension, season_type: SeasonType) -> Self {
        let mut points: Vec<SeriesPoint> = data
            .dimension(dimension)
            .iter()
            .map(|(key, stats)| SeriesPoint {
                key: key.clone(),
                stats: stats.clone(),
            })
            .collect();
        points.sort_by(|a, b| bucket_order(&a.key, &b.key));

        Self {
            dimension,
            season_type,
            points,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// `(x, placement %)` per bucket, x being the bucket index.
    #[allow(clippy::cast_precision_loss)]
    pub fn chart_data(&self) -> Vec<(f64, f64)> {
        self.points
            .iter()
            .enumerate()
            .map(|(i, p)| (i as f64, p.stats.placement_percentage))
            .collect()
    }

    pub fn labels(&self) -> Vec<&str> {
        self.points.iter().map(|p| p.key.as_str()).collect()
    }

    pub fn table_headers(&self) -> Vec<String> {
        let comp = self.season_type.compensation_label();
        vec![
            self.dimension.bucket_heading().to_string(),
            "Registered".to_string(),
            "Placed".to_string(),
            "Placement %".to_string(),
            "Unplaced %".to_string(),
            format!("Highest {comp}"),
            format!("Lowest {comp}"),
            format!("Mean {comp}"),
            format!("Median {comp}"),
            format!("Mode {comp}"),
            "Offers".to_string(),
            "Companies".to_string(),
        ]
    }

    pub fn table_rows(&self) -> Vec<Vec<String>> {
        self.points
            .iter()
            .map(|p| {
                let s = &p.stats;
                vec![
                    p.key.clone(),
                    s.total_registered_students_count.to_string(),
                    s.placed_students_count.to_string(),
                    format_percent(s.placement_percentage),
                    format_percent(s.unplaced_percentage),
                    format!("{:.2}", s.highest_package),
                    format!("{:.2}", s.lowest_package),
                    format!("{:.2}", s.mean_package),
                    format!("{:.2}", s.median_package),
                    format!("{:.2}", s.mode_package),
                    s.total_offers.to_string(),
                    s.total_companies_offering.to_string(),
                ]
            })
            .collect()
    }

    /// Tooltip for the bucket at `index`, if any.
    pub fn tooltip(&self, index: usize) -> Option<Tooltip> {
        self.points.get(index).map(|p| Tooltip {
            title: format!("{}: {}", self.dimension.bucket_heading(), p.key),
            lines: tooltip_lines(&p.stats, self.season_type),
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Tooltip {
    pub title: String,
    pub lines: Vec<(String, String)>,
}

/// Full per-bucket statistics as label/value pairs.
pub fn tooltip_lines(stats: &StatBucket, season_type: SeasonType) -> Vec<(String, String)> {
    let comp = season_type.compensation_label();
    vec![
        (
            "Registered".to_string(),
            stats.total_registered_students_count.to_string(),
        ),
        ("Placed".to_string(), stats.placed_students_count.to_string()),
        (
            "Placement %".to_string(),
            format_percent(stats.placement_percentage),
        ),
        (
            "Unplaced %".to_string(),
            format_percent(stats.unplaced_percentage),
        ),
        (
            format!("Highest {comp}"),
            format_lakhs(stats.highest_package),
        ),
        (format!("Lowest {comp}"), format_lakhs(stats.lowest_package)),
        (format!("Mean {comp}"), format_lakhs(stats.mean_package)),
        (format!("Median {comp}"), format_lakhs(stats.median_package)),
        (format!("Mode {comp}"), format_lakhs(stats.mode_package)),
        ("Total Offers".to_string(), stats.total_offers.to_string()),
        (
            "Companies Offering".to_string(),
            stats.total_companies_offering.to_string(),
        ),
    ]
}

/// One headline figure of the overview ribbon.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OverviewItem {
    pub label: String,
    pub value: String,
}

/// Headline figures from the overall bucket.
pub fn overview_items(overall: &StatBucket, season_type: SeasonType) -> Vec<OverviewItem> {
    let comp = season_type.compensation_label();
    let item = |label: String, value: String| OverviewItem { label, value };
    vec![
        item(
            "Registered".to_string(),
            overall.total_registered_students_count.to_string(),
        ),
        item(
            "Placed".to_string(),
            overall.placed_students_count.to_string(),
        ),
        item(
            "Placement %".to_string(),
            format_percent(overall.placement_percentage),
        ),
        item(
            format!("Highest {comp}"),
            format_lakhs(overall.highest_package),
        ),
        item(format!("Mean {comp}"), format_lakhs(overall.mean_package)),
        item(
            format!("Median {comp}"),
            format_lakhs(overall.median_package),
        ),
        item("Offers".to_string(), overall.total_offers.to_string()),
        item(
            "Companies".to_string(),
            overall.total_companies_offering.to_string(),
        ),
    ]
}
