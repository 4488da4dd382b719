//! Overall placement % across seasons.

use futures_util::future::join_all;
use placeboard_types::SeasonData;
use tracing::debug;

use crate::api::ApiClient;
use crate::seasons::SeasonOption;
use crate::stats::{SeasonLoadError, load_season_data};

#[derive(Debug, Clone, PartialEq)]
pub struct TrendPoint {
    pub season: SeasonOption,
    pub placement_percentage: f64,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TrendSeries {
    /// Oldest year first, placement before intern within a year.
    pub points: Vec<TrendPoint>,
    /// Seasons whose statistics failed to load or validate.
    pub skipped: usize,
}

impl TrendSeries {
    /// `(x, placement %)` per point, x being the point index.
    #[allow(clippy::cast_precision_loss)]
    pub fn chart_data(&self) -> Vec<(f64, f64)> {
        self.points
            .iter()
            .enumerate()
            .map(|(i, p)| (i as f64, p.placement_percentage))
            .collect()
    }

    pub fn footer(&self) -> Option<String> {
        match self.skipped {
            0 => None,
            1 => Some("1 season skipped (statistics unavailable)".to_string()),
            n => Some(format!("{n} seasons skipped (statistics unavailable)")),
        }
    }
}

/// Builds the trend from per-season load results.
pub fn trend_points(
    results: Vec<(SeasonOption, Result<SeasonData, SeasonLoadError>)>,
) -> TrendSeries {
    let mut series = TrendSeries::default();
    for (season, result) in results {
        let overall = result
            .ok()
            .and_then(|data| data.overall_stats)
            .map(|overall| overall.placement_percentage);
        match overall {
            Some(placement_percentage) => series.points.push(TrendPoint {
                season,
                placement_percentage,
            }),
            None => series.skipped += 1,
        }
    }
    series.points.sort_by(|a, b| {
        a.season
            .year
            .cmp(&b.season.year)
            .then_with(|| a.season.season_type.rank().cmp(&b.season.season_type.rank()))
    });
    series
}

/// Fetches statistics for every season concurrently and builds the trend.
pub async fn fetch_trend(client: &ApiClient, seasons: Vec<SeasonOption>) -> TrendSeries {
    let fetches = seasons.iter().map(|s| load_season_data(client, &s.id));
    let results = join_all(fetches).await;
    let series = trend_points(seasons.into_iter().zip(results).collect());
    debug!(
        points = series.points.len(),
        skipped = series.skipped,
        "Built placement trend"
    );
    series
}

#[cfg(test)]
mod tests {
    use placeboard_types::{SeasonType, StatBucket};

    use super::*;
    use crate::api::{ApiError, ApiErrorKind};
    use crate::stats::StatsError;

    fn option(id: &str, season_type: SeasonType, year: i32) -> SeasonOption {
        SeasonOption {
            id: id.to_string(),
            label: format!("{season_type} {year}"),
            season_type,
            year,
        }
    }

    fn data(pct: f64) -> SeasonData {
        SeasonData {
            overall_stats: Some(StatBucket {
                placement_percentage: pct,
                ..StatBucket::default()
            }),
            ..SeasonData::default()
        }
    }

    #[test]
    fn test_trend_orders_oldest_first_and_counts_failures() {
        let series = trend_points(vec![
            (option("i24", SeasonType::Intern, 2024), Ok(data(60.0))),
            (option("p24", SeasonType::Placement, 2024), Ok(data(85.0))),
            (
                option("p23", SeasonType::Placement, 2023),
                Err(SeasonLoadError::Invalid(StatsError::MissingDimension(
                    "gender",
                ))),
            ),
            (
                option("p22", SeasonType::Placement, 2022),
                Err(SeasonLoadError::Fetch(ApiError::new(
                    ApiErrorKind::Network,
                    "down",
                ))),
            ),
            (option("p21", SeasonType::Placement, 2021), Ok(data(72.5))),
        ]);

        let ids: Vec<&str> = series.points.iter().map(|p| p.season.id.as_str()).collect();
        assert_eq!(ids, ["p21", "p24", "i24"]);
        assert_eq!(series.skipped, 2);
        assert_eq!(series.chart_data()[1], (1.0, 85.0));
        assert_eq!(
            series.footer().as_deref(),
            Some("2 seasons skipped (statistics unavailable)")
        );
    }

    #[test]
    fn test_empty_trend_has_no_footer() {
        let series = trend_points(Vec::new());
        assert!(series.points.is_empty());
        assert_eq!(series.footer(), None);
    }
}
