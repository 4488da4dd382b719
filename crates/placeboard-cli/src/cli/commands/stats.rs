//! `placeboard stats`: overview plus one dimension as a table or a text chart.

use std::fmt::Write as _;

use anyhow::{Result, anyhow};
use placeboard_core::api::ApiClient;
use placeboard_core::config::Config;
use placeboard_core::format::format_percent;
use placeboard_core::seasons::{self, SeasonOption};
use placeboard_core::stats::{self, DimensionSeries, ViewMode};
use placeboard_types::{Dimension, SeasonData};

use super::table;

/// Width of a 100% bar in the text chart.
const BAR_WIDTH: usize = 40;

pub async fn run(
    config: &Config,
    season_id: &str,
    dimension: Dimension,
    view: ViewMode,
) -> Result<()> {
    let client = ApiClient::from_config(config)?;
    let season = seasons::build_options(client.list_seasons().await?)
        .into_iter()
        .find(|s| s.id == season_id)
        .ok_or_else(|| anyhow!("Season {season_id} not found"))?;
    let data = stats::load_season_data(&client, season_id).await?;

    print!("{}", render(&season, &data, dimension, view));
    Ok(())
}

pub(crate) fn render(
    season: &SeasonOption,
    data: &SeasonData,
    dimension: Dimension,
    view: ViewMode,
) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", season.label);

    if let Some(overall) = &data.overall_stats {
        for item in stats::overview_items(overall, season.season_type) {
            let _ = writeln!(out, "  {}: {}", item.label, item.value);
        }
    }
    let _ = writeln!(out);
    let _ = writeln!(out, "{}", dimension.title());

    let series = DimensionSeries::new(data, dimension, season.season_type);
    if series.is_empty() {
        let _ = writeln!(out, "  No {} statistics for this season", dimension.name());
        return out;
    }

    match view {
        ViewMode::Table => {
            let _ = writeln!(
                out,
                "{}",
                table(
                    &series
                        .table_headers()
                        .iter()
                        .map(String::as_str)
                        .collect::<Vec<_>>(),
                    series.table_rows(),
                )
            );
        }
        ViewMode::Chart => out.push_str(&bar_chart(&series)),
    }
    out
}

/// One bar per bucket, scaled so 100% fills `BAR_WIDTH`.
fn bar_chart(series: &DimensionSeries) -> String {
    let label_width = series
        .points
        .iter()
        .map(|p| p.key.chars().count())
        .max()
        .unwrap_or(0);

    let mut out = String::new();
    for point in &series.points {
        let pct = point.stats.placement_percentage.clamp(0.0, 100.0);
        let filled = ((pct / 100.0) * BAR_WIDTH as f64).round() as usize;
        let _ = writeln!(
            out,
            "  {:<label_width$} │{}{} {}",
            point.key,
            "█".repeat(filled),
            " ".repeat(BAR_WIDTH - filled),
            format_percent(point.stats.placement_percentage),
        );
    }
    out
}
