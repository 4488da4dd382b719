use placeboard_core::seasons::{self, SeasonOption};
use placeboard_core::stats::{DimensionSeries, ViewMode};
use placeboard_core::trends::TrendSeries;
use placeboard_types::{Dimension, SeasonData};

use crate::state::Load;

/// Which dashboard panel fills the body.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum View {
    /// One season, broken down by a dimension.
    #[default]
    Breakdown,
    /// Overall placement % across the seasons in range.
    Trends,
}

impl View {
    #[must_use]
    pub fn toggle(self) -> Self {
        match self {
            View::Breakdown => View::Trends,
            View::Trends => View::Breakdown,
        }
    }
}

#[derive(Debug, Clone)]
pub struct DashboardState {
    /// All seasons, sorted for display.
    pub seasons: Load<Vec<SeasonOption>>,
    pub year_range: (i32, i32),
    /// Season id passed on the command line, honored on first load.
    pub requested_season: Option<String>,
    pub selected: Option<SeasonOption>,
    pub stats: Load<SeasonData>,
    pub view: View,
    pub dimension: Dimension,
    pub mode: ViewMode,
    /// Bucket under the chart cursor / highlighted table row.
    pub cursor: usize,
    pub trend: Load<TrendSeries>,
}

impl DashboardState {
    pub fn new(mode: ViewMode, year_range: (i32, i32), requested_season: Option<String>) -> Self {
        Self {
            seasons: Load::Idle,
            year_range,
            requested_season,
            selected: None,
            stats: Load::Idle,
            view: View::Breakdown,
            dimension: Dimension::Academic,
            mode,
            cursor: 0,
            trend: Load::Idle,
        }
    }

    /// Seasons inside the year range.
    pub fn visible_seasons(&self) -> Vec<SeasonOption> {
        self.seasons
            .loaded()
            .map(|all| seasons::filter_year_range(all, self.year_range))
            .unwrap_or_default()
    }

    /// Series for the active dimension of the loaded season.
    pub fn series(&self) -> Option<DimensionSeries> {
        let data = self.stats.loaded()?;
        let season_type = self.selected.as_ref()?.season_type;
        Some(DimensionSeries::new(data, self.dimension, season_type))
    }

    pub fn move_cursor(&mut self, forward: bool) {
        let len = self.series().map_or(0, |s| s.len());
        if len == 0 {
            self.cursor = 0;
        } else if forward {
            self.cursor = (self.cursor + 1).min(len - 1);
        } else {
            self.cursor = self.cursor.saturating_sub(1);
        }
    }

    pub fn clamp_cursor(&mut self) {
        let len = self.series().map_or(0, |s| s.len());
        self.cursor = self.cursor.min(len.saturating_sub(1));
    }
}
