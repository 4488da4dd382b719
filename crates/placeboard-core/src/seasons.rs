//! Season picker options.

use chrono::Datelike;
use placeboard_types::{SeasonSummary, SeasonType};

/// One selectable season.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeasonOption {
    pub id: String,
    /// "<type> <year>", e.g. "Placement 2024"
    pub label: String,
    pub season_type: SeasonType,
    pub year: i32,
}

impl From<SeasonSummary> for SeasonOption {
    fn from(summary: SeasonSummary) -> Self {
        Self {
            label: format!("{} {}", summary.season_type, summary.year),
            id: summary.id,
            season_type: summary.season_type,
            year: summary.year,
        }
    }
}

/// Maps the season list into options, newest year first and placement
/// before intern within a year. Ties keep their backend order.
pub fn build_options(summaries: Vec<SeasonSummary>) -> Vec<SeasonOption> {
    let mut options: Vec<SeasonOption> = summaries.into_iter().map(SeasonOption::from).collect();
    options.sort_by(|a, b| {
        b.year
            .cmp(&a.year)
            .then_with(|| a.season_type.rank().cmp(&b.season_type.rank()))
    });
    options
}

/// The season auto-selected on load: the first sorted option.
pub fn default_selection(options: &[SeasonOption]) -> Option<&SeasonOption> {
    options.first()
}

/// Keeps options whose year lies in `from..=to`.
pub fn filter_year_range(options: &[SeasonOption], (from, to): (i32, i32)) -> Vec<SeasonOption> {
    options
        .iter()
        .filter(|o| (from..=to).contains(&o.year))
        .cloned()
        .collect()
}

/// `[current_year - span, current_year]`.
pub fn default_year_range(current_year: i32, span: u32) -> (i32, i32) {
    let span = i32::try_from(span).unwrap_or(i32::MAX);
    (current_year.saturating_sub(span), current_year)
}

pub fn current_year() -> i32 {
    chrono::Local::now().year()
}
