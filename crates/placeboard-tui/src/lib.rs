//! Full-screen TUI for placeboard: the season dashboard and the salary card.

pub mod common;
pub mod effects;
pub mod events;
pub mod features;
pub mod overlays;
pub mod render;
pub mod runtime;
pub mod state;
pub mod terminal;
pub mod update;

use std::io::{IsTerminal, stderr};

use anyhow::Result;
use placeboard_core::api::ApiClient;
use placeboard_core::config::Config;
use placeboard_core::seasons;
use placeboard_types::SeasonType;
pub use runtime::TuiRuntime;

use crate::features::dashboard::DashboardState;
use crate::features::salary::SalaryState;
use crate::state::{AppState, Screen};

fn require_terminal(command: &str) -> Result<()> {
    if !stderr().is_terminal() {
        anyhow::bail!(
            "The {command} requires a terminal.\n\
             Use `placeboard stats` or `placeboard salary show` for plain output."
        );
    }
    Ok(())
}

/// Runs the interactive statistics dashboard.
///
/// `initial_season` preselects a season id once the season list arrives.
pub async fn run_dashboard(config: &Config, initial_season: Option<String>) -> Result<()> {
    require_terminal("dashboard")?;
    let client = ApiClient::from_config(config)?;
    let year_range = seasons::default_year_range(seasons::current_year(), config.year_span);
    let state = AppState::new(Screen::Dashboard(DashboardState::new(
        config.default_view,
        year_range,
        initial_season,
    )));

    let mut runtime = TuiRuntime::new(state, client)?;
    runtime.run()
}

/// Runs the interactive salary card for one job offer.
pub async fn run_salary_card(
    config: &Config,
    salary_id: String,
    season_type: SeasonType,
) -> Result<()> {
    require_terminal("salary card")?;
    let client = ApiClient::from_config(config)?;
    let state = AppState::new(Screen::Salary(SalaryState::new(salary_id, season_type)));

    let mut runtime = TuiRuntime::new(state, client)?;
    runtime.run()
}
