//! Effect handlers for the TUI runtime.
//!
//! Handlers are pure async functions that return the `UiEvent` carrying
//! their result. They perform I/O and never touch state; the runtime spawns
//! them and delivers the event through the inbox.

use placeboard_core::api::ApiClient;
use placeboard_core::apply::{self, ApplyRequest};
use placeboard_core::seasons::SeasonOption;
use placeboard_core::{resumes, stats, trends};
use placeboard_types::Resume;
use tracing::warn;

use crate::events::UiEvent;

pub async fn seasons_load(client: ApiClient) -> UiEvent {
    let result = client.list_seasons().await.map_err(|e| {
        warn!(error = %e, "Failed to load seasons");
        format!("Failed to load seasons: {}", e.message)
    });
    UiEvent::SeasonsLoaded(result)
}

pub async fn stats_load(client: ApiClient, season_id: String) -> UiEvent {
    let result = stats::load_season_data(&client, &season_id).await;
    if let Err(e) = &result {
        warn!(season_id = %season_id, error = %e, "Season statistics unavailable");
    }
    UiEvent::StatsLoaded { season_id, result }
}

pub async fn trend_load(client: ApiClient, seasons: Vec<SeasonOption>) -> UiEvent {
    UiEvent::TrendLoaded(trends::fetch_trend(&client, seasons).await)
}

pub async fn salary_load(client: ApiClient, salary_id: String) -> UiEvent {
    let result = client.salary(&salary_id).await.map_err(|e| {
        warn!(salary_id = %salary_id, error = %e, "Failed to load salary");
        format!("Failed to load job details: {}", e.message)
    });
    UiEvent::SalaryLoaded(result)
}

pub async fn resumes_load(client: ApiClient) -> UiEvent {
    let result = client.resumes().await.map_err(|e| {
        warn!(error = %e, "Failed to load resumes");
        format!("Failed to load resumes: {}", e.message)
    });
    UiEvent::ResumesLoaded(result)
}

pub async fn apply_submit(
    client: ApiClient,
    salary_id: String,
    selected_resume: Option<String>,
    resumes: Vec<Resume>,
) -> UiEvent {
    let request = ApplyRequest {
        salary_id: &salary_id,
        selected_resume: selected_resume.as_deref(),
        resumes: &resumes,
    };
    let result = apply::submit(&client, request).await;
    if let Err(e) = &result {
        warn!(salary_id = %salary_id, error = ?e, "Application failed");
    }
    UiEvent::ApplyFinished(result)
}

pub async fn resume_open(client: ApiClient, filepath: String) -> UiEvent {
    let result = resumes::open_resume(&client, &filepath)
        .await
        .map_err(|e| {
            warn!(filepath = %filepath, error = %e, "Failed to open resume");
            format!("{e:#}")
        });
    UiEvent::ResumeOpened(result)
}
