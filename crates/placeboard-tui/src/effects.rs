//! UI effect types.
//!
//! Effects are commands returned by the reducer that the runtime executes.
//! They represent I/O and task spawning only; the reducer never performs I/O.
//!
//! Cancellation is initiated from the reducer via `UiEffect::CancelTask`.
//! The runtime executes these by calling `token.cancel()` on the provided token.

use placeboard_core::seasons::SeasonOption;
use placeboard_types::Resume;
use tokio_util::sync::CancellationToken;

use crate::common::{TaskId, TaskKind};

#[derive(Debug)]
pub enum UiEffect {
    Quit,

    FetchSeasons {
        task: TaskId,
    },
    FetchStats {
        task: TaskId,
        season_id: String,
    },
    /// Fetch statistics of every season in range for the trend chart.
    FetchTrend {
        task: TaskId,
        seasons: Vec<SeasonOption>,
    },
    FetchSalary {
        task: TaskId,
        salary_id: String,
    },
    FetchResumes {
        task: TaskId,
    },
    SubmitApplication {
        task: TaskId,
        salary_id: String,
        selected_resume: Option<String>,
        resumes: Vec<Resume>,
    },
    /// Download a resume and hand it to the system viewer.
    OpenResume {
        task: TaskId,
        filepath: String,
    },

    CancelTask {
        kind: TaskKind,
        token: Option<CancellationToken>,
    },
}
