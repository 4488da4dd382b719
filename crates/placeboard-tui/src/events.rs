//! UI event types.
//!
//! Events are everything the reducer reacts to: terminal input, ticks, and
//! results of async tasks delivered through the runtime inbox.

use std::path::PathBuf;

use crossterm::event::Event;
use placeboard_core::apply::{ApplyError, ApplyOutcome};
use placeboard_core::stats::SeasonLoadError;
use placeboard_core::trends::TrendSeries;
use placeboard_types::{Resume, Salary, SeasonData, SeasonSummary};

use crate::common::{TaskCompleted, TaskKind, TaskStarted};

#[derive(Debug)]
pub enum UiEvent {
    /// Periodic tick (spinner, toast expiry, render cadence).
    Tick,
    Terminal(Event),

    TaskStarted {
        kind: TaskKind,
        started: TaskStarted,
    },
    /// Wraps a task result; dropped unless the task is still the active one.
    TaskCompleted {
        kind: TaskKind,
        completed: TaskCompleted<Box<UiEvent>>,
    },

    SeasonsLoaded(Result<Vec<SeasonSummary>, String>),
    StatsLoaded {
        season_id: String,
        result: Result<SeasonData, SeasonLoadError>,
    },
    TrendLoaded(TrendSeries),
    SalaryLoaded(Result<Salary, String>),
    ResumesLoaded(Result<Vec<Resume>, String>),
    ApplyFinished(Result<ApplyOutcome, ApplyError>),
    ResumeOpened(Result<PathBuf, String>),
}
