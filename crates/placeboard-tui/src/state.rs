//! Application state.
//!
//! `AppState` is mutated only by the reducer in `update.rs`; the runtime
//! reads it for rendering.

use crate::common::{TaskSeq, Tasks};
use crate::features::dashboard::DashboardState;
use crate::features::salary::SalaryState;
use crate::features::toast::Toast;
use crate::overlays::Overlay;

/// Remote data that is fetched per view.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Load<T> {
    #[default]
    Idle,
    Loading,
    Loaded(T),
    /// Headline to show in place of the data.
    Failed(String),
}

impl<T> Load<T> {
    pub fn loaded(&self) -> Option<&T> {
        match self {
            Load::Loaded(value) => Some(value),
            _ => None,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, Load::Loading)
    }

    pub fn is_idle(&self) -> bool {
        matches!(self, Load::Idle)
    }
}

#[derive(Debug)]
pub enum Screen {
    Dashboard(DashboardState),
    Salary(SalaryState),
}

#[derive(Debug)]
pub struct AppState {
    pub screen: Screen,
    pub overlay: Option<Overlay>,
    pub tasks: Tasks,
    pub task_seq: TaskSeq,
    pub toast: Option<Toast>,
    pub spinner_frame: usize,
    pub should_quit: bool,
}

impl AppState {
    pub fn new(screen: Screen) -> Self {
        Self {
            screen,
            overlay: None,
            tasks: Tasks::default(),
            task_seq: TaskSeq::default(),
            toast: None,
            spinner_frame: 0,
            should_quit: false,
        }
    }

    pub fn dashboard(&self) -> Option<&DashboardState> {
        match &self.screen {
            Screen::Dashboard(d) => Some(d),
            Screen::Salary(_) => None,
        }
    }

    pub fn salary(&self) -> Option<&SalaryState> {
        match &self.screen {
            Screen::Salary(s) => Some(s),
            Screen::Dashboard(_) => None,
        }
    }
}
