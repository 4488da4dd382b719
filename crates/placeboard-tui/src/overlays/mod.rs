//! Overlay modules for the TUI.
//!
//! Overlays are modal pickers that temporarily take over keyboard input.
//! Each overlay owns its state, key handler, and render function; the
//! reducer applies the [`OverlayAction`] it returns.

pub mod render_utils;
pub mod resume_picker;
pub mod season_picker;

use crossterm::event::KeyEvent;
use placeboard_core::seasons::SeasonOption;
use ratatui::Frame;
use ratatui::layout::Rect;
pub use resume_picker::ResumePickerState;
pub use season_picker::SeasonPickerState;

/// What the reducer should do after an overlay handled a key.
#[derive(Debug, Clone, PartialEq)]
pub enum OverlayAction {
    SelectSeason(SeasonOption),
    /// Season picker range edited; `(from, to)` inclusive.
    SetYearRange((i32, i32)),
    SelectResume(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverlayTransition {
    Stay,
    Close,
}

#[derive(Debug)]
pub struct OverlayUpdate {
    pub transition: OverlayTransition,
    pub action: Option<OverlayAction>,
}

impl OverlayUpdate {
    pub fn stay() -> Self {
        Self {
            transition: OverlayTransition::Stay,
            action: None,
        }
    }

    pub fn close() -> Self {
        Self {
            transition: OverlayTransition::Close,
            action: None,
        }
    }

    #[must_use]
    pub fn with_action(mut self, action: OverlayAction) -> Self {
        self.action = Some(action);
        self
    }
}

#[derive(Debug)]
pub enum Overlay {
    SeasonPicker(SeasonPickerState),
    ResumePicker(ResumePickerState),
}

impl Overlay {
    pub fn render(&self, frame: &mut Frame, area: Rect) {
        match self {
            Overlay::SeasonPicker(p) => p.render(frame, area),
            Overlay::ResumePicker(p) => p.render(frame, area),
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> OverlayUpdate {
        match self {
            Overlay::SeasonPicker(p) => p.handle_key(key),
            Overlay::ResumePicker(p) => p.handle_key(key),
        }
    }
}
