//! Pure view/render functions for the TUI.
//!
//! Functions here take `&AppState`, draw to a ratatui Frame, and never
//! mutate state or return effects.

use ratatui::Frame;

use crate::features::dashboard::render_dashboard;
use crate::features::salary::render_salary;
use crate::features::toast::render_toast;
use crate::state::{AppState, Screen};

/// Spinner frames for in-flight requests.
const SPINNER_FRAMES: &[&str] = &["◐", "◓", "◑", "◒"];

pub fn spinner(frame_idx: usize) -> &'static str {
    SPINNER_FRAMES[(frame_idx / 3) % SPINNER_FRAMES.len()]
}

/// Renders the entire TUI to the frame.
pub fn render(app: &AppState, frame: &mut Frame) {
    let area = frame.area();
    let spin = spinner(app.spinner_frame);

    match &app.screen {
        Screen::Dashboard(dash) => render_dashboard(frame, area, dash, spin),
        Screen::Salary(card) => render_salary(frame, area, card, spin),
    }

    if let Some(overlay) = &app.overlay {
        overlay.render(frame, area);
    }

    if let Some(toast) = &app.toast {
        render_toast(frame, area, toast);
    }
}

#[cfg(test)]
mod tests {
    use placeboard_core::stats::ViewMode;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    use super::*;
    use crate::features::dashboard::DashboardState;
    use crate::state::Load;

    #[test]
    fn test_spinner_cycles() {
        assert_eq!(spinner(0), "◐");
        assert_eq!(spinner(3), "◓");
        assert_eq!(spinner(12), "◐");
    }

    #[test]
    fn test_render_dashboard_with_failed_seasons() {
        let mut dash = DashboardState::new(ViewMode::Chart, (2020, 2025), None);
        dash.seasons = Load::Failed("Failed to load seasons: HTTP 500".to_string());
        let app = AppState::new(Screen::Dashboard(dash));

        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
        terminal.draw(|frame| render(&app, frame)).unwrap();

        let buffer = terminal.backend().buffer();
        let text: String = buffer.content().iter().map(|c| c.symbol()).collect();
        assert!(text.contains("Failed to load seasons"));
    }
}
