use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use placeboard_types::Resume;
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{List, ListItem, ListState};

use super::{OverlayAction, OverlayUpdate};

#[derive(Debug, Clone)]
pub struct ResumePickerState {
    resumes: Vec<Resume>,
    pub selected: usize,
}

impl ResumePickerState {
    pub fn open(resumes: Vec<Resume>, current: Option<&str>) -> Self {
        let selected = current
            .and_then(|id| resumes.iter().position(|r| r.id == id))
            .unwrap_or(0);
        Self { resumes, selected }
    }

    pub fn render(&self, frame: &mut Frame, area: Rect) {
        render_resume_picker(frame, self, area);
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> OverlayUpdate {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

        match key.code {
            KeyCode::Esc | KeyCode::Char('c') if key.code == KeyCode::Esc || ctrl => {
                OverlayUpdate::close()
            }
            KeyCode::Up | KeyCode::Char('k') => {
                self.selected = self.selected.saturating_sub(1);
                OverlayUpdate::stay()
            }
            KeyCode::Down | KeyCode::Char('j') => {
                if self.selected + 1 < self.resumes.len() {
                    self.selected += 1;
                }
                OverlayUpdate::stay()
            }
            KeyCode::Enter => match self.resumes.get(self.selected) {
                Some(resume) => {
                    OverlayUpdate::close().with_action(OverlayAction::SelectResume(resume.id.clone()))
                }
                None => OverlayUpdate::close(),
            },
            _ => OverlayUpdate::stay(),
        }
    }
}

fn render_resume_picker(frame: &mut Frame, picker: &ResumePickerState, area: Rect) {
    use super::render_utils::{InputHint, OverlayConfig, render_overlay, render_separator};

    let height = u16::try_from(picker.resumes.len())
        .unwrap_or(u16::MAX)
        .saturating_add(5)
        .clamp(7, 18);
    let hints = [
        InputHint::new("↑↓", "navigate"),
        InputHint::new("Enter", "select"),
        InputHint::new("Esc", "cancel"),
    ];
    let layout = render_overlay(
        frame,
        area,
        &OverlayConfig {
            title: "Resume",
            border_color: Color::Magenta,
            width: 56,
            height,
            hints: &hints,
        },
    );

    let list_height = layout.body.height.saturating_sub(1);
    let list_area = Rect::new(layout.body.x, layout.body.y, layout.body.width, list_height);

    let items: Vec<ListItem> = picker
        .resumes
        .iter()
        .map(|r| {
            let mut spans = vec![Span::styled(
                r.name.clone(),
                Style::default().add_modifier(Modifier::BOLD),
            )];
            if r.verified {
                spans.push(Span::styled(" ✓", Style::default().fg(Color::Green)));
            }
            ListItem::new(Line::from(spans))
        })
        .collect();
    let list = List::new(items)
        .highlight_style(
            Style::default()
                .bg(Color::Magenta)
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("▶ ");
    let mut list_state = ListState::default();
    list_state.select(Some(picker.selected));
    frame.render_stateful_widget(list, list_area, &mut list_state);

    render_separator(frame, layout.body, list_height);
}
