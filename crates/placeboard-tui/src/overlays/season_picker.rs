use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use placeboard_core::seasons::{self, SeasonOption};
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{List, ListItem, ListState, Paragraph};

use super::{OverlayAction, OverlayUpdate};

/// Season selection; limited to the year range unless `show_all`.
///
/// `[`/`]` move the first year and `{`/`}` the last year of the range.
#[derive(Debug, Clone)]
pub struct SeasonPickerState {
    all: Vec<SeasonOption>,
    year_range: (i32, i32),
    pub show_all: bool,
    pub selected: usize,
}

impl SeasonPickerState {
    pub fn open(all: Vec<SeasonOption>, year_range: (i32, i32), current: Option<&str>) -> Self {
        let mut picker = Self {
            all,
            year_range,
            show_all: false,
            selected: 0,
        };
        picker.select_id(current);
        picker
    }

    pub fn options(&self) -> Vec<SeasonOption> {
        if self.show_all {
            self.all.clone()
        } else {
            seasons::filter_year_range(&self.all, self.year_range)
        }
    }

    pub fn year_range(&self) -> (i32, i32) {
        self.year_range
    }

    /// Shifts one end of the range, keeping `from <= to`, and reports the
    /// new range to the reducer.
    fn shift_range(&mut self, from_delta: i32, to_delta: i32) -> OverlayUpdate {
        let current = self.options().get(self.selected).map(|o| o.id.clone());
        let (from, to) = self.year_range;
        let range = (from + from_delta, to + to_delta);
        if range.0 > range.1 {
            return OverlayUpdate::stay();
        }
        self.year_range = range;
        self.show_all = false;
        self.select_id(current.as_deref());
        OverlayUpdate::stay().with_action(OverlayAction::SetYearRange(range))
    }

    fn select_id(&mut self, id: Option<&str>) {
        self.selected = id
            .and_then(|id| self.options().iter().position(|o| o.id == id))
            .unwrap_or(0);
    }

    pub fn render(&self, frame: &mut Frame, area: Rect) {
        render_season_picker(frame, self, area);
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> OverlayUpdate {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        let len = self.options().len();

        match key.code {
            KeyCode::Esc | KeyCode::Char('c') if key.code == KeyCode::Esc || ctrl => {
                OverlayUpdate::close()
            }
            KeyCode::Up | KeyCode::Char('k') => {
                self.selected = self.selected.saturating_sub(1);
                OverlayUpdate::stay()
            }
            KeyCode::Down | KeyCode::Char('j') => {
                if self.selected + 1 < len {
                    self.selected += 1;
                }
                OverlayUpdate::stay()
            }
            KeyCode::Char('a') => {
                let current = self.options().get(self.selected).map(|o| o.id.clone());
                self.show_all = !self.show_all;
                self.select_id(current.as_deref());
                OverlayUpdate::stay()
            }
            KeyCode::Char('[') => self.shift_range(-1, 0),
            KeyCode::Char(']') => self.shift_range(1, 0),
            KeyCode::Char('{') => self.shift_range(0, -1),
            KeyCode::Char('}') => self.shift_range(0, 1),
            KeyCode::Enter => match self.options().get(self.selected) {
                Some(option) => {
                    OverlayUpdate::close().with_action(OverlayAction::SelectSeason(option.clone()))
                }
                None => OverlayUpdate::close(),
            },
            _ => OverlayUpdate::stay(),
        }
    }
}

fn render_season_picker(frame: &mut Frame, picker: &SeasonPickerState, area: Rect) {
    use super::render_utils::{InputHint, OverlayConfig, render_overlay, render_separator};

    let options = picker.options();
    let height = u16::try_from(options.len())
        .unwrap_or(u16::MAX)
        .saturating_add(5)
        .clamp(7, 20);

    let all_hint = if picker.show_all { "in range" } else { "all years" };
    let hints = [
        InputHint::new("↑↓", "navigate"),
        InputHint::new("a", all_hint),
        InputHint::new("[]{}", "years"),
        InputHint::new("Enter", "select"),
        InputHint::new("Esc", "cancel"),
    ];
    let title = if picker.show_all {
        "Season (all years)".to_string()
    } else {
        format!("Season ({}–{})", picker.year_range.0, picker.year_range.1)
    };
    let layout = render_overlay(
        frame,
        area,
        &OverlayConfig {
            title: &title,
            border_color: Color::Cyan,
            width: 60,
            height,
            hints: &hints,
        },
    );

    let list_height = layout.body.height.saturating_sub(1);
    let list_area = Rect::new(layout.body.x, layout.body.y, layout.body.width, list_height);

    if options.is_empty() {
        frame.render_widget(
            Paragraph::new(Line::from(Span::styled(
                "No seasons in range (press a to show all)",
                Style::default().fg(Color::DarkGray),
            ))),
            list_area,
        );
    } else {
        let items: Vec<ListItem> = options
            .iter()
            .map(|o| {
                ListItem::new(Line::from(Span::styled(
                    o.label.clone(),
                    Style::default().add_modifier(Modifier::BOLD),
                )))
            })
            .collect();
        let list = List::new(items)
            .highlight_style(
                Style::default()
                    .bg(Color::Cyan)
                    .fg(Color::Black)
                    .add_modifier(Modifier::BOLD),
            )
            .highlight_symbol("▶ ");
        let mut list_state = ListState::default();
        list_state.select(Some(picker.selected));
        frame.render_stateful_widget(list, list_area, &mut list_state);
    }

    render_separator(frame, layout.body, list_height);
}
