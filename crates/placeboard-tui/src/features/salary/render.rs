use placeboard_core::card::{CardTable, Field, SalaryCard, verified_label};
use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};

use super::state::SalaryState;
use crate::common::columns;
use crate::overlays::render_utils::{InputHint, render_hints};
use crate::state::Load;

pub fn render_salary(frame: &mut Frame, area: Rect, salary: &SalaryState, spinner: &str) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(5), Constraint::Length(1)])
        .split(area);

    let body = match &salary.salary {
        Load::Idle | Load::Loading => vec![Line::from(Span::styled(
            format!("{spinner} Loading salary details…"),
            Style::default().fg(Color::Yellow),
        ))],
        Load::Failed(headline) => vec![Line::from(Span::styled(
            headline.clone(),
            Style::default().fg(Color::Red),
        ))],
        Load::Loaded(_) => match salary.card() {
            Some(card) => card_lines(&card, salary),
            None => Vec::new(),
        },
    };

    let title = salary
        .card()
        .map_or_else(|| " Salary ".to_string(), |c| format!(" {} ", c.company));
    frame.render_widget(
        Paragraph::new(body)
            .block(
                Block::default()
                    .title(title)
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::DarkGray)),
            )
            .wrap(Wrap { trim: false })
            .scroll((salary.scroll, 0)),
        chunks[0],
    );

    let toggle = if salary.expanded {
        "hide details"
    } else {
        "view details"
    };
    let hints = [
        InputHint::new("Enter", toggle),
        InputHint::new("p", "pick resume"),
        InputHint::new("a", "apply"),
        InputHint::new("o", "open resume"),
        InputHint::new("↑↓", "scroll"),
        InputHint::new("q", "quit"),
    ];
    render_hints(frame, chunks[1], &hints, Color::Cyan);
}

fn card_lines(card: &SalaryCard, salary: &SalaryState) -> Vec<Line<'static>> {
    let mut lines = Vec::new();

    let mut summary = vec![Span::styled(
        card.company.clone(),
        Style::default().add_modifier(Modifier::BOLD),
    )];
    if card.applied {
        summary.push(Span::raw("  "));
        summary.push(Span::styled(
            " Applied ",
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD | Modifier::REVERSED),
        ));
    }
    lines.push(Line::from(summary));
    lines.push(Line::from(Span::styled(
        card.headline.clone(),
        Style::default().fg(Color::Cyan),
    )));
    lines.push(Line::default());

    push_fields(&mut lines, &card.primary);

    if salary.expanded {
        for group in &card.compensation_groups {
            push_separator(&mut lines);
            push_fields(&mut lines, group);
        }

        push_separator(&mut lines);
        push_fields(&mut lines, &card.selection);

        push_separator(&mut lines);
        push_heading(&mut lines, "Selection Procedure");
        push_table(&mut lines, &card.tests);
        push_table(&mut lines, &card.interviews);

        push_separator(&mut lines);
        push_table(&mut lines, &card.events);

        if !card.applications.is_empty() {
            push_separator(&mut lines);
            push_table(&mut lines, &card.applications_table());
        }
    }

    push_separator(&mut lines);
    let resume = match (&salary.resumes, salary.selected_resume()) {
        (_, Some(resume)) => Span::styled(
            format!("{} ({})", resume.label(), verified_label(resume.verified)),
            Style::default().fg(Color::Cyan),
        ),
        (Load::Loading | Load::Idle, None) => {
            Span::styled("loading…", Style::default().fg(Color::DarkGray))
        }
        (Load::Failed(_), None) => {
            Span::styled("unavailable", Style::default().fg(Color::Red))
        }
        (Load::Loaded(_), None) => Span::styled(
            "Select a resume (p)",
            Style::default().fg(Color::DarkGray),
        ),
    };
    lines.push(Line::from(vec![
        Span::styled("Resume: ", Style::default().fg(Color::DarkGray)),
        resume,
    ]));

    lines
}

fn push_fields(lines: &mut Vec<Line<'static>>, fields: &[Field]) {
    for field in fields {
        lines.push(Line::from(vec![
            Span::styled(
                format!("{}: ", field.label),
                Style::default()
                    .fg(Color::DarkGray)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw(field.value.clone()),
        ]));
    }
}

fn push_heading(lines: &mut Vec<Line<'static>>, title: &str) {
    lines.push(Line::from(Span::styled(
        title.to_string(),
        Style::default().add_modifier(Modifier::BOLD),
    )));
}

fn push_table(lines: &mut Vec<Line<'static>>, table: &CardTable) {
    push_heading(lines, table.title);
    let mut rendered = columns(table.headers, &table.rows).into_iter();
    if let Some(header) = rendered.next() {
        lines.push(Line::from(Span::styled(
            header,
            Style::default().fg(Color::Cyan),
        )));
    }
    lines.extend(rendered.map(Line::from));
    lines.push(Line::default());
}

fn push_separator(lines: &mut Vec<Line<'static>>) {
    lines.push(Line::from(Span::styled(
        "─".repeat(40),
        Style::default().fg(Color::DarkGray),
    )));
}
