use placeboard_core::stats::{self, DimensionSeries, ViewMode};
use placeboard_core::trends::TrendSeries;
use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::symbols::Marker;
use ratatui::text::{Line, Span};
use ratatui::widgets::{
    Axis, Block, Borders, Cell, Chart, Dataset, GraphType, Paragraph, Row, Table, TableState,
    Wrap,
};

use super::state::{DashboardState, View};
use crate::overlays::render_utils::{InputHint, render_hints};
use crate::state::Load;

/// Bucket labels shown on the x axis before thinning to first/middle/last.
const MAX_AXIS_LABELS: usize = 8;

pub fn render_dashboard(frame: &mut Frame, area: Rect, dash: &DashboardState, spinner: &str) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(3),
            Constraint::Min(5),
            Constraint::Length(1),
        ])
        .split(area);

    render_header(frame, chunks[0], dash, spinner);
    render_ribbon(frame, chunks[1], dash);
    match dash.view {
        View::Breakdown => render_breakdown(frame, chunks[2], dash),
        View::Trends => render_trends(frame, chunks[2], dash),
    }

    let hints = [
        InputHint::new("s", "season"),
        InputHint::new("←→", "bucket"),
        InputHint::new("d/D", "dimension"),
        InputHint::new("v", "chart/table"),
        InputHint::new("t", "trends"),
        InputHint::new("r", "reload"),
        InputHint::new("q", "quit"),
    ];
    render_hints(frame, chunks[3], &hints, Color::Cyan);
}

fn render_header(frame: &mut Frame, area: Rect, dash: &DashboardState, spinner: &str) {
    let season = dash
        .selected
        .as_ref()
        .map_or_else(|| "No season selected".to_string(), |s| s.label.clone());
    let detail = match dash.view {
        View::Breakdown => format!("{} ({})", dash.dimension.title(), dash.mode),
        View::Trends => format!("Placement trend {}–{}", dash.year_range.0, dash.year_range.1),
    };

    let mut spans = vec![
        Span::styled(
            " placeboard ",
            Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(" "),
        Span::styled(season, Style::default().add_modifier(Modifier::BOLD)),
        Span::styled("  ·  ", Style::default().fg(Color::DarkGray)),
        Span::raw(detail),
    ];
    if dash.stats.is_loading() || dash.trend.is_loading() || dash.seasons.is_loading() {
        spans.push(Span::styled(
            format!("  {spinner}"),
            Style::default().fg(Color::Yellow),
        ));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn render_ribbon(frame: &mut Frame, area: Rect, dash: &DashboardState) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray))
        .title(" Overview ");

    let line = match (
        dash.stats.loaded().and_then(|d| d.overall_stats.as_ref()),
        &dash.selected,
    ) {
        (Some(overall), Some(season)) => {
            let mut spans = Vec::new();
            for (i, item) in stats::overview_items(overall, season.season_type)
                .into_iter()
                .enumerate()
            {
                if i > 0 {
                    spans.push(Span::styled("  │  ", Style::default().fg(Color::DarkGray)));
                }
                spans.push(Span::styled(
                    format!("{}: ", item.label),
                    Style::default().fg(Color::DarkGray),
                ));
                spans.push(Span::styled(
                    item.value,
                    Style::default().add_modifier(Modifier::BOLD),
                ));
            }
            Line::from(spans)
        }
        _ => Line::from(Span::styled("—", Style::default().fg(Color::DarkGray))),
    };

    frame.render_widget(Paragraph::new(line).block(block), area);
}

fn render_breakdown(frame: &mut Frame, area: Rect, dash: &DashboardState) {
    if let Load::Failed(message) = &dash.seasons {
        return render_message(frame, area, message, Color::Red);
    }
    let series = match &dash.stats {
        Load::Idle if dash.seasons.loaded().is_some_and(Vec::is_empty) => {
            return render_message(frame, area, "No seasons available", Color::DarkGray);
        }
        Load::Idle => {
            return render_message(frame, area, "Press s to pick a season", Color::DarkGray);
        }
        Load::Loading => {
            return render_message(frame, area, "Loading season data…", Color::Yellow);
        }
        Load::Failed(headline) => return render_message(frame, area, headline, Color::Red),
        Load::Loaded(_) => dash.series(),
    };
    let Some(series) = series.filter(|s| !s.is_empty()) else {
        let msg = format!("No {} statistics for this season", dash.dimension.name());
        return render_message(frame, area, &msg, Color::DarkGray);
    };

    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(68), Constraint::Percentage(32)])
        .split(area);

    match dash.mode {
        ViewMode::Chart => render_series_chart(frame, chunks[0], &series, dash.cursor),
        ViewMode::Table => render_series_table(frame, chunks[0], &series, dash.cursor),
    }
    render_tooltip(frame, chunks[1], &series, dash.cursor);
}

fn render_series_chart(frame: &mut Frame, area: Rect, series: &DimensionSeries, cursor: usize) {
    let data = series.chart_data();
    let cursor_point: Vec<(f64, f64)> = data.get(cursor).copied().into_iter().collect();
    let labels = series.labels();

    let datasets = vec![
        Dataset::default()
            .name("Placement %")
            .marker(Marker::Braille)
            .graph_type(GraphType::Line)
            .style(Style::default().fg(Color::Cyan))
            .data(&data),
        Dataset::default()
            .marker(Marker::Block)
            .graph_type(GraphType::Scatter)
            .style(Style::default().fg(Color::Yellow))
            .data(&cursor_point),
    ];

    let chart = Chart::new(datasets)
        .block(
            Block::default()
                .title(format!(" {} ", series.dimension.title()))
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray)),
        )
        .x_axis(
            Axis::default()
                .title(series.dimension.bucket_heading())
                .style(Style::default().fg(Color::DarkGray))
                .bounds(x_bounds(labels.len()))
                .labels(axis_labels(&labels)),
        )
        .y_axis(
            Axis::default()
                .title("Placement %")
                .style(Style::default().fg(Color::DarkGray))
                .bounds([0.0, 100.0])
                .labels(["0", "50", "100"]),
        );

    frame.render_widget(chart, area);
}

fn render_series_table(frame: &mut Frame, area: Rect, series: &DimensionSeries, cursor: usize) {
    let headers = series.table_headers();
    let widths: Vec<Constraint> = headers
        .iter()
        .enumerate()
        .map(|(i, h)| {
            if i == 0 {
                Constraint::Min(8)
            } else {
                Constraint::Length(u16::try_from(h.len()).unwrap_or(u16::MAX).max(6))
            }
        })
        .collect();

    let header = Row::new(headers.into_iter().map(Cell::from)).style(
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
    );
    let rows = series
        .table_rows()
        .into_iter()
        .map(|row| Row::new(row.into_iter().map(Cell::from)));

    let table = Table::new(rows, widths)
        .header(header)
        .block(
            Block::default()
                .title(format!(" {} ", series.dimension.title()))
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray)),
        )
        .row_highlight_style(Style::default().bg(Color::DarkGray).fg(Color::White))
        .highlight_symbol("▶ ");

    let mut state = TableState::default().with_selected(Some(cursor));
    frame.render_stateful_widget(table, area, &mut state);
}

fn render_tooltip(frame: &mut Frame, area: Rect, series: &DimensionSeries, cursor: usize) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow));

    let Some(tooltip) = series.tooltip(cursor) else {
        frame.render_widget(block, area);
        return;
    };

    let lines: Vec<Line> = tooltip
        .lines
        .into_iter()
        .map(|(label, value)| {
            Line::from(vec![
                Span::styled(format!("{label}: "), Style::default().fg(Color::DarkGray)),
                Span::raw(value),
            ])
        })
        .collect();

    frame.render_widget(
        Paragraph::new(lines)
            .block(block.title(format!(" {} ", tooltip.title)))
            .wrap(Wrap { trim: true }),
        area,
    );
}

fn render_trends(frame: &mut Frame, area: Rect, dash: &DashboardState) {
    match &dash.trend {
        Load::Idle | Load::Loading => {
            render_message(frame, area, "Loading placement trend…", Color::Yellow);
        }
        Load::Failed(headline) => render_message(frame, area, headline, Color::Red),
        Load::Loaded(series) if series.points.is_empty() => {
            render_message(
                frame,
                area,
                "No season statistics in this year range",
                Color::DarkGray,
            );
        }
        Load::Loaded(series) => render_trend_chart(frame, area, series),
    }
}

fn render_trend_chart(frame: &mut Frame, area: Rect, series: &TrendSeries) {
    let footer = series.footer();
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(3),
            Constraint::Length(u16::from(footer.is_some())),
        ])
        .split(area);

    let data = series.chart_data();
    let labels: Vec<String> = series
        .points
        .iter()
        .map(|p| {
            let initial = p.season.season_type.display_name().chars().next().unwrap_or('?');
            format!("{initial}'{:02}", p.season.year.rem_euclid(100))
        })
        .collect();
    let label_refs: Vec<&str> = labels.iter().map(String::as_str).collect();

    let datasets = vec![
        Dataset::default()
            .name("Overall placement %")
            .marker(Marker::Braille)
            .graph_type(GraphType::Line)
            .style(Style::default().fg(Color::Green))
            .data(&data),
    ];

    let chart = Chart::new(datasets)
        .block(
            Block::default()
                .title(" Placement trend ")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray)),
        )
        .x_axis(
            Axis::default()
                .title("Season")
                .style(Style::default().fg(Color::DarkGray))
                .bounds(x_bounds(labels.len()))
                .labels(axis_labels(&label_refs)),
        )
        .y_axis(
            Axis::default()
                .title("Placement %")
                .style(Style::default().fg(Color::DarkGray))
                .bounds([0.0, 100.0])
                .labels(["0", "50", "100"]),
        );
    frame.render_widget(chart, chunks[0]);

    if let Some(note) = footer {
        frame.render_widget(
            Paragraph::new(Span::styled(note, Style::default().fg(Color::DarkGray))),
            chunks[1],
        );
    }
}

fn render_message(frame: &mut Frame, area: Rect, message: &str, color: Color) {
    frame.render_widget(
        Paragraph::new(Span::styled(message.to_string(), Style::default().fg(color)))
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::DarkGray)),
            )
            .wrap(Wrap { trim: true }),
        area,
    );
}

#[allow(clippy::cast_precision_loss)]
fn x_bounds(len: usize) -> [f64; 2] {
    [0.0, len.saturating_sub(1).max(1) as f64]
}

/// All labels when few, else first/middle/last.
fn axis_labels(labels: &[&str]) -> Vec<Span<'static>> {
    let picked: Vec<&str> = if labels.len() <= MAX_AXIS_LABELS {
        labels.to_vec()
    } else {
        vec![
            labels[0],
            labels[(labels.len() - 1) / 2],
            labels[labels.len() - 1],
        ]
    };
    picked
        .into_iter()
        .map(|l| Span::raw(l.to_string()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_axis_labels_thin_out() {
        let few = ["6-7", "7-8", "9+"];
        assert_eq!(axis_labels(&few).len(), 3);

        let many: Vec<String> = (0..12).map(|i| i.to_string()).collect();
        let refs: Vec<&str> = many.iter().map(String::as_str).collect();
        let picked = axis_labels(&refs);
        assert_eq!(picked.len(), 3);
        assert_eq!(picked[0].content, "0");
        assert_eq!(picked[1].content, "5");
        assert_eq!(picked[2].content, "11");
    }

    #[test]
    fn test_x_bounds_never_collapse() {
        assert_eq!(x_bounds(0), [0.0, 1.0]);
        assert_eq!(x_bounds(1), [0.0, 1.0]);
        assert_eq!(x_bounds(5), [0.0, 4.0]);
    }
}
