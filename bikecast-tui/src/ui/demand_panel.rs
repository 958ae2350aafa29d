//! Panel 2 — Demand: citywide rental curve over time.

use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::Style;
use ratatui::symbols;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Axis, Chart, Dataset, GraphType, Paragraph};
use ratatui::Frame;

use bikecast_core::aggregate::demand_curve;

use crate::app::AppState;
use crate::theme;

pub fn render(f: &mut Frame, area: Rect, app: &AppState) {
    let d = &app.demand;

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(2), Constraint::Min(4)])
        .split(area);

    let header = Line::from(vec![
        Span::styled("Timeframe: ", theme::muted()),
        Span::styled(d.timeframe.label(), theme::accent_bold()),
        Span::styled("   [t]imeframe [r]eload", theme::muted()),
    ]);
    f.render_widget(Paragraph::new(header), chunks[0]);

    let Some(rows) = &d.rows else {
        let msg = if d.loading {
            "Loading demand data..."
        } else {
            "No demand data loaded. Press r to load."
        };
        f.render_widget(
            Paragraph::new(Line::from(Span::styled(msg, theme::muted()))),
            chunks[1],
        );
        return;
    };

    let curve = demand_curve(rows);
    if curve.is_empty() {
        f.render_widget(
            Paragraph::new(Line::from(Span::styled(
                "Demand file contained no usable rows.",
                theme::muted(),
            ))),
            chunks[1],
        );
        return;
    }

    let data: Vec<(f64, f64)> = curve
        .iter()
        .enumerate()
        .map(|(i, &(_, v))| (i as f64, v))
        .collect();

    let max_y = data.iter().map(|&(_, v)| v).fold(f64::NEG_INFINITY, f64::max);
    let min_y = data.iter().map(|&(_, v)| v).fold(f64::INFINITY, f64::min);
    let padding = (max_y - min_y).abs() * 0.05;
    let y_min = (min_y - padding).min(0.0);
    let y_max = max_y + padding;
    let x_max = data.len().saturating_sub(1) as f64;

    let first_date = curve[0].0;
    let last_date = curve[curve.len() - 1].0;

    let dataset = Dataset::default()
        .name(format!("rentals ({})", d.timeframe.label()))
        .marker(symbols::Marker::Braille)
        .style(Style::default().fg(theme::DEMAND_CURVE))
        .graph_type(GraphType::Line)
        .data(&data);

    let chart = Chart::new(vec![dataset])
        .x_axis(
            Axis::default()
                .title(Span::styled("Date", theme::muted()))
                .style(theme::muted())
                .bounds([0.0, x_max.max(1.0)])
                .labels(vec![
                    Span::styled(first_date.to_string(), theme::muted()),
                    Span::styled(last_date.to_string(), theme::muted()),
                ]),
        )
        .y_axis(
            Axis::default()
                .title(Span::styled("Rentals", theme::muted()))
                .style(theme::muted())
                .bounds([y_min, y_max])
                .labels(vec![
                    Span::styled(format!("{y_min:.0}"), theme::muted()),
                    Span::styled(format!("{y_max:.0}"), theme::muted()),
                ]),
        );

    f.render_widget(chart, chunks[1]);
}
