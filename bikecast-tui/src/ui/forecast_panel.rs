//! Panel 4 — Forecast: model/horizon selector, evaluation chart, metric
//! readout, and a scrollable actual-vs-forecast table.

use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::Style;
use ratatui::symbols;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Axis, Chart, Dataset, GraphType, Paragraph};
use ratatui::Frame;

use bikecast_core::evaluate::Evaluation;

use crate::app::AppState;
use crate::theme;

pub fn render(f: &mut Frame, area: Rect, app: &AppState) {
    let fc = &app.forecast;

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),
            Constraint::Min(6),
            Constraint::Length(2),
            Constraint::Min(4),
        ])
        .split(area);

    // Selector line.
    let mut spans = vec![
        Span::styled("Model: ", theme::muted()),
        Span::styled(fc.model.label(), theme::accent_bold()),
        Span::styled("  Horizon: ", theme::muted()),
    ];
    for (i, h) in fc.horizons.iter().enumerate() {
        let style = if i == fc.horizon_idx {
            theme::accent_bold()
        } else {
            theme::muted()
        };
        spans.push(Span::styled(format!("{h}d "), style));
    }
    spans.push(Span::styled(
        "  [m]odel [h/l]horizon [Enter]run [j/k]table",
        theme::muted(),
    ));
    if fc.running {
        spans.push(Span::styled("  evaluating...", theme::warning()));
    }
    f.render_widget(Paragraph::new(Line::from(spans)), chunks[0]);

    let Some(eval) = &fc.evaluation else {
        f.render_widget(
            Paragraph::new(Line::from(Span::styled(
                "No evaluation yet. Press Enter to run one.",
                theme::muted(),
            ))),
            chunks[1],
        );
        return;
    };

    render_chart(f, chunks[1], eval);
    render_metrics(f, chunks[2], eval);
    render_table(f, chunks[3], eval, fc.table_scroll);
}

fn render_chart(f: &mut Frame, area: Rect, eval: &Evaluation) {
    let actual: Vec<(f64, f64)> = eval
        .window
        .iter()
        .enumerate()
        .map(|(i, row)| (i as f64, row.actual))
        .collect();
    let forecast: Vec<(f64, f64)> = eval
        .window
        .iter()
        .enumerate()
        .filter_map(|(i, row)| row.forecast.map(|v| (i as f64, v)))
        .collect();

    let values = actual
        .iter()
        .map(|&(_, v)| v)
        .chain(forecast.iter().map(|&(_, v)| v));
    let mut y_min = f64::INFINITY;
    let mut y_max = f64::NEG_INFINITY;
    for v in values {
        y_min = y_min.min(v);
        y_max = y_max.max(v);
    }
    let padding = ((y_max - y_min).abs() * 0.05).max(1.0);
    y_min -= padding;
    y_max += padding;

    // Vertical line at the last lookback row, where the forecast region starts.
    let boundary_x = eval.lookback_len.saturating_sub(1) as f64;
    let steps = 32;
    let boundary: Vec<(f64, f64)> = (0..=steps)
        .map(|i| {
            let t = i as f64 / steps as f64;
            (boundary_x, y_min + t * (y_max - y_min))
        })
        .collect();

    let x_max = eval.window.len().saturating_sub(1) as f64;
    let first_date = eval.window.first().map(|r| r.date.to_string());
    let last_date = eval.window.last().map(|r| r.date.to_string());

    let datasets = vec![
        Dataset::default()
            .name("actual")
            .marker(symbols::Marker::Braille)
            .style(Style::default().fg(theme::DEMAND))
            .graph_type(GraphType::Line)
            .data(&actual),
        Dataset::default()
            .name("forecast")
            .marker(symbols::Marker::Braille)
            .style(Style::default().fg(theme::FORECAST))
            .graph_type(GraphType::Line)
            .data(&forecast),
        Dataset::default()
            .name("train/test split")
            .marker(symbols::Marker::Dot)
            .style(Style::default().fg(theme::BOUNDARY))
            .graph_type(GraphType::Scatter)
            .data(&boundary),
    ];

    let chart = Chart::new(datasets)
        .x_axis(
            Axis::default()
                .title(Span::styled("Date", theme::muted()))
                .style(theme::muted())
                .bounds([0.0, x_max.max(1.0)])
                .labels(vec![
                    Span::styled(first_date.unwrap_or_default(), theme::muted()),
                    Span::styled(last_date.unwrap_or_default(), theme::muted()),
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

    f.render_widget(chart, area);
}

fn render_metrics(f: &mut Frame, area: Rect, eval: &Evaluation) {
    let mape = match eval.mape_percent {
        Some(p) => format!("{p:.2}%"),
        None => "n/a".to_string(),
    };
    let mut spans = vec![
        Span::styled("MAPE: ", theme::muted()),
        Span::styled(mape, theme::accent_bold()),
        Span::styled("  RMSE: ", theme::muted()),
        Span::styled(format!("{:.2}", eval.rmse), theme::accent_bold()),
        Span::styled(
            format!("  over {} of {} day(s)", eval.horizon_used, eval.horizon_requested),
            theme::muted(),
        ),
    ];
    for w in &eval.warnings {
        spans.push(Span::styled(format!("  ! {w}"), theme::warning()));
    }
    f.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn render_table(f: &mut Frame, area: Rect, eval: &Evaluation, scroll: usize) {
    let rows = eval.forecast_rows();
    let mut lines: Vec<Line> = Vec::new();
    lines.push(Line::from(Span::styled(
        format!("{:<12} {:>12} {:>12} {:>10}", "Date", "Actual", "Forecast", "Error"),
        theme::accent_bold(),
    )));

    let visible = area.height.saturating_sub(1) as usize;
    let start = scroll.min(rows.len().saturating_sub(1));
    for row in rows.iter().skip(start).take(visible) {
        let (forecast, err) = match row.forecast {
            Some(v) => (format!("{v:.1}"), format!("{:+.1}", v - row.actual)),
            None => ("-".to_string(), "-".to_string()),
        };
        lines.push(Line::from(Span::styled(
            format!(
                "{:<12} {:>12.1} {:>12} {:>10}",
                row.date, row.actual, forecast, err
            ),
            theme::text(),
        )));
    }

    f.render_widget(Paragraph::new(lines), area);
}
