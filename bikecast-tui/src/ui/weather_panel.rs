//! Panel 3 — Weather: monthly temperature and rainfall averages, stacked.

use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Style};
use ratatui::symbols;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Axis, Chart, Dataset, GraphType, Paragraph};
use ratatui::Frame;

use bikecast_core::aggregate::{monthly_average, WeatherField};

use crate::app::AppState;
use crate::theme;

const MONTH_ABBREV: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

pub fn render(f: &mut Frame, area: Rect, app: &AppState) {
    let w = &app.weather;

    let Some(series) = &w.series else {
        let msg = if w.loading {
            "Loading weather data..."
        } else {
            "No weather data loaded."
        };
        f.render_widget(
            Paragraph::new(Line::from(Span::styled(msg, theme::muted()))),
            area,
        );
        return;
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    render_monthly(
        f,
        chunks[0],
        monthly_average(series.rows(), WeatherField::TempObs),
        WeatherField::TempObs,
        theme::TEMPERATURE,
    );
    render_monthly(
        f,
        chunks[1],
        monthly_average(series.rows(), WeatherField::Prcp),
        WeatherField::Prcp,
        theme::RAINFALL,
    );
}

fn render_monthly(
    f: &mut Frame,
    area: Rect,
    averages: [Option<f64>; 12],
    field: WeatherField,
    color: Color,
) {
    let data: Vec<(f64, f64)> = averages
        .iter()
        .enumerate()
        .filter_map(|(m, v)| v.map(|v| (m as f64, v)))
        .collect();

    if data.is_empty() {
        f.render_widget(
            Paragraph::new(Line::from(Span::styled(
                format!("No {} readings in the series.", field.label()),
                theme::muted(),
            ))),
            area,
        );
        return;
    }

    let max_y = data.iter().map(|&(_, v)| v).fold(f64::NEG_INFINITY, f64::max);
    let min_y = data.iter().map(|&(_, v)| v).fold(f64::INFINITY, f64::min);
    let padding = ((max_y - min_y).abs() * 0.1).max(1.0);
    let y_min = min_y - padding;
    let y_max = max_y + padding;

    let dataset = Dataset::default()
        .name(format!("{} ({})", field.label(), field.unit()))
        .marker(symbols::Marker::Braille)
        .style(Style::default().fg(color))
        .graph_type(GraphType::Line)
        .data(&data);

    let chart = Chart::new(vec![dataset])
        .x_axis(
            Axis::default()
                .style(theme::muted())
                .bounds([0.0, 11.0])
                .labels(vec![
                    Span::styled(MONTH_ABBREV[0], theme::muted()),
                    Span::styled(MONTH_ABBREV[5], theme::muted()),
                    Span::styled(MONTH_ABBREV[11], theme::muted()),
                ]),
        )
        .y_axis(
            Axis::default()
                .title(Span::styled(field.unit(), theme::muted()))
                .style(theme::muted())
                .bounds([y_min, y_max])
                .labels(vec![
                    Span::styled(format!("{y_min:.0}"), theme::muted()),
                    Span::styled(format!("{y_max:.0}"), theme::muted()),
                ]),
        );

    f.render_widget(chart, area);
}
