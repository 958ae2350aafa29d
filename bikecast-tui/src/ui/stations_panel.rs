//! Panel 1 — Stations: top/bottom station ranking as bar chart + table.

use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Bar, BarChart, BarGroup, Paragraph};
use ratatui::Frame;

use bikecast_core::aggregate::rank_stations;

use crate::app::AppState;
use crate::theme;

pub fn render(f: &mut Frame, area: Rect, app: &AppState) {
    let s = &app.stations;

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(2), Constraint::Min(4), Constraint::Min(3)])
        .split(area);

    // Header: timeframe / criterion / count selectors.
    let header = Line::from(vec![
        Span::styled("Timeframe: ", theme::muted()),
        Span::styled(s.timeframe.label(), theme::accent_bold()),
        Span::styled("  Ranking: ", theme::muted()),
        Span::styled(s.criterion.label(), theme::accent_bold()),
        Span::styled("  Count: ", theme::muted()),
        Span::styled(s.count.to_string(), theme::accent_bold()),
        Span::styled("   [t]imeframe [c]riterion [+/-]count [r]eload", theme::muted()),
    ]);
    f.render_widget(Paragraph::new(header), chunks[0]);

    let Some(rows) = &s.rows else {
        let msg = if s.loading {
            "Loading station data..."
        } else {
            "No station data loaded. Press r to load."
        };
        f.render_widget(
            Paragraph::new(Line::from(Span::styled(msg, theme::muted()))),
            chunks[1],
        );
        return;
    };

    let ranked = rank_stations(rows, s.criterion, s.count);
    if ranked.is_empty() {
        f.render_widget(
            Paragraph::new(Line::from(Span::styled(
                "Station file contained no usable rows.",
                theme::muted(),
            ))),
            chunks[1],
        );
        return;
    }

    // Bar chart of average rentals.
    let bars: Vec<Bar> = ranked
        .iter()
        .map(|st| {
            Bar::default()
                .value(st.bike_counts.round() as u64)
                .label(Line::from(short_name(&st.start_station_name)))
                .style(Style::default().fg(theme::STATION_BAR))
                .value_style(theme::text())
        })
        .collect();

    let bar_width = (chunks[1].width / ranked.len().max(1) as u16).clamp(3, 12);
    let chart = BarChart::default()
        .data(BarGroup::default().bars(&bars))
        .bar_width(bar_width)
        .bar_gap(1);
    f.render_widget(chart, chunks[1]);

    // Table of the same ranking with full names and coordinates.
    let mut lines: Vec<Line> = Vec::new();
    lines.push(Line::from(Span::styled(
        format!(
            "{:>4} {:>8} {:<32} {:>10} {:>10} {:>10}",
            "#", "ID", "Station", "Avg", "Lat", "Lon"
        ),
        theme::accent_bold(),
    )));
    let visible = chunks[2].height.saturating_sub(1) as usize;
    for (i, st) in ranked.iter().take(visible).enumerate() {
        lines.push(Line::from(Span::styled(
            format!(
                "{:>4} {:>8} {:<32} {:>10.1} {:>10.4} {:>10.4}",
                i + 1,
                st.start_station_id,
                truncate(&st.start_station_name, 32),
                st.bike_counts,
                st.lat,
                st.lon
            ),
            theme::text(),
        )));
    }
    f.render_widget(Paragraph::new(lines), chunks[2]);
}

fn short_name(name: &str) -> String {
    truncate(name, 10)
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let cut: String = s.chars().take(max.saturating_sub(1)).collect();
        format!("{cut}.")
    }
}
