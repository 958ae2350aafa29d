//! Panel 5 — Help: keyboard shortcuts and documentation.

use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::app::AppState;
use crate::theme;

pub fn render(f: &mut Frame, area: Rect, _app: &AppState) {
    let mut lines: Vec<Line> = Vec::new();

    section(&mut lines, "Global Navigation");
    key(&mut lines, "1-5", "Switch to panel by number");
    key(&mut lines, "Tab / Shift+Tab", "Cycle panels forward / back");
    key(&mut lines, "e", "Open error history overlay");
    key(&mut lines, "q / Esc", "Quit");
    lines.push(Line::from(""));

    section(&mut lines, "Panel 1 — Stations");
    key(&mut lines, "t", "Cycle timeframe (daily / weekly / monthly)");
    key(&mut lines, "c", "Toggle best / worst ranking");
    key(&mut lines, "+ / -", "Grow / shrink number of ranked stations");
    key(&mut lines, "r", "Reload station data from disk");
    lines.push(Line::from(""));

    section(&mut lines, "Panel 2 — Demand");
    key(&mut lines, "t", "Cycle timeframe (daily / weekly / monthly)");
    key(&mut lines, "r", "Reload demand data from disk");
    lines.push(Line::from(""));

    section(&mut lines, "Panel 3 — Weather");
    key(&mut lines, "", "Monthly temperature and rainfall averages");
    lines.push(Line::from(""));

    section(&mut lines, "Panel 4 — Forecast");
    key(&mut lines, "m", "Toggle model (lag baseline / gradient boosted)");
    key(&mut lines, "h / l", "Select evaluation horizon");
    key(&mut lines, "Enter", "Run evaluation");
    key(&mut lines, "j / k", "Scroll actual-vs-forecast table");
    lines.push(Line::from(""));

    section(&mut lines, "Metrics");
    key(&mut lines, "MAPE", "Mean absolute percentage error over the horizon; zero-actual days are skipped");
    key(&mut lines, "RMSE", "Root mean squared error over the horizon");

    let para = Paragraph::new(lines);
    f.render_widget(para, area);
}

fn section<'a>(lines: &mut Vec<Line<'a>>, title: &str) {
    lines.push(Line::from(Span::styled(
        title.to_string(),
        theme::accent_bold(),
    )));
}

fn key<'a>(lines: &mut Vec<Line<'a>>, keys: &str, desc: &str) {
    lines.push(Line::from(vec![
        Span::styled(format!("  {:>20}  ", keys), theme::accent()),
        Span::styled(desc.to_string(), theme::muted()),
    ]));
}
