//! Bikecast TUI — five-panel terminal dashboard for bike-share demand.
//!
//! Panels:
//! 1. Stations — top/bottom station ranking by average demand
//! 2. Demand — citywide demand curve over time
//! 3. Weather — monthly temperature and rainfall averages
//! 4. Forecast — model evaluation with MAPE/RMSE over a chosen horizon
//! 5. Help — keyboard shortcuts and documentation

mod app;
mod input;
mod persistence;
mod theme;
mod ui;
mod worker;

use std::io::{self, stdout};
use std::path::{Path, PathBuf};
use std::sync::mpsc;
use std::time::Duration;

use anyhow::Result;
use crossterm::event::{self, Event};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;

use bikecast_core::config::BikecastConfig;

use crate::app::{AppState, ErrorCategory};
use crate::worker::{WorkerCommand, WorkerResponse};

fn main() -> Result<()> {
    // Install a panic hook that restores the terminal before printing the panic.
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stderr(), LeaveAlternateScreen);
        default_hook(info);
    }));

    let config = BikecastConfig::load_or_default(Path::new("bikecast.toml"))?;
    let state_path = dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("bikecast")
        .join("state.json");

    let persisted = persistence::load(&state_path);

    // Worker channels
    let (cmd_tx, cmd_rx) = mpsc::channel();
    let (resp_tx, resp_rx) = mpsc::channel();
    let worker_handle = worker::spawn_worker(config.clone(), cmd_rx, resp_tx);

    let mut app = AppState::new(cmd_tx.clone(), resp_rx, state_path.clone(), config);
    persistence::apply(&mut app, persisted);

    // Kick off data for the panel we open on.
    app.request_panel_data(app.active_panel);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    let result = run_app(&mut terminal, &mut app);

    // Save state before exit
    let persisted = persistence::extract(&app);
    let _ = persistence::save(&state_path, &persisted);

    // Shutdown worker
    let _ = cmd_tx.send(WorkerCommand::Shutdown);
    let _ = worker_handle.join();

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut AppState,
) -> Result<()> {
    loop {
        // 1. Render
        terminal.draw(|f| ui::draw(f, app))?;

        // 2. Drain worker responses (non-blocking)
        while let Ok(resp) = app.worker_rx.try_recv() {
            handle_worker_response(app, resp);
        }

        // 3. Poll for input events (50ms timeout for ~20 FPS tick)
        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                input::handle_key(app, key);
            }
        }

        // 4. Check quit
        if !app.running {
            break;
        }
    }
    Ok(())
}

fn handle_worker_response(app: &mut AppState, resp: WorkerResponse) {
    match resp {
        WorkerResponse::Stations { timeframe, rows } => {
            app.stations.loading = false;
            // Stale reply from before a timeframe change; ignore it.
            if timeframe != app.stations.timeframe {
                return;
            }
            app.set_status(format!(
                "Loaded {} stations ({})",
                rows.len(),
                timeframe.label()
            ));
            app.stations.rows = Some(rows);
        }
        WorkerResponse::Demand { timeframe, rows } => {
            app.demand.loading = false;
            if timeframe != app.demand.timeframe {
                return;
            }
            app.set_status(format!(
                "Loaded {} demand rows ({})",
                rows.len(),
                timeframe.label()
            ));
            app.demand.rows = Some(rows);
        }
        WorkerResponse::Weather { series } => {
            app.weather.loading = false;
            app.set_status(format!("Loaded weather series: {} rows", series.len()));
            app.weather.series = Some(series);
        }
        WorkerResponse::EvaluationDone {
            model,
            horizon,
            evaluation,
        } => {
            app.forecast.running = false;
            app.forecast.table_scroll = 0;
            if evaluation.warnings.is_empty() {
                app.set_status(format!(
                    "{} evaluated over {} day(s)",
                    model.label(),
                    horizon
                ));
            } else {
                let notes: Vec<String> = evaluation
                    .warnings
                    .iter()
                    .map(|w| w.to_string())
                    .collect();
                app.set_warning(notes.join("; "));
            }
            app.forecast.evaluation = Some(*evaluation);
        }
        WorkerResponse::Error {
            category,
            message,
            context,
        } => {
            // An error ends whatever was in flight.
            app.stations.loading = false;
            app.demand.loading = false;
            app.weather.loading = false;
            app.forecast.running = false;

            let cat = match category {
                "data" => ErrorCategory::Data,
                "model" => ErrorCategory::Model,
                "eval" => ErrorCategory::Eval,
                _ => ErrorCategory::Other,
            };
            app.push_error(cat, message, context);
        }
    }
}
