//! Keyboard input handling.
//!
//! Global keys work from any panel; panel-specific keys only apply when
//! that panel is active. Overlays consume input before anything else.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::app::{AppState, Overlay, Panel};

pub fn handle_key(app: &mut AppState, key: KeyEvent) {
    // Overlays swallow everything.
    match app.overlay {
        Overlay::Welcome => {
            app.overlay = Overlay::None;
            return;
        }
        Overlay::ErrorHistory => {
            match key.code {
                KeyCode::Char('j') | KeyCode::Down => {
                    if app.error_scroll + 1 < app.error_history.len() {
                        app.error_scroll += 1;
                    }
                }
                KeyCode::Char('k') | KeyCode::Up => {
                    app.error_scroll = app.error_scroll.saturating_sub(1);
                }
                _ => {
                    app.overlay = Overlay::None;
                    app.error_scroll = 0;
                }
            }
            return;
        }
        Overlay::None => {}
    }

    if handle_global_key(app, key) {
        return;
    }

    match app.active_panel {
        Panel::Stations => handle_stations_key(app, key),
        Panel::Demand => handle_demand_key(app, key),
        Panel::Weather => {}
        Panel::Forecast => handle_forecast_key(app, key),
        Panel::Help => {}
    }
}

fn handle_global_key(app: &mut AppState, key: KeyEvent) -> bool {
    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => {
            app.running = false;
            true
        }
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.running = false;
            true
        }
        KeyCode::Char(c @ '1'..='5') => {
            let idx = (c as usize) - ('1' as usize);
            if let Some(panel) = Panel::from_index(idx) {
                app.switch_panel(panel);
            }
            true
        }
        KeyCode::Tab => {
            app.switch_panel(app.active_panel.next());
            true
        }
        KeyCode::BackTab => {
            app.switch_panel(app.active_panel.prev());
            true
        }
        KeyCode::Char('e') => {
            app.overlay = Overlay::ErrorHistory;
            app.error_scroll = 0;
            true
        }
        _ => false,
    }
}

fn handle_stations_key(app: &mut AppState, key: KeyEvent) {
    match key.code {
        KeyCode::Char('t') => {
            app.stations.timeframe = app.stations.timeframe.cycle();
            app.stations.rows = None;
            app.request_panel_data(Panel::Stations);
        }
        KeyCode::Char('c') => {
            app.stations.criterion = app.stations.criterion.toggle();
        }
        KeyCode::Char('+') | KeyCode::Char('l') | KeyCode::Right => {
            app.stations.count =
                (app.stations.count + 1).min(app.config.station_rank_max);
        }
        KeyCode::Char('-') | KeyCode::Char('h') | KeyCode::Left => {
            app.stations.count = app
                .stations
                .count
                .saturating_sub(1)
                .max(app.config.station_rank_min);
        }
        KeyCode::Char('r') => {
            app.stations.rows = None;
            app.request_panel_data(Panel::Stations);
        }
        _ => {}
    }
}

fn handle_demand_key(app: &mut AppState, key: KeyEvent) {
    match key.code {
        KeyCode::Char('t') => {
            app.demand.timeframe = app.demand.timeframe.cycle();
            app.demand.rows = None;
            app.request_panel_data(Panel::Demand);
        }
        KeyCode::Char('r') => {
            app.demand.rows = None;
            app.request_panel_data(Panel::Demand);
        }
        _ => {}
    }
}

fn handle_forecast_key(app: &mut AppState, key: KeyEvent) {
    match key.code {
        KeyCode::Char('m') => {
            app.forecast.model = app.forecast.model.toggle();
        }
        KeyCode::Char('l') | KeyCode::Right => {
            if app.forecast.horizon_idx + 1 < app.forecast.horizons.len() {
                app.forecast.horizon_idx += 1;
            }
        }
        KeyCode::Char('h') | KeyCode::Left => {
            app.forecast.horizon_idx = app.forecast.horizon_idx.saturating_sub(1);
        }
        KeyCode::Enter => {
            app.run_evaluation();
        }
        KeyCode::Char('j') | KeyCode::Down => {
            app.forecast.table_scroll = app.forecast.table_scroll.saturating_add(1);
        }
        KeyCode::Char('k') | KeyCode::Up => {
            app.forecast.table_scroll = app.forecast.table_scroll.saturating_sub(1);
        }
        _ => {}
    }
}
