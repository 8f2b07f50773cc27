//! revsense: review sentiment workbench for the terminal.
//!
//! Entry point for the `revsense` binary. Wires together the terminal
//! lifecycle (`tui`), the unified event bus (`event`), the action runners
//! (`actions`), the renderer (`ui`) and the analysis client from
//! `revsense-core`.
//!
//! # Startup sequence
//!
//! 1. Load config and environment overrides, then open the log file. Both
//!    happen before terminal init so errors can still reach stderr.
//! 2. `install_panic_hook()`, installed before `init_tui()` so it is the
//!    innermost hook.
//! 3. `register_sigterm()` returns the flag polled by the event loop.
//! 4. `init_tui()` enters the alternate screen and raw mode.
//! 5. Create the event channel and `spawn_event_task()`.
//!
//! # Safety
//!
//! `restore_tui()` is called after the event loop exits. Inside the loop `?`
//! is only used in the Render arm; the draw error is stored and returned after
//! the terminal is restored.

mod actions;
mod app;
mod clipboard;
mod editor;
mod event;
mod logging;
mod theme;
mod tui;
mod ui;

use std::io;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use std::time::Duration;

use revsense_core::client::HttpAnalysisClient;
use revsense_core::config::{self, Config};
use revsense_core::tickets::SimulatedTicketing;
use tracing::{error, info, warn};

use crate::event::AppEvent;
use crate::ui::keybindings::{handle_key, handle_paste, KeyAction};

/// Loads the config file and applies environment overrides.
///
/// A broken config file is a soft failure: it is reported and the defaults
/// are used instead.
fn load_config() -> (Config, Option<String>) {
    let path = config::config_path();
    let (mut config, problem) = match Config::load(&path) {
        Ok(config) => (config, None),
        Err(e) => (Config::default(), Some(e.to_string())),
    };
    config.apply_env(|key| std::env::var(key).ok());
    (config, problem)
}

#[tokio::main]
async fn main() -> io::Result<()> {
    // Step 1: config and logging, before the terminal is taken over.
    let (config, config_problem) = load_config();
    let log_path = config.log.file.clone().unwrap_or_else(config::default_log_path);
    if let Err(e) = logging::init_logging(&log_path) {
        eprintln!("revsense: cannot open log file {}: {e}", log_path.display());
    }
    if let Some(problem) = config_problem {
        eprintln!("revsense: {problem}; using defaults");
        warn!(%problem, "config rejected, using defaults");
    }

    let analysis = HttpAnalysisClient::new(&config.api).map_err(|e| {
        error!(error = %e, "cannot build analysis client");
        io::Error::other(e)
    })?;
    info!(base_url = %analysis.base_url(), "revsense starting");

    let theme = theme::Theme::from_name(&config.theme);
    let mut state = app::AppState::with_analyze_on_edit(config.analysis.analyze_on_edit);

    // Step 2: panic hook first so it restores the terminal before printing.
    tui::install_panic_hook();

    // Step 3: SIGTERM flag, polled in the 50ms heartbeat arm below.
    let term_flag = tui::register_sigterm()?;

    // Step 4: enter alternate screen and raw mode.
    let mut terminal = tui::init_tui()?;

    // Step 5: event channel and the background input/timer task.
    let handler = event::EventHandler::new();
    event::spawn_event_task(handler.tx.clone());
    let mut rx = handler.rx;

    let services = actions::Services {
        analysis: Arc::new(analysis),
        ticketing: Arc::new(SimulatedTicketing::new(config.tickets.latency())),
        clipboard: Box::new(clipboard::Osc52Clipboard),
        tx: handler.tx.clone(),
    };

    let mut draw_error = None;

    // Event loop: exits only via `break` so `restore_tui()` is always reached.
    'event_loop: loop {
        tokio::select! {
            // Heartbeat: SIGTERM is checked even when no events arrive.
            _ = tokio::time::sleep(Duration::from_millis(50)) => {
                if term_flag.load(Ordering::Relaxed) {
                    break 'event_loop;
                }
            }
            maybe_event = rx.recv() => {
                match maybe_event {
                    Some(AppEvent::Render) => {
                        // Exactly one draw() call per Render event.
                        let drawn = terminal.draw(|frame| ui::render(frame, &mut state, &theme));
                        if let Err(e) = drawn {
                            draw_error = Some(e);
                            break 'event_loop;
                        }
                    }
                    Some(AppEvent::Key(key)) => match handle_key(key, &mut state) {
                        KeyAction::Quit => break 'event_loop,
                        KeyAction::Run(command) => {
                            actions::run(command, &mut state, &services);
                        }
                        KeyAction::Continue => {}
                    },
                    Some(AppEvent::Paste(text)) => {
                        if let KeyAction::Run(command) = handle_paste(&text, &mut state) {
                            actions::run(command, &mut state, &services);
                        }
                    }
                    Some(AppEvent::Tick) => state.tick(),
                    // ratatui picks up the new size from frame.area() on the next Render.
                    Some(AppEvent::Resize(_, _)) => {}
                    Some(AppEvent::Quit) | None => break 'event_loop,
                    Some(other) => actions::apply_event(other, &mut state, &services.tx),
                }
                if term_flag.load(Ordering::Relaxed) {
                    break 'event_loop;
                }
            }
        }
    }

    tui::restore_tui()?;
    info!(tickets = state.tickets.len(), "revsense exiting");
    match draw_error {
        Some(e) => Err(e),
        None => Ok(()),
    }
}
