//! Event bus for revsense.
//!
//! Terminal input, timer ticks and the results of background requests are
//! normalised into one `AppEvent` enum and sent over a tokio unbounded MPSC
//! channel. The main loop is the only receiver and the only writer of
//! `AppState`, so background tasks never touch state directly.
//!
//! Two independent intervals drive the render and logic cycles:
//! - **Render interval** (33 ms ≈ 30 FPS): triggers a `terminal.draw()` call.
//! - **Tick interval** (250 ms = 4 Hz): keeps spinners moving.

use crossterm::event::{Event, EventStream, KeyEvent, KeyEventKind};
use futures::{FutureExt, StreamExt};
use revsense_core::pipeline::AnalysisStep;
use revsense_core::tickets::{TicketDraft, TicketReceipt};
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::interval;

/// Which transient success banner a timer belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LatchKind {
    Copy,
    Ticket,
}

#[derive(Debug)]
pub enum AppEvent {
    /// A key press (`KeyEventKind::Press` only).
    Key(KeyEvent),
    /// Bracketed paste from the terminal.
    Paste(String),
    /// Terminal was resized to (columns, rows).
    Resize(u16, u16),
    /// Logic tick (4 Hz / 250 ms).
    Tick,
    /// Render tick; triggers a `terminal.draw()` call.
    Render,
    /// One committed step of a running analysis.
    Analysis(AnalysisStep),
    /// The analysis task finished; `error` is set when a step failed.
    AnalysisSettled { error: Option<String> },
    /// A rephrase request succeeded.
    Rephrased(String),
    RephraseSettled { error: Option<String> },
    /// The ticketing system accepted a draft.
    TicketAccepted {
        draft: TicketDraft,
        receipt: TicketReceipt,
    },
    TicketSettled { error: Option<String> },
    /// A success-banner timer fired for the given latch generation.
    LatchExpired { latch: LatchKind, generation: u64 },
    /// Quit signal.
    Quit,
}

/// Holds the sender and receiver ends of the unified event channel.
///
/// The sender (`tx`) is cloned into every background task; the receiver
/// (`rx`) is owned by the main event loop.
pub struct EventHandler {
    pub tx: mpsc::UnboundedSender<AppEvent>,
    pub rx: mpsc::UnboundedReceiver<AppEvent>,
}

impl EventHandler {
    pub fn new() -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self { tx, rx }
    }
}

impl Default for EventHandler {
    fn default() -> Self {
        Self::new()
    }
}

/// Spawns the task that feeds terminal input and timer ticks into `tx`.
///
/// - `reader.next().fuse()` keeps `select!` from polling a finished stream.
/// - Only `KeyEventKind::Press` is forwarded; Windows also reports releases.
/// - Send errors are ignored: once the receiver is gone the process is
///   shutting down anyway.
pub fn spawn_event_task(tx: mpsc::UnboundedSender<AppEvent>) {
    tokio::spawn(async move {
        let mut tick_interval = interval(Duration::from_millis(250));
        let mut render_interval = interval(Duration::from_millis(33));
        let mut reader = EventStream::new();

        loop {
            let tick_tick = tick_interval.tick();
            let render_tick = render_interval.tick();
            let crossterm_event = reader.next().fuse();

            tokio::select! {
                _ = tick_tick => {
                    let _ = tx.send(AppEvent::Tick);
                }
                _ = render_tick => {
                    let _ = tx.send(AppEvent::Render);
                }
                maybe_event = crossterm_event => {
                    match maybe_event {
                        Some(Ok(Event::Key(key))) if key.kind == KeyEventKind::Press => {
                            let _ = tx.send(AppEvent::Key(key));
                        }
                        Some(Ok(Event::Paste(text))) => {
                            let _ = tx.send(AppEvent::Paste(text));
                        }
                        Some(Ok(Event::Resize(w, h))) => {
                            let _ = tx.send(AppEvent::Resize(w, h));
                        }
                        Some(Err(e)) => {
                            tracing::warn!(error = %e, "terminal event stream error");
                        }
                        None => break,
                        _ => {}
                    }
                }
            }
        }
    });
}
