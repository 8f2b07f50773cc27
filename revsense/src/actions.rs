//! Action runners: everything that leaves the process.
//!
//! Each runner checks availability through the session's `begin_*` method,
//! spawns one tokio task and returns immediately. Tasks only send
//! `AppEvent`s back; the main loop applies them with [`apply_event`].
//!
//! Every task owns a [`SettleGuard`] that sends the matching `*Settled`
//! event when it is dropped, so the in-flight flag is cleared on success,
//! on failure, and if the task panics.

use std::sync::Arc;

use revsense_core::client::AnalysisService;
use revsense_core::pipeline::{run_analysis, run_rephrase};
use revsense_core::tickets::TicketingSystem;
use tokio::sync::mpsc::UnboundedSender;
use tracing::{error, info, warn};

use crate::app::AppState;
use crate::clipboard::Clipboard;
use crate::event::{AppEvent, LatchKind};

/// Which text the user wants on the clipboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CopyTarget {
    Original,
    Rephrased,
    Summary,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Analyze,
    Rephrase,
    CreateTicket,
    Copy(CopyTarget),
}

/// Collaborators the action runners talk to.
pub struct Services {
    pub analysis: Arc<dyn AnalysisService>,
    pub ticketing: Arc<dyn TicketingSystem>,
    pub clipboard: Box<dyn Clipboard>,
    pub tx: UnboundedSender<AppEvent>,
}

/// Runs `command`. Returns `false` when it was unavailable and nothing happened.
pub fn run(command: Command, state: &mut AppState, services: &Services) -> bool {
    match command {
        Command::Analyze => analyze(state, services),
        Command::Rephrase => rephrase(state, services),
        Command::CreateTicket => create_ticket(state, services),
        Command::Copy(target) => copy(target, state, services),
    }
}

#[derive(Debug, Clone, Copy)]
enum Operation {
    Analysis,
    Rephrase,
    Ticket,
}

impl Operation {
    fn settled(self, error: Option<String>) -> AppEvent {
        match self {
            Operation::Analysis => AppEvent::AnalysisSettled { error },
            Operation::Rephrase => AppEvent::RephraseSettled { error },
            Operation::Ticket => AppEvent::TicketSettled { error },
        }
    }
}

/// Sends the settle event for `op` when dropped.
///
/// Starts out reporting an abnormal end; [`SettleGuard::finish`] replaces
/// that with the real outcome.
struct SettleGuard {
    op: Operation,
    tx: UnboundedSender<AppEvent>,
    error: Option<String>,
}

impl SettleGuard {
    fn new(op: Operation, tx: UnboundedSender<AppEvent>) -> Self {
        let error = Some(format!("{op:?} task ended unexpectedly"));
        Self { op, tx, error }
    }

    fn finish(mut self, error: Option<String>) {
        self.error = error;
    }
}

impl Drop for SettleGuard {
    fn drop(&mut self) {
        let _ = self.tx.send(self.op.settled(self.error.take()));
    }
}

fn analyze(state: &mut AppState, services: &Services) -> bool {
    let Some(text) = state.session.begin_analysis() else {
        return false;
    };
    let service = Arc::clone(&services.analysis);
    let tx = services.tx.clone();
    tokio::spawn(async move {
        let guard = SettleGuard::new(Operation::Analysis, tx.clone());
        let result = run_analysis(service.as_ref(), &text, |step| {
            let _ = tx.send(AppEvent::Analysis(step));
        })
        .await;
        guard.finish(result.err().map(|failure| failure.to_string()));
    });
    true
}

fn rephrase(state: &mut AppState, services: &Services) -> bool {
    let Some(text) = state.session.begin_rephrase() else {
        return false;
    };
    let service = Arc::clone(&services.analysis);
    let tx = services.tx.clone();
    tokio::spawn(async move {
        let guard = SettleGuard::new(Operation::Rephrase, tx.clone());
        let error = match run_rephrase(service.as_ref(), &text).await {
            Ok(Some(rephrased)) => {
                let _ = tx.send(AppEvent::Rephrased(rephrased));
                None
            }
            Ok(None) => None,
            Err(failure) => Some(failure.to_string()),
        };
        guard.finish(error);
    });
    true
}

fn create_ticket(state: &mut AppState, services: &Services) -> bool {
    let Some(draft) = state.session.begin_ticket() else {
        return false;
    };
    let ticketing = Arc::clone(&services.ticketing);
    let tx = services.tx.clone();
    tokio::spawn(async move {
        let guard = SettleGuard::new(Operation::Ticket, tx.clone());
        let error = match ticketing.submit(&draft).await {
            Ok(receipt) => {
                let _ = tx.send(AppEvent::TicketAccepted { draft, receipt });
                None
            }
            Err(e) => {
                error!(error = %e, "ticket submission failed");
                Some(e.to_string())
            }
        };
        guard.finish(error);
    });
    true
}

fn copy(target: CopyTarget, state: &mut AppState, services: &Services) -> bool {
    let session = &state.session;
    let text = match target {
        CopyTarget::Original => Some(session.review_text.clone()).filter(|t| !t.is_empty()),
        CopyTarget::Rephrased => session.rephrased_text().map(str::to_owned),
        CopyTarget::Summary => session.analysis_summary(),
    };
    let Some(text) = text else {
        return false;
    };
    match services.clipboard.write_text(&text) {
        Ok(()) => {
            info!(?target, chars = text.chars().count(), "copied to clipboard");
            trigger_latch(state, LatchKind::Copy, &services.tx);
            true
        }
        Err(e) => {
            warn!(?target, error = %e, "failed to copy to clipboard");
            false
        }
    }
}

fn trigger_latch(state: &mut AppState, latch: LatchKind, tx: &UnboundedSender<AppEvent>) {
    let tx = tx.clone();
    let notify = move |generation| {
        let _ = tx.send(AppEvent::LatchExpired { latch, generation });
    };
    match latch {
        LatchKind::Copy => state.session.copy_success.trigger(notify),
        LatchKind::Ticket => state.session.ticket_success.trigger(notify),
    };
}

/// Applies a background-task event to `state`.
///
/// Input, render and quit events are handled by the main loop and ignored here.
pub fn apply_event(event: AppEvent, state: &mut AppState, tx: &UnboundedSender<AppEvent>) {
    match event {
        AppEvent::Analysis(step) => state.session.apply_analysis_step(step),
        AppEvent::AnalysisSettled { error } => state.session.settle_analysis(error),
        AppEvent::Rephrased(text) => state.apply_rephrase(text),
        AppEvent::RephraseSettled { error } => state.session.settle_rephrase(error),
        AppEvent::TicketAccepted { draft, receipt } => {
            state.tickets.record(draft, receipt);
            trigger_latch(state, LatchKind::Ticket, tx);
        }
        AppEvent::TicketSettled { error } => state.session.settle_ticket(error),
        AppEvent::LatchExpired { latch, generation } => {
            match latch {
                LatchKind::Copy => state.session.copy_success.expire(generation),
                LatchKind::Ticket => state.session.ticket_success.expire(generation),
            };
        }
        _ => {}
    }
}
