//! UI rendering module for revsense.
//!
//! `render()` is the single entry point called by the event loop's
//! `terminal.draw()` closure. Layout arithmetic lives in `layout.rs`; each
//! column and overlay has its own module.

mod layout;
pub mod help;
pub mod keybindings;
pub mod rephrase;
pub mod review;
pub mod tickets;

use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::app::{AppState, Mode};
use crate::theme::Theme;
use layout::{compute_layout, render_status_bar};

/// Renders one complete frame.
///
/// Reads `state` only, apart from caching the ticket modal's viewport height
/// for the next paging keypress. Redrawing unchanged state gives an identical
/// frame.
pub fn render(frame: &mut Frame, state: &mut AppState, theme: &Theme) {
    let [header, left, right, status_bar] = compute_layout(frame);

    render_header(frame, header, state, theme);
    review::render_review_column(frame, left, state, theme);
    rephrase::render_rephrase_column(frame, right, state, theme);
    render_status_bar(frame, status_bar, state, theme);

    // Overlays last so they sit on top.
    let mode = state.mode;
    match mode {
        Mode::TicketModal if state.session.show_ticket_modal => {
            tickets::render_ticket_modal(frame, state, theme);
        }
        Mode::HelpOverlay => help::render_help_overlay(frame, theme, state.help_scroll),
        _ => {}
    }
}

fn render_header(frame: &mut Frame, area: Rect, state: &AppState, theme: &Theme) {
    let mut spans = vec![Span::styled(
        " revsense · review analysis ",
        Style::default().fg(theme.accent).add_modifier(Modifier::BOLD),
    )];
    if let Some(label) = state.tickets.counter_label() {
        spans.push(Span::styled(format!("  {label} "), Style::default().fg(theme.success)));
        spans.push(Span::styled("[v] view", Style::default().fg(theme.muted)));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use ratatui::{backend::TestBackend, buffer::Buffer, Terminal};
    use revsense_core::tickets::TicketReceipt;
    use revsense_core::types::{ExplanationResult, SentimentResult};

    fn draw(state: &mut AppState) -> Buffer {
        let mut terminal = Terminal::new(TestBackend::new(120, 40)).unwrap();
        let theme = Theme::dark();
        terminal.draw(|frame| render(frame, state, &theme)).unwrap();
        terminal.backend().buffer().clone()
    }

    fn buffer_text(buffer: &Buffer) -> String {
        let area = buffer.area;
        let mut out = String::new();
        for y in 0..area.height {
            for x in 0..area.width {
                out.push_str(buffer[(x, y)].symbol());
            }
            out.push('\n');
        }
        out
    }

    fn analysed_state() -> AppState {
        let mut state = AppState::default();
        state.session.review_text = "The battery died in a day".into();
        state.session.sentiment = Some(SentimentResult {
            final_sentiment: "negative".into(),
            confidence: 0.87,
        });
        state.session.explanation = Some(ExplanationResult {
            sentiment: "negative".into(),
            explanation: "Complains about battery life.".into(),
        });
        state
    }

    #[test]
    fn shows_sentiment_and_confidence() {
        let mut state = analysed_state();
        let text = buffer_text(&draw(&mut state));
        assert!(text.contains("NEGATIVE"));
        assert!(text.contains("87% confidence"));
        assert!(text.contains("Complains about battery life."));
        assert!(text.contains("Create Ticket"));
    }

    #[test]
    fn redraw_of_unchanged_state_is_identical() {
        let mut state = analysed_state();
        let first = draw(&mut state);
        let second = draw(&mut state);
        assert_eq!(first, second);
    }

    #[test]
    fn ticket_modal_lists_ticket_details() {
        let mut state = analysed_state();
        let draft = state.session.begin_ticket().unwrap();
        state.session.settle_ticket(None);
        let created_at = Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap();
        state.tickets.record(draft, TicketReceipt { created_at });
        state.open_tickets();

        let text = buffer_text(&draw(&mut state));
        assert!(text.contains("1 Ticket Created"));
        assert!(text.contains(&format!("TICK-{}", created_at.timestamp_millis())));
        assert!(text.contains("Review Analysis - NEGATIVE Sentiment"));
        assert!(text.contains("OPEN"));
        assert!(text.contains("Confidence: 87%"));
        assert!(state.modal_viewport_height > 0);
    }

    #[test]
    fn header_counter_hidden_without_tickets() {
        let mut state = AppState::default();
        let text = buffer_text(&draw(&mut state));
        assert!(!text.contains("Ticket Created"));
        assert!(!text.contains("Create Ticket"));
    }
}
