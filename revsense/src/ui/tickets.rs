//! Ticket viewer modal.
//!
//! Drawn over the panels with `Clear`, like the help overlay. Lists every
//! ticket newest first; the content scrolls with `AppState::modal_scroll`.

use chrono::Local;
use ratatui::{
    Frame,
    layout::{Constraint, Rect},
    style::{Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Clear, Paragraph, Wrap},
};

use revsense_core::types::{confidence_pct, SentimentKind, Ticket};

use crate::app::AppState;
use crate::theme::Theme;

use super::layout::inner_rect;

/// Renders the modal and caches its inner height for paging.
pub fn render_ticket_modal(frame: &mut Frame, state: &mut AppState, theme: &Theme) {
    let area = modal_area(frame.area());
    if area.height < 3 {
        return;
    }
    state.modal_viewport_height = inner_rect(area).height;
    frame.render_widget(Clear, area);

    let title = match state.tickets.counter_label() {
        Some(label) => format!(" Tickets: {label}  j/k scroll, Esc to close "),
        None => " Tickets ".to_owned(),
    };
    let block = Block::bordered()
        .title(title)
        .border_style(Style::default().fg(theme.border_active));

    let mut lines = Vec::new();
    for (i, ticket) in state.tickets.list().iter().enumerate() {
        if i > 0 {
            lines.push(Line::default());
        }
        lines.extend(ticket_lines(ticket, theme));
    }

    frame.render_widget(
        Paragraph::new(Text::from(lines))
            .block(block)
            .wrap(Wrap { trim: false })
            .scroll((state.modal_scroll, 0)),
        area,
    );
}

fn ticket_lines(ticket: &Ticket, theme: &Theme) -> Vec<Line<'static>> {
    let label = Style::default().fg(theme.muted);
    let text = Style::default().fg(theme.text);
    let sentiment_color = theme.sentiment(SentimentKind::from_label(&ticket.sentiment));
    let created = ticket.created_at.with_timezone(&Local).format("%Y-%m-%d %H:%M:%S");

    vec![
        Line::from(vec![
            Span::styled(
                ticket.id.clone(),
                Style::default().fg(theme.accent).add_modifier(Modifier::BOLD),
            ),
            Span::raw("  "),
            Span::styled(ticket.status.label(), Style::default().fg(theme.action_enabled)),
        ]),
        Line::styled(ticket.title.clone(), text.add_modifier(Modifier::BOLD)),
        Line::from(vec![
            Span::styled("Sentiment: ", label),
            Span::styled(ticket.sentiment.clone(), Style::default().fg(sentiment_color)),
            Span::raw("  "),
            Span::styled(format!("Confidence: {}%", confidence_pct(ticket.confidence)), text),
        ]),
        field("Description: ", ticket.description.clone(), label, text),
        field("Original: ", ticket.original_text.clone(), label, text),
        field("Created: ", created.to_string(), label, text),
    ]
}

fn field(name: &'static str, value: String, label: Style, text: Style) -> Line<'static> {
    Line::from(vec![Span::styled(name, label), Span::styled(value, text)])
}

fn modal_area(frame_area: Rect) -> Rect {
    frame_area.centered(Constraint::Percentage(80), Constraint::Percentage(80))
}
