//! Right column: rephrased text and export options.

use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::app::{AppState, Mode, PanelFocus};
use crate::theme::Theme;

use super::layout::{inner_rect, key_hint, panel_block, spinner};
use super::review::render_editable;

const REPHRASE_PLACEHOLDER: &str = "Press r to rephrase the review.";

pub fn render_rephrase_column(frame: &mut Frame, area: Rect, state: &AppState, theme: &Theme) {
    let [rephrased, export] =
        area.layout(&Layout::vertical([Constraint::Fill(1), Constraint::Length(5)]));
    render_rephrased(frame, rephrased, state, theme);
    render_export(frame, export, state, theme);
}

fn render_rephrased(frame: &mut Frame, area: Rect, state: &AppState, theme: &Theme) {
    let session = &state.session;
    let editing = state.mode == Mode::EditRephrased;
    let focused = editing || (state.focus == PanelFocus::Rephrase && !state.mode.is_editing());
    frame.render_widget(panel_block(" Rephrased ", focused, theme), area);

    let inner = inner_rect(area);
    let [text_area, hint_area] =
        inner.layout(&Layout::vertical([Constraint::Fill(1), Constraint::Length(1)]));

    let text = session.rephrased.as_deref().unwrap_or_default();
    let cursor = editing.then_some(&state.rephrase_cursor);
    render_editable(frame, text_area, text, cursor, REPHRASE_PLACEHOLDER, theme);

    let mut hint = if session.is_rephrasing {
        vec![Span::styled(
            format!("{} Rephrasing...", spinner(state)),
            Style::default().fg(theme.action_disabled),
        )]
    } else {
        key_hint("r", "Rephrase", session.can_rephrase(), theme)
    };
    hint.push(Span::raw("  "));
    if session.copy_success.is_set() {
        hint.push(Span::styled("✓ Copied!", Style::default().fg(theme.success)));
    } else {
        hint.extend(key_hint("c", "Copy", session.rephrased_text().is_some(), theme));
    }
    hint.push(Span::raw("  "));
    hint.extend(key_hint("e", "Edit", session.rephrased.is_some(), theme));
    frame.render_widget(Paragraph::new(Line::from(hint)), hint_area);
}

fn render_export(frame: &mut Frame, area: Rect, state: &AppState, theme: &Theme) {
    let session = &state.session;
    frame.render_widget(panel_block(" Export ", false, theme), area);

    let lines = vec![
        Line::from(key_hint("o", "Copy original review", !session.review_text.is_empty(), theme)),
        Line::from(key_hint("c", "Copy rephrased text", session.rephrased_text().is_some(), theme)),
        Line::from(key_hint("s", "Copy analysis summary", session.has_results(), theme)),
    ];
    frame.render_widget(Paragraph::new(lines), inner_rect(area));
}
