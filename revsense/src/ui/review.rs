//! Left column: the review input and the analysis results.

use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Paragraph, Wrap},
};

use crate::app::{AppState, Mode, PanelFocus};
use crate::editor::{hard_wrap, wrapped_cursor, TextCursor};
use crate::theme::Theme;

use super::layout::{inner_rect, key_hint, panel_block, spinner};

const REVIEW_PLACEHOLDER: &str = "Press i and enter the review text here...";

/// Renders the left column: review editor on top, results below.
pub fn render_review_column(frame: &mut Frame, area: Rect, state: &AppState, theme: &Theme) {
    let [input, results] =
        area.layout(&Layout::vertical([Constraint::Fill(1), Constraint::Length(9)]));
    render_review_input(frame, input, state, theme);
    render_results(frame, results, state, theme);
}

fn render_review_input(frame: &mut Frame, area: Rect, state: &AppState, theme: &Theme) {
    let editing = state.mode == Mode::EditReview;
    let focused = editing || (state.focus == PanelFocus::Review && !state.mode.is_editing());
    frame.render_widget(panel_block(" Review ", focused, theme), area);

    let inner = inner_rect(area);
    let [text_area, hint_area] =
        inner.layout(&Layout::vertical([Constraint::Fill(1), Constraint::Length(1)]));

    let cursor = editing.then_some(&state.review_cursor);
    render_editable(
        frame,
        text_area,
        &state.session.review_text,
        cursor,
        REVIEW_PLACEHOLDER,
        theme,
    );

    let session = &state.session;
    let mut hint = if session.is_analyzing {
        vec![Span::styled(
            format!("{} Analyzing...", spinner(state)),
            Style::default().fg(theme.action_disabled),
        )]
    } else {
        key_hint("a", "Analyze", session.can_analyze(), theme)
    };
    hint.push(Span::raw("  "));
    hint.extend(key_hint("i", "Edit", true, theme));
    frame.render_widget(Paragraph::new(Line::from(hint)), hint_area);
}

fn render_results(frame: &mut Frame, area: Rect, state: &AppState, theme: &Theme) {
    let session = &state.session;
    frame.render_widget(panel_block(" Analysis ", false, theme), area);
    let inner = inner_rect(area);

    let Some(sentiment) = session.sentiment.as_ref() else {
        let placeholder = if session.is_analyzing {
            format!("{} Analyzing...", spinner(state))
        } else {
            "No analysis yet. Press a to analyze the review.".to_owned()
        };
        frame.render_widget(
            Paragraph::new(placeholder).style(Style::default().fg(theme.muted)),
            inner,
        );
        return;
    };

    let kind_color = theme.sentiment(sentiment.kind());
    let mut lines = vec![Line::from(vec![
        Span::styled(
            format!(" {} ", sentiment.final_sentiment.to_uppercase()),
            Style::default().fg(theme.status_bar_bg).bg(kind_color).add_modifier(Modifier::BOLD),
        ),
        Span::raw(" "),
        Span::styled(sentiment.confidence_label(), Style::default().fg(theme.text)),
    ])];
    lines.push(Line::default());
    match session.explanation.as_ref() {
        Some(explanation) => {
            lines.push(Line::styled(
                explanation.explanation.clone(),
                Style::default().fg(theme.text),
            ));
        }
        None if session.is_analyzing => {
            lines.push(Line::styled(
                format!("{} Explaining...", spinner(state)),
                Style::default().fg(theme.muted),
            ));
        }
        None => {}
    }

    let [body, hint_area] =
        inner.layout(&Layout::vertical([Constraint::Fill(1), Constraint::Length(1)]));
    frame.render_widget(Paragraph::new(Text::from(lines)).wrap(Wrap { trim: false }), body);

    if session.has_results() {
        let hint = if session.is_creating_ticket {
            Line::styled(
                format!("{} Creating Ticket...", spinner(state)),
                Style::default().fg(theme.action_disabled),
            )
        } else if session.ticket_success.is_set() {
            Line::styled("✓ Ticket Created!", Style::default().fg(theme.success))
        } else {
            Line::from(key_hint("t", "Create Ticket", session.can_create_ticket(), theme))
        };
        frame.render_widget(Paragraph::new(hint), hint_area);
    }
}

/// Draws hard-wrapped `text`, scrolled so the cursor stays visible.
///
/// With a cursor the terminal cursor is placed on it; an empty `text` shows
/// `placeholder` instead.
pub(super) fn render_editable(
    frame: &mut Frame,
    area: Rect,
    text: &str,
    cursor: Option<&TextCursor>,
    placeholder: &str,
    theme: &Theme,
) {
    if area.width == 0 || area.height == 0 {
        return;
    }
    let width = usize::from(area.width);
    let height = usize::from(area.height);

    if text.is_empty() {
        frame.render_widget(
            Paragraph::new(placeholder.to_owned())
                .style(Style::default().fg(theme.muted))
                .wrap(Wrap { trim: false }),
            area,
        );
        if cursor.is_some() {
            frame.set_cursor_position((area.x, area.y));
        }
        return;
    }

    let rows = hard_wrap(text, width);
    let (cursor_row, cursor_col) = cursor.map_or((0, 0), |c| wrapped_cursor(text, c, width));
    let top = (cursor_row + 1).saturating_sub(height);

    let lines: Vec<Line> = rows
        .into_iter()
        .skip(top)
        .take(height)
        .map(|row| Line::styled(row, Style::default().fg(theme.text)))
        .collect();
    frame.render_widget(Paragraph::new(lines), area);

    if cursor.is_some() {
        let col = cursor_col.min(width - 1);
        let x = area.x + u16::try_from(col).unwrap_or(0);
        let y = area.y + u16::try_from(cursor_row - top).unwrap_or(0);
        frame.set_cursor_position((x, y));
    }
}
