//! Layout arithmetic and shared widgets for revsense.
//!
//! Pure functions of the frame size and read-only state. Called inside
//! `terminal.draw()` on every render, so each frame reflects the current
//! terminal size.
//!
//! # Geometry
//!
//! A one-row header, two columns (review + results on the left, rephrase +
//! export on the right) and a one-row status bar. Below 100 columns the
//! columns stack vertically instead.

use ratatui::{
    Frame,
    layout::{Constraint, Layout, Margin, Rect, Spacing},
    style::{Modifier, Style},
    symbols::merge::MergeStrategy,
    text::{Line, Span},
    widgets::{Block, BorderType, Paragraph},
};

use crate::app::{AppState, Mode};
use crate::theme::Theme;

const SPINNER: [&str; 8] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧"];

/// Returns `[header, left, right, status_bar]` for the current frame.
pub fn compute_layout(frame: &Frame) -> [Rect; 4] {
    let area = frame.area();
    let [header, main_area, status_bar] = area.layout(&Layout::vertical([
        Constraint::Length(1),
        Constraint::Fill(1),
        Constraint::Length(1),
    ]));

    let columns = if area.width >= 100 {
        Layout::horizontal([Constraint::Percentage(50), Constraint::Percentage(50)])
    } else {
        Layout::vertical([Constraint::Percentage(50), Constraint::Percentage(50)])
    };
    let [left, right] = main_area.layout(&columns.spacing(Spacing::Overlap(1)));

    [header, left, right, status_bar]
}

/// Inner `Rect` of a bordered panel.
pub fn inner_rect(area: Rect) -> Rect {
    area.inner(Margin {
        vertical: 1,
        horizontal: 1,
    })
}

/// Bordered panel block; thick border when focused.
///
/// `MergeStrategy::Fuzzy` because `Exact` draws wrong junctions when mixing
/// `Thick` and `Plain` borders.
pub fn panel_block<'a>(title: &'a str, is_focused: bool, theme: &'a Theme) -> Block<'a> {
    let border_style = if is_focused {
        Style::default().fg(theme.border_active)
    } else {
        Style::default().fg(theme.border_inactive)
    };
    let border_type = if is_focused { BorderType::Thick } else { BorderType::Plain };

    Block::bordered()
        .title(title)
        .border_type(border_type)
        .border_style(border_style)
        .merge_borders(MergeStrategy::Fuzzy)
}

/// Spinner glyph for the current tick.
pub fn spinner(state: &AppState) -> &'static str {
    SPINNER[state.spinner_frame % SPINNER.len()]
}

/// `[k] Label` styled as available or not.
pub fn key_hint(key: &str, label: &str, enabled: bool, theme: &Theme) -> Vec<Span<'static>> {
    let color = if enabled { theme.action_enabled } else { theme.action_disabled };
    let mut key_style = Style::default().fg(color);
    if enabled {
        key_style = key_style.add_modifier(Modifier::BOLD);
    }
    vec![
        Span::styled(format!("[{key}] "), key_style),
        Span::styled(label.to_owned(), Style::default().fg(color)),
    ]
}

/// Renders the status bar: mode indicator, then the last failure if any.
pub fn render_status_bar(frame: &mut Frame, area: Rect, state: &AppState, theme: &Theme) {
    let (mode_text, mode_fg) = match state.mode {
        Mode::EditReview | Mode::EditRephrased => (" INSERT ", theme.status_mode_insert),
        Mode::Normal | Mode::TicketModal | Mode::HelpOverlay => {
            (" NORMAL ", theme.status_mode_normal)
        }
    };

    let mut spans = vec![Span::styled(
        mode_text,
        Style::default().fg(mode_fg).add_modifier(Modifier::BOLD),
    )];
    match &state.session.last_error {
        Some(message) => {
            spans.push(Span::styled(format!(" {message}"), Style::default().fg(theme.error)));
        }
        None => {
            let hint = if state.mode.is_editing() {
                " Esc stop editing · Ctrl-a analyze"
            } else {
                " ? help · q quit"
            };
            spans.push(Span::raw(hint));
        }
    }

    frame.render_widget(
        Paragraph::new(Line::from(spans))
            .style(Style::default().bg(theme.status_bar_bg).fg(theme.status_bar_fg)),
        area,
    );
}
