//! Help overlay renderer for revsense.
//!
//! Draws a centred modal over the panels. `Clear` erases the background
//! first, inside the same `terminal.draw()` closure as everything else.

use ratatui::{
    Frame,
    layout::Constraint,
    style::Style,
    text::{Line, Text},
    widgets::{Block, Clear, Paragraph, Wrap},
};

use crate::theme::Theme;

/// Renders the help overlay, scrolled by `help_scroll` rows.
///
/// Skipped on terminals narrower than 40 columns.
pub fn render_help_overlay(frame: &mut Frame, theme: &Theme, help_scroll: u16) {
    if frame.area().width < 40 {
        return;
    }

    let overlay_area = frame
        .area()
        .centered(Constraint::Percentage(70), Constraint::Percentage(80));
    frame.render_widget(Clear, overlay_area);

    let block = Block::bordered()
        .title(" Help  j/k scroll, ? or Esc to dismiss ")
        .border_style(Style::default().fg(theme.border_active));

    frame.render_widget(
        Paragraph::new(build_help_text())
            .block(block)
            .wrap(Wrap { trim: false })
            .scroll((help_scroll, 0)),
        overlay_area,
    );
}

fn build_help_text() -> Text<'static> {
    Text::from(vec![
        Line::from("Review"),
        Line::from("  i / Enter     Edit the review text"),
        Line::from("  a             Analyze sentiment and explanation"),
        Line::from("  r             Rephrase the review"),
        Line::from("  e             Edit the rephrased text"),
        Line::from("  Tab           Switch panel focus"),
        Line::from(""),
        Line::from("Editing"),
        Line::from("  Esc           Stop editing"),
        Line::from("  Ctrl-a        Analyze"),
        Line::from("  Ctrl-r        Rephrase"),
        Line::from("  Arrows, Home, End, Backspace, Delete"),
        Line::from(""),
        Line::from("Tickets"),
        Line::from("  t             Create a ticket from the analysis"),
        Line::from("  v             View created tickets (j/k scroll, Esc close)"),
        Line::from(""),
        Line::from("Export"),
        Line::from("  c             Copy rephrased text"),
        Line::from("  o             Copy original review"),
        Line::from("  s             Copy analysis summary"),
        Line::from(""),
        Line::from("General"),
        Line::from("  ?             Open / close this help overlay"),
        Line::from("  q             Quit (tickets are not kept)"),
    ])
}
