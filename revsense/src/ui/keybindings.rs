//! Keybinding dispatcher for revsense.
//!
//! Translates crossterm `KeyEvent`s into `AppState` mutations and returns a
//! `KeyAction` for the event loop. Anything that talks to a collaborator
//! (analysis service, ticketing system, clipboard) is returned as a
//! [`Command`] instead of being run here, so this module never spawns.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::actions::{Command, CopyTarget};
use crate::app::{AppState, Mode, PanelFocus};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    Continue,
    /// Hand a command to the action runners, then continue.
    Run(Command),
    Quit,
}

/// Dispatches a key event to the handler for the current mode.
pub fn handle_key(key: KeyEvent, state: &mut AppState) -> KeyAction {
    match state.mode {
        Mode::Normal => handle_normal(key, state),
        Mode::EditReview | Mode::EditRephrased => handle_edit(key, state),
        Mode::TicketModal => handle_ticket_modal(key, state),
        Mode::HelpOverlay => handle_help(key, state),
    }
}

/// Inserts pasted text into whichever buffer is being edited.
pub fn handle_paste(text: &str, state: &mut AppState) -> KeyAction {
    let text = text.replace("\r\n", "\n").replace('\r', "\n");
    match state.mode {
        Mode::EditReview => {
            state.review_cursor.insert_str(&mut state.session.review_text, &text);
            review_edited(state)
        }
        Mode::EditRephrased => {
            if let Some(rephrased) = state.session.rephrased.as_mut() {
                state.rephrase_cursor.insert_str(rephrased, &text);
            }
            KeyAction::Continue
        }
        _ => KeyAction::Continue,
    }
}

// ---------------------------------------------------------------------------
// Normal mode
// ---------------------------------------------------------------------------

fn handle_normal(key: KeyEvent, state: &mut AppState) -> KeyAction {
    match key.code {
        KeyCode::Char('i') => {
            state.edit_review();
            KeyAction::Continue
        }
        KeyCode::Char('e') => {
            state.edit_rephrased();
            KeyAction::Continue
        }
        KeyCode::Enter => {
            if state.focus == PanelFocus::Review || !state.edit_rephrased() {
                state.edit_review();
            }
            KeyAction::Continue
        }
        KeyCode::Tab | KeyCode::BackTab => {
            state.focus = state.focus.toggle();
            KeyAction::Continue
        }

        KeyCode::Char('a') => KeyAction::Run(Command::Analyze),
        KeyCode::Char('r') => KeyAction::Run(Command::Rephrase),
        KeyCode::Char('t') => KeyAction::Run(Command::CreateTicket),
        KeyCode::Char('c') => KeyAction::Run(Command::Copy(CopyTarget::Rephrased)),
        KeyCode::Char('o') => KeyAction::Run(Command::Copy(CopyTarget::Original)),
        KeyCode::Char('s') => KeyAction::Run(Command::Copy(CopyTarget::Summary)),

        KeyCode::Char('v') => {
            state.open_tickets();
            KeyAction::Continue
        }
        KeyCode::Char('?') => {
            state.open_help();
            KeyAction::Continue
        }
        // Esc only backs out of editing and overlays.
        KeyCode::Char('q') => KeyAction::Quit,
        _ => KeyAction::Continue,
    }
}

// ---------------------------------------------------------------------------
// Editing modes
// ---------------------------------------------------------------------------

fn handle_edit(key: KeyEvent, state: &mut AppState) -> KeyAction {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    if key.code == KeyCode::Esc {
        state.mode = Mode::Normal;
        return KeyAction::Continue;
    }
    if ctrl {
        return match key.code {
            KeyCode::Char('a') => KeyAction::Run(Command::Analyze),
            KeyCode::Char('r') => KeyAction::Run(Command::Rephrase),
            _ => KeyAction::Continue,
        };
    }

    if state.mode == Mode::EditReview {
        let text = &mut state.session.review_text;
        let cursor = &mut state.review_cursor;
        if apply_edit_key(key.code, cursor, text) {
            return review_edited(state);
        }
    } else if let Some(text) = state.session.rephrased.as_mut() {
        apply_edit_key(key.code, &mut state.rephrase_cursor, text);
    }
    KeyAction::Continue
}

/// Applies one editing key. Returns whether the text changed.
fn apply_edit_key(
    code: KeyCode,
    cursor: &mut crate::editor::TextCursor,
    text: &mut String,
) -> bool {
    match code {
        KeyCode::Char(ch) => {
            cursor.insert_char(text, ch);
            true
        }
        KeyCode::Enter => {
            cursor.insert_char(text, '\n');
            true
        }
        KeyCode::Backspace => cursor.backspace(text),
        KeyCode::Delete => cursor.delete(text),
        KeyCode::Left => {
            cursor.left(text);
            false
        }
        KeyCode::Right => {
            cursor.right(text);
            false
        }
        KeyCode::Home => {
            cursor.home(text);
            false
        }
        KeyCode::End => {
            cursor.end(text);
            false
        }
        _ => false,
    }
}

fn review_edited(state: &AppState) -> KeyAction {
    if state.analyze_on_edit && state.session.can_analyze() {
        KeyAction::Run(Command::Analyze)
    } else {
        KeyAction::Continue
    }
}

// ---------------------------------------------------------------------------
// Overlays
// ---------------------------------------------------------------------------

fn handle_ticket_modal(key: KeyEvent, state: &mut AppState) -> KeyAction {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    match key.code {
        KeyCode::Char('j') | KeyCode::Down => state.scroll_modal_down(1),
        KeyCode::Char('k') | KeyCode::Up => state.scroll_modal_up(1),
        KeyCode::Char('d') if ctrl => state.modal_page_down(),
        KeyCode::Char('u') if ctrl => state.modal_page_up(),
        KeyCode::PageDown => state.modal_page_down(),
        KeyCode::PageUp => state.modal_page_up(),
        KeyCode::Char('g') => state.modal_scroll = 0,
        KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('v') => state.close_tickets(),
        _ => {}
    }
    KeyAction::Continue
}

fn handle_help(key: KeyEvent, state: &mut AppState) -> KeyAction {
    match key.code {
        KeyCode::Char('j') | KeyCode::Down => {
            state.help_scroll = state.help_scroll.saturating_add(1);
        }
        KeyCode::Char('k') | KeyCode::Up => {
            state.help_scroll = state.help_scroll.saturating_sub(1);
        }
        KeyCode::Char('?') | KeyCode::Esc | KeyCode::Char('q') => {
            state.mode = Mode::Normal;
        }
        _ => {}
    }
    KeyAction::Continue
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn type_str(state: &mut AppState, s: &str) {
        for ch in s.chars() {
            handle_key(key(KeyCode::Char(ch)), state);
        }
    }

    #[test]
    fn typing_edits_review_text() {
        let mut state = AppState::default();
        handle_key(key(KeyCode::Char('i')), &mut state);
        assert_eq!(state.mode, Mode::EditReview);
        type_str(&mut state, "Great!");
        handle_key(key(KeyCode::Backspace), &mut state);
        assert_eq!(state.session.review_text, "Great");
        handle_key(key(KeyCode::Esc), &mut state);
        assert_eq!(state.mode, Mode::Normal);
    }

    #[test]
    fn action_keys_become_commands() {
        let mut state = AppState::default();
        assert_eq!(
            handle_key(key(KeyCode::Char('a')), &mut state),
            KeyAction::Run(Command::Analyze)
        );
        assert_eq!(
            handle_key(key(KeyCode::Char('t')), &mut state),
            KeyAction::Run(Command::CreateTicket)
        );
        assert_eq!(
            handle_key(key(KeyCode::Char('s')), &mut state),
            KeyAction::Run(Command::Copy(CopyTarget::Summary))
        );
        assert_eq!(handle_key(key(KeyCode::Char('q')), &mut state), KeyAction::Quit);
    }

    #[test]
    fn esc_never_quits() {
        let mut state = AppState::default();
        state.edit_review();
        handle_key(key(KeyCode::Esc), &mut state);
        assert_eq!(state.mode, Mode::Normal);
        assert_eq!(handle_key(key(KeyCode::Esc), &mut state), KeyAction::Continue);
        assert_eq!(state.mode, Mode::Normal);
    }

    #[test]
    fn analyze_on_edit_only_fires_when_enabled() {
        let mut state = AppState::default();
        state.edit_review();
        assert_eq!(handle_key(key(KeyCode::Char('x')), &mut state), KeyAction::Continue);

        let mut state = AppState::with_analyze_on_edit(true);
        state.edit_review();
        assert_eq!(handle_key(key(KeyCode::Char(' ')), &mut state), KeyAction::Continue);
        assert_eq!(
            handle_key(key(KeyCode::Char('x')), &mut state),
            KeyAction::Run(Command::Analyze)
        );
        state.session.is_analyzing = true;
        assert_eq!(handle_key(key(KeyCode::Char('y')), &mut state), KeyAction::Continue);
    }

    #[test]
    fn rephrased_text_is_editable_once_present() {
        let mut state = AppState::default();
        handle_key(key(KeyCode::Char('e')), &mut state);
        assert_eq!(state.mode, Mode::Normal);

        state.apply_rephrase("Fine".into());
        handle_key(key(KeyCode::Char('e')), &mut state);
        assert_eq!(state.mode, Mode::EditRephrased);
        type_str(&mut state, " indeed");
        assert_eq!(state.session.rephrased.as_deref(), Some("Fine indeed"));
        assert_eq!(state.session.review_text, "");
    }

    #[test]
    fn paste_normalises_line_endings() {
        let mut state = AppState::default();
        state.edit_review();
        handle_paste("one\r\ntwo", &mut state);
        assert_eq!(state.session.review_text, "one\ntwo");
    }

    #[test]
    fn ticket_modal_needs_tickets() {
        let mut state = AppState::default();
        handle_key(key(KeyCode::Char('v')), &mut state);
        assert_eq!(state.mode, Mode::Normal);
        assert!(!state.session.show_ticket_modal);
    }
}
