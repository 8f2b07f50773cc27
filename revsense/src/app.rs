//! Central application state for revsense.
//!
//! `AppState` bundles the core [`Session`] and [`TicketRegistry`] with the
//! purely visual state (mode, focus, cursors, scroll offsets). The render
//! module reads it; the key dispatcher and the action runners mutate it, all
//! from the main loop.

use revsense_core::session::Session;
use revsense_core::tickets::TicketRegistry;

use crate::editor::TextCursor;

/// Which keybinding set is active.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    #[default]
    Normal,
    /// Typing into the review text.
    EditReview,
    /// Typing into the rephrased text.
    EditRephrased,
    /// Ticket viewer modal is shown above all panels.
    TicketModal,
    /// Help overlay is shown above all panels.
    HelpOverlay,
}

impl Mode {
    pub fn is_editing(self) -> bool {
        matches!(self, Mode::EditReview | Mode::EditRephrased)
    }
}

/// Which column has keyboard focus in Normal mode.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum PanelFocus {
    /// Left column: review input and analysis results.
    #[default]
    Review,
    /// Right column: rephrased text and export options.
    Rephrase,
}

impl PanelFocus {
    pub fn toggle(self) -> Self {
        match self {
            PanelFocus::Review => PanelFocus::Rephrase,
            PanelFocus::Rephrase => PanelFocus::Review,
        }
    }
}

pub struct AppState {
    pub mode: Mode,
    pub focus: PanelFocus,

    pub session: Session,
    pub tickets: TicketRegistry,

    pub review_cursor: TextCursor,
    pub rephrase_cursor: TextCursor,

    /// Vertical scroll offset of the ticket modal.
    pub modal_scroll: u16,
    /// Inner height of the ticket modal, cached after each render.
    pub modal_viewport_height: u16,
    pub help_scroll: u16,

    /// Start an analysis after every edit of the review text.
    pub analyze_on_edit: bool,
    /// Advanced on every logic tick; drives the in-flight spinners.
    pub spinner_frame: usize,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            mode: Mode::default(),
            focus: PanelFocus::default(),
            session: Session::default(),
            tickets: TicketRegistry::new(),
            review_cursor: TextCursor::default(),
            rephrase_cursor: TextCursor::default(),
            modal_scroll: 0,
            modal_viewport_height: 0,
            help_scroll: 0,
            analyze_on_edit: false,
            spinner_frame: 0,
        }
    }
}

impl AppState {
    pub fn with_analyze_on_edit(analyze_on_edit: bool) -> Self {
        Self {
            analyze_on_edit,
            ..Self::default()
        }
    }

    pub fn tick(&mut self) {
        self.spinner_frame = self.spinner_frame.wrapping_add(1);
    }

    /// Enters review editing with the cursor at the end of the text.
    pub fn edit_review(&mut self) {
        self.review_cursor = TextCursor::at_end(&self.session.review_text);
        self.focus = PanelFocus::Review;
        self.mode = Mode::EditReview;
    }

    /// Enters rephrased-text editing. Refused until a rephrase exists.
    pub fn edit_rephrased(&mut self) -> bool {
        let Some(text) = self.session.rephrased.as_deref() else {
            return false;
        };
        self.rephrase_cursor = TextCursor::at_end(text);
        self.focus = PanelFocus::Rephrase;
        self.mode = Mode::EditRephrased;
        true
    }

    /// Commits a rephrase result; the cursor moves to the end of the new text.
    pub fn apply_rephrase(&mut self, rephrased: String) {
        self.rephrase_cursor = TextCursor::at_end(&rephrased);
        self.session.apply_rephrase(rephrased);
    }

    pub fn open_tickets(&mut self) {
        if self.session.open_ticket_modal(self.tickets.len()) {
            self.modal_scroll = 0;
            self.mode = Mode::TicketModal;
        }
    }

    pub fn close_tickets(&mut self) {
        self.session.close_ticket_modal();
        self.mode = Mode::Normal;
    }

    pub fn open_help(&mut self) {
        self.help_scroll = 0;
        self.mode = Mode::HelpOverlay;
    }

    pub fn scroll_modal_down(&mut self, lines: u16) {
        self.modal_scroll = self.modal_scroll.saturating_add(lines);
    }

    pub fn scroll_modal_up(&mut self, lines: u16) {
        self.modal_scroll = self.modal_scroll.saturating_sub(lines);
    }

    pub fn modal_page_down(&mut self) {
        self.scroll_modal_down((self.modal_viewport_height / 2).max(1));
    }

    pub fn modal_page_up(&mut self) {
        self.scroll_modal_up((self.modal_viewport_height / 2).max(1));
    }
}
