//! Session state: the review text, the latest results and the UI flags.
//!
//! Every action is split into `begin_*` (check availability, set the
//! in-flight flag, snapshot the input) and `settle_*` (clear the flag).
//! Results are committed in between through `apply_*`. A `begin_*` that
//! returns `None` changed nothing.

use std::time::Duration;

use crate::latch::TimedLatch;
use crate::pipeline::{is_blank, AnalysisStep};
use crate::tickets::TicketDraft;
use crate::types::{ExplanationResult, SentimentResult};

pub const COPY_SUCCESS_WINDOW: Duration = Duration::from_secs(2);
pub const TICKET_SUCCESS_WINDOW: Duration = Duration::from_secs(3);

#[derive(Debug)]
pub struct Session {
    pub review_text: String,
    pub sentiment: Option<SentimentResult>,
    pub explanation: Option<ExplanationResult>,
    /// `None` until the first successful rephrase; user-editable afterwards.
    pub rephrased: Option<String>,

    pub is_analyzing: bool,
    pub is_rephrasing: bool,
    pub is_creating_ticket: bool,
    pub copy_success: TimedLatch,
    pub ticket_success: TimedLatch,
    pub show_ticket_modal: bool,

    /// Message of the most recent failure, cleared by the next success.
    pub last_error: Option<String>,
}

impl Default for Session {
    fn default() -> Self {
        Self {
            review_text: String::new(),
            sentiment: None,
            explanation: None,
            rephrased: None,
            is_analyzing: false,
            is_rephrasing: false,
            is_creating_ticket: false,
            copy_success: TimedLatch::new(COPY_SUCCESS_WINDOW),
            ticket_success: TimedLatch::new(TICKET_SUCCESS_WINDOW),
            show_ticket_modal: false,
            last_error: None,
        }
    }
}

impl Session {
    pub fn can_analyze(&self) -> bool {
        !is_blank(&self.review_text) && !self.is_analyzing
    }

    pub fn can_rephrase(&self) -> bool {
        !is_blank(&self.review_text) && !self.is_rephrasing
    }

    pub fn has_results(&self) -> bool {
        self.sentiment.is_some() && self.explanation.is_some()
    }

    pub fn can_create_ticket(&self) -> bool {
        self.has_results() && !self.is_creating_ticket
    }

    /// Marks an analysis in flight and returns the text to send.
    pub fn begin_analysis(&mut self) -> Option<String> {
        if !self.can_analyze() {
            return None;
        }
        self.is_analyzing = true;
        Some(self.review_text.clone())
    }

    pub fn apply_analysis_step(&mut self, step: AnalysisStep) {
        match step {
            AnalysisStep::Sentiment(sentiment) => self.sentiment = Some(sentiment),
            AnalysisStep::Explanation(explanation) => {
                self.explanation = Some(explanation);
                self.last_error = None;
            }
        }
    }

    pub fn settle_analysis(&mut self, error: Option<String>) {
        self.is_analyzing = false;
        if error.is_some() {
            self.last_error = error;
        }
    }

    pub fn begin_rephrase(&mut self) -> Option<String> {
        if !self.can_rephrase() {
            return None;
        }
        self.is_rephrasing = true;
        Some(self.review_text.clone())
    }

    pub fn apply_rephrase(&mut self, rephrased: String) {
        self.rephrased = Some(rephrased);
        self.last_error = None;
    }

    pub fn settle_rephrase(&mut self, error: Option<String>) {
        self.is_rephrasing = false;
        if error.is_some() {
            self.last_error = error;
        }
    }

    /// Marks a ticket submission in flight and snapshots the draft.
    ///
    /// Requires both a sentiment and an explanation.
    pub fn begin_ticket(&mut self) -> Option<TicketDraft> {
        if !self.can_create_ticket() {
            return None;
        }
        let sentiment = self.sentiment.as_ref()?;
        let draft = TicketDraft::new(&self.review_text, self.rephrased.as_deref(), sentiment);
        self.is_creating_ticket = true;
        Some(draft)
    }

    pub fn settle_ticket(&mut self, error: Option<String>) {
        self.is_creating_ticket = false;
        if error.is_some() {
            self.last_error = error;
        }
    }

    /// Rephrased text if present and non-empty.
    pub fn rephrased_text(&self) -> Option<&str> {
        self.rephrased.as_deref().filter(|r| !r.is_empty())
    }

    /// Clipboard summary of the current analysis; needs both results.
    pub fn analysis_summary(&self) -> Option<String> {
        let (sentiment, explanation) = (self.sentiment.as_ref()?, self.explanation.as_ref()?);
        Some(format!(
            "Sentiment: {} ({}% confidence)\nExplanation: {}",
            sentiment.final_sentiment,
            sentiment.confidence_pct(),
            explanation.explanation
        ))
    }

    /// Opens the ticket viewer; refused while there is nothing to show.
    pub fn open_ticket_modal(&mut self, ticket_count: usize) -> bool {
        self.show_ticket_modal = ticket_count > 0;
        self.show_ticket_modal
    }

    pub fn close_ticket_modal(&mut self) {
        self.show_ticket_modal = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn analysed(text: &str) -> Session {
        let mut session = Session {
            review_text: text.to_owned(),
            ..Session::default()
        };
        session.apply_analysis_step(AnalysisStep::Sentiment(SentimentResult {
            final_sentiment: "positive".into(),
            confidence: 0.95,
        }));
        session.apply_analysis_step(AnalysisStep::Explanation(ExplanationResult {
            sentiment: "positive".into(),
            explanation: "Praises the product.".into(),
        }));
        session
    }

    #[test]
    fn blank_text_begins_nothing() {
        for text in ["", "   ", "\n\t "] {
            let mut session = Session {
                review_text: text.to_owned(),
                ..Session::default()
            };
            assert_eq!(session.begin_analysis(), None);
            assert_eq!(session.begin_rephrase(), None);
            assert!(!session.is_analyzing);
            assert!(!session.is_rephrasing);
        }
    }

    #[test]
    fn analysis_in_flight_blocks_second_begin() {
        let mut session = Session {
            review_text: " Great product ".into(),
            ..Session::default()
        };
        assert_eq!(session.begin_analysis().as_deref(), Some(" Great product "));
        assert!(!session.can_analyze());
        assert_eq!(session.begin_analysis(), None);
        assert!(session.can_rephrase(), "rephrase is independent");
        session.settle_analysis(None);
        assert!(session.can_analyze());
    }

    #[test]
    fn ticket_needs_both_results() {
        let mut session = Session {
            review_text: "x".into(),
            ..Session::default()
        };
        session.apply_analysis_step(AnalysisStep::Sentiment(SentimentResult {
            final_sentiment: "negative".into(),
            confidence: 0.87,
        }));
        assert!(!session.can_create_ticket());
        assert_eq!(session.begin_ticket(), None);
        assert!(!session.is_creating_ticket);
    }

    #[test]
    fn begin_ticket_snapshots_session() {
        let mut session = analysed("Great product");
        let draft = session.begin_ticket().unwrap();
        assert!(session.is_creating_ticket);
        assert_eq!(draft.description, "Great product");
        assert_eq!(draft.confidence, 0.95);
        assert_eq!(session.begin_ticket(), None, "one submission at a time");
        session.settle_ticket(None);
        assert!(!session.is_creating_ticket);
    }

    #[test]
    fn failure_is_reported_until_next_success() {
        let mut session = Session {
            review_text: "x".into(),
            ..Session::default()
        };
        session.begin_rephrase();
        session.settle_rephrase(Some("rephrase failed".into()));
        assert_eq!(session.last_error.as_deref(), Some("rephrase failed"));
        assert_eq!(session.rephrased, None);
        session.apply_rephrase("y".into());
        assert_eq!(session.last_error, None);
    }

    #[test]
    fn summary_formats_percentage() {
        let session = analysed("Great product");
        assert_eq!(
            session.analysis_summary().unwrap(),
            "Sentiment: positive (95% confidence)\nExplanation: Praises the product."
        );
        assert_eq!(Session::default().analysis_summary(), None);
    }

    #[test]
    fn modal_only_opens_with_tickets() {
        let mut session = Session::default();
        assert!(!session.open_ticket_modal(0));
        assert!(session.open_ticket_modal(2));
        session.close_ticket_modal();
        assert!(!session.show_ticket_modal);
    }
}
