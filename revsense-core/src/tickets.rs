//! In-memory ticket registry and the ticketing collaborator seam.
//!
//! A ticket starts as a [`TicketDraft`] snapshotted from the session when the
//! user asks for it. The draft is submitted to a [`TicketingSystem`]; only a
//! successful receipt turns it into a [`Ticket`] in the [`TicketRegistry`].
//! The registry is newest-first and append-only: there is no update or delete.

use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tracing::info;

use crate::error::TicketError;
use crate::types::{SentimentResult, Ticket, TicketStatus};

/// Everything a ticket needs except its id and creation time.
#[derive(Debug, Clone, PartialEq)]
pub struct TicketDraft {
    pub title: String,
    pub description: String,
    pub sentiment: String,
    pub confidence: f64,
    pub original_text: String,
}

impl TicketDraft {
    /// Builds the draft for one analysis.
    ///
    /// The description is the rephrased text when there is one (and it is not
    /// blank), otherwise the original review text.
    pub fn new(review_text: &str, rephrased: Option<&str>, sentiment: &SentimentResult) -> Self {
        let description = rephrased
            .filter(|r| !r.is_empty())
            .unwrap_or(review_text)
            .to_owned();
        Self {
            title: format!(
                "Review Analysis - {} Sentiment",
                sentiment.final_sentiment.to_uppercase()
            ),
            description,
            sentiment: sentiment.final_sentiment.clone(),
            confidence: sentiment.confidence,
            original_text: review_text.to_owned(),
        }
    }
}

/// Acknowledgement from the ticketing system.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TicketReceipt {
    pub created_at: DateTime<Utc>,
}

/// External ticketing collaborator.
#[async_trait]
pub trait TicketingSystem: Send + Sync {
    async fn submit(&self, draft: &TicketDraft) -> Result<TicketReceipt, TicketError>;
}

/// Stand-in ticketing system: waits `latency`, then accepts every draft.
#[derive(Debug, Clone)]
pub struct SimulatedTicketing {
    latency: Duration,
}

impl SimulatedTicketing {
    pub fn new(latency: Duration) -> Self {
        Self { latency }
    }
}

#[async_trait]
impl TicketingSystem for SimulatedTicketing {
    async fn submit(&self, draft: &TicketDraft) -> Result<TicketReceipt, TicketError> {
        tokio::time::sleep(self.latency).await;
        info!(title = %draft.title, "simulated ticketing system accepted draft");
        Ok(TicketReceipt {
            created_at: Utc::now(),
        })
    }
}

#[derive(Debug, Default)]
pub struct TicketRegistry {
    tickets: Vec<Ticket>,
    last_id_millis: i64,
}

impl TicketRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mints an id for `draft`, prepends the ticket and returns it.
    ///
    /// Ids are `TICK-<unix millis>` of the receipt time, bumped by one
    /// millisecond when needed so they stay unique and increasing.
    pub fn record(&mut self, draft: TicketDraft, receipt: TicketReceipt) -> &Ticket {
        let millis = receipt.created_at.timestamp_millis().max(self.last_id_millis + 1);
        self.last_id_millis = millis;

        let ticket = Ticket {
            id: format!("TICK-{millis}"),
            title: draft.title,
            description: draft.description,
            sentiment: draft.sentiment,
            confidence: draft.confidence,
            original_text: draft.original_text,
            created_at: receipt.created_at,
            status: TicketStatus::Open,
        };
        info!(id = %ticket.id, total = self.tickets.len() + 1, "ticket recorded");
        self.tickets.insert(0, ticket);
        &self.tickets[0]
    }

    /// All tickets, newest first.
    pub fn list(&self) -> &[Ticket] {
        &self.tickets
    }

    pub fn len(&self) -> usize {
        self.tickets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tickets.is_empty()
    }

    /// Header label such as `"3 Tickets Created"`; `None` while empty.
    pub fn counter_label(&self) -> Option<String> {
        match self.tickets.len() {
            0 => None,
            1 => Some("1 Ticket Created".to_owned()),
            n => Some(format!("{n} Tickets Created")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn positive() -> SentimentResult {
        SentimentResult {
            final_sentiment: "positive".into(),
            confidence: 0.95,
        }
    }

    fn at(millis: i64) -> TicketReceipt {
        TicketReceipt {
            created_at: DateTime::<Utc>::from_timestamp_millis(millis).unwrap(),
        }
    }

    #[test]
    fn draft_prefers_rephrased_text() {
        let draft = TicketDraft::new("meh", Some("It was fine."), &positive());
        assert_eq!(draft.description, "It was fine.");
        assert_eq!(draft.original_text, "meh");
        assert_eq!(draft.title, "Review Analysis - POSITIVE Sentiment");
    }

    #[test]
    fn draft_falls_back_to_review_text() {
        let draft = TicketDraft::new("Great product", None, &positive());
        assert_eq!(draft.description, "Great product");
        let draft = TicketDraft::new("Great product", Some(""), &positive());
        assert_eq!(draft.description, "Great product");
    }

    #[test]
    fn record_prepends_open_ticket() {
        let mut registry = TicketRegistry::new();
        let draft = TicketDraft::new("Great product", None, &positive());
        let ticket = registry.record(draft, at(1_000));
        assert_eq!(ticket.id, "TICK-1000");
        assert_eq!(ticket.status, TicketStatus::Open);
        assert_eq!(ticket.confidence, 0.95);

        registry.record(TicketDraft::new("Second", None, &positive()), at(2_000));
        let ids: Vec<_> = registry.list().iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, ["TICK-2000", "TICK-1000"]);
    }

    #[test]
    fn same_millisecond_ids_stay_unique() {
        let mut registry = TicketRegistry::new();
        registry.record(TicketDraft::new("a", None, &positive()), at(5_000));
        registry.record(TicketDraft::new("b", None, &positive()), at(5_000));
        registry.record(TicketDraft::new("c", None, &positive()), at(4_000));
        let ids: Vec<_> = registry.list().iter().map(|t| t.id.clone()).collect();
        assert_eq!(ids, ["TICK-5002", "TICK-5001", "TICK-5000"]);
    }

    #[test]
    fn counter_label_pluralises() {
        let mut registry = TicketRegistry::new();
        assert_eq!(registry.counter_label(), None);
        registry.record(TicketDraft::new("a", None, &positive()), at(1));
        assert_eq!(registry.counter_label().as_deref(), Some("1 Ticket Created"));
        registry.record(TicketDraft::new("b", None, &positive()), at(2));
        assert_eq!(registry.counter_label().as_deref(), Some("2 Tickets Created"));
    }

    #[tokio::test(start_paused = true)]
    async fn simulated_ticketing_waits_latency() {
        let system = SimulatedTicketing::new(Duration::from_millis(1500));
        let start = tokio::time::Instant::now();
        let draft = TicketDraft::new("x", None, &positive());
        assert!(system.submit(&draft).await.is_ok());
        assert!(start.elapsed() >= Duration::from_millis(1500));
    }
}
