use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Body sent to every analysis endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct TextRequest<'a> {
    pub text: &'a str,
}

/// Classification returned by `POST /predict`.
///
/// `final_sentiment` is an open label set compared case-insensitively;
/// `confidence` is in `[0, 1]`. Replaced wholesale on every successful analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SentimentResult {
    pub final_sentiment: String,
    pub confidence: f64,
}

impl SentimentResult {
    /// Confidence as a whole percentage, rounded to nearest.
    pub fn confidence_pct(&self) -> i64 {
        confidence_pct(self.confidence)
    }

    /// Display text for the confidence badge, e.g. `"87% confidence"`.
    pub fn confidence_label(&self) -> String {
        format!("{}% confidence", self.confidence_pct())
    }

    pub fn kind(&self) -> SentimentKind {
        SentimentKind::from_label(&self.final_sentiment)
    }
}

/// Explanation returned by `POST /explain`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExplanationResult {
    pub sentiment: String,
    pub explanation: String,
}

/// Body returned by `POST /rephrase`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RephraseResult {
    pub rephrased: String,
}

/// Coarse bucket for a sentiment label, used for badges and colours only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SentimentKind {
    Positive,
    Negative,
    Neutral,
    Other,
}

impl SentimentKind {
    pub fn from_label(label: &str) -> Self {
        match label.trim().to_lowercase().as_str() {
            "positive" => SentimentKind::Positive,
            "negative" => SentimentKind::Negative,
            "neutral" => SentimentKind::Neutral,
            _ => SentimentKind::Other,
        }
    }
}

/// Lifecycle state of a ticket.
///
/// Tickets are always created `Open`. `InProgress` and `Resolved` are part of
/// the record shape but nothing transitions into them.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TicketStatus {
    #[default]
    Open,
    InProgress,
    Resolved,
}

impl TicketStatus {
    /// Wire name: `open`, `in-progress`, `resolved`.
    pub fn as_str(self) -> &'static str {
        match self {
            TicketStatus::Open => "open",
            TicketStatus::InProgress => "in-progress",
            TicketStatus::Resolved => "resolved",
        }
    }

    /// Badge text: dashes become spaces, upper-cased (`IN PROGRESS`).
    pub fn label(self) -> String {
        self.as_str().replace('-', " ").to_uppercase()
    }
}

/// A ticket snapshot of one analysis, held only in process memory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ticket {
    /// `TICK-<unix millis>`
    pub id: String,
    pub title: String,
    pub description: String,
    pub sentiment: String,
    pub confidence: f64,
    pub original_text: String,
    pub created_at: DateTime<Utc>,
    pub status: TicketStatus,
}

/// Rounds a `[0, 1]` confidence to a whole percentage.
pub fn confidence_pct(confidence: f64) -> i64 {
    (confidence * 100.0).round() as i64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn confidence_label_rounds_to_nearest() {
        let s = SentimentResult {
            final_sentiment: "negative".into(),
            confidence: 0.87,
        };
        assert_eq!(s.confidence_label(), "87% confidence");
        let s = SentimentResult {
            final_sentiment: "positive".into(),
            confidence: 0.955,
        };
        assert_eq!(s.confidence_pct(), 96);
    }

    #[test]
    fn sentiment_kind_is_case_insensitive() {
        assert_eq!(SentimentKind::from_label("POSITIVE"), SentimentKind::Positive);
        assert_eq!(SentimentKind::from_label("Negative"), SentimentKind::Negative);
        assert_eq!(SentimentKind::from_label("neutral"), SentimentKind::Neutral);
        assert_eq!(SentimentKind::from_label("mixed"), SentimentKind::Other);
    }

    #[test]
    fn status_label_replaces_dash() {
        assert_eq!(TicketStatus::InProgress.label(), "IN PROGRESS");
        assert_eq!(TicketStatus::Open.label(), "OPEN");
    }

    #[test]
    fn ticket_serialises_with_camel_case_keys() {
        let ticket = Ticket {
            id: "TICK-1".into(),
            title: "Review Analysis - POSITIVE Sentiment".into(),
            description: "ok".into(),
            sentiment: "positive".into(),
            confidence: 0.5,
            original_text: "ok".into(),
            created_at: DateTime::<Utc>::from_timestamp(0, 0).unwrap(),
            status: TicketStatus::Open,
        };
        let json = serde_json::to_value(&ticket).unwrap();
        assert_eq!(json["originalText"], "ok");
        assert_eq!(json["status"], "open");
        assert!(json.get("createdAt").is_some());
    }

    #[test]
    fn predict_body_decodes_verbatim() {
        let s: SentimentResult =
            serde_json::from_str(r#"{"final_sentiment":"negative","confidence":0.87}"#).unwrap();
        assert_eq!(s.final_sentiment, "negative");
        assert_eq!(s.confidence, 0.87);
    }
}
