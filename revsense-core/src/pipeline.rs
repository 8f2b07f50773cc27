//! Request orchestration for `analyze` and `rephrase`.
//!
//! `analyze` is a two-step pipeline: predict, then explain with the same
//! text. Each step's result is handed to `on_step` as soon as it arrives so
//! the caller can commit it before the next step starts. The first failure
//! ends the run; explain is never attempted after a failed predict.
//!
//! Neither function retries. Both log failures here, so callers only have
//! to clear their in-flight flag.

use tracing::{error, info};

use crate::client::AnalysisService;
use crate::error::{AnalysisError, Stage, StageFailure};
use crate::types::{ExplanationResult, SentimentResult};

/// A committed step of an analysis run.
#[derive(Debug, Clone, PartialEq)]
pub enum AnalysisStep {
    Sentiment(SentimentResult),
    Explanation(ExplanationResult),
}

/// How a run ended when no step failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    /// Blank input; nothing was sent.
    Skipped,
    Completed,
}

/// True for empty or whitespace-only text.
pub fn is_blank(text: &str) -> bool {
    text.trim().is_empty()
}

/// Runs predict then explain for `text`.
///
/// # Errors
///
/// Returns the first failing [`Stage`] with its cause. A predict failure
/// means no step was emitted; an explain failure means only the sentiment was.
pub async fn run_analysis<F>(
    service: &dyn AnalysisService,
    text: &str,
    mut on_step: F,
) -> Result<RunOutcome, StageFailure>
where
    F: FnMut(AnalysisStep),
{
    if is_blank(text) {
        return Ok(RunOutcome::Skipped);
    }

    let sentiment = service
        .predict(text)
        .await
        .map_err(|e| failed(Stage::Predict, e))?;
    info!(
        sentiment = %sentiment.final_sentiment,
        confidence = sentiment.confidence,
        "predict succeeded"
    );
    on_step(AnalysisStep::Sentiment(sentiment));

    let explanation = service
        .explain(text)
        .await
        .map_err(|e| failed(Stage::Explain, e))?;
    info!(sentiment = %explanation.sentiment, "explain succeeded");
    on_step(AnalysisStep::Explanation(explanation));

    Ok(RunOutcome::Completed)
}

/// Requests a rephrasing of `text`. `Ok(None)` means the input was blank.
///
/// # Errors
///
/// Returns a [`Stage::Rephrase`] failure; the caller keeps its old text.
pub async fn run_rephrase(
    service: &dyn AnalysisService,
    text: &str,
) -> Result<Option<String>, StageFailure> {
    if is_blank(text) {
        return Ok(None);
    }
    let result = service
        .rephrase(text)
        .await
        .map_err(|e| failed(Stage::Rephrase, e))?;
    info!(chars = result.rephrased.chars().count(), "rephrase succeeded");
    Ok(Some(result.rephrased))
}

fn failed(stage: Stage, source: AnalysisError) -> StageFailure {
    match &source {
        AnalysisError::Api { status, body } => {
            error!(%stage, status, body = %body, "analysis service returned an error status");
        }
        other => error!(%stage, error = %other, "analysis service call failed"),
    }
    StageFailure { stage, source }
}
