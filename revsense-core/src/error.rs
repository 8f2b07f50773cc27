//! Error types for the analysis client, the ticketing collaborator and config loading.

use thiserror::Error;

/// Failures of a single call to the analysis service.
///
/// All three are handled the same way by callers: log, keep the previous
/// state, clear the in-flight flag.
#[derive(Debug, Error)]
pub enum AnalysisError {
    /// Transport failure (connect, TLS, body read).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The service answered with a non-success status. The body is kept
    /// verbatim for logging and is never parsed as the success shape.
    #[error("API error ({status}): {body}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Raw response body.
        body: String,
    },

    /// A success response whose body did not match the expected shape.
    #[error("decode error: {0}")]
    Decode(#[from] serde_json::Error),
}

impl AnalysisError {
    /// Status code for `Api` errors, `None` otherwise.
    pub fn status(&self) -> Option<u16> {
        match self {
            AnalysisError::Api { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Which service call a pipeline failure came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Predict,
    Explain,
    Rephrase,
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Stage::Predict => "predict",
            Stage::Explain => "explain",
            Stage::Rephrase => "rephrase",
        })
    }
}

/// A pipeline step that failed and ended its run.
#[derive(Debug, Error)]
#[error("{stage} failed: {source}")]
pub struct StageFailure {
    pub stage: Stage,
    #[source]
    pub source: AnalysisError,
}

/// Failures of the ticketing collaborator.
#[derive(Debug, Error)]
pub enum TicketError {
    #[error("ticket rejected: {0}")]
    Rejected(String),

    #[error("ticketing system unavailable: {0}")]
    Unavailable(String),
}

/// Failures while loading the config file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("config parse error: {0}")]
    Parse(#[from] toml::de::Error),
}
