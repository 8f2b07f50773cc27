//! HTTP client for the remote analysis service.
//!
//! [`AnalysisService`] is the seam the pipeline calls through; the
//! [`HttpAnalysisClient`] implementation posts `{ "text": ... }` as JSON to
//! `<base>/predict`, `<base>/explain` and `<base>/rephrase`.

use async_trait::async_trait;
use reqwest::{header, Client};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::config::ApiConfig;
use crate::error::AnalysisError;
use crate::types::{ExplanationResult, RephraseResult, SentimentResult, TextRequest};

/// The three operations of the analysis service.
#[async_trait]
pub trait AnalysisService: Send + Sync {
    async fn predict(&self, text: &str) -> Result<SentimentResult, AnalysisError>;
    async fn explain(&self, text: &str) -> Result<ExplanationResult, AnalysisError>;
    async fn rephrase(&self, text: &str) -> Result<RephraseResult, AnalysisError>;
}

#[derive(Debug, Clone)]
pub struct HttpAnalysisClient {
    http: Client,
    base_url: String,
}

impl HttpAnalysisClient {
    /// Builds a client for `config.base_url`.
    ///
    /// # Errors
    ///
    /// Returns `AnalysisError::Http` if the TLS backend cannot be initialised.
    pub fn new(config: &ApiConfig) -> Result<Self, AnalysisError> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.request_timeout() {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            http: builder.build()?,
            base_url: config.base_url.trim_end_matches('/').to_owned(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn endpoint(&self, operation: &str) -> String {
        format!("{}/{}", self.base_url, operation)
    }

    async fn post<T: DeserializeOwned>(
        &self,
        operation: &str,
        text: &str,
    ) -> Result<T, AnalysisError> {
        let url = self.endpoint(operation);
        debug!(%url, chars = text.chars().count(), "posting to analysis service");
        let resp = self
            .http
            .post(&url)
            .header(header::CONTENT_TYPE, "application/json")
            .json(&TextRequest { text })
            .send()
            .await?;
        let resp = check_response(resp).await?;
        decode_body(resp).await
    }
}

#[async_trait]
impl AnalysisService for HttpAnalysisClient {
    async fn predict(&self, text: &str) -> Result<SentimentResult, AnalysisError> {
        self.post("predict", text).await
    }

    async fn explain(&self, text: &str) -> Result<ExplanationResult, AnalysisError> {
        self.post("explain", text).await
    }

    async fn rephrase(&self, text: &str) -> Result<RephraseResult, AnalysisError> {
        self.post("rephrase", text).await
    }
}

/// Turns any non-2xx response into [`AnalysisError::Api`] carrying the raw body.
pub async fn check_response(resp: reqwest::Response) -> Result<reqwest::Response, AnalysisError> {
    let status = resp.status();
    if !status.is_success() {
        return Err(AnalysisError::Api {
            status: status.as_u16(),
            body: resp.text().await.unwrap_or_default(),
        });
    }
    Ok(resp)
}

async fn decode_body<T: DeserializeOwned>(resp: reqwest::Response) -> Result<T, AnalysisError> {
    let body = resp.text().await?;
    Ok(serde_json::from_str(&body)?)
}
