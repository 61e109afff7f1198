//! DeepL translation client.

use std::time::Duration;

use anyhow::Result;
use async_trait::async_trait;
use reqwest::header::AUTHORIZATION;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::models::TargetLang;

/// Failure modes of one translation attempt.
///
/// Every failure is terminal for the invocation; nothing is retried.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TranslateError {
    /// No API key was configured.
    #[error("DEEPL_API_KEY environment variable is not set")]
    MissingCredential,
    /// Nothing to translate.
    #[error("clipboard is empty")]
    EmptyInput,
    /// HTTP 403: the key was rejected or the quota is exhausted.
    #[error("API key invalid or quota exceeded")]
    AuthOrQuota,
    /// HTTP 429.
    #[error("too many requests, try again later")]
    RateLimited,
    /// Any other non-2xx status.
    #[error("HTTP {code} - {reason}")]
    Http { code: u16, reason: String },
    /// Connection failure, DNS failure, or timeout.
    #[error("network failure: {0}")]
    Network(String),
    /// A 2xx response without the expected translations payload.
    #[error("unexpected API response format")]
    MalformedResponse,
}

/// Translation backend seam; the orchestrator only sees this trait.
#[async_trait]
pub trait Translate: Send + Sync {
    /// Translate `text` into `target`, or classify why it could not be done.
    async fn translate(&self, text: &str, target: TargetLang) -> Result<String, TranslateError>;
}

/// Request body of the `/v2/translate` endpoint.
///
/// DeepL takes a batch of source strings; this client only ever sends one.
#[derive(Debug, Serialize)]
struct TranslateBody<'a> {
    text: [&'a str; 1],
    target_lang: &'a str,
}

#[derive(Debug, Deserialize)]
struct TranslateResponse {
    translations: Vec<Translation>,
}

#[derive(Debug, Deserialize)]
struct Translation {
    text: String,
}

/// HTTP client for the DeepL translation endpoint.
pub struct DeepLClient {
    http: reqwest::Client,
    endpoint: String,
    api_key: Option<String>,
}

impl DeepLClient {
    /// Build a client against `endpoint`, authorized by `api_key` if present.
    ///
    /// The timeout bounds the whole request; on expiry the call surfaces as
    /// [`TranslateError::Network`].
    pub fn new(endpoint: String, api_key: Option<String>, timeout: Duration) -> Result<Self> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            endpoint,
            api_key,
        })
    }
}

#[async_trait]
impl Translate for DeepLClient {
    async fn translate(&self, text: &str, target: TargetLang) -> Result<String, TranslateError> {
        // Both preconditions short-circuit before any network traffic.
        let api_key = self
            .api_key
            .as_deref()
            .ok_or(TranslateError::MissingCredential)?;
        if text.is_empty() {
            return Err(TranslateError::EmptyInput);
        }

        debug!(lang = %target, chars = text.chars().count(), "sending translation request");

        let response = self
            .http
            .post(&self.endpoint)
            .header(AUTHORIZATION, format!("DeepL-Auth-Key {}", api_key))
            .json(&TranslateBody {
                text: [text],
                target_lang: target.code(),
            })
            .send()
            .await
            .map_err(|e| TranslateError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(classify_status(status));
        }

        let body = response
            .text()
            .await
            .map_err(|e| TranslateError::Network(e.to_string()))?;
        parse_response(&body)
    }
}

/// Map a non-2xx status to its error variant.
fn classify_status(status: StatusCode) -> TranslateError {
    match status {
        StatusCode::FORBIDDEN => TranslateError::AuthOrQuota,
        StatusCode::TOO_MANY_REQUESTS => TranslateError::RateLimited,
        other => TranslateError::Http {
            code: other.as_u16(),
            reason: other
                .canonical_reason()
                .unwrap_or("unknown status")
                .to_string(),
        },
    }
}

/// Extract the first translation from a 2xx body.
fn parse_response(body: &str) -> Result<String, TranslateError> {
    let parsed: TranslateResponse =
        serde_json::from_str(body).map_err(|_| TranslateError::MalformedResponse)?;
    parsed
        .translations
        .into_iter()
        .next()
        .map(|t| t.text)
        .ok_or(TranslateError::MalformedResponse)
}
