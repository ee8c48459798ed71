//! Transport client for the local inference service.
//!
//! One HTTP exchange per user-initiated send (`POST {base}/generate`) plus a
//! best-effort liveness probe (`GET {base}/docs`). Every failure mode — DNS,
//! connection refusal, non-2xx status, malformed JSON, an application-level
//! `{"error"}` body — is normalized into [`GenerateOutcome::Failure`]; the
//! caller never sees a raw transport error. No retry, no backoff, no timeout
//! beyond reqwest defaults.

use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use std::env;
use thiserror::Error;

pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";
pub const DEFAULT_TEMPERATURE: f64 = 0.7;

/// Environment variable overriding the default base URL.
pub const BASE_URL_ENV: &str = "HEARTH_BASE_URL";

#[derive(Serialize)]
struct GenerateRequest<'a> {
    prompt: &'a str,
    temperature: f64,
}

#[derive(Deserialize, Default)]
struct GenerateBody {
    output: Option<String>,
    error: Option<String>,
}

#[derive(Debug, Error)]
enum TransportError {
    #[error("{0}")]
    Network(#[from] reqwest::Error),
    #[error("HTTP error {0}")]
    Status(StatusCode),
    #[error("{0}")]
    Application(String),
    #[error("unexpected response from model server")]
    Malformed,
}

/// Settled result of one generate call. `Failure` carries the HTTP status
/// text or the underlying failure message; it is rendered in the chat, not
/// raised.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GenerateOutcome {
    Output(String),
    Failure(String),
}

impl GenerateOutcome {
    pub fn is_failure(&self) -> bool {
        matches!(self, GenerateOutcome::Failure(_))
    }
}

#[derive(Clone)]
pub struct AssistantClient {
    client: reqwest::Client,
    base_url: String,
}

impl AssistantClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self {
            client: reqwest::Client::new(),
            base_url,
        }
    }

    /// Base URL from `HEARTH_BASE_URL`, falling back to the local default.
    pub fn from_env() -> Self {
        let base_url = env::var(BASE_URL_ENV).unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        Self::new(base_url)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Send one prompt and settle to an outcome. `temperature` defaults to
    /// 0.7 when unspecified.
    pub async fn generate(&self, prompt: &str, temperature: Option<f64>) -> GenerateOutcome {
        match self.try_generate(prompt, temperature).await {
            Ok(output) => GenerateOutcome::Output(output),
            Err(err) => {
                tracing::warn!(error = %err, "generate request failed");
                GenerateOutcome::Failure(err.to_string())
            }
        }
    }

    async fn try_generate(
        &self,
        prompt: &str,
        temperature: Option<f64>,
    ) -> Result<String, TransportError> {
        let request = GenerateRequest {
            prompt,
            temperature: temperature.unwrap_or(DEFAULT_TEMPERATURE),
        };
        let response = self
            .client
            .post(format!("{}/generate", self.base_url))
            .json(&request)
            .send()
            .await?;
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        interpret_generate_response(status, &body)
    }

    /// Liveness probe against the service's docs page. Any 2xx is
    /// "connected"; any network failure collapses to false.
    pub async fn test_connection(&self) -> bool {
        match self
            .client
            .get(format!("{}/docs", self.base_url))
            .send()
            .await
        {
            Ok(response) => response.status().is_success(),
            Err(err) => {
                tracing::debug!(error = %err, "connection probe failed");
                false
            }
        }
    }
}

/// Map an HTTP status and response body onto the generate contract. A non-2xx
/// status is a failure regardless of body content.
fn interpret_generate_response(status: StatusCode, body: &str) -> Result<String, TransportError> {
    if !status.is_success() {
        return Err(TransportError::Status(status));
    }
    let parsed: GenerateBody = serde_json::from_str(body).map_err(|_| TransportError::Malformed)?;
    if let Some(error) = parsed.error {
        return Err(TransportError::Application(error));
    }
    parsed.output.ok_or(TransportError::Malformed)
}

/// Build a client from the environment and run one generate call. Mirrors
/// how the UI layer uses the transport: one throwaway client per send.
pub async fn generate_reply(prompt: String, temperature: f64) -> GenerateOutcome {
    AssistantClient::from_env()
        .generate(&prompt, Some(temperature))
        .await
}

/// One-shot connectivity probe for the status indicator.
pub async fn probe_connection() -> bool {
    AssistantClient::from_env().test_connection().await
}

#[cfg(test)]
mod tests {
    use super::*;

    fn interpret(status: u16, body: &str) -> GenerateOutcome {
        match interpret_generate_response(StatusCode::from_u16(status).unwrap(), body) {
            Ok(output) => GenerateOutcome::Output(output),
            Err(err) => GenerateOutcome::Failure(err.to_string()),
        }
    }

    #[test]
    fn success_body_yields_output() {
        assert_eq!(
            interpret(200, r#"{"output":"hi"}"#),
            GenerateOutcome::Output("hi".to_string())
        );
    }

    #[test]
    fn error_field_yields_failure_even_on_200() {
        let outcome = interpret(200, r#"{"error":"model not loaded"}"#);
        assert_eq!(
            outcome,
            GenerateOutcome::Failure("model not loaded".to_string())
        );
    }

    #[test]
    fn non_success_status_wins_over_body() {
        let outcome = interpret(500, r#"{"output":"hi"}"#);
        match outcome {
            GenerateOutcome::Failure(msg) => assert!(msg.contains("500")),
            other => panic!("expected failure, got {other:?}"),
        }
    }

    #[test]
    fn malformed_json_yields_failure() {
        assert!(interpret(200, "<html>not json</html>").is_failure());
    }

    #[test]
    fn missing_output_field_yields_failure() {
        assert!(interpret(200, "{}").is_failure());
    }

    #[test]
    fn trailing_slashes_are_trimmed() {
        let client = AssistantClient::new("http://localhost:8000//");
        assert_eq!(client.base_url(), "http://localhost:8000");
    }
}
