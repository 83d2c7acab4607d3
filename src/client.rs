// src/client.rs
use std::future::Future;

use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use crate::config::DEFAULT_CHAT_ENDPOINT;
use crate::error::ClientError;
use crate::message::{GenerationResponse, PromptRequest};

/// Anything the widget can ask for a reply.
pub trait Generate: Send + Sync {
    /// Sends one prompt and resolves to the first generated text.
    fn generate(&self, prompt: &str) -> impl Future<Output = Result<String, ClientError>> + Send;
}

/// Error body as sent by any server; `error` may be any JSON value.
#[derive(Deserialize)]
struct ErrorBody {
    #[serde(default)]
    error: Option<Value>,
}

/// Renders the `error` field as text. Falsy values yield `None` so the
/// caller falls back to its default message.
fn error_text(value: Option<Value>) -> Option<String> {
    match value? {
        Value::Null | Value::Bool(false) => None,
        Value::String(s) => Some(s),
        Value::Number(n) if n.as_f64() == Some(0.0) => None,
        other => Some(other.to_string()),
    }
}

/// HTTP client for a `POST /generate` endpoint.
#[derive(Debug, Clone)]
pub struct GenerationClient {
    http: Client,
    endpoint: String,
}

impl Default for GenerationClient {
    fn default() -> Self {
        Self::new(DEFAULT_CHAT_ENDPOINT)
    }
}

impl GenerationClient {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            http: Client::new(),
            endpoint: endpoint.into(),
        }
    }

    /// Reads `CHAT_ENDPOINT`, falling back to the local server.
    pub fn from_env() -> Self {
        Self::new(std::env::var("CHAT_ENDPOINT").unwrap_or_else(|_| DEFAULT_CHAT_ENDPOINT.into()))
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl Generate for GenerationClient {
    async fn generate(&self, prompt: &str) -> Result<String, ClientError> {
        debug!(endpoint = %self.endpoint, "posting prompt");

        // `.json()` sets `Content-Type: application/json`.
        let resp = self
            .http
            .post(&self.endpoint)
            .json(&PromptRequest { prompt })
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body: ErrorBody = resp.json().await?;
            return Err(ClientError::Server {
                status: status.as_u16(),
                message: error_text(body.error),
            });
        }

        let data: GenerationResponse = resp.json().await?;
        data.generated_text
            .into_iter()
            .next()
            .ok_or_else(|| ClientError::Malformed("generated_text is empty".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn error_values_render_as_text() {
        assert_eq!(error_text(Some(json!("rate limited"))).as_deref(), Some("rate limited"));
        assert_eq!(error_text(Some(json!(5))).as_deref(), Some("5"));
        assert_eq!(error_text(Some(json!(true))).as_deref(), Some("true"));
        assert_eq!(error_text(Some(json!(0))), None);
        assert_eq!(error_text(Some(json!(false))), None);
        assert_eq!(error_text(Some(Value::Null)), None);
        assert_eq!(error_text(None), None);
    }
}
