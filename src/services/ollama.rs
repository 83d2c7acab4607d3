// src/services/ollama.rs
//! Generator backed by an Ollama server (`/api/generate`).
//!
//! One request per returned sequence; Ollama only produces a single
//! completion per call.

use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::generator::{GenerateFuture, GenerationParams, TextGenerator, effective_prompt};
use crate::error::GenerationError;

#[derive(Serialize)]
struct OllamaOptions {
    temperature: f32,
    top_k: u32,
    top_p: f32,
    num_predict: usize,
}

#[derive(Serialize)]
struct OllamaRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    stream: bool,
    options: OllamaOptions,
}

#[derive(Deserialize)]
struct OllamaResponse {
    response: Option<String>,
}

#[derive(Debug, Clone)]
pub struct OllamaGenerator {
    client: Client,
    base_url: String,
    model: String,
}

impl OllamaGenerator {
    pub fn new(base_url: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            model: model.into(),
        }
    }

    async fn complete_one(
        &self,
        prompt: &str,
        params: &GenerationParams,
    ) -> Result<String, GenerationError> {
        let url = format!("{}/api/generate", self.base_url);

        let resp = self
            .client
            .post(&url)
            .json(&OllamaRequest {
                model: &self.model,
                prompt,
                stream: false,
                options: OllamaOptions {
                    temperature: params.temperature,
                    top_k: params.top_k,
                    top_p: params.top_p,
                    num_predict: params.max_length,
                },
            })
            .send()
            .await
            .map_err(|e| GenerationError::Upstream(format!("Ollama request failed: {e}")))?;

        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp
                .text()
                .await
                .unwrap_or_else(|_| "<no body>".to_string());
            return Err(GenerationError::Upstream(format!(
                "Ollama generate failed: {status} {body}"
            )));
        }

        let data: OllamaResponse = resp
            .json()
            .await
            .map_err(|e| GenerationError::Upstream(format!("Ollama response parse error: {e}")))?;

        Ok(data.response.unwrap_or_default())
    }
}

impl TextGenerator for OllamaGenerator {
    fn name(&self) -> &str {
        "ollama"
    }

    fn generate<'a>(
        &'a self,
        prompt: &'a str,
        history: &'a [String],
        params: &'a GenerationParams,
    ) -> GenerateFuture<'a> {
        Box::pin(async move {
            params.validate()?;
            let full = effective_prompt(history, prompt);
            debug!(model = %self.model, sequences = params.num_return_sequences, "ollama generation");

            let mut sequences = Vec::with_capacity(params.num_return_sequences);
            for _ in 0..params.num_return_sequences {
                let completion = self.complete_one(&full, params).await?;
                sequences.push(format!("{full}{completion}"));
            }
            Ok::<_, GenerationError>(sequences)
        })
    }
}
