// src/message.rs
use serde::{Deserialize, Serialize};

/// Body the widget sends to the generation endpoint.
#[derive(Debug, Serialize)]
pub struct PromptRequest<'a> {
    pub prompt: &'a str,
}

/// Body accepted by `POST /generate`. Everything but the prompt is optional.
#[derive(Debug, Default, Deserialize)]
pub struct GenerateRequest {
    #[serde(default)]
    pub prompt: Option<String>,
    #[serde(default)]
    pub conversation_history: Vec<String>,
    pub max_length: Option<usize>,
    pub temperature: Option<f32>,
    pub num_return_sequences: Option<i64>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct GenerationResponse {
    pub generated_text: Vec<String>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct ErrorResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}
