// src/services/generator.rs
use std::future::Future;
use std::pin::Pin;

use crate::error::GenerationError;

pub const DEFAULT_MAX_LENGTH: usize = 50;
pub const DEFAULT_TEMPERATURE: f32 = 0.7;
pub const DEFAULT_NUM_RETURN_SEQUENCES: usize = 1;
pub const DEFAULT_TOP_K: u32 = 50;
pub const DEFAULT_TOP_P: f32 = 0.9;

pub const MAX_RETURN_SEQUENCES: usize = 16;
pub const MAX_LENGTH: usize = 2048;

/// Sampling knobs for one generation call.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationParams {
    /// Upper bound on the length of each returned sequence, in words.
    pub max_length: usize,
    pub temperature: f32,
    pub num_return_sequences: usize,
    pub top_k: u32,
    pub top_p: f32,
}

impl Default for GenerationParams {
    fn default() -> Self {
        Self {
            max_length: DEFAULT_MAX_LENGTH,
            temperature: DEFAULT_TEMPERATURE,
            num_return_sequences: DEFAULT_NUM_RETURN_SEQUENCES,
            top_k: DEFAULT_TOP_K,
            top_p: DEFAULT_TOP_P,
        }
    }
}

impl GenerationParams {
    pub fn validate(&self) -> Result<(), GenerationError> {
        if self.num_return_sequences == 0 {
            return Err(GenerationError::InvalidParams(
                "The 'num_return_sequences' argument must be a positive integer.".to_string(),
            ));
        }
        if self.num_return_sequences > MAX_RETURN_SEQUENCES {
            return Err(GenerationError::InvalidParams(format!(
                "The 'num_return_sequences' argument must be at most {MAX_RETURN_SEQUENCES}."
            )));
        }
        if self.max_length == 0 {
            return Err(GenerationError::InvalidParams(
                "The 'max_length' argument must be a positive integer.".to_string(),
            ));
        }
        if self.max_length > MAX_LENGTH {
            return Err(GenerationError::InvalidParams(format!(
                "The 'max_length' argument must be at most {MAX_LENGTH}."
            )));
        }
        if !(self.temperature >= 0.0) {
            return Err(GenerationError::InvalidParams(
                "The 'temperature' argument must not be negative.".to_string(),
            ));
        }
        if !(self.top_p > 0.0 && self.top_p <= 1.0) {
            return Err(GenerationError::InvalidParams(
                "The 'top_p' argument must be in (0, 1].".to_string(),
            ));
        }
        Ok(())
    }
}

/// Prepends the conversation history, one turn per line, to the prompt.
pub fn effective_prompt(history: &[String], prompt: &str) -> String {
    if history.is_empty() {
        prompt.to_string()
    } else {
        format!("{}\n{}", history.join("\n"), prompt)
    }
}

pub type GenerateFuture<'a> =
    Pin<Box<dyn Future<Output = Result<Vec<String>, GenerationError>> + Send + 'a>>;

/// A backend that continues a prompt.
///
/// Implementations return exactly `params.num_return_sequences` sequences,
/// each starting with the effective prompt.
pub trait TextGenerator: Send + Sync {
    fn name(&self) -> &str;

    fn generate<'a>(
        &'a self,
        prompt: &'a str,
        history: &'a [String],
        params: &'a GenerationParams,
    ) -> GenerateFuture<'a>;
}

/// Cuts `text` down to at most `max_words` whitespace-separated words.
pub fn truncate_words(text: &str, max_words: usize) -> String {
    text.split_whitespace()
        .take(max_words)
        .collect::<Vec<_>>()
        .join(" ")
}
