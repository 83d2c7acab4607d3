// src/services/rules.rs
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use tracing::debug;

use crate::error::GenerationError;

use super::generator::{
    GenerateFuture, GenerationParams, TextGenerator, effective_prompt, truncate_words,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    Greeting,
    Help,
    Farewell,
    Question,
    Unknown,
}

pub fn detect_intent(msg: &str) -> Intent {
    let msg_lower = msg.to_lowercase();
    let words: Vec<&str> = msg_lower
        .split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty())
        .collect();
    let has = |w: &str| words.contains(&w);

    if has("hello") || has("hi") || has("hey") {
        Intent::Greeting
    } else if has("help") {
        Intent::Help
    } else if has("bye") || has("goodbye") || msg_lower.contains("see you") {
        Intent::Farewell
    } else if msg_lower.trim_end().ends_with('?') {
        Intent::Question
    } else {
        Intent::Unknown
    }
}

fn phrasings(intent: Intent, continuing: bool) -> &'static [&'static str] {
    use Intent::*;

    match (intent, continuing) {
        (Greeting, false) => &[
            "Hello! How can I help you today?",
            "Hi there, what would you like to talk about?",
            "Hey! Ask me anything.",
        ],
        (Greeting, true) => &[
            "Hello again, what else is on your mind?",
            "Hi, shall we keep going?",
        ],
        (Help, _) => &[
            "Type a message and I will continue it for you.",
            "Send any text and I will write what comes next.",
        ],
        (Farewell, _) => &["Goodbye, talk to you soon.", "See you later!"],
        (Question, _) => &[
            "That is a good question. I do not have a definite answer, but I am happy to think it through with you.",
            "Hard to say for sure. What do you think?",
        ],
        (Unknown, false) => &[
            "Tell me more about that.",
            "Interesting, go on.",
            "I see. What happens next?",
        ],
        (Unknown, true) => &[
            "Following on from what you said, tell me more.",
            "I see where this is going. Go on.",
        ],
    }
}

fn seed(text: &str, index: usize) -> u64 {
    let mut hasher = DefaultHasher::new();
    text.hash(&mut hasher);
    index.hash(&mut hasher);
    hasher.finish()
}

/// Picks a phrasing. Zero temperature is greedy; otherwise the choice is
/// spread over the first `top_k` candidates by a seed stable per input.
fn pick<'a>(candidates: &[&'a str], params: &GenerationParams, seed: u64) -> &'a str {
    if params.temperature == 0.0 || candidates.len() == 1 {
        return candidates[0];
    }
    let pool = candidates.len().min(params.top_k.max(1) as usize);
    candidates[(seed % pool as u64) as usize]
}

/// Offline generator that continues a prompt with an intent-matched reply.
#[derive(Debug, Default, Clone)]
pub struct RuleGenerator;

impl RuleGenerator {
    pub fn new() -> Self {
        Self
    }

    pub fn continue_prompt(
        &self,
        prompt: &str,
        history: &[String],
        params: &GenerationParams,
    ) -> Vec<String> {
        let full = effective_prompt(history, prompt);
        let last_line = full.lines().last().unwrap_or_default();
        let intent = detect_intent(last_line);
        let candidates = phrasings(intent, !history.is_empty());
        debug!(?intent, sequences = params.num_return_sequences, "rule generation");

        (0..params.num_return_sequences)
            .map(|i| {
                let reply = pick(candidates, params, seed(&full, i));
                truncate_words(&format!("{full} {reply}"), params.max_length)
            })
            .collect()
    }
}

impl TextGenerator for RuleGenerator {
    fn name(&self) -> &str {
        "rules"
    }

    fn generate<'a>(
        &'a self,
        prompt: &'a str,
        history: &'a [String],
        params: &'a GenerationParams,
    ) -> GenerateFuture<'a> {
        Box::pin(async move {
            params.validate()?;
            Ok::<_, GenerationError>(self.continue_prompt(prompt, history, params))
        })
    }
}
