//! One-shot text generation from the command line.
//!
//! Prints `{"generated_text": [...]}` to stdout.

use anyhow::anyhow;
use clap::Parser;
use serde::Serialize;

use chat_widget::config::{
    DEFAULT_OLLAMA_BASE_URL, DEFAULT_OLLAMA_MODEL, GeneratorBackend, GeneratorConfig,
};
use chat_widget::message::GenerationResponse;
use chat_widget::services::generator::{
    DEFAULT_MAX_LENGTH, DEFAULT_NUM_RETURN_SEQUENCES, DEFAULT_TEMPERATURE, GenerationParams,
};

#[derive(Parser, Debug)]
#[command(name = "generate", about = "Generate text from a prompt")]
struct Args {
    /// Input text prompt for text generation.
    #[arg(long)]
    prompt: String,

    /// Maximum length of the generated text.
    #[arg(long, default_value_t = DEFAULT_MAX_LENGTH)]
    max_length: usize,

    /// Sampling temperature.
    #[arg(long, default_value_t = DEFAULT_TEMPERATURE)]
    temperature: f32,

    /// Number of sequences to generate.
    #[arg(long, default_value_t = DEFAULT_NUM_RETURN_SEQUENCES as i64, allow_negative_numbers = true)]
    num_return_sequences: i64,

    /// Earlier turns, prepended to the prompt one per line.
    #[arg(long, num_args = 0..)]
    conversation_history: Vec<String>,

    /// Generator backend (rules or ollama).
    #[arg(long, env = "GENERATOR_BACKEND", default_value = "rules")]
    backend: GeneratorBackend,

    /// Model name used by the ollama backend.
    #[arg(long, env = "OLLAMA_MODEL", default_value = DEFAULT_OLLAMA_MODEL)]
    model: String,

    #[arg(long, env = "OLLAMA_BASE_URL", default_value = DEFAULT_OLLAMA_BASE_URL)]
    ollama_base_url: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    chat_widget::init_tracing();

    let args = Args::parse();
    if args.num_return_sequences <= 0 {
        return Err(anyhow!(
            "The 'num_return_sequences' argument must be a positive integer."
        ));
    }

    let generator = GeneratorConfig {
        backend: args.backend,
        ollama_base_url: args.ollama_base_url,
        model: args.model,
    }
    .build();

    let params = GenerationParams {
        max_length: args.max_length,
        temperature: args.temperature,
        num_return_sequences: args.num_return_sequences as usize,
        ..Default::default()
    };

    let generated_text = generator
        .generate(&args.prompt, &args.conversation_history, &params)
        .await?;

    println!("{}", to_pretty_json(&GenerationResponse { generated_text })?);
    Ok(())
}

fn to_pretty_json<T: Serialize>(value: &T) -> anyhow::Result<String> {
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
    value.serialize(&mut ser)?;
    Ok(String::from_utf8(buf)?)
}
