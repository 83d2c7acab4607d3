pub mod generator;
pub mod ollama;
pub mod rules;
