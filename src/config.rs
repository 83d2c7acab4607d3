// src/config.rs
//! Environment-driven configuration.
//!
//! | Variable            | Default                            |
//! |---------------------|------------------------------------|
//! | `BIND_ADDR`         | `127.0.0.1:5000`                   |
//! | `GENERATOR_BACKEND` | `rules`                            |
//! | `OLLAMA_BASE_URL`   | `http://127.0.0.1:11434`           |
//! | `OLLAMA_MODEL`      | `gpt2`                             |
//! | `CHAT_ENDPOINT`     | `http://127.0.0.1:5000/generate`   |

use std::str::FromStr;
use std::sync::Arc;

use crate::services::generator::TextGenerator;
use crate::services::ollama::OllamaGenerator;
use crate::services::rules::RuleGenerator;

pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:5000";
pub const DEFAULT_CHAT_ENDPOINT: &str = "http://127.0.0.1:5000/generate";
pub const DEFAULT_OLLAMA_BASE_URL: &str = "http://127.0.0.1:11434";
pub const DEFAULT_OLLAMA_MODEL: &str = "gpt2";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GeneratorBackend {
    #[default]
    Rules,
    Ollama,
}

impl FromStr for GeneratorBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "rules" => Ok(Self::Rules),
            "ollama" => Ok(Self::Ollama),
            other => Err(format!("unknown generator backend '{other}' (expected rules or ollama)")),
        }
    }
}

#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    pub backend: GeneratorBackend,
    pub ollama_base_url: String,
    pub model: String,
}

impl GeneratorConfig {
    pub fn from_env() -> Result<Self, String> {
        let backend = match std::env::var("GENERATOR_BACKEND") {
            Ok(v) => v.parse()?,
            Err(_) => GeneratorBackend::default(),
        };
        Ok(Self {
            backend,
            ollama_base_url: std::env::var("OLLAMA_BASE_URL")
                .unwrap_or_else(|_| DEFAULT_OLLAMA_BASE_URL.into()),
            model: std::env::var("OLLAMA_MODEL").unwrap_or_else(|_| DEFAULT_OLLAMA_MODEL.into()),
        })
    }

    pub fn build(&self) -> Arc<dyn TextGenerator> {
        match self.backend {
            GeneratorBackend::Rules => Arc::new(RuleGenerator::new()),
            GeneratorBackend::Ollama => Arc::new(OllamaGenerator::new(
                self.ollama_base_url.clone(),
                self.model.clone(),
            )),
        }
    }
}

/// Configuration for the generation server.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub bind_addr: String,
    pub generator: GeneratorConfig,
}

impl ServerConfig {
    pub fn from_env() -> Result<Self, String> {
        Ok(Self {
            bind_addr: std::env::var("BIND_ADDR").unwrap_or_else(|_| DEFAULT_BIND_ADDR.into()),
            generator: GeneratorConfig::from_env()?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn backend_names_parse() {
        assert_eq!("rules".parse(), Ok(GeneratorBackend::Rules));
        assert_eq!(" Ollama ".parse(), Ok(GeneratorBackend::Ollama));
        assert!("gpt".parse::<GeneratorBackend>().is_err());
    }
}
