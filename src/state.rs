// src/state.rs
use std::sync::Arc;

use crate::services::generator::{GenerationParams, TextGenerator};

pub type SharedState = Arc<AppState>;

pub struct AppState {
    pub generator: Arc<dyn TextGenerator>,
    /// Used for any parameter a request leaves out.
    pub defaults: GenerationParams,
}

impl AppState {
    pub fn new(generator: Arc<dyn TextGenerator>) -> Self {
        Self {
            generator,
            defaults: GenerationParams::default(),
        }
    }
}
