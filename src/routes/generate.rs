use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
};
use tracing::{info, warn};

use crate::{
    error::{AppError, GenerationError},
    message::{GenerateRequest, GenerationResponse},
    services::generator::GenerationParams,
    state::SharedState,
};

pub async fn generate_handler(
    State(state): State<SharedState>,
    payload: Result<Json<GenerateRequest>, JsonRejection>,
) -> Result<Json<GenerationResponse>, AppError> {
    let Json(payload) = payload.map_err(|e| AppError::BadRequest(e.body_text()))?;

    let prompt = match payload.prompt.as_deref() {
        Some(p) if !p.is_empty() => p,
        _ => return Err(AppError::BadRequest("Prompt is required".to_string())),
    };

    let params = request_params(&payload, &state.defaults)?;

    info!(
        generator = state.generator.name(),
        prompt_len = prompt.len(),
        history = payload.conversation_history.len(),
        sequences = params.num_return_sequences,
        "generating"
    );

    let generated_text = state
        .generator
        .generate(prompt, &payload.conversation_history, &params)
        .await
        .inspect_err(|e| warn!(error = %e, "generation failed"))?;

    Ok(Json(GenerationResponse { generated_text }))
}

fn request_params(
    payload: &GenerateRequest,
    defaults: &GenerationParams,
) -> Result<GenerationParams, GenerationError> {
    let num_return_sequences = match payload.num_return_sequences {
        Some(n) if n <= 0 => {
            return Err(GenerationError::InvalidParams(
                "The 'num_return_sequences' argument must be a positive integer.".to_string(),
            ));
        }
        Some(n) => usize::try_from(n).unwrap_or(usize::MAX),
        None => defaults.num_return_sequences,
    };

    let params = GenerationParams {
        max_length: payload.max_length.unwrap_or(defaults.max_length),
        temperature: payload.temperature.unwrap_or(defaults.temperature),
        num_return_sequences,
        ..defaults.clone()
    };
    params.validate()?;
    Ok(params)
}
