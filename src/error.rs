// src/error.rs
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::message::ErrorResponse;

/// Failures raised by a text generator.
#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("{0}")]
    InvalidParams(String),

    #[error("Upstream generator failed: {0}")]
    Upstream(String),
}

/// Errors returned by the `/generate` route.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    BadRequest(String),

    #[error(transparent)]
    Generation(#[from] GenerationError),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Generation(GenerationError::InvalidParams(_)) => StatusCode::BAD_REQUEST,
            AppError::Generation(GenerationError::Upstream(_)) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        let body = Json(ErrorResponse {
            error: Some(self.to_string()),
        });
        (status, body).into_response()
    }
}

/// How a call to the generation endpoint went wrong, as seen by the widget.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The server answered with a non-2xx status and a parseable error body.
    #[error("server responded {status}: {}", .message.as_deref().unwrap_or("<no message>"))]
    Server {
        status: u16,
        message: Option<String>,
    },

    #[error("transport failure: {0}")]
    Transport(#[from] reqwest::Error),

    /// The body did not have the expected shape.
    #[error("malformed response: {0}")]
    Malformed(String),
}

pub type Result<T> = std::result::Result<T, AppError>;
