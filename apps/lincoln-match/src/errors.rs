use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::card::RenderError;
use crate::share::ShareError;

/// HTTP-facing error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Render error: {0}")]
    Render(#[from] RenderError),

    #[error("Share error: {0}")]
    Share(#[from] ShareError),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::Render(RenderError::SurfaceUnavailable(msg)) => {
                tracing::warn!("Story card surface unavailable: {msg}");
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    "SURFACE_UNAVAILABLE",
                    "Could not draw the story card. Please try again.".to_string(),
                )
            }
            AppError::Render(RenderError::Busy) => (
                StatusCode::CONFLICT,
                "BUSY",
                "A story card is already being generated".to_string(),
            ),
            AppError::Render(e) => {
                tracing::error!("Render error: {e}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "RENDER_ERROR",
                    "Failed to generate story card. Please try again.".to_string(),
                )
            }
            AppError::Share(ShareError::UnknownPlatform(platform)) => (
                StatusCode::BAD_REQUEST,
                "UNKNOWN_PLATFORM",
                format!("Unknown share platform '{platform}'"),
            ),
            AppError::Share(e) => {
                tracing::error!("Share error: {e}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "SHARE_ERROR",
                    "Sharing failed".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}
