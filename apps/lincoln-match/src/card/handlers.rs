//! Axum route handlers for the story-card API.

use axum::{
    extract::State,
    http::header,
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;

use crate::errors::AppError;
use crate::models::MatchedCourse;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoryCardRequest {
    pub course: MatchedCourse,
    /// Overrides the configured university name in the "at ..." caption.
    #[serde(default)]
    pub university_label: Option<String>,
}

/// POST /api/v1/story-card
///
/// Renders the 1080×1920 story card for one course and returns it as a
/// PNG attachment.
pub async fn handle_render_story_card(
    State(state): State<AppState>,
    Json(request): Json<StoryCardRequest>,
) -> Result<Response, AppError> {
    if !request.course.has_name() {
        return Err(AppError::Validation(
            "course.name cannot be empty".to_string(),
        ));
    }

    let label = request
        .university_label
        .as_deref()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .unwrap_or(&state.config.university_name);

    let card = state.renderer.render(&request.course, label).await?;
    tracing::info!(
        course = %request.course.name,
        bytes = card.png.len(),
        "Story card generated"
    );

    let disposition = format!("attachment; filename=\"{}\"", card.file_name);
    Ok((
        [
            (header::CONTENT_TYPE, "image/png".to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        card.png,
    )
        .into_response())
}
