//! Axum route handlers for the share API.
//!
//! The server cannot open a share sheet or a clipboard, so it hands back
//! everything a client needs to run the share flow itself.

use axum::{
    extract::{Path, State},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::models::MatchedCourse;
use crate::share::{deep_link, NativeSharePayload, ShareIntent, ShareLinks, SharePlatform};
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShareLinksRequest {
    pub course: MatchedCourse,
    #[serde(default)]
    pub course_id: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShareLinksResponse {
    pub intent: ShareIntent,
    pub native_payload: NativeSharePayload,
    pub links: ShareLinks,
    pub clipboard_text: String,
}

#[derive(Debug, Serialize)]
pub struct PlatformLinkResponse {
    pub platform: SharePlatform,
    pub url: String,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/share/links
pub async fn handle_share_links(
    State(state): State<AppState>,
    Json(request): Json<ShareLinksRequest>,
) -> Result<Json<ShareLinksResponse>, AppError> {
    let intent = build_intent(&state, &request)?;

    Ok(Json(ShareLinksResponse {
        native_payload: intent.native_payload(),
        links: ShareLinks::for_intent(&intent),
        clipboard_text: intent.clipboard_text(),
        intent,
    }))
}

/// POST /api/v1/share/links/:platform
///
/// Returns the deep link for a single platform. Unknown platforms are a 400.
pub async fn handle_platform_link(
    State(state): State<AppState>,
    Path(platform): Path<String>,
    Json(request): Json<ShareLinksRequest>,
) -> Result<Json<PlatformLinkResponse>, AppError> {
    let platform: SharePlatform = platform.parse()?;
    let intent = build_intent(&state, &request)?;

    Ok(Json(PlatformLinkResponse {
        platform,
        url: deep_link(platform, &intent),
    }))
}

fn build_intent(state: &AppState, request: &ShareLinksRequest) -> Result<ShareIntent, AppError> {
    if !request.course.has_name() {
        return Err(AppError::Validation(
            "course.name cannot be empty".to_string(),
        ));
    }
    Ok(ShareIntent::for_course(
        &request.course,
        request.course_id.as_deref(),
        &state.config.public_origin,
        &state.config.university_name,
    ))
}
