pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::card::handlers as card;
use crate::share::handlers as share;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route("/api/v1/story-card", post(card::handle_render_story_card))
        .route("/api/v1/share/links", post(share::handle_share_links))
        .route(
            "/api/v1/share/links/:platform",
            post(share::handle_platform_link),
        )
        .with_state(state)
}
