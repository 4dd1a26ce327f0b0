use std::sync::Arc;

use crate::card::StoryCardRenderer;
use crate::config::Config;

/// Shared application state injected into all route handlers via Axum extractors.
/// Holds no user data: the service never persists anything.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub renderer: Arc<StoryCardRenderer>,
}
