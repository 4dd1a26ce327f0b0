use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use lincoln_match::card::{PixmapProvider, StoryCardRenderer};
use lincoln_match::config::Config;
use lincoln_match::routes::build_router;
use lincoln_match::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("lincoln_match={},tower_http=info", &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Lincoln Match v{}", env!("CARGO_PKG_VERSION"));

    let provider = Arc::new(PixmapProvider::new(config.max_canvas_pixels));
    let renderer = Arc::new(StoryCardRenderer::new(provider));
    info!(
        "Story card renderer initialized (canvas budget: {} px)",
        config.max_canvas_pixels
    );
    info!("Share links point at {}", config.public_origin);

    let state = AppState {
        config: config.clone(),
        renderer,
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
