use anyhow::{Context, Result};

use crate::card::renderer::{CARD_HEIGHT, CARD_WIDTH};

/// Application configuration loaded from environment variables.
/// Every setting has a default; malformed values fail startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    /// Origin that share links point at, e.g. `https://match.lincoln.ac.uk`.
    pub public_origin: String,
    pub university_name: String,
    /// Largest drawing surface the renderer may allocate, in pixels.
    pub max_canvas_pixels: u64,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            port: 8080,
            rust_log: "info".to_string(),
            public_origin: "http://localhost:5173".to_string(),
            university_name: "University of Lincoln".to_string(),
            max_canvas_pixels: CARD_WIDTH as u64 * CARD_HEIGHT as u64 * 2,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let defaults = Config::default();
        Ok(Config {
            port: env_or("PORT", defaults.port.to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: env_or("RUST_LOG", defaults.rust_log),
            public_origin: env_or("PUBLIC_ORIGIN", defaults.public_origin)
                .trim_end_matches('/')
                .to_string(),
            university_name: env_or("UNIVERSITY_NAME", defaults.university_name),
            max_canvas_pixels: env_or("MAX_CANVAS_PIXELS", defaults.max_canvas_pixels.to_string())
                .parse::<u64>()
                .context("MAX_CANVAS_PIXELS must be a positive integer")?,
        })
    }
}

fn env_or(key: &str, default: String) -> String {
    std::env::var(key)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .unwrap_or(default)
}
