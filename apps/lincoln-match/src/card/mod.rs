// Story-card generation: a 1080×1920 PNG announcing the user's course match,
// sized for social "story" surfaces.
// Layout is measured against static font metrics so it is deterministic and
// testable without a real rendering backend.

pub mod canvas;
pub mod export;
pub mod font_metrics;
pub mod handlers;
pub mod pixmap;
pub mod renderer;
pub mod wrap;

use thiserror::Error;

pub use canvas::{CanvasProvider, RasterCanvas};
pub use export::{write_story_card, StoryCardExporter};
pub use pixmap::PixmapProvider;
pub use renderer::{StoryCard, StoryCardRenderer};

/// Story-card failures. "Could not draw" (`SurfaceUnavailable`) and "could not
/// export" (`Encode`, `EmptyEncoding`, `Export`) are kept apart so callers can
/// word their notification accordingly.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("drawing surface unavailable: {0}")]
    SurfaceUnavailable(String),

    #[error("failed to encode story card: {0}")]
    Encode(String),

    #[error("encoder produced an empty image")]
    EmptyEncoding,

    #[error("failed to save story card: {0}")]
    Export(#[from] std::io::Error),

    #[error("a story card is already being generated")]
    Busy,
}
