//! Story-card layout and rendering.
//!
//! Fixed layout on a 1080×1920 canvas (all numbers are canvas pixels):
//! - three-stop brand gradient, top to bottom
//! - emblem at y=400 and title at y=600, centered on x=540
//! - translucent rounded course box at (90, 700), 900×400
//! - course name word-wrapped to 800px, first baseline 850, 90px per line
//! - captions at y=1250, 1400 and 1550

use bytes::Bytes;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use tracing::{debug, warn};

use crate::card::canvas::{
    CanvasProvider, Color, GradientStop, RasterCanvas, Rect, TextStyle, VerticalGradient,
};
use crate::card::font_metrics::FontSpec;
use crate::card::wrap::{wrap_text, WrapLayout, WrappedLine};
use crate::card::RenderError;
use crate::models::MatchedCourse;

// ────────────────────────────────────────────────────────────────────────────
// Layout constants
// ────────────────────────────────────────────────────────────────────────────

pub const CARD_WIDTH: u32 = 1080;
pub const CARD_HEIGHT: u32 = 1920;
const CENTER_X: f32 = 540.0;

const BRAND_PINK: Color = Color::rgb(0xcd, 0x1f, 0x80);
const BRAND_PINK_DARK: Color = Color::rgb(0xa0, 0x18, 0x66);
const BRAND_PURPLE: Color = Color::rgb(0x1a, 0x0a, 0x2e);

const EMBLEM: &str = "🎓";
const EMBLEM_BASELINE: f32 = 400.0;
const EMBLEM_FONT: FontSpec = FontSpec::bold(180.0);

const TITLE: &str = "I Found My Match!";
const TITLE_BASELINE: f32 = 600.0;
const TITLE_FONT: FontSpec = FontSpec::bold(100.0);

pub const COURSE_BOX: Rect = Rect {
    x: 90.0,
    y: 700.0,
    width: 900.0,
    height: 400.0,
};
const COURSE_BOX_RADIUS: f32 = 40.0;
const COURSE_BOX_ALPHA: f32 = 0.2;

pub const COURSE_NAME_FONT: FontSpec = FontSpec::bold(70.0);
pub const COURSE_NAME_LAYOUT: WrapLayout = WrapLayout {
    max_width: 800.0,
    first_baseline: 850.0,
    line_height: 90.0,
};

const UNIVERSITY_BASELINE: f32 = 1250.0;
const UNIVERSITY_FONT: FontSpec = FontSpec::regular(60.0);

pub const HASHTAG: &str = "#MyLincolnMatch";
const HASHTAG_BASELINE: f32 = 1400.0;
const HASHTAG_FONT: FontSpec = FontSpec::bold(80.0);

const CALL_TO_ACTION: &str = "Find your perfect course →";
const CTA_BASELINE: f32 = 1550.0;
const CTA_FONT: FontSpec = FontSpec::regular(50.0);

fn brand_gradient() -> VerticalGradient {
    VerticalGradient {
        stops: vec![
            GradientStop {
                offset: 0.0,
                color: BRAND_PINK,
            },
            GradientStop {
                offset: 0.5,
                color: BRAND_PINK_DARK,
            },
            GradientStop {
                offset: 1.0,
                color: BRAND_PURPLE,
            },
        ],
    }
}

/// `lincoln-match-<unix-epoch-ms>.png`
pub fn story_card_file_name(at: DateTime<Utc>) -> String {
    format!("lincoln-match-{}.png", at.timestamp_millis())
}

// ────────────────────────────────────────────────────────────────────────────
// Painting
// ────────────────────────────────────────────────────────────────────────────

/// Paints the full card onto `canvas` and returns the course-name lines as laid out.
pub fn paint_story_card(
    canvas: &mut dyn RasterCanvas,
    course: &MatchedCourse,
    university_label: &str,
) -> Vec<WrappedLine> {
    canvas.fill_background(&brand_gradient());

    let white = |font| TextStyle::centered(font, Color::WHITE);

    canvas.draw_text(EMBLEM, CENTER_X, EMBLEM_BASELINE, &white(EMBLEM_FONT));
    canvas.draw_text(TITLE, CENTER_X, TITLE_BASELINE, &white(TITLE_FONT));

    canvas.draw_rect(
        COURSE_BOX,
        COURSE_BOX_RADIUS,
        Color::WHITE.with_alpha(COURSE_BOX_ALPHA),
    );

    let lines = wrap_text(&course.name, &COURSE_NAME_LAYOUT, |s| {
        canvas.measure_text(s, &COURSE_NAME_FONT)
    });
    let name_style = white(COURSE_NAME_FONT);
    for line in &lines {
        if line.overflows(&COURSE_NAME_LAYOUT) {
            warn!(width = line.width, "Course name token wider than the course box");
        }
        canvas.draw_text(&line.text, CENTER_X, line.baseline_y, &name_style);
    }

    canvas.draw_text(
        &format!("at {university_label}"),
        CENTER_X,
        UNIVERSITY_BASELINE,
        &white(UNIVERSITY_FONT),
    );
    canvas.draw_text(HASHTAG, CENTER_X, HASHTAG_BASELINE, &white(HASHTAG_FONT));
    canvas.draw_text(CALL_TO_ACTION, CENTER_X, CTA_BASELINE, &white(CTA_FONT));

    lines
}

// ────────────────────────────────────────────────────────────────────────────
// Renderer
// ────────────────────────────────────────────────────────────────────────────

/// A rendered, encoded card ready for download or upload.
#[derive(Debug, Clone)]
pub struct StoryCard {
    pub png: Bytes,
    pub file_name: String,
    pub course_lines: Vec<WrappedLine>,
}

#[derive(Clone)]
pub struct StoryCardRenderer {
    provider: Arc<dyn CanvasProvider>,
}

impl StoryCardRenderer {
    pub fn new(provider: Arc<dyn CanvasProvider>) -> Self {
        Self { provider }
    }

    /// Renders the card for `course`. Encoding suspends; await it before
    /// reporting the outcome.
    pub async fn render(
        &self,
        course: &MatchedCourse,
        university_label: &str,
    ) -> Result<StoryCard, RenderError> {
        let mut canvas = self.provider.acquire(CARD_WIDTH, CARD_HEIGHT)?;
        let course_lines = paint_story_card(canvas.as_mut(), course, university_label);

        let png = canvas.encode_png().await?;
        drop(canvas);
        if png.is_empty() {
            return Err(RenderError::EmptyEncoding);
        }

        debug!(
            lines = course_lines.len(),
            bytes = png.len(),
            "Rendered story card"
        );
        Ok(StoryCard {
            png: Bytes::from(png),
            file_name: story_card_file_name(Utc::now()),
            course_lines,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::card::font_metrics::FontWeight;
    use crate::card::pixmap::PixmapProvider;
    use async_trait::async_trait;
    use chrono::TimeZone;
    use std::sync::Mutex;

    #[derive(Debug, Clone, PartialEq)]
    enum DrawOp {
        Background(usize),
        Rect(Rect, f32, Color),
        Text(String, f32, f32, FontWeight, f32),
    }

    /// Canvas that records calls instead of drawing.
    struct RecordingCanvas {
        ops: Arc<Mutex<Vec<DrawOp>>>,
        encoded: Vec<u8>,
    }

    #[async_trait]
    impl RasterCanvas for RecordingCanvas {
        fn width(&self) -> u32 {
            CARD_WIDTH
        }
        fn height(&self) -> u32 {
            CARD_HEIGHT
        }
        fn fill_background(&mut self, gradient: &VerticalGradient) {
            self.ops.lock().unwrap().push(DrawOp::Background(gradient.stops.len()));
        }
        fn draw_rect(&mut self, rect: Rect, corner_radius: f32, fill: Color) {
            self.ops.lock().unwrap().push(DrawOp::Rect(rect, corner_radius, fill));
        }
        fn draw_text(&mut self, text: &str, x: f32, baseline_y: f32, style: &TextStyle) {
            self.ops.lock().unwrap().push(DrawOp::Text(
                text.to_string(),
                x,
                baseline_y,
                style.font.weight,
                style.font.size_px,
            ));
        }
        async fn encode_png(&mut self) -> Result<Vec<u8>, RenderError> {
            Ok(std::mem::take(&mut self.encoded))
        }
    }

    struct RecordingProvider {
        ops: Arc<Mutex<Vec<DrawOp>>>,
        encoded: Vec<u8>,
    }

    impl CanvasProvider for RecordingProvider {
        fn acquire(&self, _w: u32, _h: u32) -> Result<Box<dyn RasterCanvas>, RenderError> {
            Ok(Box::new(RecordingCanvas {
                ops: self.ops.clone(),
                encoded: self.encoded.clone(),
            }))
        }
    }

    struct NoSurface;

    impl CanvasProvider for NoSurface {
        fn acquire(&self, _w: u32, _h: u32) -> Result<Box<dyn RasterCanvas>, RenderError> {
            Err(RenderError::SurfaceUnavailable("no 2d context".into()))
        }
    }

    fn recording(encoded: &[u8]) -> (StoryCardRenderer, Arc<Mutex<Vec<DrawOp>>>) {
        let ops = Arc::new(Mutex::new(Vec::new()));
        let provider = RecordingProvider {
            ops: ops.clone(),
            encoded: encoded.to_vec(),
        };
        (StoryCardRenderer::new(Arc::new(provider)), ops)
    }

    fn course() -> MatchedCourse {
        MatchedCourse::new("Computer Science and Artificial Intelligence", "")
    }

    #[tokio::test]
    async fn test_draws_fixed_layout_in_order() {
        let (renderer, ops) = recording(b"png");
        let card = renderer
            .render(&course(), "University of Lincoln")
            .await
            .unwrap();

        let ops = ops.lock().unwrap().clone();
        let text = |s: &str, y: f32, w: FontWeight, px: f32| {
            DrawOp::Text(s.to_string(), 540.0, y, w, px)
        };
        assert_eq!(
            ops,
            vec![
                DrawOp::Background(3),
                text("🎓", 400.0, FontWeight::Bold, 180.0),
                text("I Found My Match!", 600.0, FontWeight::Bold, 100.0),
                DrawOp::Rect(COURSE_BOX, 40.0, Color::WHITE.with_alpha(0.2)),
                text("Computer Science and", 850.0, FontWeight::Bold, 70.0),
                text("Artificial Intelligence", 940.0, FontWeight::Bold, 70.0),
                text("at University of Lincoln", 1250.0, FontWeight::Regular, 60.0),
                text("#MyLincolnMatch", 1400.0, FontWeight::Bold, 80.0),
                text("Find your perfect course →", 1550.0, FontWeight::Regular, 50.0),
            ]
        );
        assert_eq!(card.course_lines.len(), 2);
        assert_eq!(&card.png[..], b"png");
    }

    #[tokio::test]
    async fn test_missing_surface_is_reported() {
        let renderer = StoryCardRenderer::new(Arc::new(NoSurface));
        let err = renderer.render(&course(), "Lincoln").await.unwrap_err();
        assert!(matches!(err, RenderError::SurfaceUnavailable(_)));
    }

    #[tokio::test]
    async fn test_empty_encoding_is_distinct_from_surface_failure() {
        let (renderer, _) = recording(b"");
        let err = renderer.render(&course(), "Lincoln").await.unwrap_err();
        assert!(matches!(err, RenderError::EmptyEncoding));
    }

    #[tokio::test]
    async fn test_pixmap_render_produces_full_size_png() {
        let renderer = StoryCardRenderer::new(Arc::new(PixmapProvider::new(
            CARD_WIDTH as u64 * CARD_HEIGHT as u64,
        )));
        let card = renderer
            .render(&MatchedCourse::new("Law", ""), "University of Lincoln")
            .await
            .unwrap();

        assert_eq!(&card.png[..8], b"\x89PNG\r\n\x1a\n");
        let decoded = image::load_from_memory(&card.png).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (CARD_WIDTH, CARD_HEIGHT));
        assert!(card.file_name.starts_with("lincoln-match-"));
        assert!(card.file_name.ends_with(".png"));
    }

    #[test]
    fn test_file_name_uses_epoch_millis() {
        let at = Utc.timestamp_millis_opt(1_760_000_000_123).unwrap();
        assert_eq!(story_card_file_name(at), "lincoln-match-1760000000123.png");
    }
}
