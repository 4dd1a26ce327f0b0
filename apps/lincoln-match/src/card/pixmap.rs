//! In-memory RGBA canvas backed by `image::RgbaImage`.
//!
//! Text is drawn from the 8×8 bitmap font in `font8x8`, each glyph stretched to
//! its metric advance and 0.8 em tall, so what `measure_text` reports is what
//! lands on the canvas. Characters without a bitmap (emoji, arrows) draw as an
//! outlined box of the same advance.

use std::io::Cursor;

use async_trait::async_trait;
use font8x8::UnicodeFonts;
use image::{ImageFormat, Rgba, RgbaImage};
use tracing::debug;

use crate::card::canvas::{CanvasProvider, Color, RasterCanvas, Rect, TextStyle, VerticalGradient};
use crate::card::RenderError;

const GLYPH_CELLS: u32 = 8;
/// Glyph height as a fraction of the font size.
const GLYPH_HEIGHT_EM: f32 = 0.8;

pub struct PixmapCanvas {
    pixels: RgbaImage,
}

impl PixmapCanvas {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            pixels: RgbaImage::new(width, height),
        }
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<Color> {
        if x >= self.pixels.width() || y >= self.pixels.height() {
            return None;
        }
        let Rgba([r, g, b, a]) = *self.pixels.get_pixel(x, y);
        Some(Color { r, g, b, a })
    }

    /// Source-over blend of `color` onto the pixel at (`x`, `y`).
    fn blend(&mut self, x: i64, y: i64, color: Color) {
        if x < 0 || y < 0 || x >= self.pixels.width() as i64 || y >= self.pixels.height() as i64 {
            return;
        }
        let dst = self.pixels.get_pixel_mut(x as u32, y as u32);
        if color.a == 255 {
            *dst = Rgba([color.r, color.g, color.b, 255]);
            return;
        }
        let alpha = color.a as f32 / 255.0;
        let mix = |src: u8, dst: u8| (src as f32 * alpha + dst as f32 * (1.0 - alpha)).round() as u8;
        let Rgba([dr, dg, db, da]) = *dst;
        let out_a = (alpha * 255.0 + da as f32 * (1.0 - alpha)).round() as u8;
        *dst = Rgba([mix(color.r, dr), mix(color.g, dg), mix(color.b, db), out_a]);
    }

    fn fill_span(&mut self, x0: f32, y0: f32, x1: f32, y1: f32, color: Color) {
        // Clip to the canvas so off-canvas spans cost nothing.
        let (w, h) = (self.pixels.width() as i64, self.pixels.height() as i64);
        let (xs, xe) = ((x0.round() as i64).max(0), (x1.round() as i64).min(w));
        let (ys, ye) = ((y0.round() as i64).max(0), (y1.round() as i64).min(h));
        for y in ys..ye {
            for x in xs..xe {
                self.blend(x, y, color);
            }
        }
    }

    fn draw_glyph(&mut self, c: char, left: f32, baseline_y: f32, advance: f32, style: &TextStyle) {
        let cell_w = advance / GLYPH_CELLS as f32;
        let cell_h = style.font.size_px * GLYPH_HEIGHT_EM / GLYPH_CELLS as f32;
        // Row 7 of the bitmap holds descenders; rows 0–6 sit on the baseline.
        let top = baseline_y - cell_h * 7.0;

        match font8x8::BASIC_FONTS.get(c) {
            Some(rows) => {
                for (row, bits) in rows.into_iter().enumerate() {
                    for col in 0..GLYPH_CELLS {
                        if bits & (1u8 << col) == 0 {
                            continue;
                        }
                        let x0 = left + col as f32 * cell_w;
                        let y0 = top + row as f32 * cell_h;
                        self.fill_span(x0, y0, x0 + cell_w, y0 + cell_h, style.color);
                    }
                }
            }
            None if c.is_whitespace() => {}
            None => {
                let stroke = (cell_w.min(cell_h)).max(1.0);
                let (x0, y0) = (left + cell_w * 0.5, top);
                let (x1, y1) = (left + advance - cell_w * 0.5, top + cell_h * 7.0);
                self.fill_span(x0, y0, x1, y0 + stroke, style.color);
                self.fill_span(x0, y1 - stroke, x1, y1, style.color);
                self.fill_span(x0, y0, x0 + stroke, y1, style.color);
                self.fill_span(x1 - stroke, y0, x1, y1, style.color);
            }
        }
    }
}

#[async_trait]
impl RasterCanvas for PixmapCanvas {
    fn width(&self) -> u32 {
        self.pixels.width()
    }

    fn height(&self) -> u32 {
        self.pixels.height()
    }

    fn fill_background(&mut self, gradient: &VerticalGradient) {
        let height = self.pixels.height();
        for y in 0..height {
            let t = (y as f32 + 0.5) / height as f32;
            let Color { r, g, b, a } = gradient.color_at(t);
            for x in 0..self.pixels.width() {
                self.pixels.put_pixel(x, y, Rgba([r, g, b, a]));
            }
        }
    }

    fn draw_rect(&mut self, rect: Rect, corner_radius: f32, fill: Color) {
        let radius = corner_radius.clamp(0.0, rect.width.min(rect.height) / 2.0);
        let (x0, y0) = (rect.x.round() as i64, rect.y.round() as i64);
        let (x1, y1) = (
            (rect.x + rect.width).round() as i64,
            (rect.y + rect.height).round() as i64,
        );
        let (left, top) = (rect.x + radius, rect.y + radius);
        let (right, bottom) = (rect.x + rect.width - radius, rect.y + rect.height - radius);

        for y in y0..y1 {
            for x in x0..x1 {
                let (px, py) = (x as f32 + 0.5, y as f32 + 0.5);
                // Distance from the inner (un-rounded) rectangle; corners only.
                let dx = (left - px).max(px - right).max(0.0);
                let dy = (top - py).max(py - bottom).max(0.0);
                if dx * dx + dy * dy <= radius * radius {
                    self.blend(x, y, fill);
                }
            }
        }
    }

    fn draw_text(&mut self, text: &str, x: f32, baseline_y: f32, style: &TextStyle) {
        let mut pen = style.left_edge(text, x);
        for c in text.chars() {
            let advance = style.font.advance(c);
            self.draw_glyph(c, pen, baseline_y, advance, style);
            pen += advance;
        }
    }

    async fn encode_png(&mut self) -> Result<Vec<u8>, RenderError> {
        if self.pixels.width() == 0 || self.pixels.height() == 0 {
            return Err(RenderError::Encode("canvas has no pixels to encode".into()));
        }
        let pixels = std::mem::replace(&mut self.pixels, RgbaImage::new(0, 0));

        // Compression is CPU-bound; keep it off the async executor.
        let encoded = tokio::task::spawn_blocking(move || {
            let mut buffer = Cursor::new(Vec::new());
            pixels
                .write_to(&mut buffer, ImageFormat::Png)
                .map(|_| buffer.into_inner())
        })
        .await
        .map_err(|e| RenderError::Encode(format!("encoder task failed: {e}")))?
        .map_err(|e| RenderError::Encode(e.to_string()))?;

        debug!(bytes = encoded.len(), "Encoded canvas to PNG");
        Ok(encoded)
    }
}

/// Provides `PixmapCanvas` surfaces up to a pixel budget.
#[derive(Debug, Clone)]
pub struct PixmapProvider {
    max_pixels: u64,
}

impl PixmapProvider {
    pub fn new(max_pixels: u64) -> Self {
        Self { max_pixels }
    }
}

impl CanvasProvider for PixmapProvider {
    fn acquire(&self, width: u32, height: u32) -> Result<Box<dyn RasterCanvas>, RenderError> {
        let pixels = width as u64 * height as u64;
        if pixels == 0 || pixels > self.max_pixels {
            return Err(RenderError::SurfaceUnavailable(format!(
                "{width}x{height} exceeds the {} pixel budget",
                self.max_pixels
            )));
        }
        Ok(Box::new(PixmapCanvas::new(width, height)))
    }
}
