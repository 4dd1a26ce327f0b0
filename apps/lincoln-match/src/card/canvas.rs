//! Drawing capability used by the story-card renderer.
//!
//! `RasterCanvas` is the only thing the layout code talks to, so word-wrap and
//! positioning can be exercised against a recording canvas in tests and
//! against `PixmapCanvas` in production.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::card::font_metrics::FontSpec;
use crate::card::RenderError;

// ────────────────────────────────────────────────────────────────────────────
// Paint types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const WHITE: Color = Color::rgb(255, 255, 255);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Same color at `alpha` opacity (0.0 – 1.0).
    pub fn with_alpha(self, alpha: f32) -> Self {
        Self {
            a: (alpha.clamp(0.0, 1.0) * 255.0).round() as u8,
            ..self
        }
    }

    /// Parses `#rrggbb`.
    pub fn from_hex(hex: &str) -> Option<Self> {
        let digits = hex.strip_prefix('#')?;
        if digits.len() != 6 || !digits.is_ascii() {
            return None;
        }
        let channel = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16).ok();
        Some(Self::rgb(channel(0)?, channel(2)?, channel(4)?))
    }

    /// Linear interpolation between two colors, `t` in 0.0 – 1.0.
    pub fn lerp(self, other: Color, t: f32) -> Color {
        let t = t.clamp(0.0, 1.0);
        let mix = |a: u8, b: u8| (a as f32 + (b as f32 - a as f32) * t).round() as u8;
        Color {
            r: mix(self.r, other.r),
            g: mix(self.g, other.g),
            b: mix(self.b, other.b),
            a: mix(self.a, other.a),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GradientStop {
    /// Position along the gradient, 0.0 (top) – 1.0 (bottom).
    pub offset: f32,
    pub color: Color,
}

/// Top-to-bottom gradient spanning the whole canvas height.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VerticalGradient {
    pub stops: Vec<GradientStop>,
}

impl VerticalGradient {
    /// Color at `t` (0.0 – 1.0). Outside the first/last stop the end color holds.
    pub fn color_at(&self, t: f32) -> Color {
        let Some(first) = self.stops.first() else {
            return Color::rgb(0, 0, 0);
        };
        if t <= first.offset {
            return first.color;
        }
        for pair in self.stops.windows(2) {
            let (from, to) = (pair[0], pair[1]);
            if t <= to.offset {
                let span = to.offset - from.offset;
                let local = if span > 0.0 { (t - from.offset) / span } else { 1.0 };
                return from.color.lerp(to.color, local);
            }
        }
        self.stops[self.stops.len() - 1].color
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TextAlign {
    Left,
    Center,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TextStyle {
    pub font: FontSpec,
    pub color: Color,
    pub align: TextAlign,
}

impl TextStyle {
    pub const fn centered(font: FontSpec, color: Color) -> Self {
        Self {
            font,
            color,
            align: TextAlign::Center,
        }
    }

    /// Left edge of `text` when anchored at `x`.
    pub fn left_edge(&self, text: &str, x: f32) -> f32 {
        match self.align {
            TextAlign::Left => x,
            TextAlign::Center => x - self.font.measure(text) / 2.0,
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Capability traits
// ────────────────────────────────────────────────────────────────────────────

/// A fixed-size drawing surface.
#[async_trait]
pub trait RasterCanvas: Send {
    fn width(&self) -> u32;
    fn height(&self) -> u32;

    fn fill_background(&mut self, gradient: &VerticalGradient);

    /// Fills `rect`, rounding each corner by `corner_radius` pixels.
    fn draw_rect(&mut self, rect: Rect, corner_radius: f32, fill: Color);

    /// Draws `text` with its baseline at `baseline_y`; `x` is interpreted
    /// according to `style.align`.
    fn draw_text(&mut self, text: &str, x: f32, baseline_y: f32, style: &TextStyle);

    fn measure_text(&self, text: &str, font: &FontSpec) -> f32 {
        font.measure(text)
    }

    /// Encodes the canvas as PNG. May suspend; the canvas is spent afterwards.
    async fn encode_png(&mut self) -> Result<Vec<u8>, RenderError>;
}

/// Hands out drawing surfaces.
pub trait CanvasProvider: Send + Sync {
    /// Fails with `RenderError::SurfaceUnavailable` when no surface of this
    /// size can be created.
    fn acquire(&self, width: u32, height: u32) -> Result<Box<dyn RasterCanvas>, RenderError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_hex_parses_brand_colors() {
        assert_eq!(Color::from_hex("#cd1f80"), Some(Color::rgb(0xcd, 0x1f, 0x80)));
        assert_eq!(Color::from_hex("cd1f80"), None);
        assert_eq!(Color::from_hex("#cd1f8"), None);
        assert_eq!(Color::from_hex("#zz1f80"), None);
    }

    #[test]
    fn test_with_alpha_rounds_to_byte() {
        assert_eq!(Color::WHITE.with_alpha(0.2).a, 51);
    }

    #[test]
    fn test_gradient_hits_each_stop() {
        let gradient = VerticalGradient {
            stops: vec![
                GradientStop { offset: 0.0, color: Color::rgb(0, 0, 0) },
                GradientStop { offset: 0.5, color: Color::rgb(100, 100, 100) },
                GradientStop { offset: 1.0, color: Color::rgb(200, 0, 0) },
            ],
        };
        assert_eq!(gradient.color_at(0.0), Color::rgb(0, 0, 0));
        assert_eq!(gradient.color_at(0.25), Color::rgb(50, 50, 50));
        assert_eq!(gradient.color_at(0.5), Color::rgb(100, 100, 100));
        assert_eq!(gradient.color_at(1.0), Color::rgb(200, 0, 0));
        assert_eq!(gradient.color_at(1.5), Color::rgb(200, 0, 0));
    }

    #[test]
    fn test_centered_text_left_edge() {
        let style = TextStyle::centered(FontSpec::regular(10.0), Color::WHITE);
        let width = style.font.measure("Law");
        assert!((style.left_edge("Law", 100.0) - (100.0 - width / 2.0)).abs() < 1e-4);
    }
}
