//! Annotation text: greedy wrapping and glyph rasterization
//!
//! Wrapping is measured, not counted: the measure seam lets tests use a
//! fixed-advance font while the app measures real glyph advances.

use crate::surface::Surface;
use ab_glyph::{point, Font, FontArc, Glyph, GlyphId, PxScale, ScaleFont};

/// Maximum annotation line width, in native surface pixels.
pub const MAX_LINE_WIDTH_PX: f32 = 200.0;

/// Annotation font size, in native surface pixels.
pub const FONT_SIZE_PX: f32 = 16.0;

/// Line height as a multiple of the font size.
const LINE_SPACING: f32 = 1.2;

/// Annotation text color
const TEXT_COLOR: [u8; 3] = [0, 0, 0];

/// Well-known font locations, tried in order.
const FONT_CANDIDATES: &[&str] = &[
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "/usr/share/fonts/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
    "/System/Library/Fonts/Supplemental/Arial.ttf",
    "/Library/Fonts/Arial.ttf",
    "C:\\Windows\\Fonts\\arial.ttf",
    "C:\\Windows\\Fonts\\segoeui.ttf",
];

/// Errors loading the annotation font.
#[derive(Debug, thiserror::Error)]
pub enum FontError {
    #[error("no usable font found in well-known system locations")]
    NotFound,

    #[error("failed to parse font data: {0}")]
    Invalid(String),
}

/// Measures the pixel width of a single line of text.
pub trait TextMeasure {
    fn line_width(&self, text: &str) -> f32;
}

/// Draws a single line of text onto the surface.
pub trait TextRasterizer: TextMeasure {
    /// Vertical distance between wrapped lines.
    fn line_height(&self) -> f32;

    /// Draw one line with its top-left corner at (x, y) in native pixels.
    fn draw_line(&self, surface: &mut Surface, x: f32, y: f32, text: &str);
}

/// Greedy word wrap.
///
/// Words are appended to the current line while the measured width stays
/// under `max_width`; otherwise a new line starts. A single word wider than
/// the limit still gets a line of its own.
pub fn wrap_text<M: TextMeasure + ?Sized>(text: &str, max_width: f32, measure: &M) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        let candidate = if current.is_empty() {
            word.to_string()
        } else {
            format!("{current} {word}")
        };
        if current.is_empty() || measure.line_width(&candidate) < max_width {
            current = candidate;
        } else {
            lines.push(std::mem::take(&mut current));
            current = word.to_string();
        }
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

/// Fixed-advance measure and rasterizer.
///
/// Every character is `advance` pixels wide; drawing fills the character
/// cell. Deterministic, font-free, used by tests and as a headless stand-in.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedAdvance {
    pub advance: f32,
}

impl TextMeasure for FixedAdvance {
    fn line_width(&self, text: &str) -> f32 {
        text.chars().count() as f32 * self.advance
    }
}

impl TextRasterizer for FixedAdvance {
    fn line_height(&self) -> f32 {
        self.advance * 2.0
    }

    fn draw_line(&self, surface: &mut Surface, x: f32, y: f32, text: &str) {
        let height = self.line_height() as i32;
        let width = self.line_width(text) as i32;
        for dy in 0..height {
            for dx in 0..width {
                surface.blend_pixel(x as i32 + dx, y as i32 + dy, TEXT_COLOR, 1.0);
            }
        }
    }
}

/// Rasterizes annotation text with a TrueType font.
pub struct FontRenderer {
    font: FontArc,
    scale: PxScale,
}

impl FontRenderer {
    /// Load the first usable font from the well-known system locations.
    pub fn load_system() -> Result<Self, FontError> {
        for path in FONT_CANDIDATES {
            if let Ok(bytes) = std::fs::read(path) {
                if let Ok(font) = FontArc::try_from_vec(bytes) {
                    log::debug!("annotation font: {path}");
                    return Ok(Self::from_font(font));
                }
            }
        }
        Err(FontError::NotFound)
    }

    /// Build a renderer from raw TrueType bytes.
    pub fn from_bytes(bytes: Vec<u8>) -> Result<Self, FontError> {
        let font = FontArc::try_from_vec(bytes).map_err(|e| FontError::Invalid(e.to_string()))?;
        Ok(Self::from_font(font))
    }

    fn from_font(font: FontArc) -> Self {
        Self {
            font,
            scale: PxScale::from(FONT_SIZE_PX),
        }
    }
}

impl TextMeasure for FontRenderer {
    fn line_width(&self, text: &str) -> f32 {
        let scaled = self.font.as_scaled(self.scale);
        let mut width = 0.0;
        let mut previous: Option<GlyphId> = None;
        for ch in text.chars() {
            let id = scaled.glyph_id(ch);
            if let Some(prev) = previous {
                width += scaled.kern(prev, id);
            }
            width += scaled.h_advance(id);
            previous = Some(id);
        }
        width
    }
}

impl TextRasterizer for FontRenderer {
    fn line_height(&self) -> f32 {
        FONT_SIZE_PX * LINE_SPACING
    }

    fn draw_line(&self, surface: &mut Surface, x: f32, y: f32, text: &str) {
        let scaled = self.font.as_scaled(self.scale);
        let baseline = y + scaled.ascent();
        let mut pen_x = x;
        let mut previous: Option<GlyphId> = None;

        for ch in text.chars() {
            let id = scaled.glyph_id(ch);
            if let Some(prev) = previous {
                pen_x += scaled.kern(prev, id);
            }
            let glyph: Glyph = id.with_scale_and_position(self.scale, point(pen_x, baseline));
            if let Some(outlined) = self.font.outline_glyph(glyph) {
                let bounds = outlined.px_bounds();
                outlined.draw(|gx, gy, coverage| {
                    let px = bounds.min.x as i32 + gx as i32;
                    let py = bounds.min.y as i32 + gy as i32;
                    surface.blend_pixel(px, py, TEXT_COLOR, coverage);
                });
            }
            pen_x += scaled.h_advance(id);
            previous = Some(id);
        }
    }
}
