//! Text measurement and drawing for label captions.
//!
//! A [`LabelFont`] is either a scalable TTF/OTF font or the built-in bitmap
//! font. Sizes are given in pixels for both; the bitmap font snaps to the
//! nearest integer multiple of its 8px cell.

use ab_glyph::{Font, FontVec, GlyphId, PxScale, ScaleFont, point};
use image::{Rgb, RgbImage};
use imageproc::drawing::draw_text_mut;

use crate::EngineError;
use crate::bitmap_font;

/// Horizontal extent of the pixels a draw call paints.
///
/// `left` is measured from the x passed to [`LabelFont::draw`] and may be
/// negative for glyphs that overhang their origin.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InkExtent {
    pub left: i32,
    pub width: u32,
}

/// Font used for captions and human-readable barcode digits.
pub enum LabelFont {
    Scalable(FontVec),
    Bitmap,
}

impl LabelFont {
    /// Parse TTF/OTF data into a scalable font.
    pub fn from_data(data: Vec<u8>) -> Result<Self, EngineError> {
        FontVec::try_from_vec(data)
            .map(LabelFont::Scalable)
            .map_err(|_| EngineError::InvalidFont)
    }

    /// Ink extent of `text` at `size_px`; empty for text with no visible glyphs.
    pub fn ink_extent(&self, size_px: f32, text: &str) -> InkExtent {
        let span = match self {
            LabelFont::Scalable(font) => ink_bounds(font, PxScale::from(size_px), text),
            LabelFont::Bitmap => bitmap_font::ink_span(text, bitmap_scale(size_px))
                .map(|(left, right)| (left as i32, right as i32)),
        };
        span.map(|(left, right)| InkExtent {
            left,
            width: (right - left) as u32,
        })
        .unwrap_or_default()
    }

    /// Line height at `size_px`.
    pub fn line_height(&self, size_px: f32) -> u32 {
        match self {
            LabelFont::Scalable(font) => line_height(font, PxScale::from(size_px)),
            LabelFont::Bitmap => bitmap_font::LINE_HEIGHT * bitmap_scale(size_px),
        }
    }

    /// Draw `text` with its top-left corner at `(x, y)`.
    pub fn draw(&self, img: &mut RgbImage, size_px: f32, x: i32, y: i32, text: &str, color: Rgb<u8>) {
        match self {
            LabelFont::Scalable(font) => {
                draw_text_mut(img, color, x, y, PxScale::from(size_px), font, text)
            }
            LabelFont::Bitmap => {
                bitmap_font::draw(img, x, y, bitmap_scale(size_px), text, color)
            }
        }
    }
}

/// Horizontal pixel bounds `[left, right)` of the outlines drawn for `text`,
/// relative to the draw origin. `None` if no glyph has an outline.
///
/// The caret walk matches imageproc's `draw_text_mut`, so the bounds cover
/// exactly the columns it paints.
pub fn ink_bounds<F: Font>(font: &F, scale: PxScale, text: &str) -> Option<(i32, i32)> {
    let scaled = font.as_scaled(scale);
    let mut caret = 0.0f32;
    let mut last: Option<GlyphId> = None;
    let mut bounds: Option<(i32, i32)> = None;

    for ch in text.chars() {
        let glyph_id = scaled.glyph_id(ch);
        let glyph = glyph_id.with_scale_and_position(scale, point(caret, scaled.ascent()));
        caret += scaled.h_advance(glyph_id);
        let Some(outlined) = font.outline_glyph(glyph) else {
            continue;
        };
        if let Some(last) = last {
            caret += scaled.kern(glyph_id, last);
        }
        last = Some(glyph_id);

        let px = outlined.px_bounds();
        let (min_x, max_x) = (px.min.x.round() as i32, px.max.x.round() as i32);
        bounds = Some(match bounds {
            Some((left, right)) => (left.min(min_x), right.max(max_x)),
            None => (min_x, max_x),
        });
    }

    bounds
}

/// Compute the line height for the given font and scale.
pub fn line_height<F: Font>(font: &F, scale: PxScale) -> u32 {
    let scaled = font.as_scaled(scale);
    (scaled.ascent() - scaled.descent() + scaled.line_gap()).ceil() as u32
}

/// Left edge that centres a run of `ink_width` pixels inside `[left, left + span)`.
///
/// Ink wider than the span starts at `left`.
pub fn centered_x(left: u32, span: u32, ink_width: u32) -> i32 {
    (left + span.saturating_sub(ink_width) / 2) as i32
}

/// Draw text with its ink horizontally centred across `span` pixels starting
/// at `left`.
#[allow(clippy::too_many_arguments)]
pub fn draw_centered_text(
    img: &mut RgbImage,
    font: &LabelFont,
    size_px: f32,
    left: u32,
    span: u32,
    y: i32,
    text: &str,
    color: Rgb<u8>,
) {
    let ink = font.ink_extent(size_px, text);
    let x = centered_x(left, span, ink.width) - ink.left;
    font.draw(img, size_px, x, y, text, color);
}

fn bitmap_scale(size_px: f32) -> u32 {
    ((size_px / bitmap_font::LINE_HEIGHT as f32).round() as u32).max(1)
}
