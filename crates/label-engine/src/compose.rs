//! Image composition: paste a symbol onto a canvas and add a caption band.

use image::{GrayImage, Rgb, RgbImage};
use tracing::debug;

use crate::text::{self, LabelFont};

/// Geometry of the caption band below a symbol.
#[derive(Debug, Clone, Copy)]
pub struct CaptionStyle {
    /// Extra canvas height below the symbol.
    pub band_height: u32,
    /// Distance from the symbol's bottom edge to the caption's top.
    pub text_offset: u32,
    pub font_size: f32,
}

impl Default for CaptionStyle {
    fn default() -> Self {
        Self {
            band_height: 50,
            text_offset: 10,
            font_size: 32.0,
        }
    }
}

/// Smallest size a caption is shrunk to when it does not fit the canvas.
pub const MIN_FONT_SIZE: f32 = 8.0;

/// Where a caption was placed on the composed canvas.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CaptionPlacement {
    /// Left edge of the caption's ink.
    pub x: i32,
    /// Top of the text line.
    pub y: i32,
    /// Ink width.
    pub width: u32,
    pub font_size: f32,
}

/// Paste `top` onto `base` with its top-left corner at `(x, y)`.
///
/// Pixels falling outside `base` are dropped.
pub fn paste(base: &mut RgbImage, top: &GrayImage, x: u32, y: u32) {
    for (dx, dy, pixel) in top.enumerate_pixels() {
        let target_x = x + dx;
        let target_y = y + dy;
        if target_x < base.width() && target_y < base.height() {
            let v = pixel[0];
            base.put_pixel(target_x, target_y, Rgb([v, v, v]));
        }
    }
}

/// Put `symbol` on a white canvas with a caption band underneath and draw
/// `caption` with its ink horizontally centred in it.
///
/// A caption wider than the canvas is shrunk in 2px steps down to
/// [`MIN_FONT_SIZE`]; if it still does not fit it starts at the left edge.
pub fn compose_captioned(
    symbol: &GrayImage,
    caption: &str,
    font: &LabelFont,
    style: &CaptionStyle,
) -> (RgbImage, CaptionPlacement) {
    let (width, height) = symbol.dimensions();
    let mut canvas = RgbImage::from_pixel(width, height + style.band_height, Rgb([255, 255, 255]));
    paste(&mut canvas, symbol, 0, 0);

    let mut font_size = style.font_size;
    let mut ink = font.ink_extent(font_size, caption);
    while ink.width > width && font_size > MIN_FONT_SIZE {
        font_size = (font_size - 2.0).max(MIN_FONT_SIZE);
        ink = font.ink_extent(font_size, caption);
    }
    if font_size < style.font_size {
        debug!(font_size, ink_width = ink.width, width, "Shrunk caption to fit");
    }

    let placement = CaptionPlacement {
        x: text::centered_x(0, width, ink.width),
        y: (height + style.text_offset) as i32,
        width: ink.width,
        font_size,
    };
    font.draw(
        &mut canvas,
        font_size,
        placement.x - ink.left,
        placement.y,
        caption,
        Rgb([0, 0, 0]),
    );

    (canvas, placement)
}
