//! EAN-13 raster rendering.
//!
//! Layout, top to bottom: margin, bars (guards extended below the data bars),
//! human-readable digits, margin. The first digit sits in the left quiet zone,
//! the two six-digit groups are centred under their halves.

use image::{Rgb, RgbImage};
use tracing::debug;

use crate::ean13::{self, DIGIT_MODULES, Ean13};
use crate::text::{LabelFont, draw_centered_text};

/// Pixel width of one module.
pub const MODULE_WIDTH: u32 = 3;

/// Height of the data bars.
pub const BAR_HEIGHT: u32 = 150;

/// Extra length of guard bars below the data bars.
pub const GUARD_EXTENSION: u32 = 15;

/// Quiet zone widths in modules.
pub const LEFT_QUIET_MODULES: u32 = 11;
pub const RIGHT_QUIET_MODULES: u32 = 7;

/// Digit text size in pixels.
pub const DIGIT_FONT_SIZE: f32 = 24.0;

const MARGIN: u32 = 10;
const TEXT_GAP: u32 = 2;

const BLACK: Rgb<u8> = Rgb([0, 0, 0]);
const WHITE: Rgb<u8> = Rgb([255, 255, 255]);

/// Render `code` as a white-background raster with digits underneath.
pub fn render_ean13(code: &Ean13, font: &LabelFont) -> RgbImage {
    let modules = code.modules();
    let text_height = font.line_height(DIGIT_FONT_SIZE);

    let width = (LEFT_QUIET_MODULES + modules.len() as u32 + RIGHT_QUIET_MODULES) * MODULE_WIDTH;
    let text_top = MARGIN + BAR_HEIGHT + TEXT_GAP;
    let height = MARGIN + BAR_HEIGHT + GUARD_EXTENSION.max(TEXT_GAP + text_height) + MARGIN;

    let mut img = RgbImage::from_pixel(width, height, WHITE);

    for (i, _) in modules.iter().enumerate().filter(|(_, bar)| **bar) {
        let bar_height = if ean13::is_guard_module(i) {
            BAR_HEIGHT + GUARD_EXTENSION
        } else {
            BAR_HEIGHT
        };
        let x0 = module_x(i as u32);
        for x in x0..x0 + MODULE_WIDTH {
            for y in MARGIN..MARGIN + bar_height {
                img.put_pixel(x, y, BLACK);
            }
        }
    }

    let digits = code.digits();
    let half = 6 * DIGIT_MODULES as u32 * MODULE_WIDTH;
    let groups = [
        (0, LEFT_QUIET_MODULES * MODULE_WIDTH, &digits[..1]),
        (module_x(3), half, &digits[1..7]),
        (module_x(50), half, &digits[7..]),
    ];
    for (left, span, group) in groups {
        let text: String = group.iter().map(|d| char::from(b'0' + d)).collect();
        draw_centered_text(
            &mut img,
            font,
            DIGIT_FONT_SIZE,
            left,
            span,
            text_top as i32,
            &text,
            BLACK,
        );
    }

    debug!(code = %code, width, height, "Rendered EAN-13");
    img
}

/// Left pixel edge of module `index`.
fn module_x(index: u32) -> u32 {
    (LEFT_QUIET_MODULES + index) * MODULE_WIDTH
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ean13::MODULE_COUNT;
    use crate::ean13::tests::decode_modules;

    fn sample_row(img: &RgbImage, y: u32) -> Vec<bool> {
        (0..MODULE_COUNT as u32)
            .map(|i| img.get_pixel(module_x(i) + MODULE_WIDTH / 2, y) == &BLACK)
            .collect()
    }

    #[test]
    fn rendered_bars_decode_to_the_value() {
        let code = Ean13::new("0123456789012").unwrap();
        let img = render_ean13(&code, &LabelFont::Bitmap);
        let row = sample_row(&img, MARGIN + BAR_HEIGHT / 2);
        assert_eq!(decode_modules(&row).as_deref(), Some("0123456789012"));
    }

    #[test]
    fn quiet_zones_are_white() {
        let code = Ean13::new("5901234123457").unwrap();
        let img = render_ean13(&code, &LabelFont::Bitmap);
        let y = MARGIN + BAR_HEIGHT / 2;
        for x in 0..LEFT_QUIET_MODULES * MODULE_WIDTH {
            assert_eq!(img.get_pixel(x, y), &WHITE);
        }
        for x in img.width() - RIGHT_QUIET_MODULES * MODULE_WIDTH..img.width() {
            assert_eq!(img.get_pixel(x, y), &WHITE);
        }
    }

    #[test]
    fn guards_extend_below_data_bars() {
        let code = Ean13::new("5901234123457").unwrap();
        let img = render_ean13(&code, &LabelFont::Bitmap);
        let y = MARGIN + BAR_HEIGHT + GUARD_EXTENSION / 2;
        // Start guard module 0 is a bar; module 3 starts the first data digit.
        assert_eq!(img.get_pixel(module_x(0), y), &BLACK);
        assert_eq!(img.get_pixel(module_x(45) + MODULE_WIDTH, y), &BLACK);
    }

    #[test]
    fn digits_are_drawn_under_each_group() {
        let code = Ean13::new("5901234123457").unwrap();
        let img = render_ean13(&code, &LabelFont::Bitmap);
        let text_top = MARGIN + BAR_HEIGHT + TEXT_GAP;
        let has_ink = |from: u32, to: u32| {
            (from..to).any(|x| {
                (text_top..img.height()).any(|y| img.get_pixel(x, y) == &BLACK)
            })
        };
        assert!(has_ink(0, LEFT_QUIET_MODULES * MODULE_WIDTH));
        assert!(has_ink(module_x(3), module_x(45)));
        assert!(has_ink(module_x(50), module_x(92)));
    }

    #[test]
    fn image_has_expected_width() {
        let code = Ean13::new("5901234123457").unwrap();
        let img = render_ean13(&code, &LabelFont::Bitmap);
        assert_eq!(img.width(), (11 + 95 + 7) * MODULE_WIDTH);
    }
}
