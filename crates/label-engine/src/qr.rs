//! QR code rasterization with fixed box and border sizing.

use image::{GrayImage, Luma};
use qrcode::QrCode;
use tracing::debug;

use crate::EngineError;

pub use qrcode::EcLevel;

/// Sizing and redundancy for a rendered QR symbol.
#[derive(Debug, Clone, Copy)]
pub struct QrStyle {
    pub ec_level: EcLevel,
    /// Pixels per module edge.
    pub box_size: u32,
    /// Quiet zone width in modules.
    pub border: u32,
}

impl Default for QrStyle {
    fn default() -> Self {
        Self {
            ec_level: EcLevel::L,
            box_size: 10,
            border: 4,
        }
    }
}

/// Encode `data` into the smallest QR version that fits and render it black on white.
///
/// The image side is `(modules + 2 * border) * box_size` pixels.
pub fn generate_qr(data: &str, style: &QrStyle) -> Result<GrayImage, EngineError> {
    let code = QrCode::with_error_correction_level(data.as_bytes(), style.ec_level)?;
    let modules = code.to_colors();
    let module_count = code.width() as u32;
    debug!(
        version = ?code.version(),
        modules = module_count,
        bytes = data.len(),
        "Encoded QR payload"
    );

    let scale = style.box_size.max(1);
    let img_size = (module_count + style.border * 2) * scale;

    let mut img = GrayImage::from_pixel(img_size, img_size, Luma([255u8]));

    for (i, color) in modules.iter().enumerate() {
        let x = (i as u32) % module_count + style.border;
        let y = (i as u32) / module_count + style.border;

        if *color == qrcode::Color::Dark {
            for dx in 0..scale {
                for dy in 0..scale {
                    img.put_pixel(x * scale + dx, y * scale + dy, Luma([0u8]));
                }
            }
        }
    }

    Ok(img)
}
