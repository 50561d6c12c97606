//! Label rendering for product packaging.
//!
//! Provides EAN-13 symbol encoding and rasterization, QR code rasterization
//! with fixed box/border sizing, caption text layout with a bitmap fallback
//! font, and composition of a QR code with a caption band.

pub mod barcode;
pub mod bitmap_font;
pub mod compose;
pub mod ean13;
pub mod qr;
pub mod text;

// Re-exports for convenience
pub use barcode::render_ean13;
pub use compose::{CaptionStyle, compose_captioned};
pub use ean13::Ean13;
pub use qr::{EcLevel, QrStyle, generate_qr};
pub use text::{InkExtent, LabelFont};

/// Errors raised while encoding or rendering a label.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("EAN-13 requires 13 digits, got {0}")]
    InvalidLength(usize),

    #[error("EAN-13 accepts digits only, found {0:?}")]
    InvalidCharacter(char),

    #[error("QR encode error: {0}")]
    Qr(#[from] qrcode::types::QrError),

    #[error("failed to parse font data (TTF/OTF)")]
    InvalidFont,
}
