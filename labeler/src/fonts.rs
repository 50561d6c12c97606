//! Label font discovery: configured font, then system fonts, then the
//! built-in bitmap font.

use std::path::Path;

use label_engine::{EngineError, LabelFont};

/// Resolve the font used for captions and barcode digits. Never fails.
pub fn resolve_label_font(preferred: Option<&Path>) -> LabelFont {
    if let Some(path) = preferred {
        match load_font_file(path) {
            Ok(font) => {
                tracing::info!(path = %path.display(), "Using configured label font");
                return font;
            }
            Err(e) => {
                tracing::warn!(path = %path.display(), "Configured font unusable: {e}");
            }
        }
    }

    for path in system_font_candidates() {
        if let Ok(font) = load_font_file(Path::new(path)) {
            tracing::debug!(path = %path, "Using system font for labels");
            return font;
        }
    }

    tracing::warn!("No scalable font found, falling back to built-in bitmap font");
    LabelFont::Bitmap
}

#[derive(Debug, thiserror::Error)]
enum FontLoadError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Parse(#[from] EngineError),
}

fn load_font_file(path: &Path) -> Result<LabelFont, FontLoadError> {
    let data = std::fs::read(path)?;
    Ok(LabelFont::from_data(data)?)
}

/// Well-known scalable font locations for the current OS, in preference order.
pub fn system_font_candidates() -> &'static [&'static str] {
    #[cfg(target_os = "macos")]
    {
        &[
            "/System/Library/Fonts/Supplemental/Arial.ttf",
            "/Library/Fonts/Arial.ttf",
            "/System/Library/Fonts/Supplemental/Helvetica.ttf",
            "/System/Library/Fonts/Helvetica.ttc",
        ]
    }
    #[cfg(target_os = "windows")]
    {
        &["C:\\Windows\\Fonts\\arial.ttf", "C:\\Windows\\Fonts\\segoeui.ttf"]
    }
    #[cfg(not(any(target_os = "macos", target_os = "windows")))]
    {
        &[
            "/usr/share/fonts/truetype/msttcorefonts/Arial.ttf",
            "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
            "/usr/share/fonts/liberation-sans/LiberationSans-Regular.ttf",
            "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
            "/usr/share/fonts/TTF/DejaVuSans.ttf",
        ]
    }
}
