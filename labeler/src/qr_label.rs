//! QR labeler: prompt for a product, encode it as JSON in a QR code and
//! write the code with a caption underneath.

use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, bail};
use image::RgbImage;
use label_engine::compose::CaptionPlacement;
use label_engine::{CaptionStyle, LabelFont, QrStyle, compose_captioned, generate_qr};
use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::{bootstrap, fonts, underscore_spaces};

/// Operator-entered product details. Both fields are kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabelRecord {
    pub name: String,
    pub water_ml: String,
}

impl LabelRecord {
    pub fn new(name: impl Into<String>, water_ml: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            water_ml: water_ml.into(),
        }
    }

    /// Compact JSON object embedded in the QR code.
    pub fn payload(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    pub fn caption(&self) -> String {
        format!("{} - {} ml", self.name, self.water_ml)
    }

    pub fn file_name(&self) -> String {
        format!("{}_qr.png", underscore_spaces(&self.name))
    }
}

/// Print `prompt` and read one line, without its line terminator.
///
/// End of input before any byte is read is an error.
pub fn prompt_line<R, W>(input: &mut R, output: &mut W, prompt: &str) -> anyhow::Result<String>
where
    R: BufRead,
    W: Write,
{
    write!(output, "{prompt}")?;
    output.flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        bail!("input closed while waiting for: {}", prompt.trim_end());
    }
    if line.ends_with('\n') {
        line.pop();
        if line.ends_with('\r') {
            line.pop();
        }
    }
    Ok(line)
}

/// Ask for the product name, then the water amount.
pub fn prompt_label<R, W>(input: &mut R, output: &mut W) -> anyhow::Result<LabelRecord>
where
    R: BufRead,
    W: Write,
{
    let name = prompt_line(input, output, "Enter product name: ")?;
    let water_ml = prompt_line(input, output, "Enter amount of water (ml): ")?;
    Ok(LabelRecord { name, water_ml })
}

/// Render the QR code and caption for `record`.
pub fn render_label(
    record: &LabelRecord,
    font: &LabelFont,
) -> anyhow::Result<(RgbImage, CaptionPlacement)> {
    let payload = record.payload().context("failed to serialize label payload")?;
    let qr = generate_qr(&payload, &QrStyle::default()).context("failed to encode QR code")?;
    Ok(compose_captioned(
        &qr,
        &record.caption(),
        font,
        &CaptionStyle::default(),
    ))
}

/// Render `record` and save it into `output_dir`, returning the file path.
pub fn write_label(
    record: &LabelRecord,
    output_dir: &Path,
    font: &LabelFont,
) -> anyhow::Result<PathBuf> {
    let (img, placement) = render_label(record, font)?;
    let path = output_dir.join(record.file_name());
    img.save(&path)
        .with_context(|| format!("failed to save {}", path.display()))?;
    tracing::debug!(
        path = %path.display(),
        width = img.width(),
        height = img.height(),
        caption_x = placement.x,
        "Wrote QR label"
    );
    Ok(path)
}

/// Entry point: prepare the output directory, prompt, render, save.
pub fn run<R, W>(config: &Config, input: &mut R, output: &mut W) -> anyhow::Result<PathBuf>
where
    R: BufRead,
    W: Write,
{
    tracing::debug!(?config, "Starting QR labeler");
    bootstrap::ensure_output_dir(&config.output_dir)?;

    let record = prompt_label(input, output)?;
    let font = fonts::resolve_label_font(config.font_path.as_deref());
    let path = write_label(&record, &config.output_dir, &font)?;

    writeln!(
        output,
        "QR code for {} ({}ml) saved as {}",
        record.name,
        record.water_ml,
        path.display()
    )?;
    tracing::info!(name = %record.name, path = %path.display(), "QR label saved");
    Ok(path)
}
