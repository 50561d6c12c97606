//! Barcode exporter: one EAN-13 PNG per product row.

use std::borrow::Cow;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::Context;
use label_engine::{Ean13, EngineError, LabelFont, render_ean13};
use product_db::Database;
use product_db::products::Product;

use crate::config::Config;
use crate::{bootstrap, fonts, underscore_spaces};

/// Anything that can hand over the full product list.
pub trait ProductSource {
    fn fetch_products(&self) -> anyhow::Result<Vec<Product>>;
}

impl ProductSource for Database {
    fn fetch_products(&self) -> anyhow::Result<Vec<Product>> {
        Ok(self.list_products()?)
    }
}

/// Why a single product could not be exported.
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error(transparent)]
    Encode(#[from] EngineError),

    #[error("failed to write image: {0}")]
    Image(#[from] image::ImageError),
}

/// A product that was skipped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordFailure {
    pub barcode: String,
    pub name: String,
    pub reason: String,
}

/// Outcome of a whole export run.
#[derive(Debug, Default)]
pub struct ExportReport {
    pub written: Vec<PathBuf>,
    pub failures: Vec<RecordFailure>,
}

/// Pad a 12-character value (UPC-A, or a 13-digit code stored as an integer)
/// to 13 with a leading zero. Other lengths pass through unchanged.
pub fn normalize_barcode(value: &str) -> Cow<'_, str> {
    if value.chars().count() == 12 {
        Cow::Owned(format!("0{value}"))
    } else {
        Cow::Borrowed(value)
    }
}

/// File name without extension: `{name with spaces as underscores}_{barcode}`.
pub fn barcode_file_stem(name: &str, barcode: &str) -> String {
    format!("{}_{}", underscore_spaces(name), barcode)
}

/// Encode and write one barcode, returning the written path.
pub fn write_barcode(
    barcode: &str,
    name: &str,
    output_dir: &Path,
    font: &LabelFont,
) -> Result<PathBuf, ExportError> {
    let code = Ean13::new(barcode)?;
    let img = render_ean13(&code, font);
    let path = output_dir.join(format!("{}.png", barcode_file_stem(name, barcode)));
    img.save(&path)?;
    Ok(path)
}

/// Export every product from `source` into `output_dir`.
///
/// Per-product failures are reported on `out` and collected in the report;
/// only a failure to fetch the products or to write to `out` is an error.
pub fn export_barcodes<S, W>(
    source: &S,
    output_dir: &Path,
    font: &LabelFont,
    out: &mut W,
) -> anyhow::Result<ExportReport>
where
    S: ProductSource + ?Sized,
    W: Write,
{
    let products = source
        .fetch_products()
        .context("failed to fetch products")?;
    tracing::info!(
        count = products.len(),
        dir = %output_dir.display(),
        "Exporting barcodes"
    );

    let mut report = ExportReport::default();
    for product in &products {
        let barcode = normalize_barcode(&product.barcode);
        match write_barcode(&barcode, &product.name, output_dir, font) {
            Ok(path) => {
                writeln!(
                    out,
                    "Barcode for '{}' ({}, {}ml) saved as {}",
                    product.name,
                    barcode,
                    product.water_ml,
                    barcode_file_stem(&product.name, &barcode)
                )?;
                tracing::debug!(path = %path.display(), "Wrote barcode");
                report.written.push(path);
            }
            Err(e) => {
                tracing::error!(barcode = %barcode, name = %product.name, "Barcode export failed: {e}");
                writeln!(out, "Error generating barcode for {barcode}: {e}")?;
                report.failures.push(RecordFailure {
                    barcode: barcode.into_owned(),
                    name: product.name.clone(),
                    reason: e.to_string(),
                });
            }
        }
    }

    writeln!(
        out,
        "Exported {} barcode(s), {} failure(s)",
        report.written.len(),
        report.failures.len()
    )?;
    tracing::info!(
        written = report.written.len(),
        failed = report.failures.len(),
        "Barcode export finished"
    );
    Ok(report)
}

/// Entry point: open the store, prepare the output directory, export.
pub fn run<W: Write>(config: &Config, out: &mut W) -> anyhow::Result<ExportReport> {
    tracing::debug!(?config, "Starting barcode export");
    let db = open_store(config)?;
    bootstrap::ensure_output_dir(&config.output_dir)?;
    let font = fonts::resolve_label_font(config.font_path.as_deref());
    export_barcodes(&db, &config.output_dir, &font, out)
}

fn open_store(config: &Config) -> anyhow::Result<Database> {
    tracing::debug!(
        host = %config.host,
        user = %config.user,
        "SQLite store ignores host and credentials"
    );
    Database::open_read_only(&config.database)
        .with_context(|| format!("failed to open product database {}", config.database))
}
