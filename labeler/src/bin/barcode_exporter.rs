//! Export one EAN-13 barcode PNG per row of the `products` table.

use clap::Parser;

use labeler_lib::bootstrap;
use labeler_lib::config::{Config, ConfigArgs, Tool};
use labeler_lib::exporter;

#[derive(Debug, Parser)]
#[command(name = "barcode-exporter", about = "Render product barcodes as EAN-13 images")]
struct Cli {
    #[command(flatten)]
    config: ConfigArgs,
}

fn main() -> anyhow::Result<()> {
    bootstrap::init_tracing();
    let cli = Cli::parse();

    bootstrap::load_dotenv();
    let config = Config::load(Tool::BarcodeExporter, &cli.config);

    let stdout = std::io::stdout();
    let report = exporter::run(&config, &mut stdout.lock())?;
    if !report.failures.is_empty() {
        tracing::warn!(
            failed = report.failures.len(),
            "Some products were skipped"
        );
    }
    Ok(())
}
