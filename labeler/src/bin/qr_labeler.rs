//! Prompt for a product and write a captioned QR label.

use clap::Parser;

use labeler_lib::bootstrap;
use labeler_lib::config::{Config, ConfigArgs, Tool};
use labeler_lib::qr_label;

#[derive(Debug, Parser)]
#[command(name = "qr-labeler", about = "Create a QR label for a product")]
struct Cli {
    #[command(flatten)]
    config: ConfigArgs,
}

fn main() -> anyhow::Result<()> {
    bootstrap::init_tracing();
    let cli = Cli::parse();

    bootstrap::load_dotenv();
    let config = Config::load(Tool::QrLabeler, &cli.config);

    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    qr_label::run(&config, &mut stdin.lock(), &mut stdout.lock())?;
    Ok(())
}
