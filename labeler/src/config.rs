//! Tool configuration: defaults, environment overrides, command-line overrides.

use std::fmt;
use std::path::PathBuf;

/// Which tool a configuration is loaded for. Selects the default output directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tool {
    BarcodeExporter,
    QrLabeler,
}

impl Tool {
    pub fn default_output_dir(self) -> &'static str {
        match self {
            Tool::BarcodeExporter => "barcodes",
            Tool::QrLabeler => "qrcodes",
        }
    }

    /// Environment variable overriding the output directory for this tool.
    pub fn output_dir_env(self) -> &'static str {
        match self {
            Tool::BarcodeExporter => "SCANNER_BARCODE_DIR",
            Tool::QrLabeler => "SCANNER_QR_DIR",
        }
    }
}

pub const ENV_HOST: &str = "SCANNER_DB_HOST";
pub const ENV_USER: &str = "SCANNER_DB_USER";
pub const ENV_PASSWORD: &str = "SCANNER_DB_PASSWORD";
pub const ENV_DATABASE: &str = "SCANNER_DB_NAME";
pub const ENV_FONT_PATH: &str = "SCANNER_FONT_PATH";

/// Runtime configuration passed into each tool's entry point.
#[derive(Clone, PartialEq, Eq)]
pub struct Config {
    pub host: String,
    pub user: String,
    pub password: String,
    /// Path of the SQLite product database.
    pub database: String,
    pub output_dir: PathBuf,
    /// Preferred TTF/OTF font for captions and barcode digits.
    pub font_path: Option<PathBuf>,
}

impl Config {
    pub fn defaults(tool: Tool) -> Self {
        Self {
            host: "localhost".into(),
            user: "root".into(),
            password: "password".into(),
            database: "scanner_db.db".into(),
            output_dir: PathBuf::from(tool.default_output_dir()),
            font_path: None,
        }
    }

    /// Defaults, then environment variables, then command-line flags.
    pub fn load(tool: Tool, args: &ConfigArgs) -> Self {
        Self::defaults(tool)
            .with_overrides(tool, |key| std::env::var(key).ok())
            .with_args(args)
    }

    /// Apply overrides from a key lookup. Empty values are ignored.
    pub fn with_overrides<F>(mut self, tool: Tool, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.is_empty());

        if let Some(v) = get(ENV_HOST) {
            self.host = v;
        }
        if let Some(v) = get(ENV_USER) {
            self.user = v;
        }
        if let Some(v) = get(ENV_PASSWORD) {
            self.password = v;
        }
        if let Some(v) = get(ENV_DATABASE) {
            self.database = v;
        }
        if let Some(v) = get(tool.output_dir_env()) {
            self.output_dir = PathBuf::from(v);
        }
        if let Some(v) = get(ENV_FONT_PATH) {
            self.font_path = Some(PathBuf::from(v));
        }
        self
    }

    pub fn with_args(mut self, args: &ConfigArgs) -> Self {
        if let Some(v) = &args.host {
            self.host = v.clone();
        }
        if let Some(v) = &args.user {
            self.user = v.clone();
        }
        if let Some(v) = &args.password {
            self.password = v.clone();
        }
        if let Some(v) = &args.database {
            self.database = v.clone();
        }
        if let Some(v) = &args.output_dir {
            self.output_dir = v.clone();
        }
        if let Some(v) = &args.font {
            self.font_path = Some(v.clone());
        }
        self
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let password = if self.password.is_empty() { "" } else { "***" };
        f.debug_struct("Config")
            .field("host", &self.host)
            .field("user", &self.user)
            .field("password", &password)
            .field("database", &self.database)
            .field("output_dir", &self.output_dir)
            .field("font_path", &self.font_path)
            .finish()
    }
}

/// Command-line overrides shared by both tools.
#[derive(Debug, Default, Clone, clap::Args)]
pub struct ConfigArgs {
    /// Database host
    #[arg(long)]
    pub host: Option<String>,

    /// Database user
    #[arg(long)]
    pub user: Option<String>,

    /// Database password
    #[arg(long)]
    pub password: Option<String>,

    /// Product database (SQLite file path)
    #[arg(long)]
    pub database: Option<String>,

    /// Directory the images are written to
    #[arg(long)]
    pub output_dir: Option<PathBuf>,

    /// TTF/OTF font used for text
    #[arg(long)]
    pub font: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_match_tool() {
        let barcode = Config::defaults(Tool::BarcodeExporter);
        assert_eq!(barcode.host, "localhost");
        assert_eq!(barcode.user, "root");
        assert_eq!(barcode.database, "scanner_db.db");
        assert_eq!(barcode.output_dir, PathBuf::from("barcodes"));
        assert_eq!(
            Config::defaults(Tool::QrLabeler).output_dir,
            PathBuf::from("qrcodes")
        );
    }

    #[test]
    fn environment_overrides_defaults() {
        let config = Config::defaults(Tool::BarcodeExporter).with_overrides(
            Tool::BarcodeExporter,
            lookup(&[
                (ENV_HOST, "db.internal"),
                (ENV_DATABASE, "/var/lib/scanner.db"),
                ("SCANNER_BARCODE_DIR", "out/barcodes"),
                ("SCANNER_QR_DIR", "ignored"),
            ]),
        );
        assert_eq!(config.host, "db.internal");
        assert_eq!(config.database, "/var/lib/scanner.db");
        assert_eq!(config.output_dir, PathBuf::from("out/barcodes"));
        assert_eq!(config.user, "root");
    }

    #[test]
    fn empty_environment_values_are_ignored() {
        let config = Config::defaults(Tool::QrLabeler)
            .with_overrides(Tool::QrLabeler, lookup(&[(ENV_USER, ""), ("SCANNER_QR_DIR", "")]));
        assert_eq!(config.user, "root");
        assert_eq!(config.output_dir, PathBuf::from("qrcodes"));
    }

    #[test]
    fn args_win_over_environment() {
        let args = ConfigArgs {
            output_dir: Some(PathBuf::from("cli-dir")),
            font: Some(PathBuf::from("fonts/label.ttf")),
            ..Default::default()
        };
        let config = Config::defaults(Tool::QrLabeler)
            .with_overrides(Tool::QrLabeler, lookup(&[("SCANNER_QR_DIR", "env-dir")]))
            .with_args(&args);
        assert_eq!(config.output_dir, PathBuf::from("cli-dir"));
        assert_eq!(config.font_path, Some(PathBuf::from("fonts/label.ttf")));
    }

    #[test]
    fn debug_masks_password() {
        let rendered = format!("{:?}", Config::defaults(Tool::BarcodeExporter));
        assert!(rendered.contains("***"));
        assert!(!rendered.contains("\"password\""));
    }
}
