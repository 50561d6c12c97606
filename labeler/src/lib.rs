//! Product labeling tools: EAN-13 barcode export from the product store and
//! interactive QR label generation.

pub mod bootstrap;
pub mod config;
pub mod exporter;
pub mod fonts;
pub mod qr_label;

/// File-name form of a product name: every space becomes an underscore.
pub fn underscore_spaces(name: &str) -> String {
    name.replace(' ', "_")
}
