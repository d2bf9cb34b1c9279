// Prints the status code registry as JSON.
// Usage: cargo run --bin status_table_export [--variants]

use anyhow::{Context, Result};

use status_errors::api::handlers::{StatusCodeEntry, VariantEntry};
use status_errors::errors::variants;
use status_errors::status;

fn main() -> Result<()> {
    let with_variants = std::env::args().skip(1).any(|arg| arg == "--variants");

    let codes: Vec<StatusCodeEntry> = status::init()
        .codes()
        .into_iter()
        .map(StatusCodeEntry::from)
        .collect();

    let output = if with_variants {
        let catalog: Vec<VariantEntry> = variants::CATALOG.iter().map(VariantEntry::from).collect();
        serde_json::json!({ "status_codes": codes, "variants": catalog })
    } else {
        serde_json::json!(codes)
    };

    let rendered = serde_json::to_string_pretty(&output).context("Failed to render registry")?;
    println!("{}", rendered);

    Ok(())
}
