use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;

mod render;

/// Parse a photographed receipt's OCR output into items and summary fields.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Opts {
    /// Path to a saved OCR text-detection JSON response for one receipt.
    response: PathBuf,

    /// Print the parsed receipt as pretty JSON instead of a table.
    #[arg(long)]
    raw: bool,

    /// Compare the computed item total against the printed subtotal.
    #[arg(long)]
    check: bool,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let opts = Opts::parse();
    print!("{}", run(&opts)?);
    Ok(())
}

fn run(opts: &Opts) -> anyhow::Result<String> {
    let json = std::fs::read_to_string(&opts.response)
        .with_context(|| format!("reading {}", opts.response.display()))?;
    let response = divvi_ocr::parse_response(&json)?;
    let lines = divvi_ocr::extract_lines(&response)?;
    let receipt = divvi_ocr::parse_receipt(&lines);

    tracing::info!(
        items = receipt.items.len(),
        special_fields = receipt.special_fields.len(),
        "receipt parsed"
    );

    let mut out = if opts.raw {
        let mut json = serde_json::to_string_pretty(&receipt)?;
        json.push('\n');
        json
    } else {
        render::receipt_table(&lines, &receipt)
    };

    if opts.check {
        out.push_str(&render::check_report(&receipt));
    }

    Ok(out)
}
