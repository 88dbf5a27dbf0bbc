//! Export command - write text to a DOCX document.

use std::fs;
use std::path::PathBuf;

use clap::Args;
use console::style;

use archocr_core::DocxExporter;

use super::{load_config, read_input};

/// Arguments for the export command.
#[derive(Args)]
pub struct ExportArgs {
    /// Input text file (default: stdin)
    input: Option<PathBuf>,

    /// Output DOCX file
    #[arg(short, long, required = true)]
    output: PathBuf,

    /// Document heading
    #[arg(long)]
    title: Option<String>,
}

pub async fn run(args: ExportArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let config = load_config(config_path)?;

    let mut exporter = DocxExporter::from_config(&config.export);
    if let Some(title) = args.title {
        exporter = exporter.with_title(title);
    }

    let text = read_input(args.input.as_deref())?;
    let bytes = exporter.export(&text)?;
    fs::write(&args.output, bytes)?;

    println!(
        "{} Document written to {}",
        style("✓").green(),
        args.output.display()
    );

    Ok(())
}
