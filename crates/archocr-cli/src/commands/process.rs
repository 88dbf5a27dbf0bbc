//! Process command - recognize a single scanned image.

use std::fs;
use std::path::PathBuf;
use std::time::Instant;

use clap::Args;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, info};

use archocr_core::{EntityCategory, RecognitionReport, Upload};

use super::{build_processor, content_type_for, load_config};

/// Arguments for the process command.
#[derive(Args)]
pub struct ProcessArgs {
    /// Input image
    #[arg(required = true)]
    input: PathBuf,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Leave the hex-encoded image out of the report
    #[arg(long)]
    no_image_data: bool,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output
    Json,
    /// CSV output
    Csv,
    /// Plain text summary
    Text,
}

impl OutputFormat {
    /// File extension for outputs in this format.
    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Json => "json",
            OutputFormat::Csv => "csv",
            OutputFormat::Text => "txt",
        }
    }
}

pub async fn run(args: ProcessArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();
    let config = load_config(config_path)?;

    if !args.input.exists() {
        anyhow::bail!("Input file not found: {}", args.input.display());
    }

    let content_type = content_type_for(&args.input);
    if !content_type.starts_with("image/") {
        anyhow::bail!("Unsupported file format: {}", args.input.display());
    }

    let mut processor = build_processor(&config)?;
    if args.no_image_data {
        processor = processor.with_image_data(false);
    }

    info!("Processing file: {}", args.input.display());

    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} [{elapsed_precise}] {msg}")
            .unwrap(),
    );
    pb.enable_steady_tick(std::time::Duration::from_millis(100));
    pb.set_message("Running OCR...");

    let data = fs::read(&args.input)?;
    let filename = args
        .input
        .file_name()
        .and_then(|s| s.to_str())
        .map(String::from);

    let result = processor
        .process(Upload::new(filename, content_type, data))
        .await;
    pb.finish_and_clear();
    let report = result?;

    let output = format_report(&report, args.format)?;

    if let Some(output_path) = &args.output {
        fs::write(output_path, &output)?;
        println!(
            "{} Output written to {}",
            style("✓").green(),
            output_path.display()
        );
    } else {
        println!("{}", output);
    }

    debug!("Total processing time: {:?}", start.elapsed());

    Ok(())
}

/// Render a report in the requested format.
pub fn format_report(report: &RecognitionReport, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(report)?),
        OutputFormat::Csv => format_csv(report),
        OutputFormat::Text => Ok(format_text(report)),
    }
}

fn format_csv(report: &RecognitionReport) -> anyhow::Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);

    wtr.write_record([
        "filename",
        "characters_count",
        "dates",
        "names",
        "archive_codes",
        "places",
        "processing_time_ms",
        "text",
    ])?;

    let entities = &report.structured_data;
    wtr.write_record([
        report.filename.as_deref().unwrap_or(""),
        &report.characters_count.to_string(),
        &entities.dates.join("; "),
        &entities.names.join("; "),
        &entities.archive_codes.join("; "),
        &entities.places.join("; "),
        &report.processing_time_ms.to_string(),
        &report.text,
    ])?;

    let data = String::from_utf8(wtr.into_inner()?)?;
    Ok(data)
}

fn format_text(report: &RecognitionReport) -> String {
    let mut output = String::new();

    if let Some(filename) = &report.filename {
        output.push_str(&format!("File: {}\n", filename));
    }
    output.push_str(&format!(
        "Characters: {} ({}ms)\n\n",
        report.characters_count, report.processing_time_ms
    ));

    output.push_str(&report.text);
    output.push_str("\n\n");

    for category in EntityCategory::ALL {
        let values = report.structured_data.get(category);
        if values.is_empty() {
            continue;
        }
        output.push_str(&format!("{}:\n", category.field_name()));
        for value in values {
            output.push_str(&format!("  - {}\n", value));
        }
    }

    output
}
