//! Extract command - pull dates, names, and archive codes out of text.

use std::path::PathBuf;

use clap::Args;
use tracing::debug;

use archocr_core::{EntityExtractor, TextCleaner};

use super::{load_config, read_input};

/// Arguments for the extract command.
#[derive(Args)]
pub struct ExtractArgs {
    /// Input text file (default: stdin)
    input: Option<PathBuf>,

    /// Remove OCR noise lines before extraction
    #[arg(long)]
    clean: bool,

    /// Print individual matches with their positions
    #[arg(long)]
    matches: bool,
}

pub async fn run(args: ExtractArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let config = load_config(config_path)?;
    let extractor = EntityExtractor::from_config(&config.extraction)?;
    debug!("Loaded {} entity patterns", extractor.pattern_count());

    let mut text = read_input(args.input.as_deref())?;
    if args.clean {
        text = TextCleaner::from_config(&config.cleanup).clean(&text);
    }

    let output = if args.matches {
        serde_json::to_string_pretty(&extractor.find_matches(&text))?
    } else {
        serde_json::to_string_pretty(&extractor.extract(&text))?
    };

    println!("{}", output);
    Ok(())
}
