//! CLI subcommands.

pub mod batch;
pub mod config;
pub mod export;
pub mod extract;
pub mod process;
pub mod serve;

use std::io::Read;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::debug;

use archocr_core::models::config::ArchocrConfig;
use archocr_core::{DocumentProcessor, OcrEngine, TesseractEngine};

/// Image extensions accepted by `process` and `batch`.
pub const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "tif", "tiff", "bmp", "gif", "webp"];

/// Default configuration file location.
pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("archocr")
        .join("config.json")
}

/// Load configuration from `path`, the default location, or defaults, then
/// apply `ARCHOCR_*` environment overrides.
pub fn load_config(path: Option<&str>) -> anyhow::Result<ArchocrConfig> {
    let mut config = match path {
        Some(path) => ArchocrConfig::from_file(Path::new(path))?,
        None => {
            let default_path = default_config_path();
            if default_path.exists() {
                debug!("Loading config from {}", default_path.display());
                ArchocrConfig::from_file(&default_path)?
            } else {
                ArchocrConfig::default()
            }
        }
    };

    config.apply_env_overrides();
    Ok(config)
}

/// Build a tesseract-backed processor, failing early if the binary is missing.
pub fn build_processor(config: &ArchocrConfig) -> anyhow::Result<DocumentProcessor> {
    let engine = TesseractEngine::from_config(&config.ocr);
    if !engine.is_available() {
        anyhow::bail!(
            "tesseract not found at '{}'.\n\n\
             Install tesseract with the '{}' language data, or set ocr.tesseract_path \
             (ARCHOCR_TESSERACT).",
            config.ocr.tesseract_path.display(),
            config.ocr.language
        );
    }

    Ok(DocumentProcessor::from_config(Arc::new(engine), config)?)
}

/// Read text from a file, or from stdin when no file is given.
pub fn read_input(input: Option<&Path>) -> anyhow::Result<String> {
    match input {
        Some(path) => Ok(std::fs::read_to_string(path)?),
        None => {
            let mut text = String::new();
            std::io::stdin().read_to_string(&mut text)?;
            Ok(text)
        }
    }
}

/// Guess a MIME type from the file extension.
pub fn content_type_for(path: &Path) -> &'static str {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();

    match extension.as_str() {
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "tif" | "tiff" => "image/tiff",
        "bmp" => "image/bmp",
        "gif" => "image/gif",
        "webp" => "image/webp",
        _ => "application/octet-stream",
    }
}

/// Whether the path has a supported image extension.
pub fn is_image_path(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| IMAGE_EXTENSIONS.contains(&e.to_lowercase().as_str()))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_type_for() {
        assert_eq!(content_type_for(Path::new("scan.PNG")), "image/png");
        assert_eq!(content_type_for(Path::new("a/b/scan.jpeg")), "image/jpeg");
        assert_eq!(content_type_for(Path::new("scan.tif")), "image/tiff");
        assert_eq!(content_type_for(Path::new("notes.txt")), "application/octet-stream");
        assert_eq!(content_type_for(Path::new("noext")), "application/octet-stream");
    }

    #[test]
    fn test_is_image_path() {
        assert!(is_image_path(Path::new("scan.JPG")));
        assert!(!is_image_path(Path::new("scan.pdf")));
        assert!(!is_image_path(Path::new("scan")));
    }
}
