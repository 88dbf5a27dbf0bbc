//! Configuration structures for the OCR pipeline and server.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::error::ArchocrError;
use crate::models::entities::EntityCategory;

/// Main configuration for archocr.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ArchocrConfig {
    /// OCR configuration.
    pub ocr: OcrConfig,

    /// Recognized text cleanup configuration.
    pub cleanup: CleanupConfig,

    /// Entity extraction configuration.
    pub extraction: ExtractionConfig,

    /// DOCX export configuration.
    pub export: ExportConfig,

    /// HTTP server configuration.
    pub server: ServerConfig,
}

/// OCR engine configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OcrConfig {
    /// Path or name of the tesseract binary.
    pub tesseract_path: PathBuf,

    /// Tesseract language pack(s), e.g. "rus" or "rus+eng".
    pub language: String,

    /// Tesseract page segmentation mode.
    pub psm: u8,

    /// Seconds to wait for tesseract before killing it.
    pub timeout_secs: u64,

    /// Images narrower than this are upscaled 2x before recognition.
    pub upscale_below_width: u32,

    /// JPEG quality of the intermediate image handed to tesseract.
    pub jpeg_quality: u8,
}

impl Default for OcrConfig {
    fn default() -> Self {
        Self {
            tesseract_path: PathBuf::from("tesseract"),
            language: "rus".to_string(),
            psm: 6,
            timeout_secs: 30,
            upscale_below_width: 1000,
            jpeg_quality: 90,
        }
    }
}

/// Recognized text cleanup configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CleanupConfig {
    /// Trimmed lines shorter than this many characters are dropped as noise.
    pub min_line_chars: usize,
}

impl Default for CleanupConfig {
    fn default() -> Self {
        Self { min_line_chars: 3 }
    }
}

/// Entity extraction configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Additional patterns appended after the built-in table.
    pub extra_patterns: Vec<CustomPattern>,
}

/// User-supplied entity pattern.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomPattern {
    /// Category the matches report into.
    pub category: EntityCategory,

    /// Label used in match listings. Defaults to the pattern source.
    #[serde(default)]
    pub label: Option<String>,

    /// Regular expression source.
    pub pattern: String,

    /// Match case-insensitively.
    #[serde(default = "default_true")]
    pub case_insensitive: bool,
}

fn default_true() -> bool {
    true
}

/// DOCX export configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    /// Heading placed at the top of every exported document.
    pub title: String,

    /// File name offered in the download response.
    pub filename: String,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            title: "Распознанный архивный документ".to_string(),
            filename: "document.docx".to_string(),
        }
    }
}

/// HTTP server configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Address to bind.
    pub host: String,

    /// Port to bind.
    pub port: u16,

    /// Origins allowed by CORS.
    pub cors_origins: Vec<String>,

    /// Maximum request body size in bytes.
    pub max_body_bytes: usize,

    /// Echo the uploaded bytes back as hex in upload responses.
    pub include_image_data: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8000,
            cors_origins: vec!["http://localhost".to_string()],
            max_body_bytes: 20 * 1024 * 1024,
            include_image_data: true,
        }
    }
}

impl ArchocrConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &std::path::Path) -> Result<Self, std::io::Error> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content).map_err(|e| {
            std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string())
        })
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &std::path::Path) -> Result<(), std::io::Error> {
        let content = serde_json::to_string_pretty(self).map_err(|e| {
            std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string())
        })?;
        std::fs::write(path, content)
    }

    /// Check values serde cannot rule out on its own.
    pub fn validate(&self) -> crate::error::Result<()> {
        if self.ocr.language.trim().is_empty() {
            return Err(ArchocrError::Config("ocr.language must not be empty".into()));
        }
        if self.ocr.psm > 13 {
            return Err(ArchocrError::Config(format!(
                "ocr.psm must be between 0 and 13, got {}",
                self.ocr.psm
            )));
        }
        if self.ocr.timeout_secs == 0 {
            return Err(ArchocrError::Config("ocr.timeout_secs must be positive".into()));
        }
        if self.server.max_body_bytes == 0 {
            return Err(ArchocrError::Config("server.max_body_bytes must be positive".into()));
        }
        Ok(())
    }

    /// Apply `ARCHOCR_*` environment variable overrides.
    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    /// Apply overrides from an arbitrary key lookup.
    ///
    /// Recognized keys: `ARCHOCR_HOST`, `ARCHOCR_PORT`, `ARCHOCR_CORS_ORIGINS`
    /// (comma-separated), `ARCHOCR_TESSERACT`, `ARCHOCR_LANGUAGE`.
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(host) = lookup("ARCHOCR_HOST") {
            self.server.host = host;
        }

        if let Some(port) = lookup("ARCHOCR_PORT") {
            match port.parse() {
                Ok(port) => self.server.port = port,
                Err(_) => tracing::warn!("Ignoring invalid ARCHOCR_PORT='{}'", port),
            }
        }

        if let Some(origins) = lookup("ARCHOCR_CORS_ORIGINS") {
            self.server.cors_origins = origins
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(String::from)
                .collect();
        }

        if let Some(path) = lookup("ARCHOCR_TESSERACT") {
            self.ocr.tesseract_path = PathBuf::from(path);
        }

        if let Some(language) = lookup("ARCHOCR_LANGUAGE") {
            self.ocr.language = language;
        }
    }
}
