//! Shared state and request/response bodies.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use archocr_core::models::config::ArchocrConfig;
use archocr_core::{DocumentProcessor, DocxExporter, OcrEngine, TesseractEngine};

/// State shared by all handlers.
#[derive(Clone)]
pub struct AppState {
    pub processor: Arc<DocumentProcessor>,
    pub exporter: Arc<DocxExporter>,
    /// File name offered for DOCX downloads.
    pub export_filename: Arc<str>,
}

impl AppState {
    pub fn new(processor: DocumentProcessor, exporter: DocxExporter) -> Self {
        Self {
            processor: Arc::new(processor),
            exporter: Arc::new(exporter),
            export_filename: Arc::from("document.docx"),
        }
    }

    /// Build state around a tesseract engine configured from `config`.
    pub fn from_config(config: &ArchocrConfig) -> archocr_core::Result<Self> {
        let engine: Arc<dyn OcrEngine> = Arc::new(TesseractEngine::from_config(&config.ocr));
        Self::with_engine(engine, config)
    }

    /// Build state around an arbitrary engine.
    pub fn with_engine(engine: Arc<dyn OcrEngine>, config: &ArchocrConfig) -> archocr_core::Result<Self> {
        let processor = DocumentProcessor::from_config(engine, config)?;
        let exporter = DocxExporter::from_config(&config.export);

        Ok(Self::new(processor, exporter).with_export_filename(&config.export.filename))
    }

    pub fn with_export_filename(mut self, filename: &str) -> Self {
        self.export_filename = Arc::from(filename);
        self
    }
}

/// Body of `GET /`.
#[derive(Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

/// Body of `GET /health`.
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
}

/// Error body.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Form body of `POST /export`.
#[derive(Debug, Deserialize)]
pub struct ExportRequest {
    pub text: String,
}

/// JSON body of `POST /extract`.
#[derive(Debug, Deserialize)]
pub struct ExtractRequest {
    pub text: String,
    /// Run OCR noise cleanup before extraction.
    #[serde(default)]
    pub clean: bool,
}
