//! Error types for the archocr-core library.

use std::time::Duration;

use thiserror::Error;

/// Main error type for the archocr library.
#[derive(Error, Debug)]
pub enum ArchocrError {
    /// The uploaded content is not an image.
    #[error("unsupported content type: {0}")]
    UnsupportedMediaType(String),

    /// OCR processing error.
    #[error("OCR error: {0}")]
    Ocr(#[from] OcrError),

    /// Document export error.
    #[error("export error: {0}")]
    Export(#[from] ExportError),

    /// Image decoding error.
    #[error("image error: {0}")]
    Image(#[from] image::ImageError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),

    /// A user-supplied entity pattern failed to compile.
    #[error("invalid pattern {pattern:?}: {reason}")]
    InvalidPattern { pattern: String, reason: String },
}

/// Errors related to OCR processing.
#[derive(Error, Debug)]
pub enum OcrError {
    /// The recognition engine is missing or cannot be started.
    #[error("recognition engine unavailable: {0}")]
    EngineUnavailable(String),

    /// The recognition engine did not finish in time.
    #[error("recognition timed out after {0:?}")]
    Timeout(Duration),

    /// The recognition engine ran but reported a failure.
    #[error("recognition failed: {0}")]
    Failed(String),

    /// Image preprocessing failed.
    #[error("preprocessing failed: {0}")]
    Preprocessing(String),

    /// I/O error while talking to the engine.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors related to DOCX generation.
#[derive(Error, Debug)]
pub enum ExportError {
    /// Failed to assemble the document container.
    #[error("failed to write document container: {0}")]
    Zip(#[from] zip::result::ZipError),

    /// I/O error while writing document parts.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for the archocr library.
pub type Result<T> = std::result::Result<T, ArchocrError>;
