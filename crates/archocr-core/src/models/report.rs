//! Recognition report returned for an uploaded image.

use serde::{Deserialize, Serialize};

use super::entities::ExtractionResult;

/// Text shown when OCR produced nothing after cleanup.
pub const NO_TEXT_PLACEHOLDER: &str = "Текст не распознан";

/// Outcome of running one image through OCR and entity extraction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecognitionReport {
    /// Original file name, if the client sent one.
    pub filename: Option<String>,

    /// Content type declared by the client.
    pub content_type: String,

    /// Cleaned recognized text.
    pub text: String,

    /// Number of characters (Unicode scalar values) in `text`.
    pub characters_count: usize,

    /// Entities extracted from `text`.
    pub structured_data: ExtractionResult,

    /// Lowercase hex encoding of the uploaded bytes.
    pub image_data: Option<String>,

    /// Processing time in milliseconds.
    pub processing_time_ms: u64,
}

impl RecognitionReport {
    /// True when OCR produced no usable text.
    pub fn is_blank(&self) -> bool {
        self.text == NO_TEXT_PLACEHOLDER
    }
}
