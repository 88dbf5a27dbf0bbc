//! WASM bindings for archival document text processing.
//!
//! OCR runs server-side; these bindings let a browser clean edited text,
//! highlight entities, and build the DOCX download locally.

use serde::Serialize;
use wasm_bindgen::prelude::*;

use archocr_core::export::DOCX_CONTENT_TYPE;
use archocr_core::{DocxExporter, ExtractionResult, TextCleaner, extract_entities as extract};

/// Initialize panic hook for better error messages in console.
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// Version information.
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

fn to_js<T: Serialize>(value: &T) -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(value).map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Remove OCR noise lines (blank or shorter than three characters).
#[wasm_bindgen]
pub fn clean_text(text: &str) -> String {
    archocr_core::clean_recognized_text(text)
}

/// Extract dates, names, archive codes, and places from text.
///
/// Returns `{dates, names, archive_codes, places}`.
#[wasm_bindgen]
pub fn extract_entities(text: &str) -> Result<JsValue, JsValue> {
    to_js(&extract(text))
}

/// Find individual entity matches with their byte offsets, for highlighting.
#[wasm_bindgen]
pub fn find_entities(text: &str) -> Result<JsValue, JsValue> {
    let extractor = archocr_core::EntityExtractor::new();
    to_js(&extractor.find_matches(text))
}

/// Render text as a DOCX document.
#[wasm_bindgen]
pub fn export_docx(text: &str, title: Option<String>) -> Result<Vec<u8>, JsValue> {
    let mut exporter = DocxExporter::new();
    if let Some(title) = title {
        exporter = exporter.with_title(title);
    }

    exporter
        .export(text)
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

/// MIME type to use for the DOCX `Blob`.
#[wasm_bindgen]
pub fn docx_content_type() -> String {
    DOCX_CONTENT_TYPE.to_string()
}

/// Output of [`TextProcessor::process`].
#[derive(Serialize)]
struct ProcessedText {
    text: String,
    characters_count: usize,
    structured_data: ExtractionResult,
}

/// Cleanup and extraction with a configurable noise threshold.
#[wasm_bindgen]
pub struct TextProcessor {
    cleaner: TextCleaner,
}

#[wasm_bindgen]
impl TextProcessor {
    /// Create a processor. Lines shorter than `min_line_chars` (default 3)
    /// are dropped during cleanup.
    #[wasm_bindgen(constructor)]
    pub fn new(min_line_chars: Option<usize>) -> Self {
        let cleaner = match min_line_chars {
            Some(min) => TextCleaner::new().with_min_line_chars(min),
            None => TextCleaner::new(),
        };
        Self { cleaner }
    }

    /// Change the noise threshold.
    #[wasm_bindgen]
    pub fn set_min_line_chars(&mut self, min_line_chars: usize) {
        self.cleaner = TextCleaner::new().with_min_line_chars(min_line_chars);
    }

    /// Clean text.
    #[wasm_bindgen]
    pub fn clean(&self, text: &str) -> String {
        self.cleaner.clean(text)
    }

    /// Clean text, then extract entities from the cleaned text.
    ///
    /// Returns `{text, characters_count, structured_data}`.
    #[wasm_bindgen]
    pub fn process(&self, text: &str) -> Result<JsValue, JsValue> {
        to_js(&self.process_text(text))
    }
}

impl TextProcessor {
    fn process_text(&self, text: &str) -> ProcessedText {
        let text = self.cleaner.clean(text);
        ProcessedText {
            characters_count: text.chars().count(),
            structured_data: extract(&text),
            text,
        }
    }
}

impl Default for TextProcessor {
    fn default() -> Self {
        Self::new(None)
    }
}
