//! Core library for archival document OCR.
//!
//! This crate provides:
//! - Entity extraction (dates, names, archive codes) from recognized text
//! - OCR noise cleanup
//! - OCR pipeline backed by the `tesseract` binary
//! - DOCX export of edited text

pub mod entities;
pub mod error;
pub mod export;
pub mod models;
pub mod ocr;
pub mod pipeline;
pub mod text;

pub use entities::{EntityExtractor, extract_entities};
pub use error::{ArchocrError, ExportError, OcrError, Result};
pub use export::DocxExporter;
pub use models::config::ArchocrConfig;
pub use models::entities::{EntityCategory, EntityMatch, ExtractionResult};
pub use models::report::RecognitionReport;
pub use ocr::{OcrEngine, OcrResult};
#[cfg(feature = "native")]
pub use ocr::TesseractEngine;
pub use pipeline::{DocumentProcessor, Upload};
pub use text::{TextCleaner, clean_recognized_text};
