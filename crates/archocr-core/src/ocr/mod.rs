//! OCR pipeline backed by an external recognition engine.

mod preprocessing;
#[cfg(feature = "native")]
mod tesseract;

pub use preprocessing::ImagePreprocessor;
#[cfg(feature = "native")]
pub use tesseract::TesseractEngine;

use async_trait::async_trait;
use image::DynamicImage;
use serde::{Deserialize, Serialize};

use crate::error::OcrError;

/// Result of OCR processing on an image.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OcrResult {
    /// Raw recognized text, before cleanup.
    pub text: String,

    /// Processing time in milliseconds.
    pub processing_time_ms: u64,

    /// Dimensions (width, height) of the image handed to the engine.
    pub image_size: (u32, u32),
}

/// A text recognition engine.
#[async_trait]
pub trait OcrEngine: Send + Sync {
    /// Short engine name for logs.
    fn name(&self) -> &str;

    /// Whether the engine can run on this host.
    fn is_available(&self) -> bool;

    /// Recognize the text in `image`.
    async fn recognize(&self, image: &DynamicImage) -> Result<OcrResult, OcrError>;
}
