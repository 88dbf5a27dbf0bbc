//! Image preprocessing for OCR.

use std::io::Write;

use image::codecs::jpeg::JpegEncoder;
use image::{DynamicImage, GenericImageView};
use tracing::debug;

use crate::error::OcrError;
use crate::models::config::OcrConfig;

/// Prepares uploaded images for the recognition engine.
pub struct ImagePreprocessor {
    /// Images narrower than this are upscaled.
    upscale_below_width: u32,
    /// Upscale factor for narrow images.
    upscale_factor: u32,
    /// JPEG quality of the encoded output.
    jpeg_quality: u8,
}

impl ImagePreprocessor {
    /// Create a new preprocessor with default settings.
    pub fn new() -> Self {
        Self {
            upscale_below_width: 1000,
            upscale_factor: 2,
            jpeg_quality: 90,
        }
    }

    /// Create a preprocessor from OCR configuration.
    pub fn from_config(config: &OcrConfig) -> Self {
        Self::new()
            .with_upscale_below_width(config.upscale_below_width)
            .with_jpeg_quality(config.jpeg_quality)
    }

    /// Set the width below which images are upscaled.
    pub fn with_upscale_below_width(mut self, width: u32) -> Self {
        self.upscale_below_width = width;
        self
    }

    /// Set JPEG quality (clamped to 1..=100).
    pub fn with_jpeg_quality(mut self, quality: u8) -> Self {
        self.jpeg_quality = quality.clamp(1, 100);
        self
    }

    /// Flatten to RGB and upscale narrow images.
    pub fn prepare(&self, image: &DynamicImage) -> DynamicImage {
        let (width, height) = image.dimensions();
        debug!("Original image size: {}x{}", width, height);

        let rgb = if image.color().has_alpha() {
            DynamicImage::ImageRgb8(image.to_rgb8())
        } else {
            image.clone()
        };

        let (new_width, new_height) = self.calculate_dimensions(width, height);
        if (new_width, new_height) == (width, height) {
            return rgb;
        }

        debug!("Upscaling image to {}x{}", new_width, new_height);
        rgb.resize_exact(
            new_width,
            new_height,
            image::imageops::FilterType::Lanczos3,
        )
    }

    /// Encode a prepared image as JPEG into `writer`.
    pub fn encode_jpeg<W: Write>(&self, image: &DynamicImage, writer: W) -> Result<(), OcrError> {
        let rgb = image.to_rgb8();
        JpegEncoder::new_with_quality(writer, self.jpeg_quality)
            .encode_image(&rgb)
            .map_err(|e| OcrError::Preprocessing(format!("failed to encode JPEG: {}", e)))
    }

    fn calculate_dimensions(&self, width: u32, height: u32) -> (u32, u32) {
        if width == 0 || width >= self.upscale_below_width {
            return (width, height);
        }

        (width * self.upscale_factor, height * self.upscale_factor)
    }
}

impl Default for ImagePreprocessor {
    fn default() -> Self {
        Self::new()
    }
}
