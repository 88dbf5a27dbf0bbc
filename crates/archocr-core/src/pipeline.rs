//! Recognition pipeline: image upload to structured report.

use std::sync::Arc;
use std::time::Instant;

use tracing::{debug, info};

use crate::entities::EntityExtractor;
use crate::error::{ArchocrError, Result};
use crate::models::config::ArchocrConfig;
use crate::models::report::{NO_TEXT_PLACEHOLDER, RecognitionReport};
use crate::ocr::OcrEngine;
use crate::text::TextCleaner;

/// An uploaded file.
#[derive(Debug, Clone)]
pub struct Upload {
    /// Original file name, if known.
    pub filename: Option<String>,
    /// Declared content type.
    pub content_type: String,
    /// Raw file bytes.
    pub data: Vec<u8>,
}

impl Upload {
    pub fn new(filename: Option<String>, content_type: impl Into<String>, data: Vec<u8>) -> Self {
        Self {
            filename,
            content_type: content_type.into(),
            data,
        }
    }

    /// Whether the declared content type is an image type.
    pub fn is_image(&self) -> bool {
        self.content_type.starts_with("image/")
    }
}

/// Runs uploads through OCR, cleanup, and entity extraction.
pub struct DocumentProcessor {
    engine: Arc<dyn OcrEngine>,
    cleaner: TextCleaner,
    extractor: EntityExtractor,
    include_image_data: bool,
}

impl DocumentProcessor {
    /// Create a processor with default cleanup and extraction.
    pub fn new(engine: Arc<dyn OcrEngine>) -> Self {
        Self {
            engine,
            cleaner: TextCleaner::new(),
            extractor: EntityExtractor::new(),
            include_image_data: true,
        }
    }

    /// Create a processor from configuration.
    pub fn from_config(engine: Arc<dyn OcrEngine>, config: &ArchocrConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            engine,
            cleaner: TextCleaner::from_config(&config.cleanup),
            extractor: EntityExtractor::from_config(&config.extraction)?,
            include_image_data: config.server.include_image_data,
        })
    }

    /// Set the text cleaner.
    pub fn with_cleaner(mut self, cleaner: TextCleaner) -> Self {
        self.cleaner = cleaner;
        self
    }

    /// Set the entity extractor.
    pub fn with_extractor(mut self, extractor: EntityExtractor) -> Self {
        self.extractor = extractor;
        self
    }

    /// Echo uploaded bytes as hex in reports.
    pub fn with_image_data(mut self, include: bool) -> Self {
        self.include_image_data = include;
        self
    }

    /// The OCR engine in use.
    pub fn engine(&self) -> &dyn OcrEngine {
        self.engine.as_ref()
    }

    /// The text cleaner in use.
    pub fn cleaner(&self) -> &TextCleaner {
        &self.cleaner
    }

    /// The entity extractor in use.
    pub fn extractor(&self) -> &EntityExtractor {
        &self.extractor
    }

    /// Process one uploaded image.
    pub async fn process(&self, upload: Upload) -> Result<RecognitionReport> {
        let start = Instant::now();

        if !upload.is_image() {
            return Err(ArchocrError::UnsupportedMediaType(upload.content_type));
        }

        let image = image::load_from_memory(&upload.data)?;
        debug!(
            "Decoded {} ({} bytes) as {:?}",
            upload.filename.as_deref().unwrap_or("<unnamed>"),
            upload.data.len(),
            image.color()
        );

        let ocr = self.engine.recognize(&image).await?;
        let report = self.build_report(upload, &ocr.text, start);

        info!(
            "Processed {} with {}: {} chars, {} entities",
            report.filename.as_deref().unwrap_or("<unnamed>"),
            self.engine.name(),
            report.characters_count,
            report.structured_data.len()
        );

        Ok(report)
    }

    fn build_report(&self, upload: Upload, raw_text: &str, start: Instant) -> RecognitionReport {
        let mut text = self.cleaner.clean(raw_text);
        if text.is_empty() {
            text = NO_TEXT_PLACEHOLDER.to_string();
        }

        let structured_data = self.extractor.extract(&text);
        let image_data = self.include_image_data.then(|| hex::encode(&upload.data));

        RecognitionReport {
            filename: upload.filename,
            content_type: upload.content_type,
            characters_count: text.chars().count(),
            text,
            structured_data,
            image_data,
            processing_time_ms: start.elapsed().as_millis() as u64,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    use async_trait::async_trait;
    use image::{DynamicImage, GenericImageView, ImageFormat};
    use pretty_assertions::assert_eq;

    use crate::error::OcrError;
    use crate::models::config::CustomPattern;
    use crate::models::entities::EntityCategory;
    use crate::ocr::OcrResult;

    struct StaticEngine(&'static str);

    #[async_trait]
    impl OcrEngine for StaticEngine {
        fn name(&self) -> &str {
            "static"
        }

        fn is_available(&self) -> bool {
            true
        }

        async fn recognize(&self, image: &DynamicImage) -> std::result::Result<OcrResult, OcrError> {
            Ok(OcrResult {
                text: self.0.to_string(),
                processing_time_ms: 0,
                image_size: image.dimensions(),
            })
        }
    }

    fn png_bytes() -> Vec<u8> {
        let mut buffer = Cursor::new(Vec::new());
        DynamicImage::new_rgb8(4, 4)
            .write_to(&mut buffer, ImageFormat::Png)
            .unwrap();
        buffer.into_inner()
    }

    #[tokio::test]
    async fn test_process_cleans_and_extracts() {
        let processor = DocumentProcessor::new(Arc::new(StaticEngine(
            "  ГАРФ. Ф. 25, оп. 3, д. 117  \n|\nИванов Петр Сергеевич\n15 марта 1925\n",
        )));
        let data = png_bytes();

        let report = processor
            .process(Upload::new(Some("scan.png".into()), "image/png", data.clone()))
            .await
            .unwrap();

        assert_eq!(
            report.text,
            "ГАРФ. Ф. 25, оп. 3, д. 117\nИванов Петр Сергеевич\n15 марта 1925"
        );
        assert_eq!(report.characters_count, report.text.chars().count());
        assert_eq!(report.structured_data.archive_codes, vec!["Ф. 25", "оп. 3", "д. 117"]);
        assert_eq!(report.structured_data.names, vec!["Иванов Петр Сергеевич"]);
        assert_eq!(report.structured_data.dates, vec!["15 марта 1925"]);
        assert_eq!(report.filename.as_deref(), Some("scan.png"));
        assert_eq!(report.image_data, Some(hex::encode(&data)));
    }

    #[tokio::test]
    async fn test_rejects_non_image() {
        let processor = DocumentProcessor::new(Arc::new(StaticEngine("text")));

        let err = processor
            .process(Upload::new(None, "application/pdf", b"%PDF-1.4".to_vec()))
            .await
            .unwrap_err();

        assert!(matches!(err, ArchocrError::UnsupportedMediaType(ct) if ct == "application/pdf"));
    }

    #[tokio::test]
    async fn test_rejects_undecodable_image() {
        let processor = DocumentProcessor::new(Arc::new(StaticEngine("text")));

        let err = processor
            .process(Upload::new(None, "image/png", b"not a png".to_vec()))
            .await
            .unwrap_err();

        assert!(matches!(err, ArchocrError::Image(_)));
    }

    #[tokio::test]
    async fn test_blank_text_uses_placeholder() {
        let processor =
            DocumentProcessor::new(Arc::new(StaticEngine(" a \n\n"))).with_image_data(false);

        let report = processor
            .process(Upload::new(None, "image/png", png_bytes()))
            .await
            .unwrap();

        assert!(report.is_blank());
        assert_eq!(report.text, NO_TEXT_PLACEHOLDER);
        assert_eq!(report.characters_count, 18);
        assert!(report.structured_data.is_empty());
        assert!(report.image_data.is_none());
    }

    #[test]
    fn test_from_config_validates() {
        let mut config = ArchocrConfig::default();
        config.ocr.psm = 42;

        let result = DocumentProcessor::from_config(Arc::new(StaticEngine("")), &config);
        assert!(matches!(result, Err(ArchocrError::Config(_))));
    }

    #[tokio::test]
    async fn test_custom_cleaner_and_extractor() {
        let extractor = EntityExtractor::new()
            .with_extra_patterns(&[CustomPattern {
                category: EntityCategory::Place,
                label: Some("city".to_string()),
                pattern: r"г\.\s*[А-ЯЁ][а-яё]+".to_string(),
                case_insensitive: false,
            }])
            .unwrap();
        let processor = DocumentProcessor::new(Arc::new(StaticEngine("л. 1\nг. Тверь\nab")))
            .with_cleaner(TextCleaner::new().with_min_line_chars(2))
            .with_extractor(extractor)
            .with_image_data(false);

        assert_eq!(processor.cleaner().clean("a\nab"), "ab");
        assert_eq!(processor.extractor().pattern_count(), 10);

        let report = processor
            .process(Upload::new(None, "image/jpeg", png_bytes()))
            .await
            .unwrap();

        assert_eq!(report.text, "л. 1\nг. Тверь\nab");
        assert_eq!(report.structured_data.places, vec!["г. Тверь"]);
    }
}
