//! Tesseract OCR engine.
//!
//! Runs the `tesseract` command-line tool on a temporary JPEG copy of the
//! image and reads the recognized text from stdout.

use std::ffi::OsString;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use image::{DynamicImage, GenericImageView};
use tokio::process::Command;
use tracing::{debug, info, warn};

use crate::error::OcrError;
use crate::models::config::OcrConfig;

use super::{ImagePreprocessor, OcrEngine, OcrResult};

/// OCR engine that shells out to the tesseract binary.
pub struct TesseractEngine {
    binary: PathBuf,
    language: String,
    psm: u8,
    timeout: Duration,
    preprocessor: ImagePreprocessor,
}

impl TesseractEngine {
    /// Create an engine with default settings (`tesseract -l rus --psm 6`, 30 s).
    pub fn new() -> Self {
        Self::from_config(&OcrConfig::default())
    }

    /// Create an engine from OCR configuration.
    pub fn from_config(config: &OcrConfig) -> Self {
        Self {
            binary: config.tesseract_path.clone(),
            language: config.language.clone(),
            psm: config.psm,
            timeout: Duration::from_secs(config.timeout_secs),
            preprocessor: ImagePreprocessor::from_config(config),
        }
    }

    /// Set the tesseract binary path.
    pub fn with_binary(mut self, binary: impl Into<PathBuf>) -> Self {
        self.binary = binary.into();
        self
    }

    /// Set the language pack(s).
    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }

    /// Set the page segmentation mode.
    pub fn with_psm(mut self, psm: u8) -> Self {
        self.psm = psm;
        self
    }

    /// Set the time limit for one recognition run.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    fn command_args(&self, image_path: &Path) -> Vec<OsString> {
        vec![
            image_path.as_os_str().to_os_string(),
            "stdout".into(),
            "-l".into(),
            self.language.clone().into(),
            "--psm".into(),
            self.psm.to_string().into(),
        ]
    }

    /// Run tesseract on an image file.
    async fn run_tesseract(&self, image_path: &Path) -> Result<String, OcrError> {
        let child = Command::new(&self.binary)
            .args(self.command_args(image_path))
            .stdin(Stdio::null())
            .kill_on_drop(true)
            .output();

        let output = match tokio::time::timeout(self.timeout, child).await {
            Ok(output) => output,
            Err(_) => {
                warn!("tesseract exceeded {:?}, killed", self.timeout);
                return Err(OcrError::Timeout(self.timeout));
            }
        };

        match output {
            Ok(output) if output.status.success() => {
                Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
            }
            Ok(output) => {
                let stderr = String::from_utf8_lossy(&output.stderr);
                Err(OcrError::Failed(format!("tesseract failed: {}", stderr.trim())))
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Err(OcrError::EngineUnavailable(
                format!("{} not found (install tesseract-ocr)", self.binary.display()),
            )),
            Err(e) => Err(OcrError::Io(e)),
        }
    }
}

impl Default for TesseractEngine {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl OcrEngine for TesseractEngine {
    fn name(&self) -> &str {
        "tesseract"
    }

    fn is_available(&self) -> bool {
        std::process::Command::new(&self.binary)
            .arg("--version")
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .is_ok()
    }

    async fn recognize(&self, image: &DynamicImage) -> Result<OcrResult, OcrError> {
        let start = Instant::now();
        let prepared = self.preprocessor.prepare(image);
        let (width, height) = prepared.dimensions();

        let mut temp = tempfile::Builder::new()
            .prefix("archocr-")
            .suffix(".jpg")
            .tempfile()?;
        {
            let mut writer = BufWriter::new(temp.as_file_mut());
            self.preprocessor.encode_jpeg(&prepared, &mut writer)?;
            writer.flush()?;
        }
        debug!("Wrote OCR input to {}", temp.path().display());

        let text = self.run_tesseract(temp.path()).await?;
        let processing_time_ms = start.elapsed().as_millis() as u64;

        info!(
            "tesseract recognized {} chars from {}x{} image in {}ms",
            text.chars().count(),
            width,
            height,
            processing_time_ms
        );

        Ok(OcrResult {
            text,
            processing_time_ms,
            image_size: (width, height),
        })
    }
}
