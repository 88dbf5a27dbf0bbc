//! Export of edited text to word-processing documents.

mod docx;

pub use docx::DocxExporter;

/// MIME type of generated documents.
pub const DOCX_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document";

/// Split text into paragraphs: one per line whose trimmed form is non-empty.
///
/// Lines are kept untrimmed.
pub fn paragraphs(text: &str) -> impl Iterator<Item = &str> {
    text.split('\n').filter(|line| !line.trim().is_empty())
}
