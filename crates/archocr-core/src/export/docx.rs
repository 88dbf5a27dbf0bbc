//! Minimal DOCX (Office Open XML) writer.

use std::io::{Cursor, Seek, Write};

use quick_xml::escape::escape;
use tracing::debug;
use zip::CompressionMethod;
use zip::ZipWriter;
use zip::write::SimpleFileOptions;

use crate::error::ExportError;
use crate::models::config::ExportConfig;

use super::paragraphs;

const CONTENT_TYPES_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types"><Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/><Default Extension="xml" ContentType="application/xml"/><Override PartName="/word/document.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml"/><Override PartName="/word/styles.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.styles+xml"/><Override PartName="/docProps/core.xml" ContentType="application/vnd.openxmlformats-package.core-properties+xml"/></Types>"#;

const PACKAGE_RELS_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="word/document.xml"/><Relationship Id="rId2" Type="http://schemas.openxmlformats.org/package/2006/relationships/metadata/core-properties" Target="docProps/core.xml"/></Relationships>"#;

const DOCUMENT_RELS_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/styles" Target="styles.xml"/></Relationships>"#;

const STYLES_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:styles xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><w:docDefaults><w:rPrDefault><w:rPr><w:rFonts w:ascii="Calibri" w:hAnsi="Calibri" w:cs="Calibri"/><w:sz w:val="22"/><w:lang w:val="ru-RU"/></w:rPr></w:rPrDefault><w:pPrDefault><w:pPr><w:spacing w:after="160" w:line="259" w:lineRule="auto"/></w:pPr></w:pPrDefault></w:docDefaults><w:style w:type="paragraph" w:default="1" w:styleId="Normal"><w:name w:val="Normal"/><w:qFormat/></w:style><w:style w:type="paragraph" w:styleId="Title"><w:name w:val="Title"/><w:basedOn w:val="Normal"/><w:next w:val="Normal"/><w:qFormat/><w:pPr><w:spacing w:after="240"/></w:pPr><w:rPr><w:rFonts w:ascii="Calibri Light" w:hAnsi="Calibri Light" w:cs="Calibri Light"/><w:kern w:val="28"/><w:sz w:val="56"/></w:rPr></w:style></w:styles>"#;

const SECTION_XML: &str = r#"<w:sectPr><w:pgSz w:w="11906" w:h="16838"/><w:pgMar w:top="1134" w:right="850" w:bottom="1134" w:left="1701" w:header="708" w:footer="708" w:gutter="0"/></w:sectPr>"#;

/// Writes text as a DOCX document: a title heading, then one paragraph per
/// non-blank line.
#[derive(Debug, Clone)]
pub struct DocxExporter {
    title: String,
}

impl DocxExporter {
    /// Create an exporter with the default title.
    pub fn new() -> Self {
        Self::from_config(&ExportConfig::default())
    }

    /// Create an exporter from configuration.
    pub fn from_config(config: &ExportConfig) -> Self {
        Self {
            title: config.title.clone(),
        }
    }

    /// Set the document title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// The document title.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Render `text` to DOCX bytes.
    pub fn export(&self, text: &str) -> Result<Vec<u8>, ExportError> {
        let cursor = self.write_to(text, Cursor::new(Vec::new()))?;
        let bytes = cursor.into_inner();
        debug!("Generated DOCX document ({} bytes)", bytes.len());
        Ok(bytes)
    }

    /// Render `text` as DOCX into `writer`, returning the writer.
    pub fn write_to<W: Write + Seek>(&self, text: &str, writer: W) -> Result<W, ExportError> {
        let mut zip = ZipWriter::new(writer);
        let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

        let document = self.document_xml(text);
        let core = self.core_properties_xml();

        let parts: [(&str, &str); 6] = [
            ("[Content_Types].xml", CONTENT_TYPES_XML),
            ("_rels/.rels", PACKAGE_RELS_XML),
            ("docProps/core.xml", &core),
            ("word/_rels/document.xml.rels", DOCUMENT_RELS_XML),
            ("word/styles.xml", STYLES_XML),
            ("word/document.xml", &document),
        ];

        for (name, content) in parts {
            zip.start_file(name, options)?;
            zip.write_all(content.as_bytes())?;
        }

        Ok(zip.finish()?)
    }

    fn document_xml(&self, text: &str) -> String {
        let mut body = String::new();
        body.push_str(&paragraph_xml(&self.title, Some("Title")));
        for line in paragraphs(text) {
            let line = line.strip_suffix('\r').unwrap_or(line);
            body.push_str(&paragraph_xml(line, None));
        }

        format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><w:body>{}{}</w:body></w:document>"#,
            body, SECTION_XML
        )
    }

    fn core_properties_xml(&self) -> String {
        format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<cp:coreProperties xmlns:cp="http://schemas.openxmlformats.org/package/2006/metadata/core-properties" xmlns:dc="http://purl.org/dc/elements/1.1/"><dc:title>{}</dc:title><dc:creator>archocr</dc:creator></cp:coreProperties>"#,
            escape_text(&self.title)
        )
    }
}

impl Default for DocxExporter {
    fn default() -> Self {
        Self::new()
    }
}

fn paragraph_xml(text: &str, style: Option<&str>) -> String {
    let properties = style
        .map(|s| format!(r#"<w:pPr><w:pStyle w:val="{}"/></w:pPr>"#, s))
        .unwrap_or_default();
    format!(
        r#"<w:p>{}<w:r><w:t xml:space="preserve">{}</w:t></w:r></w:p>"#,
        properties,
        escape_text(text)
    )
}

/// XML-escape text, dropping characters XML 1.0 cannot carry.
fn escape_text(text: &str) -> String {
    let cleaned: String = text
        .chars()
        .filter(|&c| {
            (matches!(c, '\t' | '\n' | '\r') || c >= ' ') && !matches!(c, '\u{FFFE}' | '\u{FFFF}')
        })
        .collect();
    escape(cleaned.as_str()).into_owned()
}
