//! DOCX Export - WordprocessingML package writer
//!
//! Serializes a [`GeneratedDocument`] into a minimal Office Open XML
//! package held entirely in memory.

use std::io::{Cursor, Write};

use tracing::debug;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use crate::document::{Block, GeneratedDocument};
use crate::pipeline::ExportError;

pub const DOCX_MIME: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document";

const XML_DECL: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#;
const W_NS: &str = "http://schemas.openxmlformats.org/wordprocessingml/2006/main";

const CONTENT_TYPES: &str = concat!(
    r#"<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">"#,
    r#"<Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/>"#,
    r#"<Default Extension="xml" ContentType="application/xml"/>"#,
    r#"<Override PartName="/word/document.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml"/>"#,
    r#"<Override PartName="/word/styles.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.styles+xml"/>"#,
    r#"<Override PartName="/docProps/core.xml" ContentType="application/vnd.openxmlformats-package.core-properties+xml"/>"#,
    r#"</Types>"#,
);

const PACKAGE_RELS: &str = concat!(
    r#"<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">"#,
    r#"<Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="word/document.xml"/>"#,
    r#"<Relationship Id="rId2" Type="http://schemas.openxmlformats.org/package/2006/relationships/metadata/core-properties" Target="docProps/core.xml"/>"#,
    r#"</Relationships>"#,
);

const DOCUMENT_RELS: &str = concat!(
    r#"<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">"#,
    r#"<Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/styles" Target="styles.xml"/>"#,
    r#"</Relationships>"#,
);

const STYLES: &str = concat!(
    r#"<w:styles xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main">"#,
    r#"<w:docDefaults><w:rPrDefault><w:rPr>"#,
    r#"<w:rFonts w:ascii="Calibri" w:hAnsi="Calibri" w:cs="Calibri"/><w:sz w:val="22"/><w:lang w:val="pt-BR"/>"#,
    r#"</w:rPr></w:rPrDefault></w:docDefaults>"#,
    r#"<w:style w:type="paragraph" w:default="1" w:styleId="Normal"><w:name w:val="Normal"/><w:qFormat/></w:style>"#,
    r#"<w:style w:type="paragraph" w:styleId="Heading1"><w:name w:val="heading 1"/>"#,
    r#"<w:basedOn w:val="Normal"/><w:next w:val="Normal"/><w:qFormat/>"#,
    r#"<w:pPr><w:keepNext/><w:spacing w:before="480" w:after="0"/><w:outlineLvl w:val="0"/></w:pPr>"#,
    r#"<w:rPr><w:b/><w:color w:val="365F91"/><w:sz w:val="28"/></w:rPr></w:style>"#,
    r#"</w:styles>"#,
);

// A4 with 2.54 cm margins.
const SECTION_PROPERTIES: &str = concat!(
    r#"<w:sectPr><w:pgSz w:w="11906" w:h="16838"/>"#,
    r#"<w:pgMar w:top="1440" w:right="1440" w:bottom="1440" w:left="1440" w:header="708" w:footer="708" w:gutter="0"/>"#,
    r#"</w:sectPr>"#,
);

/// Writes structured documents as `.docx` byte streams.
#[derive(Debug, Clone, Copy, Default)]
pub struct DocumentExporter;

impl DocumentExporter {
    pub fn new() -> Self {
        Self
    }

    /// Build the document from `(title, text)` and serialize it.
    ///
    /// The returned cursor is positioned at offset zero.
    pub fn export(&self, title: &str, text: &str) -> Result<Cursor<Vec<u8>>, ExportError> {
        self.write(&GeneratedDocument::from_text(title, text))
    }

    pub fn write(&self, doc: &GeneratedDocument) -> Result<Cursor<Vec<u8>>, ExportError> {
        let mut zip = ZipWriter::new(Cursor::new(Vec::new()));

        let parts = [
            ("[Content_Types].xml", xml_part(CONTENT_TYPES)),
            ("_rels/.rels", xml_part(PACKAGE_RELS)),
            ("docProps/core.xml", core_properties_xml(&doc.title)),
            ("word/_rels/document.xml.rels", xml_part(DOCUMENT_RELS)),
            ("word/styles.xml", xml_part(STYLES)),
            ("word/document.xml", document_xml(doc)),
        ];
        for (name, content) in parts {
            zip.start_file(name, file_options())?;
            zip.write_all(content.as_bytes())?;
        }

        let mut cursor = zip.finish()?;
        cursor.set_position(0);

        debug!(
            paragraphs = doc.paragraphs.len(),
            heading = doc.has_heading(),
            bytes = cursor.get_ref().len(),
            "wrote docx package"
        );
        Ok(cursor)
    }
}

fn file_options() -> SimpleFileOptions {
    SimpleFileOptions::default().compression_method(CompressionMethod::Deflated)
}

fn xml_part(body: &str) -> String {
    format!("{XML_DECL}{body}")
}

/// The `word/document.xml` part: one `<w:p>` per block.
pub fn document_xml(doc: &GeneratedDocument) -> String {
    let mut body = String::new();
    for block in doc.blocks() {
        match block {
            Block::Heading(text) => {
                body.push_str(r#"<w:p><w:pPr><w:pStyle w:val="Heading1"/></w:pPr>"#);
                push_runs(&mut body, &text);
                body.push_str("</w:p>");
            }
            Block::Paragraph(text) if text.is_empty() => body.push_str("<w:p/>"),
            Block::Paragraph(text) => {
                body.push_str("<w:p>");
                push_runs(&mut body, &text);
                body.push_str("</w:p>");
            }
        }
    }
    format!(
        r#"{XML_DECL}<w:document xmlns:w="{W_NS}"><w:body>{body}{SECTION_PROPERTIES}</w:body></w:document>"#
    )
}

fn core_properties_xml(title: &str) -> String {
    format!(
        concat!(
            "{}",
            r#"<cp:coreProperties xmlns:cp="http://schemas.openxmlformats.org/package/2006/metadata/core-properties" "#,
            r#"xmlns:dc="http://purl.org/dc/elements/1.1/">"#,
            "<dc:title>{}</dc:title><dc:creator>EthosJus</dc:creator>",
            "</cp:coreProperties>"
        ),
        XML_DECL,
        escape_xml(title)
    )
}

// Tabs and line breaks are their own elements in WordprocessingML. Each
// `\r` or `\n` left inside a paragraph becomes one `<w:br/>`.
fn push_runs(out: &mut String, text: &str) {
    out.push_str("<w:r>");
    let mut rest = text;
    loop {
        let (piece, separator) = match rest.find(['\t', '\r', '\n']) {
            Some(at) => (&rest[..at], rest[at..].chars().next()),
            None => (rest, None),
        };
        if !piece.is_empty() {
            out.push_str(r#"<w:t xml:space="preserve">"#);
            out.push_str(&escape_xml(piece));
            out.push_str("</w:t>");
        }
        match separator {
            Some('\t') => out.push_str("<w:tab/>"),
            Some(_) => out.push_str("<w:br/>"),
            None => break,
        }
        // Separators are single-byte.
        rest = &rest[piece.len() + 1..];
    }
    out.push_str("</w:r>");
}

/// Escape markup and drop characters XML 1.0 cannot carry.
pub fn escape_xml(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            '\t' => out.push('\t'),
            c if (c as u32) < 0x20 || c == '\u{FFFE}' || c == '\u{FFFF}' => {}
            c => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Read;

    fn read_part(bytes: Vec<u8>, name: &str) -> String {
        let mut archive = zip::ZipArchive::new(Cursor::new(bytes)).unwrap();
        let mut part = archive.by_name(name).unwrap();
        let mut out = String::new();
        part.read_to_string(&mut out).unwrap();
        out
    }

    #[test]
    fn test_escape_xml() {
        assert_eq!(escape_xml("a < b & \"c\""), "a &lt; b &amp; &quot;c&quot;");
        assert_eq!(escape_xml("x\u{0}\u{7}\ry"), "xy");
        assert_eq!(escape_xml("Cláusula"), "Cláusula");
    }

    #[test]
    fn test_document_xml_heading_and_paragraphs() {
        let doc = GeneratedDocument::from_text("Contrato", "Linha 1\n\nLinha 3");
        let xml = document_xml(&doc);
        assert!(xml.contains(
            r#"<w:p><w:pPr><w:pStyle w:val="Heading1"/></w:pPr><w:r><w:t xml:space="preserve">Contrato</w:t></w:r></w:p>"#
        ));
        assert!(xml.contains(
            r#"<w:t xml:space="preserve">Linha 1</w:t></w:r></w:p><w:p/><w:p><w:r><w:t xml:space="preserve">Linha 3</w:t>"#
        ));
    }

    #[test]
    fn test_tabs_become_tab_elements() {
        let doc = GeneratedDocument::from_text("", "a\tb");
        assert!(document_xml(&doc).contains(
            r#"<w:r><w:t xml:space="preserve">a</w:t><w:tab/><w:t xml:space="preserve">b</w:t></w:r>"#
        ));
    }

    #[test]
    fn test_line_breaks_inside_paragraph_keep_words_apart() {
        let xml = document_xml(&GeneratedDocument::from_text("Linha\nDois", "palavra1\rpalavra2"));
        assert!(xml.contains(
            r#"<w:pStyle w:val="Heading1"/></w:pPr><w:r><w:t xml:space="preserve">Linha</w:t><w:br/><w:t xml:space="preserve">Dois</w:t></w:r>"#
        ));
        assert!(xml.contains(
            r#"<w:r><w:t xml:space="preserve">palavra1</w:t><w:br/><w:t xml:space="preserve">palavra2</w:t></w:r>"#
        ));
        assert!(!xml.contains("palavra1palavra2"));
        assert!(!xml.contains("LinhaDois"));
    }

    #[test]
    fn test_control_characters_still_dropped() {
        let xml = document_xml(&GeneratedDocument::from_text("", "a\u{7}b\r\tc"));
        assert!(xml.contains(
            r#"<w:r><w:t xml:space="preserve">ab</w:t><w:br/><w:tab/><w:t xml:space="preserve">c</w:t></w:r>"#
        ));
    }

    #[test]
    fn test_export_starts_at_offset_zero() {
        let cursor = DocumentExporter::new().export("T", "x").unwrap();
        assert_eq!(cursor.position(), 0);
        assert!(cursor.get_ref().starts_with(b"PK"));
    }

    #[test]
    fn test_package_parts_are_readable() {
        let bytes = DocumentExporter::new()
            .export("Parecer <A&B>", "corpo")
            .unwrap()
            .into_inner();
        let core = read_part(bytes.clone(), "docProps/core.xml");
        assert!(core.contains("<dc:title>Parecer &lt;A&amp;B&gt;</dc:title>"));
        let types = read_part(bytes.clone(), "[Content_Types].xml");
        assert!(types.contains("/word/document.xml"));
        let document = read_part(bytes, "word/document.xml");
        assert!(document.contains("corpo"));
    }
}
