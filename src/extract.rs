// src/extract.rs
//! Text extraction from uploaded candidate documents.
//!
//! Dispatch is by file extension only, never content sniffing. PDF and TXT are
//! first-class; DOC/DOCX is a best-effort scrape of the zip container's main
//! document part and is allowed to fail - callers should steer users toward
//! PDF/TXT or pasting text when it does.

use regex::Regex;
use std::io::Read;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("Unsupported file format: {0}. Accepted formats: PDF, DOC, DOCX, TXT")]
    UnsupportedFormat(String),
    #[error("Document is corrupt or not a valid PDF: {0}")]
    CorruptDocument(String),
    #[error("DOC/DOCX extraction limited. Please use PDF or TXT format, or copy-paste the CV text.")]
    UnsupportedDocFormat,
    #[error("Document contained no extractable text")]
    EmptyResult,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    Pdf,
    Doc,
    Docx,
    Txt,
}

impl DocumentKind {
    /// Resolve the declared kind from a file name, case-insensitively.
    /// Fails before any file I/O for unrecognized extensions.
    pub fn from_file_name(file_name: &str) -> Result<Self, ExtractionError> {
        let ext = crate::utils::get_file_extension(file_name)
            .ok_or_else(|| ExtractionError::UnsupportedFormat(file_name.to_string()))?;

        match ext.as_str() {
            "pdf" => Ok(Self::Pdf),
            "doc" => Ok(Self::Doc),
            "docx" => Ok(Self::Docx),
            "txt" => Ok(Self::Txt),
            other => Err(ExtractionError::UnsupportedFormat(format!(".{}", other))),
        }
    }
}

/// A successfully extracted upload. Immutable; replaced wholesale on the next
/// upload. `text` is guaranteed non-empty.
#[derive(Debug, Clone)]
pub struct ExtractedDocument {
    pub source_file_name: String,
    pub kind: DocumentKind,
    pub text: String,
}

/// Extract plain text from `bytes` according to the extension of `file_name`.
/// Extraction fully succeeds or fails; partial text is never returned.
pub fn extract(bytes: &[u8], file_name: &str) -> Result<String, ExtractionError> {
    let kind = DocumentKind::from_file_name(file_name)?;

    let text = match kind {
        DocumentKind::Pdf => extract_pdf(bytes)?.trim().to_string(),
        // TXT content is returned as-is apart from trailing whitespace;
        // leading whitespace is part of the content and is preserved.
        DocumentKind::Txt => String::from_utf8_lossy(bytes).trim_end().to_string(),
        DocumentKind::Doc | DocumentKind::Docx => extract_docx(bytes)?,
    };

    if text.trim().is_empty() {
        return Err(ExtractionError::EmptyResult);
    }

    Ok(text)
}

/// PDF path: per page in order, text runs joined with single spaces; pages
/// joined with a blank line.
fn extract_pdf(bytes: &[u8]) -> Result<String, ExtractionError> {
    let doc = lopdf::Document::load_mem(bytes)
        .map_err(|e| ExtractionError::CorruptDocument(e.to_string()))?;

    let mut pages = Vec::new();
    for page_number in doc.get_pages().keys() {
        let raw = doc
            .extract_text(&[*page_number])
            .map_err(|e| ExtractionError::CorruptDocument(e.to_string()))?;
        pages.push(raw.split_whitespace().collect::<Vec<_>>().join(" "));
    }

    Ok(pages.join("\n\n"))
}

/// DOC/DOCX path: treat the file as a zip container and scrape the text runs
/// out of `word/document.xml`. Any failure along the way collapses into
/// `UnsupportedDocFormat` - this is a deliberate, narrow capability.
fn extract_docx(bytes: &[u8]) -> Result<String, ExtractionError> {
    let cursor = std::io::Cursor::new(bytes);
    let mut archive =
        zip::ZipArchive::new(cursor).map_err(|_| ExtractionError::UnsupportedDocFormat)?;

    let mut document_xml = String::new();
    archive
        .by_name("word/document.xml")
        .map_err(|_| ExtractionError::UnsupportedDocFormat)?
        .read_to_string(&mut document_xml)
        .map_err(|_| ExtractionError::UnsupportedDocFormat)?;

    let run_pattern = Regex::new(r"<w:t[^>]*>([^<]*)</w:t>")
        .map_err(|_| ExtractionError::UnsupportedDocFormat)?;

    let runs: Vec<String> = run_pattern
        .captures_iter(&document_xml)
        .map(|cap| unescape_xml(&cap[1]))
        .collect();

    Ok(runs.join(" ").trim().to_string())
}

fn unescape_xml(text: &str) -> String {
    text.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&apos;", "'")
        .replace("&amp;", "&")
}

#[cfg(test)]
mod tests {
    use super::*;
    use lopdf::content::{Content, Operation};
    use lopdf::{dictionary, Document, Object, Stream};
    use std::io::Write;

    /// Build a small text-only PDF with one page per entry in `page_texts`.
    fn build_pdf(page_texts: &[&str]) -> Vec<u8> {
        let mut doc = Document::with_version("1.5");
        let pages_id = doc.new_object_id();
        let font_id = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => "Helvetica",
        });
        let resources_id = doc.add_object(dictionary! {
            "Font" => dictionary! { "F1" => font_id },
        });

        let mut kids = Vec::new();
        for text in page_texts {
            let content = Content {
                operations: vec![
                    Operation::new("BT", vec![]),
                    Operation::new("Tf", vec!["F1".into(), 12.into()]),
                    Operation::new("Td", vec![72.into(), 720.into()]),
                    Operation::new("Tj", vec![Object::string_literal(*text)]),
                    Operation::new("ET", vec![]),
                ],
            };
            let content_id =
                doc.add_object(Stream::new(dictionary! {}, content.encode().unwrap()));
            let page_id = doc.add_object(dictionary! {
                "Type" => "Page",
                "Parent" => pages_id,
                "Contents" => content_id,
            });
            kids.push(page_id.into());
        }

        let count = kids.len() as i64;
        let pages = dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => count,
            "Resources" => resources_id,
            "MediaBox" => vec![0.into(), 0.into(), 595.into(), 842.into()],
        };
        doc.objects.insert(pages_id, Object::Dictionary(pages));
        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        doc.trailer.set("Root", catalog_id);

        let mut bytes = Vec::new();
        doc.save_to(&mut bytes).unwrap();
        bytes
    }

    /// Build a minimal DOCX container with the given document body XML.
    fn build_docx(document_xml: Option<&str>) -> Vec<u8> {
        let mut buf = std::io::Cursor::new(Vec::new());
        {
            let mut writer = zip::ZipWriter::new(&mut buf);
            let options = zip::write::SimpleFileOptions::default();
            if let Some(xml) = document_xml {
                writer.start_file("word/document.xml", options).unwrap();
                writer.write_all(xml.as_bytes()).unwrap();
            } else {
                writer.start_file("word/styles.xml", options).unwrap();
                writer.write_all(b"<w:styles/>").unwrap();
            }
            writer.finish().unwrap();
        }
        buf.into_inner()
    }

    #[test]
    fn test_txt_round_trip() {
        let content = "Jane Doe\nSenior Product Manager\n10 years in B2B SaaS";
        let extracted = extract(content.as_bytes(), "cv.txt").unwrap();
        assert_eq!(extracted, content);
    }

    #[test]
    fn test_txt_keeps_leading_whitespace() {
        let extracted = extract(b"\n  Jane Doe\nEngineer  \n", "cv.txt").unwrap();
        assert_eq!(extracted, "\n  Jane Doe\nEngineer");
    }

    #[test]
    fn test_unknown_extension_rejected_before_read() {
        assert!(matches!(
            DocumentKind::from_file_name("cv.rtf"),
            Err(ExtractionError::UnsupportedFormat(_))
        ));
        assert!(matches!(
            extract(b"anything", "cv.rtf"),
            Err(ExtractionError::UnsupportedFormat(_))
        ));
        assert!(matches!(
            DocumentKind::from_file_name("noextension"),
            Err(ExtractionError::UnsupportedFormat(_))
        ));
    }

    #[test]
    fn test_extension_is_case_insensitive() {
        assert_eq!(
            DocumentKind::from_file_name("CV.PDF").unwrap(),
            DocumentKind::Pdf
        );
        assert_eq!(
            DocumentKind::from_file_name("cv.Docx").unwrap(),
            DocumentKind::Docx
        );
    }

    #[test]
    fn test_empty_txt_is_empty_result() {
        assert!(matches!(
            extract(b"   \n  ", "cv.txt"),
            Err(ExtractionError::EmptyResult)
        ));
    }

    #[test]
    fn test_corrupt_pdf() {
        assert!(matches!(
            extract(b"definitely not a pdf", "cv.pdf"),
            Err(ExtractionError::CorruptDocument(_))
        ));
    }

    #[test]
    fn test_two_page_pdf_joined_in_order() {
        let bytes = build_pdf(&["Alice Smith, Engineer", "5 years experience"]);
        let text = extract(&bytes, "resume.pdf").unwrap();

        let first = text.find("Alice Smith, Engineer").unwrap();
        let second = text.find("5 years experience").unwrap();
        assert!(first < second, "page order must be preserved");
        assert!(
            text.contains("\n\n"),
            "pages must be joined with a blank line"
        );
    }

    #[test]
    fn test_docx_text_runs() {
        let xml = r#"<?xml version="1.0"?><w:document><w:body><w:p><w:r><w:t>Jane Doe</w:t></w:r><w:r><w:t xml:space="preserve">Head of Engineering &amp; Ops</w:t></w:r></w:p></w:body></w:document>"#;
        let bytes = build_docx(Some(xml));
        let text = extract(&bytes, "cv.docx").unwrap();
        assert_eq!(text, "Jane Doe Head of Engineering & Ops");
    }

    #[test]
    fn test_docx_missing_document_part() {
        let bytes = build_docx(None);
        assert!(matches!(
            extract(&bytes, "cv.docx"),
            Err(ExtractionError::UnsupportedDocFormat)
        ));
    }

    #[test]
    fn test_legacy_doc_is_unsupported() {
        // Old binary .doc files are not zip containers.
        let bytes = [0xD0u8, 0xCF, 0x11, 0xE0, 0xA1, 0xB1, 0x1A, 0xE1];
        assert!(matches!(
            extract(&bytes, "cv.doc"),
            Err(ExtractionError::UnsupportedDocFormat)
        ));
    }
}
