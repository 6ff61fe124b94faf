// src/report/export/word.rs
//! Contract B: the Word-compatible flow document.
//!
//! All rendered pages are concatenated, in order, into one HTML document with
//! the legacy `xmlns:w` prologue Word recognizes, prefixed with a UTF-8 BOM
//! and served/saved with the `application/msword` MIME type.

use super::ExportError;
use crate::report::render::{Block, RenderedPage, PRODUCT_NAME};

pub const WORD_MIME_TYPE: &str = "application/msword";

const STYLES: &str = r#"
@page { margin: 1in; }
body { font-family: 'Calibri', 'Arial', sans-serif; margin: 0; padding: 0; }
h1 { color: #8B1874; font-size: 24px; margin: 20px 0; }
h2 { color: #8B1874; font-size: 20px; margin: 30px 0 15px 0; }
h3 { color: #8B1874; font-size: 16px; margin: 20px 0 10px 0; }
.subtitle { color: #888; font-size: 14px; }
.divider { border-top: 2px solid #000; margin: 30px 0; }
ul { list-style-type: disc; margin-left: 20px; margin-bottom: 15px; }
li { margin-bottom: 5px; }
p { margin-bottom: 10px; }
.page-break { page-break-after: always; }
table { width: 100%; border-collapse: collapse; }
th { text-align: left; padding: 10px 5px; border-bottom: 2px solid #000; }
td { padding: 6px 5px; vertical-align: top; }
"#;

/// Produce the complete Word binary: BOM followed by the markup.
pub fn export_word(pages: &[RenderedPage]) -> Result<Vec<u8>, ExportError> {
    if pages.is_empty() {
        return Err(ExportError::ExportFailed("no pages to export".to_string()));
    }

    let mut body = String::new();
    for (i, page) in pages.iter().enumerate() {
        let class = if i + 1 < pages.len() {
            "report-page page-break"
        } else {
            "report-page"
        };
        body.push_str(&format!("<div class=\"{}\">\n", class));
        for block in &page.blocks {
            body.push_str(&block_to_html(block));
        }
        body.push_str("</div>\n");
    }

    let html = format!(
        r#"<!DOCTYPE html>
<html xmlns:o='urn:schemas-microsoft-com:office:office' xmlns:w='urn:schemas-microsoft-com:office:word' xmlns='http://www.w3.org/TR/REC-html40'>
<head>
<meta charset="UTF-8">
<title>{} Candidate Profile</title>
<!--[if gte mso 9]><xml><w:WordDocument><w:View>Print</w:View><w:Zoom>100</w:Zoom></w:WordDocument></xml><![endif]-->
<style>{}</style>
</head>
<body>
{}</body>
</html>
"#,
        escape_html(PRODUCT_NAME),
        STYLES,
        body
    );

    // Byte-order marker first - legacy Word sniffs it to pick UTF-8.
    let mut bytes = Vec::with_capacity(html.len() + 3);
    bytes.extend_from_slice("\u{feff}".as_bytes());
    bytes.extend_from_slice(html.as_bytes());
    Ok(bytes)
}

fn block_to_html(block: &Block) -> String {
    match block {
        Block::Heading(t) => format!("<h1>{}</h1>\n", escape_html(t)),
        Block::SectionTitle(t) => format!("<h2>{}</h2>\n", escape_html(t)),
        Block::SubsectionTitle(t) => format!("<h3>{}</h3>\n", escape_html(t)),
        Block::Subtitle(t) => format!("<p class=\"subtitle\">{}</p>\n", escape_html(t)),
        Block::Paragraph(t) => format!("<p>{}</p>\n", escape_html(t)),
        Block::LabelValue(label, value) => format!(
            "<p><strong>{}:</strong> {}</p>\n",
            escape_html(label),
            escape_html(value)
        ),
        Block::Bullets(items) => {
            let lis: String = items
                .iter()
                .map(|i| format!("<li>{}</li>\n", escape_html(i)))
                .collect();
            format!("<ul>\n{}</ul>\n", lis)
        }
        Block::Table { headers, rows } => {
            let mut out = String::from("<table>\n<tr>");
            for header in headers {
                out.push_str(&format!("<th>{}</th>", escape_html(header)));
            }
            out.push_str("</tr>\n");
            for row in rows {
                out.push_str("<tr>");
                for cell in row {
                    out.push_str(&format!("<td>{}</td>", escape_html(cell)));
                }
                out.push_str("</tr>\n");
            }
            out.push_str("</table>\n");
            out
        }
        Block::Rule => "<div class=\"divider\"></div>\n".to_string(),
    }
}

fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::catalog::SlotCatalog;
    use crate::report::model::ReportValues;
    use crate::report::render::render;

    #[test]
    fn test_word_export_starts_with_bom() {
        let catalog = SlotCatalog::standard();
        let pages = render(&ReportValues::new(), &catalog);
        let bytes = export_word(&pages).unwrap();
        assert_eq!(&bytes[..3], &[0xEF, 0xBB, 0xBF]);
    }

    #[test]
    fn test_word_export_contains_all_pages_and_breaks() {
        let catalog = SlotCatalog::standard();
        let pages = render(&ReportValues::new(), &catalog);
        let bytes = export_word(&pages).unwrap();
        let html = String::from_utf8(bytes[3..].to_vec()).unwrap();

        assert_eq!(html.matches("class=\"report-page").count(), pages.len());
        // Break after every page but the last.
        assert_eq!(
            html.matches("report-page page-break").count(),
            pages.len() - 1
        );
        assert!(html.contains("xmlns:w="));
    }

    #[test]
    fn test_values_are_escaped() {
        let catalog = SlotCatalog::standard();
        let mut values = ReportValues::new();
        values.set("full_name", "Jane <script>alert(1)</script>");
        let bytes = export_word(&render(&values, &catalog)).unwrap();
        let html = String::from_utf8(bytes[3..].to_vec()).unwrap();
        assert!(html.contains("Jane &lt;script&gt;"));
        assert!(!html.contains("<script>"));
    }

    #[test]
    fn test_empty_page_list_is_export_failed() {
        assert!(matches!(
            export_word(&[]),
            Err(ExportError::ExportFailed(_))
        ));
    }
}
