//! HTML report assembly
//!
//! Builds a single HTML document per visualized input: a table with one
//! cell per page, each cell holding a page label and the page image inlined
//! as a base64 PNG data URI.

use super::types::{RenderError, Result};
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use image::{ImageFormat, RgbaImage};
use std::fmt::Write as _;
use std::io::Cursor;

/// Encode a page canvas as a base64 PNG string
pub fn encode_png_base64(img: &RgbaImage) -> Result<String> {
    let mut buffer = Cursor::new(Vec::new());
    img.write_to(&mut buffer, ImageFormat::Png)
        .map_err(|e| RenderError::ImageError(e.to_string()))?;
    Ok(STANDARD.encode(buffer.into_inner()))
}

/// Accumulates page cells and renders the final report
#[derive(Debug)]
pub struct ReportBuilder {
    columns: usize,
    title: String,
    cells: Vec<(u32, String)>,
}

impl ReportBuilder {
    /// Create a builder with the given table width (minimum one column)
    pub fn new(title: impl Into<String>, columns: usize) -> Self {
        Self {
            columns: columns.max(1),
            title: title.into(),
            cells: Vec::new(),
        }
    }

    /// Append a page cell; pages are laid out in the order they are added
    pub fn add_page(&mut self, page: u32, png_base64: String) {
        self.cells.push((page, png_base64));
    }

    /// Number of page cells added so far
    pub fn page_count(&self) -> usize {
        self.cells.len()
    }

    /// Render the complete HTML document
    pub fn build(&self) -> String {
        let mut html = String::new();
        html.push_str("<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"UTF-8\">\n");
        let _ = writeln!(html, "<title>{}</title>", escape(&self.title));
        html.push_str(
            "<style>\nbody { font-family: sans-serif; margin: 20px; }\n\
             td { padding: 8px; vertical-align: top; }\n</style>\n</head>\n<body>\n",
        );
        let _ = writeln!(html, "<h1>{}</h1>", escape(&self.title));
        html.push_str("<table>");

        for (i, (page, png)) in self.cells.iter().enumerate() {
            if i == 0 {
                html.push_str("<tr>");
            } else if i % self.columns == 0 {
                html.push_str("</tr><tr>");
            }
            html.push_str("<td>");
            let _ = write!(html, "<strong>Page {}</strong><br />", page);
            let _ = write!(html, "<img src='data:image/png;base64,{}' />", png);
            html.push_str("</td>");
        }

        html.push_str("</tr></table>\n</body>\n</html>\n");
        html
    }
}

/// Minimal HTML text escaping for the title
fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    #[test]
    fn test_encode_png_base64() {
        let img = RgbaImage::from_pixel(4, 4, Rgba([255, 0, 0, 255]));
        let encoded = encode_png_base64(&img).unwrap();
        assert!(!encoded.is_empty());
        // PNG magic bytes survive the round trip
        let decoded = STANDARD.decode(encoded).unwrap();
        assert_eq!(decoded[1..4], *b"PNG");
    }

    #[test]
    fn test_report_cells_and_labels() {
        let mut report = ReportBuilder::new("doc", 3);
        report.add_page(1, "AAAA".to_string());
        report.add_page(2, "BBBB".to_string());
        let html = report.build();

        assert!(html.contains("<strong>Page 1</strong>"));
        assert!(html.contains("<strong>Page 2</strong>"));
        assert!(html.contains("data:image/png;base64,AAAA"));
        assert_eq!(report.page_count(), 2);
    }

    #[test]
    fn test_report_wraps_rows_at_column_count() {
        let mut report = ReportBuilder::new("doc", 2);
        for page in 1..=5 {
            report.add_page(page, String::new());
        }
        let html = report.build();
        // 5 cells over 2 columns: row breaks after pages 2 and 4
        assert_eq!(html.matches("</tr><tr>").count(), 2);
        assert_eq!(html.matches("<td>").count(), 5);
    }

    #[test]
    fn test_title_is_escaped() {
        let report = ReportBuilder::new("a<b & c", 1);
        let html = report.build();
        assert!(html.contains("a&lt;b &amp; c"));
    }

    #[test]
    fn test_zero_columns_clamped_to_one() {
        let mut report = ReportBuilder::new("doc", 0);
        report.add_page(1, String::new());
        report.add_page(2, String::new());
        let html = report.build();
        assert_eq!(html.matches("</tr><tr>").count(), 1);
    }
}
