//! Visualization pipeline
//!
//! Ties the pieces together for one converted document: extract per-page
//! boxes, produce a page canvas (rasterized PDF page or blank), overlay the
//! boxes, and write the HTML report. The report file is written only after
//! every page has been processed, so a render failure never leaves a
//! partial report behind.

use crate::config::Config;
use crate::document::{extract_page_boxes, page_dimensions};
use crate::render::{
    draw_boxes, draw_page_border, encode_png_base64, rasterize_page, RenderError, ReportBuilder,
};
use image::imageops::FilterType;
use image::{Rgba, RgbaImage};
use serde_json::Value;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use thiserror::Error;
use tracing::{info, warn};

// ============================================================
// Error Types
// ============================================================

/// Per-document pipeline error types
#[derive(Debug, Error)]
pub enum VizError {
    #[error("page background required but no PDF was provided")]
    MissingPdf,

    #[error(transparent)]
    Render(#[from] RenderError),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, VizError>;

// ============================================================
// Types
// ============================================================

/// Outcome of visualizing one document
#[derive(Debug, Clone)]
pub struct VizResult {
    /// Report file written
    pub output_path: PathBuf,
    /// Pages rendered into the report
    pub pages_rendered: usize,
    /// Element boxes drawn across all pages
    pub boxes_drawn: usize,
    /// Pages skipped for lack of a page-dimensions entry
    pub pages_skipped: usize,
    /// Wall-clock processing time
    pub elapsed_seconds: f64,
}

// ============================================================
// Pipeline
// ============================================================

/// Renders converted documents into HTML reports
pub struct VizPipeline {
    config: Config,
}

impl VizPipeline {
    /// Create a pipeline from merged configuration
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Access the effective configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Report path for a document name under the output directory
    pub fn output_path(&self, name: &str, output_dir: &Path) -> PathBuf {
        output_dir.join(format!("{}.html", name))
    }

    /// Visualize one converted document and write its HTML report.
    ///
    /// `pdf` backs the page canvases when `show_page_image` is enabled; a
    /// rasterization failure aborts this document (remaining pages are not
    /// processed) but leaves no partial report.
    pub fn visualize_document(
        &self,
        name: &str,
        doc: &Value,
        pdf: Option<&Path>,
        output_dir: &Path,
    ) -> Result<VizResult> {
        let start = Instant::now();

        if self.config.show_page_image && pdf.is_none() {
            return Err(VizError::MissingPdf);
        }

        let boxes = extract_page_boxes(doc);
        let dims = page_dimensions(doc);
        let timeout = Duration::from_secs(self.config.render_timeout_secs);

        let mut report = ReportBuilder::new(name, self.config.columns);
        let mut boxes_drawn = 0usize;
        let mut pages_skipped = 0usize;

        for (&page, page_boxes) in &boxes {
            let Some(page_dims) = dims.get(&page) else {
                warn!("no page-dimensions entry for page {}, skipping", page);
                pages_skipped += 1;
                continue;
            };
            let width = page_dims.width.ceil() as u32;
            let height = page_dims.height.ceil() as u32;

            let mut canvas = match pdf.filter(|_| self.config.show_page_image) {
                Some(pdf_path) => {
                    let rendered =
                        rasterize_page(pdf_path, page, self.config.resolution, timeout)?;
                    rendered
                        .resize_exact(width, height, FilterType::Triangle)
                        .to_rgba8()
                }
                None => RgbaImage::from_pixel(width, height, Rgba([255, 255, 255, 255])),
            };

            draw_page_border(&mut canvas);
            draw_boxes(&mut canvas, page_dims.height, page_boxes, &self.config.styles);
            boxes_drawn += page_boxes.len();

            report.add_page(page, encode_png_base64(&canvas)?);
            info!("page {}: {} boxes", page, page_boxes.len());
        }

        std::fs::create_dir_all(output_dir)?;
        let output_path = self.output_path(name, output_dir);
        std::fs::write(&output_path, report.build())?;

        Ok(VizResult {
            output_path,
            pages_rendered: report.page_count(),
            boxes_drawn,
            pages_skipped,
            elapsed_seconds: start.elapsed().as_secs_f64(),
        })
    }
}
