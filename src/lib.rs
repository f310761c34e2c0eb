//! docviz-pdf - Visualize document-layout analysis results
//!
//! Renders the pages of a converted PDF document with colored bounding-box
//! overlays for each detected layout element (tables, captions, paragraphs,
//! ...) and emits an HTML report with one inline PNG per page.
//!
//! # Pipeline
//!
//! 1. Read converted-document JSON (bare file or `json*.zip` result archives)
//! 2. Resolve `$ref` entries in `main-text` and group element boxes per page
//! 3. Rasterize each page via `pdftoppm` (or start from a blank canvas)
//! 4. Overlay the boxes, styled by element type
//! 5. Write an HTML table with base64-inlined page images

pub mod archive;
pub mod cli;
pub mod config;
pub mod document;
pub mod pipeline;
pub mod progress;
pub mod render;

// Re-export public API
pub use archive::{collect_documents, ArchiveError, Collected, DocumentSource};
pub use cli::{Cli, Commands, InfoArgs, VisualizeArgs};
pub use config::{CliOverrides, Config, RgbaColor, Style, StyleMap, DEFAULT_STYLE};
pub use document::{
    extract_page_boxes, page_dimensions, resolve_item, BoundingBox, ElementBox, PageBoxMap,
    PageDimensions,
};
pub use pipeline::{VizError, VizPipeline, VizResult};
pub use progress::{OutputMode, ProgressTracker};
pub use render::{
    draw_boxes, draw_page_border, encode_png_base64, rasterize_page, to_raster_rect, RenderError,
    ReportBuilder,
};

/// Process exit codes
pub mod exit_codes {
    /// Successful completion
    pub const SUCCESS: i32 = 0;
    /// Unspecified error
    pub const GENERAL_ERROR: i32 = 1;
    /// Input path does not exist or contains no documents
    pub const INPUT_NOT_FOUND: i32 = 2;
}
