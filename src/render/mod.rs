//! Page rendering
//!
//! Everything between an extracted [`PageBoxMap`](crate::document::PageBoxMap)
//! and the bytes of an HTML report: coordinate mapping from PDF space to
//! raster space, box overlay drawing, rasterization of PDF pages through
//! Poppler's `pdftoppm`, and report assembly.

// Submodules
mod boxes;
mod coords;
mod html;
mod raster;
mod types;

// Re-export public API
pub use boxes::{draw_boxes, draw_page_border};
pub use coords::to_raster_rect;
pub use html::{encode_png_base64, ReportBuilder};
pub use raster::{rasterize_page, RASTERIZER_TOOL};
pub use types::{RenderError, Result};
