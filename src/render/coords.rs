//! PDF-to-raster coordinate mapping
//!
//! Bounding boxes arrive in PDF coordinate space (origin bottom-left, Y
//! increasing upward); the raster canvas has its origin top-left with Y
//! increasing downward. The page canvas is sized to the page dimensions, so
//! X maps through unchanged and only Y is flipped.

use crate::document::BoundingBox;

/// Convert a PDF-space bounding box to raster pixel coordinates.
///
/// Returns `(left, top, right, bottom)` where `top = H - y1` and
/// `bottom = H - y0` for page height `H`. Rounding is half-away-from-zero
/// (`f64::round`); an off-by-one pixel at box edges is acceptable.
pub fn to_raster_rect(bbox: &BoundingBox, page_height: f64) -> (i64, i64, i64, i64) {
    (
        bbox.x0.round() as i64,
        (page_height - bbox.y1).round() as i64,
        bbox.x1.round() as i64,
        (page_height - bbox.y0).round() as i64,
    )
}
