//! Converted-document model
//!
//! A converted document is a nested JSON structure with a `main-text`
//! sequence of elements (inline or `$ref` records) and a `page-dimensions`
//! sequence. This module resolves references and extracts per-page element
//! boxes; it performs no I/O.
//!
//! # Example
//!
//! ```rust
//! use docviz_pdf::extract_page_boxes;
//! use serde_json::json;
//!
//! let doc = json!({
//!     "main-text": [
//!         {"type": "paragraph", "prov": [{"page": 1, "bbox": [50.0, 700.0, 550.0, 750.0]}]},
//!     ],
//! });
//! let boxes = extract_page_boxes(&doc);
//! assert_eq!(boxes[&1][0].label, "paragraph");
//! ```

// Submodules
mod extract;
mod refs;
mod types;

// Re-export public API
pub use extract::{extract_page_boxes, page_dimensions};
pub use refs::{resolve_item, walk_path, RefIssue};
pub use types::{
    BoundingBox, ElementBox, PageBoxMap, PageDimensions, Provenance, MAIN_TEXT_KEY,
    PAGE_DIMENSIONS_KEY, PROV_KEY, REF_KEY, TYPE_KEY, UNKNOWN_LABEL,
};
