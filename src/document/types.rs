//! Document model core types
//!
//! Typed views over the converted-document JSON: page dimensions, element
//! provenance, and the per-page box map produced by extraction.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// ============================================================
// Constants
// ============================================================

/// Key of the ordered top-level content sequence
pub const MAIN_TEXT_KEY: &str = "main-text";

/// Key of the page dimensions sequence
pub const PAGE_DIMENSIONS_KEY: &str = "page-dimensions";

/// Key marking an element record as a reference
pub const REF_KEY: &str = "$ref";

/// Key of an element's provenance sequence
pub const PROV_KEY: &str = "prov";

/// Key of an element's type label
pub const TYPE_KEY: &str = "type";

/// Label used when a resolved element carries no type
pub const UNKNOWN_LABEL: &str = "unknown";

// ============================================================
// Core Data Structures
// ============================================================

/// Bounding box in PDF coordinate space (origin bottom-left, Y up).
///
/// Serialized as the 4-number sequence `[x0, y0, x1, y1]` with
/// `x0 <= x1` and `y0 <= y1`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f64; 4]", into = "[f64; 4]")]
pub struct BoundingBox {
    pub x0: f64,
    pub y0: f64,
    pub x1: f64,
    pub y1: f64,
}

impl BoundingBox {
    /// Create a new bounding box
    pub fn new(x0: f64, y0: f64, x1: f64, y1: f64) -> Self {
        Self { x0, y0, x1, y1 }
    }

    /// Width in source units
    pub fn width(&self) -> f64 {
        self.x1 - self.x0
    }

    /// Height in source units
    pub fn height(&self) -> f64 {
        self.y1 - self.y0
    }
}

impl From<[f64; 4]> for BoundingBox {
    fn from(v: [f64; 4]) -> Self {
        Self::new(v[0], v[1], v[2], v[3])
    }
}

impl From<BoundingBox> for [f64; 4] {
    fn from(b: BoundingBox) -> Self {
        [b.x0, b.y0, b.x1, b.y1]
    }
}

/// One provenance record of a resolved element
#[derive(Debug, Clone, Deserialize)]
pub struct Provenance {
    /// Page number (1-based)
    pub page: u32,
    /// Extent on that page, in PDF space
    pub bbox: BoundingBox,
}

/// Page dimensions entry from the converted document
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct PageDimensions {
    /// Page number (1-based)
    pub page: u32,
    /// Page width, same unit as bounding boxes
    pub width: f64,
    /// Page height, same unit as bounding boxes
    pub height: f64,
}

/// One detected layout element placed on a page
#[derive(Debug, Clone, PartialEq)]
pub struct ElementBox {
    /// Page number (1-based)
    pub page: u32,
    /// Element type label, e.g. "table" or "paragraph"
    pub label: String,
    /// Extent in PDF space
    pub bbox: BoundingBox,
}

/// Per-page element boxes, keyed by page number.
///
/// The per-page Vec preserves main-text encounter order; the map iterates
/// pages in ascending order.
pub type PageBoxMap = BTreeMap<u32, Vec<ElementBox>>;
