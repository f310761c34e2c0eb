//! Per-page element box extraction
//!
//! Walks the document's `main-text` sequence, resolves references, and
//! groups every element that carries provenance by page number.

use super::refs::resolve_item;
use super::types::{
    ElementBox, PageBoxMap, PageDimensions, Provenance, MAIN_TEXT_KEY, PAGE_DIMENSIONS_KEY,
    PROV_KEY, TYPE_KEY, UNKNOWN_LABEL,
};
use serde_json::Value;
use std::collections::BTreeMap;
use tracing::{debug, warn};

/// Collect all document elements with a bounding box, organized per page.
///
/// Elements without provenance are skipped with a diagnostic; only the first
/// provenance record of each element is used. Pure function, no I/O, linear
/// in the number of main-text entries.
pub fn extract_page_boxes(doc: &Value) -> PageBoxMap {
    let mut boxes = PageBoxMap::new();

    let Some(main_text) = doc.get(MAIN_TEXT_KEY).and_then(Value::as_array) else {
        warn!("document has no '{}' sequence", MAIN_TEXT_KEY);
        return boxes;
    };

    for raw_item in main_text {
        let item = resolve_item(raw_item, doc);

        let Some(prov) = item.get(PROV_KEY).and_then(Value::as_array) else {
            warn!("element without provenance, skipping: {}", item);
            continue;
        };
        let Some(first) = prov.first() else {
            warn!("element with empty provenance, skipping: {}", item);
            continue;
        };
        if prov.len() > 1 {
            // Known limitation: remaining provenance records are dropped
            debug!("using first of {} provenance records", prov.len());
        }

        let record: Provenance = match serde_json::from_value(first.clone()) {
            Ok(record) => record,
            Err(e) => {
                warn!("malformed provenance record, skipping: {}", e);
                continue;
            }
        };

        let label = item
            .get(TYPE_KEY)
            .and_then(Value::as_str)
            .unwrap_or(UNKNOWN_LABEL)
            .to_string();

        boxes.entry(record.page).or_default().push(ElementBox {
            page: record.page,
            label,
            bbox: record.bbox,
        });
    }

    boxes
}

/// Page dimensions keyed by page number.
///
/// Malformed entries are skipped with a diagnostic.
pub fn page_dimensions(doc: &Value) -> BTreeMap<u32, PageDimensions> {
    let mut dims = BTreeMap::new();

    let Some(entries) = doc.get(PAGE_DIMENSIONS_KEY).and_then(Value::as_array) else {
        warn!("document has no '{}' sequence", PAGE_DIMENSIONS_KEY);
        return dims;
    };

    for entry in entries {
        match serde_json::from_value::<PageDimensions>(entry.clone()) {
            Ok(d) => {
                dims.insert(d.page, d);
            }
            Err(e) => warn!("malformed page-dimensions entry, skipping: {}", e),
        }
    }

    dims
}
