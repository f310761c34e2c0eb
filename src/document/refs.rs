//! Reference resolution for converted-document items
//!
//! `main-text` entries are either inline elements or `$ref` records whose
//! value is a slash-delimited path into the document root, e.g.
//! `#/tables/3/body`. Resolution failures are recoverable by contract: the
//! caller gets an empty element and the condition is logged, so one broken
//! reference never aborts a page or document.

use super::types::REF_KEY;
use serde_json::{Map, Value};
use std::fmt;
use tracing::warn;

/// Why a reference path could not be walked
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RefIssue {
    /// A token is absent as a mapping key
    NotFound { token: String },
    /// A token indexing a sequence is not a non-negative integer
    MalformedIndex { token: String },
    /// A sequence index past the end
    OutOfRange { index: usize, len: usize },
    /// The path descends into a scalar
    NotAContainer { token: String },
}

impl fmt::Display for RefIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RefIssue::NotFound { token } => write!(f, "key '{}' not found", token),
            RefIssue::MalformedIndex { token } => {
                write!(f, "cannot use '{}' as a sequence index", token)
            }
            RefIssue::OutOfRange { index, len } => {
                write!(f, "index {} out of range (len {})", index, len)
            }
            RefIssue::NotAContainer { token } => {
                write!(f, "cannot descend into scalar at '{}'", token)
            }
        }
    }
}

/// Walk a slash-delimited reference path through the document.
///
/// The first token denotes the document root and is discarded. Each
/// remaining token indexes the current container: objects by key, arrays by
/// non-negative integer. Cost is O(path length); nothing is cached.
pub fn walk_path<'a>(doc: &'a Value, path: &str) -> Result<&'a Value, RefIssue> {
    let mut item = doc;
    for token in path.split('/').skip(1) {
        item = match item {
            Value::Object(map) => map.get(token).ok_or_else(|| RefIssue::NotFound {
                token: token.to_string(),
            })?,
            Value::Array(seq) => {
                let index: usize = token.parse().map_err(|_| RefIssue::MalformedIndex {
                    token: token.to_string(),
                })?;
                seq.get(index).ok_or(RefIssue::OutOfRange {
                    index,
                    len: seq.len(),
                })?
            }
            _ => {
                return Err(RefIssue::NotAContainer {
                    token: token.to_string(),
                })
            }
        };
    }
    Ok(item)
}

/// Resolve a main-text entry into the element it denotes.
///
/// Entries without a `$ref` marker are elements already and are returned
/// unchanged. Reference entries are walked through `doc`; any failure is
/// logged and yields an empty element rather than an error.
pub fn resolve_item(raw_item: &Value, doc: &Value) -> Value {
    let Some(reference) = raw_item.get(REF_KEY) else {
        return raw_item.clone();
    };

    let Some(path) = reference.as_str() else {
        warn!("reference is not a string: {}", reference);
        return empty_element();
    };

    match walk_path(doc, path) {
        Ok(item) => item.clone(),
        Err(issue) => {
            warn!("unresolvable reference '{}': {}", path, issue);
            empty_element()
        }
    }
}

/// The recovery value for failed resolution
fn empty_element() -> Value {
    Value::Object(Map::new())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_doc() -> Value {
        json!({
            "tables": [
                {"body": {"type": "table", "rows": 3}},
                {"body": {"type": "table", "rows": 5}},
            ],
            "figures": {
                "fig-1": {"type": "picture"}
            }
        })
    }

    #[test]
    fn test_resolve_inline_element_is_identity() {
        let doc = sample_doc();
        let item = json!({"type": "paragraph", "prov": [{"page": 1, "bbox": [0.0, 0.0, 1.0, 1.0]}]});
        assert_eq!(resolve_item(&item, &doc), item);
    }

    #[test]
    fn test_resolve_reference_to_nested_value() {
        let doc = sample_doc();
        let item = json!({"$ref": "#/tables/1/body"});
        let resolved = resolve_item(&item, &doc);
        assert_eq!(resolved, json!({"type": "table", "rows": 5}));
    }

    #[test]
    fn test_resolve_reference_through_mapping() {
        let doc = sample_doc();
        let item = json!({"$ref": "#/figures/fig-1"});
        assert_eq!(resolve_item(&item, &doc), json!({"type": "picture"}));
    }

    #[test]
    fn test_missing_key_yields_empty_element() {
        let doc = sample_doc();
        let item = json!({"$ref": "#/no-such-key/0"});
        assert_eq!(resolve_item(&item, &doc), json!({}));
    }

    #[test]
    fn test_malformed_index_yields_empty_element() {
        let doc = sample_doc();
        let item = json!({"$ref": "#/tables/first/body"});
        assert_eq!(resolve_item(&item, &doc), json!({}));
    }

    #[test]
    fn test_out_of_range_index_yields_empty_element() {
        let doc = sample_doc();
        let item = json!({"$ref": "#/tables/9/body"});
        assert_eq!(resolve_item(&item, &doc), json!({}));
    }

    #[test]
    fn test_non_string_reference_yields_empty_element() {
        let doc = sample_doc();
        let item = json!({"$ref": 42});
        assert_eq!(resolve_item(&item, &doc), json!({}));
    }

    #[test]
    fn test_walk_path_issue_kinds() {
        let doc = sample_doc();
        assert!(matches!(
            walk_path(&doc, "#/missing"),
            Err(RefIssue::NotFound { .. })
        ));
        assert!(matches!(
            walk_path(&doc, "#/tables/x"),
            Err(RefIssue::MalformedIndex { .. })
        ));
        assert!(matches!(
            walk_path(&doc, "#/tables/5"),
            Err(RefIssue::OutOfRange { index: 5, len: 2 })
        ));
        assert!(matches!(
            walk_path(&doc, "#/tables/0/body/rows/deeper"),
            Err(RefIssue::NotAContainer { .. })
        ));
    }
}
