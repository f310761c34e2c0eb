//! Result-archive discovery and document loading
//!
//! Conversion results arrive as `json*.zip` archives, each holding one or
//! more converted-document JSON files. Input may be a directory of such
//! archives (scanned recursively), a single archive, or a bare `.json`
//! document. Unreadable members are logged and skipped so one broken
//! document never stops a batch.

use serde_json::Value;
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::warn;

// ============================================================
// Error Types
// ============================================================

/// Input discovery error types
#[derive(Debug, Error)]
pub enum ArchiveError {
    #[error("input path does not exist: {0}")]
    InputNotFound(PathBuf),

    #[error("unsupported input (expected a directory, .zip, or .json): {0}")]
    UnsupportedInput(PathBuf),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ArchiveError>;

// ============================================================
// Types
// ============================================================

/// One converted document ready for visualization
#[derive(Debug, Clone)]
pub struct DocumentSource {
    /// File stem used to name the report
    pub name: String,
    /// Parsed converted-document JSON
    pub doc: Value,
}

/// Outcome of input discovery
#[derive(Debug, Default)]
pub struct Collected {
    /// Documents loaded successfully, in discovery order
    pub documents: Vec<DocumentSource>,
    /// Members that could not be read or parsed (logged, skipped)
    pub skipped: usize,
}

// ============================================================
// Discovery
// ============================================================

/// Collect converted documents from the input path.
///
/// Directories are scanned recursively for `json*.zip` archives; `.zip`
/// inputs are read directly; `.json` inputs are treated as one document.
pub fn collect_documents(input: &Path) -> Result<Collected> {
    if !input.exists() {
        return Err(ArchiveError::InputNotFound(input.to_path_buf()));
    }

    let mut collected = Collected::default();

    if input.is_dir() {
        let mut archives = Vec::new();
        find_result_archives(input, &mut archives)?;
        archives.sort();
        for archive in archives {
            read_archive(&archive, &mut collected);
        }
    } else if has_extension(input, "zip") {
        read_archive(input, &mut collected);
    } else if has_extension(input, "json") {
        read_json_file(input, &mut collected);
    } else {
        return Err(ArchiveError::UnsupportedInput(input.to_path_buf()));
    }

    Ok(collected)
}

/// Recursively find `json*.zip` result archives under a directory
fn find_result_archives(dir: &Path, archives: &mut Vec<PathBuf>) -> Result<()> {
    for entry in std::fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();
        if path.is_dir() {
            find_result_archives(&path, archives)?;
        } else if has_extension(&path, "zip") && stem_starts_with(&path, "json") {
            archives.push(path);
        }
    }
    Ok(())
}

/// Load every `.json` member of one archive
fn read_archive(zip_path: &Path, collected: &mut Collected) {
    let file = match File::open(zip_path) {
        Ok(file) => file,
        Err(e) => {
            warn!("cannot open archive {}: {}", zip_path.display(), e);
            collected.skipped += 1;
            return;
        }
    };
    let mut archive = match zip::ZipArchive::new(file) {
        Ok(archive) => archive,
        Err(e) => {
            warn!("cannot read archive {}: {}", zip_path.display(), e);
            collected.skipped += 1;
            return;
        }
    };

    for index in 0..archive.len() {
        let mut entry = match archive.by_index(index) {
            Ok(entry) => entry,
            Err(e) => {
                warn!("cannot read member {} of {}: {}", index, zip_path.display(), e);
                collected.skipped += 1;
                continue;
            }
        };
        if !entry.name().ends_with(".json") {
            continue;
        }
        let member_name = entry.name().to_string();

        let mut content = String::new();
        if let Err(e) = entry.read_to_string(&mut content) {
            warn!("cannot read {}: {}", member_name, e);
            collected.skipped += 1;
            continue;
        }
        match serde_json::from_str(&content) {
            Ok(doc) => collected.documents.push(DocumentSource {
                name: member_stem(&member_name),
                doc,
            }),
            Err(e) => {
                warn!("invalid JSON in {}: {}", member_name, e);
                collected.skipped += 1;
            }
        }
    }
}

/// Load a bare `.json` document file
fn read_json_file(path: &Path, collected: &mut Collected) {
    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) => {
            warn!("cannot read {}: {}", path.display(), e);
            collected.skipped += 1;
            return;
        }
    };
    match serde_json::from_str(&content) {
        Ok(doc) => collected.documents.push(DocumentSource {
            name: member_stem(&path.file_name().unwrap_or_default().to_string_lossy()),
            doc,
        }),
        Err(e) => {
            warn!("invalid JSON in {}: {}", path.display(), e);
            collected.skipped += 1;
        }
    }
}

fn has_extension(path: &Path, ext: &str) -> bool {
    path.extension().is_some_and(|e| e.eq_ignore_ascii_case(ext))
}

fn stem_starts_with(path: &Path, prefix: &str) -> bool {
    path.file_name()
        .and_then(|n| n.to_str())
        .is_some_and(|n| n.starts_with(prefix))
}

/// File stem of an archive member path, without directories or extension
fn member_stem(name: &str) -> String {
    let base = name.rsplit('/').next().unwrap_or(name);
    base.strip_suffix(".json").unwrap_or(base).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::io::Write;
    use zip::write::SimpleFileOptions;

    fn write_zip(path: &Path, members: &[(&str, &str)]) {
        let file = File::create(path).unwrap();
        let mut writer = zip::ZipWriter::new(file);
        for (name, content) in members {
            writer
                .start_file(name.to_string(), SimpleFileOptions::default())
                .unwrap();
            writer.write_all(content.as_bytes()).unwrap();
        }
        writer.finish().unwrap();
    }

    #[test]
    fn test_missing_input() {
        let err = collect_documents(Path::new("/no/such/input")).unwrap_err();
        assert!(matches!(err, ArchiveError::InputNotFound(_)));
    }

    #[test]
    fn test_bare_json_document() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.json");
        std::fs::write(&path, r#"{"main-text": []}"#).unwrap();

        let collected = collect_documents(&path).unwrap();
        assert_eq!(collected.documents.len(), 1);
        assert_eq!(collected.documents[0].name, "report");
        assert_eq!(collected.skipped, 0);
    }

    #[test]
    fn test_unsupported_input() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("input.txt");
        std::fs::write(&path, "hello").unwrap();
        let err = collect_documents(&path).unwrap_err();
        assert!(matches!(err, ArchiveError::UnsupportedInput(_)));
    }

    #[test]
    fn test_zip_members_loaded_and_bad_json_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("json_v2.zip");
        write_zip(
            &path,
            &[
                ("doc-a.json", r#"{"main-text": []}"#),
                ("doc-b.json", "not json at all"),
                ("doc-a.cells", "ignored sidecar"),
            ],
        );

        let collected = collect_documents(&path).unwrap();
        assert_eq!(collected.documents.len(), 1);
        assert_eq!(collected.documents[0].name, "doc-a");
        assert_eq!(collected.skipped, 1);
    }

    #[test]
    fn test_directory_scan_finds_json_archives_recursively() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("batch/results");
        std::fs::create_dir_all(&nested).unwrap();
        write_zip(
            &nested.join("json_v1.zip"),
            &[("one.json", r#"{"main-text": []}"#)],
        );
        // Non-matching archives are ignored by the json*.zip pattern
        write_zip(
            &nested.join("cells_v1.zip"),
            &[("two.json", r#"{"main-text": []}"#)],
        );

        let collected = collect_documents(dir.path()).unwrap();
        assert_eq!(collected.documents.len(), 1);
        assert_eq!(collected.documents[0].name, "one");
    }

    #[test]
    fn test_member_stem_strips_directories() {
        assert_eq!(member_stem("nested/dir/doc.json"), "doc");
        assert_eq!(member_stem("doc.json"), "doc");
    }

    #[test]
    fn test_document_payload_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("doc.json");
        let doc = json!({"main-text": [{"type": "paragraph"}]});
        std::fs::write(&path, doc.to_string()).unwrap();

        let collected = collect_documents(&path).unwrap();
        assert_eq!(collected.documents[0].doc, doc);
    }
}
