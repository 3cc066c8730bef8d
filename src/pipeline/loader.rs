//! Source corpus loading with per-document failure isolation.
//!
//! One malformed document never takes the run down: it is reported and
//! skipped while every other document proceeds. A missing source directory,
//! on the other hand, is fatal.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use rayon::prelude::*;
use tracing::info;
use walkdir::WalkDir;

use crate::error::PipelineError;
use crate::models::CommuneRecord;

/// Outcome of parsing one source document, tagged with its file name.
pub type LoadedDocument = (String, Result<CommuneRecord, PipelineError>);

/// List the source documents under `dir`, sorted by path for deterministic
/// processing order. Files without the `.json` extension are skipped
/// silently; a missing directory is fatal.
pub fn scan_documents(dir: &Path) -> Result<Vec<PathBuf>, PipelineError> {
    if !dir.is_dir() {
        return Err(PipelineError::SourceDirMissing {
            path: dir.to_path_buf(),
        });
    }

    let mut paths = Vec::new();
    for entry in WalkDir::new(dir).min_depth(1).max_depth(1) {
        let entry = entry.map_err(io::Error::from)?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        if path.extension().is_some_and(|ext| ext == "json") {
            paths.push(path.to_path_buf());
        }
    }
    paths.sort();

    info!("Found {} documents in {}", paths.len(), dir.display());
    Ok(paths)
}

/// Read and parse a single commune document.
pub fn read_commune(path: &Path) -> Result<CommuneRecord, PipelineError> {
    let filename = document_name(path);
    let content = fs::read_to_string(path).map_err(|source| PipelineError::DocumentRead {
        filename: filename.clone(),
        source,
    })?;
    serde_json::from_str(&content)
        .map_err(|source| PipelineError::DocumentParse { filename, source })
}

/// Parse all documents on the rayon pool, input order preserved. Each
/// document's result is independent; failures are values, not aborts.
pub fn load_documents(paths: &[PathBuf]) -> Vec<LoadedDocument> {
    paths
        .par_iter()
        .map(|path| (document_name(path), read_commune(path)))
        .collect()
}

fn document_name(path: &Path) -> String {
    path.file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("<unnamed>")
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn write_doc(dir: &Path, filename: &str, slug: &str, dept_code: &str) {
        let doc = json!({
            "id": 1,
            "code": format!("{dept_code}001"),
            "name": slug,
            "slug": slug,
            "postal_code": format!("{dept_code}000"),
            "population": 1000,
            "area_km2": 5.5,
            "latitude": "48.85",
            "longitude": "2.35",
            "department": {
                "code": dept_code,
                "name": format!("Département {dept_code}"),
                "slug": format!("departement-{dept_code}")
            },
            "region": { "code": "11", "name": "Île-de-France", "slug": "ile-de-france" }
        });
        fs::write(dir.join(filename), serde_json::to_string(&doc).unwrap()).unwrap();
    }

    #[test]
    fn test_scan_skips_non_documents_and_sorts() {
        let dir = tempfile::tempdir().unwrap();
        write_doc(dir.path(), "b.json", "b", "75");
        write_doc(dir.path(), "a.json", "a", "75");
        fs::write(dir.path().join("notes.txt"), "not a document").unwrap();
        fs::write(dir.path().join("README.md"), "# corpus").unwrap();

        let paths = scan_documents(dir.path()).unwrap();
        assert_eq!(paths.len(), 2);
        assert!(paths[0].ends_with("a.json"));
        assert!(paths[1].ends_with("b.json"));
    }

    #[test]
    fn test_missing_directory_is_fatal() {
        let err = scan_documents(Path::new("/nonexistent/communes")).unwrap_err();
        assert!(matches!(err, PipelineError::SourceDirMissing { .. }));
    }

    #[test]
    fn test_malformed_document_is_isolated() {
        let dir = tempfile::tempdir().unwrap();
        for i in 0..5 {
            write_doc(dir.path(), &format!("commune-{i}.json"), &format!("ville-{i}"), "75");
        }
        fs::write(dir.path().join("broken.json"), "{ not json").unwrap();

        let paths = scan_documents(dir.path()).unwrap();
        let results = load_documents(&paths);
        assert_eq!(results.len(), 6);

        let failures: Vec<&LoadedDocument> =
            results.iter().filter(|(_, r)| r.is_err()).collect();
        assert_eq!(failures.len(), 1);
        assert_eq!(failures[0].0, "broken.json");
        assert!(matches!(
            failures[0].1,
            Err(PipelineError::DocumentParse { .. })
        ));

        assert_eq!(results.iter().filter(|(_, r)| r.is_ok()).count(), 5);
    }

    #[test]
    fn test_parse_error_carries_filename() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("etrange.json");
        fs::write(&path, r#"{"id": "not-a-number"}"#).unwrap();

        let err = read_commune(&path).unwrap_err();
        match err {
            PipelineError::DocumentParse { filename, .. } => assert_eq!(filename, "etrange.json"),
            other => panic!("unexpected error: {other}"),
        }
    }
}
