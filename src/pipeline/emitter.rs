//! Artifact emission: dataset.json plus its manifest.
//!
//! Artifacts are replaced wholesale on every run. Writes go through a
//! temp-file-then-persist rename so a concurrent reader never sees a
//! half-written artifact; serialization is plain pretty-printed JSON, which
//! keeps the files machine-parseable, human-diffable and correctly escaped
//! for any characters the field values contain.

use std::collections::BTreeMap;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tempfile::NamedTempFile;
use tracing::info;

use super::assembler::Dataset;
use crate::error::PipelineError;
use crate::models::{CommunePage, DatasetManifest};

pub const DATASET_FILE: &str = "dataset.json";
pub const MANIFEST_FILE: &str = "manifest.json";

/// Where the emitted artifacts landed.
#[derive(Debug, Clone)]
pub struct EmittedArtifacts {
    pub dataset_path: PathBuf,
    pub manifest_path: PathBuf,
}

/// Serialize-side shape of dataset.json.
#[derive(Serialize)]
struct ArtifactView<'a> {
    communes: &'a BTreeMap<String, CommunePage>,
    slugs: &'a [String],
    total: usize,
}

/// Parse-side contract of dataset.json, for the presentation layer and tests.
#[derive(Debug, Deserialize)]
pub struct DatasetArtifact {
    pub communes: BTreeMap<String, CommunePage>,
    pub slugs: Vec<String>,
    pub total: usize,
}

/// Emit the dataset artifact and its manifest under `out_dir`, creating the
/// directory if needed. The dataset file carries no timestamp, so reruns over
/// unchanged inputs are byte-identical; the manifest carries the one
/// permitted generation timestamp.
pub fn emit_dataset(dataset: &Dataset, out_dir: &Path) -> Result<EmittedArtifacts, PipelineError> {
    fs::create_dir_all(out_dir)?;

    let slugs = dataset.slugs();

    let view = ArtifactView {
        communes: dataset.communes(),
        slugs: &slugs,
        total: dataset.len(),
    };
    let dataset_path = out_dir.join(DATASET_FILE);
    write_atomic(&dataset_path, &to_pretty_json(&view)?)?;
    info!(
        "Wrote {} ({} communes)",
        dataset_path.display(),
        dataset.len()
    );

    let manifest = DatasetManifest::new(slugs, dataset.departments());
    let manifest_path = out_dir.join(MANIFEST_FILE);
    write_atomic(&manifest_path, &to_pretty_json(&manifest)?)?;
    info!("Wrote {}", manifest_path.display());

    Ok(EmittedArtifacts {
        dataset_path,
        manifest_path,
    })
}

/// Pretty JSON with a trailing newline, the diff-friendly form.
fn to_pretty_json<T: Serialize>(value: &T) -> Result<String, PipelineError> {
    let mut text = serde_json::to_string_pretty(value)?;
    text.push('\n');
    Ok(text)
}

/// Write `contents` to `path` atomically: temp file in the destination
/// directory, then rename over the target. Creates parent directories.
pub fn write_atomic(path: &Path, contents: &str) -> Result<(), PipelineError> {
    let parent = path.parent().unwrap_or_else(|| Path::new("."));
    fs::create_dir_all(parent)?;

    let mut tmp = NamedTempFile::new_in(parent)?;
    tmp.write_all(contents.as_bytes())?;
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}
