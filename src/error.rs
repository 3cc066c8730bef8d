//! Error taxonomy for the build pipeline.
//!
//! Per-document failures (`DocumentRead`, `DocumentParse`) are isolated and
//! aggregated into the run summary; structural failures (`SourceDirMissing`,
//! `ArtifactMissing`, `ManifestInvalid`) propagate and abort the run.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PipelineError {
    /// The source document directory does not exist or is not a directory.
    #[error("source directory not found: {}", .path.display())]
    SourceDirMissing { path: PathBuf },

    /// A single source document could not be read. Skipped, never fatal.
    #[error("failed to read document '{filename}': {source}")]
    DocumentRead {
        filename: String,
        #[source]
        source: std::io::Error,
    },

    /// A single source document is malformed. Skipped, never fatal.
    #[error("failed to parse document '{filename}': {source}")]
    DocumentParse {
        filename: String,
        #[source]
        source: serde_json::Error,
    },

    /// Two communes resolved to the same slug under `CollisionPolicy::Reject`.
    #[error("duplicate slug '{slug}' in dataset")]
    SlugCollision { slug: String },

    /// The sitemap phase could not find the manifest emitted by the dataset phase.
    #[error("dataset manifest not found: {} (run generate-dataset first)", .path.display())]
    ArtifactMissing { path: PathBuf },

    /// The manifest's counts disagree with its identifier lists.
    #[error("manifest is inconsistent: {reason}")]
    ManifestInvalid { reason: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}
