//! Structured dataset manifest for downstream tooling.
//!
//! The sitemap phase runs after (and independently of) the dataset phase and
//! must agree with it exactly on which routes exist. Instead of re-parsing
//! the dataset artifact's serialization syntax, it consumes this small index
//! emitted next to it: the identifier sets plus their counts, so an
//! inconsistent or truncated manifest is detected instead of silently
//! producing an empty sitemap.

use std::fs;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::DepartmentRef;
use crate::error::PipelineError;

/// Index of the emitted dataset: everything route derivation needs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatasetManifest {
    /// Generation timestamp. The only field expected to differ between two
    /// runs over unchanged inputs.
    pub generated_at: DateTime<Utc>,

    pub commune_count: usize,
    pub department_count: usize,

    /// Commune slugs, in dataset key order.
    pub slugs: Vec<String>,

    /// Distinct départements present in the dataset, ordered by code.
    pub departments: Vec<DepartmentRef>,
}

impl DatasetManifest {
    /// Build a manifest from the identifier sets; counts are derived so a
    /// freshly built manifest is consistent by construction.
    pub fn new(slugs: Vec<String>, departments: Vec<DepartmentRef>) -> Self {
        Self {
            generated_at: Utc::now(),
            commune_count: slugs.len(),
            department_count: departments.len(),
            slugs,
            departments,
        }
    }

    /// Read and validate a persisted manifest. A missing file is fatal for
    /// the sitemap phase, so it gets its own error rather than a bare IO one.
    pub fn load(path: &Path) -> Result<Self, PipelineError> {
        if !path.is_file() {
            return Err(PipelineError::ArtifactMissing {
                path: path.to_path_buf(),
            });
        }
        let content = fs::read_to_string(path)?;
        let manifest: DatasetManifest = serde_json::from_str(&content)?;
        manifest.validate()?;
        Ok(manifest)
    }

    /// Reject manifests whose counts disagree with their identifier lists.
    pub fn validate(&self) -> Result<(), PipelineError> {
        if self.commune_count != self.slugs.len() {
            return Err(PipelineError::ManifestInvalid {
                reason: format!(
                    "commune_count is {} but {} slugs are listed",
                    self.commune_count,
                    self.slugs.len()
                ),
            });
        }
        if self.department_count != self.departments.len() {
            return Err(PipelineError::ManifestInvalid {
                reason: format!(
                    "department_count is {} but {} departments are listed",
                    self.department_count,
                    self.departments.len()
                ),
            });
        }
        Ok(())
    }
}
