//! Build configuration with compiled-in defaults.
//!
//! Both binaries run with no flags at all: defaults target the reference
//! deployment (Île-de-France). A `pipeline.toml` can retarget the build to a
//! different region without code edits, and CLI flags override file values.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use super::assembler::CollisionPolicy;

/// Allow-list of the reference deployment: the 8 départements of
/// Île-de-France.
pub const DEFAULT_DEPARTMENTS: [&str; 8] = ["75", "77", "78", "91", "92", "93", "94", "95"];

/// Site origin used to build absolute sitemap URLs.
pub const DEFAULT_BASE_URL: &str = "https://www.lutece-demenagement.fr";

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Directory holding one JSON document per commune.
    pub source_dir: PathBuf,

    /// Destination directory for dataset.json and manifest.json.
    pub out_dir: PathBuf,

    /// Département codes accepted by the regional filter.
    pub allowed_departments: Vec<String>,

    /// What to do when two communes resolve to the same slug.
    pub collision_policy: CollisionPolicy,

    /// Absolute origin for sitemap `<loc>` entries.
    pub base_url: String,

    /// Public destination of the sitemap document.
    pub sitemap_path: PathBuf,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            source_dir: PathBuf::from("data/communes"),
            out_dir: PathBuf::from("dist/data"),
            allowed_departments: DEFAULT_DEPARTMENTS.iter().map(|s| s.to_string()).collect(),
            collision_policy: CollisionPolicy::default(),
            base_url: DEFAULT_BASE_URL.to_string(),
            sitemap_path: PathBuf::from("public/sitemap.xml"),
        }
    }
}

impl PipelineConfig {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path).context("Failed to read config file")?;
        let config: PipelineConfig =
            toml::from_str(&content).context("Failed to parse config file")?;
        Ok(config)
    }

    /// Resolve the effective configuration: an explicit `--config` path must
    /// exist; otherwise `pipeline.toml` is picked up when present, and the
    /// compiled-in defaults apply when it is not.
    pub fn resolve(explicit: Option<&Path>) -> Result<Self> {
        match explicit {
            Some(path) => Self::load_from_file(path),
            None => {
                let fallback = Path::new("pipeline.toml");
                if fallback.is_file() {
                    Self::load_from_file(fallback)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }
}
