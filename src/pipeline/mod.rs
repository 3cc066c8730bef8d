//! The dataset build pipeline: load → filter → enrich → assemble → emit.
//!
//! One pass over the source corpus, rebuilt from scratch on every run. The
//! sitemap phase is deliberately not part of this pass; it consumes the
//! emitted manifest afterwards (see the `generate-sitemap` binary).

mod assembler;
mod config;
mod emitter;
mod enrich;
mod filter;
mod loader;

pub use assembler::{AssemblyReport, Collision, CollisionPolicy, Dataset, DatasetAssembler};
pub use config::{PipelineConfig, DEFAULT_BASE_URL, DEFAULT_DEPARTMENTS};
pub use emitter::{
    emit_dataset, write_atomic, DatasetArtifact, EmittedArtifacts, DATASET_FILE, MANIFEST_FILE,
};
pub use enrich::{enrich, format_population, NEAREST_LIMIT};
pub use filter::{DepartmentFilter, FilterStats};
pub use loader::{load_documents, read_commune, scan_documents, LoadedDocument};

use tracing::warn;

use crate::error::PipelineError;

/// Outcome of one full pipeline run, for the operator report.
#[derive(Debug)]
pub struct RunSummary {
    /// Documents found under the source directory.
    pub documents_seen: usize,
    /// File names of documents that failed to read or parse.
    pub parse_failures: Vec<String>,
    pub filter: FilterStats,
    pub collisions: Vec<Collision>,
    /// Communes in the emitted dataset.
    pub dataset_len: usize,
    pub artifacts: EmittedArtifacts,
}

/// Run the whole pipeline headlessly. The `generate-dataset` binary adds
/// progress reporting around the same steps.
pub fn run_pipeline(config: &PipelineConfig) -> Result<RunSummary, PipelineError> {
    let paths = scan_documents(&config.source_dir)?;
    let filter = DepartmentFilter::new(config.allowed_departments.iter().cloned());
    let mut assembler = DatasetAssembler::new(config.collision_policy);

    let mut parse_failures = Vec::new();
    for (filename, result) in load_documents(&paths) {
        match result {
            Ok(record) => {
                if filter.check(&record) {
                    assembler.insert(enrich(&record))?;
                }
            }
            Err(err) => {
                warn!("{err}");
                parse_failures.push(filename);
            }
        }
    }

    let (dataset, report) = assembler.finish();
    let artifacts = emit_dataset(&dataset, &config.out_dir)?;

    Ok(RunSummary {
        documents_seen: paths.len(),
        parse_failures,
        filter: filter.stats(),
        collisions: report.collisions,
        dataset_len: dataset.len(),
        artifacts,
    })
}
