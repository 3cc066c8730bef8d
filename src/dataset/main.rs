//! Dataset generation pass.
//!
//! Parses the per-commune source corpus, filters it to the configured
//! départements, enriches each accepted record and emits dataset.json plus
//! manifest.json. Malformed documents are skipped and counted; a missing
//! source directory aborts the run.

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;
use tracing::{info, warn, Level};
use tracing_subscriber::FmtSubscriber;

use lutece::pipeline::{
    emit_dataset, enrich, read_commune, scan_documents, CollisionPolicy, DatasetAssembler,
    DepartmentFilter, PipelineConfig,
};

#[derive(Parser, Debug)]
#[command(name = "generate-dataset")]
#[command(about = "Build the commune dataset from the source corpus")]
struct Args {
    /// Directory of per-commune JSON documents
    #[arg(long)]
    source_dir: Option<PathBuf>,

    /// Destination directory for dataset.json and manifest.json
    #[arg(long)]
    out_dir: Option<PathBuf>,

    /// Slug collision handling
    #[arg(long, value_enum)]
    collision_policy: Option<CollisionPolicy>,

    /// Optional TOML config file (default: pipeline.toml when present)
    #[arg(long)]
    config: Option<PathBuf>,
}

fn main() -> Result<()> {
    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let args = Args::parse();
    let mut config = PipelineConfig::resolve(args.config.as_deref())?;
    if let Some(dir) = args.source_dir {
        config.source_dir = dir;
    }
    if let Some(dir) = args.out_dir {
        config.out_dir = dir;
    }
    if let Some(policy) = args.collision_policy {
        config.collision_policy = policy;
    }

    info!("Lutece Dataset Pipeline");
    info!("Source: {}", config.source_dir.display());
    info!(
        "Allowed départements: {}",
        config.allowed_departments.join(", ")
    );

    let paths = scan_documents(&config.source_dir)?;

    // Parse the corpus on the rayon pool, one progress tick per document.
    let pb = ProgressBar::new(paths.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template(
                "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({per_sec})",
            )?
            .progress_chars("#>-"),
    );

    let results: Vec<_> = paths
        .par_iter()
        .map(|path| {
            let result = read_commune(path);
            pb.inc(1);
            result
        })
        .collect();
    pb.finish_with_message("Parsing complete");

    let filter = DepartmentFilter::new(config.allowed_departments.iter().cloned());
    let mut assembler = DatasetAssembler::new(config.collision_policy);
    let mut parse_failures = 0usize;

    for result in results {
        match result {
            Ok(record) => {
                if filter.check(&record) {
                    assembler.insert(enrich(&record))?;
                }
            }
            Err(err) => {
                warn!("{err}");
                parse_failures += 1;
            }
        }
    }

    let stats = filter.stats();
    let (dataset, report) = assembler.finish();
    let artifacts = emit_dataset(&dataset, &config.out_dir)?;

    info!(
        "Documents: {} seen, {} parse failures",
        paths.len(),
        parse_failures
    );
    info!(
        "Filter: {} accepted, {} rejected",
        stats.accepted, stats.rejected
    );
    info!(
        "Dataset: {} communes ({} collisions resolved)",
        dataset.len(),
        report.collisions.len()
    );
    info!(
        "Artifacts: {} and {}",
        artifacts.dataset_path.display(),
        artifacts.manifest_path.display()
    );
    info!("Dataset generation complete");

    Ok(())
}
