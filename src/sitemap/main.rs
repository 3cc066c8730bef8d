//! Sitemap generation pass.
//!
//! Runs after `generate-dataset` and consumes the manifest it emitted, never
//! the in-memory dataset and never the dataset artifact's serialization
//! syntax. Static, département and commune routes are concatenated in that
//! order and rendered as a sitemaps.org urlset.

use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::Utc;
use clap::Parser;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;
use url::Url;

use lutece::models::DatasetManifest;
use lutece::pipeline::{write_atomic, PipelineConfig, MANIFEST_FILE};

mod routes;
mod xml;

#[derive(Parser, Debug)]
#[command(name = "generate-sitemap")]
#[command(about = "Generate sitemap.xml from the emitted dataset manifest")]
struct Args {
    /// Manifest emitted by generate-dataset (default: <out_dir>/manifest.json)
    #[arg(long)]
    manifest: Option<PathBuf>,

    /// Destination of the sitemap document
    #[arg(long)]
    output: Option<PathBuf>,

    /// Absolute site origin for <loc> entries
    #[arg(long)]
    base_url: Option<String>,

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
    let config = PipelineConfig::resolve(args.config.as_deref())?;

    let manifest_path = args
        .manifest
        .unwrap_or_else(|| config.out_dir.join(MANIFEST_FILE));
    let output = args.output.unwrap_or_else(|| config.sitemap_path.clone());
    let base_url = Url::parse(args.base_url.as_deref().unwrap_or(&config.base_url))
        .context("Invalid base URL")?;

    info!("Lutece Sitemap Generator");
    info!("Manifest: {}", manifest_path.display());

    let manifest = DatasetManifest::load(&manifest_path)?;
    info!(
        "Manifest of {} (communes: {}, départements: {})",
        manifest.generated_at.format("%Y-%m-%d %H:%M:%S"),
        manifest.commune_count,
        manifest.department_count
    );

    let entries = routes::derive_routes(&manifest);
    let document = xml::render_sitemap(&entries, &base_url, Utc::now().date_naive())?;
    write_atomic(&output, &document)?;

    info!(
        "Routes: {} static, {} départements, {} communes",
        routes::STATIC_ROUTES.len(),
        manifest.department_count,
        manifest.commune_count
    );
    info!("Wrote {} ({} url entries)", output.display(), entries.len());

    Ok(())
}
