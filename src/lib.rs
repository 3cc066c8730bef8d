//! Lutece - build pipeline for the commune marketing site
//!
//! This library provides shared types and modules for the generate-dataset and
//! generate-sitemap binaries.

pub mod error;
pub mod models;
pub mod pipeline;

pub use error::PipelineError;
pub use models::{CommunePage, CommuneRecord, DatasetManifest};
