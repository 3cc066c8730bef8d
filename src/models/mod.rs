//! Core data models for the commune dataset pipeline.

pub mod commune;
pub mod manifest;
pub mod page;

pub use commune::{CommuneRecord, DepartmentRef, NeighborRef, RegionRef};
pub use manifest::DatasetManifest;
pub use page::{CommunePage, NearestCommune};
