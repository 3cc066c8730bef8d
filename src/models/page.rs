//! Derived commune records consumed by the landing pages.
//!
//! A `CommunePage` is produced once by the enricher and is immutable
//! afterwards; the presentation layer reads it from the emitted dataset as a
//! keyed lookup table.

use serde::{Deserialize, Serialize};

/// One nearby commune on a landing page, in upstream distance order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NearestCommune {
    pub name: String,
    pub slug: String,
    pub distance_km: f64,
    pub postal_code: String,
}

/// Enriched per-commune record, keyed by `slug` in the dataset.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommunePage {
    /// Dataset primary key, unique across the emitted dataset.
    pub slug: String,

    pub name: String,
    pub postal_code: String,

    pub department_name: String,
    pub department_code: String,
    pub department_slug: String,

    /// Population rendered for display, e.g. "96 807 habitants".
    pub population_label: String,

    /// Decimal strings passed through from the source document.
    pub latitude: String,
    pub longitude: String,

    pub region_name: String,

    /// Generated marketing paragraph.
    pub description: String,

    /// Generated neighbourhood names: 3, 6 or 9 entries depending on
    /// population tier.
    pub quartiers: Vec<String>,

    /// At most 10 nearby communes, upstream order preserved.
    pub nearest: Vec<NearestCommune>,
}
