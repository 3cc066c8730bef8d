//! Raw commune documents as ingested from the source corpus.

use serde::{Deserialize, Serialize};

/// Parent département reference embedded in each commune document.
///
/// Immutable reference data: a département is identified by its 2-character
/// INSEE code and carries a display name and a URL slug.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct DepartmentRef {
    pub code: String,
    pub name: String,
    pub slug: String,
}

/// Parent région reference embedded in each commune document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegionRef {
    pub code: String,
    pub name: String,
    pub slug: String,
}

/// One nearby commune, as provided by the upstream corpus.
///
/// The upstream source sorts these ascending by `distance_km`; the pipeline
/// trusts that ordering and the distance values as-is and never recomputes
/// them from coordinates.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NeighborRef {
    pub id: u32,
    pub code: String,
    pub name: String,
    pub slug: String,
    pub postal_code: String,
    pub population: u64,
    pub distance_km: f64,
}

/// Raw per-commune source document, one JSON file per commune.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommuneRecord {
    /// Numeric upstream id.
    pub id: u32,

    /// INSEE code, unique across the whole corpus.
    pub code: String,

    /// Canonical display name.
    pub name: String,

    /// Alternate names; absent or `null` in many documents.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alt_names: Option<Vec<String>>,

    /// URL-safe identifier, primary key of the generated dataset.
    pub slug: String,

    pub postal_code: String,

    /// Resident count, always >= 0.
    pub population: u64,

    /// Surface area in square kilometres.
    pub area_km2: f64,

    /// Coordinates kept as decimal strings: the pipeline passes them through
    /// untouched, so no float round-trip may alter them.
    pub latitude: String,
    pub longitude: String,

    pub department: DepartmentRef,
    pub region: RegionRef,

    /// Nearby communes, pre-sorted ascending by distance upstream.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub neighbors: Vec<NeighborRef>,
}
