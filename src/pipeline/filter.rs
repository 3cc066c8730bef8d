//! Regional filter scoping the build to the configured départements.
//!
//! The allow-list is the sole authority on regional scope: a commune that
//! fails it contributes to neither the dataset nor the sitemap.

use std::collections::HashSet;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::models::CommuneRecord;

/// Accept/reject counts for the run summary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FilterStats {
    pub accepted: u64,
    pub rejected: u64,
}

/// Predicate over a commune's département code.
///
/// Holds only immutable configuration plus atomic counters, so it is safe to
/// call from the parallel parse workers.
pub struct DepartmentFilter {
    allowed: HashSet<String>,
    accepted: AtomicU64,
    rejected: AtomicU64,
}

impl DepartmentFilter {
    /// Build a filter from an explicit allow-list of département codes. The
    /// set size is unbounded: one code or a whole country both work.
    pub fn new(codes: impl IntoIterator<Item = String>) -> Self {
        Self {
            allowed: codes.into_iter().collect(),
            accepted: AtomicU64::new(0),
            rejected: AtomicU64::new(0),
        }
    }

    /// True when the record's département is in scope. Counts the outcome.
    pub fn check(&self, record: &CommuneRecord) -> bool {
        let accepted = self.allowed.contains(&record.department.code);
        if accepted {
            self.accepted.fetch_add(1, Ordering::Relaxed);
        } else {
            self.rejected.fetch_add(1, Ordering::Relaxed);
        }
        accepted
    }

    pub fn stats(&self) -> FilterStats {
        FilterStats {
            accepted: self.accepted.load(Ordering::Relaxed),
            rejected: self.rejected.load(Ordering::Relaxed),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{DepartmentRef, RegionRef};

    fn commune_in(dept_code: &str) -> CommuneRecord {
        CommuneRecord {
            id: 1,
            code: format!("{dept_code}001"),
            name: "Testville".to_string(),
            alt_names: None,
            slug: "testville".to_string(),
            postal_code: format!("{dept_code}000"),
            population: 1000,
            area_km2: 10.0,
            latitude: "48.85".to_string(),
            longitude: "2.35".to_string(),
            department: DepartmentRef {
                code: dept_code.to_string(),
                name: format!("Département {dept_code}"),
                slug: format!("departement-{dept_code}"),
            },
            region: RegionRef {
                code: "11".to_string(),
                name: "Île-de-France".to_string(),
                slug: "ile-de-france".to_string(),
            },
            neighbors: Vec::new(),
        }
    }

    #[test]
    fn test_accepts_allowed_department() {
        let filter = DepartmentFilter::new(["75".to_string(), "92".to_string()]);
        assert!(filter.check(&commune_in("75")));
        assert!(filter.check(&commune_in("92")));
        assert!(!filter.check(&commune_in("33")));

        let stats = filter.stats();
        assert_eq!(stats.accepted, 2);
        assert_eq!(stats.rejected, 1);
    }

    #[test]
    fn test_empty_allow_list_rejects_everything() {
        let filter = DepartmentFilter::new(Vec::new());
        assert!(!filter.check(&commune_in("75")));
        assert_eq!(filter.stats().rejected, 1);
    }

    #[test]
    fn test_allow_list_size_is_unbounded() {
        // Nothing caps the set at the reference deployment's 8 codes.
        let codes = (1..=95).map(|n| format!("{n:02}"));
        let filter = DepartmentFilter::new(codes);
        assert!(filter.check(&commune_in("01")));
        assert!(filter.check(&commune_in("95")));
        assert!(!filter.check(&commune_in("2A")));
    }
}
