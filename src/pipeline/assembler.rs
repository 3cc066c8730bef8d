//! Dataset assembly keyed by slug.
//!
//! Slugs are the dataset's primary key: the assembler is where uniqueness is
//! enforced, under an explicit, configurable collision policy instead of a
//! silent overwrite.

use std::collections::btree_map::Entry;
use std::collections::BTreeMap;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::PipelineError;
use crate::models::{CommunePage, DepartmentRef};

/// What to do when two communes resolve to the same slug.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum CollisionPolicy {
    /// Later document wins; the collision is warned about and recorded.
    /// Matches the reference deployment.
    #[default]
    KeepLast,
    /// First document wins; the collision is warned about and recorded.
    KeepFirst,
    /// Any collision aborts the run before emission.
    Reject,
}

/// One resolved slug collision, for the run summary.
#[derive(Debug, Clone)]
pub struct Collision {
    pub slug: String,
    pub kept_name: String,
    pub dropped_name: String,
}

/// Assembly outcome surfaced to the operator.
#[derive(Debug, Default)]
pub struct AssemblyReport {
    pub collisions: Vec<Collision>,
}

/// Folds enriched records into the slug-keyed dataset.
pub struct DatasetAssembler {
    policy: CollisionPolicy,
    communes: BTreeMap<String, CommunePage>,
    collisions: Vec<Collision>,
}

impl DatasetAssembler {
    pub fn new(policy: CollisionPolicy) -> Self {
        Self {
            policy,
            communes: BTreeMap::new(),
            collisions: Vec::new(),
        }
    }

    /// Insert one enriched record. Only `CollisionPolicy::Reject` can fail.
    pub fn insert(&mut self, page: CommunePage) -> Result<(), PipelineError> {
        match self.communes.entry(page.slug.clone()) {
            Entry::Vacant(entry) => {
                entry.insert(page);
                Ok(())
            }
            Entry::Occupied(mut entry) => match self.policy {
                CollisionPolicy::Reject => Err(PipelineError::SlugCollision { slug: page.slug }),
                CollisionPolicy::KeepFirst => {
                    warn!(
                        "slug collision on '{}': keeping '{}', dropping '{}'",
                        page.slug,
                        entry.get().name,
                        page.name
                    );
                    self.collisions.push(Collision {
                        slug: page.slug,
                        kept_name: entry.get().name.clone(),
                        dropped_name: page.name,
                    });
                    Ok(())
                }
                CollisionPolicy::KeepLast => {
                    warn!(
                        "slug collision on '{}': keeping '{}', dropping '{}'",
                        page.slug,
                        page.name,
                        entry.get().name
                    );
                    self.collisions.push(Collision {
                        slug: page.slug.clone(),
                        kept_name: page.name.clone(),
                        dropped_name: entry.get().name.clone(),
                    });
                    entry.insert(page);
                    Ok(())
                }
            },
        }
    }

    pub fn finish(self) -> (Dataset, AssemblyReport) {
        (
            Dataset {
                communes: self.communes,
            },
            AssemblyReport {
                collisions: self.collisions,
            },
        )
    }
}

/// The assembled dataset: slug → page, keys unique by construction.
///
/// BTreeMap keeps the key order deterministic, which is what makes reruns
/// over unchanged inputs byte-identical once emitted.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    communes: BTreeMap<String, CommunePage>,
}

impl Dataset {
    pub fn communes(&self) -> &BTreeMap<String, CommunePage> {
        &self.communes
    }

    pub fn get(&self, slug: &str) -> Option<&CommunePage> {
        self.communes.get(slug)
    }

    pub fn len(&self) -> usize {
        self.communes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.communes.is_empty()
    }

    /// Ordered key list, as emitted in the artifact.
    pub fn slugs(&self) -> Vec<String> {
        self.communes.keys().cloned().collect()
    }

    /// Distinct départements present in the dataset, ordered by code.
    pub fn departments(&self) -> Vec<DepartmentRef> {
        let mut by_code: BTreeMap<&str, DepartmentRef> = BTreeMap::new();
        for page in self.communes.values() {
            by_code
                .entry(page.department_code.as_str())
                .or_insert_with(|| DepartmentRef {
                    code: page.department_code.clone(),
                    name: page.department_name.clone(),
                    slug: page.department_slug.clone(),
                });
        }
        by_code.into_values().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page(slug: &str, name: &str, dept_code: &str) -> CommunePage {
        CommunePage {
            slug: slug.to_string(),
            name: name.to_string(),
            postal_code: format!("{dept_code}000"),
            department_name: format!("Département {dept_code}"),
            department_code: dept_code.to_string(),
            department_slug: format!("departement-{dept_code}"),
            population_label: "1\u{202F}000 habitants".to_string(),
            latitude: "48.85".to_string(),
            longitude: "2.35".to_string(),
            region_name: "Île-de-France".to_string(),
            description: String::new(),
            quartiers: vec!["Centre-ville".to_string()],
            nearest: Vec::new(),
        }
    }

    #[test]
    fn test_keep_last_overwrites_and_records_one_collision() {
        let mut assembler = DatasetAssembler::new(CollisionPolicy::KeepLast);
        assembler.insert(page("paris-1", "Paris 1er", "75")).unwrap();
        assembler
            .insert(page("paris-1", "Paris 1er Arrondissement", "75"))
            .unwrap();

        let (dataset, report) = assembler.finish();
        assert_eq!(dataset.len(), 1);
        // Later-processed record wins.
        assert_eq!(dataset.get("paris-1").unwrap().name, "Paris 1er Arrondissement");
        assert_eq!(report.collisions.len(), 1);
        assert_eq!(report.collisions[0].dropped_name, "Paris 1er");
    }

    #[test]
    fn test_keep_first_preserves_incumbent() {
        let mut assembler = DatasetAssembler::new(CollisionPolicy::KeepFirst);
        assembler.insert(page("paris-1", "Paris 1er", "75")).unwrap();
        assembler
            .insert(page("paris-1", "Paris 1er Arrondissement", "75"))
            .unwrap();

        let (dataset, report) = assembler.finish();
        assert_eq!(dataset.get("paris-1").unwrap().name, "Paris 1er");
        assert_eq!(report.collisions.len(), 1);
        assert_eq!(report.collisions[0].dropped_name, "Paris 1er Arrondissement");
    }

    #[test]
    fn test_reject_aborts_on_collision() {
        let mut assembler = DatasetAssembler::new(CollisionPolicy::Reject);
        assembler.insert(page("paris-1", "Paris 1er", "75")).unwrap();

        let err = assembler
            .insert(page("paris-1", "Paris 1er Arrondissement", "75"))
            .unwrap_err();
        assert!(matches!(err, PipelineError::SlugCollision { slug } if slug == "paris-1"));
    }

    #[test]
    fn test_departments_distinct_and_ordered() {
        let mut assembler = DatasetAssembler::new(CollisionPolicy::KeepLast);
        assembler.insert(page("vincennes", "Vincennes", "94")).unwrap();
        assembler.insert(page("nanterre", "Nanterre", "92")).unwrap();
        assembler.insert(page("clamart", "Clamart", "92")).unwrap();

        let (dataset, _) = assembler.finish();
        let departments = dataset.departments();
        assert_eq!(departments.len(), 2);
        assert_eq!(departments[0].code, "92");
        assert_eq!(departments[1].code, "94");

        // Slug list is the ordered key set.
        assert_eq!(dataset.slugs(), vec!["clamart", "nanterre", "vincennes"]);
    }
}
