//! Enrichment of raw commune records into landing-page records.
//!
//! Everything here is pure and deterministic: no I/O, no clock, no
//! randomness. The same `CommuneRecord` always enriches to the same
//! `CommunePage`, which is what keeps reruns byte-identical.

use crate::models::{CommunePage, CommuneRecord, NearestCommune, NeighborRef};

/// Upper bound on the "nearest communes" block of a landing page.
pub const NEAREST_LIMIT: usize = 10;

/// How many neighbour names the description sentence cites.
const DESCRIPTION_NEIGHBORS: usize = 3;

/// Population tiers for the generated quartier list. Comparisons are strict:
/// a commune of exactly 50 000 inhabitants stays in the lower tier.
const MID_POPULATION: u64 = 50_000;
const LARGE_POPULATION: u64 = 100_000;

/// Quartier names every commune page gets.
const QUARTIERS_BASE: [&str; 3] = ["Centre-ville", "Quartier de la Mairie", "Quartier de la Gare"];

/// Appended above 50 000 inhabitants.
const QUARTIERS_MID: [&str; 3] = [
    "Quartier du Marché",
    "Quartier des Écoles",
    "Résidences du Parc",
];

/// Appended above 100 000 inhabitants, on top of the mid tier.
const QUARTIERS_LARGE: [&str; 3] = [
    "Quartier de la Préfecture",
    "Quartier des Affaires",
    "Faubourg Nord",
];

/// Thousands separator produced by fr-FR locale formatting
/// (narrow no-break space).
const GROUP_SEPARATOR: char = '\u{202F}';

/// Derive the full landing-page record for one commune.
pub fn enrich(record: &CommuneRecord) -> CommunePage {
    let population_label = format_population(record.population);
    let description = describe(record, &population_label);

    CommunePage {
        slug: record.slug.clone(),
        name: record.name.clone(),
        postal_code: record.postal_code.clone(),
        department_name: record.department.name.clone(),
        department_code: record.department.code.clone(),
        department_slug: record.department.slug.clone(),
        population_label,
        latitude: record.latitude.clone(),
        longitude: record.longitude.clone(),
        region_name: record.region.name.clone(),
        description,
        quartiers: quartiers_for(record.population),
        nearest: nearest_communes(&record.neighbors),
    }
}

/// Render a population count with fr-FR digit grouping and a units label,
/// e.g. `2 165 423 habitants`.
pub fn format_population(population: u64) -> String {
    let digits: Vec<char> = population.to_string().chars().collect();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, digit) in digits.iter().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(GROUP_SEPARATOR);
        }
        grouped.push(*digit);
    }
    format!("{grouped} habitants")
}

/// Generated neighbourhood names: 3, 6 or 9 entries depending on population.
/// Tiers are cumulative, the higher ones append to the lower ones.
fn quartiers_for(population: u64) -> Vec<String> {
    let mut quartiers: Vec<String> = QUARTIERS_BASE.iter().map(|s| s.to_string()).collect();
    if population > MID_POPULATION {
        quartiers.extend(QUARTIERS_MID.iter().map(|s| s.to_string()));
    }
    if population > LARGE_POPULATION {
        quartiers.extend(QUARTIERS_LARGE.iter().map(|s| s.to_string()));
    }
    quartiers
}

/// First `NEAREST_LIMIT` neighbours, order and distances untouched.
///
/// The upstream corpus delivers neighbours pre-sorted by distance; this is
/// trusted, not re-checked, and nothing is deduplicated: if the source lists
/// the commune itself, it stays.
fn nearest_communes(neighbors: &[NeighborRef]) -> Vec<NearestCommune> {
    neighbors
        .iter()
        .take(NEAREST_LIMIT)
        .map(|n| NearestCommune {
            name: n.name.clone(),
            slug: n.slug.clone(),
            distance_km: n.distance_km,
            postal_code: n.postal_code.clone(),
        })
        .collect()
}

/// Deterministic marketing paragraph for one commune.
fn describe(record: &CommuneRecord, population_label: &str) -> String {
    let mut description = format!(
        "{} est une commune du département {} ({}) qui compte {}.",
        record.name, record.department.name, record.department.code, population_label
    );

    let closest: Vec<&str> = record
        .neighbors
        .iter()
        .take(DESCRIPTION_NEIGHBORS)
        .map(|n| n.name.as_str())
        .collect();

    match closest.len() {
        0 => {}
        1 => {
            description.push_str(&format!(" La commune la plus proche est {}.", closest[0]));
        }
        _ => {
            description.push_str(&format!(
                " Les communes les plus proches sont {}.",
                join_names(&closest)
            ));
        }
    }

    description
}

/// Join names the French way: `A`, `A et B`, `A, B et C`.
fn join_names(names: &[&str]) -> String {
    match names {
        [] => String::new(),
        [only] => (*only).to_string(),
        [init @ .., last] => format!("{} et {}", init.join(", "), last),
    }
}
