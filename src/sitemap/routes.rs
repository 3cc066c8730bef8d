//! Route derivation for the sitemap document.
//!
//! Routes come from three sources, concatenated in a fixed order: the static
//! page set, one route per département in the manifest, one route per
//! commune slug in the manifest. No de-duplication happens here; slug
//! uniqueness is inherited from the dataset's keys.

use std::fmt;

use lutece::models::DatasetManifest;

/// Standard sitemap-protocol change frequency tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeFrequency {
    Always,
    Hourly,
    Daily,
    Weekly,
    Monthly,
    Yearly,
    Never,
}

impl fmt::Display for ChangeFrequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let token = match self {
            ChangeFrequency::Always => "always",
            ChangeFrequency::Hourly => "hourly",
            ChangeFrequency::Daily => "daily",
            ChangeFrequency::Weekly => "weekly",
            ChangeFrequency::Monthly => "monthly",
            ChangeFrequency::Yearly => "yearly",
            ChangeFrequency::Never => "never",
        };
        write!(f, "{token}")
    }
}

/// One sitemap url entry, site-relative.
#[derive(Debug, Clone)]
pub struct SitemapEntry {
    pub path: String,
    /// In [0.0, 1.0] per the sitemap protocol.
    pub priority: f32,
    pub changefreq: ChangeFrequency,
}

/// The static pages of the site.
pub const STATIC_ROUTES: [(&str, f32, ChangeFrequency); 5] = [
    ("/", 1.0, ChangeFrequency::Weekly),
    ("/devis", 0.9, ChangeFrequency::Monthly),
    ("/services", 0.8, ChangeFrequency::Monthly),
    ("/contact", 0.5, ChangeFrequency::Monthly),
    ("/mentions-legales", 0.3, ChangeFrequency::Yearly),
];

const DEPARTMENT_PRIORITY: f32 = 0.8;
const COMMUNE_PRIORITY: f32 = 0.7;

/// Build the full route list from the dataset manifest:
/// static → départements → communes.
pub fn derive_routes(manifest: &DatasetManifest) -> Vec<SitemapEntry> {
    let mut entries: Vec<SitemapEntry> = STATIC_ROUTES
        .iter()
        .map(|(path, priority, changefreq)| SitemapEntry {
            path: (*path).to_string(),
            priority: *priority,
            changefreq: *changefreq,
        })
        .collect();

    for department in &manifest.departments {
        entries.push(SitemapEntry {
            path: format!("/departements/{}", department.slug),
            priority: DEPARTMENT_PRIORITY,
            changefreq: ChangeFrequency::Weekly,
        });
    }

    for slug in &manifest.slugs {
        entries.push(SitemapEntry {
            path: format!("/villes/{slug}"),
            priority: COMMUNE_PRIORITY,
            changefreq: ChangeFrequency::Weekly,
        });
    }

    entries
}
