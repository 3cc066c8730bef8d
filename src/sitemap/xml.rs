//! Rendering of the sitemap document (sitemaps.org protocol).

use std::fmt::Write;

use anyhow::Result;
use chrono::NaiveDate;
use url::Url;

use crate::routes::SitemapEntry;

/// Render the urlset document. `<loc>` values are absolute URLs built from
/// the site origin; `date` becomes every entry's `<lastmod>` (the generation
/// date in production, injected here so rendering stays deterministic under
/// test).
pub fn render_sitemap(entries: &[SitemapEntry], base: &Url, date: NaiveDate) -> Result<String> {
    let mut xml = String::new();
    writeln!(xml, r#"<?xml version="1.0" encoding="UTF-8"?>"#)?;
    writeln!(
        xml,
        r#"<urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">"#
    )?;

    let lastmod = date.format("%Y-%m-%d");
    for entry in entries {
        let loc = base.join(&entry.path)?;
        writeln!(xml, "  <url>")?;
        writeln!(xml, "    <loc>{}</loc>", escape_xml(loc.as_str()))?;
        writeln!(xml, "    <lastmod>{lastmod}</lastmod>")?;
        writeln!(xml, "    <changefreq>{}</changefreq>", entry.changefreq)?;
        writeln!(xml, "    <priority>{:.1}</priority>", entry.priority)?;
        writeln!(xml, "  </url>")?;
    }

    writeln!(xml, "</urlset>")?;
    Ok(xml)
}

/// Escape the five XML-reserved characters.
fn escape_xml(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routes::ChangeFrequency;

    fn entry(path: &str) -> SitemapEntry {
        SitemapEntry {
            path: path.to_string(),
            priority: 0.7,
            changefreq: ChangeFrequency::Weekly,
        }
    }

    #[test]
    fn test_renders_protocol_shape() {
        let base = Url::parse("https://www.example.fr").unwrap();
        let date = NaiveDate::from_ymd_opt(2026, 8, 25).unwrap();
        let xml = render_sitemap(&[entry("/villes/meaux")], &base, date).unwrap();

        assert!(xml.starts_with(r#"<?xml version="1.0" encoding="UTF-8"?>"#));
        assert!(xml.contains(r#"<urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">"#));
        assert!(xml.contains("<loc>https://www.example.fr/villes/meaux</loc>"));
        assert!(xml.contains("<lastmod>2026-08-25</lastmod>"));
        assert!(xml.contains("<changefreq>weekly</changefreq>"));
        assert!(xml.contains("<priority>0.7</priority>"));
        assert!(xml.trim_end().ends_with("</urlset>"));
    }

    #[test]
    fn test_one_url_element_per_entry() {
        let base = Url::parse("https://www.example.fr").unwrap();
        let date = NaiveDate::from_ymd_opt(2026, 8, 25).unwrap();
        let entries = vec![entry("/"), entry("/contact"), entry("/villes/meaux")];
        let xml = render_sitemap(&entries, &base, date).unwrap();

        assert_eq!(xml.matches("<url>").count(), 3);
        assert_eq!(xml.matches("</url>").count(), 3);
    }

    #[test]
    fn test_escapes_reserved_characters_in_loc() {
        let base = Url::parse("https://www.example.fr").unwrap();
        let date = NaiveDate::from_ymd_opt(2026, 8, 25).unwrap();
        let xml = render_sitemap(&[entry("/villes/meaux?from=a&to=b")], &base, date).unwrap();

        assert!(xml.contains("from=a&amp;to=b"));
        assert!(!xml.contains("from=a&to=b"));
    }

    #[test]
    fn test_priority_has_one_decimal() {
        let base = Url::parse("https://www.example.fr").unwrap();
        let date = NaiveDate::from_ymd_opt(2026, 8, 25).unwrap();
        let mut home = entry("/");
        home.priority = 1.0;
        let xml = render_sitemap(&[home], &base, date).unwrap();

        assert!(xml.contains("<priority>1.0</priority>"));
    }
}
