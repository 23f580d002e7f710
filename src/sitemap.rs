//! Sitemap generation.
//!
//! Builds the `sitemap.xml` document listing every page URL for search
//! engine discovery.
//!
//! # Sitemap Format
//!
//! ```xml
//! <?xml version="1.0" encoding="UTF-8"?>
//! <urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">
//!   <url>
//!     <loc>https://datastackguide.com/compare/instantly-vs-apollo/</loc>
//!     <lastmod>2026-01-15</lastmod>
//!   </url>
//! </urlset>
//! ```
//!
//! Entry selection and stamping follow the `[sitemap]` config: pages whose
//! route matches an `exclude` prefix are dropped, and a configured `lastmod`
//! stamps every remaining entry with that one date.

use crate::config::SiteConfig;
use crate::route;
use std::borrow::Cow;

const SITEMAP_NS: &str = "http://www.sitemaps.org/schemas/sitemap/0.9";

/// One `<url>` element.
#[derive(Debug, Clone, PartialEq)]
pub struct UrlEntry {
    pub loc: String,
    pub lastmod: Option<String>,
}

/// Build sitemap entries for the given routes, applying exclusions and the
/// uniform lastmod stamp from config. Order follows the input.
pub fn entries<'a>(config: &SiteConfig, routes: impl IntoIterator<Item = &'a str>) -> Vec<UrlEntry> {
    routes
        .into_iter()
        .filter(|r| {
            !config
                .sitemap
                .exclude
                .iter()
                .any(|prefix| r.starts_with(prefix.as_str()))
        })
        .map(|r| UrlEntry {
            loc: route::full_url(&config.site.url, r),
            lastmod: config.sitemap.lastmod.clone(),
        })
        .collect()
}

/// Serialize entries as a sitemaps.org XML document.
pub fn to_xml(entries: &[UrlEntry]) -> String {
    let mut xml = String::with_capacity(4096);

    xml.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
    xml.push_str("<urlset xmlns=\"");
    xml.push_str(SITEMAP_NS);
    xml.push_str("\">\n");

    for entry in entries {
        xml.push_str("  <url>\n    <loc>");
        xml.push_str(&escape_xml(&entry.loc));
        xml.push_str("</loc>\n");
        if let Some(lastmod) = &entry.lastmod {
            xml.push_str("    <lastmod>");
            xml.push_str(lastmod);
            xml.push_str("</lastmod>\n");
        }
        xml.push_str("  </url>\n");
    }

    xml.push_str("</urlset>\n");
    xml
}

/// Escape special XML characters.
fn escape_xml(s: &str) -> Cow<'_, str> {
    // Fast path: check if escaping is needed
    if !s.contains(['&', '<', '>', '"', '\'']) {
        return Cow::Borrowed(s);
    }

    Cow::Owned(
        s.replace('&', "&amp;")
            .replace('<', "&lt;")
            .replace('>', "&gt;")
            .replace('"', "&quot;")
            .replace('\'', "&apos;"),
    )
}
