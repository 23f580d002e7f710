//! Route building: URL paths under the trailing-slash policy, and the
//! route → output file mapping for the configured build format.
//!
//! A route is a site-relative URL path (`/compare/apollo-vs-instantly/`).
//! Every route the generator emits or links to goes through this module so
//! the slash policy is applied in exactly one place.
//!
//! ```text
//! Source: content/010-Compare/020-Apollo-vs-Instantly.md
//! Route:  /compare/apollo-vs-instantly/          (trailing_slash = "always")
//! Output: dist/compare/apollo-vs-instantly/index.html  (format = "directory")
//! URL:    https://datastackguide.com/compare/apollo-vs-instantly/
//! ```

use crate::config::{OutputFormat, TrailingSlash};
use std::path::PathBuf;

/// Build a page route from an optional section slug and a page slug.
///
/// An empty page slug addresses the section landing page (or the home page
/// when there is no section). The root route is always `/`.
pub fn page_route(section: Option<&str>, slug: &str, policy: TrailingSlash) -> String {
    let mut path = String::from("/");
    if let Some(section) = section
        && !section.is_empty()
    {
        path.push_str(section);
        path.push('/');
    }
    if !slug.is_empty() {
        path.push_str(slug);
        path.push('/');
    }
    apply_policy(path, policy)
}

/// Normalize an already-absolute path to the policy. The root `/` is left
/// alone under either policy.
pub fn apply_policy(path: String, policy: TrailingSlash) -> String {
    if path == "/" {
        return path;
    }
    match policy {
        TrailingSlash::Always => {
            if path.ends_with('/') {
                path
            } else {
                format!("{path}/")
            }
        }
        TrailingSlash::Never => path.trim_end_matches('/').to_string(),
    }
}

/// Whether an absolute path carries the slash the policy requires.
pub fn conforms_to_policy(path: &str, policy: TrailingSlash) -> bool {
    if path == "/" {
        return true;
    }
    match policy {
        TrailingSlash::Always => path.ends_with('/'),
        TrailingSlash::Never => !path.ends_with('/'),
    }
}

/// Map a route to its output file, relative to the output directory.
///
/// - `directory` format: `/compare/x/` → `compare/x/index.html`
/// - `file` format: `/compare/x` → `compare/x.html`
///
/// The root route maps to `index.html` under either format.
pub fn output_rel_path(route: &str, format: OutputFormat) -> PathBuf {
    let trimmed = route.trim_matches('/');
    if trimmed.is_empty() {
        return PathBuf::from("index.html");
    }
    match format {
        OutputFormat::Directory => PathBuf::from(trimmed).join("index.html"),
        OutputFormat::File => PathBuf::from(format!("{trimmed}.html")),
    }
}

/// Absolute URL for a route: the site origin concatenated with the route.
pub fn full_url(origin: &str, route: &str) -> String {
    format!("{}{}", origin.trim_end_matches('/'), route)
}
