//! Shared test utilities for the guidepress test suite.
//!
//! Provides a programmatic fixture content tree plus lookup helpers and
//! navigation assertions over scan-phase data structures.
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let tmp = setup_fixtures();
//! let manifest = scan(tmp.path()).unwrap();
//!
//! let page = find_page(&manifest, "instantly-vs-apollo");
//! assert_eq!(page.route, "/compare/instantly-vs-apollo/");
//!
//! assert_nav_shape(&manifest, &[
//!     ("Compare", &["Instantly vs Apollo", "Smartlead vs Lemlist"]),
//!     ("Tools", &["Apollo"]),
//!     ("About", &[]),
//! ]);
//! ```

use std::fs;
use std::path::Path;
use tempfile::TempDir;

use crate::scan::Manifest;
use crate::types::Page;

// =========================================================================
// Fixture setup
// =========================================================================

/// Build the standard fixture content tree in a temp directory.
///
/// Tests get an isolated copy they can mutate without affecting each other.
/// The tree mirrors a small comparison site: a home page, an about page,
/// two numbered sections, an unnumbered drafts section, and a config with
/// one redirect.
pub fn setup_fixtures() -> TempDir {
    let tmp = TempDir::new().unwrap();
    write_fixture_tree(tmp.path());
    tmp
}

pub fn write_fixture_tree(root: &Path) {
    let write = |rel: &str, content: &str| {
        let path = root.join(rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, content).unwrap();
    };

    write(
        "config.toml",
        r#"
[site]
url = "https://datastackguide.com"
title = "DataStack Guide"
description = "Independent comparisons of sales and data tools."

[redirects]
"/compare/apollo-vs-instantly/" = "/compare/instantly-vs-apollo/"
"#,
    );

    write(
        "index.md",
        "# DataStack Guide\n\nIndependent, hands-on comparisons of sales and data tooling \
         for growth teams.\n\nStart with [the comparisons](/compare/).\n",
    );

    write(
        "040-About.md",
        "# About This Site\n\nWho writes these guides and how we test the tools we cover.\n",
    );

    write(
        "010-Compare/index.md",
        "# Tool Comparisons\n\nHead-to-head comparisons across pricing, deliverability, \
         and data quality.\n",
    );

    write(
        "010-Compare/010-Instantly-vs-Apollo.md",
        "# Instantly vs Apollo: Which Wins?\n\nInstantly and Apollo both promise scalable \
         outbound, but they price and deliver very differently.\n\nSee the \
         [Apollo profile](/tools/apollo/) for the full feature table.\n",
    );

    write(
        "010-Compare/020-Smartlead-vs-Lemlist.md",
        "# Smartlead vs Lemlist\n\nSmartlead leans on unlimited mailboxes while Lemlist \
         sells personalization depth.\n",
    );

    write(
        "020-Tools/index.md",
        "# Tool Library\n\nEvery tool we have tested, with pricing notes and alternatives.\n",
    );

    write(
        "020-Tools/010-Apollo.md",
        "# Apollo\n\nApollo bundles a contact database with sequencing and enrichment.\n",
    );

    write(
        "drafts/notes.md",
        "# Working Notes\n\nUnpublished material; reachable by URL but not linked.\n",
    );
}

// =========================================================================
// Manifest lookups — panics with a clear message on miss
// =========================================================================

/// Find a page by slug. Panics if not found.
pub fn find_page<'a>(manifest: &'a Manifest, slug: &str) -> &'a Page {
    manifest
        .pages
        .iter()
        .find(|p| p.slug == slug)
        .unwrap_or_else(|| {
            let slugs: Vec<&str> = manifest.pages.iter().map(|p| p.slug.as_str()).collect();
            panic!("page '{slug}' not found. Available: {slugs:?}")
        })
}

/// Find a page by route. Panics if not found.
pub fn find_page_by_route<'a>(manifest: &'a Manifest, route: &str) -> &'a Page {
    manifest
        .pages
        .iter()
        .find(|p| p.route == route)
        .unwrap_or_else(|| {
            let routes: Vec<&str> = manifest.pages.iter().map(|p| p.route.as_str()).collect();
            panic!("route '{route}' not found. Available: {routes:?}")
        })
}

// =========================================================================
// Bulk extractors
// =========================================================================

/// All page routes in manifest order.
pub fn page_routes(manifest: &Manifest) -> Vec<&str> {
    manifest.pages.iter().map(|p| p.route.as_str()).collect()
}

// =========================================================================
// Navigation helpers
// =========================================================================

/// Top-level navigation titles in order.
pub fn nav_titles(manifest: &Manifest) -> Vec<&str> {
    manifest
        .navigation
        .iter()
        .map(|n| n.title.as_str())
        .collect()
}

/// Child titles under a given nav parent. Panics if parent not found.
pub fn nav_children_titles<'a>(manifest: &'a Manifest, parent_title: &str) -> Vec<&'a str> {
    manifest
        .navigation
        .iter()
        .find(|n| n.title == parent_title)
        .map(|n| n.children.iter().map(|c| c.title.as_str()).collect())
        .unwrap_or_else(|| {
            let titles = nav_titles(manifest);
            panic!("nav item '{parent_title}' not found. Available: {titles:?}")
        })
}

/// Assert that the full navigation tree matches an expected shape.
///
/// Each entry is `(title, children)`. Use `&[]` for leaf nodes.
pub fn assert_nav_shape(manifest: &Manifest, expected: &[(&str, &[&str])]) {
    let actual: Vec<&str> = nav_titles(manifest);
    let expected_titles: Vec<&str> = expected.iter().map(|(t, _)| *t).collect();
    assert_eq!(actual, expected_titles, "nav top-level titles mismatch");

    for (title, children) in expected {
        let actual_children = nav_children_titles(manifest, title);
        assert_eq!(
            actual_children,
            children.to_vec(),
            "nav children of '{title}' mismatch"
        );
    }
}
