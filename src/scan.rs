//! Content discovery and manifest generation.
//!
//! Stage 1 of the guidepress build pipeline. Walks the content directory to
//! discover pages and sections, producing a structured manifest that
//! subsequent stages consume.
//!
//! ## Directory Structure
//!
//! ```text
//! content/                          # Content root
//! ├── config.toml                   # Site configuration (optional)
//! ├── assets/                       # Static assets → copied to output root
//! ├── index.md                      # Home page (/)
//! ├── 040-About.md                  # Top-level page (numbered = in nav)
//! ├── 010-Compare/                  # Section (numbered = in nav)
//! │   ├── index.md                  # Section landing page (/compare/)
//! │   ├── 010-Instantly-vs-Apollo.md
//! │   └── 020-Smartlead-vs-Lemlist.md
//! └── drafts/                       # Unnumbered = built, hidden from nav
//!     └── notes.md
//! ```
//!
//! ## Naming Conventions
//!
//! - **Numbered entries** (`NNN-Name`): appear in navigation, sorted by number
//! - **Unnumbered entries**: pages exist but are hidden from navigation
//! - **`index.md`**: home page at the root, landing page inside a section
//! - Slugs are the lowercased name portion: `020-Apollo-vs-Instantly.md`
//!   becomes `/compare/apollo-vs-instantly/`
//!
//! ## Validation
//!
//! The scanner enforces these rules:
//! - Sections nest exactly one level (no directories inside a section)
//! - No two files may map to the same route
//! - The site config must pass its own validation ([`config::load_config`])

use crate::config::{self, SiteConfig};
use crate::meta;
use crate::naming::parse_entry_name;
use crate::route;
use crate::types::{NavItem, Page};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::WalkDir;

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Config error: {0}")]
    Config(#[from] config::ConfigError),
    #[error("Walk error: {0}")]
    Walk(#[from] walkdir::Error),
    #[error("Sections nest one level deep; found directory inside a section: {0}")]
    NestedSection(PathBuf),
    #[error("Two sources map to the same route {route}: {first} and {second}")]
    DuplicateRoute {
        route: String,
        first: String,
        second: String,
    },
}

/// Manifest output from the scan stage.
#[derive(Debug, Serialize, Deserialize)]
pub struct Manifest {
    pub navigation: Vec<NavItem>,
    pub pages: Vec<Page>,
    pub config: SiteConfig,
}

/// A section directory and the pages inside it.
struct Section {
    slug: String,
    title: String,
    number: Option<u32>,
    pages: Vec<Page>,
}

pub fn scan(root: &Path) -> Result<Manifest, ScanError> {
    let config = config::load_config(root)?;

    let mut top_pages: Vec<Page> = Vec::new();
    let mut sections: BTreeMap<PathBuf, Section> = BTreeMap::new();

    // filter_entry also sees the walk root; depth 0 must pass regardless of
    // what the content directory happens to be called
    let walker = WalkDir::new(root)
        .min_depth(1)
        .max_depth(2)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| {
            e.depth() == 0 || !is_skipped(e.file_name().to_string_lossy().as_ref())
        });

    for entry in walker {
        let entry = entry?;
        let path = entry.path();
        let depth = entry.depth();

        if entry.file_type().is_dir() {
            if depth == 2 {
                return Err(ScanError::NestedSection(path.to_path_buf()));
            }
            let parsed = parse_entry_name(&path.file_name().unwrap_or_default().to_string_lossy());
            sections.insert(
                path.to_path_buf(),
                Section {
                    slug: parsed.slug(),
                    title: parsed.display_title.clone(),
                    number: parsed.number,
                    pages: Vec::new(),
                },
            );
            continue;
        }

        if !is_markdown(path) {
            continue;
        }

        if depth == 1 {
            let page = build_page(path, root, None, None, &config)?;
            top_pages.push(page);
        } else {
            let parent = path.parent().unwrap_or(root).to_path_buf();
            // Sorted walk yields a directory before its contents
            let section = sections
                .get_mut(&parent)
                .expect("section seen before its pages");
            let slug = section.slug.clone();
            let title = section.title.clone();
            let page = build_page(path, root, Some(&slug), Some(&title), &config)?;
            section.pages.push(page);
        }
    }

    top_pages.sort_by(|a, b| (a.sort_key, &a.slug).cmp(&(b.sort_key, &b.slug)));
    for section in sections.values_mut() {
        section
            .pages
            .sort_by(|a, b| (a.sort_key, &a.slug).cmp(&(b.sort_key, &b.slug)));
    }

    let navigation = build_navigation(&top_pages, &sections);
    let pages = flatten_pages(top_pages, sections);
    check_unique_routes(&pages)?;

    Ok(Manifest {
        navigation,
        pages,
        config,
    })
}

/// Entries never treated as content.
fn is_skipped(name: &str) -> bool {
    name.starts_with('.') || name == "config.toml" || name == "assets" || name == "dist"
}

fn is_markdown(path: &Path) -> bool {
    path.extension()
        .map(|e| e.eq_ignore_ascii_case("md"))
        .unwrap_or(false)
}

fn build_page(
    path: &Path,
    root: &Path,
    section_slug: Option<&str>,
    section_title: Option<&str>,
    config: &SiteConfig,
) -> Result<Page, ScanError> {
    let policy = config.trailing_slash;
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_default();
    let source_path = path
        .strip_prefix(root)
        .unwrap_or(path)
        .to_string_lossy()
        .to_string();
    let body = fs::read_to_string(path)?;

    let is_index = stem == "index";
    let (slug, link_title, in_nav, sort_key) = if is_index {
        // Home page or section landing; ordered first within its level
        let label = section_title.unwrap_or("Home").to_string();
        (String::new(), label, false, 0)
    } else {
        let parsed = parse_entry_name(&stem);
        let in_nav = parsed.number.is_some();
        let sort_key = parsed.number.unwrap_or(u32::MAX);
        (parsed.slug(), parsed.display_title.clone(), in_nav, sort_key)
    };

    let route = route::page_route(section_slug, &slug, policy);
    let title = meta::extract_title(&body).unwrap_or_else(|| {
        if link_title.is_empty() {
            stem.clone()
        } else {
            link_title.clone()
        }
    });
    let description = meta::extract_description(&body);

    Ok(Page {
        title,
        link_title,
        slug,
        section: section_slug.map(str::to_string),
        route,
        description,
        source_path,
        body,
        in_nav,
        sort_key,
        is_index,
    })
}

/// Navigation: numbered top-level pages and numbered sections, interleaved
/// by their number prefix. Section entries carry their numbered pages as
/// children.
fn build_navigation(top_pages: &[Page], sections: &BTreeMap<PathBuf, Section>) -> Vec<NavItem> {
    let mut keyed: Vec<(u32, NavItem)> = Vec::new();

    for page in top_pages.iter().filter(|p| p.in_nav) {
        keyed.push((
            page.sort_key,
            NavItem {
                title: page.link_title.clone(),
                route: page.route.clone(),
                children: vec![],
            },
        ));
    }

    for section in sections.values() {
        let Some(number) = section.number else {
            continue;
        };
        let children: Vec<NavItem> = section
            .pages
            .iter()
            .filter(|p| p.in_nav)
            .map(|p| NavItem {
                title: p.link_title.clone(),
                route: p.route.clone(),
                children: vec![],
            })
            .collect();
        // The section route highlights the whole subtree as current
        let route = section
            .pages
            .iter()
            .find(|p| p.is_index)
            .map(|p| p.route.clone())
            .unwrap_or_default();
        keyed.push((
            number,
            NavItem {
                title: section.title.clone(),
                route,
                children,
            },
        ));
    }

    keyed.sort_by(|a, b| (a.0, &a.1.title).cmp(&(b.0, &b.1.title)));
    keyed.into_iter().map(|(_, item)| item).collect()
}

/// Flatten to one ordered page list: home first, then top-level pages,
/// then each section's pages (landing page first).
fn flatten_pages(top_pages: Vec<Page>, sections: BTreeMap<PathBuf, Section>) -> Vec<Page> {
    let mut pages: Vec<Page> = Vec::new();
    let (home, rest): (Vec<Page>, Vec<Page>) = top_pages.into_iter().partition(|p| p.is_index);
    pages.extend(home);
    pages.extend(rest);
    for section in sections.into_values() {
        let (landing, rest): (Vec<Page>, Vec<Page>) =
            section.pages.into_iter().partition(|p| p.is_index);
        pages.extend(landing);
        pages.extend(rest);
    }
    pages
}

fn check_unique_routes(pages: &[Page]) -> Result<(), ScanError> {
    let mut seen: BTreeMap<&str, &str> = BTreeMap::new();
    for page in pages {
        if let Some(first) = seen.insert(&page.route, &page.source_path) {
            return Err(ScanError::DuplicateRoute {
                route: page.route.clone(),
                first: first.to_string(),
                second: page.source_path.clone(),
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::*;

    #[test]
    fn scan_discovers_all_pages() {
        let tmp = setup_fixtures();
        let manifest = scan(tmp.path()).unwrap();

        // home + about + 3 compare + 2 tools + 1 draft
        assert_eq!(manifest.pages.len(), 8);
        assert!(manifest.pages.iter().any(|p| p.route == "/"));
        assert!(
            manifest
                .pages
                .iter()
                .any(|p| p.route == "/compare/instantly-vs-apollo/")
        );
    }

    #[test]
    fn home_page_is_first() {
        let tmp = setup_fixtures();
        let manifest = scan(tmp.path()).unwrap();
        let first = &manifest.pages[0];
        assert!(first.is_index);
        assert_eq!(first.route, "/");
        assert_eq!(first.title, "DataStack Guide");
    }

    #[test]
    fn slugs_are_lowercased() {
        let tmp = setup_fixtures();
        let manifest = scan(tmp.path()).unwrap();
        let page = find_page(&manifest, "instantly-vs-apollo");
        assert_eq!(page.route, "/compare/instantly-vs-apollo/");
        assert_eq!(page.link_title, "Instantly vs Apollo");
    }

    #[test]
    fn titles_come_from_first_heading() {
        let tmp = setup_fixtures();
        let manifest = scan(tmp.path()).unwrap();
        let page = find_page(&manifest, "instantly-vs-apollo");
        assert_eq!(page.title, "Instantly vs Apollo: Which Wins?");
    }

    #[test]
    fn descriptions_come_from_first_paragraph() {
        let tmp = setup_fixtures();
        let manifest = scan(tmp.path()).unwrap();
        let page = find_page(&manifest, "instantly-vs-apollo");
        assert!(
            page.description
                .as_deref()
                .unwrap()
                .starts_with("Instantly and Apollo")
        );
    }

    #[test]
    fn unnumbered_pages_hidden_from_nav() {
        let tmp = setup_fixtures();
        let manifest = scan(tmp.path()).unwrap();
        let draft = find_page(&manifest, "notes");
        assert!(!draft.in_nav);
        assert!(!nav_titles(&manifest).contains(&"notes"));
    }

    #[test]
    fn nav_shape_matches_numbering() {
        let tmp = setup_fixtures();
        let manifest = scan(tmp.path()).unwrap();
        assert_nav_shape(
            &manifest,
            &[
                ("Compare", &["Instantly vs Apollo", "Smartlead vs Lemlist"]),
                ("Tools", &["Apollo"]),
                ("About", &[]),
            ],
        );
    }

    #[test]
    fn section_nav_route_is_landing_page() {
        let tmp = setup_fixtures();
        let manifest = scan(tmp.path()).unwrap();
        let compare = manifest
            .navigation
            .iter()
            .find(|n| n.title == "Compare")
            .unwrap();
        assert_eq!(compare.route, "/compare/");
    }

    #[test]
    fn routes_honor_never_policy() {
        let tmp = setup_fixtures();
        // Replace the fixture config wholesale: its redirect table carries
        // trailing slashes, which the "never" policy would reject.
        fs::write(
            tmp.path().join("config.toml"),
            r#"
trailing_slash = "never"

[site]
url = "https://datastackguide.com"
"#,
        )
        .unwrap();
        let manifest = scan(tmp.path()).unwrap();
        let page = find_page(&manifest, "instantly-vs-apollo");
        assert_eq!(page.route, "/compare/instantly-vs-apollo");
    }

    #[test]
    fn duplicate_route_rejected() {
        let tmp = setup_fixtures();
        fs::write(tmp.path().join("015-about.md"), "# Other About\n").unwrap();
        let err = scan(tmp.path()).unwrap_err();
        assert!(matches!(err, ScanError::DuplicateRoute { .. }));
    }

    #[test]
    fn nested_section_rejected() {
        let tmp = setup_fixtures();
        let nested = tmp.path().join("010-Compare/sub");
        fs::create_dir_all(&nested).unwrap();
        let err = scan(tmp.path()).unwrap_err();
        assert!(matches!(err, ScanError::NestedSection(_)));
    }

    #[test]
    fn assets_and_hidden_files_skipped() {
        let tmp = setup_fixtures();
        fs::create_dir_all(tmp.path().join("assets")).unwrap();
        fs::write(tmp.path().join("assets/readme.md"), "# not content").unwrap();
        fs::write(tmp.path().join(".hidden.md"), "# hidden").unwrap();
        let manifest = scan(tmp.path()).unwrap();
        assert!(!manifest.pages.iter().any(|p| p.title == "not content"));
        assert!(!manifest.pages.iter().any(|p| p.title == "hidden"));
    }

    #[test]
    fn config_errors_propagate() {
        let tmp = setup_fixtures();
        fs::write(tmp.path().join("config.toml"), "[site]\nurl = \"nope\"\n").unwrap();
        assert!(matches!(
            scan(tmp.path()).unwrap_err(),
            ScanError::Config(_)
        ));
    }
}
