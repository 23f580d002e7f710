//! Markdown rendering.
//!
//! Stage 2 of the guidepress build pipeline. Takes the scan manifest and
//! renders every page's markdown body to an HTML fragment, in parallel,
//! skipping pages whose source and render parameters are unchanged since
//! the last build (see [`cache`](crate::cache)).
//!
//! ## Output Structure
//!
//! ```text
//! rendered/
//! ├── manifest.json                     # Manifest with fragment paths
//! ├── .render-cache.json                # Cache manifest
//! ├── index.html                        # Home page fragment
//! ├── about.html
//! └── compare/
//!     ├── index.html
//!     └── instantly-vs-apollo.html
//! ```
//!
//! Fragments are body HTML only; the generate stage wraps them in the full
//! document (head, nav, breadcrumbs, JSON-LD).

use crate::cache::{self, CacheManifest, CacheStats};
use crate::config::SiteConfig;
use crate::scan;
use crate::types::{NavItem, Page, RenderedPage};
use pulldown_cmark::{Options, Parser, html as md_html};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::sync::mpsc::Sender;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Enabled markdown extensions, named so the cache key tracks them.
const EXTENSIONS: &[&str] = &["tables", "strikethrough", "footnotes", "smart-punctuation"];

/// Fragment format revision. Bump when the fragment contract changes
/// (e.g. rendered HTML structure) to invalidate cached fragments.
const FORMAT_REV: u32 = 1;

/// Manifest output from the render stage.
#[derive(Debug, Serialize, Deserialize)]
pub struct Manifest {
    pub navigation: Vec<NavItem>,
    pub pages: Vec<RenderedPage>,
    pub config: SiteConfig,
}

/// Result of a render run: the manifest for the next stage plus cache stats.
pub struct RenderResult {
    pub manifest: Manifest,
    pub cache_stats: CacheStats,
}

/// Per-page progress event, sent as pages complete.
#[derive(Debug, Clone)]
pub enum RenderEvent {
    Cached { route: String },
    Copied { route: String },
    Rendered { route: String },
}

enum Outcome {
    Hit,
    Copied,
    Rendered,
}

/// Render all pages from a scan manifest into `rendered_dir`.
pub fn render(
    scan_manifest_path: &Path,
    rendered_dir: &Path,
    use_cache: bool,
    progress: Option<Sender<RenderEvent>>,
) -> Result<RenderResult, RenderError> {
    let content = fs::read_to_string(scan_manifest_path)?;
    let manifest: scan::Manifest = serde_json::from_str(&content)?;

    fs::create_dir_all(rendered_dir)?;

    let cache_manifest = if use_cache {
        CacheManifest::load(rendered_dir)
    } else {
        CacheManifest::empty()
    };
    let params_hash = cache::hash_render_params(EXTENSIONS, FORMAT_REV);

    let results: Vec<Result<(Page, String, String, Outcome), RenderError>> = manifest
        .pages
        .into_par_iter()
        .map(|page| {
            let fragment_rel = fragment_path(&page);
            let fragment_abs = rendered_dir.join(&fragment_rel);
            if let Some(parent) = fragment_abs.parent() {
                fs::create_dir_all(parent)?;
            }

            let source_hash = cache::hash_source(&page.body);
            let outcome =
                match cache_manifest.find_cached(&source_hash, &params_hash, rendered_dir) {
                    Some(stored) if stored == fragment_rel => Outcome::Hit,
                    Some(stored) => {
                        fs::copy(rendered_dir.join(&stored), &fragment_abs)?;
                        Outcome::Copied
                    }
                    None => {
                        let html = render_markdown(&page.body);
                        fs::write(&fragment_abs, html)?;
                        Outcome::Rendered
                    }
                };
            Ok((page, fragment_rel, source_hash, outcome))
        })
        .collect();

    let mut next_cache = CacheManifest::empty();
    let mut stats = CacheStats::default();
    let mut pages = Vec::with_capacity(results.len());

    for result in results {
        let (page, fragment_rel, source_hash, outcome) = result?;
        next_cache.insert(fragment_rel.clone(), source_hash, params_hash.clone());
        let event = match outcome {
            Outcome::Hit => {
                stats.hit();
                RenderEvent::Cached {
                    route: page.route.clone(),
                }
            }
            Outcome::Copied => {
                stats.copy();
                RenderEvent::Copied {
                    route: page.route.clone(),
                }
            }
            Outcome::Rendered => {
                stats.miss();
                RenderEvent::Rendered {
                    route: page.route.clone(),
                }
            }
        };
        if let Some(tx) = &progress {
            // Receiver hangup is not an error worth failing the build over
            let _ = tx.send(event);
        }
        pages.push(RenderedPage {
            page,
            fragment: fragment_rel,
        });
    }

    next_cache.save(rendered_dir)?;

    Ok(RenderResult {
        manifest: Manifest {
            navigation: manifest.navigation,
            pages,
            config: manifest.config,
        },
        cache_stats: stats,
    })
}

/// Fragment file for a page, relative to the rendered directory.
///
/// Mirrors the route so fragments stay human-inspectable:
/// `/` → `index.html`, `/compare/` → `compare/index.html`,
/// `/compare/x/` → `compare/x.html`.
fn fragment_path(page: &Page) -> String {
    let trimmed = page.route.trim_matches('/');
    if trimmed.is_empty() {
        return "index.html".to_string();
    }
    if page.is_index {
        format!("{trimmed}/index.html")
    } else {
        format!("{trimmed}.html")
    }
}

/// Render one markdown body to HTML with the extension set in [`EXTENSIONS`].
pub fn render_markdown(body: &str) -> String {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_STRIKETHROUGH);
    options.insert(Options::ENABLE_FOOTNOTES);
    options.insert(Options::ENABLE_SMART_PUNCTUATION);
    let parser = Parser::new_ext(body, options);
    let mut html = String::with_capacity(body.len() * 2);
    md_html::push_html(&mut html, parser);
    html
}
