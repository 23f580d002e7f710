//! HTML site generation.
//!
//! Stage 3 of the guidepress build pipeline. Takes the rendered manifest
//! and emits the final static site.
//!
//! ## Generated Output
//!
//! - **Pages**: every page at its route, laid out per `build.format`
//!   (directory format: `compare/instantly-vs-apollo/index.html`). Each
//!   `<head>` carries the page title, meta description, canonical URL, and
//!   a JSON-LD `BreadcrumbList` block for the page's navigation path.
//! - **Redirect pages**: one per `[redirects]` entry at the old path — a
//!   meta-refresh document pointing at the new path, canonical on the new
//!   URL, marked `noindex`.
//! - **`sitemap.xml`**: every non-excluded page URL, optionally stamped
//!   with the configured last-modified date.
//! - **Stylesheet**: CSS custom properties from config prepended to the
//!   embedded base stylesheet, inlined into every page.
//! - **Assets**: `content/assets/` copied to the output root.
//!
//! ## Output Structure
//!
//! ```text
//! dist/
//! ├── index.html
//! ├── about/index.html
//! ├── sitemap.xml
//! ├── compare/
//! │   ├── index.html
//! │   ├── instantly-vs-apollo/index.html
//! │   └── apollo-vs-instantly/index.html     # redirect page
//! └── favicon.ico                            # copied asset
//! ```
//!
//! ## HTML Generation
//!
//! Uses [maud](https://maud.lambda.xyz/) for compile-time HTML templating.
//! Interpolation is auto-escaped; `PreEscaped` appears exactly twice — for
//! rendered markdown fragments and for the serialized JSON-LD payload.

use crate::config::{self, SiteConfig};
use crate::render;
use crate::route;
use crate::schema::{self, BreadcrumbItem};
use crate::sitemap;
use crate::types::{NavItem, RenderedPage};
use maud::{DOCTYPE, Markup, PreEscaped, html};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GenerateError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

const CSS_STATIC: &str = include_str!("../static/style.css");

/// What a generate run wrote, for reporting.
#[derive(Debug)]
pub struct Summary {
    /// (route, output path relative to the output dir) per page, in order.
    pub pages: Vec<(String, PathBuf)>,
    /// (old path, new path) per redirect, in order.
    pub redirects: Vec<(String, String)>,
    /// Sitemap path relative to the output dir, when enabled.
    pub sitemap: Option<PathBuf>,
}

pub fn generate(
    manifest_path: &Path,
    rendered_dir: &Path,
    output_dir: &Path,
    content_dir: &Path,
) -> Result<Summary, GenerateError> {
    let manifest_content = fs::read_to_string(manifest_path)?;
    let manifest: render::Manifest = serde_json::from_str(&manifest_content)?;
    let config = &manifest.config;

    // Config-driven custom properties ahead of the embedded base styles
    let css = format!(
        "{}\n\n{}\n\n{}",
        config::generate_color_css(&config.colors),
        config::generate_theme_css(&config.theme),
        CSS_STATIC
    );

    fs::create_dir_all(output_dir)?;

    // Section landing pages give breadcrumb trails their middle step
    let sections = section_index(&manifest.pages);

    let mut summary = Summary {
        pages: Vec::with_capacity(manifest.pages.len()),
        redirects: Vec::new(),
        sitemap: None,
    };

    for rp in &manifest.pages {
        let fragment = fs::read_to_string(rendered_dir.join(&rp.fragment))?;
        let trail = breadcrumb_trail(rp, &sections);
        let jsonld = serde_json::to_string(&schema::breadcrumb_schema(&config.site.url, &trail))?;

        let page_html = render_page(rp, &fragment, &trail, &manifest.navigation, config, &css, &jsonld);

        let rel = route::output_rel_path(&rp.page.route, config.build.format);
        let out_path = output_dir.join(&rel);
        if let Some(parent) = out_path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&out_path, page_html.into_string())?;
        summary.pages.push((rp.page.route.clone(), rel));
    }

    for (source, target) in &config.redirects {
        let rel = route::output_rel_path(source, config.build.format);
        let out_path = output_dir.join(&rel);
        if let Some(parent) = out_path.parent() {
            fs::create_dir_all(parent)?;
        }
        let canonical = route::full_url(&config.site.url, target);
        let redirect_html = render_redirect_page(target, &canonical);
        fs::write(&out_path, redirect_html.into_string())?;
        summary.redirects.push((source.clone(), target.clone()));
    }

    if config.sitemap.enable {
        let entries = sitemap::entries(
            config,
            manifest.pages.iter().map(|rp| rp.page.route.as_str()),
        );
        let sitemap_path = output_dir.join(&config.sitemap.path);
        if let Some(parent) = sitemap_path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&sitemap_path, sitemap::to_xml(&entries))?;
        summary.sitemap = Some(config.sitemap.path.clone());
    }

    let assets = content_dir.join("assets");
    if assets.is_dir() {
        copy_dir_recursive(&assets, output_dir)?;
    }

    Ok(summary)
}

/// Map section slug → (landing title, landing route).
fn section_index(pages: &[RenderedPage]) -> BTreeMap<String, (String, String)> {
    pages
        .iter()
        .filter(|rp| rp.page.is_index)
        .filter_map(|rp| {
            rp.page.section.as_ref().map(|section| {
                (
                    section.clone(),
                    (rp.page.title.clone(), rp.page.route.clone()),
                )
            })
        })
        .collect()
}

/// Breadcrumb trail for a page, root → current: Home, then the section
/// landing page (when the page lives in a section), then the page itself
/// with no destination.
fn breadcrumb_trail(
    rp: &RenderedPage,
    sections: &BTreeMap<String, (String, String)>,
) -> Vec<BreadcrumbItem> {
    let page = &rp.page;
    if page.route == "/" {
        return vec![BreadcrumbItem::current("Home")];
    }

    let mut trail = vec![BreadcrumbItem::new("Home", "/")];
    if let Some(section) = &page.section
        && !page.is_index
    {
        match sections.get(section) {
            Some((title, route)) => trail.push(BreadcrumbItem::new(title.clone(), route.clone())),
            // Section without a landing page: label only, nothing to link
            None => trail.push(BreadcrumbItem {
                label: section.replace('-', " "),
                href: None,
            }),
        }
    }
    trail.push(BreadcrumbItem::current(page.title.clone()));
    trail
}

fn copy_dir_recursive(src: &Path, dst: &Path) -> std::io::Result<()> {
    for entry in fs::read_dir(src)? {
        let entry = entry?;
        let src_path = entry.path();
        let dst_path = dst.join(entry.file_name());

        if src_path.is_dir() {
            fs::create_dir_all(&dst_path)?;
            copy_dir_recursive(&src_path, &dst_path)?;
        } else {
            fs::copy(&src_path, &dst_path)?;
        }
    }
    Ok(())
}

// ============================================================================
// HTML Components
// ============================================================================

/// Renders the base HTML document structure
fn base_document(
    title: &str,
    description: Option<&str>,
    canonical: &str,
    jsonld: &str,
    css: &str,
    content: Markup,
) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (title) }
                @if let Some(desc) = description {
                    meta name="description" content=(desc);
                }
                link rel="canonical" href=(canonical);
                script type="application/ld+json" { (PreEscaped(jsonld)) }
                style { (css) }
            }
            body {
                (content)
            }
        }
    }
}

/// Renders the site header with breadcrumb and navigation
fn site_header(breadcrumb: Markup, nav: Markup) -> Markup {
    html! {
        header.site-header {
            nav.breadcrumb aria-label="Breadcrumb" {
                (breadcrumb)
            }
            nav.site-nav {
                (nav)
            }
        }
    }
}

/// Breadcrumb trail markup: linked steps separated by `›`, current page as
/// plain text. Mirrors the JSON-LD trail exactly.
fn breadcrumb_markup(trail: &[BreadcrumbItem]) -> Markup {
    html! {
        @for (i, item) in trail.iter().enumerate() {
            @if i > 0 { " › " }
            @if let Some(href) = &item.href {
                a href=(href) { (item.label) }
            } @else {
                span { (item.label) }
            }
        }
    }
}

/// Renders the navigation menu
pub fn render_nav(items: &[NavItem], current_route: &str) -> Markup {
    html! {
        ul.nav-list {
            @for item in items {
                (render_nav_item(item, current_route))
            }
        }
    }
}

/// Renders a single navigation item (may have children)
fn render_nav_item(item: &NavItem, current_route: &str) -> Markup {
    let is_current = is_current_route(&item.route, current_route);

    html! {
        li class=[is_current.then_some("current")] {
            @if item.children.is_empty() {
                a href=(item.route) { (item.title) }
            } @else {
                @if item.route.is_empty() {
                    span.nav-group { (item.title) }
                } @else {
                    a.nav-group href=(item.route) { (item.title) }
                }
                ul {
                    @for child in &item.children {
                        (render_nav_item(child, current_route))
                    }
                }
            }
        }
    }
}

/// A nav item is current for its own route and for any route beneath it.
fn is_current_route(item_route: &str, current: &str) -> bool {
    if item_route.is_empty() {
        return false;
    }
    let base = item_route.trim_end_matches('/');
    if base.is_empty() {
        return current == "/";
    }
    current == item_route || current == base || current.starts_with(&format!("{base}/"))
}

// ============================================================================
// Page Renderers
// ============================================================================

fn render_page(
    rp: &RenderedPage,
    fragment: &str,
    trail: &[BreadcrumbItem],
    navigation: &[NavItem],
    config: &SiteConfig,
    css: &str,
    jsonld: &str,
) -> Markup {
    let page = &rp.page;
    let nav = render_nav(navigation, &page.route);
    let canonical = route::full_url(&config.site.url, &page.route);

    let doc_title = if page.route == "/" {
        config.site.title.clone()
    } else {
        format!("{} - {}", page.title, config.site.title)
    };
    let description = page
        .description
        .as_deref()
        .or((!config.site.description.is_empty()).then_some(config.site.description.as_str()));

    let content = html! {
        (site_header(breadcrumb_markup(trail), nav))
        main.content {
            article {
                (PreEscaped(fragment))
            }
        }
        footer.site-footer {
            p { (config.site.title) }
        }
    };

    base_document(&doc_title, description, &canonical, jsonld, css, content)
}

/// Renders a permanent-redirect page for one `[redirects]` entry.
///
/// Meta refresh with zero delay, canonical on the destination so search
/// engines transfer ranking, `noindex` so the stub itself never surfaces.
fn render_redirect_page(target: &str, canonical: &str) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="UTF-8";
                meta http-equiv="refresh" content=(format!("0; url={target}"));
                link rel="canonical" href=(canonical);
                meta name="robots" content="noindex";
                title { "Redirecting" }
            }
            body {
                p {
                    "This page has moved to "
                    a href=(target) { (target) }
                    "."
                }
            }
        }
    }
}
