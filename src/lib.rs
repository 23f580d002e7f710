//! # guidepress
//!
//! A minimal static site generator for marketing and comparison content
//! sites. Your filesystem is the data source: markdown files become pages,
//! directories become sections, and a numeric prefix controls navigation
//! order. The output is SEO-complete by construction — canonical URLs,
//! meta descriptions, breadcrumb structured data, a sitemap, and permanent
//! redirects all come from the same manifest.
//!
//! # Architecture: Three-Stage Pipeline
//!
//! guidepress processes content through three independent stages, each
//! producing a JSON manifest that the next stage consumes:
//!
//! ```text
//! 1. Scan      content/  →  manifest.json    (filesystem → structured data)
//! 2. Render    manifest  →  rendered/        (markdown → HTML fragments)
//! 3. Generate  manifest  →  dist/            (final HTML site + sitemap + redirects)
//! ```
//!
//! This separation exists for three reasons:
//!
//! - **Debuggability**: each manifest is human-readable JSON you can inspect.
//! - **Incremental builds**: the render stage skips pages whose content
//!   hasn't changed since the last build.
//! - **Testability**: each stage is close to a pure function from manifest
//!   to manifest, so tests can exercise pipeline logic directly.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`scan`] | Stage 1 — walks the content directory, resolves routes and metadata, produces the scan manifest |
//! | [`render`] | Stage 2 — renders markdown bodies to HTML fragments, with a content-addressed cache |
//! | [`generate`] | Stage 3 — emits the final site from the rendered manifest using Maud |
//! | [`config`] | `config.toml` loading, stock-default merging, eager validation, CSS generation |
//! | [`schema`] | JSON-LD `BreadcrumbList` builder embedded in every page |
//! | [`sitemap`] | `sitemap.xml` assembly with exclusions and lastmod stamping |
//! | [`redirects`] | Redirect table validation (absolute paths, slash policy, no chains) |
//! | [`route`] | URL routes under the trailing-slash policy; route → output file mapping |
//! | [`naming`] | `NNN-name` filename convention parser used for pages and sections |
//! | [`meta`] | Page metadata resolution: titles, descriptions, internal links |
//! | [`audit`] | SEO lint behind the `check` command |
//! | [`cache`] | Content-addressed render cache for incremental builds |
//! | [`types`] | Shared types serialized between stages (`Page`, `NavItem`) |
//! | [`output`] | CLI output formatting — positional display of pipeline results |
//!
//! # Design Decisions
//!
//! ## Everything Hangs Off the Route
//!
//! A page's route (`/compare/instantly-vs-apollo/`) is computed once, in the
//! scan stage, under the configured trailing-slash policy. Canonical URLs,
//! sitemap entries, breadcrumb items, redirect validation, and the internal
//! link lint all derive from that one string — so the slash policy cannot
//! drift between features. The output file layout (`path/index.html` versus
//! `path.html`) is a separate, independent knob ([`config::OutputFormat`]).
//!
//! ## Redirects Fail the Build, Not the Visitor
//!
//! The `[redirects]` table is validated eagerly at config load: relative
//! paths, self-redirects, policy violations, and chains (a target that is
//! itself a source) are build errors. What ships is therefore always a
//! single-hop table, emitted as static meta-refresh pages with the
//! canonical pointing at the destination.
//!
//! ## Maud Over Template Engines
//!
//! HTML is generated with [Maud](https://maud.lambda.xyz/), a compile-time
//! HTML macro system, rather than Handlebars or Tera. Malformed HTML is a
//! build error, template variables are Rust expressions, and interpolation
//! is auto-escaped — `PreEscaped` appears only for rendered markdown and
//! the serialized JSON-LD payload.
//!
//! ## Structured Data Is a Pure Function
//!
//! The breadcrumb schema builder ([`schema::breadcrumb_schema`]) takes the
//! site origin and an ordered trail and returns a `serde_json::Value` —
//! no I/O, no error path, total over its inputs. The generate stage embeds
//! its output verbatim; tests compare against it structurally.
//!
//! ## No Client-Side Runtime
//!
//! The generated site is plain HTML with one inlined stylesheet. No
//! JavaScript ships at all: navigation, breadcrumbs, and redirects are
//! static markup, which keeps the output droppable onto any file server
//! and indexable without rendering.

pub mod audit;
pub mod cache;
pub mod config;
pub mod generate;
pub mod meta;
pub mod naming;
pub mod output;
pub mod redirects;
pub mod render;
pub mod route;
pub mod scan;
pub mod schema;
pub mod sitemap;
pub mod types;

#[cfg(test)]
pub(crate) mod test_helpers;
