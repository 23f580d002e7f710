//! Shared types used across all pipeline stages.
//!
//! These types are serialized to JSON between stages (scan → render →
//! generate) and must be identical across all three modules.

use serde::{Deserialize, Serialize};

/// A content page discovered by the scan stage.
///
/// Pages follow the numbering convention: numbered files (`NNN-name.md`)
/// appear in navigation sorted by prefix; unnumbered files are built but
/// hidden. `index.md` files become the home page or a section landing page.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Page {
    /// Title from first `# heading` in markdown, or link_title as fallback
    pub title: String,
    /// Display label in nav (filename with number stripped and dashes → spaces)
    pub link_title: String,
    /// URL slug (lowercased name portion; empty for index pages)
    pub slug: String,
    /// Section slug this page lives under, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub section: Option<String>,
    /// Absolute site-relative route, slash policy applied (`/compare/x/`)
    pub route: String,
    /// Meta description from the first body paragraph
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Source file path relative to the content root
    pub source_path: String,
    /// Raw markdown content
    pub body: String,
    /// Whether this page appears in navigation (has number prefix, or is an
    /// index page of a numbered section)
    pub in_nav: bool,
    /// Sort key from number prefix (for ordering)
    pub sort_key: u32,
    /// True for the home page and section landing pages
    pub is_index: bool,
}

/// Navigation tree item (numbered pages and sections only).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NavItem {
    pub title: String,
    pub route: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<NavItem>,
}

/// A page plus the rendered HTML fragment the render stage produced for it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderedPage {
    pub page: Page,
    /// Fragment file path relative to the rendered directory
    pub fragment: String,
}
