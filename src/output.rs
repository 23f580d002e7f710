//! CLI output formatting for all pipeline stages.
//!
//! # Information-First Display
//!
//! Output is **information-centric, not file-centric**. The primary display
//! for every page is its semantic identity — positional index, title, route
//! — with filesystem paths shown as secondary context via indented
//! `Source:` lines.
//!
//! # Output Format
//!
//! ## Scan
//!
//! ```text
//! Pages
//! 001 DataStack Guide → /
//!     Source: index.md
//! 002 Tool Comparisons → /compare/
//!     Source: 010-Compare/index.md
//!
//! 8 pages, 2 in navigation sections
//! ```
//!
//! ## Render
//!
//! ```text
//! rendered /compare/instantly-vs-apollo/
//! cached /about/
//! ```
//!
//! ## Generate
//!
//! ```text
//! 001 / → index.html
//! 002 /about/ → about/index.html
//!
//! Redirects
//! 001 /compare/apollo-vs-instantly/ → /compare/instantly-vs-apollo/
//!
//! Generated 8 pages, 1 redirect, sitemap.xml
//! ```
//!
//! # Architecture
//!
//! Each stage has a `format_*` function (returns `Vec<String>` or `String`)
//! for testability and a `print_*` wrapper that writes to stdout. Format
//! functions are pure — no I/O, no side effects.

use crate::audit::{Finding, Severity};
use crate::generate::Summary;
use crate::render::RenderEvent;
use crate::scan::Manifest;

// ============================================================================
// Shared display helpers
// ============================================================================

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

// ============================================================================
// Scan
// ============================================================================

pub fn format_scan_output(manifest: &Manifest) -> Vec<String> {
    let mut lines = vec!["Pages".to_string()];

    for (i, page) in manifest.pages.iter().enumerate() {
        lines.push(format!(
            "{} {} → {}",
            format_index(i + 1),
            page.title,
            page.route
        ));
        lines.push(format!("{}Source: {}", indent(1), page.source_path));
        if !page.in_nav && !page.is_index {
            lines.push(format!("{}Hidden from navigation", indent(1)));
        }
    }

    lines.push(String::new());
    lines.push(format!(
        "{} pages, {} navigation entries",
        manifest.pages.len(),
        manifest.navigation.len()
    ));
    lines
}

pub fn print_scan_output(manifest: &Manifest) {
    for line in format_scan_output(manifest) {
        println!("{line}");
    }
}

// ============================================================================
// Render
// ============================================================================

pub fn format_render_event(event: &RenderEvent) -> String {
    match event {
        RenderEvent::Cached { route } => format!("cached {route}"),
        RenderEvent::Copied { route } => format!("copied {route}"),
        RenderEvent::Rendered { route } => format!("rendered {route}"),
    }
}

// ============================================================================
// Generate
// ============================================================================

pub fn format_generate_output(summary: &Summary) -> Vec<String> {
    let mut lines = Vec::new();

    for (i, (route, rel)) in summary.pages.iter().enumerate() {
        lines.push(format!(
            "{} {} → {}",
            format_index(i + 1),
            route,
            rel.display()
        ));
    }

    if !summary.redirects.is_empty() {
        lines.push(String::new());
        lines.push("Redirects".to_string());
        for (i, (source, target)) in summary.redirects.iter().enumerate() {
            lines.push(format!("{} {} → {}", format_index(i + 1), source, target));
        }
    }

    lines.push(String::new());
    let mut tail = format!(
        "Generated {} pages, {} redirects",
        summary.pages.len(),
        summary.redirects.len()
    );
    if let Some(sitemap) = &summary.sitemap {
        tail.push_str(&format!(", {}", sitemap.display()));
    }
    lines.push(tail);
    lines
}

pub fn print_generate_output(summary: &Summary) {
    for line in format_generate_output(summary) {
        println!("{line}");
    }
}

// ============================================================================
// Check
// ============================================================================

pub fn format_check_output(findings: &[Finding]) -> Vec<String> {
    let mut lines = Vec::new();
    for finding in findings {
        lines.push(format!(
            "{} {}: {}",
            finding.severity, finding.route, finding.message
        ));
    }

    let errors = findings
        .iter()
        .filter(|f| f.severity == Severity::Error)
        .count();
    let warnings = findings.len() - errors;
    if !findings.is_empty() {
        lines.push(String::new());
    }
    lines.push(format!("{errors} errors, {warnings} warnings"));
    lines
}

pub fn print_check_output(findings: &[Finding]) {
    for line in format_check_output(findings) {
        println!("{line}");
    }
}
