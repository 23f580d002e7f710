//! SEO lint for the `check` command.
//!
//! Runs over the scan manifest (no output is written) and reports findings
//! at two severities:
//!
//! - **Error**: internal links that are not absolute site paths, violate the
//!   trailing-slash policy, or resolve to neither a page route nor a
//!   redirect source. These fail the check.
//! - **Warning**: title and description lengths outside the ranges search
//!   engines display well (titles 30–60 characters, descriptions 120–160),
//!   and pages missing a description entirely. Reported, never fatal.
//!
//! The length ranges follow the audit tooling this site's content was
//! previously checked with.

use crate::meta;
use crate::route;
use crate::scan::Manifest;
use std::collections::BTreeSet;
use std::fmt;

const TITLE_MIN: usize = 30;
const TITLE_MAX: usize = 60;
const DESC_MIN: usize = 120;
const DESC_MAX: usize = 160;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Error,
    Warning,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => f.write_str("ERROR"),
            Severity::Warning => f.write_str("WARNING"),
        }
    }
}

/// One audit finding, attached to the page it was found on.
#[derive(Debug, Clone)]
pub struct Finding {
    pub severity: Severity,
    pub route: String,
    pub message: String,
}

impl Finding {
    fn error(route: &str, message: String) -> Self {
        Self {
            severity: Severity::Error,
            route: route.to_string(),
            message,
        }
    }

    fn warning(route: &str, message: String) -> Self {
        Self {
            severity: Severity::Warning,
            route: route.to_string(),
            message,
        }
    }
}

/// Audit every page in the manifest. Findings come back in page order,
/// link errors before metadata warnings for each page.
pub fn audit(manifest: &Manifest) -> Vec<Finding> {
    let routes: BTreeSet<&str> = manifest.pages.iter().map(|p| p.route.as_str()).collect();
    let policy = manifest.config.trailing_slash;
    let mut findings = Vec::new();

    for page in &manifest.pages {
        let route = page.route.as_str();

        for link in meta::extract_internal_links(&page.body) {
            if !route::conforms_to_policy(&link, policy) {
                findings.push(Finding::error(
                    route,
                    format!("link {link} violates trailing_slash = \"{policy}\""),
                ));
            } else if !routes.contains(link.as_str())
                && !manifest.config.redirects.contains_key(&link)
            {
                findings.push(Finding::error(
                    route,
                    format!("link {link} resolves to no page or redirect"),
                ));
            }
        }

        let title_len = page.title.chars().count();
        if !(TITLE_MIN..=TITLE_MAX).contains(&title_len) {
            findings.push(Finding::warning(
                route,
                format!("title is {title_len} chars (ideal {TITLE_MIN}-{TITLE_MAX})"),
            ));
        }

        match &page.description {
            None => findings.push(Finding::warning(route, "no description".to_string())),
            Some(desc) => {
                let len = desc.chars().count();
                if !(DESC_MIN..=DESC_MAX).contains(&len) {
                    findings.push(Finding::warning(
                        route,
                        format!("description is {len} chars (ideal {DESC_MIN}-{DESC_MAX})"),
                    ));
                }
            }
        }
    }

    findings
}

/// True if any finding is fatal.
pub fn has_errors(findings: &[Finding]) -> bool {
    findings.iter().any(|f| f.severity == Severity::Error)
}
