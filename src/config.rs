//! Site configuration module.
//!
//! Handles loading, validating, and merging `config.toml`. User values are
//! merged over stock defaults, unknown keys are rejected to catch typos
//! early, and every cross-field contract (URL shape, trailing-slash policy,
//! redirect table) is validated eagerly so a bad config fails the build
//! before any output is written.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! [site]
//! url = "https://example.com"   # Canonical origin, no trailing slash
//! title = "Untitled Site"
//! description = ""
//!
//! trailing_slash = "always"     # "always" | "never"
//!
//! [build]
//! format = "directory"          # "directory" (path/index.html) | "file" (path.html)
//!
//! [sitemap]
//! enable = true
//! path = "sitemap.xml"
//! # lastmod = "2026-01-15"      # Stamp every entry with one fixed date
//! exclude = []                  # Absolute path prefixes to drop
//!
//! [redirects]
//! # "/old/path/" = "/new/path/"
//!
//! [processing]
//! # max_processes = 4           # Omit for auto = CPU cores
//! ```
//!
//! Plus `[colors.light]`, `[colors.dark]`, and `[theme]` for the generated
//! stylesheet — see [`stock_config_toml`] for the full documented set.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::redirects::{self, RedirectError};

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
    #[error("Redirect table error: {0}")]
    Redirect(#[from] RedirectError),
}

/// Trailing-slash policy applied to every generated and validated URL path.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TrailingSlash {
    /// All paths end with `/` (default).
    #[default]
    Always,
    /// No path ends with `/` (except the root).
    Never,
}

impl fmt::Display for TrailingSlash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TrailingSlash::Always => f.write_str("always"),
            TrailingSlash::Never => f.write_str("never"),
        }
    }
}

/// Output layout for generated pages.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Each page emitted as `path/index.html` (default).
    #[default]
    Directory,
    /// Each page emitted as `path.html`.
    File,
}

/// Site configuration loaded from `config.toml`.
///
/// All fields have sensible defaults. User config files need only specify
/// the values they want to override. Unknown keys are rejected.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConfig {
    /// Site identity: canonical origin and head metadata.
    pub site: SiteInfo,
    /// Trailing-slash policy for all generated URLs.
    pub trailing_slash: TrailingSlash,
    /// Output layout settings.
    pub build: BuildConfig,
    /// Sitemap generation settings.
    pub sitemap: SitemapConfig,
    /// Permanent redirects: old absolute path → new absolute path.
    pub redirects: BTreeMap<String, String>,
    /// Parallel rendering settings.
    pub processing: ProcessingConfig,
    /// Color schemes for light and dark modes.
    pub colors: ColorConfig,
    /// Typography/layout settings.
    pub theme: ThemeConfig,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            site: SiteInfo::default(),
            trailing_slash: TrailingSlash::default(),
            build: BuildConfig::default(),
            sitemap: SitemapConfig::default(),
            redirects: BTreeMap::new(),
            processing: ProcessingConfig::default(),
            colors: ColorConfig::default(),
            theme: ThemeConfig::default(),
        }
    }
}

impl SiteConfig {
    /// Validate cross-field contracts. Called on every load.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let url = &self.site.url;
        if !url.starts_with("http://") && !url.starts_with("https://") {
            return Err(ConfigError::Validation(format!(
                "site.url must be an absolute http(s) origin, got {url:?}"
            )));
        }
        if url.ends_with('/') {
            return Err(ConfigError::Validation(
                "site.url must not end with '/' (routes supply their own slash)".into(),
            ));
        }
        if let Some(lastmod) = &self.sitemap.lastmod
            && !is_valid_date(lastmod)
        {
            return Err(ConfigError::Validation(format!(
                "sitemap.lastmod must be YYYY-MM-DD, got {lastmod:?}"
            )));
        }
        for prefix in &self.sitemap.exclude {
            if !prefix.starts_with('/') {
                return Err(ConfigError::Validation(format!(
                    "sitemap.exclude entries must start with '/', got {prefix:?}"
                )));
            }
        }
        redirects::validate(&self.redirects, self.trailing_slash)?;
        Ok(())
    }
}

/// Site identity.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteInfo {
    /// Canonical absolute origin (`https://…`, no trailing slash). Resolves
    /// all relative URLs: canonical links, sitemap entries, breadcrumb items.
    pub url: String,
    /// Site title, appended to page titles and used on the home page.
    pub title: String,
    /// Fallback meta description for pages without one of their own.
    pub description: String,
}

impl Default for SiteInfo {
    fn default() -> Self {
        Self {
            url: "https://example.com".to_string(),
            title: "Untitled Site".to_string(),
            description: String::new(),
        }
    }
}

/// Output layout settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BuildConfig {
    /// Page output layout: `directory` or `file`.
    pub format: OutputFormat,
}

/// Sitemap generation settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SitemapConfig {
    /// Generate `sitemap.xml` (default true).
    pub enable: bool,
    /// Output path, relative to the output directory.
    pub path: PathBuf,
    /// When set (`YYYY-MM-DD`), every sitemap entry is stamped with this
    /// single last-modified date. When unset, entries carry no date.
    pub lastmod: Option<String>,
    /// Absolute path prefixes; matching pages are dropped from the sitemap.
    pub exclude: Vec<String>,
}

impl Default for SitemapConfig {
    fn default() -> Self {
        Self {
            enable: true,
            path: "sitemap.xml".into(),
            lastmod: None,
            exclude: Vec::new(),
        }
    }
}

/// Parallel rendering settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProcessingConfig {
    /// Maximum number of parallel render workers.
    /// When absent or null, defaults to the number of CPU cores.
    /// Values larger than the core count are clamped down.
    pub max_processes: Option<usize>,
}

/// Resolve the effective thread count from config.
///
/// - `None` → use all available cores
/// - `Some(n)` → use `min(n, cores)` (user can constrain down, not up)
pub fn effective_threads(config: &ProcessingConfig) -> usize {
    let cores = std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1);
    config.max_processes.map(|n| n.min(cores)).unwrap_or(cores)
}

/// Color configuration for light and dark modes.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ColorConfig {
    /// Light mode color scheme.
    pub light: ColorScheme,
    /// Dark mode color scheme.
    pub dark: ColorScheme,
}

impl Default for ColorConfig {
    fn default() -> Self {
        Self {
            light: ColorScheme::default_light(),
            dark: ColorScheme::default_dark(),
        }
    }
}

/// Individual color scheme (light or dark).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ColorScheme {
    /// Page background color.
    pub background: String,
    /// Card/table background color.
    pub surface: String,
    /// Primary text color.
    pub text: String,
    /// Muted/secondary text color (breadcrumbs, captions, footer).
    pub text_muted: String,
    /// Accent color (links, buttons, highlights).
    pub accent: String,
    /// Border and divider color.
    pub border: String,
}

impl ColorScheme {
    pub fn default_light() -> Self {
        Self {
            background: "#ffffff".to_string(),
            surface: "#f6f8fa".to_string(),
            text: "#1a1a2e".to_string(),
            text_muted: "#5c6370".to_string(),
            accent: "#0b63ce".to_string(),
            border: "#dde1e6".to_string(),
        }
    }

    pub fn default_dark() -> Self {
        Self {
            background: "#0d1117".to_string(),
            surface: "#161b22".to_string(),
            text: "#e6edf3".to_string(),
            text_muted: "#8b949e".to_string(),
            accent: "#4c9aff".to_string(),
            border: "#30363d".to_string(),
        }
    }
}

impl Default for ColorScheme {
    fn default() -> Self {
        Self::default_light()
    }
}

/// Typography/layout settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ThemeConfig {
    /// Maximum content column width (CSS value).
    pub content_width: String,
    /// Body font stack (CSS value).
    pub font_stack: String,
    /// Corner radius for cards and callouts (CSS value).
    pub radius: String,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            content_width: "44rem".to_string(),
            font_stack: "system-ui, -apple-system, 'Segoe UI', sans-serif".to_string(),
            radius: "6px".to_string(),
        }
    }
}

/// Strict `YYYY-MM-DD` check, including month/day ranges. Leap years are
/// accepted permissively (Feb 29 is always allowed).
fn is_valid_date(s: &str) -> bool {
    let bytes = s.as_bytes();
    if bytes.len() != 10 || bytes[4] != b'-' || bytes[7] != b'-' {
        return false;
    }
    let digits = |r: std::ops::Range<usize>| -> Option<u32> { s[r].parse().ok() };
    let (Some(_year), Some(month), Some(day)) = (digits(0..4), digits(5..7), digits(8..10)) else {
        return false;
    };
    (1..=12).contains(&month) && (1..=31).contains(&day)
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
///
/// This is the canonical representation of all default values, used as the
/// base layer for merging user overrides on top.
pub fn stock_defaults_value() -> toml::Value {
    toml::Value::try_from(SiteConfig::default()).expect("default config must serialize")
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay replace base values entirely.
/// - Keys in base that are not in overlay are preserved.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Load a `config.toml` from a directory as a raw TOML value.
///
/// Returns `Ok(None)` if no `config.toml` exists in the directory.
/// Returns `Err` if the file exists but contains invalid TOML.
pub fn load_raw_config(path: &Path) -> Result<Option<toml::Value>, ConfigError> {
    let config_path = path.join("config.toml");
    if !config_path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(&config_path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(Some(value))
}

/// Merge an optional overlay onto a base value, then deserialize and validate.
pub fn resolve_config(
    base: toml::Value,
    overlay: Option<toml::Value>,
) -> Result<SiteConfig, ConfigError> {
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: SiteConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load config from `config.toml` in the given directory.
///
/// Merges user values on top of stock defaults, rejects unknown keys,
/// and validates the result.
pub fn load_config(root: &Path) -> Result<SiteConfig, ConfigError> {
    let base = stock_defaults_value();
    let overlay = load_raw_config(root)?;
    resolve_config(base, overlay)
}

/// Returns a fully-commented stock `config.toml` with all keys and explanations.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# guidepress Configuration
# ========================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults. Unknown keys will cause an error.

# ---------------------------------------------------------------------------
# URL policy
# ---------------------------------------------------------------------------
# "always": every URL ends with a trailing slash (default).
# "never":  no URL ends with a trailing slash (except the root).
# Enforced across internal links, canonical URLs, and redirects.
trailing_slash = "always"

# ---------------------------------------------------------------------------
# Site identity
# ---------------------------------------------------------------------------
[site]
# Canonical absolute origin. No trailing slash - routes supply their own.
# Used for canonical URLs, sitemap entries, and breadcrumb schema items.
url = "https://example.com"

# Site title, appended to page titles ("Page - Site").
title = "Untitled Site"

# Fallback meta description for pages without a leading paragraph.
description = ""

[build]
# "directory": each page emitted as path/index.html (default).
# "file":      each page emitted as path.html.
format = "directory"

# ---------------------------------------------------------------------------
# Sitemap
# ---------------------------------------------------------------------------
[sitemap]
enable = true

# Output path, relative to the output directory.
path = "sitemap.xml"

# Stamp every entry with one fixed last-modified date (YYYY-MM-DD).
# When unset, entries carry no <lastmod>.
# lastmod = "2026-01-15"

# Absolute path prefixes to drop from the sitemap.
exclude = []

# ---------------------------------------------------------------------------
# Permanent redirects: old absolute path -> new absolute path
# ---------------------------------------------------------------------------
# Each entry generates a redirect page at the old path. Paths must follow
# the trailing_slash policy; a target may not itself be a redirect source.
[redirects]
# "/compare/apollo-vs-instantly/" = "/compare/instantly-vs-apollo/"

# ---------------------------------------------------------------------------
# Processing
# ---------------------------------------------------------------------------
[processing]
# Maximum parallel render workers.
# Omit or comment out to auto-detect (= number of CPU cores).
# max_processes = 4

# ---------------------------------------------------------------------------
# Colors - Light mode (prefers-color-scheme: light)
# ---------------------------------------------------------------------------
[colors.light]
background = "#ffffff"
surface = "#f6f8fa"       # Cards, tables
text = "#1a1a2e"
text_muted = "#5c6370"    # Breadcrumbs, captions, footer
accent = "#0b63ce"        # Links, highlights
border = "#dde1e6"

# ---------------------------------------------------------------------------
# Colors - Dark mode (prefers-color-scheme: dark)
# ---------------------------------------------------------------------------
[colors.dark]
background = "#0d1117"
surface = "#161b22"
text = "#e6edf3"
text_muted = "#8b949e"
accent = "#4c9aff"
border = "#30363d"

# ---------------------------------------------------------------------------
# Theme / layout
# ---------------------------------------------------------------------------
[theme]
# Maximum content column width (CSS value).
content_width = "44rem"

# Body font stack (CSS value).
font_stack = "system-ui, -apple-system, 'Segoe UI', sans-serif"

# Corner radius for cards and callouts (CSS value).
radius = "6px"
"##
}

/// Generate CSS custom properties from color config.
pub fn generate_color_css(colors: &ColorConfig) -> String {
    format!(
        r#":root {{
    --color-bg: {light_bg};
    --color-surface: {light_surface};
    --color-text: {light_text};
    --color-text-muted: {light_text_muted};
    --color-accent: {light_accent};
    --color-border: {light_border};
}}

@media (prefers-color-scheme: dark) {{
    :root {{
        --color-bg: {dark_bg};
        --color-surface: {dark_surface};
        --color-text: {dark_text};
        --color-text-muted: {dark_text_muted};
        --color-accent: {dark_accent};
        --color-border: {dark_border};
    }}
}}"#,
        light_bg = colors.light.background,
        light_surface = colors.light.surface,
        light_text = colors.light.text,
        light_text_muted = colors.light.text_muted,
        light_accent = colors.light.accent,
        light_border = colors.light.border,
        dark_bg = colors.dark.background,
        dark_surface = colors.dark.surface,
        dark_text = colors.dark.text,
        dark_text_muted = colors.dark.text_muted,
        dark_accent = colors.dark.accent,
        dark_border = colors.dark.border,
    )
}

/// Generate CSS custom properties from theme config.
pub fn generate_theme_css(theme: &ThemeConfig) -> String {
    format!(
        r#":root {{
    --content-width: {content_width};
    --font-stack: {font_stack};
    --radius: {radius};
}}"#,
        content_width = theme.content_width,
        font_stack = theme.font_stack,
        radius = theme.radius,
    )
}
