//! Render cache for incremental builds.
//!
//! Re-rendering every markdown body on every build is wasted work when most
//! content doesn't change between builds. This module lets the render stage
//! skip pages whose source and render parameters are unchanged.
//!
//! # Design
//!
//! The cache is **content-addressed**: lookups are by the combination of
//! `source_hash` and `params_hash`, not by output file path. Slug changes
//! and page renumbers do not invalidate the cache — only actual markdown
//! content or render parameter changes do.
//!
//! - **`source_hash`**: SHA-256 of the markdown source. Content-based
//!   rather than mtime-based so it survives `git checkout` (which resets
//!   modification times).
//!
//! - **`params_hash`**: SHA-256 of the render parameters (the enabled
//!   markdown extensions and the fragment format revision). If rendering
//!   behavior changes, every fragment is re-rendered.
//!
//! A cache hit requires:
//! 1. An entry with matching `source_hash` and `params_hash` exists
//! 2. The previously-written fragment still exists on disk
//!
//! When a hit is found but the fragment path has changed (e.g. a page was
//! renamed), the cached fragment is copied to the new location instead of
//! re-rendered.
//!
//! ## Storage
//!
//! The cache manifest is a JSON file at `<rendered_dir>/.render-cache.json`,
//! alongside the fragments, so it travels with the intermediate directory
//! when cached in CI.
//!
//! ## Bypassing the cache
//!
//! Pass `--no-cache` to the `build` or `render` command to force a full
//! re-render. This loads an empty manifest, so every page is rendered fresh.

use sha2::{Digest, Sha256};
use std::collections::HashMap;
use std::fmt;
use std::io;
use std::path::Path;

/// Name of the cache manifest file within the rendered directory.
const MANIFEST_FILENAME: &str = ".render-cache.json";

/// Version of the cache manifest format. Bump this to invalidate all
/// existing caches when the format or key computation changes.
const MANIFEST_VERSION: u32 = 1;

/// A single cached fragment.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize, PartialEq, Eq)]
pub struct CacheEntry {
    pub source_hash: String,
    pub params_hash: String,
}

/// On-disk cache manifest mapping fragment paths to their cache entries.
///
/// Lookups go through a runtime `content_index` that maps
/// `"{source_hash}:{params_hash}"` to the stored fragment path, making
/// the cache resilient to page renames and renumbering.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct CacheManifest {
    pub version: u32,
    pub entries: HashMap<String, CacheEntry>,
    /// Runtime reverse index: `"{source_hash}:{params_hash}"` → fragment path.
    /// Built at load time, maintained on insert. Never serialized.
    #[serde(skip)]
    content_index: HashMap<String, String>,
}

impl CacheManifest {
    /// Create an empty manifest (used for `--no-cache` or first build).
    pub fn empty() -> Self {
        Self {
            version: MANIFEST_VERSION,
            entries: HashMap::new(),
            content_index: HashMap::new(),
        }
    }

    /// Load from the rendered directory. Returns an empty manifest if the
    /// file doesn't exist or can't be parsed (version mismatch, corruption).
    pub fn load(rendered_dir: &Path) -> Self {
        let path = rendered_dir.join(MANIFEST_FILENAME);
        let content = match std::fs::read_to_string(&path) {
            Ok(c) => c,
            Err(_) => return Self::empty(),
        };
        let mut manifest: Self = match serde_json::from_str(&content) {
            Ok(m) => m,
            Err(_) => return Self::empty(),
        };
        if manifest.version != MANIFEST_VERSION {
            return Self::empty();
        }
        manifest.content_index = build_content_index(&manifest.entries);
        manifest
    }

    /// Save to the rendered directory.
    pub fn save(&self, rendered_dir: &Path) -> io::Result<()> {
        let path = rendered_dir.join(MANIFEST_FILENAME);
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)
    }

    /// Look up a cached fragment by content hashes.
    ///
    /// Returns `Some(stored_fragment_path)` if an entry with matching
    /// `source_hash` and `params_hash` exists **and** the fragment is still
    /// on disk. The returned path may differ from the caller's expected
    /// path (e.g. after a rename); the caller copies the file if needed.
    pub fn find_cached(
        &self,
        source_hash: &str,
        params_hash: &str,
        rendered_dir: &Path,
    ) -> Option<String> {
        let content_key = format!("{}:{}", source_hash, params_hash);
        let stored_path = self.content_index.get(&content_key)?;
        if rendered_dir.join(stored_path).exists() {
            Some(stored_path.clone())
        } else {
            None
        }
    }

    /// Record a cache entry for a fragment.
    ///
    /// If an entry with the same content (source_hash + params_hash) already
    /// exists under a different path, the old entry is removed to keep the
    /// manifest clean when pages move.
    pub fn insert(&mut self, fragment_path: String, source_hash: String, params_hash: String) {
        let content_key = format!("{}:{}", source_hash, params_hash);

        // Remove stale entry if content moved to a new path
        if let Some(old_path) = self.content_index.get(&content_key)
            && *old_path != fragment_path
        {
            self.entries.remove(old_path.as_str());
        }

        self.content_index.insert(content_key, fragment_path.clone());
        self.entries.insert(
            fragment_path,
            CacheEntry {
                source_hash,
                params_hash,
            },
        );
    }
}

/// Build the content_index reverse map from the entries map.
fn build_content_index(entries: &HashMap<String, CacheEntry>) -> HashMap<String, String> {
    entries
        .iter()
        .map(|(fragment_path, entry)| {
            let content_key = format!("{}:{}", entry.source_hash, entry.params_hash);
            (content_key, fragment_path.clone())
        })
        .collect()
}

/// SHA-256 hash of a string's bytes, returned as a hex string.
pub fn hash_source(content: &str) -> String {
    let digest = Sha256::digest(content.as_bytes());
    format!("{:x}", digest)
}

/// SHA-256 hash of the render parameters.
///
/// Inputs: the enabled markdown extension names and the fragment format
/// revision. If either changes, every cached fragment is invalid.
pub fn hash_render_params(extensions: &[&str], format_rev: u32) -> String {
    let mut hasher = Sha256::new();
    hasher.update(b"render\0");
    for ext in extensions {
        hasher.update(ext.as_bytes());
        hasher.update(b"\0");
    }
    hasher.update(format_rev.to_le_bytes());
    format!("{:x}", hasher.finalize())
}

/// Summary of cache performance for a build run.
#[derive(Debug, Default)]
pub struct CacheStats {
    pub hits: u32,
    pub copies: u32,
    pub misses: u32,
}

impl CacheStats {
    pub fn hit(&mut self) {
        self.hits += 1;
    }

    pub fn copy(&mut self) {
        self.copies += 1;
    }

    pub fn miss(&mut self) {
        self.misses += 1;
    }

    pub fn total(&self) -> u32 {
        self.hits + self.copies + self.misses
    }
}

impl fmt::Display for CacheStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.hits > 0 || self.copies > 0 {
            if self.copies > 0 {
                write!(
                    f,
                    "{} cached, {} copied, {} rendered ({} total)",
                    self.hits,
                    self.copies,
                    self.misses,
                    self.total()
                )
            } else {
                write!(
                    f,
                    "{} cached, {} rendered ({} total)",
                    self.hits,
                    self.misses,
                    self.total()
                )
            }
        } else {
            write!(f, "{} rendered", self.misses)
        }
    }
}
