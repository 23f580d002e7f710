//! Permanent-redirect table validation.
//!
//! Redirects are declared in `config.toml` as old absolute path → new
//! absolute path:
//!
//! ```toml
//! [redirects]
//! "/compare/apollo-vs-instantly/" = "/compare/instantly-vs-apollo/"
//! ```
//!
//! Each entry produces a generated redirect page at the old path (see
//! [`generate`](crate::generate)), so a request to the old URL resolves to
//! the new one after exactly one hop. Entries are independent; nothing
//! collapses A→B→C into A→C. Instead, a target that is itself a source is
//! rejected here so a chain can never reach a deployed site.
//!
//! All checks run eagerly at config load — a malformed table fails the
//! build before any output is written. Duplicate sources cannot occur: they
//! are duplicate TOML keys, which the parser already rejects.

use crate::config::TrailingSlash;
use crate::route::conforms_to_policy;
use std::collections::BTreeMap;
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum RedirectError {
    #[error("redirect path must start with '/': {0}")]
    NotAbsolute(String),
    #[error("redirect points to itself: {0}")]
    SelfRedirect(String),
    #[error("redirect path violates trailing_slash = \"{policy}\": {path}")]
    SlashPolicy { path: String, policy: TrailingSlash },
    #[error("redirect target {target} is itself a redirect source (chain from {source_path})")]
    Chained { source_path: String, target: String },
}

/// Validate every entry of a redirect table against the slash policy.
///
/// Checks, per entry: both paths absolute, both conforming to the policy,
/// source ≠ target, and the target not appearing as another source.
pub fn validate(
    redirects: &BTreeMap<String, String>,
    policy: TrailingSlash,
) -> Result<(), RedirectError> {
    for (source, target) in redirects {
        for path in [source, target] {
            if !path.starts_with('/') {
                return Err(RedirectError::NotAbsolute(path.clone()));
            }
            if !conforms_to_policy(path, policy) {
                return Err(RedirectError::SlashPolicy {
                    path: path.clone(),
                    policy,
                });
            }
        }
        if source == target {
            return Err(RedirectError::SelfRedirect(source.clone()));
        }
        if redirects.contains_key(target) {
            return Err(RedirectError::Chained {
                source_path: source.clone(),
                target: target.clone(),
            });
        }
    }
    Ok(())
}
