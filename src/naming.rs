//! Centralized filename parsing for the NNN-name convention.
//!
//! Pages and sections follow the same naming pattern: an optional numeric
//! prefix (`NNN-`) followed by a name. The prefix controls navigation order
//! and visibility; the name yields both the display title and the URL slug.
//!
//! ## Titles and Slugs
//!
//! Dashes in the name portion become spaces for display; for URLs the name
//! is lowercased with dashes preserved:
//! - `020-Apollo-vs-Instantly.md` → title "Apollo vs Instantly", slug
//!   `apollo-vs-instantly`
//! - `010-Compare/` → title "Compare", slug `compare`
//! - `drafts/` → unnumbered: built, but hidden from navigation

/// Result of parsing a numbered entry name like `020-Apollo-vs-Instantly`.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedName {
    /// Number prefix if present (e.g., `20` from `020-Apollo-vs-Instantly`)
    pub number: Option<u32>,
    /// Raw name part after `NNN-`, dashes preserved. Empty if number-only.
    /// For unnumbered entries, this is the full input.
    pub name: String,
    /// Display title: name with dashes converted to spaces.
    pub display_title: String,
}

impl ParsedName {
    /// URL slug: the name portion, lowercased. Dashes stay.
    pub fn slug(&self) -> String {
        self.name.to_lowercase()
    }
}

/// Parse an entry name following the `NNN-name` convention.
///
/// Handles these patterns:
/// - `"020-Apollo-vs-Instantly"` → number=Some(20), slug="apollo-vs-instantly"
/// - `"010-Compare"` → number=Some(10), slug="compare"
/// - `"001"` / `"001-"` → number=Some(1), empty name
/// - `"drafts"` → number=None, slug="drafts"
pub fn parse_entry_name(name: &str) -> ParsedName {
    if let Some(dash_pos) = name.find('-') {
        let prefix = &name[..dash_pos];
        if let Ok(num) = prefix.parse::<u32>() {
            let raw = &name[dash_pos + 1..];
            return ParsedName {
                number: Some(num),
                name: raw.to_string(),
                display_title: raw.replace('-', " "),
            };
        }
    }
    // A bare number with no dash still counts as a prefix
    if let Ok(num) = name.parse::<u32>() {
        return ParsedName {
            number: Some(num),
            name: String::new(),
            display_title: String::new(),
        };
    }
    ParsedName {
        number: None,
        name: name.to_string(),
        display_title: name.replace('-', " "),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numbered_with_multi_word_name() {
        let p = parse_entry_name("020-Apollo-vs-Instantly");
        assert_eq!(p.number, Some(20));
        assert_eq!(p.name, "Apollo-vs-Instantly");
        assert_eq!(p.display_title, "Apollo vs Instantly");
        assert_eq!(p.slug(), "apollo-vs-instantly");
    }

    #[test]
    fn numbered_single_word() {
        let p = parse_entry_name("010-Compare");
        assert_eq!(p.number, Some(10));
        assert_eq!(p.name, "Compare");
        assert_eq!(p.display_title, "Compare");
        assert_eq!(p.slug(), "compare");
    }

    #[test]
    fn number_only_no_dash() {
        let p = parse_entry_name("001");
        assert_eq!(p.number, Some(1));
        assert_eq!(p.name, "");
        assert_eq!(p.display_title, "");
    }

    #[test]
    fn number_with_trailing_dash() {
        let p = parse_entry_name("001-");
        assert_eq!(p.number, Some(1));
        assert_eq!(p.name, "");
        assert_eq!(p.slug(), "");
    }

    #[test]
    fn unnumbered_single_word() {
        let p = parse_entry_name("drafts");
        assert_eq!(p.number, None);
        assert_eq!(p.name, "drafts");
        assert_eq!(p.display_title, "drafts");
    }

    #[test]
    fn unnumbered_with_dashes() {
        let p = parse_entry_name("wip-notes");
        assert_eq!(p.number, None);
        assert_eq!(p.name, "wip-notes");
        assert_eq!(p.display_title, "wip notes");
        assert_eq!(p.slug(), "wip-notes");
    }

    #[test]
    fn slug_lowercases_mixed_case() {
        let p = parse_entry_name("030-Best-CRM-Tools");
        assert_eq!(p.display_title, "Best CRM Tools");
        assert_eq!(p.slug(), "best-crm-tools");
    }

    #[test]
    fn large_number_prefix() {
        let p = parse_entry_name("999-Last");
        assert_eq!(p.number, Some(999));
        assert_eq!(p.display_title, "Last");
    }

    #[test]
    fn zero_prefix() {
        let p = parse_entry_name("000-First");
        assert_eq!(p.number, Some(0));
        assert_eq!(p.display_title, "First");
    }
}
