//! Page metadata resolution from markdown sources.
//!
//! Resolution order mirrors the rest of the naming scheme: explicit content
//! wins, filename-derived values are the fallback.
//!
//! - **Title**: first `# heading` in the body → display title from filename
//! - **Description**: first paragraph after the heading, inline markdown
//!   stripped → none (the site-wide description covers the page)
//!
//! Also extracts site-internal link targets for the `check` command's lint.

/// First `# heading` text, if any.
pub fn extract_title(markdown: &str) -> Option<String> {
    markdown
        .lines()
        .find(|line| line.starts_with("# "))
        .map(|line| line.trim_start_matches("# ").trim().to_string())
}

/// First paragraph after the title heading, flattened to one line with
/// inline markdown (emphasis, code spans, links) stripped.
///
/// Skips headings, lists, block quotes, and code fences — a page that opens
/// with a table or list simply has no description.
pub fn extract_description(markdown: &str) -> Option<String> {
    let mut lines = markdown.lines().peekable();
    let mut in_fence = false;
    let mut paragraph: Vec<&str> = Vec::new();

    while let Some(line) = lines.next() {
        let trimmed = line.trim();
        if trimmed.starts_with("```") {
            in_fence = !in_fence;
            continue;
        }
        if in_fence {
            continue;
        }
        let is_block_start = trimmed.starts_with('#')
            || trimmed.starts_with('-')
            || trimmed.starts_with('*')
            || trimmed.starts_with('>')
            || trimmed.starts_with('|')
            || (trimmed.chars().next().is_some_and(|c| c.is_ascii_digit())
                && trimmed.contains(". "));
        if trimmed.is_empty() || is_block_start {
            if !paragraph.is_empty() {
                break;
            }
            continue;
        }
        paragraph.push(trimmed);
        if lines.peek().is_none() {
            break;
        }
    }

    if paragraph.is_empty() {
        return None;
    }
    Some(strip_inline_markdown(&paragraph.join(" ")))
}

/// Strip inline markdown: `[text](url)` → text, emphasis markers, code spans.
fn strip_inline_markdown(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.char_indices().peekable();
    while let Some((i, c)) = chars.next() {
        match c {
            '*' | '_' | '`' => {}
            '[' => {
                // [text](url) — keep text, drop url
                if let Some(close) = text[i..].find("](")
                    && let Some(end) = text[i + close..].find(')')
                {
                    out.push_str(&text[i + 1..i + close]);
                    let stop = i + close + end;
                    while let Some(&(j, _)) = chars.peek() {
                        if j > stop {
                            break;
                        }
                        chars.next();
                    }
                } else {
                    out.push(c);
                }
            }
            _ => out.push(c),
        }
    }
    out
}

/// All site-internal link targets in a markdown body: markdown links
/// `](/path)` plus raw `href="/path"` attributes. External URLs and
/// in-page anchors are ignored.
pub fn extract_internal_links(markdown: &str) -> Vec<String> {
    let mut links = Vec::new();
    collect_targets(markdown, "](", ')', &mut links);
    collect_targets(markdown, "href=\"", '"', &mut links);
    links
}

fn collect_targets(text: &str, open: &str, close: char, out: &mut Vec<String>) {
    let mut rest = text;
    while let Some(start) = rest.find(open) {
        rest = &rest[start + open.len()..];
        if let Some(end) = rest.find(close) {
            let target = &rest[..end];
            if target.starts_with('/') {
                // Drop fragments/queries; the path is what must resolve
                let path = target
                    .split(['#', '?'])
                    .next()
                    .unwrap_or(target);
                out.push(path.to_string());
            }
            rest = &rest[end..];
        } else {
            break;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn title_from_first_heading() {
        let md = "# Apollo vs Instantly\n\nBody text.";
        assert_eq!(extract_title(md), Some("Apollo vs Instantly".to_string()));
    }

    #[test]
    fn title_ignores_later_headings() {
        let md = "intro\n\n# First\n\n# Second";
        assert_eq!(extract_title(md), Some("First".to_string()));
    }

    #[test]
    fn title_missing() {
        assert_eq!(extract_title("just text\n## only h2"), None);
    }

    #[test]
    fn description_is_first_paragraph() {
        let md = "# Title\n\nApollo and Instantly are both outreach tools.\nThey differ in pricing.\n\nSecond paragraph.";
        assert_eq!(
            extract_description(md),
            Some("Apollo and Instantly are both outreach tools. They differ in pricing.".to_string())
        );
    }

    #[test]
    fn description_strips_inline_markdown() {
        let md = "# T\n\nCompare **Apollo** with [Instantly](/tools/instantly/) `now`.";
        assert_eq!(
            extract_description(md),
            Some("Compare Apollo with Instantly now.".to_string())
        );
    }

    #[test]
    fn description_skips_lists_and_quotes() {
        let md = "# T\n\n- a list item\n> a quote\n\nThe real paragraph.";
        assert_eq!(
            extract_description(md),
            Some("The real paragraph.".to_string())
        );
    }

    #[test]
    fn description_skips_code_fences() {
        let md = "# T\n\n```\ncode here\n```\n\nAfter the fence.";
        assert_eq!(extract_description(md), Some("After the fence.".to_string()));
    }

    #[test]
    fn description_none_for_heading_only() {
        assert_eq!(extract_description("# Only a title\n\n## And a sub"), None);
    }

    #[test]
    fn internal_links_from_markdown() {
        let md = "See [Apollo](/tools/apollo/) and [docs](https://example.com/x) and [top](#anchor).";
        assert_eq!(extract_internal_links(md), vec!["/tools/apollo/"]);
    }

    #[test]
    fn internal_links_from_raw_html() {
        let md = "Inline <a href=\"/pricing/\">pricing</a> link.";
        assert_eq!(extract_internal_links(md), vec!["/pricing/"]);
    }

    #[test]
    fn internal_links_drop_query_and_fragment() {
        let md = "[a](/compare/x/?ref=nav) [b](/compare/y/#table)";
        assert_eq!(
            extract_internal_links(md),
            vec!["/compare/x/", "/compare/y/"]
        );
    }

    #[test]
    fn no_links() {
        assert!(extract_internal_links("plain text").is_empty());
    }
}
