//! JSON-LD structured data for search engines.
//!
//! Builds the `BreadcrumbList` schema (schema.org vocabulary) embedded in
//! every page's `<head>` as a `<script type="application/ld+json">` block.
//! Search engines use it to render the navigation path in results.
//!
//! The builder is a pure function over its inputs: no I/O, no validation,
//! no normalization. Hrefs are concatenated onto the site origin exactly as
//! given; an item without an href (the current page, by convention) gets no
//! `item` key at all.

use serde_json::{Value, json};

/// One step in a breadcrumb trail, ordered root → current page.
#[derive(Debug, Clone, PartialEq)]
pub struct BreadcrumbItem {
    /// Human-readable label, copied verbatim into the schema's `name`.
    pub label: String,
    /// Site-relative destination. `None` for the trail's final item.
    pub href: Option<String>,
}

impl BreadcrumbItem {
    pub fn new(label: impl Into<String>, href: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            href: Some(href.into()),
        }
    }

    /// An item with no destination (the current page).
    pub fn current(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            href: None,
        }
    }
}

/// Build a `BreadcrumbList` schema object from breadcrumb items.
///
/// Positions are 1-based in input order. `item` is present iff the input
/// carried an href, and is the origin concatenated directly with it —
/// malformed hrefs pass through unchanged. An empty input yields an empty
/// `itemListElement`, not an error.
pub fn breadcrumb_schema(origin: &str, items: &[BreadcrumbItem]) -> Value {
    let elements: Vec<Value> = items
        .iter()
        .enumerate()
        .map(|(i, item)| {
            let mut element = json!({
                "@type": "ListItem",
                "position": i + 1,
                "name": item.label,
            });
            if let Some(href) = &item.href {
                element["item"] = json!(format!("{origin}{href}"));
            }
            element
        })
        .collect();

    json!({
        "@type": "BreadcrumbList",
        "itemListElement": elements,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const ORIGIN: &str = "https://datastackguide.com";

    #[test]
    fn empty_input_yields_empty_list() {
        let schema = breadcrumb_schema(ORIGIN, &[]);
        assert_eq!(
            schema,
            json!({"@type": "BreadcrumbList", "itemListElement": []})
        );
    }

    #[test]
    fn positions_are_one_based_and_sequential() {
        let items = vec![
            BreadcrumbItem::new("Home", "/"),
            BreadcrumbItem::new("Compare", "/compare/"),
            BreadcrumbItem::current("Apollo vs Instantly"),
        ];
        let schema = breadcrumb_schema(ORIGIN, &items);
        let elements = schema["itemListElement"].as_array().unwrap();
        assert_eq!(elements.len(), items.len());
        for (i, element) in elements.iter().enumerate() {
            assert_eq!(element["position"], json!(i + 1));
        }
    }

    #[test]
    fn names_copied_verbatim() {
        let items = vec![
            BreadcrumbItem::new("Home & Garden", "/"),
            BreadcrumbItem::current("  spaced  "),
        ];
        let schema = breadcrumb_schema(ORIGIN, &items);
        let elements = schema["itemListElement"].as_array().unwrap();
        assert_eq!(elements[0]["name"], "Home & Garden");
        assert_eq!(elements[1]["name"], "  spaced  ");
    }

    #[test]
    fn item_present_iff_href_present() {
        let items = vec![
            BreadcrumbItem::new("Home", "/"),
            BreadcrumbItem::current("Here"),
        ];
        let schema = breadcrumb_schema(ORIGIN, &items);
        let elements = schema["itemListElement"].as_array().unwrap();
        assert!(elements[0].get("item").is_some());
        assert!(elements[1].get("item").is_none());
    }

    #[test]
    fn item_is_origin_plus_href() {
        let items = vec![BreadcrumbItem::new("Compare", "/compare/")];
        let schema = breadcrumb_schema(ORIGIN, &items);
        assert_eq!(
            schema["itemListElement"][0]["item"],
            "https://datastackguide.com/compare/"
        );
    }

    #[test]
    fn malformed_href_passes_through_unchanged() {
        // No normalization, no encoding, no slash enforcement.
        let items = vec![BreadcrumbItem::new("Odd", "no-leading-slash?q=a b")];
        let schema = breadcrumb_schema(ORIGIN, &items);
        assert_eq!(
            schema["itemListElement"][0]["item"],
            "https://datastackguide.comno-leading-slash?q=a b"
        );
    }

    #[test]
    fn worked_example() {
        let items = vec![
            BreadcrumbItem::new("Home", "/"),
            BreadcrumbItem::new("Compare", "/compare/"),
            BreadcrumbItem::current("Apollo vs Instantly"),
        ];
        let schema = breadcrumb_schema(ORIGIN, &items);
        assert_eq!(
            schema,
            json!({
                "@type": "BreadcrumbList",
                "itemListElement": [
                    {
                        "@type": "ListItem",
                        "position": 1,
                        "name": "Home",
                        "item": "https://datastackguide.com/"
                    },
                    {
                        "@type": "ListItem",
                        "position": 2,
                        "name": "Compare",
                        "item": "https://datastackguide.com/compare/"
                    },
                    {
                        "@type": "ListItem",
                        "position": 3,
                        "name": "Apollo vs Instantly"
                    }
                ]
            })
        );
    }

    #[test]
    fn single_item_trail() {
        let schema = breadcrumb_schema(ORIGIN, &[BreadcrumbItem::current("Home")]);
        let elements = schema["itemListElement"].as_array().unwrap();
        assert_eq!(elements.len(), 1);
        assert_eq!(elements[0]["position"], 1);
        assert_eq!(elements[0]["name"], "Home");
    }
}
