use std::collections::{BTreeMap, HashMap};

use crate::xml::Element;

/// A link relation: target href plus any extra attributes (e.g. `type`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Link {
    pub href: String,
    pub attributes: BTreeMap<String, String>,
}

impl Link {
    pub fn new(href: impl Into<String>) -> Self {
        Self {
            href: href.into(),
            attributes: BTreeMap::new(),
        }
    }

    /// Content media type advertised by the link, if any.
    pub fn media_type(&self) -> Option<&str> {
        self.attributes.get("type").map(String::as_str)
    }

    /// Integer in the final path segment of the href.
    pub fn trailing_id(&self) -> Option<u64> {
        let path = self.href.split(['?', '#']).next().unwrap_or_default();
        path.trim_end_matches('/').rsplit('/').next()?.parse().ok()
    }
}

/// Map each `<link rel=".." href="..">` child of `document` by relation.
/// A relation repeated in the document keeps its last occurrence.
pub fn scan_links(document: &Element) -> HashMap<String, Link> {
    document
        .children_named("link")
        .filter_map(|element| {
            let rel = element.get("rel")?;
            let href = element.get("href")?;
            let attributes = element
                .attributes
                .iter()
                .filter(|(key, _)| key != "rel" && key != "href")
                .cloned()
                .collect();
            Some((rel.to_owned(), Link { href: href.to_owned(), attributes }))
        })
        .collect()
}
