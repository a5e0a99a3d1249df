//! Document-wide `rel` index.
//!
//! Built from every `a`, `area` and `link` carrying both `rel` and `href`,
//! independent of any microformat root.

use std::collections::BTreeMap;

use dom_query::NodeRef;

use crate::dom::{element_descendants, get_attribute, is_tag, non_empty_attribute};
use crate::result::{Alternate, RelUrl};
use crate::url_utils::UrlResolver;

/// The three rel outputs of one document.
#[derive(Debug, Default)]
pub struct RelIndex {
    pub rels: BTreeMap<String, Vec<String>>,
    pub rel_urls: BTreeMap<String, RelUrl>,
    pub alternates: Vec<Alternate>,
}

/// Rel tokens of a link, deduplicated in order.
fn rel_tokens(node: &NodeRef) -> Vec<String> {
    let mut tokens: Vec<String> = Vec::new();
    if let Some(rel) = get_attribute(node, "rel") {
        for token in rel.split_ascii_whitespace() {
            if !tokens.iter().any(|t| t == token) {
                tokens.push(token.to_string());
            }
        }
    }
    tokens
}

fn link_text(node: &NodeRef) -> Option<String> {
    let text = node.text().to_string();
    (!text.is_empty()).then_some(text)
}

/// Scan the whole document for rel links.
#[must_use]
pub fn parse_rels(document_root: &NodeRef, urls: &UrlResolver, enable_alternates: bool) -> RelIndex {
    let mut index = RelIndex::default();

    for link in element_descendants(document_root) {
        if !is_tag(&link, &["a", "area", "link"]) {
            continue;
        }
        let Some(href) = get_attribute(&link, "href") else {
            continue;
        };
        let tokens = rel_tokens(&link);
        if tokens.is_empty() {
            continue;
        }
        let url = urls.resolve(&href);

        if enable_alternates && tokens.iter().any(|t| t == "alternate") {
            let rest: Vec<&str> = tokens
                .iter()
                .map(String::as_str)
                .filter(|t| *t != "alternate")
                .collect();
            index.alternates.push(Alternate {
                url,
                rel: (!rest.is_empty()).then(|| rest.join(" ")),
                media: non_empty_attribute(&link, "media"),
                hreflang: non_empty_attribute(&link, "hreflang"),
                title: non_empty_attribute(&link, "title"),
                media_type: non_empty_attribute(&link, "type"),
                text: link_text(&link),
            });
            continue;
        }

        for token in &tokens {
            let urls_for_rel = index.rels.entry(token.clone()).or_default();
            if !urls_for_rel.contains(&url) {
                urls_for_rel.push(url.clone());
            }
        }

        let entry = index.rel_urls.entry(url).or_default();
        entry.media = entry.media.take().or_else(|| non_empty_attribute(&link, "media"));
        entry.hreflang = entry.hreflang.take().or_else(|| non_empty_attribute(&link, "hreflang"));
        entry.title = entry.title.take().or_else(|| non_empty_attribute(&link, "title"));
        entry.media_type = entry.media_type.take().or_else(|| non_empty_attribute(&link, "type"));
        entry.text = entry.text.take().or_else(|| link_text(&link));
        entry.rels.extend(tokens);
        entry.rels.sort();
        entry.rels.dedup();
    }

    tracing::debug!(
        rels = index.rels.len(),
        urls = index.rel_urls.len(),
        alternates = index.alternates.len(),
        "collected rel links"
    );
    index
}
