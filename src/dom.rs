//! DOM Operations Adapter
//!
//! Thin helpers over `dom_query` node references: tag and attribute access,
//! class token handling and element-only traversal. The parser works on
//! `NodeRef` handles so per-node side tables can be keyed by `NodeId`.

// Re-export core types for external use
pub use dom_query::{Document, NodeId, NodeRef};

use crate::patterns::MF2_CLASS;

// === Tag/Attribute Operations ===

/// Get tag name (lowercase), empty for non-element nodes
#[must_use]
pub fn tag_name(node: &NodeRef) -> String {
    if !node.is_element() {
        return String::new();
    }
    node.node_name()
        .map(|t| t.to_ascii_lowercase())
        .unwrap_or_default()
}

/// Check the tag name against a list of candidates
#[must_use]
pub fn is_tag(node: &NodeRef, tags: &[&str]) -> bool {
    let tag = tag_name(node);
    tags.iter().any(|t| *t == tag)
}

/// Get any attribute value
#[inline]
#[must_use]
pub fn get_attribute(node: &NodeRef, name: &str) -> Option<String> {
    node.attr(name).map(|s| s.to_string())
}

/// Get an attribute value only when it is present and non-empty
#[must_use]
pub fn non_empty_attribute(node: &NodeRef, name: &str) -> Option<String> {
    get_attribute(node, name).filter(|v| !v.is_empty())
}

/// Get all attributes as key-value pairs, in source order
#[must_use]
pub fn get_all_attributes(node: &NodeRef) -> Vec<(String, String)> {
    node.attrs()
        .iter()
        .map(|attr| {
            let name = match attr.name.prefix {
                Some(ref prefix) => format!("{prefix}:{}", attr.name.local),
                None => attr.name.local.to_string(),
            };
            (name, attr.value.to_string())
        })
        .collect()
}

// === Class Tokens ===

/// Split the class attribute on HTML whitespace
#[must_use]
pub fn class_tokens(node: &NodeRef) -> Vec<String> {
    node.attr("class")
        .map(|class| class.split_ascii_whitespace().map(str::to_string).collect())
        .unwrap_or_default()
}

/// Check for an exact class token
#[must_use]
pub fn has_class_token(node: &NodeRef, token: &str) -> bool {
    node.attr("class")
        .is_some_and(|class| class.split_ascii_whitespace().any(|t| t == token))
}

/// Append class tokens that the element does not already carry
///
/// Returns the tokens actually added.
pub fn add_class_tokens(node: &NodeRef, tokens: &[&str]) -> Vec<String> {
    let mut current = class_tokens(node);
    let mut added = Vec::new();
    for token in tokens {
        if !current.iter().any(|t| t == token) {
            current.push((*token).to_string());
            added.push((*token).to_string());
        }
    }
    if !added.is_empty() {
        node.set_attr("class", &current.join(" "));
    }
    added
}

/// Valid microformats2 root types (`h-*`) on an element, sorted and deduplicated
#[must_use]
pub fn root_types(node: &NodeRef) -> Vec<String> {
    let mut types: Vec<String> = class_tokens(node)
        .into_iter()
        .filter(|t| t.starts_with("h-") && MF2_CLASS.is_match(t))
        .collect();
    types.sort();
    types.dedup();
    types
}

/// Whether the element carries a valid `h-*` root class
#[must_use]
pub fn has_root_class(node: &NodeRef) -> bool {
    class_tokens(node)
        .iter()
        .any(|t| t.starts_with("h-") && MF2_CLASS.is_match(t))
}

/// Whether any class token starts with `h-`, valid or not
///
/// Used by the implied-property searches, which exclude every `h-*` looking element.
#[must_use]
pub fn has_h_prefixed_class(node: &NodeRef) -> bool {
    class_tokens(node).iter().any(|t| t.starts_with("h-"))
}

/// Property names for one prefix (`"p-"`, `"u-"`, `"dt-"`, `"e-"`), in class order
#[must_use]
pub fn property_names(node: &NodeRef, prefix: &str) -> Vec<String> {
    let mut names: Vec<String> = Vec::new();
    for token in class_tokens(node) {
        if let Some(name) = token.strip_prefix(prefix) {
            if MF2_CLASS.is_match(&token) && !names.iter().any(|n| n == name) {
                names.push(name.to_string());
            }
        }
    }
    names
}

// === Tree Navigation ===

/// Direct element children
#[inline]
#[must_use]
pub fn element_children<'a>(node: &NodeRef<'a>) -> Vec<NodeRef<'a>> {
    node.element_children()
}

/// All element descendants in document order (excluding the node itself)
///
/// Collected eagerly so callers may mutate attributes while iterating.
#[must_use]
pub fn element_descendants<'a>(node: &NodeRef<'a>) -> Vec<NodeRef<'a>> {
    node.descendants()
        .into_iter()
        .filter(NodeRef::is_element)
        .collect()
}

/// The `lang` in effect at a node: its own attribute or the nearest ancestor's
#[must_use]
pub fn lang_of(node: &NodeRef) -> Option<String> {
    if let Some(lang) = non_empty_attribute(node, "lang") {
        return Some(lang.trim().to_string());
    }
    node.ancestors(None)
        .iter()
        .filter(|n| n.is_element())
        .find_map(|n| non_empty_attribute(n, "lang"))
        .map(|lang| lang.trim().to_string())
}

// === Parsing ===

/// Parse HTML string into document
#[inline]
#[must_use]
pub fn parse(html: &str) -> Document {
    Document::from(html)
}
