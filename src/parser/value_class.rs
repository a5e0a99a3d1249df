//! The value-class pattern.
//!
//! Direct children classed `value` (or `value-title`) supply an element's
//! machine-readable value in place of its visible text.

use dom_query::NodeRef;

use crate::dom::{element_children, get_attribute, has_class_token, tag_name};
use crate::url_utils::UrlResolver;

use super::text::text_content;

/// Direct children taking part in the value-class pattern, in document order.
#[must_use]
pub fn value_class_parts<'a>(node: &NodeRef<'a>) -> Vec<NodeRef<'a>> {
    element_children(node)
        .into_iter()
        .filter(|child| has_class_token(child, "value") || has_class_token(child, "value-title"))
        .collect()
}

/// Plain value of one `value` part, by element type.
fn part_value(part: &NodeRef, urls: &UrlResolver) -> String {
    let attr = match tag_name(part).as_str() {
        "img" | "area" => get_attribute(part, "alt"),
        "abbr" | "link" => get_attribute(part, "title"),
        "data" | "input" => get_attribute(part, "value"),
        _ => None,
    };
    attr.unwrap_or_else(|| text_content(part, urls, false))
}

/// Value from the value-class pattern, or `None` when the pattern is not in use.
///
/// `value` parts win over `value-title` parts; the concatenation is trimmed.
#[must_use]
pub fn value_class_text(node: &NodeRef, urls: &UrlResolver) -> Option<String> {
    let parts = value_class_parts(node);

    let values: Vec<String> = parts
        .iter()
        .filter(|part| has_class_token(part, "value"))
        .map(|part| part_value(part, urls))
        .collect();
    if !values.is_empty() {
        return Some(values.concat().trim().to_string());
    }

    let titles: Vec<String> = parts
        .iter()
        .filter(|part| has_class_token(part, "value-title"))
        .map(|part| get_attribute(part, "title").unwrap_or_default())
        .collect();
    if !titles.is_empty() {
        return Some(titles.concat().trim().to_string());
    }

    None
}
