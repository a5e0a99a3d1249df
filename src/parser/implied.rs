//! Implied `name`, `photo` and `url` properties.
//!
//! Each property has an ordered list of structural candidates; the first one
//! that matches supplies the value.

use dom_query::NodeRef;

use crate::dom::{element_children, get_attribute, has_h_prefixed_class, is_tag, non_empty_attribute, tag_name};
use crate::result::PropertyValue;
use crate::url_utils::UrlResolver;

use super::text::text_content;

type Candidate = fn(&NodeRef, &UrlResolver) -> Option<PropertyValue>;

/// `alt` of an `img`/`area`, or `title` of an `abbr`.
///
/// An empty `alt` only counts on the root itself; an empty `title` always counts.
fn name_attribute(node: &NodeRef, is_root: bool) -> Option<String> {
    match tag_name(node).as_str() {
        "img" | "area" if is_root => get_attribute(node, "alt"),
        "img" | "area" => non_empty_attribute(node, "alt"),
        "abbr" => get_attribute(node, "title"),
        _ => None,
    }
}

/// The only element child, if it has no `h-*` class.
fn sole_child<'a>(node: &NodeRef<'a>) -> Option<NodeRef<'a>> {
    match element_children(node).as_slice() {
        [only] if !has_h_prefixed_class(only) => Some(*only),
        _ => None,
    }
}

/// The only child element of one of `tags`, if it has no `h-*` class.
fn only_of_type<'a>(node: &NodeRef<'a>, tags: &[&str]) -> Option<NodeRef<'a>> {
    let mut matching = element_children(node).into_iter().filter(|c| is_tag(c, tags));
    match (matching.next(), matching.next()) {
        (Some(only), None) if !has_h_prefixed_class(&only) => Some(only),
        _ => None,
    }
}

fn photo_value(node: &NodeRef, urls: &UrlResolver) -> Option<PropertyValue> {
    match tag_name(node).as_str() {
        "img" => {
            let src = urls.resolve(&non_empty_attribute(node, "src")?);
            Some(match get_attribute(node, "alt") {
                Some(alt) => PropertyValue::Image { value: src, alt },
                None => PropertyValue::Text(src),
            })
        }
        "object" => non_empty_attribute(node, "data").map(|d| PropertyValue::Text(urls.resolve(&d))),
        _ => None,
    }
}

fn url_value(node: &NodeRef, urls: &UrlResolver) -> Option<PropertyValue> {
    if !is_tag(node, &["a", "area"]) {
        return None;
    }
    non_empty_attribute(node, "href").map(|href| PropertyValue::Text(urls.resolve(&href)))
}

const NAME_CANDIDATES: &[Candidate] = &[
    |root, _| name_attribute(root, true).map(PropertyValue::Text),
    |root, _| sole_child(root).and_then(|c| name_attribute(&c, false)).map(PropertyValue::Text),
    |root, _| {
        sole_child(root)
            .and_then(|c| sole_child(&c))
            .and_then(|c| name_attribute(&c, false))
            .map(PropertyValue::Text)
    },
];

const PHOTO_CANDIDATES: &[Candidate] = &[
    photo_value,
    |root, urls| only_of_type(root, &["img"]).and_then(|c| photo_value(&c, urls)),
    |root, urls| only_of_type(root, &["object"]).and_then(|c| photo_value(&c, urls)),
    |root, urls| {
        let wrapper = sole_child(root)?;
        only_of_type(&wrapper, &["img"]).and_then(|c| photo_value(&c, urls))
    },
    |root, urls| {
        let wrapper = sole_child(root)?;
        only_of_type(&wrapper, &["object"]).and_then(|c| photo_value(&c, urls))
    },
];

const URL_CANDIDATES: &[Candidate] = &[
    url_value,
    |root, urls| only_of_type(root, &["a"]).and_then(|c| url_value(&c, urls)),
    |root, urls| only_of_type(root, &["area"]).and_then(|c| url_value(&c, urls)),
    |root, urls| {
        let wrapper = sole_child(root)?;
        only_of_type(&wrapper, &["a"]).and_then(|c| url_value(&c, urls))
    },
    |root, urls| {
        let wrapper = sole_child(root)?;
        only_of_type(&wrapper, &["area"]).and_then(|c| url_value(&c, urls))
    },
];

fn first_match(candidates: &[Candidate], root: &NodeRef, urls: &UrlResolver) -> Option<PropertyValue> {
    candidates.iter().find_map(|candidate| candidate(root, urls))
}

/// Implied `name`: an `alt`/`title` on or just below the root, else its text.
///
/// An attribute that is present supplies the name even when empty; the text
/// fallback returns `None` when it would be empty.
#[must_use]
pub fn implied_name(root: &NodeRef, urls: &UrlResolver) -> Option<PropertyValue> {
    first_match(NAME_CANDIDATES, root, urls).or_else(|| {
        let text = text_content(root, urls, true);
        (!text.is_empty()).then_some(PropertyValue::Text(text))
    })
}

/// Implied `photo` from an `img` or `object` on or just below the root.
#[must_use]
pub fn implied_photo(root: &NodeRef, urls: &UrlResolver) -> Option<PropertyValue> {
    first_match(PHOTO_CANDIDATES, root, urls)
}

/// Implied `url` from an `a` or `area` on or just below the root.
#[must_use]
pub fn implied_url(root: &NodeRef, urls: &UrlResolver) -> Option<PropertyValue> {
    first_match(URL_CANDIDATES, root, urls)
}
