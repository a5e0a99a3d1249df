//! Property extraction for one microformat root.
//!
//! Scans a root's elements once per prefix (`p-`, `u-`, `dt-`, `e-`), computes
//! each matching element's value and marks it consumed for that prefix.

use dom_query::NodeRef;

use crate::dom::{get_attribute, lang_of, property_names, tag_name};
use crate::result::PropertyValue;

use super::datetime::{dt_value, DateAccumulator};
use super::state::{Prefix, PrefixSet};
use super::text::{inner_html, text_content};
use super::value_class::value_class_text;
use super::ParseContext;

/// Properties found on one root, each tagged with its element's position.
#[derive(Debug, Default)]
pub struct Extracted {
    /// `(position, name, value)` in scan order.
    pub values: Vec<(usize, String, PropertyValue)>,
    /// Prefixes that matched at least one element.
    pub found: PrefixSet,
}

/// Value of a `p-*` property.
#[must_use]
pub fn p_value(ctx: &ParseContext, node: &NodeRef) -> String {
    if let Some(value) = ctx.state.upgrades.value_override(node.id) {
        return value.to_string();
    }
    if let Some(value) = value_class_text(node, &ctx.urls) {
        return value;
    }

    let attr = match tag_name(node).as_str() {
        "img" | "area" => get_attribute(node, "alt"),
        "abbr" | "link" => get_attribute(node, "title"),
        "data" | "input" => get_attribute(node, "value"),
        _ => None,
    };
    attr.unwrap_or_else(|| text_content(node, &ctx.urls, false))
}

/// Value of a `u-*` property, resolved against the base URL.
#[must_use]
pub fn u_value(ctx: &ParseContext, node: &NodeRef) -> PropertyValue {
    let urls = &ctx.urls;
    let tag = tag_name(node);

    let url = match tag.as_str() {
        "a" | "area" | "link" => get_attribute(node, "href"),
        "img" => {
            if let Some(src) = get_attribute(node, "src") {
                let value = urls.resolve(&src);
                return match get_attribute(node, "alt") {
                    Some(alt) => PropertyValue::Image { value, alt },
                    None => PropertyValue::Text(value),
                };
            }
            None
        }
        "audio" | "video" | "source" | "iframe" => get_attribute(node, "src"),
        _ => None,
    }
    .or_else(|| (tag == "video").then(|| get_attribute(node, "poster")).flatten())
    .or_else(|| (tag == "object").then(|| get_attribute(node, "data")).flatten());

    if let Some(url) = url {
        return PropertyValue::Text(urls.resolve(&url));
    }

    let fallback = value_class_text(node, urls)
        .or_else(|| match tag.as_str() {
            "abbr" | "link" => get_attribute(node, "title"),
            "data" | "input" => get_attribute(node, "value"),
            _ => None,
        })
        .unwrap_or_else(|| text_content(node, urls, false));

    if fallback.trim().is_empty() {
        PropertyValue::Text(String::new())
    } else {
        PropertyValue::Text(urls.resolve(&fallback))
    }
}

/// Value of an `e-*` property: markup plus rendered text.
///
/// The value-class pattern, when present, supplies the text; the markup is
/// always the element's own.
#[must_use]
pub fn e_value(ctx: &ParseContext, node: &NodeRef) -> PropertyValue {
    let value = value_class_text(node, &ctx.urls).unwrap_or_else(|| text_content(node, &ctx.urls, false));

    let lang = if ctx.options.include_lang {
        lang_of(node).or_else(|| ctx.document_lang.clone())
    } else {
        None
    };

    PropertyValue::Embedded {
        html: inner_html(node, &ctx.urls),
        value,
        lang,
    }
}

/// Extract the explicit properties of a root from its scoped elements.
///
/// Elements consumed as roots, or already consumed for a prefix, are
/// skipped. Inside a classic root only upgraded elements count.
pub fn extract_properties(ctx: &mut ParseContext, elements: &[NodeRef], backcompat: bool) -> Extracted {
    let mut out = Extracted::default();
    let mut dates = DateAccumulator::default();
    let mut dt_range = 0..0;

    for prefix in Prefix::PROPERTIES {
        if prefix == Prefix::Dt {
            dt_range.start = out.values.len();
        }

        for (position, node) in elements.iter().enumerate() {
            let consumed = &ctx.state.consumed;
            if consumed.is_consumed(node.id, Prefix::H) || consumed.is_consumed(node.id, prefix) {
                continue;
            }
            let names = property_names(node, prefix.class_prefix());
            if names.is_empty() {
                continue;
            }
            if backcompat && !ctx.state.upgrades.is_upgraded(node.id) {
                continue;
            }

            ctx.state.consumed.mark(node.id, prefix);
            out.found.insert(prefix);

            let value = match prefix {
                Prefix::P => Some(PropertyValue::Text(p_value(ctx, node))),
                Prefix::U => Some(u_value(ctx, node)),
                Prefix::Dt => dt_value(node, &ctx.urls, &mut dates).map(PropertyValue::Text),
                Prefix::E => Some(e_value(ctx, node)),
                Prefix::H => None,
            };
            let Some(value) = value else {
                continue;
            };

            for name in names {
                out.values.push((position, name, value.clone()));
            }
        }

        if prefix == Prefix::Dt {
            dt_range.end = out.values.len();
        }
    }

    if let Some(tz) = dates.implied_timezone() {
        tracing::trace!(timezone = tz, "applying implied timezone");
        for (_, _, value) in &mut out.values[dt_range] {
            if let PropertyValue::Text(text) = value {
                *text = dates.apply_implied_timezone(text);
            }
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::element_descendants;
    use crate::url_utils::UrlResolver;
    use crate::Options;
    use dom_query::Document;

    fn extract(html: &str, base: Option<&str>) -> Vec<(String, PropertyValue)> {
        let doc = Document::from(html);
        let options = Options::default();
        let mut ctx = ParseContext::new(&options, UrlResolver::new(base), None);
        let root = doc.select(".h-x").nodes()[0];
        let elements = element_descendants(&root);
        let mut values = extract_properties(&mut ctx, &elements, false).values;
        values.sort_by_key(|(pos, _, _)| *pos);
        values.into_iter().map(|(_, name, value)| (name, value)).collect()
    }

    fn text(name: &str, value: &str) -> (String, PropertyValue) {
        (name.to_string(), PropertyValue::Text(value.to_string()))
    }

    #[test]
    fn test_p_property_sources() {
        let html = r#"<div class="h-x">
            <img class="p-a" alt="Alt" src="x.png">
            <abbr class="p-b" title="Title">T</abbr>
            <data class="p-c" value="42">forty-two</data>
            <span class="p-d"> some <b>text</b> </span>
        </div>"#;
        assert_eq!(
            extract(html, None),
            vec![text("a", "Alt"), text("b", "Title"), text("c", "42"), text("d", "some text")]
        );
    }

    #[test]
    fn test_u_property_sources() {
        let html = r#"<div class="h-x">
            <a class="u-a" href="/a">A</a>
            <img class="u-b" src="b.png" alt="B">
            <video class="u-c" poster="c.jpg"></video>
            <object class="u-d" data="d.svg"></object>
            <abbr class="u-e" title="e.html">E</abbr>
            <span class="u-f">f.html</span>
        </div>"#;
        let base = Some("http://example.com/");
        assert_eq!(
            extract(html, base),
            vec![
                text("a", "http://example.com/a"),
                (
                    "b".to_string(),
                    PropertyValue::Image {
                        value: "http://example.com/b.png".to_string(),
                        alt: "B".to_string()
                    }
                ),
                text("c", "http://example.com/c.jpg"),
                text("d", "http://example.com/d.svg"),
                text("e", "http://example.com/e.html"),
                text("f", "http://example.com/f.html"),
            ]
        );
    }

    #[test]
    fn test_e_property() {
        let html = r#"<div class="h-x"><div class="e-content"> <p>Hi <a href="/x">there</a></p> </div></div>"#;
        let values = extract(html, Some("http://example.com/"));
        assert_eq!(
            values[0].1,
            PropertyValue::Embedded {
                html: r#"<p>Hi <a href="http://example.com/x">there</a></p>"#.to_string(),
                value: "Hi there".to_string(),
                lang: None,
            }
        );
    }

    #[test]
    fn test_e_property_with_value_class_keeps_markup() {
        let html = r#"<div class="h-x"><div class="e-content"><span class="value">V</span> <b>rest</b></div></div>"#;
        assert_eq!(
            extract(html, None)[0].1,
            PropertyValue::Embedded {
                html: r#"<span class="value">V</span> <b>rest</b>"#.to_string(),
                value: "V".to_string(),
                lang: None,
            }
        );
    }

    #[test]
    fn test_one_element_many_names() {
        let html = r#"<div class="h-x"><a class="u-url u-uid p-name" href="/me">Me</a></div>"#;
        let values = extract(html, None);
        assert_eq!(values, vec![text("name", "Me"), text("url", "/me"), text("uid", "/me")]);
    }

    #[test]
    fn test_empty_dt_is_omitted_but_consumed() {
        let html = r#"<div class="h-x"><span class="dt-start"></span><span class="p-x"></span></div>"#;
        assert_eq!(extract(html, None), vec![text("x", "")]);
    }

    #[test]
    fn test_implied_timezone_applies_to_all_dt_values() {
        let html = r#"<div class="h-x">
            <time class="dt-start" datetime="2014-06-01 12:30">x</time>
            <span class="dt-end"><span class="value">19:30</span><span class="value">-0700</span></span>
        </div>"#;
        assert_eq!(
            extract(html, None),
            vec![text("start", "2014-06-01 12:30-0700"), text("end", "2014-06-01T19:30-0700")]
        );
    }
}
