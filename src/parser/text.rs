//! Text rendering and markup serialization for property values.
//!
//! Both walks are iterative so deeply nested markup cannot overflow the stack.

use dom_query::NodeRef;

use crate::dom::{get_all_attributes, get_attribute, tag_name};
use crate::url_utils::UrlResolver;

/// Elements serialized without a closing tag.
const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "keygen", "link", "meta",
    "param", "source", "track", "wbr",
];

/// Elements whose text content is emitted unescaped.
const RAW_TEXT_ELEMENTS: &[&str] = &[
    "script", "style", "xmp", "iframe", "noembed", "noframes", "plaintext",
];

/// Attributes holding a single URL.
const URL_ATTRIBUTES: &[&str] = &["href", "src", "data", "poster"];

/// Rendered text of an element's content.
///
/// `script`/`style` are skipped, `br` and `p` produce line breaks and
/// images contribute their `alt` text. Outside `implied` mode an image
/// without `alt` contributes its resolved `src` instead.
#[must_use]
pub fn text_content(node: &NodeRef, urls: &UrlResolver, implied: bool) -> String {
    let mut out = String::new();
    let mut stack: Vec<NodeRef> = node.children().into_iter().rev().collect();

    while let Some(current) = stack.pop() {
        if current.is_text() {
            out.extend(current.text().chars().map(|c| match c {
                '\t' | '\r' | '\n' => ' ',
                c => c,
            }));
            continue;
        }
        if !current.is_element() {
            continue;
        }

        match tag_name(&current).as_str() {
            "script" | "style" => continue,
            "img" => {
                if let Some(alt) = get_attribute(&current, "alt") {
                    out.push(' ');
                    out.push_str(alt.trim());
                    out.push(' ');
                } else if !implied {
                    if let Some(src) = get_attribute(&current, "src") {
                        out.push(' ');
                        out.push_str(&urls.resolve(&src));
                        out.push(' ');
                    }
                }
                continue;
            }
            "br" => {
                out.push('\n');
                continue;
            }
            "p" => out.push('\n'),
            _ => {}
        }

        stack.extend(current.children().into_iter().rev());
    }

    collapse_whitespace(&out)
}

/// Collapse space runs, drop spaces next to line breaks and trim.
#[must_use]
pub fn collapse_whitespace(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            ' ' if out.ends_with(' ') || out.ends_with('\n') => {}
            '\n' if out.ends_with(' ') => {
                out.pop();
                out.push('\n');
            }
            c => out.push(c),
        }
    }
    out.trim().to_string()
}

enum Step<'a> {
    Enter(NodeRef<'a>),
    Close(String),
}

/// Serialize an element's children as HTML, resolving URL attributes.
///
/// The document is left untouched; resolution happens on the way out.
#[must_use]
pub fn inner_html(node: &NodeRef, urls: &UrlResolver) -> String {
    let mut out = String::new();
    let raw_text = RAW_TEXT_ELEMENTS.contains(&tag_name(node).as_str());
    let mut stack: Vec<(Step, bool)> = node
        .children()
        .into_iter()
        .rev()
        .map(|child| (Step::Enter(child), raw_text))
        .collect();

    while let Some((step, in_raw_text)) = stack.pop() {
        let current = match step {
            Step::Close(name) => {
                out.push_str("</");
                out.push_str(&name);
                out.push('>');
                continue;
            }
            Step::Enter(current) => current,
        };

        if current.is_text() {
            let text = current.text();
            if in_raw_text {
                out.push_str(&text);
            } else {
                escape_text(&text, &mut out);
            }
            continue;
        }

        if current.is_comment() {
            if let Some(html) = current.try_html() {
                out.push_str(&html);
            }
            continue;
        }

        if !current.is_element() {
            continue;
        }

        let name = current
            .node_name()
            .map(|n| n.to_string())
            .unwrap_or_default();
        write_start_tag(&current, &name, urls, &mut out);

        let lower = name.to_ascii_lowercase();
        if VOID_ELEMENTS.contains(&lower.as_str()) {
            continue;
        }

        let child_raw = RAW_TEXT_ELEMENTS.contains(&lower.as_str());
        stack.push((Step::Close(name), false));
        stack.extend(
            current
                .children()
                .into_iter()
                .rev()
                .map(|child| (Step::Enter(child), child_raw)),
        );
    }

    out.trim().to_string()
}

fn write_start_tag(node: &NodeRef, name: &str, urls: &UrlResolver, out: &mut String) {
    out.push('<');
    out.push_str(name);
    for (attr, value) in get_all_attributes(node) {
        let value = if URL_ATTRIBUTES.contains(&attr.as_str()) {
            urls.resolve(&value)
        } else if attr == "srcset" {
            urls.resolve_srcset(&value)
        } else {
            value
        };
        out.push(' ');
        out.push_str(&attr);
        out.push_str("=\"");
        escape_attribute(&value, out);
        out.push('"');
    }
    out.push('>');
}

fn escape_text(text: &str, out: &mut String) {
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '\u{a0}' => out.push_str("&nbsp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            c => out.push(c),
        }
    }
}

fn escape_attribute(value: &str, out: &mut String) {
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '\u{a0}' => out.push_str("&nbsp;"),
            '"' => out.push_str("&quot;"),
            c => out.push(c),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dom_query::Document;

    fn render(html: &str, base: Option<&str>, implied: bool) -> String {
        let doc = Document::from(html);
        let sel = doc.select("#t");
        let node = sel.nodes()[0];
        text_content(&node, &UrlResolver::new(base), implied)
    }

    fn serialize(html: &str, base: Option<&str>) -> String {
        let doc = Document::from(html);
        let sel = doc.select("#t");
        let node = sel.nodes()[0];
        inner_html(&node, &UrlResolver::new(base))
    }

    #[test]
    fn test_text_collapses_whitespace() {
        assert_eq!(render("<div id=\"t\">  Hello \n\t  World  </div>", None, false), "Hello World");
    }

    #[test]
    fn test_text_skips_script_and_style() {
        let html = "<div id=\"t\">a<script>var x;</script><style>p{}</style>b</div>";
        assert_eq!(render(html, None, false), "ab");
    }

    #[test]
    fn test_text_line_breaks() {
        let html = "<div id=\"t\">one<br>two <p>three</p></div>";
        assert_eq!(render(html, None, false), "one\ntwo\nthree");
    }

    #[test]
    fn test_text_image_substitution() {
        let html = r#"<div id="t">Hi <img src="/a.png"> and <img alt=" Bob " src="/b.png"></div>"#;
        assert_eq!(
            render(html, Some("http://example.com/"), false),
            "Hi http://example.com/a.png and Bob"
        );
        assert_eq!(render(html, Some("http://example.com/"), true), "Hi and Bob");
    }

    #[test]
    fn test_inner_html_resolves_urls_without_mutating() {
        let html = r#"<div id="t"> <a href="/x">link</a><img src="i.png" srcset="a.png 1x, b.png 2x"> </div>"#;
        let doc = Document::from(html);
        let node = doc.select("#t").nodes()[0];
        let urls = UrlResolver::new(Some("http://example.com/p/"));

        assert_eq!(
            inner_html(&node, &urls),
            r#"<a href="http://example.com/x">link</a><img src="http://example.com/p/i.png" srcset="http://example.com/p/a.png 1x, http://example.com/p/b.png 2x">"#
        );
        assert_eq!(doc.select("a").attr("href").map(|h| h.to_string()), Some("/x".to_string()));
    }

    #[test]
    fn test_inner_html_escapes_text_and_attributes() {
        let html = "<div id=\"t\"><span title='a\"b'>1 &lt; 2 &amp; 3</span></div>";
        assert_eq!(
            serialize(html, None),
            "<span title=\"a&quot;b\">1 &lt; 2 &amp; 3</span>"
        );
    }

    #[test]
    fn test_inner_html_keeps_raw_text_and_comments() {
        let html = "<div id=\"t\"><!-- note --><script>if (a < b) {}</script></div>";
        assert_eq!(serialize(html, None), "<!-- note --><script>if (a < b) {}</script>");
    }

    #[test]
    fn test_collapse_whitespace() {
        assert_eq!(collapse_whitespace("  a   b \n  c  "), "a b\nc");
        assert_eq!(collapse_whitespace("\n\nx"), "x");
    }
}
