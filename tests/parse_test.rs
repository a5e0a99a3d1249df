#![allow(clippy::expect_used)]

use mf2_parser::{parse, parse_bytes, parse_with_options, Options, PropertyValue};
use serde_json::json;

fn items_json(html: &str) -> serde_json::Value {
    let result = parse(html).expect("parse failed");
    result.to_value().expect("serialization failed")["items"].clone()
}

#[test]
fn explicit_name_property() {
    let html = r#"<div class="h-card"><p class="p-name">Barnaby Walters</p></div>"#;
    let result = parse(html).expect("parse failed");

    assert_eq!(
        result.to_value().expect("serialization failed"),
        json!({
            "items": [{"type": ["h-card"], "properties": {"name": ["Barnaby Walters"]}}],
            "rels": {},
            "rel-urls": {}
        })
    );
}

#[test]
fn implied_name_from_text() {
    let html = r#"<span class="h-card">The Name</span>"#;
    assert_eq!(
        items_json(html),
        json!([{"type": ["h-card"], "properties": {"name": ["The Name"]}}])
    );
}

#[test]
fn relative_url_resolved_against_base() {
    let html = r#"<div class="h-entry"><a class="u-url" href="../b">x</a></div>"#;
    let options = Options {
        base_url: Some("http://example.com/a/".to_string()),
        ..Options::default()
    };
    let result = parse_with_options(html, &options).expect("parse failed");

    assert_eq!(result.items[0].first_str("url"), Some("http://example.com/b"));
}

#[test]
fn multiple_root_types_are_sorted() {
    let html = r#"<div class="h-entry h-as-note h-cite"><p class="p-name">N</p></div>"#;
    let result = parse(html).expect("parse failed");
    assert_eq!(result.items[0].types, vec!["h-as-note", "h-cite", "h-entry"]);
}

#[test]
fn invalid_class_tokens_are_ignored() {
    let html = r#"<div class="h-card"><span class="p-Name p-n4me p-name">A</span><span class="p-">B</span></div>"#;
    assert_eq!(
        items_json(html),
        json!([{"type": ["h-card"], "properties": {"name": ["A"]}}])
    );
}

#[test]
fn property_nested_and_child_items_are_not_duplicated() {
    let html = r#"<div class="h-entry">
        <span class="p-name">Post</span>
        <div class="p-author h-card"><span class="p-name">Jane</span></div>
        <div class="h-cite"><span class="p-name">Other</span></div>
    </div>"#;

    assert_eq!(
        items_json(html),
        json!([{
            "type": ["h-entry"],
            "properties": {
                "name": ["Post"],
                "author": [{"type": ["h-card"], "properties": {"name": ["Jane"]}, "value": "Jane"}]
            },
            "children": [{"type": ["h-cite"], "properties": {"name": ["Other"]}}]
        }])
    );
}

#[test]
fn u_nested_item_takes_its_url_as_value() {
    let html = r#"<div class="h-entry"><p class="p-name">Reply</p><a class="u-in-reply-to h-cite" href="/orig">Original</a></div>"#;
    assert_eq!(
        items_json(html),
        json!([{
            "type": ["h-entry"],
            "properties": {
                "name": ["Reply"],
                "in-reply-to": [{
                    "type": ["h-cite"],
                    "properties": {"name": ["Original"], "url": ["/orig"]},
                    "value": "/orig"
                }]
            }
        }])
    );
}

#[test]
fn e_nested_item_has_html_and_value() {
    let html = r#"<div class="h-entry"><div class="e-content h-card"><b>Jane</b></div></div>"#;
    let result = parse(html).expect("parse failed");
    let content = result.items[0].get("content").expect("content property");
    let nested = content[0].as_item().expect("nested item");

    assert_eq!(nested.value.as_deref(), Some("Jane"));
    assert_eq!(nested.html.as_deref(), Some("<b>Jane</b>"));
}

#[test]
fn e_property_serializes_markup_and_text() {
    let html = r#"<div class="h-entry"><p class="p-name">T</p><div class="e-content"><p>Hello <img src="/a.png" alt="a"></p></div></div>"#;
    let options = Options {
        base_url: Some("https://example.com/post/".to_string()),
        ..Options::default()
    };
    let result = parse_with_options(html, &options).expect("parse failed");

    assert_eq!(
        result.items[0].get("content").expect("content"),
        &[PropertyValue::Embedded {
            html: r#"<p>Hello <img src="https://example.com/a.png" alt="a"></p>"#.to_string(),
            value: "Hello a".to_string(),
            lang: None,
        }]
    );
}

#[test]
fn e_property_with_value_class_keeps_markup() {
    let html = r#"<div class="h-entry"><p class="p-name">T</p><div class="e-content"><span class="value">V</span> <b>rest</b></div></div>"#;
    assert_eq!(
        items_json(html)[0]["properties"]["content"],
        json!([{"html": "<span class=\"value\">V</span> <b>rest</b>", "value": "V"}])
    );
}

#[test]
fn implied_photo_and_url() {
    let html = r#"<a class="h-card" href="/jane"><img src="/jane.png" alt="Jane"></a>"#;
    assert_eq!(
        items_json(html),
        json!([{
            "type": ["h-card"],
            "properties": {
                "name": ["Jane"],
                "photo": [{"value": "/jane.png", "alt": "Jane"}],
                "url": ["/jane"]
            }
        }])
    );
}

#[test]
fn implied_photo_with_empty_alt() {
    let html = r#"<div class="h-card"><img src="/a.png" alt="">Jane</div>"#;
    assert_eq!(
        items_json(html),
        json!([{
            "type": ["h-card"],
            "properties": {
                "name": ["Jane"],
                "photo": [{"value": "/a.png", "alt": ""}]
            }
        }])
    );
}

#[test]
fn explicit_u_property_suppresses_implied_photo_and_url() {
    let html = r#"<div class="h-card"><img src="/p.png"><a class="u-uid" href="/id">Jane</a></div>"#;
    let result = parse(html).expect("parse failed");
    let card = &result.items[0];

    assert_eq!(card.first_str("uid"), Some("/id"));
    assert!(card.get("photo").is_none());
    assert!(card.get("url").is_none());
}

#[test]
fn nested_roots_suppress_implied_properties() {
    let html = r#"<div class="h-feed"><div class="h-entry"><p class="p-name">E</p></div></div>"#;
    let result = parse(html).expect("parse failed");

    assert!(result.items[0].properties.is_empty());
    assert_eq!(result.items[0].children.len(), 1);
}

#[test]
fn language_annotations() {
    let html = r#"<html lang="en"><body>
        <div class="h-entry"><p class="p-name">Hi</p><div class="e-content" lang="fr">Bonjour</div></div>
        <div class="h-card" lang="de"><p class="p-name">Hans</p></div>
    </body></html>"#;
    let options = Options {
        include_lang: true,
        ..Options::default()
    };
    let value = parse_with_options(html, &options)
        .expect("parse failed")
        .to_value()
        .expect("serialization failed");

    assert_eq!(value["items"][0]["lang"], json!("en"));
    assert_eq!(
        value["items"][0]["properties"]["content"],
        json!([{"html": "Bonjour", "value": "Bonjour", "lang": "fr"}])
    );
    assert_eq!(value["items"][1]["lang"], json!("de"));
}

#[test]
fn lang_omitted_by_default() {
    let html = r#"<html lang="en"><body><div class="h-card"><p class="p-name">A</p></div></body></html>"#;
    let items = items_json(html);
    assert!(items[0].get("lang").is_none());
}

#[test]
fn parse_is_deterministic() {
    let html = r#"<div class="hentry"><h1 class="entry-title">T</h1><div class="h-card">X</div></div>"#;
    let first = parse(html).expect("parse failed");
    let second = parse(html).expect("parse failed");
    assert_eq!(first, second);
}

#[test]
fn bytes_with_declared_charset() {
    let html = b"<meta charset=\"windows-1252\"><div class=\"h-card\"><p class=\"p-name\">Caf\xE9 \x93X\x94</p></div>";
    let result = parse_bytes(html, &Options::default()).expect("parse failed");
    assert_eq!(result.items[0].first_str("name"), Some("Café \u{201c}X\u{201d}"));
}

#[test]
fn to_json_uses_canonical_keys() {
    let html = r#"<a rel="me" href="https://example.com/">me</a>"#;
    let json = parse(html).expect("parse failed").to_json().expect("serialization failed");

    assert!(json.contains(r#""rel-urls""#));
    assert!(!json.contains("alternates"));
}
