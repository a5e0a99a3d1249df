#![allow(clippy::expect_used)]

use mf2_parser::{parse_with_options, Alternate, Options};
use serde_json::json;

fn options(enable_alternates: bool) -> Options {
    Options {
        base_url: Some("https://example.com/blog/".to_string()),
        enable_alternates,
        ..Options::default()
    }
}

const HTML: &str = r#"<html><head>
    <link rel="me" href="https://github.com/jane">
    <link rel="alternate" type="application/atom+xml" href="feed.atom" title="Atom">
    <link rel="stylesheet" href="/style.css" media="screen">
</head><body>
    <a rel="me nofollow me" href="https://github.com/jane">GitHub</a>
    <a rel="tag" href="/tags/rust">Rust</a>
    <a href="/no-rel">plain</a>
    <span rel="me" href="/not-a-link">ignored</span>
</body></html>"#;

#[test]
fn rels_and_rel_urls() {
    let result = parse_with_options(HTML, &options(false)).expect("parse failed");
    let value = result.to_value().expect("serialization failed");

    assert_eq!(
        value["rels"],
        json!({
            "me": ["https://github.com/jane"],
            "nofollow": ["https://github.com/jane"],
            "alternate": ["https://example.com/blog/feed.atom"],
            "stylesheet": ["https://example.com/style.css"],
            "tag": ["https://example.com/tags/rust"]
        })
    );
    assert_eq!(
        value["rel-urls"]["https://github.com/jane"],
        json!({"rels": ["me", "nofollow"], "text": "GitHub"})
    );
    assert_eq!(
        value["rel-urls"]["https://example.com/blog/feed.atom"],
        json!({"rels": ["alternate"], "title": "Atom", "type": "application/atom+xml"})
    );
    assert_eq!(
        value["rel-urls"]["https://example.com/style.css"],
        json!({"rels": ["stylesheet"], "media": "screen"})
    );
    assert!(value.get("alternates").is_none());
}

#[test]
fn alternates_split_out_when_enabled() {
    let result = parse_with_options(HTML, &options(true)).expect("parse failed");

    assert!(!result.rels.contains_key("alternate"));
    assert!(!result.rel_urls.contains_key("https://example.com/blog/feed.atom"));
    assert_eq!(
        result.alternates,
        vec![Alternate {
            url: "https://example.com/blog/feed.atom".to_string(),
            title: Some("Atom".to_string()),
            media_type: Some("application/atom+xml".to_string()),
            ..Alternate::default()
        }]
    );
}

#[test]
fn alternate_keeps_remaining_rels() {
    let html = r#"<link rel="alternate home" href="/" hreflang="de">"#;
    let result = parse_with_options(html, &options(true)).expect("parse failed");
    let value = result.to_value().expect("serialization failed");

    assert_eq!(
        value["alternates"],
        json!([{"url": "https://example.com/", "rel": "home", "hreflang": "de"}])
    );
}

#[test]
fn rels_use_document_base_element() {
    let html = r#"<head><base href="https://cdn.example.org/"></head><body><a rel="icon" href="i.png">i</a></body>"#;
    let result = parse_with_options(html, &options(false)).expect("parse failed");
    assert_eq!(result.rels["icon"], vec!["https://cdn.example.org/i.png"]);
}
