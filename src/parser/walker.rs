//! Root discovery and item assembly.
//!
//! Finds microformat roots below a scope element, recurses into nested roots
//! before extracting a root's own properties, and decides whether each
//! nested item is a property value or a plain child.

use std::collections::HashMap;

use dom_query::{Document, NodeId, NodeRef};

use crate::backcompat::{self, has_authored_root, has_legacy_root};
use crate::dom::{element_children, element_descendants, has_root_class, lang_of, property_names, root_types};
use crate::error::{Error, Result};
use crate::result::{Item, ParseResult, Properties, PropertyValue};
use crate::url_utils::UrlResolver;
use crate::Options;

use super::datetime::{dt_value, DateAccumulator};
use super::implied::{implied_name, implied_photo, implied_url};
use super::properties::{e_value, extract_properties, p_value, u_value};
use super::rels::parse_rels;
use super::state::{Prefix, PrefixSet};
use super::ParseContext;

/// Parse the microformats below `context` in `doc`.
///
/// Only descendants of `context` are searched; pass `doc.root()` for the
/// whole document. The rel index always covers the whole document.
///
/// # Errors
///
/// `Error::DocumentTooLarge` when the document exceeds `max_elements`,
/// `Error::NestingTooDeep` when roots nest deeper than `max_nesting_depth`.
pub fn parse_context(doc: &Document, context: &NodeRef, options: &Options) -> Result<ParseResult> {
    let document_root = doc.root();
    let elements = element_descendants(&document_root).len();
    if let Some(limit) = options.max_elements {
        if elements > limit {
            tracing::warn!(elements, limit, "document exceeds element limit");
            return Err(Error::DocumentTooLarge { elements, limit });
        }
    }

    let urls = document_base(doc, options);
    tracing::debug!(elements, base_url = urls.base().unwrap_or_default(), "parsing document");

    let mut ctx = ParseContext::new(options, urls, document_lang(doc));
    let inside_mf2 = context.ancestors(None).iter().any(|a| has_root_class(a));
    let items = parse_roots(&mut ctx, context, 1, inside_mf2)?
        .into_iter()
        .map(|(_, item)| item)
        .collect();

    let rels = parse_rels(&document_root, &ctx.urls, options.enable_alternates);

    Ok(ParseResult {
        items,
        rels: rels.rels,
        rel_urls: rels.rel_urls,
        alternates: rels.alternates,
    })
}

/// Effective base URL: `<base href>` resolved against the configured URL.
fn document_base(doc: &Document, options: &Options) -> UrlResolver {
    let configured = UrlResolver::new(options.base_url.as_deref());
    match doc.select("base[href]").attr("href") {
        Some(href) if !href.trim().is_empty() => UrlResolver::new(Some(&configured.resolve(&href))),
        _ => configured,
    }
}

/// Language declared for the whole document.
fn document_lang(doc: &Document) -> Option<String> {
    let html_lang = doc
        .select("html")
        .attr("lang")
        .map(|l| l.trim().to_string())
        .filter(|l| !l.is_empty());
    if html_lang.is_some() {
        return html_lang;
    }

    doc.select("meta[http-equiv][content]")
        .nodes()
        .iter()
        .find(|meta| {
            meta.attr("http-equiv")
                .is_some_and(|v| v.trim().eq_ignore_ascii_case("content-language"))
        })
        .and_then(|meta| meta.attr("content"))
        .map(|l| l.trim().to_string())
        .filter(|l| !l.is_empty())
}

/// Roots directly below `scope`; the search does not enter a root.
fn find_roots<'a>(ctx: &ParseContext, scope: &NodeRef<'a>, inside_mf2: bool) -> Vec<NodeRef<'a>> {
    let legacy_allowed = ctx.options.upgrade_classic && !inside_mf2;
    let mut roots = Vec::new();
    let mut stack: Vec<NodeRef<'a>> = element_children(scope).into_iter().rev().collect();

    while let Some(node) = stack.pop() {
        if ctx.state.consumed.is_consumed(node.id, Prefix::H) {
            continue;
        }
        if has_root_class(&node) || (legacy_allowed && has_legacy_root(&node)) {
            roots.push(node);
            continue;
        }
        stack.extend(element_children(&node).into_iter().rev());
    }

    roots
}

/// Parse every root below `scope`, in document order.
fn parse_roots<'a>(
    ctx: &mut ParseContext,
    scope: &NodeRef<'a>,
    depth: usize,
    inside_mf2: bool,
) -> Result<Vec<(NodeRef<'a>, Item)>> {
    let roots = find_roots(ctx, scope, inside_mf2);
    if roots.is_empty() {
        return Ok(Vec::new());
    }

    let limit = ctx.options.max_nesting_depth;
    if depth > limit {
        tracing::warn!(depth, limit, "microformat nesting too deep");
        return Err(Error::NestingTooDeep { depth, limit });
    }

    let mut items = Vec::with_capacity(roots.len());
    for root in roots {
        let item = parse_root(ctx, &root, depth, inside_mf2)?;
        items.push((root, item));
    }
    Ok(items)
}

fn parse_root(ctx: &mut ParseContext, root: &NodeRef, depth: usize, inside_mf2: bool) -> Result<Item> {
    let backcompat = !has_authored_root(root, &ctx.state.upgrades);
    if backcompat {
        backcompat::upgrade_root(root, &mut ctx.state.upgrades, ctx.options.max_nesting_depth)?;
    }

    let types = root_types(root);
    tracing::debug!(types = ?types, backcompat, depth, "parsing root");

    let nested = parse_roots(ctx, root, depth + 1, inside_mf2 || !backcompat)?;
    let item = build_item(ctx, root, types, nested, backcompat);
    ctx.state.consumed.mark_all(root.id);

    Ok(item)
}

/// Elements belonging to a root: nested roots are included, their subtrees are not.
fn item_elements<'a>(ctx: &ParseContext, root: &NodeRef<'a>) -> Vec<NodeRef<'a>> {
    let mut out = Vec::new();
    let mut stack: Vec<NodeRef<'a>> = element_children(root).into_iter().rev().collect();

    while let Some(node) = stack.pop() {
        out.push(node);
        if ctx.state.consumed.is_consumed(node.id, Prefix::H) {
            continue;
        }
        stack.extend(element_children(&node).into_iter().rev());
    }

    out
}

/// Property names a nested root contributes to its parent.
fn nested_property_names(ctx: &ParseContext, node: &NodeRef, backcompat: bool) -> Vec<(Prefix, String)> {
    if backcompat && !ctx.state.upgrades.is_upgraded(node.id) {
        return Vec::new();
    }
    Prefix::PROPERTIES
        .into_iter()
        .flat_map(|prefix| {
            property_names(node, prefix.class_prefix())
                .into_iter()
                .map(move |name| (prefix, name))
        })
        .collect()
}

/// `value` (and `html`) of a property-nested item, by prefix precedence.
fn nested_value(ctx: &ParseContext, node: &NodeRef, item: &Item, prefixes: PrefixSet) -> (Option<String>, Option<String>) {
    if prefixes.contains(Prefix::P) {
        let value = item
            .first_str("name")
            .filter(|name| !name.is_empty())
            .map_or_else(|| p_value(ctx, node), str::to_string);
        return (Some(value), None);
    }

    if prefixes.contains(Prefix::E) {
        return match e_value(ctx, node) {
            PropertyValue::Embedded { html, value, .. } => (Some(value), Some(html)),
            other => (other.as_str().map(str::to_string), None),
        };
    }

    if prefixes.contains(Prefix::U) {
        let value = item
            .first_str("url")
            .map(str::to_string)
            .or_else(|| u_value(ctx, node).as_str().map(str::to_string));
        return (value, None);
    }

    if prefixes.contains(Prefix::Dt) {
        let value = dt_value(node, &ctx.urls, &mut DateAccumulator::default()).unwrap_or_default();
        return (Some(value), None);
    }

    (None, None)
}

fn build_item(
    ctx: &mut ParseContext,
    root: &NodeRef,
    types: Vec<String>,
    nested: Vec<(NodeRef, Item)>,
    backcompat: bool,
) -> Item {
    let elements = item_elements(ctx, root);
    let positions: HashMap<NodeId, usize> = elements
        .iter()
        .enumerate()
        .map(|(position, node)| (node.id, position))
        .collect();

    let extracted = extract_properties(ctx, &elements, backcompat);
    let mut values = extracted.values;
    let mut found = extracted.found;
    let has_nested = !nested.is_empty();
    let mut children = Vec::new();

    for (node, mut item) in nested {
        let names = nested_property_names(ctx, &node, backcompat);
        if names.is_empty() {
            children.push(item);
            continue;
        }

        let mut prefixes = PrefixSet::default();
        for (prefix, _) in &names {
            prefixes.insert(*prefix);
            found.insert(*prefix);
        }
        let (value, html) = nested_value(ctx, &node, &item, prefixes);
        item.value = value;
        item.html = html;

        let position = positions.get(&node.id).copied().unwrap_or(usize::MAX);
        for (_, name) in names {
            values.push((position, name, PropertyValue::Item(Box::new(item.clone()))));
        }
    }

    values.sort_by_key(|(position, _, _)| *position);
    let mut properties = Properties::new();
    for (_, name, value) in values {
        properties.entry(name).or_default().push(value);
    }

    if !has_nested && !backcompat {
        apply_implied(ctx, root, &mut properties, found);
    }

    let lang = if ctx.options.include_lang {
        lang_of(root).or_else(|| ctx.document_lang.clone())
    } else {
        None
    };

    Item {
        types,
        properties,
        children,
        value: None,
        html: None,
        lang,
    }
}

fn apply_implied(ctx: &ParseContext, root: &NodeRef, properties: &mut Properties, found: PrefixSet) {
    if !properties.contains_key("name") && !found.contains(Prefix::P) && !found.contains(Prefix::E) {
        if let Some(name) = implied_name(root, &ctx.urls) {
            properties.insert("name".to_string(), vec![name]);
        }
    }
    if !properties.contains_key("photo") && !found.contains(Prefix::U) {
        if let Some(photo) = implied_photo(root, &ctx.urls) {
            properties.insert("photo".to_string(), vec![photo]);
        }
    }
    if !properties.contains_key("url") && !found.contains(Prefix::U) {
        if let Some(url) = implied_url(root, &ctx.urls) {
            properties.insert("url".to_string(), vec![url]);
        }
    }
}
