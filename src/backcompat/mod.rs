//! Classic microformat upgrading.
//!
//! Rewrites classic class names (`vcard`, `fn`, `entry-title`, ...) into
//! their microformats2 equivalents in place, so one extraction pass handles
//! both vocabularies. Every rewrite is recorded in the [`UpgradeTable`];
//! running the upgrader again over the same elements changes nothing.
//!
//! # Module Structure
//!
//! - `rules`: the per-root rule tables and the threaded special cases

pub mod rules;

pub use rules::{LegacyRoot, PropertyRule};

use dom_query::NodeRef;

use crate::dom::{
    add_class_tokens, class_tokens, element_children, get_attribute, has_class_token,
    has_root_class, root_types, tag_name,
};
use crate::error::{Error, Result};
use crate::parser::state::UpgradeTable;
use crate::url_utils::last_path_segment;

/// Classic root classes on an element, in class order.
#[must_use]
pub fn legacy_roots(node: &NodeRef) -> Vec<LegacyRoot> {
    let mut roots: Vec<LegacyRoot> = Vec::new();
    for token in class_tokens(node) {
        if let Some(root) = LegacyRoot::from_root_class(&token) {
            if !roots.contains(&root) {
                roots.push(root);
            }
        }
    }
    roots
}

#[must_use]
pub fn has_legacy_root(node: &NodeRef) -> bool {
    class_tokens(node)
        .iter()
        .any(|token| LegacyRoot::from_root_class(token).is_some())
}

/// Whether the element carries an `h-*` class the upgrader did not add.
#[must_use]
pub fn has_authored_root(node: &NodeRef, upgrades: &UpgradeTable) -> bool {
    root_types(node)
        .iter()
        .any(|class| !upgrades.is_injected(node.id, class))
}

/// Add classes to an element, remembering injected root classes.
fn add_classes(node: &NodeRef, classes: &[&'static str], upgrades: &mut UpgradeTable) {
    let added = add_class_tokens(node, classes);
    for class in classes {
        if class.starts_with("h-") && added.iter().any(|a| a == class) {
            upgrades.mark_injected(node.id, class);
        }
    }
}

/// Descendants a classic root may upgrade.
///
/// Nested roots are included as candidates (their own class may be a
/// property of this root) but their subtrees belong to them.
fn scoped_elements<'a>(root: &NodeRef<'a>) -> Vec<NodeRef<'a>> {
    let mut out = Vec::new();
    let mut stack: Vec<NodeRef<'a>> = element_children(root).into_iter().rev().collect();

    while let Some(node) = stack.pop() {
        out.push(node);
        if has_legacy_root(&node) || has_root_class(&node) {
            continue;
        }
        stack.extend(element_children(&node).into_iter().rev());
    }

    out
}

fn has_rel(node: &NodeRef, rel: &str) -> bool {
    tag_name(node) == "a"
        && get_attribute(node, "href").is_some()
        && get_attribute(node, "rel").is_some_and(|r| r.split_ascii_whitespace().any(|t| t == rel))
}

/// `rel=bookmark` is the entry's permalink.
fn upgrade_rel_bookmark(scoped: &[NodeRef], upgrades: &mut UpgradeTable) {
    if let Some(link) = scoped.iter().find(|n| has_rel(n, "bookmark")) {
        if upgrades.mark_upgraded(link.id, "bookmark") {
            add_classes(link, &["u-url"], upgrades);
        }
    }
}

/// `rel=tag` links are categories named by their last path segment.
fn upgrade_rel_tag(scoped: &[NodeRef], upgrades: &mut UpgradeTable) {
    for link in scoped.iter().filter(|n| has_rel(n, "tag") && !has_class_token(n, "category")) {
        if !upgrades.mark_upgraded(link.id, "tag") {
            continue;
        }
        add_classes(link, &["p-category"], upgrades);
        if let Some(href) = get_attribute(link, "href") {
            upgrades.set_value_override(link.id, last_path_segment(&href));
        }
    }
}

/// Apply one root's rules to the subtree of `root`.
fn upgrade_with(
    root: &NodeRef,
    kind: LegacyRoot,
    upgrades: &mut UpgradeTable,
    depth: usize,
    limit: usize,
) -> Result<()> {
    if depth > limit {
        tracing::warn!(depth, limit, "classic microformat nesting too deep");
        return Err(Error::NestingTooDeep { depth, limit });
    }

    let scoped = scoped_elements(root);

    if matches!(kind, LegacyRoot::Hentry | LegacyRoot::Hreview) {
        upgrade_rel_bookmark(&scoped, upgrades);
        upgrade_rel_tag(&scoped, upgrades);
    }

    for node in &scoped {
        let classes = class_tokens(node);
        for token in &classes {
            let Some(rule) = kind.rule_for(token, &classes) else {
                continue;
            };
            if !upgrades.mark_upgraded(node.id, rule.legacy) {
                continue;
            }

            let authored = has_authored_root(node, upgrades);
            let replacement: Vec<&'static str> = rule
                .replacement
                .iter()
                .copied()
                .filter(|class| !(authored && class.starts_with("h-")))
                .collect();
            add_classes(node, &replacement, upgrades);
            tracing::trace!(
                root = kind.class_name(),
                legacy = rule.legacy,
                replacement = ?replacement,
                "upgraded classic property"
            );

            if let Some(context) = rule.context {
                if !authored {
                    upgrade_with(node, context, upgrades, depth + 1, limit)?;
                }
            }
        }
    }

    Ok(())
}

/// Upgrade an element carrying classic root classes.
///
/// Unless the author already gave the element an `h-*` class, the matching
/// root types are injected. Then each root's rules rewrite the subtree.
///
/// # Errors
///
/// `Error::NestingTooDeep` when context recursion goes deeper than `limit`.
pub fn upgrade_root(node: &NodeRef, upgrades: &mut UpgradeTable, limit: usize) -> Result<()> {
    let authored = has_authored_root(node, upgrades);

    for kind in legacy_roots(node) {
        if !authored {
            add_classes(node, &[kind.mf2_type()], upgrades);
        }
        tracing::debug!(legacy = kind.class_name(), mf2 = kind.mf2_type(), "upgrading classic root");
        upgrade_with(node, kind, upgrades, 0, limit)?;
    }

    Ok(())
}
