//! Classic microformat rule tables.
//!
//! Each legacy root maps its property class names to the microformats2
//! classes that replace them. A rule with a `context` also upgrades the
//! matched element's subtree with that root's table.

/// A classic microformat whose class names can be upgraded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LegacyRoot {
    Vcard,
    Hfeed,
    Hentry,
    Hrecipe,
    Hresume,
    Vevent,
    Hreview,
    HreviewAggregate,
    Hproduct,
    Adr,
    Geo,
    /// Context-only table for the reviewed item of an `hreview`.
    Item,
}

/// One property rewrite.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PropertyRule {
    /// Legacy class name.
    pub legacy: &'static str,
    /// Classes added in its place.
    pub replacement: &'static [&'static str],
    /// Table used for the element's own subtree.
    pub context: Option<LegacyRoot>,
}

const fn rule(legacy: &'static str, replacement: &'static [&'static str]) -> PropertyRule {
    PropertyRule { legacy, replacement, context: None }
}

const fn nested(
    legacy: &'static str,
    replacement: &'static [&'static str],
    context: LegacyRoot,
) -> PropertyRule {
    PropertyRule { legacy, replacement, context: Some(context) }
}

const VCARD: &[PropertyRule] = &[
    rule("fn", &["p-name"]),
    rule("honorific-prefix", &["p-honorific-prefix"]),
    rule("given-name", &["p-given-name"]),
    rule("additional-name", &["p-additional-name"]),
    rule("family-name", &["p-family-name"]),
    rule("honorific-suffix", &["p-honorific-suffix"]),
    rule("nickname", &["p-nickname"]),
    rule("email", &["u-email"]),
    rule("logo", &["u-logo"]),
    rule("photo", &["u-photo"]),
    rule("url", &["u-url"]),
    rule("uid", &["u-uid"]),
    rule("category", &["p-category"]),
    nested("adr", &["p-adr", "h-adr"], LegacyRoot::Adr),
    rule("extended-address", &["p-extended-address"]),
    rule("street-address", &["p-street-address"]),
    rule("locality", &["p-locality"]),
    rule("region", &["p-region"]),
    rule("postal-code", &["p-postal-code"]),
    rule("country-name", &["p-country-name"]),
    rule("label", &["p-label"]),
    nested("geo", &["p-geo", "h-geo"], LegacyRoot::Geo),
    rule("latitude", &["p-latitude"]),
    rule("longitude", &["p-longitude"]),
    rule("tel", &["p-tel"]),
    rule("note", &["p-note"]),
    rule("bday", &["dt-bday"]),
    rule("key", &["u-key"]),
    rule("org", &["p-org"]),
    rule("organization-name", &["p-organization-name"]),
    rule("organization-unit", &["p-organization-unit"]),
    rule("title", &["p-job-title"]),
    rule("role", &["p-role"]),
    rule("tz", &["p-tz"]),
    rule("rev", &["dt-rev"]),
];

const HENTRY: &[PropertyRule] = &[
    rule("entry-title", &["p-name"]),
    rule("entry-summary", &["p-summary"]),
    rule("entry-content", &["e-content"]),
    rule("published", &["dt-published"]),
    rule("updated", &["dt-updated"]),
    nested("author", &["p-author", "h-card"], LegacyRoot::Vcard),
    rule("category", &["p-category"]),
];

const HRECIPE: &[PropertyRule] = &[
    rule("fn", &["p-name"]),
    rule("ingredient", &["p-ingredient"]),
    rule("yield", &["p-yield"]),
    rule("instructions", &["e-instructions"]),
    rule("duration", &["dt-duration"]),
    rule("photo", &["u-photo"]),
    rule("summary", &["p-summary"]),
    nested("author", &["p-author", "h-card"], LegacyRoot::Vcard),
    rule("nutrition", &["p-nutrition"]),
    rule("category", &["p-category"]),
];

const HRESUME: &[PropertyRule] = &[
    rule("summary", &["p-summary"]),
    nested("contact", &["p-contact", "h-card"], LegacyRoot::Vcard),
    nested("education", &["p-education", "h-event"], LegacyRoot::Vevent),
    nested("experience", &["p-experience", "h-event"], LegacyRoot::Vevent),
    rule("skill", &["p-skill"]),
    nested("affiliation", &["p-affiliation", "h-card"], LegacyRoot::Vcard),
];

const VEVENT: &[PropertyRule] = &[
    rule("summary", &["p-name"]),
    rule("dtstart", &["dt-start"]),
    rule("dtend", &["dt-end"]),
    rule("duration", &["dt-duration"]),
    rule("description", &["p-description"]),
    rule("url", &["u-url"]),
    rule("category", &["p-category"]),
    rule("location", &["p-location"]),
    nested("geo", &["p-location", "h-geo"], LegacyRoot::Geo),
    nested("attendee", &["p-attendee", "h-card"], LegacyRoot::Vcard),
    nested("contact", &["p-contact", "h-card"], LegacyRoot::Vcard),
    nested("organizer", &["p-organizer", "h-card"], LegacyRoot::Vcard),
];

const HREVIEW: &[PropertyRule] = &[
    rule("summary", &["p-name"]),
    nested("item", &["p-item", "h-item"], LegacyRoot::Item),
    nested("reviewer", &["p-author", "h-card"], LegacyRoot::Vcard),
    rule("dtreviewed", &["dt-published"]),
    rule("rating", &["p-rating"]),
    rule("best", &["p-best"]),
    rule("worst", &["p-worst"]),
    rule("description", &["e-content"]),
    rule("category", &["p-category"]),
];

const HREVIEW_AGGREGATE: &[PropertyRule] = &[
    rule("summary", &["p-name"]),
    nested("item", &["p-item", "h-item"], LegacyRoot::Item),
    rule("rating", &["p-rating"]),
    rule("best", &["p-best"]),
    rule("worst", &["p-worst"]),
    rule("average", &["p-average"]),
    rule("count", &["p-count"]),
    rule("votes", &["p-votes"]),
    rule("category", &["p-category"]),
];

const HPRODUCT: &[PropertyRule] = &[
    rule("fn", &["p-name"]),
    rule("photo", &["u-photo"]),
    rule("brand", &["p-brand"]),
    rule("category", &["p-category"]),
    rule("description", &["p-description"]),
    rule("identifier", &["u-identifier"]),
    rule("url", &["u-url"]),
    nested("review", &["p-review", "h-review"], LegacyRoot::Hreview),
    rule("price", &["p-price"]),
];

const ITEM: &[PropertyRule] = &[
    rule("fn", &["p-name"]),
    rule("url", &["u-url"]),
    rule("photo", &["u-photo"]),
];

const ADR: &[PropertyRule] = &[
    rule("post-office-box", &["p-post-office-box"]),
    rule("extended-address", &["p-extended-address"]),
    rule("street-address", &["p-street-address"]),
    rule("locality", &["p-locality"]),
    rule("region", &["p-region"]),
    rule("postal-code", &["p-postal-code"]),
    rule("country-name", &["p-country-name"]),
];

const GEO: &[PropertyRule] = &[
    rule("latitude", &["p-latitude"]),
    rule("longitude", &["p-longitude"]),
];

/// `hreview` items that are themselves classic microformats.
const REVIEW_ITEMS: &[(&str, PropertyRule)] = &[
    ("vcard", nested("item", &["p-item", "h-card"], LegacyRoot::Vcard)),
    ("vevent", nested("item", &["p-item", "h-event"], LegacyRoot::Vevent)),
    ("hproduct", nested("item", &["p-item", "h-product"], LegacyRoot::Hproduct)),
];

/// `vevent` locations that are themselves classic microformats.
const EVENT_LOCATIONS: &[(&str, PropertyRule)] = &[
    ("vcard", nested("location", &["p-location", "h-card"], LegacyRoot::Vcard)),
    ("adr", nested("location", &["p-location", "h-adr"], LegacyRoot::Adr)),
    ("geo", nested("location", &["p-location", "h-geo"], LegacyRoot::Geo)),
];

impl LegacyRoot {
    /// Roots that may start an item; `Item` is reachable only as a context.
    pub const ROOTS: [LegacyRoot; 11] = [
        LegacyRoot::Vcard,
        LegacyRoot::Hfeed,
        LegacyRoot::Hentry,
        LegacyRoot::Hrecipe,
        LegacyRoot::Hresume,
        LegacyRoot::Vevent,
        LegacyRoot::Hreview,
        LegacyRoot::HreviewAggregate,
        LegacyRoot::Hproduct,
        LegacyRoot::Adr,
        LegacyRoot::Geo,
    ];

    /// The root for a class token, excluding the context-only `item`.
    #[must_use]
    pub fn from_root_class(class: &str) -> Option<Self> {
        Self::ROOTS.into_iter().find(|root| root.class_name() == class)
    }

    #[must_use]
    pub const fn class_name(self) -> &'static str {
        match self {
            LegacyRoot::Vcard => "vcard",
            LegacyRoot::Hfeed => "hfeed",
            LegacyRoot::Hentry => "hentry",
            LegacyRoot::Hrecipe => "hrecipe",
            LegacyRoot::Hresume => "hresume",
            LegacyRoot::Vevent => "vevent",
            LegacyRoot::Hreview => "hreview",
            LegacyRoot::HreviewAggregate => "hreview-aggregate",
            LegacyRoot::Hproduct => "hproduct",
            LegacyRoot::Adr => "adr",
            LegacyRoot::Geo => "geo",
            LegacyRoot::Item => "item",
        }
    }

    /// The microformats2 root type that replaces this root.
    #[must_use]
    pub const fn mf2_type(self) -> &'static str {
        match self {
            LegacyRoot::Vcard => "h-card",
            LegacyRoot::Hfeed => "h-feed",
            LegacyRoot::Hentry => "h-entry",
            LegacyRoot::Hrecipe => "h-recipe",
            LegacyRoot::Hresume => "h-resume",
            LegacyRoot::Vevent => "h-event",
            LegacyRoot::Hreview => "h-review",
            LegacyRoot::HreviewAggregate => "h-review-aggregate",
            LegacyRoot::Hproduct => "h-product",
            LegacyRoot::Adr => "h-adr",
            LegacyRoot::Geo => "h-geo",
            LegacyRoot::Item => "h-item",
        }
    }

    /// Property rules of this root.
    #[must_use]
    pub const fn properties(self) -> &'static [PropertyRule] {
        match self {
            LegacyRoot::Vcard => VCARD,
            LegacyRoot::Hfeed => &[],
            LegacyRoot::Hentry => HENTRY,
            LegacyRoot::Hrecipe => HRECIPE,
            LegacyRoot::Hresume => HRESUME,
            LegacyRoot::Vevent => VEVENT,
            LegacyRoot::Hreview => HREVIEW,
            LegacyRoot::HreviewAggregate => HREVIEW_AGGREGATE,
            LegacyRoot::Hproduct => HPRODUCT,
            LegacyRoot::Adr => ADR,
            LegacyRoot::Geo => GEO,
            LegacyRoot::Item => ITEM,
        }
    }

    /// The rule for one class token on an element.
    ///
    /// `classes` are all tokens of the element: an `hreview` item or a
    /// `vevent` location that is itself a classic root is threaded through
    /// that root's table instead of the generic one.
    #[must_use]
    pub fn rule_for(self, token: &str, classes: &[String]) -> Option<&'static PropertyRule> {
        let threaded = match (self, token) {
            (LegacyRoot::Hreview, "item") => REVIEW_ITEMS,
            (LegacyRoot::Vevent, "location") => EVENT_LOCATIONS,
            _ => &[],
        };
        threaded
            .iter()
            .find(|(root_class, _)| classes.iter().any(|c| c == root_class))
            .map(|(_, rule)| rule)
            .or_else(|| self.properties().iter().find(|rule| rule.legacy == token))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::patterns::MF2_CLASS;

    fn all_tables() -> Vec<(LegacyRoot, &'static [PropertyRule])> {
        LegacyRoot::ROOTS
            .iter()
            .chain(std::iter::once(&LegacyRoot::Item))
            .map(|root| (*root, root.properties()))
            .collect()
    }

    #[test]
    fn test_every_replacement_is_a_valid_mf2_class() {
        let threaded = REVIEW_ITEMS.iter().chain(EVENT_LOCATIONS).map(|(_, rule)| rule);
        let rules = all_tables().into_iter().flat_map(|(_, rules)| rules.iter()).chain(threaded);
        for rule in rules {
            assert!(!rule.replacement.is_empty(), "{} has no replacement", rule.legacy);
            for class in rule.replacement {
                assert!(MF2_CLASS.is_match(class), "{class} is not a valid mf2 class");
            }
        }
        for root in LegacyRoot::ROOTS {
            assert!(MF2_CLASS.is_match(root.mf2_type()));
        }
    }

    #[test]
    fn test_rules_with_roots_have_context() {
        for (root, rules) in all_tables() {
            for rule in rules {
                let adds_root = rule.replacement.iter().any(|c| c.starts_with("h-"));
                assert_eq!(adds_root, rule.context.is_some(), "{}: {}", root.class_name(), rule.legacy);
            }
        }
    }

    #[test]
    fn test_legacy_names_are_unique_per_table() {
        for (root, rules) in all_tables() {
            let mut names: Vec<&str> = rules.iter().map(|r| r.legacy).collect();
            names.sort_unstable();
            let before = names.len();
            names.dedup();
            assert_eq!(before, names.len(), "duplicate rule in {}", root.class_name());
        }
    }

    #[test]
    fn test_from_root_class() {
        assert_eq!(LegacyRoot::from_root_class("vcard"), Some(LegacyRoot::Vcard));
        assert_eq!(LegacyRoot::from_root_class("hreview-aggregate"), Some(LegacyRoot::HreviewAggregate));
        assert_eq!(LegacyRoot::from_root_class("item"), None);
        assert_eq!(LegacyRoot::from_root_class("h-card"), None);
    }

    #[test]
    fn test_threaded_rules() {
        let classes = vec!["item".to_string(), "vcard".to_string()];
        let rule = LegacyRoot::Hreview.rule_for("item", &classes);
        assert_eq!(rule.map(|r| r.replacement), Some(&["p-item", "h-card"][..]));

        let plain = LegacyRoot::Hreview.rule_for("item", &["item".to_string()]);
        assert_eq!(plain.map(|r| r.context), Some(Some(LegacyRoot::Item)));

        let location = LegacyRoot::Vevent.rule_for("location", &["location".to_string(), "adr".to_string()]);
        assert_eq!(location.and_then(|r| r.context), Some(LegacyRoot::Adr));

        assert!(LegacyRoot::Hfeed.rule_for("fn", &[]).is_none());
    }
}
