//! Parse state tracking.
//!
//! Per-element side tables keyed by `NodeId`: which class prefixes an element
//! has already been consumed under, and what the legacy upgrader has done to it.
//! Both live for one parse and are threaded through every recursive call.

use std::collections::{HashMap, HashSet};

use dom_query::NodeId;

/// The five microformats2 class prefixes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Prefix {
    H,
    P,
    U,
    Dt,
    E,
}

impl Prefix {
    /// Property prefixes in extraction order.
    pub const PROPERTIES: [Prefix; 4] = [Prefix::P, Prefix::U, Prefix::Dt, Prefix::E];

    /// Every prefix, roots included.
    pub const ALL: [Prefix; 5] = [Prefix::H, Prefix::P, Prefix::U, Prefix::Dt, Prefix::E];

    /// The class-name prefix, dash included.
    #[must_use]
    pub const fn class_prefix(self) -> &'static str {
        match self {
            Prefix::H => "h-",
            Prefix::P => "p-",
            Prefix::U => "u-",
            Prefix::Dt => "dt-",
            Prefix::E => "e-",
        }
    }

    const fn bit(self) -> u8 {
        match self {
            Prefix::H => 1,
            Prefix::P => 1 << 1,
            Prefix::U => 1 << 2,
            Prefix::Dt => 1 << 3,
            Prefix::E => 1 << 4,
        }
    }
}

/// A small set of prefixes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PrefixSet(u8);

impl PrefixSet {
    pub fn insert(&mut self, prefix: Prefix) {
        self.0 |= prefix.bit();
    }

    #[must_use]
    pub const fn contains(self, prefix: Prefix) -> bool {
        self.0 & prefix.bit() != 0
    }

    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }
}

/// Which prefixes each element has been consumed under.
///
/// Marks are never removed: once an element is consumed for a prefix no
/// later scan may extract it under that prefix again.
#[derive(Debug, Default)]
pub struct ConsumptionTable {
    consumed: HashMap<NodeId, PrefixSet>,
}

impl ConsumptionTable {
    /// Mark an element consumed for one prefix.
    pub fn mark(&mut self, node_id: NodeId, prefix: Prefix) {
        self.consumed.entry(node_id).or_default().insert(prefix);
    }

    /// Mark an element consumed for every prefix (a fully handled root).
    pub fn mark_all(&mut self, node_id: NodeId) {
        let set = self.consumed.entry(node_id).or_default();
        for prefix in Prefix::ALL {
            set.insert(prefix);
        }
    }

    #[must_use]
    pub fn is_consumed(&self, node_id: NodeId, prefix: Prefix) -> bool {
        self.consumed
            .get(&node_id)
            .is_some_and(|set| set.contains(prefix))
    }
}

/// What the legacy upgrader has done to each element.
#[derive(Debug, Default)]
pub struct UpgradeTable {
    /// Legacy property names already rewritten on an element.
    upgraded: HashMap<NodeId, HashSet<&'static str>>,

    /// Root classes the upgrader injected (as opposed to authored ones).
    injected: HashMap<NodeId, HashSet<&'static str>>,

    /// Fixed plain values for upgraded elements (`rel=tag` categories).
    value_overrides: HashMap<NodeId, String>,
}

impl UpgradeTable {
    /// Record that `legacy` was rewritten on an element.
    ///
    /// Returns `false` when it already was, so callers skip the rewrite.
    pub fn mark_upgraded(&mut self, node_id: NodeId, legacy: &'static str) -> bool {
        self.upgraded.entry(node_id).or_default().insert(legacy)
    }

    /// Whether any legacy property was rewritten on the element.
    #[must_use]
    pub fn is_upgraded(&self, node_id: NodeId) -> bool {
        self.upgraded.get(&node_id).is_some_and(|names| !names.is_empty())
    }

    pub fn mark_injected(&mut self, node_id: NodeId, root_class: &'static str) {
        self.injected.entry(node_id).or_default().insert(root_class);
    }

    #[must_use]
    pub fn is_injected(&self, node_id: NodeId, root_class: &str) -> bool {
        self.injected
            .get(&node_id)
            .is_some_and(|classes| classes.contains(root_class))
    }

    pub fn set_value_override(&mut self, node_id: NodeId, value: String) {
        self.value_overrides.insert(node_id, value);
    }

    #[must_use]
    pub fn value_override(&self, node_id: NodeId) -> Option<&str> {
        self.value_overrides.get(&node_id).map(String::as_str)
    }
}

/// All mutable state of one parse.
#[derive(Debug, Default)]
pub struct ParseState {
    pub consumed: ConsumptionTable,
    pub upgrades: UpgradeTable,
}
