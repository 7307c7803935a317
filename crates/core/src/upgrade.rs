//! Furnace upgrades: kinds, item bindings, and the match predicate.

use crate::item::{ItemId, ItemStack};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Behaviors an upgrade item can grant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UpgradeKind {
    /// Doubles the effective burn time of item fuels.
    Efficiency,
    /// Switches the fuel source from items to stored energy.
    ElectricFuel,
}

/// Maps item ids to the upgrade kind they grant.
#[derive(Debug, Clone, Default)]
pub struct UpgradeRegistry {
    bindings: HashMap<ItemId, UpgradeKind>,
}

impl UpgradeRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind an item to an upgrade kind.
    pub fn bind(&mut self, item: ItemId, kind: UpgradeKind) {
        self.bindings.insert(item, kind);
    }

    /// Look up the upgrade kind an item grants, if any.
    pub fn kind_of(&self, item: ItemId) -> Option<UpgradeKind> {
        self.bindings.get(&item).copied()
    }

    /// Check whether a slot's contents count as the given upgrade.
    /// Empty slots and unbound items return false.
    pub fn matches(&self, kind: UpgradeKind, slot: Option<&ItemStack>) -> bool {
        slot.is_some_and(|stack| self.kind_of(stack.item) == Some(kind))
    }
}
