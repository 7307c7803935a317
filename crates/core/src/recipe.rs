//! Smelting recipe catalog: recipes, ore classes, and the fuel table.
//!
//! The catalog is built once (by hand or from the assets crate) and is
//! read-only from the simulation's perspective. Recipe matching is
//! fuzzy: two distinct item ids that share an ore class are
//! interchangeable as recipe inputs.

use crate::item::{ItemId, ItemStack};
use std::collections::HashMap;

/// Ore-class identifier. Items sharing a class match the same recipes.
pub type OreClass = u16;

/// A smelting recipe: fuzzy-matched input key -> output stack.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SmeltRecipe {
    /// Canonical input item this recipe is keyed on.
    pub key: ItemId,
    /// Stack produced per smelted input unit.
    pub output: ItemStack,
}

/// Fuel table entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FuelEntry {
    /// Ticks this fuel keeps a furnace lit.
    pub burn_ticks: u32,
    /// Item left behind when the last unit burns (e.g. an emptied bucket).
    pub remainder: Option<ItemId>,
}

/// Side rule applied on smelt completion: a sponge-class input fills an
/// empty container sitting in the fuel slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpongeRule {
    /// The designated sponge-like input item.
    pub sponge: ItemId,
    /// Empty container in the fuel slot that gets filled.
    pub empty: ItemId,
    /// Filled container replacing it.
    pub filled: ItemId,
}

/// Read-only catalog the furnace consults every tick.
#[derive(Debug, Clone, Default)]
pub struct RecipeTable {
    recipes: Vec<SmeltRecipe>,
    fuels: HashMap<ItemId, FuelEntry>,
    classes: HashMap<ItemId, OreClass>,
    sponge_rule: Option<SpongeRule>,
}

impl RecipeTable {
    /// Create an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a smelting recipe.
    pub fn add_recipe(&mut self, key: ItemId, output: ItemStack) {
        self.recipes.push(SmeltRecipe { key, output });
    }

    /// Register a fuel item.
    pub fn add_fuel(&mut self, item: ItemId, burn_ticks: u32, remainder: Option<ItemId>) {
        self.fuels.insert(
            item,
            FuelEntry {
                burn_ticks,
                remainder,
            },
        );
    }

    /// Assign an item to an ore class.
    pub fn add_class(&mut self, item: ItemId, class: OreClass) {
        self.classes.insert(item, class);
    }

    /// Install the sponge side rule.
    pub fn set_sponge_rule(&mut self, rule: SpongeRule) {
        self.sponge_rule = Some(rule);
    }

    /// Fuzzy equivalence test: identical id, or both ids in the same ore class.
    pub fn matches(&self, key: ItemId, input: ItemId) -> bool {
        if key == input {
            return true;
        }
        match (self.classes.get(&key), self.classes.get(&input)) {
            (Some(a), Some(b)) => a == b,
            _ => false,
        }
    }

    /// Find the recipe whose key fuzzy-matches `input`, if any.
    pub fn find_recipe(&self, input: ItemId) -> Option<&SmeltRecipe> {
        self.recipes.iter().find(|r| self.matches(r.key, input))
    }

    /// Get the burn time for a fuel item (0 if not valid fuel).
    pub fn fuel_burn_ticks(&self, item: ItemId) -> u32 {
        self.fuels.get(&item).map(|f| f.burn_ticks).unwrap_or(0)
    }

    /// Get the container remainder left when the last unit of `item` burns.
    pub fn fuel_remainder(&self, item: ItemId) -> Option<ItemId> {
        self.fuels.get(&item).and_then(|f| f.remainder)
    }

    /// Check if an item is valid fuel.
    pub fn is_fuel(&self, item: ItemId) -> bool {
        self.fuel_burn_ticks(item) > 0
    }

    /// The installed sponge side rule, if any.
    pub fn sponge_rule(&self) -> Option<&SpongeRule> {
        self.sponge_rule.as_ref()
    }

    /// Number of registered recipes.
    pub fn len(&self) -> usize {
        self.recipes.len()
    }

    /// Check if the catalog has no recipes.
    pub fn is_empty(&self) -> bool {
        self.recipes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const IRON_ORE: ItemId = ItemId(1);
    const DEEP_IRON_ORE: ItemId = ItemId(2);
    const IRON_INGOT: ItemId = ItemId(3);
    const COAL: ItemId = ItemId(4);
    const LAVA_BUCKET: ItemId = ItemId(5);
    const BUCKET: ItemId = ItemId(6);

    fn table() -> RecipeTable {
        let mut table = RecipeTable::new();
        table.add_recipe(IRON_ORE, ItemStack::new(IRON_INGOT, 1));
        table.add_class(IRON_ORE, 1);
        table.add_class(DEEP_IRON_ORE, 1);
        table.add_fuel(COAL, 1600, None);
        table.add_fuel(LAVA_BUCKET, 20_000, Some(BUCKET));
        table
    }

    #[test]
    fn exact_match_finds_recipe() {
        let table = table();
        let recipe = table.find_recipe(IRON_ORE).unwrap();
        assert_eq!(recipe.output, ItemStack::new(IRON_INGOT, 1));
    }

    #[test]
    fn class_match_finds_recipe() {
        let table = table();
        // Deep iron ore shares a class with iron ore, so the same recipe applies.
        let recipe = table.find_recipe(DEEP_IRON_ORE).unwrap();
        assert_eq!(recipe.key, IRON_ORE);
        assert!(table.matches(IRON_ORE, DEEP_IRON_ORE));
    }

    #[test]
    fn unrelated_items_dont_match() {
        let table = table();
        assert!(!table.matches(IRON_ORE, COAL));
        assert!(table.find_recipe(COAL).is_none());
    }

    #[test]
    fn fuel_table_lookup() {
        let table = table();
        assert_eq!(table.fuel_burn_ticks(COAL), 1600);
        assert_eq!(table.fuel_burn_ticks(IRON_ORE), 0);
        assert!(table.is_fuel(COAL));
        assert!(!table.is_fuel(IRON_INGOT));
        assert_eq!(table.fuel_remainder(LAVA_BUCKET), Some(BUCKET));
        assert_eq!(table.fuel_remainder(COAL), None);
    }
}
