use std::{
    collections::{HashMap, HashSet},
    fs,
    path::Path,
};

use serde::{Deserialize, Serialize};
use smeltsim_core::{ItemId, ItemStack, RecipeTable, SpongeRule, UpgradeKind, UpgradeRegistry};
use thiserror::Error;

/// Errors that can occur while loading or validating a catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Wrap IO failures when reading catalog files.
    #[error("failed to read catalog: {0}")]
    Io(#[from] std::io::Error),
    /// Wrap JSON parsing issues.
    #[error("failed to parse catalog: {0}")]
    Parse(#[from] serde_json::Error),
    /// Validation errors describing why the catalog is inconsistent.
    #[error("invalid catalog: {0}")]
    Invalid(String),
}

/// Serialized item definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemDef {
    /// Logical identifier (e.g. "iron_ore").
    pub name: String,
    /// Numeric id referenced by the simulation.
    pub id: u16,
    /// Optional ore class; items sharing a class match the same recipes.
    #[serde(default)]
    pub class: Option<String>,
    /// Optional upgrade kind this item grants ("efficiency" or "electric_fuel").
    #[serde(default)]
    pub upgrade: Option<String>,
}

/// Serialized smelting recipe.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecipeDef {
    /// Input item name (fuzzy-matched through its ore class).
    pub input: String,
    /// Output item name.
    pub output: String,
    /// Output quantity per smelted unit.
    #[serde(default = "default_count")]
    pub count: u8,
}

fn default_count() -> u8 {
    1
}

/// Serialized fuel table entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FuelDef {
    /// Fuel item name.
    pub item: String,
    /// Ticks this fuel keeps a furnace lit.
    pub burn_ticks: u32,
    /// Item left behind when the last unit burns.
    #[serde(default)]
    pub remainder: Option<String>,
}

/// Serialized sponge side rule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpongeDef {
    /// The designated sponge-like input item.
    pub sponge: String,
    /// Empty container in the fuel slot that gets filled.
    pub empty: String,
    /// Filled container replacing it.
    pub filled: String,
}

/// A full catalog document as stored on disk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogDocument {
    /// Item definitions.
    pub items: Vec<ItemDef>,
    /// Smelting recipes.
    pub recipes: Vec<RecipeDef>,
    /// Fuel table.
    pub fuels: Vec<FuelDef>,
    /// Optional sponge side rule.
    #[serde(default)]
    pub sponge_rule: Option<SpongeDef>,
}

/// Validated tables ready for the simulation, plus the name map the
/// host can use to resolve item names.
#[derive(Debug, Clone)]
pub struct CatalogBundle {
    /// The recipe catalog.
    pub recipes: RecipeTable,
    /// Upgrade item bindings.
    pub upgrades: UpgradeRegistry,
    names: HashMap<String, ItemId>,
}

impl CatalogBundle {
    /// Resolve an item name to its id.
    pub fn item_id(&self, name: &str) -> Option<ItemId> {
        self.names.get(name).copied()
    }
}

impl CatalogDocument {
    /// Parse a catalog from a JSON string and validate contents.
    pub fn parse_str(input: &str) -> Result<Self, CatalogError> {
        let doc: CatalogDocument = serde_json::from_str(input)?;
        doc.validate()?;
        Ok(doc)
    }

    /// Load a catalog from a file on disk.
    pub fn load_file(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let data = fs::read_to_string(path)?;
        Self::parse_str(&data)
    }

    /// Validate the structure of the catalog and return `Ok(())` if consistent.
    pub fn validate(&self) -> Result<(), CatalogError> {
        let mut names = HashSet::new();
        let mut ids = HashSet::new();
        for item in &self.items {
            if !names.insert(item.name.as_str()) {
                return Err(CatalogError::Invalid(format!(
                    "duplicate item name '{}'",
                    item.name
                )));
            }
            if !ids.insert(item.id) {
                return Err(CatalogError::Invalid(format!(
                    "duplicate item id {} ('{}')",
                    item.id, item.name
                )));
            }
            if let Some(upgrade) = &item.upgrade {
                parse_upgrade_kind(upgrade).ok_or_else(|| {
                    CatalogError::Invalid(format!(
                        "unknown upgrade kind '{upgrade}' on '{}'",
                        item.name
                    ))
                })?;
            }
        }

        let known = |name: &str| names.contains(name);
        for recipe in &self.recipes {
            for reference in [&recipe.input, &recipe.output] {
                if !known(reference) {
                    return Err(CatalogError::Invalid(format!(
                        "recipe references unknown item '{reference}'"
                    )));
                }
            }
            if recipe.count == 0 || recipe.count > 64 {
                return Err(CatalogError::Invalid(format!(
                    "recipe for '{}' has output count {} outside 1..=64",
                    recipe.input, recipe.count
                )));
            }
        }

        for fuel in &self.fuels {
            if !known(&fuel.item) {
                return Err(CatalogError::Invalid(format!(
                    "fuel references unknown item '{}'",
                    fuel.item
                )));
            }
            if fuel.burn_ticks == 0 {
                return Err(CatalogError::Invalid(format!(
                    "fuel '{}' has zero burn time",
                    fuel.item
                )));
            }
            if let Some(remainder) = &fuel.remainder {
                if !known(remainder) {
                    return Err(CatalogError::Invalid(format!(
                        "fuel '{}' has unknown remainder '{remainder}'",
                        fuel.item
                    )));
                }
            }
        }

        if let Some(rule) = &self.sponge_rule {
            for reference in [&rule.sponge, &rule.empty, &rule.filled] {
                if !known(reference) {
                    return Err(CatalogError::Invalid(format!(
                        "sponge rule references unknown item '{reference}'"
                    )));
                }
            }
        }

        Ok(())
    }

    /// Build the simulation tables from a validated document.
    pub fn build(&self) -> Result<CatalogBundle, CatalogError> {
        self.validate()?;

        let mut names = HashMap::new();
        let mut classes: HashMap<&str, u16> = HashMap::new();
        let mut recipes = RecipeTable::new();
        let mut upgrades = UpgradeRegistry::new();

        for item in &self.items {
            let id = ItemId(item.id);
            names.insert(item.name.clone(), id);
            if let Some(class) = &item.class {
                let next = classes.len() as u16;
                let class_id = *classes.entry(class.as_str()).or_insert(next);
                recipes.add_class(id, class_id);
            }
            if let Some(upgrade) = &item.upgrade {
                if let Some(kind) = parse_upgrade_kind(upgrade) {
                    upgrades.bind(id, kind);
                }
            }
        }

        let id_of = |name: &str| -> ItemId {
            // Validation guarantees every reference resolves.
            names.get(name).copied().unwrap_or(ItemId(0))
        };

        for recipe in &self.recipes {
            recipes.add_recipe(
                id_of(&recipe.input),
                ItemStack::new(id_of(&recipe.output), recipe.count),
            );
        }
        for fuel in &self.fuels {
            recipes.add_fuel(
                id_of(&fuel.item),
                fuel.burn_ticks,
                fuel.remainder.as_deref().map(&id_of),
            );
        }
        if let Some(rule) = &self.sponge_rule {
            recipes.set_sponge_rule(SpongeRule {
                sponge: id_of(&rule.sponge),
                empty: id_of(&rule.empty),
                filled: id_of(&rule.filled),
            });
        }

        Ok(CatalogBundle {
            recipes,
            upgrades,
            names,
        })
    }
}

fn parse_upgrade_kind(s: &str) -> Option<UpgradeKind> {
    match s {
        "efficiency" => Some(UpgradeKind::Efficiency),
        "electric_fuel" => Some(UpgradeKind::ElectricFuel),
        _ => None,
    }
}
