//! Furnace state machine: burn/cook progress, ignition, and smelting.
//!
//! The host calls [`Furnace::tick`] once per discrete world update.
//! The tick reads and mutates the slots and the energy store, and
//! returns the lit/unlit transitions the host should reflect in
//! world-visible state. Ordering inside a tick is load-bearing (a
//! single tick can ignite, smelt, and go dark) and matches the
//! behavior pinned by the integration tests; do not reorder the steps.

use crate::energy::EnergyStore;
use crate::slots::{SlotArray, SLOT_FUEL, SLOT_INPUT, SLOT_OUTPUT, SLOT_UPGRADES};
use bitflags::bitflags;
use smeltsim_core::{ItemId, ItemStack, RecipeTable, UpgradeKind, UpgradeRegistry};

/// Default ticks required to smelt one input unit.
pub const DEFAULT_COOK_TIME: u32 = 200;
/// Energy buffer capacity.
pub const ENERGY_CAPACITY: u32 = 50_000;
/// Maximum energy accepted from the host per operation.
pub const MAX_ENERGY_TRANSFER: u32 = 1_200;
/// Energy consumed per lit tick on the electric path.
pub const ENERGY_PER_TICK: u32 = 600;

bitflags! {
    /// Lit-state transitions emitted by a single tick. With a 1-tick
    /// fuel a furnace can both ignite and go dark in the same tick.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct TickSignal: u8 {
        /// The furnace started burning this tick.
        const BECAME_LIT = 0b01;
        /// The furnace stopped burning this tick.
        const BECAME_UNLIT = 0b10;
    }
}

/// Per-variant configuration. The only behavior that varies between
/// furnace tiers is two constants, so variants are data, not types.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FurnaceVariant {
    /// Identifier the host uses for GUI routing.
    pub name: &'static str,
    /// Ticks required per smelted unit.
    pub cook_time_required: u32,
}

impl FurnaceVariant {
    /// Baseline furnace.
    pub const IRON: Self = Self {
        name: "furnace/iron",
        cook_time_required: DEFAULT_COOK_TIME,
    };

    /// Top-tier furnace: one tick per smelt.
    pub const ZENITH: Self = Self {
        name: "furnace/zenith",
        cook_time_required: 1,
    };
}

/// A furnace instance: six slots, an energy buffer, and burn/cook state.
#[derive(Debug, Clone)]
pub struct Furnace {
    slots: SlotArray,
    energy: EnergyStore,
    variant: FurnaceVariant,
    burn_time_remaining: u32,
    cook_time_required: u32,
    cook_time_current: u32,
    // Recipe cache: avoids a full catalog scan per tick. `failed_match`
    // remembers an input known to have no recipe.
    recipe_key: Option<ItemId>,
    recipe_output: Option<ItemStack>,
    failed_match: Option<ItemId>,
}

impl Default for Furnace {
    fn default() -> Self {
        Self::new(FurnaceVariant::IRON)
    }
}

impl Furnace {
    /// Create an empty, unlit furnace of the given variant.
    pub fn new(variant: FurnaceVariant) -> Self {
        Self {
            slots: SlotArray::new(),
            energy: EnergyStore::new(ENERGY_CAPACITY, MAX_ENERGY_TRANSFER, ENERGY_PER_TICK),
            variant,
            burn_time_remaining: 0,
            cook_time_required: variant.cook_time_required,
            cook_time_current: 0,
            recipe_key: None,
            recipe_output: None,
            failed_match: None,
        }
    }

    /// Advance the simulation by one tick.
    pub fn tick(&mut self, catalog: &RecipeTable, upgrades: &UpgradeRegistry) -> TickSignal {
        let mut signal = TickSignal::empty();
        let can_smelt = self.can_smelt(catalog);

        // First ignition attempt, before burn time is consumed.
        if !self.is_burning() && self.slots.fuel().is_some() && can_smelt {
            signal |= self.burn_fuel(catalog, upgrades, false);
        }

        let was_burning = self.is_burning();

        if self.is_burning() {
            self.burn_time_remaining -= 1;
            if can_smelt {
                self.smelt(catalog);
            } else {
                // A lit tick with no valid recipe discards partial
                // progress. Intentional, matches the original behavior.
                self.cook_time_current = 0;
            }
        }

        // Re-ignite in the same tick the previous fuel ran out, so a
        // stocked furnace never shows an off tick between fuel items.
        if !self.is_burning() && self.slots.fuel().is_some() && self.can_smelt(catalog) {
            signal |= self.burn_fuel(catalog, upgrades, was_burning);
        }

        if was_burning && !self.is_burning() {
            signal |= TickSignal::BECAME_UNLIT;
        }

        if !signal.is_empty() {
            tracing::debug!(?signal, variant = self.variant.name, "lit state changed");
        }
        signal
    }

    /// Whether the furnace is currently burning.
    pub fn is_burning(&self) -> bool {
        self.burn_time_remaining > 0
    }

    /// Check the three upgrade slots for an upgrade of the given kind.
    /// Recomputed on every query so slot edits take effect immediately.
    pub fn has_upgrade(&self, kind: UpgradeKind, upgrades: &UpgradeRegistry) -> bool {
        SLOT_UPGRADES
            .iter()
            .any(|&slot| upgrades.matches(kind, self.slots.get(slot)))
    }

    /// Effective burn time for a fuel item: doubled by Efficiency,
    /// zero when the electric upgrade bypasses item fuel entirely.
    pub fn fuel_burn_ticks(
        &self,
        item: ItemId,
        catalog: &RecipeTable,
        upgrades: &UpgradeRegistry,
    ) -> u32 {
        if self.has_upgrade(UpgradeKind::ElectricFuel, upgrades) {
            return 0;
        }
        let base = catalog.fuel_burn_ticks(item);
        if self.has_upgrade(UpgradeKind::Efficiency, upgrades) {
            base * 2
        } else {
            base
        }
    }

    fn burn_fuel(
        &mut self,
        catalog: &RecipeTable,
        upgrades: &UpgradeRegistry,
        burned_this_tick: bool,
    ) -> TickSignal {
        if self.has_upgrade(UpgradeKind::ElectricFuel, upgrades) {
            // Electric "lit" is re-evaluated every tick, not a timer.
            // No lit signal here: the original never surfaced one on
            // the electric path, and hosts depend on that.
            self.burn_time_remaining = u32::from(self.energy.stored() >= ENERGY_PER_TICK);
            if self.is_burning() {
                self.energy.extract(ENERGY_PER_TICK);
            }
            return TickSignal::empty();
        }

        let Some(fuel) = self.slots.fuel() else {
            return TickSignal::empty();
        };
        let fuel_item = fuel.item;

        self.burn_time_remaining = self.fuel_burn_ticks(fuel_item, catalog, upgrades);
        if !self.is_burning() {
            return TickSignal::empty();
        }

        if let Some(stack) = self.slots.fuel_mut() {
            stack.remove(1);
        }
        if self.slots.fuel().is_some_and(|s| s.count == 0) {
            let remainder = catalog
                .fuel_remainder(fuel_item)
                .map(|item| ItemStack::new(item, 1));
            self.slots.set(SLOT_FUEL, remainder);
        }

        if burned_this_tick {
            TickSignal::empty()
        } else {
            TickSignal::BECAME_LIT
        }
    }

    /// Check whether the current input can smelt into the output slot,
    /// refreshing the recipe cache as needed.
    fn can_smelt(&mut self, catalog: &RecipeTable) -> bool {
        let Some(input) = self.slots.input() else {
            return false;
        };
        let input_item = input.item;
        if self.failed_match == Some(input_item) {
            return false;
        }

        let cache_valid = self
            .recipe_key
            .is_some_and(|key| catalog.matches(key, input_item));
        if !cache_valid {
            match catalog.find_recipe(input_item) {
                Some(recipe) => {
                    self.recipe_key = Some(recipe.key);
                    self.recipe_output = Some(recipe.output.clone());
                    self.failed_match = None;
                }
                None => {
                    self.recipe_key = None;
                    self.recipe_output = None;
                    self.failed_match = Some(input_item);
                    return false;
                }
            }
        }

        let Some(result) = &self.recipe_output else {
            return false;
        };
        match self.slots.output() {
            None => true,
            Some(existing) => {
                existing.can_merge(result)
                    && existing.count as u16 + result.count as u16
                        <= existing.max_stack_size() as u16
            }
        }
    }

    fn smelt(&mut self, catalog: &RecipeTable) {
        self.cook_time_current += 1;
        if self.cook_time_current == self.cook_time_required {
            self.cook_time_current = 0;
            self.smelt_item(catalog);
        }
    }

    /// Perform the actual transformation once cook progress completes.
    fn smelt_item(&mut self, catalog: &RecipeTable) {
        let Some(result) = self.recipe_output.clone() else {
            return;
        };
        let Some(input) = self.slots.input() else {
            return;
        };
        let input_item = input.item;

        let merged = match self.slots.output_mut() {
            Some(existing) if existing.can_merge(&result) => {
                existing.add(result.count);
                true
            }
            Some(_) => true, // incompatible output; canSmelt gates this path
            None => false,
        };
        if !merged {
            self.slots.set(SLOT_OUTPUT, Some(result));
        }

        if let Some(rule) = catalog.sponge_rule() {
            if input_item == rule.sponge && self.slots.fuel().is_some_and(|f| f.item == rule.empty)
            {
                self.slots.set(SLOT_FUEL, Some(ItemStack::new(rule.filled, 1)));
            }
        }

        if let Some(input) = self.slots.input_mut() {
            input.remove(1);
        }
        if self.slots.input().is_some_and(|s| s.count == 0) {
            self.slots.set(SLOT_INPUT, None);
        }
    }

    /// Derived 0-15 signal from the average fill of the three
    /// processing slots, for host redstone-style indicators.
    pub fn comparator_signal(&self) -> u8 {
        const WATCHED: [usize; 3] = [SLOT_INPUT, SLOT_FUEL, SLOT_OUTPUT];
        let mut fill = 0.0f32;
        let mut occupied = false;
        for slot in WATCHED {
            if let Some(stack) = self.slots.get(slot) {
                fill += stack.count as f32 / stack.max_stack_size() as f32;
                occupied = true;
            }
        }
        (fill / WATCHED.len() as f32 * 14.0).floor() as u8 + u8::from(occupied)
    }

    /// Slot storage.
    pub fn slots(&self) -> &SlotArray {
        &self.slots
    }

    /// Mutable slot storage (host GUI access).
    pub fn slots_mut(&mut self) -> &mut SlotArray {
        &mut self.slots
    }

    /// Energy buffer.
    pub fn energy(&self) -> &EnergyStore {
        &self.energy
    }

    /// Mutable energy buffer (host cable/charger access).
    pub fn energy_mut(&mut self) -> &mut EnergyStore {
        &mut self.energy
    }

    /// Variant configuration.
    pub fn variant(&self) -> &FurnaceVariant {
        &self.variant
    }

    /// Remaining burn time in ticks (0 = not burning).
    pub fn burn_time_remaining(&self) -> u32 {
        self.burn_time_remaining
    }

    /// Progress toward the current smelt.
    pub fn cook_time_current(&self) -> u32 {
        self.cook_time_current
    }

    /// Ticks required per smelted unit.
    pub fn cook_time_required(&self) -> u32 {
        self.cook_time_required
    }

    pub(crate) fn restore(
        variant: FurnaceVariant,
        slots: SlotArray,
        energy_stored: u32,
        burn_time_remaining: u32,
        cook_time_required: u32,
        cook_time_current: u32,
    ) -> Self {
        Self {
            slots,
            energy: EnergyStore::with_stored(
                ENERGY_CAPACITY,
                MAX_ENERGY_TRANSFER,
                ENERGY_PER_TICK,
                energy_stored,
            ),
            variant,
            burn_time_remaining,
            cook_time_required,
            cook_time_current,
            recipe_key: None,
            recipe_output: None,
            failed_match: None,
        }
    }
}
