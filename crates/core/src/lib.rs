#![warn(missing_docs)]
//! Core primitives shared across the workspace.

pub mod item;
pub mod recipe;
pub mod upgrade;

use serde::{Deserialize, Serialize};

// Re-export commonly used types
pub use item::{ItemId, ItemStack, DEFAULT_STACK_SIZE};
pub use recipe::{FuelEntry, RecipeTable, SmeltRecipe, SpongeRule};
pub use upgrade::{UpgradeKind, UpgradeRegistry};

/// Fixed tick type (20 TPS => 50 ms per tick).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SimTick(pub u64);

impl SimTick {
    /// First tick in any deterministic timeline.
    pub const ZERO: Self = Self(0);

    /// Advance by `delta` ticks.
    pub fn advance(self, delta: u64) -> Self {
        Self(self.0 + delta)
    }
}
