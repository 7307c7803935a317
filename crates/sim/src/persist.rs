//! Atomic persisted record for a furnace instance.
//!
//! The host reads and writes one record per furnace; framing,
//! compression, and placement are host concerns. The recipe cache is
//! deliberately not persisted and is rebuilt on the first tick.

use crate::furnace::{Furnace, FurnaceVariant};
use crate::slots::{SlotArray, SLOT_COUNT};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use smeltsim_core::ItemStack;

/// Everything a host must store to reconstruct a furnace.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FurnaceRecord {
    /// All six slots, in order.
    pub slots: [Option<ItemStack>; SLOT_COUNT],
    /// Energy buffer charge.
    pub energy_stored: u32,
    /// Remaining burn time in ticks.
    pub burn_time_remaining: u32,
    /// Ticks required per smelted unit.
    pub cook_time_required: u32,
    /// Progress toward the current smelt.
    pub cook_time_current: u32,
}

impl Furnace {
    /// Capture the persisted state of this furnace.
    pub fn to_record(&self) -> FurnaceRecord {
        FurnaceRecord {
            slots: self.slots().as_array().clone(),
            energy_stored: self.energy().stored(),
            burn_time_remaining: self.burn_time_remaining(),
            cook_time_required: self.cook_time_required(),
            cook_time_current: self.cook_time_current(),
        }
    }

    /// Rebuild a furnace from a persisted record. The record's cook
    /// time wins over the variant default, matching how the original
    /// restored saved furnaces.
    pub fn from_record(variant: FurnaceVariant, record: FurnaceRecord) -> Self {
        Self::restore(
            variant,
            SlotArray::from_array(record.slots),
            record.energy_stored,
            record.burn_time_remaining,
            record.cook_time_required,
            record.cook_time_current,
        )
    }
}

/// Encode a record for storage.
pub fn encode_record(record: &FurnaceRecord) -> Result<Vec<u8>> {
    bincode::serialize(record).context("failed to encode furnace record")
}

/// Decode a record previously produced by [`encode_record`].
pub fn decode_record(bytes: &[u8]) -> Result<FurnaceRecord> {
    bincode::deserialize(bytes).context("failed to decode furnace record")
}
