//! Capacity-bounded energy buffer with per-operation transfer limits.
//!
//! Best-effort contract: every operation clamps to the valid range and
//! reports what actually moved. There are no error returns.

use serde::{Deserialize, Serialize};

/// An integer energy buffer owned by a single furnace instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnergyStore {
    capacity: u32,
    stored: u32,
    max_receive: u32,
    max_extract: u32,
}

impl EnergyStore {
    /// Create an empty store.
    pub fn new(capacity: u32, max_receive: u32, max_extract: u32) -> Self {
        Self::with_stored(capacity, max_receive, max_extract, 0)
    }

    /// Create a store with an initial charge (clamped to capacity).
    pub fn with_stored(capacity: u32, max_receive: u32, max_extract: u32, stored: u32) -> Self {
        Self {
            capacity,
            stored: stored.min(capacity),
            max_receive,
            max_extract,
        }
    }

    /// Insert energy, returning the amount actually accepted.
    pub fn insert(&mut self, amount: u32) -> u32 {
        let accepted = amount.min(self.max_receive).min(self.capacity - self.stored);
        self.stored += accepted;
        accepted
    }

    /// Extract energy, returning the amount actually removed.
    pub fn extract(&mut self, amount: u32) -> u32 {
        let removed = amount.min(self.max_extract).min(self.stored);
        self.stored -= removed;
        removed
    }

    /// Current charge.
    pub fn stored(&self) -> u32 {
        self.stored
    }

    /// Maximum charge.
    pub fn capacity(&self) -> u32 {
        self.capacity
    }
}
