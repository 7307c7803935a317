//! Side-restricted slot access for host automation.
//!
//! Hosts address the furnace by direction: the top face reaches the
//! input slot, the bottom face the output slot, and the lateral faces
//! the fuel slot. Each port is a restriction over the same storage,
//! not separate state.

use crate::furnace::Furnace;
use crate::slots::{SLOT_FUEL, SLOT_INPUT, SLOT_OUTPUT};
use smeltsim_core::ItemStack;

/// Direction key a host uses to reach a furnace face.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Port {
    /// Top face: input slot.
    Above,
    /// Bottom face: output slot.
    Below,
    /// Any lateral face: fuel slot.
    Side,
}

impl Port {
    /// The single slot this port is allowed to touch.
    pub fn slot(self) -> usize {
        match self {
            Port::Above => SLOT_INPUT,
            Port::Below => SLOT_OUTPUT,
            Port::Side => SLOT_FUEL,
        }
    }
}

impl Furnace {
    /// Insert a stack through a port, merging with the slot's contents.
    /// Returns the remainder that didn't fit.
    pub fn insert_via(&mut self, port: Port, stack: ItemStack) -> Option<ItemStack> {
        self.slots_mut().insert(port.slot(), stack)
    }

    /// Extract up to `amount` items through a port.
    pub fn extract_via(&mut self, port: Port, amount: u8) -> Option<ItemStack> {
        self.slots_mut().extract(port.slot(), amount)
    }

    /// Peek at the stack a port exposes.
    pub fn peek_via(&self, port: Port) -> Option<&ItemStack> {
        self.slots().get(port.slot())
    }
}
