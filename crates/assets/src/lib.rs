#![warn(missing_docs)]
//! Smelting catalog schema + validation helpers.
//!
//! Catalogs are JSON documents naming items, recipes, fuels, and
//! upgrade bindings. Validation happens up front so the simulation
//! never sees dangling references.

mod catalog;

pub use catalog::{CatalogBundle, CatalogDocument, CatalogError};
