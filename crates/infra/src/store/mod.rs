//! Inventory persistence adapters.
//!
//! Implementations of the `stockyard-inventory` ports. Only an in-memory backend ships
//! today; SQL backends plug in behind the same `InventoryStore` trait.

pub mod in_memory;

pub use in_memory::{InMemoryInventoryStore, InMemorySnapshot, InMemoryTransaction};
