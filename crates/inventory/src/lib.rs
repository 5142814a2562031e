//! Inventory domain: capacity-bounded warehouses and the stock movement ledger.
//!
//! This crate holds the allocation (stock-in), withdrawal (stock-out, FIFO) and balance
//! logic. It talks to persistence only through the ports in [`store`], so it performs
//! no IO of its own.

pub mod allocation;
pub mod balance;
pub mod capacity;
pub mod error;
pub mod movement;
pub mod request;
pub mod store;
pub mod warehouse;
pub mod withdrawal;

#[cfg(test)]
mod test_support;

pub use allocation::AllocationEngine;
pub use balance::BalanceCalculator;
pub use capacity::{recompute_capacity, reconcile_capacity};
pub use error::{InventoryError, InventoryResult};
pub use movement::{MovementKind, NewMovement, StockMovement, net_quantity};
pub use request::{
    AllocationEffect, AllocationRequest, CapacityCorrection, ProductBalance, WarehouseStock,
    WithdrawalEffect, WithdrawalRequest,
};
pub use store::{
    InventoryStore, LedgerReader, StockLedger, StoreError, Transaction, WarehousePool, WarehouseReader,
};
pub use warehouse::{NewWarehouse, Warehouse};
pub use withdrawal::WithdrawalEngine;
