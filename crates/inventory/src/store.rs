//! Persistence ports used by the engines.
//!
//! The engines never cache records: every decision re-reads the pool or the ledger,
//! so later requests in a batch observe the effects of earlier ones.
//!
//! Each port is split into a read half ([`WarehouseReader`], [`LedgerReader`]) and a
//! write half extending it, so queries can run against a read-only view.
//!
//! ## Transactions
//!
//! [`InventoryStore::begin`] opens a [`Transaction`] implementing both ports. Nothing
//! becomes visible to other callers until `commit()`; dropping a transaction without
//! committing discards every staged change. Implementations must serialise
//! transactions (or detect conflicts) so that concurrent batches cannot lose
//! `capacity_used` updates or double-spend stock.
//!
//! [`InventoryStore::snapshot`] opens a read-only view of committed state. It stages
//! nothing, so implementations can serve it without copying.

use thiserror::Error;

use stockyard_core::{ProductId, WarehouseId};

use crate::error::{InventoryError, InventoryResult};
use crate::movement::{NewMovement, StockMovement};
use crate::warehouse::{NewWarehouse, Warehouse};

/// Storage-level failure.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// Stale version on save, or a duplicate id on create.
    #[error("store conflict: {0}")]
    Conflict(String),

    #[error("store unavailable: {0}")]
    Unavailable(String),

    /// The stored data violates an invariant the engines rely on.
    #[error("store inconsistent: {0}")]
    Inconsistent(String),
}

/// Read access to warehouse records.
pub trait WarehouseReader {
    /// All warehouses, ascending by id.
    fn list_ordered_by_id(&self) -> Result<Vec<Warehouse>, StoreError>;

    fn load(&self, id: WarehouseId) -> Result<Option<Warehouse>, StoreError>;

    fn find_by_id(&self, id: WarehouseId) -> InventoryResult<Warehouse> {
        self.load(id)?.ok_or(InventoryError::WarehouseNotFound(id))
    }
}

/// Warehouse records (capacity state).
pub trait WarehousePool: WarehouseReader {
    /// Insert a new, empty warehouse. Fails with `Conflict` if the id is taken.
    fn create(&mut self, warehouse: NewWarehouse) -> Result<Warehouse, StoreError>;

    /// Persist `warehouse` if its `version` matches the stored one; returns the stored
    /// record with its version bumped.
    fn save(&mut self, warehouse: &Warehouse) -> Result<Warehouse, StoreError>;

    /// Returns `false` if there was nothing to delete.
    fn delete(&mut self, id: WarehouseId) -> Result<bool, StoreError>;

    /// Fetch `id`, creating it empty with `default_capacity` if absent.
    fn find_or_create(&mut self, id: WarehouseId, default_capacity: i64) -> InventoryResult<Warehouse> {
        if let Some(existing) = self.load(id)? {
            return Ok(existing);
        }
        Ok(self.create(NewWarehouse::derived(id, default_capacity))?)
    }
}

/// Read access to the movement ledger.
///
/// Every query returns movements in ledger order: ascending `occurred_at`, ties broken
/// by ascending movement id.
pub trait LedgerReader {
    fn movements_for_product(&self, product_id: ProductId) -> Result<Vec<StockMovement>, StoreError>;

    fn movements_for(
        &self,
        product_id: ProductId,
        warehouse_id: WarehouseId,
    ) -> Result<Vec<StockMovement>, StoreError>;

    /// Movements of every product held in one warehouse.
    fn movements_in_warehouse(&self, warehouse_id: WarehouseId) -> Result<Vec<StockMovement>, StoreError>;
}

/// Append-only movement ledger.
pub trait StockLedger: LedgerReader {
    fn append(&mut self, movement: NewMovement) -> Result<StockMovement, StoreError>;
}

/// A unit of work over both ports.
pub trait Transaction: WarehousePool + StockLedger {
    fn commit(self) -> Result<(), StoreError>;
}

/// Factory for transactions and read-only snapshots.
pub trait InventoryStore: Send + Sync {
    type Tx<'a>: Transaction
    where
        Self: 'a;

    type Snapshot<'a>: WarehouseReader + LedgerReader
    where
        Self: 'a;

    fn begin(&self) -> Result<Self::Tx<'_>, StoreError>;

    fn snapshot(&self) -> Result<Self::Snapshot<'_>, StoreError>;
}
