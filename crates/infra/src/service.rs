//! Inventory service (application-level orchestration).
//!
//! Wraps the engines with transactions, time and logging:
//!
//! ```text
//! batch of requests
//!   ↓
//! 1. Open a transaction on the store
//!   ↓
//! 2. Run the engine over every request, in order (each sees the previous ones' effects)
//!   ↓
//! 3. Commit on success; drop (roll back) on the first failure
//! ```
//!
//! Batches are all-or-nothing: if any request fails, no movement or capacity change from
//! the batch is kept, including those of requests that succeeded before the failure.

use std::sync::Arc;

use stockyard_core::{BatchId, Clock, ProductId, SystemClock, WarehouseId};
use stockyard_inventory::capacity::warehouse_net_stock;
use stockyard_inventory::{
    AllocationEffect, AllocationEngine, AllocationRequest, BalanceCalculator, CapacityCorrection,
    InventoryError, InventoryResult, InventoryStore, NewWarehouse, ProductBalance, Transaction,
    Warehouse, WarehousePool, WarehouseReader, WarehouseStock, WithdrawalEffect, WithdrawalEngine,
    WithdrawalRequest, reconcile_capacity,
};

use crate::config::InventoryConfig;

pub struct InventoryService<S> {
    store: Arc<S>,
    clock: Arc<dyn Clock>,
    allocation: AllocationEngine,
    withdrawal: WithdrawalEngine,
    balances: BalanceCalculator,
}

impl<S> Clone for InventoryService<S> {
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
            clock: self.clock.clone(),
            allocation: self.allocation,
            withdrawal: self.withdrawal,
            balances: self.balances,
        }
    }
}

impl<S> core::fmt::Debug for InventoryService<S> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("InventoryService")
            .field("allocation", &self.allocation)
            .finish_non_exhaustive()
    }
}

impl<S> InventoryService<S>
where
    S: InventoryStore,
{
    pub fn new(store: Arc<S>, config: &InventoryConfig) -> InventoryResult<Self> {
        Self::with_clock(store, config, Arc::new(SystemClock))
    }

    pub fn with_clock(store: Arc<S>, config: &InventoryConfig, clock: Arc<dyn Clock>) -> InventoryResult<Self> {
        Ok(Self {
            store,
            clock,
            allocation: AllocationEngine::new(config.default_warehouse_capacity)?,
            withdrawal: WithdrawalEngine::new(),
            balances: BalanceCalculator::new(),
        })
    }

    pub fn store(&self) -> &Arc<S> {
        &self.store
    }

    /// Record incoming stock for every request, distributing across warehouses.
    pub fn allocate(&self, requests: &[AllocationRequest]) -> InventoryResult<Vec<AllocationEffect>> {
        let span = tracing::info_span!("allocate_batch", batch_id = %BatchId::new(), requests = requests.len());
        let _enter = span.enter();

        let at = self.clock.now();
        self.in_transaction(|tx| self.allocation.allocate_batch(tx, requests, at))
            .inspect(|effects| {
                let placed = effects.iter().fold(0i64, |acc, e| acc.saturating_add(e.quantity_placed));
                tracing::info!(effects = effects.len(), placed, "allocation batch committed");
            })
    }

    /// Record outgoing stock for every request, consuming the oldest stock first.
    pub fn withdraw(&self, requests: &[WithdrawalRequest]) -> InventoryResult<Vec<WithdrawalEffect>> {
        let span = tracing::info_span!("withdraw_batch", batch_id = %BatchId::new(), requests = requests.len());
        let _enter = span.enter();

        let at = self.clock.now();
        self.in_transaction(|tx| self.withdrawal.withdraw_batch(tx, requests, at))
            .inspect(|effects| {
                let withdrawn = effects
                    .iter()
                    .fold(0i64, |acc, e| acc.saturating_add(e.quantity_withdrawn));
                tracing::info!(effects = effects.len(), withdrawn, "withdrawal batch committed");
            })
    }

    pub fn balance(&self, product_id: ProductId) -> InventoryResult<ProductBalance> {
        let snapshot = self.store.snapshot()?;
        self.balances.balance(&snapshot, product_id)
    }

    pub fn stock_by_warehouse(&self, product_id: ProductId) -> InventoryResult<Vec<WarehouseStock>> {
        let snapshot = self.store.snapshot()?;
        self.balances.stock_by_warehouse(&snapshot, product_id)
    }

    pub fn create_warehouse(&self, warehouse: NewWarehouse) -> InventoryResult<Warehouse> {
        warehouse.validate()?;
        let created = self.in_transaction(|tx| Ok(tx.create(warehouse)?))?;
        tracing::info!(warehouse_id = %created.id, capacity = created.capacity_total, "warehouse created");
        Ok(created)
    }

    pub fn get_warehouse(&self, id: WarehouseId) -> InventoryResult<Warehouse> {
        self.store.snapshot()?.find_by_id(id)
    }

    pub fn list_warehouses(&self) -> InventoryResult<Vec<Warehouse>> {
        Ok(self.store.snapshot()?.list_ordered_by_id()?)
    }

    /// Delete a warehouse that holds no net stock.
    pub fn delete_warehouse(&self, id: WarehouseId) -> InventoryResult<()> {
        self.in_transaction(|tx| {
            tx.find_by_id(id)?;
            let stock = warehouse_net_stock(tx, id)?;
            if stock != 0 {
                return Err(InventoryError::WarehouseNotEmpty {
                    warehouse_id: id,
                    stock,
                });
            }
            tx.delete(id)?;
            Ok(())
        })?;
        tracing::info!(warehouse_id = %id, "warehouse deleted");
        Ok(())
    }

    /// Re-derive `capacity_used` for every warehouse from the ledger.
    pub fn reconcile_capacity(&self) -> InventoryResult<Vec<CapacityCorrection>> {
        let corrections = self.in_transaction(|tx| reconcile_capacity(tx))?;
        tracing::info!(corrected = corrections.len(), "capacity reconciliation finished");
        Ok(corrections)
    }

    fn in_transaction<'s, T>(
        &'s self,
        work: impl FnOnce(&mut S::Tx<'s>) -> InventoryResult<T>,
    ) -> InventoryResult<T> {
        let mut tx = self.store.begin()?;
        match work(&mut tx) {
            Ok(value) => {
                tx.commit()?;
                Ok(value)
            }
            Err(err) => {
                tracing::warn!(error = %err, code = err.code(), "rolling back");
                drop(tx);
                Err(err)
            }
        }
    }
}

