//! Capacity bookkeeping.
//!
//! `capacity_used` is only ever written through [`recompute_capacity`], which derives it
//! from the ledger (Σ ENTRY − Σ EXIT over every product in the warehouse). Both engines
//! and the reconciliation pass share it.

use stockyard_core::{ProductId, WarehouseId};

use crate::error::InventoryResult;
use crate::movement::net_quantity;
use crate::request::CapacityCorrection;
use crate::store::{LedgerReader, StockLedger, StoreError, WarehousePool};
use crate::warehouse::Warehouse;

/// Net stock of all products held in a warehouse.
pub fn warehouse_net_stock<L: LedgerReader>(ledger: &L, warehouse_id: WarehouseId) -> Result<i64, StoreError> {
    net_quantity(&ledger.movements_in_warehouse(warehouse_id)?)
}

/// Net stock of one product in one warehouse.
pub fn product_stock_in<L: LedgerReader>(
    ledger: &L,
    product_id: ProductId,
    warehouse_id: WarehouseId,
) -> Result<i64, StoreError> {
    net_quantity(&ledger.movements_for(product_id, warehouse_id)?)
}

/// Re-derive `capacity_used` for one warehouse from the ledger and persist it.
pub fn recompute_capacity<S>(store: &mut S, warehouse_id: WarehouseId) -> InventoryResult<Warehouse>
where
    S: WarehousePool + StockLedger,
{
    let mut warehouse = store.find_by_id(warehouse_id)?;
    warehouse.capacity_used = warehouse_net_stock(store, warehouse_id)?;
    Ok(store.save(&warehouse)?)
}

/// Recompute every warehouse, returning the ones whose recorded value had drifted.
pub fn reconcile_capacity<S>(store: &mut S) -> InventoryResult<Vec<CapacityCorrection>>
where
    S: WarehousePool + StockLedger,
{
    let mut corrections = Vec::new();
    for warehouse in store.list_ordered_by_id()? {
        let actual = warehouse_net_stock(store, warehouse.id)?;
        if actual == warehouse.capacity_used {
            continue;
        }

        tracing::warn!(
            warehouse_id = %warehouse.id,
            recorded = warehouse.capacity_used,
            actual,
            "capacity drift corrected"
        );
        corrections.push(CapacityCorrection {
            warehouse_id: warehouse.id,
            recorded: warehouse.capacity_used,
            actual,
        });
        store.save(&Warehouse {
            capacity_used: actual,
            ..warehouse
        })?;
    }
    Ok(corrections)
}
