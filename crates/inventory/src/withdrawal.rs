//! Stock-out: consume a product's stock oldest-first.
//!
//! ENTRY movements of the product are visited in ledger order. For each one the engine
//! takes as much as the entry's warehouse still holds of the product (net of earlier
//! exits), until the request is satisfied. If every entry has been visited and units
//! remain, the request fails with the exact shortfall.

use chrono::{DateTime, Utc};

use crate::capacity::{product_stock_in, recompute_capacity};
use crate::error::{InventoryError, InventoryResult};
use crate::movement::{NewMovement, StockMovement};
use crate::request::{WithdrawalEffect, WithdrawalRequest};
use crate::store::{StockLedger, WarehousePool};

#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub struct WithdrawalEngine;

impl WithdrawalEngine {
    pub fn new() -> Self {
        Self
    }

    /// Withdraw every request in order; the first failure aborts the batch.
    ///
    /// Exits recorded before the failure stay in `store`; callers wanting all-or-nothing
    /// semantics run the batch inside a transaction they do not commit on error.
    pub fn withdraw_batch<S>(
        &self,
        store: &mut S,
        requests: &[WithdrawalRequest],
        occurred_at: DateTime<Utc>,
    ) -> InventoryResult<Vec<WithdrawalEffect>>
    where
        S: WarehousePool + StockLedger,
    {
        let mut effects = Vec::new();
        for request in requests {
            effects.extend(self.withdraw(store, request, occurred_at)?);
        }
        Ok(effects)
    }

    pub fn withdraw<S>(
        &self,
        store: &mut S,
        request: &WithdrawalRequest,
        occurred_at: DateTime<Utc>,
    ) -> InventoryResult<Vec<WithdrawalEffect>>
    where
        S: WarehousePool + StockLedger,
    {
        request.validate()?;

        let mut entries: Vec<StockMovement> = store
            .movements_for_product(request.product_id)?
            .into_iter()
            .filter(StockMovement::is_entry)
            .collect();
        entries.sort_by_key(StockMovement::fifo_key);

        let mut remaining = request.quantity;
        let mut effects = Vec::new();

        for entry in &entries {
            if remaining == 0 {
                break;
            }

            let available = product_stock_in(store, request.product_id, entry.warehouse_id)?;
            if available <= 0 {
                continue;
            }

            let take = available.min(remaining);
            store.append(NewMovement::exit(request.product_id, entry.warehouse_id, take, occurred_at))?;
            let warehouse = recompute_capacity(store, entry.warehouse_id)?;
            remaining -= take;

            tracing::debug!(
                product_id = %request.product_id,
                warehouse_id = %warehouse.id,
                withdrawn = take,
                remaining,
                "stock withdrawn"
            );
            effects.push(WithdrawalEffect {
                warehouse_id: warehouse.id,
                product_id: request.product_id,
                quantity_withdrawn: take,
                remaining_capacity: warehouse.free_capacity(),
            });
        }

        if remaining > 0 {
            tracing::warn!(product_id = %request.product_id, remaining, "insufficient stock");
            return Err(InventoryError::InsufficientStock {
                product_id: request.product_id,
                remaining,
            });
        }

        Ok(effects)
    }
}
