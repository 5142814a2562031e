//! Stock-in: spread an incoming quantity over capacity-bounded warehouses.
//!
//! For each request the engine resolves the preferred warehouse (creating it if it does
//! not exist), then scans the pool in ascending id order starting at that warehouse,
//! filling each one's free capacity. When the scan runs past the last warehouse a new
//! one is synthesized with the default capacity, so a request is always fully placed.
//!
//! The scan only moves forward: warehouses with a smaller id than the preferred one are
//! never considered, even if they have room.

use chrono::{DateTime, Utc};

use stockyard_core::WarehouseId;

use crate::capacity::recompute_capacity;
use crate::error::{InventoryError, InventoryResult};
use crate::movement::{NewMovement, net_quantity};
use crate::request::{AllocationEffect, AllocationRequest};
use crate::store::{StockLedger, StoreError, WarehousePool};
use crate::warehouse::NewWarehouse;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct AllocationEngine {
    default_capacity: i64,
}

impl AllocationEngine {
    /// `default_capacity` is the `capacity_total` of warehouses created on demand.
    pub fn new(default_capacity: i64) -> InventoryResult<Self> {
        if default_capacity <= 0 {
            return Err(InventoryError::invalid(format!(
                "default warehouse capacity must be positive (got {default_capacity})"
            )));
        }
        Ok(Self { default_capacity })
    }

    /// Allocate every request in order. Effects of earlier requests are visible to
    /// later ones; the first failure aborts the batch.
    pub fn allocate_batch<S>(
        &self,
        store: &mut S,
        requests: &[AllocationRequest],
        occurred_at: DateTime<Utc>,
    ) -> InventoryResult<Vec<AllocationEffect>>
    where
        S: WarehousePool + StockLedger,
    {
        let mut effects = Vec::new();
        for request in requests {
            effects.extend(self.allocate(store, request, occurred_at)?);
        }
        Ok(effects)
    }

    pub fn allocate<S>(
        &self,
        store: &mut S,
        request: &AllocationRequest,
        occurred_at: DateTime<Utc>,
    ) -> InventoryResult<Vec<AllocationEffect>>
    where
        S: WarehousePool + StockLedger,
    {
        request.validate()?;
        if request.quantity == 0 {
            return Ok(vec![]);
        }

        let on_hand = net_quantity(&store.movements_for_product(request.product_id)?)?;
        if on_hand.checked_add(request.quantity).is_none() {
            return Err(InventoryError::invalid(format!(
                "allocating {} units of product {} would overflow its balance of {on_hand}",
                request.quantity, request.product_id
            )));
        }

        let preferred_existed = store.load(request.preferred_warehouse_id)?.is_some();
        let preferred = store.find_or_create(request.preferred_warehouse_id, self.default_capacity)?;
        let mut position = store
            .list_ordered_by_id()?
            .iter()
            .position(|w| w.id == preferred.id)
            .ok_or_else(|| {
                StoreError::Inconsistent(format!("warehouse {} missing from pool listing", preferred.id))
            })?;

        let mut remaining = request.quantity;
        let mut effects = Vec::new();

        while remaining > 0 {
            let warehouses = store.list_ordered_by_id()?;
            let (warehouse, created) = match warehouses.get(position) {
                Some(existing) => {
                    let created = !preferred_existed && existing.id == preferred.id;
                    (existing.clone(), created)
                }
                None => {
                    let id = match warehouses.last() {
                        Some(last) => last.id.checked_next().ok_or_else(|| {
                            InventoryError::invalid(format!(
                                "no warehouse id left after {} to place {remaining} more units",
                                last.id
                            ))
                        })?,
                        None => WarehouseId::new(1),
                    };
                    let created = store.create(NewWarehouse::derived(id, self.default_capacity))?;
                    tracing::debug!(warehouse_id = %created.id, "synthesized overflow warehouse");
                    (created, true)
                }
            };
            position += 1;

            let free = warehouse.free_capacity();
            if free <= 0 {
                continue;
            }

            let to_put = remaining.min(free);
            store.append(NewMovement::entry(request.product_id, warehouse.id, to_put, occurred_at))?;
            let updated = recompute_capacity(store, warehouse.id)?;
            remaining -= to_put;

            tracing::debug!(
                product_id = %request.product_id,
                warehouse_id = %warehouse.id,
                placed = to_put,
                remaining,
                "stock placed"
            );
            effects.push(AllocationEffect {
                warehouse_id: warehouse.id,
                product_id: request.product_id,
                quantity_placed: to_put,
                remaining_capacity: updated.free_capacity(),
                warehouse_created: created,
            });
        }

        Ok(effects)
    }
}
