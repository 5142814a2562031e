//! Plain, non-transactional store used by the engine unit tests.

use std::collections::BTreeMap;

use chrono::{DateTime, Duration, TimeZone, Utc};

use stockyard_core::{MovementId, ProductId, WarehouseId};

use crate::movement::{NewMovement, StockMovement};
use crate::store::{LedgerReader, StockLedger, StoreError, WarehousePool, WarehouseReader};
use crate::warehouse::{NewWarehouse, Warehouse};

pub(crate) fn w(id: u64) -> WarehouseId {
    WarehouseId::new(id)
}

pub(crate) fn p(id: u64) -> ProductId {
    ProductId::new(id)
}

pub(crate) fn at(secs: i64) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 2, 1, 12, 0, 0).unwrap() + Duration::seconds(secs)
}

#[derive(Debug, Default)]
pub(crate) struct FakeStore {
    pub(crate) warehouses: BTreeMap<WarehouseId, Warehouse>,
    pub(crate) movements: Vec<StockMovement>,
}

impl FakeStore {
    /// Empty warehouses with the given `(id, capacity_total)`.
    pub(crate) fn with_capacities(capacities: &[(u64, i64)]) -> Self {
        let warehouses = capacities
            .iter()
            .map(|&(id, total)| (w(id), NewWarehouse::derived(w(id), total).into_warehouse(w(id))))
            .collect();
        Self {
            warehouses,
            movements: Vec::new(),
        }
    }

    pub(crate) fn used(&self, id: u64) -> i64 {
        self.warehouses[&w(id)].capacity_used
    }

    fn ordered(&self, filter: impl Fn(&StockMovement) -> bool) -> Vec<StockMovement> {
        let mut out: Vec<StockMovement> = self.movements.iter().filter(|m| filter(m)).cloned().collect();
        out.sort_by_key(StockMovement::fifo_key);
        out
    }
}

impl WarehouseReader for FakeStore {
    fn list_ordered_by_id(&self) -> Result<Vec<Warehouse>, StoreError> {
        Ok(self.warehouses.values().cloned().collect())
    }

    fn load(&self, id: WarehouseId) -> Result<Option<Warehouse>, StoreError> {
        Ok(self.warehouses.get(&id).cloned())
    }
}

impl WarehousePool for FakeStore {
    fn create(&mut self, warehouse: NewWarehouse) -> Result<Warehouse, StoreError> {
        let id = match warehouse.id {
            Some(id) => id,
            None => self
                .warehouses
                .keys()
                .next_back()
                .map_or(Some(w(1)), |last| last.checked_next())
                .ok_or_else(|| StoreError::Inconsistent("id space exhausted".into()))?,
        };
        if self.warehouses.contains_key(&id) {
            return Err(StoreError::Conflict(format!("warehouse {id} already exists")));
        }
        let created = warehouse.into_warehouse(id);
        self.warehouses.insert(id, created.clone());
        Ok(created)
    }

    fn save(&mut self, warehouse: &Warehouse) -> Result<Warehouse, StoreError> {
        let saved = Warehouse {
            version: warehouse.version + 1,
            ..warehouse.clone()
        };
        self.warehouses.insert(warehouse.id, saved.clone());
        Ok(saved)
    }

    fn delete(&mut self, id: WarehouseId) -> Result<bool, StoreError> {
        Ok(self.warehouses.remove(&id).is_some())
    }
}

impl LedgerReader for FakeStore {
    fn movements_for_product(&self, product_id: ProductId) -> Result<Vec<StockMovement>, StoreError> {
        Ok(self.ordered(|m| m.product_id == product_id))
    }

    fn movements_for(
        &self,
        product_id: ProductId,
        warehouse_id: WarehouseId,
    ) -> Result<Vec<StockMovement>, StoreError> {
        Ok(self.ordered(|m| m.product_id == product_id && m.warehouse_id == warehouse_id))
    }

    fn movements_in_warehouse(&self, warehouse_id: WarehouseId) -> Result<Vec<StockMovement>, StoreError> {
        Ok(self.ordered(|m| m.warehouse_id == warehouse_id))
    }
}

impl StockLedger for FakeStore {
    fn append(&mut self, movement: NewMovement) -> Result<StockMovement, StoreError> {
        let stored = movement.into_movement(MovementId::new(self.movements.len() as u64 + 1));
        self.movements.push(stored.clone());
        Ok(stored)
    }
}
