use std::collections::BTreeMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use stockyard_core::{ExpectedVersion, MovementId, ProductId, WarehouseId};
use stockyard_inventory::{
    InventoryStore, LedgerReader, NewMovement, NewWarehouse, StockLedger, StockMovement, StoreError,
    Transaction, Warehouse, WarehousePool, WarehouseReader,
};

#[derive(Debug, Clone, Default)]
struct InventoryState {
    warehouses: BTreeMap<WarehouseId, Warehouse>,
    /// Kept in ledger order (append order is non-decreasing in id).
    movements: Vec<StockMovement>,
    last_movement_id: u64,
}

impl InventoryState {
    fn ordered(&self, filter: impl Fn(&StockMovement) -> bool) -> Vec<StockMovement> {
        let mut out: Vec<StockMovement> = self.movements.iter().filter(|m| filter(m)).cloned().collect();
        out.sort_by_key(StockMovement::fifo_key);
        out
    }
}

impl WarehouseReader for InventoryState {
    fn list_ordered_by_id(&self) -> Result<Vec<Warehouse>, StoreError> {
        Ok(self.warehouses.values().cloned().collect())
    }

    fn load(&self, id: WarehouseId) -> Result<Option<Warehouse>, StoreError> {
        Ok(self.warehouses.get(&id).cloned())
    }
}

impl LedgerReader for InventoryState {
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

/// In-memory transactional inventory store.
///
/// Intended for tests/dev. A transaction holds the write lock for its whole lifetime,
/// so batches are fully serialised; writes go to a staged copy of the state that
/// replaces the committed one on `commit()`. Snapshots share the read lock and read
/// committed state in place.
#[derive(Debug, Default)]
pub struct InMemoryInventoryStore {
    state: RwLock<InventoryState>,
}

impl InMemoryInventoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-populated with warehouses (for fixtures).
    pub fn with_warehouses(warehouses: impl IntoIterator<Item = Warehouse>) -> Self {
        let state = InventoryState {
            warehouses: warehouses.into_iter().map(|w| (w.id, w)).collect(),
            ..InventoryState::default()
        };
        Self {
            state: RwLock::new(state),
        }
    }
}

fn poisoned<T>(_: T) -> StoreError {
    StoreError::Unavailable("lock poisoned".to_string())
}

impl InventoryStore for InMemoryInventoryStore {
    type Tx<'a> = InMemoryTransaction<'a>;
    type Snapshot<'a> = InMemorySnapshot<'a>;

    fn begin(&self) -> Result<InMemoryTransaction<'_>, StoreError> {
        let guard = self.state.write().map_err(poisoned)?;
        let staged = guard.clone();
        Ok(InMemoryTransaction { guard, staged })
    }

    fn snapshot(&self) -> Result<InMemorySnapshot<'_>, StoreError> {
        let guard = self.state.read().map_err(poisoned)?;
        Ok(InMemorySnapshot { guard })
    }
}

/// Open transaction on an [`InMemoryInventoryStore`]. Dropping it rolls back.
#[derive(Debug)]
pub struct InMemoryTransaction<'a> {
    guard: RwLockWriteGuard<'a, InventoryState>,
    staged: InventoryState,
}

impl Transaction for InMemoryTransaction<'_> {
    fn commit(self) -> Result<(), StoreError> {
        let InMemoryTransaction { mut guard, staged } = self;
        *guard = staged;
        Ok(())
    }
}

impl WarehouseReader for InMemoryTransaction<'_> {
    fn list_ordered_by_id(&self) -> Result<Vec<Warehouse>, StoreError> {
        self.staged.list_ordered_by_id()
    }

    fn load(&self, id: WarehouseId) -> Result<Option<Warehouse>, StoreError> {
        self.staged.load(id)
    }
}

impl WarehousePool for InMemoryTransaction<'_> {
    fn create(&mut self, warehouse: NewWarehouse) -> Result<Warehouse, StoreError> {
        let id = match (warehouse.id, self.staged.warehouses.keys().next_back()) {
            (Some(id), _) => id,
            (None, None) => WarehouseId::new(1),
            (None, Some(last)) => last
                .checked_next()
                .ok_or_else(|| StoreError::Inconsistent(format!("no warehouse id left after {last}")))?,
        };
        if self.staged.warehouses.contains_key(&id) {
            return Err(StoreError::Conflict(format!("warehouse {id} already exists")));
        }

        let created = warehouse.into_warehouse(id);
        self.staged.warehouses.insert(id, created.clone());
        Ok(created)
    }

    fn save(&mut self, warehouse: &Warehouse) -> Result<Warehouse, StoreError> {
        let stored = self
            .staged
            .warehouses
            .get_mut(&warehouse.id)
            .ok_or_else(|| StoreError::Inconsistent(format!("cannot save unknown warehouse {}", warehouse.id)))?;

        ExpectedVersion(warehouse.version)
            .check(stored.version)
            .map_err(|e| StoreError::Conflict(format!("warehouse {}: {e}", warehouse.id)))?;

        *stored = Warehouse {
            version: stored.version + 1,
            ..warehouse.clone()
        };
        Ok(stored.clone())
    }

    fn delete(&mut self, id: WarehouseId) -> Result<bool, StoreError> {
        Ok(self.staged.warehouses.remove(&id).is_some())
    }
}

impl LedgerReader for InMemoryTransaction<'_> {
    fn movements_for_product(&self, product_id: ProductId) -> Result<Vec<StockMovement>, StoreError> {
        self.staged.movements_for_product(product_id)
    }

    fn movements_for(
        &self,
        product_id: ProductId,
        warehouse_id: WarehouseId,
    ) -> Result<Vec<StockMovement>, StoreError> {
        self.staged.movements_for(product_id, warehouse_id)
    }

    fn movements_in_warehouse(&self, warehouse_id: WarehouseId) -> Result<Vec<StockMovement>, StoreError> {
        self.staged.movements_in_warehouse(warehouse_id)
    }
}

impl StockLedger for InMemoryTransaction<'_> {
    fn append(&mut self, movement: NewMovement) -> Result<StockMovement, StoreError> {
        if movement.quantity <= 0 {
            return Err(StoreError::Inconsistent(format!(
                "movement quantity must be positive (got {})",
                movement.quantity
            )));
        }
        if !self.staged.warehouses.contains_key(&movement.warehouse_id) {
            return Err(StoreError::Inconsistent(format!(
                "movement references unknown warehouse {}",
                movement.warehouse_id
            )));
        }

        self.staged.last_movement_id += 1;
        let stored = movement.into_movement(MovementId::new(self.staged.last_movement_id));
        self.staged.movements.push(stored.clone());
        Ok(stored)
    }
}

/// Read-only view of committed state. Holds the read lock, so open transactions block
/// until it is dropped.
#[derive(Debug)]
pub struct InMemorySnapshot<'a> {
    guard: RwLockReadGuard<'a, InventoryState>,
}

impl WarehouseReader for InMemorySnapshot<'_> {
    fn list_ordered_by_id(&self) -> Result<Vec<Warehouse>, StoreError> {
        self.guard.list_ordered_by_id()
    }

    fn load(&self, id: WarehouseId) -> Result<Option<Warehouse>, StoreError> {
        self.guard.load(id)
    }
}

impl LedgerReader for InMemorySnapshot<'_> {
    fn movements_for_product(&self, product_id: ProductId) -> Result<Vec<StockMovement>, StoreError> {
        self.guard.movements_for_product(product_id)
    }

    fn movements_for(
        &self,
        product_id: ProductId,
        warehouse_id: WarehouseId,
    ) -> Result<Vec<StockMovement>, StoreError> {
        self.guard.movements_for(product_id, warehouse_id)
    }

    fn movements_in_warehouse(&self, warehouse_id: WarehouseId) -> Result<Vec<StockMovement>, StoreError> {
        self.guard.movements_in_warehouse(warehouse_id)
    }
}
