use serde::{Deserialize, Serialize};

use stockyard_core::{Entity, WarehouseId};

use crate::error::{InventoryError, InventoryResult};

/// A capacity-bounded warehouse.
///
/// `capacity_used` tracks the net stock of all products held here. It is not clamped
/// to `capacity_total`: an over-allocated warehouse reports a negative free capacity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Warehouse {
    pub id: WarehouseId,
    pub name: String,
    pub capacity_used: i64,
    pub capacity_total: i64,
    /// Bumped by the store on every save.
    pub version: u64,
}

impl Warehouse {
    pub fn free_capacity(&self) -> i64 {
        self.capacity_total - self.capacity_used
    }
}

impl Entity for Warehouse {
    type Id = WarehouseId;

    fn id(&self) -> WarehouseId {
        self.id
    }
}

/// A warehouse about to be created. Created warehouses start empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewWarehouse {
    /// Explicit id, or `None` to let the store assign the next free one.
    pub id: Option<WarehouseId>,
    pub name: String,
    pub capacity_total: i64,
}

impl NewWarehouse {
    pub fn new(name: impl Into<String>, capacity_total: i64) -> Self {
        Self {
            id: None,
            name: name.into(),
            capacity_total,
        }
    }

    /// Warehouse created on demand by the allocation engine.
    pub fn derived(id: WarehouseId, capacity_total: i64) -> Self {
        Self {
            id: Some(id),
            name: derived_name(id),
            capacity_total,
        }
    }

    pub fn validate(&self) -> InventoryResult<()> {
        if self.name.trim().is_empty() {
            return Err(InventoryError::invalid("warehouse name cannot be empty"));
        }
        if self.capacity_total <= 0 {
            return Err(InventoryError::invalid(format!(
                "warehouse capacity must be positive (got {})",
                self.capacity_total
            )));
        }
        Ok(())
    }

    pub fn into_warehouse(self, id: WarehouseId) -> Warehouse {
        Warehouse {
            id,
            name: self.name,
            capacity_used: 0,
            capacity_total: self.capacity_total,
            version: 0,
        }
    }
}

pub fn derived_name(id: WarehouseId) -> String {
    format!("Warehouse {id}")
}
