//! Engine inputs and per-warehouse effect records.

use serde::{Deserialize, Serialize};

use stockyard_core::{ProductId, ValueObject, WarehouseId};

use crate::error::{InventoryError, InventoryResult};
use crate::movement::StockMovement;

/// Stock-in request: place `quantity` units, starting at `preferred_warehouse_id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AllocationRequest {
    pub product_id: ProductId,
    pub quantity: i64,
    pub preferred_warehouse_id: WarehouseId,
}

impl AllocationRequest {
    pub fn new(product_id: ProductId, quantity: i64, preferred_warehouse_id: WarehouseId) -> Self {
        Self {
            product_id,
            quantity,
            preferred_warehouse_id,
        }
    }

    /// Zero is accepted (and places nothing); negative quantities are rejected.
    pub fn validate(&self) -> InventoryResult<()> {
        if self.quantity < 0 {
            return Err(InventoryError::invalid(format!(
                "allocation quantity cannot be negative (product {}, got {})",
                self.product_id, self.quantity
            )));
        }
        Ok(())
    }
}

impl ValueObject for AllocationRequest {}

/// Stock-out request: remove `quantity` units of a product, oldest stock first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WithdrawalRequest {
    pub product_id: ProductId,
    pub quantity: i64,
}

impl WithdrawalRequest {
    pub fn new(product_id: ProductId, quantity: i64) -> Self {
        Self {
            product_id,
            quantity,
        }
    }

    pub fn validate(&self) -> InventoryResult<()> {
        if self.quantity <= 0 {
            return Err(InventoryError::invalid(format!(
                "withdrawal quantity must be positive (product {}, got {})",
                self.product_id, self.quantity
            )));
        }
        Ok(())
    }
}

impl ValueObject for WithdrawalRequest {}

/// One ENTRY placed by the allocation engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AllocationEffect {
    pub warehouse_id: WarehouseId,
    pub product_id: ProductId,
    pub quantity_placed: i64,
    /// `capacity_total - capacity_used` after the placement.
    pub remaining_capacity: i64,
    /// The warehouse was synthesized to hold overflow.
    pub warehouse_created: bool,
}

impl ValueObject for AllocationEffect {}

/// One EXIT recorded by the withdrawal engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WithdrawalEffect {
    pub warehouse_id: WarehouseId,
    pub product_id: ProductId,
    pub quantity_withdrawn: i64,
    pub remaining_capacity: i64,
}

impl ValueObject for WithdrawalEffect {}

/// Net quantity of a product, derived from its full movement history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductBalance {
    pub product_id: ProductId,
    /// Ledger order (oldest first).
    pub movements: Vec<StockMovement>,
    pub balance: i64,
}

/// Net quantity of a product held in one warehouse.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WarehouseStock {
    pub warehouse_id: WarehouseId,
    pub quantity: i64,
}

/// A warehouse whose recorded `capacity_used` disagreed with its ledger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CapacityCorrection {
    pub warehouse_id: WarehouseId,
    pub recorded: i64,
    pub actual: i64,
}
