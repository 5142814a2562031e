//! Inventory error model.

use thiserror::Error;

use stockyard_core::{DomainError, ProductId, WarehouseId};

use crate::store::StoreError;

pub type InventoryResult<T> = Result<T, InventoryError>;

/// Failure surfaced by the engines to the boundary layer.
///
/// Engines never recover from these: the current request is aborted and the error is
/// returned with enough structure (ids, shortfall) to build a precise response.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InventoryError {
    #[error("warehouse {0} not found")]
    WarehouseNotFound(WarehouseId),

    #[error("product {0} has no recorded movements")]
    ProductNotFound(ProductId),

    /// `remaining` is the exact unmet part of the withdrawal.
    #[error("insufficient stock for product {product_id}: {remaining} units could not be withdrawn")]
    InsufficientStock {
        product_id: ProductId,
        remaining: i64,
    },

    #[error("invalid request: {0}")]
    InvalidRequest(String),

    #[error("warehouse {warehouse_id} still holds {stock} units")]
    WarehouseNotEmpty {
        warehouse_id: WarehouseId,
        stock: i64,
    },

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl InventoryError {
    pub fn invalid(msg: impl Into<String>) -> Self {
        Self::InvalidRequest(msg.into())
    }

    /// Stable machine-readable code for boundary responses.
    pub fn code(&self) -> &'static str {
        match self {
            InventoryError::WarehouseNotFound(_) => "warehouse_not_found",
            InventoryError::ProductNotFound(_) => "product_not_found",
            InventoryError::InsufficientStock { .. } => "insufficient_stock",
            InventoryError::InvalidRequest(_) => "invalid_request",
            InventoryError::WarehouseNotEmpty { .. } => "warehouse_not_empty",
            InventoryError::Store(StoreError::Conflict(_)) => "conflict",
            InventoryError::Store(StoreError::Unavailable(_)) => "store_unavailable",
            InventoryError::Store(StoreError::Inconsistent(_)) => "store_inconsistent",
        }
    }
}

impl From<DomainError> for InventoryError {
    fn from(value: DomainError) -> Self {
        match value {
            DomainError::Conflict(msg) => InventoryError::Store(StoreError::Conflict(msg)),
            other => InventoryError::InvalidRequest(other.to_string()),
        }
    }
}
