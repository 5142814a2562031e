//! Product balance, always derived from the full ledger.

use std::collections::BTreeMap;

use stockyard_core::{ProductId, WarehouseId};

use crate::error::{InventoryError, InventoryResult};
use crate::movement::{StockMovement, net_quantity};
use crate::request::{ProductBalance, WarehouseStock};
use crate::store::LedgerReader;

#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub struct BalanceCalculator;

impl BalanceCalculator {
    pub fn new() -> Self {
        Self
    }

    pub fn balance<L: LedgerReader>(&self, ledger: &L, product_id: ProductId) -> InventoryResult<ProductBalance> {
        let movements = self.history(ledger, product_id)?;
        let balance = net_quantity(&movements)?;
        Ok(ProductBalance {
            product_id,
            movements,
            balance,
        })
    }

    /// Net stock of the product per warehouse, ascending by warehouse id. Warehouses
    /// whose net stock is zero are omitted.
    pub fn stock_by_warehouse<L: LedgerReader>(
        &self,
        ledger: &L,
        product_id: ProductId,
    ) -> InventoryResult<Vec<WarehouseStock>> {
        let mut per_warehouse: BTreeMap<WarehouseId, Vec<StockMovement>> = BTreeMap::new();
        for movement in self.history(ledger, product_id)? {
            per_warehouse.entry(movement.warehouse_id).or_default().push(movement);
        }

        let mut stock = Vec::new();
        for (warehouse_id, movements) in per_warehouse {
            let quantity = net_quantity(&movements)?;
            if quantity != 0 {
                stock.push(WarehouseStock {
                    warehouse_id,
                    quantity,
                });
            }
        }
        Ok(stock)
    }

    fn history<L: LedgerReader>(&self, ledger: &L, product_id: ProductId) -> InventoryResult<Vec<StockMovement>> {
        let mut movements = ledger.movements_for_product(product_id)?;
        if movements.is_empty() {
            return Err(InventoryError::ProductNotFound(product_id));
        }
        movements.sort_by_key(StockMovement::fifo_key);
        Ok(movements)
    }
}
