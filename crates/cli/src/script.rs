//! JSON scripts replayed against an inventory service.
//!
//! ```json
//! { "steps": [
//!     { "op": "create_warehouse", "name": "Main", "capacity_total": 100 },
//!     { "op": "allocate", "requests": [
//!         { "product_id": 1, "quantity": 150, "preferred_warehouse_id": 1 } ] },
//!     { "op": "withdraw", "requests": [ { "product_id": 1, "quantity": 25 } ] },
//!     { "op": "balance", "product_id": 1 }
//! ] }
//! ```

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

use stockyard_core::{ProductId, WarehouseId};
use stockyard_infra::InventoryService;
use stockyard_inventory::{
    AllocationRequest, InventoryResult, InventoryStore, NewWarehouse, WithdrawalRequest,
};

use crate::response::{StepOutcome, error_payload};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Script {
    pub steps: Vec<Step>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Step {
    CreateWarehouse { name: String, capacity_total: i64 },
    GetWarehouse { warehouse_id: WarehouseId },
    ListWarehouses,
    DeleteWarehouse { warehouse_id: WarehouseId },
    Allocate { requests: Vec<AllocationRequest> },
    Withdraw { requests: Vec<WithdrawalRequest> },
    Balance { product_id: ProductId },
    StockByWarehouse { product_id: ProductId },
    Reconcile,
}

impl Step {
    pub fn name(&self) -> &'static str {
        match self {
            Step::CreateWarehouse { .. } => "create_warehouse",
            Step::GetWarehouse { .. } => "get_warehouse",
            Step::ListWarehouses => "list_warehouses",
            Step::DeleteWarehouse { .. } => "delete_warehouse",
            Step::Allocate { .. } => "allocate",
            Step::Withdraw { .. } => "withdraw",
            Step::Balance { .. } => "balance",
            Step::StockByWarehouse { .. } => "stock_by_warehouse",
            Step::Reconcile => "reconcile",
        }
    }
}

/// Replay every step in order. A failing step is reported and does not stop the replay.
pub fn replay<S: InventoryStore>(service: &InventoryService<S>, script: &Script) -> Vec<StepOutcome> {
    script
        .steps
        .iter()
        .enumerate()
        .map(|(idx, step)| {
            let (ok, error) = match run_step(service, step) {
                Ok(value) => (Some(value), None),
                Err(err) => {
                    tracing::warn!(step = idx, op = step.name(), error = %err, "step failed");
                    (None, Some(error_payload(&err)))
                }
            };
            StepOutcome {
                step: idx,
                op: step.name(),
                ok,
                error,
            }
        })
        .collect()
}

fn run_step<S: InventoryStore>(service: &InventoryService<S>, step: &Step) -> InventoryResult<JsonValue> {
    match step {
        Step::CreateWarehouse {
            name,
            capacity_total,
        } => to_json(service.create_warehouse(NewWarehouse::new(name.clone(), *capacity_total))?),
        Step::GetWarehouse { warehouse_id } => to_json(service.get_warehouse(*warehouse_id)?),
        Step::ListWarehouses => to_json(service.list_warehouses()?),
        Step::DeleteWarehouse { warehouse_id } => {
            service.delete_warehouse(*warehouse_id)?;
            Ok(serde_json::json!({ "deleted": warehouse_id }))
        }
        Step::Allocate { requests } => to_json(service.allocate(requests)?),
        Step::Withdraw { requests } => to_json(service.withdraw(requests)?),
        Step::Balance { product_id } => to_json(service.balance(*product_id)?),
        Step::StockByWarehouse { product_id } => to_json(service.stock_by_warehouse(*product_id)?),
        Step::Reconcile => to_json(service.reconcile_capacity()?),
    }
}

fn to_json<T: Serialize>(value: T) -> InventoryResult<JsonValue> {
    serde_json::to_value(value)
        .map_err(|e| stockyard_inventory::InventoryError::invalid(format!("unserializable result: {e}")))
}
