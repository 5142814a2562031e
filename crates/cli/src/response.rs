use serde::Serialize;
use serde_json::{Value as JsonValue, json};

use stockyard_inventory::InventoryError;

/// Result of one replayed script step.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StepOutcome {
    pub step: usize,
    pub op: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ok: Option<JsonValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<JsonValue>,
}

impl StepOutcome {
    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }
}

/// Structured error body: `{ "error": code, "message": text, ...ids }`.
pub fn error_payload(err: &InventoryError) -> JsonValue {
    let mut body = json!({
        "error": err.code(),
        "message": err.to_string(),
    });

    let details = match err {
        InventoryError::WarehouseNotFound(id) => json!({ "warehouse_id": id }),
        InventoryError::ProductNotFound(id) => json!({ "product_id": id }),
        InventoryError::InsufficientStock {
            product_id,
            remaining,
        } => json!({ "product_id": product_id, "remaining": remaining }),
        InventoryError::WarehouseNotEmpty {
            warehouse_id,
            stock,
        } => json!({ "warehouse_id": warehouse_id, "stock": stock }),
        InventoryError::InvalidRequest(_) | InventoryError::Store(_) => json!({}),
    };

    if let (Some(body), JsonValue::Object(details)) = (body.as_object_mut(), details) {
        body.extend(details);
    }
    body
}
