use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use stockyard_core::{Entity, MovementId, ProductId, WarehouseId};

use crate::store::StoreError;

/// Direction of a stock movement.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MovementKind {
    Entry,
    Exit,
}

/// Immutable ledger record. Only the allocation engine writes entries and only the
/// withdrawal engine writes exits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockMovement {
    pub id: MovementId,
    pub product_id: ProductId,
    pub warehouse_id: WarehouseId,
    /// Always positive; the direction is carried by `kind`.
    pub quantity: i64,
    pub kind: MovementKind,
    pub occurred_at: DateTime<Utc>,
}

impl StockMovement {
    pub fn is_entry(&self) -> bool {
        self.kind == MovementKind::Entry
    }

    /// Quantity with the sign of its effect on stock.
    pub fn signed_quantity(&self) -> i64 {
        match self.kind {
            MovementKind::Entry => self.quantity,
            MovementKind::Exit => -self.quantity,
        }
    }

    /// Ledger order: oldest first, ties broken by ascending id.
    pub fn fifo_key(&self) -> (DateTime<Utc>, MovementId) {
        (self.occurred_at, self.id)
    }
}

impl Entity for StockMovement {
    type Id = MovementId;

    fn id(&self) -> MovementId {
        self.id
    }
}

/// A movement about to be appended; the ledger assigns its id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewMovement {
    pub product_id: ProductId,
    pub warehouse_id: WarehouseId,
    pub quantity: i64,
    pub kind: MovementKind,
    pub occurred_at: DateTime<Utc>,
}

impl NewMovement {
    pub fn entry(
        product_id: ProductId,
        warehouse_id: WarehouseId,
        quantity: i64,
        occurred_at: DateTime<Utc>,
    ) -> Self {
        Self {
            product_id,
            warehouse_id,
            quantity,
            kind: MovementKind::Entry,
            occurred_at,
        }
    }

    pub fn exit(
        product_id: ProductId,
        warehouse_id: WarehouseId,
        quantity: i64,
        occurred_at: DateTime<Utc>,
    ) -> Self {
        Self {
            kind: MovementKind::Exit,
            ..Self::entry(product_id, warehouse_id, quantity, occurred_at)
        }
    }

    pub fn into_movement(self, id: MovementId) -> StockMovement {
        StockMovement {
            id,
            product_id: self.product_id,
            warehouse_id: self.warehouse_id,
            quantity: self.quantity,
            kind: self.kind,
            occurred_at: self.occurred_at,
        }
    }
}

/// Σ ENTRY − Σ EXIT over the given movements.
///
/// Summed in `i128` so intermediate totals cannot wrap; a net that does not fit an
/// `i64` means the ledger is corrupt.
pub fn net_quantity<'a>(movements: impl IntoIterator<Item = &'a StockMovement>) -> Result<i64, StoreError> {
    let total: i128 = movements
        .into_iter()
        .map(|m| i128::from(m.signed_quantity()))
        .sum();
    i64::try_from(total).map_err(|_| StoreError::Inconsistent(format!("net quantity {total} overflows i64")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn at(secs: i64) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 1, 9, 0, 0).unwrap() + Duration::seconds(secs)
    }

    fn movement(id: u64, kind: MovementKind, quantity: i64, secs: i64) -> StockMovement {
        NewMovement {
            product_id: ProductId::new(1),
            warehouse_id: WarehouseId::new(1),
            quantity,
            kind,
            occurred_at: at(secs),
        }
        .into_movement(MovementId::new(id))
    }

    #[test]
    fn net_quantity_subtracts_exits() {
        let movements = vec![
            movement(1, MovementKind::Entry, 30, 0),
            movement(2, MovementKind::Entry, 20, 1),
            movement(3, MovementKind::Exit, 25, 2),
        ];
        assert_eq!(net_quantity(&movements), Ok(25));
        assert_eq!(net_quantity(&Vec::<StockMovement>::new()), Ok(0));
    }

    #[test]
    fn net_quantity_reports_overflow_instead_of_wrapping() {
        let movements = vec![
            movement(1, MovementKind::Entry, i64::MAX, 0),
            movement(2, MovementKind::Entry, 1, 1),
        ];
        match net_quantity(&movements) {
            Err(StoreError::Inconsistent(msg)) => assert!(msg.contains("overflows")),
            other => panic!("expected inconsistency, got {other:?}"),
        }

        let movements = vec![
            movement(1, MovementKind::Entry, i64::MAX, 0),
            movement(2, MovementKind::Entry, 1, 1),
            movement(3, MovementKind::Exit, 1, 2),
        ];
        assert_eq!(net_quantity(&movements), Ok(i64::MAX));
    }

    #[test]
    fn fifo_key_breaks_timestamp_ties_by_id() {
        let mut movements = vec![
            movement(5, MovementKind::Entry, 1, 10),
            movement(2, MovementKind::Entry, 1, 10),
            movement(9, MovementKind::Entry, 1, 3),
        ];
        movements.sort_by_key(StockMovement::fifo_key);
        let ids: Vec<u64> = movements.iter().map(|m| m.id.get()).collect();
        assert_eq!(ids, vec![9, 2, 5]);
    }
}
