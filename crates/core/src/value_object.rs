//! Value object trait: equality by value, not identity.

/// Marker trait for value objects.
///
/// Value objects carry no identity and are compared by their attribute values. Engine
/// requests and effect records are value objects: two allocation requests for the same
/// product, quantity and warehouse are interchangeable.
///
/// ```ignore
/// #[derive(Debug, Clone, PartialEq, Eq)]
/// struct WithdrawalRequest {
///     product_id: ProductId,
///     quantity: i64,
/// }
///
/// impl ValueObject for WithdrawalRequest {}
/// ```
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
