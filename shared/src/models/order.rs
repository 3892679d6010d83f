//! Order Model
//!
//! A purchase record - stock-photo checkout or paid gallery selection - with
//! its own payment status machine, driven manually by the studio admin.
//! Invariant: `final_amount == sum(items.price) − discount_amount`.

use serde::{Deserialize, Serialize};

/// Order payment status
///
/// `Pending → Paid → Completed`, with `Processing` as an optional
/// fulfillment marker between `Paid` and `Completed`. Cancellation is
/// permitted until completion; completed orders are immutable.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "SCREAMING_SNAKE_CASE"))]
pub enum OrderStatus {
    #[default]
    Pending,
    Paid,
    Processing,
    Completed,
    Cancelled,
}

impl OrderStatus {
    /// One-directional transition table. Cancellation from `Pending`,
    /// `Paid` or `Processing`; nothing leaves `Completed` or `Cancelled`.
    pub fn can_transition(self, next: Self) -> bool {
        use OrderStatus::*;
        matches!(
            (self, next),
            (Pending, Paid)
                | (Paid, Processing)
                | (Paid, Completed)
                | (Processing, Completed)
                | (Pending, Cancelled)
                | (Paid, Cancelled)
                | (Processing, Cancelled)
        )
    }
}

/// Order entity
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Order {
    pub id: i64,
    pub tenant_id: i64,
    pub customer_name: String,
    pub customer_email: String,
    pub gallery_id: Option<i64>,
    pub discount_amount: f64,
    pub final_amount: f64,
    pub status: OrderStatus,
    pub payment_method: Option<String>,
    pub payment_link: Option<String>,
    pub paid_at: Option<i64>,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Order line item - price captured at order time, independent of later
/// photo price edits.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct OrderItem {
    pub id: i64,
    pub tenant_id: i64,
    pub order_id: i64,
    pub photo_id: i64,
    pub title: String,
    pub price: f64,
}

/// Order with its line items (detail view)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderDetail {
    #[serde(flatten)]
    pub order: Order,
    pub items: Vec<OrderItem>,
}

/// Line item input at order creation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderItemInput {
    pub photo_id: i64,
    pub title: String,
    pub price: f64,
}

/// Create order payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderCreate {
    pub customer_name: String,
    pub customer_email: String,
    pub gallery_id: Option<i64>,
    pub items: Vec<OrderItemInput>,
    pub discount_amount: Option<f64>,
    pub payment_method: Option<String>,
}

/// Admin status change payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderStatusUpdate {
    pub status: OrderStatus,
}

#[cfg(test)]
mod tests {
    use super::OrderStatus::*;

    #[test]
    fn forward_path() {
        assert!(Pending.can_transition(Paid));
        assert!(Paid.can_transition(Processing));
        assert!(Paid.can_transition(Completed));
        assert!(Processing.can_transition(Completed));
    }

    #[test]
    fn cancellation_stops_at_completion() {
        assert!(Pending.can_transition(Cancelled));
        assert!(Paid.can_transition(Cancelled));
        assert!(Processing.can_transition(Cancelled));
        assert!(!Completed.can_transition(Cancelled));
        assert!(!Cancelled.can_transition(Cancelled));
    }

    #[test]
    fn no_reversals() {
        assert!(!Paid.can_transition(Pending));
        assert!(!Completed.can_transition(Paid));
        assert!(!Cancelled.can_transition(Pending));
        assert!(!Pending.can_transition(Completed));
    }
}
