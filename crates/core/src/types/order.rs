//! Placed orders.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::address::AddressInput;
use super::id::OrderId;
use super::price::round_off;
use super::status::OrderStatus;

/// A single product line on an order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    pub name: String,
    pub price: Decimal,
    pub quantity: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

impl OrderItem {
    #[must_use]
    pub fn line_total(&self) -> Decimal {
        round_off(self.price * Decimal::from(self.quantity))
    }
}

/// An order as returned by the orders API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    /// Database id, distinct from the customer-facing `order_id`.
    #[serde(default, rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub order_id: OrderId,
    pub status: OrderStatus,
    #[serde(default)]
    pub items: Vec<OrderItem>,
    pub total_amount: Decimal,
    #[serde(default)]
    pub delivery_charge: Decimal,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shipping_address: Option<AddressInput>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl Order {
    /// Order total without the delivery charge.
    #[must_use]
    pub fn subtotal(&self) -> Decimal {
        round_off(self.total_amount - self.delivery_charge)
    }

    #[must_use]
    pub fn item_count(&self) -> u32 {
        self.items.iter().map(|item| item.quantity).sum()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_order_from_api_json() {
        let order: Order = serde_json::from_str(
            r#"{"orderId": "ORD-7", "status": "Processing", "totalAmount": 140.5,
                "deliveryCharge": 40,
                "items": [{"name": "Mug", "price": 50.25, "quantity": 2}],
                "createdAt": "2025-03-01T10:00:00Z"}"#,
        )
        .unwrap();
        assert_eq!(order.status, OrderStatus::Processing);
        assert_eq!(order.subtotal(), Decimal::new(1005, 1));
        assert_eq!(order.items[0].line_total(), Decimal::new(1005, 1));
        assert_eq!(order.item_count(), 2);
        assert!(order.shipping_address.is_none());
        assert!(order.id.is_none());
    }

    #[test]
    fn test_order_keeps_database_id() {
        let order: Order = serde_json::from_str(
            r#"{"_id": "65f0c2", "orderId": "ORD-8", "status": "pending", "totalAmount": 10}"#,
        )
        .unwrap();
        assert_eq!(order.id.as_deref(), Some("65f0c2"));
        let json = serde_json::to_value(&order).unwrap();
        assert_eq!(json["_id"], "65f0c2");
        assert_eq!(json["orderId"], "ORD-8");
    }
}
