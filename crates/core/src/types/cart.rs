//! Cart line items.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::id::ProductId;
use super::price::round_off;
use super::product::Product;

/// One line in the shopping cart.
///
/// `total_price` is always `round_off(quantity * unit_price())`; the cart
/// reducer maintains that whenever the quantity changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    pub id: ProductId,
    pub title: String,
    pub price: Decimal,
    pub discounted_price: Decimal,
    pub quantity: u32,
    pub total_price: Decimal,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stock: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brand: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

impl CartItem {
    /// Build a cart line for `quantity` units of a catalog product.
    #[must_use]
    pub fn from_product(product: &Product, quantity: u32) -> Self {
        let mut item = Self {
            id: product.id,
            title: product.title.clone(),
            price: product.price,
            discounted_price: product.discounted_price(),
            quantity,
            total_price: Decimal::ZERO,
            stock: product.stock,
            thumbnail: product.thumbnail.clone(),
            brand: product.brand.clone(),
            category: product.category.clone(),
        };
        item.recompute_total();
        item
    }

    /// Price charged per unit.
    #[must_use]
    pub fn unit_price(&self) -> Decimal {
        round_off(self.discounted_price)
    }

    /// Clamp a quantity into `1..=stock` (stock only when known and non-zero).
    #[must_use]
    pub fn clamp_quantity(&self, quantity: u32) -> u32 {
        let upper = self.stock.filter(|stock| *stock > 0).unwrap_or(u32::MAX);
        quantity.clamp(1, upper)
    }

    pub fn recompute_total(&mut self) {
        self.total_price = round_off(Decimal::from(self.quantity) * self.unit_price());
    }
}
