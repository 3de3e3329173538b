//! Shopping cart container.

use cartwheel_core::{CartItem, ProductId, round_off};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Direction for a quantity nudge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum QtyChange {
    Inc,
    Dec,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CartAction {
    /// Add a line, or merge its quantity into the line with the same id.
    AddToCart(CartItem),
    RemoveFromCart(ProductId),
    ClearCart,
    /// Recompute `items_count` and `total_amount`.
    GetCartTotal,
    ToggleCartQty { id: ProductId, change: QtyChange },
    SetCartMessageOn,
    SetCartMessageOff,
}

impl CartAction {
    /// Whether the action changes the persisted line items.
    #[must_use]
    pub const fn mutates_items(&self) -> bool {
        matches!(
            self,
            Self::AddToCart(_) | Self::RemoveFromCart(_) | Self::ClearCart | Self::ToggleCartQty { .. }
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartState {
    pub carts: Vec<CartItem>,
    pub items_count: usize,
    pub total_amount: Decimal,
    pub is_cart_message_on: bool,
}

impl CartState {
    /// Start from previously persisted lines. Totals start at zero until
    /// `GetCartTotal` runs.
    #[must_use]
    pub fn with_items(carts: Vec<CartItem>) -> Self {
        Self {
            carts,
            ..Self::default()
        }
    }

    pub fn reduce(&mut self, action: CartAction) {
        match action {
            CartAction::AddToCart(item) => self.add(item),
            CartAction::RemoveFromCart(id) => self.carts.retain(|line| line.id != id),
            CartAction::ClearCart => self.carts.clear(),
            CartAction::GetCartTotal => {
                self.total_amount = round_off(self.carts.iter().map(|line| line.total_price).sum());
                self.items_count = self.carts.len();
            }
            CartAction::ToggleCartQty { id, change } => {
                if let Some(line) = self.carts.iter_mut().find(|line| line.id == id) {
                    let quantity = match change {
                        QtyChange::Inc => line.quantity.saturating_add(1),
                        QtyChange::Dec => line.quantity.saturating_sub(1),
                    };
                    line.quantity = line.clamp_quantity(quantity);
                    line.recompute_total();
                }
            }
            CartAction::SetCartMessageOn => self.is_cart_message_on = true,
            CartAction::SetCartMessageOff => self.is_cart_message_on = false,
        }
    }

    fn add(&mut self, mut item: CartItem) {
        if let Some(line) = self.carts.iter_mut().find(|line| line.id == item.id) {
            line.quantity = line.clamp_quantity(line.quantity.saturating_add(item.quantity));
            line.recompute_total();
        } else {
            item.quantity = item.clamp_quantity(item.quantity);
            item.recompute_total();
            self.carts.push(item);
        }
    }

    #[must_use]
    pub fn find(&self, id: ProductId) -> Option<&CartItem> {
        self.carts.iter().find(|line| line.id == id)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.carts.is_empty()
    }

    /// Units across all lines (the header badge shows lines, not units).
    #[must_use]
    pub fn total_units(&self) -> u32 {
        self.carts.iter().map(|line| line.quantity).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(id: u64, unit_cents: i64, quantity: u32, stock: Option<u32>) -> CartItem {
        let mut item = CartItem {
            id: ProductId::new(id),
            title: format!("Product {id}"),
            price: Decimal::new(unit_cents + 100, 2),
            discounted_price: Decimal::new(unit_cents, 2),
            quantity,
            total_price: Decimal::ZERO,
            stock,
            thumbnail: None,
            brand: None,
            category: None,
        };
        item.recompute_total();
        item
    }

    #[test]
    fn test_add_new_and_merge_existing() {
        let mut cart = CartState::default();
        cart.reduce(CartAction::AddToCart(line(1, 1050, 2, None)));
        cart.reduce(CartAction::AddToCart(line(2, 300, 1, None)));
        cart.reduce(CartAction::AddToCart(line(1, 1050, 3, None)));

        assert_eq!(cart.carts.len(), 2);
        let merged = cart.find(ProductId::new(1)).unwrap_or_else(|| panic!("line 1"));
        assert_eq!(merged.quantity, 5);
        assert_eq!(merged.total_price, Decimal::new(5250, 2));
    }

    #[test]
    fn test_add_respects_stock() {
        let mut cart = CartState::default();
        cart.reduce(CartAction::AddToCart(line(1, 100, 4, Some(5))));
        cart.reduce(CartAction::AddToCart(line(1, 100, 4, Some(5))));
        assert_eq!(cart.carts[0].quantity, 5);
    }

    #[test]
    fn test_total_is_sum_of_lines() {
        let mut cart = CartState::default();
        cart.reduce(CartAction::AddToCart(line(1, 333, 3, None)));
        cart.reduce(CartAction::AddToCart(line(2, 1, 1, None)));
        cart.reduce(CartAction::GetCartTotal);

        assert_eq!(cart.items_count, 2);
        assert_eq!(cart.total_amount, Decimal::new(1000, 2));
        assert_eq!(cart.total_units(), 4);
    }

    #[test]
    fn test_toggle_qty_floors_at_one_and_caps_at_stock() {
        let mut cart = CartState::with_items(vec![line(7, 250, 1, Some(2))]);
        let id = ProductId::new(7);

        cart.reduce(CartAction::ToggleCartQty { id, change: QtyChange::Dec });
        assert_eq!(cart.carts[0].quantity, 1);

        cart.reduce(CartAction::ToggleCartQty { id, change: QtyChange::Inc });
        cart.reduce(CartAction::ToggleCartQty { id, change: QtyChange::Inc });
        assert_eq!(cart.carts[0].quantity, 2);
        assert_eq!(cart.carts[0].total_price, Decimal::new(500, 2));
    }

    #[test]
    fn test_toggle_unknown_id_is_noop() {
        let mut cart = CartState::with_items(vec![line(1, 100, 1, None)]);
        let before = cart.clone();
        cart.reduce(CartAction::ToggleCartQty {
            id: ProductId::new(99),
            change: QtyChange::Inc,
        });
        assert_eq!(cart, before);
    }

    #[test]
    fn test_remove_and_clear() {
        let mut cart = CartState::with_items(vec![line(1, 100, 1, None), line(2, 100, 1, None)]);
        cart.reduce(CartAction::RemoveFromCart(ProductId::new(1)));
        assert_eq!(cart.carts.len(), 1);
        cart.reduce(CartAction::ClearCart);
        assert!(cart.is_empty());
    }

    #[test]
    fn test_message_flag_and_mutation_hint() {
        let mut cart = CartState::default();
        cart.reduce(CartAction::SetCartMessageOn);
        assert!(cart.is_cart_message_on);
        cart.reduce(CartAction::SetCartMessageOff);
        assert!(!cart.is_cart_message_on);

        assert!(CartAction::ClearCart.mutates_items());
        assert!(!CartAction::GetCartTotal.mutates_items());
        assert!(!CartAction::SetCartMessageOn.mutates_items());
    }
}
