//! Cart operations. Every change to the lines is mirrored into local storage.

use cartwheel_core::{CartItem, Product, ProductId};
use tracing::{debug, instrument};

use super::Storefront;
use crate::error::{Result, StorefrontError};
use crate::state::{CartAction, CartState, QtyChange};
use crate::storage::{keys, store_json};

impl Storefront {
    /// Apply a cart action, refresh the totals and persist the lines when
    /// they changed. Returns the updated cart.
    ///
    /// # Errors
    ///
    /// Returns an error if the cart cannot be written to local storage.
    pub async fn dispatch_cart(&self, action: CartAction) -> Result<CartState> {
        let mut store = self.store().await;
        self.apply_cart(&mut store.cart, action)?;
        Ok(store.cart.clone())
    }

    fn apply_cart(&self, cart: &mut CartState, action: CartAction) -> Result<()> {
        let persist = action.mutates_items();
        cart.reduce(action);
        cart.reduce(CartAction::GetCartTotal);
        if persist {
            store_json(self.storage(), keys::CART, &cart.carts)?;
            debug!(lines = cart.carts.len(), "Persisted cart");
        }
        Ok(())
    }

    /// Add `quantity` units of a catalog product.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` for a zero quantity or an out-of-stock product,
    /// or a storage error.
    #[instrument(skip(self, product), fields(product_id = %product.id))]
    pub async fn add_to_cart(&self, product: &Product, quantity: u32) -> Result<CartState> {
        if quantity == 0 {
            return Err(StorefrontError::InvalidInput(
                "Quantity must be at least 1".to_string(),
            ));
        }
        if !product.in_stock() {
            return Err(StorefrontError::InvalidInput(format!(
                "{} is out of stock",
                product.title
            )));
        }
        let mut store = self.store().await;
        self.apply_cart(
            &mut store.cart,
            CartAction::AddToCart(CartItem::from_product(product, quantity)),
        )?;
        store.cart.reduce(CartAction::SetCartMessageOn);
        Ok(store.cart.clone())
    }

    /// # Errors
    ///
    /// Returns an error if the cart cannot be persisted.
    #[instrument(skip(self))]
    pub async fn remove_from_cart(&self, id: ProductId) -> Result<CartState> {
        self.dispatch_cart(CartAction::RemoveFromCart(id)).await
    }

    /// # Errors
    ///
    /// Returns an error if the cart cannot be persisted.
    #[instrument(skip(self))]
    pub async fn toggle_cart_qty(&self, id: ProductId, change: QtyChange) -> Result<CartState> {
        self.dispatch_cart(CartAction::ToggleCartQty { id, change })
            .await
    }

    /// # Errors
    ///
    /// Returns an error if the cart cannot be persisted.
    #[instrument(skip(self))]
    pub async fn clear_cart(&self) -> Result<CartState> {
        self.dispatch_cart(CartAction::ClearCart).await
    }

    /// The cart with up-to-date totals.
    pub async fn cart(&self) -> CartState {
        let mut store = self.store().await;
        store.cart.reduce(CartAction::GetCartTotal);
        store.cart.clone()
    }
}
