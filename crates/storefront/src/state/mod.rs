//! State containers and their reducers.
//!
//! Each container is a plain struct mutated only through `reduce`. Reducers
//! never perform I/O; the [`crate::app`] facade runs the remote calls, feeds
//! their outcomes back in as actions and mirrors the cart and user into local
//! storage.

mod auth;
mod cart;
mod category;
mod modal;
mod orders;
mod product;
mod profile;
mod search;

pub use auth::{AuthAction, AuthState};
pub use cart::{CartAction, CartState, QtyChange};
pub use category::{CategoryAction, CategoryState};
pub use modal::{ModalAction, ModalState};
pub use orders::{OrdersAction, OrdersState};
pub use product::{ProductAction, ProductState};
pub use profile::{ProfileAction, ProfileState};
pub use search::{SearchAction, SearchState};

use cartwheel_core::{CartItem, User};
use serde::Serialize;

/// Every state container in one place.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Store {
    pub cart: CartState,
    pub category: CategoryState,
    pub product: ProductState,
    pub search: SearchState,
    pub auth: AuthState,
    pub orders: OrdersState,
    pub profile: ProfileState,
    pub modal: ModalState,
}

impl Store {
    /// Rehydrate from what a previous session left in local storage.
    #[must_use]
    pub fn hydrate(cart: Vec<CartItem>, user: Option<User>) -> Self {
        let mut store = Self {
            cart: CartState::with_items(cart),
            auth: AuthState::from_stored(user),
            ..Self::default()
        };
        store.cart.reduce(CartAction::GetCartTotal);
        store
    }
}
