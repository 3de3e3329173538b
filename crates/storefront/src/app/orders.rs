//! Order history, details and cancellation.

use cartwheel_core::{Order, OrderId};
use tracing::{info, instrument, warn};

use super::Storefront;
use crate::error::{Result, StorefrontError};
use crate::state::OrdersAction;

impl Storefront {
    /// # Errors
    ///
    /// Returns `NotAuthenticated` when no user is signed in, or an API error.
    #[instrument(skip(self))]
    pub async fn fetch_user_orders(&self) -> Result<Vec<Order>> {
        let user = match self.require_user("User not authenticated").await {
            Ok(user) => user,
            Err(e) => {
                warn!("Skipping order fetch for signed-out user");
                self.store()
                    .await
                    .orders
                    .reduce(OrdersAction::FetchRejected(e.user_message()));
                return Err(e);
            }
        };
        self.store().await.orders.reduce(OrdersAction::FetchPending);

        let outcome = self.api().orders().for_user(&user.id).await;
        let mut store = self.store().await;
        match outcome {
            Ok(orders) => {
                store
                    .orders
                    .reduce(OrdersAction::UserOrdersFulfilled(orders.clone()));
                Ok(orders)
            }
            Err(e) => {
                let err = StorefrontError::from(e);
                store
                    .orders
                    .reduce(OrdersAction::FetchRejected(err.user_message()));
                Err(err)
            }
        }
    }

    /// # Errors
    ///
    /// Returns `NotAuthenticated` when no user is signed in, or an API error.
    #[instrument(skip(self), fields(order_id = %order_id))]
    pub async fn fetch_order_details(&self, order_id: &OrderId) -> Result<Order> {
        self.require_user("User not authenticated").await?;
        self.store().await.orders.reduce(OrdersAction::FetchPending);

        let outcome = self.api().orders().details(order_id).await;
        let mut store = self.store().await;
        match outcome {
            Ok(order) => {
                store
                    .orders
                    .reduce(OrdersAction::DetailsFulfilled(Box::new(order.clone())));
                Ok(order)
            }
            Err(e) => {
                let err = StorefrontError::from(e);
                store
                    .orders
                    .reduce(OrdersAction::FetchRejected(err.user_message()));
                Err(err)
            }
        }
    }

    /// Cancel an order that has not shipped yet.
    ///
    /// When the order is already loaded, its status is checked locally first
    /// and an order past `processing` is refused without a request.
    ///
    /// # Errors
    ///
    /// Returns `OrderNotCancellable`, `NotAuthenticated`, or an API error.
    #[instrument(skip(self), fields(order_id = %order_id))]
    pub async fn cancel_order(&self, order_id: &OrderId) -> Result<Order> {
        self.require_user("User not authenticated").await?;

        let known_status = {
            let store = self.store().await;
            store
                .orders
                .orders
                .iter()
                .chain(store.orders.current_order.iter())
                .find(|order| &order.order_id == order_id)
                .map(|order| order.status)
        };
        if let Some(status) = known_status
            && !status.is_cancellable()
        {
            let err = StorefrontError::OrderNotCancellable(status);
            self.store()
                .await
                .orders
                .reduce(OrdersAction::CancelRejected(err.user_message()));
            return Err(err);
        }

        self.store()
            .await
            .orders
            .reduce(OrdersAction::CancelPending(order_id.clone()));

        let outcome = self.api().orders().cancel(order_id).await;
        let mut store = self.store().await;
        match outcome {
            Ok(order) => {
                info!(status = %order.status, "Order cancelled");
                store
                    .orders
                    .reduce(OrdersAction::CancelFulfilled(Box::new(order.clone())));
                Ok(order)
            }
            Err(e) => {
                let err = StorefrontError::from(e);
                store
                    .orders
                    .reduce(OrdersAction::CancelRejected(err.user_message()));
                Err(err)
            }
        }
    }
}
