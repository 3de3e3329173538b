//! `/api/orders` endpoints.

use cartwheel_core::{Order, OrderId, UserId};
use serde::Deserialize;
use tracing::instrument;

use super::{ApiClient, ApiError, segment};

#[derive(Deserialize)]
struct CancelResponse {
    order: Order,
}

/// Order history and cancellation.
pub struct OrdersApi<'a> {
    client: &'a ApiClient,
}

impl<'a> OrdersApi<'a> {
    pub(super) const fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    /// All orders placed by a user.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    #[instrument(skip_all, fields(user_id = %user_id))]
    pub async fn for_user(&self, user_id: &UserId) -> Result<Vec<Order>, ApiError> {
        let endpoint = format!("/api/orders/user/{}", segment(user_id.as_str()));
        self.client.get(&endpoint).await
    }

    /// # Errors
    ///
    /// Returns an error if the request fails or the order is unknown.
    #[instrument(skip_all, fields(order_id = %order_id))]
    pub async fn details(&self, order_id: &OrderId) -> Result<Order, ApiError> {
        let endpoint = format!("/api/orders/{}", segment(order_id.as_str()));
        self.client.get(&endpoint).await
    }

    /// Cancel an order and return its updated record.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the server refuses.
    #[instrument(skip_all, fields(order_id = %order_id))]
    pub async fn cancel(&self, order_id: &OrderId) -> Result<Order, ApiError> {
        let endpoint = format!("/api/orders/{}/cancel", segment(order_id.as_str()));
        let response: CancelResponse = self
            .client
            .post(&endpoint, &serde_json::Value::Null)
            .await?;
        Ok(response.order)
    }
}
