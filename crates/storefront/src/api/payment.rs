//! Hosted checkout session creation.

use cartwheel_core::{AddressId, CartItem};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use super::{ApiClient, ApiError};

/// One line sent to the payment provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheckoutLine {
    pub name: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    pub quantity: u32,
}

impl From<&CartItem> for CheckoutLine {
    fn from(item: &CartItem) -> Self {
        Self {
            name: item.title.clone(),
            price: item.unit_price(),
            quantity: item.quantity,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutSessionRequest {
    pub items: Vec<CheckoutLine>,
    pub address_id: AddressId,
    #[serde(with = "rust_decimal::serde::float")]
    pub delivery_charge: Decimal,
}

/// The hosted payment page to send the shopper to.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CheckoutSession {
    pub url: String,
}

pub struct PaymentApi<'a> {
    client: &'a ApiClient,
}

impl<'a> PaymentApi<'a> {
    pub(super) const fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    /// # Errors
    ///
    /// Returns an error if the request fails or the provider refuses the cart.
    #[instrument(skip_all, fields(lines = request.items.len(), address_id = %request.address_id))]
    pub async fn create_checkout_session(
        &self,
        request: &CheckoutSessionRequest,
    ) -> Result<CheckoutSession, ApiError> {
        self.client
            .post("/api/payment/create-checkout-session", request)
            .await
    }
}
