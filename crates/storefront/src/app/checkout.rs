//! Addresses and the hand-off to the payment provider.

use cartwheel_core::{Address, AddressId, AddressInput, CurrencyCode, Price, round_off};
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::{info, instrument};

use super::Storefront;
use crate::api::{CheckoutLine, CheckoutSessionRequest};
use crate::error::{Result, StorefrontError};

/// Amounts shown on the checkout page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutSummary {
    pub subtotal: Decimal,
    pub delivery_charge: Decimal,
    pub total: Decimal,
    pub currency: CurrencyCode,
}

impl CheckoutSummary {
    #[must_use]
    pub fn new(subtotal: Decimal, delivery_charge: Decimal, currency: CurrencyCode) -> Self {
        Self {
            subtotal,
            delivery_charge,
            total: round_off(subtotal + delivery_charge),
            currency,
        }
    }

    #[must_use]
    pub const fn total_price(&self) -> Price {
        Price::new(self.total, self.currency)
    }
}

impl Storefront {
    /// Saved addresses of the signed-in user.
    ///
    /// # Errors
    ///
    /// Returns `NotAuthenticated` when signed out, or an API error.
    #[instrument(skip(self))]
    pub async fn fetch_addresses(&self) -> Result<Vec<Address>> {
        self.require_user("Please sign in to manage addresses")
            .await?;
        Ok(self.api().address().list().await?)
    }

    /// Validate and save a new address.
    ///
    /// # Errors
    ///
    /// Returns `Address` listing the blank required fields, or an API error.
    #[instrument(skip_all)]
    pub async fn add_address(&self, input: &AddressInput) -> Result<Address> {
        input.validate()?;
        self.require_user("Please sign in to manage addresses")
            .await?;
        let address = self.api().address().add(input).await?;
        info!(address_id = %address.id, "Address saved");
        Ok(address)
    }

    /// # Errors
    ///
    /// Returns `NotAuthenticated` when signed out, or an API error.
    #[instrument(skip(self))]
    pub async fn set_default_address(&self, id: &AddressId) -> Result<()> {
        self.require_user("Please sign in to manage addresses")
            .await?;
        Ok(self.api().address().set_default(id).await?)
    }

    /// Subtotal, delivery charge and total for the current cart.
    pub async fn checkout_summary(&self) -> CheckoutSummary {
        let cart = self.cart().await;
        let config = self.config();
        CheckoutSummary::new(cart.total_amount, config.delivery_charge, config.currency)
    }

    /// Create a payment session for the cart and return the redirect URL.
    ///
    /// The cart is left intact; it is cleared once the payment provider
    /// confirms the order.
    ///
    /// # Errors
    ///
    /// Returns `EmptyCart`, `NotAuthenticated`, or an API error.
    #[instrument(skip(self))]
    pub async fn checkout(&self, address_id: &AddressId) -> Result<String> {
        self.require_user("Please sign in to check out").await?;
        let cart = self.cart().await;
        if cart.is_empty() {
            return Err(StorefrontError::EmptyCart);
        }
        if address_id.as_str().trim().is_empty() {
            return Err(StorefrontError::InvalidInput(
                "Please select a delivery address".to_string(),
            ));
        }

        let request = CheckoutSessionRequest {
            items: cart.carts.iter().map(CheckoutLine::from).collect(),
            address_id: address_id.clone(),
            delivery_charge: self.config().delivery_charge,
        };
        let session = self
            .api()
            .payment()
            .create_checkout_session(&request)
            .await?;
        info!(lines = request.items.len(), "Checkout session created");
        Ok(session.url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_adds_delivery_charge() {
        let summary = CheckoutSummary::new(
            Decimal::new(12_345, 2),
            Decimal::from(40),
            CurrencyCode::USD,
        );
        assert_eq!(summary.total, Decimal::new(16_345, 2));
        assert_eq!(summary.total_price().to_string(), "$163.45");
    }
}
