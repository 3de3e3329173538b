//! `/api/address` endpoints.

use cartwheel_core::{Address, AddressId, AddressInput};
use serde_json::Value;
use tracing::instrument;

use super::{ApiClient, ApiError, Envelope, segment};

/// Saved shipping addresses of the signed-in user.
pub struct AddressApi<'a> {
    client: &'a ApiClient,
}

impl<'a> AddressApi<'a> {
    pub(super) const fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    /// # Errors
    ///
    /// Returns an error if the request fails or is rejected.
    #[instrument(skip_all)]
    pub async fn list(&self) -> Result<Vec<Address>, ApiError> {
        let envelope: Envelope<Vec<Address>> = self.client.get("/api/address").await?;
        envelope.into_data()
    }

    /// # Errors
    ///
    /// Returns an error if the request fails or the server rejects the address.
    #[instrument(skip_all, fields(city = %input.city))]
    pub async fn add(&self, input: &AddressInput) -> Result<Address, ApiError> {
        let envelope: Envelope<Address> = self.client.post("/api/address", input).await?;
        envelope.into_data()
    }

    /// # Errors
    ///
    /// Returns an error if the request fails or the address is unknown.
    #[instrument(skip_all, fields(address_id = %id))]
    pub async fn set_default(&self, id: &AddressId) -> Result<(), ApiError> {
        let endpoint = format!("/api/address/{}/default", segment(id.as_str()));
        let envelope: Envelope<Value> = self.client.patch(&endpoint, &Value::Null).await?;
        envelope.into_unit()
    }
}
